//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use sitewatch_config::ConfigError;
use sitewatch_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const SOURCE: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(sitewatch::not_found),
        help("Run: sitewatch {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Source ───────────────────────────────────────────────────────
    #[error("Alert source '{source_name}' failed: {message}")]
    #[diagnostic(
        code(sitewatch::source_failed),
        help("Check the [source] section of your config: sitewatch config show")
    )]
    SourceFailed {
        source_name: String,
        message: String,
    },

    #[error("Alert data is invalid: {message}")]
    #[diagnostic(
        code(sitewatch::invalid_data),
        help("Fix or remove the offending record in the alert file.")
    )]
    InvalidData { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sitewatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(sitewatch::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(sitewatch::config),
        help("Inspect the file with: sitewatch config show")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(sitewatch::render))]
    Render(String),

    #[error("Internal error: {0}")]
    #[diagnostic(code(sitewatch::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::SourceFailed { .. } | Self::InvalidData { .. } => exit_code::SOURCE,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AlertNotFound { id } => CliError::NotFound {
                resource_type: "alert".into(),
                identifier: id,
                list_command: "alerts list".into(),
            },

            CoreError::Source {
                source_name,
                message,
            } => CliError::SourceFailed {
                source_name,
                message,
            },

            err @ (CoreError::InvalidRecord { .. } | CoreError::Json(_)) => {
                CliError::InvalidData {
                    message: err.to_string(),
                }
            }

            CoreError::Io(e) => CliError::SourceFailed {
                source_name: "file".into(),
                message: e.to_string(),
            },
        }
    }
}
