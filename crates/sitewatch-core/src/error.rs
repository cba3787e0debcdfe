// ── Core error types ──
//
// Lifecycle functions are total and never fail. Errors come from the
// strict store API (unknown ids) and from the data-access boundary
// (malformed records, IO, unreachable sources).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Data errors ──────────────────────────────────────────────────
    #[error("Alert not found: {id}")]
    AlertNotFound { id: String },

    #[error("Invalid alert record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    // ── Source errors ────────────────────────────────────────────────
    #[error("Alert source '{source_name}' failed: {message}")]
    Source {
        source_name: String,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed alert data: {0}")]
    Json(#[from] serde_json::Error),
}
