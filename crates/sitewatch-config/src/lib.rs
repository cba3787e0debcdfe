//! Configuration for the sitewatch CLI.
//!
//! TOML file loading layered over serialized defaults and `SITEWATCH_`
//! environment variables, plus translation to the runtime types in
//! `sitewatch_core` (monitor settings and the alert source).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use sitewatch_core::config::DEFAULT_REFRESH_INTERVAL_SECS;
use sitewatch_core::{AlertSettings, AlertSource, FileSource, MockSource, MonitorConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Seconds between background refreshes. 0 disables them.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Where alerts come from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Global output defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Thresholds, notification channels and recipients.
    #[serde(default)]
    pub alerts: AlertSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            source: SourceConfig::default(),
            defaults: Defaults::default(),
            alerts: AlertSettings::default(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Canned demo alerts held in memory.
    #[default]
    Mock,
    /// JSON array of alerts on disk.
    File,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    /// Alert file, required when `kind = "file"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "sitewatch", "sitewatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sitewatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from defaults, the TOML file at `path`, and the
/// environment. A missing file contributes nothing.
///
/// Nested keys use a double underscore: `SITEWATCH_SOURCE__KIND=file`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = file_figment(path)
        .merge(Env::prefixed("SITEWATCH_").ignore(&["CONFIG", "LOG"]).split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load only what the file at `path` says, on top of the defaults.
///
/// Used before editing and saving, so one-off environment overrides
/// never end up on disk. Not validated: the environment may be what
/// completes the file.
pub fn load_file_config(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config file for editing");
    Ok(file_figment(path).extract()?)
}

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

impl Config {
    /// Cross-field checks figment cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.kind == SourceKind::File && self.source.path.is_none() {
            return Err(ConfigError::Validation {
                field: "source.path".into(),
                reason: "required when source.kind = \"file\"".into(),
            });
        }
        Ok(())
    }

    /// Runtime monitor settings.
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            refresh_interval_secs: self.refresh_interval_secs,
        }
    }

    /// Build the configured alert source.
    pub fn build_source(&self) -> Result<Arc<dyn AlertSource>, ConfigError> {
        match (self.source.kind, &self.source.path) {
            (SourceKind::Mock, _) => Ok(Arc::new(MockSource::new())),
            (SourceKind::File, Some(path)) => Ok(Arc::new(FileSource::new(path))),
            (SourceKind::File, None) => Err(ConfigError::Validation {
                field: "source.path".into(),
                reason: "required when source.kind = \"file\"".into(),
            }),
        }
    }
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sitewatch_core::{BoundedMetric, NotificationChannel};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.refresh_interval_secs, 30);
        assert_eq!(cfg.source.kind, SourceKind::Mock);
        assert_eq!(cfg.alerts.thresholds.temperature.high, 25.0);
        assert_eq!(cfg.alerts.recipients.len(), 1);
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
refresh_interval_secs = 10

[source]
kind = "file"
path = "/var/lib/sitewatch/alerts.json"

[alerts.thresholds.humidity]
enabled = false
high = 70.0
low = 20.0
"#,
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.refresh_interval_secs, 10);
        assert_eq!(cfg.source.kind, SourceKind::File);
        assert!(!cfg.alerts.thresholds.humidity.enabled);
        assert_eq!(cfg.alerts.thresholds.humidity.high, 70.0);
        assert_eq!(cfg.alerts.thresholds.temperature.low, 18.0);
        assert_eq!(cfg.monitor_config().refresh_interval_secs, 10);
    }

    #[test]
    fn file_source_requires_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[source]\nkind = \"file\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "source.path"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "refresh_interval_secs = \"soon\"").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Figment(_))));
        assert!(matches!(load_file_config(&path), Err(ConfigError::Figment(_))));
    }

    #[test]
    fn file_config_skips_cross_field_checks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[source]\nkind = \"file\"\n").unwrap();

        assert!(load_config(&path).is_err());
        let cfg = load_file_config(&path).unwrap();
        assert_eq!(cfg.source.kind, SourceKind::File);
        assert_eq!(cfg.refresh_interval_secs, 30);
    }

    #[test]
    fn save_then_load_preserves_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut cfg = Config::default();
        cfg.alerts.thresholds = cfg.alerts.thresholds.set_high(BoundedMetric::Temperature, 27.0);
        cfg.alerts.notifications = cfg.alerts.notifications.set(NotificationChannel::Sms, true);
        save_config(&cfg, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[alerts.thresholds.temperature]"), "{text}");
        assert_eq!(load_config(&path).unwrap(), cfg);
    }

    #[test]
    fn build_source_matches_kind() {
        let cfg = Config::default();
        assert_eq!(cfg.build_source().unwrap().name(), "mock");

        let cfg = Config {
            source: SourceConfig {
                kind: SourceKind::File,
                path: Some("alerts.json".into()),
            },
            ..Config::default()
        };
        assert_eq!(cfg.build_source().unwrap().name(), "file");
    }
}
