// ── Alert domain types ──
//
// The serialized form keeps the dashboard's field names (`type`,
// `resolvedAt`) and epoch-millisecond instants. Access-log and telemetry
// records elsewhere in the dashboard use epoch seconds; alerts do not.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Epoch milliseconds.
pub type EpochMillis = i64;

/// Category of the condition that raised the alert. Only used for
/// grouping and icons. The set is open: tags this build does not know
/// are kept verbatim in [`AlertType::Other`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertType {
    Security,
    Temperature,
    Power,
    Maintenance,
    Other(String),
}

impl AlertType {
    /// Tags with dedicated presentation, in table order.
    pub const KNOWN: [Self; 4] = [Self::Security, Self::Temperature, Self::Power, Self::Maintenance];

    /// Wire tag, e.g. `"power"` or the raw unknown tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Security => "security",
            Self::Temperature => "temperature",
            Self::Power => "power",
            Self::Maintenance => "maintenance",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for AlertType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "security" => Self::Security,
            "temperature" => Self::Temperature,
            "power" => Self::Power,
            "maintenance" => Self::Maintenance,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for AlertType {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_owned())
    }
}

impl From<AlertType> for String {
    fn from(t: AlertType) -> Self {
        match t {
            AlertType::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AlertType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// Alert severity. Variant order is the presentation order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

impl AlertSeverity {
    /// Sort rank: high=0, medium=1, low=2.
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Primary lifecycle state. `Resolved` is terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
}

/// A detected abnormal condition requiring operator attention.
///
/// `resolved_at` is present exactly when `status` is
/// [`AlertStatus::Resolved`]. Deserialization enforces this, so records
/// read from a data source are always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AlertRecord")]
pub struct Alert {
    pub id: String,
    pub timestamp: EpochMillis,
    #[serde(rename = "type")]
    pub kind: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub source: String,
    pub status: AlertStatus,
    pub acknowledged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<EpochMillis>,
}

impl Alert {
    /// A freshly raised alert: active and unacknowledged.
    pub fn new(
        id: impl Into<String>,
        timestamp: EpochMillis,
        kind: AlertType,
        severity: AlertSeverity,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            kind,
            severity,
            title: title.into(),
            description: String::new(),
            source: String::new(),
            status: AlertStatus::Active,
            acknowledged: false,
            resolved_at: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }

    pub fn is_resolved(&self) -> bool {
        self.status == AlertStatus::Resolved
    }

    /// Instant used when ordering or bucketing resolved alerts.
    pub fn resolved_or_created(&self) -> EpochMillis {
        self.resolved_at.unwrap_or(self.timestamp)
    }
}

// ── Boundary validation ─────────────────────────────────────────────

/// Why an incoming record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("alert id must not be empty")]
    EmptyId,

    #[error("alert '{id}' is resolved but has no resolvedAt")]
    MissingResolvedAt { id: String },

    #[error("alert '{id}' is active but carries resolvedAt")]
    UnexpectedResolvedAt { id: String },

    #[error("alert '{id}' is resolved but not acknowledged")]
    ResolvedUnacknowledged { id: String },
}

/// Wire shape accepted from data sources, before invariants are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertRecord {
    id: String,
    timestamp: EpochMillis,
    #[serde(rename = "type")]
    kind: AlertType,
    severity: AlertSeverity,
    title: String,
    description: String,
    source: String,
    status: AlertStatus,
    acknowledged: bool,
    #[serde(default)]
    resolved_at: Option<EpochMillis>,
}

impl TryFrom<AlertRecord> for Alert {
    type Error = RecordError;

    fn try_from(r: AlertRecord) -> Result<Self, Self::Error> {
        if r.id.trim().is_empty() {
            return Err(RecordError::EmptyId);
        }
        match (r.status, r.resolved_at) {
            (AlertStatus::Resolved, None) => {
                return Err(RecordError::MissingResolvedAt { id: r.id });
            }
            (AlertStatus::Active, Some(_)) => {
                return Err(RecordError::UnexpectedResolvedAt { id: r.id });
            }
            (AlertStatus::Resolved, Some(_)) if !r.acknowledged => {
                return Err(RecordError::ResolvedUnacknowledged { id: r.id });
            }
            _ => {}
        }
        Ok(Self {
            id: r.id,
            timestamp: r.timestamp,
            kind: r.kind,
            severity: r.severity,
            title: r.title,
            description: r.description,
            source: r.source,
            status: r.status,
            acknowledged: r.acknowledged,
            resolved_at: r.resolved_at,
        })
    }
}
