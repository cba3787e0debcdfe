// ── Alert data sources ──
//
// The data-access boundary. A source delivers the full alert set and
// accepts the collection back after operator transitions. Records are
// validated on the way in; the store only ever holds well-formed alerts.

mod file;
mod mock;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::model::Alert;

pub use file::FileSource;
pub use mock::{MockSource, demo_alerts};

/// A provider of alert records.
///
/// Implementations must be cheap to share behind an `Arc`; the monitor
/// calls them from its background refresh task.
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Fetch the complete, current alert set.
    async fn fetch_alerts(&self) -> Result<Vec<Alert>, CoreError>;

    /// Persist the collection after an operator transition.
    async fn save_alerts(&self, alerts: &[Alert]) -> Result<(), CoreError>;
}

/// Decode a JSON array of alert records, reporting the index of the
/// first record that fails validation.
pub fn decode_alerts(bytes: &[u8]) -> Result<Vec<Alert>, CoreError> {
    let raw: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| CoreError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}
