// ── JSON file source ──

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{AlertSource, decode_alerts};
use crate::error::CoreError;
use crate::model::Alert;

/// Alerts stored as a JSON array on disk.
///
/// A missing file reads as an empty collection; the file is created on
/// the first save.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AlertSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_alerts(&self) -> Result<Vec<Alert>, CoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "alert file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let alerts = decode_alerts(&bytes)?;
        debug!(path = %self.path.display(), count = alerts.len(), "loaded alerts");
        Ok(alerts)
    }

    async fn save_alerts(&self, alerts: &[Alert]) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut json = serde_json::to_vec_pretty(alerts)?;
        json.push(b'\n');
        tokio::fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), count = alerts.len(), "saved alerts");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::source::mock::demo_alerts;

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("alerts.json"));
        assert!(source.fetch_alerts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("alerts.json");
        let source = FileSource::new(&path);

        let alerts = demo_alerts(1_715_688_000_000);
        source.save_alerts(&alerts).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"resolvedAt\""));
        assert!(text.contains("\n  {"));
        assert_eq!(source.fetch_alerts().await.unwrap(), alerts);
    }

    #[tokio::test]
    async fn invalid_record_is_rejected_with_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alerts.json");
        std::fs::write(
            &path,
            r#"[{"id":"","timestamp":1,"type":"power","severity":"low","title":"t",
                "description":"","source":"","status":"active","acknowledged":false}]"#,
        )
        .unwrap();

        let err = FileSource::new(&path).fetch_alerts().await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord { index: 0, .. }));
    }
}
