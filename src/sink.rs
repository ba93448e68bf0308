//! Result persistence.
//!
//! The engine hands its finished result collection to a [`ResultSink`];
//! the provided implementation writes a JSON array to a file. The sink is
//! a collaborator of the engine, not part of it, so alternative backends
//! plug in behind the trait.

use crate::error::SinkError;
use crate::scanner::ProbeResult;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Destination for a completed scan's result collection.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist the ordered, final result collection.
    async fn persist(&self, results: &[ProbeResult]) -> Result<(), SinkError>;
}

/// Writes results as a pretty-printed JSON array.
///
/// Each record carries `ip`, `port`, `status`, `service`, `banner`, and an
/// ISO-8601 `timestamp`. Closed and filtered ports are never emitted.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Create a sink targeting `path`. The file is created or truncated
    /// on persist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The output path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl ResultSink for JsonFileSink {
    async fn persist(&self, results: &[ProbeResult]) -> Result<(), SinkError> {
        let json = serde_json::to_string_pretty(results)?;
        tokio::fs::write(&self.path, json).await?;
        info!(path = %self.path.display(), records = results.len(), "results saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PortStatus;
    use chrono::Utc;

    fn sample_result(port: u16) -> ProbeResult {
        ProbeResult {
            ip: "127.0.0.1".to_string(),
            port,
            status: PortStatus::Open,
            service: "SSH".to_string(),
            banner: "SSH-2.0-OpenSSH_9.6".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_json_sink_writes_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan_results.json");
        let sink = JsonFileSink::new(&path);

        sink.persist(&[sample_result(22), sample_result(80)])
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["ip"], "127.0.0.1");
        assert_eq!(records[0]["port"], 22);
        assert_eq!(records[0]["status"], "open");
        assert_eq!(records[0]["service"], "SSH");
        assert!(records[0]["timestamp"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_json_sink_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let sink = JsonFileSink::new(&path);

        sink.persist(&[]).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[tokio::test]
    async fn test_json_sink_unwritable_path_errors() {
        let sink = JsonFileSink::new("/nonexistent-dir/out.json");
        assert!(matches!(
            sink.persist(&[sample_result(22)]).await,
            Err(SinkError::WriteFailed(_))
        ));
    }
}
