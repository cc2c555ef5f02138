//! Upload sinks.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use clausewise_core::{UploadError, UploadFile, UploadReceipt};
use rand::Rng;
use tracing::{info, warn};

use crate::source::pause;

#[async_trait]
pub trait UploadSink: Send + Sync {
    async fn upload(&self, file: &UploadFile) -> Result<UploadReceipt, UploadError>;
}

/// Pretends to store files: waits, then succeeds with a fixed probability.
#[derive(Debug, Clone)]
pub struct SimulatedUploadSink {
    delay: Duration,
    success_rate: f64,
}

impl Default for SimulatedUploadSink {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
            success_rate: 0.9,
        }
    }
}

impl SimulatedUploadSink {
    /// `success_rate` is clamped into `[0, 1]`; NaN means never succeed.
    pub fn new(delay: Duration, success_rate: f64) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self {
            delay,
            success_rate,
        }
    }
}

#[async_trait]
impl UploadSink for SimulatedUploadSink {
    async fn upload(&self, file: &UploadFile) -> Result<UploadReceipt, UploadError> {
        file.validate()?;
        pause(self.delay).await;

        let succeeded = rand::thread_rng().gen_bool(self.success_rate);
        if !succeeded {
            warn!(name = %file.name, "simulated upload failed");
            return Err(UploadError::Failed("Upload failed".to_string()));
        }

        let now = Utc::now();
        let receipt = UploadReceipt {
            id: now.timestamp_millis().to_string(),
            name: file.name.clone(),
            size: file.size,
            status: "success".to_string(),
            uploaded_at: now,
        };
        info!(name = %receipt.name, size = receipt.size, "simulated upload stored");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_succeeds_at_rate_one() {
        let sink = SimulatedUploadSink::new(Duration::ZERO, 1.0);
        let receipt = sink.upload(&UploadFile::new("msa.pdf", 2048)).await.unwrap();
        assert_eq!(receipt.name, "msa.pdf");
        assert_eq!(receipt.size, 2048);
        assert_eq!(receipt.status, "success");
    }

    #[tokio::test]
    async fn always_fails_at_rate_zero() {
        let sink = SimulatedUploadSink::new(Duration::ZERO, 0.0);
        let err = sink.upload(&UploadFile::new("msa.pdf", 2048)).await.unwrap_err();
        assert_eq!(err, UploadError::Failed("Upload failed".into()));
    }

    #[tokio::test]
    async fn rejects_before_waiting() {
        let sink = SimulatedUploadSink::new(Duration::from_secs(60), 1.0);
        let err = sink.upload(&UploadFile::new("song.mp3", 10)).await.unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
    }

    #[test]
    fn success_rate_is_clamped() {
        let sink = SimulatedUploadSink::new(Duration::ZERO, 7.0);
        assert_eq!(sink.success_rate, 1.0);
        let sink = SimulatedUploadSink::new(Duration::ZERO, -0.5);
        assert_eq!(sink.success_rate, 0.0);
    }

    #[tokio::test]
    async fn nan_success_rate_fails_instead_of_panicking() {
        let sink = SimulatedUploadSink::new(Duration::ZERO, f64::NAN);
        assert_eq!(sink.success_rate, 0.0);
        let err = sink.upload(&UploadFile::new("a.pdf", 1)).await.unwrap_err();
        assert_eq!(err, UploadError::Failed("Upload failed".into()));
    }
}
