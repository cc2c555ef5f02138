//! Upload bookkeeping: file validation, per-file progress, and the panel
//! that hosts it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Extensions the upload panel accepts, lowercase, without the dot.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Largest accepted file: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("{name}: unsupported file type (expected PDF, DOC or DOCX)")]
    UnsupportedType { name: String },
    #[error("{name}: {size} exceeds the 10 MB limit")]
    TooLarge { name: String, size: String },
    #[error("{0}")]
    Failed(String),
}

/// A file handed to an upload sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Check type and size against what the panel accepts.
    pub fn validate(&self) -> Result<(), UploadError> {
        let ext = self
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        if !ext.is_some_and(|e| ACCEPTED_EXTENSIONS.contains(&e.as_str())) {
            return Err(UploadError::UnsupportedType {
                name: self.name.clone(),
            });
        }
        if self.size > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                name: self.name.clone(),
                size: format_file_size(self.size),
            });
        }
        Ok(())
    }
}

/// Metadata returned by a sink on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub status: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Success(UploadReceipt),
    Error(String),
}

impl UploadStatus {
    pub fn label(&self) -> String {
        match self {
            UploadStatus::Pending => "Pending...".to_string(),
            UploadStatus::Uploading => "Uploading...".to_string(),
            UploadStatus::Success(_) => "Uploaded successfully".to_string(),
            UploadStatus::Error(msg) if msg.is_empty() => "Upload failed".to_string(),
            UploadStatus::Error(msg) => msg.clone(),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, UploadStatus::Success(_) | UploadStatus::Error(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEntry {
    pub id: u64,
    pub file: UploadFile,
    pub status: UploadStatus,
}

/// Ordered list of files added to the panel and their upload state.
#[derive(Debug, Clone, Default)]
pub struct UploadQueue {
    entries: Vec<UploadEntry>,
    next_id: u64,
}

impl UploadQueue {
    /// Add a file as pending; returns its entry id.
    pub fn push(&mut self, file: UploadFile) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(UploadEntry {
            id,
            file,
            status: UploadStatus::Pending,
        });
        id
    }

    pub fn start(&mut self, id: u64) {
        self.set(id, UploadStatus::Uploading);
    }

    /// Record a sink outcome for `id`.
    pub fn finish(&mut self, id: u64, outcome: Result<UploadReceipt, UploadError>) {
        let status = match outcome {
            Ok(receipt) => UploadStatus::Success(receipt),
            Err(e) => UploadStatus::Error(e.to_string()),
        };
        self.set(id, status);
    }

    pub fn remove(&mut self, id: u64) -> Option<UploadEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[UploadEntry] {
        &self.entries
    }

    pub fn succeeded(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, UploadStatus::Success(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, UploadStatus::Error(_)))
            .count()
    }

    fn set(&mut self, id: u64, status: UploadStatus) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.status = status;
        }
    }
}

/// The upload surface: an explicit visibility flag plus its queue.
///
/// Whoever owns the panel hands out [`open`](Self::open) /
/// [`close`](Self::close); closing discards the queue.
#[derive(Debug, Clone, Default)]
pub struct UploadPanel {
    visible: bool,
    queue: UploadQueue,
}

impl UploadPanel {
    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.queue.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn queue(&self) -> &UploadQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut UploadQueue {
        &mut self.queue
    }
}

/// Human-readable byte count using 1024 steps, e.g. `1536` → `"1.5 KB"`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn receipt(name: &str) -> UploadReceipt {
        UploadReceipt {
            id: "1".into(),
            name: name.into(),
            size: 10,
            status: "success".into(),
            uploaded_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn validation_checks_extension_and_size() {
        assert!(UploadFile::new("lease.PDF", 1000).validate().is_ok());
        assert!(UploadFile::new("nda.docx", MAX_UPLOAD_BYTES).validate().is_ok());
        assert!(matches!(
            UploadFile::new("photo.png", 10).validate(),
            Err(UploadError::UnsupportedType { .. })
        ));
        assert!(matches!(
            UploadFile::new("README", 10).validate(),
            Err(UploadError::UnsupportedType { .. })
        ));
        assert!(matches!(
            UploadFile::new("big.pdf", MAX_UPLOAD_BYTES + 1).validate(),
            Err(UploadError::TooLarge { .. })
        ));
    }

    #[test]
    fn queue_tracks_outcomes() {
        let mut queue = UploadQueue::default();
        let a = queue.push(UploadFile::new("a.pdf", 10));
        let b = queue.push(UploadFile::new("b.pdf", 10));
        assert_eq!(queue.entries()[0].status, UploadStatus::Pending);

        queue.start(a);
        assert_eq!(queue.entries()[0].status.label(), "Uploading...");
        queue.finish(a, Ok(receipt("a.pdf")));
        queue.finish(b, Err(UploadError::Failed("Upload failed".into())));

        assert_eq!(queue.succeeded(), 1);
        assert_eq!(queue.failed(), 1);
        assert!(queue.entries().iter().all(|e| e.status.is_finished()));
        assert_eq!(queue.entries()[1].status.label(), "Upload failed");

        assert!(queue.remove(a).is_some());
        assert!(queue.remove(a).is_none());
        assert_eq!(queue.entries().len(), 1);
    }

    #[test]
    fn closing_panel_clears_queue() {
        let mut panel = UploadPanel::default();
        assert!(!panel.is_visible());
        panel.open();
        panel.queue_mut().push(UploadFile::new("a.pdf", 1));
        assert!(panel.is_visible());
        panel.close();
        assert!(!panel.is_visible());
        assert!(panel.queue().entries().is_empty());
    }
}
