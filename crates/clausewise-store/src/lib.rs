//! Storage boundary: record sources (file, HTTP), session persistence, upload sinks.

mod error;
pub use error::{LoadError, StoreError};

pub mod file;
pub mod session_file;
pub mod source;
pub mod upload;

#[cfg(feature = "http")]
pub mod http;

pub use file::JsonFileSource;
pub use session_file::SessionFile;
pub use source::{Latency, RecordSource, load_store, refresh};
pub use upload::{SimulatedUploadSink, UploadSink};

#[cfg(feature = "http")]
pub use http::HttpSource;
