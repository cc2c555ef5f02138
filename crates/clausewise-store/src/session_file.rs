//! File-backed persistence for the login session.

use std::io;
use std::path::{Path, PathBuf};

use clausewise_core::Session;
use tracing::{debug, warn};

/// Stores the current [`Session`] as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved session, if any.
    ///
    /// A file that cannot be parsed is deleted and treated as logged out.
    pub fn load(&self) -> io::Result<Option<Session>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        match serde_json::from_slice::<Session>(&bytes) {
            Ok(session) => {
                debug!(user = %session.user.username, "restored saved session");
                Ok(Some(session))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding corrupt session file");
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(session)?;
        std::fs::write(&self.path, json)
    }

    /// Remove the saved session. Missing files are fine.
    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clausewise_core::session::authenticate;

    #[test]
    fn save_load_clear() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = SessionFile::new(tmp.path().join("nested").join("session.json"));
        assert_eq!(file.load().unwrap(), None);

        let session = authenticate("alice", "test123", Utc::now()).unwrap();
        file.save(&session).unwrap();
        assert_eq!(file.load().unwrap(), Some(session));

        file.clear().unwrap();
        assert_eq!(file.load().unwrap(), None);
        file.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_removed() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        let file = SessionFile::new(&path);
        assert_eq!(file.load().unwrap(), None);
        assert!(!path.exists());
    }
}
