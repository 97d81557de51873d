//! Local persistence for account state.
//!
//! The full account state is serialized as one JSON blob, overwritten on
//! every state transition and read back once at startup. Unreadable or
//! malformed content is never fatal: startup falls back to the default
//! empty state and logs a warning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::account::AccountState;

/// File name of the persisted blob inside the data directory.
pub const USER_DATA_FILE: &str = "user-data.json";

/// Errors that can occur while writing the blob.
///
/// Read-side failures are absorbed by [`UserDataFile::load`] instead.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle to the single persisted user-data blob.
#[derive(Debug, Clone)]
pub struct UserDataFile {
    path: PathBuf,
}

impl UserDataFile {
    /// Blob handle inside the given data directory.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(USER_DATA_FILE),
        }
    }

    /// Path of the blob on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted state.
    ///
    /// A missing file yields the default empty state silently; unreadable
    /// or malformed content yields the default with a warning.
    #[must_use]
    pub fn load(&self) -> AccountState {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return AccountState::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read user data, starting empty");
                return AccountState::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "malformed user data, starting empty");
                AccountState::default()
            }
        }
    }

    /// Overwrite the blob with the given state.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, state: &AccountState) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(state)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    /// Delete the blob; absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] for I/O failures other than the file
    /// already being gone.
    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::auth;

    fn blob_in_temp() -> (tempfile::TempDir, UserDataFile) {
        let dir = tempfile::tempdir().unwrap();
        let blob = UserDataFile::in_dir(dir.path());
        (dir, blob)
    }

    #[test]
    fn test_load_missing_file_yields_default() {
        let (_dir, blob) = blob_in_temp();
        let state = blob.load();
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert!(state.wishlist.is_empty());
        assert!(state.orders.is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let (_dir, blob) = blob_in_temp();

        let mut state = AccountState::default();
        state.is_authenticated = true;
        state.user = Some(auth::authenticate("demo@luxury.com", "demo123").unwrap());

        blob.save(&state).unwrap();
        let restored = blob.load();
        assert!(restored.is_authenticated);
        assert_eq!(restored.user.unwrap().name, "Alexandra Sterling");
    }

    #[test]
    fn test_load_malformed_yields_default() {
        let (_dir, blob) = blob_in_temp();
        fs::create_dir_all(blob.path().parent().unwrap()).unwrap();
        fs::write(blob.path(), b"{ not json").unwrap();

        let state = blob.load();
        assert!(!state.is_authenticated);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (_dir, blob) = blob_in_temp();
        blob.save(&AccountState::default()).unwrap();

        blob.clear().unwrap();
        assert!(!blob.path().exists());
        // Second clear on a missing file is fine
        blob.clear().unwrap();
    }
}
