//! ---
//! agri_section: "03-session-persistence"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Durable client storage and session handling."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, warn};

use agrismart_roles::RoleStore;

/// Storage key holding the opaque auth token.
pub const TOKEN_KEY: &str = "agrismart_token";
/// Storage key holding the serialized user record.
pub const USER_KEY: &str = "agrismart_user";
/// Storage key holding the selected role slug.
pub const ROLE_KEY: &str = "agrismart_role";

const STATE_FILE: &str = "client-state.json";

/// Errors surfaced when persisting client state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Durable key-value store for client state, persisted as a single JSON
/// object on disk.
///
/// Reads never fail: a missing or malformed state file is treated as an
/// empty store. Writes are atomic (temp file + rename).
#[derive(Debug)]
pub struct ClientStorage {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl ClientStorage {
    /// Open (or lazily create) the store under `directory`.
    pub fn open(directory: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(directory)?;
        let path = directory.join(STATE_FILE);
        let entries = Self::read_entries(&path);
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn read_entries(path: &Path) -> BTreeMap<String, String> {
        let Ok(contents) = fs::read_to_string(path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed client state, treating as empty");
                BTreeMap::new()
            }
        }
    }

    /// Read the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    /// Store `value` under `key` and persist the full state.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        {
            let mut entries = self.entries.write();
            entries.insert(key.to_owned(), value.to_owned());
        }
        self.persist()
    }

    /// Remove `key` and persist the full state.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        {
            let mut entries = self.entries.write();
            entries.remove(key);
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let serialized = {
            let entries = self.entries.read();
            serde_json::to_string_pretty(&*entries)?
        };
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "client state persisted");
        Ok(())
    }
}

// The role resolver requires infallible persistence; failures here are
// logged and the in-memory value stays authoritative for the session.
impl RoleStore for ClientStorage {
    fn load_role(&self) -> Option<String> {
        self.get(ROLE_KEY)
    }

    fn store_role(&self, slug: &str) {
        if let Err(err) = self.set(ROLE_KEY, slug) {
            warn!(error = %err, "failed to persist selected role");
        }
    }

    fn clear_role(&self) {
        if let Err(err) = self.remove(ROLE_KEY) {
            warn!(error = %err, "failed to clear persisted role");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ClientStorage::open(dir.path()).unwrap();
        storage.set(TOKEN_KEY, "abc123").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc123"));
        storage.remove(TOKEN_KEY).unwrap();
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = ClientStorage::open(dir.path()).unwrap();
            storage.set(ROLE_KEY, "cooperative").unwrap();
        }
        let reopened = ClientStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.get(ROLE_KEY).as_deref(), Some("cooperative"));
    }

    #[test]
    fn malformed_state_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STATE_FILE), "not json {").unwrap();
        let storage = ClientStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get(TOKEN_KEY), None);
        // The store stays usable after the malformed read.
        storage.set(TOKEN_KEY, "t").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t"));
    }
}
