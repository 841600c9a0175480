//! JSON snapshot persistence for users and profiles.

use crate::models::{User, UserId};
use rps_arena_core::ProfileSnapshot;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

/// Full store contents. Lossless: only source-of-truth fields are written,
/// derived statistics are recomputed after load.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub users: Vec<User>,
    pub profiles: Vec<(UserId, ProfileSnapshot)>,
}

/// File-backed JSON store.
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the snapshot if the store file exists.
    pub fn load(&self) -> io::Result<Option<StoreSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(snapshot))
    }

    /// Write the full snapshot.
    pub fn save(&self, snapshot: &StoreSnapshot) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, data)
    }
}
