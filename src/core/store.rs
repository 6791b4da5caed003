//! # Snapshot Store
//!
//! A single named slot, `<data_dir>/state.json`, holding the whole
//! conversation session.
//!
//! There is exactly one writer: the owner of the `Conversation` calls
//! [`SnapshotStore::sync`] after every state change. `sync` is
//! write-through: it rewrites the slot whenever the session differs from
//! what was last written, and erases the slot once the session is empty
//! (fresh start or "new conversation").
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::core::conversation::ConversationSession;

/// File name of the snapshot slot inside the data directory.
pub const SNAPSHOT_FILE: &str = "state.json";

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "snapshot I/O error: {e}"),
            StoreError::Serialize(e) => write!(f, "snapshot serialize error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

pub struct SnapshotStore {
    path: PathBuf,
    /// What the slot currently holds, as far as this process knows.
    last_written: Option<ConversationSession>,
}

impl SnapshotStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SNAPSHOT_FILE),
            last_written: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the slot. A missing, unreadable or malformed slot means "no
    /// prior session".
    pub fn load(&mut self) -> Option<ConversationSession> {
        if !self.path.exists() {
            debug!("No snapshot at {}", self.path.display());
            return None;
        }

        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to read snapshot {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<ConversationSession>(&json) {
            Ok(session) => {
                info!("Loaded snapshot from {}", self.path.display());
                self.last_written = Some(session.clone());
                Some(session)
            }
            Err(e) => {
                warn!("Ignoring malformed snapshot {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Writes the full session into the slot.
    pub fn save(&mut self, session: &ConversationSession) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        atomic_write_json(&self.path, session)?;
        self.last_written = Some(session.clone());
        debug!(
            "Snapshot saved: {} ({} messages)",
            session.conversation_id,
            session.messages.len()
        );
        Ok(())
    }

    /// Erases the slot. Erasing an absent slot is not an error.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            info!("Snapshot cleared: {}", self.path.display());
        }
        self.last_written = None;
        Ok(())
    }

    /// Brings the slot in line with `session`. Failures are logged, never
    /// surfaced.
    pub fn sync(&mut self, session: &ConversationSession) {
        if session.is_empty() {
            if self.last_written.is_some() || self.path.exists() {
                if let Err(e) = self.clear() {
                    warn!("Failed to clear snapshot: {}", e);
                }
            }
            return;
        }

        if self.last_written.as_ref() == Some(session) {
            return;
        }

        if let Err(e) = self.save(session) {
            warn!("Failed to save snapshot: {}", e);
        }
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data).map_err(StoreError::Serialize)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
