//! # Storage Layer
//!
//! Snapshots are opaque byte blobs (see [`crate::snapshot`]). This module only
//! decides *where* those bytes live, behind the [`SnapshotStore`] trait:
//!
//! - [`fs::FileSnapshotStore`]: production storage on the local filesystem.
//!   Relative names resolve against the data directory and get the configured
//!   extension when they have none.
//! - [`memory::InMemorySnapshotStore`]: no persistence, for tests.
//!
//! Keeping the codec and the location apart means the API layer can be
//! exercised end to end without touching the filesystem.

use crate::error::Result;

pub mod fs;
pub mod memory;

pub trait SnapshotStore {
    /// Stores `bytes` under `name`, replacing anything already there.
    /// Returns a display string for where the snapshot went.
    fn save(&mut self, name: &str, bytes: &[u8]) -> Result<String>;

    /// Loads the bytes previously stored under `name`.
    fn load(&self, name: &str) -> Result<Vec<u8>>;
}
