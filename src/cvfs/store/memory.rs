use super::SnapshotStore;
use crate::error::{CvfsError, Result};
use std::collections::HashMap;

/// In-memory snapshot storage for testing.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn save(&mut self, name: &str, bytes: &[u8]) -> Result<String> {
        self.blobs.insert(name.to_string(), bytes.to_vec());
        Ok(name.to_string())
    }

    fn load(&self, name: &str) -> Result<Vec<u8>> {
        self.blobs
            .get(name)
            .cloned()
            .ok_or_else(|| CvfsError::NotFound(format!("Snapshot {}", name)))
    }
}
