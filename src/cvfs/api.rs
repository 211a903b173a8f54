//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every cvfs operation, whatever UI sits on top.
//!
//! It owns the session: the current [`Disk`] (if any) and the
//! [`SnapshotStore`] used by save and load. Operations that need a disk fail
//! with [`CvfsError::NoDisk`] until one is created or loaded.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O**: no stdout, stderr or terminal assumptions
//! - **Presentation**: returns [`CmdResult`]s, not strings
//!
//! ## Generic Over SnapshotStore
//!
//! - Production: `CvfsApi<FileSnapshotStore>`
//! - Testing: `CvfsApi<InMemorySnapshotStore>`
//!
//! ## Concurrency
//!
//! A `CvfsApi` is a single-writer value: every mutating method takes
//! `&mut self`. A multi-client frontend must serialize access to one
//! instance behind a single lock or actor.

use crate::commands;
use crate::disk::Disk;
use crate::error::{CvfsError, Result};
use crate::store::SnapshotStore;

pub struct CvfsApi<S: SnapshotStore> {
    disk: Option<Disk>,
    store: S,
}

impl<S: SnapshotStore> CvfsApi<S> {
    pub fn new(store: S) -> Self {
        Self { disk: None, store }
    }

    pub fn disk(&self) -> Option<&Disk> {
        self.disk.as_ref()
    }

    fn current(&self) -> Result<&Disk> {
        self.disk.as_ref().ok_or(CvfsError::NoDisk)
    }

    fn current_mut(&mut self) -> Result<&mut Disk> {
        self.disk.as_mut().ok_or(CvfsError::NoDisk)
    }

    /// Replaces the session with an empty disk of the given capacity.
    pub fn new_disk(&mut self, capacity: u64) -> CmdResult {
        let (disk, result) = commands::disk::create(capacity);
        self.disk = Some(disk);
        result
    }

    pub fn new_document(&mut self, name: &str, doc_type: &str, content: &str) -> Result<CmdResult> {
        commands::create::document(self.current_mut()?, name, doc_type, content)
    }

    pub fn new_directory(&mut self, name: &str) -> Result<CmdResult> {
        commands::create::directory(self.current_mut()?, name)
    }

    pub fn delete(&mut self, name: &str) -> Result<CmdResult> {
        commands::delete::run(self.current_mut()?, name)
    }

    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<CmdResult> {
        commands::rename::run(self.current_mut()?, old_name, new_name)
    }

    pub fn change_dir(&mut self, target: &str) -> Result<CmdResult> {
        commands::change_dir::run(self.current_mut()?, target)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(self.current()?)
    }

    pub fn list_recursive(&self) -> Result<CmdResult> {
        commands::list::recursive(self.current()?)
    }

    pub fn new_simple_criterion(
        &mut self,
        name: &str,
        attr: &str,
        op: &str,
        value: &str,
    ) -> Result<CmdResult> {
        commands::criteria::simple(self.current_mut()?, name, attr, op, value)
    }

    pub fn new_negation(&mut self, name: &str, of: &str) -> Result<CmdResult> {
        commands::criteria::negation(self.current_mut()?, name, of)
    }

    pub fn new_binary_criterion(
        &mut self,
        name: &str,
        left: &str,
        op: &str,
        right: &str,
    ) -> Result<CmdResult> {
        commands::criteria::binary(self.current_mut()?, name, left, op, right)
    }

    pub fn list_criteria(&self) -> Result<CmdResult> {
        Ok(commands::criteria::list(self.current()?))
    }

    pub fn search(&self, criterion: &str, recursive: bool) -> Result<CmdResult> {
        commands::search::run(self.current()?, criterion, recursive)
    }

    pub fn save(&mut self, name: &str) -> Result<CmdResult> {
        let disk = self.disk.as_ref().ok_or(CvfsError::NoDisk)?;
        commands::persist::save(disk, &mut self.store, name)
    }

    /// Replaces the session with the snapshot stored under `name`. On failure
    /// the current disk is kept.
    pub fn load(&mut self, name: &str) -> Result<CmdResult> {
        let (disk, result) = commands::persist::load(&self.store, name)?;
        self.disk = Some(disk);
        Ok(result)
    }

    pub fn undo(&mut self) -> Result<CmdResult> {
        commands::history::undo(self.current_mut()?)
    }

    pub fn redo(&mut self) -> Result<CmdResult> {
        commands::history::redo(self.current_mut()?)
    }
}

pub use crate::commands::{CmdMessage, CmdResult, CriterionListing, MessageLevel, Totals};
pub use crate::commands::change_dir::PARENT;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::memory::InMemorySnapshotStore;

    fn api() -> CvfsApi<InMemorySnapshotStore> {
        CvfsApi::new(InMemorySnapshotStore::new())
    }

    #[test]
    fn operations_need_a_disk() {
        let mut api = api();
        assert!(matches!(api.list(), Err(CvfsError::NoDisk)));
        assert!(matches!(api.new_directory("d"), Err(CvfsError::NoDisk)));
        assert!(matches!(api.undo(), Err(CvfsError::NoDisk)));
        assert!(matches!(api.save("x"), Err(CvfsError::NoDisk)));
    }

    #[test]
    fn new_disk_resets_everything() {
        let mut api = api();
        api.new_disk(500);
        api.new_directory("d").unwrap();
        api.new_simple_criterion("sz", "size", ">", "1").unwrap();

        api.new_disk(300);
        assert_eq!(api.list().unwrap().listed.len(), 0);
        assert_eq!(api.list_criteria().unwrap().criteria.len(), 1);
        assert_eq!(api.undo().unwrap_err().kind(), ErrorKind::EmptyHistory);
    }

    #[test]
    fn scenario_from_reference_session() {
        let mut api = api();
        api.new_disk(200);
        api.new_document("a", "txt", "hello").unwrap();
        api.new_directory("d").unwrap();
        let err = api
            .new_document("b", "txt", &"y".repeat(100))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

        api.new_document("b", "txt", "").unwrap();
        assert_eq!(
            api.rename("a", "b").unwrap_err().kind(),
            ErrorKind::Duplicate
        );
        assert_eq!(api.change_dir(PARENT).unwrap_err().kind(), ErrorKind::AtRoot);

        api.new_simple_criterion("sz", "size", ">", "10").unwrap();
        assert_eq!(
            api.new_simple_criterion("sz", "size", ">", "10")
                .unwrap_err()
                .kind(),
            ErrorKind::Duplicate
        );
    }

    #[test]
    fn failed_load_keeps_current_disk() {
        let mut api = api();
        api.new_disk(500);
        api.new_directory("d").unwrap();
        assert!(api.load("missing").is_err());
        assert_eq!(api.list().unwrap().listed.len(), 1);
    }

    #[test]
    fn save_then_load_replaces_session() {
        let mut api = api();
        api.new_disk(500);
        api.new_directory("d").unwrap();
        api.save("snap").unwrap();
        api.delete("d").unwrap();

        api.load("snap").unwrap();
        assert_eq!(api.list().unwrap().listed[0].name, "d");
        assert_eq!(api.disk().unwrap().history().undo_len(), 0);
    }
}
