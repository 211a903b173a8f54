//! The session value: one virtual disk with its cursor, criteria and history.
//!
//! There is no global state. Every operation takes a `&mut Disk` (or `&Disk`
//! for queries), so independent sessions can live side by side and tests stay
//! isolated. Replacing a disk (new disk, restore) replaces all four parts at
//! once.

use crate::history::{Command, History};
use crate::model::NodeId;
use crate::registry::Registry;
use crate::tree::Tree;

/// Everything a [`Command`] may touch when it is replayed.
#[derive(Debug, Clone)]
pub struct DiskState {
    pub tree: Tree,
    pub cursor: NodeId,
    pub registry: Registry,
}

impl DiskState {
    pub fn new(capacity: u64) -> Self {
        Self::from_parts(Tree::new(capacity), Registry::new())
    }

    pub(crate) fn from_parts(tree: Tree, registry: Registry) -> Self {
        let cursor = tree.root();
        Self {
            tree,
            cursor,
            registry,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Disk {
    state: DiskState,
    history: History,
}

impl Disk {
    pub fn new(capacity: u64) -> Self {
        tracing::debug!(capacity, "new disk");
        Self {
            state: DiskState::new(capacity),
            history: History::new(),
        }
    }

    pub(crate) fn from_state(state: DiskState) -> Self {
        Self {
            state,
            history: History::new(),
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.state.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut Tree {
        &mut self.state.tree
    }

    pub fn cursor(&self) -> NodeId {
        self.state.cursor
    }

    pub(crate) fn set_cursor(&mut self, cursor: NodeId) {
        self.state.cursor = cursor;
    }

    pub fn registry(&self) -> &Registry {
        &self.state.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut Registry {
        &mut self.state.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Records an applied mutation and frees nodes no longer reachable from
    /// either the tree or the log.
    pub(crate) fn commit(&mut self, command: Command) {
        let description = command.describe(&self.state.tree);
        self.history.commit(command);
        tracing::debug!(
            command = %description,
            undo_depth = self.history.undo_len(),
            "commit"
        );
        let pinned: Vec<NodeId> = self.history.pinned_nodes().collect();
        self.state.tree.sweep(pinned);
    }

    pub fn undo(&mut self) -> crate::error::Result<String> {
        self.history.undo(&mut self.state)
    }

    pub fn redo(&mut self) -> crate::error::Result<String> {
        self.history.redo(&mut self.state)
    }

    /// Slash-separated names from the root down to the cursor.
    pub fn cursor_path(&self) -> String {
        let mut names = Vec::new();
        let mut current = Some(self.state.cursor);
        while let Some(id) = current {
            match self.state.tree.get(id) {
                Ok(node) => {
                    names.push(node.name().to_string());
                    current = node.parent();
                }
                Err(_) => break,
            }
        }
        names.reverse();
        names.join("/")
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::DocType;

    /// Builds small disks for tests without going through the command log.
    pub struct DiskFixture {
        pub disk: Disk,
    }

    impl DiskFixture {
        pub fn new(capacity: u64) -> Self {
            Self {
                disk: Disk::new(capacity),
            }
        }

        pub fn with_document(mut self, name: &str, doc_type: DocType, content: &str) -> Self {
            let cursor = self.disk.cursor();
            self.disk
                .tree_mut()
                .create_document(cursor, name, doc_type, content)
                .unwrap();
            self
        }

        pub fn with_directory(mut self, name: &str) -> Self {
            let cursor = self.disk.cursor();
            self.disk.tree_mut().create_directory(cursor, name).unwrap();
            self
        }

        /// Moves the cursor into a child directory created earlier.
        pub fn inside(mut self, name: &str) -> Self {
            let cursor = self.disk.cursor();
            let id = self.disk.tree().child(cursor, name).unwrap().unwrap();
            self.disk.set_cursor(id);
            self
        }

        pub fn build(self) -> Disk {
            self.disk
        }
    }
}
