//! # Command Log
//!
//! Every committed mutation is recorded as a [`Command`] holding the exact
//! handles it touched: the node itself, the directory it lived in and its
//! position there. Undo and redo replay against those handles rather than
//! re-resolving names, so unrelated edits to siblings in between do not
//! confuse them.
//!
//! History is linear. Committing after an undo drops the whole redo branch.
//!
//! When replaying a command fails (for example because re-attaching a node
//! would overflow the disk) the command goes back onto the stack it was
//! popped from and nothing else changes.

use crate::criterion::Criterion;
use crate::disk::DiskState;
use crate::error::{CvfsError, Result};
use crate::model::{Node, NodeId};
use crate::tree::Tree;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum Command {
    CreateNode {
        parent: NodeId,
        node: NodeId,
        position: usize,
    },
    RemoveNode {
        parent: NodeId,
        node: NodeId,
        position: usize,
    },
    Rename {
        node: NodeId,
        from: String,
        to: String,
    },
    ChangeDir {
        from: NodeId,
        to: NodeId,
    },
    DefineCriterion {
        name: String,
        criterion: Arc<Criterion>,
    },
}

impl Command {
    /// Short human description, resolved against the current tree.
    pub fn describe(&self, tree: &Tree) -> String {
        let name_of = |id: NodeId| {
            tree.get(id)
                .map(|n| n.name().to_string())
                .unwrap_or_else(|_| id.to_string())
        };
        match self {
            Command::CreateNode { node, .. } => format!("create {}", name_of(*node)),
            Command::RemoveNode { node, .. } => format!("delete {}", name_of(*node)),
            Command::Rename { from, to, .. } => format!("rename {} to {}", from, to),
            Command::ChangeDir { to, .. } => format!("change directory to {}", name_of(*to)),
            Command::DefineCriterion { name, .. } => format!("define criterion {}", name),
        }
    }

    /// Node handles this command needs to keep alive in the arena.
    fn nodes(&self) -> Vec<NodeId> {
        match self {
            Command::CreateNode { parent, node, .. } | Command::RemoveNode { parent, node, .. } => {
                vec![*parent, *node]
            }
            Command::Rename { node, .. } => vec![*node],
            Command::ChangeDir { from, to } => vec![*from, *to],
            Command::DefineCriterion { .. } => Vec::new(),
        }
    }

    /// Re-applies the mutation.
    fn apply(&self, state: &mut DiskState) -> Result<()> {
        match self {
            Command::CreateNode {
                parent,
                node,
                position,
            } => state
                .tree
                .attach(*parent, *node, Some(*position))
                .map(|_| ()),
            Command::RemoveNode { parent, node, .. } => {
                state.tree.detach(*parent, *node).map(|_| ())
            }
            Command::Rename { node, to, .. } => state.tree.rename(*node, to).map(|_| ()),
            Command::ChangeDir { to, .. } => move_cursor(state, *to),
            Command::DefineCriterion { name, criterion } => {
                state.registry.ensure_free(name)?;
                state.registry.insert_unchecked(name, criterion.clone());
                Ok(())
            }
        }
    }

    /// Applies the inverse of the mutation.
    fn revert(&self, state: &mut DiskState) -> Result<()> {
        match self {
            Command::CreateNode { parent, node, .. } => {
                state.tree.detach(*parent, *node).map(|_| ())
            }
            Command::RemoveNode {
                parent,
                node,
                position,
            } => state
                .tree
                .attach(*parent, *node, Some(*position))
                .map(|_| ()),
            Command::Rename { node, from, .. } => state.tree.rename(*node, from).map(|_| ()),
            Command::ChangeDir { from, .. } => move_cursor(state, *from),
            Command::DefineCriterion { name, .. } => state
                .registry
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| CvfsError::NotFound(format!("Criterion {}", name))),
        }
    }
}

fn move_cursor(state: &mut DiskState, to: NodeId) -> Result<()> {
    match state.tree.get(to)? {
        Node::Directory(_) if state.tree.is_attached(to) => {
            state.cursor = to;
            Ok(())
        }
        Node::Directory(dir) => Err(CvfsError::NotFound(format!("Directory {}", dir.name))),
        Node::Document(doc) => Err(CvfsError::NotADirectory(doc.name.clone())),
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<Command>,
    redo: Vec<Command>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mutation that has already been applied.
    pub fn commit(&mut self, command: Command) {
        self.undo.push(command);
        self.redo.clear();
    }

    /// Reverts the most recent command, returning its description.
    pub fn undo(&mut self, state: &mut DiskState) -> Result<String> {
        let command = self.undo.pop().ok_or(CvfsError::NothingToUndo)?;
        let description = command.describe(&state.tree);
        if let Err(err) = command.revert(state) {
            tracing::warn!(%description, error = %err, "undo rejected");
            self.undo.push(command);
            return Err(err);
        }
        self.redo.push(command);
        tracing::debug!(%description, redo_depth = self.redo_len(), "undo");
        Ok(description)
    }

    /// Re-applies the most recently undone command, returning its description.
    pub fn redo(&mut self, state: &mut DiskState) -> Result<String> {
        let command = self.redo.pop().ok_or(CvfsError::NothingToRedo)?;
        if let Err(err) = command.apply(state) {
            tracing::warn!(error = %err, "redo rejected");
            self.redo.push(command);
            return Err(err);
        }
        let description = command.describe(&state.tree);
        self.undo.push(command);
        tracing::debug!(%description, undo_depth = self.undo_len(), "redo");
        Ok(description)
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Every node handle referenced from either stack.
    pub fn pinned_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.undo
            .iter()
            .chain(self.redo.iter())
            .flat_map(Command::nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocType;

    fn state(capacity: u64) -> DiskState {
        DiskState::new(capacity)
    }

    #[test]
    fn undo_and_redo_create() {
        let mut st = state(1_000);
        let mut history = History::new();
        let root = st.tree.root();
        let doc = st
            .tree
            .create_document(root, "a", DocType::Txt, "hi")
            .unwrap();
        history.commit(Command::CreateNode {
            parent: root,
            node: doc,
            position: 0,
        });

        assert_eq!(history.undo(&mut st).unwrap(), "create a");
        assert!(st.tree.child(root, "a").unwrap().is_none());
        assert_eq!(st.tree.total_size(), 40);

        assert_eq!(history.redo(&mut st).unwrap(), "create a");
        assert_eq!(st.tree.child(root, "a").unwrap(), Some(doc));
        assert_eq!(st.tree.total_size(), 44 + 40);
    }

    #[test]
    fn commit_clears_redo() {
        let mut st = state(1_000);
        let mut history = History::new();
        let root = st.tree.root();
        let a = st.tree.create_directory(root, "a").unwrap();
        history.commit(Command::CreateNode {
            parent: root,
            node: a,
            position: 0,
        });
        history.undo(&mut st).unwrap();
        assert_eq!(history.redo_len(), 1);

        let b = st.tree.create_directory(root, "b").unwrap();
        history.commit(Command::CreateNode {
            parent: root,
            node: b,
            position: 0,
        });
        assert!(matches!(
            history.redo(&mut st),
            Err(CvfsError::NothingToRedo)
        ));
    }

    #[test]
    fn empty_stacks() {
        let mut st = state(100);
        let mut history = History::new();
        assert!(matches!(
            history.undo(&mut st),
            Err(CvfsError::NothingToUndo)
        ));
        assert!(matches!(
            history.redo(&mut st),
            Err(CvfsError::NothingToRedo)
        ));
    }

    #[test]
    fn failed_redo_keeps_command_on_redo_stack() {
        let mut st = state(1_000);
        let mut history = History::new();
        let root = st.tree.root();
        let a = st.tree.create_directory(root, "a").unwrap();
        history.commit(Command::CreateNode {
            parent: root,
            node: a,
            position: 0,
        });
        history.undo(&mut st).unwrap();

        // Occupy the name out-of-band so re-attaching collides.
        st.tree.create_directory(root, "a").unwrap();
        assert!(matches!(
            history.redo(&mut st),
            Err(CvfsError::Duplicate(_))
        ));
        assert_eq!(history.redo_len(), 1);
        assert_eq!(history.undo_len(), 0);
    }

    #[test]
    fn define_criterion_round_trip() {
        let mut st = state(100);
        let mut history = History::new();
        let c = Arc::new(Criterion::IsDocument);
        st.registry.register("dd", c.clone()).unwrap();
        history.commit(Command::DefineCriterion {
            name: "dd".into(),
            criterion: c,
        });

        history.undo(&mut st).unwrap();
        assert!(!st.registry.contains("dd"));
        history.redo(&mut st).unwrap();
        assert!(st.registry.contains("dd"));
    }

    #[test]
    fn pinned_nodes_cover_both_stacks() {
        let mut st = state(1_000);
        let mut history = History::new();
        let root = st.tree.root();
        let a = st.tree.create_directory(root, "a").unwrap();
        history.commit(Command::CreateNode {
            parent: root,
            node: a,
            position: 0,
        });
        history.undo(&mut st).unwrap();
        let pinned: Vec<NodeId> = history.pinned_nodes().collect();
        assert_eq!(pinned, vec![root, a]);
    }
}
