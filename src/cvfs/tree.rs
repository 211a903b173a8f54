//! # Tree Engine
//!
//! All nodes of a disk live in a single [`Slab`] arena and refer to each other
//! by [`NodeId`]. Directories own their children through `children` lists;
//! the `parent` back-link is only a navigation hint and is cleared whenever a
//! node is detached.
//!
//! Detached nodes stay in the arena so the command log can put them back.
//! [`Tree::sweep`] frees every slot that is neither reachable from the root
//! nor pinned by a caller (in practice, by the history).
//!
//! ## Invariants
//!
//! - Node names match `^[A-Za-z0-9]{1,10}$`.
//! - Siblings have pairwise-distinct names.
//! - `size(root) <= capacity`. Every growing operation checks the projected
//!   size *before* touching the tree, so a rejected operation leaves it intact.
//!
//! Sizes are never cached: [`Tree::size`] walks the subtree each time.

use crate::error::{CvfsError, Result};
use crate::model::{
    validate_node_name, DocType, Directory, Document, Entry, Node, NodeId, BASE_SIZE,
};
use slab::Slab;
use std::collections::HashSet;

pub const ROOT_NAME: &str = "root";

#[derive(Debug, Clone)]
pub struct Tree {
    storage: Slab<Node>,
    root: NodeId,
    capacity: u64,
}

impl Tree {
    pub fn new(capacity: u64) -> Self {
        let mut storage = Slab::new();
        let root = storage.insert(Node::Directory(Directory {
            name: ROOT_NAME.to_string(),
            children: Vec::new(),
            parent: None,
        }));
        Self {
            storage,
            root: NodeId(root),
            capacity,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of arena slots in use, attached or not.
    pub fn allocated(&self) -> usize {
        self.storage.len()
    }

    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.storage
            .get(id.0)
            .ok_or_else(|| CvfsError::NotFound(format!("Node {}", id)))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.storage
            .get_mut(id.0)
            .ok_or_else(|| CvfsError::NotFound(format!("Node {}", id)))
    }

    pub fn directory(&self, id: NodeId) -> Result<&Directory> {
        match self.get(id)? {
            Node::Directory(dir) => Ok(dir),
            Node::Document(doc) => Err(CvfsError::NotADirectory(doc.name.clone())),
        }
    }

    fn directory_mut(&mut self, id: NodeId) -> Result<&mut Directory> {
        match self.get_mut(id)? {
            Node::Directory(dir) => Ok(dir),
            Node::Document(doc) => Err(CvfsError::NotADirectory(doc.name.clone())),
        }
    }

    /// Looks up a direct child of `dir` by name.
    pub fn child(&self, dir: NodeId, name: &str) -> Result<Option<NodeId>> {
        let children = &self.directory(dir)?.children;
        Ok(children
            .iter()
            .copied()
            .find(|&id| self.storage.get(id.0).map(Node::name) == Some(name)))
    }

    pub fn size(&self, id: NodeId) -> u64 {
        match self.storage.get(id.0) {
            Some(Node::Document(doc)) => doc.size(),
            Some(Node::Directory(dir)) => {
                BASE_SIZE + dir.children.iter().map(|&c| self.size(c)).sum::<u64>()
            }
            None => 0,
        }
    }

    pub fn total_size(&self) -> u64 {
        self.size(self.root)
    }

    /// Fails if adding `extra` bytes to the disk would overflow its capacity.
    pub fn ensure_fits(&self, extra: u64) -> Result<()> {
        let required = self.total_size() + extra;
        if required > self.capacity {
            return Err(CvfsError::CapacityExceeded {
                required,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn ensure_free_name(&self, dir: NodeId, name: &str) -> Result<()> {
        if self.child(dir, name)?.is_some() {
            return Err(CvfsError::Duplicate(format!("File {}", name)));
        }
        Ok(())
    }

    pub fn create_document(
        &mut self,
        parent: NodeId,
        name: &str,
        doc_type: DocType,
        content: &str,
    ) -> Result<NodeId> {
        validate_node_name(name)?;
        self.ensure_free_name(parent, name)?;
        let doc = Document {
            name: name.to_string(),
            doc_type,
            content: content.to_string(),
            parent: Some(parent),
        };
        self.ensure_fits(doc.size())?;
        Ok(self.insert_child(parent, Node::Document(doc)))
    }

    pub fn create_directory(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        validate_node_name(name)?;
        self.ensure_free_name(parent, name)?;
        self.ensure_fits(BASE_SIZE)?;
        let dir = Directory {
            name: name.to_string(),
            children: Vec::new(),
            parent: Some(parent),
        };
        Ok(self.insert_child(parent, Node::Directory(dir)))
    }

    // Callers have already checked that `parent` is a directory.
    fn insert_child(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.storage.insert(node));
        if let Some(Node::Directory(dir)) = self.storage.get_mut(parent.0) {
            dir.children.push(id);
        }
        id
    }

    /// Re-attaches a previously detached node under `parent`.
    ///
    /// `position` is clamped to the current number of children; `None`
    /// appends. Returns the index the node ended up at.
    pub fn attach(
        &mut self,
        parent: NodeId,
        id: NodeId,
        position: Option<usize>,
    ) -> Result<usize> {
        let name = self.get(id)?.name().to_string();
        self.ensure_free_name(parent, &name)?;
        if self.is_ancestor_or_self(id, parent) {
            return Err(CvfsError::InvalidName(format!(
                "{} cannot be placed inside itself",
                name
            )));
        }
        self.ensure_fits(self.size(id))?;

        let dir = self.directory_mut(parent)?;
        let index = position
            .unwrap_or(dir.children.len())
            .min(dir.children.len());
        dir.children.insert(index, id);
        self.get_mut(id)?.set_parent(Some(parent));
        Ok(index)
    }

    /// Detaches the child called `name` from `parent`, returning its handle
    /// and former position. The node itself stays in the arena.
    pub fn remove(&mut self, parent: NodeId, name: &str) -> Result<(NodeId, usize)> {
        let id = self
            .child(parent, name)?
            .ok_or_else(|| CvfsError::NotFound(format!("File {}", name)))?;
        let position = self.detach(parent, id)?;
        Ok((id, position))
    }

    /// Detaches a specific node from `parent`, returning its former position.
    pub fn detach(&mut self, parent: NodeId, id: NodeId) -> Result<usize> {
        let dir = self.directory_mut(parent)?;
        let position = dir
            .children
            .iter()
            .position(|&c| c == id)
            .ok_or_else(|| CvfsError::NotFound(format!("Node {}", id)))?;
        dir.children.remove(position);
        self.get_mut(id)?.set_parent(None);
        Ok(position)
    }

    /// Renames a node in place, returning the previous name.
    ///
    /// The new name is checked against the node's current siblings, the node
    /// itself included, so renaming to the current name is a duplicate.
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<String> {
        validate_node_name(new_name)?;
        if let Some(parent) = self.get(id)?.parent() {
            self.ensure_free_name(parent, new_name)?;
        }
        let node = self.get_mut(id)?;
        let old = node.name().to_string();
        node.set_name(new_name.to_string());
        Ok(old)
    }

    pub fn entry(&self, id: NodeId, depth: usize) -> Result<Entry> {
        let node = self.get(id)?;
        Ok(Entry {
            name: node.name().to_string(),
            kind: node.kind(),
            doc_type: node.doc_type(),
            size: self.size(id),
            depth,
        })
    }

    pub fn list_children(&self, dir: NodeId) -> Result<Vec<Entry>> {
        self.directory(dir)?
            .children
            .iter()
            .map(|&id| self.entry(id, 0))
            .collect()
    }

    /// Every node below `dir` in depth-first, parent-before-children order,
    /// siblings in insertion order. `dir` itself is not included.
    pub fn walk(&self, dir: NodeId) -> Result<Vec<(NodeId, usize)>> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = self
            .directory(dir)?
            .children
            .iter()
            .rev()
            .map(|&c| (c, 0))
            .collect();
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            if let Some(Node::Directory(d)) = self.storage.get(id.0) {
                stack.extend(d.children.iter().rev().map(|&c| (c, depth + 1)));
            }
        }
        Ok(out)
    }

    /// True when `id` can be reached from the root through `children` links.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            let Some(parent) = self.storage.get(current.0).and_then(Node::parent) else {
                return false;
            };
            match self.storage.get(parent.0) {
                Some(Node::Directory(dir)) if dir.children.contains(&current) => {
                    current = parent
                }
                _ => return false,
            }
        }
    }

    /// True when `ancestor` is `id` or one of its parents.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.storage.get(node.0).and_then(Node::parent);
        }
        false
    }

    /// Frees every node that is neither reachable from the root nor inside
    /// the subtree of a pinned handle. Returns the number of freed slots.
    pub fn sweep<I>(&mut self, pinned: I) -> usize
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut live = HashSet::new();
        let mut pending: Vec<NodeId> = vec![self.root];
        pending.extend(pinned);
        while let Some(id) = pending.pop() {
            if !live.insert(id) {
                continue;
            }
            if let Some(Node::Directory(dir)) = self.storage.get(id.0) {
                pending.extend(dir.children.iter().copied());
            }
        }

        let before = self.storage.len();
        self.storage.retain(|key, _| live.contains(&NodeId(key)));
        let freed = before - self.storage.len();
        if freed > 0 {
            tracing::trace!(freed, live = self.allocated(), "swept detached nodes");
        }
        freed
    }
}
