//! Snapshot codec: a whole disk (tree + criteria) as an opaque byte blob.
//!
//! The blob is gzip-compressed JSON. Both the tree and the criteria are stored
//! as flat tables so that nesting depth in the JSON stays constant however
//! deep the disk goes:
//!
//! - `nodes` lists every node below the root in preorder, siblings in order.
//!   Each record names its parent by index into the same table (`None` for
//!   children of the root), and a parent always comes before its children.
//! - `criteria` lists every criterion reachable from the registry, operands
//!   before the criteria built on them. Composites point at operands by
//!   index, so a criterion shared by several others is stored once.
//!   `names` maps registry names to indexes.
//!
//! Arena handles never leak into the format. History is not part of a
//! snapshot: a restored disk always starts with empty undo and redo stacks and
//! the cursor at the root.

use crate::criterion::{Comparison, Criterion, LogicOp};
use crate::disk::{Disk, DiskState};
use crate::error::{CvfsError, Result};
use crate::model::{validate_criterion_name, DocType, Node, NodeId};
use crate::registry::{Registry, IS_DOCUMENT};
use crate::tree::Tree;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::{Read, Write};
use std::sync::Arc;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    format_version: u32,
    saved_at: DateTime<Utc>,
    capacity: u64,
    nodes: Vec<NodeRecord>,
    criteria: Vec<CriterionRecord>,
    names: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum NodeRecord {
    Document {
        parent: Option<usize>,
        name: String,
        doc_type: DocType,
        content: String,
    },
    Directory {
        parent: Option<usize>,
        name: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum CriterionRecord {
    Attribute { comparison: Comparison },
    IsDocument,
    Negation { inner: usize },
    Binary { left: usize, op: LogicOp, right: usize },
}

fn corrupt(what: &str, detail: impl std::fmt::Display) -> CvfsError {
    CvfsError::Snapshot(format!("{}: {}", what, detail))
}

fn capture_nodes(tree: &Tree) -> Result<Vec<NodeRecord>> {
    let root = tree.root();
    let mut index: HashMap<NodeId, usize> = HashMap::new();
    let mut records = Vec::new();

    for (id, _) in tree.walk(root)? {
        let node = tree.get(id)?;
        let parent = match node.parent() {
            Some(p) if p == root => None,
            Some(p) => Some(
                *index
                    .get(&p)
                    .ok_or_else(|| CvfsError::NotFound(format!("Node {}", p)))?,
            ),
            None => return Err(CvfsError::NotFound(format!("Parent of {}", node.name()))),
        };
        index.insert(id, records.len());
        records.push(match node {
            Node::Document(doc) => NodeRecord::Document {
                parent,
                name: doc.name.clone(),
                doc_type: doc.doc_type,
                content: doc.content.clone(),
            },
            Node::Directory(dir) => NodeRecord::Directory {
                parent,
                name: dir.name.clone(),
            },
        });
    }
    Ok(records)
}

/// Interns criteria by identity, operands first.
#[derive(Default)]
struct CriterionTable {
    records: Vec<CriterionRecord>,
    seen: HashMap<*const Criterion, usize>,
}

impl CriterionTable {
    fn intern(&mut self, criterion: &Arc<Criterion>) -> usize {
        let key = Arc::as_ptr(criterion);
        if let Some(&index) = self.seen.get(&key) {
            return index;
        }
        let record = match criterion.as_ref() {
            Criterion::Attribute(cmp) => CriterionRecord::Attribute {
                comparison: cmp.clone(),
            },
            Criterion::IsDocument => CriterionRecord::IsDocument,
            Criterion::Negation(inner) => CriterionRecord::Negation {
                inner: self.intern(inner),
            },
            Criterion::Binary { left, op, right } => CriterionRecord::Binary {
                left: self.intern(left),
                op: *op,
                right: self.intern(right),
            },
        };
        let index = self.records.len();
        self.records.push(record);
        self.seen.insert(key, index);
        index
    }
}

/// Serializes the disk's tree and criteria.
pub fn encode(disk: &Disk) -> Result<Vec<u8>> {
    let tree = disk.tree();
    let mut table = CriterionTable::default();
    let names = disk
        .registry()
        .iter()
        .map(|(name, c)| (name.to_string(), table.intern(c)))
        .collect();

    let snapshot = Snapshot {
        format_version: FORMAT_VERSION,
        saved_at: Utc::now(),
        capacity: tree.capacity(),
        nodes: capture_nodes(tree)?,
        criteria: table.records,
        names,
    };

    let json = serde_json::to_vec(&snapshot)?;
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    let bytes = encoder.finish()?;
    tracing::debug!(bytes = bytes.len(), "encoded snapshot");
    Ok(bytes)
}

fn rebuild_tree(capacity: u64, records: &[NodeRecord]) -> Result<Tree> {
    let mut tree = Tree::new(capacity);
    // Arena handle per record; `None` for documents, which cannot be parents.
    let mut dirs: Vec<Option<NodeId>> = Vec::with_capacity(records.len());

    for (position, record) in records.iter().enumerate() {
        let parent = match record {
            NodeRecord::Document { parent, .. } | NodeRecord::Directory { parent, .. } => *parent,
        };
        let parent = match parent {
            None => tree.root(),
            Some(p) if p < position => dirs[p].ok_or_else(|| {
                corrupt("invalid tree", format!("record {} is not a directory", p))
            })?,
            Some(p) => {
                return Err(corrupt(
                    "invalid tree",
                    format!("record {} refers forward to {}", position, p),
                ))
            }
        };

        let created = match record {
            NodeRecord::Document {
                name,
                doc_type,
                content,
                ..
            } => tree
                .create_document(parent, name, *doc_type, content)
                .map(|_| None),
            NodeRecord::Directory { name, .. } => tree.create_directory(parent, name).map(Some),
        };
        dirs.push(created.map_err(|e| corrupt("invalid tree", e))?);
    }
    Ok(tree)
}

fn rebuild_criteria(records: &[CriterionRecord]) -> Result<Vec<Arc<Criterion>>> {
    let mut built: Vec<Arc<Criterion>> = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        let operand = |i: usize| {
            built.get(i).cloned().ok_or_else(|| {
                corrupt(
                    "invalid criterion",
                    format!("record {} refers forward to {}", position, i),
                )
            })
        };
        let criterion = match record {
            CriterionRecord::Attribute { comparison } => Criterion::Attribute(comparison.clone()),
            CriterionRecord::IsDocument => Criterion::IsDocument,
            CriterionRecord::Negation { inner } => Criterion::negation(operand(*inner)?),
            CriterionRecord::Binary { left, op, right } => Criterion::Binary {
                left: operand(*left)?,
                op: *op,
                right: operand(*right)?,
            },
        };
        built.push(Arc::new(criterion));
    }
    Ok(built)
}

/// Rebuilds a disk from a blob produced by [`encode`].
///
/// Every invariant is re-checked while rebuilding, so a hand-edited blob
/// cannot smuggle in bad names, duplicates or an over-full tree.
pub fn decode(bytes: &[u8]) -> Result<Disk> {
    let mut json = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut json)
        .map_err(|e| corrupt("not a cvfs snapshot", e))?;
    let snapshot: Snapshot =
        serde_json::from_slice(&json).map_err(|e| corrupt("corrupt snapshot", e))?;

    if snapshot.format_version != FORMAT_VERSION {
        return Err(CvfsError::Snapshot(format!(
            "unsupported format version {}",
            snapshot.format_version
        )));
    }

    let tree = rebuild_tree(snapshot.capacity, &snapshot.nodes)?;
    let criteria = rebuild_criteria(&snapshot.criteria)?;

    let mut registry = Registry::new();
    for (name, index) in snapshot.names {
        if name == IS_DOCUMENT {
            continue;
        }
        validate_criterion_name(&name).map_err(|e| corrupt("invalid criterion", e))?;
        let criterion = criteria.get(index).cloned().ok_or_else(|| {
            corrupt("invalid criterion", format!("{} has no record {}", name, index))
        })?;
        registry.insert_unchecked(&name, criterion);
    }

    tracing::debug!(
        saved_at = %snapshot.saved_at,
        capacity = snapshot.capacity,
        nodes = snapshot.nodes.len(),
        criteria = snapshot.criteria.len(),
        "decoded snapshot"
    );
    Ok(Disk::from_state(DiskState::from_parts(tree, registry)))
}
