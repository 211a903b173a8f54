//! Node model: the two kinds of entries a virtual disk holds.
//!
//! Nodes never own each other directly. A directory lists its children as
//! [`NodeId`]s into the tree's arena, and `parent` is a plain handle used for
//! navigation only.

use crate::error::{CvfsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed overhead every node contributes to the disk size.
pub const BASE_SIZE: u64 = 40;
pub const MAX_NAME_LEN: usize = 10;

/// Handle into the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Txt,
    Java,
    Html,
    Css,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Txt => "txt",
            DocType::Java => "java",
            DocType::Html => "html",
            DocType::Css => "css",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = CvfsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "txt" => Ok(DocType::Txt),
            "java" => Ok(DocType::Java),
            "html" => Ok(DocType::Html),
            "css" => Ok(DocType::Css),
            other => Err(CvfsError::DisallowedType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub doc_type: DocType,
    pub content: String,
    pub parent: Option<NodeId>,
}

impl Document {
    /// `40 + 2 * len(content)`, counting characters rather than bytes.
    pub fn size(&self) -> u64 {
        BASE_SIZE + 2 * self.content.chars().count() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub name: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Document(Document),
    Directory(Directory),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Document(doc) => &doc.name,
            Node::Directory(dir) => &dir.name,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        match self {
            Node::Document(doc) => doc.name = name,
            Node::Directory(dir) => dir.name = name,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Document(doc) => doc.parent,
            Node::Directory(dir) => dir.parent,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        match self {
            Node::Document(doc) => doc.parent = parent,
            Node::Directory(dir) => dir.parent = parent,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Directory(_) => NodeKind::Directory,
        }
    }

    pub fn doc_type(&self) -> Option<DocType> {
        match self {
            Node::Document(doc) => Some(doc.doc_type),
            Node::Directory(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Document,
    Directory,
}

/// A listing row: what clients get back from list and search operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: NodeKind,
    pub doc_type: Option<DocType>,
    pub size: u64,
    /// Distance from the directory the listing started at (0 = direct child).
    pub depth: usize,
}

/// Node names: 1 to 10 ASCII letters or digits.
pub fn validate_node_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(())
    } else {
        Err(CvfsError::InvalidName(name.to_string()))
    }
}

/// Criterion names: exactly two ASCII letters.
pub fn validate_criterion_name(name: &str) -> Result<()> {
    if name.len() == 2 && name.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(CvfsError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_size_is_base_plus_twice_content() {
        let doc = Document {
            name: "a".into(),
            doc_type: DocType::Txt,
            content: "hello".into(),
            parent: None,
        };
        assert_eq!(doc.size(), 50);

        let empty = Document {
            content: String::new(),
            ..doc
        };
        assert_eq!(empty.size(), BASE_SIZE);
    }

    #[test]
    fn node_names() {
        assert!(validate_node_name("a").is_ok());
        assert!(validate_node_name("abcDEF1234").is_ok());
        assert!(validate_node_name("").is_err());
        assert!(validate_node_name("abcDEF12345").is_err());
        assert!(validate_node_name("a.txt").is_err());
        assert!(validate_node_name("é").is_err());
    }

    #[test]
    fn criterion_names() {
        assert!(validate_criterion_name("aa").is_ok());
        assert!(validate_criterion_name("Zq").is_ok());
        assert!(validate_criterion_name("a").is_err());
        assert!(validate_criterion_name("a1").is_err());
        assert!(validate_criterion_name("abc").is_err());
    }

    #[test]
    fn doc_types_round_trip_through_strings() {
        for ty in ["txt", "java", "html", "css"] {
            assert_eq!(ty.parse::<DocType>().unwrap().as_str(), ty);
        }
        assert!(matches!(
            "md".parse::<DocType>(),
            Err(CvfsError::DisallowedType(_))
        ));
    }
}
