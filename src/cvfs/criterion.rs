//! # Criterion Engine
//!
//! Criteria are immutable boolean predicates over nodes. Composite criteria
//! hold their operands behind an [`Arc`], so defining `b = !a` shares `a`
//! instead of copying it. Nothing ever mutates a criterion after it is built,
//! which is what makes the sharing sound.
//!
//! All validation happens at construction time; [`Criterion::evaluate`]
//! cannot fail.

use crate::error::{CvfsError, Result};
use crate::model::{Node, NodeId};
use crate::tree::Tree;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeOp {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl SizeOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeOp::Greater => ">",
            SizeOp::Less => "<",
            SizeOp::GreaterOrEqual => ">=",
            SizeOp::LessOrEqual => "<=",
            SizeOp::Equal => "==",
            SizeOp::NotEqual => "!=",
        }
    }

    fn compare(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            SizeOp::Greater => lhs > rhs,
            SizeOp::Less => lhs < rhs,
            SizeOp::GreaterOrEqual => lhs >= rhs,
            SizeOp::LessOrEqual => lhs <= rhs,
            SizeOp::Equal => lhs == rhs,
            SizeOp::NotEqual => lhs != rhs,
        }
    }
}

impl FromStr for SizeOp {
    type Err = CvfsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ">" => Ok(SizeOp::Greater),
            "<" => Ok(SizeOp::Less),
            ">=" => Ok(SizeOp::GreaterOrEqual),
            "<=" => Ok(SizeOp::LessOrEqual),
            "==" => Ok(SizeOp::Equal),
            "!=" => Ok(SizeOp::NotEqual),
            other => Err(CvfsError::InvalidCriterion(format!(
                "invalid operator for size attribute: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicOp::And => "&&",
            LogicOp::Or => "||",
        }
    }
}

impl FromStr for LogicOp {
    type Err = CvfsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "&&" | "AND" | "and" => Ok(LogicOp::And),
            "||" | "OR" | "or" => Ok(LogicOp::Or),
            other => Err(CvfsError::InvalidCriterion(format!(
                "invalid logical operator: {}",
                other
            ))),
        }
    }
}

/// A single attribute test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "attr", rename_all = "lowercase")]
pub enum Comparison {
    /// Case-sensitive substring match on the node name.
    Name { value: String },
    /// Exact match on a document's type; directories never match.
    Type { value: String },
    Size { op: SizeOp, value: i64 },
}

impl Comparison {
    /// Builds a comparison from its textual parts, as typed by a user.
    pub fn parse(attr: &str, op: &str, value: &str) -> Result<Self> {
        match attr {
            "name" => {
                if op != "contains" {
                    return Err(CvfsError::InvalidCriterion(format!(
                        "invalid operator for name attribute: {}",
                        op
                    )));
                }
                Ok(Comparison::Name {
                    value: value.to_string(),
                })
            }
            "type" => {
                if op != "equals" {
                    return Err(CvfsError::InvalidCriterion(format!(
                        "invalid operator for type attribute: {}",
                        op
                    )));
                }
                Ok(Comparison::Type {
                    value: value.to_string(),
                })
            }
            "size" => {
                let op = op.parse()?;
                let value = value.parse().map_err(|_| {
                    CvfsError::InvalidCriterion(format!("value must be an integer: {}", value))
                })?;
                Ok(Comparison::Size { op, value })
            }
            other => Err(CvfsError::InvalidCriterion(format!(
                "invalid attribute name: {}",
                other
            ))),
        }
    }

    fn attr(&self) -> &'static str {
        match self {
            Comparison::Name { .. } => "name",
            Comparison::Type { .. } => "type",
            Comparison::Size { .. } => "size",
        }
    }

    fn op(&self) -> &'static str {
        match self {
            Comparison::Name { .. } => "contains",
            Comparison::Type { .. } => "equals",
            Comparison::Size { op, .. } => op.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Attribute(Comparison),
    IsDocument,
    Negation(Arc<Criterion>),
    Binary {
        left: Arc<Criterion>,
        op: LogicOp,
        right: Arc<Criterion>,
    },
}

impl Criterion {
    pub fn comparator(attr: &str, op: &str, value: &str) -> Result<Self> {
        Comparison::parse(attr, op, value).map(Criterion::Attribute)
    }

    pub fn negation(inner: Arc<Criterion>) -> Self {
        Criterion::Negation(inner)
    }

    pub fn binary(left: Arc<Criterion>, op: &str, right: Arc<Criterion>) -> Result<Self> {
        Ok(Criterion::Binary {
            left,
            op: op.parse()?,
            right,
        })
    }

    /// Evaluates the criterion against a live node.
    ///
    /// Handles that no longer resolve never match.
    pub fn evaluate(&self, tree: &Tree, id: NodeId) -> bool {
        let Ok(node) = tree.get(id) else {
            return false;
        };
        match self {
            Criterion::Attribute(Comparison::Name { value }) => {
                node.name().contains(value.as_str())
            }
            Criterion::Attribute(Comparison::Type { value }) => match node {
                Node::Document(doc) => doc.doc_type.as_str() == value,
                Node::Directory(_) => false,
            },
            Criterion::Attribute(Comparison::Size { op, value }) => {
                let size = i64::try_from(tree.size(id)).unwrap_or(i64::MAX);
                op.compare(size, *value)
            }
            Criterion::IsDocument => matches!(node, Node::Document(_)),
            Criterion::Negation(inner) => !inner.evaluate(tree, id),
            Criterion::Binary { left, op, right } => match op {
                LogicOp::And => left.evaluate(tree, id) && right.evaluate(tree, id),
                LogicOp::Or => left.evaluate(tree, id) || right.evaluate(tree, id),
            },
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Attribute(cmp) => {
                let value = match cmp {
                    Comparison::Name { value } | Comparison::Type { value } => value.clone(),
                    Comparison::Size { value, .. } => value.to_string(),
                };
                write!(
                    f,
                    "attrName: {}, op: {}, val: {}",
                    cmp.attr(),
                    cmp.op(),
                    value
                )
            }
            Criterion::IsDocument => f.write_str("IsDocument"),
            Criterion::Negation(inner) => write!(f, "!( {} )", inner),
            Criterion::Binary { left, op, right } => {
                write!(f, "( {} ) {} ( {} )", left, op.as_str(), right)
            }
        }
    }
}
