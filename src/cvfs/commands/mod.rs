//! # Command Layer
//!
//! One module per user operation. Each function takes the disk (and, for
//! persistence, a [`crate::store::SnapshotStore`]), performs the operation and
//! returns a [`CmdResult`] describing what happened. Mutating operations
//! record exactly one [`crate::history::Command`] on success and nothing on
//! failure.
//!
//! Nothing here prints. Formatting belongs to the client.

use crate::model::Entry;

pub mod change_dir;
pub mod create;
pub mod criteria;
pub mod delete;
pub mod disk;
pub mod history;
pub mod list;
pub mod persist;
pub mod rename;
pub mod search;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Count and summed size of the entries in a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub count: usize,
    pub size: u64,
}

impl Totals {
    pub fn of(entries: &[Entry]) -> Self {
        Self {
            count: entries.len(),
            size: entries.iter().map(|e| e.size).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionListing {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed: Vec<Entry>,
    pub totals: Option<Totals>,
    pub criteria: Vec<CriterionListing>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Sets the listing and its totals together.
    pub fn with_listed(mut self, entries: Vec<Entry>) -> Self {
        self.totals = Some(Totals::of(&entries));
        self.listed = entries;
        self
    }

    pub fn with_criteria(mut self, criteria: Vec<CriterionListing>) -> Self {
        self.criteria = criteria;
        self
    }
}
