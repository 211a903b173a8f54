use crate::criterion::Criterion;
use crate::error::{CvfsError, Result};
use crate::model::validate_criterion_name;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name of the entry every fresh or restored registry starts with.
pub const IS_DOCUMENT: &str = "IsDocument";

/// Name → criterion mapping used by search.
///
/// Iteration is ordered by name so listings are stable.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: BTreeMap<String, Arc<Criterion>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(IS_DOCUMENT.to_string(), Arc::new(Criterion::IsDocument));
        Self { entries }
    }

    /// Adds a user-defined criterion. Names must be two ASCII letters.
    pub fn register(&mut self, name: &str, criterion: Arc<Criterion>) -> Result<()> {
        validate_criterion_name(name)?;
        self.ensure_free(name)?;
        self.entries.insert(name.to_string(), criterion);
        Ok(())
    }

    pub fn ensure_free(&self, name: &str) -> Result<()> {
        if self.contains(name) {
            return Err(CvfsError::Duplicate(format!("Criterion {}", name)));
        }
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<Criterion>> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| CvfsError::NotFound(format!("Criterion {}", name)))
    }

    /// Inserts without validating the name. Used by undo/redo and restore,
    /// where the entry was validated when it was first defined.
    pub(crate) fn insert_unchecked(&mut self, name: &str, criterion: Arc<Criterion>) {
        self.entries.insert(name.to_string(), criterion);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Arc<Criterion>> {
        self.entries.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Criterion>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `(name, description)` pairs in name order.
    pub fn list(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(name, criterion)| (name.to_string(), criterion.to_string()))
            .collect()
    }
}
