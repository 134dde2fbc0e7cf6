//! Name ↔ pool position index
//!
//! Populated once at startup from the configured token entries in
//! insertion order; never mutated after. The parallel `names` vector makes
//! position → name lookup explicit instead of relying on any map's
//! iteration order.

use std::collections::HashMap;

/// Bidirectional mapping between token names and pool positions.
#[derive(Debug, Default)]
pub struct NameIndex {
    by_name: HashMap<String, usize>,
    names: Vec<String>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next name, returning the position it was assigned.
    pub fn push(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        let index = self.names.len();
        self.by_name.insert(name.clone(), index);
        self.names.push(name);
        index
    }

    /// Pool position for a name. O(1).
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Name at a pool position.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Number of indexed names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the index holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
