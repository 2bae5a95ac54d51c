use std::collections::HashMap;

use crate::types::DisplayRecord;

// ==============================================================================
// Parsed Record Cache
// ==============================================================================

/// Display records keyed by transaction hash.
///
/// Entries never expire; [`ParsedCache::clear`] is the only invalidation.
/// Owned by a single [`crate::manager::TxManager`], so plain `&mut` access
/// is enough.
#[derive(Debug, Default)]
pub struct ParsedCache {
    parsed: HashMap<String, DisplayRecord>,
}

impl ParsedCache {
    pub fn new() -> Self {
        Self {
            parsed: HashMap::new(),
        }
    }

    pub fn get(&self, hash: &str) -> Option<&DisplayRecord> {
        self.parsed.get(hash)
    }

    pub fn insert(&mut self, hash: String, record: DisplayRecord) {
        self.parsed.insert(hash, record);
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.parsed.contains_key(hash)
    }

    pub fn clear(&mut self) {
        self.parsed.clear();
    }

    pub fn len(&self) -> usize {
        self.parsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsed.is_empty()
    }
}
