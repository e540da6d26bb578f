use std::collections::HashMap;

use crate::catalog::RowKey;

/// Staged replacement prices keyed by row.
///
/// This is the only place a pending price lives until it is committed.
/// Callers clear it at the start of every search, so edits are scoped to one
/// result set.
#[derive(Debug, Default, Clone)]
pub struct EditBuffer {
    prices: HashMap<RowKey, i64>,
}

impl EditBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &RowKey) -> Option<i64> {
        self.prices.get(key).copied()
    }

    /// Stages `price` for `key`, replacing any earlier edit.
    pub fn set(&mut self, key: RowKey, price: i64) {
        self.prices.insert(key, price);
    }

    pub fn clear(&mut self) {
        self.prices.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RowKey, &i64)> {
        self.prices.iter()
    }
}
