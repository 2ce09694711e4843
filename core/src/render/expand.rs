use std::collections::HashSet;

/// Rows currently shown in full. Keyed by the row path, shared by every column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedRowSet {
    rows: HashSet<String>,
}

impl ExpandedRowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `key` and returns whether it is now expanded.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.rows.remove(key) {
            false
        } else {
            self.rows.insert(key.to_string());
            true
        }
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.rows.contains(key)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
