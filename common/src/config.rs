use std::time::Duration;

/// Lowest capacity a comparison can be configured with.
pub const MIN_COMPARE: usize = 2;
/// Highest capacity a comparison can be configured with.
pub const MAX_COMPARE_LIMIT: usize = 4;

pub const DEFAULT_STORAGE_KEY: &str = "compare_cards";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How many cards can sit side by side. Always within
    /// [`MIN_COMPARE`]..=[`MAX_COMPARE_LIMIT`].
    pub max_compare: usize,
    /// Quiet period a slot query must hold before it is used for filtering.
    pub debounce: Duration,
    /// Queries shorter than this never hit the catalog.
    pub min_query_len: usize,
    /// Upper bound on results shown per search slot.
    pub max_results: usize,
    /// Text longer than this (markup stripped) is clamped until expanded.
    pub truncate_threshold: usize,
    /// Key the selection is persisted under.
    pub storage_key: String,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_compare: MIN_COMPARE,
            debounce: Duration::from_millis(300),
            min_query_len: 2,
            max_results: 5,
            truncate_threshold: 150,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            quiet: 0,
        }
    }
}

impl Config {
    pub fn with_max_compare(mut self, max_compare: usize) -> Self {
        self.max_compare = clamp_max_compare(max_compare);
        self
    }
}

pub fn clamp_max_compare(max_compare: usize) -> usize {
    max_compare.clamp(MIN_COMPARE, MAX_COMPARE_LIMIT)
}
