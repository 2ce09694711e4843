use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("slot {slot} is out of range (comparison holds {max} cards)")]
    InvalidSlot { slot: usize, max: usize },

    #[error("no card with identity '{0}' in the catalog")]
    UnknownCard(String),

    #[error("catalog lookup failed: {0}")]
    Catalog(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CompareResult<T> = Result<T, CompareError>;
