use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::card::CardRecord;

/// Criteria passed to the catalog. The default is the neutral filter: every card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub name: Option<String>,
    pub limit: Option<usize>,
}

/// The remote card catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Returns the cards matching `filter`.
    ///
    /// Callers in the engine treat any error as an empty catalog.
    async fn search(&self, filter: &SearchFilter) -> anyhow::Result<Vec<CardRecord>>;
}
