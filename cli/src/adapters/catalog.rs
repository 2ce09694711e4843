use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use cardcompare_common::card::CardRecord;
use cardcompare_common::catalog::{CatalogLookup, SearchFilter};
use cardcompare_common::error::{CompareError, CompareResult};
use serde_json::Value;
use tracing::debug;

/// A catalog exported to a JSON file: either an array of cards or an object
/// with a `cards` array.
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> anyhow::Result<Vec<CardRecord>> {
        let raw: String = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(CompareError::from)
            .with_context(|| format!("reading catalog {}", self.path.display()))?;
        parse_catalog(&raw).with_context(|| format!("parsing catalog {}", self.path.display()))
    }

    /// Looks a card up by identity (numeric id or alias).
    pub async fn find(&self, identity: &str) -> anyhow::Result<CardRecord> {
        let identity: &str = identity.trim();
        self.load()
            .await?
            .into_iter()
            .find(|card| card.identity() == identity || card.alias() == Some(identity))
            .ok_or_else(|| CompareError::UnknownCard(identity.to_string()).into())
    }
}

#[async_trait]
impl CatalogLookup for JsonCatalog {
    async fn search(&self, filter: &SearchFilter) -> anyhow::Result<Vec<CardRecord>> {
        let cards: Vec<CardRecord> = self.load().await?;
        let needle: Option<String> = filter
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_lowercase);

        let matches: Vec<CardRecord> = cards
            .into_iter()
            .filter(|card| match &needle {
                Some(needle) => card.name().to_lowercase().contains(needle),
                None => true,
            })
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect();

        debug!("catalog search {filter:?} matched {}", matches.len());
        Ok(matches)
    }
}

fn parse_catalog(raw: &str) -> CompareResult<Vec<CardRecord>> {
    let items: Vec<Value> = match serde_json::from_str::<Value>(raw)? {
        Value::Array(items) => items,
        Value::Object(mut root) => match root.remove("cards") {
            Some(Value::Array(items)) => items,
            _ => return Err(CompareError::Catalog("expected a `cards` array".to_string())),
        },
        _ => return Err(CompareError::Catalog("expected an array of cards".to_string())),
    };
    Ok(items.into_iter().filter_map(CardRecord::from_value).collect())
}
