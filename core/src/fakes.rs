//! In-memory port implementations for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cardcompare_common::card::CardRecord;
use cardcompare_common::catalog::{CatalogLookup, SearchFilter};
use cardcompare_common::notify::{Notification, Notifier};
use cardcompare_common::storage::DurableStorage;
use serde_json::json;

#[derive(Clone, Default)]
pub struct MemoryStorage {
    pub values: Arc<Mutex<HashMap<String, String>>>,
    pub fail_writes: bool,
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        anyhow::ensure!(!self.fail_writes, "quota exceeded");
        self.values.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<Notification> {
        self.sent.lock().unwrap().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

pub struct StaticCatalog {
    pub cards: Vec<CardRecord>,
    pub calls: Arc<Mutex<usize>>,
    pub latency: Duration,
}

impl StaticCatalog {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self {
            cards,
            calls: Arc::new(Mutex::new(0)),
            latency: Duration::ZERO,
        }
    }

    /// A catalog that takes `latency` to answer, like a slow endpoint.
    pub fn slow(cards: Vec<CardRecord>, latency: Duration) -> Self {
        Self {
            latency,
            ..Self::new(cards)
        }
    }
}

#[async_trait]
impl CatalogLookup for StaticCatalog {
    async fn search(&self, _filter: &SearchFilter) -> anyhow::Result<Vec<CardRecord>> {
        *self.calls.lock().unwrap() += 1;
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.cards.clone())
    }
}

pub fn card(id: u64, name: &str) -> CardRecord {
    CardRecord::from_value(json!({
        "id": id,
        "card_name": name,
        "seo_card_alias": name.to_lowercase().replace(' ', "-"),
        "image": format!("https://cdn.example/{id}.png"),
    }))
    .unwrap()
}
