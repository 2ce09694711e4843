use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cardcompare_common::card::CardRecord;
use cardcompare_common::catalog::{CatalogLookup, SearchFilter};
use cardcompare_common::config::Config;
use cardcompare_common::notify::{Notification, NotificationKind, Notifier};
use cardcompare_common::storage::DurableStorage;
use cardcompare_core::signal::SignalBus;
use cardcompare_core::store::SelectionStore;
use serde_json::{Value, json};

/// Storage shared between store instances, standing in for a page reload.
#[derive(Clone, Default)]
pub struct SharedStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<Mutex<usize>>,
}

impl SharedStorage {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    pub fn put(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or(0)
    }
}

impl DurableStorage for SharedStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let values = self.values.lock().map_err(|_| anyhow::anyhow!("storage poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.put(key, value);
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
        Ok(())
    }
}

/// Storage whose every write fails, like a full quota.
pub struct FullStorage;

impl DurableStorage for FullStorage {
    fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("quota exceeded")
    }
}

#[derive(Clone, Default)]
pub struct Inbox {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl Inbox {
    pub fn all(&self) -> Vec<Notification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notification> {
        self.all().pop()
    }

    pub fn count_of(&self, kind: NotificationKind) -> usize {
        self.all().iter().filter(|n| n.kind == kind).count()
    }
}

impl Notifier for Inbox {
    fn notify(&self, notification: Notification) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(notification);
        }
    }
}

/// Catalog that counts fetches and can be told to fail.
#[derive(Clone)]
pub struct Catalog {
    cards: Vec<CardRecord>,
    fetches: Arc<Mutex<usize>>,
    failing: bool,
}

impl Catalog {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self {
            cards,
            fetches: Arc::new(Mutex::new(0)),
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.lock().map(|f| *f).unwrap_or(0)
    }
}

#[async_trait]
impl CatalogLookup for Catalog {
    async fn search(&self, _filter: &SearchFilter) -> anyhow::Result<Vec<CardRecord>> {
        if let Ok(mut fetches) = self.fetches.lock() {
            *fetches += 1;
        }
        anyhow::ensure!(!self.failing, "catalog endpoint unavailable");
        Ok(self.cards.clone())
    }
}

pub fn card(id: u64, name: &str) -> CardRecord {
    record(json!({
        "id": id,
        "card_name": name,
        "seo_card_alias": name.to_lowercase().replace(' ', "-"),
        "image": format!("https://cdn.example/{id}.png"),
    }))
}

/// Builds a record from a JSON object literal.
pub fn record(value: Value) -> CardRecord {
    CardRecord::from_value(value).unwrap_or_default()
}

/// A catalog with enough "Axis" cards to hit the result cap.
pub fn axis_heavy_catalog() -> Vec<CardRecord> {
    vec![
        card(1, "Axis Magnus"),
        card(2, "AXIS Atlas"),
        card(3, "Flipkart Axis"),
        card(4, "Axis Ace"),
        card(5, "Axis Neo"),
        card(6, "Axis Select"),
        card(7, "Axis Privilege"),
        card(8, "HDFC Regalia"),
        card(9, "SBI Elite"),
    ]
}

pub fn config(max_compare: usize) -> Config {
    Config::default().with_max_compare(max_compare)
}

pub fn store(max_compare: usize, storage: &SharedStorage, inbox: &Inbox) -> SelectionStore {
    SelectionStore::new(
        &config(max_compare),
        Box::new(storage.clone()),
        Box::new(inbox.clone()),
        SignalBus::new(),
    )
}

pub fn identities(store: &SelectionStore) -> Vec<String> {
    store.selected().iter().map(CardRecord::identity).collect()
}
