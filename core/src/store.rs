//! # Selection Store
//!
//! The single source of truth for which cards are selected for comparison.
//!
//! Every surface (pill, toggle controls, the comparison panel) holds a reference to
//! the same [`SelectionStore`]. Mutations go through [`SelectionStore::toggle`],
//! [`SelectionStore::remove`] and [`SelectionStore::clear_all`]; each one persists
//! the set before returning and publishes the new snapshot on a `watch` channel.

use cardcompare_common::card::CardRecord;
use cardcompare_common::config::{Config, clamp_max_compare};
use cardcompare_common::notify::{Notification, NotificationAction, Notifier};
use cardcompare_common::storage::DurableStorage;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::signal::{Signal, SignalBus};

pub const COMPARE_NOW_LABEL: &str = "Compare now";

/// What a toggle did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added { count: usize },
    Removed,
    Rejected { capacity: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Partial(usize),
    Full,
}

pub struct SelectionStore {
    selected: Vec<CardRecord>,
    max_compare: usize,
    storage_key: String,
    storage: Box<dyn DurableStorage>,
    notifier: Box<dyn Notifier>,
    signals: SignalBus,
    changes: watch::Sender<Vec<CardRecord>>,
}

impl SelectionStore {
    /// Creates the store and rehydrates the selection from `storage`.
    ///
    /// A missing or unreadable snapshot yields an empty selection.
    pub fn new(
        cfg: &Config,
        storage: Box<dyn DurableStorage>,
        notifier: Box<dyn Notifier>,
        signals: SignalBus,
    ) -> Self {
        let max_compare: usize = clamp_max_compare(cfg.max_compare);
        let selected: Vec<CardRecord> = rehydrate(storage.as_ref(), &cfg.storage_key, max_compare);
        let (changes, _) = watch::channel(selected.clone());

        Self {
            selected,
            max_compare,
            storage_key: cfg.storage_key.clone(),
            storage,
            notifier,
            signals,
            changes,
        }
    }

    pub fn identity_of(record: &CardRecord) -> String {
        record.identity()
    }

    pub fn is_selected(&self, identity: &str) -> bool {
        self.position(identity).is_some()
    }

    pub fn toggle(&mut self, record: &CardRecord) -> ToggleOutcome {
        let identity: String = Self::identity_of(record);

        let outcome: ToggleOutcome = if let Some(idx) = self.position(&identity) {
            let removed: CardRecord = self.selected.remove(idx);
            self.notifier.notify(Notification::success(format!(
                "{} removed from comparison",
                removed.name()
            )));
            ToggleOutcome::Removed
        } else if self.selected.len() < self.max_compare {
            self.selected.push(record.clone());
            let count: usize = self.selected.len();
            self.notifier.notify(Notification::success(format!(
                "{} added to comparison ({count}/{})",
                record.name(),
                self.max_compare
            )));
            ToggleOutcome::Added { count }
        } else {
            self.notifier.notify(self.capacity_notification(record));
            ToggleOutcome::Rejected {
                capacity: self.max_compare,
            }
        };

        debug!("toggle {identity}: {outcome:?}");
        self.commit();
        outcome
    }

    /// Removes `identity` without notifying. Unknown identities are a no-op.
    pub fn remove(&mut self, identity: &str) -> bool {
        let removed: bool = match self.position(identity) {
            Some(idx) => {
                self.selected.remove(idx);
                true
            }
            None => false,
        };
        self.commit();
        removed
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
        self.notifier.notify(Notification::info("Comparison cleared"));
        self.commit();
    }

    pub fn selected(&self) -> &[CardRecord] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= self.max_compare
    }

    pub fn max_compare(&self) -> usize {
        self.max_compare
    }

    pub fn state(&self) -> SelectionState {
        match self.selected.len() {
            0 => SelectionState::Empty,
            _ if self.is_full() => SelectionState::Full,
            n => SelectionState::Partial(n),
        }
    }

    /// Change feed: the receiver always holds the latest selection.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CardRecord>> {
        self.changes.subscribe()
    }

    pub fn signals(&self) -> &SignalBus {
        &self.signals
    }

    fn position(&self, identity: &str) -> Option<usize> {
        self.selected
            .iter()
            .position(|card| Self::identity_of(card) == identity)
    }

    fn capacity_notification(&self, rejected: &CardRecord) -> Notification {
        let notification: Notification = Notification::error(format!(
            "You can compare up to {} cards. Remove one to add {}.",
            self.max_compare,
            rejected.name()
        ));

        if self.max_compare < 2 {
            return notification;
        }

        let bus: SignalBus = self.signals.clone();
        notification.with_action(NotificationAction::new(COMPARE_NOW_LABEL, move || {
            bus.publish(Signal::OpenComparison);
        }))
    }

    fn commit(&self) {
        self.persist();
        self.changes.send_replace(self.selected.clone());
    }

    fn persist(&self) {
        let serialized: String = match serde_json::to_string(&self.selected) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("Could not serialize selection: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.storage_key, &serialized) {
            warn!("Could not persist selection: {e:#}");
        }
    }
}

/// Reads the persisted selection. Never fails: bad data means an empty selection.
pub fn rehydrate(storage: &dyn DurableStorage, key: &str, max_compare: usize) -> Vec<CardRecord> {
    let raw: String = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Could not read persisted selection: {e:#}");
            return Vec::new();
        }
    };

    let values: Vec<Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            warn!("Discarding corrupt persisted selection: {e}");
            return Vec::new();
        }
    };

    let total: usize = values.len();
    let mut selected: Vec<CardRecord> = Vec::with_capacity(max_compare);
    for record in values.into_iter().filter_map(CardRecord::from_value) {
        if selected.len() == max_compare {
            break;
        }
        if selected.iter().all(|kept| kept.identity() != record.identity()) {
            selected.push(record);
        }
    }

    if selected.len() != total {
        warn!(
            "Dropped {} persisted card(s) that were duplicates, malformed or over capacity",
            total - selected.len()
        );
    }
    selected
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
