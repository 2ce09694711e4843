//! # Multi-Slot Search
//!
//! Each empty comparison slot gets its own search box. Queries are debounced per
//! slot and filtered against a catalog snapshot that is fetched lazily, at most
//! once for the lifetime of this search.
//!
//! Slots never share state: every slot owns its result buffer and its pending
//! [`DebounceHandle`], so typing in one slot cannot disturb another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cardcompare_common::card::CardRecord;
use cardcompare_common::catalog::{CatalogLookup, SearchFilter};
use cardcompare_common::config::{Config, clamp_max_compare};
use cardcompare_common::error::{CompareError, CompareResult};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::debounce::{DebounceHandle, Debouncer};
use crate::store::{SelectionStore, ToggleOutcome};

type CatalogCache = Arc<OnceCell<Arc<Vec<CardRecord>>>>;

/// What a slot shows once its query has settled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotOutcome {
    pub debounced_query: String,
    pub results: Vec<CardRecord>,
}

#[derive(Default)]
struct SlotSearch {
    query: String,
    outcome: Arc<Mutex<SlotOutcome>>,
    pending: Option<DebounceHandle<usize>>,
}

impl SlotSearch {
    fn reset(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
        self.query.clear();
        *lock(&self.outcome) = SlotOutcome::default();
    }
}

pub struct MultiSlotSearch {
    catalog: Arc<dyn CatalogLookup>,
    cache: CatalogCache,
    debouncer: Debouncer,
    slots: Vec<SlotSearch>,
    min_query_len: usize,
    max_results: usize,
}

impl MultiSlotSearch {
    pub fn new(cfg: &Config, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self {
            catalog,
            cache: Arc::new(OnceCell::new()),
            debouncer: Debouncer::new(cfg.debounce),
            slots: (0..clamp_max_compare(cfg.max_compare)).map(|_| SlotSearch::default()).collect(),
            min_query_len: cfg.min_query_len,
            max_results: cfg.max_results,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Records a keystroke in `slot`. Filtering happens once the query has been
    /// stable for the debounce delay; an earlier pending run for the same slot is
    /// cancelled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_query(&mut self, slot: usize, query: impl Into<String>) -> CompareResult<()> {
        let max_results: usize = self.max_results;
        let min_query_len: usize = self.min_query_len;
        let catalog: Arc<dyn CatalogLookup> = self.catalog.clone();
        let cache: CatalogCache = self.cache.clone();
        let debouncer: Debouncer = self.debouncer;

        let state: &mut SlotSearch = self.slot_mut(slot)?;
        state.query = query.into();

        let query: String = state.query.clone();
        let outcome: Arc<Mutex<SlotOutcome>> = state.outcome.clone();
        let task = async move {
            let results: Vec<CardRecord> = if query.trim().chars().count() < min_query_len {
                Vec::new()
            } else {
                let cards: Arc<Vec<CardRecord>> = load_catalog(&cache, &catalog).await;
                filter_cards(&cards, &query, max_results)
            };
            debug!("slot {slot} settled on {query:?} with {} result(s)", results.len());
            *lock(&outcome) = SlotOutcome {
                debounced_query: query,
                results,
            };
        };

        // Replacing the handle drops, and so cancels, the previous timer.
        state.pending = Some(debouncer.schedule(slot, task));
        Ok(())
    }

    /// Fills `slot` with `record`: toggles it in the store and resets the slot.
    pub fn select(
        &mut self,
        slot: usize,
        record: &CardRecord,
        store: &mut SelectionStore,
    ) -> CompareResult<ToggleOutcome> {
        self.slot_mut(slot)?;
        let outcome: ToggleOutcome = store.toggle(record);
        self.clear(slot)?;
        Ok(outcome)
    }

    pub fn clear(&mut self, slot: usize) -> CompareResult<()> {
        self.slot_mut(slot)?.reset();
        Ok(())
    }

    /// Cancels every pending timer. Queries and results are left as they are.
    pub fn cancel_all(&mut self) {
        for slot in &mut self.slots {
            if let Some(handle) = slot.pending.take() {
                handle.cancel();
            }
        }
    }

    pub fn query(&self, slot: usize) -> CompareResult<&str> {
        Ok(self.slot(slot)?.query.as_str())
    }

    pub fn debounced_query(&self, slot: usize) -> CompareResult<String> {
        Ok(lock(&self.slot(slot)?.outcome).debounced_query.clone())
    }

    pub fn results(&self, slot: usize) -> CompareResult<Vec<CardRecord>> {
        Ok(lock(&self.slot(slot)?.outcome).results.clone())
    }

    pub fn is_pending(&self, slot: usize) -> CompareResult<bool> {
        Ok(self
            .slot(slot)?
            .pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished()))
    }

    /// Fetches the catalog now instead of on the first real query.
    pub async fn prefetch(&self) -> usize {
        load_catalog(&self.cache, &self.catalog).await.len()
    }

    pub fn catalog_loaded(&self) -> bool {
        self.cache.initialized()
    }

    fn slot(&self, slot: usize) -> CompareResult<&SlotSearch> {
        let max: usize = self.slots.len();
        self.slots
            .get(slot)
            .ok_or(CompareError::InvalidSlot { slot, max })
    }

    fn slot_mut(&mut self, slot: usize) -> CompareResult<&mut SlotSearch> {
        let max: usize = self.slots.len();
        self.slots
            .get_mut(slot)
            .ok_or(CompareError::InvalidSlot { slot, max })
    }
}

/// Case-insensitive substring match on the card name, capped at `max_results`.
pub fn filter_cards(cards: &[CardRecord], query: &str, max_results: usize) -> Vec<CardRecord> {
    let needle: String = query.trim().to_lowercase();
    cards
        .iter()
        .filter(|card| card.name().to_lowercase().contains(&needle))
        .take(max_results)
        .cloned()
        .collect()
}

/// Returns the cached catalog, fetching it on first use.
///
/// The fetch runs in its own task, so aborting a debounced caller midway
/// leaves it running and the next caller waits for the same result.
async fn load_catalog(cache: &CatalogCache, catalog: &Arc<dyn CatalogLookup>) -> Arc<Vec<CardRecord>> {
    if let Some(cards) = cache.get() {
        return cards.clone();
    }

    let cache: CatalogCache = cache.clone();
    let catalog: Arc<dyn CatalogLookup> = catalog.clone();
    let fetch = tokio::spawn(async move {
        cache
            .get_or_init(|| async {
                match catalog.search(&SearchFilter::default()).await {
                    Ok(cards) => {
                        debug!("catalog loaded with {} card(s)", cards.len());
                        Arc::new(cards)
                    }
                    Err(e) => {
                        warn!("Catalog unavailable, search will return nothing: {e:#}");
                        Arc::new(Vec::new())
                    }
                }
            })
            .await
            .clone()
    });

    match fetch.await {
        Ok(cards) => cards,
        Err(e) => {
            warn!("Catalog fetch did not finish: {e}");
            Arc::new(Vec::new())
        }
    }
}

fn lock(outcome: &Mutex<SlotOutcome>) -> MutexGuard<'_, SlotOutcome> {
    outcome.lock().unwrap_or_else(PoisonError::into_inner)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
