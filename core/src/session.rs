//! One open comparison panel.
//!
//! A [`ComparisonSession`] exists from the moment the panel opens until it
//! closes. It owns everything transient: slot searches, their timers, the
//! catalog snapshot and the expanded rows. Closing it throws all of that away
//! and leaves the [`SelectionStore`] untouched.

use std::sync::Arc;

use cardcompare_common::card::CardRecord;
use cardcompare_common::catalog::CatalogLookup;
use cardcompare_common::config::Config;
use cardcompare_common::error::CompareResult;
use tracing::debug;

use crate::render::{ComparisonRenderer, ComparisonView, DetailView, ExpandedRowSet, displayed_records};
use crate::search::MultiSlotSearch;
use crate::store::{SelectionStore, ToggleOutcome};

pub struct ComparisonSession {
    search: MultiSlotSearch,
    renderer: ComparisonRenderer,
    expanded: ExpandedRowSet,
    pre_selected: Option<CardRecord>,
}

impl ComparisonSession {
    pub fn open(cfg: &Config, catalog: Arc<dyn CatalogLookup>, renderer: ComparisonRenderer) -> Self {
        debug!("comparison session opened");
        Self {
            search: MultiSlotSearch::new(cfg, catalog),
            renderer,
            expanded: ExpandedRowSet::new(),
            pre_selected: None,
        }
    }

    /// Seeds the panel with a card the user came from, without selecting it.
    pub fn with_pre_selected(mut self, record: CardRecord) -> Self {
        self.pre_selected = Some(record);
        self
    }

    pub fn pre_selected(&self) -> Option<&CardRecord> {
        self.pre_selected.as_ref()
    }

    pub fn search(&self) -> &MultiSlotSearch {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut MultiSlotSearch {
        &mut self.search
    }

    pub fn expanded(&self) -> &ExpandedRowSet {
        &self.expanded
    }

    pub fn toggle_row(&mut self, key: &str) -> bool {
        self.expanded.toggle(key)
    }

    pub fn displayed(&self, store: &SelectionStore) -> Vec<CardRecord> {
        displayed_records(store.selected(), self.pre_selected.as_ref(), store.max_compare())
    }

    pub fn view(&self, store: &SelectionStore) -> ComparisonView {
        let records: Vec<CardRecord> = self.displayed(store);
        self.renderer
            .render_comparison(&records, store.max_compare(), &self.expanded)
    }

    pub fn detail(&self, record: &CardRecord) -> DetailView {
        self.renderer.render_detail(record, &self.expanded)
    }

    /// Fills `slot` with a search result.
    pub fn pick(&mut self, slot: usize, record: &CardRecord, store: &mut SelectionStore) -> CompareResult<ToggleOutcome> {
        self.search.select(slot, record, store)
    }

    /// The "X" on a column. A card that is only pre-selected is left alone.
    pub fn remove(&mut self, identity: &str, store: &mut SelectionStore) -> bool {
        store.remove(identity)
    }

    pub fn close(mut self) {
        self.search.cancel_all();
        self.expanded.clear();
        debug!("comparison session closed");
    }
}
