//! # Floating Affordances
//!
//! * [`ComparePill`]: a passive summary of the selection that opens the
//!   comparison panel on demand, or when someone publishes
//!   [`Signal::OpenComparison`].
//! * [`CompareToggle`]: the add/remove control attached to every card.

use cardcompare_common::card::CardRecord;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::sync::watch;
use tracing::debug;

use crate::signal::Signal;
use crate::store::{SelectionStore, ToggleOutcome};

pub const MAX_THUMBNAILS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub identity: String,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PillView {
    pub count: usize,
    pub max_compare: usize,
    pub thumbnails: Vec<Thumbnail>,
    /// Selected cards beyond the thumbnails, shown as `+N`.
    pub overflow: usize,
}

pub struct ComparePill {
    selection: watch::Receiver<Vec<CardRecord>>,
    signals: broadcast::Receiver<Signal>,
    max_compare: usize,
    open: bool,
}

impl ComparePill {
    pub fn new(store: &SelectionStore) -> Self {
        Self {
            selection: store.subscribe(),
            signals: store.signals().subscribe(),
            max_compare: store.max_compare(),
            open: false,
        }
    }

    /// What the pill shows, `None` while nothing is selected.
    pub fn view(&self) -> Option<PillView> {
        let selection = self.selection.borrow();
        if selection.is_empty() {
            return None;
        }

        let thumbnails: Vec<Thumbnail> = selection
            .iter()
            .take(MAX_THUMBNAILS)
            .map(|card| Thumbnail {
                identity: card.identity(),
                name: card.name().to_string(),
                image: card.image().map(str::to_string),
            })
            .collect();

        Some(PillView {
            count: selection.len(),
            max_compare: self.max_compare,
            overflow: selection.len().saturating_sub(MAX_THUMBNAILS),
            thumbnails,
        })
    }

    pub fn is_visible(&self) -> bool {
        !self.selection.borrow().is_empty()
    }

    /// Drains pending signals. Returns `true` if the panel was asked to open.
    pub fn poll_signals(&mut self) -> bool {
        let mut requested: bool = false;
        loop {
            match self.signals.try_recv() {
                Ok(Signal::OpenComparison) => requested = true,
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("pill skipped {skipped} stale signal(s)");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        if requested {
            self.open = true;
        }
        requested
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn clear_all(&mut self, store: &mut SelectionStore) {
        store.clear_all();
        self.open = false;
    }
}

/// A click as seen by the toggle control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickEvent {
    propagation_stopped: bool,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether the surrounding card should still handle (navigate on) this click.
    pub fn reaches_parent(&self) -> bool {
        !self.propagation_stopped && !self.default_prevented
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleView {
    pub selected: bool,
    pub label: &'static str,
}

pub struct CompareToggle {
    record: CardRecord,
}

impl CompareToggle {
    pub fn new(record: CardRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &CardRecord {
        &self.record
    }

    pub fn view(&self, store: &SelectionStore) -> ToggleView {
        let selected: bool = store.is_selected(&self.record.identity());
        ToggleView {
            selected,
            label: if selected { "Added to compare" } else { "Add to compare" },
        }
    }

    /// Toggles the card and keeps the click from reaching the card around it.
    pub fn on_click(&self, event: &mut ClickEvent, store: &mut SelectionStore) -> ToggleOutcome {
        event.stop_propagation();
        event.prevent_default();
        store.toggle(&self.record)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
