#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use cardcompare_common::card::CardRecord;
use cardcompare_common::config::Config;
use cardcompare_common::error::CompareError;
use cardcompare_core::render::ComparisonRenderer;
use cardcompare_core::sanitize::AllowListSanitizer;
use cardcompare_core::search::MultiSlotSearch;
use cardcompare_core::session::ComparisonSession;
use cardcompare_core::store::{SelectionStore, ToggleOutcome};
use tokio::time::sleep;

use crate::support::{Catalog, Inbox, SharedStorage, axis_heavy_catalog, config, store};

const PAST_DEBOUNCE: Duration = Duration::from_millis(301);

fn search(max: usize, catalog: &Catalog) -> MultiSlotSearch {
    MultiSlotSearch::new(&config(max), Arc::new(catalog.clone()))
}

/// Scenario D: short queries never search; real ones are capped at five.
#[tokio::test(start_paused = true)]
async fn short_queries_stay_empty_and_long_ones_cap_at_five() {
    let catalog: Catalog = Catalog::new(axis_heavy_catalog());
    let mut search: MultiSlotSearch = search(2, &catalog);

    search.set_query(0, "a").unwrap();
    sleep(PAST_DEBOUNCE).await;
    assert!(search.results(0).unwrap().is_empty());
    assert_eq!(catalog.fetches(), 0);

    search.set_query(0, "axis").unwrap();
    sleep(PAST_DEBOUNCE).await;
    let results: Vec<CardRecord> = search.results(0).unwrap();
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|c| c.name().to_lowercase().contains("axis")));
    assert_eq!(search.debounced_query(0).unwrap(), "axis");
}

#[tokio::test(start_paused = true)]
async fn only_the_last_keystroke_fires() {
    let catalog: Catalog = Catalog::new(axis_heavy_catalog());
    let mut search: MultiSlotSearch = search(2, &catalog);

    for partial in ["re", "reg", "rega", "regal"] {
        search.set_query(0, partial).unwrap();
        sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(search.debounced_query(0).unwrap(), "");

    sleep(Duration::from_millis(250)).await;
    assert_eq!(search.debounced_query(0).unwrap(), "regal");
    assert_eq!(search.results(0).unwrap()[0].name(), "HDFC Regalia");
}

#[tokio::test(start_paused = true)]
async fn slots_debounce_independently() {
    let catalog: Catalog = Catalog::new(axis_heavy_catalog());
    let mut search: MultiSlotSearch = search(3, &catalog);

    search.set_query(0, "axis").unwrap();
    sleep(Duration::from_millis(200)).await;
    search.set_query(1, "sbi").unwrap();
    sleep(Duration::from_millis(150)).await;

    assert_eq!(search.debounced_query(0).unwrap(), "axis");
    assert_eq!(search.debounced_query(1).unwrap(), "");
    assert!(search.is_pending(1).unwrap());

    sleep(Duration::from_millis(200)).await;
    assert_eq!(search.results(1).unwrap()[0].name(), "SBI Elite");
    assert_eq!(search.results(0).unwrap().len(), 5);
    assert!(search.results(2).unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn interleaved_typing_settles_each_slot_on_its_own_last_query() {
    let catalog: Catalog = Catalog::new(axis_heavy_catalog());
    let mut search: MultiSlotSearch = search(2, &catalog);

    let keystrokes: [(usize, &str); 6] = [
        (0, "ax"),
        (1, "hd"),
        (0, "axi"),
        (1, "hdf"),
        (0, "axis"),
        (1, "hdfc"),
    ];
    for (slot, query) in keystrokes {
        search.set_query(slot, query).unwrap();
        sleep(Duration::from_millis(50)).await;
        assert_eq!(search.debounced_query(0).unwrap(), "");
        assert_eq!(search.debounced_query(1).unwrap(), "");
    }

    // Now at 300ms. Slot 0 settles at 500ms, slot 1 at 550ms.
    sleep(Duration::from_millis(220)).await;
    assert_eq!(search.debounced_query(0).unwrap(), "axis");
    assert_eq!(search.debounced_query(1).unwrap(), "");

    sleep(Duration::from_millis(50)).await;
    assert_eq!(search.debounced_query(1).unwrap(), "hdfc");
    assert_eq!(search.results(1).unwrap()[0].name(), "HDFC Regalia");
    assert!(search.results(0).unwrap().iter().all(|c| c.name().to_lowercase().contains("axis")));
    assert_eq!(catalog.fetches(), 1);
}

#[tokio::test(start_paused = true)]
async fn catalog_is_fetched_once_per_session() {
    let catalog: Catalog = Catalog::new(axis_heavy_catalog());
    let mut search: MultiSlotSearch = search(2, &catalog);

    for query in ["axis", "hdfc", "sbi"] {
        search.set_query(0, query).unwrap();
        search.set_query(1, query).unwrap();
        sleep(PAST_DEBOUNCE).await;
    }
    assert_eq!(catalog.fetches(), 1);
    assert!(search.catalog_loaded());
}

#[tokio::test(start_paused = true)]
async fn failing_catalog_yields_no_results() {
    let catalog: Catalog = Catalog::failing();
    let mut search: MultiSlotSearch = search(2, &catalog);

    search.set_query(0, "axis").unwrap();
    sleep(PAST_DEBOUNCE).await;
    assert!(search.results(0).unwrap().is_empty());
}

#[tokio::test]
async fn out_of_range_slot_is_an_error() {
    let mut search: MultiSlotSearch = search(2, &Catalog::new(Vec::new()));
    let err: CompareError = search.set_query(2, "axis").unwrap_err();
    assert!(matches!(err, CompareError::InvalidSlot { slot: 2, max: 2 }));
}

#[tokio::test(start_paused = true)]
async fn picking_a_result_selects_it_and_resets_the_slot() {
    let catalog: Catalog = Catalog::new(axis_heavy_catalog());
    let storage: SharedStorage = SharedStorage::default();
    let mut store: SelectionStore = store(2, &storage, &Inbox::default());
    let mut search: MultiSlotSearch = search(2, &catalog);

    search.set_query(1, "magnus").unwrap();
    sleep(PAST_DEBOUNCE).await;
    let hit: CardRecord = search.results(1).unwrap().remove(0);

    let outcome: ToggleOutcome = search.select(1, &hit, &mut store).unwrap();
    assert_eq!(outcome, ToggleOutcome::Added { count: 1 });
    assert_eq!(search.query(1).unwrap(), "");
    assert_eq!(search.debounced_query(1).unwrap(), "");
    assert!(search.results(1).unwrap().is_empty());
    assert!(!search.is_pending(1).unwrap());
}

#[tokio::test(start_paused = true)]
async fn closing_a_session_cancels_pending_timers() {
    let catalog: Catalog = Catalog::new(axis_heavy_catalog());
    let renderer: ComparisonRenderer = ComparisonRenderer::new(&Config::default(), Arc::new(AllowListSanitizer));
    let mut session: ComparisonSession = ComparisonSession::open(&config(2), Arc::new(catalog.clone()), renderer);

    session.search_mut().set_query(0, "axis").unwrap();
    session.search_mut().set_query(1, "hdfc").unwrap();
    sleep(Duration::from_millis(100)).await;
    session.close();

    sleep(Duration::from_secs(2)).await;
    assert_eq!(catalog.fetches(), 0);
}
