#![cfg(test)]
use std::sync::Arc;

use cardcompare_common::card::CardRecord;
use cardcompare_common::config::Config;
use cardcompare_core::render::{
    Benefit, Cell, Clamp, Column, ComparisonRenderer, ComparisonView, DetailView, ExpandedRowSet, RenderedRow,
    RenderedSection,
};
use cardcompare_core::sanitize::AllowListSanitizer;
use cardcompare_core::schema::AttributeRow;
use cardcompare_core::session::ComparisonSession;
use cardcompare_core::store::SelectionStore;
use serde_json::json;

use crate::support::{Catalog, Inbox, SharedStorage, card, config, record, store};

fn renderer() -> ComparisonRenderer {
    ComparisonRenderer::new(&Config::default(), Arc::new(AllowListSanitizer))
}

fn row(view: &ComparisonView, path: &str) -> RenderedRow {
    let ComparisonView::Grid { sections, .. } = view else {
        panic!("expected a grid, got {view:?}");
    };
    sections
        .iter()
        .flat_map(|section| section.rows.iter())
        .find(|row| row.key == path)
        .cloned()
        .unwrap()
}

fn schema_row(renderer: &ComparisonRenderer, path: &str) -> &'static AttributeRow {
    renderer.schema().row(path).unwrap()
}

/// Scenario C: an empty fee still shows its sanitized comment.
#[test]
fn empty_fee_renders_its_comment() {
    let renderer: ComparisonRenderer = renderer();
    let waived: CardRecord = record(json!({
        "id": 1,
        "card_name": "Waiver",
        "bank_fee_structure": { "apr_fees": "", "apr_fees_comment": "<p>waived</p>" }
    }));

    let cell: Cell = renderer.render_cell(
        &waived,
        schema_row(&renderer, "bank_fee_structure.apr_fees"),
        &ExpandedRowSet::new(),
    );
    assert_eq!(
        cell,
        Cell::Fee {
            value: None,
            comment: Some("<p>waived</p>".to_string()),
        }
    );
}

#[test]
fn markup_fields_cannot_smuggle_script() {
    let renderer: ComparisonRenderer = renderer();
    let hostile: CardRecord = record(json!({
        "id": 9,
        "card_name": "Hostile",
        "milestone_benefits": "<p>Spend more</p><script>alert(1)</script><img src=x onerror=\"alert(2)\">",
        "bank_fee_structure": {
            "annual_fee": "₹500",
            "annual_fee_comment": "<a href=\"javascript:alert(3)\" onclick=\"x()\">terms</a>"
        }
    }));
    let expanded: ExpandedRowSet = ExpandedRowSet::new();

    let rendered: Vec<String> = ["milestone_benefits", "bank_fee_structure.annual_fee"]
        .iter()
        .map(|path| format!("{:?}", renderer.render_cell(&hostile, schema_row(&renderer, path), &expanded)))
        .collect();

    for output in rendered {
        let lower: String = output.to_lowercase();
        assert!(!lower.contains("<script"), "{output}");
        assert!(!lower.contains("onerror"), "{output}");
        assert!(!lower.contains("onclick"), "{output}");
        assert!(!lower.contains("javascript:"), "{output}");
    }
}

#[test]
fn grid_needs_two_cards() {
    let renderer: ComparisonRenderer = renderer();
    let expanded: ExpandedRowSet = ExpandedRowSet::new();

    let one: ComparisonView = renderer.render_comparison(&[card(1, "Alpha")], 3, &expanded);
    assert!(matches!(one, ComparisonView::Prompt { .. }));
    assert_eq!(one.columns().len(), 3);
    assert_eq!(one.columns()[1], Column::Open { slot: 1 });

    let two: ComparisonView = renderer.render_comparison(&[card(1, "Alpha"), card(2, "Bravo")], 3, &expanded);
    let ComparisonView::Grid { columns, sections } = &two else {
        panic!("expected a grid");
    };
    assert_eq!(columns.len(), 3);
    assert!(sections.iter().all(|s| s.rows.iter().all(|r| r.cells.len() == 2)));
}

#[test]
fn missing_values_read_not_available_per_column() {
    let renderer: ComparisonRenderer = renderer();
    let rich: CardRecord = record(json!({"id": 1, "card_name": "Rich", "card_network": "Visa"}));
    let bare: CardRecord = card(2, "Bare");

    let view: ComparisonView = renderer.render_comparison(&[rich, bare], 2, &ExpandedRowSet::new());
    let network: RenderedRow = row(&view, "card_network");
    assert!(network.cells[0].is_available());
    assert_eq!(network.cells[1], Cell::NotAvailable);
}

#[test]
fn benefits_sort_by_priority_with_missing_last() {
    let renderer: ComparisonRenderer = renderer();
    let ranked: CardRecord = record(json!({
        "id": 1,
        "card_name": "Ranked",
        "product_usps": [
            { "header": "Lounge", "description": "<b>8</b> visits" },
            { "header": "Cashback", "description": "5%", "priority": 2 },
            { "header": "Fuel", "description": "1% waiver", "priority": "1" }
        ]
    }));

    let cell: Cell = renderer.render_cell(&ranked, schema_row(&renderer, "product_usps"), &ExpandedRowSet::new());
    let Cell::Benefits(benefits) = cell else {
        panic!("expected benefits");
    };
    let headers: Vec<&str> = benefits.iter().map(|b: &Benefit| b.header.as_str()).collect();
    assert_eq!(headers, vec!["Fuel", "Cashback", "Lounge"]);
}

#[test]
fn long_text_collapses_until_its_row_expands() {
    let renderer: ComparisonRenderer = renderer();
    let wordy: CardRecord = record(json!({
        "id": 1,
        "card_name": "Wordy",
        "features": "Complimentary lounge access. ".repeat(10)
    }));
    let row: &AttributeRow = schema_row(&renderer, "features");

    let mut expanded: ExpandedRowSet = ExpandedRowSet::new();
    let collapsed: Cell = renderer.render_cell(&wordy, row, &expanded);
    assert!(matches!(collapsed, Cell::Text(ref block) if block.clamp == Clamp::Collapsed));

    expanded.toggle("features");
    let open: Cell = renderer.render_cell(&wordy, row, &expanded);
    assert!(matches!(open, Cell::Text(ref block) if block.clamp == Clamp::Expanded));
}

#[test]
fn detail_view_skips_sections_with_nothing_to_show() {
    let renderer: ComparisonRenderer = renderer();
    let sparse: CardRecord = record(json!({
        "id": 1,
        "card_name": "Sparse",
        "card_network": "RuPay",
        "eligibility": { "min_age": null, "documents": [] }
    }));

    let detail: DetailView = renderer.render_detail(&sparse, &ExpandedRowSet::new());
    let titles: Vec<&str> = detail.sections.iter().map(|s: &RenderedSection| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Card Details"]);
    assert_eq!(detail.card.name, "Sparse");
}

#[test]
fn pre_selected_card_seeds_the_first_column() {
    let storage: SharedStorage = SharedStorage::default();
    let mut store: SelectionStore = store(3, &storage, &Inbox::default());
    store.toggle(&card(2, "Bravo"));

    let session: ComparisonSession =
        ComparisonSession::open(&config(3), Arc::new(Catalog::new(Vec::new())), renderer())
            .with_pre_selected(card(1, "Alpha"));

    let view: ComparisonView = session.view(&store);
    let names: Vec<String> = view
        .columns()
        .iter()
        .filter_map(|column| match column {
            Column::Card(summary) => Some(summary.name.clone()),
            Column::Open { .. } => None,
        })
        .collect();
    assert_eq!(names, vec!["Alpha", "Bravo"]);
    assert!(!store.is_selected("1"));
}

#[test]
fn removing_a_seed_only_card_changes_nothing() {
    let storage: SharedStorage = SharedStorage::default();
    let mut store: SelectionStore = store(2, &storage, &Inbox::default());
    store.toggle(&card(2, "Bravo"));

    let mut session: ComparisonSession =
        ComparisonSession::open(&config(2), Arc::new(Catalog::new(Vec::new())), renderer())
            .with_pre_selected(card(1, "Alpha"));

    assert!(!session.remove("1", &mut store));
    assert_eq!(store.len(), 1);
    assert_eq!(session.displayed(&store).len(), 2);
}

#[test]
fn network_link_is_labelled_by_host() {
    let renderer: ComparisonRenderer = renderer();
    let linked: CardRecord = record(json!({
        "id": 1,
        "card_name": "Linked",
        "network_url": "https://www.visa.co.in/pay-with-visa"
    }));
    let cell: Cell = renderer.render_cell(&linked, schema_row(&renderer, "network_url"), &ExpandedRowSet::new());
    assert_eq!(
        cell,
        Cell::Link {
            href: "https://www.visa.co.in/pay-with-visa".to_string(),
            label: "Visit visa.co.in".to_string(),
        }
    );
}
