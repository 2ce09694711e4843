//! # Comparison Renderer
//!
//! Turns the selection and the [`AttributeSchema`] into view models: the
//! side-by-side grid, or the single-card detail view. Presentation layers only
//! draw what they are given here.

use std::sync::Arc;

use cardcompare_common::card::CardRecord;
use cardcompare_common::config::Config;
use cardcompare_common::sanitize::Sanitizer;

use crate::schema::{AttributeRow, AttributeSchema, Section, default_schema};

mod cell;
mod expand;

pub use cell::{Benefit, CLAMP_LINES, Cell, Clamp, NOT_AVAILABLE, TextBlock};
pub use expand::ExpandedRowSet;

use cell::CellContext;

/// Fewer displayed cards than this and the grid is replaced by a prompt.
pub const MIN_GRID_COLUMNS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSummary {
    pub identity: String,
    pub name: String,
    pub image: Option<String>,
}

impl From<&CardRecord> for CardSummary {
    fn from(record: &CardRecord) -> Self {
        Self {
            identity: record.identity(),
            name: record.name().to_string(),
            image: record.image().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    Card(CardSummary),
    /// An empty slot the user can fill through search.
    Open { slot: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Expansion key, the row path.
    pub key: String,
    pub label: String,
    pub cells: Vec<Cell>,
}

impl RenderedRow {
    pub fn is_expandable(&self) -> bool {
        self.cells.iter().any(Cell::is_expandable)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_available())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub title: String,
    pub rows: Vec<RenderedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonView {
    /// Not enough cards yet: search slots and a nudge, no sections.
    Prompt { columns: Vec<Column>, message: String },
    Grid {
        columns: Vec<Column>,
        sections: Vec<RenderedSection>,
    },
}

impl ComparisonView {
    pub fn columns(&self) -> &[Column] {
        match self {
            ComparisonView::Prompt { columns, .. } | ComparisonView::Grid { columns, .. } => columns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub card: CardSummary,
    pub sections: Vec<RenderedSection>,
}

#[derive(Clone)]
pub struct ComparisonRenderer {
    schema: &'static AttributeSchema,
    sanitizer: Arc<dyn Sanitizer>,
    truncate_threshold: usize,
}

impl ComparisonRenderer {
    pub fn new(cfg: &Config, sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self {
            schema: default_schema(),
            sanitizer,
            truncate_threshold: cfg.truncate_threshold,
        }
    }

    pub fn schema(&self) -> &'static AttributeSchema {
        self.schema
    }

    pub fn render_cell(&self, record: &CardRecord, row: &AttributeRow, expanded: &ExpandedRowSet) -> Cell {
        let ctx = CellContext {
            sanitizer: self.sanitizer.as_ref(),
            truncate_threshold: self.truncate_threshold,
            expanded: expanded.is_expanded(row.path),
        };
        cell::render(record, row, &ctx)
    }

    pub fn render_row(&self, records: &[CardRecord], row: &AttributeRow, expanded: &ExpandedRowSet) -> RenderedRow {
        RenderedRow {
            key: row.path.to_string(),
            label: row.label.to_string(),
            cells: records
                .iter()
                .map(|record| self.render_cell(record, row, expanded))
                .collect(),
        }
    }

    /// The comparison panel for `records`, padded with open slots up to `max_compare`.
    pub fn render_comparison(
        &self,
        records: &[CardRecord],
        max_compare: usize,
        expanded: &ExpandedRowSet,
    ) -> ComparisonView {
        let columns: Vec<Column> = columns(records, max_compare);

        if records.len() < MIN_GRID_COLUMNS {
            let message: String = match records.len() {
                0 => "Add at least two cards to start comparing".to_string(),
                _ => "Add one more card to start comparing".to_string(),
            };
            return ComparisonView::Prompt { columns, message };
        }

        let sections: Vec<RenderedSection> = self
            .schema
            .sections
            .iter()
            .map(|section| self.render_section(records, section, expanded))
            .collect();

        ComparisonView::Grid { columns, sections }
    }

    /// One card on its own. Sections with nothing to show are left out.
    pub fn render_detail(&self, record: &CardRecord, expanded: &ExpandedRowSet) -> DetailView {
        let records: &[CardRecord] = std::slice::from_ref(record);
        let sections: Vec<RenderedSection> = self
            .schema
            .sections
            .iter()
            .map(|section| self.render_section(records, section, expanded))
            .filter(|section| section.rows.iter().any(|row| !row.is_empty()))
            .collect();

        DetailView {
            card: CardSummary::from(record),
            sections,
        }
    }

    fn render_section(&self, records: &[CardRecord], section: &Section, expanded: &ExpandedRowSet) -> RenderedSection {
        RenderedSection {
            title: section.title.to_string(),
            rows: section
                .rows
                .iter()
                .map(|row| self.render_row(records, row, expanded))
                .collect(),
        }
    }
}

/// The cards shown as columns: the selection, with `pre_selected` seeded into
/// slot 0 when it is not already selected and there is room for it.
pub fn displayed_records(
    selected: &[CardRecord],
    pre_selected: Option<&CardRecord>,
    max_compare: usize,
) -> Vec<CardRecord> {
    let mut records: Vec<CardRecord> = selected.iter().take(max_compare).cloned().collect();

    if let Some(seed) = pre_selected {
        let identity: String = seed.identity();
        let already: bool = records.iter().any(|card| card.identity() == identity);
        if !already && records.len() < max_compare {
            records.insert(0, seed.clone());
        }
    }
    records
}

fn columns(records: &[CardRecord], max_compare: usize) -> Vec<Column> {
    let open: usize = max_compare.saturating_sub(records.len());
    records
        .iter()
        .map(|record| Column::Card(CardSummary::from(record)))
        .chain((records.len()..records.len() + open).map(|slot| Column::Open { slot }))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
