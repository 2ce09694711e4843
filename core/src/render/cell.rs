//! Cells: one rendered value of one row for one card.
//!
//! Each [`AttributeKind`] has its own handler below. Everything that may carry
//! markup goes through the sanitizer before it lands in a cell.

use cardcompare_common::card::CardRecord;
use cardcompare_common::sanitize::Sanitizer;
use serde_json::Value;

use crate::path::{is_blank, resolve_present, stringify};
use crate::sanitize::strip_markup;
use crate::schema::{AttributeKind, AttributeRow};

pub const NOT_AVAILABLE: &str = "Not Available";
/// Lines shown while a long cell is collapsed.
pub const CLAMP_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clamp {
    /// Short enough to show as is.
    None,
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub content: String,
    pub clamp: Clamp,
}

impl TextBlock {
    pub fn is_expandable(&self) -> bool {
        self.clamp != Clamp::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benefit {
    pub header: String,
    /// Sanitized markup.
    pub description: String,
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    NotAvailable,
    Text(TextBlock),
    /// Sanitized markup.
    Markup(TextBlock),
    Tags(Vec<String>),
    List(Vec<String>),
    Link { href: String, label: String },
    Benefits(Vec<Benefit>),
    /// A fee value with its explanatory comment (sanitized markup). At least one is set.
    Fee {
        value: Option<String>,
        comment: Option<String>,
    },
}

impl Cell {
    pub fn is_available(&self) -> bool {
        !matches!(self, Cell::NotAvailable)
    }

    pub fn is_expandable(&self) -> bool {
        match self {
            Cell::Text(block) | Cell::Markup(block) => block.is_expandable(),
            _ => false,
        }
    }
}

pub(crate) struct CellContext<'a> {
    pub sanitizer: &'a dyn Sanitizer,
    pub truncate_threshold: usize,
    pub expanded: bool,
}

pub(crate) fn render(record: &CardRecord, row: &AttributeRow, ctx: &CellContext) -> Cell {
    if row.fee_pair {
        return fee(record, row, ctx);
    }

    let Some(value) = resolve_present(record.fields(), row.path) else {
        return Cell::NotAvailable;
    };

    match row.kind {
        AttributeKind::Plain => plain(value, ctx),
        AttributeKind::LongText | AttributeKind::Markup => markup(value, ctx),
        AttributeKind::Tags => tags(value),
        AttributeKind::List => list(value),
        AttributeKind::Link => link(value),
        AttributeKind::RankedBenefits => ranked_benefits(value, ctx.sanitizer),
    }
}

fn fee(record: &CardRecord, row: &AttributeRow, ctx: &CellContext) -> Cell {
    let value: Option<String> = resolve_present(record.fields(), row.path).map(stringify);
    let comment: Option<String> = row
        .comment_path()
        .and_then(|path| resolve_present(record.fields(), &path))
        .map(|comment| ctx.sanitizer.sanitize(&stringify(comment)))
        .filter(|comment| !strip_markup(comment).trim().is_empty());

    match (value, comment) {
        (None, None) => Cell::NotAvailable,
        (value, comment) => Cell::Fee { value, comment },
    }
}

fn plain(value: &Value, ctx: &CellContext) -> Cell {
    let content: String = stringify(value);
    let clamp: Clamp = clamp_for(&content, ctx);
    Cell::Text(TextBlock { content, clamp })
}

fn markup(value: &Value, ctx: &CellContext) -> Cell {
    let content: String = ctx.sanitizer.sanitize(&stringify(value));
    if strip_markup(&content).trim().is_empty() {
        return Cell::NotAvailable;
    }
    let clamp: Clamp = clamp_for(&content, ctx);
    Cell::Markup(TextBlock { content, clamp })
}

fn tags(value: &Value) -> Cell {
    let chips: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(tag_label).collect(),
        other => tag_label(other).into_iter().collect(),
    };
    if chips.is_empty() {
        Cell::NotAvailable
    } else {
        Cell::Tags(chips)
    }
}

fn tag_label(item: &Value) -> Option<String> {
    let label: String = match item {
        Value::Object(map) => ["name", "label", "title"]
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !is_blank(v)))
            .map(stringify)?,
        other => stringify(other),
    };
    Some(label).filter(|label| !label.is_empty())
}

fn list(value: &Value) -> Cell {
    let raw: Vec<String> = match value {
        Value::Array(items) => items.iter().map(stringify).collect(),
        other => vec![stringify(other)],
    };
    let items: Vec<String> = raw
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if items.is_empty() {
        Cell::NotAvailable
    } else {
        Cell::List(items)
    }
}

fn link(value: &Value) -> Cell {
    let href: String = stringify(value);
    let lower: String = href.to_ascii_lowercase();
    let Some(rest) = ["https://", "http://"]
        .iter()
        .find_map(|scheme| lower.strip_prefix(scheme))
    else {
        return Cell::NotAvailable;
    };

    let host: &str = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        return Cell::NotAvailable;
    }
    let host: &str = host.strip_prefix("www.").unwrap_or(host);
    let label: String = format!("Visit {host}");
    Cell::Link { href, label }
}

fn ranked_benefits(value: &Value, sanitizer: &dyn Sanitizer) -> Cell {
    let Value::Array(items) = value else {
        return Cell::NotAvailable;
    };

    let mut benefits: Vec<Benefit> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| Benefit {
            header: item.get("header").map(stringify).unwrap_or_default(),
            description: item
                .get("description")
                .map(|d| sanitizer.sanitize(&stringify(d)))
                .unwrap_or_default(),
            priority: item.get("priority").and_then(priority),
        })
        .filter(|b| !b.header.is_empty() || !strip_markup(&b.description).trim().is_empty())
        .collect();

    // Stable sort: equal priorities keep catalog order, missing ones go last.
    benefits.sort_by_key(|b| (b.priority.is_none(), b.priority));

    if benefits.is_empty() {
        Cell::NotAvailable
    } else {
        Cell::Benefits(benefits)
    }
}

fn priority(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn clamp_for(content: &str, ctx: &CellContext) -> Clamp {
    if strip_markup(content).chars().count() <= ctx.truncate_threshold {
        Clamp::None
    } else if ctx.expanded {
        Clamp::Expanded
    } else {
        Clamp::Collapsed
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
