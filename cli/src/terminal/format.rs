//! Terminal rendering of core views.
//!
//! Core produces structured views; this module turns them into lines. Markup
//! is already sanitized by the time it arrives here and is flattened to text.

use cardcompare_core::affordances::{PillView, ToggleView};
use cardcompare_core::render::{
    Benefit, CLAMP_LINES, Cell, CardSummary, Clamp, Column, ComparisonView, DetailView, NOT_AVAILABLE,
    RenderedSection, TextBlock,
};
use cardcompare_core::sanitize::strip_markup;
use colored::*;

use crate::terminal::colors;
use crate::terminal::print;

pub fn pill(view: Option<&PillView>) {
    let Some(view) = view else {
        print::print_status("Nothing selected for comparison");
        return;
    };

    let mut names: Vec<String> = view.thumbnails.iter().map(|t| t.name.clone()).collect();
    if view.overflow > 0 {
        names.push(format!("+{}", view.overflow));
    }
    print::print_status(format!(
        "{} {} {}",
        format!("Compare ({}/{})", view.count, view.max_compare).color(colors::ACCENT).bold(),
        "│".color(colors::SEPARATOR),
        names.join(", ")
    ));
}

pub fn toggle(view: &ToggleView, name: &str) {
    let mark: ColoredString = if view.selected { "[x]".green().bold() } else { "[ ]".bright_black() };
    print::print(&format!("{} {} {}", mark, view.label.color(colors::PRIMARY), name));
}

pub fn comparison(view: &ComparisonView, q_level: u8) {
    match view {
        ComparisonView::Prompt { columns, message } => {
            columns_line(columns);
            print::centerln(&message.color(colors::MUTED).to_string());
        }
        ComparisonView::Grid { columns, sections } => {
            columns_line(columns);
            let names: Vec<String> = columns.iter().map(column_name).collect();
            for section in sections {
                section_block(section, &names, q_level);
            }
        }
    }
}

pub fn detail(view: &DetailView, q_level: u8) {
    summary(&view.card);
    for section in &view.sections {
        print::header(&section.title, q_level);
        let key_width: usize = section.rows.iter().map(|row| row.label.len()).max().unwrap_or(0);
        for row in section.rows.iter().filter(|row| !row.is_empty()) {
            let lines: Vec<ColoredString> = row.cells.first().map(cell_lines).unwrap_or_default();
            let first: String = lines.first().map(|l| l.to_string()).unwrap_or_default();
            print::aligned_line(&row.label, key_width, first);
            for line in lines.iter().skip(1) {
                print::print(&format!("  {}{}", " ".repeat(key_width + 3), line));
            }
        }
    }
}

fn summary(card: &CardSummary) {
    print::fat_separator();
    print::centerln(&card.name.color(colors::PRIMARY).bold().to_string());
    if let Some(image) = &card.image {
        print::centerln(&image.color(colors::MUTED).to_string());
    }
    print::fat_separator();
}

fn columns_line(columns: &[Column]) {
    for (idx, column) in columns.iter().enumerate() {
        match column {
            Column::Card(card) => print::tree_head(idx + 1, &card.name),
            Column::Open { slot } => print::tree_head(
                idx + 1,
                &format!("empty, fill with `cardcompare search --slot {slot} <query>`"),
            ),
        }
    }
}

fn column_name(column: &Column) -> String {
    match column {
        Column::Card(card) => card.name.clone(),
        Column::Open { slot } => format!("Slot {slot}"),
    }
}

fn section_block(section: &RenderedSection, names: &[String], q_level: u8) {
    print::header(&section.title, q_level);
    for (idx, row) in section.rows.iter().enumerate() {
        let label: String = if row.is_expandable() {
            format!("{} {}", row.label, format!("(--expand {})", row.key).color(colors::MUTED))
        } else {
            row.label.clone()
        };
        print::tree_head(idx + 1, &label);
        let pairs: Vec<(String, Vec<ColoredString>)> = names
            .iter()
            .zip(&row.cells)
            .map(|(name, cell)| (name.clone(), cell_lines(cell)))
            .collect();
        print::as_tree_one_level(&pairs);
    }
}

/// Lines for one cell, first line first.
pub fn cell_lines(cell: &Cell) -> Vec<ColoredString> {
    match cell {
        Cell::NotAvailable => vec![NOT_AVAILABLE.color(colors::MUTED).italic()],
        Cell::Text(block) => block_lines(block, false),
        Cell::Markup(block) => block_lines(block, true),
        Cell::Tags(tags) => vec![
            tags.iter()
                .map(|t| format!("‹{t}›"))
                .collect::<Vec<String>>()
                .join(" ")
                .color(colors::CHIP),
        ],
        Cell::List(items) => items.iter().map(|i| format!("• {i}").normal()).collect(),
        Cell::Link { href, label } => vec![format!("{label} <{href}>").color(colors::LINK).underline()],
        Cell::Benefits(benefits) => benefits.iter().flat_map(benefit_lines).collect(),
        Cell::Fee { value, comment } => {
            let mut lines: Vec<ColoredString> = Vec::new();
            if let Some(value) = value {
                lines.push(value.color(colors::FEE).bold());
            }
            if let Some(comment) = comment {
                lines.extend(flatten(comment).lines().map(|l| l.color(colors::MUTED)));
            }
            lines
        }
    }
}

fn benefit_lines(benefit: &Benefit) -> Vec<ColoredString> {
    let mut lines: Vec<ColoredString> = vec![format!("★ {}", benefit.header).color(colors::ACCENT)];
    lines.extend(
        flatten(&benefit.description)
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| format!("  {l}").normal()),
    );
    lines
}

fn block_lines(block: &TextBlock, markup: bool) -> Vec<ColoredString> {
    let text: String = if markup { flatten(&block.content) } else { block.content.clone() };
    let mut lines: Vec<ColoredString> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.normal())
        .collect();

    if block.clamp == Clamp::Collapsed {
        lines.truncate(CLAMP_LINES);
        lines.push("… more".color(colors::MUTED));
    }
    lines
}

/// Sanitized markup to plain lines: block-level tags become line breaks.
fn flatten(markup: &str) -> String {
    let broken: String = markup
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("</p>", "\n")
        .replace("</li>", "\n")
        .replace("<li>", "• ");
    strip_markup(&broken)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
