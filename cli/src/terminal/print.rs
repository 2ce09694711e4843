use std::fmt::Display;

use crate::terminal::colors;
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "cardcompare::print";

pub trait WithDefaultColor {
    fn with_default(self, default_color: Color) -> ColoredString;
}

impl WithDefaultColor for &str {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for String {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for ColoredString {
    fn with_default(self, _default_color: Color) -> ColoredString {
        self
    }
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: String = format!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right).bright_black()
    );

    print(&line);
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

pub fn aligned_line<V>(key: &str, key_width: usize, value: V)
where
    V: Display + WithDefaultColor,
{
    let dots: String = ".".repeat((key_width + 1).saturating_sub(console::measure_text_width(key)));
    let colon: String = format!("{}{}", dots.color(colors::SEPARATOR), ":".color(colors::SEPARATOR));
    let value: ColoredString = value.with_default(colors::TEXT_DEFAULT);
    print_status(format!("{}{} {}", key.color(colors::PRIMARY), colon, value));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    let output: String = format!("{} {}", idx_str.color(colors::SEPARATOR), name.color(colors::PRIMARY));
    print(&output);
}

/// Prints `(key, lines)` pairs as one tree level. Continuation lines of a
/// multi-line value hang under the value column.
pub fn as_tree_one_level(key_value_pairs: &[(String, Vec<ColoredString>)]) {
    let key_width: usize = key_value_pairs
        .iter()
        .map(|(key, _)| console::measure_text_width(key))
        .max()
        .unwrap_or(0);

    for (i, (key, lines)) in key_value_pairs.iter().enumerate() {
        let last: bool = i + 1 == key_value_pairs.len();
        let (branch, stem): (ColoredString, ColoredString) = if !last {
            ("├─".bright_black(), "│ ".bright_black())
        } else {
            ("└─".bright_black(), "  ".bright_black())
        };
        let dots: String = ".".repeat(key_width.saturating_sub(console::measure_text_width(key)) + 1);
        let mut lines = lines.iter();
        let first: String = lines.next().map(|l| l.to_string()).unwrap_or_default();
        print(&format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            first
        ));
        let indent: String = " ".repeat(key_width + 3);
        for line in lines {
            print(&format!(" {} {}{}", stem, indent, line));
        }
    }
}

pub fn centerln(msg: &str) {
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

const NO_RESULTS: &str = r#"
         _   _  ___    __  __    _  _____ ____ _   _
        | \ | |/ _ \  |  \/  |  / \|_   _/ ___| | | |
        |  \| | | | | | |\/| | / _ \ | || |   | |_| |
        | |\  | |_| | | |  | |/ ___ \| || |___|  _  |
        |_| \_|\___/  |_|  |_/_/   \_\_| \____|_| |_|
"#;

pub fn no_results() {
    print(&format!("{}", NO_RESULTS.red().bold()));
}
