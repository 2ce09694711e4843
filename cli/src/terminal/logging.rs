use cardcompare_common::print::{NOTICE_TARGET, SUCCESS_TARGET};
use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use crate::terminal::print::PRINT_TARGET;

pub struct CompareFormatter;

impl<S, N> FormatEvent<S, N> for CompareFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match meta.target() {
            SUCCESS_TARGET => ("[+]", |s| s.green().bold()),
            NOTICE_TARGET => ("[i]", |s| s.cyan().bold()),
            _ => match *meta.level() {
                Level::TRACE => ("[ ]", |s| s.dimmed()),
                Level::DEBUG => ("[?]", |s| s.blue()),
                Level::INFO => ("[+]", |s| s.green().bold()),
                Level::WARN => ("[*]", |s| s.yellow().bold()),
                Level::ERROR => ("[-]", |s| s.red().bold()),
            },
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Pulls the `raw_msg` field out of a print event.
#[derive(Default)]
struct RawMessage(String);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "raw_msg" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the quiet level.
pub fn init_logging(quiet: u8) {
    let level: &str = match quiet {
        0 => "info",
        1 => "warn",
        _ => "error",
    };
    let filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},{PRINT_TARGET}=info")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(CompareFormatter)
        .init();
}
