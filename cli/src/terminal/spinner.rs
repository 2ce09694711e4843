use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_strings(TICKS));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Runs `work` behind a spinner. Quiet mode runs it without one.
pub async fn with_spinner<F, T>(message: &str, quiet: u8, work: F) -> T
where
    F: Future<Output = T>,
{
    if quiet > 0 {
        return work.await;
    }
    let pb: ProgressBar = spinner(message);
    let out: T = work.await;
    pb.finish_and_clear();
    out
}
