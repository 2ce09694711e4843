pub mod compare;
pub mod search;
pub mod selection;

use std::path::PathBuf;

use cardcompare_common::config::MIN_COMPARE;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cardcompare")]
#[command(about = "Pick credit cards and compare them side by side.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Card catalog exported as JSON
    #[arg(long, global = true, env = "CARDCOMPARE_CATALOG", default_value = "cards.json")]
    pub catalog: PathBuf,

    /// Where the selection is kept between runs
    #[arg(long, global = true, env = "CARDCOMPARE_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// How many cards can be compared at once (2 to 4)
    #[arg(long, global = true, env = "CARDCOMPARE_MAX", default_value_t = MIN_COMPARE)]
    pub max_compare: usize,

    /// Less output, repeat for even less
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Run notification actions such as "Compare now" instead of hinting at them
    #[arg(long, global = true)]
    pub follow_actions: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a card to the comparison, or take it out if it is already there
    #[command(alias = "t")]
    Toggle { card: String },
    /// Take a card out of the comparison
    #[command(alias = "rm")]
    Remove { card: String },
    /// Empty the comparison
    Clear,
    /// Show what is selected
    #[command(alias = "st")]
    Status,
    /// Show the selected cards side by side
    #[command(alias = "c")]
    Compare {
        /// Show a clamped row in full (row path, repeatable)
        #[arg(long)]
        expand: Vec<String>,
        /// Seed the first column with this card without selecting it
        #[arg(long = "with")]
        with: Option<String>,
    },
    /// Show every attribute of one card
    #[command(alias = "d")]
    Detail {
        card: String,
        #[arg(long)]
        expand: Vec<String>,
    },
    /// Search the catalog for an open comparison slot
    #[command(alias = "s")]
    Search {
        /// Slot to search in, counted from 0
        #[arg(long, default_value_t = 0)]
        slot: usize,
        query: String,
        /// Put the n-th result (from 1) into the slot
        #[arg(long)]
        pick: Option<usize>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
