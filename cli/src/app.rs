//! Wires the adapters into the core services for one invocation.

use std::path::PathBuf;
use std::sync::Arc;

use cardcompare_common::card::CardRecord;
use cardcompare_common::config::Config;
use cardcompare_core::render::ComparisonRenderer;
use cardcompare_core::sanitize::AllowListSanitizer;
use cardcompare_core::session::ComparisonSession;
use cardcompare_core::signal::SignalBus;
use cardcompare_core::store::SelectionStore;
use tracing::debug;

use crate::adapters::catalog::JsonCatalog;
use crate::adapters::notifier::TerminalNotifier;
use crate::adapters::storage::FileStorage;
use crate::commands::CommandLine;
use crate::terminal::spinner;

pub struct App {
    pub cfg: Config,
    pub store: SelectionStore,
    pub catalog: Arc<JsonCatalog>,
    pub renderer: ComparisonRenderer,
}

impl App {
    pub fn build(args: &CommandLine) -> anyhow::Result<Self> {
        let cfg: Config = Config {
            quiet: args.quiet,
            ..Config::default()
        }
        .with_max_compare(args.max_compare);

        let state_dir: PathBuf = match &args.state_dir {
            Some(dir) => dir.clone(),
            None => FileStorage::default_dir()?,
        };
        debug!("state in {}, catalog at {}", state_dir.display(), args.catalog.display());

        let store: SelectionStore = SelectionStore::new(
            &cfg,
            Box::new(FileStorage::new(state_dir)),
            Box::new(TerminalNotifier::new(args.follow_actions)),
            SignalBus::new(),
        );

        Ok(Self {
            renderer: ComparisonRenderer::new(&cfg, Arc::new(AllowListSanitizer)),
            catalog: Arc::new(JsonCatalog::new(&args.catalog)),
            store,
            cfg,
        })
    }

    pub async fn find_card(&self, identity: &str) -> anyhow::Result<CardRecord> {
        spinner::with_spinner("Looking up card", self.cfg.quiet, self.catalog.find(identity)).await
    }

    pub fn session(&self) -> ComparisonSession {
        ComparisonSession::open(&self.cfg, self.catalog.clone(), self.renderer.clone())
    }
}
