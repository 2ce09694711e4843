use cardcompare_common::card::CardRecord;
use cardcompare_core::render::{ComparisonView, DetailView, ExpandedRowSet};
use cardcompare_core::session::ComparisonSession;

use crate::app::App;
use crate::terminal::{format, print};

/// Opens a session, renders it once and closes it again.
pub async fn show(app: &App, with: Option<&str>, expand: &[String]) -> anyhow::Result<()> {
    let mut session: ComparisonSession = app.session();
    if let Some(identity) = with {
        session = session.with_pre_selected(app.find_card(identity).await?);
    }
    for key in expand {
        session.toggle_row(key);
    }

    let view: ComparisonView = session.view(&app.store);
    print::header("comparison", app.cfg.quiet);
    format::comparison(&view, app.cfg.quiet);
    print::fat_separator();

    session.close();
    Ok(())
}

pub async fn detail(app: &App, identity: &str, expand: &[String]) -> anyhow::Result<()> {
    let record: CardRecord = app.find_card(identity).await?;
    let mut expanded: ExpandedRowSet = ExpandedRowSet::new();
    for key in expand {
        expanded.toggle(key);
    }

    let view: DetailView = app.renderer.render_detail(&record, &expanded);
    format::detail(&view, app.cfg.quiet);
    Ok(())
}
