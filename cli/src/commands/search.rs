use cardcompare_common::card::CardRecord;
use cardcompare_common::error::CompareError;
use cardcompare_core::affordances::ComparePill;
use cardcompare_core::session::ComparisonSession;
use cardcompare_core::store::ToggleOutcome;
use tracing::debug;

use crate::app::App;
use crate::terminal::{format, print, spinner};

pub async fn search(app: &mut App, slot: usize, query: &str, pick: Option<usize>) -> anyhow::Result<()> {
    let mut session: ComparisonSession = app.session();
    let cards: usize =
        spinner::with_spinner("Loading catalog", app.cfg.quiet, session.search().prefetch()).await;
    debug!("{cards} card(s) in catalog, {} search slot(s)", session.search().slot_count());

    session.search_mut().set_query(slot, query)?;

    let results: Vec<CardRecord> =
        spinner::with_spinner("Searching", app.cfg.quiet, settle(&session, slot, app)).await?;

    if results.is_empty() {
        print::header("no matching cards", app.cfg.quiet);
        print::no_results();
        session.close();
        return Ok(());
    }

    print::header(&format!("slot {slot}: {query}"), app.cfg.quiet);
    for (idx, card) in results.iter().enumerate() {
        let selected: bool = app.store.is_selected(&card.identity());
        let marker: &str = if selected { " (selected)" } else { "" };
        print::tree_head(idx + 1, &format!("{}{}", card.name(), marker));
    }

    if let Some(n) = pick {
        let record: &CardRecord = n
            .checked_sub(1)
            .and_then(|idx| results.get(idx))
            .ok_or_else(|| CompareError::UnknownCard(format!("result #{n}")))?;
        let outcome: ToggleOutcome = session.pick(slot, record, &mut app.store)?;
        debug!("picked {} into slot {slot}: {outcome:?}", record.identity());
        format::pill(ComparePill::new(&app.store).view().as_ref());
    }

    session.close();
    Ok(())
}

/// Waits for the slot's debounce timer to fire and returns what it settled on.
async fn settle(session: &ComparisonSession, slot: usize, app: &App) -> anyhow::Result<Vec<CardRecord>> {
    tokio::time::sleep(app.cfg.debounce).await;
    while session.search().is_pending(slot)? {
        tokio::time::sleep(app.cfg.debounce / 10).await;
    }
    Ok(session.search().results(slot)?)
}
