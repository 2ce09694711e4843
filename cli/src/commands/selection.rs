use cardcompare_common::card::CardRecord;
use cardcompare_common::notice;
use cardcompare_core::affordances::{ClickEvent, ComparePill, CompareToggle};
use cardcompare_core::store::{SelectionStore, ToggleOutcome};
use tracing::debug;

use crate::app::App;
use crate::commands::compare;
use crate::terminal::{format, print};

pub async fn toggle(app: &mut App, identity: &str) -> anyhow::Result<()> {
    let record: CardRecord = app.find_card(identity).await?;
    let control: CompareToggle = CompareToggle::new(record);
    let mut pill: ComparePill = ComparePill::new(&app.store);

    let mut event: ClickEvent = ClickEvent::new();
    let outcome: ToggleOutcome = control.on_click(&mut event, &mut app.store);
    debug!("toggle {identity}: {outcome:?}, reaches card: {}", event.reaches_parent());

    format::toggle(&control.view(&app.store), control.record().name());
    format::pill(pill.view().as_ref());

    if pill.poll_signals() {
        compare::show(app, None, &[]).await?;
        pill.close();
    }
    Ok(())
}

pub async fn remove(app: &mut App, identity: &str) -> anyhow::Result<()> {
    let key: String = resolve_identity(app, identity).await;
    if app.store.remove(&key) {
        notice!("{key} removed from comparison");
    } else {
        notice!("{key} was not selected");
    }
    format::pill(ComparePill::new(&app.store).view().as_ref());
    Ok(())
}

pub fn clear(app: &mut App) {
    let mut pill: ComparePill = ComparePill::new(&app.store);
    pill.clear_all(&mut app.store);
}

pub fn status(app: &App) {
    let pill: ComparePill = ComparePill::new(&app.store);
    print::header("selection", app.cfg.quiet);
    format::pill(pill.view().as_ref());

    let key_width: usize = app.store.selected().iter().map(|c| c.identity().len()).max().unwrap_or(0);
    for card in app.store.selected() {
        print::aligned_line(&card.identity(), key_width, card.name());
    }
}

/// Selected cards are matched by identity first, so a card that has left the
/// catalog can still be removed.
async fn resolve_identity(app: &App, identity: &str) -> String {
    let identity: &str = identity.trim();
    if let Some(card) = app
        .store
        .selected()
        .iter()
        .find(|card| card.identity() == identity || card.alias() == Some(identity))
    {
        return SelectionStore::identity_of(card);
    }
    match app.find_card(identity).await {
        Ok(card) => card.identity(),
        Err(_) => identity.to_string(),
    }
}
