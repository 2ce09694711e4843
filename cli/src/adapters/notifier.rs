use cardcompare_common::notify::{Notification, NotificationKind, Notifier};
use cardcompare_common::{notice, success};
use tracing::error;

/// Shows notifications as log lines.
///
/// A terminal has no buttons, so an attached action is either run right away
/// (`follow_actions`) or turned into a hint.
pub struct TerminalNotifier {
    follow_actions: bool,
}

impl TerminalNotifier {
    pub fn new(follow_actions: bool) -> Self {
        Self { follow_actions }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => success!("{}", notification.message),
            NotificationKind::Error => error!("{}", notification.message),
            NotificationKind::Info => notice!("{}", notification.message),
        }

        let Some(action) = notification.action else {
            return;
        };
        if self.follow_actions {
            notice!("{}...", action.label);
            action.invoke();
        } else {
            notice!(
                "{}: run `cardcompare compare`, or pass --follow-actions",
                action.label
            );
        }
    }
}
