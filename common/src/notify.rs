use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A one-click action attached to a notification.
#[derive(Clone)]
pub struct NotificationAction {
    pub label: String,
    on_invoke: Arc<dyn Fn() + Send + Sync>,
}

impl NotificationAction {
    pub fn new(label: impl Into<String>, on_invoke: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            on_invoke: Arc::new(on_invoke),
        }
    }

    /// Runs the action, as if the user clicked its button.
    pub fn invoke(&self) {
        (self.on_invoke)();
    }
}

impl fmt::Debug for NotificationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub action: Option<NotificationAction>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Fire-and-forget user notifications (toasts).
pub trait Notifier {
    fn notify(&self, notification: Notification);
}
