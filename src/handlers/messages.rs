use crate::rendering::Snapshot;
use toast_notifications_config::NotificationSettings;
use toast_notifications_util::{CloseReason, NotificationId, NotificationInput};
use tokio::sync::oneshot;

/// Controller message types
#[derive(Debug)]
pub enum Message {
    /// Enqueue a new notification under a caller generated id
    Notify {
        id: NotificationId,
        input: NotificationInput,
    },
    /// Swap `old` for a new notification in one step
    Replace {
        old: NotificationId,
        id: NotificationId,
        input: NotificationInput,
    },
    /// Notification closed by the user or by calling code
    Dismiss(NotificationId),
    /// The notification's action button was pressed
    InvokeAction(NotificationId),
    /// Auto-dismiss timer fired for the given mount generation
    Timeout(NotificationId, u64),
    /// Enter animation finished for the given mount generation
    Entered(NotificationId, u64),
    /// Exit animation finished
    ExitFinished(NotificationId),
    ClearAll,
    /// Persist and apply new display preferences
    UpdateSettings(NotificationSettings),
    /// Open or close the notification center panel
    ToggleCenter,
    Snapshot(oneshot::Sender<Snapshot>),
    Settings(oneshot::Sender<NotificationSettings>),
    /// Stop the service loop
    Shutdown,
}

/// Lifecycle events published to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The notification was mounted in the overlay
    Shown(NotificationId),
    /// The notification left the queue
    Closed {
        id: NotificationId,
        reason: CloseReason,
    },
}
