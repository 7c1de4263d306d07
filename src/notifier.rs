use crate::handlers::{Event, Message};
use crate::rendering::Snapshot;
use toast_notifications_config::NotificationSettings;
use toast_notifications_util::{NotificationId, NotificationInput, NotificationKind, NotifyOptions};
use tokio::sync::{broadcast, mpsc::UnboundedSender, oneshot};

/// Handle application code uses to raise and manage notifications.
///
/// Every call returns immediately. If the service has stopped, the call is logged and
/// dropped; nothing here ever fails towards the caller.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: UnboundedSender<Message>,
    events: broadcast::Sender<Event>,
}

impl Notifier {
    pub(crate) fn new(tx: UnboundedSender<Message>, events: broadcast::Sender<Event>) -> Self {
        Self { tx, events }
    }

    pub fn success(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        options: NotifyOptions,
    ) -> NotificationId {
        self.kind(NotificationKind::Success, title, message, options)
    }

    pub fn error(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        options: NotifyOptions,
    ) -> NotificationId {
        self.kind(NotificationKind::Error, title, message, options)
    }

    pub fn warning(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        options: NotifyOptions,
    ) -> NotificationId {
        self.kind(NotificationKind::Warning, title, message, options)
    }

    pub fn info(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        options: NotifyOptions,
    ) -> NotificationId {
        self.kind(NotificationKind::Info, title, message, options)
    }

    pub fn notify(&self, input: NotificationInput) -> NotificationId {
        let id = NotificationId::generate();
        self.send(Message::Notify {
            id: id.clone(),
            input,
        });
        id
    }

    /// Swap `old` for a new notification, e.g. "Saving…" for "Saved".
    pub fn replace(&self, old: &NotificationId, input: NotificationInput) -> NotificationId {
        let id = NotificationId::generate();
        self.send(Message::Replace {
            old: old.clone(),
            id: id.clone(),
            input,
        });
        id
    }

    /// Dismiss a notification. Dismissing twice, or after it expired, is harmless.
    pub fn dismiss(&self, id: &NotificationId) {
        self.send(Message::Dismiss(id.clone()));
    }

    /// Run the notification's action and dismiss it.
    pub fn invoke_action(&self, id: &NotificationId) {
        self.send(Message::InvokeAction(id.clone()));
    }

    pub fn clear_all(&self) {
        self.send(Message::ClearAll);
    }

    pub fn toggle_center(&self) {
        self.send(Message::ToggleCenter);
    }

    pub fn update_settings(&self, settings: NotificationSettings) {
        self.send(Message::UpdateSettings(settings));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Current overlay and center, `None` once the service has stopped.
    pub async fn snapshot(&self) -> Option<Snapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Message::Snapshot(tx));
        rx.await.ok()
    }

    pub async fn settings(&self) -> Option<NotificationSettings> {
        let (tx, rx) = oneshot::channel();
        self.send(Message::Settings(tx));
        rx.await.ok()
    }

    /// Stop the service loop. Pending notifications are dropped with it.
    pub fn shutdown(&self) {
        self.send(Message::Shutdown);
    }

    fn kind(
        &self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        options: NotifyOptions,
    ) -> NotificationId {
        self.notify(NotificationInput::new(kind, title, message).with_options(options))
    }

    fn send(&self, message: Message) {
        if let Err(err) = self.tx.send(message) {
            tracing::warn!("notification service stopped, dropping {:?}", err.0);
        }
    }
}
