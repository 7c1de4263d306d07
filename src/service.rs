use crate::constants::EVENT_BUFFER_SIZE;
use crate::controller::NotificationController;
use crate::handlers::Message;
use crate::notifier::Notifier;
use toast_notifications_config::SettingsStore;
use toast_notifications_util::{SoundHook, default_sound};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Start the notification service with the build's default sound backend.
///
/// Must be called from within a tokio runtime.
pub fn spawn(store: SettingsStore) -> (Notifier, JoinHandle<()>) {
    spawn_with_sound(store, default_sound())
}

/// Start the notification service.
///
/// The returned task ends on [`Notifier::shutdown`] or once every [`Notifier`] clone has
/// been dropped.
pub fn spawn_with_sound(
    store: SettingsStore,
    sound: Box<dyn SoundHook>,
) -> (Notifier, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);

    let controller = NotificationController::new(store, sound, tx.downgrade(), events.clone());
    let handle = tokio::spawn(run(controller, rx));

    (Notifier::new(tx, events), handle)
}

async fn run(mut controller: NotificationController, mut rx: mpsc::UnboundedReceiver<Message>) {
    while let Some(message) = rx.recv().await {
        if matches!(message, Message::Shutdown) {
            tracing::info!("notification service shutting down");
            break;
        }
        controller.update(message);
    }
    tracing::debug!(
        "notification service stopped with {} queued",
        controller.queue().len()
    );
}
