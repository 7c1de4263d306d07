//! Toast notifications with timed auto-dismiss, a render cap and a notification center.
//!
//! Start the service with [`service::spawn`] and hand the returned [`Notifier`] to
//! application code:
//!
//! ```no_run
//! use toast_notifications::{service, NotifyOptions};
//! use toast_notifications_config::{FileStorage, MemoryStorage, SettingsStore};
//!
//! # async fn demo() {
//! let store = match FileStorage::from_env() {
//!     Ok(storage) => SettingsStore::new(storage),
//!     Err(_) => SettingsStore::new(MemoryStorage::new()),
//! };
//! let (notify, _service) = service::spawn(store);
//! let id = notify.info("Saving", "Uploading your draft…", NotifyOptions::default().persistent());
//! notify.replace(&id, toast_notifications::NotificationInput::new(
//!     toast_notifications::NotificationKind::Success,
//!     "Saved",
//!     "Your changes were saved.",
//! ));
//! # }
//! ```

mod constants;
pub mod controller;
pub mod handlers;
pub mod notifier;
pub mod rendering;
pub mod service;
pub mod state;
mod timer;

pub use controller::NotificationController;
pub use handlers::{Event, Message};
pub use notifier::Notifier;
pub use rendering::{CenterEntry, CenterView, Overlay, Snapshot, ToastView};
pub use state::{NotificationCenter, Phase, SettingsEditor};

pub use toast_notifications_config::{NotificationSettings, Position};
pub use toast_notifications_util::{
    CloseReason, Notification, NotificationAction, NotificationId, NotificationInput,
    NotificationKind, NotifyOptions,
};
