use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// A single user-triggerable action attached to a notification.
///
/// Invoking the action also dismisses the notification. That part is handled by the
/// controller; this type only runs the callback.
#[derive(Clone)]
pub struct NotificationAction {
    /// User-visible label for the action button
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

    /// Run the callback. A panic inside it is caught and reported as [`ActionPanicked`].
    pub fn invoke(&self) -> Result<(), ActionPanicked> {
        catch_unwind(AssertUnwindSafe(|| (self.on_invoke)())).map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            ActionPanicked {
                label: self.label.clone(),
                message,
            }
        })
    }
}

impl std::fmt::Debug for NotificationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// The action callback panicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPanicked {
    pub label: String,
    pub message: String,
}

impl std::fmt::Display for ActionPanicked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Action '{}' panicked: {}", self.label, self.message)
    }
}

impl std::error::Error for ActionPanicked {}
