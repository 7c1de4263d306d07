#[cfg(feature = "audio")]
pub mod audio;
#[cfg(feature = "audio")]
pub use audio::{AudioError, play_sound_file, play_sound_name};

pub mod action;
pub mod display;
pub mod kind;
pub mod sound;

pub use action::{ActionPanicked, NotificationAction};
pub use display::{BADGE_MAX_COUNT, badge_text, relative_time, truncate};
pub use kind::{Color, NotificationKind, kind_colors};
pub use sound::{SilentSound, SoundHook, default_sound};
#[cfg(feature = "audio")]
pub use sound::XdgSound;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};

/// Opaque notification identifier: creation time in unix milliseconds plus a random suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let random = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{millis}-{}", &random[..12]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Per-notification overrides accepted by the `notify` entry points.
#[derive(Debug, Clone, Default)]
pub struct NotifyOptions {
    pub duration_ms: Option<u64>,
    pub persistent: bool,
    pub action: Option<NotificationAction>,
}

impl NotifyOptions {
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    pub fn action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Everything a caller supplies when enqueuing a notification.
#[derive(Debug, Clone)]
pub struct NotificationInput {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub options: NotifyOptions,
}

impl NotificationInput {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            options: NotifyOptions::default(),
        }
    }

    pub fn with_options(mut self, options: NotifyOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Resolved auto-dismiss time; `0` never expires
    pub duration_ms: u64,
    pub persistent: bool,
    pub action: Option<NotificationAction>,
    pub created_at: DateTime<Utc>,
    /// Insertion sequence, breaks ties between equal `created_at` values
    pub seq: u64,
}

impl Notification {
    /// Build the full record, falling back to `default_duration_ms` when the input has
    /// no duration of its own.
    pub fn from_input(
        id: NotificationId,
        input: NotificationInput,
        default_duration_ms: u64,
        seq: u64,
    ) -> Self {
        let NotificationInput {
            kind,
            title,
            message,
            options,
        } = input;

        Notification {
            id,
            kind,
            title,
            message,
            duration_ms: options.duration_ms.unwrap_or(default_duration_ms),
            persistent: options.persistent,
            action: options.action,
            created_at: Utc::now(),
            seq,
        }
    }

    /// Time until the notification dismisses itself, `None` if it never does.
    pub fn auto_dismiss_after(&self) -> Option<Duration> {
        if self.persistent || self.duration_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.duration_ms))
        }
    }
}

/// Why a notification left the queue.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloseReason {
    Expired = 1,
    Dismissed = 2,
    ActionInvoked = 3,
    Cleared = 4,
    Replaced = 5,
}
