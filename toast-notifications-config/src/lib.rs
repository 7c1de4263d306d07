pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::SettingsStore;

pub const ID: &str = "toast-notifications";

/// Key under which the serialized settings object is stored.
pub const SETTINGS_KEY: &str = "toast-notifications.settings";

/// Lower bound applied to `max_visible` when loading or saving.
pub const MIN_VISIBLE: u32 = 1;

/// Where the toast stack is anchored on screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
    TopCenter,
    BottomCenter,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopRight,
        Position::TopLeft,
        Position::BottomRight,
        Position::BottomLeft,
        Position::TopCenter,
        Position::BottomCenter,
    ];

    /// Bottom anchored stacks grow upwards, so the newest toast is drawn last.
    pub fn is_bottom(self) -> bool {
        matches!(
            self,
            Position::BottomRight | Position::BottomLeft | Position::BottomCenter
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopRight => "top-right",
            Position::TopLeft => "top-left",
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
            Position::TopCenter => "top-center",
            Position::BottomCenter => "bottom-center",
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    #[serde(default)]
    pub position: Position,
    /// The maximum number of toasts rendered at once. Extra notifications stay queued.
    #[serde(default = "default_max_visible")]
    pub max_visible: u32,
    /// Auto-dismiss time in milliseconds for notifications that don't carry their own.
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,
    #[serde(default)]
    pub sound_enabled: bool,
    /// Whether toasts animate in and out (default: true)
    #[serde(default = "default_true")]
    pub animation_enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            position: Position::default(),
            max_visible: default_max_visible(),
            default_duration_ms: default_duration_ms(),
            sound_enabled: false,
            animation_enabled: default_true(),
        }
    }
}

impl NotificationSettings {
    /// Clamp out-of-range values instead of rejecting them.
    pub fn sanitized(mut self) -> Self {
        if self.max_visible < MIN_VISIBLE {
            tracing::warn!(
                "max_visible {} is below {}, clamping",
                self.max_visible,
                MIN_VISIBLE
            );
            self.max_visible = MIN_VISIBLE;
        }
        self
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible.max(MIN_VISIBLE) as usize
    }
}

// Default value helpers for serde
const fn default_true() -> bool {
    true
}

const fn default_max_visible() -> u32 {
    5
}

const fn default_duration_ms() -> u64 {
    5000
}
