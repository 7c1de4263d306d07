use toast_notifications_config::{NotificationSettings, Position};

/// Open/closed state of the notification center panel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NotificationCenter {
    open: bool,
}

impl NotificationCenter {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}

/// Draft of the display preferences edited from the center.
///
/// Nothing is applied until [`commit`](Self::commit) hands a complete settings object back
/// to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsEditor {
    draft: NotificationSettings,
}

impl SettingsEditor {
    pub fn new(current: NotificationSettings) -> Self {
        Self { draft: current }
    }

    pub fn position(mut self, position: Position) -> Self {
        self.draft.position = position;
        self
    }

    pub fn max_visible(mut self, max_visible: u32) -> Self {
        self.draft.max_visible = max_visible;
        self
    }

    pub fn default_duration_ms(mut self, duration_ms: u64) -> Self {
        self.draft.default_duration_ms = duration_ms;
        self
    }

    pub fn sound_enabled(mut self, enabled: bool) -> Self {
        self.draft.sound_enabled = enabled;
        self
    }

    pub fn animation_enabled(mut self, enabled: bool) -> Self {
        self.draft.animation_enabled = enabled;
        self
    }

    pub fn draft(&self) -> &NotificationSettings {
        &self.draft
    }

    pub fn commit(self) -> NotificationSettings {
        self.draft.sanitized()
    }
}
