use crate::{NotificationSettings, SETTINGS_KEY, Storage};
use tracing::{debug, error, warn};

/// Loads and persists [`NotificationSettings`] under [`SETTINGS_KEY`].
///
/// Neither operation can fail from the caller's point of view. Storage problems are
/// logged and the settings degrade to defaults or to session-only values.
pub struct SettingsStore {
    storage: Box<dyn Storage>,
}

impl SettingsStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    pub fn load(&self) -> NotificationSettings {
        let raw = match self.storage.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored notification settings, using defaults");
                return NotificationSettings::default();
            }
            Err(err) => {
                error!("Failed to read notification settings: {}", err);
                return NotificationSettings::default();
            }
        };

        match serde_json::from_str::<NotificationSettings>(&raw) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!("Stored notification settings are corrupt, using defaults: {}", err);
                NotificationSettings::default()
            }
        }
    }

    /// Replace the stored settings with `settings`. The whole object is written.
    pub fn save(&self, settings: &NotificationSettings) {
        let settings = settings.clone().sanitized();
        let raw = match serde_json::to_string(&settings) {
            Ok(raw) => raw,
            Err(err) => {
                error!("Failed to serialize notification settings: {}", err);
                return;
            }
        };

        if let Err(err) = self.storage.set(SETTINGS_KEY, &raw) {
            error!("Failed to persist notification settings: {}", err);
        }
    }
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore").finish_non_exhaustive()
    }
}
