mod center;
mod lifecycle;
mod queue;

pub use center::{NotificationCenter, SettingsEditor};
pub use lifecycle::{ExitStep, Lifecycle, Phase};
pub use queue::NotificationQueue;
