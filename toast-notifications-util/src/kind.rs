use serde::{Deserialize, Serialize};

/// RGBA color (values 0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Accent colors per notification kind
pub mod kind_colors {
    use super::Color;

    pub const SUCCESS: Color = Color::rgb(0.2, 0.75, 0.4);

    pub const ERROR: Color = Color::rgb(1.0, 0.3, 0.3);

    pub const WARNING: Color = Color::rgb(1.0, 0.7, 0.1);

    pub const INFO: Color = Color::rgb(0.2, 0.6, 1.0);
}

/// What a notification reports. Only affects icon and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::Success,
        NotificationKind::Error,
        NotificationKind::Warning,
        NotificationKind::Info,
    ];

    /// Symbolic icon name from the freedesktop icon naming spec
    pub fn icon_name(self) -> &'static str {
        match self {
            NotificationKind::Success => "emblem-ok-symbolic",
            NotificationKind::Error => "dialog-error-symbolic",
            NotificationKind::Warning => "dialog-warning-symbolic",
            NotificationKind::Info => "dialog-information-symbolic",
        }
    }

    pub fn color(self) -> Color {
        match self {
            NotificationKind::Success => kind_colors::SUCCESS,
            NotificationKind::Error => kind_colors::ERROR,
            NotificationKind::Warning => kind_colors::WARNING,
            NotificationKind::Info => kind_colors::INFO,
        }
    }

    /// Sound theme entry played for this kind when sound is enabled
    pub fn sound_name(self) -> &'static str {
        match self {
            NotificationKind::Success => "complete",
            NotificationKind::Error => "dialog-error",
            NotificationKind::Warning => "dialog-warning",
            NotificationKind::Info => "dialog-information",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(NotificationKind::Success),
            "error" => Ok(NotificationKind::Error),
            "warning" => Ok(NotificationKind::Warning),
            "info" => Ok(NotificationKind::Info),
            other => Err(format!("unknown notification kind: {other}")),
        }
    }
}
