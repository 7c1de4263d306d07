use crate::constants::TITLE_MAX_LENGTH;
use crate::state::{NotificationQueue, Phase};
use toast_notifications_config::{NotificationSettings, Position};
use toast_notifications_util::{Color, Notification, NotificationId, NotificationKind, truncate};

/// One toast card as drawn in the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastView {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub icon: &'static str,
    pub color: Color,
    pub title: String,
    pub message: String,
    pub phase: Phase,
    pub action_label: Option<String>,
}

impl ToastView {
    fn new(n: &Notification, phase: Phase) -> Self {
        ToastView {
            id: n.id.clone(),
            kind: n.kind,
            icon: n.kind.icon_name(),
            color: n.kind.color(),
            title: truncate(&n.title, TITLE_MAX_LENGTH),
            message: n.message.clone(),
            phase,
            action_label: n.action.as_ref().map(|a| a.label.clone()),
        }
    }
}

/// The fixed-position overlay layer. Nothing else renders into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub position: Position,
    /// Top-to-bottom drawing order
    pub toasts: Vec<ToastView>,
}

impl Overlay {
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Build the overlay from the first `max_visible` queue entries.
///
/// Top anchored stacks draw the newest toast first. Bottom anchored stacks are reversed so
/// the newest toast sits nearest the screen edge.
pub fn overlay(
    queue: &NotificationQueue,
    settings: &NotificationSettings,
    phase_of: impl Fn(&NotificationId) -> Phase,
) -> Overlay {
    let mut toasts: Vec<ToastView> = queue
        .visible(settings.max_visible())
        .map(|n| ToastView::new(n, phase_of(&n.id)))
        .collect();

    if settings.position.is_bottom() {
        toasts.reverse();
    }

    Overlay {
        position: settings.position,
        toasts,
    }
}
