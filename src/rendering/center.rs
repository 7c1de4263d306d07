use crate::constants::MESSAGE_PREVIEW_MAX_LENGTH;
use crate::state::{NotificationCenter, NotificationQueue};
use chrono::{DateTime, Utc};
use toast_notifications_util::{NotificationId, NotificationKind, badge_text, relative_time, truncate};

/// A row in the notification center list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterEntry {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub icon: &'static str,
    pub title: String,
    pub preview: String,
    pub time: String,
}

/// Bell icon badge plus, when open, the full queue newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterView {
    pub open: bool,
    pub badge: Option<String>,
    pub entries: Vec<CenterEntry>,
}

/// Summarize the whole queue, not just the rendered toasts.
pub fn center_view(
    center: &NotificationCenter,
    queue: &NotificationQueue,
    now: DateTime<Utc>,
) -> CenterView {
    let entries = if center.is_open() {
        queue
            .iter()
            .map(|n| CenterEntry {
                id: n.id.clone(),
                kind: n.kind,
                icon: n.kind.icon_name(),
                title: n.title.clone(),
                preview: truncate(&n.message, MESSAGE_PREVIEW_MAX_LENGTH),
                time: relative_time(n.created_at, now),
            })
            .collect()
    } else {
        Vec::new()
    };

    CenterView {
        open: center.is_open(),
        badge: badge_text(queue.len()),
        entries,
    }
}
