//! Text helpers shared by the toast overlay and the notification center.

use chrono::{DateTime, Utc};

/// Counts above this are shown as `"99+"` on the center badge.
pub const BADGE_MAX_COUNT: usize = 99;

/// Badge text for `count` queued notifications, `None` when there is nothing to show.
pub fn badge_text(count: usize) -> Option<String> {
    match count {
        0 => None,
        n if n > BADGE_MAX_COUNT => Some(format!("{BADGE_MAX_COUNT}+")),
        n => Some(n.to_string()),
    }
}

/// Cut `text` to its first line and at most `max_chars` characters, appending `…` when
/// anything was dropped.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let cut_line = first_line.len() < text.trim_end().len();

    if first_line.chars().count() <= max_chars {
        return if cut_line {
            format!("{first_line}…")
        } else {
            first_line.to_string()
        };
    }

    let kept: String = first_line.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Short relative age: `now`, `5m`, `2h`, `3d`.
pub fn relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - created_at).num_seconds().max(0);
    if secs < 60 {
        "now".to_string()
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}
