use crate::constants::INITIAL_QUEUE_CAPACITY;
use std::collections::VecDeque;
use toast_notifications_util::{Notification, NotificationId};

/// Ordered collection of active notifications, newest first.
///
/// The render cap only limits what [`visible`](Self::visible) yields. Entries beyond the
/// cap stay queued and move into view as slots free up.
#[derive(Debug)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(INITIAL_QUEUE_CAPACITY),
        }
    }

    /// Insert newest first, ordered by `created_at` with `seq` breaking ties. Returns
    /// `false` and leaves the queue untouched if the id is already present.
    pub fn insert(&mut self, notification: Notification) -> bool {
        if self.contains(&notification.id) {
            tracing::warn!("Notification {} already queued, ignoring", notification.id);
            return false;
        }
        let key = (notification.created_at, notification.seq);
        let pos = self
            .entries
            .iter()
            .position(|n| (n.created_at, n.seq) < key)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, notification);
        true
    }

    /// Remove a notification by id. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &NotificationId) -> Option<Notification> {
        let pos = self.position(id)?;
        let removed = self.entries.remove(pos);
        if self.entries.is_empty() {
            self.entries.shrink_to(INITIAL_QUEUE_CAPACITY);
        }
        removed
    }

    /// Empty the queue, returning what was in it.
    pub fn clear(&mut self) -> Vec<Notification> {
        self.entries.drain(..).collect()
    }

    /// The first `max` notifications, i.e. the ones that get rendered.
    pub fn visible(&self, max: usize) -> impl Iterator<Item = &Notification> {
        self.entries.iter().take(max)
    }

    /// Notifications queued beyond the render cap.
    pub fn backlog(&self, max: usize) -> impl Iterator<Item = &Notification> {
        self.entries.iter().skip(max)
    }

    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.entries.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NotificationId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &NotificationId) -> Option<usize> {
        self.entries.iter().position(|n| &n.id == id)
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toast_notifications_util::{NotificationInput, NotificationKind};

    fn notification(id: &str, seq: u64) -> Notification {
        Notification::from_input(
            NotificationId::from(id),
            NotificationInput::new(NotificationKind::Info, id.to_uppercase(), "body"),
            5000,
            seq,
        )
    }

    fn ids<'a>(it: impl Iterator<Item = &'a Notification>) -> Vec<&'a str> {
        it.map(|n| n.id.as_str()).collect()
    }

    fn queue_of(names: &[&str]) -> NotificationQueue {
        let mut queue = NotificationQueue::new();
        for (seq, name) in names.iter().enumerate() {
            assert!(queue.insert(notification(name, seq as u64)));
        }
        queue
    }

    #[test]
    fn test_visible_is_newest_first() {
        let queue = queue_of(&["a", "b", "c"]);
        assert_eq!(ids(queue.visible(3)), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_visible_respects_cap_without_dropping() {
        let queue = queue_of(&["a", "b", "c", "d", "e"]);

        assert_eq!(ids(queue.visible(2)), vec!["e", "d"]);
        assert_eq!(ids(queue.backlog(2)), vec!["c", "b", "a"]);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn test_backlog_moves_into_view_when_slot_frees() {
        let mut queue = queue_of(&["a", "b", "c"]);
        assert_eq!(ids(queue.backlog(2)), vec!["a"]);

        queue.remove(&NotificationId::from("c"));
        assert_eq!(ids(queue.visible(2)), vec!["b", "a"]);
        assert_eq!(queue.backlog(2).count(), 0);
    }

    #[test]
    fn test_clear_empties_regardless_of_cap() {
        let mut queue = queue_of(&["a", "b", "c", "d", "e"]);

        let drained = queue.clear();
        assert_eq!(drained.len(), 5);
        assert!(queue.is_empty());
        assert_eq!(queue.visible(2).count(), 0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut once = queue_of(&["a", "b", "c"]);
        let mut twice = queue_of(&["a", "b", "c"]);
        let id = NotificationId::from("b");

        assert!(once.remove(&id).is_some());
        assert!(twice.remove(&id).is_some());
        assert!(twice.remove(&id).is_none());

        assert_eq!(ids(once.iter()), ids(twice.iter()));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut queue = queue_of(&["a"]);
        assert!(queue.remove(&NotificationId::from("zzz")).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut queue = queue_of(&["a", "b"]);

        assert!(!queue.insert(notification("a", 9)));
        assert_eq!(ids(queue.iter()), vec!["b", "a"]);
        assert_eq!(queue.get(&NotificationId::from("a")).map(|n| n.seq), Some(0));
    }

    #[test]
    fn test_visible_does_not_mutate() {
        let queue = queue_of(&["a", "b", "c"]);
        let _ = queue.visible(1).count();
        assert_eq!(queue.len(), 3);
        assert_eq!(ids(queue.visible(1)), vec!["c"]);
    }

    #[test]
    fn test_same_timestamp_orders_by_sequence() {
        let mut first = notification("first", 0);
        let mut second = notification("second", 1);
        let mut third = notification("third", 2);
        second.created_at = first.created_at;
        third.created_at = first.created_at;

        // Arrival order differs from enqueue order
        let mut queue = NotificationQueue::new();
        assert!(queue.insert(second));
        assert!(queue.insert(third.clone()));
        assert!(queue.insert(first.clone()));
        assert_eq!(ids(queue.iter()), vec!["third", "second", "first"]);

        first.id = NotificationId::from("later");
        first.seq = 3;
        first.created_at = third.created_at + chrono::Duration::milliseconds(1);
        assert!(queue.insert(first));
        assert_eq!(ids(queue.visible(1)), vec!["later"]);
    }
}
