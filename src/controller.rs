// The single owner of notification state.
//
// Every mutation arrives as a `Message` and is applied in `update`. Timers never touch
// state directly; they post `Timeout`, `Entered` and `ExitFinished` messages back onto
// the same channel, tagged so that a message from a cancelled or earlier mount is ignored.

use crate::handlers::{Event, Message};
use crate::rendering::{self, Snapshot};
use crate::state::{ExitStep, Lifecycle, NotificationCenter, NotificationQueue, Phase};
use std::collections::HashMap;
use toast_notifications_config::{NotificationSettings, SettingsStore};
use toast_notifications_util::{
    CloseReason, Notification, NotificationId, NotificationInput, SoundHook,
};
use tokio::sync::{broadcast, mpsc::WeakUnboundedSender};

pub struct NotificationController {
    queue: NotificationQueue,
    lifecycles: HashMap<NotificationId, Lifecycle>,
    settings: NotificationSettings,
    store: SettingsStore,
    center: NotificationCenter,
    sound: Box<dyn SoundHook>,
    tx: WeakUnboundedSender<Message>,
    events: broadcast::Sender<Event>,
    next_seq: u64,
}

impl NotificationController {
    /// Build a controller with settings loaded from `store`.
    pub fn new(
        store: SettingsStore,
        sound: Box<dyn SoundHook>,
        tx: WeakUnboundedSender<Message>,
        events: broadcast::Sender<Event>,
    ) -> Self {
        let settings = store.load();
        tracing::info!(
            "notification controller ready: position={} max_visible={} duration={}ms",
            settings.position.as_str(),
            settings.max_visible,
            settings.default_duration_ms
        );

        Self {
            queue: NotificationQueue::new(),
            lifecycles: HashMap::new(),
            settings,
            store,
            center: NotificationCenter::default(),
            sound,
            tx,
            events,
            next_seq: 0,
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Notify { id, input } => {
                if self.enqueue(id, input) {
                    self.sync_mounts();
                }
            }
            Message::Replace { old, id, input } => {
                // One sync for both halves so the backlog never sees the gap
                self.detach(&old, CloseReason::Replaced);
                self.enqueue(id, input);
                self.sync_mounts();
            }
            Message::Dismiss(id) => self.dismiss(&id, CloseReason::Dismissed),
            Message::InvokeAction(id) => self.invoke_action(&id),
            Message::Timeout(id, generation) => {
                let current = self
                    .lifecycles
                    .get(&id)
                    .is_some_and(|lc| lc.is_current_timeout(generation));
                if current {
                    self.dismiss(&id, CloseReason::Expired);
                } else {
                    tracing::trace!("stale timeout for {id}");
                }
            }
            Message::Entered(id, generation) => {
                if let Some(lc) = self.lifecycles.get_mut(&id) {
                    lc.entered(generation);
                }
            }
            Message::ExitFinished(id) => {
                let reason = self
                    .lifecycles
                    .get(&id)
                    .filter(|lc| lc.phase() == Phase::Exiting)
                    .and_then(Lifecycle::exit_reason);
                if let Some(reason) = reason {
                    self.remove(&id, reason);
                }
            }
            Message::ClearAll => self.clear_all(),
            Message::UpdateSettings(settings) => self.update_settings(settings),
            Message::ToggleCenter => {
                let open = self.center.toggle();
                tracing::debug!("notification center open={open}");
            }
            Message::Snapshot(tx) => {
                if tx.send(self.snapshot()).is_err() {
                    tracing::debug!("snapshot requester went away");
                }
            }
            Message::Settings(tx) => {
                if tx.send(self.settings.clone()).is_err() {
                    tracing::debug!("settings requester went away");
                }
            }
            Message::Shutdown => {
                tracing::debug!("shutdown is handled by the service loop");
            }
        }
    }

    pub fn queue(&self) -> &NotificationQueue {
        &self.queue
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    pub fn phase(&self, id: &NotificationId) -> Phase {
        self.lifecycles
            .get(id)
            .map_or(Phase::Removed, Lifecycle::phase)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            overlay: rendering::overlay(&self.queue, &self.settings, |id| self.phase(id)),
            center: rendering::center_view(&self.center, &self.queue, chrono::Utc::now()),
            queue_len: self.queue.len(),
        }
    }

    /// Queue a new notification without mounting it. Returns `false` for a duplicate id.
    fn enqueue(&mut self, id: NotificationId, input: NotificationInput) -> bool {
        let seq = self.next_seq;
        self.next_seq += 1;

        let notification =
            Notification::from_input(id.clone(), input, self.settings.default_duration_ms, seq);
        tracing::debug!(
            "enqueue {} ({}, {}ms, persistent={})",
            id,
            notification.kind,
            notification.duration_ms,
            notification.persistent
        );

        if !self.queue.insert(notification) {
            return false;
        }
        self.lifecycles.insert(id.clone(), Lifecycle::new(id));
        true
    }

    /// Mount what entered the render window and unmount what was pushed out of it.
    fn sync_mounts(&mut self) {
        let max = self.settings.max_visible();
        let animate = self.settings.animation_enabled;

        for n in self.queue.visible(max) {
            let Some(lc) = self.lifecycles.get_mut(&n.id) else {
                continue;
            };
            if lc.mount(&self.tx, n.auto_dismiss_after(), animate) && lc.take_first_show() {
                if self.settings.sound_enabled {
                    self.sound.play(n.kind);
                }
                let _ = self.events.send(Event::Shown(n.id.clone()));
            }
        }

        for n in self.queue.backlog(max) {
            let unmounted = self
                .lifecycles
                .get_mut(&n.id)
                .is_some_and(Lifecycle::unmount);
            if unmounted {
                tracing::debug!("{} moved to the backlog", n.id);
            }
        }
    }

    fn dismiss(&mut self, id: &NotificationId, reason: CloseReason) {
        let Some(lc) = self.lifecycles.get_mut(id) else {
            tracing::trace!("dismiss for unknown notification {id}");
            return;
        };

        match lc.begin_exit(&self.tx, reason, self.settings.animation_enabled) {
            ExitStep::RemoveNow => self.remove(id, reason),
            ExitStep::Animating => tracing::debug!("{id} exiting ({reason:?})"),
            ExitStep::AlreadyExiting => {}
        }
    }

    fn invoke_action(&mut self, id: &NotificationId) {
        let exiting = self
            .lifecycles
            .get(id)
            .is_none_or(|lc| matches!(lc.phase(), Phase::Exiting | Phase::Removed));
        if exiting {
            tracing::debug!("action for {id} ignored, notification is gone or exiting");
            return;
        }

        let Some(action) = self.queue.get(id).and_then(|n| n.action.clone()) else {
            tracing::warn!("notification {id} has no action");
            return;
        };

        tracing::info!("action '{}' for {}", action.label, id);
        if let Err(err) = action.invoke() {
            tracing::error!("{err}");
        }
        self.dismiss(id, CloseReason::ActionInvoked);
    }

    fn remove(&mut self, id: &NotificationId, reason: CloseReason) {
        if self.detach(id, reason) {
            self.sync_mounts();
        }
    }

    /// Take a notification out of the queue without promoting the backlog.
    fn detach(&mut self, id: &NotificationId, reason: CloseReason) -> bool {
        if let Some(mut lc) = self.lifecycles.remove(id) {
            lc.finish(reason);
        }
        if self.queue.remove(id).is_none() {
            return false;
        }

        let _ = self.events.send(Event::Closed {
            id: id.clone(),
            reason,
        });
        true
    }

    fn clear_all(&mut self) {
        let drained = self.queue.clear();
        self.lifecycles.clear();
        tracing::debug!("cleared {} notifications", drained.len());

        for n in drained {
            let _ = self.events.send(Event::Closed {
                id: n.id,
                reason: CloseReason::Cleared,
            });
        }
    }

    fn update_settings(&mut self, settings: NotificationSettings) {
        let settings = settings.sanitized();
        self.store.save(&settings);
        self.settings = settings;
        self.sync_mounts();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toast_notifications_config::MemoryStorage;
    use std::sync::{Arc, Mutex};
    use toast_notifications_util::{NotificationKind, NotifyOptions, SilentSound};
    use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

    struct Harness {
        controller: NotificationController,
        _tx: UnboundedSender<Message>,
        rx: UnboundedReceiver<Message>,
        events: broadcast::Receiver<Event>,
    }

    /// Records every kind it is asked to play.
    #[derive(Clone, Default)]
    struct RecordingSound(Arc<Mutex<Vec<NotificationKind>>>);

    impl RecordingSound {
        fn played(&self) -> Vec<NotificationKind> {
            self.0.lock().unwrap().clone()
        }
    }

    impl SoundHook for RecordingSound {
        fn play(&self, kind: NotificationKind) {
            self.0.lock().unwrap().push(kind);
        }
    }

    impl Harness {
        fn new(settings: NotificationSettings) -> Self {
            Self::with_sound(settings, Box::new(SilentSound))
        }

        fn with_sound(settings: NotificationSettings, sound: Box<dyn SoundHook>) -> Self {
            let store = SettingsStore::new(MemoryStorage::new());
            store.save(&settings);
            let (tx, rx) = unbounded_channel();
            let (events_tx, events) = broadcast::channel(64);
            let controller = NotificationController::new(store, sound, tx.downgrade(), events_tx);
            Self {
                controller,
                _tx: tx,
                rx,
                events,
            }
        }

        fn notify(&mut self, id: &str, options: NotifyOptions) -> NotificationId {
            self.notify_kind(id, NotificationKind::Info, options)
        }

        fn notify_kind(
            &mut self,
            id: &str,
            kind: NotificationKind,
            options: NotifyOptions,
        ) -> NotificationId {
            let id = NotificationId::from(id);
            let input = NotificationInput::new(kind, "Title", "Message").with_options(options);
            self.controller.update(Message::Notify {
                id: id.clone(),
                input,
            });
            id
        }

        /// Feed timer messages back into the controller until `ms` have passed.
        async fn run_for(&mut self, ms: u64) {
            let deadline = tokio::time::Instant::now() + std::time::Duration::from_millis(ms);
            loop {
                let message = tokio::select! {
                    biased;
                    message = self.rx.recv() => message,
                    _ = tokio::time::sleep_until(deadline) => None,
                };
                match message {
                    Some(message) => self.controller.update(message),
                    None => break,
                }
            }
        }

        fn drain_events(&mut self) -> Vec<Event> {
            let mut events = Vec::new();
            while let Ok(event) = self.events.try_recv() {
                events.push(event);
            }
            events
        }

        fn ids(&self) -> Vec<String> {
            self.controller
                .queue()
                .iter()
                .map(|n| n.id.to_string())
                .collect()
        }
    }

    fn no_animation() -> NotificationSettings {
        NotificationSettings {
            animation_enabled: false,
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_backlog_item_is_not_mounted_until_slot_frees() {
        let mut h = Harness::new(NotificationSettings {
            max_visible: 1,
            ..no_animation()
        });
        let a = h.notify("a", NotifyOptions::default().persistent());
        let b = h.notify("b", NotifyOptions::default().persistent());

        assert_eq!(h.controller.phase(&b), Phase::Visible);
        assert_eq!(h.controller.phase(&a), Phase::Created);

        h.controller.update(Message::Dismiss(b));
        assert_eq!(h.controller.phase(&a), Phase::Visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmounted_item_restarts_timer_on_remount() {
        let mut h = Harness::new(NotificationSettings {
            max_visible: 1,
            ..no_animation()
        });
        let a = h.notify("a", NotifyOptions::default().duration_ms(100));
        h.run_for(50).await;
        let b = h.notify("b", NotifyOptions::default().persistent());

        // a was pushed out before its timer fired and must survive well past 100ms
        h.run_for(500).await;
        assert_eq!(h.ids(), vec!["b", "a"]);

        h.controller.update(Message::Dismiss(b));
        assert_eq!(h.controller.phase(&a), Phase::Visible);
        h.run_for(101).await;
        assert!(h.ids().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_animated_dismiss_goes_through_exiting() {
        let mut h = Harness::new(NotificationSettings::default());
        let a = h.notify("a", NotifyOptions::default().persistent());
        assert_eq!(h.controller.phase(&a), Phase::Entering);

        h.run_for(200).await;
        assert_eq!(h.controller.phase(&a), Phase::Visible);

        h.controller.update(Message::Dismiss(a.clone()));
        assert_eq!(h.controller.phase(&a), Phase::Exiting);
        assert_eq!(h.controller.queue().len(), 1);

        h.run_for(350).await;
        assert_eq!(h.controller.phase(&a), Phase::Removed);
        assert!(h.controller.queue().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_events_carry_reason() {
        let mut h = Harness::new(no_animation());
        let a = h.notify("a", NotifyOptions::default().duration_ms(10));
        let b = h.notify("b", NotifyOptions::default().persistent());

        h.run_for(20).await;
        h.controller.update(Message::Dismiss(b.clone()));

        let mut closed = Vec::new();
        while let Ok(event) = h.events.try_recv() {
            if let Event::Closed { id, reason } = event {
                closed.push((id, reason));
            }
        }
        assert_eq!(
            closed,
            vec![(a, CloseReason::Expired), (b, CloseReason::Dismissed)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_swaps_in_one_step() {
        let mut h = Harness::new(no_animation());
        let saving = h.notify("saving", NotifyOptions::default().persistent());

        h.controller.update(Message::Replace {
            old: saving.clone(),
            id: NotificationId::from("saved"),
            input: NotificationInput::new(NotificationKind::Success, "Saved", "Done"),
        });

        assert_eq!(h.ids(), vec!["saved"]);
        assert_eq!(h.controller.phase(&saving), Phase::Removed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lowering_cap_unmounts_and_keeps_items() {
        let mut h = Harness::new(no_animation());
        for name in ["a", "b", "c"] {
            h.notify(name, NotifyOptions::default().persistent());
        }

        h.controller.update(Message::UpdateSettings(NotificationSettings {
            max_visible: 0,
            ..no_animation()
        }));

        assert_eq!(h.controller.settings().max_visible, 1);
        assert_eq!(h.controller.snapshot().overlay.toasts.len(), 1);
        assert_eq!(h.controller.queue().len(), 3);
        assert_eq!(h.controller.phase(&NotificationId::from("b")), Phase::Created);
    }

    #[tokio::test(start_paused = true)]
    async fn test_center_lists_whole_queue_when_open() {
        let mut h = Harness::new(NotificationSettings {
            max_visible: 1,
            ..no_animation()
        });
        for name in ["a", "b", "c"] {
            h.notify(name, NotifyOptions::default().persistent());
        }

        let closed = h.controller.snapshot().center;
        assert!(!closed.open);
        assert_eq!(closed.badge.as_deref(), Some("3"));
        assert!(closed.entries.is_empty());

        h.controller.update(Message::ToggleCenter);
        let open = h.controller.snapshot().center;
        let ids: Vec<_> = open.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(open.entries[0].time, "now");
        assert_eq!(open.entries[0].icon, "dialog-information-symbolic");
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_notify_is_ignored() {
        let mut h = Harness::new(no_animation());
        h.notify("a", NotifyOptions::default().persistent());
        h.notify("a", NotifyOptions::default().persistent());

        assert_eq!(h.ids(), vec!["a"]);
    }

    fn sound_on(max_visible: u32) -> NotificationSettings {
        NotificationSettings {
            max_visible,
            sound_enabled: true,
            ..no_animation()
        }
    }

    fn shown(events: &[Event]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Shown(id) => Some(id.as_str()),
                Event::Closed { .. } => None,
            })
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_sound_plays_per_kind_when_enabled() {
        let sound = RecordingSound::default();
        let mut h = Harness::with_sound(sound_on(5), Box::new(sound.clone()));

        h.notify_kind("a", NotificationKind::Error, NotifyOptions::default());
        h.notify_kind("b", NotificationKind::Success, NotifyOptions::default());

        assert_eq!(
            sound.played(),
            vec![NotificationKind::Error, NotificationKind::Success]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sound_skipped_when_disabled() {
        let sound = RecordingSound::default();
        let mut h = Harness::with_sound(no_animation(), Box::new(sound.clone()));

        let a = h.notify_kind("a", NotificationKind::Warning, NotifyOptions::default());
        assert_eq!(h.controller.phase(&a), Phase::Visible);
        assert!(sound.played().is_empty());
        assert_eq!(shown(&h.drain_events()), vec!["a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remount_does_not_replay_sound_or_shown() {
        let sound = RecordingSound::default();
        let mut h = Harness::with_sound(sound_on(1), Box::new(sound.clone()));

        let a = h.notify_kind("a", NotificationKind::Error, NotifyOptions::default().persistent());
        let b = h.notify_kind("b", NotificationKind::Info, NotifyOptions::default().persistent());
        assert_eq!(h.controller.phase(&a), Phase::Created);

        h.controller.update(Message::Dismiss(b));
        assert_eq!(h.controller.phase(&a), Phase::Visible);

        assert_eq!(
            sound.played(),
            vec![NotificationKind::Error, NotificationKind::Info]
        );
        assert_eq!(shown(&h.drain_events()), vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_does_not_touch_backlog() {
        let sound = RecordingSound::default();
        let mut h = Harness::with_sound(sound_on(1), Box::new(sound.clone()));

        let backlog =
            h.notify_kind("backlog", NotificationKind::Warning, NotifyOptions::default().persistent());
        let saving =
            h.notify_kind("saving", NotificationKind::Info, NotifyOptions::default().persistent());
        h.drain_events();

        h.controller.update(Message::Replace {
            old: saving.clone(),
            id: NotificationId::from("saved"),
            input: NotificationInput::new(NotificationKind::Success, "Saved", "Done"),
        });

        assert_eq!(h.ids(), vec!["saved", "backlog"]);
        assert_eq!(h.controller.phase(&backlog), Phase::Created);
        assert_eq!(
            sound.played(),
            vec![
                NotificationKind::Warning,
                NotificationKind::Info,
                NotificationKind::Success
            ]
        );

        let events = h.drain_events();
        assert_eq!(shown(&events), vec!["saved"]);
        assert_eq!(
            events.len(),
            2,
            "expected only Closed(saving) and Shown(saved), got {events:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_queries_are_harmless() {
        let mut h = Harness::new(no_animation());

        let (tx, rx) = tokio::sync::oneshot::channel();
        drop(rx);
        h.controller.update(Message::Settings(tx));
        let (tx, rx) = tokio::sync::oneshot::channel();
        drop(rx);
        h.controller.update(Message::Snapshot(tx));

        h.notify("a", NotifyOptions::default());
        assert_eq!(h.ids(), vec!["a"]);
    }
}
