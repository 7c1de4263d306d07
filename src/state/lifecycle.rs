use crate::constants::{ENTER_TRANSITION, EXIT_TRANSITION};
use crate::handlers::Message;
use crate::timer::TimerHandle;
use std::time::Duration;
use toast_notifications_util::{CloseReason, NotificationId};
use tokio::sync::mpsc::WeakUnboundedSender;

/// Where a notification is in its life.
///
/// `Created` covers queued notifications that are not mounted in the overlay, including
/// the ones waiting beyond the render cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Created,
    Entering,
    Visible,
    Exiting,
    Removed,
}

impl Phase {
    pub fn is_mounted(self) -> bool {
        matches!(self, Phase::Entering | Phase::Visible)
    }
}

/// What the controller has to do after asking a lifecycle to exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStep {
    /// Remove from the queue right away
    RemoveNow,
    /// The exit animation is running; removal follows on `ExitFinished`
    Animating,
    /// Already exiting or removed, nothing to do
    AlreadyExiting,
}

/// Timed and animated state of one notification.
#[derive(Debug)]
pub struct Lifecycle {
    id: NotificationId,
    phase: Phase,
    /// Bumped on every mount so timer messages from an earlier mount are ignored
    generation: u64,
    /// Set on the first mount; remounts after a trip to the backlog keep it
    shown: bool,
    enter_timer: Option<TimerHandle>,
    expiry_timer: Option<TimerHandle>,
    exit_timer: Option<TimerHandle>,
    exit_reason: Option<CloseReason>,
}

impl Lifecycle {
    pub fn new(id: NotificationId) -> Self {
        Self {
            id,
            phase: Phase::Created,
            generation: 0,
            shown: false,
            enter_timer: None,
            expiry_timer: None,
            exit_timer: None,
            exit_reason: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn exit_reason(&self) -> Option<CloseReason> {
        self.exit_reason
    }

    /// `true` exactly once, on the first call after the first mount.
    pub fn take_first_show(&mut self) -> bool {
        if self.shown || !self.phase.is_mounted() {
            return false;
        }
        self.shown = true;
        true
    }

    pub fn has_expiry_timer(&self) -> bool {
        self.expiry_timer.is_some()
    }

    /// Move forward to `next`. Backward or same-phase moves are refused.
    pub fn advance(&mut self, next: Phase) -> bool {
        if next <= self.phase {
            tracing::debug!(
                "refusing lifecycle move {:?} -> {:?} for {}",
                self.phase,
                next,
                self.id
            );
            return false;
        }
        tracing::debug!("{}: {:?} -> {:?}", self.id, self.phase, next);
        self.phase = next;
        true
    }

    /// Start rendering. Schedules the enter animation and the auto-dismiss timer.
    pub fn mount(
        &mut self,
        tx: &WeakUnboundedSender<Message>,
        auto_dismiss: Option<Duration>,
        animate: bool,
    ) -> bool {
        if self.phase != Phase::Created {
            return false;
        }
        self.generation += 1;

        if animate {
            self.advance(Phase::Entering);
            self.enter_timer = Some(TimerHandle::schedule(
                tx,
                ENTER_TRANSITION,
                Message::Entered(self.id.clone(), self.generation),
            ));
        } else {
            self.advance(Phase::Visible);
        }

        self.expiry_timer = auto_dismiss.map(|after| {
            TimerHandle::schedule(tx, after, Message::Timeout(self.id.clone(), self.generation))
        });
        true
    }

    /// Enter animation done.
    pub fn entered(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != Phase::Entering {
            return false;
        }
        self.enter_timer = None;
        self.advance(Phase::Visible)
    }

    /// Whether a timeout message belongs to the current mount.
    pub fn is_current_timeout(&self, generation: u64) -> bool {
        generation == self.generation && self.phase.is_mounted()
    }

    /// Stop rendering without leaving the queue, e.g. when pushed out of the overlay by
    /// newer notifications. Timers are cancelled and restart on the next mount.
    pub fn unmount(&mut self) -> bool {
        if !self.phase.is_mounted() {
            return false;
        }
        self.cancel_timers();
        tracing::debug!("{}: {:?} -> Created (unmounted)", self.id, self.phase);
        self.phase = Phase::Created;
        true
    }

    /// Begin the dismissal procedure shared by timeouts, close buttons and actions.
    pub fn begin_exit(
        &mut self,
        tx: &WeakUnboundedSender<Message>,
        reason: CloseReason,
        animate: bool,
    ) -> ExitStep {
        match self.phase {
            Phase::Exiting | Phase::Removed => return ExitStep::AlreadyExiting,
            Phase::Created => {
                // Never rendered, nothing to animate
                self.finish(reason);
                return ExitStep::RemoveNow;
            }
            Phase::Entering | Phase::Visible => {}
        }

        self.cancel_timers();
        if animate {
            self.exit_reason = Some(reason);
            self.advance(Phase::Exiting);
            self.exit_timer = Some(TimerHandle::schedule(
                tx,
                EXIT_TRANSITION,
                Message::ExitFinished(self.id.clone()),
            ));
            ExitStep::Animating
        } else {
            self.finish(reason);
            ExitStep::RemoveNow
        }
    }

    /// Terminal transition. Cancels anything still pending.
    pub fn finish(&mut self, reason: CloseReason) {
        self.cancel_timers();
        self.exit_timer = None;
        self.exit_reason.get_or_insert(reason);
        self.advance(Phase::Removed);
    }

    fn cancel_timers(&mut self) {
        if let Some(timer) = self.enter_timer.take() {
            timer.cancel();
        }
        if let Some(timer) = self.expiry_timer.take() {
            timer.cancel();
        }
    }
}
