use crate::handlers::Message;
use std::time::Duration;
use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;

/// A one-shot timer that posts a message back to the controller.
///
/// Dropping the handle cancels the timer, so a timer can never outlive the lifecycle
/// that owns it. The timer only holds a weak sender and does not keep the service alive.
#[derive(Debug)]
pub struct TimerHandle(JoinHandle<()>);

impl TimerHandle {
    pub fn schedule(tx: &WeakUnboundedSender<Message>, after: Duration, message: Message) -> Self {
        let tx = tx.clone();
        TimerHandle(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            match tx.upgrade() {
                Some(tx) => {
                    if tx.send(message).is_err() {
                        tracing::trace!("controller stopped before timer fired");
                    }
                }
                None => tracing::trace!("controller gone before timer fired"),
            }
        }))
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}
