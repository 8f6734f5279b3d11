//! Typed publish/subscribe channel between screens.
//!
//! Screens subscribe when they mount and drop their [`Subscription`] when they
//! unmount. Publishing with nobody listening is not an error.

use super::payment::PaymentCompleted;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

/// Buffered events per subscriber before the oldest are dropped.
pub const EVENT_BUFFER: usize = 32;

/// Events that cross screen boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// The already-selected tab was tapped again
    ScrollToTop,
    /// A simulated payment finished
    PaymentCompleted(PaymentCompleted),
}

/// Broadcast bus shared by every screen.
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER);
        Self { sender }
    }

    /// Sends `event` to every live subscriber and returns how many there were.
    pub fn publish(&self, event: AppEvent) -> usize {
        match self.sender.send(event) {
            Ok(delivered) => {
                debug!(delivered, "Event published");
                delivered
            }
            Err(broadcast::error::SendError(event)) => {
                debug!(?event, "Event published with no subscribers");
                0
            }
        }
    }

    /// Registers a subscriber named after the screen that owns it.
    #[must_use]
    pub fn subscribe(&self, owner: impl Into<String>) -> Subscription {
        let owner = owner.into();
        debug!(%owner, "Subscribed to event bus");
        Subscription {
            owner,
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// One screen's handle on the bus. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    owner: String,
    receiver: broadcast::Receiver<AppEvent>,
}

impl Subscription {
    /// Name of the owning screen.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Next buffered event without waiting. Lagged events are skipped.
    pub fn try_next(&mut self) -> Option<AppEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(owner = %self.owner, skipped, "Subscriber lagged, events dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// All currently buffered events.
    pub fn drain(&mut self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Waits for the next event. `None` once the bus is gone.
    pub async fn next(&mut self) -> Option<AppEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(owner = %self.owner, skipped, "Subscriber lagged, events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Explicit unsubscribe, same as dropping.
    pub fn unsubscribe(self) {
        debug!(owner = %self.owner, "Unsubscribed from event bus");
    }
}
