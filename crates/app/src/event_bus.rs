//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use aircare_domain::error::AirCareError;
use aircare_domain::event::Event;

use crate::ports::EventPublisher;

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped). Slow subscribers lag and skip events
/// instead of holding up the store.
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events published *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), AirCareError>> + Send {
        // send only fails when nobody is listening
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}
