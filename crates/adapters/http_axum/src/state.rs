//! Shared application state for axum handlers.

use std::sync::Arc;

use aircare_app::event_bus::InProcessEventBus;
use aircare_app::ports::EventPublisher;
use aircare_app::store::HomeStore;

/// Application state shared across all axum handlers.
///
/// Generic over the store's event publisher to avoid dynamic dispatch.
/// `Clone` is implemented manually so `P` itself does not need to be
/// `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<P> {
    /// The single authoritative home state.
    pub store: Arc<HomeStore<P>>,
    /// Event bus the SSE event stream subscribes to.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<P> AppState<P>
where
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from pre-wrapped `Arc`s.
    ///
    /// The store's publisher is normally a clone of `event_bus`, so that
    /// everything the store publishes reaches SSE subscribers.
    pub fn new(store: Arc<HomeStore<P>>, event_bus: Arc<InProcessEventBus>) -> Self {
        Self { store, event_bus }
    }
}

impl AppState<Arc<InProcessEventBus>> {
    /// Wire a fresh store to a new event bus of the given capacity.
    #[must_use]
    pub fn with_event_capacity(capacity: usize) -> Self {
        let event_bus = Arc::new(InProcessEventBus::new(capacity));
        let store = Arc::new(HomeStore::new(Arc::clone(&event_bus)));
        Self { store, event_bus }
    }
}
