//! Server-Sent Events (SSE) streams for live dashboards.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, WatchStream};

use aircare_app::ports::EventPublisher;

use crate::state::AppState;

fn json_frame(name: &'static str, value: &impl serde::Serialize) -> Option<Event> {
    match serde_json::to_string(value) {
        Ok(json) => Some(Event::default().event(name).data(json)),
        Err(err) => {
            tracing::warn!(%err, "failed to serialize SSE payload");
            None
        }
    }
}

/// `GET /api/sensors/stream`: SSE stream of home snapshots.
///
/// Sends the current snapshot immediately, then one `state` frame per
/// accepted update. Intermediate snapshots may be skipped when the client is
/// slower than the writers; the latest one always arrives.
pub async fn sensors<P>(
    State(state): State<AppState<P>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>
where
    P: EventPublisher + Send + Sync + 'static,
{
    let snapshots = WatchStream::new(state.store.subscribe())
        .filter_map(|snapshot| json_frame("state", &*snapshot).map(Ok));

    Sse::new(snapshots).keep_alive(KeepAlive::default())
}

/// `GET /api/events/stream`: SSE stream of domain events.
///
/// Subscribes to the event bus and sends JSON-encoded events as `event`
/// frames until the client disconnects.
pub async fn events<P>(
    State(state): State<AppState<P>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>
where
    P: EventPublisher + Send + Sync + 'static,
{
    let events = BroadcastStream::new(state.event_bus.subscribe()).filter_map(|result| {
        match result {
            Ok(event) => json_frame("event", &event).map(Ok),
            Err(BroadcastStreamRecvError::Lagged(n)) => {
                tracing::warn!(skipped = n, "SSE subscriber lagged, some events were dropped");
                None
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
