//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod air_quality;
#[allow(clippy::missing_errors_doc)]
pub mod presets;
#[allow(clippy::missing_errors_doc)]
pub mod sensors;
pub mod sse;
pub mod status;

use axum::Router;
use axum::routing::{get, post};

use aircare_app::ports::EventPublisher;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<P>() -> Router<AppState<P>>
where
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/status", get(status::get))
        // Sensors
        .route("/sensors", get(sensors::get::<P>))
        .route("/sensors/stream", get(sse::sensors::<P>))
        .route("/update", post(sensors::update::<P>))
        // Presets
        .route("/presets/{name}", post(presets::apply::<P>))
        .route("/reset", post(presets::reset::<P>))
        // Air quality
        .route("/air-quality", get(air_quality::get::<P>))
        // Events
        .route("/events/stream", get(sse::events::<P>))
}
