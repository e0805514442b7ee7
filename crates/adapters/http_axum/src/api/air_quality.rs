//! Air quality score for the whole home or a single room.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use aircare_app::ports::EventPublisher;
use aircare_domain::air_quality::AirQuality;
use aircare_domain::reading::Reading;
use aircare_domain::room::RoomTarget;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AirQualityQuery {
    pub room: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AirQualityResponse {
    pub room: RoomTarget,
    /// Dashboard heading for the room, e.g. `LIVING ROOM`.
    pub label: &'static str,
    #[serde(flatten)]
    pub quality: AirQuality,
    pub reading: Reading,
}

/// `GET /api/air-quality?room=<all|livingRoom|bedroom|kitchen>`
pub async fn get<P>(
    State(state): State<AppState<P>>,
    Query(query): Query<AirQualityQuery>,
) -> Result<Json<AirQualityResponse>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
{
    let room = query
        .room
        .as_deref()
        .map(str::parse::<RoomTarget>)
        .transpose()?
        .unwrap_or_default();

    let snapshot = state.store.snapshot();
    let reading = *snapshot.reading_for(room);

    Ok(Json(AirQualityResponse {
        room,
        label: room.display_name(),
        quality: AirQuality::of(&reading),
        reading,
    }))
}
