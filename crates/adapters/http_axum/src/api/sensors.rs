//! JSON handlers for reading and updating the home state.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use aircare_app::ports::EventPublisher;
use aircare_domain::device::DevicePatch;
use aircare_domain::home::HomeState;
use aircare_domain::reading::Measurement;
use aircare_domain::update::PartialUpdate;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/update`.
///
/// Scalars sit at the top level next to the routing fields, as dashboards
/// send them. `currentRoom` routes the scalars and is remembered as the
/// selected room; `targetRoom` and `selectedRoom` override either half.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub current_room: Option<String>,
    pub target_room: Option<String>,
    pub selected_room: Option<String>,
    #[serde(default)]
    pub devices: BTreeMap<String, DevicePatch>,
    #[serde(default)]
    pub rules: BTreeMap<String, bool>,
    /// Everything else. Measurement keys become scalar writes; the rest is
    /// ignored so that clients may post back a whole snapshot.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl From<UpdateRequest> for PartialUpdate {
    fn from(req: UpdateRequest) -> Self {
        let UpdateRequest {
            current_room,
            target_room,
            selected_room,
            devices,
            rules,
            fields,
        } = req;

        // non-numeric values become NaN and are rejected by validation
        let readings = fields
            .iter()
            .filter_map(|(key, value)| {
                let measurement = key.parse::<Measurement>().ok()?;
                Some((measurement, value.as_f64().unwrap_or(f64::NAN)))
            })
            .collect();

        Self {
            readings,
            target_room: target_room.or_else(|| current_room.clone()),
            devices,
            rules,
            selected_room: selected_room.or(current_room),
        }
    }
}

/// `GET /api/sensors`
pub async fn get<P>(State(state): State<AppState<P>>) -> Json<HomeState>
where
    P: EventPublisher + Send + Sync + 'static,
{
    Json(HomeState::clone(&state.store.snapshot()))
}

/// `POST /api/update`
pub async fn update<P>(
    State(state): State<AppState<P>>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<HomeState>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
{
    let next = state.store.apply(PartialUpdate::from(req)).await?;
    Ok(Json(HomeState::clone(&next)))
}
