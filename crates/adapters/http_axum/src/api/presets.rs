//! One-click scenarios.

use axum::Json;
use axum::extract::{Path, State};

use aircare_app::ports::EventPublisher;
use aircare_domain::home::HomeState;
use aircare_domain::preset::Preset;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/presets/{name}`
pub async fn apply<P>(
    State(state): State<AppState<P>>,
    Path(name): Path<String>,
) -> Result<Json<HomeState>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
{
    let preset = name.parse::<Preset>()?;
    tracing::info!(%preset, "applying preset");
    let next = state.store.apply(preset.update()).await?;
    Ok(Json(HomeState::clone(&next)))
}

/// `POST /api/reset`
///
/// Restores every room, device and rule flag to its startup value, unlike
/// the `reset` preset which only rewrites readings and devices.
pub async fn reset<P>(State(state): State<AppState<P>>) -> Json<HomeState>
where
    P: EventPublisher + Send + Sync + 'static,
{
    let next = state.store.reset().await;
    Json(HomeState::clone(&next))
}
