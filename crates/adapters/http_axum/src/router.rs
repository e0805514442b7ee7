//! Axum router assembly.

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use aircare_app::ports::EventPublisher;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and, when `static_dir` is given, serves
/// that directory for every other path. Includes a [`TraceLayer`] that logs
/// each HTTP request/response at the `DEBUG` level, and a permissive
/// [`CorsLayer`] so that dashboards hosted elsewhere can call the API.
pub fn build<P>(state: AppState<P>, static_dir: Option<&Path>) -> Router
where
    P: EventPublisher + Send + Sync + 'static,
{
    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes());

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::state::AppState;
    use aircare_app::event_bus::InProcessEventBus;
    use aircare_domain::home::HomeState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    type TestState = AppState<Arc<InProcessEventBus>>;

    fn app() -> (Router, TestState) {
        let state = AppState::with_event_capacity(16);
        (build(state.clone(), None), state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (app, _) = app();
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_report_online_status() {
        let (app, _) = app();
        let (status, body) = send(app, get("/api/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "online");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn should_return_default_snapshot_with_flattened_aggregate() {
        let (app, _) = app();
        let (status, body) = send(app, get("/api/sensors")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pm25"], 12.0);
        assert_eq!(body["currentRoom"], "all");
        assert_eq!(body["rooms"]["kitchen"]["co2"], 600.0);
        assert_eq!(body["devices"]["intakeFan"]["speed"], 0);
        assert_eq!(body["rules"]["humidity"], true);
    }

    #[tokio::test]
    async fn should_apply_update_and_automation_in_one_response() {
        let (app, state) = app();
        let (status, body) = send(
            app,
            post_json("/api/update", &serde_json::json!({"co2": 1500, "currentRoom": "all"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["co2"], 1500.0);
        assert_eq!(body["devices"]["windowServo"]["active"], true);
        assert_eq!(body["devices"]["intakeFan"]["speed"], 75);
        assert!(state.store.snapshot().devices.window_servo.active);
    }

    #[tokio::test]
    async fn should_recompute_aggregate_when_room_updated() {
        let (app, _) = app();
        let (_, body) = send(
            app,
            post_json("/api/update", &serde_json::json!({"pm25": 30, "currentRoom": "bedroom"})),
        )
        .await;

        // (12 + 30 + 18) / 3
        assert_eq!(body["pm25"], 20.0);
        assert_eq!(body["rooms"]["bedroom"]["pm25"], 30.0);
        assert_eq!(body["currentRoom"], "bedroom");
    }

    #[tokio::test]
    async fn should_reject_unknown_room_with_bad_request() {
        let (app, state) = app();
        let (status, body) = send(
            app,
            post_json("/api/update", &serde_json::json!({"pm25": 30, "currentRoom": "garage"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("garage"));
        assert_eq!(*state.store.snapshot(), HomeState::default());
    }

    #[tokio::test]
    async fn should_reject_non_numeric_scalar() {
        let (app, _) = app();
        let (status, body) = send(
            app,
            post_json("/api/update", &serde_json::json!({"voc": "lots", "currentRoom": "all"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "voc must be a number");
    }

    #[tokio::test]
    async fn should_reject_unknown_device() {
        let (app, _) = app();
        let (status, _) = send(
            app,
            post_json(
                "/api/update",
                &serde_json::json!({"devices": {"toaster": {"active": true}}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_apply_named_preset() {
        let (app, _) = app();
        let (status, body) = send(app, post_json("/api/presets/poor", &serde_json::json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pm25"], 75.0);
        assert_eq!(body["devices"]["hepaFilter"]["active"], true);
        assert_eq!(body["devices"]["intakeFan"]["speed"], 75);
    }

    #[tokio::test]
    async fn should_reject_unknown_preset() {
        let (app, _) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/presets/stormy")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown preset `stormy`");
    }

    #[tokio::test]
    async fn should_restore_rule_flags_on_full_reset() {
        let (app, state) = app();
        send(
            app.clone(),
            post_json(
                "/api/update",
                &serde_json::json!({"pm25": 60, "currentRoom": "kitchen", "rules": {"voc": false}}),
            ),
        )
        .await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/reset")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rules"]["voc"], true);
        assert_eq!(body["rooms"]["kitchen"]["pm25"], 18.0);
        assert_eq!(body["currentRoom"], "all");
        assert_eq!(*state.store.snapshot(), HomeState::default());
    }

    #[tokio::test]
    async fn should_score_air_quality_for_room() {
        let (app, _) = app();
        let (status, body) = send(app, get("/api/air-quality?room=bedroom")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["room"], "bedroom");
        assert_eq!(body["label"], "BEDROOM");
        assert!(body["score"].is_u64());
        assert!(body["level"].is_string());
        assert_eq!(body["reading"]["pm25"], 10.0);
    }

    #[tokio::test]
    async fn should_reject_air_quality_for_unknown_room() {
        let (app, _) = app();
        let (status, _) = send(app, get("/api/air-quality?room=attic")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_open_event_stream_as_sse() {
        let (app, _) = app();
        let response = app.oneshot(get("/api/events/stream")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );
    }
}
