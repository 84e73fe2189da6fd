use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        announcements::{change_status, create_announcement, find_announcements},
        health::livez,
        teams::create_team,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route(
            "/match-announcements",
            get(find_announcements).post(create_announcement),
        )
        .route("/match-announcements/{id}/status", patch(change_status))
        .route("/teams", post(create_team))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
