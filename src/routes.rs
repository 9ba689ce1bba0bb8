use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{handle_oauth_callback, start_oauth_flow};
use crate::handlers::{health_check, list_emails, root, test_status};
use crate::AppState;

/// Any origin may call the API, cookies included. Origin, methods and
/// headers are mirrored since a literal `*` cannot carry credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/test", get(test_status))
        .route("/health", get(health_check))
        .route("/auth", get(start_oauth_flow))
        .route("/oauth2callback", get(handle_oauth_callback))
        .route("/emails", get(list_emails))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
