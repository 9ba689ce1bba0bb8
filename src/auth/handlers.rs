//! OAuth2 HTTP Handlers
//!
//! `/auth` starts the consent flow, `/oauth2callback` finishes it.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::utils::logging::*;
use crate::utils::{redact, AppError, AppResult};
use crate::AppState;

/// Query string Google appends to the redirect URI
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackParams {
    code: Option<String>,
    state: Option<String>,
    /// Set instead of `code` when the user denies consent
    error: Option<String>,
}

/// GET /auth
///
/// 302 to the consent screen.
pub async fn start_oauth_flow(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    log_request_received("/auth", "GET");

    let auth_url = state.gateway.build_authorization_url().await;
    log_info(&format!("↗️  [OAuth2] Redirecting to: {}", state.gateway.config().auth_url));

    (StatusCode::FOUND, [(header::LOCATION, auth_url)])
}

/// GET /oauth2callback?code=..&state=..
pub async fn handle_oauth_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OAuthCallbackParams>,
) -> AppResult<Json<Value>> {
    log_request_received("/oauth2callback", "GET");

    if let Some(error) = params.error {
        log_error(&format!("❌ [OAuth2] Provider returned error: {}", error));
        return Err(AppError::ValidationError(format!("authorization denied: {}", error)));
    }

    let code = params.code.ok_or_else(|| {
        log_error("❌ [OAuth2] Callback without code");
        AppError::ValidationError("Missing code parameter".to_string())
    })?;

    let oauth_state = params
        .state
        .ok_or_else(|| AppError::InvalidState("missing state".to_string()))?;
    state.gateway.verify_state(&oauth_state).await?;

    log_info(&format!("🔑 [OAuth2] Code received: {}", redact(&code, 10)));

    let ack = state.gateway.exchange_code(&code).await.map_err(|e| {
        log_error(&format!("❌ [OAuth2] Exchange failed: {}", e));
        e
    })?;

    log_info(&format!(
        "✅ [OAuth2] Authorized (token_type: {:?}, scope: {:?}, expires_in: {:?}, refresh_token: {})",
        ack.token_type, ack.scope, ack.expires_in, ack.has_refresh_token
    ));

    Ok(Json(json!({ "message": "Authorization successful" })))
}
