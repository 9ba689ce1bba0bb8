use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::auth::ResourceQuery;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailsParams {
    max_results: Option<u32>,
}

/// GET /emails
///
/// Latest messages from the authorized mailbox, Gmail's JSON unchanged.
pub async fn list_emails(
    State(state): State<Arc<AppState>>,
    params: Result<Query<EmailsParams>, QueryRejection>,
) -> AppResult<Json<Value>> {
    log_request_received("/emails", "GET");

    let Query(params) = params.map_err(|rejection| {
        log_validation_error("max_results", &rejection.body_text());
        AppError::ValidationError(format!("invalid query: {}", rejection.body_text()))
    })?;

    let query = ResourceQuery::from_config(state.gateway.config(), params.max_results);

    let body = state.gateway.fetch_resource(query).await?;
    Ok(Json(body))
}
