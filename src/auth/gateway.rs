//! OAuth Gateway
//!
//! Single-tenant flow: build the consent URL, exchange the returned code,
//! persist the token record and use it as a bearer token for Gmail.
//!
//! There is no refresh. A stale token surfaces as the downstream 401.

use serde_json::Value;
use std::sync::Arc;

use super::{CredentialStore, OAuth2Client, OAuth2Config, PendingStates, TokenRecord};
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

/// Downstream query for `FetchResource`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceQuery {
    pub max_results: u32,
}

impl ResourceQuery {
    /// `max_results` falls back to `gmail.default_max_results`
    pub fn from_config(config: &OAuth2Config, max_results: Option<u32>) -> Self {
        Self {
            max_results: max_results.unwrap_or(config.default_max_results),
        }
    }
}

/// Returned by a successful code exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeAck {
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
    pub has_refresh_token: bool,
}

pub struct OAuthGateway {
    config: OAuth2Config,
    client: OAuth2Client,
    store: Arc<dyn CredentialStore>,
    pending_states: PendingStates,
}

impl OAuthGateway {
    pub fn new(config: OAuth2Config, store: Arc<dyn CredentialStore>) -> Self {
        let client = OAuth2Client::new(config.clone());
        Self::with_client(config, client, store)
    }

    pub fn with_client(
        config: OAuth2Config,
        client: OAuth2Client,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let pending_states = PendingStates::new(config.state_ttl_seconds);
        Self {
            config,
            client,
            store,
            pending_states,
        }
    }

    pub fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// Consent URL with a freshly issued `state`
    pub async fn build_authorization_url(&self) -> String {
        let state = self.pending_states.issue().await;
        self.config.authorization_url(&state)
    }

    /// Redeem the `state` echoed back by the provider
    pub async fn verify_state(&self, state: &str) -> AppResult<()> {
        self.pending_states.consume(state).await
    }

    /// Exchange `code` and overwrite the stored token record.
    ///
    /// Nothing is written unless the token endpoint answers 200 with JSON.
    pub async fn exchange_code(&self, code: &str) -> AppResult<ExchangeAck> {
        if code.trim().is_empty() {
            return Err(AppError::ValidationError("code must not be empty".to_string()));
        }

        let body = self.client.exchange_code_for_token(code).await?;
        let record = TokenRecord::from_value(body);

        if record.access_token().is_none() {
            // Saved anyway; fetch_resource reports it as unauthenticated
            log_warning("⚠️ [OAuth2] Token response has no access_token");
        }

        self.store.save(&record).await?;

        Ok(ExchangeAck {
            token_type: record.token_type().map(str::to_string),
            scope: record.scope().map(str::to_string),
            expires_in: record.expires_in(),
            has_refresh_token: record.refresh_token().is_some(),
        })
    }

    /// Call Gmail with the stored bearer token and return its JSON verbatim
    pub async fn fetch_resource(&self, query: ResourceQuery) -> AppResult<Value> {
        let record = self.store.load().await?.ok_or_else(|| {
            log_warning("🔒 [Gateway] No token record, authorization required");
            AppError::Unauthenticated
        })?;

        let access_token = record.access_token().ok_or_else(|| {
            log_warning("🔒 [Gateway] Token record has no access_token");
            AppError::Unauthenticated
        })?;

        self.client.list_messages(access_token, query.max_results).await
    }
}
