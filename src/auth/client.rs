//! OAuth2 HTTP Client
//!
//! Talks to Google's token endpoint and to the Gmail API.

use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::OAuth2Config;
use crate::utils::logging::*;
use crate::utils::{redact, AppError, AppResult};

/// Upper bound accepted by `users.messages.list`
pub const MAX_RESULTS_LIMIT: u32 = 500;

pub struct OAuth2Client {
    config: OAuth2Config,
    http_client: Client,
}

impl OAuth2Client {
    pub fn new(config: OAuth2Config) -> Self {
        Self::with_http_client(config, Client::new())
    }

    pub fn with_http_client(config: OAuth2Config, http_client: Client) -> Self {
        Self { config, http_client }
    }

    /// Trade an authorization code for tokens.
    ///
    /// Returns the token endpoint's JSON body untouched.
    ///
    /// # Errors
    /// - `ExchangeFailed` when Google answers anything but 200
    /// - `InvalidUpstreamResponse` when a 200 body is not JSON
    pub async fn exchange_code_for_token(&self, code: &str) -> AppResult<Value> {
        let url = &self.config.token_url;

        log_info(&format!(
            "📤 [OAuth2] POST {} - client_id: {}, code: {}",
            url,
            &self.config.client_id,
            redact(code, 10)
        ));

        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self.http_client.post(url).form(&params).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            log_upstream_error(url, status.as_u16(), &error_text);
            return Err(AppError::ExchangeFailed {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            log_error(&format!("❌ [OAuth2] Token response is not JSON: {}", e));
            AppError::InvalidUpstreamResponse(format!("token endpoint: {}", e))
        })?;

        log_info("✅ [OAuth2] Token exchange succeeded");
        Ok(body)
    }

    /// `GET users/me/messages?maxResults=n` with the given bearer token.
    ///
    /// Returns Gmail's JSON body untouched.
    pub async fn list_messages(&self, access_token: &str, max_results: u32) -> AppResult<Value> {
        let url = &self.config.messages_url;
        let max_results = max_results.clamp(1, MAX_RESULTS_LIMIT);

        log_info(&format!(
            "📨 [Gmail] GET {}?maxResults={} with token {}",
            url,
            max_results,
            redact(access_token, 12)
        ));

        let response = self
            .http_client
            .get(url)
            .query(&[("maxResults", max_results)])
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            log_upstream_error(url, status.as_u16(), &error_text);
            return Err(AppError::UpstreamFailed {
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| {
            log_error(&format!("❌ [Gmail] Response is not JSON: {}", e));
            AppError::InvalidUpstreamResponse(format!("gmail: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::test_config;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_exchange_posts_form_fields() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/token")
                    .x_www_form_urlencoded_tuple("code", "4/0Abc")
                    .x_www_form_urlencoded_tuple("client_id", "test_client_id")
                    .x_www_form_urlencoded_tuple("client_secret", "test_secret")
                    .x_www_form_urlencoded_tuple("redirect_uri", "https://example.com/oauth2callback")
                    .x_www_form_urlencoded_tuple("grant_type", "authorization_code");
                then.status(200)
                    .json_body(json!({"access_token": "tok", "token_type": "Bearer"}));
            })
            .await;

        let client = OAuth2Client::new(test_config(&server.base_url()));
        let body = client.exchange_code_for_token("4/0Abc").await.unwrap();

        mock.assert_async().await;
        assert_eq!(body["access_token"], "tok");
    }

    #[tokio::test]
    async fn test_exchange_non_200_carries_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(403).json_body(json!({"error": "invalid_grant"}));
            })
            .await;

        let client = OAuth2Client::new(test_config(&server.base_url()));
        let err = client.exchange_code_for_token("bad").await.unwrap_err();
        assert!(matches!(err, AppError::ExchangeFailed { status: 403 }));
    }

    #[tokio::test]
    async fn test_exchange_non_json_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let client = OAuth2Client::new(test_config(&server.base_url()));
        let err = client.exchange_code_for_token("code").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidUpstreamResponse(_)));
    }

    #[tokio::test]
    async fn test_list_messages_clamps_max_results() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/gmail/v1/users/me/messages")
                    .query_param("maxResults", "500")
                    .header("Authorization", "Bearer tok");
                then.status(200).json_body(json!({"messages": []}));
            })
            .await;

        let client = OAuth2Client::new(test_config(&server.base_url()));
        let body = client.list_messages("tok", 10_000).await.unwrap();

        mock.assert_async().await;
        assert_eq!(body, json!({"messages": []}));
    }
}
