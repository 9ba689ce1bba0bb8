//! OAuth2 Configuration
//!
//! Everything the gateway needs to talk to Google, resolved once at startup.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
    /// Client ID issued in the Google Cloud console
    pub client_id: String,

    /// Client secret paired with `client_id`
    pub client_secret: String,

    /// Callback URL registered for the OAuth client
    pub redirect_uri: String,

    pub auth_url: String,
    pub token_url: String,

    /// Gmail `users.messages.list` endpoint
    pub messages_url: String,

    pub scopes: Vec<String>,

    /// How long an issued `state` value stays redeemable
    pub state_ttl_seconds: u64,

    pub default_max_results: u32,
}

impl OAuth2Config {
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        if settings.google.client_id.trim().is_empty() {
            return Err(AppError::ConfigError("GOOGLE_CLIENT_ID not configured".to_string()));
        }
        if settings.google.client_secret.trim().is_empty() {
            return Err(AppError::ConfigError("GOOGLE_CLIENT_SECRET not configured".to_string()));
        }

        Ok(Self {
            client_id: settings.google.client_id.clone(),
            client_secret: settings.google.client_secret.clone(),
            redirect_uri: settings.google.redirect_uri.clone(),
            auth_url: settings.google.auth_url.clone(),
            token_url: settings.google.token_url.clone(),
            messages_url: settings.gmail.messages_url.clone(),
            scopes: settings.google.scopes.clone(),
            state_ttl_seconds: settings.google.state_ttl_seconds,
            default_max_results: settings.gmail.default_max_results,
        })
    }

    /// Query parameters for the consent screen, bound to `state`
    pub fn authorization_request(&self, state: &str) -> AuthorizationRequest {
        AuthorizationRequest {
            client_id: self.client_id.clone(),
            redirect_uri: self.redirect_uri.clone(),
            response_type: "code".to_string(),
            scope: self.scopes.join(" "),
            access_type: "offline".to_string(),
            prompt: "consent".to_string(),
            state: state.to_string(),
        }
    }

    /// Full consent URL for `state`
    pub fn authorization_url(&self, state: &str) -> String {
        let request = self.authorization_request(state);
        format!("{}?{}", self.auth_url, request.to_query_string())
    }
}

/// Parameters sent to the provider's consent screen. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub response_type: String,
    pub scope: String,
    pub access_type: String,
    pub prompt: String,
    pub state: String,
}

impl AuthorizationRequest {
    pub fn params(&self) -> [(&'static str, &str); 7] {
        [
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", self.response_type.as_str()),
            ("scope", self.scope.as_str()),
            ("access_type", self.access_type.as_str()),
            ("prompt", self.prompt.as_str()),
            ("state", self.state.as_str()),
        ]
    }

    pub fn to_query_string(&self) -> String {
        self.params()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
pub(crate) fn test_config(base_url: &str) -> OAuth2Config {
    OAuth2Config {
        client_id: "test_client_id".to_string(),
        client_secret: "test_secret".to_string(),
        redirect_uri: "https://example.com/oauth2callback".to_string(),
        auth_url: format!("{}/o/oauth2/v2/auth", base_url),
        token_url: format!("{}/token", base_url),
        messages_url: format!("{}/gmail/v1/users/me/messages", base_url),
        scopes: vec![
            "https://www.googleapis.com/auth/gmail.readonly".to_string(),
            "https://www.googleapis.com/auth/calendar".to_string(),
        ],
        state_ttl_seconds: 600,
        default_max_results: 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_pairs(url: &str) -> Vec<(String, String)> {
        let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");
        query
            .split('&')
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap();
                (k.to_string(), urlencoding::decode(v).unwrap().into_owned())
            })
            .collect()
    }

    #[test]
    fn test_authorization_url() {
        let config = test_config("https://accounts.example.com");
        let url = config.authorization_url("xyz");

        assert!(url.starts_with("https://accounts.example.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=test_client_id"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Foauth2callback"));
    }

    #[test]
    fn test_authorization_url_has_fixed_keys_and_joined_scopes() {
        let config = test_config("https://accounts.example.com");
        let pairs = query_pairs(&config.authorization_url("state-123"));

        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["client_id", "redirect_uri", "response_type", "scope", "access_type", "prompt", "state"]
        );

        let value = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone()).unwrap();
        assert_eq!(value("response_type"), "code");
        assert_eq!(value("access_type"), "offline");
        assert_eq!(value("prompt"), "consent");
        assert_eq!(value("state"), "state-123");
        assert_eq!(
            value("scope"),
            "https://www.googleapis.com/auth/gmail.readonly https://www.googleapis.com/auth/calendar"
        );
    }

    #[test]
    fn test_from_settings_requires_credentials() {
        let mut settings = Settings::new().unwrap();
        settings.google.client_id = String::new();
        settings.google.client_secret = "secret".to_string();
        assert!(matches!(
            OAuth2Config::from_settings(&settings),
            Err(AppError::ConfigError(msg)) if msg.contains("GOOGLE_CLIENT_ID")
        ));

        settings.google.client_id = "id".to_string();
        settings.google.client_secret = " ".to_string();
        assert!(matches!(
            OAuth2Config::from_settings(&settings),
            Err(AppError::ConfigError(msg)) if msg.contains("GOOGLE_CLIENT_SECRET")
        ));
        settings.google.client_secret = "secret".to_string();

        settings.google.client_id = "id".to_string();
        let config = OAuth2Config::from_settings(&settings).unwrap();
        assert_eq!(config.client_id, "id");
        assert_eq!(config.scopes, settings.google.scopes);
    }
}
