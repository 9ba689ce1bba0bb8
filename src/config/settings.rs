use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REDIRECT_URI: &str = "https://adam-assistant-backend.onrender.com/oauth2callback";
pub const DEFAULT_TOKEN_FILE: &str = "google_tokens.json";

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GMAIL_MESSAGES_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages";

pub const DEFAULT_SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/gmail.readonly",
    "https://www.googleapis.com/auth/calendar",
    "https://www.googleapis.com/auth/contacts.readonly",
];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub google: GoogleSettings,
    pub gmail: GmailSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub scopes: Vec<String>,
    pub state_ttl_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GmailSettings {
    pub messages_url: String,
    pub default_max_results: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageSettings {
    pub token_file: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let scopes: Vec<String> = DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect();

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("google.client_id", "")?
            .set_default("google.client_secret", "")?
            .set_default("google.redirect_uri", DEFAULT_REDIRECT_URI)?
            .set_default("google.auth_url", GOOGLE_AUTH_URL)?
            .set_default("google.token_url", GOOGLE_TOKEN_URL)?
            .set_default("google.scopes", scopes)?
            .set_default("google.state_ttl_seconds", 600)?
            .set_default("gmail.messages_url", GMAIL_MESSAGES_URL)?
            .set_default("gmail.default_max_results", 5)?
            .set_default("storage.token_file", DEFAULT_TOKEN_FILE)?
            // Base file, then per-environment file
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"));

        // Plain variable names used by the hosting environment
        if let Ok(client_id) = std::env::var("GOOGLE_CLIENT_ID") {
            builder = builder.set_override("google.client_id", client_id)?;
        }
        if let Ok(client_secret) = std::env::var("GOOGLE_CLIENT_SECRET") {
            builder = builder.set_override("google.client_secret", client_secret)?;
        }
        if let Ok(redirect_uri) = std::env::var("REDIRECT_URI") {
            builder = builder.set_override("google.redirect_uri", redirect_uri)?;
        }
        if let Ok(token_file) = std::env::var("TOKEN_FILE") {
            builder = builder.set_override("storage.token_file", token_file)?;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }
}
