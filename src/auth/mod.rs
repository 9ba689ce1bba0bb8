//! # Google OAuth2 Module
//!
//! ## Responsibilities:
//! - Build the consent URL (with an anti-CSRF `state`)
//! - Exchange the authorization code for tokens
//! - Persist the single token record
//! - Call Gmail with the stored bearer token
//!
//! ## Layout:
//! - `config.rs`: OAuth2 settings and `AuthorizationRequest`
//! - `client.rs`: HTTP calls to Google
//! - `token_store.rs`: `CredentialStore` and its implementations
//! - `state.rs`: pending `state` values
//! - `gateway.rs`: `OAuthGateway`, the flow itself
//! - `handlers.rs`: `/auth` and `/oauth2callback`

pub mod client;
pub mod config;
pub mod gateway;
pub mod handlers;
pub mod state;
pub mod token_store;

pub use client::OAuth2Client;
pub use config::{AuthorizationRequest, OAuth2Config};
pub use gateway::{ExchangeAck, OAuthGateway, ResourceQuery};
pub use handlers::{handle_oauth_callback, start_oauth_flow};
pub use state::PendingStates;
pub use token_store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, TokenRecord};
