// Adam Assistant backend library
// Exposes modules for the binary and for tests

pub mod auth;
pub mod config;
pub mod handlers;
pub mod routes;
pub mod utils;

pub use routes::build_router;

// Shared across all handlers
pub struct AppState {
    pub gateway: auth::OAuthGateway,
}

impl AppState {
    pub fn new(gateway: auth::OAuthGateway) -> Self {
        Self { gateway }
    }
}
