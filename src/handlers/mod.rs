pub mod emails;
pub mod health;

pub use emails::*;
pub use health::*;

// OAuth2 handlers live in src/auth/handlers.rs
