//! Pending OAuth `state` values
//!
//! Each `/auth` redirect carries a fresh random state. The callback must
//! present one that was issued here, not yet used and not older than the TTL.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::utils::logging::*;
use crate::utils::{redact, AppError, AppResult};

/// Upper bound on outstanding states; the oldest is evicted past it
pub const MAX_PENDING_STATES: usize = 1024;

#[derive(Debug)]
pub struct PendingStates {
    issued: RwLock<HashMap<String, Instant>>,
    ttl: Duration,
}

impl PendingStates {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            issued: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Generates and remembers a new state value
    pub async fn issue(&self) -> String {
        let state = uuid::Uuid::new_v4().simple().to_string();
        let now = Instant::now();

        let mut issued = self.issued.write().await;
        issued.retain(|_, created| now.duration_since(*created) < self.ttl);

        if issued.len() >= MAX_PENDING_STATES {
            let oldest = issued
                .iter()
                .min_by_key(|(_, created)| **created)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                issued.remove(&oldest);
            }
        }
        issued.insert(state.clone(), now);

        state
    }

    /// Redeems `state`. Succeeds at most once per issued value.
    pub async fn consume(&self, state: &str) -> AppResult<()> {
        let created = self.issued.write().await.remove(state);

        match created {
            Some(created) if created.elapsed() < self.ttl => Ok(()),
            Some(_) => {
                log_warning(&format!("⚠️ [OAuth2] Expired state: {}", redact(state, 6)));
                Err(AppError::InvalidState("state expired".to_string()))
            }
            None => {
                log_warning(&format!("⚠️ [OAuth2] Unknown state: {}", redact(state, 6)));
                Err(AppError::InvalidState("unknown state".to_string()))
            }
        }
    }

    #[cfg(test)]
    pub async fn pending_count(&self) -> usize {
        self.issued.read().await.len()
    }
}
