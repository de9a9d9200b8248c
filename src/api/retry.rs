use std::{future::Future, time::Duration};

use tokio::time::sleep;

use super::error::ApiError;
use crate::config::{ApiConfig, FeatureFlags};

const BASE_DELAY_MS: u64 = 1_000;
const MAX_DELAY_MS: u64 = 5_000;

pub type AttemptOutcome<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(api: &ApiConfig, features: FeatureFlags) -> Self {
        if features.enable_retry {
            Self::new(api.retry_attempts)
        } else {
            Self::new(1)
        }
    }

    pub fn backoff(attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        Duration::from_millis((BASE_DELAY_MS << exponent).min(MAX_DELAY_MS))
    }
}

/// The closure receives the 1-based attempt number. Only a 4xx status ends the
/// call early; otherwise the last error wins once the policy runs out.
pub async fn run_with_retry<T, F, Fut>(policy: RetryPolicy, mut attempt: F) -> Result<T, ApiError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AttemptOutcome<T>>,
{
    let mut number = 1;
    loop {
        let err = match attempt(number).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if err.is_client_error() {
            tracing::warn!(target: "api", attempt = number, error = %err, "client error; not retrying");
            return Err(err);
        }
        if number >= policy.max_attempts {
            tracing::warn!(
                target: "api",
                attempts = number,
                error = %err,
                "request failed; retry budget exhausted"
            );
            return Err(err);
        }

        let delay = RetryPolicy::backoff(number);
        tracing::warn!(
            target: "api",
            attempt = number,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "request failed; retrying"
        );
        sleep(delay).await;
        number += 1;
    }
}
