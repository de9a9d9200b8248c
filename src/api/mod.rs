mod client;
mod error;
mod retry;

pub use client::{ApiClient, Payload};
pub use error::ApiError;
pub use retry::{AttemptOutcome, RetryPolicy, run_with_retry};
