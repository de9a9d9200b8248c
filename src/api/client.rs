use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::timeout;

use super::{
    error::ApiError,
    retry::{AttemptOutcome, RetryPolicy, run_with_retry},
};
use crate::{
    config::{ApiConfig, FeatureFlags},
    domain::ClassificationResult,
    upload::BatchPayload,
};

#[derive(Debug, Clone)]
pub enum Payload {
    Empty,
    Json(Value),
    Multipart(BatchPayload),
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    categorize_url: String,
    timeout: Option<Duration>,
    policy: RetryPolicy,
}

impl ApiClient {
    pub fn new(http: Client, api: &ApiConfig, features: FeatureFlags) -> Self {
        Self {
            http,
            categorize_url: api.categorize_url(),
            timeout: features.enable_timeout.then_some(api.timeout),
            policy: RetryPolicy::from_config(api, features),
        }
    }

    pub fn categorize_url(&self) -> &str {
        &self.categorize_url
    }

    pub async fn categorize(&self, batch: &BatchPayload) -> Result<ClassificationResult, ApiError> {
        tracing::info!(
            target: "api",
            url = %self.categorize_url,
            files = batch.len(),
            "submitting batch for classification"
        );
        self.post(&self.categorize_url, Payload::Multipart(batch.clone()))
            .await
    }

    pub async fn post<T: DeserializeOwned>(&self, url: &str, payload: Payload) -> Result<T, ApiError> {
        let body = self.send(url, &payload, Method::POST).await?;
        decode(body)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self.send(url, &Payload::Empty, Method::GET).await?;
        decode(body)
    }

    pub async fn send(&self, url: &str, payload: &Payload, method: Method) -> Result<Value, ApiError> {
        run_with_retry(self.policy, move |attempt| {
            self.attempt(method.clone(), url, payload, attempt)
        })
        .await
    }

    // Single HEAD, no retry.
    pub async fn ping(&self) -> Result<StatusCode, ApiError> {
        let request = self.http.head(self.categorize_url.as_str()).send();
        let response = match self.timeout {
            Some(limit) => timeout(limit, request)
                .await
                .map_err(|_| ApiError::Timeout(limit))?,
            None => request.await,
        }
        .map_err(ApiError::from_reqwest)?;
        Ok(response.status())
    }

    async fn attempt(
        &self,
        method: Method,
        url: &str,
        payload: &Payload,
        attempt: u32,
    ) -> AttemptOutcome<Value> {
        tracing::debug!(target: "api", %method, url, attempt, "sending request");

        let request = self.http.request(method, url);
        let request = match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(body),
            Payload::Multipart(batch) => request.multipart(
                batch
                    .to_form()
                    .map_err(|err| ApiError::InvalidRequest(err.to_string()))?,
            ),
        };

        let call = async move {
            let response = request.send().await.map_err(ApiError::from_reqwest)?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Http {
                    status: status.as_u16(),
                });
            }
            let bytes = response.bytes().await.map_err(ApiError::from_reqwest)?;
            serde_json::from_slice::<Value>(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
        };

        match self.timeout {
            Some(limit) => timeout(limit, call)
                .await
                .unwrap_or_else(|_| Err(ApiError::Timeout(limit))),
            None => call.await,
        }
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|err| ApiError::Decode(err.to_string()))
}
