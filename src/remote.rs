//! Client for the remote configuration endpoint (`GET {api_host}/v1/config`).

use crate::error::CheckoutError;
use crate::retry::{with_retry_if, RetryConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RemoteConfig {
    hosts: RemoteHosts,
}

#[derive(Debug, Deserialize)]
struct RemoteHosts {
    payment: String,
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("API error ({status}): {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("invalid response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    /// Transport failures and 5xx responses are worth another attempt.
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => status.is_server_error(),
            Self::Decode(_) => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RemoteConfigClient {
    client: reqwest::Client,
    api_host: String,
    retry: RetryConfig,
}

impl RemoteConfigClient {
    pub fn new(client: reqwest::Client, api_host: impl Into<String>, retry: RetryConfig) -> Self {
        Self {
            client,
            api_host: api_host.into(),
            retry,
        }
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    fn config_url(&self) -> String {
        format!("{}/v1/config", self.api_host.trim_end_matches('/'))
    }

    async fn fetch_once(&self, url: &str) -> Result<RemoteConfig, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(FetchError::Transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        response.json().await.map_err(FetchError::Decode)
    }

    /// Fetch the host of the hosted payment page.
    pub async fn fetch_payment_host(&self) -> Result<String, CheckoutError> {
        let url = self.config_url();
        debug!("Fetching payment configuration from {}", url);

        let config = with_retry_if(
            &self.retry,
            "Payment config fetch",
            || self.fetch_once(&url),
            FetchError::is_retryable,
        )
        .await
        .map_err(|e| {
            CheckoutError::payment(format!("Failed to load payment configuration: {}", e))
        })?;

        let host = config.hosts.payment.trim().to_string();
        if host.is_empty() {
            return Err(CheckoutError::payment(
                "Payment configuration is missing the payment host",
            ));
        }
        Ok(host)
    }
}
