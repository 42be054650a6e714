//! Host-supplied prepare callback.
//!
//! The host turns the extracted payment data into a short-lived token. The
//! resolved value is returned raw; its shape is checked by the submission
//! controller.

use crate::types::PaymentData;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::future::Future;
use tracing::debug;

#[async_trait]
pub trait PrepareHandler: Send + Sync {
    /// Prepare an order for `data`. Any error is a rejection.
    async fn prepare(&self, data: PaymentData) -> Result<serde_json::Value>;
}

#[async_trait]
impl<F, Fut> PrepareHandler for F
where
    F: Fn(PaymentData) -> Fut + Send + Sync,
    Fut: Future<Output = Result<serde_json::Value>> + Send + 'static,
{
    async fn prepare(&self, data: PaymentData) -> Result<serde_json::Value> {
        (self)(data).await
    }
}

/// Prepare callback backed by a merchant HTTP endpoint.
///
/// POSTs the payment data as JSON and resolves with the response body.
#[derive(Debug, Clone)]
pub struct HttpPrepareHandler {
    client: reqwest::Client,
    url: String,
}

impl HttpPrepareHandler {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PrepareHandler for HttpPrepareHandler {
    async fn prepare(&self, data: PaymentData) -> Result<serde_json::Value> {
        debug!("Requesting payment token from {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&data)
            .send()
            .await
            .context("Failed to reach prepare endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Prepare endpoint error ({}): {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse prepare endpoint response")
    }
}
