//! Submit sequence: validate → extract → prepare → fetch config → build URL → navigate.
//!
//! Steps run strictly in order and never overlap. The in-flight flag guards
//! against a second submit intent while one is outstanding; it is cleared when
//! the [`SubmissionGuard`] is dropped, whatever the outcome.

use crate::error::CheckoutError;
use crate::i18n::Translator;
use crate::prepare::PrepareHandler;
use crate::remote::RemoteConfigClient;
use crate::types::{PaymentData, PrepareResult};
use crate::widgets::PaymentMethodWidget;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

/// Performs the terminal navigation to the hosted payment page.
pub trait Navigator: Send + Sync {
    fn assign(&self, url: &str);
}

/// Step the controller is currently executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Extracting,
    Preparing,
    BuildingUrl,
}

#[derive(Serialize)]
struct RedirectPayload<'a> {
    version: u8,
    token: &'a str,
}

/// Base64url (unpadded) encoding of `{"version":1,"token":...}`.
pub fn encode_redirect_payload(token: &str) -> String {
    let json = serde_json::to_string(&RedirectPayload { version: 1, token })
        .unwrap_or_else(|_| unreachable!("payload serialization cannot fail"));
    URL_SAFE_NO_PAD.encode(json)
}

pub fn redirect_url(payment_host: &str, token: &str) -> String {
    format!("{}?payload={}", payment_host, encode_redirect_payload(token))
}

pub struct SubmissionController {
    remote: RemoteConfigClient,
    navigator: Arc<dyn Navigator>,
    in_flight: AtomicBool,
    phase: Mutex<SubmissionPhase>,
}

impl SubmissionController {
    pub fn new(remote: RemoteConfigClient, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            remote,
            navigator,
            in_flight: AtomicBool::new(false),
            phase: Mutex::new(SubmissionPhase::Idle),
        }
    }

    pub fn api_host(&self) -> &str {
        self.remote.api_host()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> SubmissionPhase {
        *self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn enter(&self, phase: SubmissionPhase) {
        debug!("Submission phase: {:?}", phase);
        *self.phase.lock().unwrap_or_else(|e| e.into_inner()) = phase;
    }

    /// Claim the in-flight flag. `None` when a submission is already running.
    pub fn begin(&self) -> Option<SubmissionGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard { controller: self })
    }

    /// Build the hosted payment page URL for a prepared order.
    ///
    /// Only the crypto method has a URL encoding; other methods are rejected
    /// before any network call.
    pub async fn build_redirect_url(
        &self,
        result: &PrepareResult,
        data: &PaymentData,
    ) -> Result<String, CheckoutError> {
        match data {
            PaymentData::CryptoTron(_) => {
                let payment_host = self.remote.fetch_payment_host().await?;
                Ok(redirect_url(&payment_host, &result.token))
            }
            PaymentData::CreditCard(_) => Err(CheckoutError::payment("Unsupported payment method")),
        }
    }
}

/// Exclusive right to run one submission; releases the flag on drop.
pub struct SubmissionGuard<'a> {
    controller: &'a SubmissionController,
}

impl SubmissionGuard<'_> {
    /// Run the submit sequence against `widget`, navigating on success.
    pub async fn run(
        &self,
        widget: Option<Arc<dyn PaymentMethodWidget>>,
        translator: &Translator,
        prepare: &dyn PrepareHandler,
    ) -> Result<String, CheckoutError> {
        let c = self.controller;

        let widget = widget
            .ok_or_else(|| CheckoutError::payment("Unable to get payment method component"))?;

        c.enter(SubmissionPhase::Validating);
        let validation = widget.validate(translator);
        if !validation.is_valid() {
            error!("Validation failed: {:?}", validation.errors());
            return Err(CheckoutError::validation(
                "Validation failed",
                validation.into_errors(),
            ));
        }

        c.enter(SubmissionPhase::Extracting);
        let data = widget
            .data()
            .ok_or_else(|| CheckoutError::payment("Unable to get payment data"))?;

        c.enter(SubmissionPhase::Preparing);
        let value = prepare
            .prepare(data.clone())
            .await
            .map_err(CheckoutError::from_rejection)?;

        let result = PrepareResult::from_value(&value).inspect_err(|_| {
            error!("Prepare result validation failed: missing token");
        })?;
        debug!("Prepare result received for {}", data.method());

        c.enter(SubmissionPhase::BuildingUrl);
        let url = c.build_redirect_url(&result, &data).await?;

        info!("Redirecting to hosted payment page");
        c.navigator.assign(&url);
        Ok(url)
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.controller.enter(SubmissionPhase::Idle);
        self.controller.in_flight.store(false, Ordering::Release);
    }
}
