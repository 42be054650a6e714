//! Data model shared between the orchestrator, method widgets and the host.

use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a selectable payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    CreditCard,
    CryptoTron,
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::CryptoTron => "crypto_tron",
        }
    }
}

impl fmt::Display for PaymentMethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethodType {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(Self::CreditCard),
            "crypto_tron" => Ok(Self::CryptoTron),
            other => Err(CheckoutError::config(format!(
                "Unknown payment method: '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardData {
    pub card_number: String,
    pub card_holder: String,
    pub expiry: String,
    pub cvv: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoTronData {
    pub network: String,
    pub currency: String,
}

/// Field payload extracted from the active method widget.
///
/// Serializes as `{ "method": "<id>", "data": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "data", rename_all = "snake_case")]
pub enum PaymentData {
    CreditCard(CreditCardData),
    CryptoTron(CryptoTronData),
}

impl PaymentData {
    pub fn method(&self) -> PaymentMethodType {
        match self {
            Self::CreditCard(_) => PaymentMethodType::CreditCard,
            Self::CryptoTron(_) => PaymentMethodType::CryptoTron,
        }
    }
}

/// Outcome of a widget's local validation.
///
/// Only constructible from an error list, so `valid` always equals
/// `errors.is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn ok() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

/// Token returned by the host's prepare callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareResult {
    pub token: String,
}

impl PrepareResult {
    /// Validate the raw value resolved by the prepare callback.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, CheckoutError> {
        let object = value
            .as_object()
            .ok_or_else(|| CheckoutError::validation("Invalid prepare result", vec![]))?;

        match object.get("token").and_then(|t| t.as_str()) {
            Some(token) if !token.trim().is_empty() => Ok(Self {
                token: token.to_string(),
            }),
            _ => Err(CheckoutError::validation(
                "Missing or invalid token in prepare result",
                vec![],
            )),
        }
    }
}
