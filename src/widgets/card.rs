use super::{resolve_field, PaymentMethodWidget};
use crate::i18n::Translator;
use crate::projection::ForwardedSlots;
use crate::types::{CreditCardData, PaymentData, PaymentMethodType, ValidationResult};
use regex::Regex;
use std::sync::{Arc, OnceLock, RwLock};

const CARD_NUMBER_SLOT: &str = "card-number-input";
const CARD_HOLDER_SLOT: &str = "card-holder-input";
const EXPIRY_SLOT: &str = "expiry-input";
const CVV_SLOT: &str = "cvv-input";

const MIN_CARD_DIGITS: usize = 13;
const MIN_CVV_LEN: usize = 3;

static EXPIRY_REGEX: OnceLock<Regex> = OnceLock::new();
static AMEX_REGEX: OnceLock<Regex> = OnceLock::new();

fn expiry_regex() -> &'static Regex {
    EXPIRY_REGEX.get_or_init(|| Regex::new(r"^\d{2}/\d{2}$").expect("valid expiry regex"))
}

fn amex_regex() -> &'static Regex {
    AMEX_REGEX.get_or_init(|| Regex::new(r"^3[47]").expect("valid amex regex"))
}

#[derive(Debug, Default)]
struct CardFields {
    card_number: String,
    card_holder: String,
    expiry: String,
    cvv: String,
    forwarded: ForwardedSlots,
}

/// Credit card form.
#[derive(Debug, Default)]
pub struct CreditCardWidget {
    fields: RwLock<CardFields>,
}

impl CreditCardWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptor factory.
    pub fn build() -> Arc<dyn PaymentMethodWidget> {
        Arc::new(Self::new())
    }

    fn resolved(&self) -> CreditCardData {
        let f = self.fields.read().unwrap_or_else(|e| e.into_inner());
        CreditCardData {
            card_number: resolve_field(&f.forwarded, CARD_NUMBER_SLOT, &f.card_number),
            card_holder: resolve_field(&f.forwarded, CARD_HOLDER_SLOT, &f.card_holder),
            expiry: resolve_field(&f.forwarded, EXPIRY_SLOT, &f.expiry),
            cvv: resolve_field(&f.forwarded, CVV_SLOT, &f.cvv),
        }
    }

    /// American Express numbers start with 34 or 37.
    pub fn is_amex(&self) -> bool {
        let digits: String = self
            .resolved()
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        amex_regex().is_match(&digits)
    }

    /// Maximum CVV length for the current card number.
    pub fn cvv_max_length(&self) -> usize {
        if self.is_amex() {
            4
        } else {
            3
        }
    }
}

impl PaymentMethodWidget for CreditCardWidget {
    fn method(&self) -> PaymentMethodType {
        PaymentMethodType::CreditCard
    }

    fn validate(&self, t: &Translator) -> ValidationResult {
        let data = self.resolved();
        let mut errors = Vec::new();

        let number: String = data.card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if number.chars().count() < MIN_CARD_DIGITS {
            errors.push(t.translate("card.validation.invalidCardNumber"));
        }
        if data.card_holder.is_empty() {
            errors.push(t.translate("card.validation.holderRequired"));
        }
        if !expiry_regex().is_match(&data.expiry) {
            errors.push(t.translate("card.validation.invalidExpiry"));
        }
        if data.cvv.chars().count() < MIN_CVV_LEN {
            errors.push(t.translate("card.validation.invalidCvv"));
        }

        ValidationResult::from_errors(errors)
    }

    fn data(&self) -> Option<PaymentData> {
        Some(PaymentData::CreditCard(self.resolved()))
    }

    fn project(&self, slots: ForwardedSlots) {
        self.fields.write().unwrap_or_else(|e| e.into_inner()).forwarded = slots;
    }

    fn set_field(&self, field: &str, value: &str) -> bool {
        let mut f = self.fields.write().unwrap_or_else(|e| e.into_inner());
        let target = match field {
            "cardNumber" => &mut f.card_number,
            "cardHolder" => &mut f.card_holder,
            "expiry" => &mut f.expiry,
            "cvv" => &mut f.cvv,
            _ => return false,
        };
        *target = value.to_string();
        true
    }
}
