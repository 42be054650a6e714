use super::{resolve_field, PaymentMethodWidget};
use crate::i18n::Translator;
use crate::projection::ForwardedSlots;
use crate::types::{CryptoTronData, PaymentData, PaymentMethodType, ValidationResult};
use std::sync::{Arc, RwLock};

const NETWORK_SLOT: &str = "network-select";
const CURRENCY_SLOT: &str = "currency-select";

#[derive(Debug)]
struct CryptoFields {
    network: String,
    currency: String,
    forwarded: ForwardedSlots,
}

/// Stablecoin payment on the Tron network.
#[derive(Debug)]
pub struct CryptoTronWidget {
    fields: RwLock<CryptoFields>,
}

impl CryptoTronWidget {
    pub fn new() -> Self {
        Self {
            fields: RwLock::new(CryptoFields {
                network: "tron".to_string(),
                currency: "usdt".to_string(),
                forwarded: ForwardedSlots::default(),
            }),
        }
    }

    /// Descriptor factory.
    pub fn build() -> Arc<dyn PaymentMethodWidget> {
        Arc::new(Self::new())
    }

    fn resolved(&self) -> CryptoTronData {
        let fields = self.fields.read().unwrap_or_else(|e| e.into_inner());
        CryptoTronData {
            network: resolve_field(&fields.forwarded, NETWORK_SLOT, &fields.network),
            currency: resolve_field(&fields.forwarded, CURRENCY_SLOT, &fields.currency),
        }
    }
}

impl Default for CryptoTronWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentMethodWidget for CryptoTronWidget {
    fn method(&self) -> PaymentMethodType {
        PaymentMethodType::CryptoTron
    }

    fn validate(&self, t: &Translator) -> ValidationResult {
        let data = self.resolved();
        let mut errors = Vec::new();

        if data.network.trim().is_empty() {
            errors.push(t.translate("crypto.validation.networkRequired"));
        }
        if data.currency.trim().is_empty() {
            errors.push(t.translate("crypto.validation.currencyRequired"));
        }

        ValidationResult::from_errors(errors)
    }

    fn data(&self) -> Option<PaymentData> {
        Some(PaymentData::CryptoTron(self.resolved()))
    }

    fn project(&self, slots: ForwardedSlots) {
        self.fields.write().unwrap_or_else(|e| e.into_inner()).forwarded = slots;
    }

    fn set_field(&self, field: &str, value: &str) -> bool {
        let mut fields = self.fields.write().unwrap_or_else(|e| e.into_inner());
        match field {
            "network" => fields.network = value.to_string(),
            "currency" => fields.currency = value.to_string(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FieldValue;
    use crate::i18n::Locale;

    fn translator() -> Translator {
        Translator::new(Locale::EN_US, None)
    }

    #[test]
    fn test_defaults_are_valid() {
        let widget = CryptoTronWidget::new();
        assert!(widget.validate(&translator()).is_valid());
        assert_eq!(
            widget.data(),
            Some(PaymentData::CryptoTron(CryptoTronData {
                network: "tron".to_string(),
                currency: "usdt".to_string(),
            }))
        );
    }

    #[test]
    fn test_blank_fields_report_translated_errors() {
        let widget = CryptoTronWidget::new();
        widget.set_field("network", "");
        widget.set_field("currency", " ");

        let result = widget.validate(&translator());
        assert!(!result.is_valid());
        assert_eq!(
            result.errors(),
            ["Please select a network".to_string(), "Please select a currency".to_string()]
        );

        let zh = widget.validate(&Translator::new(Locale::ZH_TW, None));
        assert_eq!(zh.errors()[0], "請選擇網路");
    }

    #[test]
    fn test_forwarded_value_wins() {
        let widget = CryptoTronWidget::new();
        let mut slots = ForwardedSlots::default();
        slots.insert(NETWORK_SLOT, Some(FieldValue::new("tron-shasta")));
        widget.project(slots);

        match widget.data() {
            Some(PaymentData::CryptoTron(data)) => {
                assert_eq!(data.network, "tron-shasta");
                assert_eq!(data.currency, "usdt");
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_forwarded_slot_without_value_keeps_default() {
        let widget = CryptoTronWidget::new();
        let mut slots = ForwardedSlots::default();
        slots.insert(CURRENCY_SLOT, None);
        widget.project(slots);

        assert!(widget.validate(&translator()).is_valid());
    }

    #[test]
    fn test_cleared_forwarded_value_fails_validation() {
        let widget = CryptoTronWidget::new();
        let field = FieldValue::new("tron");
        let mut slots = ForwardedSlots::default();
        slots.insert(NETWORK_SLOT, Some(field.clone()));
        widget.project(slots);
        assert!(widget.validate(&translator()).is_valid());

        field.set("");
        let result = widget.validate(&translator());
        assert_eq!(result.errors(), ["Please select a network".to_string()]);
        match widget.data() {
            Some(PaymentData::CryptoTron(data)) => assert_eq!(data.network, ""),
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_set_field_unknown() {
        let widget = CryptoTronWidget::new();
        assert!(!widget.set_field("cardNumber", "4242"));
        assert_eq!(widget.method(), PaymentMethodType::CryptoTron);
    }
}
