//! Method registry: the single source of truth for selectable payment methods.
//!
//! Each descriptor carries the static rendering metadata for a method and the
//! factory that builds its widget. The global registry is initialized once and
//! never mutated.

use crate::error::CheckoutError;
use crate::types::PaymentMethodType;
use crate::widgets::{CreditCardWidget, CryptoTronWidget, PaymentMethodWidget};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

/// Builds a fresh widget for a method.
pub type WidgetFactory = fn() -> Arc<dyn PaymentMethodWidget>;

/// Static configuration of one selectable payment method.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    /// Method identifier, unique within a registry
    pub method: PaymentMethodType,

    /// Translation key of the method's display name
    pub display_key: &'static str,

    /// Slot through which the host may replace the method's label
    pub slot_name: &'static str,

    /// Name of the region wrapping the method's form
    pub form_region: &'static str,

    /// Field slots the host may override, in display order
    pub field_slots: &'static [&'static str],

    /// Disabled methods are never exposed by `find` or `list`
    pub enabled: bool,

    pub factory: WidgetFactory,
}

impl MethodDescriptor {
    pub fn build_widget(&self) -> Arc<dyn PaymentMethodWidget> {
        (self.factory)()
    }
}

/// Ordered, immutable list of method descriptors.
#[derive(Debug)]
pub struct MethodRegistry {
    methods: Vec<MethodDescriptor>,
}

static REGISTRY: OnceLock<MethodRegistry> = OnceLock::new();

impl MethodRegistry {
    /// Build a registry, rejecting duplicate method ids.
    pub fn new(methods: Vec<MethodDescriptor>) -> Result<Self, CheckoutError> {
        let mut seen = HashSet::new();
        for descriptor in &methods {
            if !seen.insert(descriptor.method) {
                return Err(CheckoutError::config(format!(
                    "Duplicate payment method: '{}'",
                    descriptor.method
                )));
            }
        }
        Ok(Self { methods })
    }

    /// Get the global method registry instance.
    pub fn global() -> &'static MethodRegistry {
        REGISTRY.get_or_init(|| MethodRegistry {
            methods: default_methods(),
        })
    }

    pub fn find(&self, method: PaymentMethodType) -> Option<&MethodDescriptor> {
        self.methods
            .iter()
            .find(|d| d.enabled && d.method == method)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&MethodDescriptor> {
        id.parse().ok().and_then(|method| self.find(method))
    }

    /// Enabled methods in display order.
    pub fn list(&self) -> Vec<&MethodDescriptor> {
        self.methods.iter().filter(|d| d.enabled).collect()
    }

    /// All descriptors, including disabled ones.
    pub fn list_all(&self) -> Vec<&MethodDescriptor> {
        self.methods.iter().collect()
    }
}

fn default_methods() -> Vec<MethodDescriptor> {
    vec![
        MethodDescriptor {
            method: PaymentMethodType::CryptoTron,
            display_key: "payment.methods.stablecoin",
            slot_name: "option-crypto",
            form_region: "payment-form-crypto",
            field_slots: &["network-select", "currency-select"],
            enabled: true,
            factory: CryptoTronWidget::build,
        },
        MethodDescriptor {
            method: PaymentMethodType::CreditCard,
            display_key: "payment.methods.card",
            slot_name: "option-card",
            form_region: "payment-form-card",
            field_slots: &[
                "card-number-input",
                "card-holder-input",
                "expiry-input",
                "cvv-input",
            ],
            // Card processing is not live yet.
            enabled: false,
            factory: CreditCardWidget::build,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_returns_singleton() {
        assert!(std::ptr::eq(MethodRegistry::global(), MethodRegistry::global()));
    }

    #[test]
    fn test_find_returns_matching_descriptor() {
        let registry = MethodRegistry::global();
        for descriptor in registry.list() {
            let found = registry.find(descriptor.method).expect("listed method is findable");
            assert_eq!(found.method, descriptor.method);
        }
    }

    #[test]
    fn test_ids_are_distinct() {
        let all = MethodRegistry::global().list_all();
        let ids: HashSet<_> = all.iter().map(|d| d.method).collect();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_list_omits_disabled_methods() {
        let registry = MethodRegistry::global();
        let listed: Vec<_> = registry.list().iter().map(|d| d.method).collect();
        assert_eq!(listed, vec![PaymentMethodType::CryptoTron]);
        assert!(registry.find(PaymentMethodType::CreditCard).is_none());
        assert_eq!(registry.list_all().len(), 2);
    }

    #[test]
    fn test_find_by_id() {
        let registry = MethodRegistry::global();
        assert_eq!(
            registry.find_by_id("crypto_tron").map(|d| d.slot_name),
            Some("option-crypto")
        );
        assert!(registry.find_by_id("credit_card").is_none());
        assert!(registry.find_by_id("bogus").is_none());
    }

    #[test]
    fn test_crypto_descriptor_metadata() {
        let crypto = MethodRegistry::global()
            .find(PaymentMethodType::CryptoTron)
            .unwrap();
        assert_eq!(crypto.display_key, "payment.methods.stablecoin");
        assert_eq!(crypto.form_region, "payment-form-crypto");
        assert_eq!(crypto.field_slots, &["network-select", "currency-select"]);
        assert_eq!(crypto.build_widget().method(), PaymentMethodType::CryptoTron);
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let mut methods = default_methods();
        methods.push(methods[0].clone());
        let err = MethodRegistry::new(methods).unwrap_err();
        assert!(err.to_string().contains("Duplicate payment method"));
    }

    #[test]
    fn test_new_preserves_order() {
        let mut methods = default_methods();
        methods.iter_mut().for_each(|d| d.enabled = true);
        methods.reverse();
        let registry = MethodRegistry::new(methods).unwrap();
        let order: Vec<_> = registry.list().iter().map(|d| d.method).collect();
        assert_eq!(
            order,
            vec![PaymentMethodType::CreditCard, PaymentMethodType::CryptoTron]
        );
    }
}
