//! Decides which host-supplied field slots are forwarded into a method widget.
//!
//! Widgets ship default sub-fields. A slot is only forwarded when the host
//! actually supplied content for it; forwarding an empty slot would blank out
//! the widget's default field.

use crate::content::{FieldValue, HostContent, METHOD_SELECTOR_SLOT};
use crate::methods::MethodDescriptor;
use std::collections::BTreeMap;

/// Field slots forwarded into a widget, with the live value supplied for each.
#[derive(Debug, Clone, Default)]
pub struct ForwardedSlots {
    slots: BTreeMap<String, Option<FieldValue>>,
}

impl ForwardedSlots {
    pub fn insert(&mut self, slot: impl Into<String>, value: Option<FieldValue>) {
        self.slots.insert(slot.into(), value);
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots.contains_key(slot)
    }

    /// Current value of a forwarded slot, if the projected content carries one.
    pub fn value(&self, slot: &str) -> Option<String> {
        self.slots.get(slot).and_then(|v| v.as_ref()).map(FieldValue::get)
    }

    pub fn names(&self) -> Vec<&str> {
        self.slots.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Read-only view over the host content used for slot decisions.
pub struct ContentProjection<'a> {
    content: &'a HostContent,
}

impl<'a> ContentProjection<'a> {
    pub fn new(content: &'a HostContent) -> Self {
        Self { content }
    }

    pub fn has_external_content(&self, slot: &str) -> bool {
        self.content.has_slot(slot)
    }

    /// The descriptor's field slots that have host content, in descriptor order.
    pub fn forwardable_slots(&self, descriptor: &MethodDescriptor) -> Vec<&'static str> {
        descriptor
            .field_slots
            .iter()
            .copied()
            .filter(|slot| self.has_external_content(slot))
            .collect()
    }

    pub fn forward(&self, descriptor: &MethodDescriptor) -> ForwardedSlots {
        let mut forwarded = ForwardedSlots::default();
        for slot in self.forwardable_slots(descriptor) {
            forwarded.insert(slot, self.content.slot_value(slot));
        }
        forwarded
    }

    /// Whether the host projected its own method selector.
    pub fn has_custom_method_selector(&self) -> bool {
        !self.content.assigned(METHOD_SELECTOR_SLOT).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentNode;
    use crate::methods::MethodRegistry;
    use crate::types::PaymentMethodType;

    fn crypto() -> &'static MethodDescriptor {
        MethodRegistry::global()
            .find(PaymentMethodType::CryptoTron)
            .expect("crypto registered")
    }

    #[test]
    fn test_slot_without_content_is_not_forwarded() {
        let content = HostContent::default();
        let projection = ContentProjection::new(&content);

        assert!(!projection.has_external_content("network-select"));
        assert!(projection.forwardable_slots(crypto()).is_empty());
        assert!(projection.forward(crypto()).is_empty());
    }

    #[test]
    fn test_slot_with_content_is_forwarded() {
        let content = HostContent::new(vec![ContentNode::element("my-select")
            .with_slot("currency-select")
            .with_value(FieldValue::new("usdt"))]);
        let projection = ContentProjection::new(&content);

        assert_eq!(projection.forwardable_slots(crypto()), vec!["currency-select"]);

        let forwarded = projection.forward(crypto());
        assert!(forwarded.contains("currency-select"));
        assert!(!forwarded.contains("network-select"));
        assert_eq!(forwarded.value("currency-select").as_deref(), Some("usdt"));
    }

    #[test]
    fn test_forwarded_slot_without_value() {
        let content = HostContent::new(vec![ContentNode::element("span").with_slot("network-select")]);
        let forwarded = ContentProjection::new(&content).forward(crypto());

        assert!(forwarded.contains("network-select"));
        assert_eq!(forwarded.value("network-select"), None);
    }

    #[test]
    fn test_forwardable_slots_keep_descriptor_order() {
        let content = HostContent::new(vec![
            ContentNode::element("a").with_slot("currency-select"),
            ContentNode::element("b").with_slot("network-select"),
        ]);
        let projection = ContentProjection::new(&content);
        assert_eq!(
            projection.forwardable_slots(crypto()),
            vec!["network-select", "currency-select"]
        );
    }

    #[test]
    fn test_unrelated_slots_are_ignored() {
        let content = HostContent::new(vec![ContentNode::element("a").with_slot("cvv-input")]);
        assert!(ContentProjection::new(&content).forwardable_slots(crypto()).is_empty());
    }

    #[test]
    fn test_custom_method_selector_detection() {
        let empty = HostContent::default();
        assert!(!ContentProjection::new(&empty).has_custom_method_selector());

        let nested = HostContent::new(vec![ContentNode::element("div")
            .with_child(ContentNode::element("ul").with_slot(METHOD_SELECTOR_SLOT))]);
        assert!(!ContentProjection::new(&nested).has_custom_method_selector());

        let custom = HostContent::new(vec![ContentNode::element("ul").with_slot(METHOD_SELECTOR_SLOT)]);
        assert!(ContentProjection::new(&custom).has_custom_method_selector());
    }
}
