//! Method widgets: the per-method forms the orchestrator validates and reads.
//!
//! The orchestrator only relies on the [`PaymentMethodWidget`] contract.
//! Widgets are built by the factory stored in each method descriptor.

mod card;
mod crypto;

pub use card::CreditCardWidget;
pub use crypto::CryptoTronWidget;

use crate::i18n::Translator;
use crate::projection::ForwardedSlots;
use crate::types::{PaymentData, PaymentMethodType, ValidationResult};
use std::fmt;

/// Contract every method widget satisfies.
///
/// `validate` and `data` must not touch orchestrator state. They may read the
/// widget's own fields, including values forwarded from host content.
pub trait PaymentMethodWidget: Send + Sync + fmt::Debug {
    fn method(&self) -> PaymentMethodType;

    /// Validate the current field values, producing translated messages.
    fn validate(&self, t: &Translator) -> ValidationResult;

    /// Extract the payment payload. `None` means nothing could be read.
    fn data(&self) -> Option<PaymentData>;

    /// Replace the set of slots forwarded from host content.
    fn project(&self, slots: ForwardedSlots);

    /// Set one of the widget's built-in fields by its field name.
    ///
    /// Returns `false` for unknown field names.
    fn set_field(&self, field: &str, value: &str) -> bool;
}

/// Forwarded value for `slot` when the projected content carries one, else
/// the built-in value. An empty forwarded value still wins.
fn resolve_field(forwarded: &ForwardedSlots, slot: &str, own: &str) -> String {
    forwarded
        .value(slot)
        .unwrap_or_else(|| own.to_string())
}
