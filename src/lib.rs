//! Orchestration core of an embeddable checkout widget.
//!
//! A [`PaymentOrchestrator`] owns method selection and submission state. It
//! forwards host-supplied field content into the active method widget, keeps
//! translatable text in sync with the current locale, and on submit runs
//! validate → extract → prepare → fetch config → build URL → navigate.

pub mod config;
pub mod content;
pub mod error;
pub mod i18n;
pub mod methods;
pub mod orchestrator;
pub mod prepare;
pub mod projection;
pub mod remote;
pub mod retry;
pub mod submission;
pub mod types;
pub mod widgets;

pub use config::WidgetConfig;
pub use content::{ContentNode, FieldValue, HostContent};
pub use error::{CheckoutError, ErrorKind};
pub use i18n::{Locale, TranslatableText, TranslationPropagator, Translator};
pub use methods::{MethodDescriptor, MethodRegistry};
pub use orchestrator::{
    CheckoutView, MethodChange, PaymentOrchestrator, SelectorSource, SubmissionState,
    SubmitIntent, SubmitOutcome, SubmitTarget,
};
pub use prepare::{HttpPrepareHandler, PrepareHandler};
pub use submission::Navigator;
pub use types::{PaymentData, PaymentMethodType, PrepareResult, ValidationResult};
