//! Internationalization for the checkout widget.
//!
//! # Architecture
//!
//! - `locale`: registry of supported locales and the validated `Locale` type
//! - `strings`: built-in dot-notation string tables
//! - `translator`: fallback chain, `{{name}}` interpolation and the
//!   `TranslationContext` recomputed on locale/override changes
//! - `propagator`: registered translatable leaves and translator fan-out
//!
//! # Example
//!
//! ```rust,ignore
//! use checkout_orchestrator::i18n::{Locale, TranslationContext};
//!
//! let ctx = TranslationContext::new(Locale::from_code("zh-TW")?, None);
//! assert_eq!(ctx.t("payment.submit"), "付款");
//! ```

mod locale;
mod propagator;
mod strings;
mod translator;

pub use locale::{Locale, LocaleConfig, LocaleRegistry};
pub use propagator::{LeafHandle, LeafId, TranslatableText, TranslationPropagator};
pub use translator::{
    interpolate, parse_translation_overrides, Overrides, TranslationContext, TranslationParams,
    Translator,
};
