//! Translation function and context.
//!
//! Resolution order for a key: host overrides, active locale, default locale,
//! then the empty string. `{{name}}` placeholders are substituted only when
//! the caller supplies parameters.

use crate::i18n::locale::{Locale, LocaleRegistry};
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::warn;

/// Host-supplied translation overrides keyed by dot-notation key.
pub type Overrides = HashMap<String, String>;

/// Interpolation parameters.
pub type TranslationParams = HashMap<String, String>;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder regex"))
}

/// Replace every `{{name}}` with `params[name]`, or the empty string.
pub fn interpolate(template: &str, params: &TranslationParams) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &regex::Captures<'_>| {
            params.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

/// Override, then active table, then default table, then "".
fn resolve<'a>(
    key: &str,
    overrides: Option<&'a Overrides>,
    active: impl Fn(&str) -> Option<&'a str>,
    default: impl Fn(&str) -> Option<&'a str>,
) -> String {
    overrides
        .and_then(|o| o.get(key))
        .map(String::as_str)
        .or_else(|| active(key))
        .or_else(|| default(key))
        .unwrap_or_default()
        .to_string()
}

/// Cheaply cloneable translation function bound to a locale and overrides.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    locale: Locale,
    overrides: Option<Arc<Overrides>>,
}

impl Translator {
    pub fn new(locale: Locale, overrides: Option<Arc<Overrides>>) -> Self {
        Self { locale, overrides }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Resolve the raw template for `key`.
    pub fn translate(&self, key: &str) -> String {
        let registry = LocaleRegistry::get();
        resolve(
            key,
            self.overrides.as_deref(),
            |k| registry.lookup(self.locale.code(), k),
            |k| registry.lookup(Locale::fallback().code(), k),
        )
    }

    /// Resolve `key` and substitute `{{name}}` placeholders from `params`.
    pub fn translate_with(&self, key: &str, params: &TranslationParams) -> String {
        interpolate(&self.translate(key), params)
    }
}

/// Current locale, overrides and the translator derived from them.
#[derive(Debug, Clone, Default)]
pub struct TranslationContext {
    locale: Locale,
    overrides: Option<Arc<Overrides>>,
    translator: Translator,
}

impl TranslationContext {
    pub fn new(locale: Locale, overrides: Option<Overrides>) -> Self {
        let overrides = overrides.map(Arc::new);
        Self {
            locale,
            translator: Translator::new(locale, overrides.clone()),
            overrides,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn overrides(&self) -> Option<&Overrides> {
        self.overrides.as_deref()
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.translate(key)
    }
}

/// Parse overrides supplied as a JSON object string.
///
/// Invalid JSON is logged and ignored rather than failing the widget.
pub fn parse_translation_overrides(raw: &str) -> Option<Overrides> {
    if raw.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<Overrides>(raw) {
        Ok(overrides) => Some(overrides),
        Err(e) => {
            warn!("Invalid translations JSON ({}): {}", e, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn overrides(pairs: &[(&str, &str)]) -> Overrides {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn params(pairs: &[(&str, &str)]) -> TranslationParams {
        overrides(pairs)
    }

    // ==================== Fallback Chain Tests ====================

    #[test]
    fn test_override_wins_over_locale() {
        let t = Translator::new(
            Locale::ZH_TW,
            Some(Arc::new(overrides(&[("payment.submit", "Checkout")]))),
        );
        assert_eq!(t.translate("payment.submit"), "Checkout");
    }

    #[test]
    fn test_active_locale_wins_over_default() {
        let t = Translator::new(Locale::ZH_TW, None);
        assert_eq!(t.translate("payment.submit"), "付款");
    }

    #[test]
    fn test_falls_back_to_default_locale() {
        let t = Translator::new(Locale::ZH_TW, None);
        assert_eq!(t.translate("payment.errors.noMethod"), "No payment method available");
    }

    #[test]
    fn test_missing_key_is_empty() {
        let t = Translator::new(Locale::EN_US, Some(Arc::new(overrides(&[("a", "X")]))));
        assert_eq!(t.translate("missing"), "");
    }

    #[test]
    fn test_full_chain() {
        // override {a: X}; active locale has payment.submit; default has the no-method text
        let t = Translator::new(Locale::ZH_TW, Some(Arc::new(overrides(&[("a", "X")]))));
        assert_eq!(t.translate("a"), "X");
        assert_eq!(t.translate("payment.submit"), "付款");
        assert_eq!(t.translate("payment.errors.noMethod"), "No payment method available");
        assert_eq!(t.translate("missing"), "");
    }

    #[test]
    fn test_chain_over_three_tables() {
        let locale: HashMap<&str, &str> = HashMap::from([("a", "Y"), ("b", "Z")]);
        let default: HashMap<&str, &str> = HashMap::from([("b", "W"), ("c", "V")]);
        let custom = overrides(&[("a", "X")]);
        let t = |key: &str| {
            resolve(
                key,
                Some(&custom),
                |k| locale.get(k).copied(),
                |k| default.get(k).copied(),
            )
        };

        assert_eq!(t("a"), "X");
        assert_eq!(t("b"), "Z");
        assert_eq!(t("c"), "V");
        assert_eq!(t("missing"), "");
    }

    // ==================== Interpolation Tests ====================

    #[test]
    fn test_interpolation_substitutes_params() {
        let t = Translator::new(Locale::EN_US, Some(Arc::new(overrides(&[("greet", "Hello {{name}}")]))));
        assert_eq!(t.translate_with("greet", &params(&[("name", "Sam")])), "Hello Sam");
    }

    #[test]
    fn test_interpolation_missing_param_is_empty() {
        let t = Translator::new(Locale::EN_US, Some(Arc::new(overrides(&[("greet", "Hello {{name}}")]))));
        assert_eq!(t.translate_with("greet", &TranslationParams::new()), "Hello ");
    }

    #[test]
    fn test_no_params_leaves_template_untouched() {
        let t = Translator::new(Locale::EN_US, Some(Arc::new(overrides(&[("greet", "Hello {{name}}")]))));
        assert_eq!(t.translate("greet"), "Hello {{name}}");
    }

    #[test]
    fn test_interpolation_multiple_placeholders() {
        let result = interpolate(
            "{{count}} items for {{name}}, {{count}} total",
            &params(&[("count", "3"), ("name", "Sam")]),
        );
        assert_eq!(result, "3 items for Sam, 3 total");
    }

    proptest! {
        #[test]
        fn prop_templates_without_braces_are_unchanged(template in "[^{}]*") {
            prop_assert_eq!(interpolate(&template, &TranslationParams::new()), template);
        }

        #[test]
        fn prop_single_placeholder_is_replaced(
            prefix in "[a-zA-Z ]{0,10}",
            name in "[a-z_]{1,8}",
            value in "[a-zA-Z0-9 ]{0,10}",
        ) {
            let template = format!("{}{{{{{}}}}}", prefix, name);
            let result = interpolate(&template, &params(&[(name.as_str(), value.as_str())]));
            prop_assert_eq!(result, format!("{}{}", prefix, value));
        }
    }

    // ==================== Context Tests ====================

    #[test]
    fn test_context_exposes_locale_and_overrides() {
        let ctx = TranslationContext::new(Locale::ZH_TW, Some(overrides(&[("payment.submit", "Go")])));
        assert_eq!(ctx.locale(), Locale::ZH_TW);
        assert_eq!(ctx.overrides().unwrap().get("payment.submit").unwrap(), "Go");
        assert_eq!(ctx.t("payment.submit"), "Go");
        assert_eq!(ctx.translator().locale(), Locale::ZH_TW);
    }

    // ==================== Override Parsing Tests ====================

    #[test]
    fn test_parse_overrides_valid() {
        let parsed = parse_translation_overrides(r#"{"payment.submit": "Buy now"}"#).unwrap();
        assert_eq!(parsed.get("payment.submit").unwrap(), "Buy now");
    }

    #[test]
    fn test_parse_overrides_invalid_is_ignored() {
        assert!(parse_translation_overrides("{not json").is_none());
        assert!(parse_translation_overrides(r#"{"a": 1}"#).is_none());
        assert!(parse_translation_overrides("   ").is_none());
    }
}
