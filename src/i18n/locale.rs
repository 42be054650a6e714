//! Locale registry and the validated `Locale` type.
//!
//! The registry is a lazily initialized singleton (`OnceLock`) holding every
//! supported locale together with its string table.

use crate::error::CheckoutError;
use crate::i18n::strings;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// BCP 47 tag (e.g., "en-US", "zh-TW")
    pub code: &'static str,

    /// English name of the locale
    pub name: &'static str,

    /// Native name of the locale
    pub native_name: &'static str,

    /// Whether this is the default locale, the last step of the fallback chain
    pub is_default: bool,

    /// Flat dot-notation string table
    pub table: &'static [(&'static str, &'static str)],
}

struct LocaleEntry {
    config: LocaleConfig,
    strings: HashMap<&'static str, &'static str>,
}

/// Global locale registry singleton.
pub struct LocaleRegistry {
    locales: Vec<LocaleEntry>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales()
                .into_iter()
                .map(|config| LocaleEntry {
                    strings: config.table.iter().copied().collect(),
                    config,
                })
                .collect(),
        })
    }

    /// Get a locale configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.entry(code).map(|entry| &entry.config)
    }

    /// All supported locales, in registration order.
    pub fn list(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().map(|entry| &entry.config).collect()
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if the built-in table does not define exactly one default locale.
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|entry| entry.config.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => &defaults[0].config,
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Look up a raw template in one locale's table.
    pub fn lookup(&self, code: &str, key: &str) -> Option<&'static str> {
        self.entry(code)
            .and_then(|entry| entry.strings.get(key).copied())
    }

    fn entry(&self, code: &str) -> Option<&LocaleEntry> {
        self.locales.iter().find(|entry| entry.config.code == code)
    }
}

fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en-US",
            name: "English (US)",
            native_name: "English",
            is_default: true,
            table: strings::EN_US,
        },
        LocaleConfig {
            code: "zh-TW",
            name: "Traditional Chinese (Taiwan)",
            native_name: "繁體中文",
            is_default: false,
            table: strings::ZH_TW,
        },
    ]
}

/// A locale validated against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    pub const EN_US: Locale = Locale { code: "en-US" };
    pub const ZH_TW: Locale = Locale { code: "zh-TW" };

    /// Create a Locale from its code.
    ///
    /// Unknown codes are a configuration error.
    pub fn from_code(code: &str) -> Result<Locale, CheckoutError> {
        LocaleRegistry::get()
            .get_by_code(code)
            .map(|config| Locale { code: config.code })
            .ok_or_else(|| CheckoutError::config(format!("Unsupported locale: '{}'", code)))
    }

    /// The final fallback locale.
    pub fn fallback() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn is_default(&self) -> bool {
        *self == Self::fallback()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
