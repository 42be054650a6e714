use crate::error::CheckoutError;
use crate::i18n::{parse_translation_overrides, Locale, Overrides};
use crate::retry::RetryConfig;
use crate::types::PaymentMethodType;
use std::fmt;
use std::str::FromStr;

const DEFAULT_API_HOST: &str = "https://api.upos.fi";
const LIVE_KEY_PREFIX: &str = "pk_live_";

/// Environment an account's API calls go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Production,
    Test,
}

impl ApiMode {
    /// Live keys (`pk_live_*`) use production; every other key uses test.
    pub fn from_public_key(public_key: &str) -> Self {
        if public_key.starts_with(LIVE_KEY_PREFIX) {
            Self::Production
        } else {
            Self::Test
        }
    }
}

/// API host for a public key, overridable per mode through
/// `CHECKOUT_API_HOST_PROD` / `CHECKOUT_API_HOST_TEST`.
pub fn api_host_for(public_key: &str) -> String {
    let var = match ApiMode::from_public_key(public_key) {
        ApiMode::Production => "CHECKOUT_API_HOST_PROD",
        ApiMode::Test => "CHECKOUT_API_HOST_TEST",
    };
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
}

/// Verbosity of the widget's diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// `tracing` filter directive scoping this level to the crate.
    pub fn directive(&self) -> String {
        format!("checkout_orchestrator={}", self.as_str())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(CheckoutError::config(format!("Unknown log level: '{}'", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WidgetConfig {
    // Account
    pub public_key: Option<String>,
    pub api_host: Option<String>,

    // Behavior
    pub default_method: PaymentMethodType,
    pub log_level: LogLevel,
    pub config_fetch_retry: RetryConfig,

    // Localization
    pub locale: Locale,
    pub translations: Option<Overrides>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            public_key: None,
            api_host: None,
            default_method: PaymentMethodType::CryptoTron,
            log_level: LogLevel::default(),
            config_fetch_retry: RetryConfig::config_fetch(),
            locale: Locale::default(),
            translations: None,
        }
    }
}

impl WidgetConfig {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            ..Self::default()
        }
    }

    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = Some(host.into());
        self
    }

    pub fn with_default_method(mut self, method: PaymentMethodType) -> Self {
        self.default_method = method;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_translations(mut self, translations: Overrides) -> Self {
        self.translations = Some(translations);
        self
    }

    pub fn with_config_fetch_retry(mut self, retry: RetryConfig) -> Self {
        self.config_fetch_retry = retry;
        self
    }

    /// Read the configuration from `CHECKOUT_*` environment variables.
    ///
    /// A missing public key is not an error here; it is rejected when the
    /// widget connects.
    pub fn from_env() -> Result<Self, CheckoutError> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Ok(Self {
            // Account
            public_key: var("CHECKOUT_PUBLIC_KEY"),
            api_host: var("CHECKOUT_API_HOST"),

            // Behavior
            default_method: var("CHECKOUT_DEFAULT_METHOD")
                .map(|v| v.parse::<PaymentMethodType>())
                .transpose()?
                .unwrap_or(PaymentMethodType::CryptoTron),
            log_level: var("CHECKOUT_LOG_LEVEL")
                .map(|v| v.parse::<LogLevel>())
                .transpose()?
                .unwrap_or_default(),
            config_fetch_retry: RetryConfig::config_fetch(),

            // Localization
            locale: var("CHECKOUT_LOCALE")
                .map(|v| Locale::from_code(&v))
                .transpose()?
                .unwrap_or_default(),
            translations: var("CHECKOUT_TRANSLATIONS")
                .and_then(|raw| parse_translation_overrides(&raw)),
        })
    }

    /// Explicit API host, else the host derived from the public key.
    pub fn resolved_api_host(&self) -> Result<String, CheckoutError> {
        let host = match (&self.api_host, &self.public_key) {
            (Some(host), _) => host.clone(),
            (None, Some(key)) => api_host_for(key),
            (None, None) => {
                return Err(CheckoutError::config("Must provide either public-key or api-host"))
            }
        };

        let host = host.trim().trim_end_matches('/').to_string();
        if host.is_empty() {
            return Err(CheckoutError::config("No usable API host"));
        }
        Ok(host)
    }
}
