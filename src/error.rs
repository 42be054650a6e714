use thiserror::Error;

/// Broad category of a [`CheckoutError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Validation,
    Payment,
}

/// Errors raised by the checkout orchestration core.
///
/// - `Config` is an unrecoverable setup problem. It is returned from
///   construction and never caught by the submission boundary.
/// - `Validation` carries user-facing messages and is shown inline.
/// - `Payment` is a generic submission failure; it is reduced to its message
///   unless it was built with an explicit message list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("{0}")]
    Config(String),
    #[error("{message}")]
    Validation { message: String, errors: Vec<String> },
    #[error("{message}")]
    Payment { message: String, errors: Vec<String> },
}

impl CheckoutError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn validation(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }

    pub fn payment(message: impl Into<String>) -> Self {
        Self::Payment {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Payment error with an explicit list of messages to show.
    pub fn payment_with_errors(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::Payment {
            message: message.into(),
            errors,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Payment { .. } => ErrorKind::Payment,
        }
    }

    /// User-facing messages: the explicit list when present, otherwise the
    /// single top-level message.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation { errors, .. } | Self::Payment { errors, .. } if !errors.is_empty() => {
                errors.clone()
            }
            other => vec![other.to_string()],
        }
    }

    /// Reduce a host callback rejection to a checkout error.
    ///
    /// A rejection that is itself a `CheckoutError` is kept as is, so its
    /// message list survives; anything else collapses to a single message.
    pub fn from_rejection(error: anyhow::Error) -> Self {
        match error.downcast::<CheckoutError>() {
            Ok(checkout) => checkout,
            Err(other) => Self::payment(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
