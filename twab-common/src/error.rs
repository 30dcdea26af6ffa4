//twab-common/src/error.rs
//! Standardized error types for all TWAB components

use crate::types::Balance;
use thiserror::Error;

/// Standard result type used throughout the TWAB crates
pub type TwabResult<T> = std::result::Result<T, TwabError>;

/// Comprehensive error type for all TWAB operations
#[derive(Error, Debug)]
pub enum TwabError {
    /// A decrease asked for more than the account's balance
    #[error("Insufficient balance for {reason}: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Balance held when the decrease was attempted
        available: Balance,
        /// Amount the caller tried to remove
        requested: Balance,
        /// Caller supplied context tag
        reason: String,
    },

    /// A decrease asked for more than the account's delegate balance
    #[error(
        "Insufficient delegate balance for {reason}: available {available}, requested {requested}"
    )]
    InsufficientDelegateBalance {
        /// Delegate balance held when the decrease was attempted
        available: Balance,
        /// Delegate amount the caller tried to remove
        requested: Balance,
        /// Caller supplied context tag
        reason: String,
    },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    IO(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// External library errors
    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl TwabError {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Whether this error is one of the two balance shortfalls raised by `decrease`
    pub fn is_insufficient(&self) -> bool {
        matches!(
            self,
            Self::InsufficientBalance { .. } | Self::InsufficientDelegateBalance { .. }
        )
    }
}

/// Convenience macro for creating TwabError instances
#[macro_export]
macro_rules! twab_error {
    ($variant:ident, $($arg:tt)*) => {
        $crate::error::TwabError::$variant(format!($($arg)*))
    };
}

/// Convenience macro for returning early with a TwabError
#[macro_export]
macro_rules! twab_bail {
    ($variant:ident, $($arg:tt)*) => {
        return Err($crate::twab_error!($variant, $($arg)*))
    };
}
