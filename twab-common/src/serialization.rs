//! Standard encoding patterns for persisted TWAB records
//!
//! Account snapshots prefer compact bincode, configuration and replay output
//! prefer JSON. Both go through [`TwabSerialize`] so callers never pick an
//! encoder by hand.

use crate::error::TwabError;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors produced while encoding or decoding a record
#[derive(Error, Debug)]
pub enum SerializationError {
    /// Bincode failure
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// JSON failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The decoded payload had the wrong number of elements
    #[error("Size validation error: expected {expected}, got {actual}")]
    InvalidSize {
        /// Element count the target type requires
        expected: usize,
        /// Element count found in the payload
        actual: usize,
    },
}

impl From<SerializationError> for TwabError {
    fn from(err: SerializationError) -> Self {
        TwabError::serialization(err.to_string())
    }
}

/// Standard encoding types used throughout the TWAB crates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingType {
    /// Compact binary encoding for account snapshots
    Bincode,
    /// Human-readable format for configuration and replay output
    Json,
}

/// Trait for standardized serialization across all TWAB types
pub trait TwabSerialize: Serialize + DeserializeOwned {
    /// Get the preferred encoding type for this data structure
    fn preferred_encoding() -> EncodingType;

    /// Serialize using the preferred encoding
    fn encode(&self) -> Result<Vec<u8>, SerializationError> {
        self.encode_as(Self::preferred_encoding())
    }

    /// Serialize using a specific encoding
    fn encode_as(&self, encoding: EncodingType) -> Result<Vec<u8>, SerializationError> {
        match encoding {
            EncodingType::Bincode => Ok(bincode::serialize(self)?),
            EncodingType::Json => Ok(serde_json::to_vec(self)?),
        }
    }

    /// Deserialize using the preferred encoding
    fn decode(bytes: &[u8]) -> Result<Self, SerializationError> {
        Self::decode_as(bytes, Self::preferred_encoding())
    }

    /// Deserialize using a specific encoding
    fn decode_as(bytes: &[u8], encoding: EncodingType) -> Result<Self, SerializationError> {
        match encoding {
            EncodingType::Bincode => Ok(bincode::deserialize(bytes)?),
            EncodingType::Json => Ok(serde_json::from_slice(bytes)?),
        }
    }

    /// Size of the encoded data in the preferred encoding, 0 if encoding fails
    fn encoded_size(&self) -> usize {
        self.encode().map(|v| v.len()).unwrap_or(0)
    }
}
