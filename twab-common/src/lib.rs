//! # TWAB Common
//!
//! Common types, errors and standardized patterns shared by the TWAB crates.
//! This crate is the single source of truth for the scalar widths used by the
//! observation ring, so the state and replay crates never disagree on them.
//!
//! ## Modules
//!
//! - **error**: The [`TwabError`](error::TwabError) enum and result alias
//! - **serialization**: Standardized encoding/decoding for persisted snapshots
//! - **types**: Scalar type aliases and constants
//! - **validation**: Input validation utilities
//!
//! ## Example Usage
//!
//! ```rust
//! use twab_common::prelude::*;
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Checkpoint {
//!     at: Timestamp,
//!     balance: Balance,
//! }
//!
//! impl TwabSerialize for Checkpoint {
//!     fn preferred_encoding() -> EncodingType {
//!         EncodingType::Bincode
//!     }
//! }
//!
//! let checkpoint = Checkpoint { at: 86_400, balance: 1_000 };
//! let encoded = checkpoint.encode().unwrap();
//! assert_eq!(Checkpoint::decode(&encoded).unwrap(), checkpoint);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod serialization;
pub mod types;
pub mod validation;

/// Re-export commonly used types and traits
pub mod prelude {
    pub use crate::error::{TwabError, TwabResult};
    pub use crate::serialization::{EncodingType, SerializationError, TwabSerialize};
    pub use crate::types::{
        Balance, CumulativeBalance, PeriodIndex, Timestamp, DEFAULT_CARDINALITY,
    };
    pub use crate::validation::ValidationUtils;

    // Re-export essential external crates
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
}

/// TWAB Common crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
