// lib.rs - TWAB Core Library
//! # TWAB Core
//!
//! The collaborator layer around [`twab_state`]: it gives accounts names,
//! keeps one writer per account, and replays scripted balance changes.
//!
//! ## Architecture
//!
//! - **ReplayConfig**: period buckets and logging, loaded from TOML, YAML or JSON
//! - **Scenario**: ordered events and the queries to answer afterwards
//! - **AccountBook**: accounts keyed by name, sharing one period configuration
//!
//! ## Example
//!
//! ```
//! use twab_core::{AccountBook, Event, Query, QueryValue, Scenario};
//! use twab_state::PeriodConfig;
//!
//! let mut book = AccountBook::<16>::new(PeriodConfig::new(100, 0).unwrap());
//! let scenario = Scenario {
//!     events: vec![Event::Increase {
//!         account: "alice".to_string(),
//!         amount: 0,
//!         delegate_amount: 1_000,
//!         now: 1_000,
//!     }],
//!     queries: vec![Query::AverageBetween {
//!         account: "alice".to_string(),
//!         start: 950,
//!         end: 1_050,
//!     }],
//! };
//!
//! let report = book.replay(&scenario).unwrap();
//! assert_eq!(report.answers[0].result, QueryValue::Balance(500));
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

/// Account book and replay
pub mod book;

/// Configuration module
pub mod config;

/// Scenario scripts
pub mod scenario;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::book::{AccountBook, QueryAnswer, QueryValue, ReplayReport};
    pub use crate::config::ReplayConfig;
    pub use crate::scenario::{Event, Query, Scenario};
    // Re-export twab-common prelude
    pub use twab_common::prelude::*;
}

// Re-export main types at crate root
pub use book::{AccountBook, QueryAnswer, QueryValue, ReplayReport};
pub use config::ReplayConfig;
pub use scenario::{Event, Query, Scenario};

/// TWAB core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
