//! # TWAB State
//!
//! Per-account balance history for time-weighted average balance (TWAB)
//! accounting. Each [`Account`] keeps its current balances plus a ring of `N`
//! [`Observation`]s, and answers two questions from that history alone:
//!
//! - what was the delegate balance at time `T` ([`Account::balance_at`])
//! - what was the average delegate balance between `T1` and `T2`
//!   ([`Account::average_between`])
//!
//! ## Architecture Overview
//!
//! ### Observation Store
//! - Fixed-capacity ring with `next_write_index` and `cardinality` cursors
//! - Append, overwrite-latest, oldest/newest lookup
//! - Two bisection searches over the wrapping index space
//!
//! ### Balance Accountant
//! - `increase` / `decrease` of balance and delegate balance
//! - One observation per period: same-period writes coalesce
//! - Shortfalls are rejected before any state changes
//!
//! ### Twab Query Engine
//! - Interpolation over a wrapping 128-bit cumulative accumulator
//!
//! ### Period Safety Checker
//! - Flags timestamps whose defining observation was coalesced or evicted
//!
//! Accounts are plain records: there is no registry here. Keying accounts and
//! serializing writers is left to the caller.
//!
//! ## Example Usage
//!
//! ```
//! use twab_state::{Account, PeriodConfig};
//!
//! let config = PeriodConfig::new(3_600, 0).unwrap();
//! let mut account = Account::<24>::new();
//!
//! account.increase(&config, 0, 1_000, 7_200);
//! account.decrease(&config, 0, 500, "transfer", 10_800).unwrap();
//!
//! assert_eq!(account.balance_at(9_000), 1_000);
//! assert_eq!(account.average_between(7_200, 14_400), 750);
//! assert!(account.is_time_safe(&config, 9_000));
//! ```

pub mod account;
pub mod accountant;
pub mod observation;
pub mod period;
pub mod query;
pub mod store;

pub use account::{Account, AccountDetails};
pub use accountant::ObservationUpdate;
pub use observation::Observation;
pub use period::PeriodConfig;

/// Account sized with the workspace default ring capacity
pub type DefaultAccount = Account<{ twab_common::types::DEFAULT_CARDINALITY }>;
