//! Common type definitions and constants used throughout the TWAB crates

/// Timestamp in seconds since Unix epoch
pub type Timestamp = u64;

/// A balance or delegate balance magnitude
pub type Balance = u128;

/// Running sum of `delegate_balance * elapsed_seconds`.
///
/// The accumulator wraps modulo 2^128. Interval deltas are recovered with
/// wrapping subtraction, which stays exact as long as the true cumulative
/// delta between the two bounds of a query fits in 128 bits.
pub type CumulativeBalance = u128;

/// Index of a period bucket; 0 is everything before the period offset
pub type PeriodIndex = u64;

/// Ring capacity used by the replay tooling (one year of daily periods).
pub const DEFAULT_CARDINALITY: usize = 365;

/// Period and time constants
pub mod period {
    use super::Timestamp;

    /// One hour in seconds
    pub const HOUR: Timestamp = 60 * 60;

    /// One day in seconds
    pub const DAY: Timestamp = 24 * HOUR;

    /// Default period length used when no configuration is supplied
    pub const DEFAULT_PERIOD_LENGTH: Timestamp = DAY;

    /// Default period anchor
    pub const DEFAULT_PERIOD_OFFSET: Timestamp = 0;
}
