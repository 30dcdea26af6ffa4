//! Period buckets and the period safety check.
//!
//! A timestamp is *safe* when its balance can be reconstructed exactly from
//! the live ring: no write that could have changed it was coalesced away, and
//! the observation that defines it has not been evicted.

use crate::account::Account;
use serde::{Deserialize, Serialize};
use twab_common::prelude::*;
use twab_common::types::period::{DEFAULT_PERIOD_LENGTH, DEFAULT_PERIOD_OFFSET};

/// Anchor and width of the period buckets shared by every account of a history
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodConfig {
    /// Width of each period in seconds
    pub period_length: Timestamp,
    /// Start of period 1; everything earlier is period 0
    pub period_offset: Timestamp,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            period_length: DEFAULT_PERIOD_LENGTH,
            period_offset: DEFAULT_PERIOD_OFFSET,
        }
    }
}

impl PeriodConfig {
    /// Create a validated configuration
    pub fn new(period_length: Timestamp, period_offset: Timestamp) -> TwabResult<Self> {
        let config = Self {
            period_length,
            period_offset,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> TwabResult<()> {
        ValidationUtils::validate_period_length(self.period_length)
            .map_err(|e| TwabError::config(e.to_string()))
    }

    /// Period containing `timestamp`
    pub fn period(&self, timestamp: Timestamp) -> PeriodIndex {
        if timestamp < self.period_offset {
            return 0;
        }
        1 + (timestamp - self.period_offset) / self.period_length.max(1)
    }

    /// First second of `period`
    pub fn period_start(&self, period: PeriodIndex) -> Timestamp {
        if period == 0 {
            return 0;
        }
        self.period_offset
            .saturating_add((period - 1).saturating_mul(self.period_length))
    }

    /// First second after `period`
    pub fn period_end(&self, period: PeriodIndex) -> Timestamp {
        self.period_offset
            .saturating_add(period.saturating_mul(self.period_length))
    }
}

impl TwabSerialize for PeriodConfig {
    fn preferred_encoding() -> EncodingType {
        EncodingType::Json
    }
}

impl<const N: usize> Account<N> {
    /// Whether the balance at `time` is backed by unambiguous live observations.
    ///
    /// - An empty history is never safe.
    /// - Times at or after the newest observation are safe.
    /// - Times before the oldest observation are safe only while the ring has
    ///   not filled up and `time` lies in an earlier period than that entry.
    /// - Otherwise `time` is unsafe when the next observation after it sits in
    ///   the same period, since earlier writes of that period were folded into it.
    pub fn is_time_safe(&self, config: &PeriodConfig, time: Timestamp) -> bool {
        if self.is_empty() {
            return false;
        }
        let (_, newest) = self.newest();
        if time >= newest.timestamp {
            return true;
        }

        let period = config.period(time);
        let (_, oldest) = self.oldest();
        if time < oldest.timestamp {
            return !self.is_full() && period < config.period(oldest.timestamp);
        }

        let next = self.next_or_newest(time);
        next.timestamp == time || period < config.period(next.timestamp)
    }

    /// Both ends of `[start, end]` are time safe
    pub fn is_time_range_safe(&self, config: &PeriodConfig, start: Timestamp, end: Timestamp) -> bool {
        self.is_time_safe(config, start) && self.is_time_safe(config, end)
    }

    /// Whether the period holding `time` has ended by `now`, so no later write
    /// can coalesce into it.
    pub fn has_finalized(&self, config: &PeriodConfig, time: Timestamp, now: Timestamp) -> bool {
        config.period_end(config.period(time)) <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PeriodConfig {
        PeriodConfig::new(100, 1_000).unwrap()
    }

    #[test]
    fn test_period_buckets() {
        let config = config();
        assert_eq!(config.period(0), 0);
        assert_eq!(config.period(999), 0);
        assert_eq!(config.period(1_000), 1);
        assert_eq!(config.period(1_099), 1);
        assert_eq!(config.period(1_100), 2);
        assert_eq!(config.period(u64::MAX), 1 + (u64::MAX - 1_000) / 100);
    }

    #[test]
    fn test_period_bounds() {
        let config = config();
        assert_eq!(config.period_start(0), 0);
        assert_eq!(config.period_end(0), 1_000);
        assert_eq!(config.period_start(2), 1_100);
        assert_eq!(config.period_end(2), 1_200);
        for ts in [1_000, 1_050, 1_199, 4_321] {
            let p = config.period(ts);
            assert!(config.period_start(p) <= ts && ts < config.period_end(p));
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(PeriodConfig::new(0, 0).is_err());
        assert!(matches!(
            PeriodConfig::new(0, 5),
            Err(TwabError::Config(_))
        ));
        assert!(PeriodConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_history_is_never_safe() {
        let config = config();
        let account = Account::<4>::new();
        for period in 0..5 {
            assert!(!account.is_time_safe(&config, config.period_start(period)));
        }
    }

    #[test]
    fn test_single_observation() {
        let config = config();
        let mut account = Account::<4>::new();
        account.increase(&config, 0, 10, 1_050);

        // earlier writes in the observation's own period may have been folded in
        assert!(!account.is_time_safe(&config, 1_000));
        assert!(!account.is_time_safe(&config, 1_049));
        assert!(account.is_time_safe(&config, 900));
        assert!(account.is_time_safe(&config, 1_050));
        assert!(account.is_time_safe(&config, 2_000));
    }

    #[test]
    fn test_coalesced_period_is_unsafe() {
        let config = config();
        let mut account = Account::<8>::new();
        account.increase(&config, 0, 10, 1_010);
        account.increase(&config, 0, 10, 1_150);
        account.increase(&config, 0, 10, 1_180);
        account.increase(&config, 0, 10, 1_300);
        assert_eq!(account.cardinality(), 3);

        assert!(account.is_time_safe(&config, 1_050));
        assert!(!account.is_time_safe(&config, 1_100));
        assert!(!account.is_time_safe(&config, 1_160));
        assert!(account.is_time_safe(&config, 1_180));
        assert!(account.is_time_safe(&config, 1_200));
        assert!(account.is_time_safe(&config, 1_250));
        assert!(account.is_time_safe(&config, 1_300));

        assert!(account.is_time_range_safe(&config, 1_050, 1_200));
        assert!(!account.is_time_range_safe(&config, 1_050, 1_160));
    }

    #[test]
    fn test_evicted_periods_become_unsafe() {
        let config = config();
        let mut account = Account::<3>::new();
        account.increase(&config, 0, 10, 1_010);
        account.increase(&config, 0, 10, 1_110);
        assert!(account.is_time_safe(&config, 900));
        assert!(account.is_time_safe(&config, 1_050));

        account.increase(&config, 0, 10, 1_210);
        account.increase(&config, 0, 10, 1_310);
        assert_eq!(account.oldest().1.timestamp, 1_110);

        // the observation defining period 1 is gone
        assert!(!account.is_time_safe(&config, 1_050));
        assert!(!account.is_time_safe(&config, 900));
        assert!(account.is_time_safe(&config, 1_150));
    }

    #[test]
    fn test_has_finalized() {
        let config = config();
        let account = Account::<2>::new();
        assert!(account.has_finalized(&config, 1_050, 1_100));
        assert!(!account.has_finalized(&config, 1_050, 1_099));
        assert!(account.has_finalized(&config, 10, 1_000));
    }
}
