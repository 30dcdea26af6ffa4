use serde::{Deserialize, Serialize};
use twab_common::prelude::*;

/// One entry of an account's balance history.
///
/// `balance` is the delegate balance held from `timestamp` until the next
/// entry. `cumulative_balance` is the wrapping sum of
/// `delegate_balance * elapsed` from genesis up to `timestamp`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Observation {
    pub cumulative_balance: CumulativeBalance,
    pub balance: Balance,
    pub timestamp: Timestamp,
}

impl Observation {
    pub fn new(cumulative_balance: CumulativeBalance, balance: Balance, timestamp: Timestamp) -> Self {
        Self {
            cumulative_balance,
            balance,
            timestamp,
        }
    }

    /// Zero-balance stand-in used when no live entry precedes a query time
    pub fn zero_at(timestamp: Timestamp) -> Self {
        Self::new(0, 0, timestamp)
    }

    /// Cumulative balance at `time`, assuming `balance` held since `timestamp`.
    ///
    /// Times before `timestamp` yield the stored accumulator unchanged.
    pub fn cumulative_at(&self, time: Timestamp) -> CumulativeBalance {
        accumulate(
            self.cumulative_balance,
            self.balance,
            time.saturating_sub(self.timestamp),
        )
    }

    /// Entry this observation would extend into at `time`, keeping its balance
    pub fn extrapolate(&self, time: Timestamp) -> Observation {
        Observation::new(self.cumulative_at(time), self.balance, time)
    }
}

/// Wrapping `cumulative + balance * elapsed` modulo 2^128
pub fn accumulate(
    cumulative: CumulativeBalance,
    balance: Balance,
    elapsed: Timestamp,
) -> CumulativeBalance {
    cumulative.wrapping_add(balance.wrapping_mul(CumulativeBalance::from(elapsed)))
}

impl TwabSerialize for Observation {
    fn preferred_encoding() -> EncodingType {
        EncodingType::Bincode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_at_accrues_balance() {
        let obs = Observation::new(500, 10, 100);
        assert_eq!(obs.cumulative_at(100), 500);
        assert_eq!(obs.cumulative_at(150), 1_000);
        // earlier times do not rewind the accumulator
        assert_eq!(obs.cumulative_at(50), 500);
    }

    #[test]
    fn test_accumulate_wraps() {
        assert_eq!(accumulate(u128::MAX, 1, 1), 0);
        assert_eq!(accumulate(0, u128::MAX, 2), u128::MAX - 1);
        assert_eq!(accumulate(7, 0, u64::MAX), 7);
    }

    #[test]
    fn test_extrapolate_keeps_balance() {
        let obs = Observation::new(0, 3, 10).extrapolate(20);
        assert_eq!(obs, Observation::new(30, 3, 20));
        assert_eq!(Observation::zero_at(42), Observation::new(0, 0, 42));
    }
}
