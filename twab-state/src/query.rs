//! Point-in-time and time-weighted average balance queries.

use crate::account::Account;
use crate::observation::Observation;
use twab_common::prelude::*;

impl<const N: usize> Account<N> {
    /// Delegate balance held at `time`; 0 before the first live observation.
    pub fn balance_at(&self, time: Timestamp) -> Balance {
        self.previous_or_at(time).balance
    }

    /// Observation describing the account at exactly `time`, interpolated
    /// from the latest live entry at or before it.
    pub fn observation_at(&self, time: Timestamp) -> Observation {
        self.previous_or_at(time).extrapolate(time)
    }

    /// Time-weighted average delegate balance over `[start, end]`.
    ///
    /// The accumulator delta is taken with wrapping subtraction, so wraps
    /// between the two bounds cancel out. A zero-width interval returns the
    /// balance at `start`; `start > end` is treated the same way.
    pub fn average_between(&self, start: Timestamp, end: Timestamp) -> Balance {
        let span = end.saturating_sub(start);
        if span == 0 {
            return self.balance_at(start);
        }
        let from = self.observation_at(start).cumulative_balance;
        let to = self.observation_at(end).cumulative_balance;
        to.wrapping_sub(from) / Balance::from(span)
    }
}
