//! Balance mutations and the write policy that feeds the observation ring.
//!
//! Only delegate balance changes produce history. Within one period every
//! change is folded into the newest observation; the first change in a new
//! period appends a fresh one, so the ring grows by at most one entry per
//! period.

use crate::account::Account;
use crate::observation::{accumulate, Observation};
use crate::period::PeriodConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;
use twab_common::prelude::*;

/// Outcome of a balance mutation
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObservationUpdate {
    /// Observation written or updated; zero when nothing was recorded
    pub observation: Observation,
    /// A new slot was appended rather than coalesced into the newest one
    pub is_new: bool,
    /// Any observation activity happened at all
    pub is_recorded: bool,
}

impl ObservationUpdate {
    fn unrecorded() -> Self {
        Self::default()
    }
}

impl<const N: usize> Account<N> {
    /// Add `amount` to the balance and `delegate_amount` to the delegate balance at `now`.
    ///
    /// Counters saturate at `Balance::MAX`.
    pub fn increase(
        &mut self,
        config: &PeriodConfig,
        amount: Balance,
        delegate_amount: Balance,
        now: Timestamp,
    ) -> ObservationUpdate {
        self.details.balance = self.details.balance.saturating_add(amount);
        if delegate_amount == 0 {
            return ObservationUpdate::unrecorded();
        }
        let delegate_balance = self.details.delegate_balance.saturating_add(delegate_amount);
        self.record(config, delegate_balance, now)
    }

    /// Remove `amount` from the balance and `delegate_amount` from the delegate balance at `now`.
    ///
    /// Both shortfalls are checked before anything changes, so a failed call
    /// leaves the account untouched. `reason` is echoed back in the error.
    pub fn decrease(
        &mut self,
        config: &PeriodConfig,
        amount: Balance,
        delegate_amount: Balance,
        reason: &str,
        now: Timestamp,
    ) -> TwabResult<ObservationUpdate> {
        let details = self.details;
        if amount > details.balance {
            warn!(
                available = %details.balance,
                requested = %amount,
                reason,
                "Rejected decrease: insufficient balance"
            );
            return Err(TwabError::InsufficientBalance {
                available: details.balance,
                requested: amount,
                reason: reason.to_string(),
            });
        }
        if delegate_amount > details.delegate_balance {
            warn!(
                available = %details.delegate_balance,
                requested = %delegate_amount,
                reason,
                "Rejected decrease: insufficient delegate balance"
            );
            return Err(TwabError::InsufficientDelegateBalance {
                available: details.delegate_balance,
                requested: delegate_amount,
                reason: reason.to_string(),
            });
        }

        self.details.balance = details.balance - amount;
        if delegate_amount == 0 {
            return Ok(ObservationUpdate::unrecorded());
        }
        Ok(self.record(config, details.delegate_balance - delegate_amount, now))
    }

    /// Accrue the previous delegate balance up to `now`, then append or coalesce.
    fn record(
        &mut self,
        config: &PeriodConfig,
        delegate_balance: Balance,
        now: Timestamp,
    ) -> ObservationUpdate {
        let (_, newest) = self.newest();
        let observation = Observation::new(
            accumulate(
                newest.cumulative_balance,
                self.details.delegate_balance,
                now.saturating_sub(newest.timestamp),
            ),
            delegate_balance,
            now,
        );

        let is_new = self.is_empty() || config.period(now) != config.period(newest.timestamp);
        if is_new {
            self.append(observation);
        } else {
            self.overwrite_latest(observation);
        }
        self.details.delegate_balance = delegate_balance;

        ObservationUpdate {
            observation,
            is_new,
            is_recorded: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{init_tracing, test_config};

    #[test]
    fn test_first_increase_appends() {
        init_tracing();
        let config = test_config();
        let mut account = Account::<4>::new();

        let update = account.increase(&config, 0, 1_000, 1_000);
        assert!(update.is_new);
        assert!(update.is_recorded);
        assert_eq!(update.observation, Observation::new(0, 1_000, 1_000));
        assert_eq!(account.cardinality(), 1);
        assert_eq!(account.delegate_balance(), 1_000);
        assert_eq!(account.balance(), 0);
    }

    #[test]
    fn test_balance_only_change_is_not_recorded() {
        let config = test_config();
        let mut account = Account::<4>::new();

        let update = account.increase(&config, 50, 0, 1_000);
        assert_eq!(update, ObservationUpdate::default());
        assert!(!update.is_recorded);
        assert_eq!(account.balance(), 50);
        assert!(account.is_empty());

        let update = account.decrease(&config, 20, 0, "burn", 1_010).unwrap();
        assert!(!update.is_recorded);
        assert_eq!(account.balance(), 30);
        assert!(account.is_empty());
    }

    #[test]
    fn test_same_period_coalesces() {
        let config = test_config();
        let mut account = Account::<4>::new();

        account.increase(&config, 0, 100, 1_000);
        let update = account.increase(&config, 0, 100, 1_050);
        assert!(!update.is_new);
        assert!(update.is_recorded);
        assert_eq!(update.observation, Observation::new(100 * 50, 200, 1_050));
        assert_eq!(account.cardinality(), 1);
        assert_eq!(account.newest().1, update.observation);
    }

    #[test]
    fn test_new_periods_grow_until_capacity() {
        let config = test_config();
        let mut account = Account::<3>::new();

        let mut cardinalities = Vec::new();
        for (i, now) in [1_000, 1_100, 1_200, 1_300, 1_400].into_iter().enumerate() {
            let update = account.increase(&config, 0, 1, now);
            assert!(update.is_new, "write {} should append", i);
            cardinalities.push(account.cardinality());
        }
        assert_eq!(cardinalities, vec![1, 2, 3, 3, 3]);
        assert_eq!(account.next_write_index(), 2);
        assert_eq!(account.oldest().1.timestamp, 1_200);
        // counters are not bounded by the ring
        assert_eq!(account.delegate_balance(), 5);
    }

    #[test]
    fn test_cumulative_tracks_previous_delegate_balance() {
        let config = test_config();
        let mut account = Account::<8>::new();

        account.increase(&config, 0, 10, 1_000);
        account.increase(&config, 0, 5, 1_100);
        let update = account.decrease(&config, 0, 15, "exit", 1_300).unwrap();
        assert_eq!(update.observation.cumulative_balance, 10 * 100 + 15 * 200);
        assert_eq!(update.observation.balance, 0);
        assert_eq!(account.cardinality(), 3);
    }

    #[test]
    fn test_decrease_beyond_balance_fails_atomically() {
        let config = test_config();
        let mut account = Account::<4>::new();
        account.increase(&config, 100, 100, 1_000);
        let before = account.clone();

        match account.decrease(&config, 150, 10, "withdraw", 1_100) {
            Err(TwabError::InsufficientBalance {
                available,
                requested,
                reason,
            }) => {
                assert_eq!(available, 100);
                assert_eq!(requested, 150);
                assert_eq!(reason, "withdraw");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(account, before);
    }

    #[test]
    fn test_decrease_beyond_delegate_balance_fails_atomically() {
        let config = test_config();
        let mut account = Account::<4>::new();
        account.increase(&config, 100, 50, 1_000);
        let before = account.clone();

        match account.decrease(&config, 10, 60, "undelegate", 1_100) {
            Err(TwabError::InsufficientDelegateBalance {
                available,
                requested,
                reason,
            }) => {
                assert_eq!(available, 50);
                assert_eq!(requested, 60);
                assert_eq!(reason, "undelegate");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        // the balance part of the call must not have been applied either
        assert_eq!(account, before);
        assert_eq!(account.balance(), 100);
    }

    #[test]
    fn test_increase_saturates_counters() {
        let config = test_config();
        let mut account = Account::<2>::new();
        account.increase(&config, Balance::MAX, Balance::MAX, 1_000);
        account.increase(&config, 1, 1, 1_000);
        assert_eq!(account.balance(), Balance::MAX);
        assert_eq!(account.delegate_balance(), Balance::MAX);
    }
}
