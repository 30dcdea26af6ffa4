//! Named accounts sharing one period configuration.
//!
//! The book is the single writer for every account it holds: events are
//! applied one at a time and each account's `now` must not move backwards.

use crate::scenario::{Event, Query, Scenario};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use twab_common::prelude::*;
use twab_state::{Account, ObservationUpdate, PeriodConfig};

/// Result of a single query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Balance(Balance),
    Safe(bool),
}

/// A query paired with its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryAnswer {
    pub query: Query,
    pub result: QueryValue,
}

/// An event the accountant refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Position of the event in the scenario
    pub index: usize,
    pub error: String,
}

/// Outcome of replaying a scenario
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub applied: usize,
    pub recorded: usize,
    pub rejected: Vec<Rejection>,
    pub answers: Vec<QueryAnswer>,
}

#[derive(Debug, Clone, Default)]
struct Entry<const N: usize> {
    account: Account<N>,
    last_write: Option<Timestamp>,
}

/// Accounts keyed by name, each with a ring of `N` observations
#[derive(Debug, Clone)]
pub struct AccountBook<const N: usize> {
    config: PeriodConfig,
    accounts: BTreeMap<String, Entry<N>>,
}

impl<const N: usize> AccountBook<N> {
    pub fn new(config: PeriodConfig) -> Self {
        Self {
            config,
            accounts: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &PeriodConfig {
        &self.config
    }

    pub fn account(&self, key: &str) -> Option<&Account<N>> {
        self.accounts.get(key).map(|e| &e.account)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Apply one mutation.
    ///
    /// A `now` earlier than the account's previous write is rejected with a
    /// validation error before the account is touched.
    pub fn apply(&mut self, event: &Event) -> TwabResult<ObservationUpdate> {
        let key = event.account();
        ValidationUtils::validate_account_key(key)?;
        if let Some(last) = self.accounts.get(key).and_then(|e| e.last_write) {
            ValidationUtils::validate_monotonic(last, event.now())?;
        }

        let mut entry = self.accounts.remove(key).unwrap_or_default();
        let applied = match event {
            Event::Increase {
                amount,
                delegate_amount,
                now,
                ..
            } => Ok(entry.account.increase(
                &self.config,
                Balance::from(*amount),
                Balance::from(*delegate_amount),
                *now,
            )),
            Event::Decrease {
                amount,
                delegate_amount,
                reason,
                now,
                ..
            } => entry.account.decrease(
                &self.config,
                Balance::from(*amount),
                Balance::from(*delegate_amount),
                reason,
                *now,
            ),
        };
        let update = match applied {
            Ok(update) => update,
            Err(err) => {
                // a refused first event leaves no account behind
                if entry.last_write.is_some() {
                    self.accounts.insert(key.to_string(), entry);
                }
                return Err(err);
            }
        };
        entry.last_write = Some(event.now());
        self.accounts.insert(key.to_string(), entry);

        debug!(
            account = key,
            now = event.now(),
            is_new = update.is_new,
            is_recorded = update.is_recorded,
            "Applied event"
        );
        Ok(update)
    }

    /// Answer a query; unknown accounts behave as empty histories
    pub fn answer(&self, query: &Query) -> QueryValue {
        let empty;
        let account = match self.account(query.account()) {
            Some(account) => account,
            None => {
                empty = Account::<N>::new();
                &empty
            }
        };

        match *query {
            Query::BalanceAt { time, .. } => QueryValue::Balance(account.balance_at(time)),
            Query::AverageBetween { start, end, .. } => {
                QueryValue::Balance(account.average_between(start, end))
            }
            Query::IsTimeSafe { time, .. } => {
                QueryValue::Safe(account.is_time_safe(&self.config, time))
            }
            Query::IsTimeRangeSafe { start, end, .. } => {
                QueryValue::Safe(account.is_time_range_safe(&self.config, start, end))
            }
        }
    }

    /// Apply every event in order, then answer every query.
    ///
    /// Balance shortfalls are collected in the report and replay continues;
    /// any other error aborts the replay.
    pub fn replay(&mut self, scenario: &Scenario) -> TwabResult<ReplayReport> {
        scenario.validate()?;
        let mut report = ReplayReport::default();

        for (index, event) in scenario.events.iter().enumerate() {
            match self.apply(event) {
                Ok(update) => {
                    report.applied += 1;
                    if update.is_recorded {
                        report.recorded += 1;
                    }
                }
                Err(err) if err.is_insufficient() => {
                    warn!(index, error = %err, "Event rejected");
                    report.rejected.push(Rejection {
                        index,
                        error: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        report.answers = scenario
            .queries
            .iter()
            .map(|query| QueryAnswer {
                query: query.clone(),
                result: self.answer(query),
            })
            .collect();

        info!(
            accounts = self.len(),
            applied = report.applied,
            rejected = report.rejected.len(),
            answered = report.answers.len(),
            "Replay finished"
        );
        Ok(report)
    }

    /// Clone of every account, keyed by name
    pub fn snapshot(&self) -> BTreeMap<String, Account<N>> {
        self.accounts
            .iter()
            .map(|(key, entry)| (key.clone(), entry.account.clone()))
            .collect()
    }
}
