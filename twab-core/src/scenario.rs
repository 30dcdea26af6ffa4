//! Event and query scripts replayed against an [`AccountBook`](crate::book::AccountBook).
//!
//! Amounts in scenario files are 64-bit; they widen to [`Balance`] when applied.

use serde::{Deserialize, Serialize};
use std::path::Path;
use twab_common::prelude::*;

/// A balance mutation for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Event {
    Increase {
        account: String,
        #[serde(default)]
        amount: u64,
        #[serde(default)]
        delegate_amount: u64,
        now: Timestamp,
    },
    Decrease {
        account: String,
        #[serde(default)]
        amount: u64,
        #[serde(default)]
        delegate_amount: u64,
        #[serde(default)]
        reason: String,
        now: Timestamp,
    },
}

impl Event {
    pub fn account(&self) -> &str {
        match self {
            Event::Increase { account, .. } | Event::Decrease { account, .. } => account,
        }
    }

    pub fn now(&self) -> Timestamp {
        match self {
            Event::Increase { now, .. } | Event::Decrease { now, .. } => *now,
        }
    }
}

/// A read-only question about one account's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum Query {
    BalanceAt {
        account: String,
        time: Timestamp,
    },
    AverageBetween {
        account: String,
        start: Timestamp,
        end: Timestamp,
    },
    IsTimeSafe {
        account: String,
        time: Timestamp,
    },
    IsTimeRangeSafe {
        account: String,
        start: Timestamp,
        end: Timestamp,
    },
}

impl Query {
    pub fn account(&self) -> &str {
        match self {
            Query::BalanceAt { account, .. }
            | Query::AverageBetween { account, .. }
            | Query::IsTimeSafe { account, .. }
            | Query::IsTimeRangeSafe { account, .. } => account,
        }
    }
}

/// Ordered events followed by queries answered against the final state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub queries: Vec<Query>,
}

impl Scenario {
    /// Load a scenario from a `.yaml`/`.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> TwabResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&raw)?),
            Some("yaml") | Some("yml") => Self::from_yaml(&raw),
            other => Err(TwabError::validation(format!(
                "Unsupported scenario extension {:?} for {}",
                other,
                path.display()
            ))),
        }
    }

    pub fn from_yaml(raw: &str) -> TwabResult<Self> {
        serde_yaml::from_str(raw)
            .map_err(|e| TwabError::validation(format!("Invalid scenario YAML: {}", e)))
    }

    /// Check account keys and interval ordering before anything is applied
    pub fn validate(&self) -> TwabResult<()> {
        ValidationUtils::validate_batch(
            &self.events,
            |e| ValidationUtils::validate_account_key(e.account()),
            "events",
        )?;
        ValidationUtils::validate_batch(
            &self.queries,
            |q| {
                ValidationUtils::validate_account_key(q.account())?;
                match q {
                    Query::AverageBetween { start, end, .. }
                    | Query::IsTimeRangeSafe { start, end, .. } => {
                        ValidationUtils::validate_interval(*start, *end)
                    }
                    _ => Ok(()),
                }
            },
            "queries",
        )
    }
}
