//! Observation ring bookkeeping and the two bisection searches.
//!
//! Every logical position goes through one modulo helper: virtual position
//! `v` of the live window (0 = oldest) lives in physical slot
//! `(oldest_index + v) mod N`.

use crate::account::Account;
use crate::observation::Observation;
use tracing::{debug, trace};
use twab_common::prelude::*;

/// Which neighbour of a query time a search settles on when there is no exact match
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchDirection {
    /// Greatest timestamp `<=` the target
    PreviousOrAt,
    /// Smallest timestamp `>=` the target
    NextOrAt,
}

impl<const N: usize> Account<N> {
    fn slot(index: usize) -> usize {
        index % Self::CAPACITY
    }

    /// Oldest live observation and its slot.
    ///
    /// An empty ring reports slot 0 with a zero observation.
    pub fn oldest(&self) -> (usize, Observation) {
        if self.details.cardinality == 0 {
            return (0, Observation::default());
        }
        let index = if self.is_full() {
            self.details.next_write_index
        } else {
            0
        };
        (index, self.observations[index])
    }

    /// Newest live observation and its slot.
    ///
    /// An empty ring reports slot `N - 1` with a zero observation so that it
    /// never shares a slot with [`Account::oldest`].
    pub fn newest(&self) -> (usize, Observation) {
        if self.details.cardinality == 0 {
            return (Self::CAPACITY - 1, Observation::default());
        }
        let index = Self::slot(self.details.next_write_index + Self::CAPACITY - 1);
        (index, self.observations[index])
    }

    /// Live observations from oldest to newest
    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        let (oldest_index, _) = self.oldest();
        (0..self.details.cardinality).map(move |v| self.observations[Self::slot(oldest_index + v)])
    }

    /// Write `observation` into the next slot, evicting the oldest entry once full.
    ///
    /// Returns the slot written. Callers keep timestamps non-decreasing.
    pub fn append(&mut self, observation: Observation) -> usize {
        let index = self.details.next_write_index;
        if self.is_full() {
            debug!(
                slot = index,
                evicted = self.observations[index].timestamp,
                timestamp = observation.timestamp,
                "Observation ring overwrote oldest entry"
            );
        } else {
            self.details.cardinality += 1;
            debug!(
                slot = index,
                cardinality = self.details.cardinality,
                timestamp = observation.timestamp,
                "Appended observation"
            );
        }
        self.observations[index] = observation;
        self.details.next_write_index = Self::slot(index + 1);
        index
    }

    /// Replace the newest observation in place. Cursors are left untouched.
    ///
    /// Returns the slot written.
    pub fn overwrite_latest(&mut self, observation: Observation) -> usize {
        let (index, previous) = self.newest();
        debug!(
            slot = index,
            from = previous.timestamp,
            to = observation.timestamp,
            "Coalesced observation"
        );
        self.observations[index] = observation;
        index
    }

    /// Latest observation at or before `time`.
    ///
    /// When no live entry is that old, a zero-balance observation is returned,
    /// stamped with the oldest entry's timestamp, or with `time` itself when
    /// the history is empty.
    pub fn previous_or_at(&self, time: Timestamp) -> Observation {
        if self.details.cardinality == 0 {
            return Observation::zero_at(time);
        }
        let (_, newest) = self.newest();
        if time >= newest.timestamp {
            return newest;
        }
        let (_, oldest) = self.oldest();
        if time < oldest.timestamp {
            return Observation::zero_at(oldest.timestamp);
        }
        match self.bisect(time, SearchDirection::PreviousOrAt) {
            Some(index) => self.observations[index],
            None => Observation::zero_at(oldest.timestamp),
        }
    }

    /// Earliest observation at or after `time`, or the newest one if `time`
    /// is past every entry.
    pub fn next_or_newest(&self, time: Timestamp) -> Observation {
        let (_, newest) = self.newest();
        if self.details.cardinality == 0 || time >= newest.timestamp {
            return newest;
        }
        match self.bisect(time, SearchDirection::NextOrAt) {
            Some(index) => self.observations[index],
            None => newest,
        }
    }

    /// Binary search of the live window by timestamp, returning a physical slot.
    ///
    /// An exact timestamp match wins in both directions.
    fn bisect(&self, target: Timestamp, direction: SearchDirection) -> Option<usize> {
        let len = self.details.cardinality;
        let (oldest_index, _) = self.oldest();
        let physical = |v: usize| Self::slot(oldest_index + v);

        // invariant: positions < low are before target, positions >= high are after it
        let mut low = 0;
        let mut high = len;
        while low < high {
            let mid = low + (high - low) / 2;
            let timestamp = self.observations[physical(mid)].timestamp;
            trace!(low, high, mid, timestamp, target, "bisect step");
            if timestamp == target {
                return Some(physical(mid));
            }
            if timestamp < target {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        match direction {
            SearchDirection::PreviousOrAt => low.checked_sub(1).map(physical),
            SearchDirection::NextOrAt => (low < len).then(|| physical(low)),
        }
    }
}
