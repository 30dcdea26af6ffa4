use crate::observation::Observation;
use serde::{Deserialize, Serialize};
use twab_common::prelude::*;
use twab_common::twab_bail;

/// Scalar counters of an account. Holds no ring internals besides the two cursors.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccountDetails {
    pub balance: Balance,
    pub delegate_balance: Balance,
    /// Slot the next appended observation lands in
    pub next_write_index: usize,
    /// Number of live observations, capped at the ring capacity
    pub cardinality: usize,
}

/// Balance history of a single account with a ring of `N` observation slots.
///
/// While the ring is filling, live entries sit in slots `0..cardinality` in
/// chronological order. Once full, `next_write_index` is both the oldest
/// surviving slot and the next one to be overwritten.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "RawAccount<N>")]
pub struct Account<const N: usize> {
    pub(crate) details: AccountDetails,
    #[serde(serialize_with = "ring::serialize")]
    pub(crate) observations: Box<[Observation; N]>,
}

/// Decoded account before its cursors are checked against the ring
#[derive(Deserialize)]
struct RawAccount<const N: usize> {
    details: AccountDetails,
    #[serde(deserialize_with = "ring::deserialize")]
    observations: Box<[Observation; N]>,
}

impl<const N: usize> TryFrom<RawAccount<N>> for Account<N> {
    type Error = TwabError;

    fn try_from(raw: RawAccount<N>) -> TwabResult<Self> {
        let AccountDetails {
            next_write_index,
            cardinality,
            ..
        } = raw.details;
        if cardinality > N {
            twab_bail!(Serialization, "cardinality {} exceeds {} slots", cardinality, N);
        }
        if next_write_index >= N {
            twab_bail!(Serialization, "next write index {} outside {} slots", next_write_index, N);
        }
        if cardinality < N && next_write_index != cardinality {
            twab_bail!(
                Serialization,
                "next write index {} must equal cardinality {} while the ring fills",
                next_write_index,
                cardinality
            );
        }
        Ok(Self {
            details: raw.details,
            observations: raw.observations,
        })
    }
}

impl<const N: usize> Account<N> {
    /// Ring capacity. Referencing it rejects `N == 0` at compile time.
    pub const CAPACITY: usize = {
        assert!(N > 0, "observation ring needs at least one slot");
        N
    };

    pub fn new() -> Self {
        let _ = Self::CAPACITY;
        Self {
            details: AccountDetails::default(),
            observations: Box::new([Observation::default(); N]),
        }
    }

    pub fn details(&self) -> &AccountDetails {
        &self.details
    }

    pub fn balance(&self) -> Balance {
        self.details.balance
    }

    pub fn delegate_balance(&self) -> Balance {
        self.details.delegate_balance
    }

    pub fn cardinality(&self) -> usize {
        self.details.cardinality
    }

    pub fn next_write_index(&self) -> usize {
        self.details.next_write_index
    }

    pub fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    pub fn is_empty(&self) -> bool {
        self.details.cardinality == 0
    }

    /// True once every slot holds a live observation
    pub fn is_full(&self) -> bool {
        self.details.cardinality == Self::CAPACITY
    }
}

impl<const N: usize> Default for Account<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TwabSerialize for Account<N> {
    fn preferred_encoding() -> EncodingType {
        EncodingType::Bincode // Compact for account snapshots
    }
}

/// Serde adapter for the fixed-size ring; arrays of arbitrary `N` are not
/// covered by serde's built-in impls.
mod ring {
    use super::Observation;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use twab_common::serialization::SerializationError;

    #[allow(clippy::borrowed_box)]
    pub fn serialize<S, const N: usize>(
        observations: &Box<[Observation; N]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(observations.iter())
    }

    pub fn deserialize<'de, D, const N: usize>(
        deserializer: D,
    ) -> Result<Box<[Observation; N]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let slots = Vec::<Observation>::deserialize(deserializer)?;
        let actual = slots.len();
        slots
            .into_boxed_slice()
            .try_into()
            .map_err(|_| {
                D::Error::custom(SerializationError::InvalidSize {
                    expected: N,
                    actual,
                })
            })
    }
}
