//! Status Aggregation

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::orders::{CartId, CartRecord, ServingStatus};

/// Derived classification of an order from its entries' statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateStatus {
    /// Every entry is served. Also holds for an order with no entries.
    AllServed,

    /// At least one entry is served, but not all of them.
    SomeServed,

    /// No entry is served.
    NoneServed,
}

impl AggregateStatus {
    /// Classify a set of entry statuses.
    pub fn classify(statuses: impl IntoIterator<Item = ServingStatus>) -> Self {
        let (served, total) = statuses
            .into_iter()
            .fold((0_usize, 0_usize), |(served, total), status| {
                (served + usize::from(status.is_served()), total + 1)
            });

        if served == total {
            Self::AllServed
        } else if served > 0 {
            Self::SomeServed
        } else {
            Self::NoneServed
        }
    }
}

impl Display for AggregateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::AllServed => f.write_str("all-served"),
            Self::SomeServed => f.write_str("some-served"),
            Self::NoneServed => f.write_str("none-served"),
        }
    }
}

/// Partition of cart ids by aggregate status.
///
/// Every id passed to [`StatusPartition::from_carts`] lands in exactly one bucket, in the
/// order the carts were given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPartition {
    /// Carts whose entries are all served
    pub all: Vec<CartId>,

    /// Carts with some, but not all, entries served
    pub few: Vec<CartId>,

    /// Carts with nothing served yet
    pub none: Vec<CartId>,
}

impl StatusPartition {
    /// Classify every cart.
    pub fn from_carts(carts: &[CartRecord]) -> Self {
        carts.iter().fold(Self::default(), |mut partition, cart| {
            let bucket = match cart.aggregate_status() {
                AggregateStatus::AllServed => &mut partition.all,
                AggregateStatus::SomeServed => &mut partition.few,
                AggregateStatus::NoneServed => &mut partition.none,
            };

            bucket.push(cart.id.clone());

            partition
        })
    }

    /// The bucket holding the given cart, if it was classified.
    pub fn status_of(&self, id: &CartId) -> Option<AggregateStatus> {
        if self.all.contains(id) {
            Some(AggregateStatus::AllServed)
        } else if self.few.contains(id) {
            Some(AggregateStatus::SomeServed)
        } else if self.none.contains(id) {
            Some(AggregateStatus::NoneServed)
        } else {
            None
        }
    }

    /// Total number of classified carts.
    pub fn len(&self) -> usize {
        self.all.len() + self.few.len() + self.none.len()
    }

    /// Whether no carts were classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
