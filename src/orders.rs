//! Orders
//!
//! A table's in-progress order as held by the kitchen and billing screens. Records are
//! produced by [`crate::wire::decode_carts`] and only ever change through an explicit
//! served patch or a fresh fetch.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{aggregation::AggregateStatus, ids::TypedId};

/// Cart Id
pub type CartId = TypedId<CartRecord>;

/// Line Item Id
pub type LineItemId = TypedId<LineItem>;

/// Combo Item Id
pub type ComboItemId = TypedId<ComboItem>;

/// Serving status of a single ordered entry.
///
/// `NotServed` moves to `Served` and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ServingStatus {
    /// Delivered to the table.
    #[serde(rename = "Served")]
    Served,

    /// Still being prepared.
    #[default]
    #[serde(rename = "Not Served")]
    NotServed,
}

impl ServingStatus {
    /// Interpret a status string as sent by the server.
    ///
    /// Only the exact string `"Served"` counts as served.
    pub fn from_wire(raw: &str) -> Self {
        if raw == "Served" {
            Self::Served
        } else {
            Self::NotServed
        }
    }

    /// Whether this entry has been served.
    pub fn is_served(self) -> bool {
        matches!(self, Self::Served)
    }
}

impl Display for ServingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Served => f.write_str("Served"),
            Self::NotServed => f.write_str("Not Served"),
        }
    }
}

/// Which collection of a cart an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A single menu item from `items`.
    Item,

    /// A bundle from `combos`.
    Combo,
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Item => f.write_str("item"),
            Self::Combo => f.write_str("combo"),
        }
    }
}

/// Reference to one entry of a cart, routed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryRef {
    /// An entry of `items`.
    Item(LineItemId),

    /// An entry of `combos`.
    Combo(ComboItemId),
}

impl EntryRef {
    /// The collection this reference points into.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Item(_) => EntryKind::Item,
            Self::Combo(_) => EntryKind::Combo,
        }
    }

    /// The raw server id of the entry.
    pub fn raw_id(&self) -> &str {
        match self {
            Self::Item(id) => id.as_str(),
            Self::Combo(id) => id.as_str(),
        }
    }
}

/// A single ordered menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Server id
    pub id: LineItemId,

    /// Menu name
    pub name: String,

    /// Ordered quantity
    pub count: u32,

    /// Unit price
    pub price: Decimal,

    /// Menu category, if the server sent one
    pub category_name: Option<String>,

    /// Food type such as `Veg` or `Non Veg`, if the server sent one
    pub food_type: Option<String>,

    /// Serving status
    pub status: ServingStatus,
}

/// A named sub-item of a combo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboComponent {
    /// Sub-item name
    pub name: String,

    /// Quantity of the sub-item within one combo
    pub quantity: u32,
}

/// A bundle of sub-items sharing one status and one price.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboItem {
    /// Server id
    pub id: ComboItemId,

    /// Combo name
    pub name: String,

    /// Ordered quantity
    pub count: u32,

    /// Unit price
    pub price: Decimal,

    /// Serving status
    pub status: ServingStatus,

    /// Bundled sub-items
    pub components: SmallVec<[ComboComponent; 4]>,
}

/// A table's in-progress set of ordered items and combos.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    /// Server id
    pub id: CartId,

    /// Table the order belongs to
    pub table_number: u32,

    /// Single menu items
    pub items: Vec<LineItem>,

    /// Combos
    pub combos: Vec<ComboItem>,
}

impl CartRecord {
    /// Statuses of every item followed by every combo.
    pub fn statuses(&self) -> impl Iterator<Item = ServingStatus> + '_ {
        self.items
            .iter()
            .map(|item| item.status)
            .chain(self.combos.iter().map(|combo| combo.status))
    }

    /// Derived aggregate status of the whole order.
    pub fn aggregate_status(&self) -> AggregateStatus {
        AggregateStatus::classify(self.statuses())
    }

    /// Whether the order has no items and no combos.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.combos.is_empty()
    }

    /// Status of the referenced entry, if it exists in this cart.
    pub fn entry_status(&self, entry: &EntryRef) -> Option<ServingStatus> {
        match entry {
            EntryRef::Item(id) => self
                .items
                .iter()
                .find(|item| &item.id == id)
                .map(|item| item.status),
            EntryRef::Combo(id) => self
                .combos
                .iter()
                .find(|combo| &combo.id == id)
                .map(|combo| combo.status),
        }
    }

    /// Mark the referenced entry served, touching only the collection named by its kind.
    ///
    /// Returns `true` when a status actually changed.
    pub fn mark_served(&mut self, entry: &EntryRef) -> bool {
        let status = match entry {
            EntryRef::Item(id) => self
                .items
                .iter_mut()
                .find(|item| &item.id == id)
                .map(|item| &mut item.status),
            EntryRef::Combo(id) => self
                .combos
                .iter_mut()
                .find(|combo| &combo.id == id)
                .map(|combo| &mut combo.status),
        };

        match status {
            Some(status) if !status.is_served() => {
                *status = ServingStatus::Served;
                true
            }
            Some(_) | None => false,
        }
    }

    /// References to every entry that still needs serving, items first.
    pub fn pending_entries(&self) -> Vec<EntryRef> {
        self.items
            .iter()
            .filter(|item| !item.status.is_served())
            .map(|item| EntryRef::Item(item.id.clone()))
            .chain(
                self.combos
                    .iter()
                    .filter(|combo| !combo.status.is_served())
                    .map(|combo| EntryRef::Combo(combo.id.clone())),
            )
            .collect()
    }
}
