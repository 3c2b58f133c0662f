//! Stocks
//!
//! Kitchen-side availability flags for menu items and combos.

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    ids::TypedId,
    state::{LoadState, Reducer},
};

/// Stock Item Id
pub type StockItemId = TypedId<StockItem>;

/// Combo Stock Id
pub type ComboStockId = TypedId<ComboStock>;

/// Whether a menu item or combo can currently be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    /// Orderable.
    #[serde(rename = "available")]
    Available,

    /// Switched off by the kitchen.
    #[serde(rename = "not available")]
    NotAvailable,
}

impl Availability {
    /// Interpret an availability string as sent by the server.
    ///
    /// Only the exact string `"available"` counts as available.
    pub fn from_wire(raw: &str) -> Self {
        if raw == "available" {
            Self::Available
        } else {
            Self::NotAvailable
        }
    }

    /// The opposite flag.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Available => Self::NotAvailable,
            Self::NotAvailable => Self::Available,
        }
    }

    /// Whether the entry is orderable.
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl Display for Availability {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Available => f.write_str("available"),
            Self::NotAvailable => f.write_str("not available"),
        }
    }
}

/// Body of an availability PATCH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityUpdate {
    /// The new flag
    pub availability: Availability,
}

/// A menu item as listed on the stock screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    /// Server id
    pub id: StockItemId,

    /// Menu name
    pub name: String,

    /// Stored image id, if any
    pub image_id: Option<String>,

    /// Unit price
    pub price: Decimal,

    /// Menu category
    pub category_name: Option<String>,

    /// Food type such as `Veg` or `Non Veg`
    pub food_type: Option<String>,

    /// Units in stock, if tracked
    pub stock: Option<u32>,

    /// Availability flag
    pub availability: Availability,
}

/// A combo as listed on the stock screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboStock {
    /// Server id
    pub id: ComboStockId,

    /// Combo name
    pub name: String,

    /// Stored image id, if any
    pub image_id: Option<String>,

    /// Combo price
    pub price: Decimal,

    /// Combo category
    pub category_name: Option<String>,

    /// Availability flag
    pub availability: Availability,
}

/// Target of an availability toggle, routed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StockRef {
    /// A menu item.
    Item(StockItemId),

    /// A combo.
    Combo(ComboStockId),
}

impl StockRef {
    /// The raw server id.
    pub fn raw_id(&self) -> &str {
        match self {
            Self::Item(id) => id.as_str(),
            Self::Combo(id) => id.as_str(),
        }
    }
}

/// Stock screen snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockState {
    load: LoadState,
    items: Vec<StockItem>,
    combos: Vec<ComboStock>,
    alert: Option<String>,
}

/// Everything that can happen to the stock screen.
#[derive(Debug, Clone, PartialEq)]
pub enum StockEvent {
    /// Both stock lists were requested.
    FetchStarted,

    /// Both stock lists arrived.
    FetchSucceeded {
        /// Menu items
        items: Vec<StockItem>,
        /// Combos
        combos: Vec<ComboStock>,
    },

    /// A stock list could not be read.
    FetchFailed(String),

    /// The server accepted an availability change.
    AvailabilityChanged {
        /// Toggled entry
        target: StockRef,
        /// Its new flag
        availability: Availability,
    },

    /// An availability change failed.
    UpdateFailed(String),

    /// The operator acknowledged the alert.
    AlertDismissed,
}

impl StockState {
    /// Current load state.
    pub fn load(&self) -> &LoadState {
        &self.load
    }

    /// Menu items.
    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    /// Combos.
    pub fn combos(&self) -> &[ComboStock] {
        &self.combos
    }

    /// Pending alert for the operator.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Current flag of a listed entry.
    pub fn availability_of(&self, target: &StockRef) -> Option<Availability> {
        match target {
            StockRef::Item(id) => self
                .items
                .iter()
                .find(|item| &item.id == id)
                .map(|item| item.availability),
            StockRef::Combo(id) => self
                .combos
                .iter()
                .find(|combo| &combo.id == id)
                .map(|combo| combo.availability),
        }
    }
}

impl Reducer for StockState {
    type Event = StockEvent;

    fn reduce(mut self, event: StockEvent) -> Self {
        match event {
            StockEvent::FetchStarted => {
                self.load = LoadState::Loading;
                self.alert = None;
                self
            }
            StockEvent::FetchSucceeded { items, combos } => {
                self.load = LoadState::Loaded;
                self.items = items;
                self.combos = combos;
                self
            }
            StockEvent::FetchFailed(message) => {
                self.load = LoadState::Failed(message);
                self
            }
            StockEvent::AvailabilityChanged {
                target,
                availability,
            } => {
                let slot = match &target {
                    StockRef::Item(id) => self
                        .items
                        .iter_mut()
                        .find(|item| &item.id == id)
                        .map(|item| &mut item.availability),
                    StockRef::Combo(id) => self
                        .combos
                        .iter_mut()
                        .find(|combo| &combo.id == id)
                        .map(|combo| &mut combo.availability),
                };

                if let Some(slot) = slot {
                    *slot = availability;
                }

                self
            }
            StockEvent::UpdateFailed(message) => {
                self.alert = Some(message);
                self
            }
            StockEvent::AlertDismissed => {
                self.alert = None;
                self
            }
        }
    }
}
