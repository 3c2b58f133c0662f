//! Billing
//!
//! The table order list: every entry of the selected table(s) merged by name into bill
//! lines, the table occupancy overview, and the guarded "mark as paid" request.

use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter, Result as FmtResult},
    num::ParseIntError,
    str::FromStr,
};

use jiff::{Zoned, civil::DateTime};
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Serialize, Serializer, ser::SerializeMap};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    orders::{CartRecord, ComboComponent, EntryKind, ServingStatus},
    state::{LoadState, Reducer},
};

/// Default number of tables offered by the table selector.
pub const DEFAULT_TABLE_COUNT: u32 = 10;

/// Alert shown once a bill has been accepted.
pub const PAID_MESSAGE: &str = "The Bill has been Paid";

/// Which tables the bill covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TableFilter {
    /// Every table at once. Useful for browsing; cannot be paid.
    #[default]
    AllTables,

    /// A single table.
    Table(u32),
}

impl TableFilter {
    /// Whether a cart for `table_number` is covered.
    pub fn matches(self, table_number: u32) -> bool {
        match self {
            Self::AllTables => true,
            Self::Table(number) => number == table_number,
        }
    }
}

impl Display for TableFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::AllTables => f.write_str("all tables"),
            Self::Table(number) => write!(f, "table {number}"),
        }
    }
}

impl FromStr for TableFilter {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::AllTables);
        }

        trimmed.parse().map(Self::Table)
    }
}

/// One row of a bill: every same-named entry of the covered carts merged together.
#[derive(Debug, Clone, PartialEq)]
pub struct BillLine {
    /// Server id of the first merged entry
    pub id: String,

    /// Collection the first merged entry came from
    pub kind: EntryKind,

    /// Menu or combo name, the merge key
    pub name: String,

    /// Summed quantity
    pub count: u32,

    /// Unit price of the first merged entry
    pub price: Decimal,

    /// Category of the first merged entry
    pub category_name: Option<String>,

    /// Food type of the first merged entry
    pub food_type: Option<String>,

    /// `Served` only when every merged entry is served
    pub status: ServingStatus,

    /// Combo sub-items, empty for plain items
    pub components: SmallVec<[ComboComponent; 4]>,
}

impl BillLine {
    /// Price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.count)
    }
}

// Mirrors the line item record the server sent, with `price` forced to a JSON number.
impl Serialize for BillLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry("_id", &self.id)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("count", &self.count)?;
        map.serialize_entry("price", &PriceAsFloat(self.price))?;

        if let Some(category_name) = &self.category_name {
            map.serialize_entry("categoryName", category_name)?;
        }

        if let Some(food_type) = &self.food_type {
            map.serialize_entry("type", food_type)?;
        }

        map.serialize_entry("status", &self.status)?;

        if self.kind == EntryKind::Combo {
            let components: Vec<_> = self
                .components
                .iter()
                .map(|component| {
                    serde_json::json!({
                        "name": component.name,
                        "quantity": component.quantity,
                    })
                })
                .collect();

            map.serialize_entry("items", &components)?;
        }

        map.end()
    }
}

struct PriceAsFloat(Decimal);

impl Serialize for PriceAsFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

/// Merge every entry of the covered carts into bill lines.
///
/// Items precede combos within each cart and carts keep server order. The first entry
/// with a given name fixes the line's position and unit price.
pub fn bill_lines(carts: &[CartRecord], filter: TableFilter) -> Vec<BillLine> {
    let mut lines: Vec<BillLine> = Vec::new();
    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();

    let entries = carts
        .iter()
        .filter(|cart| filter.matches(cart.table_number))
        .flat_map(|cart| {
            cart.items
                .iter()
                .map(|item| BillLine {
                    id: item.id.as_str().to_string(),
                    kind: EntryKind::Item,
                    name: item.name.clone(),
                    count: item.count,
                    price: item.price,
                    category_name: item.category_name.clone(),
                    food_type: item.food_type.clone(),
                    status: item.status,
                    components: SmallVec::new(),
                })
                .chain(cart.combos.iter().map(|combo| BillLine {
                    id: combo.id.as_str().to_string(),
                    kind: EntryKind::Combo,
                    name: combo.name.clone(),
                    count: combo.count,
                    price: combo.price,
                    category_name: None,
                    food_type: None,
                    status: combo.status,
                    components: combo.components.clone(),
                }))
        });

    for entry in entries {
        match by_name.get(&entry.name).and_then(|&idx| lines.get_mut(idx)) {
            Some(line) => {
                line.count = line.count.saturating_add(entry.count);

                if !entry.status.is_served() {
                    line.status = ServingStatus::NotServed;
                }
            }
            None => {
                by_name.insert(entry.name.clone(), lines.len());
                lines.push(entry);
            }
        }
    }

    lines
}

/// Sum of every line's total.
pub fn bill_total(lines: &[BillLine]) -> Decimal {
    lines.iter().map(BillLine::line_total).sum()
}

/// Table numbers that have at least one open cart.
pub fn tables_with_orders(carts: &[CartRecord]) -> BTreeSet<u32> {
    carts.iter().map(|cart| cart.table_number).collect()
}

/// A table in the selector and whether it has an open order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSlot {
    /// Table number, starting at 1
    pub number: u32,

    /// Whether any open cart belongs to this table
    pub occupied: bool,
}

/// Tables `1..=table_count` flagged by occupancy.
pub fn table_overview(occupied: &BTreeSet<u32>, table_count: u32) -> Vec<TableSlot> {
    (1..=table_count)
        .map(|number| TableSlot {
            number,
            occupied: occupied.contains(&number),
        })
        .collect()
}

/// Client-captured moment a bill was settled, pre-formatted for the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaidAt {
    /// e.g. `3:04:05 PM`
    pub time: String,

    /// e.g. `6/14/2026`
    pub date: String,
}

impl PaidAt {
    /// Capture the local wall clock now.
    pub fn now() -> Self {
        Self::from_datetime(Zoned::now().datetime())
    }

    /// Format a given wall-clock time.
    pub fn from_datetime(datetime: DateTime) -> Self {
        Self {
            time: datetime.strftime("%-I:%M:%S %p").to_string(),
            date: datetime.strftime("%-m/%-d/%Y").to_string(),
        }
    }
}

/// Body of the "mark paid" request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Table being settled
    pub table_number: u32,

    /// Merged bill lines
    pub items: Vec<BillLine>,

    /// Formatted local time
    pub paid_time: String,

    /// Formatted local date
    pub paid_date: String,
}

/// Reasons a bill cannot be marked paid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// The bill covers every table; pick one first.
    #[error("no table has been chosen")]
    NoTableSelected,

    /// The table has no open order.
    #[error("table {0} has no orders yet")]
    NothingToPay(u32),

    /// Some lines still need serving.
    #[error("table {table} still has unserved items: {}", .pending.join(", "))]
    NotAllServed {
        /// Table being settled
        table: u32,
        /// Names of lines not yet served
        pending: Vec<String>,
    },
}

/// Build the payment request for `filter`, refusing unless every line is served.
///
/// # Errors
///
/// Returns a [`BillingError`] when no single table is selected, when the table has no
/// lines, or when any line is not served.
pub fn payment_request(
    filter: TableFilter,
    lines: &[BillLine],
    paid_at: PaidAt,
) -> Result<PaymentRequest, BillingError> {
    let TableFilter::Table(table) = filter else {
        return Err(BillingError::NoTableSelected);
    };

    if lines.is_empty() {
        return Err(BillingError::NothingToPay(table));
    }

    let pending: Vec<String> = lines
        .iter()
        .filter(|line| !line.status.is_served())
        .map(|line| line.name.clone())
        .collect();

    if !pending.is_empty() {
        return Err(BillingError::NotAllServed { table, pending });
    }

    Ok(PaymentRequest {
        table_number: table,
        items: lines.to_vec(),
        paid_time: paid_at.time,
        paid_date: paid_at.date,
    })
}

/// Table order list snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillingState {
    load: LoadState,
    carts: Vec<CartRecord>,
    filter: TableFilter,
    expanded: bool,
    lines: Vec<BillLine>,
    occupied: BTreeSet<u32>,
    alert: Option<String>,
}

/// Everything that can happen to the table order list.
#[derive(Debug, Clone, PartialEq)]
pub enum BillingEvent {
    /// A fetch of the cart list was issued.
    FetchStarted,

    /// The cart list arrived.
    FetchSucceeded(Vec<CartRecord>),

    /// The cart list could not be read.
    FetchFailed(String),

    /// The operator picked a table, or all tables.
    FilterChanged(TableFilter),

    /// The operator expanded or collapsed the list.
    Toggled,

    /// The server accepted the payment.
    PaymentSucceeded,

    /// The payment request failed.
    PaymentFailed(String),

    /// The operator acknowledged the alert.
    AlertDismissed,
}

impl BillingState {
    /// Current load state.
    pub fn load(&self) -> &LoadState {
        &self.load
    }

    /// Selected table filter.
    pub fn filter(&self) -> TableFilter {
        self.filter
    }

    /// Whether the list is expanded.
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Merged lines for the current filter.
    pub fn lines(&self) -> &[BillLine] {
        &self.lines
    }

    /// Tables with an open order.
    pub fn occupied(&self) -> &BTreeSet<u32> {
        &self.occupied
    }

    /// Pending alert for the operator.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Sum of the current lines.
    pub fn total(&self) -> Decimal {
        bill_total(&self.lines)
    }

    /// Whether "mark as paid" is enabled.
    pub fn can_mark_paid(&self) -> bool {
        matches!(self.filter, TableFilter::Table(_))
            && !self.lines.is_empty()
            && self.lines.iter().all(|line| line.status.is_served())
    }

    /// Build the payment request for the current selection.
    ///
    /// # Errors
    ///
    /// See [`payment_request`].
    pub fn payment_request(&self, paid_at: PaidAt) -> Result<PaymentRequest, BillingError> {
        payment_request(self.filter, &self.lines, paid_at)
    }

    fn recompute(mut self) -> Self {
        self.lines = bill_lines(&self.carts, self.filter);
        self.occupied = tables_with_orders(&self.carts);
        self
    }
}

impl Reducer for BillingState {
    type Event = BillingEvent;

    fn reduce(mut self, event: BillingEvent) -> Self {
        match event {
            BillingEvent::FetchStarted => {
                self.load = LoadState::Loading;
                self
            }
            BillingEvent::FetchSucceeded(carts) => {
                self.load = LoadState::Loaded;
                self.carts = carts;
                self.recompute()
            }
            BillingEvent::FetchFailed(message) => {
                self.load = LoadState::Failed(message);
                self
            }
            BillingEvent::FilterChanged(filter) => {
                self.filter = filter;
                self.recompute()
            }
            BillingEvent::Toggled => {
                self.expanded = !self.expanded;
                self
            }
            BillingEvent::PaymentSucceeded => {
                self.alert = Some(PAID_MESSAGE.to_string());
                self
            }
            BillingEvent::PaymentFailed(message) => {
                self.alert = Some(message);
                self
            }
            BillingEvent::AlertDismissed => {
                self.alert = None;
                self
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::orders::{
        ServingStatus::{NotServed, Served},
        test_support::{cart, combo, item},
    };

    use super::*;

    fn paid_at() -> PaidAt {
        PaidAt::from_datetime(date(2026, 6, 14).at(15, 4, 5, 0))
    }

    #[test]
    fn duplicate_names_are_summed() {
        let carts = vec![cart(
            "c1",
            1,
            vec![
                item("i1", "Rice", 2, Served),
                item("i2", "Rice", 3, Served),
            ],
            vec![],
        )];

        let lines = bill_lines(&carts, TableFilter::Table(1));

        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|l| (l.name.as_str(), l.count)), Some(("Rice", 5)));
    }

    #[test]
    fn merged_line_is_served_only_when_every_entry_is() {
        let carts = vec![
            cart("c1", 1, vec![item("i1", "Rice", 1, Served)], vec![]),
            cart("c2", 1, vec![item("i2", "Rice", 1, NotServed)], vec![]),
        ];

        let lines = bill_lines(&carts, TableFilter::Table(1));

        assert_eq!(lines.first().map(|l| l.status), Some(NotServed));
    }

    #[test]
    fn filter_restricts_lines_to_one_table_and_includes_combos() {
        let carts = vec![
            cart(
                "c1",
                1,
                vec![item("i1", "Rice", 1, Served)],
                vec![combo("k1", "Thali", Served)],
            ),
            cart("c2", 2, vec![item("i2", "Naan", 4, Served)], vec![]),
        ];

        let table_one: Vec<_> = bill_lines(&carts, TableFilter::Table(1))
            .into_iter()
            .map(|line| line.name)
            .collect();
        assert_eq!(table_one, vec!["Rice", "Thali"]);

        let everything = bill_lines(&carts, TableFilter::AllTables);
        assert_eq!(everything.len(), 3);
    }

    #[test]
    fn payment_is_refused_until_everything_is_served() {
        let carts = vec![cart(
            "c1",
            7,
            vec![item("i1", "Rice", 1, Served), item("i2", "Dal", 1, NotServed)],
            vec![],
        )];

        let state = BillingState::default().reduce_all([
            BillingEvent::FetchSucceeded(carts),
            BillingEvent::FilterChanged(TableFilter::Table(7)),
        ]);

        assert!(!state.can_mark_paid());
        assert_eq!(
            state.payment_request(paid_at()),
            Err(BillingError::NotAllServed {
                table: 7,
                pending: vec!["Dal".to_string()],
            })
        );
    }

    #[test]
    fn payment_requires_a_single_table_with_lines() {
        let carts = vec![cart("c1", 7, vec![item("i1", "Rice", 1, Served)], vec![])];
        let state = BillingState::default().reduce(BillingEvent::FetchSucceeded(carts));

        assert!(!state.can_mark_paid());
        assert_eq!(
            state.payment_request(paid_at()),
            Err(BillingError::NoTableSelected)
        );

        let empty_table = state.reduce(BillingEvent::FilterChanged(TableFilter::Table(3)));
        assert_eq!(
            empty_table.payment_request(paid_at()),
            Err(BillingError::NothingToPay(3))
        );
    }

    #[test]
    fn payment_request_serialises_to_server_shape() -> TestResult {
        let carts = vec![cart(
            "c1",
            7,
            vec![item("i1", "Rice", 2, Served)],
            vec![combo("k1", "Burger Meal", Served)],
        )];

        let state = BillingState::default().reduce_all([
            BillingEvent::FetchSucceeded(carts),
            BillingEvent::FilterChanged(TableFilter::Table(7)),
        ]);

        assert!(state.can_mark_paid());

        let request = state.payment_request(paid_at())?;
        let json = serde_json::to_value(&request)?;

        assert_eq!(
            json,
            serde_json::json!({
                "tableNumber": 7,
                "items": [
                    {
                        "_id": "i1",
                        "name": "Rice",
                        "count": 2,
                        "price": 4.5,
                        "categoryName": "Mains",
                        "type": "Veg",
                        "status": "Served",
                    },
                    {
                        "_id": "k1",
                        "name": "Burger Meal",
                        "count": 1,
                        "price": 12.0,
                        "status": "Served",
                        "items": [
                            { "name": "Burger", "quantity": 1 },
                            { "name": "Fries", "quantity": 1 },
                        ],
                    },
                ],
                "paidTime": "3:04:05 PM",
                "paidDate": "6/14/2026",
            })
        );

        Ok(())
    }

    #[test]
    fn overview_flags_occupied_tables() {
        let carts = vec![
            cart("c1", 2, vec![], vec![]),
            cart("c2", 2, vec![], vec![]),
            cart("c3", 4, vec![], vec![]),
        ];

        let overview = table_overview(&tables_with_orders(&carts), 5);

        let occupied: Vec<u32> = overview
            .iter()
            .filter(|slot| slot.occupied)
            .map(|slot| slot.number)
            .collect();

        assert_eq!(overview.len(), 5);
        assert_eq!(occupied, vec![2, 4]);
    }

    #[test]
    fn total_multiplies_unit_price_by_count() {
        let carts = vec![cart(
            "c1",
            1,
            vec![item("i1", "Rice", 2, Served), item("i2", "Rice", 1, Served)],
            vec![],
        )];

        let lines = bill_lines(&carts, TableFilter::AllTables);

        assert_eq!(bill_total(&lines), Decimal::new(1350, 2));
    }

    #[test]
    fn table_filter_parses_all_and_numbers() -> TestResult {
        assert_eq!("".parse::<TableFilter>()?, TableFilter::AllTables);
        assert_eq!("all".parse::<TableFilter>()?, TableFilter::AllTables);
        assert_eq!(" 4 ".parse::<TableFilter>()?, TableFilter::Table(4));
        assert!("four".parse::<TableFilter>().is_err());

        Ok(())
    }

    #[test]
    fn successful_payment_sets_paid_alert() {
        let state = BillingState::default().reduce(BillingEvent::PaymentSucceeded);

        assert_eq!(state.alert(), Some(PAID_MESSAGE));
    }
}
