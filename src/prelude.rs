//! Tableside prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    aggregation::{AggregateStatus, StatusPartition},
    billing::{
        BillLine, BillingError, BillingEvent, BillingState, DEFAULT_TABLE_COUNT, PAID_MESSAGE,
        PaidAt, PaymentRequest, TableFilter, TableSlot, bill_lines, bill_total, payment_request,
        table_overview, tables_with_orders,
    },
    fixtures::{Fixture, FixtureError},
    ids::TypedId,
    kitchen::{KitchenError, KitchenEvent, KitchenState},
    menu::{Category, CategoryId, FoodType, MenuEditError, MenuEditResponse, MenuItemEdit},
    orders::{
        CartId, CartRecord, ComboComponent, ComboItem, ComboItemId, EntryKind, EntryRef,
        LineItem, LineItemId, ServingStatus,
    },
    receipt::{Receipt, ReceiptError},
    state::{LoadState, Reducer},
    stocks::{
        Availability, AvailabilityUpdate, ComboStock, ComboStockId, StockEvent, StockItem,
        StockItemId, StockRef, StockState,
    },
    wire::{
        DataShapeError, decode_carts, decode_categories, decode_combo_stocks, decode_stock_items,
        parse_body,
    },
};
