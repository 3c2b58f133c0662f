//! Wire Schemas
//!
//! Decoding of the remote service's JSON into validated domain records. The server sends
//! loosely-typed documents, so decoding is fail-closed per entry: a record that is missing
//! its identity is dropped and logged instead of failing the whole response. Only a
//! response that is not a JSON list at all is an error.
//!
//! | Field            | Missing or malformed           |
//! |------------------|--------------------------------|
//! | `_id`, `name`    | entry dropped                  |
//! | `tableNumber`    | cart dropped                   |
//! | `status`         | `Not Served`                   |
//! | `count`, `stock` | `0` / untracked                |
//! | `price`          | zero, also when negative       |
//! | `availability`   | `not available`                |

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Deserialize;
use serde_json::Value;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    menu::Category,
    orders::{CartRecord, ComboComponent, ComboItem, LineItem, ServingStatus},
    stocks::{Availability, ComboStock, StockItem},
};

/// The response body was not the list the endpoint promises.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataShapeError {
    /// Expected a JSON array.
    #[error("expected a list of {what}, got {found}")]
    NotAList {
        /// What the list should have held
        what: &'static str,
        /// JSON type actually received
        found: &'static str,
    },

    /// The body could not be parsed as JSON at all.
    #[error("expected a list of {what}, got a body that is not JSON: {reason}")]
    NotJson {
        /// What the list should have held
        what: &'static str,
        /// Parser message
        reason: String,
    },
}

/// Parse a raw response body, treating anything that is not JSON as a shape violation.
///
/// # Errors
///
/// Returns [`DataShapeError::NotJson`] when the body does not parse.
pub fn parse_body(body: &str, what: &'static str) -> Result<Value, DataShapeError> {
    serde_json::from_str(body).map_err(|error| DataShapeError::NotJson {
        what,
        reason: error.to_string(),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn decode_list<T>(
    value: Value,
    what: &'static str,
    decode: impl Fn(Value) -> Option<T>,
) -> Result<Vec<T>, DataShapeError> {
    let Value::Array(entries) = value else {
        return Err(DataShapeError::NotAList {
            what,
            found: json_type(&value),
        });
    };

    let total = entries.len();
    let decoded: Vec<T> = entries.into_iter().filter_map(decode).collect();

    if decoded.len() < total {
        warn!(
            what,
            dropped = total - decoded.len(),
            total,
            "dropped malformed entries"
        );
    }

    Ok(decoded)
}

/// Decode the `GET /cart/items` body.
///
/// # Errors
///
/// Returns [`DataShapeError::NotAList`] when the body is not a JSON array.
pub fn decode_carts(value: Value) -> Result<Vec<CartRecord>, DataShapeError> {
    decode_list(value, "carts", decode_cart)
}

/// Decode the `GET /menu/stocks` body.
///
/// # Errors
///
/// Returns [`DataShapeError::NotAList`] when the body is not a JSON array.
pub fn decode_stock_items(value: Value) -> Result<Vec<StockItem>, DataShapeError> {
    decode_list(value, "stock items", decode_stock_item)
}

/// Decode the `GET /combos/combo` body.
///
/// # Errors
///
/// Returns [`DataShapeError::NotAList`] when the body is not a JSON array.
pub fn decode_combo_stocks(value: Value) -> Result<Vec<ComboStock>, DataShapeError> {
    decode_list(value, "combos", decode_combo_stock)
}

/// Decode the `GET /categories/category` body.
///
/// # Errors
///
/// Returns [`DataShapeError::NotAList`] when the body is not a JSON array.
pub fn decode_categories(value: Value) -> Result<Vec<Category>, DataShapeError> {
    decode_list(value, "categories", decode_category)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCart {
    #[serde(rename = "_id")]
    id: Option<Value>,
    table_number: Option<Value>,
    items: Option<Value>,
    combos: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLineItem {
    #[serde(rename = "_id")]
    id: Option<Value>,
    name: Option<Value>,
    count: Option<Value>,
    price: Option<Value>,
    category_name: Option<Value>,
    #[serde(rename = "type")]
    food_type: Option<Value>,
    status: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawCombo {
    #[serde(rename = "_id")]
    id: Option<Value>,
    name: Option<Value>,
    count: Option<Value>,
    price: Option<Value>,
    status: Option<Value>,
    items: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawComponent {
    name: Option<Value>,
    quantity: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStockItem {
    #[serde(rename = "_id")]
    id: Option<Value>,
    name: Option<Value>,
    image_id: Option<Value>,
    price: Option<Value>,
    category_name: Option<Value>,
    #[serde(rename = "type")]
    food_type: Option<Value>,
    stock: Option<Value>,
    availability: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComboStock {
    #[serde(rename = "_id")]
    id: Option<Value>,
    combo_name: Option<Value>,
    combo_image: Option<Value>,
    combo_price: Option<Value>,
    combo_category_name: Option<Value>,
    availability: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategory {
    #[serde(rename = "_id")]
    id: Option<Value>,
    category_name: Option<Value>,
}

fn parse_raw<T: for<'de> Deserialize<'de>>(value: Value, what: &'static str) -> Option<T> {
    serde_json::from_value(value)
        .inspect_err(|error| debug!(what, %error, "entry is not an object"))
        .ok()
}

fn non_empty_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn unsigned(value: Option<&Value>) -> Option<u32> {
    decimal(value)
        .filter(|n| n.fract().is_zero())
        .and_then(|n| n.to_u32())
}

fn decimal(value: Option<&Value>) -> Option<Decimal> {
    let text = match value? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn price(value: Option<&Value>) -> Decimal {
    decimal(value)
        .filter(|n| !n.is_sign_negative())
        .unwrap_or_default()
}

fn list(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(entries)) => entries,
        _ => Vec::new(),
    }
}

fn status(value: Option<&Value>) -> ServingStatus {
    value
        .and_then(Value::as_str)
        .map_or(ServingStatus::NotServed, ServingStatus::from_wire)
}

fn availability(value: Option<&Value>) -> Availability {
    value
        .and_then(Value::as_str)
        .map_or(Availability::NotAvailable, Availability::from_wire)
}

fn decode_cart(value: Value) -> Option<CartRecord> {
    let raw: RawCart = parse_raw(value, "cart")?;

    let Some(id) = non_empty_string(raw.id) else {
        warn!("dropping cart without an id");
        return None;
    };

    let Some(table_number) = unsigned(raw.table_number.as_ref()) else {
        warn!(cart_id = %id, "dropping cart without a valid table number");
        return None;
    };

    let items = list(raw.items)
        .into_iter()
        .filter_map(|entry| decode_line_item(entry, &id))
        .collect();

    let combos = list(raw.combos)
        .into_iter()
        .filter_map(|entry| decode_combo(entry, &id))
        .collect();

    Some(CartRecord {
        id: id.into(),
        table_number,
        items,
        combos,
    })
}

fn decode_line_item(value: Value, cart_id: &str) -> Option<LineItem> {
    let raw: RawLineItem = parse_raw(value, "line item")?;

    let (Some(id), Some(name)) = (non_empty_string(raw.id), non_empty_string(raw.name)) else {
        warn!(cart_id, "dropping line item without an id or name");
        return None;
    };

    Some(LineItem {
        id: id.into(),
        name,
        count: unsigned(raw.count.as_ref()).unwrap_or_default(),
        price: price(raw.price.as_ref()),
        category_name: non_empty_string(raw.category_name),
        food_type: non_empty_string(raw.food_type),
        status: status(raw.status.as_ref()),
    })
}

fn decode_combo(value: Value, cart_id: &str) -> Option<ComboItem> {
    let raw: RawCombo = parse_raw(value, "combo")?;

    let (Some(id), Some(name)) = (non_empty_string(raw.id), non_empty_string(raw.name)) else {
        warn!(cart_id, "dropping combo without an id or name");
        return None;
    };

    let components: SmallVec<[ComboComponent; 4]> = list(raw.items)
        .into_iter()
        .filter_map(|entry| parse_raw::<RawComponent>(entry, "combo component"))
        .filter_map(|component| {
            Some(ComboComponent {
                name: non_empty_string(component.name)?,
                quantity: unsigned(component.quantity.as_ref()).unwrap_or_default(),
            })
        })
        .collect();

    Some(ComboItem {
        id: id.into(),
        name,
        count: unsigned(raw.count.as_ref()).unwrap_or_default(),
        price: price(raw.price.as_ref()),
        status: status(raw.status.as_ref()),
        components,
    })
}

fn decode_stock_item(value: Value) -> Option<StockItem> {
    let raw: RawStockItem = parse_raw(value, "stock item")?;

    let (Some(id), Some(name)) = (non_empty_string(raw.id), non_empty_string(raw.name)) else {
        warn!("dropping stock item without an id or name");
        return None;
    };

    Some(StockItem {
        id: id.into(),
        name,
        image_id: non_empty_string(raw.image_id),
        price: price(raw.price.as_ref()),
        category_name: non_empty_string(raw.category_name),
        food_type: non_empty_string(raw.food_type),
        stock: unsigned(raw.stock.as_ref()),
        availability: availability(raw.availability.as_ref()),
    })
}

fn decode_combo_stock(value: Value) -> Option<ComboStock> {
    let raw: RawComboStock = parse_raw(value, "combo stock")?;

    let (Some(id), Some(name)) = (non_empty_string(raw.id), non_empty_string(raw.combo_name))
    else {
        warn!("dropping combo stock without an id or name");
        return None;
    };

    Some(ComboStock {
        id: id.into(),
        name,
        image_id: non_empty_string(raw.combo_image),
        price: price(raw.combo_price.as_ref()),
        category_name: non_empty_string(raw.combo_category_name),
        availability: availability(raw.availability.as_ref()),
    })
}

fn decode_category(value: Value) -> Option<Category> {
    let raw: RawCategory = parse_raw(value, "category")?;

    let (Some(id), Some(name)) = (
        non_empty_string(raw.id),
        non_empty_string(raw.category_name),
    ) else {
        warn!("dropping category without an id or name");
        return None;
    };

    Some(Category {
        id: id.into(),
        name,
    })
}
