//! Order service client.

use async_trait::async_trait;
use mockall::automock;
use tableside::{
    billing::PaymentRequest,
    menu::{Category, MenuEditResponse, MenuItemEdit},
    orders::{CartId, CartRecord, EntryRef},
    stocks::{Availability, ComboStock, StockItem, StockRef},
};

mod errors;
mod http;

pub use errors::ApiError;
pub use http::{HttpOrdersApi, HttpOrdersApiConfig};

/// Remote order service, one method per endpoint.
#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// `GET /cart/items`
    async fn fetch_carts(&self) -> Result<Vec<CartRecord>, ApiError>;

    /// `PUT /cart/cartitems/{cart}/item/{entry}`
    async fn mark_served(&self, cart: &CartId, entry: &EntryRef) -> Result<(), ApiError>;

    /// `POST /bills/paid`
    async fn mark_paid(&self, request: &PaymentRequest) -> Result<(), ApiError>;

    /// `GET /menu/stocks`
    async fn list_stock_items(&self) -> Result<Vec<StockItem>, ApiError>;

    /// `GET /combos/combo`
    async fn list_combo_stocks(&self) -> Result<Vec<ComboStock>, ApiError>;

    /// `PATCH /menu/stocks/{id}` or `PATCH /combos/stocks/{id}`, routed by kind.
    async fn set_availability(
        &self,
        target: &StockRef,
        availability: Availability,
    ) -> Result<(), ApiError>;

    /// `GET /categories/category`
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// `POST /menu/edit`
    async fn edit_menu_item(&self, edit: &MenuItemEdit) -> Result<MenuEditResponse, ApiError>;
}
