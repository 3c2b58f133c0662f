//! `reqwest` client for the order service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde_json::Value;
use tableside::{
    billing::PaymentRequest,
    menu::{Category, MenuEditResponse, MenuItemEdit},
    orders::{CartId, CartRecord, EntryRef},
    stocks::{Availability, AvailabilityUpdate, ComboStock, StockItem, StockRef},
    wire,
};
use tracing::{debug, error, info};

use super::{ApiError, OrdersApi};

/// Configuration for connecting to the order service.
#[derive(Debug, Clone)]
pub struct HttpOrdersApiConfig {
    /// Base URL, e.g. `"https://orders.example.com"`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

/// HTTP client for the order service.
#[derive(Debug, Clone)]
pub struct HttpOrdersApi {
    base_url: Url,
    http: Client,
}

impl HttpOrdersApi {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL, or if the
    /// underlying HTTP client cannot be built.
    pub fn new(config: HttpOrdersApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|error| {
            ApiError::InvalidBaseUrl {
                url: config.base_url.clone(),
                reason: error.to_string(),
            }
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: config.base_url,
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { base_url, http })
    }

    /// Absolute URL of a menu item's image.
    pub fn item_image_url(&self, image_id: &str) -> Url {
        self.endpoint(&["files", "image", image_id])
    }

    /// Absolute URL of a combo's image.
    pub fn combo_image_url(&self, image_id: &str) -> Url {
        self.endpoint(&["combos", "image", image_id])
    }

    /// Base URL extended by percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        let path = url.path().to_string();

        debug!(%method, path = %path, "sending request");

        let mut request = self.http.request(method.clone(), url);

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.inspect_err(|error| {
            error!(%method, path = %path, %error, "request failed");
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            error!(%method, path = %path, %status, "unexpected response status");

            return Err(ApiError::UnexpectedStatus {
                method,
                path,
                status,
                body,
            });
        }

        Ok(response)
    }

    async fn get_list(&self, segments: &[&str], what: &'static str) -> Result<Value, ApiError> {
        let response = self
            .send(Method::GET, self.endpoint(segments), None)
            .await?;

        let body = response.text().await?;

        Ok(wire::parse_body(&body, what)?)
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
    async fn fetch_carts(&self) -> Result<Vec<CartRecord>, ApiError> {
        let body = self.get_list(&["cart", "items"], "carts").await?;

        Ok(wire::decode_carts(body)?)
    }

    async fn mark_served(&self, cart: &CartId, entry: &EntryRef) -> Result<(), ApiError> {
        let url = self.endpoint(&["cart", "cartitems", cart.as_str(), "item", entry.raw_id()]);

        self.send(Method::PUT, url, None).await?;

        info!(%cart, kind = %entry.kind(), entry = entry.raw_id(), "entry marked served");

        Ok(())
    }

    async fn mark_paid(&self, request: &PaymentRequest) -> Result<(), ApiError> {
        debug!(payload = ?request, "posting payment");

        self.send(
            Method::POST,
            self.endpoint(&["bills", "paid"]),
            Some(serde_json::to_value(request)?),
        )
        .await?;

        info!(table = request.table_number, "bill marked paid");

        Ok(())
    }

    async fn list_stock_items(&self) -> Result<Vec<StockItem>, ApiError> {
        let body = self.get_list(&["menu", "stocks"], "stock items").await?;

        Ok(wire::decode_stock_items(body)?)
    }

    async fn list_combo_stocks(&self) -> Result<Vec<ComboStock>, ApiError> {
        let body = self.get_list(&["combos", "combo"], "combos").await?;

        Ok(wire::decode_combo_stocks(body)?)
    }

    async fn set_availability(
        &self,
        target: &StockRef,
        availability: Availability,
    ) -> Result<(), ApiError> {
        let url = match target {
            StockRef::Item(id) => self.endpoint(&["menu", "stocks", id.as_str()]),
            StockRef::Combo(id) => self.endpoint(&["combos", "stocks", id.as_str()]),
        };

        self.send(
            Method::PATCH,
            url,
            Some(serde_json::to_value(AvailabilityUpdate { availability })?),
        )
        .await?;

        info!(id = target.raw_id(), %availability, "availability updated");

        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let body = self.get_list(&["categories", "category"], "categories").await?;

        Ok(wire::decode_categories(body)?)
    }

    async fn edit_menu_item(&self, edit: &MenuItemEdit) -> Result<MenuEditResponse, ApiError> {
        debug!(payload = ?edit, "posting menu edit");

        let response = self
            .send(
                Method::POST,
                self.endpoint(&["menu", "edit"]),
                Some(serde_json::to_value(edit)?),
            )
            .await?;

        let text = response.text().await?;
        let reply: MenuEditResponse = serde_json::from_str(&text).unwrap_or_default();

        info!(id = %edit.id, "menu item edited");

        Ok(reply)
    }
}
