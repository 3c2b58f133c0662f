//! App Context

use std::sync::Arc;

use rusty_money::iso::Currency;
use tableside::receipt::{self, ReceiptError};
use thiserror::Error;

use crate::{
    client::{ApiError, HttpOrdersApi, OrdersApi},
    config::AppConfig,
    domain::{BillingService, KitchenService, MenuService, StockService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("no order service configured; set TABLESIDE_API_URL or pass --api-url")]
    MissingApiUrl,

    #[error("failed to build HTTP client")]
    Client(#[source] ApiError),

    #[error(transparent)]
    Currency(#[from] ReceiptError),
}

#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn OrdersApi>,
    pub http: Arc<HttpOrdersApi>,
    pub table_count: u32,
    pub currency: &'static Currency,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when no base URL is configured, the HTTP client cannot be built or
    /// the currency code is unknown.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let client_config = config
            .api
            .client_config()
            .ok_or(AppInitError::MissingApiUrl)?;

        let http = Arc::new(HttpOrdersApi::new(client_config).map_err(AppInitError::Client)?);

        Ok(Self {
            api: http.clone(),
            http,
            table_count: config.table_count,
            currency: receipt::currency(&config.currency)?,
        })
    }

    #[must_use]
    pub fn kitchen(&self) -> KitchenService {
        KitchenService::new(self.api.clone())
    }

    #[must_use]
    pub fn billing(&self) -> BillingService {
        BillingService::new(self.api.clone())
    }

    #[must_use]
    pub fn stocks(&self) -> StockService {
        StockService::new(self.api.clone())
    }

    #[must_use]
    pub fn menu(&self) -> MenuService {
        MenuService::new(self.api.clone())
    }
}
