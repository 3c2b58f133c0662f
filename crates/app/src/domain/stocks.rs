//! Stock availability service.

use std::{mem, sync::Arc};

use tableside::{
    state::Reducer,
    stocks::{Availability, StockEvent, StockRef, StockState},
};
use tracing::{error, info};

use crate::{
    client::OrdersApi,
    domain::{ServiceError, read_outcome},
};

/// Alert raised when an availability toggle fails.
pub const UPDATE_FAILED: &str = "Error updating availability. Please try again.";

pub struct StockService {
    api: Arc<dyn OrdersApi>,
    state: StockState,
}

impl StockService {
    #[must_use]
    pub fn new(api: Arc<dyn OrdersApi>) -> Self {
        Self {
            api,
            state: StockState::default(),
        }
    }

    pub fn state(&self) -> &StockState {
        &self.state
    }

    fn apply(&mut self, event: StockEvent) {
        self.state = mem::take(&mut self.state).reduce(event);
    }

    /// Reload menu item and combo stocks.
    pub async fn refresh(&mut self) -> &StockState {
        self.apply(StockEvent::FetchStarted);

        let (items, combos) = tokio::join!(self.api.list_stock_items(), self.api.list_combo_stocks());

        match (
            read_outcome("stock items", items),
            read_outcome("combos", combos),
        ) {
            (Ok(items), Ok(combos)) => {
                info!(items = items.len(), combos = combos.len(), "stocks loaded");
                self.apply(StockEvent::FetchSucceeded { items, combos });
            }
            (Err(message), _) | (_, Err(message)) => {
                self.apply(StockEvent::FetchFailed(message));
            }
        }

        &self.state
    }

    /// Flip a listed entry's availability, updating local state only once the server
    /// accepts it.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry is not listed, or the API error when the update
    /// fails.
    pub async fn toggle(&mut self, target: StockRef) -> Result<Availability, ServiceError> {
        let current = self
            .state
            .availability_of(&target)
            .ok_or_else(|| ServiceError::NotListed(target.raw_id().to_string()))?;

        let availability = current.toggled();

        if let Err(error) = self.api.set_availability(&target, availability).await {
            error!(id = target.raw_id(), %error, "failed to update availability");
            self.apply(StockEvent::UpdateFailed(UPDATE_FAILED.to_string()));

            return Err(error.into());
        }

        self.apply(StockEvent::AvailabilityChanged {
            target,
            availability,
        });

        Ok(availability)
    }
}
