//! Kitchen board service.

use std::{mem, sync::Arc};

use tableside::{
    kitchen::{KitchenError, KitchenEvent, KitchenState},
    orders::{CartId, EntryRef},
    state::Reducer,
};
use tracing::{debug, error, info};

use crate::{
    client::OrdersApi,
    domain::{ServiceError, read_outcome},
};

/// Alert raised when the kitchen cannot mark an entry served.
pub const SERVE_FAILED: &str = "Failed to update item status. Please try again later.";

pub struct KitchenService {
    api: Arc<dyn OrdersApi>,
    state: KitchenState,
}

impl KitchenService {
    #[must_use]
    pub fn new(api: Arc<dyn OrdersApi>) -> Self {
        Self {
            api,
            state: KitchenState::default(),
        }
    }

    pub fn state(&self) -> &KitchenState {
        &self.state
    }

    fn apply(&mut self, event: KitchenEvent) {
        self.state = mem::take(&mut self.state).reduce(event);
    }

    /// Reload every open cart.
    pub async fn refresh(&mut self) -> &KitchenState {
        self.apply(KitchenEvent::FetchStarted);

        match read_outcome("carts", self.api.fetch_carts().await) {
            Ok(carts) => {
                info!(carts = carts.len(), "kitchen board loaded");
                self.apply(KitchenEvent::FetchSucceeded(carts));
            }
            Err(message) => self.apply(KitchenEvent::FetchFailed(message)),
        }

        &self.state
    }

    /// Open a cart in the detail pane.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart is not on the board.
    pub fn select(&mut self, cart: &CartId) -> Result<(), ServiceError> {
        if self.state.cart(cart).is_none() {
            return Err(KitchenError::UnknownCart(cart.clone()).into());
        }

        self.apply(KitchenEvent::CartSelected(cart.clone()));

        Ok(())
    }

    /// Mark one entry served, patching the board only once the server agrees.
    ///
    /// # Errors
    ///
    /// Returns an error, without contacting the server, when the entry is unknown or
    /// already served. Returns the API error, and raises an alert, when the request fails.
    pub async fn mark_served(&mut self, cart: &CartId, entry: EntryRef) -> Result<(), ServiceError> {
        debug!(%cart, kind = %entry.kind(), entry = entry.raw_id(), "marking entry served");

        self.state.check_serve(cart, &entry)?;

        if let Err(error) = self.api.mark_served(cart, &entry).await {
            error!(%cart, entry = entry.raw_id(), %error, "failed to mark entry served");
            self.apply(KitchenEvent::MutationFailed(SERVE_FAILED.to_string()));

            return Err(error.into());
        }

        self.apply(KitchenEvent::EntryServed {
            cart: cart.clone(),
            entry,
        });

        Ok(())
    }
}
