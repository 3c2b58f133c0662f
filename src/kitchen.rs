//! Kitchen Board
//!
//! Snapshot of the kitchen order board: every open cart, its aggregate status bucket, the
//! cart shown in the detail pane and any pending alert. The partition is recomputed each
//! time the carts change, never cached beyond that.

use thiserror::Error;

use crate::{
    aggregation::{AggregateStatus, StatusPartition},
    orders::{CartId, CartRecord, EntryKind, EntryRef},
    state::{LoadState, Reducer},
};

/// Reasons a served request must not be issued.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KitchenError {
    /// The cart is not on the board.
    #[error("cart {0} is not on the board")]
    UnknownCart(CartId),

    /// The cart has no such entry.
    #[error("cart {cart} has no {kind} {entry}")]
    UnknownEntry {
        /// Cart searched
        cart: CartId,
        /// Collection searched
        kind: EntryKind,
        /// Raw entry id
        entry: String,
    },

    /// The entry is already served; the transition is terminal.
    #[error("{0} is already served")]
    AlreadyServed(String),
}

/// Kitchen board snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KitchenState {
    load: LoadState,
    carts: Vec<CartRecord>,
    partition: StatusPartition,
    selected: Option<CartId>,
    alert: Option<String>,
}

/// Everything that can happen to the kitchen board.
#[derive(Debug, Clone, PartialEq)]
pub enum KitchenEvent {
    /// A fetch of the cart list was issued.
    FetchStarted,

    /// The cart list arrived.
    FetchSucceeded(Vec<CartRecord>),

    /// The cart list could not be read.
    FetchFailed(String),

    /// The operator opened a cart in the detail pane.
    CartSelected(CartId),

    /// The server confirmed an entry as served.
    EntryServed {
        /// Cart holding the entry
        cart: CartId,
        /// Entry that was served
        entry: EntryRef,
    },

    /// A served request failed.
    MutationFailed(String),

    /// The operator acknowledged the alert.
    AlertDismissed,
}

impl KitchenState {
    /// Current load state.
    pub fn load(&self) -> &LoadState {
        &self.load
    }

    /// Carts in server order.
    pub fn carts(&self) -> &[CartRecord] {
        &self.carts
    }

    /// Carts bucketed by aggregate status.
    pub fn partition(&self) -> &StatusPartition {
        &self.partition
    }

    /// Aggregate status of a cart on the board.
    pub fn status_of(&self, cart: &CartId) -> Option<AggregateStatus> {
        self.partition.status_of(cart)
    }

    /// Cart shown in the detail pane.
    pub fn selected(&self) -> Option<&CartRecord> {
        self.selected.as_ref().and_then(|id| self.cart(id))
    }

    /// Pending alert for the operator.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Look up a cart by id.
    pub fn cart(&self, id: &CartId) -> Option<&CartRecord> {
        self.carts.iter().find(|cart| &cart.id == id)
    }

    /// Check that a served request for `entry` is allowed.
    ///
    /// # Errors
    ///
    /// Returns a [`KitchenError`] when the cart or entry is unknown, or when the entry is
    /// already served.
    pub fn check_serve(&self, cart: &CartId, entry: &EntryRef) -> Result<(), KitchenError> {
        let record = self
            .cart(cart)
            .ok_or_else(|| KitchenError::UnknownCart(cart.clone()))?;

        let status = record
            .entry_status(entry)
            .ok_or_else(|| KitchenError::UnknownEntry {
                cart: cart.clone(),
                kind: entry.kind(),
                entry: entry.raw_id().to_string(),
            })?;

        if status.is_served() {
            return Err(KitchenError::AlreadyServed(entry.raw_id().to_string()));
        }

        Ok(())
    }

    fn with_carts(mut self, carts: Vec<CartRecord>) -> Self {
        self.partition = StatusPartition::from_carts(&carts);
        self.carts = carts;

        if let Some(selected) = &self.selected
            && self.cart(selected).is_none()
        {
            self.selected = None;
        }

        self
    }
}

impl Reducer for KitchenState {
    type Event = KitchenEvent;

    fn reduce(mut self, event: KitchenEvent) -> Self {
        match event {
            KitchenEvent::FetchStarted => {
                self.load = LoadState::Loading;
                self
            }
            KitchenEvent::FetchSucceeded(carts) => {
                self.load = LoadState::Loaded;
                self.with_carts(carts)
            }
            KitchenEvent::FetchFailed(message) => {
                self.load = LoadState::Failed(message);
                self
            }
            KitchenEvent::CartSelected(id) => {
                if self.cart(&id).is_some() {
                    self.selected = Some(id);
                }
                self
            }
            KitchenEvent::EntryServed { cart, entry } => {
                let changed = self
                    .carts
                    .iter_mut()
                    .find(|record| record.id == cart)
                    .is_some_and(|record| record.mark_served(&entry));

                if changed {
                    self.partition = StatusPartition::from_carts(&self.carts);
                }

                self
            }
            KitchenEvent::MutationFailed(message) => {
                self.alert = Some(message);
                self
            }
            KitchenEvent::AlertDismissed => {
                self.alert = None;
                self
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::orders::{
        ServingStatus::{NotServed, Served},
        test_support::{cart, combo, item},
    };

    use super::*;

    fn loaded() -> KitchenState {
        KitchenState::default().reduce_all([
            KitchenEvent::FetchStarted,
            KitchenEvent::FetchSucceeded(vec![
                cart(
                    "c1",
                    3,
                    vec![item("i1", "Rice", 2, NotServed)],
                    vec![combo("k1", "Thali", NotServed)],
                ),
                cart("c2", 5, vec![item("i2", "Dal", 1, Served)], vec![]),
            ]),
        ])
    }

    #[test]
    fn fetch_success_recomputes_partition() {
        let state = loaded();

        assert_eq!(state.load(), &LoadState::Loaded);
        assert_eq!(state.partition().none, vec![CartId::new("c1")]);
        assert_eq!(state.partition().all, vec![CartId::new("c2")]);
    }

    #[test]
    fn fetch_failure_sets_page_error() {
        let state = KitchenState::default().reduce_all([
            KitchenEvent::FetchStarted,
            KitchenEvent::FetchFailed("connection refused".to_string()),
        ]);

        assert_eq!(state.load().error(), Some("connection refused"));
        assert!(state.carts().is_empty());
    }

    #[test]
    fn entry_served_patches_only_target_and_moves_bucket() {
        let state = loaded().reduce_all([
            KitchenEvent::EntryServed {
                cart: CartId::new("c1"),
                entry: EntryRef::Item("i1".into()),
            },
            KitchenEvent::EntryServed {
                cart: CartId::new("c1"),
                entry: EntryRef::Combo("k1".into()),
            },
        ]);

        assert_eq!(
            state.status_of(&CartId::new("c1")),
            Some(AggregateStatus::AllServed)
        );
    }

    #[test]
    fn mutation_failure_leaves_statuses_unchanged() {
        let before = loaded();
        let after = before
            .clone()
            .reduce(KitchenEvent::MutationFailed("Failed to update item status".into()));

        assert_eq!(after.carts(), before.carts());
        assert_eq!(after.partition(), before.partition());
        assert_eq!(after.alert(), Some("Failed to update item status"));

        let dismissed = after.reduce(KitchenEvent::AlertDismissed);
        assert_eq!(dismissed.alert(), None);
    }

    #[test]
    fn selection_survives_refetch_only_while_cart_exists() {
        let state = loaded().reduce(KitchenEvent::CartSelected(CartId::new("c2")));
        assert_eq!(state.selected().map(|c| c.table_number), Some(5));

        let kept = state.clone().reduce(KitchenEvent::FetchSucceeded(vec![cart(
            "c2",
            5,
            vec![],
            vec![],
        )]));
        assert!(kept.selected().is_some());

        let dropped = state.reduce(KitchenEvent::FetchSucceeded(vec![]));
        assert!(dropped.selected().is_none());
    }

    #[test]
    fn selecting_unknown_cart_is_ignored() {
        let state = loaded().reduce(KitchenEvent::CartSelected(CartId::new("nope")));

        assert!(state.selected().is_none());
    }

    #[test]
    fn check_serve_rejects_served_and_unknown_entries() {
        let state = loaded();

        assert_eq!(
            state.check_serve(&CartId::new("c1"), &EntryRef::Item("i1".into())),
            Ok(())
        );
        assert_eq!(
            state.check_serve(&CartId::new("c2"), &EntryRef::Item("i2".into())),
            Err(KitchenError::AlreadyServed("i2".to_string()))
        );
        assert!(matches!(
            state.check_serve(&CartId::new("c1"), &EntryRef::Item("k1".into())),
            Err(KitchenError::UnknownEntry { .. })
        ));
        assert!(matches!(
            state.check_serve(&CartId::new("zz"), &EntryRef::Item("i1".into())),
            Err(KitchenError::UnknownCart(_))
        ));
    }
}
