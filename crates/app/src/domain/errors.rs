//! Screen service errors.

use tableside::{billing::BillingError, kitchen::KitchenError, menu::MenuEditError};
use thiserror::Error;

use crate::client::ApiError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("the page could not be loaded: {0}")]
    Load(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Kitchen(#[from] KitchenError),

    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    MenuEdit(#[from] MenuEditError),

    #[error("{0} is not listed")]
    NotListed(String),
}
