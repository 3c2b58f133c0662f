//! Screen Services
//!
//! Each service owns one screen's snapshot and advances it only through the core reducers,
//! feeding them the outcome of calls to the order service.

use tracing::{error, warn};

use crate::client::ApiError;

pub mod billing;
pub mod errors;
pub mod kitchen;
pub mod menu;
pub mod stocks;

pub use billing::BillingService;
pub use errors::ServiceError;
pub use kitchen::KitchenService;
pub use menu::MenuService;
pub use stocks::StockService;

/// Fold a read result into what the screen shows.
///
/// A network failure is reported as the page error. A response in the wrong shape is
/// logged and shown as an empty list.
pub(crate) fn read_outcome<T: Default>(what: &str, result: Result<T, ApiError>) -> Result<T, String> {
    match result {
        Ok(value) => Ok(value),
        Err(error) if error.is_network_failure() => {
            error!(what, %error, "failed to fetch");
            Err(error.to_string())
        }
        Err(error) => {
            warn!(what, %error, "malformed list, showing it as empty");
            Ok(T::default())
        }
    }
}
