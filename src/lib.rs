//! Tableside
//!
//! Tableside is the kitchen and billing core of a QR-ordering restaurant: it turns the
//! order service's cart documents into a kitchen board bucketed by serving progress,
//! per-table bills ready to be marked paid, and the availability flags of the menu.

pub mod aggregation;
pub mod billing;
pub mod fixtures;
pub mod ids;
pub mod kitchen;
pub mod menu;
pub mod orders;
pub mod prelude;
pub mod receipt;
pub mod state;
pub mod stocks;
pub mod wire;
