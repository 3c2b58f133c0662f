//! Order service client, screen services and runtime setup for the `tableside` CLI.

pub mod client;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;
