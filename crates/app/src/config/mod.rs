//! Application configuration module

use clap::Args;

pub(crate) mod api;
pub(crate) mod observability;

pub use api::ApiConfig;
pub use observability::{LogFormat, LoggingConfig};

/// Settings shared by every `tableside` subcommand.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Order service settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Number of tables offered by the table selector
    #[arg(long, env = "TABLESIDE_TABLE_COUNT", default_value_t = tableside::billing::DEFAULT_TABLE_COUNT, global = true)]
    pub table_count: u32,

    /// ISO 4217 currency used when printing bills
    #[arg(long, env = "TABLESIDE_CURRENCY", default_value = "USD", global = true)]
    pub currency: String,
}
