//! Order Service Config

use std::time::Duration;

use clap::Args;

use crate::client::HttpOrdersApiConfig;

/// Order service settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the order service
    #[arg(long, env = "TABLESIDE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "TABLESIDE_REQUEST_TIMEOUT_SECS", default_value_t = 10u64, global = true)]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Client settings, or `None` when no base URL is configured.
    pub fn client_config(&self) -> Option<HttpOrdersApiConfig> {
        let base_url = self.api_url.as_deref().map(str::trim).filter(|url| !url.is_empty())?;

        Some(HttpOrdersApiConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }
}
