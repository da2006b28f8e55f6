//! Application context for chain access.
//!
//! Bundles the HTTP provider with the resolved configuration so the fetch
//! layer takes a single argument. The context is built once at startup and
//! borrowed everywhere else.

use alloy::network::Ethereum;
use alloy::providers::RootProvider;
use eyre::Result;

use crate::config::Config;
use crate::utils::providers::create_http_provider;

/// Application context holding the shared network provider and configuration.
pub struct AppContext {
    /// HTTP provider for balance and reserve calls
    pub provider: RootProvider<Ethereum>,
    /// Resolved application configuration
    pub config: Config,
}

impl AppContext {
    /// Creates a new application context from a resolved configuration.
    ///
    /// # Returns
    /// * `Result<Self>` - The initialized context or an error
    ///
    /// # Errors
    /// * If the provider connection cannot be built
    pub fn new(config: Config) -> Result<Self> {
        let provider = create_http_provider(&config)?;
        Ok(Self { provider, config })
    }
}
