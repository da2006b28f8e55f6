//! Configuration management for the watcher.
//!
//! All settings come from the environment (a `.env` file is honored by the
//! binary). Only the RPC URL is required; everything else has a sensible
//! default or is optional.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::Address;
use eyre::{eyre, Result, WrapErr};

/// Default seconds between evaluation cycles when `PERCH_POLL_SECS` is unset
const DEFAULT_POLL_SECS: u64 = 15;

/// Application configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP RPC endpoint (`PERCH_RPC_URL`, required)
    pub rpc_url: String,
    /// WebSocket endpoint for Sync-event nudges (`PERCH_WS_URL`, optional)
    pub ws_url: Option<String>,
    /// Wallet to view positions for (`PERCH_ACCOUNT`, optional; absent means
    /// no wallet is connected)
    pub account: Option<Address>,
    /// Path of the JSON watchlist file (`PERCH_WATCHLIST`, optional)
    pub watchlist_path: Option<PathBuf>,
    /// Delay between evaluation cycles (`PERCH_POLL_SECS`)
    pub poll_interval: Duration,
    /// Warn-log pairs whose reserve lookups settle unavailable
    /// (`PERCH_WARN_UNAVAILABLE`)
    pub warn_unavailable: bool,
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// # Returns
    /// The resolved configuration
    ///
    /// # Errors
    /// * If `PERCH_RPC_URL` is not set
    /// * If `PERCH_ACCOUNT` is set but not a valid address
    pub fn from_env() -> Result<Self> {
        let rpc_url =
            env::var("PERCH_RPC_URL").map_err(|_| eyre!("PERCH_RPC_URL must be set"))?;

        let account = match env::var("PERCH_ACCOUNT") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<Address>()
                    .wrap_err("PERCH_ACCOUNT is not a valid address")?,
            ),
            Err(_) => None,
        };

        let poll_secs = env::var("PERCH_POLL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_SECS);

        let warn_unavailable = env::var("PERCH_WARN_UNAVAILABLE")
            .is_ok_and(|raw| raw == "1" || raw.eq_ignore_ascii_case("true"));

        Ok(Self {
            rpc_url,
            ws_url: env::var("PERCH_WS_URL").ok(),
            account,
            watchlist_path: env::var("PERCH_WATCHLIST").ok().map(PathBuf::from),
            poll_interval: Duration::from_secs(poll_secs),
            warn_unavailable,
        })
    }
}
