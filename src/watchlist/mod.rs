//! # Watchlist Module
//!
//! The tracked-pair provider: the ordered set of token pairs the session
//! watches. Seeded with every distinct combination of the well-known base
//! tokens, then extended with user-imported pairs from an optional JSON
//! watchlist file. The aggregation pipeline de-duplicates downstream, so the
//! list itself only guarantees order, not uniqueness.

use std::fs;
use std::path::Path;

use alloy::primitives::Address;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::positions::pair::TokenPair;
use crate::positions::token::TokenId;
use crate::utils::constants::BASE_TOKENS;

/// One entry of the watchlist file
#[derive(Debug, Serialize, Deserialize)]
struct WatchEntry {
    /// One token of the pair
    token0: Address,
    /// The other token of the pair
    token1: Address,
}

/// The ordered set of tracked token pairs
#[derive(Debug, Clone, Default)]
pub struct WatchList {
    /// Tracked pairs in presentation order
    pairs: Vec<TokenPair>,
}

impl WatchList {
    /// The default watchlist: every distinct combination of the base tokens.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut pairs = Vec::new();
        for (i, &base) in BASE_TOKENS.iter().enumerate() {
            for &other in &BASE_TOKENS[i + 1..] {
                // Distinct by construction of BASE_TOKENS
                if let Ok(pair) = TokenPair::new(TokenId::new(base), TokenId::new(other)) {
                    pairs.push(pair);
                }
            }
        }
        Self { pairs }
    }

    /// Loads the watchlist: defaults first, then the entries of the given
    /// file, in file order. A missing file is not an error.
    ///
    /// # Errors
    /// * If the file exists but cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut list = Self::with_defaults();
        if let Some(path) = path {
            if path.exists() {
                let raw = fs::read_to_string(path)
                    .wrap_err_with(|| format!("reading watchlist {}", path.display()))?;
                let before = list.pairs.len();
                list.extend_from_json(&raw)?;
                log::info!(
                    "watchlist: loaded {} imported pairs from {}",
                    list.pairs.len() - before,
                    path.display()
                );
            }
        }
        Ok(list)
    }

    /// Appends the pairs of a JSON entry list.
    ///
    /// Malformed entries (identical tokens) violate the provider contract;
    /// they are skipped with a warning rather than failing the session.
    fn extend_from_json(&mut self, raw: &str) -> Result<()> {
        let entries: Vec<WatchEntry> = serde_json::from_str(raw)?;
        for entry in entries {
            match TokenPair::new(TokenId::new(entry.token0), TokenId::new(entry.token1)) {
                Ok(pair) => self.pairs.push(pair),
                Err(e) => log::warn!("watchlist: skipping malformed entry: {e}"),
            }
        }
        Ok(())
    }

    /// Imports a pair into the watchlist file, creating the file if needed.
    ///
    /// # Arguments
    /// * `path` - The watchlist file
    /// * `token0` - One token of the pair
    /// * `token1` - The other token of the pair
    ///
    /// # Returns
    /// The imported pair
    ///
    /// # Errors
    /// * If the tokens do not form a valid pair
    /// * If the file cannot be read, parsed or written
    pub fn import(path: &Path, token0: Address, token1: Address) -> Result<TokenPair> {
        let pair = TokenPair::new(TokenId::new(token0), TokenId::new(token1))?;

        let mut entries: Vec<WatchEntry> = if path.exists() {
            serde_json::from_str(&fs::read_to_string(path)?)?
        } else {
            Vec::new()
        };
        entries.push(WatchEntry {
            token0: pair.token0().address(),
            token1: pair.token1().address(),
        });

        fs::write(path, serde_json::to_string_pretty(&entries)?)
            .wrap_err_with(|| format!("writing watchlist {}", path.display()))?;
        Ok(pair)
    }

    /// The tracked pairs in order
    #[must_use]
    pub fn pairs(&self) -> &[TokenPair] {
        &self.pairs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::WatchList;

    #[test]
    fn test_default_grid() {
        // 5 base tokens, every distinct combination
        let list = WatchList::with_defaults();
        assert_eq!(list.pairs().len(), 10);
    }

    #[test]
    fn test_extend_from_json() {
        let mut list = WatchList::default();
        list.extend_from_json(
            r#"[
                {
                    "token0": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
                    "token1": "0x6B175474E89094C44Da98b954EedeAC495271d0F"
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(list.pairs().len(), 1);
    }

    #[test]
    fn test_malformed_entry_skipped() {
        let mut list = WatchList::default();
        list.extend_from_json(
            r#"[
                {
                    "token0": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
                    "token1": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"
                },
                {
                    "token0": "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
                    "token1": "0x6B175474E89094C44Da98b954EedeAC495271d0F"
                }
            ]"#,
        )
        .unwrap();

        // The self-referential entry is dropped, the valid one kept
        assert_eq!(list.pairs().len(), 1);
    }
}
