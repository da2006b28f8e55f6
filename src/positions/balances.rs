use std::collections::HashMap;

use alloy::primitives::U256;

use super::token::TokenId;

/// The latest liquidity-token balance snapshot for an account.
///
/// A missing entry means the balance is unknown (not yet fetched), which is
/// distinct from a known zero. The snapshot is owned by the fetch layer; the
/// aggregation pipeline only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceSnapshot {
    /// Map of liquidity-token IDs to their last known balances
    pub balances: HashMap<TokenId, U256>,
    /// Whether a balance refresh is currently in flight
    pub fetching: bool,
}

impl BalanceSnapshot {
    /// Creates a settled snapshot from fetched balances.
    #[must_use]
    pub fn settled(balances: HashMap<TokenId, U256>) -> Self {
        Self {
            balances,
            fetching: false,
        }
    }

    /// Returns the balance of a token if it is known.
    #[must_use]
    pub fn balance(&self, token: &TokenId) -> Option<U256> {
        self.balances.get(token).copied()
    }

    /// Whether the token has a known, strictly positive balance.
    #[must_use]
    pub fn has_positive(&self, token: &TokenId) -> bool {
        self.balance(token).is_some_and(|balance| balance > U256::ZERO)
    }
}
