use std::fmt::{self, Debug};

use alloy::primitives::Address;
use derive_more::Display;

/// A unique identifier for a fungible token
///
/// Wraps the token's contract address for strict typing. Liquidity tokens
/// are ordinary tokens and share this identifier type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{_0}")]
pub struct TokenId(Address);

impl TokenId {
    /// Create a new token identifier
    #[must_use]
    pub const fn new(address: Address) -> Self {
        Self(address)
    }

    /// The token's contract address
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }
}

impl From<Address> for TokenId {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
