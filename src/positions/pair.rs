use std::fmt::{self, Debug, Display};

use eyre::{bail, Result};

use super::token::TokenId;

/// An unordered pair of two distinct tokens forming a V2 pool
///
/// Tokens are held in canonical (ascending address) order, matching the
/// order the pair contract itself uses, so two pairs built from the same
/// tokens in either order compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenPair {
    /// The lower-addressed token of the pair
    token0: TokenId,
    /// The higher-addressed token of the pair
    token1: TokenId,
}

impl TokenPair {
    /// Creates a pair from two tokens, sorting them into canonical order.
    ///
    /// # Arguments
    ///
    /// * `a` - One token of the pair
    /// * `b` - The other token of the pair
    ///
    /// # Errors
    ///
    /// Returns an error if the two tokens are identical
    pub fn new(a: TokenId, b: TokenId) -> Result<Self> {
        if a == b {
            bail!("Pair tokens must be distinct");
        }
        let (token0, token1) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { token0, token1 })
    }

    /// The lower-addressed token
    #[must_use]
    pub const fn token0(&self) -> TokenId {
        self.token0
    }

    /// The higher-addressed token
    #[must_use]
    pub const fn token1(&self) -> TokenId {
        self.token1
    }

    /// Whether the pair contains the given token
    #[must_use]
    pub fn contains(&self, token: TokenId) -> bool {
        self.token0 == token || self.token1 == token
    }
}

impl Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pair({:?}, {:?})", self.token0, self.token1)
    }
}

impl Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token0, self.token1)
    }
}
