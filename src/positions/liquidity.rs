//! Canonical liquidity-token derivation.
//!
//! The V2 factory deploys pair contracts with CREATE2, so the address of a
//! pair's liquidity token is a pure function of the sorted token pair. The
//! derivation here never touches the chain.

use alloy::primitives::keccak256;

use super::pair::TokenPair;
use super::token::TokenId;
use crate::utils::constants::{PAIR_INIT_CODE_HASH, UNISWAP_V2_FACTORY};

/// Derives the canonical liquidity token of a pair.
///
/// Deterministic and injective over distinct pairs: the CREATE2 salt is the
/// hash of the packed sorted token addresses.
///
/// # Arguments
///
/// * `pair` - The token pair to derive the liquidity token for
///
/// # Returns
///
/// The liquidity-token identifier of the pair's pool
#[must_use]
pub fn liquidity_token(pair: &TokenPair) -> TokenId {
    let mut packed = [0u8; 40];
    packed[..20].copy_from_slice(pair.token0().address().as_slice());
    packed[20..].copy_from_slice(pair.token1().address().as_slice());
    let salt = keccak256(packed);

    TokenId::new(UNISWAP_V2_FACTORY.create2(salt, PAIR_INIT_CODE_HASH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use alloy::primitives::address;

    use super::super::pair::TokenPair;
    use super::super::test_helpers::*;
    use super::super::token::TokenId;
    use super::liquidity_token;
    use crate::utils::constants::{USDC, WETH};

    #[test]
    fn test_known_mainnet_pair() {
        // The USDC/WETH pool, deployed May 2020
        let pair = TokenPair::new(TokenId::new(USDC), TokenId::new(WETH)).unwrap();
        assert_eq!(
            liquidity_token(&pair).address(),
            address!("0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc")
        );
    }

    #[test]
    fn test_order_independent() {
        let forward = TokenPair::new(TokenId::new(USDC), TokenId::new(WETH)).unwrap();
        let backward = TokenPair::new(TokenId::new(WETH), TokenId::new(USDC)).unwrap();

        assert_eq!(liquidity_token(&forward), liquidity_token(&backward));
    }

    #[test]
    fn test_injective() {
        let pairs = [pair("A", "B"), pair("A", "C"), pair("B", "C")];

        for (i, left) in pairs.iter().enumerate() {
            for right in &pairs[i + 1..] {
                assert_ne!(liquidity_token(left), liquidity_token(right));
            }
        }
    }
}
