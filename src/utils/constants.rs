use alloy::primitives::{address, b256, Address, B256};

/// Uniswap V2 factory on Ethereum mainnet
pub const UNISWAP_V2_FACTORY: Address = address!("0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f");

/// Init code hash of the Uniswap V2 pair contract, input to the CREATE2
/// pair-address derivation
pub const PAIR_INIT_CODE_HASH: B256 =
    b256!("0x96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f");

/// WETH address
pub const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
/// USDC address
pub const USDC: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
/// USDT address
pub const USDT: Address = address!("0xdAC17F958D2ee523a2206206994597C13D831ec7");
/// DAI address
pub const DAI: Address = address!("0x6B175474E89094C44Da98b954EedeAC495271d0F");
/// WBTC address
pub const WBTC: Address = address!("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599");

/// Base tokens whose pairwise combinations seed the default watchlist
pub const BASE_TOKENS: [Address; 5] = [WETH, USDC, USDT, DAI, WBTC];

/// Decimals of V2 liquidity tokens (fixed by the pair contract)
pub const LP_TOKEN_DECIMALS: u32 = 18;
