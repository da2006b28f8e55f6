use std::collections::HashMap;

use alloy::sol;
use futures_util::future::join_all;

use crate::positions::aggregator::Candidate;
use crate::positions::pair::TokenPair;
use crate::positions::reserves::{PairReserves, ReserveEntry};
use crate::utils::app_context::AppContext;

sol!(
    #[sol(rpc)]
    contract UniswapV2Pair {
        function getReserves() external view returns (uint256 reserve0, uint256 reserve1, uint256 blockTimestampLast);
        function totalSupply() external view returns (uint256);
    }
);

/// Fetches reserve state for the candidate set.
///
/// The candidate list is the explicit scope of the request: reserves are
/// never fetched for pairs the account holds no balance in. Every requested
/// pair gets exactly one settled entry back; a failed call settles as
/// [`ReserveEntry::Unavailable`] rather than erroring, since a delisted or
/// flaky pair must not take the whole view down.
///
/// # Arguments
/// * `ctx` - Application context
/// * `candidates` - The pairs to fetch, with their liquidity tokens
///
/// # Returns
/// One settled entry per requested pair
pub async fn fetch_reserves(
    ctx: &AppContext,
    candidates: &[Candidate],
) -> HashMap<TokenPair, ReserveEntry> {
    log::debug!(
        "sync::reserves: fetching reserves for {} candidates",
        candidates.len()
    );

    let calls = candidates.iter().map(|candidate| {
        let provider = &ctx.provider;
        let pair = candidate.tracked.pair;
        let pool = candidate.tracked.liquidity_token.address();
        async move {
            let contract = UniswapV2Pair::new(pool, provider);
            let state = async {
                let reserves = contract.getReserves().call().await?;
                let supply = contract.totalSupply().call().await?._0;
                Ok::<_, alloy::contract::Error>(PairReserves {
                    reserve0: reserves.reserve0,
                    reserve1: reserves.reserve1,
                    total_supply: supply,
                })
            }
            .await;

            let entry = match state {
                Ok(reserves) => ReserveEntry::Ready(reserves),
                Err(e) => {
                    log::debug!("sync::reserves: {pair} unavailable: {e}");
                    ReserveEntry::Unavailable
                }
            };
            (pair, entry)
        }
    });

    join_all(calls).await.into_iter().collect()
}
