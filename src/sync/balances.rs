use std::collections::HashMap;

use alloy::primitives::{Address, U256};
use alloy::sol;
use eyre::Result;
use futures_util::future::join_all;

use crate::positions::token::TokenId;
use crate::utils::app_context::AppContext;

sol!(
    #[sol(rpc)]
    contract Erc20 {
        function balanceOf(address owner) external view returns (uint256);
    }
);

/// Fetches the account's balances for a set of liquidity tokens.
///
/// Calls are batched concurrently. A failed call leaves its token absent
/// from the result (unknown, not zero), so a transient RPC error never
/// reads as a closed position. `account = None` short-circuits to an empty
/// mapping without issuing any call.
///
/// # Arguments
/// * `ctx` - Application context
/// * `account` - The wallet to query, or `None` when disconnected
/// * `tokens` - The liquidity tokens to query
///
/// # Returns
/// A mapping from token to known balance
///
/// # Errors
/// This function itself does not fail; the `Result` covers future transport
/// setup errors and keeps the signature uniform with the fetch layer.
pub async fn fetch_balances(
    ctx: &AppContext,
    account: Option<Address>,
    tokens: &[TokenId],
) -> Result<HashMap<TokenId, U256>> {
    let Some(owner) = account else {
        return Ok(HashMap::new());
    };

    log::debug!("sync::balances: fetching {} balances", tokens.len());

    let calls = tokens.iter().map(|&token| {
        let provider = &ctx.provider;
        async move {
            let erc20 = Erc20::new(token.address(), provider);
            (token, erc20.balanceOf(owner).call().await)
        }
    });

    let mut balances = HashMap::with_capacity(tokens.len());
    for (token, result) in join_all(calls).await {
        match result {
            Ok(returned) => {
                balances.insert(token, returned._0);
            }
            Err(e) => {
                log::debug!("sync::balances: balanceOf({token}) failed: {e}");
            }
        }
    }

    Ok(balances)
}
