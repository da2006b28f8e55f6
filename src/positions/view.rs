use alloy::primitives::U256;
use derive_more::Display;

use super::pair::TokenPair;
use super::reserves::PairReserves;
use super::token::TokenId;

/// A resolved liquidity position, produced only for pairs with a strictly
/// positive liquidity-token balance and resolved reserves.
///
/// Derived and ephemeral: recomputed on every input change, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionView {
    /// The pair the position is held in
    pub pair: TokenPair,
    /// The pool's liquidity token
    pub liquidity_token: TokenId,
    /// The account's liquidity-token balance
    pub balance: U256,
    /// The pool's resolved reserve state
    pub reserves: PairReserves,
}

/// What the presentation layer should display.
///
/// Exactly one variant holds per evaluation. Connection state dominates
/// loading state, which dominates emptiness: a disconnected wallet never
/// shows a loading or empty layout, and an unsettled fetch never shows
/// "empty" prematurely.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ViewState {
    /// No wallet is connected
    #[display("disconnected")]
    Disconnected,
    /// A dependent fetch for the current candidate set has not settled
    #[display("loading")]
    Loading,
    /// The account holds at least one resolved position
    #[display("{} active position(s)", _0.len())]
    HasPositions(Vec<PositionView>),
    /// The account holds no resolved positions
    #[display("empty")]
    Empty,
}

impl ViewState {
    /// The resolved position list, present only in the
    /// [`ViewState::HasPositions`] case.
    #[must_use]
    pub fn positions(&self) -> &[PositionView] {
        match self {
            Self::HasPositions(positions) => positions,
            _ => &[],
        }
    }
}
