use std::collections::HashMap;

use alloy::primitives::U256;

use super::pair::TokenPair;

/// The fetched on-chain state of a pair's pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairReserves {
    /// Reserve of token0
    pub reserve0: U256,
    /// Reserve of token1
    pub reserve1: U256,
    /// Total supply of the pool's liquidity token
    pub total_supply: U256,
}

/// The state of one pair's reserve request within the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveEntry {
    /// The request is still in flight
    Pending,
    /// The request completed but yielded no usable value
    Unavailable,
    /// The request resolved
    Ready(PairReserves),
}

impl ReserveEntry {
    /// Whether the entry has settled (resolved or definitively failed)
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The resolved reserves, if any
    #[must_use]
    pub const fn reserves(&self) -> Option<PairReserves> {
        match self {
            Self::Ready(reserves) => Some(*reserves),
            _ => None,
        }
    }
}

/// The latest reserve snapshot, keyed by pair.
///
/// A pair with no entry has not had a request issued yet; the pipeline
/// treats it the same as [`ReserveEntry::Pending`]. Owned by the fetch
/// layer; the aggregation pipeline only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReserveBook {
    /// Reserve entries for the pairs a request was issued for
    entries: HashMap<TokenPair, ReserveEntry>,
}

impl ReserveBook {
    /// Returns the entry for a pair, if a request was issued for it.
    #[must_use]
    pub fn entry(&self, pair: &TokenPair) -> Option<&ReserveEntry> {
        self.entries.get(pair)
    }

    /// Records an entry for a pair.
    pub fn record(&mut self, pair: TokenPair, entry: ReserveEntry) {
        self.entries.insert(pair, entry);
    }

    /// Narrows the book to the given candidate set.
    ///
    /// Entries for pairs that dropped out of the candidate set are stale;
    /// their eventual results no longer match the current inputs and must
    /// not linger into the next evaluation.
    pub fn narrow_to(&mut self, candidates: &[TokenPair]) {
        self.entries.retain(|pair, _| candidates.contains(pair));
    }

    /// Applies fetched entries, discarding any for pairs that are no longer
    /// candidates (last-input-wins).
    pub fn apply(
        &mut self,
        fetched: HashMap<TokenPair, ReserveEntry>,
        candidates: &[TokenPair],
    ) {
        for (pair, entry) in fetched {
            if candidates.contains(&pair) {
                self.entries.insert(pair, entry);
            } else {
                log::debug!("positions::reserves: discarding stale response for {pair}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::super::test_helpers::*;
    use super::{ReserveBook, ReserveEntry};

    #[test]
    fn test_missing_entry_is_unsettled() {
        let book = ReserveBook::default();
        assert_eq!(book.entry(&pair("A", "B")), None);
    }

    #[test]
    fn test_narrow_discards_stale_entries() {
        let ab = pair("A", "B");
        let cd = pair("C", "D");

        let mut book = ReserveBook::default();
        book.record(ab, ready(100, 200, 50));
        book.record(cd, ready(300, 400, 60));

        // C/D dropped out of the candidate set
        book.narrow_to(&[ab]);

        assert!(book.entry(&ab).is_some());
        assert_eq!(book.entry(&cd), None);
    }

    #[test]
    fn test_apply_discards_non_candidates() {
        let ab = pair("A", "B");
        let cd = pair("C", "D");

        let mut fetched = HashMap::new();
        fetched.insert(ab, ready(100, 200, 50));
        fetched.insert(cd, ReserveEntry::Unavailable);

        let mut book = ReserveBook::default();
        book.apply(fetched, &[ab]);

        assert!(book.entry(&ab).is_some());
        assert_eq!(book.entry(&cd), None);
    }
}
