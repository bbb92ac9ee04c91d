//! Text search over coin listings.

use super::records::CoinRecord;

/// Keep coins whose name, symbol or description contains `query`,
/// ignoring case, stopping after `limit` matches. Input order is preserved.
#[must_use]
pub fn filter_coins(coins: Vec<CoinRecord>, query: &str, limit: usize) -> Vec<CoinRecord> {
    let needle = query.to_lowercase();
    coins
        .into_iter()
        .filter(|coin| {
            coin.name.to_lowercase().contains(&needle)
                || coin.symbol.to_lowercase().contains(&needle)
                || coin.description.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect()
}
