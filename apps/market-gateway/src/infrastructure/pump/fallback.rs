//! Degradation policy for the coin market.

use crate::domain::CoinRecord;
use crate::domain::records::DEFAULT_TOTAL_SUPPLY;

/// Upstream status that triggers the fallback. Cloudflare's "origin is
/// unreachable" code, which pump.fun returns during outages.
pub const UNAVAILABLE_STATUS: u16 = 530;

/// What to serve when the coin-market upstream is unavailable.
pub trait DegradationPolicy: Send + Sync + std::fmt::Debug {
    /// Coins to serve instead of a listing, or `None` to serve nothing.
    fn fallback_coins(&self, limit: usize) -> Option<Vec<CoinRecord>>;

    /// Price for a mint that could not be resolved upstream.
    fn fallback_price(&self, mint_address: &str) -> Option<f64>;
}

/// Serves a fixed set of three synthetic coins and their prices.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticCoinFallback;

/// Serves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledFallback;

struct SyntheticCoin {
    mint: &'static str,
    name: &'static str,
    symbol: &'static str,
    description: &'static str,
    usd_market_cap: f64,
    created_timestamp: i64,
}

const SYNTHETIC_COINS: [SyntheticCoin; 3] = [
    SyntheticCoin {
        mint: "11111111111111111111111111111112",
        name: "TestCoin",
        symbol: "TEST",
        description: "A test meme coin for simulation",
        usd_market_cap: 100_000.0,
        created_timestamp: 1_700_000_000,
    },
    SyntheticCoin {
        mint: "22222222222222222222222222222223",
        name: "MoonDoge",
        symbol: "MDOGE",
        description: "Going to the moon with this doge",
        usd_market_cap: 250_000.0,
        created_timestamp: 1_700_000_100,
    },
    SyntheticCoin {
        mint: "33333333333333333333333333333334",
        name: "PepeCoin",
        symbol: "PEPE",
        description: "Rare pepe meme coin",
        usd_market_cap: 500_000.0,
        created_timestamp: 1_700_000_200,
    },
];

impl SyntheticCoin {
    fn record(&self) -> CoinRecord {
        CoinRecord {
            mint_address: self.mint.to_string(),
            name: self.name.to_string(),
            symbol: self.symbol.to_string(),
            description: self.description.to_string(),
            image_uri: Some("https://via.placeholder.com/100".to_string()),
            usd_market_cap: Some(self.usd_market_cap),
            total_supply: Some(DEFAULT_TOTAL_SUPPLY),
            created_timestamp: Some(self.created_timestamp),
            last_trade_timestamp: Some(self.created_timestamp + 1_000),
            nsfw: false,
            complete: false,
        }
    }
}

impl DegradationPolicy for SyntheticCoinFallback {
    fn fallback_coins(&self, limit: usize) -> Option<Vec<CoinRecord>> {
        Some(
            SYNTHETIC_COINS
                .iter()
                .take(limit)
                .map(SyntheticCoin::record)
                .collect(),
        )
    }

    fn fallback_price(&self, mint_address: &str) -> Option<f64> {
        SYNTHETIC_COINS
            .iter()
            .find(|coin| coin.mint == mint_address)
            .and_then(|coin| coin.record().implied_price())
    }
}

impl DegradationPolicy for DisabledFallback {
    fn fallback_coins(&self, _limit: usize) -> Option<Vec<CoinRecord>> {
        None
    }

    fn fallback_price(&self, _mint_address: &str) -> Option<f64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_coins_truncate_in_fixed_order() {
        let coins = SyntheticCoinFallback.fallback_coins(2).unwrap();
        let names: Vec<_> = coins.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["TestCoin", "MoonDoge"]);

        assert_eq!(SyntheticCoinFallback.fallback_coins(10).unwrap().len(), 3);
        assert!(SyntheticCoinFallback.fallback_coins(0).unwrap().is_empty());
    }

    #[test]
    fn synthetic_coin_content_is_stable() {
        let coins = SyntheticCoinFallback.fallback_coins(3).unwrap();
        let pepe = &coins[2];
        assert_eq!(pepe.mint_address, "33333333333333333333333333333334");
        assert_eq!(pepe.symbol, "PEPE");
        assert_eq!(pepe.usd_market_cap, Some(500_000.0));
        assert_eq!(pepe.last_trade_timestamp, Some(1_700_001_200));
        assert!(!pepe.nsfw && !pepe.complete);
    }

    #[test]
    fn synthetic_prices() {
        let price = |mint| SyntheticCoinFallback.fallback_price(mint);
        assert_eq!(price("11111111111111111111111111111112"), Some(0.0001));
        assert_eq!(price("22222222222222222222222222222223"), Some(0.00025));
        assert_eq!(price("33333333333333333333333333333334"), Some(0.0005));
        assert_eq!(price("unknown"), None);
    }

    #[test]
    fn disabled_serves_nothing() {
        assert!(DisabledFallback.fallback_coins(3).is_none());
        assert!(DisabledFallback.fallback_price("11111111111111111111111111111112").is_none());
    }
}
