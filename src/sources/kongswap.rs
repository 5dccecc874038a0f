// KongSwap feed adapter.
//
// KongSwap groups market numbers under a `metrics` object and signals
// graduation through pool completion rather than a bonded flag. Pools that
// have completed stop reporting progress.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{SourceError, Token, TokenSource};

/// Native KongSwap pool-token record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KongToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub metrics: KongMetrics,
    pub holder_count: u64,
    /// Unix seconds.
    pub created_at: i64,
    /// True once the launch pool has fully filled (graduation).
    pub pool_complete: bool,
    pub pool_progress: Option<f64>,
    pub logo_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KongMetrics {
    pub price: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub liquidity: f64,
    pub change_5m: f64,
    pub change_1h: f64,
    pub change_6h: f64,
    pub change_24h: f64,
}

pub fn normalize(raw: KongToken) -> Token {
    Token {
        id: format!("kongswap_{}", raw.address),
        name: raw.name,
        ticker: raw.symbol,
        contract_address: raw.address,
        price_usd: raw.metrics.price,
        marketcap: raw.metrics.market_cap,
        volume_24: raw.metrics.volume_24h,
        liquidity: raw.metrics.liquidity,
        change_5m: raw.metrics.change_5m,
        change_1h: raw.metrics.change_1h,
        change_6h: raw.metrics.change_6h,
        change_24h: raw.metrics.change_24h,
        holders: raw.holder_count,
        created_time: raw.created_at,
        bonded: raw.pool_complete,
        progress: raw.pool_progress,
        is_bundled: false,
        is_verified: false,
        avatar: raw.logo_url,
    }
}

/// Static sample feed standing in for the upstream API.
pub fn sample_feed() -> Vec<KongToken> {
    let ago = |d: Duration| (Utc::now() - d).timestamp();
    vec![
        KongToken {
            address: "kong_jungle01".into(),
            name: "Jungle King".into(),
            symbol: "KING".into(),
            metrics: KongMetrics {
                price: 0.175,
                market_cap: 17_500_000.0,
                volume_24h: 2_900_000.0,
                liquidity: 860_000.0,
                change_5m: 0.5,
                change_1h: 1.9,
                change_6h: -0.7,
                change_24h: 11.2,
            },
            holder_count: 3_450,
            created_at: ago(Duration::days(8)),
            pool_complete: true,
            pool_progress: None,
            logo_url: "https://img.omax.fun/kong/king.png".into(),
        },
        KongToken {
            address: "kong_vine77".into(),
            name: "Vine Swing".into(),
            symbol: "VINE".into(),
            metrics: KongMetrics {
                price: 0.00084,
                market_cap: 840_000.0,
                volume_24h: 190_000.0,
                liquidity: 74_000.0,
                change_5m: -2.0,
                change_1h: -5.5,
                change_6h: 3.1,
                change_24h: 19.8,
            },
            holder_count: 430,
            created_at: ago(Duration::hours(5)),
            pool_complete: false,
            pool_progress: Some(0.33),
            logo_url: "https://img.omax.fun/kong/vine.png".into(),
        },
        KongToken {
            address: "kong_drum42".into(),
            name: "Chest Drum".into(),
            symbol: "DRUM".into(),
            metrics: KongMetrics {
                price: 0.0092,
                market_cap: 9_200_000.0,
                volume_24h: 1_300_000.0,
                liquidity: 410_000.0,
                change_5m: 1.4,
                change_1h: 4.2,
                change_6h: 16.0,
                change_24h: 52.3,
            },
            holder_count: 1_870,
            created_at: ago(Duration::hours(20)),
            pool_complete: false,
            pool_progress: Some(0.95),
            logo_url: "https://img.omax.fun/kong/drum.png".into(),
        },
        KongToken {
            address: "kong_nana_split".into(),
            name: "Nana Split".into(),
            symbol: "SPLIT".into(),
            metrics: KongMetrics {
                price: 0.000045,
                market_cap: 45_000.0,
                volume_24h: 8_200.0,
                liquidity: 3_900.0,
                change_5m: 0.0,
                change_1h: 0.0,
                change_6h: 0.0,
                change_24h: 0.0,
            },
            holder_count: 38,
            created_at: ago(Duration::minutes(8)),
            pool_complete: false,
            pool_progress: Some(0.01),
            logo_url: "https://img.omax.fun/kong/split.png".into(),
        },
    ]
}

pub struct KongSwapSource;

impl TokenSource for KongSwapSource {
    fn id(&self) -> &'static str {
        "kongswap"
    }

    fn name(&self) -> &'static str {
        "KongSwap"
    }

    fn fetch_tokens(&self) -> Result<Vec<Token>, SourceError> {
        Ok(sample_feed().into_iter().map(normalize).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::TokenCategory;

    #[test]
    fn test_pool_completion_maps_to_bonded() {
        let tokens = KongSwapSource.fetch_tokens().unwrap();
        assert!(tokens[0].bonded);
        assert_eq!(tokens[0].category(), TokenCategory::Graduated);
        assert_eq!(tokens[2].category(), TokenCategory::AboutToGraduate);
    }

    #[test]
    fn test_metrics_are_flattened() {
        let tokens = KongSwapSource.fetch_tokens().unwrap();
        assert_eq!(tokens[1].volume_24, 190_000.0);
        assert_eq!(tokens[1].change_1h, -5.5);
    }
}
