// AstroApe feed adapter.
//
// AstroApe is the only upstream that reports bonding-curve progress as a
// percentage (0-100) and listing times in unix milliseconds; normalization
// rescales both. It is also the only feed with a native bundling flag.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{SourceError, Token, TokenSource};

/// Native AstroApe listing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApeListing {
    pub mint: String,
    pub token_name: String,
    pub symbol: String,
    pub usd_price: f64,
    /// Fully diluted valuation in USD; AstroApe publishes no circulating cap.
    pub fdv: f64,
    pub daily_volume: f64,
    pub liquidity_usd: f64,
    pub price_change: ApePriceChange,
    pub holder_count: u64,
    /// Unix milliseconds.
    pub listed_at: i64,
    pub graduated: bool,
    /// Curve progress as a percentage, 0-100.
    pub curve_progress: f64,
    pub bundled: bool,
    pub logo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApePriceChange {
    pub m5: f64,
    pub h1: f64,
    pub h6: f64,
    pub h24: f64,
}

pub fn normalize(raw: ApeListing) -> Token {
    Token {
        id: format!("astroape_{}", raw.mint),
        name: raw.token_name,
        ticker: raw.symbol,
        contract_address: raw.mint,
        price_usd: raw.usd_price,
        marketcap: raw.fdv,
        volume_24: raw.daily_volume,
        liquidity: raw.liquidity_usd,
        change_5m: raw.price_change.m5,
        change_1h: raw.price_change.h1,
        change_6h: raw.price_change.h6,
        change_24h: raw.price_change.h24,
        holders: raw.holder_count,
        created_time: raw.listed_at / 1000,
        bonded: raw.graduated,
        progress: Some(raw.curve_progress / 100.0),
        is_bundled: raw.bundled,
        is_verified: false,
        avatar: raw.logo,
    }
}

/// Static sample feed standing in for the upstream API.
pub fn sample_feed() -> Vec<ApeListing> {
    let ago_ms = |d: Duration| (Utc::now() - d).timestamp_millis();
    vec![
        ApeListing {
            mint: "ApeXq3w9".into(),
            token_name: "Astro Banana".into(),
            symbol: "NANA".into(),
            usd_price: 0.0042,
            fdv: 4_200_000.0,
            daily_volume: 890_000.0,
            liquidity_usd: 310_000.0,
            price_change: ApePriceChange {
                m5: 1.2,
                h1: 5.6,
                h6: -3.2,
                h24: 44.0,
            },
            holder_count: 1_932,
            listed_at: ago_ms(Duration::hours(30)),
            graduated: false,
            curve_progress: 91.0,
            bundled: false,
            logo: "https://img.omax.fun/ape/nana.png".into(),
        },
        ApeListing {
            mint: "ApeK8r2t".into(),
            token_name: "Moon Chimp".into(),
            symbol: "CHIMP".into(),
            usd_price: 0.00011,
            fdv: 110_000.0,
            daily_volume: 54_000.0,
            liquidity_usd: 21_000.0,
            price_change: ApePriceChange {
                m5: -0.4,
                h1: -2.2,
                h6: 9.8,
                h24: -12.5,
            },
            holder_count: 240,
            listed_at: ago_ms(Duration::hours(4)),
            graduated: false,
            curve_progress: 18.0,
            bundled: true,
            logo: "https://img.omax.fun/ape/chimp.png".into(),
        },
        ApeListing {
            mint: "ApeZ1m4v".into(),
            token_name: "Gravity Gorilla".into(),
            symbol: "GRAV".into(),
            usd_price: 0.031,
            fdv: 31_000_000.0,
            daily_volume: 6_700_000.0,
            liquidity_usd: 1_900_000.0,
            price_change: ApePriceChange {
                m5: 0.0,
                h1: 1.1,
                h6: 3.4,
                h24: 8.9,
            },
            holder_count: 8_411,
            listed_at: ago_ms(Duration::days(12)),
            graduated: true,
            curve_progress: 100.0,
            bundled: false,
            logo: "https://img.omax.fun/ape/grav.png".into(),
        },
        ApeListing {
            mint: "ApeP9s7c".into(),
            token_name: "Orbit Orangutan".into(),
            symbol: "ORBIT".into(),
            usd_price: 0.00098,
            fdv: 980_000.0,
            daily_volume: 145_000.0,
            liquidity_usd: 67_000.0,
            price_change: ApePriceChange {
                m5: 2.8,
                h1: 14.0,
                h6: 14.0,
                h24: 14.0,
            },
            holder_count: 512,
            listed_at: ago_ms(Duration::minutes(50)),
            graduated: false,
            curve_progress: 70.0,
            bundled: false,
            logo: "https://img.omax.fun/ape/orbit.png".into(),
        },
    ]
}

pub struct AstroApeSource;

impl TokenSource for AstroApeSource {
    fn id(&self) -> &'static str {
        "astroape"
    }

    fn name(&self) -> &'static str {
        "AstroApe"
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
    fn test_progress_is_rescaled_to_unit_interval() {
        let tokens = AstroApeSource.fetch_tokens().unwrap();
        assert_eq!(tokens[0].progress, Some(0.91));
        // Exactly 70% sits on the exclusive boundary: still newly created.
        assert_eq!(tokens[3].progress, Some(0.7));
        assert_eq!(tokens[3].category(), TokenCategory::NewlyCreated);
    }

    #[test]
    fn test_listed_at_milliseconds_become_seconds() {
        let raw = sample_feed().remove(0);
        let expected = raw.listed_at / 1000;
        assert_eq!(normalize(raw).created_time, expected);
    }

    #[test]
    fn test_bundled_flag_survives_normalization() {
        let tokens = AstroApeSource.fetch_tokens().unwrap();
        assert!(tokens[1].is_bundled);
        assert!(!tokens[0].is_bundled);
    }
}
