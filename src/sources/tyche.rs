// Tyche feed adapter.
//
// Tyche nests its numbers under `quote` and `stats` sub-objects and is the
// only upstream with a first-class verification flag. Progress is already in
// [0, 1]; creation times are unix seconds.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{SourceError, Token, TokenSource};

/// Native Tyche market-token record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TycheMarketToken {
    pub token_id: String,
    pub display_name: String,
    pub tick: String,
    pub quote: TycheQuote,
    pub stats: TycheStats,
    pub is_bonded: bool,
    pub bonding_pct: Option<f64>,
    pub verified: bool,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TycheQuote {
    pub price_usd: f64,
    pub mcap_usd: f64,
    pub vol_24h_usd: f64,
    pub liq_usd: f64,
    pub delta_5m: f64,
    pub delta_1h: f64,
    pub delta_6h: f64,
    pub delta_24h: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TycheStats {
    pub holders: u64,
    /// Unix seconds.
    pub created: i64,
}

pub fn normalize(raw: TycheMarketToken) -> Token {
    Token {
        id: format!("tyche_{}", raw.token_id),
        name: raw.display_name,
        ticker: raw.tick,
        contract_address: raw.token_id,
        price_usd: raw.quote.price_usd,
        marketcap: raw.quote.mcap_usd,
        volume_24: raw.quote.vol_24h_usd,
        liquidity: raw.quote.liq_usd,
        change_5m: raw.quote.delta_5m,
        change_1h: raw.quote.delta_1h,
        change_6h: raw.quote.delta_6h,
        change_24h: raw.quote.delta_24h,
        holders: raw.stats.holders,
        created_time: raw.stats.created,
        bonded: raw.is_bonded,
        progress: raw.bonding_pct,
        is_bundled: false,
        is_verified: raw.verified,
        avatar: raw.icon,
    }
}

/// Static sample feed standing in for the upstream API.
pub fn sample_feed() -> Vec<TycheMarketToken> {
    let ago = |d: Duration| (Utc::now() - d).timestamp();
    vec![
        TycheMarketToken {
            token_id: "tyc_fortune".into(),
            display_name: "Fortuna".into(),
            tick: "FORT".into(),
            quote: TycheQuote {
                price_usd: 0.92,
                mcap_usd: 92_000_000.0,
                vol_24h_usd: 11_300_000.0,
                liq_usd: 3_800_000.0,
                delta_5m: 0.2,
                delta_1h: -0.8,
                delta_6h: 2.4,
                delta_24h: 6.1,
            },
            stats: TycheStats {
                holders: 15_220,
                created: ago(Duration::days(45)),
            },
            is_bonded: true,
            bonding_pct: None,
            verified: true,
            icon: "https://img.omax.fun/tyche/fortuna.png".into(),
        },
        TycheMarketToken {
            token_id: "tyc_wheel".into(),
            display_name: "Wheel of Tyche".into(),
            tick: "WHEEL".into(),
            quote: TycheQuote {
                price_usd: 0.0065,
                mcap_usd: 6_500_000.0,
                vol_24h_usd: 2_100_000.0,
                liq_usd: 640_000.0,
                delta_5m: -1.1,
                delta_1h: 3.3,
                delta_6h: -7.9,
                delta_24h: 28.0,
            },
            stats: TycheStats {
                holders: 2_140,
                created: ago(Duration::hours(9)),
            },
            is_bonded: false,
            bonding_pct: Some(0.77),
            verified: true,
            icon: "https://img.omax.fun/tyche/wheel.png".into(),
        },
        TycheMarketToken {
            token_id: "tyc_amalthea".into(),
            display_name: "Amalthea".into(),
            tick: "AMAL".into(),
            quote: TycheQuote {
                price_usd: 0.00021,
                mcap_usd: 210_000.0,
                vol_24h_usd: 38_000.0,
                liq_usd: 15_000.0,
                delta_5m: 6.0,
                delta_1h: 6.0,
                delta_6h: 0.0,
                delta_24h: 0.0,
            },
            stats: TycheStats {
                holders: 96,
                created: ago(Duration::minutes(22)),
            },
            is_bonded: false,
            bonding_pct: Some(0.05),
            verified: false,
            icon: "https://img.omax.fun/tyche/amalthea.png".into(),
        },
        TycheMarketToken {
            token_id: "tyc_keros".into(),
            display_name: "Keros".into(),
            tick: "KEROS".into(),
            quote: TycheQuote {
                price_usd: 0.048,
                mcap_usd: 48_000_000.0,
                vol_24h_usd: 5_400_000.0,
                liq_usd: 1_700_000.0,
                delta_5m: 0.0,
                delta_1h: -2.5,
                delta_6h: -4.0,
                delta_24h: -9.6,
            },
            stats: TycheStats {
                holders: 7_845,
                created: ago(Duration::days(20)),
            },
            is_bonded: true,
            bonding_pct: None,
            verified: false,
            icon: "https://img.omax.fun/tyche/keros.png".into(),
        },
    ]
}

pub struct TycheSource;

impl TokenSource for TycheSource {
    fn id(&self) -> &'static str {
        "tyche"
    }

    fn name(&self) -> &'static str {
        "Tyche"
    }

    fn fetch_tokens(&self) -> Result<Vec<Token>, SourceError> {
        Ok(sample_feed().into_iter().map(normalize).collect())
    }
}
