// Odin feed adapter.
//
// Odin quotes everything in satoshis and reports creation times as RFC3339
// strings, so normalization converts sats to USD at the reference rate and
// parses the timestamp. The sample feed carries five tokens, matching the
// upstream's default page size.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{SourceError, Token, TokenSource};
use crate::models::BTC_USD_RATE;

/// Native Odin feed record, as returned by `GET /v1/tokens` upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdinToken {
    pub id: String,
    pub name: String,
    pub ticker: String,
    /// Spot price in sats per token.
    pub price: f64,
    /// Market cap in sats.
    pub marketcap: f64,
    /// 24h volume in sats.
    pub volume_24: f64,
    /// Pooled liquidity in sats.
    pub btc_liquidity: f64,
    pub holder_count: u64,
    /// RFC3339 creation time.
    pub created_time: String,
    pub price_delta_5m: f64,
    pub price_delta_1h: f64,
    pub price_delta_6h: f64,
    pub price_delta_1d: f64,
    pub bonded: bool,
    /// Bonding-curve progress in [0, 1]. Absent once a token has bonded.
    pub progress: Option<f64>,
    pub verified: bool,
    pub image_url: String,
}

fn sats_to_usd(sats: f64) -> f64 {
    sats / 100_000_000.0 * BTC_USD_RATE
}

pub fn normalize(raw: OdinToken) -> Result<Token, SourceError> {
    let created = DateTime::parse_from_rfc3339(&raw.created_time)
        .map_err(|e| SourceError::Decode(format!("created_time '{}': {}", raw.created_time, e)))?
        .timestamp();

    Ok(Token {
        id: format!("odin_{}", raw.id),
        name: raw.name,
        ticker: raw.ticker,
        contract_address: raw.id,
        price_usd: sats_to_usd(raw.price),
        marketcap: sats_to_usd(raw.marketcap),
        volume_24: sats_to_usd(raw.volume_24),
        liquidity: sats_to_usd(raw.btc_liquidity),
        change_5m: raw.price_delta_5m,
        change_1h: raw.price_delta_1h,
        change_6h: raw.price_delta_6h,
        change_24h: raw.price_delta_1d,
        holders: raw.holder_count,
        created_time: created,
        bonded: raw.bonded,
        progress: raw.progress,
        // Odin does not publish a bundling flag; tokens pass the hideBundled
        // filter until the upstream adds one.
        is_bundled: false,
        is_verified: raw.verified,
        avatar: raw.image_url,
    })
}

/// Static sample feed standing in for the upstream API.
pub fn sample_feed() -> Vec<OdinToken> {
    let ago = |d: Duration| (Utc::now() - d).to_rfc3339();
    vec![
        OdinToken {
            id: "2jjj".into(),
            name: "Odin Dog".into(),
            ticker: "ODINDOG".into(),
            price: 1_250.0,
            marketcap: 2_100_000_000.0,
            volume_24: 380_000_000.0,
            btc_liquidity: 95_000_000.0,
            holder_count: 4_812,
            created_time: ago(Duration::days(3)),
            price_delta_5m: 0.8,
            price_delta_1h: -1.2,
            price_delta_6h: 4.5,
            price_delta_1d: 22.4,
            bonded: true,
            progress: None,
            verified: true,
            image_url: "https://img.omax.fun/odin/odindog.png".into(),
        },
        OdinToken {
            id: "2kkk".into(),
            name: "Valhalla".into(),
            ticker: "VALH".into(),
            price: 310.0,
            marketcap: 540_000_000.0,
            volume_24: 120_000_000.0,
            btc_liquidity: 31_000_000.0,
            holder_count: 1_203,
            created_time: ago(Duration::hours(18)),
            price_delta_5m: -0.3,
            price_delta_1h: 2.7,
            price_delta_6h: -6.1,
            price_delta_1d: 15.0,
            bonded: false,
            progress: Some(0.86),
            verified: false,
            image_url: "https://img.omax.fun/odin/valhalla.png".into(),
        },
        OdinToken {
            id: "2lll".into(),
            name: "Rune Stone".into(),
            ticker: "RUNE".into(),
            price: 88.0,
            marketcap: 160_000_000.0,
            volume_24: 44_000_000.0,
            btc_liquidity: 12_000_000.0,
            holder_count: 640,
            created_time: ago(Duration::hours(2)),
            price_delta_5m: 3.1,
            price_delta_1h: 8.9,
            price_delta_6h: 12.0,
            price_delta_1d: 12.0,
            bonded: false,
            progress: Some(0.41),
            verified: false,
            image_url: "https://img.omax.fun/odin/rune.png".into(),
        },
        OdinToken {
            id: "2mmm".into(),
            name: "Bifrost".into(),
            ticker: "BIF".into(),
            price: 42.0,
            marketcap: 75_000_000.0,
            volume_24: 9_800_000.0,
            btc_liquidity: 4_200_000.0,
            holder_count: 212,
            created_time: ago(Duration::minutes(35)),
            price_delta_5m: -1.8,
            price_delta_1h: -4.4,
            price_delta_6h: 0.0,
            price_delta_1d: 0.0,
            bonded: false,
            progress: Some(0.12),
            verified: false,
            image_url: "https://img.omax.fun/odin/bifrost.png".into(),
        },
        OdinToken {
            id: "2nnn".into(),
            name: "Mjolnir".into(),
            ticker: "MJOL".into(),
            price: 560.0,
            marketcap: 890_000_000.0,
            volume_24: 210_000_000.0,
            btc_liquidity: 47_000_000.0,
            holder_count: 2_377,
            created_time: ago(Duration::days(6)),
            price_delta_5m: 0.1,
            price_delta_1h: 0.9,
            price_delta_6h: -2.3,
            price_delta_1d: 7.8,
            bonded: true,
            progress: None,
            verified: true,
            image_url: "https://img.omax.fun/odin/mjolnir.png".into(),
        },
    ]
}

pub struct OdinSource;

impl TokenSource for OdinSource {
    fn id(&self) -> &'static str {
        "odin"
    }

    fn name(&self) -> &'static str {
        "Odin"
    }

    fn fetch_tokens(&self) -> Result<Vec<Token>, SourceError> {
        sample_feed().into_iter().map(normalize).collect()
    }
}
