// Data models for the Omax market data API.
//
// Everything the client sees is camelCase JSON wrapped in the
// `{success, data?, error?}` envelope. Display strings are produced by the
// formatting utilities at the serialization boundary; numeric bookkeeping
// fields used by the filter/sort pipeline are kept alongside and skipped
// during serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::categorize::TokenCategory;
use crate::format;

/// Reference BTC/USD rate used to derive USD display encodings of BTC volumes.
pub const BTC_USD_RATE: f64 = 97_500.0;

/// Default option color palette, cycled when a creator supplies no colors.
pub const OPTION_COLORS: [&str; 8] = [
    "#22c55e", "#ef4444", "#3b82f6", "#f59e0b", "#a855f7", "#14b8a6", "#ec4899", "#f97316",
];

// ============================================================================
// RESPONSE ENVELOPE
// ============================================================================

/// Uniform response envelope: every endpoint returns either a full success
/// with `data` or a full failure with `error`. No partial payloads.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ============================================================================
// TOKEN DTO
// ============================================================================

/// Normalized, display-ready token record. Source-agnostic: every adapter
/// emits this same shape regardless of the upstream feed's native form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenData {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub contract_address: String,
    pub price: String,
    pub market_cap: String,
    pub volume24h: String,
    pub liquidity: String,
    pub change5m: String,
    pub change1h: String,
    pub change6h: String,
    pub change24h: String,
    pub holders: u64,
    pub age: String,
    pub is_bundled: bool,
    pub is_verified: bool,
    pub category: TokenCategory,
    pub avatar: String,
}

// ============================================================================
// PREDICTION MARKETS
// ============================================================================

/// Payout structure of a prediction market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketType {
    Binary,
    MultipleChoice,
    Compound,
}

impl MarketType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "binary" => Some(MarketType::Binary),
            "multiple_choice" => Some(MarketType::MultipleChoice),
            "compound" => Some(MarketType::Compound),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Binary => "binary",
            MarketType::MultipleChoice => "multiple_choice",
            MarketType::Compound => "compound",
        }
    }
}

/// One outcome of a prediction market. `odds`, `percentage` and `volume` are
/// authored at creation time and never recomputed; in a real exchange they
/// would be derived from an order book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionOption {
    pub id: String,
    pub label: String,
    pub odds: f64,
    pub percentage: f64,
    pub volume: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionMarket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    /// Free-text tag ("crypto", "sports", ...), not the token lifecycle enum.
    pub category: String,
    pub end_date: DateTime<Utc>,
    pub total_volume: String,
    #[serde(rename = "totalVolumeUSD")]
    pub total_volume_usd: String,
    pub total_volume_sats: String,
    pub participants: u64,
    pub options: Vec<PredictionOption>,
    pub market_type: MarketType,
    pub is_active: bool,
    pub featured: bool,
    pub creator: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_link: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Raw volume in BTC backing the three display encodings above. Used by
    /// the filter/sort pipeline, never serialized to the client.
    #[serde(skip)]
    pub volume_btc: f64,
}

impl PredictionMarket {
    /// Refresh the three display encodings from the raw BTC volume.
    pub fn set_volume(&mut self, volume_btc: f64) {
        self.volume_btc = volume_btc;
        self.total_volume = format::format_btc(volume_btc);
        self.total_volume_usd = format::format_usd(volume_btc * BTC_USD_RATE);
        self.total_volume_sats = format::format_sats(volume_btc);
    }

    /// Default multiplicative payout factor per option. Binary markets pay
    /// 2.0x per side; other types use `(100/n) * 0.02`. The latter drops
    /// below 1.0 for three or more options; that matches the authored-odds
    /// behavior this API has always had and is intentionally not corrected.
    pub fn default_odds(market_type: MarketType, option_count: usize) -> f64 {
        match market_type {
            MarketType::Binary => 2.0,
            _ => (100.0 / option_count as f64) * 0.02,
        }
    }

    /// Default implied probability per option. Binary markets split 50/50;
    /// other types take `floor(100/n)`, so the percentages do not sum to
    /// exactly 100 when n does not divide 100. Known approximation, preserved.
    pub fn default_percentage(market_type: MarketType, option_count: usize) -> f64 {
        match market_type {
            MarketType::Binary => 50.0,
            _ => (100.0 / option_count as f64).floor(),
        }
    }
}

/// Category tab shown above the prediction market list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionCategory {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub count: u64,
}

// ============================================================================
// REQUEST BODIES
// ============================================================================

/// POST /api/prediction-markets body. Every field is optional at the serde
/// layer so validation can reject with a structured 400 naming the missing
/// field instead of an opaque deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMarketRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub end_date: Option<String>,
    pub resolution_link: Option<String>,
    pub market_type: Option<String>,
    pub options: Option<Vec<CreateOptionInput>>,
    pub creator: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptionInput {
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuoteRequest {
    pub from_token: String,
    pub to_token: String,
    pub amount: f64,
    #[serde(default)]
    pub slippage: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapExecuteRequest {
    pub from_token: String,
    pub to_token: String,
    pub amount: f64,
    #[serde(default)]
    pub slippage: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    pub address: Option<String>,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_type_parse() {
        assert_eq!(MarketType::parse("binary"), Some(MarketType::Binary));
        assert_eq!(
            MarketType::parse("multiple_choice"),
            Some(MarketType::MultipleChoice)
        );
        assert_eq!(MarketType::parse("compound"), Some(MarketType::Compound));
        assert_eq!(MarketType::parse("parimutuel"), None);
    }

    #[test]
    fn test_default_odds() {
        assert_eq!(PredictionMarket::default_odds(MarketType::Binary, 2), 2.0);
        let odds = PredictionMarket::default_odds(MarketType::MultipleChoice, 4);
        assert!((odds - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_default_percentage_floor_does_not_sum_to_100() {
        let pct = PredictionMarket::default_percentage(MarketType::MultipleChoice, 3);
        assert_eq!(pct, 33.0);
        // 3 * 33 = 99: non-normalized sum is preserved by design.
        assert_eq!(
            PredictionMarket::default_percentage(MarketType::Binary, 2),
            50.0
        );
    }

    #[test]
    fn test_envelope_shape() {
        let ok = serde_json::to_value(ApiResponse::ok(1)).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"], 1);
        assert!(ok.get("error").is_none());

        let err = serde_json::to_value(ApiResponse::<()>::err("boom")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "boom");
    }

    #[test]
    fn test_market_camel_case_wire_shape() {
        let mut market = PredictionMarket {
            id: "m1".into(),
            title: "t".into(),
            description: "d".into(),
            image: "".into(),
            category: "crypto".into(),
            end_date: Utc::now(),
            total_volume: String::new(),
            total_volume_usd: String::new(),
            total_volume_sats: String::new(),
            participants: 0,
            options: vec![],
            market_type: MarketType::Binary,
            is_active: true,
            featured: false,
            creator: "c".into(),
            tags: vec![],
            resolution_link: None,
            created_at: Utc::now(),
            volume_btc: 0.0,
        };
        market.set_volume(1.5);

        let v = serde_json::to_value(&market).unwrap();
        assert_eq!(v["totalVolume"], "1.50 BTC");
        assert_eq!(v["totalVolumeUSD"], "$146.25K");
        assert_eq!(v["totalVolumeSats"], "150.0M sats");
        assert_eq!(v["marketType"], "binary");
        assert!(v.get("volumeBtc").is_none());
    }
}
