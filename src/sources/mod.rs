// Source adapters for upstream token feeds.
//
// Each upstream (Odin, AstroApe, Tyche, KongSwap) publishes tokens in its own
// native shape. An adapter owns exactly one of those shapes and normalizes it
// into the internal `Token` record, so the categorization, filtering and
// formatting layers never see a feed-specific field. The adapters currently
// serve static sample data behind the `TokenSource` trait; a real HTTP-backed
// implementation slots in behind the same trait without touching anything
// downstream.

pub mod astroape;
pub mod kongswap;
pub mod odin;
pub mod tyche;

use serde::{Deserialize, Serialize};

use crate::categorize::{categorize, TokenCategory};
use crate::format;
use crate::models::TokenData;

// ============================================================================
// NORMALIZED TOKEN RECORD
// ============================================================================

/// Feed-agnostic token record with raw numerics. Display strings are produced
/// only at the API boundary by [`Token::to_display`]; the filter/sort pipeline
/// operates on these numeric fields directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub name: String,
    pub ticker: String,
    pub contract_address: String,
    /// Spot price in USD.
    pub price_usd: f64,
    /// Market cap in USD.
    pub marketcap: f64,
    /// 24h trading volume in USD.
    pub volume_24: f64,
    /// Pooled liquidity in USD.
    pub liquidity: f64,
    pub change_5m: f64,
    pub change_1h: f64,
    pub change_6h: f64,
    pub change_24h: f64,
    pub holders: u64,
    /// Unix seconds of token creation.
    pub created_time: i64,
    pub bonded: bool,
    /// Bonding-curve progress in [0, 1]. Absent for feeds that do not report
    /// it; categorization treats that as newly created.
    pub progress: Option<f64>,
    pub is_bundled: bool,
    pub is_verified: bool,
    pub avatar: String,
}

impl Token {
    /// Lifecycle bucket for this snapshot of the token.
    pub fn category(&self) -> TokenCategory {
        categorize(self.bonded, self.progress)
    }

    /// Convert to the display DTO the client consumes. `now` is the unix
    /// timestamp to compute the relative age against.
    pub fn to_display(&self, now: i64) -> TokenData {
        TokenData {
            id: self.id.clone(),
            name: self.name.clone(),
            symbol: self.ticker.clone(),
            contract_address: self.contract_address.clone(),
            price: format::format_usd(self.price_usd),
            market_cap: format::format_usd(self.marketcap),
            volume24h: format::format_usd(self.volume_24),
            liquidity: format::format_usd(self.liquidity),
            change5m: format::format_percent_signed(self.change_5m),
            change1h: format::format_percent_signed(self.change_1h),
            change6h: format::format_percent_signed(self.change_6h),
            change24h: format::format_percent_signed(self.change_24h),
            holders: self.holders,
            age: format::format_time_ago(self.created_time, now),
            is_bundled: self.is_bundled,
            is_verified: self.is_verified,
            category: self.category(),
            avatar: self.avatar.clone(),
        }
    }
}

// ============================================================================
// SOURCE TRAIT
// ============================================================================

/// One upstream token feed. Implementations must return `Ok(vec![])` for an
/// empty upstream rather than an error; an `Err` means the feed itself failed
/// and the route layer surfaces it as a 500 envelope.
pub trait TokenSource: Send + Sync {
    /// Stable identifier used in the route path (`/api/{id}/tokens`).
    fn id(&self) -> &'static str;

    /// Human-readable feed name for logs.
    fn name(&self) -> &'static str;

    fn fetch_tokens(&self) -> Result<Vec<Token>, SourceError>;
}

/// All registered feed adapters, in route order.
pub fn all_sources() -> Vec<Box<dyn TokenSource>> {
    vec![
        Box::new(odin::OdinSource),
        Box::new(astroape::AstroApeSource),
        Box::new(tyche::TycheSource),
        Box::new(kongswap::KongSwapSource),
    ]
}

// ============================================================================
// ERRORS
// ============================================================================

/// Feed adapter errors.
#[derive(Debug, Clone, Serialize)]
pub enum SourceError {
    /// Upstream request failed (network error or non-2xx status).
    Upstream(String),
    /// Upstream responded but the payload did not match the expected shape.
    Decode(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Upstream(msg) => write!(f, "Upstream fetch failed: {}", msg),
            SourceError::Decode(msg) => write!(f, "Upstream payload invalid: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_token() -> Token {
        Token {
            id: "odin_test".into(),
            name: "Test Token".into(),
            ticker: "TEST".into(),
            contract_address: "odinabcdef123456".into(),
            price_usd: 0.042,
            marketcap: 1_250_000.0,
            volume_24: 340_000.0,
            liquidity: 98_000.0,
            change_5m: 0.4,
            change_1h: -2.1,
            change_6h: 5.0,
            change_24h: 12.75,
            holders: 321,
            created_time: 1_700_000_000 - 2 * 86_400,
            bonded: false,
            progress: Some(0.85),
            is_bundled: false,
            is_verified: true,
            avatar: "https://img.omax.fun/test.png".into(),
        }
    }

    #[test]
    fn test_to_display_formats_at_boundary() {
        let display = sample_token().to_display(1_700_000_000);
        assert_eq!(display.price, "$0.04");
        assert_eq!(display.market_cap, "$1.25M");
        assert_eq!(display.volume24h, "$340.00K");
        assert_eq!(display.change1h, "-2.10%");
        assert_eq!(display.change5m, "+0.40%");
        assert_eq!(display.age, "2 days ago");
        assert_eq!(display.category, TokenCategory::AboutToGraduate);
    }

    #[test]
    fn test_registry_ids_are_route_names() {
        let ids: Vec<&str> = all_sources().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["odin", "astroape", "tyche", "kongswap"]);
    }

    #[test]
    fn test_every_source_emits_valid_categories() {
        for source in all_sources() {
            let tokens = source.fetch_tokens().unwrap();
            assert!(!tokens.is_empty(), "{} sample feed is empty", source.id());
            for token in tokens {
                // Single-owned classification: category is total over the enum.
                let c = token.category();
                assert!(matches!(
                    c,
                    TokenCategory::NewlyCreated
                        | TokenCategory::AboutToGraduate
                        | TokenCategory::Graduated
                ));
            }
        }
    }
}
