// Application state for the Omax market data server.
//
// State is request-scoped reads plus the occasional market-creation append,
// all behind one mutex. Sample markets and categories are seeded at startup
// and stand in for a persistence layer the dashboard does not have.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use crate::models::{MarketType, PredictionCategory, PredictionMarket, PredictionOption};
use crate::sources::{self, TokenSource};

pub type SharedState = Arc<Mutex<AppState>>;

/// Explicit runtime configuration, collected once from the environment at
/// startup and injected. Handlers never read env vars themselves.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Upstream fee estimator (mempool.space-shaped JSON). `None` means the
    /// fee endpoint serves its fallback values directly.
    pub fee_api_url: Option<String>,
    /// Upstream wallet balance provider. Same fallback policy.
    pub wallet_api_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3001,
            fee_api_url: None,
            wallet_api_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("OMAX_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);
        Self {
            port,
            fee_api_url: std::env::var("OMAX_FEE_API").ok(),
            wallet_api_url: std::env::var("OMAX_WALLET_API").ok(),
        }
    }
}

pub struct AppState {
    pub config: Config,
    /// Registered token feed adapters, in route order.
    pub sources: Vec<Box<dyn TokenSource>>,
    /// Prediction markets in creation order; the first entry doubles as the
    /// fallback for unmatched detail lookups.
    pub markets: Vec<PredictionMarket>,
    pub categories: Vec<PredictionCategory>,
    /// Human-readable activity ring, capped at 1000 entries.
    pub activity: Vec<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let mut state = Self {
            config,
            sources: sources::all_sources(),
            markets: Vec::new(),
            categories: seed_categories(),
            activity: Vec::new(),
        };
        state.markets = seed_markets();
        tracing::info!(
            markets = state.markets.len(),
            sources = state.sources.len(),
            "state initialized"
        );
        state
    }

    pub fn source_by_id(&self, id: &str) -> Option<&dyn TokenSource> {
        self.sources
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.as_ref())
    }

    pub fn market_by_id(&self, id: &str) -> Option<&PredictionMarket> {
        self.markets.iter().find(|m| m.id == id)
    }

    pub fn log_activity(&mut self, emoji: &str, action: &str, details: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        let entry = format!("[{}] {} {} | {}", timestamp, emoji, action, details);
        println!("{}", entry);
        self.activity.push(entry);
        if self.activity.len() > 1000 {
            self.activity.remove(0);
        }
    }
}

// ============================================================================
// SEED DATA
// ============================================================================

fn option(id: &str, label: &str, odds: f64, percentage: f64, volume_btc: f64, color: &str) -> PredictionOption {
    PredictionOption {
        id: id.into(),
        label: label.into(),
        odds,
        percentage,
        volume: crate::format::format_sats(volume_btc),
        color: color.into(),
    }
}

fn seed_markets() -> Vec<PredictionMarket> {
    let now = Utc::now();

    let mut btc150 = PredictionMarket {
        id: "mkt_btc150k".into(),
        title: "Bitcoin above $150k by year end?".into(),
        description: "Resolves YES if BTC/USD trades at or above $150,000 on any major exchange before Dec 31.".into(),
        image: "https://img.omax.fun/markets/btc150k.png".into(),
        category: "crypto".into(),
        end_date: now + Duration::days(45),
        total_volume: String::new(),
        total_volume_usd: String::new(),
        total_volume_sats: String::new(),
        participants: 1_248,
        options: vec![
            option("mkt_btc150k_yes", "Yes", 1.61, 62.0, 5.2, "#22c55e"),
            option("mkt_btc150k_no", "No", 2.63, 38.0, 3.1, "#ef4444"),
        ],
        market_type: MarketType::Binary,
        is_active: true,
        featured: true,
        creator: "omax_markets".into(),
        tags: vec!["bitcoin".into(), "price".into()],
        resolution_link: Some("https://www.coingecko.com/en/coins/bitcoin".into()),
        created_at: now - Duration::days(12),
        volume_btc: 0.0,
    };
    btc150.set_volume(8.3);

    let mut halving = PredictionMarket {
        id: "mkt_next_runekind".into(),
        title: "Which Odin token graduates first this week?".into(),
        description: "Resolves to the first listed token to complete its bonding curve.".into(),
        image: "https://img.omax.fun/markets/graduate.png".into(),
        category: "memes".into(),
        end_date: now + Duration::days(6),
        total_volume: String::new(),
        total_volume_usd: String::new(),
        total_volume_sats: String::new(),
        participants: 312,
        options: vec![
            option("mkt_next_runekind_valh", "Valhalla", 0.66, 41.0, 0.8, "#3b82f6"),
            option("mkt_next_runekind_rune", "Rune Stone", 0.66, 33.0, 0.5, "#f59e0b"),
            option("mkt_next_runekind_bif", "Bifrost", 0.66, 26.0, 0.3, "#a855f7"),
        ],
        market_type: MarketType::MultipleChoice,
        is_active: true,
        featured: false,
        creator: "trench_watcher".into(),
        tags: vec!["odin".into(), "bonding-curve".into()],
        resolution_link: Some("https://odin.fun/tokens".into()),
        created_at: now - Duration::days(1),
        volume_btc: 0.0,
    };
    halving.set_volume(1.6);

    let mut etf = PredictionMarket {
        id: "mkt_etf_pair".into(),
        title: "Will both a SOL and a DOGE ETF be approved this quarter?".into(),
        description: "Compound market: each listing resolves YES/NO independently; the market pays on the joint outcome.".into(),
        image: "https://img.omax.fun/markets/etf.png".into(),
        category: "politics".into(),
        end_date: now + Duration::days(80),
        total_volume: String::new(),
        total_volume_usd: String::new(),
        total_volume_sats: String::new(),
        participants: 87,
        options: vec![
            option("mkt_etf_pair_sol", "SOL ETF approved", 1.0, 50.0, 0.2, "#14b8a6"),
            option("mkt_etf_pair_doge", "DOGE ETF approved", 1.0, 50.0, 0.1, "#ec4899"),
        ],
        market_type: MarketType::Compound,
        is_active: true,
        featured: false,
        creator: "macro_max".into(),
        tags: vec!["etf".into(), "regulation".into()],
        resolution_link: Some("https://www.sec.gov/rules/sro.htm".into()),
        created_at: now - Duration::days(4),
        volume_btc: 0.0,
    };
    etf.set_volume(0.3);

    vec![btc150, halving, etf]
}

fn seed_categories() -> Vec<PredictionCategory> {
    let category = |id: &str, label: &str, icon: &str, count: u64| PredictionCategory {
        id: id.into(),
        label: label.into(),
        icon: icon.into(),
        count,
    };
    vec![
        category("all", "All Markets", "🌐", 3),
        category("crypto", "Crypto", "₿", 1),
        category("memes", "Memes", "🐸", 1),
        category("politics", "Politics", "🏛️", 1),
        category("sports", "Sports", "⚽", 0),
        category("tech", "Tech", "🤖", 0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_state() {
        let state = AppState::new(Config::default());
        assert_eq!(state.markets.len(), 3);
        assert_eq!(state.sources.len(), 4);
        assert!(state.source_by_id("odin").is_some());
        assert!(state.source_by_id("uniswap").is_none());
        // Fallback target for unmatched market lookups.
        assert_eq!(state.markets[0].id, "mkt_btc150k");
    }

    #[test]
    fn test_activity_ring_is_capped() {
        let mut state = AppState::new(Config::default());
        state.activity = vec![String::new(); 1000];
        state.log_activity("📊", "TEST", "overflow");
        assert_eq!(state.activity.len(), 1000);
        assert!(state.activity.last().unwrap().contains("TEST"));
    }
}
