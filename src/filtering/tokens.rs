// Token trending/trenches filter pipeline.
//
// Predicates are independent and conjoined with AND; the category filter runs
// first, then search, then the numeric ranges and flags, and the sort always
// runs last. All sorts are stable (`Vec::sort_by`), so tied keys keep their
// original feed order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{parse_bound, within_bounds, SortOrder};
use crate::categorize::TokenCategory;
use crate::sources::Token;

/// Age bucket over `(now - created_time)` in hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TokenAge {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1h")]
    LastHour,
    #[serde(rename = "1-6h")]
    OneToSixHours,
    #[serde(rename = "6-24h")]
    SixToTwentyFourHours,
    #[serde(rename = "1d+")]
    OverOneDay,
}

impl TokenAge {
    fn matches(&self, age_hours: f64) -> bool {
        match self {
            TokenAge::All => true,
            TokenAge::LastHour => age_hours < 1.0,
            TokenAge::OneToSixHours => (1.0..6.0).contains(&age_hours),
            TokenAge::SixToTwentyFourHours => (6.0..24.0).contains(&age_hours),
            TokenAge::OverOneDay => age_hours >= 24.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSortKey {
    #[default]
    Marketcap,
    Volume,
    Age,
    Holders,
}

/// User-configurable filter form for the trending view. Numeric bounds are
/// kept as strings because that is what the form submits; empty means
/// unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenFilterOptions {
    /// Lifecycle bucket, or `None` for the "all" tab.
    pub category: Option<TokenCategory>,
    pub search: String,
    pub min_market_cap: String,
    pub max_market_cap: String,
    pub min_volume: String,
    pub max_volume: String,
    pub token_age: TokenAge,
    pub hide_bundled: bool,
    pub only_verified: bool,
    pub sort_by: TokenSortKey,
    pub sort_order: SortOrder,
}

/// Apply the full pipeline and return the visible ordered subset.
pub fn apply_filters(tokens: &[Token], options: &TokenFilterOptions, now: i64) -> Vec<Token> {
    let min_mcap = parse_bound(&options.min_market_cap);
    let max_mcap = parse_bound(&options.max_market_cap);
    let min_vol = parse_bound(&options.min_volume);
    let max_vol = parse_bound(&options.max_volume);
    let query = options.search.trim().to_lowercase();

    let mut visible: Vec<Token> = tokens
        .iter()
        .filter(|t| match options.category {
            Some(category) => t.category() == category,
            None => true,
        })
        .filter(|t| {
            query.is_empty()
                || t.name.to_lowercase().contains(&query)
                || t.ticker.to_lowercase().contains(&query)
        })
        .filter(|t| within_bounds(t.marketcap, min_mcap, max_mcap))
        .filter(|t| within_bounds(t.volume_24, min_vol, max_vol))
        .filter(|t| {
            let age_hours = (now - t.created_time) as f64 / 3600.0;
            options.token_age.matches(age_hours)
        })
        .filter(|t| !(options.hide_bundled && t.is_bundled))
        .filter(|t| !options.only_verified || t.is_verified)
        .cloned()
        .collect();

    sort_tokens(&mut visible, options.sort_by, options.sort_order, now);
    visible
}

fn sort_tokens(tokens: &mut [Token], key: TokenSortKey, order: SortOrder, now: i64) {
    let key_of = |t: &Token| -> f64 {
        match key {
            TokenSortKey::Marketcap => t.marketcap,
            TokenSortKey::Volume => t.volume_24,
            TokenSortKey::Age => (now - t.created_time) as f64,
            TokenSortKey::Holders => t.holders as f64,
        }
    };
    tokens.sort_by(|a, b| {
        let cmp = key_of(a).partial_cmp(&key_of(b)).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Asc => cmp,
            SortOrder::Desc => cmp.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn token(name: &str, ticker: &str, mcap: f64, vol: f64, age_hours: i64) -> Token {
        Token {
            id: format!("test_{}", ticker),
            name: name.into(),
            ticker: ticker.into(),
            contract_address: ticker.to_lowercase(),
            price_usd: 0.01,
            marketcap: mcap,
            volume_24: vol,
            liquidity: 1_000.0,
            change_5m: 0.0,
            change_1h: 0.0,
            change_6h: 0.0,
            change_24h: 0.0,
            holders: 10,
            created_time: NOW - age_hours * 3600,
            bonded: false,
            progress: Some(0.1),
            is_bundled: false,
            is_verified: false,
            avatar: String::new(),
        }
    }

    fn fixture() -> Vec<Token> {
        vec![
            token("Odin Dog", "ODINDOG", 500.0, 50.0, 72),
            token("Valhalla", "VALH", 150.0, 300.0, 2),
            token("Rune Stone", "RUNE", 80.0, 10.0, 30),
        ]
    }

    #[test]
    fn test_min_market_cap_bound_holds_for_all_survivors() {
        let opts = TokenFilterOptions {
            min_market_cap: "100".into(),
            ..Default::default()
        };
        let out = apply_filters(&fixture(), &opts, NOW);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|t| t.marketcap >= 100.0));
    }

    #[test]
    fn test_empty_bound_means_unbounded() {
        let opts = TokenFilterOptions::default();
        assert_eq!(apply_filters(&fixture(), &opts, NOW).len(), 3);
    }

    #[test]
    fn test_unparseable_bound_is_ignored() {
        let opts = TokenFilterOptions {
            min_market_cap: "lots".into(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&fixture(), &opts, NOW).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_or_ticker() {
        let opts = TokenFilterOptions {
            search: "odin".into(),
            ..Default::default()
        };
        let out = apply_filters(&fixture(), &opts, NOW);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].ticker, "ODINDOG");

        let opts = TokenFilterOptions {
            search: "valh".into(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&fixture(), &opts, NOW).len(), 1);
    }

    #[test]
    fn test_age_bucket_one_day_plus() {
        let opts = TokenFilterOptions {
            token_age: TokenAge::OverOneDay,
            ..Default::default()
        };
        let out = apply_filters(&fixture(), &opts, NOW);
        // 72h and 30h old survive, the 2h old token does not.
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|t| t.created_time <= NOW - 24 * 3600));
    }

    #[test]
    fn test_age_bucket_edges() {
        assert!(TokenAge::LastHour.matches(0.5));
        assert!(!TokenAge::LastHour.matches(1.0));
        assert!(TokenAge::OneToSixHours.matches(1.0));
        assert!(!TokenAge::OneToSixHours.matches(6.0));
        assert!(TokenAge::SixToTwentyFourHours.matches(6.0));
        assert!(TokenAge::OverOneDay.matches(24.0));
    }

    #[test]
    fn test_category_tab_filters_before_everything() {
        let mut tokens = fixture();
        tokens[0].bonded = true;
        let opts = TokenFilterOptions {
            category: Some(TokenCategory::Graduated),
            ..Default::default()
        };
        let out = apply_filters(&tokens, &opts, NOW);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].ticker, "ODINDOG");
    }

    #[test]
    fn test_hide_bundled_and_only_verified() {
        let mut tokens = fixture();
        tokens[1].is_bundled = true;
        tokens[2].is_verified = true;

        let opts = TokenFilterOptions {
            hide_bundled: true,
            ..Default::default()
        };
        assert_eq!(apply_filters(&tokens, &opts, NOW).len(), 2);

        let opts = TokenFilterOptions {
            only_verified: true,
            ..Default::default()
        };
        let out = apply_filters(&tokens, &opts, NOW);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].ticker, "RUNE");
    }

    #[test]
    fn test_sort_runs_last_and_orders_by_key() {
        let opts = TokenFilterOptions {
            sort_by: TokenSortKey::Volume,
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        let out = apply_filters(&fixture(), &opts, NOW);
        let vols: Vec<f64> = out.iter().map(|t| t.volume_24).collect();
        assert_eq!(vols, vec![300.0, 50.0, 10.0]);

        let opts = TokenFilterOptions {
            sort_by: TokenSortKey::Age,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let out = apply_filters(&fixture(), &opts, NOW);
        assert_eq!(out[0].ticker, "VALH");
    }

    #[test]
    fn test_stable_sort_keeps_feed_order_on_ties() {
        let mut tokens = fixture();
        for t in &mut tokens {
            t.marketcap = 100.0;
        }
        let opts = TokenFilterOptions::default();
        let out = apply_filters(&tokens, &opts, NOW);
        let tickers: Vec<&str> = out.iter().map(|t| t.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["ODINDOG", "VALH", "RUNE"]);
    }
}
