// Prediction market filter pipeline.
//
// Same contract as the token pipeline: independent AND-ed predicates, stable
// sort last. Volume bounds apply to the raw BTC volume backing the display
// strings, participants to the raw count.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{parse_bound, within_bounds, SortOrder};
use crate::models::PredictionMarket;

/// Time-to-resolution bucket. A market only lands in a timed bucket while it
/// still resolves in the future; ended markets match only `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarketTimeframe {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl MarketTimeframe {
    fn matches(&self, hours_to_end: f64) -> bool {
        match self {
            MarketTimeframe::All => true,
            MarketTimeframe::Day => hours_to_end > 0.0 && hours_to_end <= 24.0,
            MarketTimeframe::Week => hours_to_end > 0.0 && hours_to_end <= 24.0 * 7.0,
            MarketTimeframe::Month => hours_to_end > 0.0 && hours_to_end <= 24.0 * 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatusFilter {
    #[default]
    All,
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarketSortKey {
    #[default]
    Volume,
    Participants,
    EndDate,
    Created,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketFilterOptions {
    pub min_volume: String,
    pub max_volume: String,
    pub min_participants: String,
    pub max_participants: String,
    pub timeframe: MarketTimeframe,
    pub status: MarketStatusFilter,
    pub show_featured: bool,
    pub sort_by: MarketSortKey,
    pub sort_order: SortOrder,
}

/// Apply the full pipeline and return the visible ordered subset. `now` is
/// unix seconds.
pub fn apply_filters(
    markets: &[PredictionMarket],
    options: &MarketFilterOptions,
    now: i64,
) -> Vec<PredictionMarket> {
    let min_vol = parse_bound(&options.min_volume);
    let max_vol = parse_bound(&options.max_volume);
    let min_part = parse_bound(&options.min_participants);
    let max_part = parse_bound(&options.max_participants);

    let mut visible: Vec<PredictionMarket> = markets
        .iter()
        .filter(|m| within_bounds(m.volume_btc, min_vol, max_vol))
        .filter(|m| within_bounds(m.participants as f64, min_part, max_part))
        .filter(|m| {
            let hours_to_end = (m.end_date.timestamp() - now) as f64 / 3600.0;
            options.timeframe.matches(hours_to_end)
        })
        .filter(|m| {
            let ended = m.end_date.timestamp() <= now;
            match options.status {
                MarketStatusFilter::All => true,
                MarketStatusFilter::Active => m.is_active && !ended,
                MarketStatusFilter::Ended => ended || !m.is_active,
            }
        })
        .filter(|m| !options.show_featured || m.featured)
        .cloned()
        .collect();

    sort_markets(&mut visible, options.sort_by, options.sort_order);
    visible
}

fn sort_markets(markets: &mut [PredictionMarket], key: MarketSortKey, order: SortOrder) {
    let key_of = |m: &PredictionMarket| -> f64 {
        match key {
            MarketSortKey::Volume => m.volume_btc,
            MarketSortKey::Participants => m.participants as f64,
            MarketSortKey::EndDate => m.end_date.timestamp() as f64,
            MarketSortKey::Created => m.created_at.timestamp() as f64,
        }
    };
    markets.sort_by(|a, b| {
        let cmp = key_of(a).partial_cmp(&key_of(b)).unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Asc => cmp,
            SortOrder::Desc => cmp.reverse(),
        }
    });
}
