// Filter/sort pipelines for the dashboard views.
//
// The server never filters: these pipelines run over the full fetched
// collection on the client side of the contract. They are pure, synchronous
// functions so both views (token trenches/trending and prediction markets)
// share one implementation instead of re-deriving predicates per page.

pub mod markets;
pub mod tokens;

use serde::{Deserialize, Serialize};

/// Sort direction shared by both pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Parse a user-supplied numeric bound. Empty means unbounded; a value that
/// does not parse is also treated as unbounded rather than rejecting the
/// whole filter form.
pub(crate) fn parse_bound(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Inclusive range check against optional bounds.
pub(crate) fn within_bounds(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    if let Some(min) = min {
        if value < min {
            return false;
        }
    }
    if let Some(max) = max {
        if value > max {
            return false;
        }
    }
    true
}
