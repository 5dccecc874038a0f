// Token lifecycle categorization.
//
// Every token occupies exactly one bucket at a time, recomputed fresh from
// each feed snapshot. There is no hysteresis: a token whose bonding-curve
// progress oscillates around the graduation threshold will flicker between
// buckets across polls. That is expected behavior, not a bug.

use serde::{Deserialize, Serialize};

/// Bonding-curve progress above which a token counts as about to graduate.
/// The comparison is strictly greater-than, so exactly 0.7 stays newly created.
pub const GRADUATION_THRESHOLD: f64 = 0.7;

/// Lifecycle bucket for a launched token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCategory {
    NewlyCreated,
    AboutToGraduate,
    Graduated,
}

impl TokenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::NewlyCreated => "newly_created",
            TokenCategory::AboutToGraduate => "about_to_graduate",
            TokenCategory::Graduated => "graduated",
        }
    }
}

/// Assign the lifecycle bucket for a token. Order matters: a bonded token is
/// graduated regardless of its reported progress, and an absent progress value
/// falls through to newly created.
pub fn categorize(bonded: bool, progress: Option<f64>) -> TokenCategory {
    if bonded {
        return TokenCategory::Graduated;
    }
    match progress {
        Some(p) if p > GRADUATION_THRESHOLD => TokenCategory::AboutToGraduate,
        _ => TokenCategory::NewlyCreated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonded_takes_precedence_over_progress() {
        assert_eq!(categorize(true, Some(0.9)), TokenCategory::Graduated);
        assert_eq!(categorize(true, Some(0.1)), TokenCategory::Graduated);
        assert_eq!(categorize(true, None), TokenCategory::Graduated);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(categorize(false, Some(0.71)), TokenCategory::AboutToGraduate);
        assert_eq!(categorize(false, Some(0.7)), TokenCategory::NewlyCreated);
    }

    #[test]
    fn test_missing_progress_is_newly_created() {
        assert_eq!(categorize(false, None), TokenCategory::NewlyCreated);
        assert_eq!(categorize(false, Some(0.0)), TokenCategory::NewlyCreated);
    }

    #[test]
    fn test_serde_literals() {
        let json = serde_json::to_string(&TokenCategory::AboutToGraduate).unwrap();
        assert_eq!(json, "\"about_to_graduate\"");
    }
}
