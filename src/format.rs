// Display formatting utilities for the Omax dashboard API.
//
// Every numeric value the client renders (BTC amounts, USD, token counts,
// percentages, relative times) goes through these functions. They are pure and
// total: no error paths, no side effects. Magnitude-dependent precision rules
// match the dashboard's display contract exactly, so keep them in sync with
// the tests at the bottom of this file.

/// Sats per BTC.
pub const SATS_PER_BTC: f64 = 100_000_000.0;

// ============================================================================
// CURRENCY FORMATTING
// ============================================================================

/// Format a BTC amount with magnitude-dependent precision.
///
/// - `0` -> `"0 BTC"`
/// - `< 0.001` -> 8 decimals (dust amounts)
/// - `>= 1000` -> comma-grouped, 2 decimals
/// - `>= 1` -> 2 decimals
/// - otherwise -> 5 decimals
pub fn format_btc(amount: f64) -> String {
    if amount == 0.0 {
        return "0 BTC".to_string();
    }
    if amount < 0.001 {
        format!("{:.8} BTC", amount)
    } else if amount >= 1000.0 {
        format!("{} BTC", group_thousands(&format!("{:.2}", amount)))
    } else if amount >= 1.0 {
        format!("{:.2} BTC", amount)
    } else {
        format!("{:.5} BTC", amount)
    }
}

/// Format a BTC amount as satoshis with K/M suffixes.
pub fn format_sats(btc_amount: f64) -> String {
    let sats = (btc_amount * SATS_PER_BTC).round();
    if sats == 0.0 {
        return "0 sats".to_string();
    }
    if sats >= 1_000_000.0 {
        format!("{:.1}M sats", sats / 1_000_000.0)
    } else if sats >= 1_000.0 {
        format!("{:.0}K sats", sats / 1_000.0)
    } else {
        format!("{} sats", sats as i64)
    }
}

/// Format a raw token quantity with B/M/K suffixes.
pub fn format_token_amount(amount: f64) -> String {
    if amount == 0.0 {
        return "0".to_string();
    }
    if amount >= 1_000_000_000.0 {
        format!("{:.2}B", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("{:.2}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("{:.2}K", amount / 1_000.0)
    } else if amount >= 100.0 {
        format!("{:.0}", amount)
    } else if amount >= 1.0 {
        format!("{:.2}", amount)
    } else {
        format!("{:.6}", amount)
    }
}

/// Format a USD value with `$` prefix and B/M/K suffixes.
pub fn format_usd(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("${:.2}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.2}K", value / 1_000.0)
    } else {
        format!("${:.2}", value)
    }
}

// ============================================================================
// PERCENTAGES
// ============================================================================

/// Percentage change between two prices, always carrying an explicit sign.
/// A zero previous price yields `"+0.00%"` rather than dividing by zero.
pub fn format_price_change(current: f64, previous: f64) -> String {
    if previous == 0.0 {
        return "+0.00%".to_string();
    }
    let change = ((current - previous) / previous) * 100.0;
    format_percent_signed(change)
}

/// Render an already-computed percentage with an explicit `+`/`-` prefix.
/// Used for the `change5m`/`change1h`/`change6h`/`change24h` columns.
pub fn format_percent_signed(percent: f64) -> String {
    if percent >= 0.0 {
        format!("+{:.2}%", percent)
    } else {
        format!("{:.2}%", percent)
    }
}

// ============================================================================
// TIME
// ============================================================================

/// Relative-time string for a unix timestamp, largest applicable unit first.
///
/// `now` is passed explicitly so callers stay deterministic under test.
/// Timestamps in the future collapse to `"just now"` rather than printing a
/// negative count.
pub fn format_time_ago(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;
    if diff <= 30 {
        return "just now".to_string();
    }

    let days = diff / 86_400;
    if days > 0 {
        return format!("{} day{} ago", days, plural(days));
    }
    let hours = diff / 3_600;
    if hours > 0 {
        return format!("{} hour{} ago", hours, plural(hours));
    }
    let minutes = diff / 60;
    if minutes > 0 {
        return format!("{} minute{} ago", minutes, plural(minutes));
    }
    format!("{} seconds ago", diff)
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Truncate a transaction id to `abcd...wxyz` when longer than 10 chars.
pub fn format_tx_id(tx_id: &str) -> String {
    if tx_id.len() > 10 {
        format!("{}...{}", &tx_id[..4], &tx_id[tx_id.len() - 4..])
    } else {
        tx_id.to_string()
    }
}

/// Truncate a user id to `abcd...yz` when longer than 10 chars.
pub fn format_user_id(user_id: &str) -> String {
    if user_id.len() > 10 {
        format!("{}...{}", &user_id[..4], &user_id[user_id.len() - 2..])
    } else {
        user_id.to_string()
    }
}

/// Insert en-US comma grouping into the integer part of a decimal string.
fn group_thousands(value: &str) -> String {
    let (int_part, frac_part) = match value.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (value, None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_btc_zero() {
        assert_eq!(format_btc(0.0), "0 BTC");
    }

    #[test]
    fn test_format_btc_dust_has_eight_decimals() {
        assert_eq!(format_btc(0.0000005), "0.00000050 BTC");
    }

    #[test]
    fn test_format_btc_large_is_grouped() {
        assert_eq!(format_btc(1500.0), "1,500.00 BTC");
        assert_eq!(format_btc(1_234_567.89), "1,234,567.89 BTC");
    }

    #[test]
    fn test_format_btc_mid_ranges() {
        assert_eq!(format_btc(2.5), "2.50 BTC");
        assert_eq!(format_btc(0.5234), "0.52340 BTC");
    }

    #[test]
    fn test_format_sats() {
        assert_eq!(format_sats(0.0), "0 sats");
        assert_eq!(format_sats(0.000005), "500 sats");
        assert_eq!(format_sats(0.00005), "5K sats");
        assert_eq!(format_sats(0.025), "2.5M sats");
    }

    #[test]
    fn test_format_token_amount_ladder() {
        assert_eq!(format_token_amount(0.0), "0");
        assert_eq!(format_token_amount(2_500_000_000.0), "2.50B");
        assert_eq!(format_token_amount(3_400_000.0), "3.40M");
        assert_eq!(format_token_amount(1_500.0), "1.50K");
        assert_eq!(format_token_amount(250.0), "250");
        assert_eq!(format_token_amount(5.25), "5.25");
        assert_eq!(format_token_amount(0.000123), "0.000123");
    }

    #[test]
    fn test_format_usd_ladder() {
        assert_eq!(format_usd(1_200_000_000.0), "$1.20B");
        assert_eq!(format_usd(4_500_000.0), "$4.50M");
        assert_eq!(format_usd(12_340.0), "$12.34K");
        assert_eq!(format_usd(99.5), "$99.50");
        assert_eq!(format_usd(0.0), "$0.00");
    }

    #[test]
    fn test_price_change_divide_by_zero_guard() {
        assert_eq!(format_price_change(100.0, 0.0), "+0.00%");
        assert_eq!(format_price_change(-5.0, 0.0), "+0.00%");
    }

    #[test]
    fn test_price_change_signed() {
        assert_eq!(format_price_change(110.0, 100.0), "+10.00%");
        assert_eq!(format_price_change(90.0, 100.0), "-10.00%");
        assert_eq!(format_price_change(100.0, 100.0), "+0.00%");
    }

    #[test]
    fn test_time_ago_units() {
        let now = 1_700_000_000;
        assert_eq!(format_time_ago(now - 3 * 86_400, now), "3 days ago");
        assert_eq!(format_time_ago(now - 86_400, now), "1 day ago");
        assert_eq!(format_time_ago(now - 2 * 3_600, now), "2 hours ago");
        assert_eq!(format_time_ago(now - 5 * 60, now), "5 minutes ago");
        assert_eq!(format_time_ago(now - 45, now), "45 seconds ago");
        assert_eq!(format_time_ago(now - 10, now), "just now");
    }

    #[test]
    fn test_time_ago_future_timestamp_guard() {
        let now = 1_700_000_000;
        assert_eq!(format_time_ago(now + 500, now), "just now");
    }

    #[test]
    fn test_id_truncation() {
        assert_eq!(format_tx_id("abcdef123456789"), "abcd...6789");
        assert_eq!(format_tx_id("short"), "short");
        assert_eq!(format_user_id("user_9f8e7d6c5b"), "user...5b");
        assert_eq!(format_user_id("0123456789"), "0123456789");
    }
}
