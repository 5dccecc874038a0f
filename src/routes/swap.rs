// Swap quote and execution endpoints.
//
// Quotes come from a fixed bonding-curve-like formula over a static pair
// table; execution is a simulated echo. The returned status never leaves
// "pending" — a background task logs the confirmation server-side after a
// delay, mirroring how the dashboard has always treated swaps as
// fire-and-forget.

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::app_state::SharedState;
use crate::handlers::ApiResult;
use crate::models::{ApiResponse, SwapExecuteRequest, SwapQuoteRequest};

/// Protocol fee taken off the input amount.
pub const SWAP_FEE_RATE: f64 = 0.005;

/// Price impact per input unit on the simulated curve.
pub const PRICE_IMPACT_PER_UNIT: f64 = 0.001;

/// Impact cap.
pub const MAX_PRICE_IMPACT: f64 = 0.05;

/// Fixed network cost estimate, in BTC.
pub const ESTIMATED_GAS_BTC: f64 = 0.000012;

const DEFAULT_SLIPPAGE: f64 = 0.5;

/// Static mid rates per pair, in `to` units per `from` unit.
const BASE_RATES: [(&str, &str, f64); 4] = [
    ("BTC", "ODINDOG", 125_000.0),
    ("BTC", "VALH", 310_000.0),
    ("BTC", "CKBTC", 1.0),
    ("ODINDOG", "VALH", 2.48),
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    pub input_amount: f64,
    pub output_amount: f64,
    pub rate: f64,
    pub price_impact: f64,
    pub fee: f64,
    pub estimated_gas: f64,
    pub slippage: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapExecution {
    pub transaction_id: String,
    pub status: String,
    pub from_token: String,
    pub to_token: String,
    #[serde(flatten)]
    pub quote: SwapQuote,
    pub timestamp: chrono::DateTime<Utc>,
}

/// Mid rate for a pair: direct table hit, inverse of the reverse pair, or
/// 1.0 for anything unknown.
pub fn base_rate(from: &str, to: &str) -> f64 {
    let from = from.to_uppercase();
    let to = to.to_uppercase();
    for (f, t, rate) in BASE_RATES {
        if f == from && t == to {
            return rate;
        }
        if f == to && t == from {
            return 1.0 / rate;
        }
    }
    1.0
}

/// The quote formula: impact scales linearly with size up to the cap, the
/// fee comes off the input before conversion.
pub fn compute_quote(from: &str, to: &str, amount: f64, slippage: Option<f64>) -> SwapQuote {
    let price_impact = (amount * PRICE_IMPACT_PER_UNIT).min(MAX_PRICE_IMPACT);
    let rate = base_rate(from, to) * (1.0 - price_impact);
    let fee = amount * SWAP_FEE_RATE;
    SwapQuote {
        input_amount: amount,
        output_amount: (amount - fee) * rate,
        rate,
        price_impact,
        fee,
        estimated_gas: ESTIMATED_GAS_BTC,
        slippage: slippage.unwrap_or(DEFAULT_SLIPPAGE),
    }
}

// ===== HANDLERS =====

/// POST /api/swap/quote
pub async fn quote(
    State(_state): State<SharedState>,
    Json(payload): Json<SwapQuoteRequest>,
) -> ApiResult<SwapQuote> {
    if payload.amount <= 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err("Invalid swap amount")),
        ));
    }

    let quote = compute_quote(
        &payload.from_token,
        &payload.to_token,
        payload.amount,
        payload.slippage,
    );
    Ok(Json(ApiResponse::ok(quote)))
}

/// POST /api/swap/execute
pub async fn execute(
    State(state): State<SharedState>,
    Json(payload): Json<SwapExecuteRequest>,
) -> ApiResult<SwapExecution> {
    if payload.amount <= 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err("Invalid swap amount")),
        ));
    }

    let quote = compute_quote(
        &payload.from_token,
        &payload.to_token,
        payload.amount,
        payload.slippage,
    );

    let execution = SwapExecution {
        transaction_id: format!("swap_{}", Uuid::new_v4().simple()),
        status: "pending".into(),
        from_token: payload.from_token.clone(),
        to_token: payload.to_token.clone(),
        quote,
        timestamp: Utc::now(),
    };

    {
        let mut app_state = state.lock().unwrap();
        app_state.log_activity(
            "🔁",
            "SWAP",
            &format!(
                "{} {} -> {} | {}",
                payload.amount,
                payload.from_token,
                payload.to_token,
                crate::format::format_tx_id(&execution.transaction_id)
            ),
        );
    }

    // The response stays pending; only the server log ever sees the
    // confirmation.
    let tx_id = execution.transaction_id.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
        tracing::info!(transaction_id = %tx_id, "swap confirmed");
    });

    Ok(Json(ApiResponse::ok(execution)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_rate_direct_inverse_and_default() {
        assert_eq!(base_rate("BTC", "ODINDOG"), 125_000.0);
        assert!((base_rate("odindog", "btc") - 1.0 / 125_000.0).abs() < 1e-12);
        assert_eq!(base_rate("FOO", "BAR"), 1.0);
    }

    #[test]
    fn test_price_impact_is_capped() {
        let q = compute_quote("FOO", "BAR", 100.0, None);
        assert_eq!(q.price_impact, MAX_PRICE_IMPACT);
        let q = compute_quote("FOO", "BAR", 10.0, None);
        assert!((q.price_impact - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_fee_and_output() {
        let q = compute_quote("FOO", "BAR", 10.0, Some(1.0));
        assert!((q.fee - 0.05).abs() < 1e-12);
        // rate = 1.0 * (1 - 0.01); output = (10 - 0.05) * 0.99
        assert!((q.rate - 0.99).abs() < 1e-12);
        assert!((q.output_amount - 9.95 * 0.99).abs() < 1e-9);
        assert_eq!(q.slippage, 1.0);
    }

    #[test]
    fn test_default_slippage() {
        let q = compute_quote("BTC", "VALH", 0.1, None);
        assert_eq!(q.slippage, 0.5);
    }
}
