// Wallet endpoints: balances, fee estimates, simulated deposits/withdrawals.
//
// Balance and fee fetchers follow a degrade-gracefully policy: an upstream
// failure is swallowed locally and replaced with hardcoded fallback values,
// never surfaced to the client as an error. Deposits and withdrawals are
// fire-and-forget simulations; nothing persists.

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app_state::SharedState;
use crate::format;
use crate::handlers::ApiResult;
use crate::models::{ApiResponse, DepositRequest, WithdrawRequest, BTC_USD_RATE};

/// Flat network fee charged on simulated withdrawals, in BTC.
pub const WITHDRAWAL_FEE_BTC: f64 = 0.00005;

/// Upstream timeout; past this the fallback wins.
const UPSTREAM_TIMEOUT_SECS: u64 = 3;

// ===== RESPONSE TYPES =====

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalances {
    pub btc: f64,
    pub btc_display: String,
    pub sats_display: String,
    pub usd_display: String,
    pub tokens: Vec<TokenBalance>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub symbol: String,
    pub amount: f64,
    pub amount_display: String,
    pub usd_value: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFees {
    /// sats/vB tiers.
    pub fast: u64,
    pub medium: u64,
    pub slow: u64,
    pub unit: String,
    pub updated_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositReceipt {
    pub deposit_address: String,
    pub amount: f64,
    pub amount_display: String,
    pub status: String,
    pub expires_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawReceipt {
    pub transaction_id: String,
    pub status: String,
    pub amount: f64,
    pub amount_display: String,
    pub fee: f64,
    pub fee_display: String,
}

// ===== UPSTREAM SHAPES =====

#[derive(Debug, Deserialize)]
struct UpstreamBalances {
    btc: f64,
    #[serde(default)]
    tokens: Vec<UpstreamTokenBalance>,
}

#[derive(Debug, Deserialize)]
struct UpstreamTokenBalance {
    symbol: String,
    amount: f64,
    usd_value: f64,
}

/// mempool.space-shaped recommended-fee payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamFees {
    fastest_fee: u64,
    half_hour_fee: u64,
    hour_fee: u64,
}

// ===== FALLBACKS =====

fn fallback_balances() -> WalletBalances {
    build_balances(
        0.5234,
        vec![
            ("ODINDOG".to_string(), 125_000.0, 2_625.0),
            ("VALH".to_string(), 9_800.0, 412.0),
        ],
    )
}

fn fallback_fees() -> NetworkFees {
    NetworkFees {
        fast: 32,
        medium: 18,
        slow: 8,
        unit: "sats/vB".into(),
        updated_at: Utc::now(),
    }
}

fn build_balances(btc: f64, tokens: Vec<(String, f64, f64)>) -> WalletBalances {
    WalletBalances {
        btc,
        btc_display: format::format_btc(btc),
        sats_display: format::format_sats(btc),
        usd_display: format::format_usd(btc * BTC_USD_RATE),
        tokens: tokens
            .into_iter()
            .map(|(symbol, amount, usd)| TokenBalance {
                symbol,
                amount,
                amount_display: format::format_token_amount(amount),
                usd_value: format::format_usd(usd),
            })
            .collect(),
    }
}

// ===== HANDLERS =====

/// GET /api/wallet/balances
pub async fn get_balances(State(state): State<SharedState>) -> Json<ApiResponse<WalletBalances>> {
    let url = state.lock().unwrap().config.wallet_api_url.clone();

    let balances = match url {
        Some(url) => match fetch_upstream_balances(&url).await {
            Ok(balances) => balances,
            Err(e) => {
                tracing::warn!(error = %e, "wallet balance fetch failed, serving fallback");
                fallback_balances()
            }
        },
        None => fallback_balances(),
    };

    Json(ApiResponse::ok(balances))
}

/// GET /api/wallet/fees
pub async fn get_fees(State(state): State<SharedState>) -> Json<ApiResponse<NetworkFees>> {
    let url = state.lock().unwrap().config.fee_api_url.clone();

    let fees = match url {
        Some(url) => match fetch_upstream_fees(&url).await {
            Ok(fees) => fees,
            Err(e) => {
                tracing::warn!(error = %e, "fee estimate fetch failed, serving fallback");
                fallback_fees()
            }
        },
        None => fallback_fees(),
    };

    Json(ApiResponse::ok(fees))
}

async fn fetch_upstream_balances(url: &str) -> Result<WalletBalances, reqwest::Error> {
    let raw: UpstreamBalances = reqwest::Client::new()
        .get(url)
        .timeout(std::time::Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(build_balances(
        raw.btc,
        raw.tokens
            .into_iter()
            .map(|t| (t.symbol, t.amount, t.usd_value))
            .collect(),
    ))
}

async fn fetch_upstream_fees(url: &str) -> Result<NetworkFees, reqwest::Error> {
    let raw: UpstreamFees = reqwest::Client::new()
        .get(url)
        .timeout(std::time::Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(NetworkFees {
        fast: raw.fastest_fee,
        medium: raw.half_hour_fee,
        slow: raw.hour_fee,
        unit: "sats/vB".into(),
        updated_at: Utc::now(),
    })
}

/// POST /api/wallet/deposit
pub async fn deposit(
    State(state): State<SharedState>,
    Json(payload): Json<DepositRequest>,
) -> ApiResult<DepositReceipt> {
    if payload.amount <= 0.0 {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err("Invalid deposit amount")),
        ));
    }

    let receipt = DepositReceipt {
        deposit_address: format!("bc1q{}", Uuid::new_v4().simple()),
        amount: payload.amount,
        amount_display: format::format_btc(payload.amount),
        status: "pending".into(),
        expires_at: Utc::now() + Duration::minutes(30),
    };

    let mut app_state = state.lock().unwrap();
    app_state.log_activity(
        "📥",
        "DEPOSIT",
        &format!("{} to {}", receipt.amount_display, format::format_user_id(&receipt.deposit_address)),
    );

    Ok(Json(ApiResponse::ok(receipt)))
}

/// POST /api/wallet/withdraw
pub async fn withdraw(
    State(state): State<SharedState>,
    Json(payload): Json<WithdrawRequest>,
) -> ApiResult<WithdrawReceipt> {
    let bad = |msg: &str| (StatusCode::BAD_REQUEST, Json(ApiResponse::err(msg)));

    let address = payload
        .address
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| bad("Missing withdrawal address"))?;
    if payload.amount <= 0.0 {
        return Err(bad("Invalid withdrawal amount"));
    }

    let receipt = WithdrawReceipt {
        transaction_id: format!("tx_{}", Uuid::new_v4().simple()),
        status: "pending".into(),
        amount: payload.amount,
        amount_display: format::format_btc(payload.amount),
        fee: WITHDRAWAL_FEE_BTC,
        fee_display: format::format_sats(WITHDRAWAL_FEE_BTC),
    };

    let mut app_state = state.lock().unwrap();
    app_state.log_activity(
        "📤",
        "WITHDRAW",
        &format!("{} to {}", receipt.amount_display, format::format_user_id(&address)),
    );

    Ok(Json(ApiResponse::ok(receipt)))
}
