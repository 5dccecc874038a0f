// Router assembly for the Omax API.

pub mod swap;
pub mod wallet;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::app_state::SharedState;
use crate::handlers;

/// Build the full API router. Shared by the binary and the integration tests
/// so both exercise exactly the same routing table.
pub fn api_router(state: SharedState) -> Router {
    Router::new()
        // ===== HEALTH =====
        .route("/", get(health_check))
        .route("/health", get(health_check))
        // ===== PREDICTION MARKETS =====
        .route(
            "/api/prediction-markets",
            get(handlers::get_prediction_markets).post(handlers::create_prediction_market),
        )
        .route("/api/prediction-market/:id", get(handlers::get_prediction_market))
        .route("/api/prediction-categories", get(handlers::get_prediction_categories))
        // ===== WALLET =====
        .route("/api/wallet/balances", get(wallet::get_balances))
        .route("/api/wallet/fees", get(wallet::get_fees))
        .route("/api/wallet/deposit", post(wallet::deposit))
        .route("/api/wallet/withdraw", post(wallet::withdraw))
        // ===== SWAP =====
        .route("/api/swap/quote", post(swap::quote))
        .route("/api/swap/execute", post(swap::execute))
        // ===== TOKEN FEEDS (param route last so static paths win) =====
        .route("/api/:source/tokens", get(handlers::get_source_tokens))
        // Apply CORS and state
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "Omax Market Data Server - Online"
}
