// Omax Market Data Server - Main Entry Point
// Token feed aggregation, prediction markets, wallet and swap simulation.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use omax_server::app_state::{AppState, Config};
use omax_server::routes::api_router;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    println!("\n═══════════════════════════════════════════════");
    println!("     📈 Omax Market Data Server");
    println!("═══════════════════════════════════════════════\n");

    let config = Config::from_env();
    let port = config.port;
    let state = Arc::new(Mutex::new(AppState::new(config)));

    let app = api_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    println!("📡 Listening on http://{}\n", addr);
    println!("📋 Available Endpoints:");
    println!("   GET  /api/{{odin|astroape|tyche|kongswap}}/tokens");
    println!("   GET  /api/prediction-markets");
    println!("   POST /api/prediction-markets");
    println!("   GET  /api/prediction-market/:id");
    println!("   GET  /api/prediction-categories");
    println!("   GET  /api/wallet/balances");
    println!("   GET  /api/wallet/fees");
    println!("   POST /api/wallet/deposit");
    println!("   POST /api/wallet/withdraw");
    println!("   POST /api/swap/quote");
    println!("   POST /api/swap/execute\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C handler");
    println!("\n🛑 Shutdown signal received, goodbye!\n");
}
