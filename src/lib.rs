/// Omax market data server
/// Exports all modules for use as a library crate

pub mod app_state;
pub mod categorize;
pub mod filtering;
pub mod format;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sources;

pub use app_state::{AppState, Config, SharedState};
pub use categorize::{categorize, TokenCategory, GRADUATION_THRESHOLD};
pub use filtering::markets::{MarketFilterOptions, MarketSortKey, MarketStatusFilter, MarketTimeframe};
pub use filtering::tokens::{TokenAge, TokenFilterOptions, TokenSortKey};
pub use filtering::SortOrder;
pub use models::{
    ApiResponse, MarketType, PredictionCategory, PredictionMarket, PredictionOption, TokenData,
};
pub use routes::api_router;
pub use sources::{SourceError, Token, TokenSource};
