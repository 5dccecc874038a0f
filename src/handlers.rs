// HTTP request handlers for the token feeds and prediction markets.
//
// Every response is the `{success, data?, error?}` envelope. Validation on
// market creation happens before any derived-field computation so a bad
// request never half-builds a market.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::app_state::SharedState;
use crate::models::*;

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn reject<T>(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ApiResponse<T>>) {
    (status, Json(ApiResponse::err(message)))
}

// ===== TOKEN FEED ENDPOINTS =====

/// GET /api/:source/tokens
pub async fn get_source_tokens(
    State(state): State<SharedState>,
    Path(source_id): Path<String>,
) -> ApiResult<Vec<TokenData>> {
    let app_state = state.lock().unwrap();

    let source = app_state
        .source_by_id(&source_id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, format!("Unknown token source: {}", source_id)))?;

    let tokens = source
        .fetch_tokens()
        .map_err(|e| reject(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let now = Utc::now().timestamp();
    let data: Vec<TokenData> = tokens.iter().map(|t| t.to_display(now)).collect();
    tracing::debug!(source = source.id(), count = data.len(), "served token feed");
    Ok(Json(ApiResponse::ok(data)))
}

// ===== PREDICTION MARKET ENDPOINTS =====

/// GET /api/prediction-markets
pub async fn get_prediction_markets(
    State(state): State<SharedState>,
) -> Json<ApiResponse<Vec<PredictionMarket>>> {
    let app_state = state.lock().unwrap();
    Json(ApiResponse::ok(app_state.markets.clone()))
}

/// GET /api/prediction-market/:id
///
/// Unmatched ids fall back to the first seeded market instead of a 404. The
/// dashboard has always relied on this when deep-linking stale ids, so the
/// behavior is kept even though it looks accidental.
pub async fn get_prediction_market(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<PredictionMarket> {
    let app_state = state.lock().unwrap();
    let market = app_state
        .market_by_id(&id)
        .or_else(|| app_state.markets.first())
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Market not found"))?;
    Ok(Json(ApiResponse::ok(market.clone())))
}

/// GET /api/prediction-categories
pub async fn get_prediction_categories(
    State(state): State<SharedState>,
) -> Json<ApiResponse<Vec<PredictionCategory>>> {
    let app_state = state.lock().unwrap();
    Json(ApiResponse::ok(app_state.categories.clone()))
}

/// POST /api/prediction-markets
pub async fn create_prediction_market(
    State(state): State<SharedState>,
    Json(payload): Json<CreateMarketRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PredictionMarket>>), (StatusCode, Json<ApiResponse<PredictionMarket>>)>
{
    let bad_request = |msg: String| reject::<PredictionMarket>(StatusCode::BAD_REQUEST, msg);
    let missing = |field: &str| bad_request(format!("Missing required field: {}", field));

    // Required-field checks run before anything is derived.
    let title = payload.title.filter(|t| !t.trim().is_empty()).ok_or_else(|| missing("title"))?;
    let description = payload.description.ok_or_else(|| missing("description"))?;
    let category = payload.category.ok_or_else(|| missing("category"))?;
    let end_date_raw = payload.end_date.ok_or_else(|| missing("endDate"))?;
    let resolution_link = payload.resolution_link.ok_or_else(|| missing("resolutionLink"))?;
    let market_type_raw = payload.market_type.ok_or_else(|| missing("marketType"))?;
    let option_inputs = payload.options.ok_or_else(|| missing("options"))?;
    let creator = payload.creator.ok_or_else(|| missing("creator"))?;

    let market_type = MarketType::parse(&market_type_raw)
        .ok_or_else(|| bad_request(format!("Invalid marketType: {}", market_type_raw)))?;

    match market_type {
        MarketType::Binary if option_inputs.len() != 2 => {
            return Err(bad_request("Binary markets require exactly 2 options".into()));
        }
        MarketType::MultipleChoice | MarketType::Compound if option_inputs.len() < 2 => {
            return Err(bad_request("Markets require at least 2 options".into()));
        }
        _ => {}
    }

    let end_date: DateTime<Utc> = DateTime::parse_from_rfc3339(&end_date_raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| bad_request(format!("Invalid endDate: {}", end_date_raw)))?;

    // Derived fields: authored once at creation, never recomputed.
    let market_id = Uuid::new_v4().simple().to_string();
    let option_count = option_inputs.len();
    let odds = PredictionMarket::default_odds(market_type, option_count);
    let percentage = PredictionMarket::default_percentage(market_type, option_count);

    let options: Vec<PredictionOption> = option_inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| PredictionOption {
            id: format!("{}_opt_{}", market_id, i),
            label: input.label,
            odds,
            percentage,
            volume: crate::format::format_sats(0.0),
            color: input
                .color
                .unwrap_or_else(|| OPTION_COLORS[i % OPTION_COLORS.len()].to_string()),
        })
        .collect();

    let mut market = PredictionMarket {
        id: market_id,
        title: title.clone(),
        description,
        image: payload
            .image_url
            .unwrap_or_else(|| "https://img.omax.fun/markets/default.png".to_string()),
        category,
        end_date,
        total_volume: String::new(),
        total_volume_usd: String::new(),
        total_volume_sats: String::new(),
        participants: 0,
        options,
        market_type,
        is_active: true,
        featured: false,
        creator,
        // Tag-count limits are a creation-form concern; the server stores
        // whatever it is given.
        tags: payload.tags.unwrap_or_default(),
        resolution_link: Some(resolution_link),
        created_at: Utc::now(),
        volume_btc: 0.0,
    };
    market.set_volume(0.0);

    let mut app_state = state.lock().unwrap();
    app_state.markets.push(market.clone());
    app_state.log_activity("📊", "MARKET_CREATED", &format!("{} ({})", title, market_type.as_str()));

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(market))))
}
