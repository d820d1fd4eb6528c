//! Currency listing routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::AppState;

/// Creates the currency routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/currencies", get(list_currencies))
}

/// Response for a stored currency rate.
#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    /// Currency code (ISO 4217).
    pub code: String,
    /// How many USD one unit of the currency is worth.
    pub usd_value: Decimal,
}

/// GET `/currencies` - List every stored rate, ascending by code.
async fn list_currencies(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_all().await {
        Ok(rates) => {
            let response: Vec<CurrencyResponse> = rates
                .into_iter()
                .map(|r| CurrencyResponse {
                    code: r.code.as_str().to_string(),
                    usd_value: r.usd_value,
                })
                .collect();

            (StatusCode::OK, Json(json!({ "currencies": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list currencies");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}
