//! Currency conversion routes.

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::AppState;
use florin_core::currency::{ConvertError, Converter};

/// Creates the conversion routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/convert", post(convert_currency))
}

/// Request body for a conversion.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    /// Amount to convert, as a decimal string.
    pub amount: String,
    /// Source currency code.
    pub currency_from: String,
    /// Target currency code.
    pub currency_to: String,
}

/// Response for a successful conversion.
#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    /// Parsed source amount.
    pub amount: String,
    /// Canonical source currency code.
    pub from: String,
    /// Canonical target currency code.
    pub to: String,
    /// Converted amount with exactly two decimal places.
    pub result: String,
}

/// POST `/convert` - Convert an amount between two stored currencies.
async fn convert_currency(
    State(state): State<AppState>,
    Json(payload): Json<ConvertRequest>,
) -> impl IntoResponse {
    let converter = Converter::new(Arc::clone(&state.store));

    match converter
        .convert_str(&payload.amount, &payload.currency_from, &payload.currency_to)
        .await
    {
        Ok(conversion) => {
            let response = ConversionResponse {
                amount: conversion.amount.to_string(),
                from: conversion.from.as_str().to_string(),
                to: conversion.to.as_str().to_string(),
                result: conversion.result_display(),
            };

            (StatusCode::OK, Json(json!(response))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Conversion failed");
            match e {
                ConvertError::InvalidNumber => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_number",
                        "message": "invalid number"
                    })),
                )
                    .into_response(),
                ConvertError::NotPositive => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "not_positive",
                        "message": "not positive"
                    })),
                )
                    .into_response(),
                ConvertError::UnknownCurrency(_) => (
                    StatusCode::NOT_FOUND,
                    Json(json!({
                        "error": "unknown_currency",
                        "message": "unknown currency"
                    })),
                )
                    .into_response(),
                ConvertError::Storage(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "An error occurred"
                    })),
                )
                    .into_response(),
            }
        }
    }
}
