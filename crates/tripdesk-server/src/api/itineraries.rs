//! Itinerary request intake and lookup.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinError;
use tripdesk_core::{DestinationInput, SuggestionResult};
use tripdesk_db::{ItineraryRow, NewItinerary};

use super::{map_db_error, ApiError, AppState};
use crate::middleware::RequestId;

pub(super) const SUBMITTED_MESSAGE: &str = "Itinerary request submitted successfully";
pub(super) const SAVE_FAILED_MESSAGE: &str = "Failed to save itinerary request";
const FETCH_ALL_FAILED_MESSAGE: &str = "Failed to fetch itineraries";
const FETCH_ONE_FAILED_MESSAGE: &str = "Failed to fetch itinerary";
const NOT_FOUND_MESSAGE: &str = "Itinerary not found";

/// Body of `POST /api/itinerary`.
///
/// Numeric fields are taken as raw JSON so that form values sent as strings
/// ("2000") are accepted and anything unusable reports as missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ItineraryRequest {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    #[serde(default)]
    destinations: DestinationInput,
    budget: Option<Value>,
    days: Option<Value>,
    food_preferences: Option<String>,
    stay_preferences: Option<String>,
    sightseeing: Option<String>,
    permissions: Option<String>,
    special_requests: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ValidatedRequest {
    pub itinerary: NewItinerary,
    pub destinations: DestinationInput,
    pub budget: f64,
    pub days: i64,
}

#[derive(Debug, Serialize)]
pub(super) struct SubmitResponse {
    success: bool,
    message: &'static str,
    id: i64,
    suggestions: Vec<SuggestionResult>,
}

/// Stored row as returned by the read endpoints.
#[derive(Debug, Serialize)]
pub(super) struct ItineraryView {
    id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    destinations: String,
    budget: Option<f64>,
    days: Option<i32>,
    food_preferences: Option<String>,
    stay_preferences: Option<String>,
    sightseeing: Option<String>,
    permissions: Option<String>,
    special_requests: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ItineraryRow> for ItineraryView {
    fn from(row: ItineraryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            destinations: row.destinations,
            budget: row.budget,
            days: row.days,
            food_preferences: row.food_preferences,
            stay_preferences: row.stay_preferences,
            sightseeing: row.sightseeing,
            permissions: row.permissions,
            special_requests: row.special_requests,
            created_at: row.created_at,
        }
    }
}

/// Checks required fields and builds the insert payload.
///
/// # Errors
///
/// Returns a 400 [`ApiError`] naming every missing or unusable field.
pub(super) fn validate(request: ItineraryRequest) -> Result<ValidatedRequest, ApiError> {
    let name = non_blank(request.name);
    let email = non_blank(request.email);
    let labels = request.destinations.labels();
    let budget = request
        .budget
        .as_ref()
        .and_then(as_number)
        .filter(|b| *b > 0.0);
    let days = request
        .days
        .as_ref()
        .and_then(as_whole_number)
        .filter(|d| *d > 0)
        .and_then(|d| i32::try_from(d).ok());

    let mut missing = Vec::new();
    if name.is_none() {
        missing.push("name");
    }
    if email.is_none() {
        missing.push("email");
    }
    if labels.is_empty() {
        missing.push("destinations");
    }
    if budget.is_none() {
        missing.push("budget");
    }
    if days.is_none() {
        missing.push("days");
    }

    match (name, email, budget, days) {
        (Some(name), Some(email), Some(budget), Some(days)) if missing.is_empty() => {
            Ok(ValidatedRequest {
                itinerary: NewItinerary {
                    name,
                    email,
                    phone: non_blank(request.phone),
                    destinations: labels,
                    budget: Some(budget),
                    days: Some(days),
                    food_preferences: non_blank(request.food_preferences),
                    stay_preferences: non_blank(request.stay_preferences),
                    sightseeing: non_blank(request.sightseeing),
                    permissions: non_blank(request.permissions),
                    special_requests: non_blank(request.special_requests),
                },
                destinations: request.destinations,
                budget,
                days: i64::from(days),
            })
        }
        _ => Err(ApiError::bad_request(format!(
            "Missing required fields: {}",
            missing.join(", ")
        ))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

#[allow(clippy::cast_possible_truncation)]
fn as_whole_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// `POST /api/itinerary`: store the request and build suggestions.
///
/// The insert and the suggestion pipeline run side by side. Suggestions run
/// on their own task, so a panic there costs the caller only the
/// suggestion list, never the saved request.
pub(super) async fn create_itinerary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ItineraryRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(request_id = %req_id.0, error = %rejection, "rejected itinerary body");
        ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    })?;
    let validated = validate(request)?;

    let suggestions = std::sync::Arc::clone(&state.suggestions);
    let destinations = validated.destinations.clone();
    let (budget, days) = (validated.budget, validated.days);
    let suggestion_task = tokio::spawn(async move {
        suggestions
            .build_suggestions(&destinations, Some(days), Some(budget))
            .await
    });

    let (saved, built) = tokio::join!(
        tripdesk_db::insert_itinerary(&state.pool, &validated.itinerary),
        suggestion_task
    );

    let id = saved.map_err(|e| map_db_error(&req_id, &e, SAVE_FAILED_MESSAGE))?;

    let suggestions = settle_suggestions(&req_id, built);

    tracing::info!(
        request_id = %req_id.0,
        id,
        destinations = validated.itinerary.destinations.len(),
        suggestions = suggestions.len(),
        "itinerary request saved"
    );

    Ok(Json(SubmitResponse {
        success: true,
        message: SUBMITTED_MESSAGE,
        id,
        suggestions,
    }))
}

/// A failed or panicked suggestion task degrades to an empty list.
fn settle_suggestions(
    req_id: &RequestId,
    built: Result<Vec<SuggestionResult>, JoinError>,
) -> Vec<SuggestionResult> {
    built.unwrap_or_else(|e| {
        tracing::error!(request_id = %req_id.0, error = %e, "suggestion task failed");
        Vec::new()
    })
}

/// `GET /api/itineraries`: every stored request, newest first.
pub(super) async fn list_itineraries(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<ItineraryView>>, ApiError> {
    let rows = tripdesk_db::list_itineraries(&state.pool)
        .await
        .map_err(|e| map_db_error(&req_id, &e, FETCH_ALL_FAILED_MESSAGE))?;
    Ok(Json(rows.into_iter().map(ItineraryView::from).collect()))
}

/// `GET /api/itinerary/{id}`. A non-numeric id is simply not found.
pub(super) async fn get_itinerary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(raw_id): Path<String>,
) -> Result<Json<ItineraryView>, ApiError> {
    let Ok(id) = raw_id.trim().parse::<i64>() else {
        return Err(ApiError::not_found(NOT_FOUND_MESSAGE));
    };

    tripdesk_db::get_itinerary(&state.pool, id)
        .await
        .map_err(|e| map_db_error(&req_id, &e, FETCH_ONE_FAILED_MESSAGE))?
        .map(|row| Json(ItineraryView::from(row)))
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MESSAGE))
}
