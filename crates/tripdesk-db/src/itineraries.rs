//! Database operations for the `itineraries` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `itineraries` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ItineraryRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Destination labels joined with `", "`.
    pub destinations: String,
    pub budget: Option<f64>,
    pub days: Option<i32>,
    pub food_preferences: Option<String>,
    pub stay_preferences: Option<String>,
    pub sightseeing: Option<String>,
    pub permissions: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Values for a new itinerary request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewItinerary {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub destinations: Vec<String>,
    pub budget: Option<f64>,
    pub days: Option<i32>,
    pub food_preferences: Option<String>,
    pub stay_preferences: Option<String>,
    pub sightseeing: Option<String>,
    pub permissions: Option<String>,
    pub special_requests: Option<String>,
}

impl NewItinerary {
    /// Storage form of the destination list.
    #[must_use]
    pub fn joined_destinations(&self) -> String {
        self.destinations.join(", ")
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, email, phone, destinations, budget, days, \
     food_preferences, stay_preferences, sightseeing, permissions, special_requests, created_at \
     FROM itineraries";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Inserts a request and returns its generated `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_itinerary(pool: &PgPool, itinerary: &NewItinerary) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO itineraries \
             (name, email, phone, destinations, budget, days, food_preferences, \
              stay_preferences, sightseeing, permissions, special_requests) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING id",
    )
    .bind(&itinerary.name)
    .bind(&itinerary.email)
    .bind(itinerary.phone.as_deref())
    .bind(itinerary.joined_destinations())
    .bind(itinerary.budget)
    .bind(itinerary.days)
    .bind(itinerary.food_preferences.as_deref())
    .bind(itinerary.stay_preferences.as_deref())
    .bind(itinerary.sightseeing.as_deref())
    .bind(itinerary.permissions.as_deref())
    .bind(itinerary.special_requests.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns every stored request, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_itineraries(pool: &PgPool) -> Result<Vec<ItineraryRow>, DbError> {
    let rows = sqlx::query_as::<_, ItineraryRow>(&format!(
        "{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single request by id, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_itinerary(pool: &PgPool, id: i64) -> Result<Option<ItineraryRow>, DbError> {
    let row = sqlx::query_as::<_, ItineraryRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}
