//! Data model shared by the suggestion pipeline and its callers.
//!
//! Every value here is built fresh per request and serialised straight into
//! the submission response; nothing in this module is persisted.

use serde::Serialize;

/// Latitude/longitude pair in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A destination resolved by the geocoder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPlace {
    pub display_name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub map_url: String,
}

impl ResolvedPlace {
    /// Builds a resolved place; the map link is derived from the coordinates.
    #[must_use]
    pub fn new(display_name: String, country: String, coordinates: Coordinates) -> Self {
        let map_url = map_url(coordinates);
        Self {
            display_name,
            country,
            coordinates,
            map_url,
        }
    }
}

/// OpenStreetMap link centred on `coordinates`.
#[must_use]
pub fn map_url(coordinates: Coordinates) -> String {
    let Coordinates { lat, lon } = coordinates;
    format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=12/{lat}/{lon}")
}

/// Which source produced an [`Attraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Curated,
    Live,
    Generated,
}

/// One candidate attraction for a destination.
///
/// `title` is the de-duplication key when curated and live results are merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub title: String,
    /// Stable identifier, unique within a destination's list.
    pub page_id: String,
    pub price_local: Option<f64>,
    pub currency: Option<String>,
    #[serde(rename = "priceUSD")]
    pub price_usd: Option<i64>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub page_url: Option<String>,
    /// Meters from the resolved destination; only live results carry one.
    pub distance: Option<f64>,
    pub source: Provenance,
}

/// Successful suggestion payload for one destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSuggestion {
    pub destination_label: String,
    pub exact_name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub map_url: String,
    pub per_day_budget: Option<i64>,
    pub currency: String,
    pub uses_curated_catalog: bool,
    pub attractions: Vec<Attraction>,
    pub notes: Option<String>,
}

/// Per-destination outcome; failures are values, never errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(
    tag = "status",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum SuggestionResult {
    Ok(Box<DestinationSuggestion>),
    NotFound {
        destination_label: String,
        message: String,
    },
    Error {
        destination_label: String,
        message: String,
    },
}

impl SuggestionResult {
    #[must_use]
    pub fn destination_label(&self) -> &str {
        match self {
            SuggestionResult::Ok(suggestion) => &suggestion.destination_label,
            SuggestionResult::NotFound {
                destination_label, ..
            }
            | SuggestionResult::Error {
                destination_label, ..
            } => destination_label,
        }
    }

    /// Wire name of the status tag.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            SuggestionResult::Ok(_) => "ok",
            SuggestionResult::NotFound { .. } => "not_found",
            SuggestionResult::Error { .. } => "error",
        }
    }

    #[must_use]
    pub fn as_ok(&self) -> Option<&DestinationSuggestion> {
        match self {
            SuggestionResult::Ok(suggestion) => Some(suggestion),
            _ => None,
        }
    }
}

/// Lower-case, hyphen-separated identifier built from a title.
pub(crate) fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
