//! Wire types for the geocoding and geosearch responses.
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! vendor payloads is ignored.

use serde::Deserialize;

use crate::LookupError;

/// One element of a Nominatim `/search?format=jsonv2` array.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: RawCoordinate,
    pub lon: RawCoordinate,
    #[serde(default)]
    pub name: Option<String>,
    pub display_name: String,
    #[serde(default)]
    pub address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
pub struct NominatimAddress {
    #[serde(default)]
    pub country: Option<String>,
}

/// Nominatim sends coordinates as decimal strings; other providers send
/// numbers. Both are accepted and validated on use.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Number(f64),
    Text(String),
}

impl RawCoordinate {
    /// Parses the value as degrees, rejecting non-finite or out-of-range input.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::MalformedCoordinate`] when the value is not a
    /// number within `±bound`.
    pub fn degrees(&self, field: &'static str, bound: f64) -> Result<f64, LookupError> {
        let parsed = match self {
            RawCoordinate::Number(n) => Some(*n),
            RawCoordinate::Text(s) => s.trim().parse::<f64>().ok(),
        };
        match parsed {
            Some(v) if v.is_finite() && v.abs() <= bound => Ok(v),
            _ => Err(LookupError::MalformedCoordinate {
                field,
                value: match self {
                    RawCoordinate::Number(n) => n.to_string(),
                    RawCoordinate::Text(s) => s.clone(),
                },
            }),
        }
    }
}

/// Envelope of a MediaWiki `action=query&list=geosearch` response.
#[derive(Debug, Deserialize)]
pub struct GeoSearchResponse {
    #[serde(default)]
    pub query: Option<GeoSearchQuery>,
}

#[derive(Debug, Deserialize)]
pub struct GeoSearchQuery {
    #[serde(default)]
    pub geosearch: Vec<GeoSearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct GeoSearchItem {
    pub pageid: i64,
    pub title: String,
    /// Meters from the search centre.
    pub dist: f64,
}
