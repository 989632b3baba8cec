//! Geocoding via the OpenStreetMap Nominatim search API.

use reqwest::{Client, Url};
use tripdesk_core::{Coordinates, ResolvedPlace};

use crate::error::LookupError;
use crate::http::{build_http_client, parse_base_url, request_json, with_query};
use crate::source::Geocoder;
use crate::types::NominatimPlace;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Client for the Nominatim `/search` endpoint.
///
/// Use [`NominatimClient::new`] for production or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, LookupError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client for a custom search endpoint (self-hosted or wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the client cannot be built, or
    /// [`LookupError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn search_url(&self, query: &str) -> Url {
        with_query(
            &self.base_url,
            &[
                ("q", query),
                ("format", "jsonv2"),
                ("limit", "1"),
                ("addressdetails", "1"),
                ("accept-language", "en"),
            ],
        )
    }

    /// Searches for `query` and returns the single best match, if any.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`LookupError::Deserialize`] if the body is not the expected array.
    /// - [`LookupError::MalformedCoordinate`] if the match has unusable coordinates.
    pub async fn search(&self, query: &str) -> Result<Option<ResolvedPlace>, LookupError> {
        let url = self.search_url(query);
        let body = request_json(&self.client, &url).await?;

        let places: Vec<NominatimPlace> =
            serde_json::from_value(body).map_err(|e| LookupError::Deserialize {
                context: format!("nominatim search(q={query})"),
                source: e,
            })?;

        let Some(place) = places.into_iter().next() else {
            tracing::debug!(query, "nominatim returned no matches");
            return Ok(None);
        };

        to_resolved_place(place).map(Some)
    }
}

impl Geocoder for NominatimClient {
    async fn resolve(&self, label: &str) -> Result<Option<ResolvedPlace>, LookupError> {
        self.search(label).await
    }
}

fn to_resolved_place(place: NominatimPlace) -> Result<ResolvedPlace, LookupError> {
    let lat = place.lat.degrees("lat", 90.0)?;
    let lon = place.lon.degrees("lon", 180.0)?;

    let country = place
        .address
        .and_then(|a| a.country)
        .filter(|c| !c.trim().is_empty())
        .or_else(|| {
            place
                .display_name
                .rsplit(',')
                .next()
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_default();

    let display_name = place
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(place.display_name);

    Ok(ResolvedPlace::new(
        display_name,
        country,
        Coordinates { lat, lon },
    ))
}
