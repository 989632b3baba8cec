//! Nearby points of interest via the MediaWiki geosearch API.

use reqwest::{Client, Url};
use tripdesk_core::{Attraction, Coordinates, Provenance};

use crate::error::LookupError;
use crate::http::{build_http_client, parse_base_url, request_json, with_query};
use crate::source::NearbyPlaces;
use crate::types::{GeoSearchItem, GeoSearchResponse};

const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/w/api.php";
const ARTICLE_URL_PREFIX: &str = "https://en.wikipedia.org/?curid=";

/// Geosearch rejects radii above 10 km and limits above 500.
const MAX_RADIUS_METERS: u32 = 10_000;
const MAX_LIMIT: usize = 500;

/// Client for `action=query&list=geosearch` on a MediaWiki `api.php`.
pub struct WikipediaClient {
    client: Client,
    base_url: Url,
    radius_meters: u32,
}

impl WikipediaClient {
    /// Creates a client pointed at English Wikipedia.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        radius_meters: u32,
    ) -> Result<Self, LookupError> {
        Self::with_base_url(timeout_secs, user_agent, radius_meters, DEFAULT_BASE_URL)
    }

    /// Creates a client for a custom `api.php` endpoint (for wiremock tests).
    ///
    /// `radius_meters` is clamped to the geosearch maximum of 10 km.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the client cannot be built, or
    /// [`LookupError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        radius_meters: u32,
        base_url: &str,
    ) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_http_client(timeout_secs, user_agent)?,
            base_url: parse_base_url(base_url)?,
            radius_meters: radius_meters.clamp(10, MAX_RADIUS_METERS),
        })
    }

    fn geosearch_url(&self, coordinates: Coordinates, limit: usize) -> Url {
        let coord = format!("{}|{}", coordinates.lat, coordinates.lon);
        let radius = self.radius_meters.to_string();
        let limit = limit.min(MAX_LIMIT).to_string();
        with_query(
            &self.base_url,
            &[
                ("action", "query"),
                ("list", "geosearch"),
                ("gscoord", &coord),
                ("gsradius", &radius),
                ("gslimit", &limit),
                ("format", "json"),
            ],
        )
    }

    /// Fetches up to `limit` titled pages around `coordinates`, nearest first
    /// as ordered by the service.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Api`] if the body carries a MediaWiki `error` object.
    /// - [`LookupError::Http`] on network failure, timeout, or non-2xx status.
    /// - [`LookupError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn geosearch(
        &self,
        coordinates: Coordinates,
        limit: usize,
    ) -> Result<Vec<Attraction>, LookupError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let url = self.geosearch_url(coordinates, limit);
        let body = request_json(&self.client, &url).await?;
        check_api_error(&body)?;

        let response: GeoSearchResponse =
            serde_json::from_value(body).map_err(|e| LookupError::Deserialize {
                context: format!("geosearch({}|{})", coordinates.lat, coordinates.lon),
                source: e,
            })?;

        let items = response.query.map(|q| q.geosearch).unwrap_or_default();
        Ok(items
            .into_iter()
            .filter(|item| !item.title.trim().is_empty())
            .take(limit)
            .map(to_attraction)
            .collect())
    }
}

impl NearbyPlaces for WikipediaClient {
    async fn nearby(
        &self,
        coordinates: Coordinates,
        limit: usize,
    ) -> Result<Vec<Attraction>, LookupError> {
        self.geosearch(coordinates, limit).await
    }
}

fn to_attraction(item: GeoSearchItem) -> Attraction {
    Attraction {
        title: item.title,
        page_id: item.pageid.to_string(),
        price_local: None,
        currency: None,
        price_usd: None,
        duration: None,
        category: None,
        description: None,
        page_url: Some(format!("{ARTICLE_URL_PREFIX}{}", item.pageid)),
        distance: Some(item.dist),
        source: Provenance::Live,
    }
}

/// MediaWiki reports failures as `{"error": {"code": ..., "info": ...}}` with
/// a 200 status.
fn check_api_error(body: &serde_json::Value) -> Result<(), LookupError> {
    if let Some(error) = body.get("error") {
        let message = error
            .get("info")
            .or_else(|| error.get("code"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(LookupError::Api {
            service: "geosearch",
            message,
        });
    }
    Ok(())
}
