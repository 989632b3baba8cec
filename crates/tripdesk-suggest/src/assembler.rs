//! Suggestion assembly across all requested destinations.
//!
//! Every destination runs through the same sequence:
//!
//! 1. Geocode the label. A miss becomes a `not_found` record and a transport
//!    failure an `error` record; neither aborts sibling destinations.
//! 2. Derive the catalog key from the label (never from the resolved name).
//! 3. Curated hit: priced curated attractions, then a small live batch with
//!    curated titles filtered out, or generated entries if nothing survives.
//! 4. Curated miss: a larger live batch, or generated entries if it is empty.
//!
//! All destinations are dispatched at once; results come back in input order.

use std::collections::HashSet;

use futures::future::join_all;
use tripdesk_core::{
    canonical_key, synthesize_fallback, AppConfig, Attraction, AttractionCatalog, CuratedCatalog,
    DestinationInput, DestinationSuggestion, ResolvedPlace, SuggestionResult,
};
use tripdesk_geo::{Geocoder, LookupError, NearbyPlaces, NominatimClient, WikipediaClient};

use crate::SuggestError;

pub const NOT_FOUND_MESSAGE: &str =
    "We could not find this destination. Please double-check the spelling or try a nearby city.";
pub const LOOKUP_ERROR_MESSAGE: &str =
    "Live destination data is temporarily unavailable. Please try again shortly.";
pub const NO_ATTRACTIONS_NOTE: &str = "No notable attractions found within 15 km";

const DEFAULT_CURRENCY: &str = "USD";

/// Tuning knobs for [`SuggestionBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestOptions {
    /// Live items requested to supplement a curated destination.
    pub supplemental_limit: usize,
    /// Live items requested when no curated entry exists.
    pub live_limit: usize,
    /// When false, empty results stay empty and carry a note instead.
    pub fallback_enabled: bool,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            supplemental_limit: 3,
            live_limit: 8,
            fallback_enabled: true,
        }
    }
}

/// Builds per-destination suggestions from a geocoder, a nearby-places
/// source, and a curated catalog.
pub struct SuggestionBuilder<G, P, C> {
    geocoder: G,
    places: P,
    catalog: C,
    options: SuggestOptions,
}

impl SuggestionBuilder<NominatimClient, WikipediaClient, CuratedCatalog> {
    /// Wires the production clients and catalog from application config.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::Lookup`] if an HTTP client cannot be built or
    /// a service URL is invalid, and [`SuggestError::Catalog`] if the curated
    /// catalog fails to load.
    pub fn from_config(config: &AppConfig) -> Result<Self, SuggestError> {
        let geocoder = NominatimClient::with_base_url(
            config.http_timeout_secs,
            &config.user_agent,
            &config.geocoder_url,
        )?;
        let places = WikipediaClient::with_base_url(
            config.http_timeout_secs,
            &config.user_agent,
            config.poi_radius_meters,
            &config.places_url,
        )?;
        let catalog = CuratedCatalog::load_or_builtin(config.catalog_path.as_deref())?;
        tracing::info!(destinations = catalog.len(), "curated catalog loaded");

        Ok(Self::new(geocoder, places, catalog).with_options(SuggestOptions {
            fallback_enabled: config.fallback_enabled,
            ..SuggestOptions::default()
        }))
    }
}

impl<G, P, C> SuggestionBuilder<G, P, C>
where
    G: Geocoder,
    P: NearbyPlaces,
    C: AttractionCatalog + Send + Sync,
{
    pub fn new(geocoder: G, places: P, catalog: C) -> Self {
        Self {
            geocoder,
            places,
            catalog,
            options: SuggestOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SuggestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// One result per normalized destination, in input order.
    ///
    /// Never fails: lookup problems are reported per destination as
    /// `not_found` or `error` records.
    pub async fn build_suggestions(
        &self,
        destinations: &DestinationInput,
        days: Option<i64>,
        budget: Option<f64>,
    ) -> Vec<SuggestionResult> {
        let labels = destinations.labels();
        if labels.is_empty() {
            return Vec::new();
        }

        let per_day = per_day_budget(budget, days);

        let mut pending = Vec::with_capacity(labels.len());
        for label in &labels {
            pending.push(self.suggest_destination(label, per_day));
        }
        // join_all polls every lookup concurrently and yields in input order.
        let results = join_all(pending).await;

        tracing::info!(
            destinations = results.len(),
            ok = results.iter().filter(|r| r.as_ok().is_some()).count(),
            "suggestions built"
        );
        results
    }

    async fn suggest_destination(&self, label: &str, per_day: Option<i64>) -> SuggestionResult {
        match self.resolve_destination(label, per_day).await {
            Ok(Some(suggestion)) => SuggestionResult::Ok(Box::new(suggestion)),
            Ok(None) => {
                tracing::info!(destination = %label, "destination not found");
                SuggestionResult::NotFound {
                    destination_label: label.to_string(),
                    message: NOT_FOUND_MESSAGE.to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(destination = %label, error = %e, "destination lookup failed");
                SuggestionResult::Error {
                    destination_label: label.to_string(),
                    message: LOOKUP_ERROR_MESSAGE.to_string(),
                }
            }
        }
    }

    async fn resolve_destination(
        &self,
        label: &str,
        per_day: Option<i64>,
    ) -> Result<Option<DestinationSuggestion>, LookupError> {
        let Some(place) = self.geocoder.resolve(label).await? else {
            return Ok(None);
        };

        let key = canonical_key(label);
        let curated = self.catalog.lookup(&key);

        let attractions = match curated {
            Some(entry) => {
                let curated_items = entry.priced_attractions();
                let live = self
                    .places
                    .nearby(place.coordinates, self.options.supplemental_limit)
                    .await?;
                tracing::debug!(
                    destination = %label,
                    key = %key,
                    curated = curated_items.len(),
                    live = live.len(),
                    "curated catalog hit"
                );
                self.merge(label, &place, curated_items, live)
            }
            None => {
                let live = self
                    .places
                    .nearby(place.coordinates, self.options.live_limit)
                    .await?;
                tracing::debug!(
                    destination = %label,
                    key = %key,
                    live = live.len(),
                    "no curated entry"
                );
                self.merge(label, &place, Vec::new(), live)
            }
        };

        let notes = attractions
            .is_empty()
            .then(|| NO_ATTRACTIONS_NOTE.to_string());

        Ok(Some(DestinationSuggestion {
            destination_label: label.to_string(),
            exact_name: place.display_name,
            country: place.country,
            coordinates: place.coordinates,
            map_url: place.map_url,
            per_day_budget: per_day,
            currency: curated.map_or_else(|| DEFAULT_CURRENCY.to_string(), |e| e.currency.clone()),
            uses_curated_catalog: curated.is_some(),
            attractions,
            notes,
        }))
    }

    /// `curated ++ (live minus titles already present)`, or `curated ++
    /// generated` when no live item survives.
    ///
    /// Titles stay unique across the whole list, generated ones included: a
    /// generated entry whose title matches a curated one is skipped, so the
    /// generated tail can hold fewer than three items.
    fn merge(
        &self,
        label: &str,
        place: &ResolvedPlace,
        curated: Vec<Attraction>,
        live: Vec<Attraction>,
    ) -> Vec<Attraction> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut merged: Vec<Attraction> = Vec::with_capacity(curated.len() + live.len());

        for item in curated {
            if seen.insert(item.title.clone()) {
                merged.push(item);
            }
        }

        let before_tail = merged.len();
        for item in live {
            if seen.insert(item.title.clone()) {
                merged.push(item);
            }
        }

        if merged.len() == before_tail && self.options.fallback_enabled {
            for item in synthesize_fallback(label, &place.country) {
                if seen.insert(item.title.clone()) {
                    merged.push(item);
                }
            }
        }

        merged
    }
}

/// `round(budget / days)` when both are known and `days > 0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn per_day_budget(budget: Option<f64>, days: Option<i64>) -> Option<i64> {
    match (budget, days) {
        (Some(budget), Some(days)) if days > 0 && budget.is_finite() => {
            Some((budget / days as f64).round() as i64)
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "assembler_test.rs"]
mod tests;
