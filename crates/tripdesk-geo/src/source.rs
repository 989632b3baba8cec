use std::future::Future;

use tripdesk_core::{Attraction, Coordinates, ResolvedPlace};

use crate::LookupError;

/// Resolves a free-form destination label to a single best-match place.
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the service has no match for `label`.
    fn resolve(
        &self,
        label: &str,
    ) -> impl Future<Output = Result<Option<ResolvedPlace>, LookupError>> + Send;
}

/// Lists points of interest around a coordinate.
pub trait NearbyPlaces: Send + Sync {
    /// Up to `limit` unpriced [`tripdesk_core::Provenance::Live`] attractions
    /// in the service's own order. An empty list is a valid answer.
    fn nearby(
        &self,
        coordinates: Coordinates,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Attraction>, LookupError>> + Send;
}
