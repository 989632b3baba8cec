//! Clients for the external geodata services behind the suggestion pipeline:
//! place geocoding ([`NominatimClient`]) and nearby points of interest
//! ([`WikipediaClient`]).
//!
//! The pipeline depends on the [`Geocoder`] and [`NearbyPlaces`] traits, not
//! on these clients, so tests and alternative providers can slot in.

pub mod error;
mod http;
pub mod nominatim;
pub mod source;
pub mod types;
pub mod wikipedia;

pub use error::LookupError;
pub use nominatim::NominatimClient;
pub use source::{Geocoder, NearbyPlaces};
pub use wikipedia::WikipediaClient;
