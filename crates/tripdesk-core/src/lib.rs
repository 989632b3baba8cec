pub mod app_config;
pub mod catalog;
pub mod config;
pub mod destinations;
pub mod error;
pub mod fallback;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use catalog::{AttractionCatalog, CuratedAttraction, CuratedCatalog, CuratedEntry};
pub use config::{load_app_config, load_app_config_from_env};
pub use destinations::{canonical_key, clean_labels, split_destinations, DestinationInput};
pub use error::{CatalogError, ConfigError};
pub use fallback::synthesize_fallback;
pub use types::{
    Attraction, Coordinates, DestinationSuggestion, Provenance, ResolvedPlace, SuggestionResult,
};
