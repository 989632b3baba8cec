use thiserror::Error;

/// Failures while wiring a live [`crate::SuggestionBuilder`] at startup.
///
/// Building suggestions never fails; these only occur during construction.
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("geodata client setup failed: {0}")]
    Lookup(#[from] tripdesk_geo::LookupError),

    #[error("curated catalog unavailable: {0}")]
    Catalog(#[from] tripdesk_core::CatalogError),
}
