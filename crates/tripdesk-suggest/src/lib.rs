//! Per-destination suggestion pipeline: geocode, match the curated catalog,
//! top up with live nearby places, and fall back to generated entries.

pub mod assembler;
pub mod error;

pub use assembler::{
    per_day_budget, SuggestOptions, SuggestionBuilder, LOOKUP_ERROR_MESSAGE, NOT_FOUND_MESSAGE,
    NO_ATTRACTIONS_NOTE,
};
pub use error::SuggestError;
