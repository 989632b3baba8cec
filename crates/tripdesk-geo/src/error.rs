use thiserror::Error;

/// Transient failure talking to an external geodata service.
///
/// "Nothing found" is not an error: geocoding misses are `Ok(None)` and empty
/// nearby searches are `Ok(vec![])`.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network, TLS, timeout, or non-2xx status from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered 2xx but reported an error in its body.
    #[error("{service} API error: {message}")]
    Api {
        service: &'static str,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A latitude or longitude that is not a finite in-range number.
    #[error("malformed {field} coordinate: {value:?}")]
    MalformedCoordinate { field: &'static str, value: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
