//! Destination input cleanup and catalog-key derivation.

use serde::Deserialize;

/// Trailing words dropped when deriving a catalog key ("Singapore City").
const SUFFIX_WORDS: [&str; 4] = ["city", "town", "country", "state"];

/// Raw destinations as submitted: a list, a comma-delimited string, or
/// anything else (which yields no destinations).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DestinationInput {
    Text(String),
    List(Vec<serde_json::Value>),
    Other(serde_json::Value),
}

impl Default for DestinationInput {
    fn default() -> Self {
        DestinationInput::Other(serde_json::Value::Null)
    }
}

impl DestinationInput {
    /// Trimmed, non-empty labels in input order. Duplicates are kept.
    ///
    /// List elements that are not strings are skipped; list elements are
    /// never split on commas.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        match self {
            DestinationInput::Text(raw) => split_destinations(raw),
            DestinationInput::List(items) => {
                clean_labels(items.iter().filter_map(serde_json::Value::as_str))
            }
            DestinationInput::Other(_) => Vec::new(),
        }
    }
}

impl From<&serde_json::Value> for DestinationInput {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(raw) => DestinationInput::Text(raw.clone()),
            serde_json::Value::Array(items) => DestinationInput::List(items.clone()),
            other => DestinationInput::Other(other.clone()),
        }
    }
}

/// Splits a comma-delimited string into cleaned labels.
#[must_use]
pub fn split_destinations(raw: &str) -> Vec<String> {
    clean_labels(raw.split(','))
}

/// Trims each label and drops blanks, preserving order.
pub fn clean_labels<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Derives the curated-catalog lookup key for a destination label.
///
/// Lower-cases, turns every non-alphanumeric character into a word break,
/// drops trailing suffix words (`city`, `town`, `country`, `state`) and
/// rejoins the words with single spaces. A lone suffix word is kept so a
/// label never collapses to an empty key.
#[must_use]
pub fn canonical_key(text: &str) -> String {
    let spaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut words: Vec<&str> = spaced.split_whitespace().collect();
    while words.len() > 1 && words.last().is_some_and(|w| SUFFIX_WORDS.contains(w)) {
        words.pop();
    }
    words.join(" ")
}

#[cfg(test)]
#[path = "destinations_test.rs"]
mod tests;
