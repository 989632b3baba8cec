//! Hand-curated attraction catalog.
//!
//! The catalog is a read-only table keyed by canonical destination key (see
//! [`crate::canonical_key`]). It is loaded once at startup, either from the
//! YAML embedded in the binary or from an operator-supplied file, and then
//! shared without locking.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::destinations::canonical_key;
use crate::types::{slugify, Attraction, Provenance};
use crate::CatalogError;

const BUILTIN_CATALOG: &str = include_str!("../../../config/catalog.yaml");

/// Read access to curated entries, keyed by canonical destination key.
pub trait AttractionCatalog {
    /// Exact-match lookup. An unknown key is `None`, never an error.
    fn lookup(&self, key: &str) -> Option<&CuratedEntry>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedAttraction {
    pub title: String,
    pub price_local: f64,
    pub duration: String,
    pub category: String,
    pub description: String,
    pub booking_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedEntry {
    /// ISO 4217 code of `price_local` values.
    pub currency: String,
    /// US dollars per one unit of `currency`.
    pub usd_rate: f64,
    pub attractions: Vec<CuratedAttraction>,
}

impl CuratedEntry {
    /// Curated attractions in catalog order, with USD prices attached.
    #[must_use]
    pub fn priced_attractions(&self) -> Vec<Attraction> {
        self.attractions
            .iter()
            .map(|a| Attraction {
                title: a.title.clone(),
                page_id: format!("curated-{}", slugify(&a.title)),
                price_local: Some(a.price_local),
                currency: Some(self.currency.clone()),
                price_usd: Some(usd_price(a.price_local, self.usd_rate)),
                duration: Some(a.duration.clone()),
                category: Some(a.category.clone()),
                description: Some(a.description.clone()),
                page_url: Some(a.booking_url.clone()),
                distance: None,
                source: Provenance::Curated,
            })
            .collect()
    }
}

/// `price_local * usd_rate`, rounded to the nearest whole dollar.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn usd_price(price_local: f64, usd_rate: f64) -> i64 {
    (price_local * usd_rate).round() as i64
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    destinations: BTreeMap<String, CuratedEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct CuratedCatalog {
    entries: BTreeMap<String, CuratedEntry>,
}

impl CuratedCatalog {
    /// The catalog shipped in `config/catalog.yaml`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the embedded YAML fails to parse or validate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Load and validate a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, or a parse or
    /// validation error for malformed content.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Loads from `path` when given, otherwise falls back to [`Self::builtin`].
    ///
    /// # Errors
    ///
    /// See [`Self::load`] and [`Self::builtin`].
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Parse and validate catalog YAML.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] or [`CatalogError::Validation`].
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::from_entries(file.destinations)
    }

    /// Build a catalog from in-memory entries, applying the same validation
    /// as file loading.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on the first invalid entry.
    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (String, CuratedEntry)>,
    {
        let mut map = BTreeMap::new();
        for (key, entry) in entries {
            validate_entry(&key, &entry)?;
            if map.insert(key.clone(), entry).is_some() {
                return Err(CatalogError::Validation(format!(
                    "duplicate destination key '{key}'"
                )));
            }
        }
        Ok(Self { entries: map })
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CuratedEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AttractionCatalog for CuratedCatalog {
    fn lookup(&self, key: &str) -> Option<&CuratedEntry> {
        self.entries.get(key)
    }
}

fn validate_entry(key: &str, entry: &CuratedEntry) -> Result<(), CatalogError> {
    if key.is_empty() || canonical_key(key) != key {
        return Err(CatalogError::Validation(format!(
            "destination key '{key}' is not canonical (expected '{}')",
            canonical_key(key)
        )));
    }

    if entry.currency.trim().is_empty() {
        return Err(CatalogError::Validation(format!(
            "destination '{key}' has an empty currency code"
        )));
    }

    if !entry.usd_rate.is_finite() || entry.usd_rate <= 0.0 {
        return Err(CatalogError::Validation(format!(
            "destination '{key}' has invalid usd_rate {}; must be positive",
            entry.usd_rate
        )));
    }

    if entry.attractions.is_empty() {
        return Err(CatalogError::Validation(format!(
            "destination '{key}' has no attractions"
        )));
    }

    let mut seen_titles = HashSet::new();
    for attraction in &entry.attractions {
        if attraction.title.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "destination '{key}' has an attraction with an empty title"
            )));
        }
        if !attraction.price_local.is_finite() || attraction.price_local < 0.0 {
            return Err(CatalogError::Validation(format!(
                "attraction '{}' in '{key}' has invalid price {}",
                attraction.title, attraction.price_local
            )));
        }
        if !seen_titles.insert(attraction.title.as_str()) {
            return Err(CatalogError::Validation(format!(
                "duplicate attraction title '{}' in '{key}'",
                attraction.title
            )));
        }
    }

    Ok(())
}
