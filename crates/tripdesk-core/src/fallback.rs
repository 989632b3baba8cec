//! Generic placeholder attractions for destinations with no curated or live data.

use crate::types::{slugify, Attraction, Provenance};

struct Template {
    suffix: &'static str,
    price_usd: i64,
    duration: &'static str,
    category: &'static str,
    blurb: &'static str,
}

const TEMPLATES: [Template; 3] = [
    Template {
        suffix: "City Highlights Tour",
        price_usd: 120,
        duration: "Half day (4 hours)",
        category: "Sightseeing",
        blurb: "A guided loop through the best-known landmarks and viewpoints of",
    },
    Template {
        suffix: "Street Food Crawl",
        price_usd: 55,
        duration: "3 hours",
        category: "Food & Drink",
        blurb: "Tasting stops at local markets and street stalls around",
    },
    Template {
        suffix: "Cultural Evening",
        price_usd: 80,
        duration: "Evening (3 hours)",
        category: "Culture",
        blurb: "Live music, dance or theatre rooted in the traditions of",
    },
];

/// Three generated attractions for `label`, always in the same order with
/// fixed USD prices. Makes no external calls and cannot fail.
#[must_use]
pub fn synthesize_fallback(label: &str, country: &str) -> Vec<Attraction> {
    let place = if country.trim().is_empty() {
        label.to_string()
    } else {
        format!("{label}, {country}")
    };

    TEMPLATES
        .iter()
        .map(|t| {
            let title = format!("{label} {}", t.suffix);
            Attraction {
                page_id: format!("generated-{}", slugify(&title)),
                description: Some(format!("{} {place}.", t.blurb)),
                title,
                price_local: None,
                currency: Some("USD".to_string()),
                price_usd: Some(t.price_usd),
                duration: Some(t.duration.to_string()),
                category: Some(t.category.to_string()),
                page_url: None,
                distance: None,
                source: Provenance::Generated,
            }
        })
        .collect()
}
