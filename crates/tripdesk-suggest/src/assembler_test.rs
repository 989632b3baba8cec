use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tripdesk_core::{
    Coordinates, CuratedAttraction, CuratedCatalog, CuratedEntry, DestinationInput, Provenance,
    ResolvedPlace,
};
use tripdesk_geo::{Geocoder, LookupError, NearbyPlaces};

use super::*;

// ---------------------------------------------------------------------------
// Doubles
// ---------------------------------------------------------------------------

enum Answer {
    Found(&'static str, &'static str, f64, f64),
    Missing,
    Fails,
}

#[derive(Default)]
struct StubGeocoder {
    answers: HashMap<&'static str, Answer>,
    delays: HashMap<&'static str, u64>,
}

impl StubGeocoder {
    fn found(mut self, label: &'static str, name: &'static str, country: &'static str) -> Self {
        self.answers
            .insert(label, Answer::Found(name, country, 1.29, 103.85));
        self
    }

    fn found_at(mut self, label: &'static str, country: &'static str, lat: f64) -> Self {
        self.answers
            .insert(label, Answer::Found(label, country, lat, 10.0));
        self
    }

    fn missing(mut self, label: &'static str) -> Self {
        self.answers.insert(label, Answer::Missing);
        self
    }

    fn failing(mut self, label: &'static str) -> Self {
        self.answers.insert(label, Answer::Fails);
        self
    }

    fn delayed(mut self, label: &'static str, millis: u64) -> Self {
        self.delays.insert(label, millis);
        self
    }
}

impl Geocoder for StubGeocoder {
    async fn resolve(&self, label: &str) -> Result<Option<ResolvedPlace>, LookupError> {
        if let Some(millis) = self.delays.get(label) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        match self.answers.get(label) {
            Some(Answer::Found(name, country, lat, lon)) => Ok(Some(ResolvedPlace::new(
                (*name).to_string(),
                (*country).to_string(),
                Coordinates {
                    lat: *lat,
                    lon: *lon,
                },
            ))),
            Some(Answer::Fails) => Err(LookupError::Api {
                service: "stub",
                message: "connection reset".to_string(),
            }),
            Some(Answer::Missing) | None => Ok(None),
        }
    }
}

#[derive(Default)]
struct StubPlaces {
    titles: Vec<&'static str>,
    fail: bool,
    /// Fail only for coordinates north of this latitude.
    fail_north_of: Option<f64>,
    requested_limits: Mutex<Vec<usize>>,
}

impl StubPlaces {
    fn with_titles(titles: &[&'static str]) -> Self {
        Self {
            titles: titles.to_vec(),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn failing_north_of(lat: f64) -> Self {
        Self {
            fail_north_of: Some(lat),
            ..Self::default()
        }
    }

    fn limits(&self) -> Vec<usize> {
        self.requested_limits.lock().unwrap().clone()
    }
}

impl NearbyPlaces for StubPlaces {
    async fn nearby(
        &self,
        coordinates: Coordinates,
        limit: usize,
    ) -> Result<Vec<Attraction>, LookupError> {
        self.requested_limits.lock().unwrap().push(limit);
        let out_of_range = self.fail_north_of.is_some_and(|lat| coordinates.lat > lat);
        if self.fail || out_of_range {
            return Err(LookupError::Api {
                service: "stub",
                message: "rate limited".to_string(),
            });
        }
        Ok(self
            .titles
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, title)| Attraction {
                title: (*title).to_string(),
                page_id: (i + 1).to_string(),
                price_local: None,
                currency: None,
                price_usd: None,
                duration: None,
                category: None,
                description: None,
                page_url: Some(format!("https://en.wikipedia.org/?curid={}", i + 1)),
                distance: Some(100.0 * (i as f64 + 1.0)),
                source: Provenance::Live,
            })
            .collect())
    }
}

fn tiny_catalog() -> CuratedCatalog {
    CuratedCatalog::from_entries([(
        "lisbon".to_string(),
        CuratedEntry {
            currency: "EUR".to_string(),
            usd_rate: 1.1,
            attractions: vec![
                CuratedAttraction {
                    title: "Belem Tower".to_string(),
                    price_local: 10.0,
                    duration: "1 hour".to_string(),
                    category: "Landmark".to_string(),
                    description: "Riverside fortress.".to_string(),
                    booking_url: "https://example.com/belem".to_string(),
                },
                CuratedAttraction {
                    title: "Tram 28 Ride".to_string(),
                    price_local: 3.0,
                    duration: "1 hour".to_string(),
                    category: "Transport".to_string(),
                    description: "Historic tram line.".to_string(),
                    booking_url: "https://example.com/tram".to_string(),
                },
            ],
        },
    )])
    .expect("test catalog should validate")
}

fn list(labels: &[&str]) -> DestinationInput {
    DestinationInput::List(labels.iter().map(|l| serde_json::json!(l)).collect())
}

fn titles(suggestion: &DestinationSuggestion) -> Vec<&str> {
    suggestion
        .attractions
        .iter()
        .map(|a| a.title.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// build_suggestions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn singapore_and_unknown_place_end_to_end() {
    let geocoder = StubGeocoder::default()
        .found("Singapore", "Singapore", "Singapore")
        .missing("Nowhereland123");
    let builder = SuggestionBuilder::new(
        geocoder,
        StubPlaces::with_titles(&["Merlion Park"]),
        CuratedCatalog::builtin().unwrap(),
    );

    let results = builder
        .build_suggestions(&list(&["Singapore", "Nowhereland123"]), Some(5), Some(2000.0))
        .await;

    assert_eq!(results.len(), 2);

    let sg = results[0].as_ok().expect("first destination should be ok");
    assert_eq!(sg.destination_label, "Singapore");
    assert!(sg.uses_curated_catalog);
    assert_eq!(sg.currency, "SGD");
    assert_eq!(sg.per_day_budget, Some(400));
    assert!(sg.attractions.len() >= 5);
    let gardens = sg
        .attractions
        .iter()
        .find(|a| a.title == "Gardens by the Bay (Flower Dome + Cloud Forest)")
        .expect("curated Gardens entry");
    assert_eq!(gardens.price_usd, Some(21));
    assert_eq!(sg.attractions.last().map(|a| a.title.as_str()), Some("Merlion Park"));
    assert!(sg.notes.is_none());

    assert_eq!(results[1].status(), "not_found");
    assert_eq!(results[1].destination_label(), "Nowhereland123");

    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json[0]["status"], "ok");
    assert_eq!(json[0]["perDayBudget"], 400);
    assert_eq!(json[1]["status"], "not_found");
    assert_eq!(json[1]["destinationLabel"], "Nowhereland123");
    assert_eq!(json[1]["message"], NOT_FOUND_MESSAGE);
    assert!(json[1].get("coordinates").is_none());
}

#[tokio::test]
async fn results_follow_input_order_despite_completion_order() {
    let geocoder = StubGeocoder::default()
        .found("Alpha", "Alpha", "A")
        .found("Bravo", "Bravo", "B")
        .found("Charlie", "Charlie", "C")
        .delayed("Alpha", 60)
        .delayed("Bravo", 30);
    let builder = SuggestionBuilder::new(
        geocoder,
        StubPlaces::with_titles(&["Somewhere"]),
        CuratedCatalog::default(),
    );

    let results = builder
        .build_suggestions(&list(&["Alpha", "Bravo", "Charlie"]), None, None)
        .await;

    let labels: Vec<&str> = results.iter().map(SuggestionResult::destination_label).collect();
    assert_eq!(labels, vec!["Alpha", "Bravo", "Charlie"]);
}

#[tokio::test]
async fn destinations_are_looked_up_concurrently() {
    let geocoder = StubGeocoder::default()
        .found("Alpha", "Alpha", "A")
        .found("Bravo", "Bravo", "B")
        .found("Charlie", "Charlie", "C")
        .delayed("Alpha", 300)
        .delayed("Bravo", 300)
        .delayed("Charlie", 300);
    let builder =
        SuggestionBuilder::new(geocoder, StubPlaces::default(), CuratedCatalog::default());

    let started = std::time::Instant::now();
    let results = builder
        .build_suggestions(&list(&["Alpha", "Bravo", "Charlie"]), None, None)
        .await;
    let elapsed = started.elapsed();

    assert_eq!(results.len(), 3);
    assert!(
        elapsed < Duration::from_millis(600),
        "three 300ms lookups should overlap, took {elapsed:?}"
    );
}

#[tokio::test]
async fn comma_delimited_text_is_split_and_trimmed() {
    let geocoder = StubGeocoder::default()
        .found("Lisbon", "Lisbon", "Portugal")
        .found("Porto", "Porto", "Portugal");
    let builder = SuggestionBuilder::new(geocoder, StubPlaces::default(), tiny_catalog());

    let input = DestinationInput::Text(" Lisbon ,, Porto ".to_string());
    let results = builder.build_suggestions(&input, None, None).await;

    let labels: Vec<&str> = results.iter().map(SuggestionResult::destination_label).collect();
    assert_eq!(labels, vec!["Lisbon", "Porto"]);
}

#[tokio::test]
async fn empty_or_unusable_input_yields_nothing() {
    let builder = SuggestionBuilder::new(
        StubGeocoder::default(),
        StubPlaces::default(),
        tiny_catalog(),
    );

    for input in [
        DestinationInput::Text("  , ,".to_string()),
        DestinationInput::List(vec![]),
        DestinationInput::Other(serde_json::json!(42)),
        DestinationInput::default(),
    ] {
        assert!(builder.build_suggestions(&input, Some(3), Some(300.0)).await.is_empty());
    }
}

#[tokio::test]
async fn curated_destination_tops_up_with_unique_live_titles() {
    let places = StubPlaces::with_titles(&["Tram 28 Ride", "Alfama District", "Sao Jorge Castle"]);
    let builder = SuggestionBuilder::new(
        StubGeocoder::default().found("Lisbon", "Lisbon", "Portugal"),
        places,
        tiny_catalog(),
    );

    let results = builder.build_suggestions(&list(&["Lisbon"]), None, None).await;
    let lisbon = results[0].as_ok().unwrap();

    assert_eq!(
        titles(lisbon),
        vec!["Belem Tower", "Tram 28 Ride", "Alfama District", "Sao Jorge Castle"]
    );
    assert_eq!(lisbon.attractions[0].source, Provenance::Curated);
    assert_eq!(lisbon.attractions[0].price_usd, Some(11));
    assert_eq!(lisbon.attractions[2].source, Provenance::Live);
    assert_eq!(builder.places.limits(), vec![3]);
}

#[tokio::test]
async fn curated_destination_with_only_duplicate_live_titles_gets_generated_entries() {
    let builder = SuggestionBuilder::new(
        StubGeocoder::default().found("Lisbon", "Lisbon", "Portugal"),
        StubPlaces::with_titles(&["Belem Tower", "Tram 28 Ride"]),
        tiny_catalog(),
    );

    let results = builder.build_suggestions(&list(&["Lisbon"]), None, None).await;
    let lisbon = results[0].as_ok().unwrap();

    assert_eq!(
        titles(lisbon),
        vec![
            "Belem Tower",
            "Tram 28 Ride",
            "Lisbon City Highlights Tour",
            "Lisbon Street Food Crawl",
            "Lisbon Cultural Evening",
        ]
    );
    assert_eq!(lisbon.attractions[2].source, Provenance::Generated);
}

#[tokio::test]
async fn generated_entry_matching_a_curated_title_is_skipped() {
    let catalog = CuratedCatalog::from_entries([(
        "rome".to_string(),
        CuratedEntry {
            currency: "EUR".to_string(),
            usd_rate: 1.1,
            attractions: vec![CuratedAttraction {
                title: "Rome Street Food Crawl".to_string(),
                price_local: 60.0,
                duration: "3 hours".to_string(),
                category: "Food & Drink".to_string(),
                description: "Trastevere tasting walk.".to_string(),
                booking_url: "https://example.com/rome-food".to_string(),
            }],
        },
    )])
    .expect("test catalog should validate");
    let builder = SuggestionBuilder::new(
        StubGeocoder::default().found("Rome", "Rome", "Italy"),
        StubPlaces::default(),
        catalog,
    );

    let results = builder.build_suggestions(&list(&["Rome"]), None, None).await;
    let rome = results[0].as_ok().unwrap();

    assert_eq!(
        titles(rome),
        vec![
            "Rome Street Food Crawl",
            "Rome City Highlights Tour",
            "Rome Cultural Evening",
        ]
    );
    assert_eq!(rome.attractions[0].source, Provenance::Curated);
    assert_eq!(rome.attractions[0].price_usd, Some(66));
}

#[tokio::test]
async fn uncatalogued_destination_uses_larger_live_batch() {
    let builder = SuggestionBuilder::new(
        StubGeocoder::default().found("Reykjavik", "Reykjavik", "Iceland"),
        StubPlaces::with_titles(&["Hallgrimskirkja", "Harpa"]),
        tiny_catalog(),
    );

    let results = builder
        .build_suggestions(&list(&["Reykjavik"]), Some(0), Some(900.0))
        .await;
    let rvk = results[0].as_ok().unwrap();

    assert!(!rvk.uses_curated_catalog);
    assert_eq!(rvk.currency, "USD");
    assert_eq!(rvk.per_day_budget, None);
    assert_eq!(titles(rvk), vec!["Hallgrimskirkja", "Harpa"]);
    assert_eq!(builder.places.limits(), vec![8]);
}

#[tokio::test]
async fn uncatalogued_destination_without_live_data_gets_generated_entries() {
    let builder = SuggestionBuilder::new(
        StubGeocoder::default().found("Ushuaia", "Ushuaia", "Argentina"),
        StubPlaces::default(),
        tiny_catalog(),
    );

    let results = builder.build_suggestions(&list(&["Ushuaia"]), None, None).await;
    let ush = results[0].as_ok().unwrap();

    assert_eq!(ush.attractions.len(), 3);
    assert!(ush.attractions.iter().all(|a| a.source == Provenance::Generated));
    assert_eq!(ush.attractions[0].price_usd, Some(120));
    assert!(ush.notes.is_none());
}

#[tokio::test]
async fn disabled_fallback_leaves_note_on_empty_list() {
    let builder = SuggestionBuilder::new(
        StubGeocoder::default().found("Ushuaia", "Ushuaia", "Argentina"),
        StubPlaces::default(),
        tiny_catalog(),
    )
    .with_options(SuggestOptions {
        fallback_enabled: false,
        ..SuggestOptions::default()
    });

    let results = builder.build_suggestions(&list(&["Ushuaia"]), None, None).await;
    let ush = results[0].as_ok().unwrap();

    assert!(ush.attractions.is_empty());
    assert_eq!(ush.notes.as_deref(), Some(NO_ATTRACTIONS_NOTE));
}

#[tokio::test]
async fn geocoder_failure_is_isolated_to_its_destination() {
    let builder = SuggestionBuilder::new(
        StubGeocoder::default()
            .failing("Atlantis")
            .found("Lisbon", "Lisbon", "Portugal"),
        StubPlaces::default(),
        tiny_catalog(),
    );

    let results = builder
        .build_suggestions(&list(&["Atlantis", "Lisbon"]), None, None)
        .await;

    assert_eq!(results[0].status(), "error");
    assert_eq!(
        results[0],
        SuggestionResult::Error {
            destination_label: "Atlantis".to_string(),
            message: LOOKUP_ERROR_MESSAGE.to_string(),
        }
    );
    assert_eq!(results[1].status(), "ok");
}

#[tokio::test]
async fn nearby_failure_becomes_error_record() {
    let builder = SuggestionBuilder::new(
        StubGeocoder::default().found("Lisbon", "Lisbon", "Portugal"),
        StubPlaces::failing(),
        tiny_catalog(),
    );

    let results = builder.build_suggestions(&list(&["Lisbon"]), None, None).await;
    assert_eq!(results[0].status(), "error");
    let json = serde_json::to_value(&results[0]).unwrap();
    assert!(
        !json["message"].as_str().unwrap().contains("rate limited"),
        "internal details must not leak: {json}"
    );
}

#[tokio::test]
async fn nearby_failure_is_isolated_to_its_destination() {
    let builder = SuggestionBuilder::new(
        StubGeocoder::default()
            .found_at("Tromso", "Norway", 69.65)
            .found_at("Lisbon", "Portugal", 38.72),
        StubPlaces::failing_north_of(50.0),
        tiny_catalog(),
    );

    let results = builder
        .build_suggestions(&list(&["Tromso", "Lisbon"]), None, None)
        .await;

    let statuses: Vec<&str> = results.iter().map(SuggestionResult::status).collect();
    assert_eq!(statuses, vec!["error", "ok"]);
    assert_eq!(results[0].destination_label(), "Tromso");
    assert!(results[1].as_ok().unwrap().uses_curated_catalog);
}

#[tokio::test]
async fn catalog_key_comes_from_label_not_resolved_name() {
    // The geocoder answers "Lisboa" but the label still selects the curated entry.
    let builder = SuggestionBuilder::new(
        StubGeocoder::default()
            .found("Lisbon City", "Lisboa", "Portugal")
            .found("Lisboa", "Lisbon", "Portugal"),
        StubPlaces::default(),
        tiny_catalog(),
    );

    let results = builder
        .build_suggestions(&list(&["Lisbon City", "Lisboa"]), None, None)
        .await;

    let by_label = results[0].as_ok().unwrap();
    assert_eq!(by_label.exact_name, "Lisboa");
    assert!(by_label.uses_curated_catalog);
    assert_eq!(by_label.currency, "EUR");

    let by_name = results[1].as_ok().unwrap();
    assert!(!by_name.uses_curated_catalog);
}

#[tokio::test]
async fn duplicate_labels_each_get_a_result() {
    let builder = SuggestionBuilder::new(
        StubGeocoder::default().found("Lisbon", "Lisbon", "Portugal"),
        StubPlaces::default(),
        tiny_catalog(),
    );

    let results = builder
        .build_suggestions(&list(&["Lisbon", "Lisbon"]), None, None)
        .await;
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.status() == "ok"));
}

// ---------------------------------------------------------------------------
// per_day_budget
// ---------------------------------------------------------------------------

#[test]
fn per_day_budget_rounds_to_nearest_whole_unit() {
    assert_eq!(per_day_budget(Some(2000.0), Some(5)), Some(400));
    assert_eq!(per_day_budget(Some(1000.0), Some(3)), Some(333));
    assert_eq!(per_day_budget(Some(500.0), Some(3)), Some(167));
}

#[test]
fn per_day_budget_is_absent_without_positive_days() {
    assert_eq!(per_day_budget(Some(2000.0), Some(0)), None);
    assert_eq!(per_day_budget(Some(2000.0), Some(-2)), None);
    assert_eq!(per_day_budget(Some(2000.0), None), None);
    assert_eq!(per_day_budget(None, Some(4)), None);
    assert_eq!(per_day_budget(Some(f64::NAN), Some(4)), None);
}

#[test]
fn default_options_request_three_and_eight_live_items() {
    let options = SuggestOptions::default();
    assert_eq!(options.supplemental_limit, 3);
    assert_eq!(options.live_limit, 8);
    assert!(options.fallback_enabled);
}
