//! Integration tests for `WikipediaClient` using wiremock HTTP mocks.

use serde_json::json;
use tripdesk_core::{Coordinates, Provenance};
use tripdesk_geo::{LookupError, NearbyPlaces, WikipediaClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SINGAPORE: Coordinates = Coordinates {
    lat: 1.29,
    lon: 103.85,
};

fn test_client(server: &MockServer) -> WikipediaClient {
    WikipediaClient::with_base_url(
        2,
        "tripdesk-test/0.1",
        10_000,
        &format!("{}/w/api.php", server.uri()),
    )
    .expect("client construction should not fail")
}

fn geosearch_body(items: &[(i64, &str, f64)]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = items
        .iter()
        .map(|(pageid, title, dist)| {
            json!({
                "pageid": pageid,
                "ns": 0,
                "title": title,
                "lat": 1.29,
                "lon": 103.85,
                "dist": dist,
                "primary": ""
            })
        })
        .collect();
    json!({ "batchcomplete": "", "query": { "geosearch": items } })
}

#[tokio::test]
async fn nearby_returns_ordered_live_attractions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "geosearch"))
        .and(query_param("gscoord", "1.29|103.85"))
        .and(query_param("gsradius", "10000"))
        .and(query_param("gslimit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geosearch_body(&[
            (11, "Merlion Park", 120.5),
            (12, "Fullerton Hotel", 240.0),
            (13, "Esplanade", 610.2),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let items = test_client(&server)
        .nearby(SINGAPORE, 3)
        .await
        .expect("geosearch should succeed");

    let titles: Vec<&str> = items.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Merlion Park", "Fullerton Hotel", "Esplanade"]);
    assert_eq!(items[0].distance, Some(120.5));
    assert_eq!(
        items[0].page_url.as_deref(),
        Some("https://en.wikipedia.org/?curid=11")
    );
    assert!(items.iter().all(|a| a.source == Provenance::Live));
    assert!(items.iter().all(|a| a.price_usd.is_none()));
}

#[tokio::test]
async fn nearby_truncates_to_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geosearch_body(&[
            (1, "A", 1.0),
            (2, "B", 2.0),
            (3, "C", 3.0),
        ])))
        .mount(&server)
        .await;

    let items = test_client(&server).nearby(SINGAPORE, 2).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].title, "B");
}

#[tokio::test]
async fn nearby_empty_result_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"batchcomplete": ""})))
        .mount(&server)
        .await;

    let items = test_client(&server).nearby(SINGAPORE, 8).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn nearby_api_error_body_is_lookup_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": "toomanyvalues", "info": "Too many values supplied" }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server).nearby(SINGAPORE, 8).await.unwrap_err();
    assert!(
        matches!(
            err,
            LookupError::Api { ref message, .. } if message == "Too many values supplied"
        ),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn nearby_http_failure_is_lookup_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = test_client(&server).nearby(SINGAPORE, 8).await.unwrap_err();
    assert!(matches!(err, LookupError::Http(_)), "got: {err:?}");
}

#[tokio::test]
async fn nearby_non_json_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server).nearby(SINGAPORE, 8).await.unwrap_err();
    assert!(matches!(err, LookupError::Deserialize { .. }), "got: {err:?}");
}
