//! End-to-end scans against a wiremock Places API with a file-backed store.

use poiscan_core::Flag;
use poiscan_places::PlacesClient;
use poiscan_scan::{
    classify, CacheDecision, FileStore, KeyValueStore, ResultSource, ScanError, ScanOrchestrator,
    ScanStep, SystemClock,
};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MAP_URL: &str = "https://www.google.com/maps/@40.7128,-74.006,14z/data=!3m1!4b1";

fn joes_cafe() -> Value {
    json!({
        "places": [
            {
                "id": "joe-1",
                "displayName": { "text": "☕ Joe's Cafe", "languageCode": "en" },
                "websiteUri": "https://joes.example",
                "nationalPhoneNumber": "(555) 010-2000",
                "currentOpeningHours": { "openNow": true, "periods": [] },
                "googleMapsUri": "https://maps.google.com/?cid=42",
                "primaryType": "cafe",
                "primaryTypeDisplayName": { "text": "Coffee shop" }
            },
            {
                "id": "pin-1",
                "displayName": { "text": "12 Main St" },
                "addressComponents": [
                    { "types": ["street_number"], "shortText": "12", "longText": "12" },
                    { "types": ["route"], "shortText": "Main St", "longText": "Main Street" }
                ]
            }
        ]
    })
}

fn client(server: &MockServer) -> PlacesClient {
    PlacesClient::with_base_url(&server.uri(), 5, "poiscan-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn scan_flags_emoji_name_and_whitelist_suppresses_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(query_param("key", "live-key"))
        .and(body_partial_json(json!({
            "locationRestriction": { "circle": { "radius": 3125 } },
            "excludedTypes": ["bus_stop"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(joes_cafe()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("store.json"));
    store.set("md_api_key", "live-key").unwrap();
    store.set("md_type_blacklist", r#"["bus_stop"]"#).unwrap();

    let mut orch = ScanOrchestrator::new(client(&server), store.clone(), SystemClock).unwrap();
    let ScanStep::Completed(report) = orch.scan_url(MAP_URL).await.unwrap() else {
        panic!("first scan must go to the network");
    };

    assert_eq!(report.source, ResultSource::Live);
    assert_eq!(report.radius_m, 3125);
    assert_eq!(report.results.len(), 1, "the address pin is dropped");
    let joe = &report.results[0];
    assert_eq!(joe.id, "joe-1");
    assert_eq!(joe.name, "☕ Joe's Cafe");
    assert_eq!(joe.flags, [Flag::EmojiInName]);
    assert_eq!(joe.primary_type_display_name, "Coffee shop");

    orch.suppression_mut().add_to_whitelist("joe-1").unwrap();
    let records = poiscan_places::normalize_response(&joes_cafe());
    assert!(classify(&records, orch.suppression().whitelist()).is_empty());

    // Everything survives a restart through the same file.
    drop(orch);
    let reopened = ScanOrchestrator::new(client(&server), store, SystemClock).unwrap();
    assert!(reopened.suppression().is_whitelisted("joe-1"));
    assert_eq!(reopened.cache().len(), 1);
    assert_eq!(reopened.cache().entries()[0].results[0].flags, [Flag::EmojiInName]);
}

#[tokio::test]
async fn repeat_scan_offers_cache_without_a_second_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(joes_cafe()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("store.json"));
    store.set("md_api_key", "live-key").unwrap();

    let mut orch = ScanOrchestrator::new(client(&server), store, SystemClock).unwrap();
    orch.scan_url(MAP_URL).await.unwrap();

    let ScanStep::CacheAvailable(pending) = orch.scan_url(MAP_URL).await.unwrap() else {
        panic!("second scan should hit the fresh cache");
    };
    let report = orch.resolve(pending, CacheDecision::UseCache).await.unwrap();

    assert!(matches!(report.source, ResultSource::Cache { .. }));
    assert_eq!(report.results[0].id, "joe-1");
}

#[tokio::test]
async fn rejected_key_is_an_upstream_error_and_nothing_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "status": "PERMISSION_DENIED" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("store.json"));
    store.set("md_api_key", "bad-key").unwrap();

    let mut orch = ScanOrchestrator::new(client(&server), store.clone(), SystemClock).unwrap();
    let err = orch.scan_url(MAP_URL).await.unwrap_err();

    assert!(matches!(err, ScanError::Upstream(_)));
    assert!(orch.cache().is_empty());
    assert_eq!(store.get("md_results_cache").unwrap(), None);
}
