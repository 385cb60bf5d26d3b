//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use serde_json::json;
use tyrescout_google::{GoogleError, PlacesClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 5, "tyrescout-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn text_search_returns_parsed_results() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "results": [
            {
                "place_id": "ChIJA",
                "name": "Boland Tractor Tyres",
                "formatted_address": "12 Lady Grey St, Paarl, 7646, South Africa",
                "geometry": { "location": { "lat": -33.73, "lng": 18.96 } },
                "rating": 4.5,
                "user_ratings_total": 27,
                "types": ["car_repair", "point_of_interest"]
            },
            {
                "place_id": "ChIJB",
                "name": "Agri Wheel",
                "geometry": { "location": { "lat": -33.9, "lng": 18.8 } }
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", "tractor tyre repair Paarl"))
        .and(query_param("region", "za"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .text_search("tractor tyre repair Paarl", "za")
        .await
        .expect("should parse results");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].place_id, "ChIJA");
    assert_eq!(results[0].rating, Some(4.5));
    assert_eq!(results[0].user_ratings_total, Some(27));
    assert_eq!(results[0].types, vec!["car_repair", "point_of_interest"]);
    let loc = results[0].location().expect("location");
    assert!((loc.lat - -33.73).abs() < f64::EPSILON);
    assert_eq!(results[1].formatted_address, "");
    assert_eq!(results[1].rating, None);
}

#[tokio::test]
async fn text_search_zero_results_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&server)
        .await;

    let results = test_client(&server.uri())
        .text_search("nothing here", "za")
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn text_search_request_denied_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(3, 0);
    let err = client.text_search("q", "za").await.unwrap_err();
    assert!(
        matches!(err, GoogleError::Api { ref status, .. } if status == "REQUEST_DENIED"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn text_search_retries_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "OK",
            "results": [{ "place_id": "ChIJR", "name": "Retry Garage" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(2, 0);
    let results = client.text_search("q", "za").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].place_id, "ChIJR");
}

#[tokio::test]
async fn unexpected_status_does_not_leak_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .text_search("q", "za")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GoogleError::UnexpectedStatus { status: 403, .. }
    ));
    assert!(!err.to_string().contains("test-key"));
}

#[tokio::test]
async fn place_details_returns_contact_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "ChIJA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "OK",
            "result": {
                "website": "http://bolandtyres.co.za/",
                "formatted_phone_number": "021 872 1234",
                "international_phone_number": "+27 21 872 1234"
            }
        })))
        .mount(&server)
        .await;

    let contact = test_client(&server.uri())
        .place_details("ChIJA")
        .await
        .unwrap();
    assert_eq!(
        contact.website.as_deref(),
        Some("http://bolandtyres.co.za/")
    );
    assert_eq!(contact.phone(), Some("+27 21 872 1234"));
}

#[tokio::test]
async fn place_details_without_result_is_empty_contact() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({"status": "OK"})))
        .mount(&server)
        .await;

    let contact = test_client(&server.uri())
        .place_details("ChIJZ")
        .await
        .unwrap();
    assert!(contact.website.is_none());
    assert!(contact.phone().is_none());
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .text_search("q", "za")
        .await
        .unwrap_err();
    assert!(matches!(err, GoogleError::Deserialize { .. }));
}
