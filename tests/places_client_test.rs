//! `GooglePlacesClient` against a mock Places web service

use mockito::{Matcher, Server};

use placescrape::config::{DiscoveryConfig, GridPoint};
use placescrape::places::{ApiStatus, GooglePlacesClient, NearbyRequest, PlacesApi, PlacesError};

fn config_for(server: &Server) -> DiscoveryConfig {
    DiscoveryConfig {
        api_key: "test-key".to_string(),
        api_base: server.url(),
        ..DiscoveryConfig::default()
    }
}

#[tokio::test]
async fn test_initial_nearby_search_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/nearbysearch/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("location".into(), "50.4501,30.5234".into()),
            Matcher::UrlEncoded("radius".into(), "50000".into()),
            Matcher::UrlEncoded("type".into(), "city_hall".into()),
            Matcher::UrlEncoded("key".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"status": "OK", "results": [{"place_id": "P1", "name": "Рада"}],
                "next_page_token": "NEXT"}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let config = config_for(&server);
    let client = GooglePlacesClient::new(&config).expect("client");
    let location = GridPoint::new(50.4501, 30.5234, "centre");

    let response = client
        .nearby_search(&NearbyRequest::Initial {
            location: &location,
            radius_m: config.radius_m,
            place_type: "city_hall",
        })
        .await
        .expect("nearby search");

    mock.assert_async().await;
    assert_eq!(response.status, ApiStatus::Ok);
    assert_eq!(response.results[0].place_id.as_deref(), Some("P1"));
    assert_eq!(response.next_page_token(), Some("NEXT"));
}

#[tokio::test]
async fn test_page_request_sends_only_token_and_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/nearbysearch/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("pagetoken".into(), "NEXT".into()),
            Matcher::UrlEncoded("key".into(), "test-key".into()),
        ]))
        .with_body(r#"{"status": "INVALID_REQUEST", "results": []}"#)
        .create_async()
        .await;

    let client = GooglePlacesClient::new(&config_for(&server)).expect("client");
    let response = client
        .nearby_search(&NearbyRequest::Page { token: "NEXT" })
        .await
        .expect("non-OK statuses are returned, not raised");

    mock.assert_async().await;
    assert_eq!(response.status, ApiStatus::InvalidRequest);
}

#[tokio::test]
async fn test_details_requests_address_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/details/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("place_id".into(), "P1".into()),
            Matcher::UrlEncoded("fields".into(), "address_components,name,url".into()),
        ]))
        .with_body(
            r#"{"status": "OK", "result": {"name": "Рада",
                "address_components": [
                    {"long_name": "Київ", "short_name": "Київ", "types": ["locality", "political"]}
                ]}}"#,
        )
        .create_async()
        .await;

    let client = GooglePlacesClient::new(&config_for(&server)).expect("client");
    let details = client.place_details("P1").await.expect("details");

    mock.assert_async().await;
    assert_eq!(details.address_components.len(), 1);
    assert!(details.address_components[0].has_type("locality"));
}

#[tokio::test]
async fn test_details_failures_are_errors() {
    let mut server = Server::new_async().await;
    let _denied = server
        .mock("GET", "/details/json")
        .match_query(Matcher::UrlEncoded("place_id".into(), "DENIED".into()))
        .with_body(r#"{"status": "REQUEST_DENIED", "error_message": "bad key"}"#)
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/details/json")
        .match_query(Matcher::UrlEncoded("place_id".into(), "BROKEN".into()))
        .with_status(500)
        .create_async()
        .await;

    let client = GooglePlacesClient::new(&config_for(&server)).expect("client");

    match client.place_details("DENIED").await {
        Err(PlacesError::Status { status, message, .. }) => {
            assert_eq!(status, ApiStatus::RequestDenied);
            assert_eq!(message, "bad key");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(matches!(
        client.place_details("BROKEN").await,
        Err(PlacesError::HttpStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_malformed_json_is_reported() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/nearbysearch/json")
        .match_query(Matcher::Any)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = GooglePlacesClient::new(&config_for(&server)).expect("client");
    let result = client.nearby_search(&NearbyRequest::Page { token: "X" }).await;

    assert!(matches!(result, Err(PlacesError::Json { .. })));
}
