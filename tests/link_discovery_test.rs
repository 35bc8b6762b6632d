//! Link discovery against a scripted Places API

mod common;

use std::time::Duration;

use common::{ScriptedPlacesApi, details_in, kyiv_details, page, summary};
use placescrape::config::{DiscoveryConfig, GridPoint, PageTokenRetry};
use placescrape::places::{ApiStatus, CandidateOutcome, LinkDiscovery, NearbyRequest, Paginator};

fn point(lat: f64, lng: f64) -> GridPoint {
    GridPoint::new(lat, lng, "test")
}

fn config(locations: Vec<GridPoint>, place_types: &[&str]) -> DiscoveryConfig {
    DiscoveryConfig {
        api_key: "test-key".to_string(),
        locations,
        place_types: place_types.iter().map(|t| (*t).to_string()).collect(),
        ..DiscoveryConfig::default()
    }
}

#[tokio::test]
async fn test_same_place_in_two_cells_is_filtered_once() {
    let north = point(50.9, 30.5234);
    let centre = point(50.4501, 30.5234);
    let api = ScriptedPlacesApi::new()
        .with_initial(
            "city_hall",
            &north,
            vec![page(ApiStatus::Ok, vec![summary("P1", "Київська міська рада")], None)],
        )
        .with_initial(
            "courthouse",
            &centre,
            vec![page(
                ApiStatus::Ok,
                vec![summary("P1", "Київська міська рада"), summary("P2", "Господарський суд")],
                None,
            )],
        )
        .with_details("P1", kyiv_details())
        .with_details("P2", kyiv_details());
    let config = config(vec![north, centre], &["city_hall", "courthouse"]);

    let mut discovery = LinkDiscovery::new(&api, &config);
    let stats = discovery.run().await.clone();

    assert_eq!(*api.details_calls.borrow(), vec!["P1", "P2"]);
    assert_eq!(stats.duplicates_skipped, 1);
    assert_eq!(stats.accepted, 2);
    assert_eq!(
        discovery.links().iter().cloned().collect::<Vec<_>>(),
        vec![
            "https://www.google.com/maps/place/?q=place_id:P1",
            "https://www.google.com/maps/place/?q=place_id:P2",
        ]
    );
}

#[tokio::test]
async fn test_keyword_rejection_skips_details_lookup() {
    let api = ScriptedPlacesApi::new().with_details("P9", kyiv_details());
    let config = config(vec![point(50.45, 30.52)], &["local_government_office"]);
    let mut discovery = LinkDiscovery::new(&api, &config);

    let outcome = discovery
        .process_candidate(&summary("P9", "Приватна юридична фірма"))
        .await;

    assert!(matches!(outcome, CandidateOutcome::ExcludedByKeyword(_)));
    assert!(api.details_calls.borrow().is_empty());
    assert!(discovery.links().is_empty());
}

#[tokio::test]
async fn test_region_rejection_and_no_second_lookup() {
    let api = ScriptedPlacesApi::new()
        .with_details("L1", details_in("Lviv Oblast", &["administrative_area_level_1"]));
    let config = config(vec![point(50.45, 30.52)], &["university"]);
    let mut discovery = LinkDiscovery::new(&api, &config);

    let candidate = summary("L1", "Національний університет");
    assert_eq!(
        discovery.process_candidate(&candidate).await,
        CandidateOutcome::OutsideRegion
    );
    assert_eq!(
        discovery.process_candidate(&candidate).await,
        CandidateOutcome::Duplicate
    );
    assert_eq!(api.details_calls.borrow().len(), 1);
    assert_eq!(discovery.stats().region_rejections, 1);
}

#[tokio::test]
async fn test_oblast_place_is_accepted() {
    let api = ScriptedPlacesApi::new().with_details(
        "B1",
        details_in("Kyiv Oblast", &["administrative_area_level_1", "political"]),
    );
    let config = config(vec![point(50.45, 30.52)], &["city_hall"]);
    let mut discovery = LinkDiscovery::new(&api, &config);

    let outcome = discovery
        .process_candidate(&summary("B1", "Броварська міська рада"))
        .await;

    assert_eq!(
        outcome,
        CandidateOutcome::Accepted("https://www.google.com/maps/place/?q=place_id:B1".to_string())
    );
}

#[tokio::test]
async fn test_missing_details_reject_candidate() {
    let api = ScriptedPlacesApi::new();
    let config = config(vec![point(50.45, 30.52)], &["city_hall"]);
    let mut discovery = LinkDiscovery::new(&api, &config);

    assert_eq!(
        discovery.process_candidate(&summary("X", "Сільська рада")).await,
        CandidateOutcome::DetailsUnavailable
    );
    assert_eq!(
        discovery
            .process_candidate(&placescrape::places::PlaceSummary::default())
            .await,
        CandidateOutcome::MissingId
    );
}

#[tokio::test(start_paused = true)]
async fn test_page_token_retried_until_ready() {
    let centre = point(50.4501, 30.5234);
    let api = ScriptedPlacesApi::new()
        .with_initial(
            "city_hall",
            &centre,
            vec![page(ApiStatus::Ok, vec![summary("A", "Рада 1")], Some("t2"))],
        )
        .with_page(
            "t2",
            vec![
                page(ApiStatus::InvalidRequest, vec![], None),
                page(ApiStatus::InvalidRequest, vec![], None),
                page(ApiStatus::Ok, vec![summary("B", "Рада 2")], Some("t3")),
            ],
        )
        .with_page(
            "t3",
            vec![page(ApiStatus::Ok, vec![summary("C", "Рада 3")], None)],
        )
        .with_details("A", kyiv_details())
        .with_details("B", kyiv_details())
        .with_details("C", kyiv_details());
    let config = config(vec![centre], &["city_hall"]);

    let start = tokio::time::Instant::now();
    let mut discovery = LinkDiscovery::new(&api, &config);
    let stats = discovery.run().await.clone();

    assert_eq!(api.calls_for("t2"), 3);
    assert_eq!(api.calls_for("t3"), 1);
    assert_eq!(stats.page_token_retries, 2);
    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(discovery.links().len(), 3);
    assert_eq!(start.elapsed(), Duration::from_millis(2 * 2500));
}

#[tokio::test(start_paused = true)]
async fn test_over_quota_is_not_retried() {
    let api = ScriptedPlacesApi::new().with_page(
        "t",
        vec![page(ApiStatus::OverQueryLimit, vec![], None)],
    );
    let mut paginator = Paginator::new(&api, PageTokenRetry::default());
    let start = tokio::time::Instant::now();

    let response = paginator
        .fetch(&NearbyRequest::Page { token: "t" })
        .await
        .expect("scripted API never fails");

    assert_eq!(response.status, ApiStatus::OverQueryLimit);
    assert_eq!(api.calls_for("t"), 1);
    assert_eq!(paginator.retries(), 0);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_page_token_attempts_are_capped() {
    let api = ScriptedPlacesApi::new().with_page(
        "stuck",
        vec![page(ApiStatus::InvalidRequest, vec![], None)],
    );
    let retry = PageTokenRetry::default();
    let mut paginator = Paginator::new(&api, retry.clone());
    let start = tokio::time::Instant::now();

    let response = paginator
        .fetch(&NearbyRequest::Page { token: "stuck" })
        .await
        .expect("scripted API never fails");

    assert_eq!(response.status, ApiStatus::InvalidRequest);
    assert_eq!(api.calls_for("stuck"), 6);
    assert_eq!(start.elapsed(), retry.delay() * 5);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_initial_request_is_not_retried() {
    let centre = point(50.4501, 30.5234);
    let api = ScriptedPlacesApi::new().with_initial(
        "city_hall",
        &centre,
        vec![page(ApiStatus::InvalidRequest, vec![], None)],
    );
    let mut paginator = Paginator::new(&api, PageTokenRetry::default());

    let request = NearbyRequest::Initial {
        location: &centre,
        radius_m: 50_000,
        place_type: "city_hall",
    };
    paginator.fetch(&request).await.expect("scripted API never fails");

    assert_eq!(
        api.calls_for(&ScriptedPlacesApi::initial_key("city_hall", &centre)),
        1
    );
}

#[tokio::test]
async fn test_links_file_is_sorted() {
    let centre = point(50.4501, 30.5234);
    let api = ScriptedPlacesApi::new()
        .with_initial(
            "city_hall",
            &centre,
            vec![page(
                ApiStatus::Ok,
                vec![summary("Zeta", "Рада"), summary("Alpha", "Рада")],
                None,
            )],
        )
        .with_details("Zeta", kyiv_details())
        .with_details("Alpha", kyiv_details());
    let config = config(vec![centre], &["city_hall"]);
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out").join("links.txt");

    let mut discovery = LinkDiscovery::new(&api, &config);
    discovery.run().await;
    discovery.write_links(&path).await.expect("write links");

    let written = std::fs::read_to_string(&path).expect("read links");
    assert_eq!(
        written,
        "https://www.google.com/maps/place/?q=place_id:Alpha\n\
         https://www.google.com/maps/place/?q=place_id:Zeta\n"
    );
}
