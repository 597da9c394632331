//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use std::time::{Duration, Instant};

use tripscope_core::{BoundingBox, GeoPoint, SearchCategory};
use tripscope_places::{PlacesClient, PlacesError, DEFAULT_RADIUS_M};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORIGIN: GeoPoint = GeoPoint {
    lat: 48.8584,
    lon: 2.2945,
};

fn museum_and_castle() -> Vec<SearchCategory> {
    vec![
        SearchCategory::new("tourism", "museum"),
        SearchCategory::new("historic", "castle"),
    ]
}

fn test_client(base_url: &str, categories: Vec<SearchCategory>) -> PlacesClient {
    PlacesClient::with_base_url(base_url, 1, "tripscope-test/1.0", categories)
        .expect("client construction should not fail")
}

fn place(osm_id: u64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "place_id": osm_id * 10,
        "osm_type": "node",
        "osm_id": osm_id,
        "lat": "48.8600",
        "lon": "2.2950",
        "display_name": format!("{name}, Paris, France"),
        "class": "tourism",
        "type": "museum",
        "importance": 0.5
    })
}

async fn mount_category(server: &MockServer, q: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", q))
        .respond_with(template)
        .mount(server)
        .await;
}

fn names(search: &tripscope_places::NearbySearch) -> Vec<&str> {
    search.places.iter().map(|p| p.place.name.as_str()).collect()
}

#[tokio::test]
async fn overlapping_categories_merge_in_order_without_duplicates() {
    let server = MockServer::start().await;
    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([place(1, "A"), place(2, "B")])),
    )
    .await;
    mount_category(
        &server,
        "castle",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([place(2, "B"), place(3, "C")])),
    )
    .await;

    let client = test_client(&server.uri(), museum_and_castle());
    let search = client
        .search_nearby(ORIGIN, DEFAULT_RADIUS_M)
        .await
        .expect("search should succeed");

    assert_eq!(names(&search), vec!["A", "B", "C"]);
    assert!(search.failed_categories.is_empty());
    assert_eq!(search.rejected, 0);
    assert!(!search.is_partial());
}

#[tokio::test]
async fn server_error_in_one_category_is_soft() {
    let server = MockServer::start().await;
    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([place(1, "A")])),
    )
    .await;
    mount_category(&server, "castle", ResponseTemplate::new(500)).await;

    let client = test_client(&server.uri(), museum_and_castle());
    let search = client
        .search_nearby(ORIGIN, DEFAULT_RADIUS_M)
        .await
        .expect("partial failure should still succeed");

    assert_eq!(names(&search), vec!["A"]);
    assert_eq!(search.failed_categories.len(), 1);
    assert_eq!(
        search.failed_categories[0].category,
        SearchCategory::new("historic", "castle")
    );
    assert!(search.failed_categories[0].reason.contains("500"));
}

#[tokio::test]
async fn transport_failure_in_one_category_is_soft() {
    let server = MockServer::start().await;
    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([place(1, "A")])),
    )
    .await;
    // Slower than the 1s client timeout.
    mount_category(
        &server,
        "castle",
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!([place(2, "B")]))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let client = test_client(&server.uri(), museum_and_castle());
    let search = client
        .search_nearby(ORIGIN, DEFAULT_RADIUS_M)
        .await
        .expect("timeout in one category should not fail the search");

    assert_eq!(names(&search), vec!["A"]);
    assert_eq!(search.failed_categories.len(), 1);
}

#[tokio::test]
async fn malformed_body_in_one_category_is_soft() {
    let server = MockServer::start().await;
    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;
    mount_category(
        &server,
        "castle",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([place(3, "C")])),
    )
    .await;

    let client = test_client(&server.uri(), museum_and_castle());
    let search = client.search_nearby(ORIGIN, DEFAULT_RADIUS_M).await.unwrap();

    assert_eq!(names(&search), vec!["C"]);
    assert_eq!(search.failed_categories.len(), 1);
    assert_eq!(
        search.failed_categories[0].category,
        SearchCategory::new("tourism", "museum")
    );
}

#[tokio::test]
async fn every_category_failing_is_an_error() {
    let server = MockServer::start().await;
    mount_category(&server, "museum", ResponseTemplate::new(503)).await;
    mount_category(&server, "castle", ResponseTemplate::new(429)).await;

    let client = test_client(&server.uri(), museum_and_castle());
    let err = client
        .search_nearby(ORIGIN, DEFAULT_RADIUS_M)
        .await
        .unwrap_err();

    assert!(
        matches!(err, PlacesError::AllCategoriesFailed { attempted: 2 }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn empty_results_are_not_an_error() {
    let server = MockServer::start().await;
    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([])),
    )
    .await;
    mount_category(
        &server,
        "castle",
        ResponseTemplate::new(200).set_body_string("null"),
    )
    .await;

    let client = test_client(&server.uri(), museum_and_castle());
    let search = client.search_nearby(ORIGIN, DEFAULT_RADIUS_M).await.unwrap();

    assert!(search.places.is_empty());
    assert!(search.failed_categories.is_empty());
}

#[tokio::test]
async fn merged_results_are_capped_at_the_limit_from_the_front() {
    let server = MockServer::start().await;
    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!([place(1, "A"), place(2, "B")])),
    )
    .await;
    mount_category(
        &server,
        "castle",
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!([place(3, "C"), place(4, "D")])),
    )
    .await;

    let client = test_client(&server.uri(), museum_and_castle()).with_limit(3);
    let search = client.search_nearby(ORIGIN, DEFAULT_RADIUS_M).await.unwrap();

    assert_eq!(names(&search), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn request_carries_query_parameters_and_user_agent() {
    let server = MockServer::start().await;
    let viewbox = BoundingBox::around(ORIGIN, 800.0).to_viewbox();

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .and(query_param("q", "park"))
        .and(query_param("viewbox", viewbox.as_str()))
        .and(query_param("bounded", "1"))
        .and(query_param("limit", "4"))
        .and(query_param("accept-language", "en"))
        .and(header("user-agent", "tripscope-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([place(7, "Park")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), vec![SearchCategory::new("leisure", "park")])
        .with_limit(4)
        .with_language("en");
    let search = client.search_nearby(ORIGIN, 800.0).await.unwrap();

    assert_eq!(names(&search), vec!["Park"]);
}

#[tokio::test]
async fn records_with_bad_coordinates_are_rejected_and_counted() {
    let server = MockServer::start().await;
    let mut broken = place(2, "Broken");
    broken["lat"] = serde_json::json!("not-a-number");

    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!([place(1, "A"), broken, place(3, "C")])),
    )
    .await;

    let client = test_client(&server.uri(), vec![SearchCategory::new("tourism", "museum")]);
    let search = client.search_nearby(ORIGIN, DEFAULT_RADIUS_M).await.unwrap();

    assert_eq!(names(&search), vec!["A", "C"]);
    assert_eq!(search.rejected, 1);
    assert!(search.places.iter().all(|p| p.distance_km.is_finite()));
}

#[tokio::test]
async fn same_id_with_different_osm_type_is_kept() {
    let server = MockServer::start().await;
    let mut way = place(1, "Way");
    way["osm_type"] = serde_json::json!("way");

    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([place(1, "Node"), way])),
    )
    .await;

    let client = test_client(&server.uri(), vec![SearchCategory::new("tourism", "museum")]);
    let search = client.search_nearby(ORIGIN, DEFAULT_RADIUS_M).await.unwrap();

    assert_eq!(names(&search), vec!["Node", "Way"]);
}

#[tokio::test]
async fn places_carry_distance_and_map_link() {
    let server = MockServer::start().await;
    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200).set_body_json(serde_json::json!([place(1, "A")])),
    )
    .await;

    let client = test_client(&server.uri(), vec![SearchCategory::new("tourism", "museum")]);
    let search = client.search_nearby(ORIGIN, DEFAULT_RADIUS_M).await.unwrap();
    let first = &search.places[0];

    // 48.8584,2.2945 -> 48.8600,2.2950 is roughly 180 m.
    assert!((first.distance_km - 0.2).abs() < f64::EPSILON);
    assert_eq!(
        first.osm_link,
        "https://www.openstreetmap.org/?mlat=48.86&mlon=2.295#map=16/48.86/2.295"
    );
    assert_eq!(first.place.address, "Paris, France");
    assert_eq!(first.place.category, "museum");
}

#[tokio::test]
async fn wrongly_typed_record_costs_only_itself() {
    let server = MockServer::start().await;
    let mut broken = place(2, "Broken");
    broken["lat"] = serde_json::json!(true);
    let body = serde_json::json!([place(1, "A"), broken, place(3, "C")]);

    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200).set_body_json(body.clone()),
    )
    .await;
    mount_category(&server, "castle", ResponseTemplate::new(200).set_body_json(body)).await;

    let client = test_client(&server.uri(), museum_and_castle());
    let search = client
        .search_nearby(ORIGIN, DEFAULT_RADIUS_M)
        .await
        .expect("a bad record must not fail its category");

    assert_eq!(names(&search), vec!["A", "C"]);
    assert_eq!(search.rejected, 1);
    assert!(search.failed_categories.is_empty());
}

#[tokio::test]
async fn record_with_non_numeric_osm_id_is_rejected_alone() {
    let server = MockServer::start().await;
    let mut broken = place(2, "Broken");
    broken["osm_id"] = serde_json::json!("two");

    mount_category(
        &server,
        "museum",
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!([place(1, "A"), broken, place(3, "C")])),
    )
    .await;

    let client = test_client(&server.uri(), vec![SearchCategory::new("tourism", "museum")]);
    let search = client.search_nearby(ORIGIN, DEFAULT_RADIUS_M).await.unwrap();

    assert_eq!(names(&search), vec!["A", "C"]);
    assert_eq!(search.rejected, 1);
}

#[tokio::test]
async fn category_requests_run_concurrently() {
    let server = MockServer::start().await;
    let delay = Duration::from_millis(800);
    let categories = vec![
        SearchCategory::new("tourism", "attraction"),
        SearchCategory::new("tourism", "museum"),
        SearchCategory::new("historic", "castle"),
        SearchCategory::new("leisure", "park"),
    ];

    for (id, category) in (1_u64..).zip(&categories) {
        mount_category(
            &server,
            &category.value,
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([place(id, &category.value)]))
                .set_delay(delay),
        )
        .await;
    }

    let client = PlacesClient::with_base_url(&server.uri(), 5, "tripscope-test/1.0", categories)
        .expect("client construction should not fail");

    let started = Instant::now();
    let search = client.search_nearby(ORIGIN, DEFAULT_RADIUS_M).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(search.places.len(), 4);
    // Sequential requests would take at least 4 x 800ms.
    assert!(
        elapsed < delay * 2,
        "category requests did not overlap: took {elapsed:?}"
    );
}
