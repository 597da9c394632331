use super::*;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        log_level: "info".to_owned(),
        http_timeout_secs: 5,
        user_agent: "tripscope-test/1.0".to_owned(),
        language: "de".to_owned(),
        places_base_url: base_url.to_owned(),
        places_limit: 6,
        places_radius_m: 1500.0,
        categories_path: None,
        weather_base_url: base_url.to_owned(),
        weather_api_key: Some("test-key".to_owned()),
        country_base_url: base_url.to_owned(),
    }
}

fn paris_weather(country: Option<&str>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "coord": { "lon": 2.3488, "lat": 48.8534 },
        "weather": [{ "description": "light rain", "icon": "10d" }],
        "main": { "temp": 18.6, "feels_like": 18.1, "pressure": 1018, "humidity": 64 },
        "wind": { "speed": 3.6 },
        "dt": 1_718_900_000,
        "name": "Paris",
        "cod": 200
    });
    if let Some(code) = country {
        body["sys"] = serde_json::json!({ "country": code });
    }
    body
}

fn france() -> serde_json::Value {
    serde_json::json!([{
        "cca2": "FR",
        "name": { "common": "France", "nativeName": { "fra": { "common": "France" } } },
        "capital": ["Paris"],
        "population": 67_391_582,
        "region": "Europe"
    }])
}

fn louvre() -> serde_json::Value {
    serde_json::json!([{
        "osm_type": "way",
        "osm_id": 1_641_727,
        "lat": "48.8611",
        "lon": "2.3358",
        "display_name": "Louvre, Rue de Rivoli, Paris, France",
        "type": "museum"
    }])
}

async fn mount_weather(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_places(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_france(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/alpha/FR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(france()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn explore_by_city_collects_all_sections() {
    let server = MockServer::start().await;
    mount_weather(&server, paris_weather(Some("FR"))).await;
    mount_places(&server, ResponseTemplate::new(200).set_body_json(louvre())).await;
    mount_france(&server).await;

    let report = run_explore(
        &test_config(&server.uri()),
        Location::City("Paris".to_owned()),
        1500.0,
    )
    .await
    .expect("explore should succeed");

    assert_eq!(report.weather.location, "Paris");
    let places = report.places.expect("places section");
    // Searched around the coordinates the weather service resolved.
    assert_eq!(places.origin, GeoPoint::new(48.8534, 2.3488));
    assert_eq!(places.places.len(), 1);
    assert_eq!(places.places[0].place.name, "Louvre");
    assert!(report.places_error.is_none());
    assert_eq!(report.country.expect("country section").name, "France");
    assert!(report.country_error.is_none());
}

#[tokio::test]
async fn explore_by_coordinates_searches_around_the_given_point() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "48.86"))
        .and(query_param("lon", "2.34"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_weather(Some("FR"))))
        .expect(1)
        .mount(&server)
        .await;
    mount_places(&server, ResponseTemplate::new(200).set_body_json(louvre())).await;
    mount_france(&server).await;

    let origin = GeoPoint::new(48.86, 2.34);
    let report = run_explore(
        &test_config(&server.uri()),
        Location::Coordinates(origin),
        1500.0,
    )
    .await
    .unwrap();

    assert_eq!(report.places.expect("places section").origin, origin);
}

#[tokio::test]
async fn places_failure_is_reported_not_fatal() {
    let server = MockServer::start().await;
    mount_weather(&server, paris_weather(Some("FR"))).await;
    mount_places(&server, ResponseTemplate::new(500)).await;
    mount_france(&server).await;

    let report = run_explore(
        &test_config(&server.uri()),
        Location::City("Paris".to_owned()),
        1500.0,
    )
    .await
    .expect("a places failure must not abort explore");

    assert!(report.places.is_none());
    let err = report.places_error.expect("places error recorded");
    assert!(err.contains("all 6 place categories failed"), "{err}");
    assert_eq!(report.country.expect("country section").code, "FR");
}

#[tokio::test]
async fn country_failure_is_reported_not_fatal() {
    let server = MockServer::start().await;
    mount_weather(&server, paris_weather(Some("FR"))).await;
    mount_places(&server, ResponseTemplate::new(200).set_body_json(louvre())).await;
    Mock::given(method("GET"))
        .and(path("/alpha/FR"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let report = run_explore(
        &test_config(&server.uri()),
        Location::City("Paris".to_owned()),
        1500.0,
    )
    .await
    .unwrap();

    assert!(report.places.is_some());
    assert!(report.country.is_none());
    assert!(report.country_error.is_some());
}

#[tokio::test]
async fn missing_country_code_leaves_country_empty() {
    let server = MockServer::start().await;
    mount_weather(&server, paris_weather(None)).await;
    mount_places(&server, ResponseTemplate::new(200).set_body_json(serde_json::json!([]))).await;
    Mock::given(method("GET"))
        .and(path("/alpha/FR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(france()))
        .expect(0)
        .mount(&server)
        .await;

    let report = run_explore(
        &test_config(&server.uri()),
        Location::City("Paris".to_owned()),
        1500.0,
    )
    .await
    .unwrap();

    assert!(report.country.is_none());
    assert!(report.country_error.is_none());
    assert!(report.places.expect("places section").places.is_empty());
}

#[tokio::test]
async fn weather_failure_aborts_explore() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;
    mount_places(&server, ResponseTemplate::new(200).set_body_json(louvre())).await;
    mount_france(&server).await;

    let err = run_explore(
        &test_config(&server.uri()),
        Location::City("Atlantis".to_owned()),
        1500.0,
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("Atlantis"), "{err}");
}

#[tokio::test]
async fn explore_without_api_key_fails_fast() {
    let mut config = test_config("http://127.0.0.1:9");
    config.weather_api_key = None;

    let err = run_explore(&config, Location::City("Paris".to_owned()), 1500.0)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("OPENWEATHER_API_KEY"), "{err}");
}
