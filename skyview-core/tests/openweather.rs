use skyview_core::{FetchError, OpenWeatherClient, WeatherSource};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url("TEST_KEY".to_string(), server.uri())
}

#[tokio::test]
async fn success_sends_fixed_query_and_parses_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Mumbai"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"main": {"temp": 30.5, "humidity": 70, "pressure": 1008,
                         "temp_min": 29.0, "temp_max": 31.0},
                "wind": {"speed": 5.1},
                "sys": {"sunrise": 1700000000, "sunset": 1700041000},
                "weather": [{"main": "Haze"}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).fetch("Mumbai").await.expect("fetch should succeed");

    assert_eq!(result.temperature, Some(30.5));
    assert_eq!(result.humidity, 70);
    assert_eq!(result.pressure, 1008);
    assert_eq!(result.condition, "Haze");
}

#[tokio::test]
async fn city_is_sent_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "São Paulo, BR"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).fetch("São Paulo, BR").await.expect("fetch should succeed");
    assert_eq!(result.condition, "Unknown");
}

#[tokio::test]
async fn not_found_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"cod":"404","message":"city not found"}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("Nowhereville").await.unwrap_err();

    match err {
        FetchError::Http { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("city not found"));
        }
        other => panic!("expected HttpError, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("Mumbai").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn empty_success_body_is_empty_body_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("Mumbai").await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyBody), "got {err:?}");
}

#[tokio::test]
async fn null_success_body_is_empty_body_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("Mumbai").await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyBody), "got {err:?}");
}

#[tokio::test]
async fn garbage_success_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("Mumbai").await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Nothing listens on port 1.
    let client =
        OpenWeatherClient::with_base_url("TEST_KEY".to_string(), "http://127.0.0.1:1".to_string());

    let err = client.fetch("Mumbai").await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
}
