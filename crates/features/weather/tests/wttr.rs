use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wsb_kernel::domain::config::WeatherConfig;
use wsb_kernel::prelude::*;
use wsb_weather::{WEATHER, WeatherProvider, register};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn config(server: &MockServer) -> WeatherConfig {
    WeatherConfig {
        city: "Barcelona".to_owned(),
        format: "%t".to_owned(),
        timeout_secs: 1,
        endpoint: server.uri(),
    }
}

#[tokio::test]
async fn test_returns_trimmed_body() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Barcelona"))
        .and(query_param("format", "%t"))
        .respond_with(ResponseTemplate::new(200).set_body_string("+21°C\n"))
        .expect(1)
        .mount(&server)
        .await;

    let directory = register(Directory::new(), &config(&server));
    let provider = directory.create(WEATHER).expect("registered");

    let text = provider.fetch(&Deadline::new()).await.expect("fetch");
    assert_eq!(text, "+21°C");
}

#[tokio::test]
async fn test_non_ok_status_is_a_remote_error() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = WeatherProvider::new(&config(&server))
        .fetch(&Deadline::new())
        .await
        .expect_err("503");
    assert!(matches!(err, ProviderError::Remote { .. }));
    assert!(err.to_string().contains("bad status 503"), "{err}");
}

#[tokio::test]
async fn test_slow_server_hits_request_timeout() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let err = WeatherProvider::new(&config(&server))
        .fetch(&Deadline::new())
        .await
        .expect_err("times out");
    assert!(matches!(err, ProviderError::Remote { .. }));
}

#[tokio::test]
async fn test_cancelled_round_aborts_request() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let mut settings = config(&server);
    settings.timeout_secs = 30;
    let deadline = Deadline::new().with_timeout(Duration::from_millis(100));

    let err = WeatherProvider::new(&settings).fetch(&deadline).await.expect_err("cancelled");
    assert!(err.is_cancellation(), "{err}");
}

#[tokio::test]
async fn test_empty_city_fails_without_request() {
    let settings = WeatherConfig { city: String::new(), ..WeatherConfig::default() };
    let err = WeatherProvider::new(&settings).fetch(&Deadline::new()).await.expect_err("no city");
    assert!(err.to_string().contains("city cannot be empty"), "{err}");
}
