//! Provider client tests against mocked upstream services

use average_calculator::{HttpProviderClient, NumberKind, NumberProvider};
use rstest::*;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

use crate::{create_test_config, init_test_env};

async fn client_for(server: &MockServer) -> HttpProviderClient {
    init_test_env();
    HttpProviderClient::new(create_test_config(&server.uri()).providers).unwrap()
}

#[rstest]
#[case(NumberKind::Primes, "/primes")]
#[case(NumberKind::Fibonacci, "/fibo")]
#[case(NumberKind::Even, "/even")]
#[tokio::test]
async fn test_derived_kind_posts_known_numbers(#[case] kind: NumberKind, #[case] route: &str) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route))
        .and(body_json(json!({ "numbers": [1, 2, 3] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "numbers": [5, 8] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.fetch(kind, &[1, 2, 3]).await, vec![5, 8]);
}

#[tokio::test]
async fn test_random_kind_uses_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rand"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "numbers": [9, 4, 9] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(client.fetch(NumberKind::Random, &[1, 2]).await, vec![9, 4, 9]);
}

#[tokio::test]
async fn test_non_success_status_yields_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rand"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "numbers": [1] })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.fetch(NumberKind::Random, &[]).await.is_empty());
}

#[rstest]
#[case("not json")]
#[case(r#"{"numbers": "1,2,3"}"#)]
#[case(r#"{"numbers": [1.5, 2]}"#)]
#[tokio::test]
async fn test_malformed_body_yields_empty(#[case] body: &str) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/even"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.fetch(NumberKind::Even, &[]).await.is_empty());
}

#[tokio::test]
async fn test_missing_numbers_field_yields_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rand"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "other": [1] })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.fetch(NumberKind::Random, &[]).await.is_empty());
}

#[tokio::test]
async fn test_slow_provider_times_out_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rand"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "numbers": [1, 2, 3] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let started = std::time::Instant::now();
    assert!(client.fetch(NumberKind::Random, &[]).await.is_empty());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_unreachable_provider_yields_empty() {
    init_test_env();
    // Port 1 on loopback refuses connections
    let client = HttpProviderClient::new(create_test_config("http://127.0.0.1:1").providers).unwrap();
    assert!(client.fetch(NumberKind::Primes, &[2]).await.is_empty());
}

#[tokio::test]
async fn test_bearer_token_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rand"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "numbers": [7] })))
        .expect(1)
        .mount(&server)
        .await;

    init_test_env();
    let mut providers = create_test_config(&server.uri()).providers;
    providers.bearer_token = Some("secret-token".to_string());
    let client = HttpProviderClient::new(providers).unwrap();

    assert_eq!(client.fetch(NumberKind::Random, &[]).await, vec![7]);
}
