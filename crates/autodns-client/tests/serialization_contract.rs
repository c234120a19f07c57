//! Contract Test: one in-flight request per client
//!
//! Constraints verified:
//! - Concurrent calls on one client are executed one after another
//! - Cancelling a pending call releases the lock for the next caller

use autodns_client::AutoDnsClient;
use autodns_core::config::ClientConfig;
use autodns_core::traits::ZoneApi;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ZONE_ID: &str = "example.com@a.ns14.net";
const DELAY: Duration = Duration::from_millis(200);

fn zone_body() -> serde_json::Value {
    json!({
        "data": [{
            "origin": "example.com",
            "nameServerGroup": "ns14.net",
            "virtualNameServer": "a.ns14.net",
            "resourceRecords": []
        }]
    })
}

fn client_for(server: &MockServer) -> Arc<AutoDnsClient> {
    let config = ClientConfig::new("api-user", "api-secret")
        .with_endpoint(format!("{}/v1", server.uri()));
    Arc::new(AutoDnsClient::new(&config).expect("client builds"))
}

#[tokio::test]
async fn concurrent_calls_do_not_overlap() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/zone/example.com/a.ns14.net"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(zone_body())
                .set_delay(DELAY),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let started = Instant::now();

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.get_records(ZONE_ID).await })
        })
        .collect();

    for handle in handles {
        handle.await.expect("task joins").expect("request succeeds");
    }

    let elapsed = started.elapsed();
    assert!(
        elapsed >= DELAY * 3,
        "3 delayed requests finished in {:?}; they must run one at a time",
        elapsed
    );
}

#[tokio::test]
async fn cancelled_call_releases_the_lock() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/zone/example.com/a.ns14.net"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(zone_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/zone/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(zone_body()))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let slow = tokio::time::timeout(Duration::from_millis(100), client.get_records(ZONE_ID)).await;
    assert!(slow.is_err(), "slow call should have been cancelled");

    let zone = tokio::time::timeout(Duration::from_secs(2), client.get_zone("example.com"))
        .await
        .expect("lock was released by the cancelled call")
        .expect("search succeeds");
    assert_eq!(zone.id(), ZONE_ID);
}
