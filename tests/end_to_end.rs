//! Full server on a real socket, called through `GatewayClient`.

use std::time::Duration;

use compute_gateway::backend::ProcessRequest;
use compute_gateway::client::{parse_data_list, GatewayClient};
use reqwest::StatusCode;
use serde_json::json;

mod common;

fn client_for(addr: std::net::SocketAddr) -> GatewayClient {
    let http = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    GatewayClient::with_client(http, &format!("http://{}", addr))
}

#[tokio::test]
async fn serves_all_operations_over_tcp() {
    let backend = common::start_healthy_backend().await;
    let (addr, shutdown) = common::start_gateway(&backend.url()).await;
    let client = client_for(addr);

    let data = parse_data_list("1, 2, three, 3").unwrap();
    let res = client
        .process(&ProcessRequest {
            data,
            operation: "sum".into(),
        })
        .await
        .expect("gateway unreachable");
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({"success": true, "result": 6}));

    let res = client.health().await.unwrap();
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["rust_backend"]["status"], "healthy");

    let res = client.stats().await.unwrap();
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["stats"]["uptime_seconds"], 42);

    assert_eq!(backend.calls(), 3);
    shutdown.trigger();
}

#[tokio::test]
async fn backend_down_maps_to_distinct_errors() {
    let url = common::unreachable_backend_url().await;
    let (addr, shutdown) = common::start_gateway(&url).await;
    let client = client_for(addr);

    let res = client.health().await.unwrap();
    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["error"], "Rust backend is not available");

    let res = client.stats().await.unwrap();
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "Failed to get Rust backend stats");

    let res = client
        .process(&ProcessRequest {
            data: vec![4, 2],
            operation: "sort".into(),
        })
        .await
        .unwrap();
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["error"], "Failed to process data");

    shutdown.trigger();
}

#[tokio::test]
async fn oversized_body_over_tcp_is_json_validation_error() {
    let backend = common::start_healthy_backend().await;
    let mut config = compute_gateway::GatewayConfig::default();
    config.backend.base_url = backend.url();
    config.security.max_body_size = 64;
    let (addr, shutdown) = common::start_gateway_with(config).await;
    let client = client_for(addr);

    let res = client
        .process(&ProcessRequest {
            data: (0..100).collect(),
            operation: "sum".into(),
        })
        .await
        .unwrap();

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Invalid request body");
    assert!(res.body["details"].as_str().is_some_and(|d| !d.is_empty()));
    assert_eq!(backend.calls(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn stops_accepting_after_shutdown() {
    let backend = common::start_healthy_backend().await;
    let (addr, shutdown) = common::start_gateway(&backend.url()).await;
    let client = client_for(addr);

    assert_eq!(client.health().await.unwrap().status, StatusCode::OK);

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(client.health().await.is_err());
}
