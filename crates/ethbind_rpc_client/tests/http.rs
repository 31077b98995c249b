use std::time::Duration;

use ethbind_rpc_client::{
    HeaderMap, HttpConfig, HttpRequestManager, RequestManager, RetryConfig, RpcClientError,
    TransportOptions, header::HeaderValue, jsonrpc,
};
use reqwest::StatusCode;
use serde_json::json;

fn manager(url: &str) -> HttpRequestManager {
    let config = HttpConfig {
        retry: RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        },
        ..HttpConfig::new(url)
    };

    HttpRequestManager::new(config).expect("url ok")
}

fn block_number_call() -> jsonrpc::MethodCall {
    jsonrpc::MethodCall {
        method: "eth_blockNumber".into(),
        params: Vec::new(),
    }
}

#[tokio::test]
async fn send_request_body_400_status() {
    const STATUS_CODE: u16 = 400;

    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(STATUS_CODE.into())
        .with_header("content-type", "text/plain")
        .create_async()
        .await;

    let error = manager(&server.url())
        .send(block_number_call(), &TransportOptions::default())
        .await
        .expect_err("should have failed to due to a HTTP status error");

    if let RpcClientError::HttpStatus(error) = error {
        assert_eq!(
            error.status(),
            Some(StatusCode::from_u16(STATUS_CODE).unwrap())
        );
    } else {
        unreachable!("Invalid error: {error}");
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn transient_failures_are_retried() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(503)
        // The first attempt and two retries
        .expect(3)
        .create_async()
        .await;

    let config = HttpConfig {
        retry: RetryConfig {
            min_interval_ms: 1,
            max_interval_ms: 1,
            max_retries: 2,
        },
        ..HttpConfig::new(server.url())
    };
    let error = HttpRequestManager::new(config)
        .expect("url ok")
        .send(block_number_call(), &TransportOptions::default())
        .await
        .expect_err("every attempt is unavailable");

    if let RpcClientError::HttpStatus(error) = error {
        assert_eq!(error.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    } else {
        unreachable!("Invalid error: {error}");
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn success_response() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(json!({
            "jsonrpc": "2.0",
            "method": "eth_blockNumber",
            "params": [],
            "id": 0,
        })))
        .with_body(r#"{"jsonrpc":"2.0","id":0,"result":"0x10d4f"}"#)
        .create_async()
        .await;

    let response = manager(&server.url())
        .send(block_number_call(), &TransportOptions::default())
        .await?;

    assert_eq!(response.id, jsonrpc::Id::Num(0));
    assert_eq!(response.data.into_result(), Ok(json!("0x10d4f")));

    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn error_response_is_not_a_transport_error() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_body(
            r#"{"jsonrpc":"2.0","id":0,"error":{"code":-32000,"message":"header not found"}}"#,
        )
        .create_async()
        .await;

    let response = manager(&server.url())
        .send(block_number_call(), &TransportOptions::default())
        .await?;

    assert_eq!(
        response.data.into_result(),
        Err(jsonrpc::Error::new(-32000, "header not found"))
    );

    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn mismatched_id() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_body(r#"{"jsonrpc":"2.0","id":42,"result":"0x1"}"#)
        .create_async()
        .await;

    let error = manager(&server.url())
        .send(block_number_call(), &TransportOptions::default())
        .await
        .expect_err("id doesn't match the request");

    assert!(matches!(
        error,
        RpcClientError::InvalidId {
            id: jsonrpc::Id::Num(42),
            ..
        }
    ));

    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_response() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_body("not json")
        .create_async()
        .await;

    let error = manager(&server.url())
        .send(block_number_call(), &TransportOptions::default())
        .await
        .expect_err("response is not JSON");

    assert!(matches!(error, RpcClientError::InvalidResponse { .. }));

    mock.assert_async().await;
}

#[tokio::test]
async fn per_call_headers_and_subscription() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_header("x-request-tag", "balance")
        .with_body(r#"{"jsonrpc":"2.0","id":0,"result":null}"#)
        .create_async()
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("x-request-tag", HeaderValue::from_static("balance"));
    let options = TransportOptions {
        headers: Some(headers),
        timeout: Some(Duration::from_secs(5)),
    };

    let handle = manager(&server.url())
        .subscribe(block_number_call(), &options)
        .await?;
    assert_eq!(handle.id(), &jsonrpc::Id::Num(0));

    let response = handle.response().await?;
    assert_eq!(response.data.into_result(), Ok(serde_json::Value::Null));

    mock.assert_async().await;

    Ok(())
}
