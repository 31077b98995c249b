use std::str::FromStr;

use alloy_primitives::{Address, B256};
use assert_json_diff::assert_json_eq;
use ethbind_rpc_client::{HttpConfig, RetryConfig, RpcClientError};
use ethbind_rpc_eth::{BlockSpec, ClientConfig, EthClient, EthClientError, Representation};
use mockito::Matcher;
use serde_json::json;

fn test_client(
    url: &str,
    config: ClientConfig,
) -> EthClient<ethbind_rpc_client::HttpRequestManager> {
    let http = HttpConfig {
        retry: RetryConfig {
            max_retries: 0,
            ..RetryConfig::default()
        },
        ..HttpConfig::new(url)
    };

    EthClient::with_http(http, config).expect("url ok")
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

    let hash = B256::from_str("0xc008e9f9bb92057dd0035496fbf4fb54f66b4b18b370928e46d6603933022222")
        .expect("failed to parse hash from string");

    let error = test_client(&server.url(), ClientConfig::default())
        .get_transaction(hash)
        .await
        .expect_err("should have failed to due to a HTTP status error");

    if let EthClientError::Transport {
        method,
        source: RpcClientError::HttpStatus(error),
    } = error
    {
        assert_eq!(method, "eth_getTransactionByHash");
        assert_eq!(error.status().map(|status| status.as_u16()), Some(STATUS_CODE));
    } else {
        unreachable!("Invalid error: {error}");
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn json_rpc_error_is_a_protocol_error() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_body(
            r#"{"jsonrpc":"2.0","id":0,"error":{"code":-32602,"message":"invalid argument 0","data":"0x"}}"#,
        )
        .create_async()
        .await;

    let error = test_client(&server.url(), ClientConfig::default())
        .get_balance(Address::ZERO, None)
        .await
        .expect_err("node rejected the call");

    let rpc_error = error.rpc_error().expect("protocol error");
    assert_eq!(rpc_error.code, -32602);
    assert_eq!(rpc_error.data, Some(json!("0x")));

    mock.assert_async().await;
}

#[tokio::test]
async fn get_balance_sends_get_balance() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getBalance",
            "params": [serde_json::to_value(Address::ZERO)?, "0x64"],
        })))
        .with_body(r#"{"jsonrpc":"2.0","id":0,"result":"0xde0b6b3a7640000"}"#)
        .create_async()
        .await;

    let balance = test_client(&server.url(), ClientConfig::default())
        .get_balance(Address::ZERO, Some(BlockSpec::Number(100)))
        .representation(Representation::Decimal)
        .await?;

    assert_eq!(balance, json!("1000000000000000000"));

    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn receipt_with_logs() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_body(
            json!({
                "jsonrpc": "2.0",
                "id": 0,
                "result": {
                    "blockNumber": "0xf5c6a0",
                    "transactionIndex": "0x2",
                    "cumulativeGasUsed": "0x1a3b4",
                    "gasUsed": "0x5208",
                    "effectiveGasPrice": "0x3b9aca00",
                    "status": "0x1",
                    "logs": [
                        {
                            "blockNumber": "0xf5c6a0",
                            "transactionIndex": "0x2",
                            "logIndex": "0x7",
                            "topics": [],
                            "data": "0x",
                        }
                    ],
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let config = ClientConfig {
        default_representation: Representation::Number,
        ..ClientConfig::default()
    };
    let receipt = test_client(&server.url(), config)
        .get_transaction_receipt(B256::ZERO)
        .await?;

    assert_json_eq!(
        receipt,
        json!({
            "blockNumber": 16107168,
            "transactionIndex": 2,
            "cumulativeGasUsed": 107444,
            "gasUsed": 21000,
            "effectiveGasPrice": 1000000000,
            "status": "0x1",
            "logs": [
                {
                    "blockNumber": 16107168,
                    "transactionIndex": 2,
                    "logIndex": 7,
                    "topics": [],
                    "data": "0x",
                }
            ],
        })
    );

    mock.assert_async().await;

    Ok(())
}

#[tokio::test]
async fn subscribe_over_http() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "method": "net_version" })))
        .with_body(r#"{"jsonrpc":"2.0","id":0,"result":"1"}"#)
        .create_async()
        .await;

    let client = test_client(&server.url(), ClientConfig::default());
    let pending = client
        .network_id()
        .representation(Representation::Hex)
        .subscribe()
        .await?;

    assert_eq!(pending.result().await?, json!("0x1"));

    mock.assert_async().await;

    Ok(())
}

#[cfg(feature = "test-remote")]
mod remote {
    use ethbind_rpc_eth::BlockTag;
    use ethbind_test_utils::env::json_rpc_url;

    use super::*;

    #[tokio::test]
    async fn chain_id_is_mainnet() -> anyhow::Result<()> {
        let client = test_client(&json_rpc_url(), ClientConfig::default());

        let chain_id = client.chain_id().representation(Representation::Number).await?;
        assert_eq!(chain_id, json!(1));

        Ok(())
    }

    #[tokio::test]
    async fn get_block_by_hash_some() -> anyhow::Result<()> {
        let hash =
            B256::from_str("0x71d5e7c8ff9ea737034c16e333a75575a4a94d29482e0c2b88f0a6a8369c1812")?;

        let block = test_client(&json_rpc_url(), ClientConfig::default())
            .get_block(hash, false)
            .representation(Representation::Number)
            .await?;

        assert_eq!(block["hash"], json!(hash));
        assert_eq!(block["number"], json!(16_222_385));
        assert_eq!(block["transactions"].as_array().map(Vec::len), Some(192));

        Ok(())
    }

    #[tokio::test]
    async fn get_block_unknown_number() -> anyhow::Result<()> {
        let block = test_client(&json_rpc_url(), ClientConfig::default())
            .get_block(u64::MAX >> 1, false)
            .await?;

        assert!(block.is_null());

        Ok(())
    }

    #[tokio::test]
    async fn dai_balance_at_finalized_block() -> anyhow::Result<()> {
        let dai_address = Address::from_str("0x6b175474e89094c44da98b954eedeac495271d0f")?;

        let balance = test_client(&json_rpc_url(), ClientConfig::default())
            .get_balance(dai_address, Some(BlockSpec::Tag(BlockTag::Finalized)))
            .representation(Representation::Decimal)
            .await?;

        assert!(balance.is_string());

        Ok(())
    }
}
