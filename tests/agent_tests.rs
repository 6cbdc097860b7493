use gas_trigger::*;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn temp_config_path(tag: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_nanos();
    std::env::temp_dir().join(format!("gas_trigger_{tag}_{}_{nanos}.json", std::process::id()))
}

fn config_json(node: &MockServer, oracle: &MockServer, gas_price: i64) -> String {
    json!({
        "eth_node_url": node.uri(),
        "gas_station_url": format!("{}/gas", oracle.uri()),
        "gas_priced_transactions": [ { "gas_price": gas_price, "signed_txs": ["0xAA"] } ]
    }).to_string()
}

#[tokio::test]
async fn test_start_fails_without_config() {
    let source = FileConfigSource::new(temp_config_path("missing"));
    let err = Agent::start(source, AgentSettings::default()).await.err().expect("should err");
    assert!(matches!(err, GasTriggerError::Config(_)));
}

#[tokio::test]
async fn test_file_source_survives_deleted_file() {
    let node = MockServer::start().await;
    let oracle = MockServer::start().await;
    let file = temp_config_path("deleted");
    std::fs::write(&file, config_json(&node, &oracle, 50)).unwrap();

    let source = FileConfigSource::new(&file);
    let loaded = source.load().await.expect("initial load");
    assert_eq!(loaded.gas_priced_transactions[0].signed_txs, vec!["0xAA".to_string()]);

    std::fs::remove_file(&file).unwrap();
    let err = source.load().await.err().expect("file is gone");
    assert!(matches!(err, GasTriggerError::Config(_)));
}

#[tokio::test]
async fn test_agent_broadcasts_once_price_is_cheap_enough() {
    let node = MockServer::start().await;
    let oracle = MockServer::start().await;

    // average 400 -> tier 40, below the threshold of 50
    Mock::given(method("GET")).and(path("/gas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fast": 600, "fastest": 800, "safeLow": 300, "average": 400
        })))
        .mount(&oracle).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "eth_sendRawTransaction", "params": ["0xAA"] })))
        .respond_with(|request: &Request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": body["id"],
                "result": "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b"
            }))
        })
        .expect(1)
        .mount(&node).await;

    let file = temp_config_path("agent");
    std::fs::write(&file, config_json(&node, &oracle, 50)).unwrap();

    let settings = AgentSettings {
        poll_interval: Duration::from_millis(50),
        price_interval: Duration::from_millis(50),
        price_fetch_timeout: Duration::from_secs(2),
        rpc_call_timeout: Duration::from_secs(2),
    };
    let agent = Agent::start(FileConfigSource::new(&file), settings).await.expect("agent starts");

    let shutdown = CancellationToken::new();
    let task = tokio::spawn(agent.run(shutdown.clone()));

    // several cycles, including one with the file gone
    tokio::time::sleep(Duration::from_millis(250)).await;
    std::fs::remove_file(&file).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(2), task).await
        .expect("agent stops after cancel")
        .expect("agent task did not panic");
}
