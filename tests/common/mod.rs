/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for bittrex-adapter tests

use bittrex_adapter::{BittrexClient, ClientConfig, Credentials};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Credentials accepted by the mock server (nothing verifies them there)
pub fn test_credentials() -> Credentials {
    Credentials {
        api_key: "test-key".to_string(),
        api_secret: "test-secret".to_string(),
    }
}

/// Public-only client pointed at the mock server
pub fn public_client(server: &MockServer) -> BittrexClient {
    BittrexClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Authenticated client pointed at the mock server
pub fn signed_client(server: &MockServer) -> BittrexClient {
    let mut client = public_client(server);
    client.set_credentials(test_credentials());
    client
}

/// Canned ticker payload for BTC-USD
#[allow(dead_code)]
pub const TICKER_BTC_USD: &str = r#"{
    "symbol": "BTC-USD",
    "lastTradeRate": "34988.12",
    "bidRate": "34987.00",
    "askRate": "34990.55"
}"#;

/// Canned open order payload
#[allow(dead_code)]
pub const ORDER_OPEN: &str = r#"{
    "id": "8f16f454-3f2c-4e33-9d92-152b62cd0c70",
    "marketSymbol": "BTC-USD",
    "direction": "SELL",
    "type": "LIMIT",
    "quantity": "1.5",
    "limit": "35000",
    "timeInForce": "GOOD_TIL_CANCELLED",
    "fillQuantity": "0",
    "commission": "0",
    "proceeds": "0",
    "status": "OPEN",
    "createdAt": "2021-06-01T10:00:00Z"
}"#;
