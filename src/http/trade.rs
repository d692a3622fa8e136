/*
[INPUT]:  Typed order requests with signing headers
[OUTPUT]: Order placement, cancellation, and history
[POS]:    HTTP layer - trading endpoints (require signed requests)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use reqwest::Method;
use rust_decimal::Decimal;

use crate::http::client::require_param;
use crate::http::error::BittrexError;
use crate::http::{BittrexClient, Result};
use crate::types::{Direction, NewOrderRequest, Order, OrderType, TimeInForce};

impl BittrexClient {
    /// Place an order. Field rules are validated locally before signing.
    ///
    /// POST /orders
    pub async fn place_order(&self, request: NewOrderRequest) -> Result<Order> {
        request.validate()?;
        let body = serde_json::to_string(&request)?;
        self.send_signed(Method::POST, "orders", &[], Some(body)).await
    }

    /// Place a limit buy. Time-in-force must be GTC or IOC.
    pub async fn buy_limit(
        &self,
        market_symbol: &str,
        quantity: Decimal,
        rate: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<Order> {
        self.limit_order(Direction::Buy, market_symbol, quantity, rate, time_in_force)
            .await
    }

    /// Place a limit sell. Time-in-force must be GTC or IOC.
    pub async fn sell_limit(
        &self,
        market_symbol: &str,
        quantity: Decimal,
        rate: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<Order> {
        self.limit_order(Direction::Sell, market_symbol, quantity, rate, time_in_force)
            .await
    }

    async fn limit_order(
        &self,
        direction: Direction,
        market_symbol: &str,
        quantity: Decimal,
        rate: Decimal,
        time_in_force: TimeInForce,
    ) -> Result<Order> {
        if !matches!(
            time_in_force,
            TimeInForce::GoodTilCancelled | TimeInForce::ImmediateOrCancel
        ) {
            return Err(BittrexError::invalid_argument(
                "timeInForce must be GOOD_TIL_CANCELLED or IMMEDIATE_OR_CANCEL for limit orders",
            ));
        }
        self.place_order(NewOrderRequest {
            market_symbol: market_symbol.to_string(),
            direction,
            order_type: OrderType::Limit,
            quantity: Some(quantity),
            ceiling: None,
            limit: Some(rate),
            time_in_force,
            client_order_id: None,
            use_awards: None,
        })
        .await
    }

    /// Cancel an order; the exchange returns its final state.
    ///
    /// DELETE /orders/{orderId}
    pub async fn cancel_order(&self, order_id: &str) -> Result<Order> {
        require_param("orderId", order_id)?;
        self.send_signed(Method::DELETE, &format!("orders/{order_id}"), &[], None)
            .await
    }

    /// Get a single order
    ///
    /// GET /orders/{orderId}
    pub async fn get_order(&self, order_id: &str) -> Result<Order> {
        require_param("orderId", order_id)?;
        self.get_signed(&format!("orders/{order_id}"), &[]).await
    }

    /// List open orders, optionally filtered by market
    ///
    /// GET /orders/open?marketSymbol={marketSymbol}
    pub async fn list_open_orders(&self, market_symbol: Option<&str>) -> Result<Vec<Order>> {
        self.get_signed(
            "orders/open",
            &[("marketSymbol", market_symbol.map(str::to_string))],
        )
        .await
    }

    /// List closed orders, optionally filtered by market
    ///
    /// GET /orders/closed?marketSymbol={marketSymbol}
    pub async fn list_order_history(&self, market_symbol: Option<&str>) -> Result<Vec<Order>> {
        self.get_signed(
            "orders/closed",
            &[("marketSymbol", market_symbol.map(str::to_string))],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{BittrexClient, BittrexError, ClientConfig, Credentials};
    use crate::types::{Direction, NewOrderRequest, OrderType, TimeInForce};
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn signed_client_for(server: &MockServer) -> BittrexClient {
        let mut client =
            BittrexClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
                .expect("client init");
        client.set_credentials(Credentials {
            api_key: "test-key".to_string(),
            api_secret: "test-secret".to_string(),
        });
        client
    }

    fn limit_sell(quantity: &str) -> NewOrderRequest {
        NewOrderRequest {
            market_symbol: "BTC-USD".to_string(),
            direction: Direction::Sell,
            order_type: OrderType::Limit,
            quantity: Some(quantity.parse().expect("quantity")),
            ceiling: None,
            limit: Some("35000".parse().expect("limit")),
            time_in_force: TimeInForce::GoodTilCancelled,
            client_order_id: None,
            use_awards: None,
        }
    }

    #[tokio::test]
    async fn test_place_order_sends_signing_headers() {
        let server = MockServer::start().await;
        let mock_response = r#"{
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

        Mock::given(method("POST"))
            .and(path("/orders"))
            .and(header_exists("Api-Key"))
            .and(header_exists("Api-Timestamp"))
            .and(header_exists("Api-Content-Hash"))
            .and(header_exists("Api-Signature"))
            .and(body_string_contains("\"marketSymbol\":\"BTC-USD\""))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_client_for(&server).await;
        let order = client
            .place_order(limit_sell("1.5"))
            .await
            .expect("place_order failed");

        assert_eq!(order.market_symbol, "BTC-USD");
        assert_eq!(order.direction, Direction::Sell);
        assert_eq!(order.closed_at, None);
    }

    #[tokio::test]
    async fn test_insufficient_funds_surfaces_exchange_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orders"))
            .respond_with(
                ResponseTemplate::new(400)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(r#"{"code": "INSUFFICIENT_FUNDS"}"#, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_client_for(&server).await;
        let err = client
            .place_order(limit_sell("10000"))
            .await
            .expect_err("oversized sell should fail");

        assert_eq!(err.exchange_code(), Some("INSUFFICIENT_FUNDS"));
    }

    #[tokio::test]
    async fn test_invalid_order_fails_before_network() {
        let server = MockServer::start().await;
        let client = signed_client_for(&server).await;

        let mut request = limit_sell("1.5");
        request.limit = None;
        let err = client
            .place_order(request)
            .await
            .expect_err("limit order without limit price");
        assert!(matches!(err, BittrexError::InvalidArgument(_)));
        assert!(server.received_requests().await.expect("requests").is_empty());
    }

    #[tokio::test]
    async fn test_limit_helpers_reject_fill_or_kill() {
        let server = MockServer::start().await;
        let client = signed_client_for(&server).await;

        let err = client
            .buy_limit(
                "BTC-USD",
                "1".parse().expect("quantity"),
                "35000".parse().expect("rate"),
                TimeInForce::FillOrKill,
            )
            .await
            .expect_err("FOK is not allowed through the limit helpers");
        assert!(matches!(err, BittrexError::InvalidArgument(_)));
        assert!(server.received_requests().await.expect("requests").is_empty());
    }

    #[tokio::test]
    async fn test_trading_requires_credentials() {
        let server = MockServer::start().await;
        let client = BittrexClient::with_config_and_base_url(
            ClientConfig::default(),
            &server.uri(),
        )
        .expect("client init");

        let err = client
            .list_open_orders(None)
            .await
            .expect_err("no credentials");
        assert!(matches!(err, BittrexError::MissingCredentials));
        assert!(server.received_requests().await.expect("requests").is_empty());
    }

    #[tokio::test]
    async fn test_cancel_order() {
        let server = MockServer::start().await;
        let mock_response = r#"{
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
            "status": "CLOSED",
            "createdAt": "2021-06-01T10:00:00Z",
            "closedAt": "2021-06-01T10:05:00Z"
        }"#;

        Mock::given(method("DELETE"))
            .and(path("/orders/8f16f454-3f2c-4e33-9d92-152b62cd0c70"))
            .and(header_exists("Api-Signature"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_client_for(&server).await;
        let order = client
            .cancel_order("8f16f454-3f2c-4e33-9d92-152b62cd0c70")
            .await
            .expect("cancel_order failed");

        assert!(order.closed_at.is_some());
    }
}
