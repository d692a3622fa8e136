/*
[INPUT]:  Market and currency identifiers plus query parameters
[OUTPUT]: Market data (markets, tickers, trades, order books, candles)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::client::require_param;
use crate::http::{BittrexClient, Result};
use crate::http::error::BittrexError;
use crate::types::{
    Candle, CandleInterval, Currency, Market, MarketSummary, OrderBook, Ticker, Trade,
};

/// Depth values accepted by the order-book endpoint
const ORDER_BOOK_DEPTHS: [u32; 3] = [1, 25, 500];

impl BittrexClient {
    /// List all markets
    ///
    /// GET /markets
    pub async fn list_markets(&self) -> Result<Vec<Market>> {
        self.get_public("markets", &[]).await
    }

    /// Get a single market
    ///
    /// GET /markets/{marketSymbol}
    pub async fn get_market(&self, market_symbol: &str) -> Result<Market> {
        require_param("marketSymbol", market_symbol)?;
        self.get_public(&format!("markets/{market_symbol}"), &[]).await
    }

    /// List all currencies
    ///
    /// GET /currencies
    pub async fn list_currencies(&self) -> Result<Vec<Currency>> {
        self.get_public("currencies", &[]).await
    }

    /// Get a single currency
    ///
    /// GET /currencies/{currencySymbol}
    pub async fn get_currency(&self, currency_symbol: &str) -> Result<Currency> {
        require_param("currencySymbol", currency_symbol)?;
        self.get_public(&format!("currencies/{currency_symbol}"), &[])
            .await
    }

    /// Get the ticker for every market
    ///
    /// GET /markets/tickers
    pub async fn list_tickers(&self) -> Result<Vec<Ticker>> {
        self.get_public("markets/tickers", &[]).await
    }

    /// Get the ticker for a single market
    ///
    /// GET /markets/{marketSymbol}/ticker
    pub async fn get_ticker(&self, market_symbol: &str) -> Result<Ticker> {
        require_param("marketSymbol", market_symbol)?;
        self.get_public(&format!("markets/{market_symbol}/ticker"), &[])
            .await
    }

    /// List 24h summaries for every market
    ///
    /// GET /markets/summaries
    pub async fn list_market_summaries(&self) -> Result<Vec<MarketSummary>> {
        self.get_public("markets/summaries", &[]).await
    }

    /// Get the 24h summary for a single market
    ///
    /// GET /markets/{marketSymbol}/summary
    pub async fn get_market_summary(&self, market_symbol: &str) -> Result<MarketSummary> {
        require_param("marketSymbol", market_symbol)?;
        self.get_public(&format!("markets/{market_symbol}/summary"), &[])
            .await
    }

    /// Get recent trades for a market
    ///
    /// GET /markets/{marketSymbol}/trades
    pub async fn list_trades(&self, market_symbol: &str) -> Result<Vec<Trade>> {
        require_param("marketSymbol", market_symbol)?;
        self.get_public(&format!("markets/{market_symbol}/trades"), &[])
            .await
    }

    /// Get the order book for a market, truncated to `depth` levels per side
    ///
    /// GET /markets/{marketSymbol}/orderbook?depth={depth}
    pub async fn get_order_book(&self, market_symbol: &str, depth: u32) -> Result<OrderBook> {
        require_param("marketSymbol", market_symbol)?;
        if !ORDER_BOOK_DEPTHS.contains(&depth) {
            return Err(BittrexError::invalid_argument(format!(
                "depth must be one of {ORDER_BOOK_DEPTHS:?}, got {depth}"
            )));
        }
        self.get_public(
            &format!("markets/{market_symbol}/orderbook"),
            &[("depth", Some(depth.to_string()))],
        )
        .await
    }

    /// Get recent candles for a market
    ///
    /// GET /markets/{marketSymbol}/candles/{candleInterval}/recent
    pub async fn list_recent_candles(
        &self,
        market_symbol: &str,
        interval: CandleInterval,
    ) -> Result<Vec<Candle>> {
        require_param("marketSymbol", market_symbol)?;
        self.get_public(
            &format!(
                "markets/{market_symbol}/candles/{}/recent",
                interval.as_str()
            ),
            &[],
        )
        .await
    }

    /// Get historical candles for a calendar period.
    ///
    /// `day` is the day of month and requires `month`; the period granularity
    /// the exchange expects depends on the interval (day-level for minute
    /// candles, month-level for hourly, year-level for daily).
    ///
    /// GET /markets/{marketSymbol}/candles/{candleInterval}/historical/{year}[/{month}[/{day}]]
    pub async fn list_historical_candles(
        &self,
        market_symbol: &str,
        interval: CandleInterval,
        year: i32,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<Vec<Candle>> {
        require_param("marketSymbol", market_symbol)?;
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(BittrexError::invalid_argument(format!(
                    "month must be in 1..=12, got {month}"
                )));
            }
        }
        if let Some(day) = day {
            if month.is_none() {
                return Err(BittrexError::invalid_argument(
                    "day requires month to be set",
                ));
            }
            if !(1..=31).contains(&day) {
                return Err(BittrexError::invalid_argument(format!(
                    "day must be in 1..=31, got {day}"
                )));
            }
        }

        let mut path = format!(
            "markets/{market_symbol}/candles/{}/historical/{year}",
            interval.as_str()
        );
        if let Some(month) = month {
            path.push_str(&format!("/{month}"));
            if let Some(day) = day {
                path.push_str(&format!("/{day}"));
            }
        }
        self.get_public(&path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{BittrexClient, BittrexError, ClientConfig};
    use crate::types::{CandleInterval, OrderBook, OrderBookEntry, Ticker};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> BittrexClient {
        BittrexClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    #[tokio::test]
    async fn test_get_ticker() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "symbol": "BTC-USD",
            "lastTradeRate": "34988.12",
            "bidRate": "34987.00",
            "askRate": "34990.55"
        }"#;

        Mock::given(method("GET"))
            .and(path("/markets/BTC-USD/ticker"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let ticker = client.get_ticker("BTC-USD").await.expect("get_ticker failed");

        let expected = Ticker {
            symbol: "BTC-USD".to_string(),
            last_trade_rate: "34988.12".parse().expect("last_trade_rate"),
            bid_rate: "34987.00".parse().expect("bid_rate"),
            ask_rate: "34990.55".parse().expect("ask_rate"),
        };
        assert_eq!(ticker, expected);
        assert!(ticker.bid_rate > rust_decimal::Decimal::ZERO);
        assert!(ticker.ask_rate > rust_decimal::Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_get_order_book_depth_one() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "bid": [{"quantity": "1.2", "rate": "34987.00"}],
            "ask": [{"quantity": "0.8", "rate": "34990.55"}]
        }"#;

        Mock::given(method("GET"))
            .and(path("/markets/BTC-USD/orderbook"))
            .and(query_param("depth", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let book = client
            .get_order_book("BTC-USD", 1)
            .await
            .expect("get_order_book failed");

        let expected = OrderBook {
            bid: vec![OrderBookEntry {
                quantity: "1.2".parse().expect("bid quantity"),
                rate: "34987.00".parse().expect("bid rate"),
            }],
            ask: vec![OrderBookEntry {
                quantity: "0.8".parse().expect("ask quantity"),
                rate: "34990.55".parse().expect("ask rate"),
            }],
        };
        assert_eq!(book, expected);
        assert!(book.bid.len() <= 1);
        assert!(book.ask.len() <= 1);
    }

    #[tokio::test]
    async fn test_get_order_book_rejects_unsupported_depth() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        let err = client
            .get_order_book("BTC-USD", 7)
            .await
            .expect_err("depth 7 should be rejected");
        assert!(matches!(err, BittrexError::InvalidArgument(_)));
        assert!(server.received_requests().await.expect("requests").is_empty());
    }

    #[tokio::test]
    async fn test_missing_symbol_fails_before_network() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        let err = client.get_ticker("").await.expect_err("empty symbol");
        assert!(matches!(err, BittrexError::InvalidArgument(_)));

        let err = client.list_trades("  ").await.expect_err("blank symbol");
        assert!(matches!(err, BittrexError::InvalidArgument(_)));

        assert!(server.received_requests().await.expect("requests").is_empty());
    }

    #[tokio::test]
    async fn test_list_recent_candles() {
        let server = MockServer::start().await;
        let mock_response = r#"[
            {
                "startsAt": "2021-06-01T10:00:00Z",
                "open": "34000", "high": "34100", "low": "33900", "close": "34050",
                "volume": "12.5", "quoteVolume": "425000.1"
            }
        ]"#;

        Mock::given(method("GET"))
            .and(path("/markets/BTC-USD/candles/MINUTE_1/recent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let candles = client
            .list_recent_candles("BTC-USD", CandleInterval::Minute1)
            .await
            .expect("list_recent_candles failed");

        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].close, "34050".parse().expect("close"));
    }

    #[tokio::test]
    async fn test_historical_candles_path_uses_day_of_month() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markets/BTC-USD/candles/MINUTE_5/historical/2021/6/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_raw("[]", "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let candles = client
            .list_historical_candles("BTC-USD", CandleInterval::Minute5, 2021, Some(6), Some(1))
            .await
            .expect("list_historical_candles failed");
        assert!(candles.is_empty());
    }

    #[tokio::test]
    async fn test_historical_candles_rejects_day_without_month() {
        let server = MockServer::start().await;
        let client = client_for(&server).await;

        let err = client
            .list_historical_candles("BTC-USD", CandleInterval::Minute5, 2021, None, Some(15))
            .await
            .expect_err("day without month");
        assert!(matches!(err, BittrexError::InvalidArgument(_)));

        let err = client
            .list_historical_candles("BTC-USD", CandleInterval::Minute5, 2021, Some(13), None)
            .await
            .expect_err("month out of range");
        assert!(matches!(err, BittrexError::InvalidArgument(_)));

        assert!(server.received_requests().await.expect("requests").is_empty());
    }
}
