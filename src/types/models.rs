/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    AddressStatus, CurrencyStatus, DepositStatus, Direction, MarketStatus, OrderStatus, OrderType,
    TakerSide, TimeInForce, WithdrawalStatus,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub symbol: String,
    pub base_currency_symbol: String,
    pub quote_currency_symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub min_trade_size: Decimal,
    pub precision: u32,
    pub status: MarketStatus,
    #[serde(with = "serde_helpers::utc")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub notice: String,
    #[serde(default)]
    pub prohibited_in: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub symbol: String,
    pub name: String,
    pub coin_type: String,
    pub status: CurrencyStatus,
    pub min_confirmations: u32,
    #[serde(default)]
    pub notice: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub tx_fee: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_address: Option<String>,
    #[serde(default)]
    pub prohibited_in: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub last_trade_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub bid_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ask_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub quote_volume: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub percent_change: Option<Decimal>,
    #[serde(with = "serde_helpers::utc")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    #[serde(with = "serde_helpers::utc")]
    pub executed_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    pub taker_side: TakerSide,
}

/// One resting price level of an order book side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookEntry {
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub bid: Vec<OrderBookEntry>,
    pub ask: Vec<OrderBookEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    #[serde(with = "serde_helpers::utc")]
    pub starts_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::str")]
    pub open: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub close: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub quote_volume: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub market_symbol: String,
    pub direction: Direction,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ceiling: Option<Decimal>,
    pub time_in_force: TimeInForce,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub fill_quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub proceeds: Decimal,
    pub status: OrderStatus,
    #[serde(with = "serde_helpers::utc")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "serde_helpers::utc_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "serde_helpers::utc_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub currency_symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub available: Decimal,
    #[serde(with = "serde_helpers::utc")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub status: AddressStatus,
    pub currency_symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_address_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: String,
    pub currency_symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    pub crypto_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_address_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    #[serde(default)]
    pub confirmations: u32,
    #[serde(with = "serde_helpers::utc")]
    pub updated_at: DateTime<Utc>,
    #[serde(
        default,
        with = "serde_helpers::utc_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
    pub status: DepositStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: String,
    pub currency_symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    pub crypto_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_address_tag: Option<String>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub tx_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    pub status: WithdrawalStatus,
    #[serde(with = "serde_helpers::utc")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "serde_helpers::utc_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<DateTime<Utc>>,
}

pub(crate) mod serde_helpers {
    use chrono::{DateTime, NaiveDateTime, Utc};

    // The exchange emits naive timestamps on some endpoints; treat those as UTC.
    fn parse_utc(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        if let Ok(with_zone) = DateTime::parse_from_rfc3339(raw) {
            return Ok(with_zone.with_timezone(&Utc));
        }
        raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc())
    }

    pub mod utc {
        use chrono::{DateTime, SecondsFormat, Utc};
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = String::deserialize(deserializer)?;
            super::parse_utc(&raw).map_err(serde::de::Error::custom)
        }

        pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            value
                .to_rfc3339_opts(SecondsFormat::Millis, true)
                .serialize(serializer)
        }
    }

    pub mod utc_option {
        use chrono::{DateTime, SecondsFormat, Utc};
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw {
                Some(value) if !value.is_empty() => super::parse_utc(&value)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }

        pub fn serialize<S>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            value
                .as_ref()
                .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true))
                .serialize(serializer)
        }
    }
}
