/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::http::error::BittrexError;

use super::enums::{Direction, OrderType, TimeInForce};

/// Body of POST /orders.
///
/// Which price/size fields are required depends on the order type:
/// LIMIT takes quantity + limit, MARKET takes quantity only, and the
/// CEILING_* types take ceiling instead of quantity. `validate` enforces
/// those rules before the request is serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
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
    pub ceiling: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit: Option<Decimal>,
    pub time_in_force: TimeInForce,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_awards: Option<bool>,
}

impl NewOrderRequest {
    /// Check the type-dependent field rules without touching the network.
    pub fn validate(&self) -> Result<(), BittrexError> {
        if self.market_symbol.trim().is_empty() {
            return Err(BittrexError::invalid_argument("marketSymbol is required"));
        }

        match self.order_type {
            OrderType::Limit => {
                self.require("quantity", self.quantity.is_some())?;
                self.require("limit", self.limit.is_some())?;
                self.forbid("ceiling", self.ceiling.is_some())?;
            }
            OrderType::Market => {
                self.require("quantity", self.quantity.is_some())?;
                self.forbid("limit", self.limit.is_some())?;
                self.forbid("ceiling", self.ceiling.is_some())?;
            }
            OrderType::CeilingLimit => {
                self.require("ceiling", self.ceiling.is_some())?;
                self.require("limit", self.limit.is_some())?;
                self.forbid("quantity", self.quantity.is_some())?;
            }
            OrderType::CeilingMarket => {
                self.require("ceiling", self.ceiling.is_some())?;
                self.forbid("quantity", self.quantity.is_some())?;
                self.forbid("limit", self.limit.is_some())?;
            }
        }

        Ok(())
    }

    fn require(&self, field: &str, present: bool) -> Result<(), BittrexError> {
        if present {
            Ok(())
        } else {
            Err(BittrexError::invalid_argument(format!(
                "{field} is required for {:?} orders",
                self.order_type
            )))
        }
    }

    fn forbid(&self, field: &str, present: bool) -> Result<(), BittrexError> {
        if present {
            Err(BittrexError::invalid_argument(format!(
                "{field} is not allowed for {:?} orders",
                self.order_type
            )))
        } else {
            Ok(())
        }
    }
}

/// Body of POST /withdrawals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWithdrawalRequest {
    pub currency_symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    pub crypto_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_address_tag: Option<String>,
}

impl NewWithdrawalRequest {
    pub fn validate(&self) -> Result<(), BittrexError> {
        if self.currency_symbol.trim().is_empty() {
            return Err(BittrexError::invalid_argument("currencySymbol is required"));
        }
        if self.quantity <= Decimal::ZERO {
            return Err(BittrexError::invalid_argument("quantity must be positive"));
        }
        if self.crypto_address.trim().is_empty() {
            return Err(BittrexError::invalid_argument("cryptoAddress is required"));
        }
        Ok(())
    }
}

/// Body of POST /addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddressRequest {
    pub currency_symbol: String,
}
