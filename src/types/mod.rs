/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed enums, models, and request structs for API communication
[POS]:    Data layer - module wiring
[UPDATE]: When API schema changes or new types added
*/

pub mod enums;
pub mod models;
pub mod requests;

pub use enums::{
    AddressStatus, CandleInterval, CurrencyStatus, DepositStatus, Direction, MarketStatus,
    OrderStatus, OrderType, TakerSide, TimeInForce, WithdrawalStatus,
};
pub use models::{
    Address, Balance, Candle, Currency, Deposit, Market, MarketSummary, Order, OrderBook,
    OrderBookEntry, Ticker, Trade, Withdrawal,
};
pub use requests::{NewAddressRequest, NewOrderRequest, NewWithdrawalRequest};
