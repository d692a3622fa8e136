/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod error;
pub mod public;
pub mod signature;
pub mod trade;

pub use error::{BittrexError, Result};
pub use signature::RequestSigner;

pub use client::{BittrexClient, ClientConfig, Credentials};
