/*
[INPUT]:  Query parameters with signing headers
[OUTPUT]: Account data (balances, addresses, deposits, withdrawals)
[POS]:    HTTP layer - account endpoints (require signed requests)
[UPDATE]: When adding new account endpoints or changing query parameters
*/

use reqwest::Method;

use crate::http::client::{enum_param, require_param};
use crate::http::{BittrexClient, Result};
use crate::types::{
    Address, Balance, Deposit, DepositStatus, NewAddressRequest, NewWithdrawalRequest, Withdrawal,
    WithdrawalStatus,
};

impl BittrexClient {
    /// List balances for every currency the account has touched
    ///
    /// GET /balances
    pub async fn list_balances(&self) -> Result<Vec<Balance>> {
        self.get_signed("balances", &[]).await
    }

    /// Get the balance for one currency
    ///
    /// GET /balances/{currencySymbol}
    pub async fn get_balance(&self, currency_symbol: &str) -> Result<Balance> {
        require_param("currencySymbol", currency_symbol)?;
        self.get_signed(&format!("balances/{currency_symbol}"), &[])
            .await
    }

    /// List deposit addresses that have been requested or provisioned
    ///
    /// GET /addresses
    pub async fn list_deposit_addresses(&self) -> Result<Vec<Address>> {
        self.get_signed("addresses", &[]).await
    }

    /// Get the deposit address for one currency
    ///
    /// GET /addresses/{currencySymbol}
    pub async fn get_deposit_address(&self, currency_symbol: &str) -> Result<Address> {
        require_param("currencySymbol", currency_symbol)?;
        self.get_signed(&format!("addresses/{currency_symbol}"), &[])
            .await
    }

    /// Request provisioning of a deposit address for a currency
    ///
    /// POST /addresses
    pub async fn create_deposit_address(&self, currency_symbol: &str) -> Result<Address> {
        require_param("currencySymbol", currency_symbol)?;
        let body = serde_json::to_string(&NewAddressRequest {
            currency_symbol: currency_symbol.to_string(),
        })?;
        self.send_signed(Method::POST, "addresses", &[], Some(body))
            .await
    }

    /// Request a withdrawal. Fields are validated locally before signing.
    ///
    /// POST /withdrawals
    pub async fn request_withdrawal(&self, request: NewWithdrawalRequest) -> Result<Withdrawal> {
        request.validate()?;
        let body = serde_json::to_string(&request)?;
        self.send_signed(Method::POST, "withdrawals", &[], Some(body))
            .await
    }

    /// List withdrawals that have not completed, optionally filtered by currency
    ///
    /// GET /withdrawals/open?currencySymbol={currencySymbol}
    pub async fn list_open_withdrawals(
        &self,
        currency_symbol: Option<&str>,
    ) -> Result<Vec<Withdrawal>> {
        self.get_signed(
            "withdrawals/open",
            &[("currencySymbol", currency_symbol.map(str::to_string))],
        )
        .await
    }

    /// List completed/cancelled withdrawals, optionally filtered by status
    ///
    /// GET /withdrawals/closed?status={status}
    pub async fn list_closed_withdrawals(
        &self,
        status: Option<WithdrawalStatus>,
    ) -> Result<Vec<Withdrawal>> {
        let status = match status {
            Some(status) => Some(enum_param(&status)?),
            None => None,
        };
        self.get_signed("withdrawals/closed", &[("status", status)])
            .await
    }

    /// List deposits still waiting for confirmations, optionally by currency
    ///
    /// GET /deposits/open?currencySymbol={currencySymbol}
    pub async fn list_open_deposits(
        &self,
        currency_symbol: Option<&str>,
    ) -> Result<Vec<Deposit>> {
        self.get_signed(
            "deposits/open",
            &[("currencySymbol", currency_symbol.map(str::to_string))],
        )
        .await
    }

    /// List credited or rejected deposits, optionally filtered by status
    ///
    /// GET /deposits/closed?status={status}
    pub async fn list_closed_deposits(
        &self,
        status: Option<DepositStatus>,
    ) -> Result<Vec<Deposit>> {
        let status = match status {
            Some(status) => Some(enum_param(&status)?),
            None => None,
        };
        self.get_signed("deposits/closed", &[("status", status)])
            .await
    }
}
