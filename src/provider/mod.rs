pub mod http;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::provider::ProviderError;
use crate::models::bill::Bill;
use crate::models::wallet::Wallet;

/// An access token issued by the provider's auth endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub lifetime_seconds: i64,
}

/// Bill-creation request. `tracking_id` is the local order identifier the
/// provider echoes back in the webhook.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRequest {
    pub wallet_id: i64,
    pub amount: String,
    pub currency_alpha: String,
    pub lifetime_seconds: i64,
    pub tracking_id: String,
    pub callback_url: String,
}

/// The remote payment provider, as consumed by checkout and settlement.
/// One production implementation talks HTTP; tests supply their own double.
/// Amounts cross this boundary as decimal strings since the provider owns
/// currency-precision rules.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn get_auth_token(&self) -> Result<Token, ProviderError>;

    /// The Authorization value the provider sends on webhook callbacks,
    /// derived from the configured credentials. No network round trip.
    fn authorization_header_value(&self) -> String;

    async fn convert_currency(
        &self,
        amount: &Decimal,
        from_currency: &str,
        to_alpha: &str,
    ) -> Result<String, ProviderError>;

    async fn add_markup(
        &self,
        amount: &str,
        currency_alpha: &str,
        percent: u32,
    ) -> Result<String, ProviderError>;

    async fn create_bill(&self, request: &BillRequest) -> Result<Bill, ProviderError>;

    async fn get_wallet(&self, wallet_id: i64) -> Result<Wallet, ProviderError>;
}
