use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use crate::config::GatewayConfig;
use crate::errors::provider::ProviderError;
use crate::models::bill::Bill;
use crate::models::wallet::Wallet;
use crate::provider::{BillRequest, ProviderClient, Token};

const API_URL: &str = "https://api.coinbillpay.io/v1";
const SANDBOX_URL: &str = "https://api-sandbox.coinbillpay.io/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AmountBody {
    amount: String,
}

#[derive(Debug, Deserialize)]
struct WalletBody {
    id: i64,
    currency: WalletCurrencyBody,
}

#[derive(Debug, Deserialize)]
struct WalletCurrencyBody {
    name: String,
    alpha: String,
    iso: i32,
}

#[derive(Debug)]
struct CachedToken {
    token: Token,
    expires_at: DateTime<Utc>,
}

/// Production provider client. The sandbox flag switches the base URL; the
/// auth token is cached until shortly before expiry.
pub struct HttpProviderClient {
    http: reqwest::Client,
    base_url: String,
    auth_key: String,
    auth_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl HttpProviderClient {
    pub fn new(auth_key: &str, auth_secret: &str, sandbox: bool) -> Self {
        let base_url = if sandbox { SANDBOX_URL } else { API_URL };

        HttpProviderClient {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.to_string(),
            auth_key: auth_key.to_string(),
            auth_secret: auth_secret.to_string(),
            token: Mutex::new(None),
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(&config.auth_key, &config.auth_secret, config.sandbox)
    }

    /// Returns a cached access token, fetching a fresh one when missing or
    /// within a minute of expiry.
    async fn bearer_token(&self) -> Result<String, ProviderError> {
        let mut cached = self.token.lock().await;

        if let Some(entry) = cached.as_ref() {
            if entry.expires_at - Utc::now() > chrono::Duration::seconds(60) {
                return Ok(entry.token.access_token.clone());
            }
        }

        let token = self.get_auth_token().await?;
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            expires_at: Utc::now() + chrono::Duration::seconds(token.lifetime_seconds),
            token,
        });

        Ok(access_token)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ProviderError> {
        let token = self.bearer_token().await?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ProviderError::BadResponse(e.to_string()));
        }

        Err(Self::api_error(status, response).await)
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> ProviderError {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

        ProviderError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn get_auth_token(&self) -> Result<Token, ProviderError> {
        let url = format!("{}/token", self.base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.auth_key, Some(&self.auth_secret))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProviderError::Auth);
        }

        Self::parse_response(response).await
    }

    fn authorization_header_value(&self) -> String {
        let pair = format!("{}:{}", self.auth_key, self.auth_secret);
        format!("Basic {}", BASE64.encode(pair))
    }

    async fn convert_currency(
        &self,
        amount: &Decimal,
        from_currency: &str,
        to_alpha: &str,
    ) -> Result<String, ProviderError> {
        let body: AmountBody = self
            .post_json(
                "/rates/convert",
                json!({
                    "amount": amount.to_string(),
                    "from": from_currency,
                    "to": to_alpha,
                }),
            )
            .await?;

        Ok(body.amount)
    }

    async fn add_markup(
        &self,
        amount: &str,
        currency_alpha: &str,
        percent: u32,
    ) -> Result<String, ProviderError> {
        let body: AmountBody = self
            .post_json(
                "/rates/markup",
                json!({
                    "amount": amount,
                    "currency": currency_alpha,
                    "percent": percent,
                }),
            )
            .await?;

        Ok(body.amount)
    }

    async fn create_bill(&self, request: &BillRequest) -> Result<Bill, ProviderError> {
        let token = self.bearer_token().await?;
        let url = format!("{}/bills", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&json!({
                "wallet_id": request.wallet_id,
                "amount": request.amount,
                "currency": request.currency_alpha,
                "lifetime": request.lifetime_seconds,
                "tracking_id": request.tracking_id,
                "callback_url": request.callback_url,
            }))
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            // The provider rejected the bill itself; surface its message to
            // the shopper-facing failure notice.
            let err = Self::api_error(status, response).await;
            let message = match err {
                ProviderError::Api { message, .. } => message,
                other => other.to_string(),
            };
            return Err(ProviderError::Payment(message));
        }

        Self::parse_response(response).await
    }

    async fn get_wallet(&self, wallet_id: i64) -> Result<Wallet, ProviderError> {
        let token = self.bearer_token().await?;
        let url = format!("{}/wallets/{}", self.base_url, wallet_id);

        let response = self.http.get(&url).bearer_auth(token).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::WalletNotFound(wallet_id));
        }

        let body: WalletBody = Self::parse_response(response).await?;

        Ok(Wallet {
            id: body.id,
            currency_name: body.currency.name,
            currency_alpha: body.currency.alpha,
            currency_iso: body.currency.iso,
        })
    }
}
