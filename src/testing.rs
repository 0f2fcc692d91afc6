//! Hand-rolled doubles for the two injected collaborators, shared by the
//! checkout, settlement and settings tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::config::GatewayConfig;
use crate::errors::order::OrderError;
use crate::errors::provider::ProviderError;
use crate::models::bill::Bill;
use crate::models::order::{Order, OrderStatus, StatusMapping};
use crate::models::wallet::{Wallet, WalletList};
use crate::orders::OrderStore;
use crate::provider::{BillRequest, ProviderClient, Token};

pub fn test_wallet(id: i64, alpha: &str) -> Wallet {
    Wallet {
        id,
        currency_name: format!("Coin {alpha}"),
        currency_alpha: alpha.to_string(),
        currency_iso: 1000,
    }
}

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        enabled: true,
        show_logo: false,
        title: "CryptoCurrency".to_string(),
        description: String::new(),
        sandbox: true,
        auth_key: "key".to_string(),
        auth_secret: "secret".to_string(),
        markup: 0,
        order_lifetime: 1800,
        store_currency: "USD".to_string(),
        public_url: "https://shop.example".to_string(),
        wallet_list: WalletList::default(),
        status_mapping: StatusMapping::default(),
    }
}

/// Scriptable provider double. Defaults to the happy path: auth succeeds,
/// conversion yields `0.015`, bills land on a hosted page.
#[derive(Default)]
pub struct MockProvider {
    reject_auth: bool,
    unreachable: bool,
    missing_wallets: HashSet<i64>,
    bill_rejection: Option<String>,
    bill_url: Option<String>,
    markup_calls: AtomicU32,
}

impl MockProvider {
    pub fn reject_auth(mut self) -> Self {
        self.reject_auth = true;
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn without_wallet(mut self, id: i64) -> Self {
        self.missing_wallets.insert(id);
        self
    }

    pub fn reject_bills(mut self, message: &str) -> Self {
        self.bill_rejection = Some(message.to_string());
        self
    }

    pub fn bill_url(mut self, url: &str) -> Self {
        self.bill_url = Some(url.to_string());
        self
    }

    pub fn markup_calls(&self) -> u32 {
        self.markup_calls.load(Ordering::SeqCst)
    }

    fn transport_error() -> ProviderError {
        ProviderError::Api {
            status: 503,
            message: "connection refused".to_string(),
        }
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn get_auth_token(&self) -> Result<Token, ProviderError> {
        if self.unreachable {
            return Err(Self::transport_error());
        }
        if self.reject_auth {
            return Err(ProviderError::Auth);
        }
        Ok(Token {
            access_token: "test-token".to_string(),
            lifetime_seconds: 3600,
        })
    }

    fn authorization_header_value(&self) -> String {
        "Basic a2V5OnNlY3JldA==".to_string()
    }

    async fn convert_currency(
        &self,
        _amount: &Decimal,
        _from_currency: &str,
        _to_alpha: &str,
    ) -> Result<String, ProviderError> {
        if self.unreachable {
            return Err(Self::transport_error());
        }
        Ok("0.015".to_string())
    }

    async fn add_markup(
        &self,
        amount: &str,
        _currency_alpha: &str,
        _percent: u32,
    ) -> Result<String, ProviderError> {
        self.markup_calls.fetch_add(1, Ordering::SeqCst);
        Ok(amount.to_string())
    }

    async fn create_bill(&self, request: &BillRequest) -> Result<Bill, ProviderError> {
        if let Some(message) = &self.bill_rejection {
            return Err(ProviderError::Payment(message.clone()));
        }

        Ok(Bill {
            id: 900,
            url: self
                .bill_url
                .clone()
                .unwrap_or_else(|| "https://pay.example/bill/900".to_string()),
            amount: request.amount.clone(),
            currency_alpha: request.currency_alpha.clone(),
            tracking_id: request.tracking_id.clone(),
        })
    }

    async fn get_wallet(&self, wallet_id: i64) -> Result<Wallet, ProviderError> {
        if self.unreachable {
            return Err(Self::transport_error());
        }
        if self.missing_wallets.contains(&wallet_id) {
            return Err(ProviderError::WalletNotFound(wallet_id));
        }
        Ok(test_wallet(wallet_id, "BTC"))
    }
}

/// What the in-memory store remembers about one order.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub order: Order,
    pub notes: Vec<String>,
    pub stock_reduced: bool,
    pub cart_emptied: bool,
    pub completions: u32,
}

/// In-memory order store tracking every mutation for assertions.
#[derive(Default)]
pub struct MemoryOrderStore {
    records: Mutex<HashMap<i64, OrderRecord>>,
}

impl MemoryOrderStore {
    pub fn with_order(id: i64, total: Decimal, currency: &str) -> Self {
        let store = MemoryOrderStore::default();
        store.records.lock().unwrap().insert(
            id,
            OrderRecord {
                order: Order {
                    id,
                    status: OrderStatus::Pending,
                    total,
                    currency: currency.to_string(),
                    paid_at: None,
                },
                notes: Vec::new(),
                stock_reduced: false,
                cart_emptied: false,
                completions: 0,
            },
        );
        store
    }

    pub fn state(&self, id: i64) -> OrderRecord {
        self.records.lock().unwrap().get(&id).cloned().unwrap()
    }

    fn mutate<F: FnOnce(&mut OrderRecord)>(&self, id: i64, f: F) -> Result<(), OrderError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(&id)
            .ok_or_else(|| OrderError::Sqlx(sqlx::Error::RowNotFound))?;
        f(record);
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn fetch_order(&self, order_id: i64) -> Result<Option<Order>, OrderError> {
        let records = self.records.lock().unwrap();
        Ok(records.get(&order_id).map(|record| record.order.clone()))
    }

    async fn payment_complete(&self, order_id: i64) -> Result<(), OrderError> {
        self.mutate(order_id, |record| {
            if record.order.paid_at.is_none() {
                record.order.paid_at = Some(Utc::now());
                record.order.status = OrderStatus::Completed;
                record.completions += 1;
            }
        })
    }

    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<(), OrderError> {
        self.mutate(order_id, |record| record.order.status = status)
    }

    async fn add_order_note(&self, order_id: i64, note: &str) -> Result<(), OrderError> {
        self.mutate(order_id, |record| record.notes.push(note.to_string()))
    }

    async fn reduce_stock(&self, order_id: i64) -> Result<(), OrderError> {
        self.mutate(order_id, |record| record.stock_reduced = true)
    }

    async fn empty_cart(&self, order_id: i64) -> Result<(), OrderError> {
        self.mutate(order_id, |record| record.cart_emptied = true)
    }
}
