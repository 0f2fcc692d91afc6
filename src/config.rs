use std::collections::HashMap;

use serde_json::{Value, json};
use sqlx::PgPool;

use crate::database::settings::Model as Setting;
use crate::models::order::StatusMapping;
use crate::models::wallet::WalletList;

/// Gateway configuration, read from the settings store into an explicit
/// value object once per request. Nothing in checkout or settlement reads
/// settings ambiently.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub enabled: bool,
    pub show_logo: bool,
    pub title: String,
    pub description: String,

    pub sandbox: bool,
    pub auth_key: String,
    pub auth_secret: String,

    pub markup: u32,
    pub order_lifetime: i64,
    pub store_currency: String,
    pub public_url: String,

    pub wallet_list: WalletList,
    pub status_mapping: StatusMapping,
}

impl GatewayConfig {
    pub async fn load(pool: &PgPool) -> sqlx::Result<Self> {
        let settings: HashMap<String, Value> = Setting::fetch_all(pool)
            .await?
            .into_iter()
            .map(|row| (row.key, row.value))
            .collect();

        Ok(Self::from_settings(&settings))
    }

    fn from_settings(settings: &HashMap<String, Value>) -> Self {
        GatewayConfig {
            enabled: get_bool(settings, "enabled", false),
            show_logo: get_bool(settings, "show_logo", false),
            title: get_string(settings, "title", "CryptoCurrency"),
            description: get_string(
                settings,
                "description",
                "Pay with Bitcoin, Bitcoin Cash, Litecoin, Ethereum & more.",
            ),
            sandbox: get_bool(settings, "sandbox", true),
            auth_key: get_string(settings, "auth_key", ""),
            auth_secret: get_string(settings, "auth_secret", ""),
            markup: get_u64(settings, "markup", 0) as u32,
            order_lifetime: get_u64(settings, "order_lifetime", 3600) as i64,
            store_currency: get_string(settings, "store_currency", "USD"),
            public_url: get_string(settings, "public_url", "http://localhost:8080"),
            wallet_list: get_typed(settings, "wallet_list"),
            status_mapping: get_typed(settings, "order_statuses"),
        }
    }

    /// The per-gateway callback path the provider posts webhooks to.
    pub fn callback_url(&self) -> String {
        format!("{}/gateway/callback", self.public_url.trim_end_matches('/'))
    }

    /// Settings view for the admin surface, secret redacted.
    pub fn view(&self) -> Value {
        json!({
            "enabled": self.enabled,
            "show_logo": self.show_logo,
            "title": self.title,
            "description": self.description,
            "sandbox": self.sandbox,
            "auth_key": self.auth_key,
            "auth_secret": if self.auth_secret.is_empty() { "" } else { "********" },
            "markup": self.markup,
            "order_lifetime": self.order_lifetime,
            "store_currency": self.store_currency,
            "public_url": self.public_url,
            "wallet_list": self.wallet_list,
            "order_statuses": self.status_mapping,
        })
    }
}

fn get_bool(settings: &HashMap<String, Value>, key: &str, default: bool) -> bool {
    settings.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn get_u64(settings: &HashMap<String, Value>, key: &str, default: u64) -> u64 {
    settings.get(key).and_then(Value::as_u64).unwrap_or(default)
}

fn get_string(settings: &HashMap<String, Value>, key: &str, default: &str) -> String {
    settings
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn get_typed<T: serde::de::DeserializeOwned + Default>(
    settings: &HashMap<String, Value>,
    key: &str,
) -> T {
    let Some(value) = settings.get(key) else {
        return T::default();
    };

    match serde_json::from_value(value.clone()) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Ignoring malformed setting {key}: {e}");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bill::BillStatus;
    use crate::models::order::OrderStatus;

    #[test]
    fn defaults_apply_when_settings_are_absent() {
        let config = GatewayConfig::from_settings(&HashMap::new());

        assert!(!config.enabled);
        assert!(config.sandbox);
        assert_eq!(config.title, "CryptoCurrency");
        assert_eq!(config.markup, 0);
        assert!(config.wallet_list.is_empty());
        assert_eq!(
            config.status_mapping.resolve(BillStatus::Expired),
            Some(OrderStatus::Cancelled)
        );
    }

    #[test]
    fn persisted_values_override_defaults() {
        let mut settings = HashMap::new();
        settings.insert("enabled".to_string(), json!(true));
        settings.insert("markup".to_string(), json!(10));
        settings.insert("public_url".to_string(), json!("https://shop.example/"));
        settings.insert(
            "wallet_list".to_string(),
            json!([{
                "id": 42,
                "currency_name": "Bitcoin",
                "currency_alpha": "BTC",
                "currency_iso": 1000,
            }]),
        );

        let config = GatewayConfig::from_settings(&settings);

        assert!(config.enabled);
        assert_eq!(config.markup, 10);
        assert_eq!(config.callback_url(), "https://shop.example/gateway/callback");
        assert_eq!(config.wallet_list.find(42).unwrap().currency_alpha, "BTC");
    }

    #[test]
    fn malformed_setting_falls_back_to_default() {
        let mut settings = HashMap::new();
        settings.insert("wallet_list".to_string(), json!("not-a-list"));

        let config = GatewayConfig::from_settings(&settings);
        assert!(config.wallet_list.is_empty());
    }
}
