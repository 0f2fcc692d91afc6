use std::collections::HashMap;

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use serde_json::json;

use crate::AppState;
use crate::config::GatewayConfig;
use crate::database::settings::Model as Setting;
use crate::errors::CoinbillError;
use crate::provider::http::HttpProviderClient;
use crate::settings::{self, WalletSubmission};

#[derive(Debug, Clone, Deserialize)]
struct CredentialsReq {
    auth_key: String,
    auth_secret: String,
    sandbox: bool,
}

/// Validates a key/secret pair against the provider and persists it on
/// success. A rejected pair never overwrites the stored credentials.
#[post("/credentials/validate")]
async fn credentials_validate(
    state: web::Data<AppState>,
    body: web::Json<CredentialsReq>,
) -> Result<HttpResponse, CoinbillError> {
    let req = body.into_inner();

    let provider = HttpProviderClient::new(&req.auth_key, &req.auth_secret, req.sandbox);
    settings::validate_credentials(&provider).await?;

    let pool = &state.pool;
    Setting::upsert(pool, "auth_key", &json!(req.auth_key)).await?;
    Setting::upsert(pool, "auth_secret", &json!(req.auth_secret)).await?;
    Setting::upsert(pool, "sandbox", &json!(req.sandbox)).await?;

    Ok(HttpResponse::Ok().json(json!({ "valid": true })))
}

/// Refreshes wallet metadata from the provider for the submitted ids and
/// persists the resulting list. Unknown ids are skipped, not fatal.
#[put("/wallets")]
async fn wallets_save(
    state: web::Data<AppState>,
    body: web::Json<Vec<WalletSubmission>>,
) -> Result<HttpResponse, CoinbillError> {
    let submissions = body.into_inner();
    let config = GatewayConfig::load(&state.pool).await?;

    let provider = HttpProviderClient::from_config(&config);
    let wallets = settings::refresh_wallet_list(&provider, &submissions).await?;

    Setting::upsert(&state.pool, "wallet_list", &serde_json::to_value(&wallets)?).await?;

    Ok(HttpResponse::Ok().json(wallets))
}

/// Saves the bill-status to order-status mapping. Entries whose value is
/// not a known order status are dropped silently.
#[put("/status-mapping")]
async fn status_mapping_save(
    state: web::Data<AppState>,
    body: web::Json<HashMap<String, String>>,
) -> Result<HttpResponse, CoinbillError> {
    let submitted = body.into_inner();

    let mapping = settings::save_status_mapping(
        submitted.iter().map(|(k, v)| (k.as_str(), v.as_str())),
    );

    Setting::upsert(&state.pool, "order_statuses", &serde_json::to_value(&mapping)?).await?;

    Ok(HttpResponse::Ok().json(mapping))
}

#[get("/settings")]
async fn settings_view(state: web::Data<AppState>) -> Result<HttpResponse, CoinbillError> {
    let config = GatewayConfig::load(&state.pool).await?;

    Ok(HttpResponse::Ok().json(config.view()))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(credentials_validate)
        .service(wallets_save)
        .service(status_mapping_save)
        .service(settings_view);
}
