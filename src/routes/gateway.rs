use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde_json::json;

use crate::AppState;
use crate::checkout;
use crate::config::GatewayConfig;
use crate::database::order::PgOrderStore;
use crate::errors::CoinbillError;
use crate::errors::checkout::CheckoutError;
use crate::models::checkout::CheckoutRequest;
use crate::models::webhook::WebhookPayload;
use crate::provider::ProviderClient;
use crate::provider::http::HttpProviderClient;
use crate::settlement;

/// Everything the checkout front end needs to render the payment method:
/// method metadata plus the configured currency list in display order.
#[get("/currencies")]
async fn currencies(state: web::Data<AppState>) -> Result<HttpResponse, CoinbillError> {
    let config = GatewayConfig::load(&state.pool).await?;

    Ok(HttpResponse::Ok().json(json!({
        "enabled": config.enabled,
        "title": config.title,
        "description": config.description,
        "show_logo": config.show_logo,
        "currencies": config.wallet_list,
    })))
}

#[post("/checkout")]
async fn checkout_submit(
    state: web::Data<AppState>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, CoinbillError> {
    let request = body.into_inner();
    let config = GatewayConfig::load(&state.pool).await?;

    if !config.enabled {
        return Err(CheckoutError::GatewayDisabled.into());
    }

    let wallet = checkout::validate_fields(request.crypto.as_deref(), &config.wallet_list)?;

    let provider = HttpProviderClient::from_config(&config);
    let orders = PgOrderStore::new(state.pool.clone());

    let outcome =
        checkout::process_payment(&config, &provider, &orders, request.order_id, wallet).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

#[post("/callback")]
async fn callback(
    state: web::Data<AppState>,
    request: HttpRequest,
    payload: web::Form<WebhookPayload>,
) -> Result<HttpResponse, CoinbillError> {
    let config = GatewayConfig::load(&state.pool).await?;

    let expected = HttpProviderClient::from_config(&config).authorization_header_value();
    let authorization = request
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let orders = PgOrderStore::new(state.pool.clone());
    let reply = settlement::settle(&config, &expected, authorization, &payload, &orders)
        .await
        .map_err(CoinbillError::Order)?;

    Ok(HttpResponse::build(reply.status).body(reply.body))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/gateway")
            .service(currencies)
            .service(checkout_submit)
            .service(callback),
    );
}
