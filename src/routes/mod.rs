pub mod gateway;
pub mod internal;

use actix_web::{HttpResponse, get, web};

use crate::errors::CoinbillError;
use crate::guards;

#[get("/")]
pub async fn index_get() -> Result<HttpResponse, CoinbillError> {
    Ok(HttpResponse::Ok().body("coinbill gateway"))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.configure(gateway::config);
    cfg.service(
        web::scope("/internal")
            .guard(guards::internal_key_guard)
            .configure(internal::config),
    );
    cfg.service(web::scope("").service(index_get));
}
