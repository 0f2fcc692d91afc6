pub mod checkout;
pub mod order;
pub mod provider;
pub mod settings;

use actix_web::{
    HttpResponse,
    body::BoxBody,
    error::{self, JsonPayloadError},
    http::StatusCode,
};

use crate::models::responses::{ApiError, ApiResponse, None};

#[derive(Debug, thiserror::Error)]
pub enum CoinbillError {
    #[error("Resource not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Provider(#[from] provider::ProviderError),

    #[error(transparent)]
    Checkout(#[from] checkout::CheckoutError),

    #[error(transparent)]
    Settings(#[from] settings::SettingsError),

    #[error(transparent)]
    Order(#[from] order::OrderError),

    #[error("Something went wrong: {0}")]
    Internal(&'static str),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    JsonPayload(#[from] JsonPayloadError),
}

impl error::ResponseError for CoinbillError {
    fn status_code(&self) -> StatusCode {
        match self {
            CoinbillError::NotFound => StatusCode::NOT_FOUND,
            CoinbillError::Validation(..) => StatusCode::BAD_REQUEST,
            CoinbillError::Database(..) => StatusCode::INTERNAL_SERVER_ERROR,
            CoinbillError::Provider(e) => e.status_code(),
            CoinbillError::Checkout(e) => e.status_code(),
            CoinbillError::Settings(e) => e.status_code(),
            CoinbillError::Order(e) => e.status_code(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let message = self.to_string();

        let error = ApiError {
            code: match self {
                CoinbillError::NotFound => "resource_not_found_error",
                CoinbillError::Validation(..) => "validation_error",
                CoinbillError::Database(..) => "database_error",
                CoinbillError::Provider(..) => "provider_error",
                CoinbillError::Checkout(..) => "checkout_error",
                CoinbillError::Settings(..) => "settings_error",
                CoinbillError::Order(..) => "order_error",
                _ => "internal_server_error",
            },
            message: &message,
        };

        let response: ApiResponse<'_, None> = ApiResponse {
            error: Some(error),
            ..Default::default()
        };

        HttpResponse::build(self.status_code()).json(response)
    }
}
