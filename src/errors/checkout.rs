use actix_web::error;
use actix_web::http::StatusCode;

/// Shopper-visible checkout failures. These halt checkout before any order
/// mutation happens.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Currency is required!")]
    CurrencyRequired,

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("Payments are disabled")]
    GatewayDisabled,

    #[error("Order {0} was not found")]
    OrderNotFound(i64),

    #[error("Order {0} has no payable total")]
    EmptyTotal(i64),
}

impl error::ResponseError for CheckoutError {
    fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::CurrencyRequired => StatusCode::BAD_REQUEST,
            CheckoutError::UnknownCurrency(_) => StatusCode::BAD_REQUEST,
            CheckoutError::GatewayDisabled => StatusCode::FORBIDDEN,
            CheckoutError::OrderNotFound(_) => StatusCode::NOT_FOUND,
            CheckoutError::EmptyTotal(_) => StatusCode::BAD_REQUEST,
        }
    }
}
