use actix_web::error;
use actix_web::http::StatusCode;

/// Errors from the remote payment provider. `Auth` and `Transport` are kept
/// apart so credential validation can tell a rejected key/secret pair from a
/// network failure.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider rejected the configured key/secret pair")]
    Auth,

    #[error("Wallet {0} was not found")]
    WalletNotFound(i64),

    #[error("Payment error: {0}")]
    Payment(String),

    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected provider response: {0}")]
    BadResponse(String),
}

impl error::ResponseError for ProviderError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProviderError::Auth => StatusCode::BAD_REQUEST,
            ProviderError::WalletNotFound(_) => StatusCode::NOT_FOUND,
            ProviderError::Payment(_) => StatusCode::BAD_GATEWAY,
            ProviderError::Api { .. } => StatusCode::BAD_GATEWAY,
            ProviderError::Transport(_) => StatusCode::SERVICE_UNAVAILABLE,
            ProviderError::BadResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
