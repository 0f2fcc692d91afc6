use actix_web::error;
use actix_web::http::StatusCode;

/// Admin-surface failures from the settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Wrong key/secret pair")]
    InvalidCredentials,

    #[error("Could not reach the provider: {0}")]
    Unreachable(String),

    #[error("You need to enter your wallet id(s)")]
    NoWallets,
}

impl error::ResponseError for SettingsError {
    fn status_code(&self) -> StatusCode {
        match self {
            SettingsError::InvalidCredentials => StatusCode::BAD_REQUEST,
            SettingsError::Unreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            SettingsError::NoWallets => StatusCode::BAD_REQUEST,
        }
    }
}
