use actix_web::error;
use actix_web::http::StatusCode;

/// Failures surfaced by the order store.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("Order {0} carries an unknown status: {1}")]
    UnknownStatus(i64, String),
}

impl error::ResponseError for OrderError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
