use actix_web::http::StatusCode;
use serde::Deserialize;

/// The provider's form-encoded callback payload. Every field is optional at
/// the deserialization layer; settlement decides what counts as malformed.
/// The currency pair arrives under literal bracketed form keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WebhookPayload {
    pub id: Option<String>,
    pub tracking_id: Option<String>,
    pub status: Option<String>,

    pub amount: Option<String>,
    pub actual_amount: Option<String>,
    #[serde(rename = "currency[iso]")]
    pub currency_iso: Option<String>,
    #[serde(rename = "currency[alpha]")]
    pub currency_alpha: Option<String>,
    pub pow: Option<String>,
}

/// Structured settlement outcome. The HTTP layer translates this into a
/// response verbatim; the reconciliation logic never touches the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookReply {
    pub status: StatusCode,
    pub body: &'static str,
}

impl WebhookReply {
    pub fn ok() -> Self {
        WebhookReply {
            status: StatusCode::OK,
            body: "OK",
        }
    }

    pub fn unauthorized() -> Self {
        WebhookReply {
            status: StatusCode::UNAUTHORIZED,
            body: "Unauthorized",
        }
    }

    pub fn bad_request() -> Self {
        WebhookReply {
            status: StatusCode::BAD_REQUEST,
            body: "Bad Request",
        }
    }

    pub fn not_found() -> Self {
        WebhookReply {
            status: StatusCode::NOT_FOUND,
            body: "Order not found",
        }
    }
}
