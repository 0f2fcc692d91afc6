use serde::{Deserialize, Serialize};

/// Checkout submission. `crypto` carries the chosen wallet id from the
/// currency radio form; absent or unknown values fail validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckoutRequest {
    pub order_id: i64,
    pub crypto: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentResult {
    Success,
    Fail,
}

/// Outcome of a bill-creation attempt. On success `redirect` points at the
/// provider's hosted payment page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub result: PaymentResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PaymentOutcome {
    pub fn success(redirect: String) -> Self {
        PaymentOutcome {
            result: PaymentResult::Success,
            redirect: Some(redirect),
            message: None,
        }
    }

    pub fn fail(message: Option<String>) -> Self {
        PaymentOutcome {
            result: PaymentResult::Fail,
            redirect: None,
            message,
        }
    }
}
