use serde::{Deserialize, Serialize};

use crate::models::order::OrderStatus;

/// A provider-issued payment request. Created once per checkout attempt and
/// immutable afterwards from our side; the provider is the source of truth
/// for its subsequent status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub url: String,
    pub amount: String,
    pub currency_alpha: String,
    pub tracking_id: String,
}

/// The provider's closed set of bill statuses. Webhook callbacks carry these
/// as stringified numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillStatus {
    Pending,
    Success,
    Freeze,
    Closed,
    Expired,
    Error,
}

impl BillStatus {
    pub const ALL: [BillStatus; 6] = [
        BillStatus::Pending,
        BillStatus::Success,
        BillStatus::Freeze,
        BillStatus::Closed,
        BillStatus::Expired,
        BillStatus::Error,
    ];

    pub fn code(&self) -> i8 {
        match self {
            BillStatus::Pending => 1,
            BillStatus::Success => 2,
            BillStatus::Freeze => 3,
            BillStatus::Closed => 4,
            BillStatus::Expired => -1,
            BillStatus::Error => -2,
        }
    }

    /// Parses the stringified code the provider sends in webhook payloads.
    /// Anything outside the closed set is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(BillStatus::Pending),
            "2" => Some(BillStatus::Success),
            "3" => Some(BillStatus::Freeze),
            "4" => Some(BillStatus::Closed),
            "-1" => Some(BillStatus::Expired),
            "-2" => Some(BillStatus::Error),
            _ => None,
        }
    }

    /// The documented default local order state for this bill status, used
    /// when the admin has not configured a mapping entry.
    pub fn default_order_status(&self) -> OrderStatus {
        match self {
            BillStatus::Pending => OrderStatus::Pending,
            BillStatus::Success => OrderStatus::Processing,
            BillStatus::Closed => OrderStatus::Processing,
            BillStatus::Expired => OrderStatus::Cancelled,
            BillStatus::Error => OrderStatus::Failed,
            BillStatus::Freeze => OrderStatus::Failed,
        }
    }

    /// Order-note template for terminal statuses. Pending and Success have
    /// no generic template; Success gets its own notes in settlement.
    pub fn note_template(&self) -> Option<&'static str> {
        match self {
            BillStatus::Error => Some("Payment error! Bill ID: {bill_id}"),
            BillStatus::Expired => Some("Payment expired! Bill ID: {bill_id}"),
            BillStatus::Freeze => Some("Payment freeze! Bill ID: {bill_id}"),
            BillStatus::Closed => Some("Payment closed! Bill ID: {bill_id}"),
            BillStatus::Pending | BillStatus::Success => None,
        }
    }

    pub fn note(&self, bill_id: &str) -> Option<String> {
        self.note_template()
            .map(|template| template.replace("{bill_id}", bill_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip() {
        for status in BillStatus::ALL {
            assert_eq!(BillStatus::from_code(&status.code().to_string()), Some(status));
        }
        assert_eq!(BillStatus::from_code("0"), None);
        assert_eq!(BillStatus::from_code("5"), None);
        assert_eq!(BillStatus::from_code("paid"), None);
        assert_eq!(BillStatus::from_code(""), None);
    }

    #[test]
    fn default_mapping_matches_documented_table() {
        assert_eq!(BillStatus::Pending.default_order_status(), OrderStatus::Pending);
        assert_eq!(BillStatus::Success.default_order_status(), OrderStatus::Processing);
        assert_eq!(BillStatus::Closed.default_order_status(), OrderStatus::Processing);
        assert_eq!(BillStatus::Expired.default_order_status(), OrderStatus::Cancelled);
        assert_eq!(BillStatus::Error.default_order_status(), OrderStatus::Failed);
        assert_eq!(BillStatus::Freeze.default_order_status(), OrderStatus::Failed);
    }

    #[test]
    fn only_terminal_statuses_have_note_templates() {
        assert!(BillStatus::Pending.note_template().is_none());
        assert!(BillStatus::Success.note_template().is_none());

        let note = BillStatus::Expired.note("77").unwrap();
        assert_eq!(note, "Payment expired! Bill ID: 77");
    }
}
