use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::bill::BillStatus;

/// The order store's known status set. Admin-submitted mapping values that
/// do not parse as one of these are dropped on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "on-hold" => Ok(OrderStatus::OnHold),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "refunded" => Ok(OrderStatus::Refunded),
            "failed" => Ok(OrderStatus::Failed),
            _ => Err(UnknownOrderStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

/// An order as seen through the order store. This system never owns the
/// order; it only appends notes, updates status, and marks payment complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    pub total: Decimal,
    pub currency: String,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Configured mapping from provider bill statuses to local order states.
/// Statuses without an entry leave the order status unchanged at settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMapping(HashMap<BillStatus, OrderStatus>);

impl StatusMapping {
    pub fn empty() -> Self {
        StatusMapping(HashMap::new())
    }

    pub fn insert(&mut self, status: BillStatus, local: OrderStatus) {
        self.0.insert(status, local);
    }

    pub fn resolve(&self, status: BillStatus) -> Option<OrderStatus> {
        self.0.get(&status).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StatusMapping {
    /// The documented default table: every provider status mapped.
    fn default() -> Self {
        let mut mapping = StatusMapping::empty();
        for status in BillStatus::ALL {
            mapping.insert(status, status.default_order_status());
        }
        mapping
    }
}

// Persisted as an object keyed by the stringified provider status code,
// e.g. {"-1": "cancelled", "2": "processing"}.
impl Serialize for StatusMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for status in BillStatus::ALL {
            if let Some(local) = self.0.get(&status) {
                map.serialize_entry(&status.code().to_string(), local)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatusMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: HashMap<String, OrderStatus> = HashMap::deserialize(deserializer)?;

        let mut mapping = StatusMapping::empty();
        for (code, local) in raw {
            let status = BillStatus::from_code(&code)
                .ok_or_else(|| D::Error::custom(format!("unknown bill status code: {code}")))?;
            mapping.insert(status, local);
        }
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_parses_known_set_only() {
        assert_eq!("on-hold".parse::<OrderStatus>(), Ok(OrderStatus::OnHold));
        assert_eq!("cancelled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert!("wc-pending".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn default_mapping_is_total() {
        let mapping = StatusMapping::default();
        for status in BillStatus::ALL {
            assert!(mapping.resolve(status).is_some());
        }
        assert_eq!(mapping.resolve(BillStatus::Expired), Some(OrderStatus::Cancelled));
    }

    #[test]
    fn mapping_survives_json_round_trip() {
        let mut mapping = StatusMapping::empty();
        mapping.insert(BillStatus::Expired, OrderStatus::Cancelled);
        mapping.insert(BillStatus::Success, OrderStatus::Processing);

        let json = serde_json::to_string(&mapping).unwrap();
        let parsed: StatusMapping = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, mapping);
        assert_eq!(parsed.resolve(BillStatus::Freeze), None);
    }
}
