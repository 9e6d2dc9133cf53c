//! Order model
//!
//! A delivery order as supplied by the upstream order system: the day it is
//! for, who it is for, what was ordered, and how much of it has been paid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CustomerId, OrderId};
use super::money::Money;

/// Delivery status of an order
///
/// Statuses come from the upstream system as free text. The three known
/// values are matched exactly; anything else is kept verbatim so it survives
/// display, export and re-saving.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Not yet delivered
    #[default]
    Pending,
    /// Delivered to the customer
    Delivered,
    /// Cancelled before delivery
    Cancelled,
    /// A status string this crate does not interpret
    Other(String),
}

impl OrderStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }

    /// Parse a status typed on the command line (case-insensitive, known values only)
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!(
                "Unknown order status '{}'. Use pending, delivered or cancelled",
                other
            )),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => Self::Pending,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_name: String,
    pub quantity: f64,
}

impl OrderItem {
    pub fn new(product_name: impl Into<String>, quantity: f64) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
        }
    }

    /// Parse a `name:quantity` pair as given on the command line
    pub fn parse(s: &str) -> Result<Self, String> {
        let (name, qty) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("Invalid item '{}'. Use NAME:QUANTITY", s))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("Invalid item '{}': product name is empty", s));
        }
        let quantity: f64 = qty
            .trim()
            .parse()
            .map_err(|_| format!("Invalid item '{}': quantity is not a number", s))?;
        Ok(Self::new(name, quantity))
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.product_name, self.quantity)
    }
}

/// A delivery order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,

    /// Delivery day; timestamps are reduced to their UTC calendar day
    #[serde(with = "order_date")]
    pub date: NaiveDate,

    pub customer_id: CustomerId,

    /// Customer name as captured on the order
    #[serde(default)]
    pub customer_name: String,

    pub total_amount: Money,

    /// Amount collected so far; absent means nothing has been paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<Money>,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn new(
        customer_id: CustomerId,
        customer_name: impl Into<String>,
        date: NaiveDate,
        total_amount: Money,
    ) -> Self {
        Self {
            id: OrderId::new(),
            date,
            customer_id,
            customer_name: customer_name.into(),
            total_amount,
            amount_paid: None,
            status: OrderStatus::default(),
            items: Vec::new(),
        }
    }

    /// Amount paid, treating a missing value as zero
    pub fn paid(&self) -> Money {
        self.amount_paid.unwrap_or_default()
    }

    /// Total minus paid; negative when overpaid
    pub fn balance(&self) -> Money {
        self.total_amount - self.paid()
    }

    pub fn is_delivered(&self) -> bool {
        self.status.is_delivered()
    }

    /// Items flattened to `"Milk x 2, Curd x 1"`
    pub fn items_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Serde adapter for order dates.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to UTC first) and
/// naive `YYYY-MM-DDTHH:MM:SS` timestamps. Always writes `YYYY-MM-DD`.
pub mod order_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid order date '{}'", raw)))
    }

    /// Reduce a date or timestamp string to its UTC calendar day
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Some(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc).date_naive());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|ts| ts.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        let mut order = Order::new(
            CustomerId::from("c1"),
            "Ramesh Patel",
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            Money::from_paise(5000),
        );
        order.items = vec![OrderItem::new("Milk", 2.0), OrderItem::new("Curd", 0.5)];
        order
    }

    #[test]
    fn test_missing_paid_is_zero() {
        let order = sample_order();
        assert_eq!(order.paid(), Money::zero());
        assert_eq!(order.balance().paise(), 5000);
    }

    #[test]
    fn test_overpaid_balance_is_negative() {
        let mut order = sample_order();
        order.amount_paid = Some(Money::from_paise(6000));
        assert_eq!(order.balance().paise(), -1000);
    }

    #[test]
    fn test_items_summary() {
        assert_eq!(sample_order().items_summary(), "Milk x 2, Curd x 0.5");
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!(OrderStatus::parse("Delivered").unwrap(), OrderStatus::Delivered);
        assert!(OrderStatus::parse("lost").is_err());
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert!(!OrderStatus::Cancelled.is_delivered());
    }

    #[test]
    fn test_unrecognised_status_kept_verbatim() {
        let mut order = sample_order();
        order.status = OrderStatus::from("out_for_delivery".to_string());
        assert_eq!(order.status.to_string(), "out_for_delivery");

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "out_for_delivery");

        // Matching is exact, as upstream compares status strings
        assert_eq!(
            OrderStatus::from("Delivered".to_string()),
            OrderStatus::Other("Delivered".into())
        );
        assert_eq!(OrderStatus::from("delivered".to_string()), OrderStatus::Delivered);
    }

    #[test]
    fn test_item_parse() {
        let item = OrderItem::parse("Buffalo Milk:1.5").unwrap();
        assert_eq!(item.product_name, "Buffalo Milk");
        assert_eq!(item.quantity, 1.5);
        assert!(OrderItem::parse("Milk").is_err());
        assert!(OrderItem::parse(":2").is_err());
    }

    #[test]
    fn test_deserialize_upstream_order() {
        let json = r#"{
            "id": "o1",
            "date": "2024-01-01T23:30:00+05:30",
            "customer_id": "c1",
            "customer_name": "Ramesh",
            "total_amount": 100,
            "status": "out_for_delivery",
            "items": [{"product_name": "Milk", "quantity": 2, "price": 50}]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        // 23:30 IST is 18:00 UTC on the same day
        assert_eq!(order.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(order.amount_paid, None);
        assert_eq!(order.status, OrderStatus::Other("out_for_delivery".into()));
        assert!(!order.is_delivered());
        assert_eq!(order.items_summary(), "Milk x 2");
    }

    #[test]
    fn test_timestamp_reduced_to_utc_day() {
        assert_eq!(
            order_date::parse("2024-03-10T01:00:00+05:30"),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
        assert_eq!(
            order_date::parse("2024-03-10T08:15:00.000"),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert_eq!(order_date::parse("10/03/2024"), None);
    }

    #[test]
    fn test_date_serialized_as_day() {
        let json = serde_json::to_value(sample_order()).unwrap();
        assert_eq!(json["date"], "2024-01-02");
        assert!(json.get("amount_paid").is_none());
    }
}
