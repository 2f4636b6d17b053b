use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{timestamp, Cart, OrderStatus};

/// A placed order as stored in the shared order collection.
///
/// `total` is written for readers of the file; it is always recomputable
/// from `items`, and is recomputed when a stored order lacks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredOrder")]
pub struct Order {
    pub id: String,
    pub table: String,
    pub items: Cart,
    pub status: OrderStatus,
    #[serde(with = "timestamp::flexible")]
    pub created_at: DateTime<Utc>,
    pub total: f64,
}

/// An order as found on disk, including field names used by older writers.
#[derive(Deserialize)]
struct StoredOrder {
    #[serde(alias = "order_id")]
    id: String,
    #[serde(alias = "table_number")]
    table: String,
    #[serde(alias = "cart")]
    items: Cart,
    #[serde(default)]
    status: OrderStatus,
    #[serde(with = "timestamp::flexible", alias = "timestamp")]
    created_at: DateTime<Utc>,
    total: Option<f64>,
}

impl From<StoredOrder> for Order {
    fn from(stored: StoredOrder) -> Self {
        let total = stored.total.unwrap_or_else(|| stored.items.total());
        Self {
            id: stored.id,
            table: stored.table,
            items: stored.items,
            status: stored.status,
            created_at: stored.created_at,
            total,
        }
    }
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub table: String,
    pub items: Cart,
}

impl Order {
    /// Builds a fresh `Pending` order.
    pub fn from_create(id: impl Into<String>, payload: OrderCreate, created_at: DateTime<Utc>) -> Self {
        let total = payload.items.total();
        Self {
            id: id.into(),
            table: payload.table,
            items: payload.items,
            status: OrderStatus::Pending,
            created_at,
            total,
        }
    }

    pub fn computed_total(&self) -> f64 {
        self.items.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MenuItem;

    #[test]
    fn new_orders_are_pending_with_total() {
        let mut items = Cart::new();
        let a = MenuItem::new("A", "Biryani", "Mains", 100.0);
        items.add(&a);
        items.add(&a);
        items.add(&MenuItem::new("B", "Raita", "Sides", 50.0));

        let order = Order::from_create(
            "o-1",
            OrderCreate {
                table: "7".to_string(),
                items,
            },
            Utc::now(),
        );

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, 250.0);
        assert_eq!(order.computed_total(), 250.0);
    }

    #[test]
    fn reads_numeric_timestamps_and_legacy_field_names() {
        let order: Order = serde_json::from_str(
            r#"{
                "order_id": "o-9",
                "table_number": "4",
                "cart": {"A": {"name": "Biryani", "quantity": 1, "price": 120.0}},
                "status": "Preparing",
                "timestamp": 1714566600
            }"#,
        )
        .unwrap();

        assert_eq!(order.id, "o-9");
        assert_eq!(order.table, "4");
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.created_at.timestamp(), 1_714_566_600);
        assert_eq!(order.computed_total(), 120.0);

        let written = serde_json::to_value(&order).unwrap();
        assert_eq!(written["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(written["table"], "4");
    }

    #[test]
    fn missing_total_is_recomputed_but_stored_total_is_kept() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "o-1",
                "table": "3",
                "items": {"A": {"quantity": 2, "price": 100}, "B": {"quantity": 1, "price": 50}},
                "created_at": "2024-05-01T12:30:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(order.total, 250.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(serde_json::to_value(&order).unwrap()["total"], 250.0);

        let stored: Order = serde_json::from_str(
            r#"{
                "id": "o-2",
                "table": "3",
                "items": {"A": {"quantity": 1, "price": 100}},
                "created_at": "2024-05-01T12:30:00Z",
                "total": 90.0
            }"#,
        )
        .unwrap();
        assert_eq!(stored.total, 90.0);
    }
}
