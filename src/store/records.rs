use crate::actor_framework::Record;
use crate::domain::{Feedback, MenuItem, Order};

impl Record for Order {
    const KIND: &'static str = "orders";
}

impl Record for MenuItem {
    const KIND: &'static str = "menu";
}

impl Record for Feedback {
    const KIND: &'static str = "feedback";
}

#[cfg(test)]
mod tests {
    use crate::domain::{Order, OrderStatus};
    use crate::store::JsonStore;

    const ORDERS: &str = r#"[
  {
    "id": "o-1",
    "table": "4",
    "items": {
      "A": {"name": "Butter Chicken", "quantity": 2, "price": 100.0},
      "B": {"name": "Garlic Naan", "quantity": 1, "price": 50.0}
    },
    "status": "Served",
    "created_at": "2024-05-01T12:30:00Z",
    "total": 250.0
  },
  {
    "id": "o-2",
    "table": "7",
    "items": {"C": {"name": "Mango Lassi", "quantity": 1, "price": 60.0}},
    "status": "Pending",
    "created_at": "2024-05-01T12:45:10.250Z",
    "total": 60.0
  }
]"#;

    fn as_value(path: &std::path::Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn saving_loaded_orders_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(&path, ORDERS).unwrap();
        let before = as_value(&path);

        let store = JsonStore::<Order>::new(&path);
        let orders = store.load().await.unwrap();
        assert_eq!(orders.len(), 2);
        store.save(&orders).await.unwrap();

        assert_eq!(as_value(&path), before);
    }

    #[tokio::test]
    async fn epoch_timestamps_are_rewritten_as_rfc3339() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(
            &path,
            r#"[
                {"order_id": "o-1", "table_number": "2",
                 "cart": {"A": {"quantity": 2, "price": 100}},
                 "status": "Completed", "timestamp": 1714566600},
                {"id": "o-2", "table": "5",
                 "items": [{"id": "B", "name": "Garlic Naan", "quantity": 1, "price": 50}],
                 "created_at": 1714567500.5}
            ]"#,
        )
        .unwrap();

        let store = JsonStore::<Order>::new(&path);
        let orders = store.load().await.unwrap();
        store.save(&orders).await.unwrap();

        let written = as_value(&path);
        let written = written.as_array().unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0]["id"], "o-1");
        assert_eq!(written[0]["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(written[0]["total"], 200.0);
        assert_eq!(written[1]["created_at"], "2024-05-01T12:45:00.500Z");
        assert_eq!(written[1]["items"]["B"]["quantity"], 1);

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded, orders);
        assert_eq!(reloaded[0].status, OrderStatus::Completed);
        assert_eq!(reloaded[1].status, OrderStatus::Pending);
    }
}
