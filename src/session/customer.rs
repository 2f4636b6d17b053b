use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::actor_framework::StoreClient;
use crate::domain::{Cart, Feedback, Menu, Order, OrderCreate, OrderStatus};
use crate::session::{watch_order_status, OrderError};

/// Produces identifiers for new orders.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

pub fn uuid_ids() -> IdGenerator {
    Arc::new(|| Uuid::new_v4().to_string())
}

/// What a customer sees when checking on an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTracking {
    pub order: Order,
    /// The feedback form is offered once the order is completed.
    pub feedback_open: bool,
}

/// One customer's interaction context: their cart and the order they placed.
///
/// Sessions are independent. Two sessions share nothing but the store
/// clients, so every read goes back to the order collection.
pub struct CustomerSession {
    menu: Arc<Menu>,
    orders: StoreClient<Order>,
    feedback: StoreClient<Feedback>,
    next_id: IdGenerator,
    cart: Cart,
    tracked_order: Option<String>,
}

impl fmt::Debug for CustomerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerSession")
            .field("cart", &self.cart)
            .field("tracked_order", &self.tracked_order)
            .finish_non_exhaustive()
    }
}

impl CustomerSession {
    pub fn new(
        menu: Arc<Menu>,
        orders: StoreClient<Order>,
        feedback: StoreClient<Feedback>,
        next_id: IdGenerator,
    ) -> Self {
        Self {
            menu,
            orders,
            feedback,
            next_id,
            cart: Cart::new(),
            tracked_order: None,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.total()
    }

    /// Id of the last order placed in this session.
    pub fn tracked_order(&self) -> Option<&str> {
        self.tracked_order.as_deref()
    }

    /// Adds one unit of a menu item and returns its new quantity.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, item_id: &str) -> Result<u32, OrderError> {
        let item = self
            .menu
            .get(item_id)
            .ok_or_else(|| OrderError::UnknownItem(item_id.to_string()))?;
        let quantity = self.cart.add(item);
        debug!(quantity, "Added to cart");
        Ok(quantity)
    }

    /// Removes one unit; a no-op when the item is not in the cart.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, item_id: &str) -> Option<u32> {
        let remaining = self.cart.remove(item_id);
        debug!(?remaining, "Removed from cart");
        remaining
    }

    /// Places the cart as a new `Pending` order for `table`.
    ///
    /// A blank table or an empty cart is rejected and nothing changes. On
    /// success the cart is cleared and the new id is remembered for tracking.
    #[instrument(skip(self), fields(items = self.cart.item_count()))]
    pub async fn place_order(&mut self, table: &str) -> Result<String, OrderError> {
        let table = table.trim();
        if table.is_empty() {
            warn!("Rejected order without table");
            return Err(OrderError::BlankTable);
        }
        if self.cart.is_empty() {
            warn!("Rejected order with empty cart");
            return Err(OrderError::EmptyCart);
        }

        let id = (self.next_id)();
        let payload = OrderCreate {
            table: table.to_string(),
            items: self.cart.clone(),
        };
        let order = Order::from_create(id.clone(), payload, Utc::now());
        let total = order.total;

        self.orders.append(order).await?;

        self.cart.clear();
        self.tracked_order = Some(id.clone());
        info!(order_id = %id, total, "Order placed");
        Ok(id)
    }

    /// Reads the order collection afresh and reports on one order.
    #[instrument(skip(self))]
    pub async fn track_order(&self, order_id: &str) -> Result<OrderTracking, OrderError> {
        let orders = self.orders.load().await?;
        let order = orders
            .into_iter()
            .find(|order| order.id == order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        debug!(status = %order.status, "Order found");
        Ok(OrderTracking {
            feedback_open: order.status.accepts_feedback(),
            order,
        })
    }

    /// Follows an order's status on an interval; see [`watch_order_status`].
    pub fn watch_order(
        &self,
        order_id: &str,
        last_seen: Option<OrderStatus>,
        interval: Duration,
    ) -> (watch::Receiver<Option<OrderStatus>>, JoinHandle<()>) {
        watch_order_status(
            self.orders.clone(),
            order_id.to_string(),
            last_seen,
            interval,
        )
    }

    /// Appends a feedback record. The rating is stored as given.
    #[instrument(skip(self, comments))]
    pub async fn submit_feedback(
        &self,
        name: &str,
        rating: u8,
        comments: &str,
    ) -> Result<(), OrderError> {
        let count = self
            .feedback
            .append(Feedback::new(name, rating, comments))
            .await?;
        info!(count, "Feedback recorded");
        Ok(())
    }
}
