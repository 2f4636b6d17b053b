use std::collections::BTreeMap;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::actor_framework::StoreClient;
use crate::domain::{Order, OrderStatus};
use crate::session::{spawn_board_refresher, OrderError};

/// The admin's view of the order collection.
///
/// Mutations apply to the snapshot taken at the last refresh and write the
/// whole snapshot back. An order placed by a customer after that refresh is
/// overwritten by the write (last writer wins); the board refresh interval
/// keeps that window short.
#[derive(Debug)]
pub struct AdminSession {
    orders: StoreClient<Order>,
    snapshot: Vec<Order>,
}

impl AdminSession {
    pub fn new(orders: StoreClient<Order>) -> Self {
        Self {
            orders,
            snapshot: Vec::new(),
        }
    }

    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<&[Order], OrderError> {
        self.snapshot = self.orders.load().await?;
        debug!(count = self.snapshot.len(), "Snapshot refreshed");
        Ok(&self.snapshot)
    }

    /// Adopts a snapshot read by the board refresher.
    pub fn apply_refresh(&mut self, snapshot: Vec<Order>) {
        self.snapshot = snapshot;
    }

    /// Newest first. Orders with equal timestamps keep collection order.
    pub fn list_orders(&self) -> Vec<&Order> {
        let mut board: Vec<&Order> = self.snapshot.iter().collect();
        board.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        board
    }

    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.snapshot.iter().find(|order| order.id == order_id)
    }

    /// Number of orders in each status, for the board header.
    pub fn summary(&self) -> BTreeMap<OrderStatus, usize> {
        let mut counts = BTreeMap::new();
        for order in &self.snapshot {
            *counts.entry(order.status).or_insert(0) += 1;
        }
        counts
    }

    /// Overwrites an order's status, persists the snapshot and refreshes.
    /// Any status may follow any other. Returns the previous status.
    #[instrument(skip(self))]
    pub async fn set_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<OrderStatus, OrderError> {
        let index = self
            .snapshot
            .iter()
            .position(|order| order.id == order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;
        let mut updated = self.snapshot.clone();
        let previous = std::mem::replace(&mut updated[index].status, status);

        self.orders.save(updated.clone()).await?;
        self.snapshot = updated;
        info!(from = %previous, to = %status, "Order status updated");

        self.refresh().await?;
        Ok(previous)
    }

    /// Moves an order one step along the happy path. Returns the new status,
    /// or `None` (without writing) when the order is already finished.
    #[instrument(skip(self))]
    pub async fn advance(&mut self, order_id: &str) -> Result<Option<OrderStatus>, OrderError> {
        let current = self
            .get(order_id)
            .map(|order| order.status)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        match current.advance() {
            Some(next) => {
                self.set_status(order_id, next).await?;
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }

    /// Drops every `Completed` order and persists the rest in their existing
    /// order. Returns how many were removed.
    #[instrument(skip(self))]
    pub async fn delete_completed(&mut self) -> Result<usize, OrderError> {
        let mut kept = self.snapshot.clone();
        kept.retain(|order| order.status != OrderStatus::Completed);
        let removed = self.snapshot.len() - kept.len();

        self.orders.save(kept.clone()).await?;
        self.snapshot = kept;
        info!(removed, "Completed orders deleted");

        self.refresh().await?;
        Ok(removed)
    }

    /// See [`spawn_board_refresher`].
    pub fn spawn_board_refresher(
        &self,
        interval: Duration,
    ) -> (watch::Receiver<Vec<Order>>, JoinHandle<()>) {
        spawn_board_refresher(self.orders.clone(), interval)
    }
}
