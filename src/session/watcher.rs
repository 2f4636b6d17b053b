//! Interval-driven refresh tasks.
//!
//! Nothing pushes changes out of the store; both tasks poll it on a fixed
//! interval and publish what they read on a `watch` channel. A task stops when
//! every receiver is gone or the store actor shuts down.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, Instrument};

use crate::actor_framework::StoreClient;
use crate::domain::{Order, OrderStatus};
use crate::store::StoreError;

/// Reloads the whole order collection every tick, changed or not, the way the
/// admin board re-renders itself.
pub fn spawn_board_refresher(
    orders: StoreClient<Order>,
    interval: Duration,
) -> (watch::Receiver<Vec<Order>>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(Vec::new());
    let span = info_span!("board_refresher", interval_ms = interval.as_millis() as u64);

    let handle = tokio::spawn(
        async move {
            info!("Board refresher starting");
            let mut ticker = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = tx.closed() => break,
                }

                match orders.load().await {
                    Ok(snapshot) => {
                        debug!(count = snapshot.len(), "Board refreshed");
                        tx.send_replace(snapshot);
                    }
                    Err(StoreError::ActorCommunication(_)) => break,
                    Err(e) => error!(error = %e, "Board refresh failed"),
                }
            }

            info!("Board refresher stopped");
        }
        .instrument(span),
    );

    (rx, handle)
}

/// Follows one order. The receiver only wakes when the status differs from
/// the last one seen, starting from `last_seen`; `None` means the order is
/// not (or no longer) in the collection.
pub fn watch_order_status(
    orders: StoreClient<Order>,
    order_id: String,
    last_seen: Option<OrderStatus>,
    interval: Duration,
) -> (watch::Receiver<Option<OrderStatus>>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(last_seen);
    let span = info_span!("order_watcher", order_id = %order_id);

    let handle = tokio::spawn(
        async move {
            debug!("Order watcher starting");
            let mut ticker = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = tx.closed() => break,
                }

                match orders.load().await {
                    Ok(snapshot) => {
                        let status = snapshot
                            .iter()
                            .find(|order| order.id == order_id)
                            .map(|order| order.status);
                        tx.send_if_modified(|current| {
                            if *current == status {
                                return false;
                            }
                            info!(from = ?*current, to = ?status, "Order status changed");
                            *current = status;
                            true
                        });
                    }
                    Err(StoreError::ActorCommunication(_)) => break,
                    Err(e) => error!(error = %e, "Order poll failed"),
                }
            }

            debug!("Order watcher stopped");
        }
        .instrument(span),
    );

    (rx, handle)
}
