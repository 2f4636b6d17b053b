use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::actor_framework::{StoreActor, StoreClient};
use crate::app_system::DeskConfig;
use crate::domain::{Feedback, Menu, MenuItem, Order};
use crate::session::{uuid_ids, AdminSession, CustomerSession, IdGenerator};
use crate::store::{JsonStore, StoreError};

/// Owns the store actors for one data directory and hands out sessions.
///
/// The menu is read once at startup. Orders and feedback each get a store
/// actor; every session created here shares their clients.
pub struct DeskSystem {
    config: DeskConfig,
    menu: Arc<Menu>,
    orders: StoreClient<Order>,
    feedback: StoreClient<Feedback>,
    handles: Vec<JoinHandle<()>>,
}

impl DeskSystem {
    #[instrument(name = "desk_system", skip(config), fields(data_dir = %config.data_dir.display()))]
    pub async fn start(config: DeskConfig) -> Result<Self, StoreError> {
        info!("Starting order desk");

        let menu_items = JsonStore::<MenuItem>::new(config.menu_path()).load().await?;
        if menu_items.is_empty() {
            warn!("Menu is empty");
        }
        let menu = Arc::new(Menu::new(menu_items));

        let mut handles = Vec::new();

        let (order_actor, orders) =
            StoreActor::<Order>::new(config.channel_buffer, JsonStore::new(config.orders_path()));
        handles.push(tokio::spawn(order_actor.run()));

        let (feedback_actor, feedback) =
            StoreActor::<Feedback>::new(config.channel_buffer, JsonStore::new(config.feedback_path()));
        handles.push(tokio::spawn(feedback_actor.run()));

        info!("Order desk started");

        Ok(Self {
            config,
            menu,
            orders,
            feedback,
            handles,
        })
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn customer_session(&self) -> CustomerSession {
        self.customer_session_with_ids(uuid_ids())
    }

    pub fn customer_session_with_ids(&self, next_id: IdGenerator) -> CustomerSession {
        CustomerSession::new(
            Arc::clone(&self.menu),
            self.orders.clone(),
            self.feedback.clone(),
            next_id,
        )
    }

    pub fn admin_session(&self) -> AdminSession {
        AdminSession::new(self.orders.clone())
    }

    /// Stops both store actors and waits for them. Sessions still holding
    /// clients get `ActorCommunication` errors afterwards, and refresh tasks
    /// end on their next tick.
    #[instrument(skip(self))]
    pub async fn shutdown(self) {
        info!("Shutting down order desk");

        let _ = self.orders.shutdown().await;
        let _ = self.feedback.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Store actor shutdown error");
            }
        }

        info!("Order desk shutdown complete");
    }
}
