use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument};

use crate::store::{JsonStore, StoreError};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Anything kept in a JSON collection file and served by a `StoreActor`.
pub trait Record: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Collection name used in logs
    const KIND: &'static str;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Load {
        respond_to: Response<Vec<T>>,
    },
    Save {
        records: Vec<T>,
        respond_to: Response<()>,
    },
    /// Read fresh, push, write back. Replies with the new collection length.
    Append {
        record: T,
        respond_to: Response<usize>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns one collection file. Requests from every client in this process are
/// applied one at a time, in arrival order. Other processes writing the same
/// file are not coordinated with.
pub struct StoreActor<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: JsonStore<T>,
}

impl<T: Record> StoreActor<T> {
    pub fn new(buffer_size: usize, store: JsonStore<T>) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self { receiver, store };
        (actor, StoreClient::new(sender))
    }

    #[instrument(name = "store_actor", skip(self), fields(kind = T::KIND, path = %self.store.path().display()))]
    pub async fn run(mut self) {
        info!("Store actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Load { respond_to } => {
                    let _ = respond_to.send(self.store.load().await);
                }
                StoreRequest::Save { records, respond_to } => {
                    self.handle_save(records, respond_to).await;
                }
                StoreRequest::Append { record, respond_to } => {
                    self.handle_append(record, respond_to).await;
                }
                StoreRequest::Shutdown => {
                    info!("Store actor shutting down");
                    break;
                }
            }
        }

        info!("Store actor stopped");
    }

    #[instrument(skip(self, records, respond_to), fields(count = records.len()))]
    async fn handle_save(&self, records: Vec<T>, respond_to: Response<()>) {
        debug!("Processing save request");
        let result = self.store.save(&records).await;
        if let Err(e) = &result {
            error!(error = %e, "Save failed");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, record, respond_to))]
    async fn handle_append(&self, record: T, respond_to: Response<usize>) {
        debug!("Processing append request");
        let result: Result<usize, StoreError> = async {
            let mut records = self.store.load().await?;
            records.push(record);
            self.store.save(&records).await?;
            Ok(records.len())
        }
        .await;

        match &result {
            Ok(count) => info!(count, "Record appended"),
            Err(e) => error!(error = %e, "Append failed"),
        }
        let _ = respond_to.send(result);
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// Generate client methods with oneshot channel boilerplate and automatic tracing.
macro_rules! store_method {
    (fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $variant:ident) => {
        #[instrument(name = "store_client", skip_all, fields(kind = T::KIND, op = stringify!($method)))]
        pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, StoreError> {
            debug!("Sending request");
            let (respond_to, response) = oneshot::channel();
            self.sender
                .send(StoreRequest::$variant { $($param,)* respond_to })
                .await
                .map_err(|_| StoreError::ActorCommunication("Actor closed".to_string()))?;
            response
                .await
                .map_err(|_| StoreError::ActorCommunication("Actor dropped".to_string()))?
        }
    };
}

#[derive(Debug, Clone)]
pub struct StoreClient<T: Record> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Record> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    store_method!(fn load() -> Vec<T> as Load);
    store_method!(fn save(records: Vec<T>) -> () as Save);
    store_method!(fn append(record: T) -> usize as Append);

    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| StoreError::ActorCommunication("Actor closed".to_string()))
    }
}

// =============================================================================
// 5. USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ticket {
        id: u32,
    }

    impl Record for Ticket {
        const KIND: &'static str = "ticket";
    }

    #[tokio::test]
    async fn test_store_actor_serves_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("tickets.json"));
        let (actor, client) = StoreActor::<Ticket>::new(8, store);
        let handle = tokio::spawn(actor.run());

        // 1. Missing file loads empty
        assert!(client.load().await.unwrap().is_empty());

        // 2. Appends accumulate
        assert_eq!(client.append(Ticket { id: 1 }).await.unwrap(), 1);
        assert_eq!(client.append(Ticket { id: 2 }).await.unwrap(), 2);

        // 3. Save replaces everything
        client.save(vec![Ticket { id: 9 }]).await.unwrap();
        assert_eq!(client.load().await.unwrap(), vec![Ticket { id: 9 }]);

        // 4. Shutdown closes the actor for every clone
        let other = client.clone();
        client.shutdown().await.unwrap();
        handle.await.unwrap();
        assert!(matches!(
            other.load().await,
            Err(StoreError::ActorCommunication(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_appends_from_one_process_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("tickets.json"));
        let (actor, client) = StoreActor::<Ticket>::new(8, store);
        tokio::spawn(actor.run());

        let tasks: Vec<_> = (0..20)
            .map(|id| {
                let client = client.clone();
                tokio::spawn(async move { client.append(Ticket { id }).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let mut ids: Vec<u32> = client.load().await.unwrap().into_iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..20).collect::<Vec<_>>());
    }
}
