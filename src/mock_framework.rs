//! # Mock Framework
//!
//! Utilities for testing sessions without a store actor.
//!
//! Use [`create_mock_store_client`] to get a client and a receiver.
//! Then use helpers like [`expect_append`] or [`expect_save`] to assert what a
//! session asked the store to do, and answer through the returned responder.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::actor_framework::{Record, Response, StoreClient, StoreRequest};
use crate::session::IdGenerator;

/// Creates a mock client and a receiver for asserting requests.
///
/// The session under test talks to a channel we hold instead of a real
/// `StoreActor`, so each test decides what the store answers (data, failure,
/// or nothing at all).
pub fn create_mock_store_client<T: Record>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Deterministic ids: `prefix_1`, `prefix_2`, ...
pub fn sequential_ids(prefix: &'static str) -> IdGenerator {
    let counter = Arc::new(AtomicU64::new(1));
    Arc::new(move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst)))
}

/// Helper to verify that the next message is a Load request
pub async fn expect_load<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(StoreRequest::Load { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(Vec<T>, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Save { records, respond_to }) => Some((records, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Append request
pub async fn expect_append<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T, Response<usize>)> {
    match receiver.recv().await {
        Some(StoreRequest::Append { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Feedback;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_store_client::<Feedback>(10);

        let append_task = tokio::spawn(async move {
            client.append(Feedback::new("Ravi", 4, "Good chai")).await
        });

        let (feedback, responder) = expect_append(&mut receiver)
            .await
            .expect("Expected Append request");
        assert_eq!(feedback.name, "Ravi");
        responder.send(Ok(3)).unwrap();

        let result = append_task.await.unwrap();
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_sequential_ids() {
        let next = sequential_ids("order");
        assert_eq!(next(), "order_1");
        assert_eq!(next(), "order_2");
    }
}
