use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during customer and admin operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Please enter a table number")]
    BlankTable,
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Menu item not found: {0}")]
    UnknownItem(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OrderError {
    /// Input and lookup problems are shown to the user as warnings; store
    /// failures are not recoverable at the session level.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, OrderError::Store(_))
    }
}
