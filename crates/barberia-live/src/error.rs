//! # Live Coordinator Error Types

use thiserror::Error;

use barberia_store::StoreError;

/// Errors from the live report coordinator.
#[derive(Debug, Error)]
pub enum LiveError {
    /// A store operation failed while loading a snapshot.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The coordinator worker has stopped; the handle is no longer usable.
    ///
    /// ## When This Occurs
    /// - `shutdown()` was called
    /// - The store's change feed closed (store dropped)
    #[error("Report feed has stopped")]
    Stopped,
}

/// Result type for live coordinator operations.
pub type LiveResult<T> = Result<T, LiveError>;
