//! # Change Feed
//!
//! Broadcast notifications for store writes, so the dashboard report can
//! be recomputed the moment a record lands.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Change Feed                                     │
//! │                                                                         │
//! │  Repository write (record_sale, create_expense, ...)                   │
//! │       │                                                                 │
//! │       │ publish(Collection::Transactions)                              │
//! │       ▼                                                                 │
//! │  ┌─────────────────┐      broadcast       ┌──────────────────────┐     │
//! │  │   ChangeFeed    │ ───────────────────► │ Subscriber 1 (live)  │     │
//! │  │ (tokio broadcast│ ───────────────────► │ Subscriber 2 (tests) │     │
//! │  │    channel)     │ ───────────────────► │ ...                  │     │
//! │  └─────────────────┘                      └──────────────────────┘     │
//! │                                                                         │
//! │  Design points:                                                         │
//! │  • Fire-and-forget: publishing never fails a write. A write with       │
//! │    nobody listening is still a correct write.                          │
//! │  • Coarse-grained: subscribers learn WHICH collection changed, not     │
//! │    what changed. The report engine reloads and recomputes anyway.      │
//! │  • Explicit handle: the feed is owned by the Store and passed to       │
//! │    whoever needs it. No global state, no hidden registration.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::broadcast;
use tracing::debug;

/// How many un-consumed notifications a slow subscriber may lag behind.
///
/// Subscribers that fall further behind see `RecvError::Lagged` and should
/// simply recompute from current state.
const FEED_CAPACITY: usize = 64;

// =============================================================================
// Collection
// =============================================================================

/// The record collections the store manages.
///
/// Subscribers use this to skip recomputation for collections that don't
/// feed the report (clients, for example).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    Products,
    Staff,
    Clients,
    Expenses,
    Transactions,
}

impl Collection {
    /// Whether the report engine consumes this collection.
    ///
    /// Client records are informational only; a client edit never changes
    /// any payroll number.
    pub fn feeds_report(&self) -> bool {
        !matches!(self, Collection::Clients)
    }
}

// =============================================================================
// Change Feed
// =============================================================================

/// Handle for publishing and subscribing to store change notifications.
///
/// Cloning is cheap; all clones publish into the same channel.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<Collection>,
}

impl ChangeFeed {
    /// Creates a new, empty feed.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        ChangeFeed { tx }
    }

    /// Publishes a change notification.
    ///
    /// Never fails: if nobody is subscribed the notification is dropped,
    /// which is correct — there is nothing to keep up to date.
    pub fn publish(&self, collection: Collection) {
        debug!(?collection, "Publishing change notification");
        let _ = self.tx.send(collection);
    }

    /// Subscribes to change notifications.
    ///
    /// Only changes published after this call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<Collection> {
        self.tx.subscribe()
    }

    /// Number of live subscribers (for diagnostics).
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        ChangeFeed::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();

        feed.publish(Collection::Transactions);

        assert_eq!(rx.recv().await.unwrap(), Collection::Transactions);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let feed = ChangeFeed::new();
        // Must not panic or error
        feed.publish(Collection::Expenses);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_the_channel() {
        let feed = ChangeFeed::new();
        let publisher = feed.clone();
        let mut rx = feed.subscribe();

        publisher.publish(Collection::Products);

        assert_eq!(rx.recv().await.unwrap(), Collection::Products);
    }

    #[test]
    fn test_clients_do_not_feed_report() {
        assert!(!Collection::Clients.feeds_report());
        assert!(Collection::Transactions.feeds_report());
        assert!(Collection::Staff.feeds_report());
    }
}
