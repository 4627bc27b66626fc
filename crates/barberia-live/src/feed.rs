//! # Report Feed
//!
//! The reactive coordinator: one background worker that keeps a [`Report`]
//! continuously up to date as the store changes.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ReportFeed                                     │
//! │                                                                         │
//! │  Store writes                        Range changes                      │
//! │  (record_sale, create_expense, ...)  (set_range / use_preset)           │
//! │       │                                   │                             │
//! │       │ broadcast<Collection>             │ watch<DateRange>            │
//! │       ▼                                   ▼                             │
//! │  ┌───────────────────────────────────────────────┐                     │
//! │  │              worker (tokio::select!)          │                     │
//! │  │                                               │                     │
//! │  │  on either event:                             │                     │
//! │  │    1. reload the five collections (try_join!) │                     │
//! │  │    2. compute_report(...)        ← pure       │                     │
//! │  │    3. publish on watch<Report>                │                     │
//! │  │                                               │                     │
//! │  │  store error → log, keep the last good Report │                     │
//! │  └───────────────────────┬───────────────────────┘                     │
//! │                          │ watch<Report>                               │
//! │                          ▼                                             │
//! │  report() / subscribe() ← dashboard reads, never computes              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Recompute From Scratch?
//! The ledgers are small (one shop, one operator) and `compute_report` is
//! pure and fast. Full recomputation on every change is simpler than
//! incremental maintenance and cannot drift.

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use barberia_core::dates::DatePreset;
use barberia_core::report::{compute_report, Report};
use barberia_core::types::{
    DateRange, Expense, Product, SaleTransaction, Service, StaffMember,
};
use barberia_store::{Store, StoreResult};

use crate::error::{LiveError, LiveResult};

// =============================================================================
// Collection Snapshot
// =============================================================================

/// One consistent-enough read of everything the engine consumes.
///
/// Clients are deliberately absent: they never feed the report.
struct CollectionSnapshot {
    services: Vec<Service>,
    products: Vec<Product>,
    staff: Vec<StaffMember>,
    transactions: Vec<SaleTransaction>,
    expenses: Vec<Expense>,
}

impl CollectionSnapshot {
    /// Loads all five collections concurrently.
    async fn load(store: &Store) -> StoreResult<Self> {
        let services_repo = store.services();
        let products_repo = store.products();
        let staff_repo = store.staff();
        let transactions_repo = store.transactions();
        let expenses_repo = store.expenses();
        let (services, products, staff, transactions, expenses) = tokio::try_join!(
            services_repo.list(),
            products_repo.list(),
            staff_repo.list(),
            transactions_repo.list(),
            expenses_repo.list(),
        )?;

        Ok(CollectionSnapshot {
            services,
            products,
            staff,
            transactions,
            expenses,
        })
    }

    fn compute(&self, range: DateRange) -> Report {
        compute_report(
            &self.services,
            &self.products,
            &self.staff,
            &self.transactions,
            &self.expenses,
            range,
        )
    }
}

// =============================================================================
// Report Feed
// =============================================================================

/// Handle to the live report coordinator.
///
/// Dropping the handle does not stop the worker; call [`ReportFeed::shutdown`]
/// for a clean stop (the worker also stops when the store's change feed
/// closes).
#[derive(Debug)]
pub struct ReportFeed {
    report_rx: watch::Receiver<Report>,
    range_tx: watch::Sender<DateRange>,
    shutdown_tx: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl ReportFeed {
    /// Starts the coordinator for a store, computing the initial report
    /// before returning.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let feed = ReportFeed::spawn(store.clone(), DatePreset::Today.resolve(today)).await?;
    /// let report = feed.report();
    /// ```
    pub async fn spawn(store: Store, range: DateRange) -> LiveResult<Self> {
        let snapshot = CollectionSnapshot::load(&store).await?;
        let initial = snapshot.compute(range);

        let (report_tx, report_rx) = watch::channel(initial);
        let (range_tx, range_rx) = watch::channel(range);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let changes_rx = store.changes().subscribe();

        info!(start = %range.start, end = %range.end, "Starting report feed");

        let worker = tokio::spawn(worker_loop(
            store,
            report_tx,
            range_rx,
            changes_rx,
            shutdown_rx,
        ));

        Ok(ReportFeed {
            report_rx,
            range_tx,
            shutdown_tx,
            worker,
        })
    }

    /// Returns the current report (cheap clone of the latest value).
    pub fn report(&self) -> Report {
        self.report_rx.borrow().clone()
    }

    /// Subscribes to report updates.
    ///
    /// `recv.changed().await` resolves whenever a fresh report is published.
    pub fn subscribe(&self) -> watch::Receiver<Report> {
        self.report_rx.clone()
    }

    /// Returns the date range the feed is currently reporting on.
    pub fn range(&self) -> DateRange {
        *self.range_tx.borrow()
    }

    /// Changes the date range; the worker recomputes immediately.
    pub fn set_range(&self, range: DateRange) -> LiveResult<()> {
        debug!(start = %range.start, end = %range.end, "Changing report range");
        self.range_tx
            .send(range)
            .map_err(|_| LiveError::Stopped)
    }

    /// Applies a quick preset resolved against today's date.
    pub fn use_preset(&self, preset: DatePreset) -> LiveResult<()> {
        let today = Utc::now().date_naive();
        self.set_range(preset.resolve(today))
    }

    /// Stops the worker and waits for it to finish.
    pub async fn shutdown(self) {
        info!("Shutting down report feed");
        let _ = self.shutdown_tx.send(true);
        let _ = self.worker.await;
    }
}

// =============================================================================
// Worker
// =============================================================================

async fn worker_loop(
    store: Store,
    report_tx: watch::Sender<Report>,
    mut range_rx: watch::Receiver<DateRange>,
    mut changes_rx: broadcast::Receiver<barberia_store::Collection>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                debug!("Report feed worker received shutdown");
                break;
            }

            changed = range_rx.changed() => {
                if changed.is_err() {
                    // All handles dropped; nobody can steer the feed anymore
                    debug!("Range channel closed, stopping report feed worker");
                    break;
                }
                recompute(&store, &report_tx, &range_rx).await;
            }

            msg = changes_rx.recv() => match msg {
                Ok(collection) if collection.feeds_report() => {
                    debug!(?collection, "Store change, recomputing report");
                    recompute(&store, &report_tx, &range_rx).await;
                }
                Ok(collection) => {
                    debug!(?collection, "Store change ignored (not a report input)");
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Missed notifications are harmless: one recompute from
                    // current state covers them all.
                    warn!(skipped, "Change feed lagged, recomputing once");
                    recompute(&store, &report_tx, &range_rx).await;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("Change feed closed, stopping report feed worker");
                    break;
                }
            },
        }
    }
}

/// Reloads the snapshot and publishes a fresh report.
///
/// On a store error the last good report stays published; the next change
/// notification retries naturally.
async fn recompute(
    store: &Store,
    report_tx: &watch::Sender<Report>,
    range_rx: &watch::Receiver<DateRange>,
) {
    let range = *range_rx.borrow();

    match CollectionSnapshot::load(store).await {
        Ok(snapshot) => {
            let report = snapshot.compute(range);
            report_tx.send_replace(report);
        }
        Err(err) => {
            warn!(error = %err, "Snapshot load failed, keeping previous report");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
