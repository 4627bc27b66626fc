//! # Transaction Repository
//!
//! Database operations for the sale ledger, including the stock rule.
//!
//! ## The Atomic Stock Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      record_sale (product)                              │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  SELECT name, unit_price FROM products WHERE id = ?                     │
//! │    │── no row → ROLLBACK, NotFound                                      │
//! │    ▼                                                                    │
//! │  UPDATE products                                                        │
//! │     SET stock_count = stock_count - 1                                   │
//! │   WHERE id = ? AND stock_count > 0      ← the guard IS the decrement    │
//! │    │── 0 rows → ROLLBACK, OutOfStock                                    │
//! │    ▼                                                                    │
//! │  INSERT INTO transactions (..., price = snapshot, ...)                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Two terminals racing for the last unit: SQLite serializes the          │
//! │  UPDATEs, exactly one matches stock_count > 0, the other rolls          │
//! │  back with OutOfStock and writes nothing.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! The INSERT copies the catalog price into the ledger row. Catalog edits
//! and deletions never rewrite what was charged.

use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::changes::{ChangeFeed, Collection};
use crate::error::{StoreError, StoreResult};
use crate::repository::generate_record_id;
use barberia_core::money::Money;
use barberia_core::types::{SaleKind, SaleTransaction};

/// Repository for sale ledger operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool, changes: ChangeFeed) -> Self {
        TransactionRepository { pool, changes }
    }

    /// Lists all transactions, newest first.
    pub async fn list(&self) -> StoreResult<Vec<SaleTransaction>> {
        let transactions = sqlx::query_as::<_, SaleTransaction>(
            r#"
            SELECT id, staff_id, kind, item_id, price, date_stamp, created_at
            FROM transactions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Lists transactions within an inclusive date range.
    pub async fn list_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<SaleTransaction>> {
        let transactions = sqlx::query_as::<_, SaleTransaction>(
            r#"
            SELECT id, staff_id, kind, item_id, price, date_stamp, created_at
            FROM transactions
            WHERE date_stamp BETWEEN ?1 AND ?2
            ORDER BY created_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Records a sale, applying the stock rule for products.
    ///
    /// ## Arguments
    /// * `staff_id` - The staff member the sale is attributed to
    /// * `kind` - Service or product
    /// * `item_id` - Catalog reference named by `kind`
    /// * `date_stamp` - Calendar date the sale belongs to
    ///
    /// ## Returns
    /// * `Ok(SaleTransaction)` - The appended ledger row with the price
    ///   snapshotted from the catalog
    /// * `Err(StoreError::NotFound)` - Unknown staff member or catalog item
    /// * `Err(StoreError::OutOfStock)` - Product with no units left; the
    ///   ledger and the stock are both untouched
    pub async fn record_sale(
        &self,
        staff_id: &str,
        kind: SaleKind,
        item_id: &str,
        date_stamp: NaiveDate,
    ) -> StoreResult<SaleTransaction> {
        debug!(staff_id = %staff_id, ?kind, item_id = %item_id, "Recording sale");

        // Sales must be attributable at write time. (The engine tolerates
        // dangling staff ids in old data, but we don't create new ones.)
        let staff_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff WHERE id = ?1")
            .bind(staff_id)
            .fetch_one(&self.pool)
            .await?;
        if staff_exists == 0 {
            return Err(StoreError::not_found("Staff member", staff_id));
        }

        let mut tx = self.pool.begin().await?;

        // Snapshot the catalog price inside the transaction, so the price
        // we freeze and the stock we decrement belong to the same moment.
        let price = match kind {
            SaleKind::Service => {
                let row = sqlx::query("SELECT unit_price FROM services WHERE id = ?1")
                    .bind(item_id)
                    .fetch_optional(&mut *tx)
                    .await?;

                match row {
                    Some(row) => row.try_get::<Money, _>("unit_price")?,
                    None => return Err(StoreError::not_found("Service", item_id)),
                }
            }
            SaleKind::Product => {
                let row = sqlx::query("SELECT name, unit_price FROM products WHERE id = ?1")
                    .bind(item_id)
                    .fetch_optional(&mut *tx)
                    .await?;

                let (name, price) = match row {
                    Some(row) => (
                        row.try_get::<String, _>("name")?,
                        row.try_get::<Money, _>("unit_price")?,
                    ),
                    None => return Err(StoreError::not_found("Product", item_id)),
                };

                // The guard and the decrement are one statement: matching
                // zero rows means someone else took the last unit.
                let result = sqlx::query(
                    r#"
                    UPDATE products
                    SET stock_count = stock_count - 1
                    WHERE id = ?1 AND stock_count > 0
                    "#,
                )
                .bind(item_id)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(StoreError::out_of_stock(name));
                }

                price
            }
        };

        let sale = SaleTransaction {
            id: generate_record_id(),
            staff_id: staff_id.to_string(),
            kind,
            item_id: item_id.to_string(),
            price,
            date_stamp,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO transactions (id, staff_id, kind, item_id, price, date_stamp, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.staff_id)
        .bind(sale.kind)
        .bind(&sale.item_id)
        .bind(sale.price)
        .bind(sale.date_stamp)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(id = %sale.id, price = %sale.price, "Sale recorded");

        if kind == SaleKind::Product {
            self.changes.publish(Collection::Products);
        }
        self.changes.publish(Collection::Transactions);

        Ok(sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::pool::{Store, StoreConfig};
    use barberia_core::money::Money;
    use barberia_core::types::{CommissionRate, SaleKind};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn test_store() -> Store {
        Store::new(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_service_sale_snapshots_price() {
        let store = test_store().await;

        let lucas = store
            .staff()
            .create("Lucas", "Perez", CommissionRate::from_percent(60))
            .await
            .unwrap();
        let corte = store
            .services()
            .create("Corte Clásico", Money::from_units(8000))
            .await
            .unwrap();

        let sale = store
            .transactions()
            .record_sale(&lucas.id, SaleKind::Service, &corte.id, date("2024-06-01"))
            .await
            .unwrap();

        assert_eq!(sale.price, Money::from_units(8000));
        assert_eq!(sale.kind, SaleKind::Service);

        // Deleting the service leaves the ledger row intact
        store.services().delete(&corte.id).await.unwrap();
        let ledger = store.transactions().list().await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].price, Money::from_units(8000));
    }

    #[tokio::test]
    async fn test_product_sale_decrements_stock() {
        let store = test_store().await;

        let lucas = store
            .staff()
            .create("Lucas", "Perez", CommissionRate::from_percent(60))
            .await
            .unwrap();
        let cera = store
            .products()
            .create(
                "Cera Mate",
                Money::from_units(5000),
                10,
                Money::from_units(2500),
                CommissionRate::from_percent(10),
            )
            .await
            .unwrap();

        store
            .transactions()
            .record_sale(&lucas.id, SaleKind::Product, &cera.id, date("2024-06-01"))
            .await
            .unwrap();

        let fetched = store.products().get_by_id(&cera.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock_count, 9);
    }

    #[tokio::test]
    async fn test_stock_exhaustion_rejects_fourth_sale() {
        let store = test_store().await;

        let lucas = store
            .staff()
            .create("Lucas", "Perez", CommissionRate::from_percent(60))
            .await
            .unwrap();
        let cera = store
            .products()
            .create(
                "Cera Mate",
                Money::from_units(5000),
                3,
                Money::from_units(2500),
                CommissionRate::from_percent(10),
            )
            .await
            .unwrap();

        let repo = store.transactions();
        for _ in 0..3 {
            repo.record_sale(&lucas.id, SaleKind::Product, &cera.id, date("2024-06-01"))
                .await
                .unwrap();
        }

        let err = repo
            .record_sale(&lucas.id, SaleKind::Product, &cera.id, date("2024-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::OutOfStock { .. }));
        assert_eq!(err.to_string(), "Cera Mate is out of stock");

        // The rejected sale wrote nothing: three ledger rows, zero stock
        assert_eq!(repo.list().await.unwrap().len(), 3);
        let fetched = store.products().get_by_id(&cera.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock_count, 0);
    }

    #[tokio::test]
    async fn test_zero_stock_product_is_rejected_outright() {
        let store = test_store().await;

        let lucas = store
            .staff()
            .create("Lucas", "Perez", CommissionRate::from_percent(60))
            .await
            .unwrap();
        let product = store
            .products()
            .create(
                "Minoxidil",
                Money::from_units(9000),
                0,
                Money::from_units(6000),
                CommissionRate::from_percent(15),
            )
            .await
            .unwrap();

        let err = store
            .transactions()
            .record_sale(&lucas.id, SaleKind::Product, &product.id, date("2024-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::OutOfStock { .. }));
        assert!(store.transactions().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_staff_or_item_is_not_found() {
        let store = test_store().await;

        let lucas = store
            .staff()
            .create("Lucas", "Perez", CommissionRate::from_percent(60))
            .await
            .unwrap();

        let err = store
            .transactions()
            .record_sale("ghost", SaleKind::Service, "s-any", date("2024-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        let err = store
            .transactions()
            .record_sale(&lucas.id, SaleKind::Service, "s-missing", date("2024-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_in_range_is_inclusive() {
        let store = test_store().await;

        let lucas = store
            .staff()
            .create("Lucas", "Perez", CommissionRate::from_percent(60))
            .await
            .unwrap();
        let corte = store
            .services()
            .create("Corte Clásico", Money::from_units(8000))
            .await
            .unwrap();

        let repo = store.transactions();
        for day in ["2024-05-31", "2024-06-01", "2024-06-30", "2024-07-01"] {
            repo.record_sale(&lucas.id, SaleKind::Service, &corte.id, date(day))
                .await
                .unwrap();
        }

        let june = repo
            .list_in_range(date("2024-06-01"), date("2024-06-30"))
            .await
            .unwrap();
        assert_eq!(june.len(), 2);
    }

    #[tokio::test]
    async fn test_record_sale_publishes_changes() {
        let store = test_store().await;

        let lucas = store
            .staff()
            .create("Lucas", "Perez", CommissionRate::from_percent(60))
            .await
            .unwrap();
        let corte = store
            .services()
            .create("Corte Clásico", Money::from_units(8000))
            .await
            .unwrap();

        let mut rx = store.changes().subscribe();

        store
            .transactions()
            .record_sale(&lucas.id, SaleKind::Service, &corte.id, date("2024-06-01"))
            .await
            .unwrap();

        use crate::changes::Collection;
        assert_eq!(rx.recv().await.unwrap(), Collection::Transactions);
    }
}
