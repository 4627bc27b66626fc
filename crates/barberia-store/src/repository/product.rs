//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Stock Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHO MAY TOUCH stock_count                                              │
//! │                                                                         │
//! │  • create()   - sets the initial count                                 │
//! │  • restock()  - adds a positive delta                                  │
//! │  • TransactionRepository::record_sale() - decrements by exactly one,   │
//! │    atomically with the ledger insert                                   │
//! │                                                                         │
//! │  There is NO absolute set_stock: all mutations are deltas, so a        │
//! │  concurrent sale can never be silently overwritten.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::changes::{ChangeFeed, Collection};
use crate::error::{StoreError, StoreResult};
use crate::repository::generate_record_id;
use barberia_core::money::Money;
use barberia_core::types::{CommissionRate, Product};
use barberia_core::validation::{
    validate_commission_percent, validate_name, validate_price, validate_stock_count,
};

/// Repository for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool, changes: ChangeFeed) -> Self {
        ProductRepository { pool, changes }
    }

    /// Lists all products, sorted by name.
    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, unit_price, stock_count, unit_cost, commission_percent
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, unit_price, stock_count, unit_cost, commission_percent
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Creates a new product.
    ///
    /// ## Arguments
    /// * `name` - Display name
    /// * `unit_price` - Sale price (must be positive)
    /// * `stock_count` - Initial units on hand (must be >= 0)
    /// * `unit_cost` - Acquisition cost, for margin display
    /// * `commission` - Commission override for the selling staff member
    pub async fn create(
        &self,
        name: &str,
        unit_price: Money,
        stock_count: i64,
        unit_cost: Money,
        commission: CommissionRate,
    ) -> StoreResult<Product> {
        validate_name(name)?;
        validate_price(unit_price.units())?;
        validate_stock_count(stock_count)?;
        validate_commission_percent(i64::from(commission.percent()))?;

        let product = Product {
            id: generate_record_id(),
            name: name.trim().to_string(),
            unit_price,
            stock_count,
            unit_cost,
            commission_percent: commission,
        };

        debug!(id = %product.id, name = %product.name, stock = product.stock_count, "Creating product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, unit_price, stock_count, unit_cost, commission_percent)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.unit_price)
        .bind(product.stock_count)
        .bind(product.unit_cost)
        .bind(product.commission_percent)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Collection::Products);
        Ok(product)
    }

    /// Adds units to a product's stock.
    ///
    /// Delta-based on purpose: `stock_count + delta` composes with a
    /// concurrent sale's decrement, an absolute write would not.
    ///
    /// ## Arguments
    /// * `id` - Product ID
    /// * `delta` - Units received (must be positive)
    pub async fn restock(&self, id: &str, delta: i64) -> StoreResult<()> {
        if delta <= 0 {
            return Err(barberia_core::error::ValidationError::MustBePositive {
                field: "delta".to_string(),
            }
            .into());
        }

        debug!(id = %id, delta = delta, "Restocking product");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock_count = stock_count + ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", id));
        }

        self.changes.publish(Collection::Products);
        Ok(())
    }

    /// Counts products (for diagnostics and seed checks).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
