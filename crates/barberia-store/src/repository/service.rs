//! # Service Repository
//!
//! Database operations for the service catalog.
//!
//! ## Deletion Semantics
//! Services are hard-deleted: the ledger snapshots the price and the name
//! resolution degrades to a placeholder label, so history survives without
//! the row.

use sqlx::SqlitePool;
use tracing::debug;

use crate::changes::{ChangeFeed, Collection};
use crate::error::{StoreError, StoreResult};
use crate::repository::generate_record_id;
use barberia_core::money::Money;
use barberia_core::types::Service;
use barberia_core::validation::{validate_name, validate_price};

/// Repository for service catalog operations.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl ServiceRepository {
    /// Creates a new ServiceRepository.
    pub fn new(pool: SqlitePool, changes: ChangeFeed) -> Self {
        ServiceRepository { pool, changes }
    }

    /// Lists all services, sorted by name.
    pub async fn list(&self) -> StoreResult<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(
            r#"
            SELECT id, name, unit_price
            FROM services
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// Creates a new service.
    ///
    /// ## Returns
    /// * `Ok(Service)` - The created record with its generated id
    /// * `Err(StoreError::Validation)` - Empty name or non-positive price
    pub async fn create(&self, name: &str, unit_price: Money) -> StoreResult<Service> {
        validate_name(name)?;
        validate_price(unit_price.units())?;

        let service = Service {
            id: generate_record_id(),
            name: name.trim().to_string(),
            unit_price,
        };

        debug!(id = %service.id, name = %service.name, "Creating service");

        sqlx::query(
            r#"
            INSERT INTO services (id, name, unit_price)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&service.id)
        .bind(&service.name)
        .bind(service.unit_price)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Collection::Services);
        Ok(service)
    }

    /// Deletes a service.
    ///
    /// Historical transactions referencing it keep their snapshotted price;
    /// only future name resolution is affected.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - Service doesn't exist
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting service");

        let result = sqlx::query("DELETE FROM services WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Service", id));
        }

        self.changes.publish(Collection::Services);
        Ok(())
    }

    /// Counts services (for diagnostics and seed checks).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
