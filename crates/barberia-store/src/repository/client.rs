//! # Client Repository
//!
//! Database operations for the client book.
//!
//! Clients are informational: they never feed the report engine, the
//! dashboard uses them for the client list and the WhatsApp shortcut.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::changes::{ChangeFeed, Collection};
use crate::error::{StoreError, StoreResult};
use crate::repository::generate_record_id;
use barberia_core::money::Money;
use barberia_core::types::Client;
use barberia_core::validation::{validate_name, validate_phone};

/// Repository for client book operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool, changes: ChangeFeed) -> Self {
        ClientRepository { pool, changes }
    }

    /// Lists all clients, most recently registered first.
    pub async fn list(&self) -> StoreResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, first_name, last_name, phone, notes,
                   visit_count, total_spent, created_at
            FROM clients
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    /// Registers a new client with zeroed visit counters.
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        phone: &str,
        notes: &str,
    ) -> StoreResult<Client> {
        validate_name(first_name)?;
        validate_name(last_name)?;
        validate_phone(phone)?;

        let client = Client {
            id: generate_record_id(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            phone: phone.trim().to_string(),
            notes: notes.trim().to_string(),
            visit_count: 0,
            total_spent: Money::zero(),
            created_at: Utc::now(),
        };

        debug!(id = %client.id, "Registering client");

        sqlx::query(
            r#"
            INSERT INTO clients (id, first_name, last_name, phone, notes,
                                 visit_count, total_spent, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&client.id)
        .bind(&client.first_name)
        .bind(&client.last_name)
        .bind(&client.phone)
        .bind(&client.notes)
        .bind(client.visit_count)
        .bind(client.total_spent)
        .bind(client.created_at)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Collection::Clients);
        Ok(client)
    }

    /// Records a paid visit: bumps the counter and adds to the running total.
    pub async fn record_visit(&self, id: &str, spent: Money) -> StoreResult<()> {
        debug!(id = %id, spent = %spent, "Recording client visit");

        let result = sqlx::query(
            r#"
            UPDATE clients
            SET visit_count = visit_count + 1,
                total_spent = total_spent + ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(spent)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Client", id));
        }

        self.changes.publish(Collection::Clients);
        Ok(())
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

    async fn test_store() -> Store {
        Store::new(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let store = test_store().await;
        let repo = store.clients();

        let client = repo
            .create("Martín", "Gómez", "+54 11 5555-1234", "Prefiere degradé")
            .await
            .unwrap();

        let clients = repo.list().await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0], client);
        assert_eq!(clients[0].visit_count, 0);
        assert_eq!(clients[0].total_spent, Money::zero());
    }

    #[tokio::test]
    async fn test_record_visit() {
        let store = test_store().await;
        let repo = store.clients();

        let client = repo.create("Martín", "Gómez", "", "").await.unwrap();

        repo.record_visit(&client.id, Money::from_units(8000))
            .await
            .unwrap();
        repo.record_visit(&client.id, Money::from_units(4000))
            .await
            .unwrap();

        let clients = repo.list().await.unwrap();
        assert_eq!(clients[0].visit_count, 2);
        assert_eq!(clients[0].total_spent, Money::from_units(12000));

        let err = repo
            .record_visit("missing", Money::from_units(100))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_phone() {
        let store = test_store().await;

        let err = store
            .clients()
            .create("Martín", "Gómez", "call me", "")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
