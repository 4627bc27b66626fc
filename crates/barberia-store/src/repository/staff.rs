//! # Staff Repository
//!
//! Database operations for the staff registry.
//!
//! ## Never Delete
//! The sale ledger attributes every transaction to a staff id forever.
//! Deleting a row would turn that history into dangling references, so the
//! registry only toggles `active` and the dashboard hides inactive members.

use sqlx::SqlitePool;
use tracing::debug;

use crate::changes::{ChangeFeed, Collection};
use crate::error::{StoreError, StoreResult};
use crate::repository::generate_record_id;
use barberia_core::types::{CommissionRate, StaffMember};
use barberia_core::validation::{validate_commission_percent, validate_name};

/// Repository for staff registry operations.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl StaffRepository {
    /// Creates a new StaffRepository.
    pub fn new(pool: SqlitePool, changes: ChangeFeed) -> Self {
        StaffRepository { pool, changes }
    }

    /// Lists all staff members, active and inactive, sorted by first name.
    ///
    /// The report engine needs the full registry; hiding inactive members
    /// is the dashboard's job.
    pub async fn list(&self) -> StoreResult<Vec<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>(
            r#"
            SELECT id, first_name, last_name, active, commission_percent
            FROM staff
            ORDER BY first_name, last_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Creates a new staff member, active by default.
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        commission: CommissionRate,
    ) -> StoreResult<StaffMember> {
        validate_name(first_name)?;
        validate_name(last_name)?;
        validate_commission_percent(i64::from(commission.percent()))?;

        let member = StaffMember {
            id: generate_record_id(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            active: true,
            commission_percent: commission,
        };

        debug!(id = %member.id, name = %member.full_name(), "Creating staff member");

        sqlx::query(
            r#"
            INSERT INTO staff (id, first_name, last_name, active, commission_percent)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&member.id)
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(member.active)
        .bind(member.commission_percent)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Collection::Staff);
        Ok(member)
    }

    /// Toggles a staff member's active flag.
    ///
    /// ## Returns
    /// * `Err(StoreError::NotFound)` - Member doesn't exist
    pub async fn set_active(&self, id: &str, active: bool) -> StoreResult<()> {
        debug!(id = %id, active = active, "Updating staff active flag");

        let result = sqlx::query("UPDATE staff SET active = ?2 WHERE id = ?1")
            .bind(id)
            .bind(active)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Staff member", id));
        }

        self.changes.publish(Collection::Staff);
        Ok(())
    }

    /// Checks whether a staff id exists in the registry.
    pub async fn exists(&self, id: &str) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM staff WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
