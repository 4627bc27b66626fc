//! # Expense Repository
//!
//! Database operations for the expense ledger.
//!
//! ## Append-Only
//! Expenses have no update or delete: the ledger is an audit trail. A
//! mistaken entry is corrected by agreement with the operator, not by
//! rewriting history.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::changes::{ChangeFeed, Collection};
use crate::error::StoreResult;
use crate::repository::generate_record_id;
use barberia_core::money::Money;
use barberia_core::types::{Expense, ExpenseTarget};
use barberia_core::validation::{validate_expense_amount, validate_name};

/// Repository for expense ledger operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
    changes: ChangeFeed,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool, changes: ChangeFeed) -> Self {
        ExpenseRepository { pool, changes }
    }

    /// Lists all expenses, newest first.
    pub async fn list(&self) -> StoreResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, amount, staff_id, date_stamp, created_at
            FROM expenses
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Lists expenses within an inclusive date range.
    ///
    /// date_stamp is an ISO calendar date string, so BETWEEN on the text
    /// column is exactly the chronological filter.
    pub async fn list_in_range(&self, start: NaiveDate, end: NaiveDate) -> StoreResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, amount, staff_id, date_stamp, created_at
            FROM expenses
            WHERE date_stamp BETWEEN ?1 AND ?2
            ORDER BY created_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Appends an expense to the ledger.
    ///
    /// ## Arguments
    /// * `description` - What the money went to
    /// * `amount` - Positive amount in whole currency units
    /// * `target` - Shop-level, or a personal deduction for one staff member
    /// * `date_stamp` - Calendar date the expense belongs to
    pub async fn create(
        &self,
        description: &str,
        amount: Money,
        target: ExpenseTarget,
        date_stamp: NaiveDate,
    ) -> StoreResult<Expense> {
        validate_name(description)?;
        validate_expense_amount(amount.units())?;

        let expense = Expense {
            id: generate_record_id(),
            description: description.trim().to_string(),
            amount,
            target,
            date_stamp,
            created_at: Utc::now(),
        };

        debug!(
            id = %expense.id,
            amount = %expense.amount,
            staff_id = ?expense.target.staff_id(),
            "Recording expense"
        );

        sqlx::query(
            r#"
            INSERT INTO expenses (id, description, amount, staff_id, date_stamp, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(expense.target.staff_id())
        .bind(expense.date_stamp)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Collection::Expenses);
        Ok(expense)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
