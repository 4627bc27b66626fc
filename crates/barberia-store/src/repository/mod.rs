//! # Repository Module
//!
//! Repository implementations for each record collection.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Repository Pattern                                  │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │ store.transactions().record_sale(...)                          │
//! │       ▼                                                                 │
//! │  Repository (this module) ← SQL lives here, nowhere else               │
//! │       │                                                                 │
//! │       ├── validates input (barberia-core::validation)                  │
//! │       ├── executes query / transaction                                 │
//! │       └── publishes on the change feed after a successful write        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Collections
//! - [`service`] - Service catalog (create, list, hard delete)
//! - [`product`] - Product catalog (create, list, restock)
//! - [`staff`] - Staff registry (create, list, toggle active)
//! - [`client`] - Client book (create, list)
//! - [`expense`] - Expense ledger (append-only)
//! - [`transaction`] - Sale ledger (append-only, owns the stock rule)

pub mod client;
pub mod expense;
pub mod product;
pub mod service;
pub mod staff;
pub mod transaction;

use uuid::Uuid;

/// Generates a new record id.
///
/// UUID v4: globally unique without coordination.
pub(crate) fn generate_record_id() -> String {
    Uuid::new_v4().to_string()
}
