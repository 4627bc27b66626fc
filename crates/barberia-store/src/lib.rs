//! # barberia-store: Record Store for the Barbería Panel
//!
//! This crate provides persistence for the dashboard.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Barbería Panel Data Flow                            │
//! │                                                                         │
//! │  Caller (UI command / live coordinator)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 barberia-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌──────────────┐    │   │
//! │  │   │     Store     │   │  Repositories │   │  Migrations  │    │   │
//! │  │   │   (pool.rs)   │   │ (6 collections│   │  (embedded)  │    │   │
//! │  │   │               │◄──│  + stock rule)│   │ 001_init.sql │    │   │
//! │  │   └───────┬───────┘   └───────────────┘   └──────────────┘    │   │
//! │  │           │                                                     │   │
//! │  │           ▼                                                     │   │
//! │  │   ┌───────────────┐     one notification per write             │   │
//! │  │   │  ChangeFeed   │ ──────────────────────────────► listeners  │   │
//! │  │   └───────────────┘                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (WAL mode)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`changes`] - Change feed (broadcast notifications)
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations per collection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use barberia_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("path/to/barberia.db")).await?;
//!
//! let staff = store.staff().list().await?;
//! let sale = store
//!     .transactions()
//!     .record_sale(&staff[0].id, SaleKind::Service, &service_id, today)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod changes;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use changes::{ChangeFeed, Collection};
pub use error::{StoreError, StoreResult};
pub use pool::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::product::ProductRepository;
pub use repository::service::ServiceRepository;
pub use repository::staff::StaffRepository;
pub use repository::transaction::TransactionRepository;
