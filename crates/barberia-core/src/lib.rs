//! # barberia-core: Pure Business Logic for the Barbería Panel
//!
//! This crate is the **heart** of the dashboard. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Barbería Panel Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Operator UI (out of scope)                   │   │
//! │  │    Dashboard ──► Payroll ──► Clients ──► Inventory ──► Config   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    barberia-live                                │   │
//! │  │    ReportFeed: recompute Report on every collection change      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ barberia-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  report   │  │   dates   │  │   │
//! │  │   │  Service  │  │   Money   │  │  Report   │  │ DatePreset│  │   │
//! │  │   │  Product  │  │ Commission│  │  engine   │  │ DateRange │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 barberia-store (Record Store)                   │   │
//! │  │          SQLite repositories, migrations, change feed           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Service, Product, StaffMember, Expense, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`report`] - The payroll aggregation engine
//! - [`dates`] - Quick date-range presets (today / week / month)
//! - [`error`] - Domain error types
//! - [`validation`] - Input guards applied before store writes
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: `compute_report` is deterministic - same input = same Report
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole currency units (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use barberia_core::money::Money;
//! use barberia_core::types::CommissionRate;
//!
//! // Create money from whole currency units (never from floats!)
//! let price = Money::from_units(8000);
//!
//! // A staff member on 60% commission earns 4800 on this job
//! let rate = CommissionRate::from_percent(60);
//! assert_eq!(price.commission(rate).units(), 4800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dates;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use barberia_core::Money` instead of
// `use barberia_core::money::Money`

pub use dates::DatePreset;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use report::{compute_report, Report, StaffReport};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Commission applied to a product sale whose product record no longer
/// resolves.
///
/// ## Why a constant?
/// The ledger is append-only: a transaction may outlive the product it
/// references. Rather than erroring, the engine degrades to this documented
/// default so historical payroll stays computable. Flagged for product-owner
/// confirmation; see DESIGN.md.
pub const FALLBACK_PRODUCT_COMMISSION: types::CommissionRate =
    types::CommissionRate::from_percent(10);

/// Breakdown label used when a service reference no longer resolves.
pub const UNRESOLVED_SERVICE_LABEL: &str = "Service";

/// Breakdown label used when a product reference no longer resolves.
pub const UNRESOLVED_PRODUCT_LABEL: &str = "Product";

/// Maximum length accepted for names and descriptions.
///
/// ## Business Reason
/// Prevents runaway input from the record forms; generous enough for any
/// real service or expense description.
pub const MAX_NAME_LEN: usize = 120;
