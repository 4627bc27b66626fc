//! # Validation Module
//!
//! Input validation utilities for the Barbería Panel.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Operator form                                                │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate feedback                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation before any record is written             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK (stock_count >= 0)                                          │
//! │  └── CHECK (kind IN ('service', 'product'))                            │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use barberia_core::validation::{validate_name, validate_commission_percent};
//!
//! validate_name("Corte Clásico").unwrap();
//! validate_commission_percent(60).unwrap();
//! ```

use crate::error::ValidationError;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name or expense description.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most MAX_NAME_LEN characters
///
/// ## Example
/// ```rust
/// use barberia_core::validation::validate_name;
///
/// assert!(validate_name("Corte Clásico").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name(&"A".repeat(500)).is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a client phone number.
///
/// ## Rules
/// - Can be empty (the field is optional on the client form)
/// - Otherwise digits, spaces, and the symbols `+ - ( )` only
/// - Maximum 30 characters
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Ok(());
    }

    if phone.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 30,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == '(' || c == ')' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, and + - ( )".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog price in whole currency units.
///
/// ## Rules
/// - Must be positive (> 0); a free service is a data-entry mistake here
///
/// ## Example
/// ```rust
/// use barberia_core::validation::validate_price;
///
/// assert!(validate_price(8000).is_ok());
/// assert!(validate_price(0).is_err());
/// assert!(validate_price(-100).is_err());
/// ```
pub fn validate_price(units: i64) -> ValidationResult<()> {
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an expense amount in whole currency units.
///
/// ## Rules
/// - Must be positive (> 0); "negative expenses" are not how refunds are
///   modeled, the ledger stays append-only
pub fn validate_expense_amount(units: i64) -> ValidationResult<()> {
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock count entered on the product form or a restock delta.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero means "listed but unavailable"
pub fn validate_stock_count(count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stockCount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a commission percentage.
///
/// ## Rules
/// - Must be between 0 and 100 inclusive
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Staff form: Commission                                                 │
/// │                                                                         │
/// │  Operator enters: 60                                                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_commission_percent(60) ← THIS FUNCTION                       │
/// │       │                                                                 │
/// │       ├── pct > 100? → Error: "must be between 0 and 100"              │
/// │       │                                                                 │
/// │       └── OK → CommissionRate::from_percent(60)                        │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_commission_percent(pct: i64) -> ValidationResult<()> {
    if !(0..=100).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "commissionPercent".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Record Id Validators
// =============================================================================

/// Validates a record id string format.
///
/// ## Rules
/// - Must be a valid UUID format (ids are generated with uuid v4)
///
/// ## Example
/// ```rust
/// use barberia_core::validation::validate_record_id;
///
/// assert!(validate_record_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_record_id("not-an-id").is_err());
/// ```
pub fn validate_record_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
