//! # Domain Types
//!
//! Core domain types for the Barbería Panel.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog                  Registry                Ledger (append-only)  │
//! │  ┌───────────────┐        ┌───────────────┐       ┌──────────────────┐  │
//! │  │   Service     │        │  StaffMember  │       │ SaleTransaction  │  │
//! │  │  ───────────  │        │  ───────────  │       │  ──────────────  │  │
//! │  │  id           │        │  id           │       │  id              │  │
//! │  │  name         │        │  firstName    │       │  staffId         │  │
//! │  │  unitPrice    │        │  lastName     │       │  kind (svc/prod) │  │
//! │  └───────────────┘        │  active       │       │  itemId          │  │
//! │  ┌───────────────┐        │  commission%  │       │  price (frozen)  │  │
//! │  │   Product     │        └───────────────┘       │  dateStamp       │  │
//! │  │  ───────────  │        ┌───────────────┐       └──────────────────┘  │
//! │  │  id, name     │        │    Client     │       ┌──────────────────┐  │
//! │  │  unitPrice    │        │ (informational│       │     Expense      │  │
//! │  │  stockCount   │        │  only, not an │       │  ──────────────  │  │
//! │  │  unitCost     │        │  engine input)│       │  staffId: Shop | │  │
//! │  │  commission%  │        └───────────────┘       │   Staff(id)      │  │
//! │  └───────────────┘                                └──────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Compatibility
//! The serde names reproduce the persisted record shapes exactly
//! (`staffId`, `itemId`, `dateStamp`, `createdAtTimestamp`, ...), so a
//! reimplementation can interoperate with previously stored data.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Commission Rate
// =============================================================================

/// Commission rate as a whole percentage (0-100).
///
/// ## Why Whole Percent?
/// The operator configures commissions as "60%", never fractions of a
/// percent. Keeping the raw u8 makes the stored value identical to what
/// the operator typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct CommissionRate(u8);

impl CommissionRate {
    /// Creates a commission rate from a whole percentage.
    ///
    /// Does not validate the range; `validation::validate_commission_percent`
    /// guards operator input before it reaches here.
    #[inline]
    pub const fn from_percent(pct: u8) -> Self {
        CommissionRate(pct)
    }

    /// Returns the rate as a whole percentage.
    #[inline]
    pub const fn percent(&self) -> u8 {
        self.0
    }

    /// Zero commission rate.
    #[inline]
    pub const fn zero() -> Self {
        CommissionRate(0)
    }
}

impl Default for CommissionRate {
    fn default() -> Self {
        CommissionRate::zero()
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive pair of calendar dates used to filter the ledger.
///
/// ## Permissive by Design
/// The engine does not validate ordering: if `start > end` every filter
/// yields the empty set and all totals are zero. Callers that want an error
/// for inverted ranges must check before filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new range. `start` and `end` are both inclusive.
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Range covering exactly one calendar day.
    pub const fn single_day(day: NaiveDate) -> Self {
        DateRange {
            start: day,
            end: day,
        }
    }

    /// Checks whether a date stamp falls inside the range, inclusive at
    /// both ends.
    ///
    /// `NaiveDate` ordering is chronological, which for ISO-8601 calendar
    /// dates is the same as the lexicographic ordering of their string form.
    #[inline]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

// =============================================================================
// Sale Kind
// =============================================================================

/// What kind of item a ledger transaction sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum SaleKind {
    /// A catalog service (haircut, beard trim, ...). No stock interaction.
    Service,
    /// A retail product. Each sale decrements stock by exactly one unit.
    Product,
}

// =============================================================================
// Service
// =============================================================================

/// A catalog service offered by the shop.
///
/// Immutable after creation except deletion. Deleting a service does not
/// retroactively alter historical transactions: the ledger snapshots the
/// price at sale time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Opaque unique id assigned by the store on creation.
    pub id: String,

    /// Display name shown on the dashboard and in breakdowns.
    pub name: String,

    /// Price in whole currency units.
    pub unit_price: Money,
}

// =============================================================================
// Product
// =============================================================================

/// A retail product with tracked stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque unique id assigned by the store on creation.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Sale price in whole currency units.
    pub unit_price: Money,

    /// Units on hand. Mutated only by the stock adjustment rule
    /// (and restocking); never negative.
    pub stock_count: i64,

    /// Acquisition cost, for margin display.
    pub unit_cost: Money,

    /// Commission override paid to the selling staff member, replacing
    /// their personal rate for product sales.
    pub commission_percent: CommissionRate,
}

impl Product {
    /// Checks if at least one unit is available for sale.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock_count > 0
    }

    /// Pure stock guard used before attempting a sale.
    ///
    /// The store performs the authoritative atomic check; this lets callers
    /// reject obviously doomed sales without a round trip.
    pub fn ensure_in_stock(&self) -> Result<(), CoreError> {
        if self.in_stock() {
            Ok(())
        } else {
            Err(CoreError::OutOfStock {
                product: self.name.clone(),
            })
        }
    }
}

// =============================================================================
// Staff Member
// =============================================================================

/// A staff member (barber) of the shop.
///
/// Staff are never deleted: `active` is toggled instead, which preserves
/// every historical attribution in the ledger and in computed reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    /// Opaque unique id assigned by the store on creation.
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    /// Whether the member currently appears on the dashboard. The report
    /// engine ignores this flag; filtering is a display concern.
    pub active: bool,

    /// Personal commission rate applied to service sales.
    pub commission_percent: CommissionRate,
}

impl StaffMember {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client record. Informational only: the aggregation engine never
/// consumes clients, they exist for the client-book view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Opaque unique id assigned by the store on creation.
    pub id: String,

    pub first_name: String,

    pub last_name: String,

    /// Contact phone, also used for the WhatsApp shortcut in the UI.
    pub phone: String,

    /// Free-form grooming notes.
    pub notes: String,

    pub visit_count: i64,

    pub total_spent: Money,

    /// When the client was registered.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Expense Target
// =============================================================================

/// Who an expense is charged against.
///
/// ## Why a Tagged Variant?
/// The stored shape uses `staffId: null` to mean "shop-level expense",
/// which conflates "unset" with "intentionally general". The enum makes
/// the intent explicit while `From`/`Into` keep the null-based wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ExpenseTarget {
    /// A shop-level outflow (rent, electricity, supplies). Deducted from
    /// shop profit, never from any staff payout.
    Shop,
    /// A personal deduction against the referenced staff member's payout
    /// (an advance, a consumed product, ...).
    Staff(String),
}

impl ExpenseTarget {
    /// Returns the staff id for personal deductions, `None` for shop-level.
    pub fn staff_id(&self) -> Option<&str> {
        match self {
            ExpenseTarget::Shop => None,
            ExpenseTarget::Staff(id) => Some(id),
        }
    }

    /// Checks if this is a shop-level expense.
    #[inline]
    pub fn is_shop(&self) -> bool {
        matches!(self, ExpenseTarget::Shop)
    }
}

impl From<Option<String>> for ExpenseTarget {
    fn from(staff_id: Option<String>) -> Self {
        match staff_id {
            None => ExpenseTarget::Shop,
            Some(id) => ExpenseTarget::Staff(id),
        }
    }
}

impl From<ExpenseTarget> for Option<String> {
    fn from(target: ExpenseTarget) -> Self {
        match target {
            ExpenseTarget::Shop => None,
            ExpenseTarget::Staff(id) => Some(id),
        }
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A recorded outflow. Immutable once created: no update operation exists,
/// the expense ledger is an audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Opaque unique id assigned by the store on creation.
    pub id: String,

    /// What the money went to ("Alquiler", "Cera", ...).
    pub description: String,

    /// Positive amount in whole currency units.
    pub amount: Money,

    /// Who pays: the shop or a specific staff member.
    #[serde(rename = "staffId")]
    pub target: ExpenseTarget,

    /// Calendar date used for range filtering (no time of day).
    pub date_stamp: NaiveDate,

    /// Creation instant, used only for ordering, never for filtering.
    #[serde(rename = "createdAtTimestamp")]
    pub created_at: DateTime<Utc>,
}

// `target` folds the nullable staff_id column, so the derive can't map it.
#[cfg(feature = "sqlx")]
impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for Expense {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        use sqlx::Row;

        let staff_id: Option<String> = row.try_get("staff_id")?;
        Ok(Expense {
            id: row.try_get("id")?,
            description: row.try_get("description")?,
            amount: row.try_get("amount")?,
            target: ExpenseTarget::from(staff_id),
            date_stamp: row.try_get("date_stamp")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

// =============================================================================
// Sale Transaction
// =============================================================================

/// One sale in the append-only ledger.
///
/// ## Snapshot Pattern
/// `price` freezes the catalog price at the moment of sale. Later catalog
/// edits or deletions never change what the ledger says was charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SaleTransaction {
    /// Opaque unique id assigned by the store on creation.
    pub id: String,

    /// The staff member the sale is attributed to. Referential integrity is
    /// best-effort: the engine tolerates ids that no longer resolve.
    pub staff_id: String,

    /// Whether `item_id` points into the service or the product catalog.
    pub kind: SaleKind,

    /// Reference into the catalog named by `kind`.
    pub item_id: String,

    /// Unit price at sale time (frozen).
    pub price: Money,

    /// Calendar date used for range filtering.
    pub date_stamp: NaiveDate,

    /// Creation instant, used only for ordering, never for filtering.
    #[serde(rename = "createdAtTimestamp")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_commission_rate_percent() {
        let rate = CommissionRate::from_percent(60);
        assert_eq!(rate.percent(), 60);
        assert_eq!(CommissionRate::default(), CommissionRate::zero());
    }

    #[test]
    fn test_date_range_inclusive_bounds() {
        let range = DateRange::new(date("2024-06-01"), date("2024-06-30"));

        assert!(range.contains(date("2024-06-01")));
        assert!(range.contains(date("2024-06-30")));
        assert!(range.contains(date("2024-06-15")));
        assert!(!range.contains(date("2024-05-31")));
        assert!(!range.contains(date("2024-07-01")));
    }

    #[test]
    fn test_inverted_date_range_contains_nothing() {
        let range = DateRange::new(date("2024-06-30"), date("2024-06-01"));
        assert!(!range.contains(date("2024-06-15")));
        assert!(!range.contains(date("2024-06-01")));
        assert!(!range.contains(date("2024-06-30")));
    }

    #[test]
    fn test_product_stock_guard() {
        let mut product = Product {
            id: "p1".to_string(),
            name: "Cera Mate".to_string(),
            unit_price: Money::from_units(5000),
            stock_count: 1,
            unit_cost: Money::from_units(2500),
            commission_percent: CommissionRate::from_percent(10),
        };

        assert!(product.ensure_in_stock().is_ok());

        product.stock_count = 0;
        let err = product.ensure_in_stock().unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));
    }

    #[test]
    fn test_expense_target_null_wire_shape() {
        // staffId: null round-trips to Shop
        let shop: ExpenseTarget = serde_json::from_str("null").unwrap();
        assert_eq!(shop, ExpenseTarget::Shop);
        assert_eq!(serde_json::to_string(&shop).unwrap(), "null");

        // staffId: "<uuid>" round-trips to Staff(id)
        let staff: ExpenseTarget = serde_json::from_str("\"b-1\"").unwrap();
        assert_eq!(staff, ExpenseTarget::Staff("b-1".to_string()));
        assert_eq!(serde_json::to_string(&staff).unwrap(), "\"b-1\"");
    }

    #[test]
    fn test_transaction_wire_field_names() {
        let tx = SaleTransaction {
            id: "t1".to_string(),
            staff_id: "b1".to_string(),
            kind: SaleKind::Service,
            item_id: "s1".to_string(),
            price: Money::from_units(8000),
            date_stamp: date("2024-06-01"),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["staffId"], "b1");
        assert_eq!(json["itemId"], "s1");
        assert_eq!(json["kind"], "service");
        assert_eq!(json["price"], 8000);
        assert_eq!(json["dateStamp"], "2024-06-01");
        assert!(json.get("createdAtTimestamp").is_some());
    }

    #[test]
    fn test_staff_full_name() {
        let staff = StaffMember {
            id: "b1".to_string(),
            first_name: "Lucas".to_string(),
            last_name: "Perez".to_string(),
            active: true,
            commission_percent: CommissionRate::from_percent(60),
        };
        assert_eq!(staff.full_name(), "Lucas Perez");
    }
}
