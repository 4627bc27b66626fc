//! # Report Engine
//!
//! The payroll and profit aggregation engine. Everything the dashboard
//! shows — revenue, per-barber payouts, shop profit — comes out of one
//! pure function: [`compute_report`].
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        compute_report                                   │
//! │                                                                         │
//! │  Inputs (read-only slices)              Output                          │
//! │  ┌────────────────────┐                                                 │
//! │  │ services, products │──┐                                              │
//! │  │ (catalog lookups)  │  │       ┌──────────────────────────────┐       │
//! │  └────────────────────┘  │       │           Report             │       │
//! │  ┌────────────────────┐  │       │  totalRevenue                │       │
//! │  │ staff              │──┼──────►│  shopExpensesTotal           │       │
//! │  └────────────────────┘  │       │  totalCommissionsToPay       │       │
//! │  ┌────────────────────┐  │       │  netShopProfit               │       │
//! │  │ transactions       │──┤       │  staffStats: [StaffReport]   │       │
//! │  │ expenses           │  │       │    jobsCount, revenue,       │       │
//! │  │ (range-filtered)   │  │       │    grossPay, deductions,     │       │
//! │  └────────────────────┘  │       │    netPay, breakdown         │       │
//! │  ┌────────────────────┐  │       └──────────────────────────────┘       │
//! │  │ range (inclusive)  │──┘                                              │
//! │  └────────────────────┘                                                 │
//! │                                                                         │
//! │  DETERMINISTIC: same inputs always produce the same Report              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Accounting Identity
//! ```text
//! netShopProfit = totalRevenue − totalCommissionsToPay − shopExpensesTotal
//! ```
//! Personal (staff-targeted) expenses never touch shop profit: they come
//! out of the staff member's own payout as `deductions`.
//!
//! ## Commission Sources
//! - Service sale → the staff member's personal `commissionPercent`
//! - Product sale → the product's own `commissionPercent` override
//! - Product sale whose product no longer resolves → the documented
//!   fallback rate ([`crate::FALLBACK_PRODUCT_COMMISSION`])

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{
    DateRange, Expense, Product, SaleKind, SaleTransaction, Service, StaffMember,
};
use crate::{FALLBACK_PRODUCT_COMMISSION, UNRESOLVED_PRODUCT_LABEL, UNRESOLVED_SERVICE_LABEL};

// =============================================================================
// Output Types
// =============================================================================

/// Count and revenue of one breakdown row ("Corte Clásico: 3 jobs, $24000").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    /// How many times this item was sold by the staff member in the range.
    pub count: i64,

    /// Total charged for those sales (frozen ledger prices).
    pub total: Money,
}

/// Everything the payroll view shows for one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffReport {
    /// The staff member the numbers belong to, flattened into the output
    /// so the payroll card reads `firstName`, `commissionPercent`, ...
    /// at the top level.
    #[serde(flatten)]
    pub staff: StaffMember,

    /// Number of sales attributed to this member in the range.
    pub jobs_count: i64,

    /// Total charged for those sales. This is shop revenue, not the
    /// member's earnings.
    pub revenue: Money,

    /// Commission earned: the per-sale commission summed over every sale.
    pub gross_pay: Money,

    /// Sum of personal expenses charged against this member in the range.
    pub deductions: Money,

    /// `grossPay − deductions`. Deliberately NOT clamped at zero: a
    /// negative value means the member owes the shop, and the payroll
    /// view must show that.
    pub net_pay: Money,

    /// The personal expenses behind `deductions`, for the drill-down list.
    pub personal_expenses_list: Vec<Expense>,

    /// Per-item sales breakdown, keyed by display name. BTreeMap so the
    /// rows render in a stable alphabetical order.
    pub breakdown: BTreeMap<String, BreakdownEntry>,
}

impl StaffReport {
    /// A zero report for a member with no activity in the range.
    fn empty(staff: StaffMember) -> Self {
        StaffReport {
            staff,
            jobs_count: 0,
            revenue: Money::zero(),
            gross_pay: Money::zero(),
            deductions: Money::zero(),
            net_pay: Money::zero(),
            personal_expenses_list: Vec::new(),
            breakdown: BTreeMap::new(),
        }
    }
}

/// The full dashboard report for one date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Sum of every transaction price in the range, across all staff
    /// (including sales attributed to staff ids that no longer resolve).
    pub total_revenue: Money,

    /// Sum of shop-level expenses in the range. Personal expenses are
    /// excluded; they live in each member's `deductions`.
    pub shop_expenses_total: Money,

    /// Sum of every member's `grossPay` — what payroll will cost.
    pub total_commissions_to_pay: Money,

    /// `totalRevenue − totalCommissionsToPay − shopExpensesTotal`.
    /// Can be negative in a bad period.
    pub net_shop_profit: Money,

    /// One entry per staff member, in the input order. Every member gets
    /// an entry even with zero activity, so the payroll table never has
    /// missing rows.
    pub staff_stats: Vec<StaffReport>,
}

impl Report {
    /// Total jobs across all staff entries.
    pub fn jobs_total(&self) -> i64 {
        self.staff_stats.iter().map(|s| s.jobs_count).sum()
    }

    /// Entries for currently active staff only, for dashboard views that
    /// hide retired members. The totals above always cover everyone.
    pub fn active_staff_stats(&self) -> impl Iterator<Item = &StaffReport> {
        self.staff_stats.iter().filter(|s| s.staff.active)
    }
}

// =============================================================================
// The Engine
// =============================================================================

/// Computes the full dashboard report for a date range.
///
/// Pure and total: no I/O, no clock, no panics. Dangling references
/// (a transaction whose staff or item was deleted) degrade gracefully
/// instead of erroring, because the ledger is append-only and must stay
/// computable forever.
///
/// ## Example
/// ```rust
/// use barberia_core::{compute_report, DateRange, Money};
///
/// let range = DateRange::new(
///     "2024-06-01".parse().unwrap(),
///     "2024-06-30".parse().unwrap(),
/// );
/// let report = compute_report(&[], &[], &[], &[], &[], range);
/// assert_eq!(report.total_revenue, Money::zero());
/// assert!(report.staff_stats.is_empty());
/// ```
pub fn compute_report(
    services: &[Service],
    products: &[Product],
    staff: &[StaffMember],
    transactions: &[SaleTransaction],
    expenses: &[Expense],
    range: DateRange,
) -> Report {
    // Catalog lookups. Built once; the engine runs on every store push.
    let service_by_id: HashMap<&str, &Service> =
        services.iter().map(|s| (s.id.as_str(), s)).collect();
    let product_by_id: HashMap<&str, &Product> =
        products.iter().map(|p| (p.id.as_str(), p)).collect();

    // Range filtering happens exactly once, up front. An inverted range
    // (start > end) simply matches nothing.
    let txs: Vec<&SaleTransaction> = transactions
        .iter()
        .filter(|t| range.contains(t.date_stamp))
        .collect();
    let exps: Vec<&Expense> = expenses
        .iter()
        .filter(|e| range.contains(e.date_stamp))
        .collect();

    let total_revenue: Money = txs.iter().map(|t| t.price).sum();
    let shop_expenses_total: Money = exps
        .iter()
        .filter(|e| e.target.is_shop())
        .map(|e| e.amount)
        .sum();

    let mut staff_stats: Vec<StaffReport> = Vec::with_capacity(staff.len());

    for member in staff {
        let mut stat = StaffReport::empty(member.clone());

        for tx in txs.iter().filter(|t| t.staff_id == member.id) {
            stat.jobs_count += 1;
            stat.revenue += tx.price;

            let (rate, label) = match tx.kind {
                SaleKind::Service => {
                    let label = service_by_id
                        .get(tx.item_id.as_str())
                        .map(|s| s.name.as_str())
                        .unwrap_or(UNRESOLVED_SERVICE_LABEL);
                    (member.commission_percent, label)
                }
                SaleKind::Product => match product_by_id.get(tx.item_id.as_str()) {
                    Some(product) => (product.commission_percent, product.name.as_str()),
                    None => (FALLBACK_PRODUCT_COMMISSION, UNRESOLVED_PRODUCT_LABEL),
                },
            };

            stat.gross_pay += tx.price.commission(rate);

            let entry = stat.breakdown.entry(label.to_string()).or_default();
            entry.count += 1;
            entry.total += tx.price;
        }

        for exp in exps.iter().filter(|e| e.target.staff_id() == Some(member.id.as_str())) {
            stat.deductions += exp.amount;
            stat.personal_expenses_list.push((*exp).clone());
        }

        stat.net_pay = stat.gross_pay - stat.deductions;
        staff_stats.push(stat);
    }

    let total_commissions_to_pay: Money = staff_stats.iter().map(|s| s.gross_pay).sum();
    let net_shop_profit = total_revenue - total_commissions_to_pay - shop_expenses_total;

    Report {
        total_revenue,
        shop_expenses_total,
        total_commissions_to_pay,
        net_shop_profit,
        staff_stats,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommissionRate, ExpenseTarget};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn june() -> DateRange {
        DateRange::new(date("2024-06-01"), date("2024-06-30"))
    }

    fn lucas() -> StaffMember {
        StaffMember {
            id: "b-lucas".to_string(),
            first_name: "Lucas".to_string(),
            last_name: "Perez".to_string(),
            active: true,
            commission_percent: CommissionRate::from_percent(60),
        }
    }

    fn kevin() -> StaffMember {
        StaffMember {
            id: "b-kevin".to_string(),
            first_name: "Kevin".to_string(),
            last_name: "Diaz".to_string(),
            active: true,
            commission_percent: CommissionRate::from_percent(50),
        }
    }

    fn corte() -> Service {
        Service {
            id: "s-corte".to_string(),
            name: "Corte Clásico".to_string(),
            unit_price: Money::from_units(8000),
        }
    }

    fn cera() -> Product {
        Product {
            id: "p-cera".to_string(),
            name: "Cera Mate".to_string(),
            unit_price: Money::from_units(5000),
            stock_count: 10,
            unit_cost: Money::from_units(2500),
            commission_percent: CommissionRate::from_percent(10),
        }
    }

    fn tx(staff_id: &str, kind: SaleKind, item_id: &str, price: i64, day: &str) -> SaleTransaction {
        SaleTransaction {
            id: format!("t-{}-{}-{}", staff_id, item_id, day),
            staff_id: staff_id.to_string(),
            kind,
            item_id: item_id.to_string(),
            price: Money::from_units(price),
            date_stamp: date(day),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn expense(target: ExpenseTarget, amount: i64, day: &str) -> Expense {
        Expense {
            id: format!("e-{}-{}", amount, day),
            description: "gasto".to_string(),
            amount: Money::from_units(amount),
            target,
            date_stamp: date(day),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_single_service_sale() {
        // Lucas (60%) sells one Corte Clásico at 8000 on 2024-06-01
        let report = compute_report(
            &[corte()],
            &[],
            &[lucas()],
            &[tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-01")],
            &[],
            june(),
        );

        assert_eq!(report.total_revenue, Money::from_units(8000));
        assert_eq!(report.total_commissions_to_pay, Money::from_units(4800));
        assert_eq!(report.net_shop_profit, Money::from_units(3200));

        let stat = &report.staff_stats[0];
        assert_eq!(stat.jobs_count, 1);
        assert_eq!(stat.revenue, Money::from_units(8000));
        assert_eq!(stat.gross_pay, Money::from_units(4800));
        assert_eq!(stat.net_pay, Money::from_units(4800));

        let row = &stat.breakdown["Corte Clásico"];
        assert_eq!(row.count, 1);
        assert_eq!(row.total, Money::from_units(8000));
    }

    #[test]
    fn test_personal_expense_deducts_from_net_pay_only() {
        // Same sale, plus a 1000 personal expense charged to Lucas
        let report = compute_report(
            &[corte()],
            &[],
            &[lucas()],
            &[tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-01")],
            &[expense(
                ExpenseTarget::Staff("b-lucas".to_string()),
                1000,
                "2024-06-02",
            )],
            june(),
        );

        let stat = &report.staff_stats[0];
        assert_eq!(stat.gross_pay, Money::from_units(4800));
        assert_eq!(stat.deductions, Money::from_units(1000));
        assert_eq!(stat.net_pay, Money::from_units(3800));
        assert_eq!(stat.personal_expenses_list.len(), 1);

        // Shop profit is untouched by the personal expense
        assert_eq!(report.shop_expenses_total, Money::zero());
        assert_eq!(report.net_shop_profit, Money::from_units(3200));
    }

    #[test]
    fn test_shop_expense_deducts_from_profit_only() {
        let report = compute_report(
            &[corte()],
            &[],
            &[lucas()],
            &[tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-01")],
            &[expense(ExpenseTarget::Shop, 2000, "2024-06-02")],
            june(),
        );

        assert_eq!(report.shop_expenses_total, Money::from_units(2000));
        assert_eq!(report.net_shop_profit, Money::from_units(1200));

        // Lucas keeps his full payout
        assert_eq!(report.staff_stats[0].net_pay, Money::from_units(4800));
        assert!(report.staff_stats[0].personal_expenses_list.is_empty());
    }

    #[test]
    fn test_product_sale_uses_product_commission() {
        // Cera Mate carries its own 10% override; Lucas's 60% is ignored
        let report = compute_report(
            &[],
            &[cera()],
            &[lucas()],
            &[tx("b-lucas", SaleKind::Product, "p-cera", 5000, "2024-06-03")],
            &[],
            june(),
        );

        let stat = &report.staff_stats[0];
        assert_eq!(stat.gross_pay, Money::from_units(500));
        assert_eq!(stat.breakdown["Cera Mate"].count, 1);
    }

    #[test]
    fn test_deleted_product_falls_back_to_default_commission() {
        // The product was deleted after the sale; the ledger row survives
        let report = compute_report(
            &[],
            &[],
            &[lucas()],
            &[tx("b-lucas", SaleKind::Product, "p-gone", 5000, "2024-06-03")],
            &[],
            june(),
        );

        let stat = &report.staff_stats[0];
        assert_eq!(stat.gross_pay, Money::from_units(500)); // 10% fallback
        assert_eq!(stat.breakdown["Product"].count, 1);
        assert_eq!(stat.revenue, Money::from_units(5000));
    }

    #[test]
    fn test_deleted_service_uses_placeholder_label() {
        // Service lookup fails; staff rate still applies
        let report = compute_report(
            &[],
            &[],
            &[lucas()],
            &[tx("b-lucas", SaleKind::Service, "s-gone", 8000, "2024-06-01")],
            &[],
            june(),
        );

        let stat = &report.staff_stats[0];
        assert_eq!(stat.gross_pay, Money::from_units(4800));
        assert_eq!(stat.breakdown["Service"].count, 1);
    }

    #[test]
    fn test_dangling_staff_ref_counts_toward_shop_only() {
        // A transaction attributed to a staff id nobody has: it still
        // contributes to total revenue, but no staff entry sees it and
        // no commission is owed on it.
        let report = compute_report(
            &[corte()],
            &[],
            &[lucas()],
            &[
                tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-01"),
                tx("b-ghost", SaleKind::Service, "s-corte", 8000, "2024-06-01"),
            ],
            &[],
            june(),
        );

        assert_eq!(report.total_revenue, Money::from_units(16000));
        assert_eq!(report.total_commissions_to_pay, Money::from_units(4800));
        assert_eq!(report.staff_stats[0].jobs_count, 1);
        assert_eq!(report.jobs_total(), 1);
    }

    #[test]
    fn test_range_filtering_is_inclusive() {
        let report = compute_report(
            &[corte()],
            &[],
            &[lucas()],
            &[
                tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-05-31"),
                tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-01"),
                tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-30"),
                tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-07-01"),
            ],
            &[],
            june(),
        );

        // Only the two June endpoint days count
        assert_eq!(report.total_revenue, Money::from_units(16000));
        assert_eq!(report.staff_stats[0].jobs_count, 2);
    }

    #[test]
    fn test_inverted_range_yields_zero_report_with_staff_rows() {
        let report = compute_report(
            &[corte()],
            &[],
            &[lucas(), kevin()],
            &[tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-01")],
            &[expense(ExpenseTarget::Shop, 2000, "2024-06-02")],
            DateRange::new(date("2024-06-30"), date("2024-06-01")),
        );

        assert_eq!(report.total_revenue, Money::zero());
        assert_eq!(report.shop_expenses_total, Money::zero());
        assert_eq!(report.net_shop_profit, Money::zero());

        // Every member still gets a (zero) row
        assert_eq!(report.staff_stats.len(), 2);
        assert_eq!(report.staff_stats[0].jobs_count, 0);
        assert_eq!(report.staff_stats[1].net_pay, Money::zero());
    }

    #[test]
    fn test_negative_net_pay_is_not_clamped() {
        // One 8000 job (4800 gross) against a 6000 advance
        let report = compute_report(
            &[corte()],
            &[],
            &[lucas()],
            &[tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-01")],
            &[expense(
                ExpenseTarget::Staff("b-lucas".to_string()),
                6000,
                "2024-06-02",
            )],
            june(),
        );

        assert_eq!(report.staff_stats[0].net_pay, Money::from_units(-1200));
    }

    #[test]
    fn test_inactive_staff_still_reported() {
        let mut retired = kevin();
        retired.active = false;

        let report = compute_report(
            &[corte()],
            &[],
            &[lucas(), retired],
            &[tx("b-kevin", SaleKind::Service, "s-corte", 8000, "2024-06-01")],
            &[],
            june(),
        );

        // The engine attributes the sale regardless of the active flag;
        // hiding inactive members is a display concern.
        let kevin_stat = &report.staff_stats[1];
        assert!(!kevin_stat.staff.active);
        assert_eq!(kevin_stat.gross_pay, Money::from_units(4000));
        assert_eq!(report.total_commissions_to_pay, Money::from_units(4000));

        // The display helper hides the retired member, the totals don't
        let visible: Vec<_> = report.active_staff_stats().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].staff.first_name, "Lucas");
    }

    #[test]
    fn test_breakdown_aggregates_repeat_sales() {
        let report = compute_report(
            &[corte()],
            &[cera()],
            &[lucas()],
            &[
                tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-01"),
                tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-02"),
                tx("b-lucas", SaleKind::Product, "p-cera", 5000, "2024-06-02"),
            ],
            &[],
            june(),
        );

        let stat = &report.staff_stats[0];
        assert_eq!(stat.breakdown.len(), 2);
        assert_eq!(stat.breakdown["Corte Clásico"].count, 2);
        assert_eq!(stat.breakdown["Corte Clásico"].total, Money::from_units(16000));
        assert_eq!(stat.breakdown["Cera Mate"].count, 1);

        // 2 × 4800 service commission + 500 product commission
        assert_eq!(stat.gross_pay, Money::from_units(10100));
    }

    #[test]
    fn test_accounting_identity_with_two_staff() {
        let report = compute_report(
            &[corte()],
            &[cera()],
            &[lucas(), kevin()],
            &[
                tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-01"),
                tx("b-kevin", SaleKind::Service, "s-corte", 8000, "2024-06-01"),
                tx("b-kevin", SaleKind::Product, "p-cera", 5000, "2024-06-02"),
            ],
            &[
                expense(ExpenseTarget::Shop, 3000, "2024-06-05"),
                expense(ExpenseTarget::Staff("b-kevin".to_string()), 500, "2024-06-05"),
            ],
            june(),
        );

        assert_eq!(report.total_revenue, Money::from_units(21000));
        // Lucas: 4800. Kevin: 4000 + 500 = 4500.
        assert_eq!(report.total_commissions_to_pay, Money::from_units(9300));
        assert_eq!(report.shop_expenses_total, Money::from_units(3000));
        assert_eq!(
            report.net_shop_profit,
            report.total_revenue - report.total_commissions_to_pay - report.shop_expenses_total
        );
        assert_eq!(report.net_shop_profit, Money::from_units(8700));

        // Kevin's personal expense
        let kevin_stat = &report.staff_stats[1];
        assert_eq!(kevin_stat.deductions, Money::from_units(500));
        assert_eq!(kevin_stat.net_pay, Money::from_units(4000));
    }

    #[test]
    fn test_staff_report_serde_flattens_member() {
        let report = compute_report(
            &[corte()],
            &[],
            &[lucas()],
            &[tx("b-lucas", SaleKind::Service, "s-corte", 8000, "2024-06-01")],
            &[],
            june(),
        );

        let json = serde_json::to_value(&report.staff_stats[0]).unwrap();
        // Member fields surface at the top level of the payroll entry
        assert_eq!(json["firstName"], "Lucas");
        assert_eq!(json["commissionPercent"], 60);
        assert_eq!(json["jobsCount"], 1);
        assert_eq!(json["grossPay"], 4800);
        assert_eq!(json["netPay"], 4800);
    }
}
