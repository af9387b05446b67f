//! Analysis data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use suivi_shared::FilialeId;

use crate::plan::PlanType;

/// A budget line as stored: one row per (filiale, year, product, plan,
/// manufacturer) with twelve independent monthly amount slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRow {
    /// Owning filiale.
    pub filiale_id: FilialeId,
    /// Budgeted year.
    pub year: i32,
    /// Free-text territory label.
    pub territory: Option<String>,
    /// Free-text product label.
    pub product: Option<String>,
    /// Free-text accounting-plan label, classified by [`PlanType::classify`].
    pub plan_label: Option<String>,
    /// Free-text manufacturer label, matched against sales brands.
    pub manufacturer: Option<String>,
    /// Monthly amounts, January first. Independent storage slots, never
    /// derived from `total`.
    pub months: [Option<Decimal>; 12],
    /// Stored year-end cumulative total. When absent, reconstructed as the
    /// sum of the populated months.
    pub total: Option<Decimal>,
}

impl BudgetRow {
    /// Sum of the first `months_elapsed` monthly amounts (0 when none).
    #[must_use]
    pub fn budget_ytd(&self, months_elapsed: u32) -> Decimal {
        self.months
            .iter()
            .take(months_elapsed as usize)
            .flatten()
            .sum()
    }

    /// Stored cumulative total, falling back to the sum of all twelve
    /// months when absent.
    #[must_use]
    pub fn budget_total(&self) -> Decimal {
        self.total
            .unwrap_or_else(|| self.months.iter().flatten().sum())
    }
}

/// An actual sale as fetched. Only meaningful in aggregate; individual
/// identity is irrelevant to the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActualSaleRow {
    /// Filiale the sale belongs to.
    pub filiale_id: FilialeId,
    /// Raw sale date as returned by the store. Rows whose date does not
    /// parse are silently excluded from every bucket.
    pub date: String,
    /// Free-text brand label.
    pub brand: Option<String>,
    /// Sale amount. Absent amounts still count as a sale event.
    pub amount: Option<Decimal>,
}

/// Synthesized join key between budget manufacturers and sales brands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SalesKey {
    /// Filiale the sales belong to.
    pub filiale: FilialeId,
    /// Normalized brand label.
    pub brand: String,
}

/// Monthly sales bucket for one (filiale, brand) key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlySales {
    /// Revenue per month, January first.
    pub revenue: [Decimal; 12],
    /// Sale count per month, January first.
    pub count: [u32; 12],
}

impl MonthlySales {
    /// Revenue summed through the first `months_elapsed` months.
    #[must_use]
    pub fn revenue_through(&self, months_elapsed: u32) -> Decimal {
        self.revenue
            .iter()
            .take(months_elapsed as usize)
            .copied()
            .sum()
    }

    /// Sale count summed through the first `months_elapsed` months.
    #[must_use]
    pub fn count_through(&self, months_elapsed: u32) -> u32 {
        self.count.iter().take(months_elapsed as usize).sum()
    }
}

/// Active filters for one analysis pass.
#[derive(Debug, Clone, Default)]
pub struct AnalysisFilters {
    /// Analyzed year.
    pub year: i32,
    /// Restrict to one plan type.
    pub plan: Option<PlanType>,
    /// Restrict to one manufacturer (matched on normalized key).
    pub manufacturer: Option<String>,
    /// Restrict to one product (matched on normalized key).
    pub product: Option<String>,
    /// Restrict to one filiale.
    pub filiale: Option<FilialeId>,
}

/// One computed budget-vs-actuals line. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRow {
    /// Filiale display label.
    pub filiale: String,
    /// Product display label.
    pub produit: String,
    /// Classified plan type.
    pub plan_type: PlanType,
    /// Manufacturer display label.
    pub constructeur: String,
    /// Budgeted amount through the elapsed months.
    pub budget_ytd: Decimal,
    /// Matched actual amount through the elapsed months. `None` for margin
    /// plans (no actual margin data exists).
    pub actual_ytd: Option<Decimal>,
    /// `actual_ytd - budget_ytd`; `None` when the actual is unknown.
    pub variance: Option<Decimal>,
    /// `variance / budget_ytd`; `None` when `budget_ytd <= 0` or the
    /// variance is unknown.
    pub variance_pct: Option<Decimal>,
    /// Full-year budget commitment.
    pub budget_total: Decimal,
    /// Estimate at completion: linear run-rate extrapolation of the actual
    /// to twelve months. `None` when no month has elapsed or the actual is
    /// unknown.
    pub eac: Option<Decimal>,
    /// `eac - budget_total`; `None` when the EAC is unknown.
    pub eac_variance: Option<Decimal>,
}

/// Accumulated budget totals for one grouping label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    /// Display label ("Non renseigne" when the source label was absent).
    pub label: String,
    /// Budgeted amount through the elapsed months.
    pub budget_ytd: Decimal,
    /// Full-year budgeted amount.
    pub budget_total: Decimal,
    /// Matched actual revenue through the elapsed months, where the
    /// grouping supports attribution (product groups, via the
    /// manufacturer-to-product mapping).
    pub actual_ytd: Option<Decimal>,
}

/// Highlight lists of the largest variances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopVariances {
    /// Up to five most-negative variances, worst first.
    pub worst: Vec<AnalysisRow>,
    /// Up to five most-positive variances, best first.
    pub best: Vec<AnalysisRow>,
}

/// Full output of one analysis pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Analyzed year.
    pub year: i32,
    /// Elapsed months used for every year-to-date sum.
    pub months_elapsed: u32,
    /// Per-budget-line rows, descending by `budget_total`.
    pub rows: Vec<AnalysisRow>,
    /// Variance highlight lists.
    pub top: TopVariances,
    /// Budget totals grouped by product.
    pub by_product: Vec<GroupTotal>,
    /// Budget totals grouped by territory.
    pub by_territory: Vec<GroupTotal>,
    /// Budget totals grouped by manufacturer.
    pub by_manufacturer: Vec<GroupTotal>,
}
