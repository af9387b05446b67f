//! Analysis computation service.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use suivi_shared::FilialeId;

use crate::calendar::months_elapsed;
use crate::normalize::normalize_key;
use crate::plan::PlanType;

use super::aggregate::{
    actuals_by_product, budget_groups, group_label, manufacturer_products,
    sales_by_filiale_and_brand,
};
use super::types::{
    ActualSaleRow, Analysis, AnalysisFilters, AnalysisRow, BudgetRow, GroupTotal, MonthlySales,
    SalesKey, TopVariances,
};

/// Number of rows kept in each variance highlight list.
const TOP_VARIANCE_COUNT: usize = 5;

/// Analysis service for budget-vs-actuals computation.
pub struct AnalysisService;

impl AnalysisService {
    /// Computes a full analysis from already-fetched rows.
    ///
    /// Pure and synchronous: the same frozen inputs always yield identical
    /// output. `filiale_labels` resolves filiale ids to display names; an
    /// unknown id falls back to its UUID string.
    #[must_use]
    pub fn compute(
        budgets: &[BudgetRow],
        sales: &[ActualSaleRow],
        filters: &AnalysisFilters,
        filiale_labels: &HashMap<FilialeId, String>,
        as_of: NaiveDate,
    ) -> Analysis {
        let elapsed = months_elapsed(filters.year, as_of);
        let sales_map = sales_by_filiale_and_brand(sales, filters.year);

        let selected: Vec<&BudgetRow> = budgets
            .iter()
            .filter(|row| Self::matches(row, filters))
            .collect();

        let mut rows: Vec<AnalysisRow> = selected
            .iter()
            .map(|row| Self::row_metrics(row, &sales_map, elapsed, filiale_labels))
            .collect();

        // Largest budget commitments first; explicit tie-breaks keep the
        // output identical across runs despite hash-map inputs.
        rows.sort_by(|a, b| {
            b.budget_total
                .cmp(&a.budget_total)
                .then_with(|| a.filiale.cmp(&b.filiale))
                .then_with(|| a.produit.cmp(&b.produit))
                .then_with(|| a.constructeur.cmp(&b.constructeur))
        });

        let top = Self::top_variances(&rows);

        let owned: Vec<BudgetRow> = selected.into_iter().cloned().collect();
        let mapping = manufacturer_products(&owned);
        let product_actuals = actuals_by_product(&sales_map, &mapping, elapsed);

        let by_product = Self::sorted_groups(
            budget_groups(&owned, elapsed, |row| row.product.as_deref()),
            Some(&product_actuals),
        );
        let by_territory = Self::sorted_groups(
            budget_groups(&owned, elapsed, |row| row.territory.as_deref()),
            None,
        );
        let by_manufacturer = Self::sorted_groups(
            budget_groups(&owned, elapsed, |row| row.manufacturer.as_deref()),
            None,
        );

        Analysis {
            year: filters.year,
            months_elapsed: elapsed,
            rows,
            top,
            by_product,
            by_territory,
            by_manufacturer,
        }
    }

    /// Whether a budget row passes the active filters.
    fn matches(row: &BudgetRow, filters: &AnalysisFilters) -> bool {
        if row.year != filters.year {
            return false;
        }
        if let Some(filiale) = filters.filiale
            && row.filiale_id != filiale
        {
            return false;
        }
        if let Some(plan) = filters.plan
            && PlanType::classify(row.plan_label.as_deref()) != plan
        {
            return false;
        }
        if let Some(manufacturer) = filters.manufacturer.as_deref()
            && normalize_key(row.manufacturer.as_deref()) != normalize_key(Some(manufacturer))
        {
            return false;
        }
        if let Some(product) = filters.product.as_deref()
            && normalize_key(row.product.as_deref()) != normalize_key(Some(product))
        {
            return false;
        }
        true
    }

    /// Derives the metrics for one budget row.
    fn row_metrics(
        row: &BudgetRow,
        sales_map: &HashMap<SalesKey, MonthlySales>,
        elapsed: u32,
        filiale_labels: &HashMap<FilialeId, String>,
    ) -> AnalysisRow {
        let plan_type = PlanType::classify(row.plan_label.as_deref());
        let budget_ytd = row.budget_ytd(elapsed);
        let budget_total = row.budget_total();

        let actual_ytd = Self::actual_ytd(row, plan_type, sales_map, elapsed);

        let variance = actual_ytd.map(|actual| actual - budget_ytd);
        let variance_pct = match variance {
            Some(variance) if budget_ytd > Decimal::ZERO => Some(variance / budget_ytd),
            _ => None,
        };
        let eac = match actual_ytd {
            Some(actual) if elapsed > 0 => {
                Some(actual / Decimal::from(elapsed) * Decimal::from(12u32))
            }
            _ => None,
        };
        let eac_variance = eac.map(|eac| eac - budget_total);

        let filiale = filiale_labels
            .get(&row.filiale_id)
            .cloned()
            .unwrap_or_else(|| row.filiale_id.to_string());

        AnalysisRow {
            filiale,
            produit: group_label(row.product.as_deref()),
            plan_type,
            constructeur: group_label(row.manufacturer.as_deref()),
            budget_ytd,
            actual_ytd,
            variance,
            variance_pct,
            budget_total,
            eac,
            eac_variance,
        }
    }

    /// Matched actual amount through the elapsed months.
    ///
    /// `None` for margin plans: no actual margin data exists. Quantity
    /// plans count sale events; everything else sums revenue. A
    /// manufacturer with zero matching sales yields 0, not `None`.
    fn actual_ytd(
        row: &BudgetRow,
        plan_type: PlanType,
        sales_map: &HashMap<SalesKey, MonthlySales>,
        elapsed: u32,
    ) -> Option<Decimal> {
        if plan_type == PlanType::Margin {
            return None;
        }

        let key = SalesKey {
            filiale: row.filiale_id,
            brand: normalize_key(row.manufacturer.as_deref()),
        };
        let amount = sales_map.get(&key).map_or(Decimal::ZERO, |bucket| {
            if plan_type == PlanType::Quantity {
                Decimal::from(bucket.count_through(elapsed))
            } else {
                bucket.revenue_through(elapsed)
            }
        });

        Some(amount)
    }

    /// Top-5 most-negative and most-positive variances among rows with a
    /// known actual, independently sorted.
    fn top_variances(rows: &[AnalysisRow]) -> TopVariances {
        let mut known: Vec<&AnalysisRow> =
            rows.iter().filter(|row| row.variance.is_some()).collect();

        known.sort_by(|a, b| a.variance.cmp(&b.variance));
        let worst: Vec<AnalysisRow> = known
            .iter()
            .take(TOP_VARIANCE_COUNT)
            .map(|row| (*row).clone())
            .collect();

        known.sort_by(|a, b| b.variance.cmp(&a.variance));
        let best: Vec<AnalysisRow> = known
            .iter()
            .take(TOP_VARIANCE_COUNT)
            .map(|row| (*row).clone())
            .collect();

        TopVariances { worst, best }
    }

    /// Turns a grouping accumulator into a deterministic list, descending
    /// by full-year budget with the label as tie-break.
    fn sorted_groups(
        groups: HashMap<String, super::aggregate::GroupAcc>,
        actuals: Option<&HashMap<String, Decimal>>,
    ) -> Vec<GroupTotal> {
        let mut out: Vec<GroupTotal> = groups
            .into_iter()
            .map(|(key, acc)| GroupTotal {
                actual_ytd: actuals.and_then(|totals| totals.get(&key).copied()),
                label: acc.label,
                budget_ytd: acc.budget_ytd,
                budget_total: acc.budget_total,
            })
            .collect();

        out.sort_by(|a, b| {
            b.budget_total
                .cmp(&a.budget_total)
                .then_with(|| a.label.cmp(&b.label))
        });

        out
    }
}
