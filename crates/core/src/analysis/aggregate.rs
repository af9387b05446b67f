//! Bucketing of raw budget and sales rows.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::normalize::normalize_key;

use super::types::{ActualSaleRow, BudgetRow, MonthlySales, SalesKey};

/// Display label used when a grouping field is absent.
pub const NOT_PROVIDED: &str = "Non renseigne";

/// Accumulated budget totals keyed by normalized group label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupAcc {
    /// First display spelling observed for the group.
    pub label: String,
    /// Budgeted amount through the elapsed months.
    pub budget_ytd: Decimal,
    /// Full-year budgeted amount.
    pub budget_total: Decimal,
}

/// Parses a sale date as returned by the store.
///
/// Accepts plain dates and RFC 3339 timestamps. Anything else is `None`;
/// the row is then excluded from every monthly bucket.
#[must_use]
pub fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }

    None
}

/// Buckets sales by (filiale, normalized brand) into 12-slot monthly
/// revenue and count arrays, restricted to the analyzed year.
///
/// A sale lands in the bucket index of its calendar month. Rows with
/// unparseable dates are silently skipped; rows with absent amounts still
/// increment the month's count.
#[must_use]
pub fn sales_by_filiale_and_brand(
    sales: &[ActualSaleRow],
    year: i32,
) -> HashMap<SalesKey, MonthlySales> {
    let mut buckets: HashMap<SalesKey, MonthlySales> = HashMap::new();

    for sale in sales {
        let Some(date) = parse_sale_date(&sale.date) else {
            continue;
        };
        if date.year() != year {
            continue;
        }

        let key = SalesKey {
            filiale: sale.filiale_id,
            brand: normalize_key(sale.brand.as_deref()),
        };
        let month = date.month0() as usize;

        let bucket = buckets.entry(key).or_default();
        bucket.revenue[month] += sale.amount.unwrap_or(Decimal::ZERO);
        bucket.count[month] += 1;
    }

    buckets
}

/// Display label for a grouping field: trimmed spelling, or
/// [`NOT_PROVIDED`] when absent or blank.
#[must_use]
pub fn group_label(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => NOT_PROVIDED.to_string(),
    }
}

/// Accumulates budget year-to-date and total per group label.
///
/// `select` picks the grouping field off each row. Rows with an absent
/// label all land under [`NOT_PROVIDED`] so every row stays groupable. The
/// first display spelling observed for a key is kept.
#[must_use]
pub fn budget_groups<F>(
    budgets: &[BudgetRow],
    months_elapsed: u32,
    select: F,
) -> HashMap<String, GroupAcc>
where
    F: Fn(&BudgetRow) -> Option<&str>,
{
    let mut groups: HashMap<String, GroupAcc> = HashMap::new();

    for row in budgets {
        let raw = select(row);
        let key = match normalize_key(raw) {
            k if k.is_empty() => normalize_key(Some(NOT_PROVIDED)),
            k => k,
        };

        let acc = groups.entry(key).or_default();
        if acc.label.is_empty() {
            acc.label = group_label(raw);
        }
        acc.budget_ytd += row.budget_ytd(months_elapsed);
        acc.budget_total += row.budget_total();
    }

    groups
}

/// Maps each normalized manufacturer key to a product label.
///
/// Only the first manufacturer-to-product mapping observed is kept; later
/// conflicting mappings for the same key are ignored (first-write-wins).
/// Manufacturers without a label are skipped.
#[must_use]
pub fn manufacturer_products(budgets: &[BudgetRow]) -> HashMap<String, String> {
    let mut mapping: HashMap<String, String> = HashMap::new();

    for row in budgets {
        let key = normalize_key(row.manufacturer.as_deref());
        if key.is_empty() {
            continue;
        }
        mapping
            .entry(key)
            .or_insert_with(|| group_label(row.product.as_deref()));
    }

    mapping
}

/// Attributes actual year-to-date revenue to products through the
/// manufacturer-to-product mapping.
///
/// Returns totals keyed by normalized product label. Sales whose brand has
/// no mapped manufacturer are left out.
#[must_use]
pub fn actuals_by_product(
    sales: &HashMap<SalesKey, MonthlySales>,
    mapping: &HashMap<String, String>,
    months_elapsed: u32,
) -> HashMap<String, Decimal> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();

    for (key, bucket) in sales {
        let Some(product) = mapping.get(&key.brand) else {
            continue;
        };
        *totals
            .entry(normalize_key(Some(product)))
            .or_insert(Decimal::ZERO) += bucket.revenue_through(months_elapsed);
    }

    totals
}
