//! Property-based tests for the analysis module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::AnalysisService;
use super::types::{ActualSaleRow, AnalysisFilters, BudgetRow};

fn budget_from_months(months: &[Option<i64>]) -> BudgetRow {
    let mut slots = [None; 12];
    for (slot, month) in slots.iter_mut().zip(months) {
        *slot = month.map(Decimal::from);
    }
    BudgetRow {
        filiale_id: suivi_shared::FilialeId::new(),
        year: 2025,
        territory: None,
        product: Some("VN".into()),
        plan_label: Some("CA".into()),
        manufacturer: Some("Peugeot".into()),
        months: slots,
        total: None,
    }
}

proptest! {
    /// Year-end cumulative dominates any partial-year sum when all monthly
    /// values are non-negative.
    #[test]
    fn test_budget_total_dominates_ytd(
        months in prop::collection::vec(proptest::option::of(0i64..1_000_000), 12),
        elapsed in 0u32..=12,
    ) {
        let row = budget_from_months(&months);

        prop_assert!(row.budget_total() >= row.budget_ytd(elapsed));
    }

    /// Zero elapsed months yields a zero YTD budget and no EAC, never NaN
    /// or a negative artifact of division.
    #[test]
    fn test_zero_elapsed_months_zeroes_ytd_metrics(
        months in prop::collection::vec(proptest::option::of(0i64..1_000_000), 12),
        amounts in prop::collection::vec(0i64..100_000, 0..20),
    ) {
        let row = budget_from_months(&months);
        let sales: Vec<ActualSaleRow> = amounts
            .iter()
            .map(|amount| ActualSaleRow {
                filiale_id: row.filiale_id,
                date: "2025-04-02".into(),
                brand: Some("Peugeot".into()),
                amount: Some(Decimal::from(*amount)),
            })
            .collect();

        // Analyzed year entirely in the future of as_of.
        let filters = AnalysisFilters { year: 2025, ..Default::default() };
        let as_of = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let analysis = AnalysisService::compute(
            &[row],
            &sales,
            &filters,
            &std::collections::HashMap::new(),
            as_of,
        );

        prop_assert_eq!(analysis.months_elapsed, 0);
        prop_assert_eq!(analysis.rows.len(), 1);
        let out = &analysis.rows[0];
        prop_assert_eq!(out.budget_ytd, Decimal::ZERO);
        prop_assert_eq!(out.eac, None);
        prop_assert_eq!(out.eac_variance, None);
        // Actual is a straight sum, so variance is -0 = 0... unless sales
        // matched: with zero elapsed months nothing is summed.
        prop_assert_eq!(out.actual_ytd, Some(Decimal::ZERO));
        prop_assert_eq!(out.variance_pct, None);
    }

    /// Same frozen inputs always yield identical output rows.
    #[test]
    fn test_compute_is_idempotent(
        months in prop::collection::vec(proptest::option::of(0i64..1_000_000), 12),
        amounts in prop::collection::vec(1i64..100_000, 0..20),
    ) {
        let row = budget_from_months(&months);
        let sales: Vec<ActualSaleRow> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| ActualSaleRow {
                filiale_id: row.filiale_id,
                date: format!("2025-{:02}-10", (i % 12) + 1),
                brand: Some("Peugeot".into()),
                amount: Some(Decimal::from(*amount)),
            })
            .collect();

        let filters = AnalysisFilters { year: 2025, ..Default::default() };
        let as_of = chrono::NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        let labels = std::collections::HashMap::new();

        let first = AnalysisService::compute(&[row.clone()], &sales, &filters, &labels, as_of);
        let second = AnalysisService::compute(&[row], &sales, &filters, &labels, as_of);

        prop_assert_eq!(first, second);
    }
}

#[cfg(test)]
mod unit_tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use suivi_shared::FilialeId;

    use crate::plan::PlanType;

    use super::super::aggregate::NOT_PROVIDED;
    use super::*;

    fn as_of(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(
        filiale: FilialeId,
        plan_label: &str,
        manufacturer: &str,
        months: &[(usize, Decimal)],
        total: Option<Decimal>,
    ) -> BudgetRow {
        let mut slots = [None; 12];
        for (index, amount) in months {
            slots[*index] = Some(*amount);
        }
        BudgetRow {
            filiale_id: filiale,
            year: 2025,
            territory: Some("Nord".into()),
            product: Some("VN".into()),
            plan_label: Some(plan_label.to_string()),
            manufacturer: Some(manufacturer.to_string()),
            months: slots,
            total,
        }
    }

    fn sale(filiale: FilialeId, date: &str, brand: &str, amount: Decimal) -> ActualSaleRow {
        ActualSaleRow {
            filiale_id: filiale,
            date: date.to_string(),
            brand: Some(brand.to_string()),
            amount: Some(amount),
        }
    }

    fn filters(year: i32) -> AnalysisFilters {
        AnalysisFilters {
            year,
            ..Default::default()
        }
    }

    /// Scenario 1: total absent falls back to the sum of populated months.
    #[test]
    fn test_total_fallback_to_month_sum() {
        let filiale = FilialeId::new();
        let budgets = vec![row(
            filiale,
            "CA",
            "Peugeot",
            &[(0, dec!(100)), (1, dec!(100))],
            None,
        )];

        let analysis = AnalysisService::compute(
            &budgets,
            &[],
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 2, 20),
        );

        assert_eq!(analysis.months_elapsed, 2);
        let out = &analysis.rows[0];
        assert_eq!(out.budget_ytd, dec!(200));
        assert_eq!(out.budget_total, dec!(200));
    }

    /// Scenario 2: margin plans have no actual data, so every dependent
    /// metric is unknown.
    #[test]
    fn test_margin_plan_forces_unknown_actuals() {
        let filiale = FilialeId::new();
        let budgets = vec![row(filiale, "Marge Brute", "Peugeot", &[(0, dec!(500))], None)];
        let sales = vec![sale(filiale, "2025-01-10", "Peugeot", dec!(450))];

        let analysis = AnalysisService::compute(
            &budgets,
            &sales,
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 3, 1),
        );

        let out = &analysis.rows[0];
        assert_eq!(out.plan_type, PlanType::Margin);
        assert_eq!(out.actual_ytd, None);
        assert_eq!(out.variance, None);
        assert_eq!(out.variance_pct, None);
        assert_eq!(out.eac, None);
        assert_eq!(out.eac_variance, None);
    }

    /// Scenario 3: zero matching sales on a non-margin plan is a zero
    /// actual, not an unknown one.
    #[test]
    fn test_zero_matching_sales_is_zero_actual() {
        let filiale = FilialeId::new();
        let budgets = vec![row(filiale, "CA", "Peugeot", &[(0, dec!(300))], None)];
        let sales = vec![sale(filiale, "2025-01-10", "Renault", dec!(999))];

        let analysis = AnalysisService::compute(
            &budgets,
            &sales,
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 2, 1),
        );

        let out = &analysis.rows[0];
        assert_eq!(out.actual_ytd, Some(dec!(0)));
        assert_eq!(out.variance, Some(dec!(-300)));
    }

    /// Scenario 4: a zero YTD budget never produces an infinite rate.
    #[test]
    fn test_zero_budget_ytd_guards_variance_pct() {
        let filiale = FilialeId::new();
        // Budget entirely in later months; two months elapsed.
        let budgets = vec![row(filiale, "CA", "Peugeot", &[(11, dec!(1000))], None)];
        let sales = vec![sale(filiale, "2025-01-10", "Peugeot", dec!(500))];

        let analysis = AnalysisService::compute(
            &budgets,
            &sales,
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 2, 1),
        );

        let out = &analysis.rows[0];
        assert_eq!(out.budget_ytd, dec!(0));
        assert_eq!(out.actual_ytd, Some(dec!(500)));
        assert_eq!(out.variance, Some(dec!(500)));
        assert_eq!(out.variance_pct, None);
    }

    #[test]
    fn test_eac_is_linear_run_rate() {
        let filiale = FilialeId::new();
        let budgets = vec![row(
            filiale,
            "CA",
            "Peugeot",
            &[(0, dec!(100)), (1, dec!(100)), (2, dec!(100))],
            Some(dec!(1200)),
        )];
        let sales = vec![
            sale(filiale, "2025-01-15", "Peugeot", dec!(120)),
            sale(filiale, "2025-02-15", "Peugeot", dec!(80)),
            sale(filiale, "2025-03-15", "Peugeot", dec!(100)),
        ];

        let analysis = AnalysisService::compute(
            &budgets,
            &sales,
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 3, 31),
        );

        let out = &analysis.rows[0];
        assert_eq!(out.actual_ytd, Some(dec!(300)));
        // 300 / 3 months * 12 = 1200 full-year pace.
        assert_eq!(out.eac, Some(dec!(1200)));
        assert_eq!(out.eac_variance, Some(dec!(0)));
    }

    #[test]
    fn test_quantity_plan_counts_sale_events() {
        let filiale = FilialeId::new();
        let budgets = vec![row(
            filiale,
            "Quantité vendue",
            "Peugeot",
            &[(0, dec!(3))],
            None,
        )];
        let sales = vec![
            sale(filiale, "2025-01-05", "Peugeot", dec!(10_000)),
            sale(filiale, "2025-01-25", "Peugeot", dec!(15_000)),
        ];

        let analysis = AnalysisService::compute(
            &budgets,
            &sales,
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 1, 31),
        );

        let out = &analysis.rows[0];
        assert_eq!(out.plan_type, PlanType::Quantity);
        assert_eq!(out.actual_ytd, Some(dec!(2)));
        assert_eq!(out.variance, Some(dec!(-1)));
    }

    #[test]
    fn test_rows_sorted_by_budget_total_descending() {
        let filiale = FilialeId::new();
        let budgets = vec![
            row(filiale, "CA", "Fiat", &[(0, dec!(10))], Some(dec!(100))),
            row(filiale, "CA", "Peugeot", &[(0, dec!(10))], Some(dec!(900))),
            row(filiale, "CA", "Renault", &[(0, dec!(10))], Some(dec!(500))),
        ];

        let analysis = AnalysisService::compute(
            &budgets,
            &[],
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 6, 1),
        );

        let constructeurs: Vec<&str> = analysis
            .rows
            .iter()
            .map(|row| row.constructeur.as_str())
            .collect();
        assert_eq!(constructeurs, vec!["Peugeot", "Renault", "Fiat"]);
    }

    #[test]
    fn test_top_variances_are_independent_lists() {
        let filiale = FilialeId::new();
        let make = |manufacturer: &str, budget: Decimal| {
            row(filiale, "CA", manufacturer, &[(0, budget)], None)
        };
        let budgets = vec![
            make("A", dec!(100)), // actual 500 -> +400
            make("B", dec!(100)), // actual 0   -> -100
            make("C", dec!(100)), // actual 150 -> +50
        ];
        let sales = vec![
            sale(filiale, "2025-01-10", "A", dec!(500)),
            sale(filiale, "2025-01-12", "C", dec!(150)),
        ];

        let analysis = AnalysisService::compute(
            &budgets,
            &sales,
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 1, 31),
        );

        let worst: Vec<&str> = analysis
            .top
            .worst
            .iter()
            .map(|row| row.constructeur.as_str())
            .collect();
        let best: Vec<&str> = analysis
            .top
            .best
            .iter()
            .map(|row| row.constructeur.as_str())
            .collect();

        assert_eq!(worst, vec!["B", "C", "A"]);
        assert_eq!(best, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_plan_filter_restricts_rows() {
        let filiale = FilialeId::new();
        let budgets = vec![
            row(filiale, "CA", "Peugeot", &[(0, dec!(100))], None),
            row(filiale, "Marge Brute", "Peugeot", &[(0, dec!(40))], None),
        ];

        let only_margin = AnalysisFilters {
            year: 2025,
            plan: Some(PlanType::Margin),
            ..Default::default()
        };
        let analysis = AnalysisService::compute(
            &budgets,
            &[],
            &only_margin,
            &HashMap::new(),
            as_of(2025, 2, 1),
        );

        assert_eq!(analysis.rows.len(), 1);
        assert_eq!(analysis.rows[0].plan_type, PlanType::Margin);
    }

    #[test]
    fn test_manufacturer_filter_matches_normalized() {
        let filiale = FilialeId::new();
        let budgets = vec![
            row(filiale, "CA", "Citroën", &[(0, dec!(100))], None),
            row(filiale, "CA", "Renault", &[(0, dec!(100))], None),
        ];

        let citroen = AnalysisFilters {
            year: 2025,
            manufacturer: Some("CITROEN".into()),
            ..Default::default()
        };
        let analysis = AnalysisService::compute(
            &budgets,
            &[],
            &citroen,
            &HashMap::new(),
            as_of(2025, 2, 1),
        );

        assert_eq!(analysis.rows.len(), 1);
        assert_eq!(analysis.rows[0].constructeur, "Citroën");
    }

    #[test]
    fn test_other_year_rows_are_excluded() {
        let filiale = FilialeId::new();
        let mut other_year = row(filiale, "CA", "Peugeot", &[(0, dec!(100))], None);
        other_year.year = 2024;
        let budgets = vec![other_year, row(filiale, "CA", "Fiat", &[(0, dec!(50))], None)];

        let analysis = AnalysisService::compute(
            &budgets,
            &[],
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 2, 1),
        );

        assert_eq!(analysis.rows.len(), 1);
        assert_eq!(analysis.rows[0].constructeur, "Fiat");
    }

    #[test]
    fn test_filiale_label_lookup_with_uuid_fallback() {
        let known = FilialeId::new();
        let unknown = FilialeId::new();
        let budgets = vec![
            row(known, "CA", "Peugeot", &[(0, dec!(100))], None),
            row(unknown, "CA", "Fiat", &[(0, dec!(50))], None),
        ];
        let labels = HashMap::from([(known, "Filiale Lyon".to_string())]);

        let analysis =
            AnalysisService::compute(&budgets, &[], &filters(2025), &labels, as_of(2025, 2, 1));

        let names: Vec<&str> = analysis.rows.iter().map(|r| r.filiale.as_str()).collect();
        assert!(names.contains(&"Filiale Lyon"));
        assert!(names.contains(&unknown.to_string().as_str()));
    }

    #[test]
    fn test_group_totals_cover_every_row() {
        let filiale = FilialeId::new();
        let mut no_territory = row(filiale, "CA", "Peugeot", &[(0, dec!(100))], None);
        no_territory.territory = None;
        let budgets = vec![
            no_territory,
            row(filiale, "CA", "Fiat", &[(0, dec!(50))], None),
        ];

        let analysis = AnalysisService::compute(
            &budgets,
            &[],
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 2, 1),
        );

        let labels: Vec<&str> = analysis
            .by_territory
            .iter()
            .map(|g| g.label.as_str())
            .collect();
        assert!(labels.contains(&NOT_PROVIDED));
        assert!(labels.contains(&"Nord"));

        // Product groups carry attributed actuals; territory groups do not.
        assert!(analysis.by_territory.iter().all(|g| g.actual_ytd.is_none()));
    }

    #[test]
    fn test_product_group_actuals_use_first_write_wins_mapping() {
        let filiale = FilialeId::new();
        let mut vn = row(filiale, "CA", "Peugeot", &[(0, dec!(100))], None);
        vn.product = Some("VN".into());
        let mut vo = row(filiale, "CA", "Peugeot", &[(0, dec!(100))], None);
        vo.product = Some("VO".into());
        let budgets = vec![vn, vo];
        let sales = vec![sale(filiale, "2025-01-10", "Peugeot", dec!(700))];

        let analysis = AnalysisService::compute(
            &budgets,
            &sales,
            &filters(2025),
            &HashMap::new(),
            as_of(2025, 1, 31),
        );

        // Peugeot mapped to VN first; VO gets no attributed actuals.
        let vn_group = analysis
            .by_product
            .iter()
            .find(|g| g.label == "VN")
            .unwrap();
        let vo_group = analysis
            .by_product
            .iter()
            .find(|g| g.label == "VO")
            .unwrap();
        assert_eq!(vn_group.actual_ytd, Some(dec!(700)));
        assert_eq!(vo_group.actual_ytd, None);
    }
}
