//! CSV serialization of analysis rows.

use csv::{QuoteStyle, WriterBuilder};
use rust_decimal::Decimal;

use crate::analysis::AnalysisRow;

use super::ExportError;

/// Fixed column order of the export.
const HEADERS: [&str; 11] = [
    "filiale",
    "produit",
    "plan_compte",
    "constructeur",
    "budget_ytd",
    "realise_ytd",
    "ecart",
    "taux",
    "budget_annuel",
    "eac",
    "ecart_eac",
];

/// Download filename for a given analyzed year.
#[must_use]
pub fn csv_filename(year: i32) -> String {
    format!("budget_suivi_{year}.csv")
}

/// Serializes analysis rows to CSV.
///
/// Every field is quoted with embedded quotes doubled. Amounts keep two
/// decimals of precision, the rate is a percentage with one decimal, and
/// unknown values are empty fields.
pub fn write_csv(rows: &[AnalysisRow]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(HEADERS)?;

    for row in rows {
        writer.write_record([
            row.filiale.clone(),
            row.produit.clone(),
            row.plan_type.as_str().to_string(),
            row.constructeur.clone(),
            format_amount(Some(row.budget_ytd)),
            format_amount(row.actual_ytd),
            format_amount(row.variance),
            format_rate(row.variance_pct),
            format_amount(Some(row.budget_total)),
            format_amount(row.eac),
            format_amount(row.eac_variance),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Amount field: two decimals, empty when unknown.
fn format_amount(value: Option<Decimal>) -> String {
    value.map_or_else(String::new, |v| v.round_dp(2).to_string())
}

/// Rate field: percentage with one decimal, empty when unknown.
fn format_rate(value: Option<Decimal>) -> String {
    value.map_or_else(String::new, |v| {
        (v * Decimal::ONE_HUNDRED).round_dp(1).to_string()
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::plan::PlanType;

    use super::*;

    fn sample_row() -> AnalysisRow {
        AnalysisRow {
            filiale: "Filiale Lyon".into(),
            produit: "VN".into(),
            plan_type: PlanType::Revenue,
            constructeur: "Peugeot \"PSA\"".into(),
            budget_ytd: dec!(200),
            actual_ytd: Some(dec!(250.456)),
            variance: Some(dec!(50.456)),
            variance_pct: Some(dec!(0.25228)),
            budget_total: dec!(1200),
            eac: Some(dec!(1502.74)),
            eac_variance: Some(dec!(302.74)),
        }
    }

    fn margin_row() -> AnalysisRow {
        AnalysisRow {
            filiale: "Filiale Nice".into(),
            produit: "Atelier".into(),
            plan_type: PlanType::Margin,
            constructeur: "Fiat".into(),
            budget_ytd: dec!(80),
            actual_ytd: None,
            variance: None,
            variance_pct: None,
            budget_total: dec!(480),
            eac: None,
            eac_variance: None,
        }
    }

    #[test]
    fn test_header_and_field_order() {
        let csv = write_csv(&[sample_row()]).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "\"filiale\",\"produit\",\"plan_compte\",\"constructeur\",\"budget_ytd\",\
             \"realise_ytd\",\"ecart\",\"taux\",\"budget_annuel\",\"eac\",\"ecart_eac\""
        );
    }

    #[test]
    fn test_every_field_quoted_and_quotes_doubled() {
        let csv = write_csv(&[sample_row()]).unwrap();
        let row_line = csv.lines().nth(1).unwrap();

        assert!(row_line.contains("\"Peugeot \"\"PSA\"\"\""));
        assert!(row_line.starts_with("\"Filiale Lyon\""));
    }

    #[test]
    fn test_unknown_metrics_are_empty_fields() {
        let csv = write_csv(&[margin_row()]).unwrap();
        let row_line = csv.lines().nth(1).unwrap();

        assert!(row_line.ends_with("\"480\",\"\",\"\""));
        assert!(row_line.contains("\"margin\""));
    }

    #[test]
    fn test_rate_is_percentage_with_one_decimal() {
        let csv = write_csv(&[sample_row()]).unwrap();
        let row_line = csv.lines().nth(1).unwrap();

        // 0.25228 -> 25.2%
        assert!(row_line.contains("\"25.2\""));
    }

    #[test]
    fn test_filename_pattern() {
        assert_eq!(csv_filename(2025), "budget_suivi_2025.csv");
    }

    /// Re-parsing the export recovers the numeric values at the stated
    /// precision.
    #[test]
    fn test_round_trip_recovers_values() {
        let rows = vec![sample_row(), margin_row()];
        let csv = write_csv(&rows).unwrap();

        let mut reader = csv::ReaderBuilder::new().from_reader(csv.as_bytes());
        let records: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), rows.len());
        for (record, row) in records.iter().zip(&rows) {
            let parse = |i: usize| -> Option<Decimal> {
                let field = record.get(i).unwrap();
                if field.is_empty() {
                    None
                } else {
                    Some(field.parse().unwrap())
                }
            };

            assert_eq!(parse(4), Some(row.budget_ytd.round_dp(2)));
            assert_eq!(parse(5), row.actual_ytd.map(|v| v.round_dp(2)));
            assert_eq!(parse(6), row.variance.map(|v| v.round_dp(2)));
            assert_eq!(
                parse(7),
                row.variance_pct
                    .map(|v| (v * Decimal::ONE_HUNDRED).round_dp(1))
            );
            assert_eq!(parse(8), Some(row.budget_total.round_dp(2)));
            assert_eq!(parse(9), row.eac.map(|v| v.round_dp(2)));
            assert_eq!(parse(10), row.eac_variance.map(|v| v.round_dp(2)));
        }
    }
}
