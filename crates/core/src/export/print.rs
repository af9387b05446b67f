//! Print-ready HTML presenter.
//!
//! Builds a standalone HTML document with the analysis table and an
//! auto-invoked print dialog. No PDF is generated here; the browser's
//! print-to-PDF capability does that. Opening the document in a 1000x700
//! window is the caller's concern.

use rust_decimal::Decimal;

use crate::analysis::{Analysis, AnalysisRow};

/// Builds the print document for an analysis.
#[must_use]
pub fn print_document(analysis: &Analysis) -> String {
    let mut body = String::new();

    for row in &analysis.rows {
        body.push_str("<tr>");
        push_cell(&mut body, &row.filiale);
        push_cell(&mut body, &row.produit);
        push_cell(&mut body, row.plan_type.as_str());
        push_cell(&mut body, &row.constructeur);
        push_amount(&mut body, Some(row.budget_ytd));
        push_amount(&mut body, row.actual_ytd);
        push_amount(&mut body, row.variance);
        push_rate(&mut body, row.variance_pct);
        push_amount(&mut body, Some(row.budget_total));
        push_amount(&mut body, row.eac);
        push_amount(&mut body, row.eac_variance);
        body.push_str("</tr>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Suivi budget {year}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 24px; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #999; padding: 4px 8px; font-size: 12px; }}\n\
         td.num {{ text-align: right; }}\n\
         th {{ background: #eee; }}\n\
         </style>\n</head>\n<body>\n\
         <h1>Suivi budget {year}</h1>\n\
         <p>{months} mois &eacute;coul&eacute;s</p>\n\
         <table>\n<thead><tr>\
         <th>Filiale</th><th>Produit</th><th>Plan compte</th><th>Constructeur</th>\
         <th>Budget YTD</th><th>R&eacute;alis&eacute; YTD</th><th>&Eacute;cart</th>\
         <th>Taux</th><th>Budget annuel</th><th>EAC</th><th>&Eacute;cart EAC</th>\
         </tr></thead>\n<tbody>\n{body}</tbody>\n</table>\n\
         <script>window.print();</script>\n</body>\n</html>\n",
        year = analysis.year,
        months = analysis.months_elapsed,
        body = body,
    )
}

fn push_cell(out: &mut String, value: &str) {
    out.push_str("<td>");
    out.push_str(&escape_html(value));
    out.push_str("</td>");
}

fn push_amount(out: &mut String, value: Option<Decimal>) {
    out.push_str("<td class=\"num\">");
    match value {
        Some(v) => out.push_str(&format_fr(v, 2)),
        None => out.push('-'),
    }
    out.push_str("</td>");
}

fn push_rate(out: &mut String, value: Option<Decimal>) {
    out.push_str("<td class=\"num\">");
    match value {
        Some(v) => {
            out.push_str(&format_fr(v * Decimal::ONE_HUNDRED, 1));
            out.push_str("\u{a0}%");
        }
        None => out.push('-'),
    }
    out.push_str("</td>");
}

/// Formats a decimal the fr-FR way: non-breaking-space thousands groups,
/// comma decimal separator, fixed number of decimals.
#[must_use]
pub fn format_fr(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp(decimals);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, String::new()),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(*digit);
    }

    let mut frac = frac_part;
    while (frac.len() as u32) < decimals {
        frac.push('0');
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    if decimals == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac}")
    }
}

/// Escapes a value for inclusion in HTML text content.
fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
