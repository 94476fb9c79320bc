use futures::executor::block_on;

use super::*;
use crate::fake_api::{FakeApi, session_with_role};

const SAMPLE: &str = "\
ID,Fecha Inicio,Fecha Fin,Usuario,Email,Número,Tipo de Cuarto,Precio
1,2025-01-10,2025-01-12,Ana,ana@example.com,101,simple,$500.00
2,2025-01-20,2025-01-25,\"Pérez, Luis\",luis@example.com,202,suite,\"$1,500.00\"
,,,,,,,
3,2024-12-31,2025-01-02,Eva,eva@example.com,103,,$250
";

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn headers_are_trimmed_keys() {
    let report = Report::parse(" ID , Precio \n7, $10 \n").unwrap();
    assert_eq!(report.headers(), ["ID", "Precio"]);
    assert_eq!(report.records()[0].get("ID"), Some("7"));
    assert_eq!(report.records()[0].price(), Some(10.0));
}

#[test]
fn quoted_commas_are_preserved() {
    let report = Report::parse(SAMPLE).unwrap();
    let luis = &report.records()[1];
    assert_eq!(luis.get("Usuario"), Some("Pérez, Luis"));
    assert_eq!(luis.get("Email"), Some("luis@example.com"));
    assert_eq!(luis.price(), Some(1500.0));
}

#[test]
fn blank_rows_are_excluded() {
    let report = Report::parse(SAMPLE).unwrap();
    assert_eq!(report.records().len(), 3);
    assert!(close(report.revenue_total(), 2250.0));
}

#[test]
fn blank_row_wider_than_headers_is_excluded() {
    let report = Report::parse("ID,Precio\n1,$100.50\n,,\n").unwrap();
    assert_eq!(report.records().len(), 1);
    assert_eq!(report.records()[0].price(), Some(100.5));
    assert!(close(report.revenue_total(), 100.5));
}

#[test]
fn ragged_rows_are_tolerated() {
    let report = Report::parse("ID,Tipo,Precio\n1,doble\n").unwrap();
    let record = &report.records()[0];
    assert_eq!(record.get("Precio"), None);
    assert_eq!(record.price(), None);
    assert_eq!(record.room_type(), "doble");
}

#[test]
fn raw_payload_is_kept_for_export() {
    let report = Report::parse(SAMPLE).unwrap();
    assert_eq!(report.raw(), SAMPLE);
}

#[test]
fn currency_text_is_coerced() {
    assert_eq!(parse_currency("$1,234.50"), Some(1234.5));
    assert_eq!(parse_currency(" 850 "), Some(850.0));
    assert_eq!(parse_currency("n/a"), None);
    assert_eq!(parse_currency(""), None);
}

// =============================================================
// Summary
// =============================================================

#[test]
fn summary_groups_by_type_and_month() {
    let summary = Report::parse(SAMPLE).unwrap().summary();
    assert_eq!(summary.reservations, 3);
    assert!(close(summary.revenue, 2250.0));
    assert_eq!(summary.count_by_type.get("simple"), Some(&1));
    assert_eq!(summary.count_by_type.get(UNSPECIFIED_TYPE), Some(&1));
    assert!(close(summary.revenue_by_type["suite"], 1500.0));
    let months: Vec<_> = summary.revenue_by_month.keys().cloned().collect();
    assert_eq!(months, ["2024-12", "2025-01"]);
    assert!(close(summary.revenue_by_month["2025-01"], 2000.0));
    assert!(close(summary.average_for("suite").unwrap(), 1500.0));
    assert_eq!(summary.average_for("triple"), None);
}

#[test]
fn plain_tipo_column_is_a_fallback() {
    let summary = Report::parse("Tipo,Precio\ndoble,100\n").unwrap().summary();
    assert_eq!(summary.count_by_type.get("doble"), Some(&1));
}

#[test]
fn empty_payload_summarizes_to_zero() {
    let summary = Report::parse("").unwrap().summary();
    assert_eq!(summary, ReportSummary::default());
}

// =============================================================
// fetch_report
// =============================================================

#[test]
fn only_analysts_fetch_reports() {
    let api = FakeApi::new();
    *api.csv.borrow_mut() = SAMPLE.to_owned();
    assert_eq!(block_on(fetch_report(&api, &session_with_role(Some("ADMIN")))), Err(BookingError::Forbidden));
    assert!(api.calls().is_empty());

    let report = block_on(fetch_report(&api, &session_with_role(Some("ANALYST")))).unwrap();
    assert_eq!(report.records().len(), 3);
}
