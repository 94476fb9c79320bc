//! Analyst reservation report: CSV download, parsing, and aggregates.
//!
//! DESIGN
//! ======
//! The payload is parsed with the `csv` crate so quoted fields and embedded
//! commas survive. Trimmed header names are the record keys verbatim. Rows
//! whose values are all blank are dropped before anything is counted, so the
//! table and every aggregate see the same records.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use std::collections::BTreeMap;

use crate::api::HotelApi;
use crate::error::BookingError;
use crate::role::Capability;
use crate::session::Session;

pub const REPORT_FILE_NAME: &str = "reservaciones.csv";

pub const PRICE_FIELD: &str = "Precio";
pub const ROOM_TYPE_FIELD: &str = "Tipo de Cuarto";
pub const ROOM_TYPE_FALLBACK_FIELD: &str = "Tipo";
pub const START_FIELD: &str = "Fecha Inicio";
pub const UNSPECIFIED_TYPE: &str = "Unspecified";

/// One non-blank CSV row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportRecord {
    values: BTreeMap<String, String>,
    price: Option<f64>,
}

impl ReportRecord {
    /// Raw cell for a header; `None` when the row was too short.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// `Precio` coerced from currency text.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// `Tipo de Cuarto`, falling back to `Tipo`, else "Unspecified".
    #[must_use]
    pub fn room_type(&self) -> &str {
        [ROOM_TYPE_FIELD, ROOM_TYPE_FALLBACK_FIELD]
            .iter()
            .find_map(|f| self.get(f).filter(|v| !v.is_empty()))
            .unwrap_or(UNSPECIFIED_TYPE)
    }

    /// `YYYY-MM` prefix of `Fecha Inicio`.
    #[must_use]
    pub fn month(&self) -> Option<&str> {
        let start = self.get(START_FIELD).filter(|v| !v.is_empty())?;
        Some(start.get(..7).unwrap_or(start))
    }
}

/// Parsed reservation report plus the raw payload for export.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    headers: Vec<String>,
    records: Vec<ReportRecord>,
    raw: String,
}

impl Report {
    /// # Errors
    ///
    /// Returns [`BookingError::Report`] when the text is not valid CSV.
    pub fn parse(text: &str) -> Result<Self, BookingError> {
        let body = text.trim_start_matches('\u{feff}');
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| BookingError::Report(e.to_string()))?
            .iter()
            .map(str::to_owned)
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| BookingError::Report(e.to_string()))?;
            if row.iter().all(str::is_empty) {
                continue;
            }
            let values: BTreeMap<String, String> =
                headers.iter().cloned().zip(row.iter().map(str::to_owned)).collect();
            let price = values.get(PRICE_FIELD).and_then(|v| parse_currency(v));
            records.push(ReportRecord { values, price });
        }

        log::debug!("parsed report with {} columns and {} records", headers.len(), records.len());
        Ok(Self { headers, records, raw: text.to_owned() })
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    /// The payload exactly as downloaded.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Sum of every record's price; unparseable prices count as zero.
    #[must_use]
    pub fn revenue_total(&self) -> f64 {
        self.records.iter().filter_map(ReportRecord::price).sum()
    }

    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary { reservations: self.records.len(), ..ReportSummary::default() };
        for record in &self.records {
            let price = record.price().unwrap_or(0.0);
            let room_type = record.room_type().to_owned();
            *summary.count_by_type.entry(room_type.clone()).or_default() += 1;
            *summary.revenue_by_type.entry(room_type).or_default() += price;
            if let Some(month) = record.month() {
                *summary.revenue_by_month.entry(month.to_owned()).or_default() += price;
            }
            summary.revenue += price;
        }
        summary
    }
}

/// Aggregates behind the analyst charts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportSummary {
    pub reservations: usize,
    pub revenue: f64,
    pub count_by_type: BTreeMap<String, usize>,
    pub revenue_by_type: BTreeMap<String, f64>,
    /// Keyed by `YYYY-MM`, so iteration is chronological.
    pub revenue_by_month: BTreeMap<String, f64>,
}

impl ReportSummary {
    /// Mean revenue per reservation for `room_type`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_for(&self, room_type: &str) -> Option<f64> {
        let count = *self.count_by_type.get(room_type)?;
        let revenue = self.revenue_by_type.get(room_type).copied().unwrap_or(0.0);
        (count > 0).then(|| revenue / count as f64)
    }
}

/// Parse currency text such as `$1,234.50` or ` 850 `.
#[must_use]
pub fn parse_currency(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace()).collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Download and parse the reservation report.
///
/// # Errors
///
/// `LoginRequired`/`Forbidden` without [`Capability::ViewReports`], `Api` on
/// failure, `Report` when the payload is not CSV.
pub async fn fetch_report<A: HotelApi>(api: &A, session: &Session) -> Result<Report, BookingError> {
    let token = session.require(Capability::ViewReports)?;
    let text = api.reservations_csv(token).await?;
    Report::parse(&text)
}
