//! Spreadsheet export of the final snapshot.

use std::path::Path;

use tyrescout_core::{BusinessRecord, UNKNOWN};
use tyrescout_google::{GoogleError, SheetsClient};

use crate::error::PipelineError;
use crate::snapshot::{read_snapshot, Stage};
use crate::sources::SpreadsheetExport;

const SHEET_TITLE: &str = "Companies";

pub const HEADER: [&str; 13] = [
    "Company Name",
    "Company Type",
    "Address",
    "Phone Number",
    "Website",
    "Rating",
    "Repair Costs",
    "Repair Frequency",
    "Damage Types",
    "Quality Score",
    "Quality Flag",
    "Area",
    "Search Term",
];

/// Header row followed by one row per record. Unknown values are written as
/// `Unknown`, missing derived values as empty cells.
#[must_use]
pub fn sheet_rows(records: &[BusinessRecord]) -> Vec<Vec<String>> {
    fn or_unknown(value: Option<&str>) -> String {
        value.unwrap_or(UNKNOWN).to_owned()
    }

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(HEADER.iter().map(|h| (*h).to_owned()).collect());
    rows.extend(records.iter().map(|r| {
        vec![
            r.name.clone(),
            r.company_type
                .map_or_else(|| UNKNOWN.to_owned(), |t| t.to_string()),
            r.address.clone(),
            or_unknown(r.phone_number.as_deref()),
            or_unknown(r.website.as_deref()),
            r.rating.map(|v| v.to_string()).unwrap_or_default(),
            or_unknown(r.repair_costs.as_deref()),
            or_unknown(r.repair_frequency.as_deref()),
            or_unknown(r.damage_types.as_deref()),
            r.quality_score.map(|v| v.to_string()).unwrap_or_default(),
            r.quality_flag.map(|v| v.to_string()).unwrap_or_default(),
            r.source_area.clone(),
            r.source_search_term.clone(),
        ]
    }));
    rows
}

#[must_use]
pub fn spreadsheet_url(spreadsheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{spreadsheet_id}")
}

/// Creates a new spreadsheet per export and writes every row in one call.
pub struct SheetsExporter {
    client: SheetsClient,
    title: String,
}

impl SheetsExporter {
    #[must_use]
    pub fn new(client: SheetsClient, title: impl Into<String>) -> Self {
        Self {
            client,
            title: title.into(),
        }
    }
}

impl SpreadsheetExport for SheetsExporter {
    type Error = GoogleError;

    async fn export(&self, records: &[BusinessRecord]) -> Result<String, GoogleError> {
        let id = self
            .client
            .create_spreadsheet(&self.title, SHEET_TITLE)
            .await?;
        let rows = sheet_rows(records);
        self.client
            .write_rows(&id, &format!("{SHEET_TITLE}!A1"), &rows)
            .await?;
        Ok(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub spreadsheet_id: String,
    pub records: usize,
}

/// Exports the reviewed snapshot. A failed export leaves the snapshot as is.
///
/// # Errors
///
/// Returns the snapshot errors of [`read_snapshot`], or
/// [`PipelineError::Export`] if the exporter fails.
pub async fn export_snapshot<E: SpreadsheetExport>(
    data_dir: &Path,
    exporter: &E,
) -> Result<ExportOutcome, PipelineError> {
    let records = read_snapshot(data_dir, Stage::Reviewed)?;
    let spreadsheet_id = exporter
        .export(&records)
        .await
        .map_err(|e| PipelineError::Export(e.to_string()))?;
    tracing::info!(%spreadsheet_id, records = records.len(), "export complete");
    Ok(ExportOutcome {
        spreadsheet_id,
        records: records.len(),
    })
}
