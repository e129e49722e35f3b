use std::fs;
use std::path::Path;

use anyhow::Result;
use api_client::{BudgetApiClient, FetchError};
use chrono::Local;
use models::{Dashboard, DashboardMetadata, Month, PeakField, RawRecord};

use crate::aggregator::{monthly_totals, peak_by, quarterly_totals, Aggregated};
use crate::classifier::classify_records;
use crate::presentation::build_layout;

fn collect_warnings<T>(label: &str, aggregated: &Aggregated<T>, warnings: &mut Vec<String>) {
    warnings.extend(aggregated.warnings.iter().map(|e| format!("{label}: {e}")));
}

/// Classify, aggregate and lay out one batch of API rows.
pub fn run_pipeline(records: Vec<RawRecord>, page_title: &str) -> Dashboard {
    let records_received = records.len();
    let classified = classify_records(records);

    let quarterly = quarterly_totals(&classified);
    let january = monthly_totals(&classified, Month::Janeiro);
    let january_peaks = peak_by(&classified, PeakField::Month(Month::Janeiro));
    let total_peaks = peak_by(&classified, PeakField::Total);

    let mut warnings = Vec::new();
    collect_warnings("quarterly totals", &quarterly, &mut warnings);
    collect_warnings("January totals", &january, &mut warnings);
    collect_warnings("January peaks", &january_peaks, &mut warnings);
    collect_warnings("total peaks", &total_peaks, &mut warnings);

    let layout = build_layout(
        page_title,
        &quarterly.rows,
        &january.rows,
        &january_peaks.rows,
        &total_peaks.rows,
    );

    tracing::debug!(
        received = records_received,
        classified = classified.len(),
        warnings = warnings.len(),
        "pipeline finished"
    );

    Dashboard {
        metadata: DashboardMetadata {
            generated_at: Local::now().to_rfc3339(),
            records_received,
            records_classified: classified.len(),
            records_dropped: records_received - classified.len(),
        },
        quarterly: quarterly.rows,
        january: january.rows,
        january_peaks: january_peaks.rows,
        total_peaks: total_peaks.rows,
        layout,
        warnings,
    }
}

/// Fetches fresh rows and runs the pipeline over them.
pub fn generate_dashboard(client: &BudgetApiClient, page_title: &str) -> Result<Dashboard, FetchError> {
    let records = client.fetch_records()?;
    Ok(run_pipeline(records, page_title))
}

pub fn write_dashboard_json(output: &Dashboard, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(output)?;
    fs::write(out_path, json)?;
    Ok(())
}
