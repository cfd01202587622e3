use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::date_utils::ReportRange;
use crate::error::{AppError, AppResult};
use crate::models::BudgetSnapshot;

/// Default destination name offered to the report sink.
pub const DEFAULT_REPORT_FILENAME: &str = "financial_report.txt";

/// A finished report, ready to hand to a sink. The generator performs no
/// file I/O itself.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub text: String,
    pub suggested_filename: String,
}

/// Receives a finished report and decides whether and where to persist it.
pub trait ReportSink {
    fn deliver(&mut self, report: &RenderedReport) -> AppResult<PathBuf>;
}

/// Writes the report to a caller-chosen path, falling back to the suggested
/// filename in the current directory.
pub struct FileReportSink {
    destination: Option<PathBuf>,
}

impl FileReportSink {
    pub fn new(destination: Option<PathBuf>) -> Self {
        Self { destination }
    }
}

impl ReportSink for FileReportSink {
    fn deliver(&mut self, report: &RenderedReport) -> AppResult<PathBuf> {
        let path = self
            .destination
            .clone()
            .unwrap_or_else(|| PathBuf::from(&report.suggested_filename));
        fs::write(&path, &report.text)?;
        info!(path = %path.display(), "Report saved");
        Ok(path)
    }
}

/// Render the report for a date range. Returns `NoData` when no snapshot
/// fell inside the range; the caller must not deliver anything in that case.
pub fn generate(snapshots: &[BudgetSnapshot], range: &ReportRange) -> AppResult<RenderedReport> {
    if snapshots.is_empty() {
        return Err(AppError::NoData);
    }

    let mut text = format!(
        "Financial Report for {} to {}\n\n",
        range.start.format("%d %B %Y"),
        range.end.format("%d %B %Y"),
    );

    for snapshot in snapshots {
        render_block(&mut text, snapshot);
    }

    debug!(snapshots = snapshots.len(), "Generated report");
    Ok(RenderedReport {
        text,
        suggested_filename: DEFAULT_REPORT_FILENAME.to_string(),
    })
}

fn render_block(text: &mut String, snapshot: &BudgetSnapshot) {
    // The (Yearly)/(Monthly) tag reproduces the historical report format:
    // any figure greater than zero is labeled "Yearly". The snapshot does
    // not retain how each field was originally entered, so this is a
    // display-only annotation. Do not copy this rule anywhere else.
    let row = |label: &str, value: f64| {
        format!(
            "{}: {} ({})\n",
            label,
            format_amount(value),
            if value > 0.0 { "Yearly" } else { "Monthly" }
        )
    };

    text.push_str(&row("Total Salary", snapshot.total_salary));
    text.push_str(&row("Earned Income", snapshot.earned_income));
    text.push_str(&row(
        "Pension & Social Security",
        snapshot.pension_social_security,
    ));
    text.push_str(&row("Total Expenses", snapshot.total_expenses));
    text.push_str(&format!(
        "Total Savings: {}\n\n",
        format_amount(snapshot.total_savings)
    ));
}

/// Two decimal places with thousands separators, e.g. `12,345.68`. The only
/// place amounts are rounded.
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .expect("two-decimal format always contains a point");

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Writes the report to `directory/suggested_filename`. Used where the
/// caller only picks a folder, not a full path.
pub struct DirectoryReportSink {
    directory: PathBuf,
}

impl DirectoryReportSink {
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
        }
    }
}

impl ReportSink for DirectoryReportSink {
    fn deliver(&mut self, report: &RenderedReport) -> AppResult<PathBuf> {
        let path = self.directory.join(&report.suggested_filename);
        fs::write(&path, &report.text)?;
        info!(path = %path.display(), "Report saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(950.5), "950.50");
        assert_eq!(format_amount(1200.0), "1,200.00");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_amount(-2300.0), "-2,300.00");
        assert_eq!(format_amount(-0.5), "-0.50");
    }

    #[test]
    fn rounding_can_carry_into_a_new_group() {
        assert_eq!(format_amount(999.999), "1,000.00");
    }
}
