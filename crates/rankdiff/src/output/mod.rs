// Report output: a plain CSV and a styled XLSX per comparison.

pub mod csv;
pub mod style;
pub mod xlsx;

use rankdiff_core::compare::ComparisonRow;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: String,
        source: ::csv::Error,
    },

    #[error("failed to write spreadsheet {path}: {source}")]
    Xlsx {
        path: String,
        source: rust_xlsxwriter::XlsxError,
    },
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Column set and header text for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    pub primary_label: String,
    pub secondary_label: String,
    /// Team values carry "(bye)" suffixes.
    pub with_bye: bool,
    /// Auction value columns are present.
    pub with_values: bool,
}

impl ReportLayout {
    pub fn new(
        primary_label: impl Into<String>,
        secondary_label: impl Into<String>,
        with_bye: bool,
        rows: &[ComparisonRow],
    ) -> Self {
        ReportLayout {
            primary_label: primary_label.into(),
            secondary_label: secondary_label.into(),
            with_bye,
            with_values: rows.iter().any(|r| r.auction.is_some()),
        }
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            "Pos".to_string(),
            format!("{} Rank", self.primary_label),
            format!("{} Rank", self.secondary_label),
            "Player".to_string(),
            if self.with_bye { "Team (Bye)" } else { "Team" }.to_string(),
            "Diff".to_string(),
        ];
        if self.with_values {
            headers.push(format!("{} Value", self.primary_label));
            headers.push(format!("{} Value", self.secondary_label));
        }
        headers
    }
}

/// Where a report's files went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub xlsx: PathBuf,
}

impl ReportPaths {
    pub fn for_report(output_dir: &Path, name: &str) -> Self {
        ReportPaths {
            csv: output_dir.join(format!("{name}.csv")),
            xlsx: output_dir.join(format!("{name}_formatted.xlsx")),
        }
    }
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write both files for a report into `output_dir`, creating it if needed.
pub fn write_report(
    output_dir: &Path,
    name: &str,
    layout: &ReportLayout,
    rows: &[ComparisonRow],
) -> Result<ReportPaths, WriteError> {
    std::fs::create_dir_all(output_dir).map_err(|e| WriteError::Io {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let paths = ReportPaths::for_report(output_dir, name);
    csv::write_csv_file(&paths.csv, layout, rows)?;
    info!("Wrote {} rows to {}", rows.len(), paths.csv.display());
    xlsx::write_xlsx_file(&paths.xlsx, layout, rows)?;
    info!("Wrote {} rows to {}", rows.len(), paths.xlsx.display());
    Ok(paths)
}

/// Whole-dollar currency text with thousands separators: `$1,234`.
/// Cents are dropped, not rounded.
pub fn format_dollars(value: f64) -> String {
    let whole = value.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
