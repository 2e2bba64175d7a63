// Plain CSV export of a comparison table.

use super::{format_dollars, ReportLayout, WriteError};
use rankdiff_core::compare::ComparisonRow;
use std::io::Write;
use std::path::Path;

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn record(layout: &ReportLayout, row: &ComparisonRow) -> Vec<String> {
    let mut fields = vec![
        row.position.clone(),
        opt_to_string(row.primary_rank),
        opt_to_string(row.secondary_rank),
        row.player.clone(),
        row.team.clone(),
        opt_to_string(row.diff),
    ];
    if layout.with_values {
        let pair = row.auction;
        fields.push(opt_to_string(pair.and_then(|p| p.primary).map(format_dollars)));
        fields.push(opt_to_string(pair.map(|p| format_dollars(p.implied))));
    }
    fields
}

/// Write the table to any writer. Missing numbers become empty cells.
pub fn write_csv<W: Write>(
    writer: W,
    layout: &ReportLayout,
    rows: &[ComparisonRow],
) -> Result<(), ::csv::Error> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(layout.headers())?;
    for row in rows {
        wtr.write_record(record(layout, row))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(
    path: &Path,
    layout: &ReportLayout,
    rows: &[ComparisonRow],
) -> Result<(), WriteError> {
    let to_error = |source: ::csv::Error| WriteError::Csv {
        path: path.display().to_string(),
        source,
    };
    let file = std::fs::File::create(path).map_err(|e| to_error(e.into()))?;
    write_csv(file, layout, rows).map_err(to_error)
}
