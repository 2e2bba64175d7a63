// Styled XLSX export of a comparison table.
//
// Same columns as the CSV export. Every cell is centered; the position column
// is tinted by position and the secondary source's rank and value cells are
// colored by how far they stray from the primary source.

use super::style::{row_styles, CellStyle};
use super::{ReportLayout, WriteError};
use rankdiff_core::compare::ComparisonRow;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

const CURRENCY_FORMAT: &str = "$#,##0";
const SHEET_NAME: &str = "Rankings";

// Column positions
const COL_POS: u16 = 0;
const COL_PRIMARY_RANK: u16 = 1;
const COL_SECONDARY_RANK: u16 = 2;
const COL_PLAYER: u16 = 3;
const COL_TEAM: u16 = 4;
const COL_DIFF: u16 = 5;
const COL_PRIMARY_VALUE: u16 = 6;
const COL_SECONDARY_VALUE: u16 = 7;

fn base_format() -> Format {
    Format::new().set_align(FormatAlign::Center)
}

fn styled(style: CellStyle) -> Format {
    let mut format = base_format();
    if let Some(rgb) = style.font {
        format = format.set_font_color(Color::RGB(rgb));
    }
    if let Some(rgb) = style.fill {
        format = format.set_background_color(Color::RGB(rgb));
    }
    format
}

fn write_opt_number(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
    format: &Format,
) -> Result<(), XlsxError> {
    match value {
        Some(n) => sheet.write_number_with_format(row, col, n, format)?,
        None => sheet.write_blank(row, col, format)?,
    };
    Ok(())
}

fn write_header(sheet: &mut Worksheet, layout: &ReportLayout) -> Result<(), XlsxError> {
    let header = base_format()
        .set_bold()
        .set_border_bottom(FormatBorder::Thin);
    for (col, title) in layout.headers().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, title, &header)?;
    }
    Ok(())
}

fn write_row(
    sheet: &mut Worksheet,
    xl_row: u32,
    layout: &ReportLayout,
    row: &ComparisonRow,
) -> Result<(), XlsxError> {
    let plain = base_format();
    let styles = row_styles(row);

    let position_format = styled(styles.position);
    sheet.write_string_with_format(xl_row, COL_POS, &row.position, &position_format)?;
    write_opt_number(sheet, xl_row, COL_PRIMARY_RANK, row.primary_rank.map(f64::from), &plain)?;
    write_opt_number(
        sheet,
        xl_row,
        COL_SECONDARY_RANK,
        row.secondary_rank.map(f64::from),
        &styled(styles.secondary_rank),
    )?;
    sheet.write_string_with_format(xl_row, COL_PLAYER, &row.player, &plain)?;
    sheet.write_string_with_format(xl_row, COL_TEAM, &row.team, &plain)?;
    write_opt_number(sheet, xl_row, COL_DIFF, row.diff.map(|d| d as f64), &plain)?;

    if layout.with_values {
        let currency = base_format().set_num_format(CURRENCY_FORMAT);
        let value_format = styled(styles.secondary_value.unwrap_or_default())
            .set_num_format(CURRENCY_FORMAT);
        let pair = row.auction;
        write_opt_number(
            sheet,
            xl_row,
            COL_PRIMARY_VALUE,
            pair.and_then(|p| p.primary),
            &currency,
        )?;
        write_opt_number(
            sheet,
            xl_row,
            COL_SECONDARY_VALUE,
            pair.map(|p| p.implied),
            &value_format,
        )?;
    }
    Ok(())
}

/// Build the workbook in memory.
pub fn build_workbook(layout: &ReportLayout, rows: &[ComparisonRow]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    write_header(sheet, layout)?;
    for (i, row) in rows.iter().enumerate() {
        write_row(sheet, i as u32 + 1, layout, row)?;
    }

    sheet.set_column_width(COL_POS, 8)?;
    sheet.set_column_width(COL_PRIMARY_RANK, 12)?;
    sheet.set_column_width(COL_SECONDARY_RANK, 12)?;
    sheet.set_column_width(COL_PLAYER, 26)?;
    sheet.set_column_width(COL_TEAM, 14)?;
    sheet.set_column_width(COL_DIFF, 8)?;
    if layout.with_values {
        sheet.set_column_width(COL_PRIMARY_VALUE, 12)?;
        sheet.set_column_width(COL_SECONDARY_VALUE, 12)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    Ok(workbook)
}

pub fn write_xlsx_file(
    path: &Path,
    layout: &ReportLayout,
    rows: &[ComparisonRow],
) -> Result<(), WriteError> {
    let to_error = |source: XlsxError| WriteError::Xlsx {
        path: path.display().to_string(),
        source,
    };
    let mut workbook = build_workbook(layout, rows).map_err(to_error)?;
    workbook.save(path).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankdiff_core::compare::AuctionPair;

    fn sample_rows() -> Vec<ComparisonRow> {
        vec![
            ComparisonRow {
                position: "WR3".into(),
                primary_rank: Some(100),
                secondary_rank: Some(78),
                player: "Rome Odunze".into(),
                team: "CHI".into(),
                diff: Some(22),
                auction: Some(AuctionPair {
                    primary: Some(4.0),
                    implied: 3.0,
                }),
            },
            ComparisonRow {
                position: "QB1".into(),
                primary_rank: None,
                secondary_rank: Some(12),
                player: "Lamar Jackson".into(),
                team: "BAL".into(),
                diff: None,
                auction: Some(AuctionPair {
                    primary: None,
                    implied: 0.0,
                }),
            },
        ]
    }

    #[test]
    fn workbook_serializes_to_xlsx_bytes() {
        let rows = sample_rows();
        let layout = ReportLayout::new("ESPN", "UD", false, &rows);
        let mut workbook = build_workbook(&layout, &rows).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();
        // XLSX is a zip container.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_table_still_builds() {
        let layout = ReportLayout::new("FPros", "UD", true, &[]);
        let mut workbook = build_workbook(&layout, &[]).unwrap();
        assert!(!workbook.save_to_buffer().unwrap().is_empty());
    }
}
