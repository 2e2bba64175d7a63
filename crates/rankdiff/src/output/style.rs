// Cell styling rules shared by the spreadsheet writer.
//
// Colors are plain 0xRRGGBB values so the rules stay testable without a
// workbook.

use rankdiff_core::compare::ComparisonRow;
use rankdiff_core::severity::SeverityTier;

pub const LIGHT_GREEN: u32 = 0x90EE90;
pub const GREEN: u32 = 0x008000;
pub const BLACK: u32 = 0x000000;
pub const RED: u32 = 0xFF0000;
pub const CORAL: u32 = 0xFF7F50;

pub const LIGHT_CYAN: u32 = 0xE0FFFF;
pub const PEACH_PUFF: u32 = 0xFFDAB9;
pub const LAVENDER: u32 = 0xE6E6FA;
pub const LIGHT_YELLOW: u32 = 0xFFFFE0;

/// Visual treatment of one cell. `None` leaves the spreadsheet default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub font: Option<u32>,
    pub fill: Option<u32>,
}

/// Severe disagreements get a filled background, mild ones a colored font.
pub fn tier_style(tier: SeverityTier) -> CellStyle {
    match tier {
        SeverityTier::VeryGood => CellStyle {
            font: None,
            fill: Some(LIGHT_GREEN),
        },
        SeverityTier::Good => CellStyle {
            font: Some(GREEN),
            fill: None,
        },
        SeverityTier::Neutral => CellStyle {
            font: Some(BLACK),
            fill: None,
        },
        SeverityTier::Bad => CellStyle {
            font: Some(RED),
            fill: None,
        },
        SeverityTier::VeryBad => CellStyle {
            font: None,
            fill: Some(CORAL),
        },
    }
}

/// Background for the position column, keyed on the position prefix.
pub fn position_fill(position: &str) -> Option<u32> {
    if position.starts_with("WR") {
        Some(LIGHT_CYAN)
    } else if position.starts_with("RB") {
        Some(PEACH_PUFF)
    } else if position.starts_with("TE") {
        Some(LAVENDER)
    } else if position.starts_with("QB") {
        Some(LIGHT_YELLOW)
    } else {
        None
    }
}

pub fn position_style(position: &str) -> CellStyle {
    CellStyle {
        font: None,
        fill: position_fill(position),
    }
}

/// Styles for the cells of one row that are not plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyles {
    pub position: CellStyle,
    /// Secondary rank judged against the primary rank.
    pub secondary_rank: CellStyle,
    /// Implied value judged against the primary price; `None` for rows
    /// without auction values.
    pub secondary_value: Option<CellStyle>,
}

pub fn row_styles(row: &ComparisonRow) -> RowStyles {
    RowStyles {
        position: position_style(&row.position),
        secondary_rank: tier_style(row.rank_tier()),
        secondary_value: row.value_tier().map(tier_style),
    }
}
