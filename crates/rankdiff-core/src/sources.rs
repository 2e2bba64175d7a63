// Ranking source loading.
//
// Every provider exports a differently-shaped CSV, so each source is described
// by a `SourceSpec` that says which column holds which field. Columns are
// picked by header name ("PLAYER NAME") or by zero-based position for exports
// whose first column has no usable header.

use crate::player::{parse_dollars, parse_rank, PlayerRecord};
use csv::StringRecord;
use serde::Deserialize;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Reference to a CSV column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// Zero-based column position.
    Index(usize),
    /// Exact header text.
    Header(String),
}

impl ColumnRef {
    /// Locate the column in a header row.
    pub fn resolve(&self, headers: &StringRecord) -> Option<usize> {
        match self {
            ColumnRef::Index(idx) => (*idx < headers.len()).then_some(*idx),
            ColumnRef::Header(name) => headers.iter().position(|h| h.trim() == name),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(idx) => write!(f, "column #{idx}"),
            ColumnRef::Header(name) => write!(f, "'{name}'"),
        }
    }
}

/// Where a ranking source lives and how to read it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceSpec {
    /// Short name used in report headers ("FPros", "UD").
    pub label: String,
    pub path: PathBuf,
    pub player: ColumnRef,
    /// Omitted when the list order itself is the ranking.
    #[serde(default)]
    pub rank: Option<ColumnRef>,
    #[serde(default)]
    pub position: Option<ColumnRef>,
    #[serde(default)]
    pub team: Option<ColumnRef>,
    #[serde(default)]
    pub bye: Option<ColumnRef>,
    #[serde(default)]
    pub auction: Option<ColumnRef>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path}: no {column} column for {field}")]
    MissingColumn {
        path: String,
        field: &'static str,
        column: String,
    },
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Column positions resolved against one file's header row.
#[derive(Debug, Clone, Copy)]
struct Layout {
    player: usize,
    rank: Option<usize>,
    position: Option<usize>,
    team: Option<usize>,
    bye: Option<usize>,
    auction: Option<usize>,
}

impl Layout {
    fn resolve(spec: &SourceSpec, headers: &StringRecord) -> Result<Self, SourceError> {
        let required = |field: &'static str, column: &ColumnRef| {
            column
                .resolve(headers)
                .ok_or_else(|| SourceError::MissingColumn {
                    path: spec.path.display().to_string(),
                    field,
                    column: column.to_string(),
                })
        };
        let optional = |field: &'static str, column: &Option<ColumnRef>| {
            column.as_ref().map(|c| required(field, c)).transpose()
        };

        Ok(Layout {
            player: required("player", &spec.player)?,
            rank: optional("rank", &spec.rank)?,
            position: optional("position", &spec.position)?,
            team: optional("team", &spec.team)?,
            bye: optional("bye", &spec.bye)?,
            auction: optional("auction", &spec.auction)?,
        })
    }
}

fn cell(row: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(str::trim).unwrap_or("")
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Read at most `max_rows` data rows from a CSV stream.
///
/// Malformed rows and rows without a player name are skipped with a warning
/// but still count toward `max_rows`, so the cutoff always refers to the
/// file's own row numbers. Without a rank column the 1-based row number is
/// the rank.
fn load_from_reader<R: Read>(
    rdr: R,
    spec: &SourceSpec,
    max_rows: usize,
) -> Result<Vec<PlayerRecord>, SourceError> {
    let path = spec.path.display().to_string();
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader
        .headers()
        .map_err(|e| SourceError::Csv {
            path: path.clone(),
            source: e,
        })?
        .clone();
    let layout = Layout::resolve(spec, &headers)?;

    let mut players = Vec::new();
    for (i, result) in reader.records().take(max_rows).enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!("{}: skipping malformed row {}: {}", spec.label, i + 1, e);
                continue;
            }
        };

        let name = cell(&row, Some(layout.player));
        if name.is_empty() {
            warn!("{}: skipping row {} with no player name", spec.label, i + 1);
            continue;
        }

        let rank = match layout.rank {
            Some(_) => {
                let raw = cell(&row, layout.rank);
                let rank = parse_rank(raw);
                if rank.is_none() {
                    debug!("{}: unparseable rank '{}' for '{}'", spec.label, raw, name);
                }
                rank
            }
            None => u32::try_from(i + 1).ok(),
        };

        let bye = cell(&row, layout.bye);
        players.push(PlayerRecord {
            name: name.to_string(),
            position: cell(&row, layout.position).to_string(),
            team: cell(&row, layout.team).to_string(),
            rank,
            auction_value: parse_dollars(cell(&row, layout.auction)),
            bye_week: (!bye.is_empty()).then(|| bye.to_string()),
        });
    }
    Ok(players)
}

/// Load one ranking source from disk.
pub fn load_source(spec: &SourceSpec, max_rows: usize) -> Result<Vec<PlayerRecord>, SourceError> {
    let file = std::fs::File::open(&spec.path).map_err(|e| SourceError::Io {
        path: spec.path.display().to_string(),
        source: e,
    })?;
    let players = load_from_reader(file, spec, max_rows)?;
    debug!("{}: {} players from {}", spec.label, players.len(), spec.path.display());
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
