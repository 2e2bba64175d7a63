// Player records as read from a single ranking source, plus the lenient
// numeric coercions applied to rank and auction columns.

use std::fmt;

// ---------------------------------------------------------------------------
// PlayerRecord
// ---------------------------------------------------------------------------

/// One row from one ranking source.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    /// Prefix-coded position ("WR", "RB1", "DST"...). Empty when the source
    /// has no position column.
    pub position: String,
    pub team: String,
    /// 1-based rank within the source. `None` when the cell was blank or
    /// could not be parsed.
    pub rank: Option<u32>,
    pub auction_value: Option<f64>,
    pub bye_week: Option<String>,
}

impl PlayerRecord {
    /// Minimal constructor used by loaders and tests; optional columns start
    /// empty.
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        team: impl Into<String>,
        rank: Option<u32>,
    ) -> Self {
        PlayerRecord {
            name: name.into(),
            position: position.into(),
            team: team.into(),
            rank,
            auction_value: None,
            bye_week: None,
        }
    }

    pub fn with_auction_value(mut self, value: f64) -> Self {
        self.auction_value = Some(value);
        self
    }

    pub fn with_bye_week(mut self, bye: impl Into<String>) -> Self {
        self.bye_week = Some(bye.into());
        self
    }

    /// Team as shown in reports: `"KC (10)"` when a bye week is known,
    /// otherwise just the team code.
    pub fn team_display(&self) -> String {
        match &self.bye_week {
            Some(bye) => format!("{} ({})", self.team, bye),
            None => self.team.clone(),
        }
    }
}

impl fmt::Display for PlayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Some(rank) => write!(f, "#{rank} {} ({} {})", self.name, self.position, self.team),
            None => write!(f, "#- {} ({} {})", self.name, self.position, self.team),
        }
    }
}

/// Anything that carries a roster position. Lets the roster filter work on
/// raw source rows and on joined rows alike.
pub trait Positioned {
    fn position(&self) -> &str;
}

impl Positioned for PlayerRecord {
    fn position(&self) -> &str {
        &self.position
    }
}

// ---------------------------------------------------------------------------
// Safe integer coercion
// ---------------------------------------------------------------------------

/// Lossy conversion to an integer where anything missing or unparseable
/// becomes `0`. Fractional values truncate toward zero.
pub trait SafeInt {
    fn safe_int(&self) -> i64;
}

impl SafeInt for i64 {
    fn safe_int(&self) -> i64 {
        *self
    }
}

impl SafeInt for u32 {
    fn safe_int(&self) -> i64 {
        i64::from(*self)
    }
}

impl SafeInt for f64 {
    fn safe_int(&self) -> i64 {
        if self.is_finite() {
            self.trunc() as i64
        } else {
            0
        }
    }
}

impl SafeInt for &str {
    fn safe_int(&self) -> i64 {
        self.trim().parse::<i64>().unwrap_or(0)
    }
}

impl<T: SafeInt> SafeInt for Option<T> {
    fn safe_int(&self) -> i64 {
        self.as_ref().map_or(0, SafeInt::safe_int)
    }
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Parse a rank cell. Accepts integers and integral floats ("12", "12.0");
/// blanks, text, non-finite and non-positive values are treated as missing.
pub fn parse_rank(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(n) = raw.parse::<i64>() {
        return u32::try_from(n).ok().filter(|&n| n > 0);
    }
    let n = raw.parse::<f64>().ok().filter(|n| n.is_finite())?;
    if n < 1.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(n.trunc() as u32)
}

/// Parse an auction price such as `"54"`, `"$54"` or `"$1,050"`.
pub fn parse_dollars(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
