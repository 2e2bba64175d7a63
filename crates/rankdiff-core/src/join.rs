// Inner join of two ranking sources on normalized player name.

use crate::names::join_key;
use crate::player::{PlayerRecord, Positioned};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A player found in both sources.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    pub primary: PlayerRecord,
    pub secondary: PlayerRecord,
    /// `primary.rank - secondary.rank`; `None` if either rank is missing.
    pub diff: Option<i64>,
}

impl MergedRecord {
    pub fn new(primary: PlayerRecord, secondary: PlayerRecord) -> Self {
        let diff = match (primary.rank, secondary.rank) {
            (Some(p), Some(s)) => Some(i64::from(p) - i64::from(s)),
            _ => None,
        };
        MergedRecord {
            primary,
            secondary,
            diff,
        }
    }
}

impl Positioned for MergedRecord {
    /// The primary source's position, falling back to the secondary's when
    /// the primary source has no position column.
    fn position(&self) -> &str {
        if self.primary.position.is_empty() {
            &self.secondary.position
        } else {
            &self.primary.position
        }
    }
}

/// Join `primary` and `secondary` on [`join_key`].
///
/// Players present in only one source are dropped without complaint. A key
/// repeated within one source matches every record with that key on the
/// other side (plain relational inner-join semantics); such repeats are
/// logged because they usually mean two different players share a name.
///
/// Output follows `primary` order, then `secondary` order within a key.
pub fn join(primary: &[PlayerRecord], secondary: &[PlayerRecord]) -> Vec<MergedRecord> {
    let by_key = index_by_key(secondary);
    warn_duplicates(&by_key, "secondary");
    warn_duplicates(&index_by_key(primary), "primary");

    let mut merged = Vec::new();
    for record in primary {
        let Some(matches) = by_key.get(&join_key(&record.name)) else {
            debug!("no match for {}", record);
            continue;
        };
        for other in matches {
            merged.push(MergedRecord::new(record.clone(), (*other).clone()));
        }
    }
    merged
}

fn index_by_key(records: &[PlayerRecord]) -> HashMap<String, Vec<&PlayerRecord>> {
    let mut map: HashMap<String, Vec<&PlayerRecord>> = HashMap::new();
    for record in records {
        map.entry(join_key(&record.name)).or_default().push(record);
    }
    map
}

fn warn_duplicates(map: &HashMap<String, Vec<&PlayerRecord>>, side: &str) {
    for (key, group) in map {
        if group.len() > 1 {
            warn!(
                "{} source has {} players matching '{}'; every pairing will be kept",
                side,
                group.len(),
                key
            );
        }
    }
}
