// Roster filtering: kickers and team defenses are not ranked by every
// source, so they are removed before comparing.

use crate::player::Positioned;

/// Whether a position code belongs to an offensive skill player rather than
/// a kicker ("K") or team defense ("DST").
pub fn is_active_skill_position(position: &str) -> bool {
    !(position.starts_with("DST") || position.starts_with('K'))
}

/// Drop kickers and team defenses, keeping everything else in order.
pub fn filter_active_skill_positions<T: Positioned>(records: Vec<T>) -> Vec<T> {
    records
        .into_iter()
        .filter(|r| is_active_skill_position(r.position()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::MergedRecord;
    use crate::player::PlayerRecord;

    fn rec(name: &str, pos: &str) -> PlayerRecord {
        PlayerRecord::new(name, pos, "FA", Some(1))
    }

    #[test]
    fn drops_kickers_and_defenses() {
        let records = vec![rec("Ravens", "DST"), rec("Justin Tucker", "K"), rec("Jalen Hurts", "QB1")];
        let kept = filter_active_skill_positions(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].position, "QB1");
    }

    #[test]
    fn numbered_codes_are_matched_by_prefix() {
        let records = vec![rec("49ers", "DST3"), rec("Harrison Butker", "K2"), rec("Sam LaPorta", "TE4")];
        let kept = filter_active_skill_positions(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Sam LaPorta");
    }

    #[test]
    fn preserves_order_and_blank_positions() {
        let records = vec![
            rec("A", "WR1"),
            rec("B", "K1"),
            rec("C", ""),
            rec("D", "RB2"),
            rec("E", "DST1"),
            rec("F", "TE1"),
        ];
        let names: Vec<_> = filter_active_skill_positions(records)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "C", "D", "F"]);
    }

    #[test]
    fn works_on_merged_records() {
        let merged = vec![
            MergedRecord::new(rec("Jake Elliott", "K4"), rec("Jake Elliott", "K")),
            MergedRecord::new(rec("Nico Collins", "WR9"), rec("Nico Collins", "WR")),
        ];
        let kept = filter_active_skill_positions(merged);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].primary.name, "Nico Collins");
    }

    #[test]
    fn predicate() {
        assert!(is_active_skill_position("WR12"));
        assert!(is_active_skill_position("QB"));
        assert!(!is_active_skill_position("DST"));
        assert!(!is_active_skill_position("K"));
    }
}
