// Comparison table assembly.
//
// Pipeline for one report:
// 1. Join primary and secondary sources on normalized name
// 2. Derive the secondary source's implied auction value (when priced)
// 3. Drop kickers and team defenses
// 4. Sort by primary rank, unranked rows last

use crate::filter::filter_active_skill_positions;
use crate::join::{join, MergedRecord};
use crate::names::normalize;
use crate::player::{PlayerRecord, Positioned};
use crate::severity::{classify, Direction, SeverityTier};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// ComparisonRow
// ---------------------------------------------------------------------------

/// Auction prices attached to a row when the primary source has them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuctionPair {
    /// What the primary source would pay for this player.
    pub primary: Option<f64>,
    /// What the primary source would pay for the slot the secondary source
    /// ranks this player at. `0.0` when no merged player holds that slot.
    pub implied: f64,
}

/// One line of the comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub position: String,
    pub primary_rank: Option<u32>,
    pub secondary_rank: Option<u32>,
    /// Suffix-stripped display name.
    pub player: String,
    /// Team, with bye week in parentheses when the source provides one.
    pub team: String,
    pub diff: Option<i64>,
    pub auction: Option<AuctionPair>,
}

impl ComparisonRow {
    /// How the secondary source's rank compares to the primary's.
    pub fn rank_tier(&self) -> SeverityTier {
        classify(
            self.secondary_rank,
            self.primary_rank,
            &self.position,
            Direction::LowerIsBetter,
        )
    }

    /// How the implied auction value compares to the primary source's price.
    pub fn value_tier(&self) -> Option<SeverityTier> {
        self.auction.map(|pair| {
            classify(
                pair.implied,
                pair.primary,
                &self.position,
                Direction::HigherIsBetter,
            )
        })
    }
}

impl Positioned for ComparisonRow {
    fn position(&self) -> &str {
        &self.position
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Build the comparison table for `primary` against `secondary`.
///
/// Rows carry auction prices when any merged player has a primary-source
/// auction value.
pub fn build_comparison(primary: &[PlayerRecord], secondary: &[PlayerRecord]) -> Vec<ComparisonRow> {
    let merged = join(primary, secondary);
    let priced = merged.iter().any(|m| m.primary.auction_value.is_some());

    // Slot prices come from the full merged set, before any filtering, so a
    // kicker's slot still has a price.
    let slot_prices = if priced { prices_by_primary_rank(&merged) } else { HashMap::new() };

    let mut rows: Vec<ComparisonRow> = filter_active_skill_positions(merged)
        .into_iter()
        .map(|m| {
            let auction = priced.then(|| AuctionPair {
                primary: m.primary.auction_value,
                implied: m
                    .secondary
                    .rank
                    .and_then(|rank| slot_prices.get(&rank).copied())
                    .unwrap_or(0.0),
            });
            to_row(&m, auction)
        })
        .collect();

    sort_by_primary_rank(&mut rows);
    rows
}

/// Primary rank → primary auction value. A rank held by two merged rows
/// keeps the later row's price.
fn prices_by_primary_rank(merged: &[MergedRecord]) -> HashMap<u32, f64> {
    let mut prices = HashMap::new();
    for m in merged {
        if let Some(rank) = m.primary.rank {
            prices.insert(rank, m.primary.auction_value.unwrap_or(0.0));
        }
    }
    prices
}

fn to_row(m: &MergedRecord, auction: Option<AuctionPair>) -> ComparisonRow {
    let team = if m.primary.team.is_empty() {
        m.secondary.team_display()
    } else {
        m.primary.team_display()
    };
    ComparisonRow {
        position: m.position().to_string(),
        primary_rank: m.primary.rank,
        secondary_rank: m.secondary.rank,
        player: normalize(&m.primary.name),
        team,
        diff: m.diff,
        auction,
    }
}

/// Stable sort by primary rank with unranked rows at the end.
pub fn sort_by_primary_rank(rows: &mut [ComparisonRow]) {
    rows.sort_by_key(|r| (r.primary_rank.is_none(), r.primary_rank));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, pos: &str, team: &str, rank: u32) -> PlayerRecord {
        PlayerRecord::new(name, pos, team, Some(rank))
    }

    #[test]
    fn rows_sorted_by_primary_rank_with_diff() {
        let primary = vec![
            rec("Garrett Wilson", "WR8", "NYJ", 20),
            rec("Bijan Robinson", "RB1", "ATL", 2),
            rec("Drake London", "WR10", "ATL", 25),
        ];
        let secondary = vec![
            rec("Bijan Robinson", "RB", "ATL", 3),
            rec("Drake London", "WR", "ATL", 18),
            rec("Garrett Wilson", "WR", "NYJ", 24),
        ];

        let rows = build_comparison(&primary, &secondary);
        let ranks: Vec<_> = rows.iter().map(|r| r.primary_rank).collect();
        assert_eq!(ranks, vec![Some(2), Some(20), Some(25)]);
        assert_eq!(rows[0].diff, Some(-1));
        assert_eq!(rows[1].diff, Some(-4));
        assert_eq!(rows[2].diff, Some(7));
        assert!(rows.iter().all(|r| r.auction.is_none()));
    }

    #[test]
    fn display_name_is_suffix_stripped_but_cased() {
        let primary = vec![rec("Marvin Harrison Jr.", "WR5", "ARI", 12)];
        let secondary = vec![rec("marvin harrison", "WR", "ARI", 15)];
        let rows = build_comparison(&primary, &secondary);
        assert_eq!(rows[0].player, "Marvin Harrison");
    }

    #[test]
    fn kickers_and_defenses_removed() {
        let primary = vec![
            rec("Brandon Aubrey", "K1", "DAL", 150),
            rec("Ravens", "DST1", "BAL", 160),
            rec("Kyren Williams", "RB6", "LAR", 14),
        ];
        let secondary = vec![
            rec("Brandon Aubrey", "K", "DAL", 180),
            rec("Ravens", "DST", "BAL", 190),
            rec("Kyren Williams", "RB", "LAR", 16),
        ];
        let rows = build_comparison(&primary, &secondary);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player, "Kyren Williams");
    }

    #[test]
    fn unranked_rows_sort_last_stably() {
        let mut rows = vec![
            ComparisonRow {
                position: "WR".into(),
                primary_rank: None,
                secondary_rank: Some(1),
                player: "First Unranked".into(),
                team: String::new(),
                diff: None,
                auction: None,
            },
            ComparisonRow {
                position: "WR".into(),
                primary_rank: Some(5),
                secondary_rank: Some(2),
                player: "Ranked".into(),
                team: String::new(),
                diff: Some(3),
                auction: None,
            },
            ComparisonRow {
                position: "WR".into(),
                primary_rank: None,
                secondary_rank: Some(3),
                player: "Second Unranked".into(),
                team: String::new(),
                diff: None,
                auction: None,
            },
        ];
        sort_by_primary_rank(&mut rows);
        let names: Vec<_> = rows.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(names, vec!["Ranked", "First Unranked", "Second Unranked"]);
    }

    #[test]
    fn team_uses_bye_and_falls_back_to_secondary() {
        let primary = vec![rec("Sam LaPorta", "TE2", "DET", 30).with_bye_week("5")];
        let secondary = vec![rec("Sam LaPorta", "TE", "DET", 28)];
        let rows = build_comparison(&primary, &secondary);
        assert_eq!(rows[0].team, "DET (5)");

        let primary = vec![PlayerRecord::new("Sam LaPorta", "", "", Some(30))];
        let rows = build_comparison(&primary, &secondary);
        assert_eq!(rows[0].team, "DET");
        assert_eq!(rows[0].position, "TE");
    }

    #[test]
    fn implied_value_looks_up_primary_price_at_secondary_rank() {
        let primary = vec![
            rec("Ja'Marr Chase", "", "", 1).with_auction_value(60.0),
            rec("Justin Jefferson", "", "", 2).with_auction_value(55.0),
            rec("Saquon Barkley", "", "", 3).with_auction_value(50.0),
            rec("Jalen Hurts", "", "", 4).with_auction_value(30.0),
        ];
        let secondary = vec![
            rec("Ja'Marr Chase", "WR", "CIN", 2),
            rec("Justin Jefferson", "WR", "MIN", 1),
            rec("Saquon Barkley", "RB", "PHI", 9),
            rec("Jalen Hurts", "QB", "PHI", 3),
        ];

        let rows = build_comparison(&primary, &secondary);
        let chase = &rows[0];
        assert_eq!(
            chase.auction,
            Some(AuctionPair {
                primary: Some(60.0),
                implied: 55.0
            })
        );
        let jefferson = &rows[1];
        assert_eq!(jefferson.auction.unwrap().implied, 60.0);
        // Nobody merged holds primary rank 9.
        let barkley = &rows[2];
        assert_eq!(barkley.auction.unwrap().implied, 0.0);
        let hurts = &rows[3];
        assert_eq!(hurts.auction.unwrap().implied, 50.0);
        assert_eq!(hurts.position, "QB");
    }

    #[test]
    fn rank_tier_compares_secondary_against_primary() {
        let primary = vec![rec("Rome Odunze", "WR30", "CHI", 100)];
        let secondary = vec![rec("Rome Odunze", "WR", "CHI", 78)];
        let rows = build_comparison(&primary, &secondary);
        assert_eq!(rows[0].rank_tier(), SeverityTier::VeryGood);
        assert_eq!(rows[0].value_tier(), None);
    }

    #[test]
    fn value_tier_favors_players_priced_below_their_slot() {
        let mut row = ComparisonRow {
            position: "QB".into(),
            primary_rank: Some(10),
            secondary_rank: Some(20),
            player: "Anyone".into(),
            team: String::new(),
            diff: Some(-10),
            auction: Some(AuctionPair {
                primary: Some(100.0),
                implied: 120.0,
            }),
        };
        assert_eq!(row.value_tier(), Some(SeverityTier::VeryGood));

        row.auction = Some(AuctionPair {
            primary: Some(100.0),
            implied: 78.0,
        });
        assert_eq!(row.value_tier(), Some(SeverityTier::VeryBad));

        row.auction = Some(AuctionPair {
            primary: None,
            implied: 78.0,
        });
        assert_eq!(row.value_tier(), Some(SeverityTier::Neutral));
    }

    #[test]
    fn end_to_end_five_player_rosters() {
        let primary = vec![
            rec("Josh Allen", "QB1", "BUF", 1),
            rec("Breece Hall", "RB1", "NYJ", 2),
            rec("Odell Beckham Jr.", "WR1", "MIA", 3),
            rec("Travis Kelce", "TE1", "KC", 4),
            rec("Only Primary", "WR2", "FA", 5),
        ];
        let secondary = vec![
            rec("JOSH ALLEN", "QB", "BUF", 2),
            rec("Breece Hall", "RB", "NYJ", 1),
            rec("odell beckham", "WR", "MIA", 5),
            rec("Travis Kelce", "TE", "KC", 3),
            rec("Only Secondary", "WR", "FA", 4),
        ];

        let rows = build_comparison(&primary, &secondary);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.player != "Only Primary"));
        assert!(rows.iter().all(|r| r.player != "Only Secondary"));
        assert!(rows.iter().any(|r| r.player == "Odell Beckham"));
    }
}
