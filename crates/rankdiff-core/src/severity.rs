// Delta classification: how strongly two sources disagree about a player.
//
// The same threshold shapes serve both ranks (lower is better) and auction
// values (higher is better); the direction only decides which side of the
// disagreement counts as good news.

use crate::player::SafeInt;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

const SEVERE_GAIN_RATIO: f64 = 0.20;
const SEVERE_GAIN_MIN_DELTA: i128 = 12;
const SEVERE_LOSS_RATIO: f64 = -0.12;
const SEVERE_LOSS_MIN_DELTA: i128 = -15;
const GAIN_RATIO: f64 = 0.15;
const GAIN_MIN_DELTA: i128 = 4;
const LOSS_RATIO: f64 = -0.15;
const LOSS_MIN_DELTA: i128 = -4;
/// Comparison values at or past this point are deep bench noise.
const DEPTH_CUTOFF: i128 = 200;
/// Comparison values at or below this point are too high up to flag a loss.
const TOP_TIER: i128 = 10;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Which way a metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ranks: a smaller number is a better player.
    LowerIsBetter,
    /// Auction values: a bigger number is a better player.
    HigherIsBetter,
}

/// Five-level verdict on a disagreement between two sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeverityTier {
    VeryGood,
    Good,
    Neutral,
    Bad,
    VeryBad,
}

impl SeverityTier {
    /// Mirror image of the tier: good becomes bad and vice versa.
    pub fn inverted(self) -> Self {
        match self {
            SeverityTier::VeryGood => SeverityTier::VeryBad,
            SeverityTier::Good => SeverityTier::Bad,
            SeverityTier::Neutral => SeverityTier::Neutral,
            SeverityTier::Bad => SeverityTier::Good,
            SeverityTier::VeryBad => SeverityTier::VeryGood,
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify the disagreement between `a` (the value being judged) and `b`
/// (the value it is compared against) for a player at `position`.
///
/// Both values go through [`SafeInt`], so missing or unparseable input
/// becomes `0`, and a `0` on either side is always `Neutral`.
///
/// With `rel = (b - a) / b` and `delta = b - a`, the shapes are checked in
/// order and the first match wins:
///
/// | shape        | condition                                          | lower is better | higher is better |
/// |--------------|----------------------------------------------------|-----------------|------------------|
/// | severe gain  | `rel > 0.20`, `b < 200`, `delta > 12`              | `VeryGood`      | `VeryBad`        |
/// | severe loss  | `rel < -0.12`, `10 < b < 200`, `delta < -15`       | `VeryBad`*      | `VeryGood`       |
/// | gain         | `rel > 0.15`, `a < 200`, `delta > 4`               | `Good`          | `Bad`            |
/// | loss         | `rel < -0.15`, `b > 10`, `delta < -4`              | `Bad`           | `Good`           |
///
/// \* Quarterbacks never reach the severe-loss tier for lower-is-better
/// metrics; they fall through to the remaining checks instead.
pub fn classify<A, B>(a: A, b: B, position: &str, direction: Direction) -> SeverityTier
where
    A: SafeInt,
    B: SafeInt,
{
    let a = i128::from(a.safe_int());
    let b = i128::from(b.safe_int());
    if a == 0 || b == 0 {
        return SeverityTier::Neutral;
    }

    // i128 keeps `b - a` exact for any pair of i64 inputs.
    let delta = b - a;
    let rel = delta as f64 / b as f64;
    let qb_exempt = direction == Direction::LowerIsBetter && position.starts_with("QB");

    let tier = if rel > SEVERE_GAIN_RATIO && b < DEPTH_CUTOFF && delta > SEVERE_GAIN_MIN_DELTA {
        SeverityTier::VeryGood
    } else if rel < SEVERE_LOSS_RATIO
        && TOP_TIER < b
        && b < DEPTH_CUTOFF
        && delta < SEVERE_LOSS_MIN_DELTA
        && !qb_exempt
    {
        SeverityTier::VeryBad
    } else if rel > GAIN_RATIO && a < DEPTH_CUTOFF && delta > GAIN_MIN_DELTA {
        SeverityTier::Good
    } else if rel < LOSS_RATIO && b > TOP_TIER && delta < LOSS_MIN_DELTA {
        SeverityTier::Bad
    } else {
        SeverityTier::Neutral
    };

    match direction {
        Direction::LowerIsBetter => tier,
        Direction::HigherIsBetter => tier.inverted(),
    }
}
