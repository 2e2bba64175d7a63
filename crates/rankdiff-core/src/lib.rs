// Ranking reconciliation core: load ranking sources, join them on normalized
// player names, and classify how much two sources disagree on each player.

pub mod compare;
pub mod filter;
pub mod join;
pub mod names;
pub mod player;
pub mod severity;
pub mod sources;
