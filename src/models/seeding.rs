//! Seeds, seeding maps and per-team pool results.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A competitive ranking slot within a container. Always a small positive
/// integer, distinct from a team id.
pub type Seed = u32;

/// Seed -> team mapping. Ordered so it serializes with seeds ascending.
pub type SeedingMap = BTreeMap<Seed, TeamId>;

/// Running record for one team inside a pool or position pool.
///
/// `rank` is a strict 1-based ordering over all teams in the container,
/// recomputed after every completed match in it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamResult {
    pub rank: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl TeamResult {
    /// Zeroed record with the given provisional rank.
    pub fn with_rank(rank: u32) -> Self {
        Self {
            rank,
            ..Self::default()
        }
    }

    /// Goal differential over all pool matches played so far.
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// Team -> result mapping for a pool or position pool.
pub type PoolResults = BTreeMap<TeamId, TeamResult>;

/// Everything wrong with a proposed pool seed set, collected in one pass so
/// the caller can render all problems at once.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolSeedingErrors {
    /// Seeds already claimed by another pool of the same tournament.
    pub repeated_seeds: Vec<Seed>,
    /// Seeds outside 1..=roster_size.
    pub invalid_seeds: Vec<Seed>,
}

impl PoolSeedingErrors {
    pub fn is_empty(&self) -> bool {
        self.repeated_seeds.is_empty() && self.invalid_seeds.is_empty()
    }
}

/// Everything wrong with a proposed tournament-wide seed -> team mapping.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedingUpdateErrors {
    /// Seeds in 1..=roster_size that the proposal does not cover.
    pub missing_seeds: Vec<Seed>,
    /// Proposed seeds outside 1..=roster_size.
    pub wrong_seeds: Vec<Seed>,
    /// Rostered teams absent from the proposal.
    pub missing_teams: Vec<TeamId>,
    /// Proposed teams not on the roster.
    pub wrong_teams: Vec<TeamId>,
    /// Teams occupying more than one seed.
    pub duplicate_teams: Vec<TeamId>,
}

impl SeedingUpdateErrors {
    pub fn is_empty(&self) -> bool {
        self.missing_seeds.is_empty()
            && self.wrong_seeds.is_empty()
            && self.missing_teams.is_empty()
            && self.wrong_teams.is_empty()
            && self.duplicate_teams.is_empty()
    }
}
