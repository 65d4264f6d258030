//! Match, match status, container membership, and per-match score records.

use crate::models::container::{BracketId, CrossPoolId, PoolId, PositionPoolId};
use crate::models::seeding::Seed;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of a match a submission refers to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSide {
    Team1,
    Team2,
}

/// Lifecycle of a match. Transitions only move forward:
/// draft -> scheduled (both teams resolved) -> completed (score confirmed).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Draft,
    Scheduled,
    Completed,
}

/// The single container a match belongs to. A match with no container is a
/// top-level tournament match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerRef {
    Pool(PoolId),
    CrossPool(CrossPoolId),
    Bracket(BracketId),
    PositionPool(PositionPoolId),
}

/// One side's suggested score for a match, awaiting confirmation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score_team_1: u32,
    pub score_team_2: u32,
}

/// Sportsmanship rating a team gives an opponent (or itself) for one match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpiritScore {
    pub rules: u32,
    pub fouls: u32,
    pub fair: u32,
    pub positive: u32,
    pub communication: u32,
    pub total: u32,
    pub comments: Option<String>,
}

impl SpiritScore {
    /// Build a score from the five category marks; `total` is their sum.
    pub fn new(rules: u32, fouls: u32, fair: u32, positive: u32, communication: u32) -> Self {
        Self {
            rules,
            fouls,
            fair,
            positive,
            communication,
            total: rules + fouls + fair + positive + communication,
            comments: None,
        }
    }
}

/// A single match between two placeholder seeds.
///
/// `team_1`/`team_2` stay `None` until the feeder container has determined
/// which team occupies each placeholder seed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub name: String,
    pub container: Option<ContainerRef>,
    /// Round number within the container (1 = earliest round).
    pub sequence_number: u32,
    pub placeholder_seed_1: Seed,
    pub placeholder_seed_2: Seed,
    pub team_1: Option<TeamId>,
    pub team_2: Option<TeamId>,
    pub score_team_1: u32,
    pub score_team_2: u32,
    pub status: MatchStatus,
    pub suggested_score_team_1: Option<MatchScore>,
    pub suggested_score_team_2: Option<MatchScore>,
    pub spirit_score_team_1: Option<SpiritScore>,
    pub spirit_score_team_2: Option<SpiritScore>,
    pub self_spirit_score_team_1: Option<SpiritScore>,
    pub self_spirit_score_team_2: Option<SpiritScore>,
}

impl GameMatch {
    /// Create a draft match with both team slots unresolved.
    pub fn new(
        name: impl Into<String>,
        container: Option<ContainerRef>,
        sequence_number: u32,
        placeholder_seed_1: Seed,
        placeholder_seed_2: Seed,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            container,
            sequence_number,
            placeholder_seed_1,
            placeholder_seed_2,
            team_1: None,
            team_2: None,
            score_team_1: 0,
            score_team_2: 0,
            status: MatchStatus::Draft,
            suggested_score_team_1: None,
            suggested_score_team_2: None,
            spirit_score_team_1: None,
            spirit_score_team_2: None,
            self_spirit_score_team_1: None,
            self_spirit_score_team_2: None,
        }
    }

    /// Whether this match references the given placeholder seed on either side.
    pub fn references_seed(&self, seed: Seed) -> bool {
        self.placeholder_seed_1 == seed || self.placeholder_seed_2 == seed
    }

    /// Whether both suggested scores are present and agree exactly.
    pub fn suggested_scores_equal(&self) -> bool {
        match (&self.suggested_score_team_1, &self.suggested_score_team_2) {
            (Some(s1), Some(s2)) => {
                s1.score_team_1 == s2.score_team_1 && s1.score_team_2 == s2.score_team_2
            }
            _ => false,
        }
    }
}
