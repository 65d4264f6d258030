//! Data structures for the tournament engine: teams, seedings, containers,
//! matches and the tournament itself.

mod container;
mod game;
mod seeding;
mod team;
mod tournament;

pub use container::{
    Bracket, BracketId, CrossPool, CrossPoolId, Pool, PoolId, PositionPool, PositionPoolId,
};
pub use game::{
    ContainerRef, GameMatch, MatchId, MatchScore, MatchSide, MatchStatus, SpiritScore,
};
pub use seeding::{
    PoolResults, PoolSeedingErrors, Seed, SeedingMap, SeedingUpdateErrors, TeamResult,
};
pub use team::{Team, TeamId};
pub use tournament::{SpiritRank, Tournament, TournamentError, TournamentId, TournamentStatus};
