//! Ultimate frisbee tournament engine: rosters, seedings, pools, brackets,
//! fixture propagation and score confirmation.
//!
//! The crate is the pure engine: callers (a match-submission API, container
//! creation endpoints, a tournament-start action) hand it already-validated
//! ids and mutate one [`Tournament`] per unit of work.

pub mod logic;
pub mod models;

pub use logic::{
    create_bracket, create_cross_pool, create_pool, create_position_pool, populate_fixtures,
    sort_tied_teams, staff_submit_match_score, start_tournament, submit_match_score,
    submit_spirit_score, update_match_score_and_results, update_spirit_rankings,
    validate_new_pool, validate_seeding_update, ScoreOutcome,
};
pub use models::{
    Bracket, BracketId, ContainerRef, CrossPool, CrossPoolId, GameMatch, MatchId, MatchScore,
    MatchSide, MatchStatus, Pool, PoolId, PoolResults, PoolSeedingErrors, PositionPool,
    PositionPoolId, Seed, SeedingMap, SeedingUpdateErrors, SpiritRank, SpiritScore, Team,
    TeamId, TeamResult, Tournament, TournamentError, TournamentId, TournamentStatus,
};
