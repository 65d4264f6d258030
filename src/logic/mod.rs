//! Tournament business logic: seeding validation, fixture generation, result
//! resolution and propagation.

mod brackets;
mod pools;
mod propagate;
mod resolve;
mod scores;
mod seeding;
mod setup;
mod tiebreak;

pub use brackets::{create_bracket, create_cross_pool};
pub use pools::{create_pool, create_position_pool};
pub use propagate::populate_fixtures;
pub use resolve::update_match_score_and_results;
pub use scores::{
    staff_submit_match_score, submit_match_score, submit_spirit_score, update_spirit_rankings,
    ScoreOutcome,
};
pub use seeding::{validate_new_pool, validate_seeding_update};
pub use setup::start_tournament;
pub use tiebreak::sort_tied_teams;
