//! Tournament start: bootstrap round-1 pool matches from the initial seeding
//! and go live.

use crate::models::{
    ContainerRef, MatchStatus, Tournament, TournamentError, TournamentStatus,
};

/// Start the tournament: assign both teams of every pool match straight from
/// `initial_seeding`, mark those matches scheduled, and flip the tournament
/// to live. Valid before the tournament is live only.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    use TournamentStatus::*;
    if !matches!(tournament.status, RegistrationOpen | RegistrationClosed) {
        return Err(TournamentError::InvalidStatus);
    }

    let initial_seeding = tournament.initial_seeding.clone();
    for game in &mut tournament.matches {
        if !matches!(game.container, Some(ContainerRef::Pool(_))) {
            continue;
        }
        let team_1 = *initial_seeding
            .get(&game.placeholder_seed_1)
            .ok_or(TournamentError::SeedUnassigned(game.placeholder_seed_1))?;
        let team_2 = *initial_seeding
            .get(&game.placeholder_seed_2)
            .ok_or(TournamentError::SeedUnassigned(game.placeholder_seed_2))?;
        game.team_1 = Some(team_1);
        game.team_2 = Some(team_2);
        game.status = MatchStatus::Scheduled;
    }

    tournament.status = TournamentStatus::Live;
    Ok(())
}
