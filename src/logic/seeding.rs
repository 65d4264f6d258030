//! Seeding validation: proposed pool seed sets and tournament-wide seeding
//! updates are checked against the roster before anything is created.

use crate::models::{
    PoolSeedingErrors, Seed, SeedingMap, SeedingUpdateErrors, TeamId, Tournament, TournamentError,
};
use std::collections::BTreeSet;

/// Check a proposed seed set for a new pool.
///
/// Collects every offending seed before failing, so the caller can render all
/// problems at once: seeds already claimed by another pool of this tournament,
/// and seeds outside 1..=roster_size.
pub fn validate_new_pool(tournament: &Tournament, seeds: &[Seed]) -> Result<(), TournamentError> {
    let mut already_present: BTreeSet<Seed> = BTreeSet::new();
    for pool in &tournament.pools {
        already_present.extend(pool.initial_seeding.keys().copied());
    }

    let roster_size = tournament.teams.len() as Seed;
    let errors = PoolSeedingErrors {
        repeated_seeds: seeds
            .iter()
            .copied()
            .filter(|seed| already_present.contains(seed))
            .collect(),
        invalid_seeds: seeds
            .iter()
            .copied()
            .filter(|&seed| !(1..=roster_size).contains(&seed))
            .collect(),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TournamentError::PoolSeedingInvalid(errors))
    }
}

/// Check a staff-proposed tournament seeding against the roster.
///
/// The proposal must cover exactly the seeds 1..=roster_size and map them onto
/// exactly the rostered teams, one seed per team. All violation categories are
/// reported together.
pub fn validate_seeding_update(
    tournament: &Tournament,
    seeding: &SeedingMap,
) -> Result<(), TournamentError> {
    let expected_seeds: BTreeSet<Seed> = (1..=tournament.teams.len() as Seed).collect();
    let incoming_seeds: BTreeSet<Seed> = seeding.keys().copied().collect();

    let roster_ids: BTreeSet<TeamId> = tournament.teams.iter().map(|t| t.id).collect();
    let incoming_teams: Vec<TeamId> = seeding.values().copied().collect();
    let incoming_team_set: BTreeSet<TeamId> = incoming_teams.iter().copied().collect();

    let errors = SeedingUpdateErrors {
        missing_seeds: expected_seeds.difference(&incoming_seeds).copied().collect(),
        wrong_seeds: incoming_seeds.difference(&expected_seeds).copied().collect(),
        missing_teams: roster_ids.difference(&incoming_team_set).copied().collect(),
        wrong_teams: incoming_team_set.difference(&roster_ids).copied().collect(),
        duplicate_teams: incoming_team_set
            .iter()
            .copied()
            .filter(|team| incoming_teams.iter().filter(|t| *t == team).count() > 1)
            .collect(),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TournamentError::SeedingUpdateInvalid(errors))
    }
}
