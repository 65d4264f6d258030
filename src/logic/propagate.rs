//! Fixture propagation: after every confirmed result, scan the tournament's
//! containers for completion, push resolved teams into every match waiting on
//! a seed, upgrade match status, and close the tournament when nothing is
//! left to play.
//!
//! The pass is idempotent: every mutation is guarded by an emptiness or
//! status check, so re-running it with no new results changes nothing.

use crate::models::{
    ContainerRef, GameMatch, MatchStatus, PoolResults, PositionPool, Seed, SeedingMap, TeamId,
    TeamResult, Tournament, TournamentError, TournamentStatus,
};

/// Advance the tournament's fixtures as far as current results allow.
///
/// Precedence: completed pools feed downstream matches; once all pools are
/// done the cross pool (or, without one, the brackets and position pools) is
/// seeded from the tournament's current seeding; completed cross-pool matches
/// feed later rounds; brackets whose cross-pool feeders are done get seeded
/// and their first round scheduled; completed bracket matches feed the next
/// bracket round; and a tournament with no unfinished matches is completed.
pub fn populate_fixtures(tournament: &mut Tournament) -> Result<(), TournamentError> {
    let seeding = tournament.current_seeding.clone();

    let all_pools_complete = propagate_completed_pools(tournament, &seeding)?;

    if all_pools_complete {
        if let Some(cross_pool) = tournament.cross_pool.as_mut() {
            if !cross_pool.is_seeded() {
                log::debug!("all pools complete; seeding cross pool");
                cross_pool.seed_from(seeding.clone());
            }
        } else {
            seed_brackets_and_position_pools(tournament, &seeding)?;
        }
    }

    if tournament.cross_pool.is_some() {
        propagate_cross_pool(tournament, &seeding)?;
        schedule_brackets_after_cross_pool(tournament, &seeding)?;
        schedule_position_pools_after_cross_pool(tournament, &seeding, all_pools_complete)?;
    }

    propagate_brackets(tournament, &seeding)?;

    if tournament.matches.iter().all(|m| m.status == MatchStatus::Completed)
        && tournament.status != TournamentStatus::Completed
    {
        log::debug!("no unfinished matches left; tournament completed");
        tournament.status = TournamentStatus::Completed;
    }

    Ok(())
}

/// Step 1: for every fully-completed pool, push each of its seeds' teams into
/// the downstream matches still waiting on that seed. Returns whether every
/// pool is complete.
fn propagate_completed_pools(
    tournament: &mut Tournament,
    seeding: &SeedingMap,
) -> Result<bool, TournamentError> {
    let mut all_pools_complete = true;
    let pool_seed_sets: Vec<(ContainerRef, Vec<Seed>)> = tournament
        .pools
        .iter()
        .map(|p| (ContainerRef::Pool(p.id), p.seeds()))
        .collect();

    for (pool_ref, pool_seeds) in pool_seed_sets {
        let pool_complete = tournament
            .matches
            .iter()
            .filter(|m| m.container == Some(pool_ref))
            .all(|m| m.status == MatchStatus::Completed);
        if !pool_complete {
            all_pools_complete = false;
            continue;
        }

        for seed in pool_seeds {
            let team_id = resolve_seed(seeding, seed)?;
            for idx in downstream_of_pool_seed(tournament, seed) {
                fill_slot(&mut tournament.matches[idx], seed, team_id);
            }
        }
    }

    Ok(all_pools_complete)
}

/// Matches a completed pool feeds for one seed: round-1 cross-pool matches,
/// falling back to round-2 cross-pool matches, falling back to round-1
/// bracket/position-pool matches.
fn downstream_of_pool_seed(tournament: &Tournament, seed: Seed) -> Vec<usize> {
    let cross_pool_targets = |round: u32| -> Vec<usize> {
        tournament
            .matches
            .iter()
            .enumerate()
            .filter(|(_, m)| {
                is_cross_pool_match(m) && m.sequence_number == round && m.references_seed(seed)
            })
            .map(|(idx, _)| idx)
            .collect()
    };

    let targets = cross_pool_targets(1);
    if !targets.is_empty() {
        return targets;
    }
    let targets = cross_pool_targets(2);
    if !targets.is_empty() {
        return targets;
    }
    tournament
        .matches
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            is_knockout_match(m) && m.sequence_number == 1 && m.references_seed(seed)
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Step 2 (no cross pool): seed every un-seeded bracket and position pool
/// straight from the tournament's current seeding.
fn seed_brackets_and_position_pools(
    tournament: &mut Tournament,
    seeding: &SeedingMap,
) -> Result<(), TournamentError> {
    for bracket in &mut tournament.brackets {
        if bracket.is_seeded() {
            continue;
        }
        let mut snapshot = SeedingMap::new();
        for seed in bracket.seeds() {
            snapshot.insert(seed, resolve_seed(seeding, seed)?);
        }
        log::debug!("seeding bracket {}", bracket.name);
        bracket.seed_from(snapshot);
    }

    for position_pool in &mut tournament.position_pools {
        if !position_pool.is_seeded() {
            seed_position_pool(position_pool, seeding)?;
        }
    }
    Ok(())
}

/// Snapshot a position pool's seed -> team mapping and zero-initialise its
/// results with provisional ranks in ascending seed order.
fn seed_position_pool(
    position_pool: &mut PositionPool,
    seeding: &SeedingMap,
) -> Result<(), TournamentError> {
    let mut snapshot = SeedingMap::new();
    let mut results = PoolResults::new();
    for (i, &seed) in position_pool.seeds.iter().enumerate() {
        let team_id = resolve_seed(seeding, seed)?;
        snapshot.insert(seed, team_id);
        results.insert(team_id, TeamResult::with_rank(i as u32 + 1));
    }
    log::debug!("seeding position pool {}", position_pool.name);
    position_pool.results = results;
    position_pool.initial_seeding = Some(snapshot);
    Ok(())
}

/// Step 3: carry each completed cross-pool match's placeholder seeds into the
/// next cross-pool round, or into round-1 bracket/position-pool matches when
/// no later cross-pool round references the seed.
fn propagate_cross_pool(
    tournament: &mut Tournament,
    seeding: &SeedingMap,
) -> Result<(), TournamentError> {
    let completed: Vec<(u32, Seed, Seed)> = tournament
        .matches
        .iter()
        .filter(|m| is_cross_pool_match(m) && m.status == MatchStatus::Completed)
        .map(|m| (m.sequence_number, m.placeholder_seed_1, m.placeholder_seed_2))
        .collect();

    for (sequence_number, seed_1, seed_2) in completed {
        for seed in [seed_1, seed_2] {
            let team_id = resolve_seed(seeding, seed)?;
            for idx in downstream_of_cross_pool_seed(tournament, sequence_number, seed) {
                fill_slot(&mut tournament.matches[idx], seed, team_id);
            }
        }
    }
    Ok(())
}

/// Matches a completed cross-pool match feeds for one seed: the next
/// cross-pool round, else round-1 bracket/position-pool matches.
fn downstream_of_cross_pool_seed(
    tournament: &Tournament,
    sequence_number: u32,
    seed: Seed,
) -> Vec<usize> {
    let targets: Vec<usize> = tournament
        .matches
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            is_cross_pool_match(m)
                && m.sequence_number == sequence_number + 1
                && m.references_seed(seed)
        })
        .map(|(idx, _)| idx)
        .collect();
    if !targets.is_empty() {
        return targets;
    }
    tournament
        .matches
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            is_knockout_match(m) && m.sequence_number == 1 && m.references_seed(seed)
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Step 4: once no unfinished cross-pool match references any of a bracket's
/// seeds, seed the bracket (if still unset) and schedule its first round from
/// the tournament's current seeding.
fn schedule_brackets_after_cross_pool(
    tournament: &mut Tournament,
    seeding: &SeedingMap,
) -> Result<(), TournamentError> {
    let bracket_ids: Vec<_> = tournament.brackets.iter().map(|b| b.id).collect();

    for bracket_id in bracket_ids {
        let Some(bracket) = tournament.brackets.iter().find(|b| b.id == bracket_id) else {
            continue;
        };
        let feeders_complete = bracket
            .seeds()
            .all(|seed| !has_unfinished_cross_pool_match(tournament, seed));
        if !feeders_complete {
            continue;
        }

        let seeds: Vec<Seed> = bracket.seeds().collect();
        let bracket = tournament
            .brackets
            .iter_mut()
            .find(|b| b.id == bracket_id)
            .ok_or(TournamentError::ContainerNotFound(ContainerRef::Bracket(bracket_id)))?;
        if !bracket.is_seeded() {
            let mut snapshot = SeedingMap::new();
            for seed in seeds {
                snapshot.insert(seed, resolve_seed(seeding, seed)?);
            }
            log::debug!("seeding bracket {}", bracket.name);
            bracket.seed_from(snapshot);
        }

        schedule_draft_matches(
            tournament,
            ContainerRef::Bracket(bracket_id),
            seeding,
            Some(1),
        )?;
    }
    Ok(())
}

/// Step 4 for position pools: additionally gated on every pool being done.
fn schedule_position_pools_after_cross_pool(
    tournament: &mut Tournament,
    seeding: &SeedingMap,
    all_pools_complete: bool,
) -> Result<(), TournamentError> {
    let position_pool_ids: Vec<_> = tournament.position_pools.iter().map(|p| p.id).collect();

    for position_pool_id in position_pool_ids {
        let Some(position_pool) = tournament
            .position_pools
            .iter()
            .find(|p| p.id == position_pool_id)
        else {
            continue;
        };
        let feeders_complete = position_pool
            .seeds
            .iter()
            .all(|&seed| !has_unfinished_cross_pool_match(tournament, seed));
        if !feeders_complete || !all_pools_complete {
            continue;
        }

        let position_pool = tournament
            .position_pools
            .iter_mut()
            .find(|p| p.id == position_pool_id)
            .ok_or(TournamentError::ContainerNotFound(ContainerRef::PositionPool(
                position_pool_id,
            )))?;
        if !position_pool.is_seeded() {
            seed_position_pool(position_pool, seeding)?;
        }

        schedule_draft_matches(
            tournament,
            ContainerRef::PositionPool(position_pool_id),
            seeding,
            None,
        )?;
    }
    Ok(())
}

/// Fill both slots of a container's draft matches from the seeding and mark
/// them scheduled. `round` restricts to one sequence number (brackets fill
/// round 1 only; position pools fill all their matches).
fn schedule_draft_matches(
    tournament: &mut Tournament,
    container: ContainerRef,
    seeding: &SeedingMap,
    round: Option<u32>,
) -> Result<(), TournamentError> {
    let target_idxs: Vec<usize> = tournament
        .matches
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            m.container == Some(container)
                && m.status == MatchStatus::Draft
                && round.map_or(true, |r| m.sequence_number == r)
        })
        .map(|(idx, _)| idx)
        .collect();

    for idx in target_idxs {
        let (seed_1, seed_2) = {
            let m = &tournament.matches[idx];
            (m.placeholder_seed_1, m.placeholder_seed_2)
        };
        let team_1 = resolve_seed(seeding, seed_1)?;
        let team_2 = resolve_seed(seeding, seed_2)?;
        let game = &mut tournament.matches[idx];
        if game.team_1.is_none() {
            game.team_1 = Some(team_1);
        }
        if game.team_2.is_none() {
            game.team_2 = Some(team_2);
        }
        game.status = MatchStatus::Scheduled;
    }
    Ok(())
}

/// Step 5: carry completed bracket matches into the next round of the same
/// bracket, filling whichever side shares a placeholder seed and is still
/// empty.
fn propagate_brackets(
    tournament: &mut Tournament,
    seeding: &SeedingMap,
) -> Result<(), TournamentError> {
    let bracket_refs: Vec<ContainerRef> = tournament
        .brackets
        .iter()
        .map(|b| ContainerRef::Bracket(b.id))
        .collect();

    for bracket_ref in bracket_refs {
        let completed: Vec<(u32, Seed, Seed)> = tournament
            .matches
            .iter()
            .filter(|m| m.container == Some(bracket_ref) && m.status == MatchStatus::Completed)
            .map(|m| (m.sequence_number, m.placeholder_seed_1, m.placeholder_seed_2))
            .collect();

        for (sequence_number, seed_1, seed_2) in completed {
            let target_idxs: Vec<usize> = tournament
                .matches
                .iter()
                .enumerate()
                .filter(|(_, m)| {
                    m.container == Some(bracket_ref)
                        && m.sequence_number == sequence_number + 1
                        && (m.references_seed(seed_1) || m.references_seed(seed_2))
                })
                .map(|(idx, _)| idx)
                .collect();

            for idx in target_idxs {
                for seed in [seed_1, seed_2] {
                    if tournament.matches[idx].references_seed(seed) {
                        let team_id = resolve_seed(seeding, seed)?;
                        fill_slot(&mut tournament.matches[idx], seed, team_id);
                    }
                }
            }
        }
    }
    Ok(())
}

/// Whether any non-completed cross-pool match still references this seed.
fn has_unfinished_cross_pool_match(tournament: &Tournament, seed: Seed) -> bool {
    tournament.matches.iter().any(|m| {
        is_cross_pool_match(m) && m.status != MatchStatus::Completed && m.references_seed(seed)
    })
}

fn is_cross_pool_match(game: &GameMatch) -> bool {
    matches!(game.container, Some(ContainerRef::CrossPool(_)))
}

fn is_knockout_match(game: &GameMatch) -> bool {
    matches!(
        game.container,
        Some(ContainerRef::Bracket(_) | ContainerRef::PositionPool(_))
    )
}

fn resolve_seed(seeding: &SeedingMap, seed: Seed) -> Result<TeamId, TournamentError> {
    seeding
        .get(&seed)
        .copied()
        .ok_or(TournamentError::SeedUnassigned(seed))
}

/// Put a resolved team into the side of the match waiting on this seed, then
/// upgrade a fully-resolved draft match to scheduled.
fn fill_slot(game: &mut GameMatch, seed: Seed, team_id: TeamId) {
    if game.placeholder_seed_1 == seed && game.team_1.is_none() {
        game.team_1 = Some(team_id);
    } else if game.placeholder_seed_2 == seed && game.team_2.is_none() {
        game.team_2 = Some(team_id);
    }
    if game.status == MatchStatus::Draft && game.team_1.is_some() && game.team_2.is_some() {
        game.status = MatchStatus::Scheduled;
    }
}
