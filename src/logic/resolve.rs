//! Match result resolution: fold a confirmed score into the owning
//! container's standings and the tournament's current seeding, then let the
//! fixture propagator advance whatever the result unblocked.

use crate::logic::propagate::populate_fixtures;
use crate::logic::tiebreak::sort_tied_teams;
use crate::models::{
    BracketId, ContainerRef, CrossPoolId, GameMatch, MatchId, MatchStatus, PoolId, PoolResults,
    PositionPoolId, Seed, SeedingMap, TeamId, TeamResult, Tournament, TournamentError,
};
use std::collections::BTreeMap;

/// A completed match with both team references resolved.
#[derive(Clone, Copy, Debug)]
struct ResolvedResult {
    team_1: TeamId,
    team_2: TeamId,
    score_team_1: u32,
    score_team_2: u32,
    placeholder_seed_1: Seed,
    placeholder_seed_2: Seed,
}

/// Record a confirmed score on a match, update the owning container's
/// standings/seeding and the tournament's current seeding, force the match to
/// completed, and run the fixture propagator.
///
/// A match whose team slots are still unresolved only records score and
/// status; the standings update is skipped (upstream invariants make this
/// unreachable, so it is logged and tolerated rather than fatal).
pub fn update_match_score_and_results(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_team_1: u32,
    score_team_2: u32,
) -> Result<(), TournamentError> {
    let game = tournament
        .get_match(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let container = game.container;
    let resolved = match (game.team_1, game.team_2) {
        (Some(team_1), Some(team_2)) => Some(ResolvedResult {
            team_1,
            team_2,
            score_team_1,
            score_team_2,
            placeholder_seed_1: game.placeholder_seed_1,
            placeholder_seed_2: game.placeholder_seed_2,
        }),
        _ => {
            log::warn!("match {match_id} resolved with unassigned teams; standings not updated");
            None
        }
    };

    if let Some(resolved) = resolved {
        match container {
            Some(ContainerRef::Pool(pool_id)) => {
                update_for_pool(tournament, pool_id, &resolved)?;
            }
            Some(ContainerRef::PositionPool(position_pool_id)) => {
                update_for_position_pool(tournament, position_pool_id, &resolved)?;
            }
            Some(ContainerRef::CrossPool(cross_pool_id)) => {
                update_for_cross_pool(tournament, cross_pool_id, &resolved)?;
            }
            Some(ContainerRef::Bracket(bracket_id)) => {
                update_for_bracket(tournament, bracket_id, &resolved)?;
            }
            // Top-level tournament match: no standings to keep.
            None => {}
        }
    }

    let game = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    game.score_team_1 = score_team_1;
    game.score_team_2 = score_team_2;
    game.status = MatchStatus::Completed;

    populate_fixtures(tournament)
}

fn update_for_pool(
    tournament: &mut Tournament,
    pool_id: PoolId,
    resolved: &ResolvedResult,
) -> Result<(), TournamentError> {
    let pool_idx = tournament
        .pools
        .iter()
        .position(|p| p.id == pool_id)
        .ok_or(TournamentError::ContainerNotFound(ContainerRef::Pool(pool_id)))?;

    let pool_seeds = tournament.pools[pool_idx].seeds();
    let mut results = tournament.pools[pool_idx].results.clone();
    let mut seeding = tournament.current_seeding.clone();
    apply_pool_result(
        &tournament.matches,
        &mut results,
        &pool_seeds,
        &mut seeding,
        resolved,
    );
    tournament.pools[pool_idx].results = results;
    tournament.current_seeding = seeding;
    Ok(())
}

fn update_for_position_pool(
    tournament: &mut Tournament,
    position_pool_id: PositionPoolId,
    resolved: &ResolvedResult,
) -> Result<(), TournamentError> {
    let pool_idx = tournament
        .position_pools
        .iter()
        .position(|p| p.id == position_pool_id)
        .ok_or(TournamentError::ContainerNotFound(ContainerRef::PositionPool(
            position_pool_id,
        )))?;

    let Some(initial_seeding) = tournament.position_pools[pool_idx].initial_seeding.clone() else {
        log::warn!("position pool match completed before the pool was seeded; skipping standings");
        return Ok(());
    };
    let pool_seeds: Vec<Seed> = initial_seeding.keys().copied().collect();

    let mut results = tournament.position_pools[pool_idx].results.clone();
    let mut seeding = tournament.current_seeding.clone();
    apply_pool_result(
        &tournament.matches,
        &mut results,
        &pool_seeds,
        &mut seeding,
        resolved,
    );
    tournament.position_pools[pool_idx].results = results;
    tournament.current_seeding = seeding;
    Ok(())
}

/// Fold one result into a round-robin results table, then fully re-derive the
/// ranking: group by wins, order each tied group with the tie-break criteria,
/// assign 1-based ranks, and point the container's i-th smallest seed at the
/// rank-i team in the tournament seeding.
fn apply_pool_result(
    matches: &[GameMatch],
    results: &mut PoolResults,
    pool_seeds: &[Seed],
    tournament_seeding: &mut SeedingMap,
    resolved: &ResolvedResult,
) {
    if !results.contains_key(&resolved.team_1) || !results.contains_key(&resolved.team_2) {
        log::warn!("pool results table is missing a team from the completed match; skipping");
        return;
    }

    if let Some(result) = results.get_mut(&resolved.team_1) {
        result.goals_for += resolved.score_team_1;
        result.goals_against += resolved.score_team_2;
    }
    if let Some(result) = results.get_mut(&resolved.team_2) {
        result.goals_for += resolved.score_team_2;
        result.goals_against += resolved.score_team_1;
    }

    if resolved.score_team_1 > resolved.score_team_2 {
        if let Some(result) = results.get_mut(&resolved.team_1) {
            result.wins += 1;
        }
        if let Some(result) = results.get_mut(&resolved.team_2) {
            result.losses += 1;
        }
    } else if resolved.score_team_1 < resolved.score_team_2 {
        if let Some(result) = results.get_mut(&resolved.team_2) {
            result.wins += 1;
        }
        if let Some(result) = results.get_mut(&resolved.team_1) {
            result.losses += 1;
        }
    } else {
        if let Some(result) = results.get_mut(&resolved.team_1) {
            result.draws += 1;
        }
        if let Some(result) = results.get_mut(&resolved.team_2) {
            result.draws += 1;
        }
    }

    // Group by win count to find the ties, then rebuild the whole ranking.
    let mut wins_groups: BTreeMap<u32, Vec<(TeamId, TeamResult)>> = BTreeMap::new();
    for (team_id, result) in results.iter() {
        wins_groups
            .entry(result.wins)
            .or_default()
            .push((*team_id, *result));
    }

    let mut ranked: Vec<(TeamId, TeamResult)> = Vec::with_capacity(results.len());
    for (_, mut tied_teams) in wins_groups.into_iter().rev() {
        if tied_teams.len() > 1 {
            sort_tied_teams(matches, &mut tied_teams);
        }
        ranked.extend(tied_teams);
    }

    for (i, (team_id, _)) in ranked.iter().enumerate() {
        if let Some(result) = results.get_mut(team_id) {
            result.rank = i as u32 + 1;
        }
        if let Some(&seed) = pool_seeds.get(i) {
            tournament_seeding.insert(seed, *team_id);
        }
    }
}

fn update_for_cross_pool(
    tournament: &mut Tournament,
    cross_pool_id: CrossPoolId,
    resolved: &ResolvedResult,
) -> Result<(), TournamentError> {
    let cross_pool = tournament
        .cross_pool
        .as_mut()
        .filter(|cp| cp.id == cross_pool_id)
        .ok_or(TournamentError::ContainerNotFound(ContainerRef::CrossPool(
            cross_pool_id,
        )))?;

    if cross_pool.is_seeded() {
        apply_seeding_swap(&mut cross_pool.current_seeding, resolved);
    } else {
        log::warn!("cross pool match completed before the cross pool was seeded");
    }
    apply_seeding_swap(&mut tournament.current_seeding, resolved);
    Ok(())
}

fn update_for_bracket(
    tournament: &mut Tournament,
    bracket_id: BracketId,
    resolved: &ResolvedResult,
) -> Result<(), TournamentError> {
    let bracket = tournament
        .brackets
        .iter_mut()
        .find(|b| b.id == bracket_id)
        .ok_or(TournamentError::ContainerNotFound(ContainerRef::Bracket(
            bracket_id,
        )))?;

    if bracket.is_seeded() {
        apply_seeding_swap(&mut bracket.current_seeding, resolved);
    } else {
        log::warn!("bracket match completed before the bracket was seeded");
    }
    apply_seeding_swap(&mut tournament.current_seeding, resolved);
    Ok(())
}

/// The elimination seeding rule: the larger placeholder seed is the worse
/// slot, so when the team occupying it wins, the two teams swap seeds; when
/// the better seed wins the mapping is already consistent and stays put.
fn apply_seeding_swap(seeding: &mut SeedingMap, resolved: &ResolvedResult) {
    let ResolvedResult {
        team_1,
        team_2,
        score_team_1,
        score_team_2,
        placeholder_seed_1,
        placeholder_seed_2,
    } = *resolved;

    if placeholder_seed_2 > placeholder_seed_1 && score_team_2 > score_team_1 {
        seeding.insert(placeholder_seed_1, team_2);
        seeding.insert(placeholder_seed_2, team_1);
    } else if placeholder_seed_1 > placeholder_seed_2 && score_team_1 > score_team_2 {
        seeding.insert(placeholder_seed_2, team_1);
        seeding.insert(placeholder_seed_1, team_2);
    }
}
