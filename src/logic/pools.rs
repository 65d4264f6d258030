//! Pool and position-pool creation: seeding resolution and round-robin
//! match generation.

use crate::logic::seeding::validate_new_pool;
use crate::models::{
    ContainerRef, GameMatch, Pool, PoolId, PoolResults, PositionPool, PositionPoolId, Seed,
    SeedingMap, TeamResult, Tournament, TournamentError,
};
use uuid::Uuid;

/// Create a pool from the given seeds and generate its round robin.
///
/// Each seed is resolved to its team through the tournament's initial seeding;
/// results start zeroed with provisional ranks following ascending seed order.
/// All matches are created in draft with placeholder seeds only.
pub fn create_pool(
    tournament: &mut Tournament,
    name: &str,
    sequence_number: u32,
    seeds: &[Seed],
) -> Result<PoolId, TournamentError> {
    if tournament.pools.iter().any(|p| p.name == name) {
        return Err(TournamentError::DuplicateContainerName(name.to_string()));
    }
    validate_new_pool(tournament, seeds)?;

    let mut sorted_seeds: Vec<Seed> = seeds.to_vec();
    sorted_seeds.sort_unstable();
    sorted_seeds.dedup();

    let mut initial_seeding = SeedingMap::new();
    let mut results = PoolResults::new();
    for (i, &seed) in sorted_seeds.iter().enumerate() {
        let team_id = *tournament
            .initial_seeding
            .get(&seed)
            .ok_or(TournamentError::SeedUnassigned(seed))?;
        initial_seeding.insert(seed, team_id);
        results.insert(team_id, TeamResult::with_rank(i as u32 + 1));
    }

    let pool = Pool {
        id: Uuid::new_v4(),
        name: name.to_string(),
        sequence_number,
        initial_seeding,
        results,
    };
    let pool_id = pool.id;

    let matches = round_robin_matches(name, ContainerRef::Pool(pool_id), &sorted_seeds);
    log::debug!(
        "created pool {name} with {} seeds and {} matches",
        sorted_seeds.len(),
        matches.len()
    );

    tournament.pools.push(pool);
    tournament.matches.extend(matches);
    Ok(pool_id)
}

/// Create a position pool and generate its round robin.
///
/// Unlike a pool, the seed -> team mapping is deferred: the fixture propagator
/// snapshots it from the tournament's current seeding once every feeder
/// container has completed.
pub fn create_position_pool(
    tournament: &mut Tournament,
    name: &str,
    sequence_number: u32,
    seeds: &[Seed],
) -> Result<PositionPoolId, TournamentError> {
    if tournament.position_pools.iter().any(|p| p.name == name) {
        return Err(TournamentError::DuplicateContainerName(name.to_string()));
    }

    let mut sorted_seeds: Vec<Seed> = seeds.to_vec();
    sorted_seeds.sort_unstable();
    sorted_seeds.dedup();

    let position_pool = PositionPool {
        id: Uuid::new_v4(),
        name: name.to_string(),
        sequence_number,
        seeds: sorted_seeds.clone(),
        initial_seeding: None,
        results: PoolResults::new(),
    };
    let position_pool_id = position_pool.id;

    let matches = round_robin_matches(
        name,
        ContainerRef::PositionPool(position_pool_id),
        &sorted_seeds,
    );
    log::debug!(
        "created position pool {name} with {} seeds and {} matches",
        sorted_seeds.len(),
        matches.len()
    );

    tournament.position_pools.push(position_pool);
    tournament.matches.extend(matches);
    Ok(position_pool_id)
}

/// One draft match per unordered pair of seeds, named by in-group ordinal
/// ("A1 vs A3"), all in round 1.
fn round_robin_matches(label: &str, container: ContainerRef, seeds: &[Seed]) -> Vec<GameMatch> {
    let mut matches = Vec::new();
    for (i, &seed_x) in seeds.iter().enumerate() {
        for (j, &seed_y) in seeds.iter().enumerate().skip(i + 1) {
            matches.push(GameMatch::new(
                format!("{label}{} vs {label}{}", i + 1, j + 1),
                Some(container),
                1,
                seed_x,
                seed_y,
            ));
        }
    }
    matches
}
