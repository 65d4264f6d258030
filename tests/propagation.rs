//! Integration tests for fixture propagation: pool -> bracket cascades,
//! cross-pool bridging, idempotence, seed conservation and tournament
//! completion.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use ultimate_tournament_engine::{
    create_bracket, create_cross_pool, create_pool, create_position_pool, populate_fixtures,
    staff_submit_match_score, start_tournament, ContainerRef, MatchId, MatchStatus, Seed, Team,
    TeamId, Tournament, TournamentStatus,
};

fn tournament_with_teams(n: usize) -> Tournament {
    let _ = env_logger::builder().is_test(true).try_init();
    let start = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let mut t = Tournament::new("Sectionals 2025", "Bengaluru", start, end);
    for i in 1..=n {
        t.add_team(Team::new(format!("Team {i}"))).unwrap();
    }
    t
}

fn team_at_seed(t: &Tournament, seed: Seed) -> TeamId {
    t.initial_seeding[&seed]
}

/// Match id by container kind and placeholder seeds.
fn match_in(
    t: &Tournament,
    predicate: impl Fn(&Option<ContainerRef>) -> bool,
    seed_1: Seed,
    seed_2: Seed,
) -> MatchId {
    t.matches
        .iter()
        .find(|m| {
            predicate(&m.container)
                && m.placeholder_seed_1 == seed_1
                && m.placeholder_seed_2 == seed_2
        })
        .map(|m| m.id)
        .expect("no match for these seeds")
}

fn pool_match(t: &Tournament, s1: Seed, s2: Seed) -> MatchId {
    match_in(t, |c| matches!(c, Some(ContainerRef::Pool(_))), s1, s2)
}

fn bracket_match(t: &Tournament, s1: Seed, s2: Seed) -> MatchId {
    match_in(t, |c| matches!(c, Some(ContainerRef::Bracket(_))), s1, s2)
}

fn cross_pool_match(t: &Tournament, s1: Seed, s2: Seed) -> MatchId {
    match_in(t, |c| matches!(c, Some(ContainerRef::CrossPool(_))), s1, s2)
}

fn position_pool_match(t: &Tournament, s1: Seed, s2: Seed) -> MatchId {
    match_in(t, |c| matches!(c, Some(ContainerRef::PositionPool(_))), s1, s2)
}

fn status_of(t: &Tournament, id: MatchId) -> MatchStatus {
    t.get_match(id).unwrap().status
}

/// Every container's current seeding maps its seeds onto distinct roster
/// teams.
fn assert_seed_conservation(t: &Tournament) {
    let roster: BTreeSet<TeamId> = t.teams.iter().map(|team| team.id).collect();
    let mut maps: Vec<(&str, Vec<TeamId>)> = vec![(
        "tournament",
        t.current_seeding.values().copied().collect(),
    )];
    if let Some(cp) = &t.cross_pool {
        maps.push(("cross pool", cp.current_seeding.values().copied().collect()));
    }
    for bracket in &t.brackets {
        maps.push(("bracket", bracket.current_seeding.values().copied().collect()));
    }
    for (label, teams) in maps {
        let distinct: BTreeSet<TeamId> = teams.iter().copied().collect();
        assert_eq!(distinct.len(), teams.len(), "{label} seeding maps a team twice");
        assert!(
            distinct.is_subset(&roster),
            "{label} seeding references a non-rostered team"
        );
    }
}

/// Pool of 4 feeding a 1-4 bracket, no cross pool.
fn pool_and_bracket() -> Tournament {
    let mut t = tournament_with_teams(4);
    create_pool(&mut t, "A", 1, &[1, 2, 3, 4]).unwrap();
    create_bracket(&mut t, 1, 1, 4).unwrap();
    start_tournament(&mut t).unwrap();
    t
}

fn complete_pool_in_seed_order(t: &mut Tournament) {
    for (s1, s2) in [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)] {
        let id = pool_match(t, s1, s2);
        staff_submit_match_score(t, id, 15, 10).unwrap();
    }
}

#[test]
fn bracket_matches_stay_draft_while_pool_runs() {
    let mut t = pool_and_bracket();
    let semi = bracket_match(&t, 1, 4);
    assert_eq!(status_of(&t, semi), MatchStatus::Draft);

    let id = pool_match(&t, 1, 2);
    staff_submit_match_score(&mut t, id, 15, 10).unwrap();
    assert_eq!(status_of(&t, semi), MatchStatus::Draft);
    assert!(!t.brackets[0].is_seeded());
}

#[test]
fn completed_pool_seeds_bracket_and_schedules_round_one() {
    let mut t = pool_and_bracket();
    complete_pool_in_seed_order(&mut t);

    let bracket = &t.brackets[0];
    assert!(bracket.is_seeded());
    assert_eq!(bracket.initial_seeding.as_ref().unwrap(), &t.current_seeding);

    for (s1, s2) in [(1, 4), (2, 3)] {
        let semi = t.get_match(bracket_match(&t, s1, s2)).unwrap();
        assert_eq!(semi.status, MatchStatus::Scheduled);
        assert_eq!(semi.team_1, Some(team_at_seed(&t, s1)));
        assert_eq!(semi.team_2, Some(team_at_seed(&t, s2)));
    }
    // The later rounds are still waiting on results.
    assert_eq!(status_of(&t, bracket_match(&t, 1, 2)), MatchStatus::Draft);
    assert_eq!(status_of(&t, bracket_match(&t, 3, 4)), MatchStatus::Draft);
    assert_seed_conservation(&t);
}

#[test]
fn bracket_upset_swaps_seeds_and_advances_winner() {
    let mut t = pool_and_bracket();
    complete_pool_in_seed_order(&mut t);
    let (s1, s2, s3, s4) = (
        team_at_seed(&t, 1),
        team_at_seed(&t, 2),
        team_at_seed(&t, 3),
        team_at_seed(&t, 4),
    );

    // Seed 4 upsets seed 1; winner takes the better slot.
    let m = bracket_match(&t, 1, 4);
    staff_submit_match_score(&mut t, m, 10, 15).unwrap();
    assert_eq!(t.current_seeding[&1], s4);
    assert_eq!(t.current_seeding[&4], s1);
    assert_eq!(t.brackets[0].current_seeding[&1], s4);

    let finals = t.get_match(bracket_match(&t, 1, 2)).unwrap();
    assert_eq!(finals.team_1, Some(s4));
    assert!(finals.team_2.is_none());
    assert_eq!(finals.status, MatchStatus::Draft);

    // The other semi holds seeding; finals and 3rd place fill up.
    let m = bracket_match(&t, 2, 3);
    staff_submit_match_score(&mut t, m, 15, 9).unwrap();
    let finals = t.get_match(bracket_match(&t, 1, 2)).unwrap();
    assert_eq!(finals.team_2, Some(s2));
    assert_eq!(finals.status, MatchStatus::Scheduled);
    let third = t.get_match(bracket_match(&t, 3, 4)).unwrap();
    assert_eq!(third.team_1, Some(s3));
    assert_eq!(third.team_2, Some(s1));
    assert_eq!(third.status, MatchStatus::Scheduled);
    assert_seed_conservation(&t);

    // Finals: better slot wins, no swap. 3rd place: slot 4 wins, swap.
    let m = bracket_match(&t, 1, 2);
    staff_submit_match_score(&mut t, m, 15, 13).unwrap();
    let m = bracket_match(&t, 3, 4);
    staff_submit_match_score(&mut t, m, 11, 15).unwrap();

    assert_eq!(t.current_seeding[&1], s4);
    assert_eq!(t.current_seeding[&2], s2);
    assert_eq!(t.current_seeding[&3], s1);
    assert_eq!(t.current_seeding[&4], s3);
    assert_eq!(t.status, TournamentStatus::Completed);
    assert_seed_conservation(&t);
}

#[test]
fn propagation_is_idempotent_between_results() {
    let mut t = pool_and_bracket();
    complete_pool_in_seed_order(&mut t);
    let m = bracket_match(&t, 1, 4);
    staff_submit_match_score(&mut t, m, 10, 15).unwrap();

    let snapshot = t.clone();
    populate_fixtures(&mut t).unwrap();
    populate_fixtures(&mut t).unwrap();
    assert_eq!(t, snapshot);
}

#[test]
fn cross_pool_bridges_pools_into_bracket_and_position_pool() {
    let mut t = tournament_with_teams(4);
    create_pool(&mut t, "A", 1, &[1, 2]).unwrap();
    create_pool(&mut t, "B", 2, &[3, 4]).unwrap();
    let cp = create_cross_pool(&mut t).unwrap();
    t.add_match("CP1", Some(ContainerRef::CrossPool(cp)), 1, 1, 3)
        .unwrap();
    t.add_match("CP2", Some(ContainerRef::CrossPool(cp)), 1, 2, 4)
        .unwrap();
    create_bracket(&mut t, 1, 1, 2).unwrap();
    create_position_pool(&mut t, "P", 1, &[3, 4]).unwrap();
    start_tournament(&mut t).unwrap();

    let (s1, s2, s3, s4) = (
        team_at_seed(&t, 1),
        team_at_seed(&t, 2),
        team_at_seed(&t, 3),
        team_at_seed(&t, 4),
    );

    // Pool A completes; its seeds flow into the cross pool, one side each.
    let m = pool_match(&t, 1, 2);
    staff_submit_match_score(&mut t, m, 15, 10).unwrap();
    let cp1 = t.get_match(cross_pool_match(&t, 1, 3)).unwrap();
    assert_eq!(cp1.team_1, Some(s1));
    assert!(cp1.team_2.is_none());
    assert_eq!(cp1.status, MatchStatus::Draft);
    assert!(!t.cross_pool.as_ref().unwrap().is_seeded());

    // Pool B completes; cross pool is seeded and both matches schedule.
    let m = pool_match(&t, 3, 4);
    staff_submit_match_score(&mut t, m, 15, 10).unwrap();
    let cross = t.cross_pool.as_ref().unwrap();
    assert!(cross.is_seeded());
    assert_eq!(cross.current_seeding, t.current_seeding);
    assert_eq!(
        status_of(&t, cross_pool_match(&t, 1, 3)),
        MatchStatus::Scheduled
    );
    assert_eq!(
        status_of(&t, cross_pool_match(&t, 2, 4)),
        MatchStatus::Scheduled
    );
    // Knockout play waits for the cross pool.
    assert!(!t.brackets[0].is_seeded());
    assert!(!t.position_pools[0].is_seeded());

    // Seed 3 upsets seed 1 in the cross pool.
    let m = cross_pool_match(&t, 1, 3);
    staff_submit_match_score(&mut t, m, 13, 15).unwrap();
    assert_eq!(t.current_seeding[&1], s3);
    assert_eq!(t.current_seeding[&3], s1);
    // The bracket still has an unfinished cross-pool feeder on seed 2.
    assert!(!t.brackets[0].is_seeded());

    // Second cross-pool match: better slot wins, no swap; knockout unlocks.
    let m = cross_pool_match(&t, 2, 4);
    staff_submit_match_score(&mut t, m, 15, 11).unwrap();
    let bracket = &t.brackets[0];
    assert!(bracket.is_seeded());
    assert_eq!(bracket.initial_seeding.as_ref().unwrap()[&1], s3);
    assert_eq!(bracket.initial_seeding.as_ref().unwrap()[&2], s2);

    let finals = t.get_match(bracket_match(&t, 1, 2)).unwrap();
    assert_eq!(finals.status, MatchStatus::Scheduled);
    assert_eq!(finals.team_1, Some(s3));
    assert_eq!(finals.team_2, Some(s2));

    let position_pool = &t.position_pools[0];
    assert!(position_pool.is_seeded());
    assert_eq!(position_pool.results[&s1].rank, 1);
    assert_eq!(position_pool.results[&s4].rank, 2);
    let place_match = t.get_match(position_pool_match(&t, 3, 4)).unwrap();
    assert_eq!(place_match.status, MatchStatus::Scheduled);
    assert_eq!(place_match.team_1, Some(s1));
    assert_eq!(place_match.team_2, Some(s4));
    assert_seed_conservation(&t);

    // Play out the finals and the 3rd-place round robin.
    let m = bracket_match(&t, 1, 2);
    staff_submit_match_score(&mut t, m, 12, 15).unwrap();
    assert_eq!(t.current_seeding[&1], s2);
    let m = position_pool_match(&t, 3, 4);
    staff_submit_match_score(&mut t, m, 15, 7).unwrap();

    assert_eq!(t.current_seeding[&3], s1);
    assert_eq!(t.current_seeding[&4], s4);
    assert_eq!(t.status, TournamentStatus::Completed);
    assert_seed_conservation(&t);
}

#[test]
fn empty_tournament_does_not_crash_propagation() {
    let mut t = tournament_with_teams(2);
    populate_fixtures(&mut t).unwrap();
    assert_eq!(t.status, TournamentStatus::Completed);
}
