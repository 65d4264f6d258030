//! Integration tests for bracket topology generation and round naming.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use ultimate_tournament_engine::{
    create_bracket, Seed, Team, Tournament, TournamentError,
};

fn tournament_with_teams(n: usize) -> Tournament {
    let start = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let mut t = Tournament::new("Sectionals 2025", "Bengaluru", start, end);
    for i in 1..=n {
        t.add_team(Team::new(format!("Team {i}"))).unwrap();
    }
    t
}

fn pairings_in_round(t: &Tournament, round: u32) -> Vec<(Seed, Seed)> {
    let mut pairs: Vec<(Seed, Seed)> = t
        .matches
        .iter()
        .filter(|m| m.sequence_number == round)
        .map(|m| (m.placeholder_seed_1, m.placeholder_seed_2))
        .collect();
    pairs.sort_unstable();
    pairs
}

fn name_of(t: &Tournament, seed_1: Seed, seed_2: Seed) -> &str {
    t.matches
        .iter()
        .find(|m| m.placeholder_seed_1 == seed_1 && m.placeholder_seed_2 == seed_2)
        .map(|m| m.name.as_str())
        .expect("no match for these seeds")
}

#[test]
fn eight_seed_bracket_builds_three_placement_rounds() {
    let mut t = tournament_with_teams(8);
    create_bracket(&mut t, 1, 1, 8).unwrap();

    // Every seed keeps playing: 4 matches in each of 3 rounds.
    assert_eq!(t.matches.len(), 12);
    let rounds: BTreeSet<u32> = t.matches.iter().map(|m| m.sequence_number).collect();
    assert_eq!(rounds, BTreeSet::from([1, 2, 3]));

    // Round 1 pairs seed i against seed 9 - i.
    assert_eq!(pairings_in_round(&t, 1), vec![(1, 8), (2, 7), (3, 6), (4, 5)]);
    assert_eq!(pairings_in_round(&t, 2), vec![(1, 4), (2, 3), (5, 8), (6, 7)]);
    assert_eq!(pairings_in_round(&t, 3), vec![(1, 2), (3, 4), (5, 6), (7, 8)]);
}

#[test]
fn bracket_rounds_are_named_by_size_and_seed() {
    let mut t = tournament_with_teams(8);
    create_bracket(&mut t, 1, 1, 8).unwrap();

    for (s1, s2) in [(1, 8), (2, 7), (3, 6), (4, 5)] {
        assert_eq!(name_of(&t, s1, s2), "Quarter Finals");
    }
    assert_eq!(name_of(&t, 1, 4), "Semi Finals");
    assert_eq!(name_of(&t, 2, 3), "Semi Finals");
    assert_eq!(name_of(&t, 5, 8), "5-8 Bracket");
    assert_eq!(name_of(&t, 6, 7), "5-8 Bracket");
    assert_eq!(name_of(&t, 1, 2), "Finals");
    assert_eq!(name_of(&t, 3, 4), "3rd Place");
    assert_eq!(name_of(&t, 5, 6), "5th Place");
    assert_eq!(name_of(&t, 7, 8), "7th Place");
}

#[test]
fn lower_bracket_finals_is_a_place_match() {
    let mut t = tournament_with_teams(8);
    create_bracket(&mut t, 1, 5, 8).unwrap();

    assert_eq!(name_of(&t, 5, 8), "5-8 Bracket");
    assert_eq!(name_of(&t, 6, 7), "5-8 Bracket");
    assert_eq!(name_of(&t, 5, 6), "5th Place");
    assert_eq!(name_of(&t, 7, 8), "7th Place");
}

#[test]
fn odd_seed_range_is_rejected() {
    let mut t = tournament_with_teams(8);
    assert!(matches!(
        create_bracket(&mut t, 1, 1, 7),
        Err(TournamentError::OddBracketRange { start: 1, end: 7 })
    ));
    assert!(t.matches.is_empty());
    assert!(t.brackets.is_empty());
}

#[test]
fn duplicate_bracket_range_is_rejected() {
    let mut t = tournament_with_teams(8);
    create_bracket(&mut t, 1, 1, 8).unwrap();
    assert!(matches!(
        create_bracket(&mut t, 2, 1, 8),
        Err(TournamentError::DuplicateContainerName(_))
    ));
}

#[test]
fn bracket_starts_unseeded() {
    let mut t = tournament_with_teams(8);
    create_bracket(&mut t, 1, 1, 8).unwrap();
    let bracket = &t.brackets[0];
    assert!(!bracket.is_seeded());
    assert!(bracket.current_seeding.is_empty());
    assert_eq!(bracket.name, "1-8");
}
