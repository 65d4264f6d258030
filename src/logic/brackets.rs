//! Bracket and cross-pool creation: the single-elimination match tree over a
//! contiguous seed range, and round naming.

use crate::models::{
    Bracket, BracketId, ContainerRef, CrossPool, CrossPoolId, GameMatch, Seed, SeedingMap,
    Tournament, TournamentError,
};
use uuid::Uuid;

/// Create a bracket over the inclusive seed range `[start, end]` and generate
/// its full match tree.
///
/// The range size must be even; byes are unsupported, so an odd range is
/// rejected outright instead of producing a partial tree.
pub fn create_bracket(
    tournament: &mut Tournament,
    sequence_number: u32,
    start: Seed,
    end: Seed,
) -> Result<BracketId, TournamentError> {
    let name = format!("{start}-{end}");
    if tournament.brackets.iter().any(|b| b.name == name) {
        return Err(TournamentError::DuplicateContainerName(name));
    }
    if start > end || (end - start + 1) % 2 != 0 {
        return Err(TournamentError::OddBracketRange { start, end });
    }

    let bracket = Bracket {
        id: Uuid::new_v4(),
        name,
        sequence_number,
        seed_range: (start, end),
        initial_seeding: None,
        current_seeding: SeedingMap::new(),
    };
    let bracket_id = bracket.id;

    let mut matches = Vec::new();
    create_bracket_round(&mut matches, bracket_id, start, end, 1);
    log::debug!(
        "created bracket {start}-{end} with {} matches",
        matches.len()
    );

    tournament.brackets.push(bracket);
    tournament.matches.extend(matches);
    Ok(bracket_id)
}

/// Create the tournament's (single) cross pool. Its matches are laid out by
/// staff afterwards via `Tournament::add_match`.
pub fn create_cross_pool(tournament: &mut Tournament) -> Result<CrossPoolId, TournamentError> {
    if tournament.cross_pool.is_some() {
        return Err(TournamentError::CrossPoolAlreadyExists);
    }
    let cross_pool = CrossPool::new();
    let cross_pool_id = cross_pool.id;
    tournament.cross_pool = Some(cross_pool);
    Ok(cross_pool_id)
}

/// Pair `start+i` against `end-i` across the current round, then recurse into
/// both halves one round deeper until a half collapses to a single seed.
/// Produces the classic 1-vs-N placement bracket: consolation rounds keep
/// every seed playing.
fn create_bracket_round(
    matches: &mut Vec<GameMatch>,
    bracket_id: BracketId,
    start: Seed,
    end: Seed,
    sequence_number: u32,
) {
    let half = (end - start + 1) / 2;
    for i in 0..half {
        let seed_1 = start + i;
        let seed_2 = end - i;
        matches.push(GameMatch::new(
            bracket_match_name(start, end, seed_1, seed_2),
            Some(ContainerRef::Bracket(bracket_id)),
            sequence_number,
            seed_1,
            seed_2,
        ));
    }

    if end - start > 1 {
        let mid = start + half - 1;
        create_bracket_round(matches, bracket_id, start, mid, sequence_number + 1);
        create_bracket_round(matches, bracket_id, mid + 1, end, sequence_number + 1);
    }
}

/// Round name for a bracket match (Finals, "3rd Place", Semi Finals, Quarter
/// Finals, or a raw range label for consolation sub-brackets).
fn bracket_match_name(start: Seed, end: Seed, seed_1: Seed, seed_2: Seed) -> String {
    const POSITION_MATCH_SIZE: Seed = 2;
    const SEMI_FINAL_SIZE: Seed = 4;
    const QUARTER_FINAL_SIZE: Seed = 8;

    let bracket_size = end - start + 1;
    let seed = seed_1.min(seed_2);

    if bracket_size == POSITION_MATCH_SIZE {
        return if seed == 1 {
            "Finals".to_string()
        } else {
            format!("{seed}{} Place", ordinal_suffix(seed))
        };
    }

    if bracket_size == SEMI_FINAL_SIZE {
        return if (1..=bracket_size).contains(&seed) {
            "Semi Finals".to_string()
        } else {
            format!("{start}-{end} Bracket")
        };
    }

    if bracket_size == QUARTER_FINAL_SIZE {
        return if (1..=bracket_size).contains(&seed) {
            "Quarter Finals".to_string()
        } else {
            format!("{start}-{end} Bracket")
        };
    }

    String::new()
}

/// Ordinal suffix for a number: 22 -> "nd", 103 -> "rd", 13 -> "th".
fn ordinal_suffix(num: u32) -> &'static str {
    // all numbers with the last two digits in 10..20 take "th"
    if 10 < num % 100 && num % 100 < 20 {
        return "th";
    }
    match num % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
