//! Tie-break ranking for teams level on wins inside a pool.

use crate::models::{GameMatch, MatchStatus, TeamId, TeamResult};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Head-to-head record of one team within a tied group.
#[derive(Clone, Copy, Debug, Default)]
struct HeadToHead {
    wins: u32,
    goal_difference: i64,
    goals_for: i64,
}

/// Order a group of teams tied on win count.
///
/// The order of precedence is as follows:
/// 1. Games won counting only games between tied teams
/// 2. Goal difference counting only games between tied teams
/// 3. Goal difference counting all pool games
/// 4. Goals scored counting only games between tied teams
/// 5. Goals scored counting all pool games
///
/// Head-to-head stats are recomputed from the completed-match history on
/// every call. The sort is stable, so teams still tied after all five
/// criteria keep their incoming relative order.
pub fn sort_tied_teams(matches: &[GameMatch], tied_teams: &mut [(TeamId, TeamResult)]) {
    let mut stats: BTreeMap<TeamId, HeadToHead> = tied_teams
        .iter()
        .map(|(team_id, _)| (*team_id, HeadToHead::default()))
        .collect();

    for game in matches {
        if game.status != MatchStatus::Completed {
            continue;
        }
        let (Some(team_1), Some(team_2)) = (game.team_1, game.team_2) else {
            continue;
        };
        if !stats.contains_key(&team_1) || !stats.contains_key(&team_2) {
            continue;
        }

        let score_1 = i64::from(game.score_team_1);
        let score_2 = i64::from(game.score_team_2);

        if score_1 > score_2 {
            if let Some(s) = stats.get_mut(&team_1) {
                s.wins += 1;
            }
        } else if score_2 > score_1 {
            if let Some(s) = stats.get_mut(&team_2) {
                s.wins += 1;
            }
        }

        if let Some(s) = stats.get_mut(&team_1) {
            s.goal_difference += score_1 - score_2;
            s.goals_for += score_1;
        }
        if let Some(s) = stats.get_mut(&team_2) {
            s.goal_difference += score_2 - score_1;
            s.goals_for += score_2;
        }
    }

    tied_teams.sort_by_key(|(team_id, result)| {
        let h2h = stats.get(team_id).copied().unwrap_or_default();
        Reverse((
            h2h.wins,
            h2h.goal_difference,
            result.goal_difference(),
            h2h.goals_for,
            i64::from(result.goals_for),
        ))
    });
}
