//! Score submission: the two-sided confirmation protocol, the staff
//! override, and spirit-score submission with the derived tournament ranking.

use crate::logic::resolve::update_match_score_and_results;
use crate::models::{
    MatchId, MatchScore, MatchSide, SpiritRank, SpiritScore, Tournament, TournamentError,
};

/// What happened to a team's score submission.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScoreOutcome {
    /// Waiting for the opponent's submission (or for the two to agree).
    Pending,
    /// Both sides agreed; the match is completed and fixtures advanced.
    Confirmed,
}

/// Record one side's suggested score. When both sides have submitted and the
/// suggestions agree exactly, the match resolves with that score; otherwise
/// both suggestions stay pending until they match, are resubmitted, or staff
/// overrides.
pub fn submit_match_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    side: MatchSide,
    score_team_1: u32,
    score_team_2: u32,
) -> Result<ScoreOutcome, TournamentError> {
    let game = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if game.team_1.is_none() || game.team_2.is_none() {
        return Err(TournamentError::InvalidStatus);
    }

    let suggested = MatchScore {
        score_team_1,
        score_team_2,
    };
    match side {
        MatchSide::Team1 => game.suggested_score_team_1 = Some(suggested),
        MatchSide::Team2 => game.suggested_score_team_2 = Some(suggested),
    }

    if game.suggested_scores_equal() {
        update_match_score_and_results(tournament, match_id, score_team_1, score_team_2)?;
        Ok(ScoreOutcome::Confirmed)
    } else {
        Ok(ScoreOutcome::Pending)
    }
}

/// Staff override: set both suggested slots to the submitted value and
/// resolve immediately, bypassing the two-sided confirmation.
pub fn staff_submit_match_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_team_1: u32,
    score_team_2: u32,
) -> Result<(), TournamentError> {
    let game = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let official = MatchScore {
        score_team_1,
        score_team_2,
    };
    game.suggested_score_team_1 = Some(official);
    game.suggested_score_team_2 = Some(official);

    update_match_score_and_results(tournament, match_id, score_team_1, score_team_2)
}

/// Record a team's spirit scores for a match (its rating of the opponent and
/// of itself), then re-derive the tournament spirit ranking.
pub fn submit_spirit_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    side: MatchSide,
    opponent_score: SpiritScore,
    self_score: SpiritScore,
) -> Result<(), TournamentError> {
    let game = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if game.team_1.is_none() || game.team_2.is_none() {
        return Err(TournamentError::InvalidStatus);
    }

    match side {
        MatchSide::Team1 => {
            // Team 1 rates team 2, and itself.
            game.spirit_score_team_2 = Some(opponent_score);
            game.self_spirit_score_team_1 = Some(self_score);
        }
        MatchSide::Team2 => {
            game.spirit_score_team_1 = Some(opponent_score);
            game.self_spirit_score_team_2 = Some(self_score);
        }
    }

    update_spirit_rankings(tournament);
    Ok(())
}

/// Re-derive the tournament-wide spirit ranking: per team, the received and
/// self-assessed spirit totals are averaged over matches where both are
/// present (one-decimal rounding); teams with equal points share a rank.
pub fn update_spirit_rankings(tournament: &mut Tournament) {
    let mut ranking: Vec<SpiritRank> = Vec::with_capacity(tournament.teams.len());

    for team in &tournament.teams {
        let mut points = 0.0;
        let mut self_points = 0.0;
        let mut matches_count = 0u32;

        for game in &tournament.matches {
            let (Some(team_1), Some(team_2)) = (game.team_1, game.team_2) else {
                continue;
            };
            if team_1 == team.id {
                if let (Some(received), Some(own)) =
                    (&game.spirit_score_team_1, &game.self_spirit_score_team_1)
                {
                    points += f64::from(received.total);
                    self_points += f64::from(own.total);
                    matches_count += 1;
                }
            } else if team_2 == team.id {
                if let (Some(received), Some(own)) =
                    (&game.spirit_score_team_2, &game.self_spirit_score_team_2)
                {
                    points += f64::from(received.total);
                    self_points += f64::from(own.total);
                    matches_count += 1;
                }
            }
        }

        if matches_count > 0 {
            points = round_one_decimal(points / f64::from(matches_count));
            self_points = round_one_decimal(self_points / f64::from(matches_count));
        }
        ranking.push(SpiritRank {
            team_id: team.id,
            points,
            self_points,
            rank: 0,
        });
    }

    rank_spirit_scores(&mut ranking);
    tournament.spirit_ranking = ranking;
}

/// Assign ranks by points, descending; teams on the same points share the
/// same rank. The list ends up sorted by rank.
fn rank_spirit_scores(ranking: &mut Vec<SpiritRank>) {
    let mut distinct_points: Vec<f64> = ranking.iter().map(|r| r.points).collect();
    distinct_points.sort_by(|a, b| b.total_cmp(a));
    distinct_points.dedup();

    for entry in ranking.iter_mut() {
        let position = distinct_points
            .iter()
            .position(|&p| p == entry.points)
            .unwrap_or(0);
        entry.rank = position as u32 + 1;
    }
    ranking.sort_by_key(|r| r.rank);
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
