//! Tournament, TournamentStatus and TournamentError.

use crate::models::container::{Bracket, CrossPool, Pool, PositionPool};
use crate::models::game::{ContainerRef, GameMatch, MatchId};
use crate::models::seeding::{PoolSeedingErrors, Seed, SeedingMap, SeedingUpdateErrors};
use crate::models::team::{Team, TeamId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Proposed pool seeds conflict with existing pools or the roster size.
    PoolSeedingInvalid(PoolSeedingErrors),
    /// Proposed tournament seeding does not line up with the roster.
    SeedingUpdateInvalid(SeedingUpdateErrors),
    /// Bracket seed range has an odd number of seeds (byes are unsupported).
    OddBracketRange { start: Seed, end: Seed },
    /// A container with this name already exists in the tournament.
    DuplicateContainerName(String),
    /// The tournament already has a cross pool.
    CrossPoolAlreadyExists,
    /// A team with this name is already rostered (names are unique, case-insensitive).
    DuplicateTeamName,
    /// Referenced match does not exist in this tournament.
    MatchNotFound(MatchId),
    /// Referenced team is not on the tournament roster.
    TeamNotFound(TeamId),
    /// Referenced container does not exist in this tournament.
    ContainerNotFound(ContainerRef),
    /// A seed has no team assigned in the relevant seeding map.
    SeedUnassigned(Seed),
    /// Tournament or match is not in a status that allows this action.
    InvalidStatus,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::PoolSeedingInvalid(errors) => {
                write!(
                    f,
                    "Invalid pool seeding: repeated seeds {:?}, invalid seeds {:?}",
                    errors.repeated_seeds, errors.invalid_seeds
                )
            }
            TournamentError::SeedingUpdateInvalid(_) => {
                write!(f, "Proposed seeding does not match the tournament roster")
            }
            TournamentError::OddBracketRange { start, end } => {
                write!(f, "Bracket range {start}-{end} has an odd number of seeds")
            }
            TournamentError::DuplicateContainerName(name) => {
                write!(f, "A container named {name} already exists")
            }
            TournamentError::CrossPoolAlreadyExists => {
                write!(f, "Tournament already has a cross pool")
            }
            TournamentError::DuplicateTeamName => {
                write!(f, "A team with this name is already rostered")
            }
            TournamentError::MatchNotFound(id) => write!(f, "Match {id} not found"),
            TournamentError::TeamNotFound(id) => write!(f, "Team {id} not found"),
            TournamentError::ContainerNotFound(container) => {
                write!(f, "Container {container:?} not found")
            }
            TournamentError::SeedUnassigned(seed) => {
                write!(f, "Seed {seed} has no team assigned")
            }
            TournamentError::InvalidStatus => write!(f, "Invalid status for this action"),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of a tournament. Forward-only: registration_open ->
/// registration_closed | live -> completed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    RegistrationOpen,
    RegistrationClosed,
    Live,
    Completed,
}

/// One entry of the derived tournament-wide spirit ranking.
/// Teams with equal points share a rank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpiritRank {
    pub team_id: TeamId,
    /// Average spirit total received from opponents, rounded to one decimal.
    pub points: f64,
    /// Average self-assessed spirit total, rounded to one decimal.
    pub self_points: f64,
    pub rank: u32,
}

/// Full tournament state: roster, seedings, containers and matches.
///
/// The tournament owns every pool, cross pool, bracket, position pool and
/// match for itself; one score submission mutates it as a single unit of work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TournamentStatus,
    /// Rostered teams, in registration order.
    pub teams: Vec<Team>,
    /// Seed -> team as assigned when the roster was finalised.
    pub initial_seeding: SeedingMap,
    /// Seed -> team as results propagate; rewritten seed-by-seed only.
    pub current_seeding: SeedingMap,
    /// Derived sportsmanship ranking.
    pub spirit_ranking: Vec<SpiritRank>,
    pub pools: Vec<Pool>,
    pub cross_pool: Option<CrossPool>,
    pub brackets: Vec<Bracket>,
    pub position_pools: Vec<PositionPool>,
    pub matches: Vec<GameMatch>,
}

impl Tournament {
    /// Create a tournament with an empty roster, open for registration.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            location: location.into(),
            start_date,
            end_date,
            status: TournamentStatus::RegistrationOpen,
            teams: Vec::new(),
            initial_seeding: SeedingMap::new(),
            current_seeding: SeedingMap::new(),
            spirit_ranking: Vec::new(),
            pools: Vec::new(),
            cross_pool: None,
            brackets: Vec::new(),
            position_pools: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Add a team to the roster and re-derive both seedings. Team names are
    /// unique (case-insensitive). Whether fixtures already reference fixed
    /// team slots is the caller's responsibility to check.
    pub fn add_team(&mut self, team: Team) -> Result<TeamId, TournamentError> {
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(team.name.trim()));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        let id = team.id;
        self.teams.push(team);
        self.reseed_from_roster();
        Ok(id)
    }

    /// Remove a team from the roster and re-derive both seedings.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        self.reseed_from_roster();
        Ok(())
    }

    /// Assign seeds 1..=n over the roster in registration order.
    fn reseed_from_roster(&mut self) {
        let seeding: SeedingMap = self
            .teams
            .iter()
            .enumerate()
            .map(|(i, team)| (i as Seed + 1, team.id))
            .collect();
        self.initial_seeding = seeding.clone();
        self.current_seeding = seeding;
    }

    /// Explicit staff transition out of the registration phase.
    pub fn close_registration(&mut self) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::RegistrationOpen {
            return Err(TournamentError::InvalidStatus);
        }
        self.status = TournamentStatus::RegistrationClosed;
        Ok(())
    }

    /// Look up a rostered team.
    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn get_match(&self, match_id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn get_match_mut(&mut self, match_id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    /// Whether the given container reference points at a container of this
    /// tournament.
    pub fn has_container(&self, container: ContainerRef) -> bool {
        match container {
            ContainerRef::Pool(id) => self.pools.iter().any(|p| p.id == id),
            ContainerRef::CrossPool(id) => self.cross_pool.as_ref().is_some_and(|cp| cp.id == id),
            ContainerRef::Bracket(id) => self.brackets.iter().any(|b| b.id == id),
            ContainerRef::PositionPool(id) => self.position_pools.iter().any(|p| p.id == id),
        }
    }

    /// Create a draft match with placeholder seeds, optionally inside a
    /// container. Used by staff to lay out cross-pool rounds and standalone
    /// tournament matches; pool and bracket matches are generated in bulk at
    /// container creation instead.
    pub fn add_match(
        &mut self,
        name: impl Into<String>,
        container: Option<ContainerRef>,
        sequence_number: u32,
        placeholder_seed_1: Seed,
        placeholder_seed_2: Seed,
    ) -> Result<MatchId, TournamentError> {
        if let Some(container) = container {
            if !self.has_container(container) {
                return Err(TournamentError::ContainerNotFound(container));
            }
        }
        let game = GameMatch::new(
            name,
            container,
            sequence_number,
            placeholder_seed_1,
            placeholder_seed_2,
        );
        let id = game.id;
        self.matches.push(game);
        Ok(id)
    }
}
