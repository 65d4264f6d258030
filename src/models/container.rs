//! Containers that own a seeding: pools, cross pool, brackets, position pools.

use crate::models::seeding::{PoolResults, Seed, SeedingMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PoolId = Uuid;
pub type CrossPoolId = Uuid;
pub type BracketId = Uuid;
pub type PositionPoolId = Uuid;

/// A named round-robin group.
///
/// `initial_seeding` is fixed at creation time (copied from the tournament's
/// initial seeding) and never rewritten; standings live in `results`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub name: String,
    pub sequence_number: u32,
    pub initial_seeding: SeedingMap,
    pub results: PoolResults,
}

impl Pool {
    /// The pool's seeds, ascending.
    pub fn seeds(&self) -> Vec<Seed> {
        self.initial_seeding.keys().copied().collect()
    }
}

/// Seeding-only bridge between pools and the elimination brackets.
///
/// Its matches are laid out by staff; the seeding itself stays unset
/// (`initial_seeding: None`) until every pool has completed and the fixture
/// propagator snapshots the tournament's current seeding into it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CrossPool {
    pub id: CrossPoolId,
    pub initial_seeding: Option<SeedingMap>,
    pub current_seeding: SeedingMap,
}

impl CrossPool {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            initial_seeding: None,
            current_seeding: SeedingMap::new(),
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.initial_seeding.is_some()
    }

    /// Snapshot the given seeding as this container's initial and current.
    pub fn seed_from(&mut self, seeding: SeedingMap) {
        self.current_seeding = seeding.clone();
        self.initial_seeding = Some(seeding);
    }
}

/// Single-elimination container over a contiguous seed range.
///
/// Matches are tagged with a round number (1 = earliest round). The seeding
/// stays unset until the upstream containers settle.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    /// Range label, e.g. "1-8".
    pub name: String,
    pub sequence_number: u32,
    /// Inclusive seed range covered by this bracket.
    pub seed_range: (Seed, Seed),
    pub initial_seeding: Option<SeedingMap>,
    pub current_seeding: SeedingMap,
}

impl Bracket {
    /// The bracket's seeds, ascending.
    pub fn seeds(&self) -> impl Iterator<Item = Seed> {
        self.seed_range.0..=self.seed_range.1
    }

    pub fn is_seeded(&self) -> bool {
        self.initial_seeding.is_some()
    }

    pub fn seed_from(&mut self, seeding: SeedingMap) {
        self.current_seeding = seeding.clone();
        self.initial_seeding = Some(seeding);
    }
}

/// Round-robin placement group for seeds that are out of title contention.
///
/// Seeds are declared at creation; the seed -> team mapping and the zeroed
/// results table are filled in only once every feeder container completes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PositionPool {
    pub id: PositionPoolId,
    pub name: String,
    pub sequence_number: u32,
    /// Seeds this group will hold, ascending.
    pub seeds: Vec<Seed>,
    pub initial_seeding: Option<SeedingMap>,
    pub results: PoolResults,
}

impl PositionPool {
    pub fn is_seeded(&self) -> bool {
        self.initial_seeding.is_some()
    }
}
