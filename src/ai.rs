// Hunt-and-target move selection for the automated side.
// Works on a fogged `BoardView`: only attacked flags are visible.

use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use rand::Rng;

use crate::{
    board::BoardView,
    common::{AttackOutcome, Coord},
};

/// Opponent strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Uniform random shots, no memory.
    Easy,
    /// Random hunting, follows up hits through the target queue.
    Medium,
    /// As medium, but hunts on a checkerboard.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    fn uses_memory(self) -> bool {
        !matches!(self, Difficulty::Easy)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a difficulty name is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownDifficulty;

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("difficulty must be one of easy, medium, hard")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownDifficulty)
    }
}

/// Follow-up targets gathered from earlier hits on one opponent board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetingMemory {
    pending: VecDeque<Coord>,
    queued: BTreeSet<Coord>,
    last_hit: Option<Coord>,
}

impl TargetingMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; used when a new match begins.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.queued.clear();
        self.last_hit = None;
    }

    /// Queued follow-up targets in the order they will be tried.
    pub fn pending(&self) -> impl Iterator<Item = &Coord> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Most recent hit on a ship not yet known to be sunk.
    pub fn last_hit(&self) -> Option<Coord> {
        self.last_hit
    }

    /// Queue the in-bounds, unattacked orthogonal neighbours of `coord`
    /// (+x, -x, +y, -y) that are not queued already.
    pub fn enqueue_neighbours(&mut self, board: &BoardView, coord: Coord) {
        let (x, y) = coord;
        let candidates = [
            Some((x + 1, y)),
            x.checked_sub(1).map(|nx| (nx, y)),
            Some((x, y + 1)),
            y.checked_sub(1).map(|ny| (x, ny)),
        ];
        for (nx, ny) in candidates.into_iter().flatten() {
            if !board.in_bounds(nx, ny) || board.is_attacked(nx, ny) {
                continue;
            }
            if self.queued.insert((nx, ny)) {
                self.pending.push_back((nx, ny));
            }
        }
    }

    /// Pop queued entries until one is still unattacked on `board`.
    fn next_pending(&mut self, board: &BoardView) -> Option<Coord> {
        while let Some(next) = self.pending.pop_front() {
            self.queued.remove(&next);
            if !board.is_attacked(next.0, next.1) {
                return Some(next);
            }
        }
        None
    }
}

/// Choose the next cell to attack on `board`, or `None` once every cell has
/// been attacked.
pub fn choose_move<R: Rng + ?Sized>(
    difficulty: Difficulty,
    board: &BoardView,
    memory: &mut TargetingMemory,
    rng: &mut R,
) -> Option<Coord> {
    if difficulty.uses_memory() {
        if let Some(next) = memory.next_pending(board) {
            log::debug!("{} ai follows up at {:?}", difficulty, next);
            return Some(next);
        }
    }

    let candidates = board.unattacked_cells();
    if candidates.is_empty() {
        return None;
    }

    let pool: Vec<Coord> = if difficulty == Difficulty::Hard {
        let even: Vec<Coord> = candidates
            .iter()
            .copied()
            .filter(|&(x, y)| (x + y) % 2 == 0)
            .collect();
        if even.is_empty() {
            candidates
        } else {
            even
        }
    } else {
        candidates
    };

    let pick = pool[rng.random_range(0..pool.len())];
    log::debug!("{} ai hunts at {:?} ({} candidates)", difficulty, pick, pool.len());
    Some(pick)
}

/// Fold the result of an attack at `coord` into `memory`. `board` must be a
/// view taken after `outcome` was applied.
pub fn update_memory_after_result(
    difficulty: Difficulty,
    board: &BoardView,
    memory: &mut TargetingMemory,
    coord: Coord,
    outcome: &AttackOutcome,
) {
    if !difficulty.uses_memory() {
        return;
    }
    match outcome {
        AttackOutcome::Hit { .. } => {
            memory.enqueue_neighbours(board, coord);
            memory.last_hit = Some(coord);
        }
        AttackOutcome::Sunk { .. } => {
            memory.enqueue_neighbours(board, coord);
            memory.last_hit = None;
        }
        _ => {}
    }
}
