use rand::rngs::SmallRng;

use crate::{
    ai::{self, Difficulty, TargetingMemory},
    board::{Board, BoardView},
    common::{AttackOutcome, BoardError, Coord},
    player::Player,
    ship::{ShipDef, Team},
};

/// Computer opponent using hunt-and-target guessing at a fixed difficulty.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    difficulty: Difficulty,
    memory: TargetingMemory,
}

impl AiPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            memory: TargetingMemory::new(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn memory(&self) -> &TargetingMemory {
        &self.memory
    }
}

impl Player for AiPlayer {
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &[ShipDef],
        team: Team,
        attempts: usize,
    ) -> Result<(), BoardError> {
        board.place_fleet_randomly(rng, fleet, team, attempts)
    }

    fn select_target(&mut self, rng: &mut SmallRng, opponent: &BoardView) -> Option<Coord> {
        ai::choose_move(self.difficulty, opponent, &mut self.memory, rng)
    }

    fn handle_attack_result(&mut self, opponent: &BoardView, coord: Coord, outcome: &AttackOutcome) {
        ai::update_memory_after_result(self.difficulty, opponent, &mut self.memory, coord, outcome);
    }

    fn reset(&mut self) {
        self.memory.reset();
    }
}
