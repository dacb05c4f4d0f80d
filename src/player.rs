use rand::rngs::SmallRng;

use crate::{
    board::{Board, BoardView},
    common::{AttackOutcome, BoardError, Coord},
    ship::{ShipDef, Team},
};

/// Interface implemented by the automated side of a match.
pub trait Player {
    /// Place a full fleet onto the provided board.
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        board: &mut Board,
        fleet: &[ShipDef],
        team: Team,
        attempts: usize,
    ) -> Result<(), BoardError>;

    /// Choose the next cell to attack given a fogged view of the opponent's board.
    fn select_target(&mut self, rng: &mut SmallRng, opponent: &BoardView) -> Option<Coord>;

    /// Inform the player of the result of its last attack; `opponent` already shows it.
    fn handle_attack_result(
        &mut self,
        _opponent: &BoardView,
        _coord: Coord,
        _outcome: &AttackOutcome,
    ) {
    }

    /// Drop any per-match state before a new match begins.
    fn reset(&mut self) {}
}
