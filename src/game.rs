//! Match controller: phases, turn order, the automated reply and special weapons.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use rand::rngs::SmallRng;

use crate::{
    ai::Difficulty,
    board::{Board, BoardView, FleetIntel, ShipStatus},
    common::{AttackOutcome, BoardError, Coord, ShipId},
    config::{MatchConfig, FOCUSED_STRIKE_EXTENT, WIDE_STRIKE_EXTENT},
    player::Player,
    player_ai::AiPlayer,
    ship::{Orientation, Ship, ShipDef, Team},
};

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Waiting for team and difficulty.
    Setup,
    /// Human is deploying ships.
    Placing,
    Playing,
    Over,
}

/// The two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Human,
    Computer,
}

/// One-shot area weapons available to the human side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SpecialAttack {
    /// 3×3 strike, usable once per match.
    FocusedStrike,
    /// 7×7 strike, unlocked when the human has a single ship cell left.
    WideStrike,
}

impl SpecialAttack {
    /// Side length of the square area hit.
    pub fn extent(self) -> usize {
        match self {
            SpecialAttack::FocusedStrike => FOCUSED_STRIKE_EXTENT,
            SpecialAttack::WideStrike => WIDE_STRIKE_EXTENT,
        }
    }
}

/// Errors reported by the controller. Everything except `Setup` leaves the
/// match exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// Configuration could not produce a legal match.
    Setup(BoardError),
    /// Operation not allowed in the current phase.
    WrongPhase(Phase),
    NotYourTurn,
    OutOfBounds(Coord),
    AlreadyAttacked(Coord),
    InvalidShipIndex(usize),
    ShipAlreadyPlaced(usize),
    Placement(BoardError),
    WeaponSpent(SpecialAttack),
    WeaponLocked(SpecialAttack),
}

impl MatchError {
    /// Only setup failures abort a match.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MatchError::Setup(_))
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Setup(e) => write!(f, "Match setup failed: {}", e),
            MatchError::WrongPhase(p) => write!(f, "Not allowed during {:?}", p),
            MatchError::NotYourTurn => write!(f, "It is not your turn"),
            MatchError::OutOfBounds((x, y)) => write!(f, "({}, {}) is off the board", x, y),
            MatchError::AlreadyAttacked((x, y)) => write!(f, "({}, {}) was already attacked", x, y),
            MatchError::InvalidShipIndex(i) => write!(f, "No fleet entry {}", i),
            MatchError::ShipAlreadyPlaced(i) => write!(f, "Fleet entry {} is already placed", i),
            MatchError::Placement(e) => write!(f, "Cannot place ship: {}", e),
            MatchError::WeaponSpent(w) => write!(f, "{:?} has already been used", w),
            MatchError::WeaponLocked(w) => write!(f, "{:?} is not available yet", w),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

/// Top-left corner and side length of a strike of `extent` centred on
/// `center`, shifted inward so the whole area stays on a `size` board.
pub fn strike_bounds(size: usize, center: Coord, extent: usize) -> (Coord, usize) {
    let span = extent.min(size);
    let half = extent / 2;
    let x = center.0.saturating_sub(half).min(size - span);
    let y = center.1.saturating_sub(half).min(size - span);
    ((x, y), span)
}

/// Everything an area strike did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeReport {
    pub center: Coord,
    pub top_left: Coord,
    pub span: usize,
    /// Outcomes for cells that were attacked, row-major.
    pub outcomes: Vec<(Coord, AttackOutcome)>,
    /// Cells in the area that had been attacked before.
    pub skipped: usize,
}

impl StrikeReport {
    /// Every cell in the strike area, row-major.
    pub fn area(&self) -> Vec<Coord> {
        let (x0, y0) = self.top_left;
        let mut cells = Vec::with_capacity(self.span * self.span);
        for y in y0..y0 + self.span {
            for x in x0..x0 + self.span {
                cells.push((x, y));
            }
        }
        cells
    }

    pub fn any_hit(&self) -> bool {
        self.outcomes.iter().any(|(_, o)| o.is_hit())
    }

    /// Cell lists of the ships sunk by this strike.
    pub fn sunk(&self) -> impl Iterator<Item = &[Coord]> {
        self.outcomes.iter().filter_map(|(_, o)| match o {
            AttackOutcome::Sunk { cells, .. } => Some(cells.as_slice()),
            _ => None,
        })
    }
}

/// Attack every not-yet-attacked cell of the clamped area on `board`.
pub fn strike_area(board: &mut Board, center: Coord, extent: usize) -> StrikeReport {
    let (top_left, span) = strike_bounds(board.size(), center, extent);
    let mut report = StrikeReport {
        center,
        top_left,
        span,
        outcomes: Vec::new(),
        skipped: 0,
    };
    for (x, y) in report.area() {
        if board.is_attacked(x, y) {
            report.skipped += 1;
            continue;
        }
        let outcome = board.receive_attack(x, y);
        report.outcomes.push(((x, y), outcome));
    }
    report
}

/// What the human did on their turn.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum HumanAction {
    Attack { coord: Coord, outcome: AttackOutcome },
    Special { weapon: SpecialAttack, report: StrikeReport },
}

/// The automated side's shot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputerMove {
    pub coord: Coord,
    pub outcome: AttackOutcome,
}

/// Result of one human turn and, unless deferred or the game ended, the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub human: HumanAction,
    pub computer: Option<ComputerMove>,
    pub phase: Phase,
    pub winner: Option<Side>,
}

/// A single human-versus-computer match.
pub struct Match {
    config: MatchConfig,
    rng: SmallRng,
    phase: Phase,
    turn: Side,
    team: Option<Team>,
    difficulty: Option<Difficulty>,
    human_board: Board,
    computer_board: Board,
    opponent: Option<Box<dyn Player>>,
    placed: Vec<bool>,
    focused_used: bool,
    wide_used: bool,
    winner: Option<Side>,
}

impl Match {
    /// Create a match in the `Setup` phase after validating `config`.
    pub fn new(config: MatchConfig, rng: SmallRng) -> Result<Self, MatchError> {
        if config.fleet.is_empty() {
            return Err(MatchError::Setup(BoardError::InvalidArgument(
                "fleet must not be empty",
            )));
        }
        if config.fleet.iter().any(|def| def.length() == 0) {
            return Err(MatchError::Setup(BoardError::InvalidArgument(
                "ship length must be positive",
            )));
        }
        let human_board = Board::new(config.board_size).map_err(MatchError::Setup)?;
        let computer_board = human_board.clone();
        let placed = alloc::vec![false; config.fleet.len()];
        Ok(Self {
            config,
            rng,
            phase: Phase::Setup,
            turn: Side::Human,
            team: None,
            difficulty: None,
            human_board,
            computer_board,
            opponent: None,
            placed,
            focused_used: false,
            wide_used: false,
            winner: None,
        })
    }

    /// Begin a new match against the built-in AI at `difficulty`.
    pub fn start(&mut self, team: Team, difficulty: Difficulty) -> Result<(), MatchError> {
        self.start_with(team, Some(difficulty), Box::new(AiPlayer::new(difficulty)))
    }

    /// Begin a new match against any automated player. Builds fresh boards,
    /// deploys the opponent's fleet and enters `Placing`. On failure the
    /// previous state is kept.
    pub fn start_with(
        &mut self,
        team: Team,
        difficulty: Option<Difficulty>,
        mut opponent: Box<dyn Player>,
    ) -> Result<(), MatchError> {
        let size = self.config.board_size;
        let human_board = Board::new(size).map_err(MatchError::Setup)?;
        let mut computer_board = Board::new(size).map_err(MatchError::Setup)?;

        opponent.reset();
        if let Err(e) = opponent.place_fleet(
            &mut self.rng,
            &mut computer_board,
            &self.config.fleet,
            team.opponent(),
            self.config.placement_attempts,
        ) {
            log::warn!("could not deploy the {} fleet: {}", team.opponent().label(), e);
            return Err(MatchError::Setup(e));
        }

        self.human_board = human_board;
        self.computer_board = computer_board;
        self.opponent = Some(opponent);
        self.team = Some(team);
        self.difficulty = difficulty;
        self.placed = alloc::vec![false; self.config.fleet.len()];
        self.focused_used = false;
        self.wide_used = false;
        self.winner = None;
        self.turn = Side::Human;
        self.phase = Phase::Placing;
        log::info!(
            "match started: {} vs {}, difficulty {:?}",
            team.label(),
            team.opponent().label(),
            difficulty
        );
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn team(&self) -> Option<Team> {
        self.team
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn fleet(&self) -> &[ShipDef] {
        &self.config.fleet
    }

    /// The human's own board.
    pub fn human_board(&self) -> &Board {
        &self.human_board
    }

    /// The computer's grid. Unattacked ships only show when `reveal` is set.
    pub fn computer_view(&self, reveal: bool) -> BoardView {
        self.computer_board.view(reveal)
    }

    pub fn computer_intel(&self) -> FleetIntel {
        self.computer_board.intel()
    }

    /// Damage per enemy ship, without positions.
    pub fn computer_ship_statuses(&self) -> Vec<ShipStatus> {
        self.computer_board.ship_statuses()
    }

    /// Fleet indices the human still has to place.
    pub fn unplaced_ships(&self) -> Vec<usize> {
        self.placed
            .iter()
            .enumerate()
            .filter(|(_, placed)| !**placed)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn focused_strike_available(&self) -> bool {
        self.human_to_move() && !self.focused_used
    }

    pub fn wide_strike_available(&self) -> bool {
        self.human_to_move()
            && !self.wide_used
            && self.human_board.intel().remaining_targets == 1
    }

    fn human_to_move(&self) -> bool {
        self.phase == Phase::Playing && self.turn == Side::Human
    }

    fn ensure_phase(&self, phase: Phase) -> Result<(), MatchError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(MatchError::WrongPhase(self.phase))
        }
    }

    fn ensure_human_turn(&self) -> Result<(), MatchError> {
        self.ensure_phase(Phase::Playing)?;
        if self.turn != Side::Human {
            return Err(MatchError::NotYourTurn);
        }
        Ok(())
    }

    fn team_or_default(&self) -> Team {
        self.team.unwrap_or(Team::Usa)
    }

    /// Deploy fleet entry `index` on the human board.
    pub fn place_ship(
        &mut self,
        index: usize,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<ShipId, MatchError> {
        self.ensure_phase(Phase::Placing)?;
        let def = *self
            .config
            .fleet
            .get(index)
            .ok_or(MatchError::InvalidShipIndex(index))?;
        if self.placed[index] {
            return Err(MatchError::ShipAlreadyPlaced(index));
        }
        let ship = Ship::from_def(def, self.team_or_default()).map_err(MatchError::Placement)?;
        let id = self
            .human_board
            .place_ship(ship, x, y, orientation)
            .map_err(MatchError::Placement)?;
        self.placed[index] = true;
        if self.placed.iter().all(|p| *p) {
            self.begin_play();
        }
        Ok(id)
    }

    /// Replace the human deployment with a random one and begin play.
    pub fn randomize_human_fleet(&mut self) -> Result<(), MatchError> {
        self.ensure_phase(Phase::Placing)?;
        let team = self.team_or_default();
        let mut board = Board::new(self.config.board_size).map_err(MatchError::Placement)?;
        board
            .place_fleet_randomly(
                &mut self.rng,
                &self.config.fleet,
                team,
                self.config.placement_attempts,
            )
            .map_err(MatchError::Placement)?;
        self.human_board = board;
        self.placed.iter_mut().for_each(|p| *p = true);
        self.begin_play();
        Ok(())
    }

    /// Clear the human deployment and start placing again.
    pub fn reset_placement(&mut self) -> Result<(), MatchError> {
        self.ensure_phase(Phase::Placing)?;
        self.human_board = Board::new(self.config.board_size).map_err(MatchError::Placement)?;
        self.placed.iter_mut().for_each(|p| *p = false);
        Ok(())
    }

    fn begin_play(&mut self) {
        self.phase = Phase::Playing;
        self.turn = Side::Human;
        log::info!("all ships placed, battle begins");
    }

    /// Fire a single shot at (`x`, `y`) on the computer's board.
    pub fn attack(&mut self, x: usize, y: usize) -> Result<TurnReport, MatchError> {
        self.ensure_human_turn()?;
        let outcome = self.computer_board.receive_attack(x, y);
        match outcome {
            AttackOutcome::OutOfBounds => return Err(MatchError::OutOfBounds((x, y))),
            AttackOutcome::AlreadyAttacked => return Err(MatchError::AlreadyAttacked((x, y))),
            _ => {}
        }
        log::debug!("human fires at ({}, {}): {:?}", x, y, outcome);
        Ok(self.finish_human_turn(HumanAction::Attack {
            coord: (x, y),
            outcome,
        }))
    }

    /// Fire a special weapon centred on (`x`, `y`). Counts as the full turn.
    pub fn special_attack(
        &mut self,
        weapon: SpecialAttack,
        x: usize,
        y: usize,
    ) -> Result<TurnReport, MatchError> {
        self.ensure_human_turn()?;
        match weapon {
            SpecialAttack::FocusedStrike if self.focused_used => {
                return Err(MatchError::WeaponSpent(weapon))
            }
            SpecialAttack::WideStrike if self.wide_used => {
                return Err(MatchError::WeaponSpent(weapon))
            }
            SpecialAttack::WideStrike if !self.wide_strike_available() => {
                return Err(MatchError::WeaponLocked(weapon))
            }
            _ => {}
        }
        if !self.computer_board.in_bounds(x, y) {
            return Err(MatchError::OutOfBounds((x, y)));
        }

        match weapon {
            SpecialAttack::FocusedStrike => self.focused_used = true,
            SpecialAttack::WideStrike => self.wide_used = true,
        }
        let report = strike_area(&mut self.computer_board, (x, y), weapon.extent());
        log::info!(
            "{:?} at ({}, {}): {} cells struck, {} skipped",
            weapon,
            x,
            y,
            report.outcomes.len(),
            report.skipped
        );
        Ok(self.finish_human_turn(HumanAction::Special { weapon, report }))
    }

    fn finish_human_turn(&mut self, human: HumanAction) -> TurnReport {
        let mut computer = None;
        if self.computer_board.all_ships_sunk() {
            self.end(Side::Human);
        } else {
            self.turn = Side::Computer;
            if !self.config.defer_response {
                computer = self.take_computer_turn();
            }
        }
        TurnReport {
            human,
            computer,
            phase: self.phase,
            winner: self.winner,
        }
    }

    /// Let the automated side move. Only needed with `defer_response`.
    pub fn computer_turn(&mut self) -> Result<Option<ComputerMove>, MatchError> {
        self.ensure_phase(Phase::Playing)?;
        if self.turn != Side::Computer {
            return Err(MatchError::NotYourTurn);
        }
        Ok(self.take_computer_turn())
    }

    fn take_computer_turn(&mut self) -> Option<ComputerMove> {
        let opponent = self.opponent.as_mut()?;
        let max_tries = self.human_board.size() * self.human_board.size();
        for _ in 0..max_tries {
            let fogged = self.human_board.view(false);
            let Some(coord) = opponent.select_target(&mut self.rng, &fogged) else {
                break;
            };
            let outcome = self.human_board.receive_attack(coord.0, coord.1);
            if outcome.is_rejected() {
                log::warn!("computer chose an invalid target {:?}: {:?}", coord, outcome);
                continue;
            }
            opponent.handle_attack_result(&self.human_board.view(false), coord, &outcome);
            log::debug!("computer fires at {:?}: {:?}", coord, outcome);
            if self.human_board.all_ships_sunk() {
                self.end(Side::Computer);
            } else {
                self.turn = Side::Human;
            }
            return Some(ComputerMove { coord, outcome });
        }

        // Nothing left to shoot at.
        if self.human_board.all_ships_sunk() {
            self.end(Side::Computer);
        } else {
            log::warn!("computer has no target left; handing the turn back");
            self.turn = Side::Human;
        }
        None
    }

    fn end(&mut self, winner: Side) {
        self.phase = Phase::Over;
        self.winner = Some(winner);
        log::info!("match over, {:?} wins", winner);
    }
}
