use std::collections::VecDeque;

use midway::{
    strike_area, strike_bounds, AttackOutcome, Board, BoardError, BoardView, CellView, Coord,
    Difficulty, HumanAction, Match, MatchConfig, MatchError, Orientation, Phase, Player, Ship, ShipDef,
    Side, SpecialAttack, Team,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Opponent with a fixed deployment and a fixed firing order.
struct Scripted {
    ships: Vec<(usize, usize, Orientation)>,
    targets: VecDeque<Coord>,
}

impl Scripted {
    fn new(ships: Vec<(usize, usize, Orientation)>, targets: Vec<Coord>) -> Box<Self> {
        Box::new(Self {
            ships,
            targets: targets.into(),
        })
    }
}

impl Player for Scripted {
    fn place_fleet(
        &mut self,
        _rng: &mut SmallRng,
        board: &mut Board,
        fleet: &[ShipDef],
        team: Team,
        _attempts: usize,
    ) -> Result<(), BoardError> {
        for (def, &(x, y, o)) in fleet.iter().zip(&self.ships) {
            board.place_ship(Ship::from_def(*def, team)?, x, y, o)?;
        }
        Ok(())
    }

    fn select_target(&mut self, _rng: &mut SmallRng, opponent: &BoardView) -> Option<Coord> {
        assert!(
            !opponent.cells.contains(&CellView::Ship),
            "opponent board handed over unfogged"
        );
        while let Some(c) = self.targets.pop_front() {
            if !opponent.is_attacked(c.0, c.1) {
                return Some(c);
            }
        }
        opponent.unattacked_cells().first().copied()
    }
}

const SCOUT: ShipDef = ShipDef::new("scout", "Scout", "USS Scout", "IJN Scout", 2);
const SKIFF: ShipDef = ShipDef::new("skiff", "Skiff", "USS Skiff", "IJN Skiff", 1);

fn config(fleet: Vec<ShipDef>) -> MatchConfig {
    MatchConfig {
        fleet,
        ..MatchConfig::default()
    }
}

fn new_match(config: MatchConfig) -> Match {
    Match::new(config, SmallRng::seed_from_u64(2024)).unwrap()
}

/// One-scout match: computer scout at (5,5) horizontal, human scout at (0,0) horizontal.
fn scout_match(targets: Vec<Coord>, defer: bool) -> Match {
    let mut cfg = config(vec![SCOUT]);
    cfg.defer_response = defer;
    let mut game = new_match(cfg);
    game.start_with(
        Team::Usa,
        None,
        Scripted::new(vec![(5, 5, Orientation::Horizontal)], targets),
    )
    .unwrap();
    game.place_ship(0, 0, 0, Orientation::Horizontal).unwrap();
    game
}

#[test]
fn test_setup_rejects_play() {
    let mut game = new_match(MatchConfig::default());
    assert_eq!(game.phase(), Phase::Setup);
    assert_eq!(game.attack(0, 0), Err(MatchError::WrongPhase(Phase::Setup)));
    assert_eq!(
        game.place_ship(0, 0, 0, Orientation::Horizontal),
        Err(MatchError::WrongPhase(Phase::Setup))
    );
}

#[test]
fn test_invalid_config() {
    let cfg = MatchConfig {
        board_size: 0,
        ..MatchConfig::default()
    };
    assert!(matches!(
        Match::new(cfg, SmallRng::seed_from_u64(1)),
        Err(MatchError::Setup(BoardError::InvalidArgument(_)))
    ));
    assert!(Match::new(config(vec![]), SmallRng::seed_from_u64(1)).is_err());
}

#[test]
fn test_start_deploys_computer_fleet() {
    let mut game = new_match(MatchConfig::default());
    game.start(Team::Usa, Difficulty::Hard).unwrap();
    assert_eq!(game.phase(), Phase::Placing);
    assert_eq!(game.difficulty(), Some(Difficulty::Hard));
    let statuses = game.computer_ship_statuses();
    assert_eq!(statuses.len(), 5);
    assert_eq!(statuses[0].name, Some("IJN Akagi"));
    assert!(statuses.iter().all(|s| s.hits == 0 && !s.sunk));
    assert_eq!(game.computer_intel().total_targets, 17);
    assert!(game.human_board().ships().is_empty());
    assert_eq!(game.unplaced_ships(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_fatal_setup_keeps_previous_state() {
    let cfg = MatchConfig {
        board_size: 3,
        fleet: vec![ShipDef::new("long", "Long", "Long", "Long", 4)],
        placement_attempts: 50,
        defer_response: false,
    };
    let mut game = new_match(cfg);
    let err = game.start(Team::Japan, Difficulty::Easy).unwrap_err();
    assert_eq!(err, MatchError::Setup(BoardError::UnableToPlaceShip));
    assert!(err.is_fatal());
    assert_eq!(game.phase(), Phase::Setup);
    assert_eq!(game.team(), None);
}

#[test]
fn test_manual_placement_flow() {
    let mut game = new_match(MatchConfig::default());
    game.start(Team::Usa, Difficulty::Medium).unwrap();

    assert_eq!(
        game.place_ship(9, 0, 0, Orientation::Horizontal),
        Err(MatchError::InvalidShipIndex(9))
    );
    game.place_ship(0, 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(
        game.place_ship(0, 0, 5, Orientation::Horizontal),
        Err(MatchError::ShipAlreadyPlaced(0))
    );
    assert_eq!(
        game.place_ship(1, 2, 0, Orientation::Vertical),
        Err(MatchError::Placement(BoardError::ShipOverlaps))
    );
    assert_eq!(
        game.place_ship(1, 8, 0, Orientation::Horizontal),
        Err(MatchError::Placement(BoardError::ShipOutOfBounds))
    );
    assert!(!MatchError::Placement(BoardError::ShipOverlaps).is_fatal());

    game.place_ship(1, 2, 2, Orientation::Vertical).unwrap();
    game.place_ship(2, 5, 6, Orientation::Horizontal).unwrap();
    game.place_ship(3, 8, 1, Orientation::Vertical).unwrap();
    assert_eq!(game.phase(), Phase::Placing);
    assert_eq!(game.unplaced_ships(), vec![4]);
    game.place_ship(4, 7, 9, Orientation::Horizontal).unwrap();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.turn(), Side::Human);
    assert_eq!(game.human_board().ships()[0].name(), Some("USS Enterprise (CV-6)"));
}

#[test]
fn test_reset_and_randomize_placement() {
    let mut game = new_match(MatchConfig::default());
    game.start(Team::Japan, Difficulty::Easy).unwrap();
    game.place_ship(0, 0, 0, Orientation::Horizontal).unwrap();
    game.reset_placement().unwrap();
    assert!(game.human_board().ships().is_empty());
    assert_eq!(game.unplaced_ships().len(), 5);

    game.randomize_human_fleet().unwrap();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.human_board().intel().total_targets, 17);
    assert_eq!(game.reset_placement(), Err(MatchError::WrongPhase(Phase::Playing)));
}

#[test]
fn test_attack_gets_immediate_reply() {
    let mut game = new_match(MatchConfig::default());
    game.start(Team::Usa, Difficulty::Medium).unwrap();
    game.randomize_human_fleet().unwrap();

    let report = game.attack(4, 4).unwrap();
    assert!(matches!(report.human, HumanAction::Attack { coord: (4, 4), .. }));
    let reply = report.computer.expect("computer should answer");
    assert!(game.human_board().is_attacked(reply.coord.0, reply.coord.1));
    assert_eq!(game.turn(), Side::Human);
    assert_eq!(report.phase, Phase::Playing);
    assert_eq!(game.human_board().intel().shots_taken, 1);
}

#[test]
fn test_rejected_attacks_change_nothing() {
    let mut game = scout_match(vec![(9, 9), (8, 8)], false);
    game.attack(3, 3).unwrap();
    let before_human = game.human_board().clone();
    let before_computer = game.computer_view(true);
    let before_intel = game.computer_intel();

    assert_eq!(game.attack(3, 3), Err(MatchError::AlreadyAttacked((3, 3))));
    assert_eq!(game.attack(10, 0), Err(MatchError::OutOfBounds((10, 0))));
    assert_eq!(game.human_board(), &before_human);
    assert_eq!(game.computer_view(true), before_computer);
    assert_eq!(game.computer_intel(), before_intel);
    assert_eq!(game.turn(), Side::Human);
}

#[test]
fn test_deferred_reply() {
    let mut game = scout_match(vec![(9, 9)], true);
    let report = game.attack(0, 9).unwrap();
    assert!(report.computer.is_none());
    assert_eq!(game.turn(), Side::Computer);
    assert_eq!(game.attack(1, 9), Err(MatchError::NotYourTurn));
    assert_eq!(
        game.special_attack(SpecialAttack::FocusedStrike, 1, 1),
        Err(MatchError::NotYourTurn)
    );

    let reply = game.computer_turn().unwrap().unwrap();
    assert_eq!(reply.coord, (9, 9));
    assert_eq!(reply.outcome, AttackOutcome::Miss);
    assert_eq!(game.turn(), Side::Human);
    assert_eq!(game.computer_turn(), Err(MatchError::NotYourTurn));
}

#[test]
fn test_human_wins() {
    let mut game = scout_match(vec![(9, 9), (9, 8)], false);
    let first = game.attack(5, 5).unwrap();
    assert!(matches!(
        first.human,
        HumanAction::Attack { outcome: AttackOutcome::Hit { .. }, .. }
    ));
    assert!(first.computer.is_some());

    let second = game.attack(6, 5).unwrap();
    assert!(matches!(
        second.human,
        HumanAction::Attack { outcome: AttackOutcome::Sunk { .. }, .. }
    ));
    assert!(second.computer.is_none(), "no reply after the final blow");
    assert_eq!(second.phase, Phase::Over);
    assert_eq!(second.winner, Some(Side::Human));
    assert_eq!(game.winner(), Some(Side::Human));
    assert_eq!(game.attack(0, 9), Err(MatchError::WrongPhase(Phase::Over)));
}

#[test]
fn test_computer_wins() {
    let mut game = scout_match(vec![(0, 0), (1, 0)], false);
    game.attack(9, 9).unwrap();
    assert!(!game.human_board().all_ships_sunk());
    let report = game.attack(9, 8).unwrap();
    let reply = report.computer.unwrap();
    assert_eq!(reply.coord, (1, 0));
    assert!(matches!(reply.outcome, AttackOutcome::Sunk { .. }));
    assert_eq!(report.phase, Phase::Over);
    assert_eq!(game.winner(), Some(Side::Computer));
}

#[test]
fn test_focused_strike_once() {
    let mut game = scout_match(vec![(9, 9), (9, 8)], false);
    assert!(game.focused_strike_available());
    let report = game
        .special_attack(SpecialAttack::FocusedStrike, 9, 0)
        .unwrap();
    let HumanAction::Special { weapon, report: strike } = report.human else {
        panic!("expected a special attack");
    };
    assert_eq!(weapon, SpecialAttack::FocusedStrike);
    assert_eq!(strike.top_left, (7, 0));
    assert_eq!(strike.outcomes.len(), 9);
    assert!(report.computer.is_some(), "strike still hands the turn over");
    assert!(!game.focused_strike_available());
    assert_eq!(
        game.special_attack(SpecialAttack::FocusedStrike, 0, 9),
        Err(MatchError::WeaponSpent(SpecialAttack::FocusedStrike))
    );
}

#[test]
fn test_focused_strike_skips_attacked_and_can_win() {
    let mut game = scout_match(vec![(9, 9), (9, 8)], false);
    game.attack(5, 5).unwrap();
    let report = game
        .special_attack(SpecialAttack::FocusedStrike, 5, 5)
        .unwrap();
    let HumanAction::Special { report: strike, .. } = &report.human else {
        panic!("expected a special attack");
    };
    assert_eq!(strike.skipped, 1);
    assert_eq!(strike.outcomes.len(), 8);
    assert_eq!(strike.sunk().count(), 1);
    assert_eq!(report.winner, Some(Side::Human));
    assert!(report.computer.is_none());
}

#[test]
fn test_wide_strike_locked_until_one_target_left() {
    let mut game = scout_match(vec![(9, 9)], false);
    assert!(!game.wide_strike_available());
    assert_eq!(
        game.special_attack(SpecialAttack::WideStrike, 3, 3),
        Err(MatchError::WeaponLocked(SpecialAttack::WideStrike))
    );
    assert_eq!(game.turn(), Side::Human);
    assert!(game.focused_strike_available());
    assert_eq!(game.computer_intel().shots_taken, 0);
    assert_eq!(game.human_board().intel().shots_taken, 0);
}

#[test]
fn test_off_board_strike_keeps_weapon_and_turn() {
    let mut game = scout_match(vec![(9, 9)], false);
    assert_eq!(
        game.special_attack(SpecialAttack::FocusedStrike, 10, 0),
        Err(MatchError::OutOfBounds((10, 0)))
    );
    assert_eq!(
        game.special_attack(SpecialAttack::FocusedStrike, 0, usize::MAX),
        Err(MatchError::OutOfBounds((0, usize::MAX)))
    );
    assert_eq!(game.turn(), Side::Human);
    assert!(game.focused_strike_available());
    assert_eq!(game.computer_intel().shots_taken, 0);
    assert_eq!(game.human_board().intel().shots_taken, 0);

    let report = game
        .special_attack(SpecialAttack::FocusedStrike, 0, 0)
        .unwrap();
    assert!(matches!(report.human, HumanAction::Special { .. }));
    assert!(!game.focused_strike_available());
}

#[test]
fn test_off_board_wide_strike_stays_available() {
    let mut game = new_match(config(vec![SKIFF]));
    game.start_with(
        Team::Usa,
        Some(Difficulty::Easy),
        Scripted::new(vec![(9, 9, Orientation::Horizontal)], vec![(9, 0)]),
    )
    .unwrap();
    game.place_ship(0, 5, 5, Orientation::Vertical).unwrap();
    assert!(game.wide_strike_available());
    assert_eq!(
        game.special_attack(SpecialAttack::WideStrike, 0, 10),
        Err(MatchError::OutOfBounds((0, 10)))
    );
    assert!(game.wide_strike_available());
    assert_eq!(game.turn(), Side::Human);
}

#[test]
fn test_enemy_fleet_hidden_without_reveal() {
    let mut game = new_match(MatchConfig::default());
    game.start(Team::Usa, Difficulty::Easy).unwrap();
    game.randomize_human_fleet().unwrap();

    let fogged = game.computer_view(false);
    assert!(fogged.cells.iter().all(|c| *c == CellView::Untouched));
    let revealed = game.computer_view(true);
    let ship_cells = revealed.cells.iter().filter(|c| **c == CellView::Ship).count();
    assert_eq!(ship_cells, 17);

    // only attacked cells show up under fog
    let report = game.attack(0, 0).unwrap();
    let HumanAction::Attack { outcome, .. } = report.human else {
        panic!("expected a plain attack");
    };
    let fogged = game.computer_view(false);
    let expected = if outcome.is_hit() { CellView::Hit } else { CellView::Miss };
    assert_eq!(fogged.get(0, 0), Some(expected));
    assert_eq!(
        fogged.cells.iter().filter(|c| c.is_attacked()).count(),
        1
    );
    assert!(!fogged.cells.contains(&CellView::Ship));
}

#[test]
fn test_wide_strike_clamps_to_corner() {
    let mut game = new_match(config(vec![SKIFF]));
    game.start_with(
        Team::Usa,
        Some(Difficulty::Easy),
        Scripted::new(vec![(9, 9, Orientation::Horizontal)], vec![(9, 0)]),
    )
    .unwrap();
    game.place_ship(0, 5, 5, Orientation::Vertical).unwrap();
    assert_eq!(game.human_board().intel().remaining_targets, 1);
    assert!(game.wide_strike_available());

    let report = game.special_attack(SpecialAttack::WideStrike, 0, 0).unwrap();
    let HumanAction::Special { report: strike, .. } = &report.human else {
        panic!("expected a special attack");
    };
    assert_eq!(strike.top_left, (0, 0));
    assert_eq!(strike.span, 7);
    assert_eq!(strike.outcomes.len(), 49);
    assert_eq!(strike.skipped, 0);
    assert!(strike.outcomes.iter().all(|(_, o)| *o == AttackOutcome::Miss));
    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(game.computer_view(false).is_attacked(x, y), x < 7 && y < 7);
        }
    }
    assert_eq!(
        game.special_attack(SpecialAttack::WideStrike, 8, 8),
        Err(MatchError::WeaponSpent(SpecialAttack::WideStrike))
    );
}

#[test]
fn test_restart_resets_everything() {
    let mut game = scout_match(vec![(0, 0), (1, 0)], false);
    game.special_attack(SpecialAttack::FocusedStrike, 0, 9).unwrap();
    game.attack(9, 9).unwrap();
    assert_eq!(game.phase(), Phase::Over);

    game.start(Team::Japan, Difficulty::Hard).unwrap();
    assert_eq!(game.phase(), Phase::Placing);
    assert_eq!(game.winner(), None);
    assert_eq!(game.computer_intel().shots_taken, 0);
    game.randomize_human_fleet().unwrap();
    assert!(game.focused_strike_available());
}

#[test]
fn test_strike_bounds_clamp() {
    assert_eq!(strike_bounds(10, (0, 0), 7), ((0, 0), 7));
    assert_eq!(strike_bounds(10, (9, 9), 3), ((7, 7), 3));
    assert_eq!(strike_bounds(10, (5, 5), 3), ((4, 4), 3));
    assert_eq!(strike_bounds(10, (8, 1), 7), ((3, 0), 7));
    assert_eq!(strike_bounds(5, (2, 2), 7), ((0, 0), 5));
}

#[test]
fn test_strike_area_on_bare_board() {
    let mut board = Board::new(10).unwrap();
    board.receive_attack(1, 1);
    let report = strike_area(&mut board, (1, 1), 3);
    assert_eq!(report.area().len(), 9);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.outcomes.len(), 8);
    assert!(!report.any_hit());
    assert_eq!(board.intel().shots_taken, 9);
}
