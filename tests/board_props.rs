use midway::{AttackOutcome, Board, Orientation, Ship, Team, FLEET};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(10).unwrap();
    board
        .place_fleet_randomly(&mut rng, &FLEET, Team::Usa, 2000)
        .unwrap();
    let guesses = rng.random_range(0..40);
    for _ in 0..guesses {
        let x = rng.random_range(0..10);
        let y = rng.random_range(0..10);
        let _ = board.receive_attack(x, y);
    }
    board
}

fn orientation(vertical: bool) -> Orientation {
    if vertical {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn valid_placement_occupies_exactly_length_cells(
        len in 1usize..=10,
        x in 0usize..12,
        y in 0usize..12,
        vertical in any::<bool>(),
    ) {
        let mut board = Board::new(10).unwrap();
        let ship = Ship::new(len).unwrap();
        match board.place_ship(ship, x, y, orientation(vertical)) {
            Ok(id) => {
                let cells = board.ships()[id].placement().unwrap().cells().to_vec();
                prop_assert_eq!(cells.len(), len);
                for (cx, cy) in cells {
                    prop_assert!(board.in_bounds(cx, cy));
                }
            }
            Err(_) => prop_assert!(board.ships().is_empty()),
        }
    }

    #[test]
    fn ship_sinks_on_last_hit_only(seed in any::<u64>(), ship_idx in 0usize..5) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(10).unwrap();
        board.place_fleet_randomly(&mut rng, &FLEET, Team::Japan, 2000).unwrap();
        let cells = board.ships()[ship_idx].placement().unwrap().cells().to_vec();
        let last = cells.len() - 1;
        for (i, (x, y)) in cells.iter().enumerate() {
            let outcome = board.receive_attack(*x, *y);
            if i == last {
                prop_assert_eq!(outcome, AttackOutcome::Sunk { ship: ship_idx, cells: cells.clone() });
            } else {
                prop_assert_eq!(outcome, AttackOutcome::Hit { ship: ship_idx });
                prop_assert!(!board.ships()[ship_idx].is_sunk());
            }
        }
    }

    #[test]
    fn attack_idempotent(seed in any::<u64>(), x in 0usize..10, y in 0usize..10) {
        let mut board = random_board(seed);
        let first = board.receive_attack(x, y);
        let after_first = board.clone();
        let hits: Vec<usize> = board.ships().iter().map(|s| s.hits()).collect();
        if first != AttackOutcome::AlreadyAttacked {
            let is_fresh_outcome = matches!(first, AttackOutcome::Miss | AttackOutcome::Hit { .. } | AttackOutcome::Sunk { .. });
            prop_assert!(is_fresh_outcome);
        }
        for _ in 0..3 {
            prop_assert_eq!(board.receive_attack(x, y), AttackOutcome::AlreadyAttacked);
        }
        let hits_after: Vec<usize> = board.ships().iter().map(|s| s.hits()).collect();
        prop_assert_eq!(hits, hits_after);
        prop_assert_eq!(board, after_first);
    }

    #[test]
    fn all_sunk_matches_ship_hits(seed in any::<u64>()) {
        let board = random_board(seed);
        let expected = board.ships().iter().all(|s| s.hits() >= s.length());
        prop_assert_eq!(board.all_ships_sunk(), expected);
        for ship in board.ships() {
            prop_assert!(ship.hits() <= ship.length());
        }
    }

    #[test]
    fn hidden_view_never_shows_ships(seed in any::<u64>()) {
        let board = random_board(seed);
        let hidden = board.view(false);
        let revealed = board.view(true);
        for (h, r) in hidden.cells.iter().zip(revealed.cells.iter()) {
            prop_assert!(*h != midway::CellView::Ship);
            prop_assert_eq!(h.is_attacked(), r.is_attacked());
        }
    }
}

#[test]
fn sinking_every_cell_ends_the_fleet() {
    let mut board = random_board(99);
    for (x, y) in board.unattacked_cells() {
        board.receive_attack(x, y);
    }
    assert!(board.all_ships_sunk());
    assert_eq!(board.intel().remaining_targets, 0);
}
