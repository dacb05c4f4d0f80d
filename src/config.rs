use alloc::vec::Vec;

use crate::ship::ShipDef;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipDef; NUM_SHIPS] = [
    ShipDef::new("carrier", "Fleet Carrier", "USS Enterprise (CV-6)", "IJN Akagi", 5),
    ShipDef::new("battleship", "Battleship", "USS Yorktown TF", "IJN Kaga", 4),
    ShipDef::new("cruiser", "Heavy Cruiser", "USS Astoria", "IJN Tone", 3),
    ShipDef::new("destroyer", "Destroyer", "USS Hammann", "IJN Arashi", 3),
    ShipDef::new("escort", "Escort", "Picket Escort", "Escort", 2),
];

/// Sum of the lengths in `fleet`.
pub const fn fleet_cells(fleet: &[ShipDef]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fleet.len() {
        total += fleet[i].length();
        i += 1;
    }
    total
}

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = fleet_cells(&FLEET);

/// Random placement tries per ship before fleet setup is declared impossible.
pub const PLACEMENT_ATTEMPTS: usize = 2000;

/// Side length of the focused strike area.
pub const FOCUSED_STRIKE_EXTENT: usize = 3;
/// Side length of the wide strike area.
pub const WIDE_STRIKE_EXTENT: usize = 7;

/// Tunables for a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub board_size: usize,
    pub fleet: Vec<ShipDef>,
    pub placement_attempts: usize,
    /// When set, the automated side only moves on an explicit
    /// `Match::computer_turn` call so a front end can pace the reply.
    pub defer_response: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet: FLEET.to_vec(),
            placement_attempts: PLACEMENT_ATTEMPTS,
            defer_response: false,
        }
    }
}
