//! Game board: cell grid, placed ships, attacks and the fog-of-war query surface.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::{AttackOutcome, BoardError, Coord, ShipId};
use crate::ship::{Orientation, Placement, Ship, ShipDef, Team};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Cell {
    ship: Option<ShipId>,
    attacked: bool,
}

/// What a front end may know about one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellView {
    /// Not attacked. Shown for empty water, and for ships unless revealed.
    Untouched,
    /// Not attacked, holds a ship. Only produced when revealing.
    Ship,
    Miss,
    Hit,
}

impl CellView {
    pub fn is_attacked(self) -> bool {
        matches!(self, CellView::Miss | CellView::Hit)
    }
}

/// Row-major snapshot of a board for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardView {
    pub size: usize,
    pub cells: Vec<CellView>,
}

impl BoardView {
    pub fn get(&self, x: usize, y: usize) -> Option<CellView> {
        if x < self.size && y < self.size {
            self.cells.get(y * self.size + x).copied()
        } else {
            None
        }
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(self.size)
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Whether the cell was attacked. Out-of-bounds cells report `false`.
    pub fn is_attacked(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(CellView::is_attacked)
    }

    /// All cells not yet attacked, row-major.
    pub fn unattacked_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_attacked())
            .map(|(i, _)| (i % self.size, i / self.size))
            .collect()
    }
}

/// Per-ship status safe to show for either side: no placement is exposed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipStatus {
    pub id: ShipId,
    pub key: Option<&'static str>,
    pub name: Option<&'static str>,
    pub length: usize,
    pub hits: usize,
    pub sunk: bool,
}

/// Aggregate attack statistics for one board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetIntel {
    /// Sum of all ship lengths.
    pub total_targets: usize,
    /// Ship cells not yet hit.
    pub remaining_targets: usize,
    pub shots_taken: usize,
    pub hits_landed: usize,
    pub ships_sunk: usize,
    pub total_ships: usize,
}

impl FleetIntel {
    /// Fraction of shots that hit, `0.0` before the first shot.
    pub fn accuracy(&self) -> f64 {
        if self.shots_taken == 0 {
            0.0
        } else {
            self.hits_landed as f64 / self.shots_taken as f64
        }
    }
}

/// A square grid owning its ships. Cells refer to ships by index.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty, unattacked board. Fails when `size` is zero or its square overflows.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidArgument("board size must be positive"));
        }
        let area = size
            .checked_mul(size)
            .ok_or(BoardError::InvalidArgument("board size too large"))?;
        Ok(Board {
            size,
            cells: alloc::vec![Cell::default(); area],
            ships: Vec::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[y * self.size + x]
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        &mut self.cells[y * self.size + x]
    }

    /// Ships in placement order; the index is the ship's id.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id)
    }

    /// Cells a ship of `length` would occupy, or why it cannot go there.
    fn footprint(
        &self,
        length: usize,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, BoardError> {
        if length > self.size {
            return Err(BoardError::ShipOutOfBounds);
        }
        let mut cells = Vec::with_capacity(length);
        for i in 0..length {
            let Some((cx, cy)) = orientation.step((x, y), i) else {
                return Err(BoardError::ShipOutOfBounds);
            };
            if !self.in_bounds(cx, cy) {
                return Err(BoardError::ShipOutOfBounds);
            }
            if self.cell(cx, cy).ship.is_some() {
                return Err(BoardError::ShipOverlaps);
            }
            cells.push((cx, cy));
        }
        Ok(cells)
    }

    /// Whether a ship of `length` fits at the given origin without mutating anything.
    pub fn can_place(&self, length: usize, x: usize, y: usize, orientation: Orientation) -> bool {
        length > 0 && self.footprint(length, x, y, orientation).is_ok()
    }

    /// Place `ship` with its origin at (`x`, `y`). All-or-nothing: on error the
    /// board is untouched.
    pub fn place_ship(
        &mut self,
        mut ship: Ship,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        if ship.placement().is_some() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let cells = self.footprint(ship.length(), x, y, orientation)?;
        let id = self.ships.len();
        for &(cx, cy) in &cells {
            self.cell_mut(cx, cy).ship = Some(id);
        }
        log::debug!(
            "placed ship {} (length {}) at ({}, {}) {:?}",
            id,
            ship.length(),
            x,
            y,
            orientation
        );
        ship.set_placement(Placement::new((x, y), orientation, cells));
        self.ships.push(ship);
        Ok(id)
    }

    /// Pick a random origin and orientation where a ship of `length` fits.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
        attempts: usize,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        if length == 0 {
            return Err(BoardError::InvalidArgument("ship length must be positive"));
        }
        if length > self.size {
            return Err(BoardError::UnableToPlaceShip);
        }
        for _ in 0..attempts {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orient {
                Orientation::Horizontal => (self.size - length, self.size - 1),
                Orientation::Vertical => (self.size - 1, self.size - length),
            };
            let x = rng.random_range(0..=max_x);
            let y = rng.random_range(0..=max_y);
            if self.footprint(length, x, y, orient).is_ok() {
                return Ok((x, y, orient));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Randomly place one ship per fleet entry, named for `team`.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        fleet: &[ShipDef],
        team: Team,
        attempts: usize,
    ) -> Result<(), BoardError> {
        for def in fleet {
            let ship = Ship::from_def(*def, team)?;
            let (x, y, orient) = self.random_placement(rng, def.length(), attempts)?;
            self.place_ship(ship, x, y, orient)?;
        }
        Ok(())
    }

    /// Resolve an attack at (`x`, `y`). Rejections leave the board unchanged.
    pub fn receive_attack(&mut self, x: usize, y: usize) -> AttackOutcome {
        if !self.in_bounds(x, y) {
            return AttackOutcome::OutOfBounds;
        }
        let cell = self.cell_mut(x, y);
        if cell.attacked {
            return AttackOutcome::AlreadyAttacked;
        }
        cell.attacked = true;

        let Some(id) = cell.ship else {
            return AttackOutcome::Miss;
        };
        let ship = &mut self.ships[id];
        ship.register_hit();
        if ship.is_sunk() {
            let cells = ship
                .placement()
                .map(|p| p.cells().to_vec())
                .unwrap_or_default();
            AttackOutcome::Sunk { ship: id, cells }
        } else {
            AttackOutcome::Hit { ship: id }
        }
    }

    /// `true` when at least one ship exists and every ship is sunk.
    pub fn all_ships_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Whether the cell was attacked. Out-of-bounds cells report `false`.
    pub fn is_attacked(&self, x: usize, y: usize) -> bool {
        self.in_bounds(x, y) && self.cell(x, y).attacked
    }

    /// All cells not yet attacked, row-major.
    pub fn unattacked_cells(&self) -> Vec<Coord> {
        let mut coords = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                if !self.cell(x, y).attacked {
                    coords.push((x, y));
                }
            }
        }
        coords
    }

    /// View of one cell. Unattacked ships stay hidden unless `reveal` is set.
    pub fn cell_view(&self, x: usize, y: usize, reveal: bool) -> Option<CellView> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let cell = self.cell(x, y);
        Some(match (cell.attacked, cell.ship.is_some()) {
            (true, true) => CellView::Hit,
            (true, false) => CellView::Miss,
            (false, true) if reveal => CellView::Ship,
            (false, _) => CellView::Untouched,
        })
    }

    /// Snapshot of the whole grid for rendering.
    pub fn view(&self, reveal: bool) -> BoardView {
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..self.size {
            for x in 0..self.size {
                // in bounds by construction
                cells.push(self.cell_view(x, y, reveal).unwrap_or(CellView::Untouched));
            }
        }
        BoardView {
            size: self.size,
            cells,
        }
    }

    pub fn ship_statuses(&self) -> Vec<ShipStatus> {
        self.ships
            .iter()
            .enumerate()
            .map(|(id, ship)| ShipStatus {
                id,
                key: ship.def().map(ShipDef::key),
                name: ship.name(),
                length: ship.length(),
                hits: ship.hits(),
                sunk: ship.is_sunk(),
            })
            .collect()
    }

    pub fn intel(&self) -> FleetIntel {
        let total_targets: usize = self.ships.iter().map(Ship::length).sum();
        let mut shots_taken = 0;
        let mut hits_landed = 0;
        for cell in self.cells.iter().filter(|c| c.attacked) {
            shots_taken += 1;
            if cell.ship.is_some() {
                hits_landed += 1;
            }
        }
        FleetIntel {
            total_targets,
            remaining_targets: total_targets.saturating_sub(hits_landed),
            shots_taken,
            hits_landed,
            ships_sunk: self.ships.iter().filter(|s| s.is_sunk()).count(),
            total_ships: self.ships.len(),
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {}, ships: {:?} }}", self.size, self.ships)?;
        for row in self.view(true).rows() {
            for cell in row {
                let ch = match cell {
                    CellView::Untouched => '.',
                    CellView::Ship => 'S',
                    CellView::Miss => 'o',
                    CellView::Hit => 'X',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
