//! Common types for the engine: coordinates, attack outcomes and board errors.

use alloc::vec::Vec;
use core::fmt;

/// Zero-based `(x, y)` board coordinate; `x` is the column, `y` the row.
pub type Coord = (usize, usize);

/// Index of a ship in its board's ship list, in placement order.
pub type ShipId = usize;

/// Result of an attack against a board.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Coordinate lies outside the grid. Nothing changed.
    OutOfBounds,
    /// Cell was attacked before. Nothing changed.
    AlreadyAttacked,
    /// Cell was empty water.
    Miss,
    /// Cell held part of a ship that is still afloat.
    Hit { ship: ShipId },
    /// The attack sank a ship; carries every cell the ship occupied.
    Sunk { ship: ShipId, cells: Vec<Coord> },
}

impl AttackOutcome {
    /// `true` for outcomes that left the board untouched.
    pub fn is_rejected(&self) -> bool {
        matches!(self, AttackOutcome::OutOfBounds | AttackOutcome::AlreadyAttacked)
    }

    /// `true` when a ship segment was struck (including the sinking blow).
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackOutcome::Hit { .. } | AttackOutcome::Sunk { .. })
    }

    /// Ship struck by this attack, if any.
    pub fn ship(&self) -> Option<ShipId> {
        match self {
            AttackOutcome::Hit { ship } | AttackOutcome::Sunk { ship, .. } => Some(*ship),
            _ => None,
        }
    }
}

/// Errors returned by ship and board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Zero ship length or zero board size.
    InvalidArgument(&'static str),
    /// Attempted to place a ship that is already placed.
    ShipAlreadyPlaced,
    /// Ship placement would leave the grid.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Random placement exhausted its attempts.
    UnableToPlaceShip,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidArgument(what) => write!(f, "Invalid argument: {}", what),
            BoardError::ShipAlreadyPlaced => write!(f, "Ship is already placed on a board"),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
