//! Ship definitions, placement records and hit tracking.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, Coord};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends along +x from the origin.
    Horizontal,
    /// Extends along +y from the origin.
    Vertical,
}

impl Orientation {
    /// Cell `i` steps away from `origin` along this orientation, `None` on overflow.
    pub fn step(self, origin: Coord, i: usize) -> Option<Coord> {
        match self {
            Orientation::Horizontal => Some((origin.0.checked_add(i)?, origin.1)),
            Orientation::Vertical => Some((origin.0, origin.1.checked_add(i)?)),
        }
    }
}

/// Which navy a side commands. Only affects ship names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Usa,
    Japan,
}

impl Team {
    /// The navy on the other side of the battle.
    pub fn opponent(self) -> Team {
        match self {
            Team::Usa => Team::Japan,
            Team::Japan => Team::Usa,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Team::Usa => "USA",
            Team::Japan => "Japan",
        }
    }
}

/// Fleet entry: stable key, class and per-team names, and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipDef {
    key: &'static str,
    class_name: &'static str,
    usa_name: &'static str,
    japan_name: &'static str,
    length: usize,
}

impl ShipDef {
    pub const fn new(
        key: &'static str,
        class_name: &'static str,
        usa_name: &'static str,
        japan_name: &'static str,
        length: usize,
    ) -> Self {
        Self {
            key,
            class_name,
            usa_name,
            japan_name,
            length,
        }
    }

    /// Key used by front ends to match a ship to its artwork.
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Name of this hull when fielded by `team`.
    pub fn name(&self, team: Team) -> &'static str {
        match team {
            Team::Usa => self.usa_name,
            Team::Japan => self.japan_name,
        }
    }

    pub const fn length(&self) -> usize {
        self.length
    }
}

/// Where a ship sits on a board. Written once by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    origin: Coord,
    orientation: Orientation,
    cells: Vec<Coord>,
}

impl Placement {
    pub(crate) fn new(origin: Coord, orientation: Orientation, cells: Vec<Coord>) -> Self {
        Self {
            origin,
            orientation,
            cells,
        }
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupied cells, ordered from the origin outwards.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }
}

/// A ship with its hit counter and, once placed, its placement.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    length: usize,
    hits: usize,
    placement: Option<Placement>,
    label: Option<(ShipDef, Team)>,
}

impl Ship {
    /// Create an unplaced ship. Fails when `length` is zero.
    pub fn new(length: usize) -> Result<Self, BoardError> {
        if length == 0 {
            return Err(BoardError::InvalidArgument("ship length must be positive"));
        }
        Ok(Self {
            length,
            hits: 0,
            placement: None,
            label: None,
        })
    }

    /// Create an unplaced ship from a fleet entry, named for `team`.
    pub fn from_def(def: ShipDef, team: Team) -> Result<Self, BoardError> {
        let mut ship = Ship::new(def.length())?;
        ship.label = Some((def, team));
        Ok(ship)
    }

    /// Record one more hit. The board calls this at most once per cell.
    pub fn register_hit(&mut self) {
        if self.hits < self.length {
            self.hits += 1;
        }
    }

    pub fn is_sunk(&self) -> bool {
        self.hits >= self.length
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn def(&self) -> Option<&ShipDef> {
        self.label.as_ref().map(|(def, _)| def)
    }

    /// Display name, when built from a fleet entry.
    pub fn name(&self) -> Option<&'static str> {
        self.label.map(|(def, team)| def.name(team))
    }

    pub(crate) fn set_placement(&mut self, placement: Placement) {
        debug_assert!(self.placement.is_none());
        self.placement = Some(placement);
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: {:?}, length: {}, hits: {}, placement: {:?} }}",
            self.name(),
            self.length,
            self.hits,
            self.placement,
        )
    }
}
