//! Coordinate notation for text front ends.
//!
//! Accepts a zero-based `"x,y"` pair or a column letter followed by a row
//! number (`"A5"`, `"j 0"`), case-insensitive. Bounds are checked by the
//! board, not here.

use alloc::string::String;
use core::fmt;

use crate::common::Coord;
use crate::game::SpecialAttack;

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Attack(Coord),
    Special(SpecialAttack, Coord),
}

/// Why a line could not be understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotationError {
    Empty,
    Malformed,
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::Empty => write!(f, "No input"),
            NotationError::Malformed => write!(f, "Invalid coordinate format. Try 'x,y' or 'A5'"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NotationError {}

fn parse_number(s: &str) -> Option<usize> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse `"x,y"` or `"A5"` into `(x, y)`.
pub fn parse_coordinate(input: &str) -> Result<Coord, NotationError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(NotationError::Empty);
    }

    if let Some((x, y)) = raw.split_once(',') {
        return match (parse_number(x), parse_number(y)) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(NotationError::Malformed),
        };
    }

    let mut chars = raw.chars();
    let col = chars.next().ok_or(NotationError::Empty)?.to_ascii_uppercase();
    if !('A'..='J').contains(&col) {
        return Err(NotationError::Malformed);
    }
    let row = parse_number(chars.as_str()).ok_or(NotationError::Malformed)?;
    if row > 10 {
        return Err(NotationError::Malformed);
    }
    Ok(((col as u8 - b'A') as usize, row))
}

/// Parse a full input line: `q` to quit, a coordinate, or
/// `focus <coord>` / `wide <coord>` for the special weapons.
pub fn parse_command(input: &str) -> Result<Command, NotationError> {
    let line = input.trim();
    if line.eq_ignore_ascii_case("q") {
        return Ok(Command::Quit);
    }
    if let Some((word, rest)) = line.split_once(char::is_whitespace) {
        let weapon = if word.eq_ignore_ascii_case("focus") {
            Some(SpecialAttack::FocusedStrike)
        } else if word.eq_ignore_ascii_case("wide") {
            Some(SpecialAttack::WideStrike)
        } else {
            None
        };
        if let Some(weapon) = weapon {
            return Ok(Command::Special(weapon, parse_coordinate(rest)?));
        }
    }
    parse_coordinate(line).map(Command::Attack)
}

/// Letter-and-row form of a coordinate, e.g. `(0, 5)` → `"A5"`. Columns past
/// `Z` fall back to `"x,y"`.
pub fn format_coordinate(coord: Coord) -> String {
    let (x, y) = coord;
    if x < 26 {
        alloc::format!("{}{}", (b'A' + x as u8) as char, y)
    } else {
        alloc::format!("{},{}", x, y)
    }
}
