//! Players, board points and moves shared by every ruleset.

use std::fmt;

use crate::constants::{DIAGONAL, DIRECTIONS, ORTHOGONAL};
use crate::coords::format_point;

/// One of the two sides. Black always moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The opposing side.
    pub fn other(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Single-character board symbol.
    pub fn symbol(self) -> char {
        match self {
            Player::Black => 'X',
            Player::White => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

/// A grid intersection, 1-based. Row 1 is the bottom row, column 1 the left one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step once along a `(row, col)` direction vector.
    ///
    /// Returns `None` if the step would leave the non-negative quadrant; callers
    /// still have to check the result against the board bounds.
    pub fn next_in_line(self, (dr, dc): (isize, isize)) -> Option<Point> {
        Some(Point {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// The 4 orthogonal neighbors (N, E, S, W).
    pub fn neighbors(self) -> impl Iterator<Item = Point> {
        ORTHOGONAL.into_iter().filter_map(move |d| self.next_in_line(d))
    }

    /// The 4 diagonal neighbors (NE, SE, SW, NW).
    pub fn diagonal_neighbors(self) -> impl Iterator<Item = Point> {
        DIAGONAL.into_iter().filter_map(move |d| self.next_in_line(d))
    }

    /// All 8 neighbors, orthogonal first.
    pub fn all_neighbors(self) -> impl Iterator<Item = Point> {
        DIRECTIONS.into_iter().filter_map(move |d| self.next_in_line(d))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_point(*self))
    }
}

/// An action a player can take on their turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Place a stone or disk on the given point.
    Play(Point),
    /// Skip the turn.
    Pass,
    /// Concede the game.
    Resign,
}

impl Move {
    pub fn play(point: Point) -> Self {
        Move::Play(point)
    }

    pub fn pass_turn() -> Self {
        Move::Pass
    }

    pub fn resign() -> Self {
        Move::Resign
    }

    pub fn is_play(&self) -> bool {
        matches!(self, Move::Play(_))
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn is_resign(&self) -> bool {
        matches!(self, Move::Resign)
    }

    /// The placed point, if this is a play.
    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Play(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(p) => write!(f, "{p}"),
            Move::Pass => write!(f, "pass"),
            Move::Resign => write!(f, "resign"),
        }
    }
}
