//! Go board with stone strings and liberty bookkeeping.
//!
//! Every stone on the board maps to the [`GoString`] it belongs to. Strings are
//! immutable values shared through `Rc`: placing a stone builds new strings and
//! re-points the grid at them, so cloning a [`Board`] only copies the map of
//! pointers. After every placement each string's liberties are exactly the
//! empty orthogonal neighbors of its stones, and no string has zero liberties.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::constants::{DEFAULT_GO_SIZE, GO_KOMI};
use crate::coords::write_grid;
use crate::error::IllegalMoveError;
use crate::game::Ruleset;
use crate::scoring::{GameResult, area_score};
use crate::types::{Player, Point};

/// A maximal set of connected stones of one color, with its liberties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoString {
    color: Player,
    stones: HashSet<Point>,
    liberties: HashSet<Point>,
}

impl GoString {
    pub fn new(
        color: Player,
        stones: impl IntoIterator<Item = Point>,
        liberties: impl IntoIterator<Item = Point>,
    ) -> Self {
        Self {
            color,
            stones: stones.into_iter().collect(),
            liberties: liberties.into_iter().collect(),
        }
    }

    pub fn color(&self) -> Player {
        self.color
    }

    pub fn stones(&self) -> &HashSet<Point> {
        &self.stones
    }

    pub fn liberties(&self) -> &HashSet<Point> {
        &self.liberties
    }

    pub fn num_stones(&self) -> usize {
        self.stones.len()
    }

    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    /// A copy of this string with `point` no longer counted as a liberty.
    pub fn without_liberty(&self, point: Point) -> Self {
        let mut s = self.clone();
        s.liberties.remove(&point);
        s
    }

    /// A copy of this string with `point` added as a liberty.
    pub fn with_liberty(&self, point: Point) -> Self {
        let mut s = self.clone();
        s.liberties.insert(point);
        s
    }

    /// Join two strings of the same color.
    ///
    /// The result's liberties are the union of both, minus any point that is
    /// now a stone of the combined string.
    pub fn merged_with(&self, other: &GoString) -> Self {
        debug_assert_eq!(self.color, other.color);
        let stones: HashSet<Point> = self.stones.union(&other.stones).copied().collect();
        let liberties = self
            .liberties
            .union(&other.liberties)
            .filter(|p| !stones.contains(p))
            .copied()
            .collect();
        Self {
            color: self.color,
            stones,
            liberties,
        }
    }
}

/// A Go board of `num_rows` x `num_cols` intersections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    num_rows: usize,
    num_cols: usize,
    grid: HashMap<Point, Rc<GoString>>,
}

impl Board {
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            grid: HashMap::new(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn is_on_grid(&self, point: Point) -> bool {
        (1..=self.num_rows).contains(&point.row) && (1..=self.num_cols).contains(&point.col)
    }

    /// Color of the stone at `point`, if any.
    pub fn get(&self, point: Point) -> Option<Player> {
        self.grid.get(&point).map(|s| s.color)
    }

    /// The whole string the stone at `point` belongs to.
    pub fn get_go_string(&self, point: Point) -> Option<&GoString> {
        self.grid.get(&point).map(Rc::as_ref)
    }

    /// Number of stones on the board.
    pub fn num_stones(&self) -> usize {
        self.grid.len()
    }

    fn check_empty(&self, point: Point) -> Result<(), IllegalMoveError> {
        if !self.is_on_grid(point) {
            return Err(IllegalMoveError::OffBoard(point));
        }
        if self.grid.contains_key(&point) {
            return Err(IllegalMoveError::Occupied(point));
        }
        Ok(())
    }

    fn on_grid_neighbors(&self, point: Point) -> impl Iterator<Item = Point> + '_ {
        point.neighbors().filter(|&n| self.is_on_grid(n))
    }

    /// Whether `player` placing at the empty `point` would leave the new string
    /// without liberties. A move that captures something is never self-capture.
    pub fn would_self_capture(&self, player: Player, point: Point) -> bool {
        !self
            .on_grid_neighbors(point)
            .any(|n| match self.grid.get(&n) {
                None => true,
                Some(s) if s.color == player => s.num_liberties() > 1,
                // The enemy string's last liberty must be `point` itself
                Some(s) => s.num_liberties() == 1,
            })
    }

    /// Whether `player` placing at `point` would capture at least one stone.
    pub fn would_capture(&self, player: Player, point: Point) -> bool {
        if self.check_empty(point).is_err() {
            return false;
        }
        self.on_grid_neighbors(point).any(|n| {
            self.grid
                .get(&n)
                .is_some_and(|s| s.color != player && s.num_liberties() == 1)
        })
    }

    /// Place a stone and resolve captures.
    ///
    /// Returns the number of opposing stones removed. The board is unchanged
    /// when an error is returned.
    pub fn place_stone(&mut self, player: Player, point: Point) -> Result<usize, IllegalMoveError> {
        self.check_empty(point)?;
        if self.would_self_capture(player, point) {
            return Err(IllegalMoveError::SelfCapture(point));
        }

        let mut adjacent_same: Vec<Rc<GoString>> = Vec::new();
        let mut adjacent_opposite: Vec<Rc<GoString>> = Vec::new();
        let mut liberties = Vec::new();
        for neighbor in self.on_grid_neighbors(point) {
            match self.grid.get(&neighbor) {
                None => liberties.push(neighbor),
                Some(s) if s.color == player => push_unique(&mut adjacent_same, s),
                Some(s) => push_unique(&mut adjacent_opposite, s),
            }
        }

        let new_string = adjacent_same
            .iter()
            .fold(GoString::new(player, [point], liberties), |acc, s| {
                acc.merged_with(s)
            });
        self.replace_string(Rc::new(new_string));

        let mut captured = 0;
        for other in &adjacent_opposite {
            let updated = other.without_liberty(point);
            if updated.num_liberties() == 0 {
                captured += self.remove_string(&updated);
            } else {
                self.replace_string(Rc::new(updated));
            }
        }
        Ok(captured)
    }

    /// Point every stone of `string` at the new value.
    fn replace_string(&mut self, string: Rc<GoString>) {
        for &p in &string.stones {
            self.grid.insert(p, Rc::clone(&string));
        }
    }

    /// Take a string off the board, giving its points back as liberties.
    fn remove_string(&mut self, string: &GoString) -> usize {
        for &p in &string.stones {
            for n in p.neighbors() {
                // Same-colored neighbors belong to `string` and are going away too
                let Some(neighbor) = self.grid.get(&n).cloned() else {
                    continue;
                };
                if neighbor.color != string.color {
                    self.replace_string(Rc::new(neighbor.with_liberty(p)));
                }
            }
            self.grid.remove(&p);
        }
        string.num_stones()
    }

    /// Whether `point` is an eye of `color`: empty, every orthogonal neighbor
    /// is `color`, and enough diagonal corners are controlled.
    ///
    /// In the middle of the board at least three of the four corners must be
    /// friendly; on an edge or in a corner, every on-board corner must be.
    pub fn is_point_an_eye(&self, point: Point, color: Player) -> bool {
        if self.grid.contains_key(&point) {
            return false;
        }
        if self
            .on_grid_neighbors(point)
            .any(|n| self.get(n) != Some(color))
        {
            return false;
        }

        let mut friendly_corners = 0;
        let mut off_board_corners = 0;
        for corner in point.diagonal_neighbors() {
            if self.is_on_grid(corner) {
                if self.get(corner) == Some(color) {
                    friendly_corners += 1;
                }
            } else {
                off_board_corners += 1;
            }
        }
        if off_board_corners > 0 {
            off_board_corners + friendly_corners == 4
        } else {
            friendly_corners >= 3
        }
    }
}

fn push_unique(strings: &mut Vec<Rc<GoString>>, s: &Rc<GoString>) {
    if !strings.iter().any(|x| Rc::ptr_eq(x, s)) {
        strings.push(Rc::clone(s));
    }
}

impl Ruleset for Board {
    const NAME: &'static str = "go";
    const DEFAULT_SIZE: usize = DEFAULT_GO_SIZE;
    const DEFAULT_KOMI: f32 = GO_KOMI;
    const CHECKS_REPETITION: bool = true;

    fn new(num_rows: usize, num_cols: usize) -> Self {
        Board::new(num_rows, num_cols)
    }

    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn get(&self, point: Point) -> Option<Player> {
        Board::get(self, point)
    }

    fn place(&mut self, player: Player, point: Point) -> Result<usize, IllegalMoveError> {
        self.place_stone(player, point)
    }

    fn would_capture(&self, player: Player, point: Point) -> bool {
        Board::would_capture(self, player, point)
    }

    /// Never fill your own eye.
    fn is_sensible(&self, player: Player, point: Point) -> bool {
        !self.is_point_an_eye(point, player)
    }

    fn tally(&self, komi: f32) -> GameResult {
        area_score(self, komi)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.num_rows, self.num_cols, |p| self.get(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(row: usize, col: usize) -> Point {
        Point::new(row, col)
    }

    #[test]
    fn test_single_stone_liberties() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, pt(5, 5)).unwrap();
        let s = board.get_go_string(pt(5, 5)).unwrap();
        assert_eq!(s.num_liberties(), 4);
        assert_eq!(s.num_stones(), 1);

        board.place_stone(Player::Black, pt(1, 1)).unwrap();
        assert_eq!(board.get_go_string(pt(1, 1)).unwrap().num_liberties(), 2);
    }

    #[test]
    fn test_merge_strings() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, pt(5, 5)).unwrap();
        board.place_stone(Player::Black, pt(5, 7)).unwrap();
        board.place_stone(Player::Black, pt(5, 6)).unwrap();

        let s = board.get_go_string(pt(5, 5)).unwrap();
        assert_eq!(s.num_stones(), 3);
        assert_eq!(s.num_liberties(), 8);
        assert_eq!(board.get_go_string(pt(5, 7)), Some(s));
    }

    #[test]
    fn test_enemy_loses_liberty() {
        let mut board = Board::new(9, 9);
        board.place_stone(Player::Black, pt(5, 5)).unwrap();
        board.place_stone(Player::White, pt(5, 6)).unwrap();
        assert_eq!(board.get_go_string(pt(5, 5)).unwrap().num_liberties(), 3);
        assert_eq!(board.get_go_string(pt(5, 6)).unwrap().num_liberties(), 3);
    }

    #[test]
    fn test_capture_restores_liberties() {
        let mut board = Board::new(5, 5);
        board.place_stone(Player::Black, pt(1, 2)).unwrap();
        board.place_stone(Player::White, pt(1, 1)).unwrap();
        assert_eq!(board.get_go_string(pt(1, 2)).unwrap().num_liberties(), 2);

        let captured = board.place_stone(Player::Black, pt(2, 1)).unwrap();
        assert_eq!(captured, 1);
        assert_eq!(board.get(pt(1, 1)), None);
        // (1, 1) is a liberty again for both black stones
        assert_eq!(board.get_go_string(pt(1, 2)).unwrap().num_liberties(), 3);
        assert_eq!(board.get_go_string(pt(2, 1)).unwrap().num_liberties(), 3);
    }

    #[test]
    fn test_self_capture_rejected() {
        let mut board = Board::new(5, 5);
        board.place_stone(Player::Black, pt(1, 2)).unwrap();
        board.place_stone(Player::Black, pt(2, 1)).unwrap();
        let before = board.clone();

        assert!(board.would_self_capture(Player::White, pt(1, 1)));
        assert_eq!(
            board.place_stone(Player::White, pt(1, 1)),
            Err(IllegalMoveError::SelfCapture(pt(1, 1)))
        );
        assert_eq!(board, before);

        // Black filling its own point keeps liberties through the string
        assert!(!board.would_self_capture(Player::Black, pt(1, 1)));
    }

    #[test]
    fn test_occupied_and_off_board() {
        let mut board = Board::new(3, 3);
        board.place_stone(Player::Black, pt(2, 2)).unwrap();
        assert_eq!(
            board.place_stone(Player::White, pt(2, 2)),
            Err(IllegalMoveError::Occupied(pt(2, 2)))
        );
        assert_eq!(
            board.place_stone(Player::White, pt(4, 1)),
            Err(IllegalMoveError::OffBoard(pt(4, 1)))
        );
        assert_eq!(
            board.place_stone(Player::White, pt(0, 1)),
            Err(IllegalMoveError::OffBoard(pt(0, 1)))
        );
    }

    #[test]
    fn test_would_capture() {
        let mut board = Board::new(5, 5);
        board.place_stone(Player::White, pt(1, 1)).unwrap();
        board.place_stone(Player::Black, pt(1, 2)).unwrap();
        assert!(board.would_capture(Player::Black, pt(2, 1)));
        assert!(!board.would_capture(Player::White, pt(2, 1)));
        assert!(!board.would_capture(Player::Black, pt(3, 3)));
    }

    #[test]
    fn test_is_point_an_eye() {
        let mut board = Board::new(5, 5);
        // Corner eye at (1, 1)
        board.place_stone(Player::Black, pt(1, 2)).unwrap();
        board.place_stone(Player::Black, pt(2, 1)).unwrap();
        assert!(!board.is_point_an_eye(pt(1, 1), Player::Black));
        board.place_stone(Player::Black, pt(2, 2)).unwrap();
        assert!(board.is_point_an_eye(pt(1, 1), Player::Black));
        assert!(!board.is_point_an_eye(pt(1, 1), Player::White));

        // Center eye at (3, 3) with three friendly corners
        for p in [pt(4, 3), pt(3, 4), pt(2, 3), pt(3, 2), pt(4, 4), pt(2, 4)] {
            board.place_stone(Player::Black, p).unwrap();
        }
        assert!(board.is_point_an_eye(pt(3, 3), Player::Black));
    }

    #[test]
    fn test_board_equality_ignores_history() {
        let mut a = Board::new(5, 5);
        a.place_stone(Player::Black, pt(1, 1)).unwrap();
        a.place_stone(Player::Black, pt(1, 2)).unwrap();

        let mut b = Board::new(5, 5);
        b.place_stone(Player::Black, pt(1, 2)).unwrap();
        b.place_stone(Player::Black, pt(1, 1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(3, 3);
        board.place_stone(Player::Black, pt(3, 1)).unwrap();
        board.place_stone(Player::White, pt(1, 3)).unwrap();
        let text = board.to_string();
        assert_eq!(text, " 3 X . . \n 2 . . . \n 1 . . O \n   A B C \n");
    }
}
