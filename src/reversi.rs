//! Reversi (Othello) board.
//!
//! A disk may only be placed where it flanks at least one straight run of
//! opposing disks, in any of the 8 directions, against one of the mover's own
//! disks. Every flanked run is flipped.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::constants::{DEFAULT_REVERSI_SIZE, DIRECTIONS, REVERSI_KOMI};
use crate::coords::write_grid;
use crate::error::IllegalMoveError;
use crate::game::Ruleset;
use crate::scoring::GameResult;
use crate::types::{Player, Point};

/// A maximal set of same-colored disks connected in any of the 8 directions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskString {
    color: Player,
    disks: HashSet<Point>,
}

impl DiskString {
    pub fn new(color: Player, disks: impl IntoIterator<Item = Point>) -> Self {
        Self {
            color,
            disks: disks.into_iter().collect(),
        }
    }

    pub fn color(&self) -> Player {
        self.color
    }

    pub fn disks(&self) -> &HashSet<Point> {
        &self.disks
    }

    pub fn num_disks(&self) -> usize {
        self.disks.len()
    }

    pub fn merged_with(&self, other: &DiskString) -> Self {
        debug_assert_eq!(self.color, other.color);
        Self {
            color: self.color,
            disks: self.disks.union(&other.disks).copied().collect(),
        }
    }
}

/// A Reversi board of `num_rows` x `num_cols` squares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    num_rows: usize,
    num_cols: usize,
    grid: HashMap<Point, Player>,
}

impl Board {
    /// Create a board with the four starting disks in the center.
    ///
    /// White takes the main diagonal and Black the other one. Boards smaller
    /// than 2x2 start empty.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        let mut grid = HashMap::new();
        if num_rows >= 2 && num_cols >= 2 {
            let (r, c) = (num_rows / 2, num_cols / 2);
            grid.insert(Point::new(r, c), Player::White);
            grid.insert(Point::new(r, c + 1), Player::Black);
            grid.insert(Point::new(r + 1, c), Player::Black);
            grid.insert(Point::new(r + 1, c + 1), Player::White);
        }
        Self {
            num_rows,
            num_cols,
            grid,
        }
    }

    /// A board with no disks at all.
    ///
    /// Together with [`Board::set`] this is the position-setup API: it builds
    /// arbitrary positions for analysis and tests without checking any rule.
    pub fn empty(num_rows: usize, num_cols: usize) -> Self {
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

    pub fn get(&self, point: Point) -> Option<Player> {
        self.grid.get(&point).copied()
    }

    /// Put a disk down, or overwrite one, without any rule checks.
    ///
    /// Nothing is flipped. Use [`Board::place_disk`] for actual play.
    pub fn set(&mut self, point: Point, player: Player) {
        self.grid.insert(point, player);
    }

    /// Number of disks of one color.
    pub fn count(&self, player: Player) -> usize {
        self.grid.values().filter(|&&c| c == player).count()
    }

    /// Every disk `player` would flip by placing at `point`.
    ///
    /// Empty if the point is off the board or occupied.
    pub fn flippable(&self, player: Player, point: Point) -> Vec<Point> {
        if !self.is_on_grid(point) || self.grid.contains_key(&point) {
            return Vec::new();
        }
        let mut flips = Vec::new();
        for direction in DIRECTIONS {
            let mut run = Vec::new();
            let mut cursor = point.next_in_line(direction);
            while let Some(p) = cursor {
                match self.get(p) {
                    Some(c) if c == player.other() => {
                        run.push(p);
                        cursor = p.next_in_line(direction);
                    }
                    Some(_) => {
                        flips.append(&mut run);
                        break;
                    }
                    None => break,
                }
            }
        }
        flips
    }

    /// Place a disk and flip every flanked run.
    ///
    /// Returns the number of disks flipped. The board is unchanged when an
    /// error is returned.
    pub fn place_disk(&mut self, player: Player, point: Point) -> Result<usize, IllegalMoveError> {
        if !self.is_on_grid(point) {
            return Err(IllegalMoveError::OffBoard(point));
        }
        if self.grid.contains_key(&point) {
            return Err(IllegalMoveError::Occupied(point));
        }
        let flips = self.flippable(player, point);
        if flips.is_empty() {
            return Err(IllegalMoveError::NoFlips(point));
        }
        self.grid.insert(point, player);
        for &p in &flips {
            self.grid.insert(p, player);
        }
        Ok(flips.len())
    }

    /// All points where `player` may place a disk.
    pub fn legal_plays(&self, player: Player) -> Vec<Point> {
        self.squares()
            .filter(|&p| !self.flippable(player, p).is_empty())
            .collect()
    }

    pub fn has_legal_play(&self, player: Player) -> bool {
        self.squares().any(|p| !self.flippable(player, p).is_empty())
    }

    fn squares(&self) -> impl Iterator<Item = Point> + '_ {
        (1..=self.num_rows)
            .flat_map(move |row| (1..=self.num_cols).map(move |col| Point::new(row, col)))
    }

    /// The disk string containing `point`, if it holds a disk.
    pub fn disk_string(&self, point: Point) -> Option<DiskString> {
        let color = self.get(point)?;
        let mut disks = HashSet::from([point]);
        let mut stack = vec![point];
        while let Some(p) = stack.pop() {
            for n in p.all_neighbors() {
                if self.get(n) == Some(color) && disks.insert(n) {
                    stack.push(n);
                }
            }
        }
        Some(DiskString { color, disks })
    }

    /// Every disk string on the board, each listed once.
    pub fn disk_strings(&self) -> Vec<DiskString> {
        let mut seen: HashSet<Point> = HashSet::new();
        let mut strings = Vec::new();
        for p in self.squares() {
            if seen.contains(&p) {
                continue;
            }
            if let Some(s) = self.disk_string(p) {
                seen.extend(s.disks.iter().copied());
                strings.push(s);
            }
        }
        strings
    }
}

impl Ruleset for Board {
    const NAME: &'static str = "reversi";
    const DEFAULT_SIZE: usize = DEFAULT_REVERSI_SIZE;
    const DEFAULT_KOMI: f32 = REVERSI_KOMI;
    // The disk count grows with every play, so a position can never repeat
    const CHECKS_REPETITION: bool = false;

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
        self.place_disk(player, point)
    }

    fn would_capture(&self, player: Player, point: Point) -> bool {
        !self.flippable(player, point).is_empty()
    }

    fn is_exhausted(&self) -> bool {
        !self.has_legal_play(Player::Black) && !self.has_legal_play(Player::White)
    }

    fn tally(&self, komi: f32) -> GameResult {
        GameResult {
            black: self.count(Player::Black) as f32,
            white: self.count(Player::White) as f32,
            komi,
        }
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
    fn test_starting_position() {
        let board = Board::new(8, 8);
        assert_eq!(board.get(pt(4, 4)), Some(Player::White));
        assert_eq!(board.get(pt(4, 5)), Some(Player::Black));
        assert_eq!(board.get(pt(5, 4)), Some(Player::Black));
        assert_eq!(board.get(pt(5, 5)), Some(Player::White));
        assert_eq!(board.count(Player::Black), 2);
        assert_eq!(board.count(Player::White), 2);
    }

    #[test]
    fn test_opening_plays() {
        let board = Board::new(8, 8);
        let mut plays = board.legal_plays(Player::Black);
        plays.sort();
        assert_eq!(plays, vec![pt(3, 4), pt(4, 3), pt(5, 6), pt(6, 5)]);
    }

    #[test]
    fn test_place_flips_run() {
        let mut board = Board::new(8, 8);
        assert_eq!(board.place_disk(Player::Black, pt(4, 3)), Ok(1));
        assert_eq!(board.get(pt(4, 4)), Some(Player::Black));
        assert_eq!(board.count(Player::Black), 4);
        assert_eq!(board.count(Player::White), 1);
    }

    #[test]
    fn test_flips_multiple_directions() {
        // 3 . O X
        // 2 O O .
        // 1 X . X    Black at (3, 1) flanks three runs of one disk each
        let mut board = Board::empty(3, 3);
        board.set(pt(3, 2), Player::White);
        board.set(pt(3, 3), Player::Black);
        board.set(pt(2, 1), Player::White);
        board.set(pt(2, 2), Player::White);
        board.set(pt(1, 1), Player::Black);
        board.set(pt(1, 3), Player::Black);

        let mut flips = board.flippable(Player::Black, pt(3, 1));
        flips.sort();
        assert_eq!(flips, vec![pt(2, 1), pt(2, 2), pt(3, 2)]);
    }

    #[test]
    fn test_unterminated_run_flips_nothing() {
        let mut board = Board::empty(1, 4);
        board.set(pt(1, 2), Player::White);
        board.set(pt(1, 3), Player::White);
        assert!(board.flippable(Player::Black, pt(1, 1)).is_empty());
        assert_eq!(
            board.place_disk(Player::Black, pt(1, 1)),
            Err(IllegalMoveError::NoFlips(pt(1, 1)))
        );
        assert_eq!(board.get(pt(1, 1)), None);
    }

    #[test]
    fn test_occupied_and_off_board() {
        let mut board = Board::new(4, 4);
        assert_eq!(
            board.place_disk(Player::Black, pt(2, 2)),
            Err(IllegalMoveError::Occupied(pt(2, 2)))
        );
        assert_eq!(
            board.place_disk(Player::Black, pt(5, 2)),
            Err(IllegalMoveError::OffBoard(pt(5, 2)))
        );
    }

    #[test]
    fn test_disk_strings_are_eight_connected() {
        let board = Board::new(8, 8);
        let black = board.disk_string(pt(4, 5)).unwrap();
        assert_eq!(black.num_disks(), 2);
        assert!(black.disks().contains(&pt(5, 4)));
        assert_eq!(board.disk_strings().len(), 2);
        assert_eq!(board.disk_string(pt(1, 1)), None);
    }

    #[test]
    fn test_merged_with() {
        let a = DiskString::new(Player::Black, [pt(1, 1)]);
        let b = DiskString::new(Player::Black, [pt(1, 2), pt(1, 1)]);
        assert_eq!(a.merged_with(&b).num_disks(), 2);
    }

    #[test]
    fn test_exhausted() {
        assert!(!Board::new(8, 8).is_exhausted());

        let mut full = Board::empty(2, 2);
        full.set(pt(1, 1), Player::Black);
        full.set(pt(1, 2), Player::Black);
        full.set(pt(2, 1), Player::White);
        full.set(pt(2, 2), Player::White);
        assert!(full.is_exhausted());
        assert_eq!(full.tally(0.0).winner(), None);
    }
}
