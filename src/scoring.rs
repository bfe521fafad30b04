//! Game results and Go area scoring.
//!
//! Go uses area scoring (Chinese rules): stones on the board plus empty
//! regions bordered by a single color. Reversi simply counts disks.

use std::collections::HashSet;
use std::fmt;

use crate::go;
use crate::types::{Player, Point};

/// Final points for each side. Komi is added to White.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GameResult {
    pub black: f32,
    pub white: f32,
    pub komi: f32,
}

impl GameResult {
    /// The side with more points, or `None` on a draw.
    pub fn winner(&self) -> Option<Player> {
        let white = self.white + self.komi;
        if self.black > white {
            Some(Player::Black)
        } else if white > self.black {
            Some(Player::White)
        } else {
            None
        }
    }

    pub fn winning_margin(&self) -> f32 {
        (self.black - (self.white + self.komi)).abs()
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(Player::Black) => write!(f, "B+{}", self.winning_margin()),
            Some(Player::White) => write!(f, "W+{}", self.winning_margin()),
            None => write!(f, "Draw"),
        }
    }
}

/// Ownership breakdown of a Go board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Territory {
    pub black_stones: usize,
    pub white_stones: usize,
    pub black_territory: usize,
    pub white_territory: usize,
    /// Empty points bordered by both colors, or by none.
    pub dame: usize,
}

impl Territory {
    /// Classify every point on the board.
    ///
    /// Empty points are flood-filled into regions; a region bordered by only
    /// one color is that color's territory.
    pub fn evaluate(board: &go::Board) -> Self {
        let mut territory = Territory::default();
        let mut visited: HashSet<Point> = HashSet::new();

        for row in 1..=board.num_rows() {
            for col in 1..=board.num_cols() {
                let p = Point::new(row, col);
                match board.get(p) {
                    Some(Player::Black) => territory.black_stones += 1,
                    Some(Player::White) => territory.white_stones += 1,
                    None if visited.contains(&p) => {}
                    None => {
                        let (region, borders) = collect_region(board, p);
                        let size = region.len();
                        visited.extend(region);
                        match borders.as_slice() {
                            [Player::Black] => territory.black_territory += size,
                            [Player::White] => territory.white_territory += size,
                            _ => territory.dame += size,
                        }
                    }
                }
            }
        }
        territory
    }
}

/// Flood-fill the empty region containing `start`, returning its points and
/// the distinct colors touching it.
fn collect_region(board: &go::Board, start: Point) -> (Vec<Point>, Vec<Player>) {
    let mut region = Vec::new();
    let mut borders = Vec::new();
    let mut seen = HashSet::from([start]);
    let mut stack = vec![start];

    while let Some(p) = stack.pop() {
        region.push(p);
        for n in p.neighbors().filter(|&n| board.is_on_grid(n)) {
            match board.get(n) {
                Some(color) => {
                    if !borders.contains(&color) {
                        borders.push(color);
                    }
                }
                None => {
                    if seen.insert(n) {
                        stack.push(n);
                    }
                }
            }
        }
    }
    (region, borders)
}

/// Area score of a Go board.
pub fn area_score(board: &go::Board, komi: f32) -> GameResult {
    let t = Territory::evaluate(board);
    GameResult {
        black: (t.black_stones + t.black_territory) as f32,
        white: (t.white_stones + t.white_territory) as f32,
        komi,
    }
}
