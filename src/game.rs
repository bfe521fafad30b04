//! Rules abstraction and the chain of immutable game states.
//!
//! A [`GameState`] is a cheap handle on one snapshot of the game: the board,
//! who moves next, the move that led here, and a link to the previous
//! snapshot. Applying a move never mutates a state; it returns a new one that
//! points back at the old. Walking those links is how repetition (ko) is
//! detected and how moves are undone.

use std::fmt;
use std::iter;
use std::rc::Rc;

use crate::error::IllegalMoveError;
use crate::scoring::GameResult;
use crate::types::{Move, Player, Point};

/// The board and placement rules of one game variant.
pub trait Ruleset: Clone + PartialEq + fmt::Display {
    /// Short lowercase name, e.g. `"go"`.
    const NAME: &'static str;
    /// Board size used when none is given.
    const DEFAULT_SIZE: usize;
    /// Komi used when none is given.
    const DEFAULT_KOMI: f32;
    /// Whether a play may recreate an earlier position, so that the history
    /// has to be searched for repetitions.
    const CHECKS_REPETITION: bool;

    /// The starting board for the given dimensions.
    fn new(num_rows: usize, num_cols: usize) -> Self;

    fn num_rows(&self) -> usize;

    fn num_cols(&self) -> usize;

    fn get(&self, point: Point) -> Option<Player>;

    /// Place a piece for `player`, applying captures or flips.
    ///
    /// Returns how many opposing pieces were removed or flipped. Must leave the
    /// board untouched on error.
    fn place(&mut self, player: Player, point: Point) -> Result<usize, IllegalMoveError>;

    /// Whether placing at `point` would capture or flip anything.
    fn would_capture(&self, player: Player, point: Point) -> bool;

    /// Whether neither player can ever place again.
    fn is_exhausted(&self) -> bool {
        false
    }

    /// Whether a legal play is worth considering for an automated player.
    fn is_sensible(&self, _player: Player, _point: Point) -> bool {
        true
    }

    /// Count the board.
    fn tally(&self, komi: f32) -> GameResult;

    /// Every point of the board, bottom row first.
    fn points(&self) -> Vec<Point> {
        let cols = self.num_cols();
        (1..=self.num_rows())
            .flat_map(|row| (1..=cols).map(move |col| Point::new(row, col)))
            .collect()
    }
}

#[derive(Clone)]
struct Snapshot<R> {
    board: R,
    next_player: Player,
    previous: Option<GameState<R>>,
    last_move: Option<Move>,
    komi: f32,
    move_number: usize,
}

/// One position in a game, linked to every position before it.
#[derive(Clone)]
pub struct GameState<R>(Rc<Snapshot<R>>);

impl<R: Ruleset> GameState<R> {
    /// A fresh square game with the ruleset's default komi.
    pub fn new_game(board_size: usize) -> Self {
        Self::new_game_rect(board_size, board_size)
    }

    /// A fresh game on a `num_rows` x `num_cols` board. Black moves first.
    pub fn new_game_rect(num_rows: usize, num_cols: usize) -> Self {
        GameState(Rc::new(Snapshot {
            board: R::new(num_rows, num_cols),
            next_player: Player::Black,
            previous: None,
            last_move: None,
            komi: R::DEFAULT_KOMI,
            move_number: 0,
        }))
    }

    /// The same position with a different komi.
    pub fn with_komi(&self, komi: f32) -> Self {
        let mut snapshot = (*self.0).clone();
        snapshot.komi = komi;
        GameState(Rc::new(snapshot))
    }

    pub fn board(&self) -> &R {
        &self.0.board
    }

    pub fn next_player(&self) -> Player {
        self.0.next_player
    }

    pub fn previous(&self) -> Option<&GameState<R>> {
        self.0.previous.as_ref()
    }

    pub fn last_move(&self) -> Option<Move> {
        self.0.last_move
    }

    pub fn komi(&self) -> f32 {
        self.0.komi
    }

    /// Number of moves (including passes) played so far.
    pub fn move_number(&self) -> usize {
        self.0.move_number
    }

    /// What must not repeat: the side to move and the board.
    pub fn situation(&self) -> (Player, &R) {
        (self.next_player(), self.board())
    }

    /// This state followed by every earlier one, most recent first.
    pub fn history(&self) -> impl Iterator<Item = GameState<R>> {
        iter::successors(Some(self.clone()), |s| s.previous().cloned())
    }

    /// Return the state after `mv`, or why it is illegal.
    pub fn apply_move(&self, mv: Move) -> Result<Self, IllegalMoveError> {
        let board = self.next_board(mv)?;
        log::trace!("{} plays {mv}", self.next_player());
        Ok(GameState(Rc::new(Snapshot {
            board,
            next_player: self.next_player().other(),
            previous: Some(self.clone()),
            last_move: Some(mv),
            komi: self.komi(),
            move_number: self.move_number() + 1,
        })))
    }

    fn next_board(&self, mv: Move) -> Result<R, IllegalMoveError> {
        if self.is_over() {
            return Err(IllegalMoveError::GameOver);
        }
        let Move::Play(point) = mv else {
            return Ok(self.board().clone());
        };
        let player = self.next_player();
        let mut next = self.board().clone();
        next.place(player, point)?;
        if R::CHECKS_REPETITION && self.repeats_situation(player.other(), &next) {
            return Err(IllegalMoveError::Ko(point));
        }
        Ok(next)
    }

    /// Whether `(next_player, board)` already occurred earlier in the game.
    fn repeats_situation(&self, next_player: Player, board: &R) -> bool {
        self.history()
            .skip(1)
            .any(|past| past.situation() == (next_player, board))
    }

    /// Whether `player` playing `mv` would leave their own string without
    /// liberties.
    pub fn is_move_self_capture(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        let mut next = self.board().clone();
        matches!(
            next.place(player, point),
            Err(IllegalMoveError::SelfCapture(_))
        )
    }

    /// Whether `player` playing `mv` would recreate an earlier situation.
    pub fn does_move_violate_ko(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        let mut next = self.board().clone();
        if next.place(player, point).is_err() {
            return false;
        }
        self.repeats_situation(player.other(), &next)
    }

    /// Whether the side to move playing `mv` would capture stones (Go) or
    /// flip disks (Reversi).
    pub fn does_move_capture(&self, mv: Move) -> bool {
        mv.point()
            .is_some_and(|p| self.board().would_capture(self.next_player(), p))
    }

    pub fn is_valid_move(&self, mv: Move) -> bool {
        self.next_board(mv).is_ok()
    }

    /// Every legal move: all legal plays, then pass and resign.
    ///
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        let mut moves: Vec<Move> = self
            .board()
            .points()
            .into_iter()
            .map(Move::Play)
            .filter(|&mv| self.is_valid_move(mv))
            .collect();
        moves.push(Move::Pass);
        moves.push(Move::Resign);
        moves
    }

    /// Legal plays the ruleset considers worth making, e.g. no Go move that
    /// fills one's own eye.
    pub fn sensible_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        let board = self.board();
        let player = self.next_player();
        board
            .points()
            .into_iter()
            .filter(|&p| board.get(p).is_none() && board.is_sensible(player, p))
            .map(Move::Play)
            .filter(|&mv| self.is_valid_move(mv))
            .collect()
    }

    /// The game ends on a resignation, two passes in a row, or a board on
    /// which nobody can move.
    pub fn is_over(&self) -> bool {
        match self.last_move() {
            Some(Move::Resign) => true,
            Some(Move::Pass) if self.previous().and_then(|p| p.last_move()) == Some(Move::Pass) => {
                true
            }
            _ => self.board().is_exhausted(),
        }
    }

    /// The counted result, once the game has ended without a resignation.
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_over() || self.last_move() == Some(Move::Resign) {
            return None;
        }
        Some(self.board().tally(self.komi()))
    }

    /// The winner of a finished game; `None` while running or on a draw.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_over() {
            return None;
        }
        if self.last_move() == Some(Move::Resign) {
            return Some(self.next_player());
        }
        self.board().tally(self.komi()).winner()
    }
}

impl<R: Ruleset> fmt::Debug for GameState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("rules", &R::NAME)
            .field("move_number", &self.move_number())
            .field("next_player", &self.next_player())
            .field("last_move", &self.last_move())
            .finish()
    }
}
