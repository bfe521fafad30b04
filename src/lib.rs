//! Goversi: a minimal two-ruleset board-game engine.
//!
//! Two games share one engine: Go, where strings of stones without liberties
//! are captured, and Reversi, where a disk must flank and flip a line of
//! opposing disks. Both sit behind the [`game::Ruleset`] trait and are played
//! through the same chain of immutable [`game::GameState`] snapshots.
//!
//! ## Modules
//!
//! - [`constants`] - Default sizes, komi and direction vectors
//! - [`types`] - Players, points and moves
//! - [`coords`] - Text coordinates and board printing
//! - [`error`] - Illegal move reasons
//! - [`go`] - Go board with liberty tracking and captures
//! - [`reversi`] - Reversi board with flipping
//! - [`scoring`] - Game results and Go area scoring
//! - [`game`] - Ruleset trait and game state chain (ko, game end, winner)
//! - [`agent`] - Random agent
//! - [`selfplay`] - Agent-versus-agent games
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use goversi::game::GameState;
//! use goversi::go;
//! use goversi::types::{Move, Player, Point};
//!
//! // Create a new 9x9 Go game
//! let state = GameState::<go::Board>::new_game(9);
//!
//! // Black plays C3
//! let state = state.apply_move(Move::play(Point::new(3, 3))).unwrap();
//! assert_eq!(state.next_player(), Player::White);
//! println!("{}", state.board());
//! ```

pub mod agent;
pub mod constants;
pub mod coords;
pub mod error;
pub mod game;
pub mod go;
pub mod gtp;
pub mod reversi;
pub mod scoring;
pub mod selfplay;
pub mod types;
