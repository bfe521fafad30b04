//! Go Text Protocol (GTP) front end.
//!
//! GTP is a line-based protocol for driving board-game engines from a GUI or
//! a referee program. This module implements the subset of GTP version 2
//! needed to play a full game under either ruleset. Replies start with `=` on
//! success and `?` on failure, followed by the optional command id.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Resize and clear the board
//! - `clear_board` - Start a new game
//! - `komi <value>`
//! - `play <color> <vertex>` - Play a move for the side to move
//! - `genmove <color>` - Let the random agent pick and play a move
//! - `undo` - Take back the last move
//! - `showboard` - Print the board
//! - `final_score` - Count the current board
//!
//! ## Example
//!
//! ```ignore
//! use goversi::go;
//! use goversi::gtp::GtpEngine;
//! let mut engine = GtpEngine::<go::Board>::new(9, None);
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::agent::{Agent, RandomBot};
use crate::constants::{MAX_SIZE, MIN_SIZE};
use crate::coords::parse_move;
use crate::game::{GameState, Ruleset};
use crate::types::{Move, Player};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// GTP engine state.
pub struct GtpEngine<R> {
    /// Current game state, with the whole game behind it
    state: GameState<R>,
    /// Move generator for `genmove`
    bot: RandomBot,
}

impl<R: Ruleset> GtpEngine<R> {
    /// Create an engine on a square board. A seed makes `genmove` reproducible.
    pub fn new(board_size: usize, seed: Option<u64>) -> Self {
        let bot = match seed {
            Some(seed) => RandomBot::with_seed(seed),
            None => RandomBot::new(),
        };
        Self {
            state: GameState::new_game(board_size),
            bot,
        }
    }

    /// Use a non-default komi.
    pub fn with_komi(mut self, komi: f32) -> Self {
        self.state = self.state.with_komi(komi);
        self
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    /// Run the GTP command loop on stdin and stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the GTP command loop until `quit` or end of input.
    pub fn run_with(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                log::warn!("{command}: {message}");
            }
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_color(arg: &str) -> Option<Player> {
        match arg.to_lowercase().as_str() {
            "b" | "black" => Some(Player::Black),
            "w" | "white" => Some(Player::White),
            _ => None,
        }
    }

    /// Check that `arg` names the side to move.
    fn expect_to_move(&self, arg: &str) -> Result<Player, String> {
        let color = Self::parse_color(arg).ok_or_else(|| "invalid color".to_string())?;
        if color != self.state.next_player() {
            return Err(format!("{} is to move", self.state.next_player()));
        }
        Ok(color)
    }

    fn new_game(&mut self, num_rows: usize, num_cols: usize) {
        let komi = self.state.komi();
        self.state = GameState::new_game_rect(num_rows, num_cols).with_komi(komi);
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if (MIN_SIZE..=MAX_SIZE).contains(&size) => {
                        self.new_game(size, size);
                        (true, String::new())
                    }
                    Ok(size) => (
                        false,
                        format!("unacceptable size {size}, must be {MIN_SIZE} to {MAX_SIZE}"),
                    ),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                let (rows, cols) = (self.state.board().num_rows(), self.state.board().num_cols());
                self.new_game(rows, cols);
                (true, String::new())
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f32>() {
                    Ok(komi) => {
                        self.state = self.state.with_komi(komi);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                if let Err(e) = self.expect_to_move(color) {
                    return (false, e);
                }
                let mv = match parse_move(vertex) {
                    Ok(mv) => mv,
                    Err(e) => return (false, e.to_string()),
                };
                match self.state.apply_move(mv) {
                    Ok(next) => {
                        self.state = next;
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(color) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                if let Err(e) = self.expect_to_move(color) {
                    return (false, e);
                }
                let mv = self.bot.select_move(&self.state);
                match self.state.apply_move(mv) {
                    Ok(next) => {
                        self.state = next;
                        (true, mv.to_string())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "undo" => match self.state.previous() {
                Some(previous) => {
                    // Komi is an engine setting, not part of the position
                    self.state = previous.with_komi(self.state.komi());
                    (true, String::new())
                }
                None => (false, "cannot undo".to_string()),
            },

            "showboard" => (true, format!("\n{}", self.state.board())),

            "final_score" => {
                let result = self.state.board().tally(self.state.komi());
                let score = match self.state.last_move() {
                    Some(Move::Resign) => match self.state.next_player() {
                        Player::Black => "B+R".to_string(),
                        Player::White => "W+R".to_string(),
                    },
                    _ if result.winner().is_none() => "0".to_string(),
                    _ => result.to_string(),
                };
                (true, score)
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use crate::{go, reversi};

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::<go::Board>::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::<go::Board>::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = GtpEngine::<go::Board>::new(9, None);
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "goversi");
    }

    #[test]
    fn test_known_command() {
        let mut engine = GtpEngine::<go::Board>::new(9, None);

        let (success, response) = engine.execute("known_command", &["undo"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["unknown_cmd"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = GtpEngine::<go::Board>::new(9, None);

        let (success, _) = engine.execute("boardsize", &["13"]);
        assert!(success);
        assert_eq!(engine.state().board().num_rows(), 13);

        let (success, _) = engine.execute("boardsize", &["26"]);
        assert!(!success);
        let (success, _) = engine.execute("boardsize", &["x"]);
        assert!(!success);
    }

    #[test]
    fn test_play_undo_and_clear() {
        let mut engine = GtpEngine::<go::Board>::new(9, None);

        let (success, _) = engine.execute("play", &["black", "D4"]);
        assert!(success);
        assert_eq!(
            engine.state().board().get(Point::new(4, 4)),
            Some(Player::Black)
        );

        // Wrong side, occupied point, and bad vertex are rejected
        let (success, _) = engine.execute("play", &["black", "E5"]);
        assert!(!success);
        let (success, _) = engine.execute("play", &["white", "D4"]);
        assert!(!success);
        let (success, _) = engine.execute("play", &["white", "I4"]);
        assert!(!success);

        let (success, _) = engine.execute("undo", &[]);
        assert!(success);
        assert_eq!(engine.state().move_number(), 0);
        let (success, _) = engine.execute("undo", &[]);
        assert!(!success);

        engine.execute("play", &["b", "pass"]);
        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert_eq!(engine.state().move_number(), 0);
    }

    #[test]
    fn test_genmove() {
        let mut engine = GtpEngine::<reversi::Board>::new(8, Some(11));
        let (success, response) = engine.execute("genmove", &["black"]);
        assert!(success);
        let mv = parse_move(&response).unwrap();
        assert!(mv.is_play());
        assert_eq!(engine.state().last_move(), Some(mv));
        assert_eq!(engine.state().next_player(), Player::White);
    }

    #[test]
    fn test_final_score() {
        let mut engine = GtpEngine::<go::Board>::new(3, None).with_komi(0.5);
        engine.execute("play", &["black", "B2"]);
        let (success, score) = engine.execute("final_score", &[]);
        assert!(success);
        assert_eq!(score, "B+8.5");

        engine.execute("play", &["white", "resign"]);
        let (_, score) = engine.execute("final_score", &[]);
        assert_eq!(score, "B+R");
    }

    #[test]
    fn test_komi_survives_undo() {
        let mut engine = GtpEngine::<go::Board>::new(9, None);
        engine.execute("play", &["black", "D4"]);
        let (success, _) = engine.execute("komi", &["0.5"]);
        assert!(success);

        let (success, _) = engine.execute("undo", &[]);
        assert!(success);
        assert_eq!(engine.state().move_number(), 0);
        assert_eq!(engine.state().komi(), 0.5);

        engine.execute("clear_board", &[]);
        assert_eq!(engine.state().komi(), 0.5);
    }

    #[test]
    fn test_run_with_ids() {
        let mut engine = GtpEngine::<go::Board>::new(9, None);
        let input = b"1 name\n# comment\n\n2 play black C3\n3 bogus\nquit\n";
        let mut output = Vec::new();
        engine.run_with(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=1 goversi\n\n=2 \n\n?3 unknown command: bogus\n\n= \n\n"
        );
    }
}
