//! Agent-versus-agent games.

use anyhow::{Context, Result};

use crate::agent::Agent;
use crate::game::{GameState, Ruleset};
use crate::scoring::GameResult;
use crate::types::{Move, Player};

/// Everything that happened in one finished (or cut-off) game.
pub struct GameRecord<R> {
    pub moves: Vec<Move>,
    pub final_state: GameState<R>,
    /// Board count at the end. Also filled in when the game was cut off.
    pub result: GameResult,
    /// False if the move limit was reached before the game ended.
    pub finished: bool,
}

impl<R: Ruleset> GameRecord<R> {
    /// Winner by resignation or by count.
    pub fn winner(&self) -> Option<Player> {
        if self.final_state.is_over() {
            self.final_state.winner()
        } else {
            self.result.winner()
        }
    }
}

/// Play `start` out between two agents.
///
/// Stops when the game is over or after `max_moves` moves.
pub fn play_game<'a, R: Ruleset>(
    start: GameState<R>,
    black: &'a mut dyn Agent<R>,
    white: &'a mut dyn Agent<R>,
    max_moves: usize,
) -> Result<GameRecord<R>> {
    let mut state = start;
    let mut moves = Vec::new();

    while !state.is_over() && moves.len() < max_moves {
        let player = state.next_player();
        let agent = match player {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };
        let mv = agent.select_move(&state);
        state = state
            .apply_move(mv)
            .with_context(|| format!("{player} chose {mv} at move {}", state.move_number() + 1))?;
        log::debug!("move {}: {player} {mv}", state.move_number());
        moves.push(mv);
    }

    let finished = state.is_over();
    if !finished {
        log::warn!("{} game cut off after {max_moves} moves", R::NAME);
    }
    let result = state.board().tally(state.komi());
    log::info!(
        "{} game over after {} moves: {}",
        R::NAME,
        moves.len(),
        if state.last_move() == Some(Move::Resign) {
            format!("{} resigned", state.next_player().other())
        } else {
            result.to_string()
        }
    );

    Ok(GameRecord {
        moves,
        final_state: state,
        result,
        finished,
    })
}
