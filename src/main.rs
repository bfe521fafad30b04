//! Goversi: Go and Reversi on one minimal engine.
//!
//! ## Usage
//!
//! - `goversi` - Show a demo game
//! - `goversi --rules reversi gtp` - Start a GTP server for GUI integration
//! - `goversi --size 5 selfplay --games 10` - Play random agents against each other
//!
//! Set `RUST_LOG=debug` to see every move.

use anyhow::{Result, ensure};
use clap::{Parser, Subcommand, ValueEnum};

use goversi::agent::RandomBot;
use goversi::constants::{MAX_SIZE, MIN_SIZE, max_game_len};
use goversi::game::{GameState, Ruleset};
use goversi::gtp::GtpEngine;
use goversi::selfplay::play_game;
use goversi::types::Player;
use goversi::{go, reversi};

/// Goversi: a minimal Go and Reversi engine
#[derive(Parser)]
#[command(name = "goversi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which game to play
    #[arg(long, value_enum, default_value_t = Rules::Go)]
    rules: Rules,

    /// Board size (defaults to 9 for Go, 8 for Reversi)
    #[arg(long)]
    size: Option<usize>,

    /// Compensation points for White
    #[arg(long)]
    komi: Option<f32>,

    /// Seed for the random agents
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Rules {
    Go,
    Reversi,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Play random agents against each other and report the results
    Selfplay {
        /// Number of games
        #[arg(long, default_value_t = 1)]
        games: usize,
        /// Stop a game after this many moves (defaults to three times the board area)
        #[arg(long)]
        max_moves: Option<usize>,
    },
    /// Play and print one random game
    Demo,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.rules {
        Rules::Go => run::<go::Board>(&cli),
        Rules::Reversi => run::<reversi::Board>(&cli),
    }
}

fn run<R: Ruleset>(cli: &Cli) -> Result<()> {
    let size = cli.size.unwrap_or(R::DEFAULT_SIZE);
    ensure!(
        (MIN_SIZE..=MAX_SIZE).contains(&size),
        "board size must be between {MIN_SIZE} and {MAX_SIZE}, got {size}"
    );
    let komi = cli.komi.unwrap_or(R::DEFAULT_KOMI);

    match cli.command {
        Some(Commands::Gtp) => {
            let mut engine = GtpEngine::<R>::new(size, cli.seed).with_komi(komi);
            engine.run()?;
        }
        Some(Commands::Selfplay { games, max_moves }) => {
            let max_moves = max_moves.unwrap_or_else(|| max_game_len(size, size));
            run_selfplay::<R>(size, komi, cli.seed, games, max_moves)?;
        }
        Some(Commands::Demo) | None => run_demo::<R>(size, komi, cli.seed)?,
    }
    Ok(())
}

fn bots(seed: Option<u64>) -> (RandomBot, RandomBot) {
    match seed {
        Some(seed) => (
            RandomBot::with_seed(seed),
            RandomBot::with_seed(seed.wrapping_add(1)),
        ),
        None => (RandomBot::new(), RandomBot::new()),
    }
}

fn run_selfplay<R: Ruleset>(
    size: usize,
    komi: f32,
    seed: Option<u64>,
    games: usize,
    max_moves: usize,
) -> Result<()> {
    let (mut black, mut white) = bots(seed);
    let (mut black_wins, mut white_wins, mut draws) = (0, 0, 0);

    for _ in 0..games {
        let start = GameState::<R>::new_game(size).with_komi(komi);
        let record = play_game(start, &mut black, &mut white, max_moves)?;
        match record.winner() {
            Some(Player::Black) => black_wins += 1,
            Some(Player::White) => white_wins += 1,
            None => draws += 1,
        }
    }

    println!(
        "{games} {} games on {size}x{size}: black {black_wins}, white {white_wins}, draws {draws}",
        R::NAME
    );
    Ok(())
}

fn run_demo<R: Ruleset>(size: usize, komi: f32, seed: Option<u64>) -> Result<()> {
    println!("Goversi: {} on a {size}x{size} board\n", R::NAME);

    let start = GameState::<R>::new_game(size).with_komi(komi);
    println!("{}", start.board());

    let (mut black, mut white) = bots(seed);
    let record = play_game(start, &mut black, &mut white, max_game_len(size, size))?;

    println!("After {} moves:", record.moves.len());
    println!("{}", record.final_state.board());
    println!("Result: {}", record.result);
    Ok(())
}
