//! Default board dimensions, komi values and limits.
//!
//! Board sizes are chosen at runtime (command line or GTP `boardsize`), so
//! these are defaults and bounds rather than compile-time geometry.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default Go board size (NxN).
pub const DEFAULT_GO_SIZE: usize = 9;

/// Default Reversi board size (NxN). Standard Othello is 8x8.
pub const DEFAULT_REVERSI_SIZE: usize = 8;

/// Smallest accepted board dimension.
pub const MIN_SIZE: usize = 2;

/// Largest accepted board dimension, bounded by the column letters.
pub const MAX_SIZE: usize = COLS.len();

/// Column letters. `I` is skipped to avoid confusion with `J`.
pub const COLS: &str = "ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Maximum game length as a multiple of the board area.
pub const MAX_GAME_LEN_FACTOR: usize = 3;

// =============================================================================
// Scoring
// =============================================================================

/// Komi (compensation points for White) under Go rules.
pub const GO_KOMI: f32 = 7.5;

/// Komi under Reversi rules.
pub const REVERSI_KOMI: f32 = 0.0;

// =============================================================================
// Direction Vectors
// =============================================================================

/// Orthogonal `(row, col)` steps: North, East, South, West.
pub const ORTHOGONAL: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Diagonal `(row, col)` steps: NE, SE, SW, NW.
pub const DIAGONAL: [(isize, isize); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// All 8 `(row, col)` steps, orthogonal first.
pub const DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
];

/// Maximum number of moves for a board of the given dimensions.
pub fn max_game_len(num_rows: usize, num_cols: usize) -> usize {
    num_rows * num_cols * MAX_GAME_LEN_FACTOR
}
