//! Text coordinates and plain-text board rendering.
//!
//! Coordinates follow the usual Go convention: a column letter from
//! `A`..`Z` skipping `I`, then the row number counted from the bottom
//! (e.g. `"D4"`).

use std::fmt;

use thiserror::Error;

use crate::constants::COLS;
use crate::types::{Move, Player, Point};

/// Failure to parse a coordinate or move string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCoordError {
    #[error("empty coordinate")]
    Empty,
    #[error("invalid column letter '{0}'")]
    BadColumn(char),
    #[error("invalid row in '{0}'")]
    BadRow(String),
}

/// Parse a coordinate string such as `"D4"` (case-insensitive).
pub fn parse_point(s: &str) -> Result<Point, ParseCoordError> {
    let s = s.trim();
    let mut chars = s.chars();
    let letter = chars.next().ok_or(ParseCoordError::Empty)?;
    let upper = letter.to_ascii_uppercase();
    let col = COLS
        .find(upper)
        .map(|i| i + 1)
        .ok_or(ParseCoordError::BadColumn(letter))?;

    let digits = chars.as_str();
    let row = match digits.parse::<usize>() {
        Ok(row) if row > 0 => row,
        _ => return Err(ParseCoordError::BadRow(s.to_string())),
    };
    Ok(Point::new(row, col))
}

/// Format a point as a coordinate string such as `"D4"`.
///
/// Columns beyond the letter range are rendered as `?`.
pub fn format_point(p: Point) -> String {
    let letter = p
        .col
        .checked_sub(1)
        .and_then(|i| COLS.chars().nth(i))
        .unwrap_or('?');
    format!("{letter}{}", p.row)
}

/// Parse a move: `pass`, `resign`, or a coordinate.
pub fn parse_move(s: &str) -> Result<Move, ParseCoordError> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("pass") {
        return Ok(Move::Pass);
    }
    if s.eq_ignore_ascii_case("resign") {
        return Ok(Move::Resign);
    }
    parse_point(s).map(Move::Play)
}

/// Write a grid with row numbers on the left and column letters below.
///
/// The top row is printed first so the output reads like a diagram.
pub fn write_grid(
    f: &mut fmt::Formatter<'_>,
    num_rows: usize,
    num_cols: usize,
    get: impl Fn(Point) -> Option<Player>,
) -> fmt::Result {
    for row in (1..=num_rows).rev() {
        write!(f, "{row:>2} ")?;
        for col in 1..=num_cols {
            let ch = get(Point::new(row, col)).map_or('.', Player::symbol);
            write!(f, "{ch} ")?;
        }
        writeln!(f)?;
    }
    write!(f, "   ")?;
    for letter in COLS.chars().take(num_cols) {
        write!(f, "{letter} ")?;
    }
    writeln!(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("A1"), Ok(Point::new(1, 1)));
        assert_eq!(parse_point("d4"), Ok(Point::new(4, 4)));
        assert_eq!(parse_point("T19"), Ok(Point::new(19, 19)));
    }

    #[test]
    fn test_parse_point_skips_i() {
        let h = parse_point("H5").unwrap();
        let j = parse_point("J5").unwrap();
        assert_eq!(j.col - h.col, 1, "J should follow H directly");
        assert_eq!(parse_point("I5"), Err(ParseCoordError::BadColumn('I')));
    }

    #[test]
    fn test_parse_point_errors() {
        assert_eq!(parse_point(""), Err(ParseCoordError::Empty));
        assert!(matches!(parse_point("A"), Err(ParseCoordError::BadRow(_))));
        assert!(matches!(parse_point("A0"), Err(ParseCoordError::BadRow(_))));
        assert!(matches!(parse_point("Ax"), Err(ParseCoordError::BadRow(_))));
    }

    #[test]
    fn test_format_point_roundtrip() {
        for coord in ["A1", "D4", "H8", "J9", "Z25"] {
            let p = parse_point(coord).unwrap();
            assert_eq!(format_point(p), coord);
        }
        assert_eq!(format_point(Point::new(3, 0)), "?3");
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("PASS"), Ok(Move::Pass));
        assert_eq!(parse_move("Resign"), Ok(Move::Resign));
        assert_eq!(parse_move("C3"), Ok(Move::Play(Point::new(3, 3))));
    }
}
