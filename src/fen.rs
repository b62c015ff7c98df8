// Only the first two FEN fields carry meaning here: piece placement and active force.
// Castling rights, en passant target and move counters are accepted and ignored, since
// the engine does not implement the rules they describe.

use std::fmt;

use itertools::Itertools;

use crate::board::Board;
use crate::coord::{Col, Coord, NUM_COLS, NUM_ROWS, Row};
use crate::force::Force;
use crate::piece::Piece;
use crate::util::as_single_char;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FenError(pub String);

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "invalid FEN: {}", self.0) }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    pub board: Board,
    pub active_force: Force,
}

fn force_to_fen(force: Force) -> char {
    match force {
        Force::White => 'w',
        Force::Black => 'b',
    }
}
fn force_from_fen(s: &str) -> Result<Force, FenError> {
    match as_single_char(s) {
        Some('w') => Ok(Force::White),
        Some('b') => Ok(Force::Black),
        _ => Err(FenError(format!("invalid active force: {s}"))),
    }
}

pub fn position_to_fen(board: &Board, active_force: Force) -> String {
    let grid_notation = Row::all()
        .rev()
        .map(|row| {
            let mut row_notation = String::new();
            let mut empty_col_count: u8 = 0;
            for col in Col::all() {
                if let Some(piece) = board.get(Coord::new(row, col)) {
                    if empty_col_count > 0 {
                        row_notation.push_str(&empty_col_count.to_string());
                        empty_col_count = 0;
                    }
                    row_notation.push(piece.to_fen_char());
                } else {
                    empty_col_count += 1;
                }
            }
            if empty_col_count > 0 {
                row_notation.push_str(&empty_col_count.to_string());
            }
            row_notation
        })
        .join("/");
    format!("{} {}", grid_notation, force_to_fen(active_force))
}

pub fn parse_position(fen: &str) -> Result<Position, FenError> {
    let mut fields = fen.split_whitespace();
    let grid_notation = fields.next().ok_or_else(|| FenError("empty string".to_owned()))?;
    let active_force = match fields.next() {
        None => Force::White,
        Some(s) => force_from_fen(s)?,
    };

    let rows = grid_notation.split('/').collect_vec();
    if rows.len() != NUM_ROWS as usize {
        return Err(FenError(format!("has {} rows, expected {}", rows.len(), NUM_ROWS)));
    }
    let mut board = Board::new();
    // FEN lists the top row (rank 8) first.
    for (row_notation, row) in rows.iter().zip(Row::all().rev()) {
        let mut col: u32 = 0;
        for ch in row_notation.chars() {
            if let Some(n) = ch.to_digit(10) {
                col += n;
            } else if let Some(piece) = Piece::from_fen_char(ch) {
                let col_idx = Col::try_from_zero_based(col as i32).ok_or_else(|| {
                    FenError(format!("row {} is too long", row.to_algebraic()))
                })?;
                // Cannot fail: the board is fresh and `col` only grows.
                let _ = board.place(Coord::new(row, col_idx), piece);
                col += 1;
            } else {
                return Err(FenError(format!("unknown piece: {ch}")));
            }
        }
        if col != NUM_COLS as u32 {
            return Err(FenError(format!(
                "row {} has {} columns, expected {}",
                row.to_algebraic(),
                col,
                NUM_COLS
            )));
        }
    }
    Ok(Position { board, active_force })
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::piece::PieceKind;

    #[test]
    fn empty_board() {
        let pos = parse_position("8/8/8/8/8/8/8/8 w").unwrap();
        assert!(pos.board.is_empty());
        assert_eq!(pos.active_force, Force::White);
    }

    #[test]
    fn bottom_left_queen() {
        let pos = parse_position("8/8/8/8/8/8/8/Q7 w").unwrap();
        assert_eq!(pos.board.get(Coord::A1), Some(Piece::new(PieceKind::Queen, Force::White)));
        assert_eq!(pos.board.pieces().count(), 1);
    }

    #[test]
    fn active_force() {
        assert_eq!(parse_position("8/8/8/8/8/8/8/8").unwrap().active_force, Force::White);
        assert_eq!(parse_position("8/8/8/8/8/8/8/8 b").unwrap().active_force, Force::Black);
        assert_eq!(
            parse_position("8/8/8/8/8/8/8/8 b KQkq - 0 1").unwrap().active_force,
            Force::Black
        );
        assert!(parse_position("8/8/8/8/8/8/8/8 x").is_err());
    }

    #[test]
    fn starting_position_round_trip() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b";
        let pos = parse_position(&format!("{fen} KQkq e3 0 1")).unwrap();
        assert_eq!(pos.board.get(Coord::E4), Some(Piece::new(PieceKind::Pawn, Force::White)));
        assert_eq!(pos.board.get(Coord::E8), Some(Piece::new(PieceKind::King, Force::Black)));
        assert_eq!(pos.board.get(Coord::E2), None);
        assert_eq!(position_to_fen(&pos.board, pos.active_force), fen);
    }

    #[test]
    fn malformed() {
        assert!(parse_position("").is_err());
        assert!(parse_position("8/8/8/8/8/8/8 w").is_err());
        assert!(parse_position("8/8/8/8/8/8/8/8/8 w").is_err());
        assert!(parse_position("8/8/8/8/8/8/8/7 w").is_err());
        assert!(parse_position("8/8/8/8/8/8/8/Q8 w").is_err());
        assert!(parse_position("8/8/8/8/8/8/8/X7 w").is_err());
    }
}
