use derive_new::new;
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::force::Force;


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, EnumString,
    IntoStaticStr, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub force: Force,
}

impl PieceKind {
    pub fn to_full_algebraic(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    // Case-insensitive: 'q' and 'Q' are both queens.
    pub fn from_algebraic_char(notation: char) -> Option<Self> {
        match notation.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str { self.into() }

    // Points awarded in placement mode for putting a piece of this kind on the board.
    pub fn weight(self) -> i32 {
        match self {
            PieceKind::Queen => 5,
            PieceKind::Rook => 4,
            PieceKind::Bishop | PieceKind::Knight => 3,
            PieceKind::King => 2,
            PieceKind::Pawn => 1,
        }
    }

    // Whether a piece of this kind standing on one square attacks another square
    // `(d_row, d_col)` away, ignoring anything in between. Used by placement puzzles,
    // where pawns are inert.
    pub fn threatens(self, d_row: i8, d_col: i8) -> bool {
        let (d_row, d_col) = (d_row.abs(), d_col.abs());
        if (d_row, d_col) == (0, 0) {
            return false;
        }
        match self {
            PieceKind::King => d_row <= 1 && d_col <= 1,
            PieceKind::Queen => d_row == 0 || d_col == 0 || d_row == d_col,
            PieceKind::Rook => d_row == 0 || d_col == 0,
            PieceKind::Bishop => d_row == d_col,
            PieceKind::Knight => d_row * d_col == 2,
            PieceKind::Pawn => false,
        }
    }
}

impl Piece {
    // Pure shape-of-movement test; occupancy and path obstruction are checked by the board.
    pub fn is_valid_geometry(self, d_row: i8, d_col: i8) -> bool {
        if (d_row, d_col) == (0, 0) {
            return false;
        }
        let (abs_row, abs_col) = (d_row.abs(), d_col.abs());
        match self.kind {
            PieceKind::King => abs_row.max(abs_col) == 1,
            PieceKind::Queen => d_row == 0 || d_col == 0 || abs_row == abs_col,
            PieceKind::Rook => d_row == 0 || d_col == 0,
            PieceKind::Bishop => abs_row == abs_col,
            PieceKind::Knight => (abs_row, abs_col) == (2, 1) || (abs_row, abs_col) == (1, 2),
            // Improvement potential: Double step and diagonal capture.
            PieceKind::Pawn => d_row == self.force.forward() && d_col == 0,
        }
    }

    pub fn to_fen_char(self) -> char {
        let ch = self.kind.to_full_algebraic();
        match self.force {
            Force::White => ch,
            Force::Black => ch.to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let kind = PieceKind::from_algebraic_char(ch)?;
        let force = if ch.is_ascii_uppercase() { Force::White } else { Force::Black };
        Some(Piece { kind, force })
    }

    pub fn pictogram(self) -> char { piece_to_pictogram(self.kind, self.force) }
}

pub fn piece_to_pictogram(piece_kind: PieceKind, force: Force) -> char {
    use self::Force::*;
    use self::PieceKind::*;
    match (force, piece_kind) {
        (White, Pawn) => '♙',
        (White, Knight) => '♘',
        (White, Bishop) => '♗',
        (White, Rook) => '♖',
        (White, Queen) => '♕',
        (White, King) => '♔',
        (Black, Pawn) => '♟',
        (Black, Knight) => '♞',
        (Black, Bishop) => '♝',
        (Black, Rook) => '♜',
        (Black, Queen) => '♛',
        (Black, King) => '♚',
    }
}


#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use strum::IntoEnumIterator;

    use super::*;

    fn deltas() -> impl Iterator<Item = (i8, i8)> { (-7..=7).cartesian_product(-7..=7) }

    fn white(kind: PieceKind) -> Piece { Piece::new(kind, Force::White) }

    #[test]
    fn line_pieces_are_rotation_invariant() {
        for kind in [PieceKind::Rook, PieceKind::Bishop, PieceKind::Queen] {
            for (d_row, d_col) in deltas() {
                let valid = white(kind).is_valid_geometry(d_row, d_col);
                assert_eq!(valid, white(kind).is_valid_geometry(-d_col, d_row), "{kind:?}");
                assert_eq!(valid, white(kind).is_valid_geometry(-d_row, -d_col), "{kind:?}");
            }
        }
    }

    #[test]
    fn knight_geometry() {
        for (d_row, d_col) in deltas() {
            let mut abs = [d_row.abs(), d_col.abs()];
            abs.sort();
            assert_eq!(white(PieceKind::Knight).is_valid_geometry(d_row, d_col), abs == [1, 2]);
        }
    }

    #[test]
    fn king_geometry() {
        for (d_row, d_col) in deltas() {
            let expected = (-1..=1).contains(&d_row)
                && (-1..=1).contains(&d_col)
                && (d_row, d_col) != (0, 0);
            assert_eq!(white(PieceKind::King).is_valid_geometry(d_row, d_col), expected);
        }
    }

    #[test]
    fn pawn_geometry() {
        let white_pawn = Piece::new(PieceKind::Pawn, Force::White);
        let black_pawn = Piece::new(PieceKind::Pawn, Force::Black);
        assert!(white_pawn.is_valid_geometry(1, 0));
        assert!(!white_pawn.is_valid_geometry(-1, 0));
        assert!(!white_pawn.is_valid_geometry(2, 0));
        assert!(!white_pawn.is_valid_geometry(1, 1));
        assert!(black_pawn.is_valid_geometry(-1, 0));
        assert!(!black_pawn.is_valid_geometry(1, 0));
    }

    #[test]
    fn threat_matches_geometry_except_pawns() {
        for kind in PieceKind::iter().filter(|&k| k != PieceKind::Pawn) {
            for (d_row, d_col) in deltas() {
                assert_eq!(
                    kind.threatens(d_row, d_col),
                    white(kind).is_valid_geometry(d_row, d_col),
                    "{kind:?} ({d_row}, {d_col})"
                );
            }
        }
        assert!(deltas().all(|(d_row, d_col)| !PieceKind::Pawn.threatens(d_row, d_col)));
    }

    #[test]
    fn fen_chars() {
        for kind in PieceKind::iter() {
            for force in [Force::White, Force::Black] {
                let piece = Piece::new(kind, force);
                assert_eq!(Piece::from_fen_char(piece.to_fen_char()), Some(piece));
            }
        }
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('3'), None);
    }

    #[test]
    fn labels() {
        assert_eq!(PieceKind::Queen.label(), "Queen");
        assert_eq!("knight".parse::<PieceKind>(), Ok(PieceKind::Knight));
        assert!("Dragon".parse::<PieceKind>().is_err());
    }
}
