// Rendering-facing views of a board. Nothing here affects game logic.
//
// `BoardSnapshot` keeps board coordinates: `snapshot[row][col]`, where row 0 is rank '1'
// and col 0 is file 'a'. A renderer that draws White at the bottom must therefore draw
// row 7 first. `DisplayCoord` does this inversion for a given orientation.

use itertools::Itertools;

use crate::board::Board;
use crate::coord::{Col, Coord, NUM_COLS, NUM_ROWS, Row};
use crate::force::Force;


pub type BoardSnapshot = [[Option<char>; NUM_COLS as usize]; NUM_ROWS as usize];

pub type ThreatMap = [[bool; NUM_COLS as usize]; NUM_ROWS as usize];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardOrientation {
    Normal,  // White at bottom
    Rotated, // Black at bottom
}

// These coords describe board squares, like `Coord`. Both `x` and `y` are between
// 0 and 7, but here row 0 corresponds to the top-most row on screen, which could be
// row '1' or row '8' on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisplayCoord {
    pub x: i8,
    pub y: i8,
}

impl BoardOrientation {
    // The player's own pieces go at the bottom.
    pub fn for_force(force: Force) -> Self {
        match force {
            Force::White => BoardOrientation::Normal,
            Force::Black => BoardOrientation::Rotated,
        }
    }
}

pub fn snapshot(board: &Board) -> BoardSnapshot {
    let mut ret = [[None; NUM_COLS as usize]; NUM_ROWS as usize];
    for (pos, piece) in board.pieces() {
        ret[pos.y() as usize][pos.x() as usize] = Some(piece.pictogram());
    }
    ret
}

pub fn to_display_coord(coord: Coord, orientation: BoardOrientation) -> DisplayCoord {
    let row = coord.row.to_zero_based() as i8;
    let col = coord.col.to_zero_based() as i8;
    match orientation {
        BoardOrientation::Normal => DisplayCoord { x: col, y: NUM_ROWS as i8 - row - 1 },
        BoardOrientation::Rotated => DisplayCoord { x: NUM_COLS as i8 - col - 1, y: row },
    }
}

pub fn from_display_coord(q: DisplayCoord, orientation: BoardOrientation) -> Option<Coord> {
    let (x, y) = (q.x as i32, q.y as i32);
    let (col, row) = match orientation {
        BoardOrientation::Normal => (x, NUM_ROWS as i32 - y - 1),
        BoardOrientation::Rotated => (NUM_COLS as i32 - x - 1, y),
    };
    Coord::from_xy(col, row)
}

fn display_rows(orientation: BoardOrientation) -> Vec<Row> {
    match orientation {
        BoardOrientation::Normal => Row::all().rev().collect(),
        BoardOrientation::Rotated => Row::all().collect(),
    }
}

fn display_cols(orientation: BoardOrientation) -> Vec<Col> {
    match orientation {
        BoardOrientation::Normal => Col::all().collect(),
        BoardOrientation::Rotated => Col::all().rev().collect(),
    }
}

// Plain-text board with rank and file labels. Empty squares are shown as '·'. Squares
// listed in `highlight` are wrapped in brackets.
pub fn render_as_unicode(
    board: &Board, orientation: BoardOrientation, highlight: &[Coord],
) -> String {
    let cols = display_cols(orientation);
    let file_labels = cols.iter().map(|col| format!(" {} ", col.to_algebraic())).join("");
    let mut lines = vec![format!("  {}", file_labels.trim_end())];
    for row in display_rows(orientation) {
        let squares = cols
            .iter()
            .map(|&col| {
                let pos = Coord::new(row, col);
                let ch = board.get(pos).map_or('·', |piece| piece.pictogram());
                if highlight.contains(&pos) { format!("[{ch}]") } else { format!(" {ch} ") }
            })
            .join("");
        lines.push(format!("{} {}", row.to_algebraic(), squares.trim_end()));
    }
    lines.join("\n")
}


#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::piece::{Piece, PieceKind};

    #[test]
    fn display_coord_round_trip() {
        for orientation in [BoardOrientation::Normal, BoardOrientation::Rotated] {
            for pos in Coord::all() {
                let q = to_display_coord(pos, orientation);
                assert_eq!(from_display_coord(q, orientation), Some(pos));
            }
        }
        assert_eq!(
            to_display_coord(Coord::A1, BoardOrientation::Normal),
            DisplayCoord { x: 0, y: 7 }
        );
        assert_eq!(
            to_display_coord(Coord::A1, BoardOrientation::Rotated),
            DisplayCoord { x: 7, y: 0 }
        );
        assert_eq!(
            from_display_coord(DisplayCoord { x: 8, y: 0 }, BoardOrientation::Normal),
            None
        );
    }

    #[test]
    fn snapshot_uses_board_rows() {
        let mut board = Board::new();
        board.place(Coord::A1, Piece::new(PieceKind::Queen, Force::White)).unwrap();
        board.place(Coord::H7, Piece::new(PieceKind::Pawn, Force::Black)).unwrap();
        let snap = snapshot(&board);
        assert_eq!(snap[0][0], Some('♕'));
        assert_eq!(snap[6][7], Some('♟'));
        assert_eq!(snap.iter().flatten().flatten().count(), 2);
    }

    #[test]
    fn render() {
        let mut board = Board::new();
        board.place(Coord::A1, Piece::new(PieceKind::Rook, Force::White)).unwrap();
        board.place(Coord::H8, Piece::new(PieceKind::King, Force::Black)).unwrap();
        assert_eq!(
            render_as_unicode(&board, BoardOrientation::Normal, &[Coord::H8]),
            indoc! {"
                   a  b  c  d  e  f  g  h
                8  ·  ·  ·  ·  ·  ·  · [♚]
                7  ·  ·  ·  ·  ·  ·  ·  ·
                6  ·  ·  ·  ·  ·  ·  ·  ·
                5  ·  ·  ·  ·  ·  ·  ·  ·
                4  ·  ·  ·  ·  ·  ·  ·  ·
                3  ·  ·  ·  ·  ·  ·  ·  ·
                2  ·  ·  ·  ·  ·  ·  ·  ·
                1  ♖  ·  ·  ·  ·  ·  ·  ·"}
        );
    }
}
