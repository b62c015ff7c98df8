// Improvement potential. Full chess legality: check, castling, en passant, promotion choice.

use enum_map::{EnumMap, enum_map};

use crate::coord::Coord;
use crate::grid::{Grid, GridItem};
use crate::piece::{Piece, PieceKind};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlaceError {
    OutOfRange,
    CellOccupied,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveError {
    OutOfRange,
    PieceMissing,
    IllegalGeometry,
    PathBlocked,
}

pub type PieceCounts = EnumMap<PieceKind, u8>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    grid: Grid,
}

impl Board {
    pub fn new() -> Self { Board { grid: Grid::new() } }

    pub fn get(&self, pos: Coord) -> Option<Piece> { self.grid[pos] }
    pub fn get_xy(&self, x: i32, y: i32) -> GridItem<Piece> {
        match self.grid.get_xy(x, y) {
            GridItem::Piece(&piece) => GridItem::Piece(piece),
            GridItem::Empty => GridItem::Empty,
            GridItem::OutOfBounds => GridItem::OutOfBounds,
        }
    }
    pub fn is_empty(&self) -> bool { self.grid.is_empty() }
    pub fn clear(&mut self) { self.grid.clear(); }

    pub fn place(&mut self, pos: Coord, piece: Piece) -> Result<(), PlaceError> {
        let cell = &mut self.grid[pos];
        if cell.is_some() {
            return Err(PlaceError::CellOccupied);
        }
        *cell = Some(piece);
        Ok(())
    }

    pub fn place_xy(&mut self, x: i32, y: i32, piece: Piece) -> Result<(), PlaceError> {
        let pos = Coord::from_xy(x, y).ok_or(PlaceError::OutOfRange)?;
        self.place(pos, piece)
    }

    pub fn remove(&mut self, pos: Coord) -> Option<Piece> { self.grid[pos].take() }

    pub fn remove_xy(&mut self, x: i32, y: i32) -> Option<Piece> {
        Coord::from_xy(x, y).and_then(|pos| self.remove(pos))
    }

    // Tests that squares between `from` (exclusive) and `to` (exclusive) are free.
    // Only meaningful for straight and diagonal lines; any other shape (e.g. a knight
    // jump) has no intermediate squares and is always clear.
    pub fn is_path_clear(&self, from: Coord, to: Coord) -> bool {
        let (d_row, d_col) = to - from;
        let is_line = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
        if !is_line || from == to {
            return true;
        }
        let direction = (d_row.signum(), d_col.signum());
        let mut pos = from + direction;
        while pos != to {
            if self.grid[pos].is_some() {
                return false;
            }
            pos = pos + direction;
        }
        true
    }

    // Moves a piece if its movement rule allows the shape and nothing stands in between.
    // Whatever stood on the destination square is replaced and returned.
    pub fn move_geometric(&mut self, from: Coord, to: Coord) -> Result<Option<Piece>, MoveError> {
        let piece = self.grid[from].ok_or(MoveError::PieceMissing)?;
        let (d_row, d_col) = to - from;
        if !piece.is_valid_geometry(d_row, d_col) {
            return Err(MoveError::IllegalGeometry);
        }
        if !self.is_path_clear(from, to) {
            return Err(MoveError::PathBlocked);
        }
        Ok(self.relocate(from, to, None))
    }

    pub fn move_geometric_xy(
        &mut self, x1: i32, y1: i32, x2: i32, y2: i32,
    ) -> Result<Option<Piece>, MoveError> {
        let from = Coord::from_xy(x1, y1).ok_or(MoveError::OutOfRange)?;
        let to = Coord::from_xy(x2, y2).ok_or(MoveError::OutOfRange)?;
        self.move_geometric(from, to)
    }

    // Moves whatever stands on `from` to `to` without consulting movement rules.
    // Returns the captured piece. Does nothing if `from` is empty.
    pub fn relocate(
        &mut self, from: Coord, to: Coord, promote_to: Option<PieceKind>,
    ) -> Option<Piece> {
        let Some(mut piece) = self.grid[from].take() else {
            return None;
        };
        if let Some(kind) = promote_to {
            piece.kind = kind;
        }
        self.grid[to].replace(piece)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ { self.grid.pieces() }

    pub fn count_by_kind(&self) -> PieceCounts {
        let mut counts = enum_map! { _ => 0 };
        for (_, piece) in self.pieces() {
            counts[piece.kind] += 1;
        }
        counts
    }
}
