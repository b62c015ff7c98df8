use std::{fmt, ops};

use ndarray::{Array, Array2};

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::piece::Piece;


// What a cell lookup by raw coordinates can find.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GridItem<T> {
    Piece(T),
    Empty,
    OutOfBounds,
}

impl<T> GridItem<T> {
    pub fn is_free(&self) -> bool { matches!(self, GridItem::Empty) }
    pub fn piece(self) -> Option<T> {
        match self {
            GridItem::Piece(piece) => Some(piece),
            GridItem::Empty | GridItem::OutOfBounds => None,
        }
    }
}

// Each cell holds at most one piece. Pieces are stored by value: putting a piece into
// a cell moves it there, taking it out moves it back to the caller.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    data: Array2<Option<Piece>>,
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            data: Array::from_elem((NUM_ROWS as usize, NUM_COLS as usize), None),
        }
    }

    pub fn get(&self, pos: Coord) -> GridItem<&Piece> {
        match self.data.get(coord_to_index(pos)) {
            None => GridItem::OutOfBounds,
            Some(None) => GridItem::Empty,
            Some(Some(v)) => GridItem::Piece(v),
        }
    }

    pub fn get_xy(&self, x: i32, y: i32) -> GridItem<&Piece> {
        match Coord::from_xy(x, y) {
            Some(pos) => self.get(pos),
            None => GridItem::OutOfBounds,
        }
    }

    pub fn is_empty(&self) -> bool { self.data.iter().all(Option::is_none) }

    pub fn clear(&mut self) { self.data.fill(None); }

    // Occupied cells in `Coord::all` scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|pos| self[pos].map(|piece| (pos, piece)))
    }
}

impl ops::Index<Coord> for Grid {
    type Output = Option<Piece>;
    #[track_caller]
    fn index(&self, pos: Coord) -> &Self::Output {
        self.data
            .get(coord_to_index(pos))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos)))
    }
}

impl ops::IndexMut<Coord> for Grid {
    #[track_caller]
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        self.data
            .get_mut(coord_to_index(pos))
            .unwrap_or_else(|| panic!("{}", out_of_bound_message(pos)))
    }
}

fn coord_to_index(pos: Coord) -> [usize; 2] {
    [pos.row.to_zero_based() as usize, pos.col.to_zero_based() as usize]
}

fn out_of_bound_message(pos: Coord) -> String {
    format!(
        "Coord ({}, {}) is out of bound for {}x{} board",
        pos.row.to_zero_based(),
        pos.col.to_zero_based(),
        NUM_ROWS,
        NUM_COLS
    )
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(self.pieces().map(|(pos, piece)| {
                (pos.to_algebraic(), format!("{:?}-{:?}", piece.force, piece.kind))
            }))
            .finish()
    }
}
