// Coordinate conventions used throughout the crate:
//   - `Row` is the rank: row 0 is rank '1' (White's home rank), row 7 is rank '8'.
//   - `Col` is the file: col 0 is file 'a', col 7 is file 'h'.
//   - When raw integers are used, `x` is the column and `y` is the row.

use std::fmt;
use std::ops;

use itertools::Itertools;
use serde::{Deserialize, Serialize};


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Row {
    idx: u8, // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub fn try_from_zero_based(idx: i32) -> Option<Self> {
        (0..NUM_ROWS as i32).contains(&idx).then(|| Self { idx: idx as u8 })
    }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        Self::try_from_zero_based(ch as i32 - '1' as i32)
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'1') as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(Self::from_zero_based)
    }
}

impl ops::Sub for Row {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output {
        (self.to_zero_based() as i8) - (other.to_zero_based() as i8)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Col {
    idx: u8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_COLS);
        Self { idx }
    }
    pub fn try_from_zero_based(idx: i32) -> Option<Self> {
        (0..NUM_COLS as i32).contains(&idx).then(|| Self { idx: idx as u8 })
    }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        Self::try_from_zero_based(ch as i32 - 'a' as i32)
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'a') as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_COLS).map(Self::from_zero_based)
    }
}

impl ops::Sub for Col {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output {
        (self.to_zero_based() as i8) - (other.to_zero_based() as i8)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }

    pub fn from_xy(x: i32, y: i32) -> Option<Self> {
        Some(Self {
            row: Row::try_from_zero_based(y)?,
            col: Col::try_from_zero_based(x)?,
        })
    }
    pub fn x(self) -> u8 { self.col.to_zero_based() }
    pub fn y(self) -> u8 { self.row.to_zero_based() }

    // Accepts "e2" as well as "E2".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (col, row) = s.chars().collect_tuple()?;
        Some(Self {
            row: Row::from_algebraic(row)?,
            col: Col::from_algebraic(col.to_ascii_lowercase())?,
        })
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
    // Upper-case file, e.g. "A1". This is the form used in placement signatures.
    pub fn to_upper_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic().to_ascii_uppercase(), self.row.to_algebraic())
    }

    // File-major scan order: a1, a2, ..., a8, b1, ..., h8.
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        Col::all().cartesian_product(Row::all()).map(|(col, row)| Self { row, col })
    }

    pub fn offset(self, (d_row, d_col): (i8, i8)) -> Option<Self> {
        Self::from_xy(self.x() as i32 + d_col as i32, self.y() as i32 + d_row as i32)
    }
}

impl ops::Add<(i8, i8)> for Coord {
    type Output = Self;
    #[track_caller]
    fn add(self, other: (i8, i8)) -> Self::Output {
        self.offset(other)
            .unwrap_or_else(|| panic!("{:?} + {:?} is outside the board", self, other))
    }
}

// Returns (d_row, d_col).
impl ops::Sub for Coord {
    type Output = (i8, i8);
    fn sub(self, other: Self) -> Self::Output { (self.row - other.row, self.col - other.col) }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self.to_algebraic())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}


macro_rules! named_squares {
    ($($col:literal => [$($name:ident),*];)*) => {
        impl Coord {
            $($(
                pub const $name: Coord = Coord::new(
                    Row::from_zero_based(named_squares!(@row $name)),
                    Col::from_zero_based($col),
                );
            )*)*
        }
    };
    (@row $name:ident) => {{
        let bytes = stringify!($name).as_bytes();
        bytes[1] - b'1'
    }};
}

named_squares! {
    0 => [A1, A2, A3, A4, A5, A6, A7, A8];
    1 => [B1, B2, B3, B4, B5, B6, B7, B8];
    2 => [C1, C2, C3, C4, C5, C6, C7, C8];
    3 => [D1, D2, D3, D4, D5, D6, D7, D8];
    4 => [E1, E2, E3, E4, E5, E6, E7, E8];
    5 => [F1, F2, F3, F4, F5, F6, F7, F8];
    6 => [G1, G2, G3, G4, G5, G6, G7, G8];
    7 => [H1, H2, H3, H4, H5, H6, H7, H8];
}
