// Long algebraic move codes as used by UCI engines and puzzle databases:
// "e2e4", or "a7a8q" when a pawn promotes.

use std::fmt;

use lazy_static::lazy_static;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::piece::PieceKind;
use crate::util::as_single_char;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UciError(pub String);

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid move code: {}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct UciMove {
    pub from: Coord,
    pub to: Coord,
    pub promote_to: Option<PieceKind>,
}

impl UciMove {
    pub fn new(from: Coord, to: Coord) -> Self { UciMove { from, to, promote_to: None } }

    pub fn parse(notation: &str) -> Result<Self, UciError> {
        lazy_static! {
            static ref MOVE_RE: Regex = Regex::new(r"^([a-h][1-8])([a-h][1-8])([qrbnQRBN])?$").unwrap();
        }
        let notation = notation.trim();
        let cap = MOVE_RE.captures(notation).ok_or_else(|| UciError(notation.to_owned()))?;
        let from = Coord::from_algebraic(cap.get(1).unwrap().as_str()).unwrap();
        let to = Coord::from_algebraic(cap.get(2).unwrap().as_str()).unwrap();
        let promote_to = cap
            .get(3)
            .and_then(|m| as_single_char(m.as_str()))
            .and_then(PieceKind::from_algebraic_char);
        Ok(UciMove { from, to, promote_to })
    }

    // Parses a space-delimited move list, e.g. "e2e4 e7e5 g1f3".
    pub fn parse_list(notation: &str) -> Result<Vec<Self>, UciError> {
        notation.split_whitespace().map(Self::parse).collect()
    }

    // Whether `self` is the same move as `expected` except for a missing promotion suffix.
    pub fn is_prefix_of(self, expected: UciMove) -> bool {
        self.promote_to.is_none() && self.from == expected.from && self.to == expected.to
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promote_to {
            write!(f, "{}", kind.to_full_algebraic().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
