// State shared by every game mode: the board, whose turn it is and the running score.
//
// A session belongs to exactly one player context. The engines own their session by
// value and all mutation goes through `&mut self`, so there is no way to share a board
// between two players by accident.

use crate::board::{Board, PieceCounts, PlaceError};
use crate::coord::Coord;
use crate::display::{BoardSnapshot, snapshot};
use crate::fen::{FenError, Position, parse_position, position_to_fen};
use crate::force::Force;
use crate::piece::Piece;


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameSession {
    board: Board,
    active_force: Force,
    score: u32,
}

// Implemented by each game mode on top of a `GameSession`.
pub trait GameMode {
    fn session(&self) -> &GameSession;
    fn is_solved(&self) -> bool;
    // Returns the game to the state right after it was configured.
    fn reset(&mut self);
}

impl GameSession {
    pub fn new() -> Self {
        GameSession {
            board: Board::new(),
            active_force: Force::White,
            score: 0,
        }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub(crate) fn board_mut(&mut self) -> &mut Board { &mut self.board }
    pub fn active_force(&self) -> Force { self.active_force }
    pub fn set_active_force(&mut self, force: Force) { self.active_force = force; }
    pub fn score(&self) -> u32 { self.score }
    pub fn set_score(&mut self, score: u32) { self.score = score; }

    // Empty board, White to move, zero score.
    pub fn reinitialize(&mut self) {
        self.board.clear();
        self.active_force = Force::White;
        self.score = 0;
    }

    // The session is only touched if the whole string parses.
    pub fn load_position(&mut self, fen: &str) -> Result<(), FenError> {
        let Position { board, active_force } = parse_position(fen)?;
        self.reinitialize();
        self.board = board;
        self.active_force = active_force;
        Ok(())
    }

    pub fn to_fen(&self) -> String { position_to_fen(&self.board, self.active_force) }

    pub fn piece_at(&self, pos: Coord) -> Option<Piece> { self.board.get(pos) }
    pub fn piece_at_xy(&self, x: i32, y: i32) -> Option<Piece> { self.board.get_xy(x, y).piece() }

    pub fn place_piece(&mut self, pos: Coord, piece: Piece) -> Result<(), PlaceError> {
        self.board.place(pos, piece)
    }

    pub fn remove_piece(&mut self, pos: Coord) -> Option<Piece> { self.board.remove(pos) }

    pub fn piece_counts(&self) -> PieceCounts { self.board.count_by_kind() }

    pub fn snapshot(&self) -> BoardSnapshot { snapshot(&self.board) }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceKind;

    #[test]
    fn reinitialize() {
        let mut session = GameSession::new();
        session.load_position("4k3/8/8/8/8/8/8/4K3 b").unwrap();
        session.set_score(17);
        assert_eq!(session.active_force(), Force::Black);
        assert_eq!(session.piece_counts()[PieceKind::King], 2);
        session.reinitialize();
        assert_eq!(session, GameSession::new());
    }

    #[test]
    fn failed_load_keeps_state() {
        let mut session = GameSession::new();
        session.place_piece(Coord::D4, Piece::new(PieceKind::Queen, Force::White)).unwrap();
        assert!(session.load_position("not a position").is_err());
        assert_eq!(session.piece_at(Coord::D4), Some(Piece::new(PieceKind::Queen, Force::White)));
    }

    #[test]
    fn place_and_remove() {
        let mut session = GameSession::new();
        let rook = Piece::new(PieceKind::Rook, Force::Black);
        session.place_piece(Coord::B7, rook).unwrap();
        assert_eq!(session.piece_at_xy(1, 6), Some(rook));
        assert_eq!(session.piece_at_xy(1, 9), None);
        assert_eq!(
            session.place_piece(Coord::B7, rook),
            Err(PlaceError::CellOccupied)
        );
        assert_eq!(session.remove_piece(Coord::B7), Some(rook));
        assert_eq!(session.remove_piece(Coord::B7), None);
        assert_eq!(session.to_fen(), "8/8/8/8/8/8/8/8 w");
    }
}
