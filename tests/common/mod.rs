// Improvement potential. Combine integration tests together:
//   https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

use chessmate::coord::Coord;
use chessmate::force::Force;
use chessmate::piece::{Piece, PieceKind};
use chessmate::placement::{PlacementGame, PlacementOutcome};
use chessmate::puzzle::{PuzzleGame, PuzzleSetup};


pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Clone, Copy, Debug)]
pub struct PieceMatcher {
    pub kind: PieceKind,
    pub force: Force,
}

pub trait PieceIs {
    fn is(self, matcher: PieceMatcher) -> bool;
}

impl PieceIs for Option<Piece> {
    fn is(self, matcher: PieceMatcher) -> bool {
        if let Some(piece) = self {
            piece.kind == matcher.kind && piece.force == matcher.force
        } else {
            false
        }
    }
}

#[macro_export]
macro_rules! piece {
    ($force:ident $kind:ident) => {
        common::PieceMatcher {
            force: chessmate::force::Force::$force,
            kind: chessmate::piece::PieceKind::$kind,
        }
    };
}

#[allow(dead_code)]
pub fn puzzle_setup(position: &str, moves: &str, starts_at_target_ply: bool) -> PuzzleSetup {
    PuzzleSetup {
        puzzle_id: "test".to_owned(),
        position: position.to_owned(),
        moves: moves.to_owned(),
        starts_at_target_ply,
        active_force_override: None,
    }
}

#[allow(dead_code)]
pub fn load_puzzle(position: &str, moves: &str, starts_at_target_ply: bool) -> PuzzleGame {
    let mut game = PuzzleGame::new();
    game.load(&puzzle_setup(position, moves, starts_at_target_ply)).unwrap();
    game
}

// Places white pieces of the given kind, asserting that each placement succeeds.
#[allow(dead_code)]
pub fn place_all(game: &mut PlacementGame, kind: PieceKind, squares: &[Coord]) {
    for &pos in squares {
        assert_eq!(
            game.attempt_place(pos, kind, Force::White),
            PlacementOutcome::Placed,
            "placing {kind:?} on {pos}"
        );
    }
}
