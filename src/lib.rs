#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod coord;
pub mod display;
pub mod fen;
pub mod force;
pub mod grid;
pub mod piece;
pub mod placement;
pub mod puzzle;
pub mod session;
pub mod uci;
pub mod util;

// Each game is owned by a single player context, but may be moved between threads.
static_assertions::assert_impl_all!(session::GameSession: Send, Sync);
static_assertions::assert_impl_all!(puzzle::PuzzleGame: Send, Sync);
static_assertions::assert_impl_all!(placement::PlacementGame: Send, Sync);
