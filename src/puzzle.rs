// Puzzle mode: the player has to find a known sequence of moves.
//
// The solution alternates player moves and scripted opponent replies. Many puzzle
// databases store the position *before* the opponent's last move together with that
// move; such puzzles are loaded with `starts_at_target_ply == false` and the first move
// of the sequence is played automatically. Puzzles whose position is already the one
// the player must solve use `starts_at_target_ply == true`.
//
// Solution moves are trusted: they are applied without consulting movement rules, so
// that castling, en passant and promotions in puzzle data work even though the board
// itself does not implement them.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::fen::{FenError, Position, parse_position};
use crate::force::Force;
use crate::session::{GameMode, GameSession};
use crate::uci::{UciError, UciMove};


pub const UNKNOWN_PUZZLE_ID: &str = "????";

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PuzzleSetup {
    pub puzzle_id: String,
    pub position: String,
    // Space-delimited move codes, e.g. "e2e4 e7e5".
    pub moves: String,
    pub starts_at_target_ply: bool,
    pub active_force_override: Option<Force>,
}

// Puzzle as it arrives from a puzzle source, e.g.
//   {"puzzleId": "00sHx", "position": "q3k1nr/...", "moves": "e8d7 a2e6 d7d8 f7f8"}
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzlePayload {
    #[serde(default, alias = "PuzzleId")]
    pub puzzle_id: Option<String>,
    #[serde(alias = "fen")]
    pub position: String,
    pub moves: String,
    #[serde(default)]
    pub starts_at_target_ply: bool,
    // true means White to move.
    #[serde(default)]
    pub side_to_move_override: Option<bool>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PuzzleError {
    NotLoaded,
    SequenceExhausted,
    // The opponent's scripted reply has to be played first.
    ReplyPending,
    OutOfRange,
    InvalidPosition(FenError),
    InvalidMoveCode(UciError),
    InvalidPayload(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    // Correct move; the opponent's reply is pending.
    Continue,
    // Correct move, and it was the last one.
    Solved,
    // Not the expected move. Nothing changed.
    Rejected,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PuzzleStatus {
    NotLoaded,
    AwaitingPlayer,
    AwaitingReply,
    Solved,
}

#[derive(Clone, Debug)]
pub struct PuzzleGame {
    session: GameSession,
    puzzle_id: String,
    starting_position: Option<String>,
    // Position after applying the override, before any solution move.
    start: Option<Position>,
    solution: Vec<UciMove>,
    current_move_index: usize,
    starts_at_target_ply: bool,
    reply_pending: bool,
    last_move: Option<UciMove>,
    player_force: Force,
    score_recorded: bool,
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::NotLoaded => write!(f, "no puzzle loaded"),
            PuzzleError::SequenceExhausted => write!(f, "the puzzle has no more moves"),
            PuzzleError::ReplyPending => write!(f, "it is the opponent's turn"),
            PuzzleError::OutOfRange => write!(f, "coordinates are outside the board"),
            PuzzleError::InvalidPosition(err) => write!(f, "{err}"),
            PuzzleError::InvalidMoveCode(err) => write!(f, "{err}"),
            PuzzleError::InvalidPayload(err) => write!(f, "invalid puzzle payload: {err}"),
        }
    }
}

impl PuzzlePayload {
    pub fn from_json(json: &str) -> Result<Self, PuzzleError> {
        serde_json::from_str(json).map_err(|err| PuzzleError::InvalidPayload(err.to_string()))
    }

    pub fn into_setup(self) -> PuzzleSetup {
        PuzzleSetup {
            puzzle_id: self
                .puzzle_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_PUZZLE_ID.to_owned()),
            position: self.position,
            moves: self.moves,
            starts_at_target_ply: self.starts_at_target_ply,
            active_force_override: self.side_to_move_override.map(Force::from_is_white),
        }
    }
}

impl PuzzleGame {
    pub fn new() -> Self {
        PuzzleGame {
            session: GameSession::new(),
            puzzle_id: UNKNOWN_PUZZLE_ID.to_owned(),
            starting_position: None,
            start: None,
            solution: Vec::new(),
            current_move_index: 0,
            starts_at_target_ply: false,
            reply_pending: false,
            last_move: None,
            player_force: Force::White,
            score_recorded: false,
        }
    }

    pub fn puzzle_id(&self) -> &str { &self.puzzle_id }
    // Position string as it was loaded, before the side-to-move override.
    pub fn starting_position(&self) -> Option<&str> { self.starting_position.as_deref() }
    pub fn solution(&self) -> &[UciMove] { &self.solution }
    pub fn current_move_index(&self) -> usize { self.current_move_index }
    pub fn starts_at_target_ply(&self) -> bool { self.starts_at_target_ply }
    pub fn last_move(&self) -> Option<UciMove> { self.last_move }
    // The side the player solves for; renderers put it at the bottom.
    pub fn player_force(&self) -> Force { self.player_force }
    pub fn is_loaded(&self) -> bool { !self.solution.is_empty() }
    pub fn score_recorded(&self) -> bool { self.score_recorded }
    pub fn mark_score_recorded(&mut self) { self.score_recorded = true; }
    // Key under which a solved puzzle is stored, so that it is only rewarded once.
    pub fn schema_key(&self) -> String { format!("PUZZLE_{}", self.puzzle_id) }

    pub fn status(&self) -> PuzzleStatus {
        if !self.is_loaded() {
            PuzzleStatus::NotLoaded
        } else if self.current_move_index >= self.solution.len() {
            PuzzleStatus::Solved
        } else if self.reply_pending {
            PuzzleStatus::AwaitingReply
        } else {
            PuzzleStatus::AwaitingPlayer
        }
    }

    // Moves played so far out of the whole solution, scripted ones included.
    pub fn progress(&self) -> (usize, usize) { (self.current_move_index, self.solution.len()) }

    // Number of moves the player has to find.
    pub fn num_player_moves(&self) -> usize {
        let n = self.solution.len();
        if n == 0 {
            0
        } else if self.starts_at_target_ply {
            n / 2 + 1
        } else {
            n / 2
        }
    }

    pub fn load(&mut self, setup: &PuzzleSetup) -> Result<(), PuzzleError> {
        let mut start = parse_position(&setup.position).map_err(PuzzleError::InvalidPosition)?;
        let solution = UciMove::parse_list(&setup.moves).map_err(PuzzleError::InvalidMoveCode)?;
        if let Some(force) = setup.active_force_override {
            start.active_force = force;
        }
        self.clear();
        self.puzzle_id = setup.puzzle_id.clone();
        self.starting_position = Some(setup.position.clone());
        self.start = Some(start);
        self.solution = solution;
        self.starts_at_target_ply = setup.starts_at_target_ply;
        self.set_up_start();
        info!(
            "Loaded puzzle {} with {} solution moves",
            self.puzzle_id,
            self.solution.len()
        );
        Ok(())
    }

    pub fn load_payload(&mut self, payload: PuzzlePayload) -> Result<(), PuzzleError> {
        self.load(&payload.into_setup())
    }

    // Starts the current puzzle over. Keeps the puzzle itself.
    pub fn restart(&mut self) {
        self.session.reinitialize();
        self.reply_pending = false;
        self.last_move = None;
        self.score_recorded = false;
        self.set_up_start();
    }

    // Unloads the puzzle and empties the board.
    pub fn clear(&mut self) { *self = PuzzleGame::new(); }

    pub fn submit_player_move(
        &mut self, from: Coord, to: Coord,
    ) -> Result<MoveOutcome, PuzzleError> {
        if !self.is_loaded() {
            return Err(PuzzleError::NotLoaded);
        }
        if self.reply_pending {
            return Err(PuzzleError::ReplyPending);
        }
        let Some(&expected) = self.solution.get(self.current_move_index) else {
            return Err(PuzzleError::SequenceExhausted);
        };
        let mut played = UciMove::new(from, to);
        if expected.promote_to.is_some() && played.is_prefix_of(expected) {
            played = expected;
        }
        if played != expected {
            debug!("Puzzle {}: rejected {}, expected {}", self.puzzle_id, played, expected);
            return Ok(MoveOutcome::Rejected);
        }
        self.apply_move(played);
        self.current_move_index += 1;
        if self.is_solved() {
            self.reply_pending = false;
            info!("Puzzle {} solved", self.puzzle_id);
            Ok(MoveOutcome::Solved)
        } else {
            self.reply_pending = true;
            Ok(MoveOutcome::Continue)
        }
    }

    pub fn submit_player_move_xy(
        &mut self, x1: i32, y1: i32, x2: i32, y2: i32,
    ) -> Result<MoveOutcome, PuzzleError> {
        let from = Coord::from_xy(x1, y1).ok_or(PuzzleError::OutOfRange)?;
        let to = Coord::from_xy(x2, y2).ok_or(PuzzleError::OutOfRange)?;
        self.submit_player_move(from, to)
    }

    // Plays the opponent's move, if one is due. Returns the move played.
    pub fn play_scripted_reply(&mut self) -> Option<UciMove> {
        if !self.reply_pending {
            return None;
        }
        let mv = *self.solution.get(self.current_move_index)?;
        self.apply_move(mv);
        self.current_move_index += 1;
        self.reply_pending = false;
        Some(mv)
    }

    // Start square of the next expected move.
    pub fn hint(&self) -> Option<Coord> {
        self.solution.get(self.current_move_index).map(|mv| mv.from)
    }

    fn set_up_start(&mut self) {
        self.current_move_index = 0;
        if let Some(start) = &self.start {
            let Position { board, active_force } = start.clone();
            *self.session.board_mut() = board;
            self.session.set_active_force(active_force);
        }
        if !self.starts_at_target_ply {
            if let Some(&first) = self.solution.first() {
                self.apply_move(first);
                self.current_move_index = 1;
            }
        }
        self.player_force = self.session.active_force();
    }

    fn apply_move(&mut self, mv: UciMove) {
        let Some(piece) = self.session.piece_at(mv.from) else {
            warn!("Puzzle {}: move {} starts on an empty square", self.puzzle_id, mv);
            return;
        };
        self.session.board_mut().relocate(mv.from, mv.to, mv.promote_to);
        self.session.set_active_force(piece.force.opponent());
        self.last_move = Some(mv);
        debug!("Puzzle {}: played {}", self.puzzle_id, mv);
    }
}

impl GameMode for PuzzleGame {
    fn session(&self) -> &GameSession { &self.session }
    fn is_solved(&self) -> bool {
        self.is_loaded() && self.current_move_index >= self.solution.len()
    }
    fn reset(&mut self) { self.restart(); }
}
