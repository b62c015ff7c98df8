// Placement mode: put a required set of pieces on an empty board so that no piece
// attacks another (the eight queens puzzle and its relatives).
//
// Attacks are purely geometric: a piece standing in between does not block a line.
// Pawns never attack in this mode.

use std::collections::BTreeMap;
use std::fmt;

use enum_map::{EnumMap, enum_map};
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::board::PieceCounts;
use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::display::ThreatMap;
use crate::force::Force;
use crate::piece::{Piece, PieceKind};
use crate::session::{GameMode, GameSession};


pub const MAX_QUOTA_TOTAL: u32 = (NUM_ROWS as u32) * (NUM_COLS as u32);

// Required number of pieces per kind. Kinds without a requirement are not checked.
// Serialized as a map that lists only the required kinds, e.g. {"Queen": 8}.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(from = "BTreeMap<PieceKind, u8>", into = "BTreeMap<PieceKind, u8>")]
pub struct Quota(EnumMap<PieceKind, Option<u8>>);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QuotaError {
    Empty,
    TooManyPieces,
}

#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, EnumString, IntoStaticStr, Serialize,
    Deserialize,
)]
pub enum PlacementMode {
    #[strum(serialize = "8-queens")]
    #[serde(rename = "8-queens")]
    EightQueens,
    #[strum(serialize = "8-rooks")]
    #[serde(rename = "8-rooks")]
    EightRooks,
    #[strum(serialize = "14-bishops")]
    #[serde(rename = "14-bishops")]
    FourteenBishops,
    #[strum(serialize = "16-kings")]
    #[serde(rename = "16-kings")]
    SixteenKings,
    #[strum(serialize = "custom")]
    #[serde(rename = "custom")]
    Custom,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConflictKind {
    // The piece already on the board attacks the target square.
    ExistingThreatensTarget,
    // The new piece would attack the piece already on the board.
    NewThreatensExisting,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ConflictDetail {
    pub kind: ConflictKind,
    pub new_piece: PieceKind,
    pub existing: Piece,
    pub existing_pos: Coord,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlacementOutcome {
    Placed,
    OutOfRange,
    CellOccupied,
    Conflict(ConflictDetail),
}

#[derive(Clone, Debug)]
pub struct PlacementGame {
    session: GameSession,
    quota: Quota,
    mode: PlacementMode,
    // Kind the player is about to place; determines which squares `threat_map` marks.
    selected_kind: PieceKind,
    error_count: u32,
    raw_score: i32,
    has_removed_a_piece: bool,
    valid_placements: u32,
    score_recorded: bool,
}

impl Quota {
    pub fn new() -> Self { Quota(enum_map! { _ => None }) }
    pub fn single(kind: PieceKind, count: u8) -> Self { Quota::new().with(kind, count) }

    pub fn with(mut self, kind: PieceKind, count: u8) -> Self {
        self.0[kind] = Some(count);
        self
    }

    pub fn get(&self, kind: PieceKind) -> Option<u8> { self.0[kind] }

    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        self.0.iter().filter_map(|(kind, &count)| count.map(|count| (kind, count)))
    }

    pub fn total(&self) -> u32 { self.iter().map(|(_, count)| u32::from(count)).sum() }

    pub fn is_met_by(&self, counts: &PieceCounts) -> bool {
        self.iter().all(|(kind, count)| counts[kind] == count)
    }
}

impl From<BTreeMap<PieceKind, u8>> for Quota {
    fn from(counts: BTreeMap<PieceKind, u8>) -> Self {
        counts.into_iter().fold(Quota::new(), |quota, (kind, count)| quota.with(kind, count))
    }
}

impl From<Quota> for BTreeMap<PieceKind, u8> {
    fn from(quota: Quota) -> Self { quota.iter().collect() }
}

pub fn validate_quota_request(quota: &Quota) -> Result<(), QuotaError> {
    match quota.total() {
        0 => Err(QuotaError::Empty),
        total if total > MAX_QUOTA_TOTAL => Err(QuotaError::TooManyPieces),
        _ => Ok(()),
    }
}

impl fmt::Display for QuotaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaError::Empty => write!(f, "Choose at least one piece."),
            QuotaError::TooManyPieces => write!(f, "Too many pieces: at most {MAX_QUOTA_TOTAL}."),
        }
    }
}

impl PlacementMode {
    pub fn label(self) -> &'static str { self.into() }

    pub fn preset_quota(self) -> Option<Quota> {
        match self {
            PlacementMode::EightQueens => Some(Quota::single(PieceKind::Queen, 8)),
            PlacementMode::EightRooks => Some(Quota::single(PieceKind::Rook, 8)),
            PlacementMode::FourteenBishops => Some(Quota::single(PieceKind::Bishop, 14)),
            PlacementMode::SixteenKings => Some(Quota::single(PieceKind::King, 16)),
            PlacementMode::Custom => None,
        }
    }

    pub fn presets() -> impl Iterator<Item = Self> {
        Self::iter().filter(|mode| mode.preset_quota().is_some())
    }
}

impl fmt::Display for ConflictDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let existing = self.existing.kind.label();
        let pos = self.existing_pos.to_upper_algebraic();
        match self.kind {
            ConflictKind::ExistingThreatensTarget => {
                write!(f, "The {existing} on {pos} attacks this square!")
            }
            ConflictKind::NewThreatensExisting => write!(
                f,
                "A {} here would capture the {existing} on {pos}!",
                self.new_piece.label()
            ),
        }
    }
}

impl PlacementGame {
    pub fn new() -> Self { Self::with_mode(PlacementMode::EightQueens) }

    // Falls back to eight queens for `Custom`, which has no quota of its own.
    pub fn with_mode(mode: PlacementMode) -> Self {
        let quota = mode.preset_quota().unwrap_or(Quota::single(PieceKind::Queen, 8));
        PlacementGame {
            session: GameSession::new(),
            quota,
            mode,
            selected_kind: quota.iter().next().map_or(PieceKind::Queen, |(kind, _)| kind),
            error_count: 0,
            raw_score: 0,
            has_removed_a_piece: false,
            valid_placements: 0,
            score_recorded: false,
        }
    }

    pub fn with_custom_quota(quota: Quota) -> Result<Self, QuotaError> {
        let mut game = Self::new();
        game.set_custom_quota(quota)?;
        Ok(game)
    }

    pub fn quota(&self) -> &Quota { &self.quota }
    pub fn mode(&self) -> PlacementMode { self.mode }
    pub fn selected_kind(&self) -> PieceKind { self.selected_kind }
    pub fn select_kind(&mut self, kind: PieceKind) { self.selected_kind = kind; }
    pub fn error_count(&self) -> u32 { self.error_count }
    pub fn raw_score(&self) -> i32 { self.raw_score }
    pub fn has_removed_a_piece(&self) -> bool { self.has_removed_a_piece }
    pub fn valid_placements(&self) -> u32 { self.valid_placements }
    pub fn score_recorded(&self) -> bool { self.score_recorded }
    pub fn mark_score_recorded(&mut self) { self.score_recorded = true; }
    pub fn current_counts(&self) -> PieceCounts { self.session.piece_counts() }

    // Switches to a preset. `Custom` keeps the current quota. Always restarts.
    pub fn change_mode(&mut self, mode: PlacementMode) {
        if let Some(quota) = mode.preset_quota() {
            self.quota = quota;
        }
        self.mode = mode;
        self.reset();
    }

    pub fn set_custom_quota(&mut self, quota: Quota) -> Result<(), QuotaError> {
        validate_quota_request(&quota)?;
        self.quota = quota;
        self.mode = PlacementMode::Custom;
        self.reset();
        Ok(())
    }

    pub fn attempt_place(&mut self, pos: Coord, kind: PieceKind, force: Force) -> PlacementOutcome {
        if self.session.piece_at(pos).is_some() {
            self.error_count += 1;
            return PlacementOutcome::CellOccupied;
        }
        if let Some(conflict) = self.find_conflict(pos, kind) {
            self.error_count += 1;
            debug!("Placement conflict at {}: {}", pos, conflict);
            return PlacementOutcome::Conflict(conflict);
        }
        // The cell was checked above.
        let _ = self.session.place_piece(pos, Piece::new(kind, force));
        self.valid_placements += 1;
        self.raw_score += kind.weight();
        self.sync_session_score();
        if self.is_solved() {
            info!("Placement puzzle {} solved: {}", self.mode.label(), self.solution_signature());
        }
        PlacementOutcome::Placed
    }

    pub fn attempt_place_xy(
        &mut self, x: i32, y: i32, kind: PieceKind, force: Force,
    ) -> PlacementOutcome {
        match Coord::from_xy(x, y) {
            Some(pos) => self.attempt_place(pos, kind, force),
            None => PlacementOutcome::OutOfRange,
        }
    }

    // Removing a piece is allowed but forfeits the perfect-attempt bonus.
    pub fn remove_piece(&mut self, pos: Coord) -> bool {
        let Some(piece) = self.session.remove_piece(pos) else {
            return false;
        };
        self.raw_score -= piece.kind.weight();
        self.valid_placements = self.valid_placements.saturating_sub(1);
        self.has_removed_a_piece = true;
        self.sync_session_score();
        true
    }

    pub fn remove_piece_xy(&mut self, x: i32, y: i32) -> bool {
        Coord::from_xy(x, y).is_some_and(|pos| self.remove_piece(pos))
    }

    // First conflict in `Coord::all` scan order. For each scanned piece the threat it
    // poses to the target is reported before the threat the new piece would pose to it.
    pub fn find_conflict(&self, target: Coord, kind: PieceKind) -> Option<ConflictDetail> {
        self.session.board().pieces().find_map(|(pos, existing)| {
            let (d_row, d_col) = target - pos;
            let conflict_kind = if existing.kind.threatens(d_row, d_col) {
                ConflictKind::ExistingThreatensTarget
            } else if kind.threatens(d_row, d_col) {
                ConflictKind::NewThreatensExisting
            } else {
                return None;
            };
            Some(ConflictDetail {
                kind: conflict_kind,
                new_piece: kind,
                existing,
                existing_pos: pos,
            })
        })
    }

    pub fn is_square_threatened(&self, target: Coord) -> bool {
        self.session.board().pieces().any(|(pos, existing)| {
            let (d_row, d_col) = target - pos;
            existing.kind.threatens(d_row, d_col)
        })
    }

    // Squares where placing `selected_kind` would be refused as a conflict, indexed
    // `[row][col]` like `BoardSnapshot`.
    pub fn threat_map(&self) -> ThreatMap {
        let mut ret = [[false; NUM_COLS as usize]; NUM_ROWS as usize];
        for pos in Coord::all() {
            ret[pos.y() as usize][pos.x() as usize] =
                self.find_conflict(pos, self.selected_kind).is_some();
        }
        ret
    }

    pub fn is_perfect_attempt(&self) -> bool { self.error_count == 0 && !self.has_removed_a_piece }

    pub fn final_score(&self) -> i32 {
        let mut factor = (1.0 - 0.1 * f64::from(self.error_count)).max(0.2);
        if self.is_perfect_attempt() {
            factor += 0.2;
        }
        (f64::from(self.raw_score) * factor).round() as i32
    }

    // Identifies the set of occupied squares regardless of placement order, e.g. "A1-B3-C5".
    pub fn solution_signature(&self) -> String {
        self.session
            .board()
            .pieces()
            .map(|(pos, _)| pos.to_upper_algebraic())
            .sorted()
            .join("-")
    }

    // Key under which a solution is stored, so that each distinct layout is rewarded once.
    pub fn schema_key(&self) -> String {
        format!("{}[{}]", self.mode.label(), self.solution_signature())
    }

    fn sync_session_score(&mut self) {
        self.session.set_score(self.raw_score.max(0) as u32);
    }
}

impl GameMode for PlacementGame {
    fn session(&self) -> &GameSession { &self.session }

    fn is_solved(&self) -> bool { self.quota.is_met_by(&self.current_counts()) }

    // Clears the board and the attempt statistics. Quota and mode are kept.
    fn reset(&mut self) {
        self.session.reinitialize();
        self.error_count = 0;
        self.raw_score = 0;
        self.has_removed_a_piece = false;
        self.valid_placements = 0;
        self.score_recorded = false;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn place(game: &mut PlacementGame, pos: Coord, kind: PieceKind) -> PlacementOutcome {
        game.attempt_place(pos, kind, Force::White)
    }

    #[test]
    fn conflict_reports_first_piece_in_scan_order() {
        let mut game = PlacementGame::with_custom_quota(
            Quota::new().with(PieceKind::Rook, 2).with(PieceKind::Knight, 1),
        )
        .unwrap();
        assert_eq!(place(&mut game, Coord::A3, PieceKind::Knight), PlacementOutcome::Placed);
        assert_eq!(place(&mut game, Coord::C1, PieceKind::Rook), PlacementOutcome::Placed);
        // The knight attacks B1.
        let outcome = place(&mut game, Coord::B1, PieceKind::Rook);
        assert_eq!(
            outcome,
            PlacementOutcome::Conflict(ConflictDetail {
                kind: ConflictKind::ExistingThreatensTarget,
                new_piece: PieceKind::Rook,
                existing: Piece::new(PieceKind::Knight, Force::White),
                existing_pos: Coord::A3,
            })
        );
        // A rook on A8 does not get attacked by the knight, but would attack it.
        let PlacementOutcome::Conflict(detail) = place(&mut game, Coord::A8, PieceKind::Rook)
        else {
            panic!("expected a conflict");
        };
        assert_eq!(detail.kind, ConflictKind::NewThreatensExisting);
        assert_eq!(detail.existing_pos, Coord::A3);
        assert_eq!(detail.to_string(), "A Rook here would capture the Knight on A3!");
        assert_eq!(game.error_count(), 2);
    }

    #[test]
    fn pawns_are_inert() {
        let mut game =
            PlacementGame::with_custom_quota(Quota::single(PieceKind::Pawn, 8)).unwrap();
        for pos in [Coord::A1, Coord::A2, Coord::B1, Coord::B2] {
            assert_eq!(place(&mut game, pos, PieceKind::Pawn), PlacementOutcome::Placed);
        }
        assert!(!game.is_solved());
    }

    #[test]
    fn unlisted_kinds_do_not_block_solution() {
        let mut game =
            PlacementGame::with_custom_quota(Quota::single(PieceKind::Rook, 1)).unwrap();
        place(&mut game, Coord::A1, PieceKind::Rook);
        place(&mut game, Coord::C5, PieceKind::Pawn);
        assert!(game.is_solved());
    }

    #[test]
    fn quota_validation() {
        assert_eq!(validate_quota_request(&Quota::new()), Err(QuotaError::Empty));
        assert_eq!(
            validate_quota_request(&Quota::single(PieceKind::Queen, 0)),
            Err(QuotaError::Empty)
        );
        assert_eq!(
            validate_quota_request(&Quota::single(PieceKind::Pawn, 40).with(PieceKind::King, 25)),
            Err(QuotaError::TooManyPieces)
        );
        assert_eq!(validate_quota_request(&Quota::single(PieceKind::Pawn, 64)), Ok(()));
        let mut game = PlacementGame::new();
        assert_eq!(game.set_custom_quota(Quota::new()), Err(QuotaError::Empty));
        assert_eq!(game.mode(), PlacementMode::EightQueens);
    }

    #[test]
    fn quota_serde() {
        let quota: Quota = serde_json::from_str(r#"{"Queen": 8}"#).unwrap();
        assert_eq!(quota, Quota::single(PieceKind::Queen, 8));
        assert_eq!(serde_json::to_string(&quota).unwrap(), r#"{"Queen":8}"#);

        let quota = Quota::single(PieceKind::Rook, 2).with(PieceKind::Knight, 3);
        let json = serde_json::to_string(&quota).unwrap();
        assert_eq!(json, r#"{"Knight":3,"Rook":2}"#);
        assert_eq!(serde_json::from_str::<Quota>(&json).unwrap(), quota);

        let empty: Quota = serde_json::from_str("{}").unwrap();
        assert_eq!(validate_quota_request(&empty), Err(QuotaError::Empty));
        assert!(serde_json::from_str::<Quota>(r#"{"Dragon": 1}"#).is_err());
    }

    #[test]
    fn modes() {
        assert_eq!("14-bishops".parse::<PlacementMode>(), Ok(PlacementMode::FourteenBishops));
        assert_eq!(PlacementMode::SixteenKings.label(), "16-kings");
        assert_eq!(PlacementMode::presets().count(), 4);

        let mut game = PlacementGame::new();
        place(&mut game, Coord::D4, PieceKind::Queen);
        game.change_mode(PlacementMode::EightRooks);
        assert!(game.session().board().is_empty());
        assert_eq!(game.quota().get(PieceKind::Rook), Some(8));
        assert_eq!(game.quota().get(PieceKind::Queen), None);
        game.change_mode(PlacementMode::Custom);
        assert_eq!(game.quota().get(PieceKind::Rook), Some(8));
    }

    #[test]
    fn threat_map() {
        let mut game = PlacementGame::with_mode(PlacementMode::EightRooks);
        place(&mut game, Coord::B2, PieceKind::Rook);
        let map = game.threat_map();
        assert!(!map[1][1]); // occupied, not attacked
        assert!(map[1][7]); // H2
        assert!(map[7][1]); // B8
        assert!(!map[2][2]); // C3
        game.select_kind(PieceKind::Bishop);
        assert!(game.threat_map()[2][2]);
        assert!(game.is_square_threatened(Coord::B7));
        assert!(!game.is_square_threatened(Coord::C3));
    }

    #[test]
    fn scoring() {
        let mut game = PlacementGame::with_mode(PlacementMode::EightRooks);
        place(&mut game, Coord::A1, PieceKind::Rook);
        place(&mut game, Coord::B2, PieceKind::Rook);
        assert_eq!(game.raw_score(), 8);
        assert_eq!(game.session().score(), 8);
        assert_eq!(game.final_score(), 10); // 8 * 1.2 = 9.6
        assert_eq!(place(&mut game, Coord::B2, PieceKind::Rook), PlacementOutcome::CellOccupied);
        assert_eq!(game.final_score(), 7); // 8 * 0.9 = 7.2
        assert!(game.remove_piece(Coord::B2));
        assert!(!game.remove_piece(Coord::B2));
        assert!(game.has_removed_a_piece());
        assert_eq!(game.raw_score(), 4);
        assert_eq!(game.valid_placements(), 1);

        for _ in 0..20 {
            place(&mut game, Coord::A1, PieceKind::Rook);
        }
        assert_eq!(game.final_score(), 1); // 4 * 0.2 = 0.8
    }
}
