use arrayvec::ArrayVec;

use crate::geometry::PieceShape;
use crate::phase::{Phase, Timers};
use crate::piece::ActivePiece;
use crate::stats::Statistics;
use crate::types::{GameOverReason, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, MAX_PREVIEW_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub tiles: PieceShape,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            tiles: value.tiles,
        }
    }
}

/// Read-only view of a session between ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Cell codes (0 = empty), row 0 at the bottom
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<PieceShape>,
    pub hold: Option<PieceKind>,
    pub hold_ready: bool,
    pub preview: ArrayVec<PieceKind, MAX_PREVIEW_COUNT>,
    pub stats: Statistics,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: Option<GameOverReason>,
    pub episode_id: u32,
    pub seed: u32,
    pub timers: Timers,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost = None;
        self.hold = None;
        self.hold_ready = true;
        self.preview.clear();
        self.stats = Statistics::new();
        self.phase = Phase::Generation;
        self.paused = false;
        self.game_over = None;
        self.episode_id = 0;
        self.seed = 0;
        self.timers = Timers::default();
    }

    pub fn playable(&self) -> bool {
        self.game_over.is_none() && !self.paused
    }

    /// Cell code at (x, y), 0 for empty or out of range
    pub fn cell(&self, x: i8, y: i8) -> u8 {
        if x < 0 || y < 0 {
            return 0;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(0)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            hold: None,
            hold_ready: true,
            preview: ArrayVec::new(),
            stats: Statistics::new(),
            phase: Phase::Generation,
            paused: false,
            game_over: None,
            episode_id: 0,
            seed: 0,
            timers: Timers::default(),
        };
        s.clear();
        s
    }
}
