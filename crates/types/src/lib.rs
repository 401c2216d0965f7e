//! Shared types and constants for the rules engine and its collaborators.
//!
//! Everything here is plain data with no dependencies, so the core, the input
//! mapper and the terminal presentation can all agree on one vocabulary.
//!
//! # Coordinates
//!
//! The board is addressed as `(x, y)` with `x` growing to the right and `y`
//! growing **upwards**: row 0 is the bottom row.
//!
//! - **Width**: 10 columns (0-9)
//! - **Height**: 26 rows (0-25); rows 0-19 are visible, rows 20-25 sit above the
//!   skyline and give room for spawning and rotating
//! - **Spawn anchor**: rotational center at (4, 20)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a resting piece locks |
//! | `LOCK_RESET_LIMIT` | 15 | Max lock timer resets per lock phase |
//! | `DEFAULT_DAS_MS` | 100 | Delay before a held direction auto-repeats |
//! | `DEFAULT_ARR_MS` | 5 | Interval between auto-repeat shifts |
//! | `DEFAULT_DROP_ARR_MS` | 0 | Interval between held soft-drop rows (0 = instant) |
//!
//! # Examples
//!
//! ```
//! use srs_tetris_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::North.turned(2), Rotation::South);
//! assert_eq!(GameAction::from_str("rotate180"), Some(GameAction::Rotate180));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 26);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells, including the hidden rows above the skyline
pub const BOARD_HEIGHT: u8 = 26;

/// Number of rows drawn to the player (the skyline sits on top of row 19)
pub const VISIBLE_HEIGHT: u8 = 20;

/// Rotational center a freshly spawned piece is placed around
pub const SPAWN_CENTER: (i8, i8) = (4, 20);

/// Number of upcoming pieces shown in the preview
pub const PREVIEW_COUNT: usize = 5;

/// Upper bound for a configured preview length
pub const MAX_PREVIEW_COUNT: usize = 7;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Lock delay once a piece can no longer fall (0.5s)
pub const LOCK_DELAY_MS: u32 = 500;

/// Maximum number of lock timer resets per lock phase (15)
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 15;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 100;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 5;

/// Held soft-drop repeat interval in milliseconds.
pub const DEFAULT_DROP_ARR_MS: u32 = 0;

/// Points for clearing 1-4 lines without a T-Spin (multiplied by level)
pub const NORMAL_CLEAR_SCORES: [u32; 4] = [100, 300, 500, 800];

/// Points for a T-Spin clearing 0-3 lines (multiplied by level)
///
/// Mini T-Spins read the same table but never take the back-to-back multiplier.
pub const T_SPIN_SCORES: [u32; 4] = [400, 800, 1200, 1600];

/// Multiplier applied to consecutive difficult clears
pub const BACK_TO_BACK_MULTIPLIER: f64 = 1.5;

/// Points per row for a held soft drop
pub const SOFT_DROP_MULTIPLIER: u32 = 1;

/// Points per row for a hard drop
pub const HARD_DROP_MULTIPLIER: u32 = 2;

/// Points per combo step (multiplied by combo index and level)
pub const COMBO_MULTIPLIER: u32 = 50;

/// The seven tetromino piece kinds
///
/// The kind only decides shape, kicks and color; the board stores it as an
/// identity tag for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in bag order (before shuffling)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Non-zero cell code used by snapshots (0 means empty)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Orientation states following the Super Rotation System (SRS)
///
/// - **North**: Spawn orientation (state 0)
/// - **East**: Rotated 90° clockwise (state 1)
/// - **South**: Rotated 180° (state 2)
/// - **West**: Rotated 90° counter-clockwise (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        self.turned(1)
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        self.turned(-1)
    }

    /// Orientation after `steps` quarter turns clockwise (negative = counter-clockwise)
    pub fn turned(&self, steps: i8) -> Self {
        Self::from_index((self.index() as i8 + steps).rem_euclid(4) as usize)
    }

    /// Number of clockwise quarter turns from spawn (0-3)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`] (wraps modulo 4)
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Discrete actions delivered as key-press events
///
/// The core never sees physical key codes; mapping physical input onto these
/// actions is the job of the input crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left (and arm auto-shift)
    MoveLeft,
    /// Move piece one cell right (and arm auto-shift)
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Rotate piece 180° (all-or-nothing)
    Rotate180,
    /// Swap the active piece with the hold slot
    Hold,
    /// Drop to the ghost position and lock immediately
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Restart the game (also the only action honored after game over)
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("softDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "rotate180" => Some(GameAction::Rotate180),
            "hold" => Some(GameAction::Hold),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Rotate180 => "rotate180",
            GameAction::Hold => "hold",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Actions whose held state is sampled every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeldAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
}

/// Held-key state for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub soft_drop: bool,
}

impl HeldKeys {
    /// Nothing held
    pub const NONE: HeldKeys = HeldKeys {
        left: false,
        right: false,
        soft_drop: false,
    };

    pub fn is_held(&self, action: HeldAction) -> bool {
        match action {
            HeldAction::MoveLeft => self.left,
            HeldAction::MoveRight => self.right,
            HeldAction::SoftDrop => self.soft_drop,
        }
    }
}

/// T-Spin classification of a placement
///
/// - **None**: Not a T-spin
/// - **Mini**: at least 3 diagonal corners filled, but not the full pattern
/// - **Full**: both front corners and a back corner filled, or the last kick test used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TSpinKind {
    None,
    Mini,
    Full,
}

impl TSpinKind {
    /// Returns `None` for `TSpinKind::None`, `Some("mini")` / `Some("full")` otherwise.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            TSpinKind::None => None,
            TSpinKind::Mini => Some("mini"),
            TSpinKind::Full => Some("full"),
        }
    }
}

/// Why a game session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// A new piece could not be placed at its spawn position
    BlockOut,
    /// A piece locked entirely above the visible playfield
    LockOut,
}

impl GameOverReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverReason::BlockOut => "block_out",
            GameOverReason::LockOut => "lock_out",
        }
    }

    /// Human-readable banner text
    pub fn title(&self) -> &'static str {
        match self {
            GameOverReason::BlockOut => "BLOCK OUT",
            GameOverReason::LockOut => "LOCK OUT",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guideline_timing_defaults() {
        assert_eq!(LOCK_DELAY_MS, 500);
        assert_eq!(LOCK_RESET_LIMIT, 15);
        assert_eq!(MAX_LEVEL, 15);
        assert_eq!(DEFAULT_DAS_MS, 100);
        assert_eq!(DEFAULT_ARR_MS, 5);
        assert_eq!(DEFAULT_DROP_ARR_MS, 0);
    }

    #[test]
    fn hidden_rows_leave_spawn_room() {
        assert_eq!(BOARD_HEIGHT - VISIBLE_HEIGHT, 6);
        assert_eq!(SPAWN_CENTER.1 as u8, VISIBLE_HEIGHT);
        assert!(PREVIEW_COUNT <= MAX_PREVIEW_COUNT);
    }

    #[test]
    fn rotation_turns_wrap() {
        assert_eq!(Rotation::West.turned(1), Rotation::North);
        assert_eq!(Rotation::North.turned(-1), Rotation::West);
        assert_eq!(Rotation::East.turned(2), Rotation::West);
        assert_eq!(Rotation::from_index(Rotation::South.index()), Rotation::South);
    }

    #[test]
    fn held_keys_query_by_action() {
        let held = HeldKeys {
            left: true,
            right: false,
            soft_drop: true,
        };
        assert!(held.is_held(HeldAction::MoveLeft));
        assert!(!held.is_held(HeldAction::MoveRight));
        assert!(held.is_held(HeldAction::SoftDrop));
        assert_eq!(HeldKeys::NONE, HeldKeys::default());
    }
}
