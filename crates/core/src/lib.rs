//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules engine: board, active piece, rotation and kicks,
//! gravity and lock timing, line clearing and scoring. It has **no dependencies**
//! on terminal I/O or input devices; the host feeds it key presses and held
//! keys and reads back [`GameSnapshot`]s.
//!
//! # Module Structure
//!
//! - [`geometry`]: spawn shapes and SRS offset tables
//! - [`board`]: 10x26 placed-tile grid with occupancy queries and row clearing
//! - [`piece`]: active and ghost piece values
//! - [`rng`]: 7-bag random piece generation
//! - [`controller`]: active piece, ghost, hold slot and bag; moves and rotations
//! - [`phase`]: piece lifecycle phases and countdown timers
//! - [`scoring`]: T-Spin detection, clear/drop/combo points, level speed
//! - [`stats`]: statistics, lock events and the game-over record
//! - [`config`]: immutable session configuration
//! - [`game_state`]: one game session tying everything together
//! - [`snapshot`]: read-only view for presentation
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every aligned run of 7 pieces holds each kind once
//! - **SRS Rotation**: offset-table kicks, 5 tests per turn (1 for O); a 180°
//!   turn is two chained quarter turns and is all-or-nothing
//! - **Lock Delay**: 500ms once the piece cannot fall, restarted by up to 15
//!   player moves per lock phase; reaching a new lowest row forgives them
//! - **T-Spin Detection**: diagonal corners around the T center, walls count
//! - **Scoring**: guideline tables times level, back-to-back ×1.5, combos
//! - **Game Over**: block out at spawn, lock out above the skyline
//!
//! # Example
//!
//! ```
//! use srs_tetris_core::{GameConfig, GameState};
//! use srs_tetris_types::{GameAction, HeldKeys, TICK_MS};
//!
//! let mut game = GameState::new(GameConfig::with_seed(12345));
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.tick(TICK_MS, HeldKeys::NONE);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop awards 2 points per row.
//! assert!(game.score() > 0);
//! ```

pub mod board;
pub mod config;
pub mod controller;
pub mod game_state;
pub mod geometry;
pub mod phase;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod stats;

pub use srs_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, GameConfig, ScoreTable};
pub use controller::{Movement, PieceController};
pub use game_state::GameState;
pub use geometry::{kick_offsets, spawn_shape, MinoOffset, PieceShape};
pub use phase::{Phase, Timers};
pub use piece::{ActivePiece, GhostPiece};
pub use rng::{BagQueue, SimpleRng};
pub use scoring::{calculate_score, classify_t_spin, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use stats::{GameOver, GameOverSink, LockEvent, Statistics};
