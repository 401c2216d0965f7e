//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]s and tracks
//! which keys are held so the host can hand the core one [`HeldKeys`] sample
//! per tick. Terminals that never report key releases are handled with a
//! short auto-release timeout.
//!
//! [`HeldKeys`]: crate::types::HeldKeys

pub mod handler;
pub mod map;

pub use srs_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, held_action, should_quit};
