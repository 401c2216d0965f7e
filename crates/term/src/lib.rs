//! Terminal presentation for the puzzle.
//!
//! Renders [`GameSnapshot`](crate::core::GameSnapshot)s into a plain
//! framebuffer and flushes that to the terminal with crossterm. No widget
//! toolkit and no layout engine; the view owns its coordinates.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use srs_tetris_core as core;
pub use srs_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, keyboard_flags, TerminalRenderer};
