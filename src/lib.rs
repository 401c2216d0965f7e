//! SRS Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests and benches can use `srs_tetris::{core,input,term,types}`.

pub use srs_tetris_core as core;
pub use srs_tetris_input as input;
pub use srs_tetris_term as term;
pub use srs_tetris_types as types;
