//! Active and ghost piece values.
//!
//! Pieces are plain `Copy` values: every move or rotation builds a candidate
//! value, and only a validated candidate replaces the current one.

use arrayvec::ArrayVec;

use crate::geometry::{rotate_offset, spawn_shape, MinoOffset, PieceShape};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT};

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Rotational center (not necessarily a tile)
    pub center: MinoOffset,
    /// Absolute board coordinates of the four tiles
    pub tiles: PieceShape,
    pub rotation: Rotation,
    /// Lowest row any tile has reached since spawn
    pub lowest_line: i8,
    /// Lock resets consumed in the current lock phase
    pub lock_counter: u8,
    /// Kick test that succeeded if the last successful action was a rotation
    pub last_kick: Option<u8>,
}

impl ActivePiece {
    /// Build a piece in spawn orientation around `center`
    pub fn spawn_at(kind: PieceKind, center: MinoOffset) -> Self {
        let tiles = spawn_shape(kind).map(|(dx, dy)| (center.0 + dx, center.1 + dy));
        Self {
            kind,
            center,
            tiles,
            rotation: Rotation::North,
            lowest_line: BOARD_HEIGHT as i8,
            lock_counter: 0,
            last_kick: None,
        }
    }

    /// Candidate shifted by (dx, dy)
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            center: (self.center.0 + dx, self.center.1 + dy),
            tiles: self.tiles.map(|(x, y)| (x + dx, y + dy)),
            ..*self
        }
    }

    /// Candidate rotated `steps` quarter turns around the center, before any kick
    pub fn rotated(&self, steps: i8) -> Self {
        let (cx, cy) = self.center;
        Self {
            tiles: self.tiles.map(|(x, y)| {
                let (dx, dy) = rotate_offset((x - cx, y - cy), steps);
                (cx + dx, cy + dy)
            }),
            rotation: self.rotation.turned(steps),
            ..*self
        }
    }

    /// Lowest row among the tiles
    pub fn min_y(&self) -> i8 {
        self.tiles.iter().map(|&(_, y)| y).min().unwrap_or(0)
    }

    /// Distinct rows covered by the tiles, bottom first
    pub fn rows(&self) -> ArrayVec<i8, 4> {
        let mut rows: ArrayVec<i8, 4> = ArrayVec::new();
        for &(_, y) in &self.tiles {
            if !rows.contains(&y) {
                rows.push(y);
            }
        }
        rows.sort_unstable();
        rows
    }
}

/// Read-only projection of the active piece onto its landing row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GhostPiece {
    pub center: MinoOffset,
    pub tiles: PieceShape,
}

impl From<&ActivePiece> for GhostPiece {
    fn from(piece: &ActivePiece) -> Self {
        Self {
            center: piece.center,
            tiles: piece.tiles,
        }
    }
}

impl GhostPiece {
    pub fn min_y(&self) -> i8 {
        self.tiles.iter().map(|&(_, y)| y).min().unwrap_or(0)
    }
}
