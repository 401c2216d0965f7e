//! Geometry module - spawn shapes and SRS offset tables
//!
//! Shapes are given relative to the piece's rotational center, with `y`
//! growing upwards. Kicks are derived from per-orientation offset tables:
//! the kick for `from -> to` at test `i` is `offset[from][i] - offset[to][i]`.
//! Reference: https://tetris.wiki/Super_Rotation_System

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the rotational center
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the rotational center
pub type PieceShape = [MinoOffset; 4];

/// Maximum number of kick candidates tried per rotation
pub const MAX_KICKS: usize = 5;

/// Index of the last kick candidate; a T rotation landing on it always scores as a full T-Spin
pub const LAST_KICK_INDEX: u8 = (MAX_KICKS - 1) as u8;

/// Offsets for one orientation; O uses only the first column
type OffsetRow = [MinoOffset; MAX_KICKS];

/// Get the spawn (North) shape for a piece kind
pub fn spawn_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
        PieceKind::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::L => [(1, 1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::O => [(0, 1), (1, 1), (0, 0), (1, 0)],
        PieceKind::S => [(0, 1), (1, 1), (-1, 0), (0, 0)],
        PieceKind::T => [(0, 1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::Z => [(-1, 1), (0, 1), (0, 0), (1, 0)],
    }
}

/// J, L, S, T and Z share one table
const JLSTZ_OFFSETS: [OffsetRow; 4] = [
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I rotates around a tile corner, so its first column also re-centers it
const I_OFFSETS: [OffsetRow; 4] = [
    [(0, 0), (-1, 0), (2, 0), (-1, 0), (2, 0)],
    [(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],
    [(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)],
    [(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],
];

/// O never kicks; its single offset only keeps the square in place
const O_OFFSETS: [OffsetRow; 4] = [
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, -1), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(-1, -1), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(-1, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
];

/// Number of kick candidates a piece kind tries
pub fn kick_count(kind: PieceKind) -> usize {
    match kind {
        PieceKind::O => 1,
        _ => MAX_KICKS,
    }
}

/// Offset table row for a kind in a given orientation
pub fn offsets(kind: PieceKind, rotation: Rotation) -> &'static [MinoOffset] {
    let table = match kind {
        PieceKind::I => &I_OFFSETS,
        PieceKind::O => &O_OFFSETS,
        _ => &JLSTZ_OFFSETS,
    };
    &table[rotation.index()][..kick_count(kind)]
}

/// Kick candidates for a single quarter turn, in the order they must be tried
pub fn kick_offsets(kind: PieceKind, from: Rotation, to: Rotation) -> ArrayVec<MinoOffset, MAX_KICKS> {
    offsets(kind, from)
        .iter()
        .zip(offsets(kind, to))
        .map(|(&(fx, fy), &(tx, ty))| (fx - tx, fy - ty))
        .collect()
}

/// Rotate an offset a quarter turn clockwise (`(dx, dy) -> (dy, -dx)`)
#[inline(always)]
pub fn rotate_cw(offset: MinoOffset) -> MinoOffset {
    (offset.1, -offset.0)
}

/// Rotate an offset a quarter turn counter-clockwise (`(dx, dy) -> (-dy, dx)`)
#[inline(always)]
pub fn rotate_ccw(offset: MinoOffset) -> MinoOffset {
    (-offset.1, offset.0)
}

/// Rotate an offset `steps` quarter turns (positive = clockwise)
pub fn rotate_offset(offset: MinoOffset, steps: i8) -> MinoOffset {
    let mut out = offset;
    if steps >= 0 {
        for _ in 0..steps {
            out = rotate_cw(out);
        }
    } else {
        for _ in 0..-steps {
            out = rotate_ccw(out);
        }
    }
    out
}

/// Diagonal corners around a T center, front pair first, aligned with `rotation`
///
/// At spawn the T points up, so the front corners are the two upper diagonals.
pub fn t_corners(rotation: Rotation) -> [MinoOffset; 4] {
    const NORTH: [MinoOffset; 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];
    let steps = rotation.index() as i8;
    NORTH.map(|c| rotate_offset(c, steps))
}
