//! Scoring module - line clears, T-Spins, drops, combos and level speed
//!
//! Rules:
//! - A T-Spin scores from the T-Spin table and skips normal clear scoring.
//!   Only full T-Spins take the back-to-back multiplier.
//! - A normal clear takes the back-to-back multiplier only when it is a tetris.
//! - Everything is multiplied by the level (starting at 1).
//! - Clear points may be fractional; the session rounds once per placement.

use crate::board::Board;
use crate::config::ScoreTable;
use crate::geometry::{t_corners, LAST_KICK_INDEX};
use crate::piece::ActivePiece;
use crate::types::{PieceKind, TSpinKind, LINES_PER_LEVEL};

/// Score calculation result for one placement's clear
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreResult {
    /// Clear points before rounding
    pub points: f64,
    /// Whether the back-to-back multiplier was applied to this clear
    pub b2b_applied: bool,
    /// Back-to-back flag after this clear
    pub back_to_back: bool,
}

/// Classify a T placement from its four diagonal corners
///
/// Cells outside the board count as filled. Only a T whose last successful
/// action was a rotation is eligible.
pub fn classify_t_spin(board: &Board, piece: &ActivePiece) -> TSpinKind {
    if piece.kind != PieceKind::T {
        return TSpinKind::None;
    }
    let Some(kick) = piece.last_kick else {
        return TSpinKind::None;
    };

    let (cx, cy) = piece.center;
    let filled = t_corners(piece.rotation).map(|(dx, dy)| !board.is_valid(cx + dx, cy + dy));
    let front = filled[0] && filled[1];
    let back = filled[2] || filled[3];

    if (front && back) || kick == LAST_KICK_INDEX {
        TSpinKind::Full
    } else if filled.iter().filter(|&&f| f).count() >= 3 {
        TSpinKind::Mini
    } else {
        TSpinKind::None
    }
}

/// Points for a placement's clear (or T-Spin) and the resulting back-to-back flag
pub fn calculate_score(
    table: &ScoreTable,
    lines: usize,
    tspin: TSpinKind,
    level: u32,
    back_to_back: bool,
) -> ScoreResult {
    let level = level as f64;
    let lines = lines.min(4);

    match tspin {
        TSpinKind::Full | TSpinKind::Mini => {
            let b2b_applied = tspin == TSpinKind::Full && back_to_back;
            let multiplier = if b2b_applied { table.back_to_back } else { 1.0 };
            ScoreResult {
                points: table.t_spin[lines] as f64 * multiplier * level,
                b2b_applied,
                // A T-Spin without lines keeps whatever streak was running.
                back_to_back: if lines > 0 { true } else { back_to_back },
            }
        }
        TSpinKind::None => {
            if lines == 0 {
                return ScoreResult {
                    points: 0.0,
                    b2b_applied: false,
                    back_to_back: false,
                };
            }
            let b2b_applied = lines == 4 && back_to_back;
            let multiplier = if b2b_applied { table.back_to_back } else { 1.0 };
            ScoreResult {
                points: table.normal_clear[lines - 1] as f64 * multiplier * level,
                b2b_applied,
                back_to_back: lines == 4,
            }
        }
    }
}

/// Combo bonus for a clearing placement
///
/// `combo` is -1 with no chain running and 0 on the first clear of a chain.
pub fn combo_bonus(table: &ScoreTable, combo: i32, level: u32) -> u32 {
    if combo <= 0 {
        return 0;
    }
    table.combo * combo as u32 * level
}

/// Points for dropping `rows` rows
pub fn drop_score(table: &ScoreTable, rows: u32, hard_drop: bool) -> u32 {
    if hard_drop {
        rows * table.hard_drop
    } else {
        rows * table.soft_drop
    }
}

/// Level for a cleared-line total; starts at 1 and is capped at `max_level`
pub fn level_for_lines(lines: u32, max_level: u32) -> u32 {
    (1 + lines / LINES_PER_LEVEL).min(max_level)
}

/// Automatic drop interval for a level: `(0.8 - (level - 1) * 0.007)^level` seconds
pub fn fall_interval_ms(level: u32) -> u32 {
    let level = level.max(1);
    let base = 0.8 - (level - 1) as f64 * 0.007;
    let seconds = base.powi(level as i32);
    ((seconds * 1000.0).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    fn t_at(center: (i8, i8), rotation: Rotation, last_kick: Option<u8>) -> ActivePiece {
        let mut piece = ActivePiece::spawn_at(PieceKind::T, center);
        let steps = rotation.index() as i8;
        piece = piece.rotated(steps);
        piece.last_kick = last_kick;
        piece
    }

    #[test]
    fn test_normal_clear_scores() {
        let table = ScoreTable::default();
        assert_eq!(calculate_score(&table, 1, TSpinKind::None, 1, false).points, 100.0);
        assert_eq!(calculate_score(&table, 2, TSpinKind::None, 1, false).points, 300.0);
        assert_eq!(calculate_score(&table, 3, TSpinKind::None, 2, false).points, 1000.0);
        assert_eq!(calculate_score(&table, 4, TSpinKind::None, 1, false).points, 800.0);
    }

    #[test]
    fn test_back_to_back_only_for_tetris() {
        let table = ScoreTable::default();

        let result = calculate_score(&table, 4, TSpinKind::None, 1, true);
        assert_eq!(result.points, 1200.0);
        assert!(result.b2b_applied);
        assert!(result.back_to_back);

        // A single with the flag set gets no multiplier and ends the streak.
        let result = calculate_score(&table, 1, TSpinKind::None, 1, true);
        assert_eq!(result.points, 100.0);
        assert!(!result.b2b_applied);
        assert!(!result.back_to_back);
    }

    #[test]
    fn test_no_clear_resets_back_to_back() {
        let table = ScoreTable::default();
        let result = calculate_score(&table, 0, TSpinKind::None, 3, true);
        assert_eq!(result.points, 0.0);
        assert!(!result.back_to_back);
    }

    #[test]
    fn test_t_spin_scores() {
        let table = ScoreTable::default();
        let result = calculate_score(&table, 2, TSpinKind::Full, 1, false);
        assert_eq!(result.points, 1200.0);
        assert!(result.back_to_back);

        let result = calculate_score(&table, 1, TSpinKind::Full, 2, true);
        assert_eq!(result.points, 800.0 * 1.5 * 2.0);
        assert!(result.b2b_applied);
    }

    #[test]
    fn test_mini_t_spin_never_gets_multiplier() {
        let table = ScoreTable::default();
        let result = calculate_score(&table, 1, TSpinKind::Mini, 1, true);
        assert_eq!(result.points, 800.0);
        assert!(!result.b2b_applied);
        assert!(result.back_to_back);
    }

    #[test]
    fn test_zero_line_t_spin_keeps_flag() {
        let table = ScoreTable::default();
        assert!(calculate_score(&table, 0, TSpinKind::Full, 1, true).back_to_back);
        assert!(!calculate_score(&table, 0, TSpinKind::Mini, 1, false).back_to_back);
        assert_eq!(calculate_score(&table, 0, TSpinKind::Mini, 3, false).points, 1200.0);
    }

    #[test]
    fn test_combo_bonus() {
        let table = ScoreTable::default();
        assert_eq!(combo_bonus(&table, -1, 1), 0);
        assert_eq!(combo_bonus(&table, 0, 1), 0);
        assert_eq!(combo_bonus(&table, 1, 1), 50);
        assert_eq!(combo_bonus(&table, 3, 2), 300);
    }

    #[test]
    fn test_drop_scores() {
        let table = ScoreTable::default();
        assert_eq!(drop_score(&table, 10, false), 10);
        assert_eq!(drop_score(&table, 10, true), 20);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_lines(0, 15), 1);
        assert_eq!(level_for_lines(9, 15), 1);
        assert_eq!(level_for_lines(10, 15), 2);
        assert_eq!(level_for_lines(29, 15), 3);
        assert_eq!(level_for_lines(1000, 15), 15);
    }

    #[test]
    fn test_fall_intervals() {
        assert_eq!(fall_interval_ms(1), 800);
        // 0.793^2 = 0.628849
        assert_eq!(fall_interval_ms(2), 629);
        assert!(fall_interval_ms(15) < fall_interval_ms(14));
        assert!(fall_interval_ms(15) >= 1);
    }

    #[test]
    fn test_t_spin_requires_rotation() {
        let board = Board::new();
        let piece = t_at((0, 0), Rotation::North, None);
        assert_eq!(classify_t_spin(&board, &piece), TSpinKind::None);
    }

    #[test]
    fn test_t_spin_full_from_corners() {
        let mut board = Board::new();
        // Pointing down into a slot: both lower corners and one upper corner.
        board.set(3, 4, Some(PieceKind::I));
        board.set(5, 4, Some(PieceKind::I));
        board.set(3, 6, Some(PieceKind::I));
        let piece = t_at((4, 5), Rotation::South, Some(0));
        assert_eq!(classify_t_spin(&board, &piece), TSpinKind::Full);
    }

    #[test]
    fn test_t_spin_mini_from_back_corners() {
        let mut board = Board::new();
        board.set(3, 4, Some(PieceKind::I));
        board.set(5, 4, Some(PieceKind::I));
        board.set(3, 6, Some(PieceKind::I));
        // Pointing up: only one front corner is filled.
        let piece = t_at((4, 5), Rotation::North, Some(1));
        assert_eq!(classify_t_spin(&board, &piece), TSpinKind::Mini);
    }

    #[test]
    fn test_last_kick_is_always_full() {
        let board = Board::new();
        let piece = t_at((4, 5), Rotation::East, Some(LAST_KICK_INDEX));
        assert_eq!(classify_t_spin(&board, &piece), TSpinKind::Full);
    }

    #[test]
    fn test_walls_count_as_filled() {
        let mut board = Board::new();
        board.set(1, 1, Some(PieceKind::O));
        // Against the floor and left wall: three corners out of bounds.
        let piece = t_at((0, 0), Rotation::East, Some(0));
        assert_ne!(classify_t_spin(&board, &piece), TSpinKind::None);
    }
}
