//! Scoring tables, level progression and fall speed

use srs_tetris::core::scoring::{combo_bonus, drop_score, fall_interval_ms, level_for_lines};
use srs_tetris::core::{calculate_score, ScoreTable};
use srs_tetris::types::{TSpinKind, MAX_LEVEL};

#[test]
fn test_normal_clears_times_level() {
    let table = ScoreTable::default();
    let expected = [100.0, 300.0, 500.0, 800.0];
    for (lines, points) in (1..=4).zip(expected) {
        let r = calculate_score(&table, lines, TSpinKind::None, 3, false);
        assert_eq!(r.points, points * 3.0);
        assert!(!r.b2b_applied);
    }
}

#[test]
fn test_back_to_back_tetris() {
    let table = ScoreTable::default();
    let r = calculate_score(&table, 4, TSpinKind::None, 1, true);
    assert_eq!(r.points, 1200.0);
    assert!(r.b2b_applied);
    assert!(r.back_to_back);

    // A triple is not difficult, so it neither gets the bonus nor keeps the flag.
    let r = calculate_score(&table, 3, TSpinKind::None, 1, true);
    assert_eq!(r.points, 500.0);
    assert!(!r.back_to_back);
}

#[test]
fn test_full_t_spin_double_with_back_to_back() {
    let table = ScoreTable::default();
    let r = calculate_score(&table, 2, TSpinKind::Full, 2, true);
    assert_eq!(r.points, 1200.0 * 1.5 * 2.0);
    assert!(r.b2b_applied);
}

#[test]
fn test_mini_t_spin_never_takes_back_to_back() {
    let table = ScoreTable::default();
    let r = calculate_score(&table, 1, TSpinKind::Mini, 1, true);
    assert_eq!(r.points, 800.0);
    assert!(!r.b2b_applied);
    assert!(r.back_to_back);
}

#[test]
fn test_zero_line_placements() {
    let table = ScoreTable::default();

    let r = calculate_score(&table, 0, TSpinKind::Full, 1, true);
    assert_eq!(r.points, 400.0 * 1.5);
    assert!(r.back_to_back);

    let r = calculate_score(&table, 0, TSpinKind::None, 5, true);
    assert_eq!(r.points, 0.0);
    assert!(!r.back_to_back);
}

#[test]
fn test_drop_and_combo_points() {
    let table = ScoreTable::default();
    assert_eq!(drop_score(&table, 7, false), 7);
    assert_eq!(drop_score(&table, 7, true), 14);

    assert_eq!(combo_bonus(&table, -1, 4), 0);
    assert_eq!(combo_bonus(&table, 0, 4), 0);
    assert_eq!(combo_bonus(&table, 3, 2), 300);
}

#[test]
fn test_level_progression() {
    assert_eq!(level_for_lines(0, MAX_LEVEL), 1);
    assert_eq!(level_for_lines(9, MAX_LEVEL), 1);
    assert_eq!(level_for_lines(10, MAX_LEVEL), 2);
    assert_eq!(level_for_lines(1000, MAX_LEVEL), MAX_LEVEL);
}

#[test]
fn test_fall_interval_speeds_up() {
    assert_eq!(fall_interval_ms(1), 800);
    assert_eq!(fall_interval_ms(2), 629);

    let mut last = u32::MAX;
    for level in 1..=MAX_LEVEL {
        let interval = fall_interval_ms(level);
        assert!(interval < last);
        assert!(interval >= 1);
        last = interval;
    }
}
