//! Statistics, lock events and the game-over record

use serde::{Serialize, Serializer};

use crate::types::{GameOverReason, PieceKind, TSpinKind};

/// Cumulative statistics for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub score: u32,
    /// Clears of 1, 2, 3 and 4 lines
    pub clears: [u32; 4],
    /// Total lines cleared
    pub lines: u32,
    pub level: u32,
    /// Full T-Spins by lines cleared (0-3)
    pub t_spins: [u32; 4],
    /// Mini T-Spins by lines cleared (0-3)
    pub mini_t_spins: [u32; 4],
    pub back_to_back: bool,
    /// -1 when no chain is running
    pub combo: i32,
    pub max_combo: i32,
    pub pieces_placed: u32,
}

impl Statistics {
    pub fn new() -> Self {
        Self {
            score: 0,
            clears: [0; 4],
            lines: 0,
            level: 1,
            t_spins: [0; 4],
            mini_t_spins: [0; 4],
            back_to_back: false,
            combo: -1,
            max_combo: -1,
            pieces_placed: 0,
        }
    }

    /// Count a placement's clear and T-Spin
    pub fn record_clear(&mut self, lines: usize, tspin: TSpinKind) {
        let lines = lines.min(4);
        if lines > 0 {
            self.clears[lines - 1] += 1;
            self.lines += lines as u32;
        }
        match tspin {
            TSpinKind::Full => self.t_spins[lines.min(3)] += 1,
            TSpinKind::Mini => self.mini_t_spins[lines.min(3)] += 1,
            TSpinKind::None => {}
        }
    }

    /// Advance or break the combo chain
    pub fn record_combo(&mut self, cleared: bool) {
        if cleared {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
        } else {
            self.combo = -1;
        }
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

/// What happened when the last piece locked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub t_spin: TSpinKind,
    /// Points awarded by this placement, drop bonus included
    pub points: u32,
    pub combo: i32,
    pub back_to_back: bool,
}

/// Final record of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOver {
    #[serde(serialize_with = "serialize_reason")]
    pub reason: GameOverReason,
    pub stats: Statistics,
}

fn serialize_reason<S: Serializer>(reason: &GameOverReason, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(reason.as_str())
}

/// Receiver for finished games (high-score tables, logs, ...)
pub trait GameOverSink {
    fn game_over(&mut self, record: &GameOver);
}

impl<F: FnMut(&GameOver)> GameOverSink for F {
    fn game_over(&mut self, record: &GameOver) {
        self(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_statistics() {
        let stats = Statistics::new();
        assert_eq!(stats.level, 1);
        assert_eq!(stats.combo, -1);
        assert_eq!(stats.score, 0);
    }

    #[test]
    fn test_record_clear_counts() {
        let mut stats = Statistics::new();
        stats.record_clear(4, TSpinKind::None);
        stats.record_clear(2, TSpinKind::Full);
        stats.record_clear(0, TSpinKind::Mini);
        assert_eq!(stats.clears, [0, 1, 0, 1]);
        assert_eq!(stats.lines, 6);
        assert_eq!(stats.t_spins, [0, 0, 1, 0]);
        assert_eq!(stats.mini_t_spins, [1, 0, 0, 0]);
    }

    #[test]
    fn test_combo_chain() {
        let mut stats = Statistics::new();
        stats.record_combo(true);
        stats.record_combo(true);
        stats.record_combo(true);
        assert_eq!(stats.combo, 2);
        stats.record_combo(false);
        assert_eq!(stats.combo, -1);
        assert_eq!(stats.max_combo, 2);
    }

    #[test]
    fn test_game_over_serializes_reason_as_string() {
        let record = GameOver {
            reason: GameOverReason::LockOut,
            stats: Statistics::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["reason"], "lock_out");
        assert_eq!(json["stats"]["level"], 1);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        let mut sink = |record: &GameOver| seen.push(record.reason);
        sink.game_over(&GameOver {
            reason: GameOverReason::BlockOut,
            stats: Statistics::new(),
        });
        assert_eq!(seen, vec![GameOverReason::BlockOut]);
    }
}
