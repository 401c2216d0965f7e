//! Game state module - one game session
//!
//! Ties the board, piece controller, phase machine and scoring together. Key
//! presses arrive through [`GameState::apply_action`]; held keys and elapsed
//! time arrive through [`GameState::tick`], which handles auto-shift and soft
//! drop before advancing gravity and lock timing.

use crate::board::Board;
use crate::config::GameConfig;
use crate::controller::{Movement, PieceController};
use crate::phase::{timer_ms, Phase, PhaseMachine, Timers};
use crate::piece::{ActivePiece, GhostPiece};
use crate::scoring::{
    calculate_score, classify_t_spin, combo_bonus, drop_score, fall_interval_ms, level_for_lines,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::stats::{GameOver, GameOverSink, LockEvent, Statistics};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    controller: PieceController,
    machine: PhaseMachine,
    stats: Statistics,
    fall_interval_ms: u32,
    /// Direction armed by the last move press, repeated while held
    shift: Option<HeldAction>,
    /// Soft drop was held on the previous tick
    soft_drop_held: bool,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
    game_over: Option<GameOverReason>,
    /// Game-over record not yet handed to a sink
    pending_game_over: Option<GameOver>,
    paused: bool,
    started: bool,
}

impl GameState {
    /// Create a new game; `config` is copied in and never re-read
    pub fn new(config: GameConfig) -> Self {
        let stats = Statistics::new();
        Self {
            board: Board::new(),
            controller: PieceController::new(config.seed, config.preview_count),
            machine: PhaseMachine::new(),
            fall_interval_ms: fall_interval_ms(stats.level),
            stats,
            shift: None,
            soft_drop_held: false,
            episode_id: 0,
            last_event: None,
            game_over: None,
            pending_game_over: None,
            paused: false,
            started: false,
            config,
        }
    }

    /// Default configuration with the given RNG seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(GameConfig::with_seed(seed))
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn(false);
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn score(&self) -> u32 {
        self.stats.score
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    pub fn lines(&self) -> u32 {
        self.stats.lines
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn timers(&self) -> &Timers {
        self.machine.timers()
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.controller.hold()
    }

    pub fn hold_ready(&self) -> bool {
        self.controller.hold_ready()
    }

    /// Upcoming kinds, next first
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.controller.bag().preview()
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.controller.active()
    }

    pub fn ghost(&self) -> Option<&GhostPiece> {
        self.controller.ghost()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.controller.active().map(ActiveSnapshot::from);
        out.ghost = self.controller.ghost().map(|g| g.tiles);
        out.hold = self.controller.hold();
        out.hold_ready = self.controller.hold_ready();
        out.preview.clear();
        out.preview.extend(self.preview().take(MAX_PREVIEW_COUNT));
        out.stats = self.stats;
        out.phase = self.machine.phase();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.seed = self.controller.bag().seed();
        out.timers = *self.machine.timers();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Take the game-over record, once
    pub fn take_game_over(&mut self) -> Option<GameOver> {
        self.pending_game_over.take()
    }

    /// Hand a pending game-over record to `sink`; true if one was delivered
    pub fn notify_game_over<S: GameOverSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        match self.pending_game_over.take() {
            Some(record) => {
                sink.game_over(&record);
                true
            }
            None => false,
        }
    }

    /// Generation: bring in the next piece and start it falling
    fn spawn(&mut self, from_hold: bool) {
        self.machine.enter_generation();
        match self.controller.spawn_next(&self.board, from_hold) {
            Ok(()) => self.machine.enter_falling(self.fall_interval_ms),
            Err(reason) => self.end_game(reason),
        }
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.game_over = Some(reason);
        self.shift = None;
        self.soft_drop_held = false;
        self.pending_game_over = Some(GameOver {
            reason,
            stats: self.stats,
        });
    }

    /// A new low pulls a locking piece back into the falling phase
    fn force_falling(&mut self) {
        if self.machine.phase() == Phase::Lock {
            self.machine.enter_falling(self.fall_interval_ms);
        }
    }

    /// Restart the lock timer after a player move, while resets remain
    fn reset_lock_timer(&mut self) {
        if self.machine.phase() != Phase::Lock {
            return;
        }
        if self.controller.consume_lock_reset(self.config.max_lock_resets) {
            self.machine.restart_lock(self.config.lock_delay_ms);
        }
    }

    /// Bookkeeping shared by every player-initiated move or rotation attempt
    fn after_player_action(&mut self, movement: Movement) -> bool {
        if movement == Movement::NewLow {
            self.force_falling();
        }
        // Blocked attempts count too, so auto-repeat into a wall while
        // locking spends one reset per repeat.
        self.reset_lock_timer();
        movement.succeeded()
    }

    fn player_move(&mut self, dx: i8) -> bool {
        let movement = self.controller.move_by(&self.board, dx, 0);
        self.after_player_action(movement)
    }

    fn player_slide(&mut self, dx: i8) -> bool {
        let mut moved = false;
        while self.controller.move_by(&self.board, dx, 0).succeeded() {
            moved = true;
        }
        let movement = if moved { Movement::Moved } else { Movement::Blocked };
        self.after_player_action(movement)
    }

    fn player_rotate(&mut self, steps: i8) -> bool {
        let movement = self.controller.rotate(&self.board, steps);
        self.after_player_action(movement)
    }

    /// Press of a move key: shift once and arm auto-shift for that direction
    fn press_shift(&mut self, direction: HeldAction, dx: i8) -> bool {
        self.shift = Some(direction);
        let (das, arr, _) = self.machine.shift_timers_mut();
        *das = timer_ms(self.config.das_ms);
        *arr = timer_ms(self.config.arr_ms);
        self.player_move(dx)
    }

    /// Swap the active piece with the hold slot, once per spawn
    pub fn hold(&mut self) -> bool {
        if !self.controller.hold_ready() || self.controller.active().is_none() {
            return false;
        }
        self.spawn(true);
        true
    }

    /// Drop to the ghost position and place immediately
    pub fn hard_drop(&mut self) -> bool {
        if self.controller.active().is_none() {
            return false;
        }
        self.place();
        true
    }

    /// Lock the active piece onto the board, score it and spawn the next one
    pub fn place(&mut self) {
        let rows_dropped = self.controller.drop_distance();
        let Some(piece) = self.controller.take_landed() else {
            return;
        };

        self.machine.enter_iterate();
        self.board.place(&piece.tiles, piece.kind);
        self.stats.pieces_placed += 1;

        if piece.tiles.iter().all(|&(_, y)| y >= VISIBLE_HEIGHT as i8) {
            self.machine.enter_completion();
            self.end_game(GameOverReason::LockOut);
            return;
        }

        // Corners are read before rows collapse.
        let tspin = classify_t_spin(&self.board, &piece);
        let lines = self.board.clear_full_rows(&piece.rows()).len();

        self.machine.enter_completion();
        let table = self.config.scores;
        let level = self.stats.level;
        let result = calculate_score(&table, lines, tspin, level, self.stats.back_to_back);
        self.stats.record_clear(lines, tspin);
        self.stats.record_combo(lines > 0);
        let bonus = if lines > 0 {
            combo_bonus(&table, self.stats.combo, level)
        } else {
            0
        };

        let points = (drop_score(&table, rows_dropped, true) as f64 + result.points + bonus as f64)
            .round() as u32;
        self.stats.score = self.stats.score.saturating_add(points);
        self.stats.back_to_back = result.back_to_back;
        self.stats.level = level_for_lines(self.stats.lines, self.config.max_level);
        self.fall_interval_ms = fall_interval_ms(self.stats.level);

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: lines as u32,
            t_spin: tspin,
            points,
            combo: self.stats.combo,
            back_to_back: self.stats.back_to_back,
        });

        self.spawn(false);
    }

    /// Auto-shift for the armed direction while its key stays held
    fn update_shift(&mut self, elapsed_ms: u32, held: HeldKeys) -> bool {
        let Some(direction) = self.shift else {
            return false;
        };
        if !held.is_held(direction) {
            self.shift = None;
            return false;
        }

        let arr_ms = timer_ms(self.config.arr_ms);
        let fire = {
            let (das, arr, _) = self.machine.shift_timers_mut();
            if *das > 0 {
                *das = das.saturating_sub(timer_ms(elapsed_ms));
                if *das <= 0 {
                    // First repeat fires on the tick DAS runs out.
                    *arr = 0;
                }
            } else {
                *arr = arr.saturating_sub(timer_ms(elapsed_ms));
            }
            let fire = *das <= 0 && *arr <= 0;
            if fire {
                *arr = arr_ms;
            }
            fire
        };
        if !fire {
            return false;
        }

        let dx = if direction == HeldAction::MoveLeft { -1 } else { 1 };
        if arr_ms == 0 {
            self.player_slide(dx)
        } else {
            self.player_move(dx)
        }
    }

    /// One soft-drop row; scores only while falling
    fn soft_drop_step(&mut self) -> bool {
        let movement = self.controller.move_by(&self.board, 0, -1);
        if !movement.succeeded() {
            return false;
        }
        if movement == Movement::NewLow {
            self.force_falling();
        }
        if self.machine.phase() == Phase::Falling {
            let points = drop_score(&self.config.scores, 1, false);
            self.stats.score = self.stats.score.saturating_add(points);
        }
        true
    }

    fn update_soft_drop(&mut self, elapsed_ms: u32, held: HeldKeys) -> bool {
        if !held.soft_drop {
            self.soft_drop_held = false;
            return false;
        }
        let first = !self.soft_drop_held;
        self.soft_drop_held = true;

        let drop_arr_ms = timer_ms(self.config.drop_arr_ms);
        let fire = {
            let (_, _, drop_arr) = self.machine.shift_timers_mut();
            if first {
                *drop_arr = 0;
            } else {
                *drop_arr = drop_arr.saturating_sub(timer_ms(elapsed_ms));
            }
            let fire = *drop_arr <= 0;
            if fire {
                *drop_arr = drop_arr_ms;
            }
            fire
        };
        if !fire {
            return false;
        }

        if drop_arr_ms == 0 {
            let mut moved = false;
            while self.soft_drop_step() {
                moved = true;
            }
            moved
        } else {
            self.soft_drop_step()
        }
    }

    /// Gravity and lock timing for the current phase
    fn update_phase(&mut self, elapsed_ms: u32) -> bool {
        match self.machine.phase() {
            Phase::Falling => {
                if !self.machine.tick_fall(elapsed_ms) {
                    return false;
                }
                if self.controller.move_by(&self.board, 0, -1).succeeded() {
                    self.machine.reset_fall(self.fall_interval_ms);
                    true
                } else {
                    self.machine.enter_lock(self.config.lock_delay_ms);
                    false
                }
            }
            Phase::Lock => {
                let lock_expired = self.machine.tick_lock(elapsed_ms);
                if self.machine.falling_while_locking() {
                    if !self.machine.tick_fall(elapsed_ms) {
                        return false;
                    }
                    match self.controller.move_by(&self.board, 0, -1) {
                        Movement::Blocked => {
                            self.machine.end_falling_while_locking();
                            if self.controller.lock_counter() < self.config.max_lock_resets {
                                self.machine.restart_lock(self.config.lock_delay_ms);
                            }
                            false
                        }
                        Movement::Moved => {
                            self.machine.reset_fall(self.fall_interval_ms);
                            true
                        }
                        Movement::NewLow => {
                            self.machine.enter_falling(self.fall_interval_ms);
                            true
                        }
                    }
                } else if !self.controller.is_resting() {
                    self.machine.begin_falling_while_locking(self.fall_interval_ms);
                    false
                } else if lock_expired {
                    self.place();
                    true
                } else {
                    false
                }
            }
            Phase::Generation | Phase::Iterate | Phase::Completion => false,
        }
    }

    /// Main game tick - held keys first, then gravity and lock timing
    ///
    /// Returns true when the active piece moved or was placed.
    pub fn tick(&mut self, elapsed_ms: u32, held: HeldKeys) -> bool {
        if self.paused || self.game_over.is_some() || !self.started {
            return false;
        }

        let mut changed = self.update_shift(elapsed_ms, held);
        changed |= self.update_soft_drop(elapsed_ms, held);
        if self.game_over.is_some() {
            return changed;
        }
        changed | self.update_phase(elapsed_ms)
    }

    fn restart(&mut self) -> bool {
        let config = GameConfig {
            seed: self.controller.bag().seed(),
            ..self.config.clone()
        };
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(config);
        self.episode_id = next_episode;
        self.start();
        true
    }

    /// Apply a game action
    ///
    /// While paused only `Pause` and `Restart` are honored; after game over
    /// only `Restart`.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over.is_some() {
            return action == GameAction::Restart && self.restart();
        }
        if self.paused && !matches!(action, GameAction::Pause | GameAction::Restart) {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.press_shift(HeldAction::MoveLeft, -1),
            GameAction::MoveRight => self.press_shift(HeldAction::MoveRight, 1),
            GameAction::RotateCw => self.player_rotate(1),
            GameAction::RotateCcw => self.player_rotate(-1),
            GameAction::Rotate180 => self.player_rotate(2),
            GameAction::Hold => self.hold(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Pause => {
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => self.restart(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
