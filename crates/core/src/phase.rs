//! Phase machine and countdown timers
//!
//! `Iterate` and `Completion` only exist inside a single placement; between
//! ticks the machine rests in `Falling` or `Lock` (or `Generation` once a game
//! is over before a piece could spawn). The phase can only change through the
//! `enter_*` transitions below.

/// Milliseconds as a timer value, saturating at `i32::MAX`
pub(crate) fn timer_ms(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// Lifecycle phase of the current piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Generation,
    Falling,
    Lock,
    Iterate,
    Completion,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Generation => "generation",
            Phase::Falling => "falling",
            Phase::Lock => "lock",
            Phase::Iterate => "iterate",
            Phase::Completion => "completion",
        }
    }
}

/// Countdown timers in milliseconds; an action fires once a timer reaches 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Timers {
    pub fall: i32,
    pub lock: i32,
    pub das: i32,
    pub arr: i32,
    pub drop_arr: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseMachine {
    phase: Phase,
    timers: Timers,
    /// Set while a piece in the lock phase has found room to fall again
    falling_while_locking: bool,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Generation,
            timers: Timers::default(),
            falling_while_locking: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Shift timers are owned by the input path, not by the phase
    pub(crate) fn shift_timers_mut(&mut self) -> (&mut i32, &mut i32, &mut i32) {
        let t = &mut self.timers;
        (&mut t.das, &mut t.arr, &mut t.drop_arr)
    }

    pub fn falling_while_locking(&self) -> bool {
        self.falling_while_locking
    }

    pub fn enter_generation(&mut self) {
        self.phase = Phase::Generation;
    }

    pub fn enter_falling(&mut self, fall_interval_ms: u32) {
        self.phase = Phase::Falling;
        self.timers.fall = timer_ms(fall_interval_ms);
        self.falling_while_locking = false;
    }

    pub fn enter_lock(&mut self, lock_delay_ms: u32) {
        self.phase = Phase::Lock;
        self.timers.lock = timer_ms(lock_delay_ms);
        self.falling_while_locking = false;
    }

    pub fn enter_iterate(&mut self) {
        self.phase = Phase::Iterate;
    }

    pub fn enter_completion(&mut self) {
        self.phase = Phase::Completion;
    }

    /// Count the fall timer down; true once it has expired
    pub fn tick_fall(&mut self, elapsed_ms: u32) -> bool {
        self.timers.fall = self.timers.fall.saturating_sub(timer_ms(elapsed_ms));
        self.timers.fall <= 0
    }

    /// Count the lock timer down; true once it has expired
    pub fn tick_lock(&mut self, elapsed_ms: u32) -> bool {
        self.timers.lock = self.timers.lock.saturating_sub(timer_ms(elapsed_ms));
        self.timers.lock <= 0
    }

    pub fn reset_fall(&mut self, fall_interval_ms: u32) {
        self.timers.fall = timer_ms(fall_interval_ms);
    }

    pub fn restart_lock(&mut self, lock_delay_ms: u32) {
        self.timers.lock = timer_ms(lock_delay_ms);
    }

    pub fn fall_expired(&self) -> bool {
        self.timers.fall <= 0
    }

    pub fn lock_expired(&self) -> bool {
        self.timers.lock <= 0
    }

    /// Piece has room below while in the lock phase
    pub fn begin_falling_while_locking(&mut self, fall_interval_ms: u32) {
        self.falling_while_locking = true;
        self.timers.fall = timer_ms(fall_interval_ms);
    }

    pub fn end_falling_while_locking(&mut self) {
        self.falling_while_locking = false;
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}
