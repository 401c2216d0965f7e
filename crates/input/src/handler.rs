//! Held-key tracking for terminal environments.
//!
//! The core does its own DAS/ARR timing; this handler only answers "which of
//! left, right and soft drop are down right now". Terminals that never emit
//! key release events resend presses while a key is held, so a key that has
//! not been seen for a short timeout is treated as released.

use std::time::Instant;

use crossterm::event::KeyCode;

use crate::map::held_action;
use crate::types::{GameAction, HeldAction, HeldKeys};

// A short timeout keeps a single tap from turning into a sustained hold.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks held state of the auto-repeat keys.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: HeldKeys,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: HeldKeys::NONE,
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    fn set(&mut self, action: HeldAction, down: bool) {
        match action {
            HeldAction::MoveLeft => self.held.left = down,
            HeldAction::MoveRight => self.held.right = down,
            HeldAction::SoftDrop => self.held.soft_drop = down,
        }
    }

    /// Record a press; returns the discrete move to apply on the first press only.
    ///
    /// Resent presses of a key already held just refresh the release timeout.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let action = held_action(code)?;
        self.last_key_time = Instant::now();
        if self.held.is_held(action) {
            return None;
        }
        self.set(action, true);
        match action {
            HeldAction::MoveLeft => Some(GameAction::MoveLeft),
            HeldAction::MoveRight => Some(GameAction::MoveRight),
            HeldAction::SoftDrop => None,
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if let Some(action) = held_action(code) {
            self.set(action, false);
        }
    }

    /// Held state for this tick, after applying the auto-release timeout.
    pub fn held_keys(&mut self) -> HeldKeys {
        let time_since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if time_since_last_key > self.key_release_timeout_ms {
            self.held = HeldKeys::NONE;
        }
        self.held
    }

    pub fn reset(&mut self) {
        self.held = HeldKeys::NONE;
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
