//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, J, L, O, S, T, Z), shuffled, and
//! bags are appended to the queue as whole units so that every aligned window
//! of 7 draws is a permutation of all seven kinds.
//!
//! Also provides a simple LCG for deterministic testing.

use std::collections::VecDeque;

use crate::types::{PieceKind, PREVIEW_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Upcoming piece kinds, refilled one shuffled bag at a time
#[derive(Debug, Clone)]
pub struct BagQueue {
    queue: VecDeque<PieceKind>,
    /// Preview window; the queue never drops below this length after a pop
    preview_count: usize,
    rng: SimpleRng,
}

impl BagQueue {
    /// Create a queue with the given seed and preview window
    pub fn new(seed: u32, preview_count: usize) -> Self {
        let mut bag = Self {
            queue: VecDeque::with_capacity(preview_count + 2 * PieceKind::ALL.len()),
            preview_count,
            rng: SimpleRng::new(seed),
        };
        while bag.queue.len() <= bag.preview_count {
            bag.push_bag();
        }
        bag
    }

    /// Append one shuffled set of all seven kinds
    fn push_bag(&mut self) {
        let mut set = PieceKind::ALL;
        self.rng.shuffle(&mut set);
        self.queue.extend(set);
    }

    /// Remove and return the next kind
    ///
    /// A new bag is appended first whenever the remaining length has dropped
    /// to the preview window, so the preview is always fully populated.
    pub fn pop(&mut self) -> PieceKind {
        if self.queue.len() <= self.preview_count {
            self.push_bag();
        }
        // The queue always holds more than `preview_count` entries here.
        self.queue.pop_front().unwrap_or(PieceKind::I)
    }

    /// The next `preview_count` kinds, front first
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied().take(self.preview_count)
    }

    pub fn preview_count(&self) -> usize {
        self.preview_count
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get the current RNG state (for restarting game with the sequence continuing)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for BagQueue {
    fn default() -> Self {
        Self::new(1, PREVIEW_COUNT)
    }
}
