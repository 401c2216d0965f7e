//! Piece controller - active piece, ghost, hold slot and bag
//!
//! Every mutation is attempted on a copy of the active piece and committed
//! only once the board accepts it, so a rejected move or rotation leaves the
//! controller untouched.

use crate::board::Board;
use crate::geometry::{kick_offsets, MinoOffset};
use crate::piece::{ActivePiece, GhostPiece};
use crate::rng::BagQueue;
use crate::types::{GameOverReason, PieceKind, BOARD_HEIGHT, SPAWN_CENTER};

/// Outcome of a translation or rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// The board rejected every candidate; nothing changed
    Blocked,
    /// The piece moved
    Moved,
    /// The piece moved and reached a row lower than any since spawn
    NewLow,
}

impl Movement {
    pub fn succeeded(self) -> bool {
        !matches!(self, Movement::Blocked)
    }
}

#[derive(Debug, Clone)]
pub struct PieceController {
    active: Option<ActivePiece>,
    ghost: Option<GhostPiece>,
    hold: Option<PieceKind>,
    hold_ready: bool,
    bag: BagQueue,
}

impl PieceController {
    pub fn new(seed: u32, preview_count: usize) -> Self {
        Self {
            active: None,
            ghost: None,
            hold: None,
            hold_ready: true,
            bag: BagQueue::new(seed, preview_count),
        }
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn ghost(&self) -> Option<&GhostPiece> {
        self.ghost.as_ref()
    }

    pub fn hold(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn hold_ready(&self) -> bool {
        self.hold_ready
    }

    pub fn bag(&self) -> &BagQueue {
        &self.bag
    }

    /// Replace the active piece directly (tests and tooling)
    pub fn set_active(&mut self, board: &Board, mut piece: ActivePiece) {
        Self::check_lowest_position(&mut piece);
        self.active = Some(piece);
        self.update_ghost(board);
    }

    /// Bring the next piece into play
    ///
    /// With `from_hold` the current kind goes into the hold slot and the held
    /// kind (or the next bag entry when the slot is empty) comes out.
    /// A spawn position that is already blocked ends the game with
    /// [`GameOverReason::BlockOut`] and leaves no active piece.
    pub fn spawn_next(&mut self, board: &Board, from_hold: bool) -> Result<(), GameOverReason> {
        let current = self.active.map(|p| p.kind);
        let kind = match (from_hold, current) {
            (true, Some(current)) => match self.hold.replace(current) {
                Some(held) => held,
                None => self.bag.pop(),
            },
            _ => self.bag.pop(),
        };

        let piece = ActivePiece::spawn_at(kind, SPAWN_CENTER);
        if !board.is_valid_position(&piece.tiles) {
            self.active = None;
            self.ghost = None;
            return Err(GameOverReason::BlockOut);
        }
        self.active = Some(piece);

        // Spawn tiles sit one row above the spawn row; drop into it straight away.
        self.move_by(board, 0, -1);
        if let Some(piece) = self.active.as_mut() {
            piece.lowest_line = BOARD_HEIGHT as i8;
            Self::check_lowest_position(piece);
        }
        self.update_ghost(board);
        self.hold_ready = !from_hold;
        Ok(())
    }

    /// Record a new lowest row; true when the piece went below its previous minimum
    ///
    /// Reaching a new low also forgives any lock resets spent so far.
    pub fn check_lowest_position(piece: &mut ActivePiece) -> bool {
        let min_y = piece.min_y();
        if min_y < piece.lowest_line {
            piece.lowest_line = min_y;
            piece.lock_counter = 0;
            true
        } else {
            false
        }
    }

    /// Translate the active piece
    pub fn move_by(&mut self, board: &Board, dx: i8, dy: i8) -> Movement {
        let Some(active) = self.active else {
            return Movement::Blocked;
        };

        let mut candidate = active.translated(dx, dy);
        if !board.is_valid_position(&candidate.tiles) {
            return Movement::Blocked;
        }

        candidate.last_kick = None;
        let new_low = Self::check_lowest_position(&mut candidate);
        self.active = Some(candidate);
        self.update_ghost(board);

        if new_low {
            Movement::NewLow
        } else {
            Movement::Moved
        }
    }

    /// Rotate by `steps` quarter turns (+1 clockwise, -1 counter-clockwise, 2 flip)
    ///
    /// A flip is two clockwise quarter turns with kicks each; if the second
    /// turn fails the piece is left exactly as it was before the first.
    pub fn rotate(&mut self, board: &Board, steps: i8) -> Movement {
        let Some(snapshot) = self.active else {
            return Movement::Blocked;
        };

        let result = match steps {
            2 => Self::rotate_once(board, &snapshot, 1)
                .and_then(|half| Self::rotate_once(board, &half, 1)),
            1 | -1 => Self::rotate_once(board, &snapshot, steps),
            _ => None,
        };

        let Some(mut rotated) = result else {
            return Movement::Blocked;
        };

        let new_low = Self::check_lowest_position(&mut rotated);
        self.active = Some(rotated);
        self.update_ghost(board);

        if new_low {
            Movement::NewLow
        } else {
            Movement::Moved
        }
    }

    /// Try every kick for one quarter turn and return the first valid candidate
    fn rotate_once(board: &Board, piece: &ActivePiece, steps: i8) -> Option<ActivePiece> {
        let rotated = piece.rotated(steps);
        kick_offsets(piece.kind, piece.rotation, rotated.rotation)
            .iter()
            .enumerate()
            .find_map(|(index, &(kx, ky))| {
                let mut candidate = rotated.translated(kx, ky);
                if board.is_valid_position(&candidate.tiles) {
                    candidate.last_kick = Some(index as u8);
                    Some(candidate)
                } else {
                    None
                }
            })
    }

    /// Project the active piece straight down to its landing row
    pub fn update_ghost(&mut self, board: &Board) {
        self.ghost = self.active.as_ref().map(|piece| {
            let mut ghost = GhostPiece::from(piece);
            loop {
                let below: [MinoOffset; 4] = ghost.tiles.map(|(x, y)| (x, y - 1));
                if !board.is_valid_position(&below) {
                    break;
                }
                ghost.tiles = below;
                ghost.center.1 -= 1;
            }
            ghost
        });
    }

    /// True when the active piece cannot fall any further
    pub fn is_resting(&self) -> bool {
        match (&self.active, &self.ghost) {
            (Some(active), Some(ghost)) => active.tiles == ghost.tiles,
            _ => false,
        }
    }

    /// Rows between the active piece and its ghost
    pub fn drop_distance(&self) -> u32 {
        match (&self.active, &self.ghost) {
            (Some(active), Some(ghost)) => (active.min_y() - ghost.min_y()).max(0) as u32,
            _ => 0,
        }
    }

    /// Move the active piece onto its ghost and hand it over for placement
    ///
    /// The kick record survives, so a rotation right before a drop still
    /// counts for T-Spin detection.
    pub fn take_landed(&mut self) -> Option<ActivePiece> {
        let mut piece = self.active.take()?;
        if let Some(ghost) = self.ghost.take() {
            piece.tiles = ghost.tiles;
            piece.center = ghost.center;
        }
        Some(piece)
    }

    /// Spend one lock reset on the active piece if any remain
    pub fn consume_lock_reset(&mut self, limit: u8) -> bool {
        match self.active.as_mut() {
            Some(piece) if piece.lock_counter < limit => {
                piece.lock_counter += 1;
                true
            }
            _ => false,
        }
    }

    pub fn lock_counter(&self) -> u8 {
        self.active.map(|p| p.lock_counter).unwrap_or(0)
    }
}
