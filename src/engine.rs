//! The composition root: action validation, capture resolution, legality
//! recomputation and end-of-game detection.

use crate::board::Board;
use crate::dynamics::{Dynamics, PackedDynamics, ScanDynamics};
use crate::game::{Action, GameState, Player};
use crate::packed;
use derive_more::{Display, Error};

/// Identity tag for one rules implementation. Agents assert their declared
/// id against the engine's once, at composition time, so an agent built for
/// one rule variant is never silently run against an incompatible one.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash)]
#[display(fmt = "{} v{}", name, version)]
pub struct EnvId {
    pub name: &'static str,
    pub version: u32,
}

/// The identity of the rules implemented by this crate.
pub const ENV_ID: EnvId = EnvId {
    name: "othello",
    version: 0,
};

/// Why a step was rejected. The input state is left untouched in every case.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq, Hash)]
pub enum StepError {
    /// The action lies outside the board.
    #[display(fmt = "({}, {}) is outside the board", row, col)]
    OutOfBounds { row: usize, col: usize },
    /// The acting player id names neither player.
    #[display(fmt = "{} is not a valid player id", id)]
    InvalidPlayer { id: usize },
    /// The target cell already holds a stone, no matter whose.
    #[display(fmt = "({}, {}) is already occupied", row, col)]
    CellOccupied { row: usize, col: usize },
    /// No direction brackets an opposing run from the target cell.
    #[display(fmt = "placing at ({}, {}) captures nothing", row, col)]
    IllegalMove { row: usize, col: usize },
}

/// The rule engine.
///
/// Owns a board size and a [`Dynamics`] strategy. Every operation is a pure
/// function over its inputs: the states it produces are plain values with no
/// tie back to the engine, safe to keep, compare and replay.
pub struct Engine {
    size: usize,
    dynamics: Box<dyn Dynamics>,
}

impl Engine {
    /// A standard 8x8 engine on the packed fast path.
    pub fn new() -> Self {
        Self {
            size: crate::DEFAULT_EDGE_LENGTH,
            dynamics: Box::new(PackedDynamics),
        }
    }

    /// An engine for an arbitrary board size (even, at least 4). 8x8 boards
    /// use the packed fast path; every other size uses the reference scan.
    pub fn with_size(size: usize) -> Self {
        if size == packed::EDGE_LENGTH {
            Self::new()
        } else {
            Self::with_dynamics(size, Box::new(ScanDynamics))
        }
    }

    /// An engine with an explicit dynamics strategy.
    pub fn with_dynamics(size: usize, dynamics: Box<dyn Dynamics>) -> Self {
        assert!(
            size >= 4 && size % 2 == 0,
            "board size must be even and at least 4, got {}",
            size
        );
        Self { size, dynamics }
    }

    /// The identity tag of the rules this engine implements.
    pub fn id(&self) -> EnvId {
        ENV_ID
    }

    /// The number of cells on one edge of this engine's boards.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The state holding the canonical four-stone opening, with legal-move
    /// planes computed for both players.
    pub fn initialize(&self) -> GameState {
        self.from_board(Board::opening(self.size))
    }

    /// Derive a full state (legal-move planes, done flag) from a bare board.
    /// Panics if the board does not fit this engine.
    pub fn from_board(&self, board: Board) -> GameState {
        assert_eq!(board.size(), self.size, "board does not fit this engine");

        let legal = [
            self.dynamics.move_plane(&board, Player::Black),
            self.dynamics.move_plane(&board, Player::White),
        ];
        let done = !legal[0].any() && !legal[1].any();

        GameState { board, legal, done }
    }

    /// True iff `player` has no legal move in `state` and must be skipped
    /// without a step.
    pub fn need_jump(&self, state: &GameState, player: Player) -> bool {
        state.need_jump(player)
    }

    /// Validate and apply one placement, producing the next state.
    ///
    /// The input state is never touched: a rejected step leaves no trace,
    /// and an accepted one returns a new state sharing no storage with the
    /// old. Captures across all qualifying directions land atomically; the
    /// returned state already carries both players' recomputed legal-move
    /// planes and the done flag.
    pub fn step(
        &self,
        state: &GameState,
        player_id: usize,
        action: Action,
    ) -> Result<GameState, StepError> {
        let Action { row, col } = action;

        if row >= self.size || col >= self.size {
            return Err(StepError::OutOfBounds { row, col });
        }
        let player =
            Player::from_id(player_id).ok_or(StepError::InvalidPlayer { id: player_id })?;
        if state.board.occupied(row, col) {
            return Err(StepError::CellOccupied { row, col });
        }
        // Legality comes from the plane the caller was shown, never from a
        // fresh ad-hoc scan.
        if !state.legal_moves(player).contains(action) {
            return Err(StepError::IllegalMove { row, col });
        }

        let flips = self.dynamics.flip_plane(&state.board, player, action);
        debug_assert!(flips.any(), "legal plane admitted a capture-free move");

        let mut board = state.board.clone();
        board.plane_mut(player).set(row, col, true);
        for flip in flips.locations() {
            board.plane_mut(player).set(flip.row, flip.col, true);
            board.plane_mut(!player).set(flip.row, flip.col, false);
        }

        Ok(self.from_board(board))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
