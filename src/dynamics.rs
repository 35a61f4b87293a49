//! Board dynamics: legal-move computation and capture resolution, behind a
//! swappable strategy seam.
//!
//! There is one rule definition and more than one way to execute it.
//! [`ScanDynamics`] walks the grid cell by cell and works for any board
//! size; [`PackedDynamics`] runs the same rules over [`packed`] `u64` masks
//! and only fits 8x8 boards. Implementations must agree cell for cell; the
//! perft and playout suites in [`crate::test_utils`] hold them to that.

use crate::board::Board;
use crate::game::{Action, Player};
use crate::packed;
use crate::plane::Plane;

/// The eight compass directions as `(row, col)` deltas.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One executable rendition of the Othello rules.
pub trait Dynamics: Send + Sync {
    /// The plane of cells where `player` may legally place a stone: empty
    /// cells from which some direction brackets at least one opposing stone.
    fn move_plane(&self, board: &Board, player: Player) -> Plane;

    /// The union of stones captured if `player` places at `action`:
    /// every bracketed run across all eight directions. All-false when no
    /// direction qualifies. `action` must be in bounds.
    fn flip_plane(&self, board: &Board, player: Player, action: Action) -> Plane;
}

/// Reference dynamics: walks the eight directions cell by cell.
/// Works for any board size.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanDynamics;

/// The number of opposing stones bracketed along `(dr, dc)` from `action`,
/// or 0 when the direction does not qualify.
fn bracketed_run(
    board: &Board,
    player: Player,
    action: Action,
    dr: isize,
    dc: isize,
) -> usize {
    let size = board.size() as isize;
    let mine = board.plane(player);
    let theirs = board.plane(!player);

    let mut row = action.row as isize + dr;
    let mut col = action.col as isize + dc;
    let mut seen = 0;

    while row >= 0 && row < size && col >= 0 && col < size {
        if theirs.get(row as usize, col as usize) {
            seen += 1;
        } else if mine.get(row as usize, col as usize) {
            // Closed. An immediate own stone leaves `seen` at zero.
            return seen;
        } else {
            // Empty cell: the run is never closed.
            return 0;
        }
        row += dr;
        col += dc;
    }

    // Ran off the board without a closing stone.
    0
}

impl Dynamics for ScanDynamics {
    fn move_plane(&self, board: &Board, player: Player) -> Plane {
        let size = board.size();
        let mut moves = Plane::empty(size);

        for row in 0..size {
            for col in 0..size {
                if board.occupied(row, col) {
                    continue;
                }
                let action = Action { row, col };
                let legal = DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| bracketed_run(board, player, action, dr, dc) > 0);
                if legal {
                    moves.set(row, col, true);
                }
            }
        }

        moves
    }

    fn flip_plane(&self, board: &Board, player: Player, action: Action) -> Plane {
        let mut flips = Plane::empty(board.size());
        if board.occupied(action.row, action.col) {
            return flips;
        }

        for &(dr, dc) in &DIRECTIONS {
            let run = bracketed_run(board, player, action, dr, dc);
            let mut row = action.row as isize;
            let mut col = action.col as isize;
            for _ in 0..run {
                row += dr;
                col += dc;
                flips.set(row as usize, col as usize, true);
            }
        }

        flips
    }
}

/// Fast-path dynamics over packed `u64` masks. 8x8 boards only.
#[derive(Clone, Copy, Debug, Default)]
pub struct PackedDynamics;

fn packed_masks(board: &Board, player: Player) -> (u64, u64) {
    (
        packed::pack(board.plane(player)),
        packed::pack(board.plane(!player)),
    )
}

impl Dynamics for PackedDynamics {
    fn move_plane(&self, board: &Board, player: Player) -> Plane {
        let (active, opponent) = packed_masks(board, player);
        packed::unpack(packed::move_mask(active, opponent))
    }

    fn flip_plane(&self, board: &Board, player: Player, action: Action) -> Plane {
        let (active, opponent) = packed_masks(board, player);
        let mv = packed::cell(action.row, action.col);

        if (active | opponent) & mv != 0 {
            return Plane::empty(board.size());
        }
        packed::unpack(packed::flip_mask(active, opponent, mv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, black: &[(usize, usize)], white: &[(usize, usize)]) -> Board {
        let mut black_plane = Plane::empty(size);
        let mut white_plane = Plane::empty(size);
        for &(row, col) in black {
            black_plane.set(row, col, true);
        }
        for &(row, col) in white {
            white_plane.set(row, col, true);
        }
        Board::from_planes(black_plane, white_plane)
    }

    fn plane_with(size: usize, cells: &[(usize, usize)]) -> Plane {
        let mut plane = Plane::empty(size);
        for &(row, col) in cells {
            plane.set(row, col, true);
        }
        plane
    }

    #[test]
    fn scan_finds_the_four_opening_moves() {
        let board = Board::opening(8);
        let moves = ScanDynamics.move_plane(&board, Player::Black);

        assert_eq!(moves, plane_with(8, &[(2, 3), (3, 2), (4, 5), (5, 4)]));
    }

    #[test]
    fn scan_flips_a_single_bracketed_stone() {
        let board = Board::opening(8);
        let flips = ScanDynamics.flip_plane(&board, Player::Black, Action::new(2, 3));

        assert_eq!(flips, plane_with(8, &[(3, 3)]));
    }

    #[test]
    fn an_immediate_own_stone_does_not_qualify() {
        // Black at (0, 1) with nothing between it and the target.
        let board = board_with(8, &[(0, 1)], &[]);
        let flips = ScanDynamics.flip_plane(&board, Player::Black, Action::new(0, 0));

        assert!(!flips.any());
    }

    #[test]
    fn a_run_to_the_edge_does_not_qualify() {
        // White runs from the target clean off the east edge; no closing
        // black stone ever appears.
        let white: Vec<(usize, usize)> = (1..8).map(|col| (0, col)).collect();
        let board = board_with(8, &[(4, 4)], &white);
        let moves = ScanDynamics.move_plane(&board, Player::Black);

        assert!(!moves.get(0, 0));
    }

    #[test]
    fn a_run_onto_an_empty_cell_does_not_qualify() {
        // White run from the target ends on an empty cell before any black
        // stone.
        let board = board_with(8, &[(0, 5)], &[(0, 1), (0, 2)]);
        let moves = ScanDynamics.move_plane(&board, Player::Black);

        assert!(!moves.get(0, 0));
    }

    #[test]
    fn flips_accumulate_across_directions() {
        // Placing at (3, 3) brackets white runs east and south at once.
        let board = board_with(
            8,
            &[(3, 6), (6, 3)],
            &[(3, 4), (3, 5), (4, 3), (5, 3)],
        );
        let flips = ScanDynamics.flip_plane(&board, Player::Black, Action::new(3, 3));

        assert_eq!(flips, plane_with(8, &[(3, 4), (3, 5), (4, 3), (5, 3)]));
    }

    #[test]
    fn scan_handles_non_standard_sizes() {
        let board = Board::opening(6);
        let moves = ScanDynamics.move_plane(&board, Player::Black);

        assert_eq!(moves, plane_with(6, &[(1, 2), (2, 1), (3, 4), (4, 3)]));
    }

    #[test]
    fn packed_agrees_with_scan_on_the_opening() {
        let board = Board::opening(8);

        for &player in &Player::ALL {
            assert_eq!(
                PackedDynamics.move_plane(&board, player),
                ScanDynamics.move_plane(&board, player)
            );
        }
    }

    #[test]
    fn packed_agrees_with_scan_on_a_midgame_position() {
        let board = board_with(
            8,
            &[(2, 2), (3, 3), (3, 4), (4, 3), (5, 5), (0, 7)],
            &[(2, 3), (2, 4), (4, 4), (5, 4), (6, 6), (1, 7)],
        );

        for &player in &Player::ALL {
            assert_eq!(
                PackedDynamics.move_plane(&board, player),
                ScanDynamics.move_plane(&board, player),
                "move planes diverged for {}",
                player
            );
            for row in 0..8 {
                for col in 0..8 {
                    let action = Action::new(row, col);
                    assert_eq!(
                        PackedDynamics.flip_plane(&board, player, action),
                        ScanDynamics.flip_plane(&board, player, action),
                        "flip planes diverged for {} at {}",
                        player,
                        action
                    );
                }
            }
        }
    }

    #[test]
    fn flip_plane_is_empty_on_occupied_cells() {
        let board = Board::opening(8);

        for dynamics in [&ScanDynamics as &dyn Dynamics, &PackedDynamics] {
            assert!(!dynamics
                .flip_plane(&board, Player::Black, Action::new(3, 3))
                .any());
        }
    }
}
