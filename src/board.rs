//! The mid-level board model: one occupancy [`Plane`] per player.

use crate::game::Player;
use crate::plane::Plane;
use crate::utils;
use std::fmt::{self, Display, Formatter};

/// Occupancy for both players over one square board.
///
/// Invariant: a cell is held by at most one player. Constructors that accept
/// arbitrary planes check this and panic on overlap.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    planes: [Plane; 2],
}

impl Board {
    /// An empty board with `size` cells per edge.
    /// `size` must be even and at least 4.
    pub fn empty(size: usize) -> Self {
        assert!(
            size >= 4 && size % 2 == 0,
            "board size must be even and at least 4, got {}",
            size
        );
        Self {
            planes: [Plane::empty(size), Plane::empty(size)],
        }
    }

    /// The canonical four-stone opening position: black on the rising center
    /// diagonal, white on the falling one.
    pub fn opening(size: usize) -> Self {
        let mut board = Self::empty(size);
        let center = size / 2;

        board.planes[0].set(center - 1, center, true);
        board.planes[0].set(center, center - 1, true);
        board.planes[1].set(center - 1, center - 1, true);
        board.planes[1].set(center, center, true);

        board
    }

    /// Assemble a board from per-player occupancy planes.
    /// Panics if the planes differ in shape or claim the same cell.
    pub fn from_planes(black: Plane, white: Plane) -> Self {
        assert_eq!(
            black.size(),
            white.size(),
            "occupancy planes must be the same shape"
        );
        for row in 0..black.size() {
            for col in 0..black.size() {
                assert!(
                    !(black.get(row, col) && white.get(row, col)),
                    "cell ({}, {}) is held by both players",
                    row,
                    col
                );
            }
        }
        Self {
            planes: [black, white],
        }
    }

    /// The number of cells on one edge.
    #[inline]
    pub fn size(&self) -> usize {
        self.planes[0].size()
    }

    /// The occupancy plane of `player`.
    #[inline]
    pub fn plane(&self, player: Player) -> &Plane {
        &self.planes[player.id()]
    }

    #[inline]
    pub(crate) fn plane_mut(&mut self, player: Player) -> &mut Plane {
        &mut self.planes[player.id()]
    }

    /// Whether either player holds `(row, col)`.
    #[inline]
    pub fn occupied(&self, row: usize, col: usize) -> bool {
        self.planes[0].get(row, col) || self.planes[1].get(row, col)
    }

    /// The number of stones `player` holds.
    pub fn count(&self, player: Player) -> usize {
        self.plane(player).count()
    }

    /// `(player 0 stones, player 1 stones)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.planes[0].count(), self.planes[1].count())
    }

    /// The number of unoccupied cells.
    pub fn empty_count(&self) -> usize {
        self.size() * self.size() - self.planes[0].count() - self.planes[1].count()
    }

    /// The same position with plane 0 relabeled to hold `player`'s stones and
    /// plane 1 the opponent's.
    ///
    /// This is a relabeling only, never a spatial transform: stones do not
    /// move, so absolute coordinates submitted later remain valid against the
    /// real board.
    pub fn perspective(&self, player: Player) -> Board {
        match player {
            Player::Black => self.clone(),
            Player::White => Board {
                planes: [self.planes[1].clone(), self.planes[0].clone()],
            },
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let size = self.size();
        let pieces = (0..size * size).map(|index| {
            let (row, col) = (index / size, index % size);
            match (self.planes[0].get(row, col), self.planes[1].get(row, col)) {
                (false, false) => '.',
                (true, false) => '#',
                (false, true) => 'O',
                (true, true) => '!',
            }
        });
        utils::format_grid(pieces, size, f)
    }
}
