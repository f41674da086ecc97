use crate::util::Bounds;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use std::collections::HashSet;

/// The single food pellet on the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Food {
    pub(super) position: Position,
}

impl Food {
    /// Place a new food pellet on a cell chosen uniformly at random from the
    /// cells in `bounds` not in `occupied`.  Returns `None` if every cell is
    /// occupied.
    pub(super) fn spawn<R: Rng + ?Sized>(
        bounds: Bounds,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> Option<Food> {
        bounds
            .positions()
            .filter(|p| !occupied.contains(p))
            .choose(rng)
            .map(|position| Food { position })
    }
}
