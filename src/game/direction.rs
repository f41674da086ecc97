use crate::util::Bounds;
use enum_map::Enum;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub(super) fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// Return the position one cell over from `pos` in this direction.  If
    /// that would leave the board, the position wraps around to the opposite
    /// edge if `bounds.wrap` is true; otherwise, `None` is returned.
    pub(super) fn advance(self, pos: Position, bounds: Bounds) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => {
                y = decrement_in_bounds(y, bounds.cell, bounds.height, bounds.wrap)?;
            }
            Direction::Down => {
                y = increment_in_bounds(y, bounds.cell, bounds.height, bounds.wrap)?;
            }
            Direction::Left => {
                x = decrement_in_bounds(x, bounds.cell, bounds.width, bounds.wrap)?;
            }
            Direction::Right => {
                x = increment_in_bounds(x, bounds.cell, bounds.width, bounds.wrap)?;
            }
        }
        Some(Position { x, y })
    }
}

fn decrement_in_bounds(x: u16, step: u16, max: u16, wrap: bool) -> Option<u16> {
    if let Some(x2) = x.checked_sub(step) {
        Some(x2)
    } else if wrap {
        Some(max.saturating_sub(step))
    } else {
        None
    }
}

fn increment_in_bounds(x: u16, step: u16, max: u16, wrap: bool) -> Option<u16> {
    if let Some(x2) = x.checked_add(step).filter(|&xx| xx < max) {
        Some(x2)
    } else if wrap {
        Some(0)
    } else {
        None
    }
}
