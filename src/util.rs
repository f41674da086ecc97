use crate::config::GameConfig;
use crate::consts;
use ratatui::layout::{Flex, Layout, Position, Rect, Size};
use std::time::Duration;

/// Settings fixed for the lifetime of the program and handed to every new
/// game
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Globals {
    pub(crate) config: GameConfig,

    /// Whether the terminal reports key release events
    pub(crate) release_events: bool,
}

/// The extent of the board.  Positions on the board are measured in board
/// units, and every valid position is a multiple of `cell`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) cell: u16,
    pub(crate) wrap: bool,
}

impl Bounds {
    /// Number of cells across the board
    pub(crate) fn columns(self) -> u16 {
        self.width / self.cell
    }

    /// Number of cells down the board
    pub(crate) fn rows(self) -> u16 {
        self.height / self.cell
    }

    /// The size of the board measured in cells
    pub(crate) fn grid_size(self) -> Size {
        Size {
            width: self.columns(),
            height: self.rows(),
        }
    }

    /// Convert a board position to the (column, row) of its cell
    pub(crate) fn to_grid(self, pos: Position) -> Position {
        Position {
            x: pos.x / self.cell,
            y: pos.y / self.cell,
        }
    }

    /// The cell-aligned position nearest the middle of the board, rounding
    /// towards the top-left
    pub(crate) fn center(self) -> Position {
        Position {
            x: self.width / 2 / self.cell * self.cell,
            y: self.height / 2 / self.cell * self.cell,
        }
    }

    /// Iterate over the positions of every cell on the board, row by row
    pub(crate) fn positions(self) -> impl Iterator<Item = Position> {
        let cell = self.cell;
        Rect::from((Position::ORIGIN, self.grid_size()))
            .positions()
            .map(move |p| Position {
                x: p.x * cell,
                y: p.y * cell,
            })
    }
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    let [display] = Layout::horizontal([consts::DISPLAY_SIZE.width])
        .flex(Flex::Center)
        .areas(buffer_area);
    let [display] = Layout::vertical([consts::DISPLAY_SIZE.height])
        .flex(Flex::Center)
        .areas(display);
    display
}

/// Return a rectangle of the given size centered within `area`, rounding
/// towards the top-left.  The size is clamped to fit.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Lay out `left`, `center`, and `right` on a single line of `width`
/// columns: `left` flush left, `center` centered, and `right` flush right.
/// An empty `center` is skipped entirely.
pub(crate) fn spread(left: &str, center: &str, right: &str, width: usize) -> String {
    let mut line = String::from(left);
    let mut used = left.chars().count();
    if !center.is_empty() {
        let center_len = center.chars().count();
        let start = width.saturating_sub(center_len) / 2;
        line.push_str(&" ".repeat(start.saturating_sub(used)));
        line.push_str(center);
        used = used.max(start) + center_len;
    }
    let right_start = width.saturating_sub(right.chars().count());
    line.push_str(&" ".repeat(right_start.saturating_sub(used)));
    line.push_str(right);
    line
}

/// Format a play time as minutes and zero-padded seconds, e.g. `2:07`
pub(crate) fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BOUNDS: Bounds = Bounds {
        width: 400,
        height: 300,
        cell: 20,
        wrap: true,
    };

    #[test]
    fn bounds_geometry() {
        assert_eq!(BOUNDS.grid_size(), Size::new(20, 15));
        assert_eq!(BOUNDS.center(), Position::new(200, 140));
        assert_eq!(BOUNDS.to_grid(Position::new(380, 40)), Position::new(19, 2));
    }

    #[test]
    fn bounds_positions() {
        let bounds = Bounds {
            width: 60,
            height: 40,
            cell: 20,
            wrap: false,
        };
        assert_eq!(
            bounds.positions().collect::<Vec<_>>(),
            [
                Position::new(0, 0),
                Position::new(20, 0),
                Position::new(40, 0),
                Position::new(0, 20),
                Position::new(20, 20),
                Position::new(40, 20),
            ]
        );
    }

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(22, 17), Rect::new(29, 3, 22, 17))]
    #[case(Rect::new(0, 1, 80, 21), Size::new(22, 17), Rect::new(29, 3, 22, 17))]
    #[case(Rect::new(5, 5, 10, 10), Size::new(3, 4), Rect::new(8, 8, 3, 4))]
    #[case(Rect::new(5, 5, 10, 10), Size::new(30, 40), Rect::new(5, 5, 10, 10))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }

    #[rstest]
    #[case("ab", "", "yz", 10, "ab      yz")]
    #[case("ab", "mid", "yz", 11, "ab  mid  yz")]
    #[case("ab", "mid", "yz", 12, "ab  mid   yz")]
    #[case("abcdef", "mid", "yz", 10, "abcdefmidyz")]
    #[case("", "", "", 3, "   ")]
    fn test_spread(
        #[case] left: &str,
        #[case] center: &str,
        #[case] right: &str,
        #[case] width: usize,
        #[case] line: &str,
    ) {
        assert_eq!(spread(left, center, right, width), line);
    }

    #[rstest]
    #[case(Duration::ZERO, "0:00")]
    #[case(Duration::from_millis(59_999), "0:59")]
    #[case(Duration::from_secs(127), "2:07")]
    #[case(Duration::from_secs(3600), "60:00")]
    fn test_format_clock(#[case] d: Duration, #[case] s: &str) {
        assert_eq!(format_clock(d), s);
    }
}
