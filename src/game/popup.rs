use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::Line,
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A bordered message box drawn over the middle of the board, used for the
/// pause and game-over screens
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Popup {
    title: &'static str,
    lines: Vec<Line<'static>>,
}

impl Popup {
    pub(super) fn new<I>(title: &'static str, lines: I) -> Popup
    where
        I: IntoIterator<Item = Line<'static>>,
    {
        Popup {
            title,
            lines: lines.into_iter().collect(),
        }
    }

    /// The size of the box, border included
    pub(super) fn size(&self) -> Size {
        let text_width = self
            .lines
            .iter()
            .map(Line::width)
            .max()
            .unwrap_or_default()
            .max(Line::from(self.title).width() + 2);
        Size {
            width: u16::try_from(text_width)
                .unwrap_or(u16::MAX)
                .saturating_add(4),
            height: u16::try_from(self.lines.len())
                .unwrap_or(u16::MAX)
                .saturating_add(2),
        }
    }
}

impl Widget for &Popup {
    /*
     * ┌──────── PAUSED ─────────┐
     * │ Press Space to continue │
     * └─────────────────────────┘
     */

    // `area` is the area of the entire display; the box centers itself
    // within it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = center_rect(area, self.size());
        let block = Block::bordered()
            .title(self.title)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(popup_area);
        Clear.render(popup_area, buf);
        block.render(popup_area, buf);
        for (line, row) in self.lines.iter().zip(inner.rows()) {
            line.clone().centered().render(row, buf);
        }
    }
}
