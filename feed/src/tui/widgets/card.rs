//! The card shell: a fixed-height, four-zone summary block.
//!
//! Every feed entity renders through this one shell — identity rail on the
//! left, then a header / body / footer stack — which is what lets five
//! structurally different sources share a single visual footprint. The
//! shell's height is constant; overflowing body content is clipped, never
//! reflowed.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Widget},
};

use crate::tui::app::Theme;

/// Total card height in rows: top border, header, two body rows, footer,
/// bottom border. Identical for every card in the feed.
pub const CARD_HEIGHT: u16 = 6;

/// Width of the identity rail inside the border.
pub const RAIL_WIDTH: u16 = 5;

/// Number of body rows. Body content beyond this is clipped.
pub const BODY_ROWS: usize = 2;

/// Slot content for one card.
///
/// Built by the per-source renderers in [`super::cards`]; the shell itself
/// has no idea which source produced it.
#[derive(Debug, Clone)]
pub struct CardContent {
    /// Source glyph shown at the top of the identity rail.
    pub rail_icon: String,

    /// Actor initials shown under the glyph.
    pub rail_tag: String,

    /// Header slot: actor, project, relative timestamp.
    pub header: Line<'static>,

    /// Body slot: preview mini-layout or fallback text. Only the first
    /// [`BODY_ROWS`] lines are rendered.
    pub body: Vec<Line<'static>>,

    /// Footer slot: badges and per-source context.
    pub footer: Line<'static>,
}

/// The card shell widget.
#[derive(Debug)]
pub struct CardShell<'a> {
    content: CardContent,
    selected: bool,
    theme: &'a Theme,
}

impl<'a> CardShell<'a> {
    /// Creates a shell around prepared slot content.
    #[must_use]
    pub fn new(content: CardContent, selected: bool, theme: &'a Theme) -> Self {
        Self {
            content,
            selected,
            theme,
        }
    }
}

impl Widget for CardShell<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < RAIL_WIDTH + 4 || area.height == 0 {
            return;
        }

        // The shell never grows past its fixed height, whatever area the
        // caller hands it.
        let area = Rect {
            height: area.height.min(CARD_HEIGHT),
            ..area
        };

        let border_style = if self.selected {
            self.theme.card_border_selected
        } else {
            self.theme.card_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width <= RAIL_WIDTH || inner.height == 0 {
            return;
        }

        // Identity rail.
        buf.set_stringn(
            inner.x + 1,
            inner.y,
            &self.content.rail_icon,
            (RAIL_WIDTH - 1) as usize,
            self.theme.card_rail,
        );
        if inner.height > 1 {
            buf.set_stringn(
                inner.x + 1,
                inner.y + 1,
                &self.content.rail_tag,
                (RAIL_WIDTH - 1) as usize,
                self.theme.card_rail,
            );
        }

        // Header / body / footer stack.
        let x = inner.x + RAIL_WIDTH;
        let width = inner.width - RAIL_WIDTH;

        buf.set_line(x, inner.y, &self.content.header, width);
        for (row, line) in self.content.body.iter().take(BODY_ROWS).enumerate() {
            let y = inner.y + 1 + row as u16;
            if y < inner.bottom() {
                buf.set_line(x, y, line, width);
            }
        }
        let footer_y = inner.y + 1 + BODY_ROWS as u16;
        if footer_y < inner.bottom() {
            buf.set_line(x, footer_y, &self.content.footer, width);
        }
    }
}
