//! SearchBox Widget
//!
//! One-line search input with a prompt, a cursor, and a placeholder when
//! empty. Long input scrolls so the cursor end stays visible.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::theme::{DIM_GRAY, MARQUEE_GOLD, SCREEN_SILVER};

/// Shown when the search box is empty
pub const SEARCH_PLACEHOLDER: &str = "Search through thousands of movies";

const PROMPT: &str = "> ";

/// The search input line
pub struct SearchBox<'a> {
    text: &'a str,
}

impl<'a> SearchBox<'a> {
    /// Search box showing `text`
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl Widget for SearchBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let prompt_width = u16::try_from(PROMPT.width()).unwrap_or(0);
        buf.set_string(area.x, area.y, PROMPT, Style::default().fg(MARQUEE_GOLD));

        let x = area.x + prompt_width;
        // Room for the text plus the cursor
        let room = usize::from(area.width.saturating_sub(prompt_width + 1));

        if self.text.is_empty() {
            buf.set_string(
                x,
                area.y,
                super::fit_width(SEARCH_PLACEHOLDER, room + 1),
                Style::default()
                    .fg(DIM_GRAY)
                    .add_modifier(Modifier::ITALIC),
            );
            return;
        }

        // Keep the tail visible when the text is wider than the box
        let mut visible = self.text;
        while visible.width() > room {
            let mut chars = visible.chars();
            chars.next();
            visible = chars.as_str();
        }

        buf.set_string(x, area.y, visible, Style::default().fg(SCREEN_SILVER));
        let cursor_x = x + u16::try_from(visible.width()).unwrap_or(0);
        if cursor_x < area.x + area.width {
            buf.set_string(cursor_x, area.y, "_", Style::default().fg(MARQUEE_GOLD));
        }
    }
}
