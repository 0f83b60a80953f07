//! TrendingList Widget
//!
//! Ranked trending searches, numbered from 1 in the order the counter store
//! returned them.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use cinescope_core::TrendingEntry;

use super::fit_width;
use crate::theme::{COUNT_GREEN, MARQUEE_GOLD, SCREEN_SILVER};

/// Numbered list of trending entries
pub struct TrendingList<'a> {
    entries: &'a [TrendingEntry],
}

impl<'a> TrendingList<'a> {
    /// List over `entries`, already ranked
    pub fn new(entries: &'a [TrendingEntry]) -> Self {
        Self { entries }
    }
}

impl Widget for TrendingList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = usize::from(area.width);
        if width < 6 {
            return;
        }

        for (i, entry) in self.entries.iter().enumerate() {
            let Ok(offset) = u16::try_from(i) else { break };
            if offset >= area.height {
                break;
            }
            let y = area.y + offset;

            let rank = format!("{:>2} ", i + 1);
            let count = format!(" ×{}", entry.count);
            buf.set_string(
                area.x,
                y,
                &rank,
                Style::default()
                    .fg(MARQUEE_GOLD)
                    .add_modifier(Modifier::BOLD),
            );

            let title_room = width.saturating_sub(rank.len() + count.chars().count());
            let title = fit_width(&entry.title, title_room);
            let title_x = area.x + u16::try_from(rank.len()).unwrap_or(0);
            buf.set_string(title_x, y, &title, Style::default().fg(SCREEN_SILVER));

            let count_width = u16::try_from(count.chars().count()).unwrap_or(u16::MAX);
            let count_x = area.x + area.width.saturating_sub(count_width);
            buf.set_string(count_x, y, &count, Style::default().fg(COUNT_GREEN));
        }
    }
}
