//! MovieGrid Widget
//!
//! Movie cards laid out left-to-right, top-to-bottom, scrolled by whole
//! rows. Each card is a title line and a metadata line:
//!
//! ```text
//! Inception
//! ★ 8.4  EN | 2010
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;

use cinescope_core::Movie;

use super::fit_width;
use crate::theme::{meta_style, title_style, STAR_YELLOW};

/// Columns per card, including the gutter
pub const CARD_WIDTH: u16 = 30;

/// Lines per card, including the spacer line
pub const CARD_HEIGHT: u16 = 3;

/// Scroll state for the grid
#[derive(Debug, Default)]
pub struct MovieGridState {
    /// First visible card row
    pub row_offset: usize,
    /// Total card rows at the last render
    pub total_rows: usize,
    /// Card rows that fit at the last render
    pub visible_rows: usize,
}

impl MovieGridState {
    /// Scroll by `delta` rows (positive = down)
    pub fn scroll(&mut self, delta: isize) {
        self.row_offset = self.row_offset.saturating_add_signed(delta);
        self.clamp();
    }

    /// Back to the first row
    pub fn reset(&mut self) {
        self.row_offset = 0;
    }

    fn clamp(&mut self) {
        let max = self.total_rows.saturating_sub(self.visible_rows.max(1));
        self.row_offset = self.row_offset.min(max);
    }
}

/// Grid of movie cards
pub struct MovieGrid<'a> {
    movies: &'a [Movie],
}

impl<'a> MovieGrid<'a> {
    /// Grid over `movies`, in the order given
    pub fn new(movies: &'a [Movie]) -> Self {
        Self { movies }
    }

    /// Cards per row for a given width (at least one)
    pub fn columns(width: u16) -> usize {
        usize::from((width / CARD_WIDTH).max(1))
    }
}

impl StatefulWidget for MovieGrid<'_> {
    type State = MovieGridState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let columns = Self::columns(area.width);
        let card_width = if columns == 1 {
            area.width
        } else {
            CARD_WIDTH
        };
        // Leave a one-column gutter between cards
        let text_width = usize::from(card_width.saturating_sub(1).max(1));

        state.total_rows = self.movies.len().div_ceil(columns);
        state.visible_rows = usize::from(area.height / CARD_HEIGHT).max(1);
        state.clamp();

        let first = state.row_offset * columns;
        let visible = state.visible_rows * columns;

        for (i, movie) in self.movies.iter().skip(first).take(visible).enumerate() {
            let row = u16::try_from(i / columns).unwrap_or(u16::MAX);
            let col = u16::try_from(i % columns).unwrap_or(u16::MAX);
            let x = area.x + col * card_width;
            let y = area.y + row * CARD_HEIGHT;
            if y >= area.y + area.height {
                break;
            }

            buf.set_string(x, y, fit_width(&movie.title, text_width), title_style());

            if y + 1 < area.y + area.height {
                let rating = format!("★ {}", movie.rating_label());
                let meta = format!(
                    "  {} | {}",
                    movie.language_label(),
                    movie.release_year()
                );
                let rating_width = rating.chars().count();
                buf.set_string(
                    x,
                    y + 1,
                    fit_width(&rating, text_width),
                    Style::default().fg(STAR_YELLOW),
                );
                if rating_width < text_width {
                    let meta_x = x + u16::try_from(rating_width).unwrap_or(0);
                    buf.set_string(
                        meta_x,
                        y + 1,
                        fit_width(&meta, text_width - rating_width),
                        meta_style(),
                    );
                }
            }
        }
    }
}
