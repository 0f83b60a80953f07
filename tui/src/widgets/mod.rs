//! Widgets
//!
//! Borderless widgets that draw straight into a `Buffer`, one per screen
//! region.

mod movie_grid;
mod search_box;
mod trending;

pub use movie_grid::{MovieGrid, MovieGridState, CARD_HEIGHT, CARD_WIDTH};
pub use search_box::{SearchBox, SEARCH_PLACEHOLDER};
pub use trending::TrendingList;

use unicode_width::UnicodeWidthChar;

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`
pub fn fit_width(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if unicode_width::UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        // Leave one column for the ellipsis
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
