//! Theme and Colors
//!
//! Cinescope's palette: a dark "screening room" background with a warm
//! marquee accent for anything the user should look at first.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Marquee Palette
// ============================================================================

/// Marquee gold - titles, focused input, accents
pub const MARQUEE_GOLD: Color = Color::Rgb(255, 196, 87);

/// Curtain red - section headers
pub const CURTAIN_RED: Color = Color::Rgb(200, 70, 80);

/// Silver screen - primary body text
pub const SCREEN_SILVER: Color = Color::Rgb(220, 220, 230);

/// Projector blue - loading indicators
pub const PROJECTOR_BLUE: Color = Color::Rgb(120, 170, 255);

// ============================================================================
// UI Colors
// ============================================================================

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Rating star
pub const STAR_YELLOW: Color = Color::Rgb(250, 220, 90);

/// Trending count badge
pub const COUNT_GREEN: Color = Color::Rgb(120, 230, 120);

// ============================================================================
// Composite Styles
// ============================================================================

/// Movie title on a card
pub fn title_style() -> Style {
    Style::default()
        .fg(SCREEN_SILVER)
        .add_modifier(Modifier::BOLD)
}

/// Secondary metadata (year, language)
pub fn meta_style() -> Style {
    Style::default().fg(DIM_GRAY)
}

/// Panel header
pub fn header_style() -> Style {
    Style::default()
        .fg(CURTAIN_RED)
        .add_modifier(Modifier::BOLD)
}
