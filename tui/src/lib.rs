//! Cinescope TUI - Terminal interface for cinescope
//!
//! This crate provides a full-screen terminal UI over the headless
//! discovery core: a debounced search box, a grid of movie cards, and a
//! trending panel.
//!
//! # Architecture
//!
//! - **DiscoveryClient**: embeds the core and exchanges events/messages
//! - **DisplayState**: what to draw, derived only from core messages
//! - **Widgets**: borderless search box, movie grid, trending list
//! - **Cli**: command-line flags and log file setup

pub mod app;
pub mod cli;
pub mod discovery_client;
pub mod display;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use cli::Args;
pub use discovery_client::DiscoveryClient;
pub use display::DisplayState;
