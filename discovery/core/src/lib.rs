//! Cinescope Core - Headless Movie Discovery
//!
//! This crate provides the discovery logic for cinescope, independent of any
//! UI framework. It can drive the terminal UI, or run headless for tests and
//! automation.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surfaces                          │
//! │        ┌─────────┐                 ┌─────────────────┐       │
//! │        │   TUI   │                 │ Headless / Test │       │
//! │        │(ratatui)│                 │                 │       │
//! │        └────┬────┘                 └────────┬────────┘       │
//! │             └───────────────┬───────────────┘                │
//! │                     SurfaceEvent (up)                        │
//! │                   DiscoveryMessage (down)                    │
//! └─────────────────────────────┼────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────┼────────────────────────────────┐
//! │                      CINESCOPE CORE                          │
//! │  ┌──────────────────────────┴─────────────────────────────┐  │
//! │  │                       Discovery                        │  │
//! │  │  ┌───────────┐  ┌────────────┐  ┌───────────────────┐  │  │
//! │  │  │ Debouncer │  │ FetchState │  │ Catalog / Counter │  │  │
//! │  │  │           │  │  + seq     │  │      Store        │  │  │
//! │  │  └───────────┘  └────────────┘  └───────────────────┘  │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Discovery`]: owns the debounced query, result state, and trending list
//! - [`DiscoveryMessage`]: messages sent from Discovery to UI surfaces
//! - [`SurfaceEvent`]: events sent from UI surfaces to Discovery
//! - [`FetchState`]: the four-state result panel
//! - [`MovieCatalog`] / [`CounterStore`]: the two remote services
//!
//! # Quick Start
//!
//! ```ignore
//! use cinescope_core::{counter_store, load_config, Discovery, DiscoveryConfig, TmdbCatalog};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config()?;
//!     let (tx, mut rx) = mpsc::channel(100);
//!
//!     let catalog = TmdbCatalog::from_config(&config.catalog)?;
//!     let store = counter_store::from_config(&config.counter_store, config.catalog.request_timeout)?;
//!     let mut discovery = Discovery::new(catalog, store, DiscoveryConfig::from(&config), tx);
//!
//!     discovery.start().await?;
//!
//!     loop {
//!         discovery.poll().await;
//!         while let Ok(msg) = rx.try_recv() {
//!             // Render message to UI
//!         }
//!         // Handle user input, send as SurfaceEvent
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`catalog`]: movie metadata API (TMDB)
//! - [`config`]: configuration file, environment, and CLI overrides
//! - [`counter_store`]: search counters and trending list (Appwrite, memory)
//! - [`debounce`]: quiet-period debouncer for the search box
//! - [`discovery`]: main Discovery struct
//! - [`events`]: events from UI surfaces to Discovery
//! - [`fetch_state`]: result panel state machine
//! - [`messages`]: messages from Discovery to UI surfaces
//! - [`movie`]: movie and trending records
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod counter_store;
pub mod debounce;
pub mod discovery;
pub mod events;
pub mod fetch_state;
pub mod messages;
pub mod movie;

// Re-exports for convenience
pub use catalog::{CatalogError, MovieCatalog, MovieQuery, TmdbCatalog};
pub use counter_store::{AppwriteStore, CounterStore, CounterStoreError, MemoryStore};
pub use debounce::Debouncer;
pub use discovery::{Discovery, DiscoveryConfig};
pub use events::SurfaceEvent;
pub use fetch_state::{FetchState, FETCH_ERROR_MESSAGE, NO_RESULTS_MESSAGE};
pub use messages::{DiscoveryMessage, RequestSeq};
pub use movie::{Movie, TrendingEntry, POSTER_BASE_URL};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, CatalogConfig, CinescopeConfig,
    CinescopeToml, ConfigError, ConfigOverrides, ConfigSource, CounterStoreConfig,
    DEFAULT_QUIET_PERIOD, RELAXED_QUIET_PERIOD,
};
