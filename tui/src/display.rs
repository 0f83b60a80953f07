//! Display State Types
//!
//! What the TUI currently shows, derived only from `DiscoveryMessage`s.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what Discovery tells it to.
//! Display state is the bridge between messages and rendering; it never
//! decides what to fetch or when.

use cinescope_core::{DiscoveryMessage, FetchState, RequestSeq, TrendingEntry};

/// Heading over the results grid
pub const RESULTS_HEADING: &str = "All Movies";

/// Heading over the trending panel
pub const TRENDING_HEADING: &str = "Trending Movies";

/// Text shown while a request is in flight
pub const LOADING_TEXT: &str = "Loading ...";

/// Everything the renderer needs
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    /// Results panel
    pub results: FetchState,
    /// Trending entries (hidden while empty)
    pub trending: Vec<TrendingEntry>,
    /// Settled query the results belong to
    pub debounced_query: String,
    /// Query of the most recently issued request
    pub fetching_query: String,
    /// Most recently issued request
    pub latest_seq: RequestSeq,
    /// Discovery asked the surface to shut down
    pub quit_requested: bool,
}

impl DisplayState {
    /// Create a new display state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `DiscoveryMessage` to update display state
    pub fn apply_message(&mut self, msg: DiscoveryMessage) {
        match msg {
            DiscoveryMessage::QueryDebounced { query } => {
                self.debounced_query = query;
            }
            DiscoveryMessage::FetchStarted { seq, query } => {
                self.latest_seq = seq;
                self.fetching_query = query;
                self.results = FetchState::Loading;
            }
            DiscoveryMessage::FetchStateChanged { seq, state } => {
                // Never regress to an older request
                if seq >= self.latest_seq {
                    self.latest_seq = seq;
                    self.results = state;
                }
            }
            DiscoveryMessage::TrendingLoaded { entries } => {
                self.trending = entries;
            }
            DiscoveryMessage::Quit => {
                self.quit_requested = true;
            }
        }
    }

    /// Whether the trending panel should be drawn
    pub fn show_trending(&self) -> bool {
        !self.trending.is_empty()
    }

    /// One-line summary for the status bar
    pub fn status_summary(&self) -> String {
        match &self.results {
            FetchState::Loading if self.fetching_query.is_empty() => {
                "Loading popular movies".to_string()
            }
            FetchState::Loading => format!("Searching \"{}\"", self.fetching_query),
            FetchState::Success(movies) if self.debounced_query.is_empty() => {
                format!("{} popular movies", movies.len())
            }
            FetchState::Success(movies) => {
                let noun = if movies.len() == 1 { "result" } else { "results" };
                format!("{} {noun} for \"{}\"", movies.len(), self.debounced_query)
            }
            FetchState::Empty => format!("No results for \"{}\"", self.debounced_query),
            FetchState::Error(_) => "Request failed".to_string(),
        }
    }
}
