//! Discovery Messages
//!
//! Messages sent from the discovery core to UI surfaces. Surfaces hold no
//! business logic; they render what these messages tell them.

use serde::{Deserialize, Serialize};

use crate::fetch_state::FetchState;
use crate::movie::TrendingEntry;

/// Sequence number tagging each issued catalog request
///
/// Strictly increasing per [`crate::Discovery`] instance; only the latest
/// issued sequence may change the displayed state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestSeq(pub u64);

impl RequestSeq {
    /// The sequence after this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Messages from Discovery to UI Surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DiscoveryMessage {
    /// The search text settled after its quiet period
    QueryDebounced {
        /// Settled query
        query: String,
    },

    /// A catalog request was issued; the panel is now loading
    FetchStarted {
        /// Request sequence
        seq: RequestSeq,
        /// Query being fetched (`""` = popular listing)
        query: String,
    },

    /// The results panel changed state
    FetchStateChanged {
        /// Request the state belongs to
        seq: RequestSeq,
        /// New state
        state: FetchState,
    },

    /// Trending searches loaded on mount
    TrendingLoaded {
        /// Ranked entries, verbatim from the counter store
        entries: Vec<TrendingEntry>,
    },

    /// The surface should shut down
    Quit,
}
