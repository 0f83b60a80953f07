//! Surface Events
//!
//! Events sent from UI surfaces to the discovery core. Surfaces report what
//! the user did; the core decides what it means.

use serde::{Deserialize, Serialize};

/// Events from UI Surface to Discovery
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// The search box now contains `text`
    QueryEdited {
        /// Full contents of the search box
        text: String,
    },

    /// The search box was cleared in one action
    QueryCleared,

    /// Re-issue the request for the current debounced query
    RefreshRequested,

    /// User requested quit
    QuitRequested,
}

impl SurfaceEvent {
    /// Convenience constructor for an edit
    pub fn edited(text: impl Into<String>) -> Self {
        Self::QueryEdited { text: text.into() }
    }
}
