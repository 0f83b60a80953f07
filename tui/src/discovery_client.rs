//! Discovery Client
//!
//! Thin wrapper around `Discovery` for TUI integration.
//! This client embeds Discovery directly (no network between them) and
//! provides a convenient interface for sending events and receiving
//! messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any business logic.
//! The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to Discovery
//! 3. Receive DiscoveryMessages
//! 4. Render display state based on messages

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;

use cinescope_core::{
    counter_store, CinescopeConfig, CounterStore, Discovery, DiscoveryConfig, DiscoveryMessage,
    FetchState, MovieCatalog, SurfaceEvent, TmdbCatalog,
};

/// Capacity of the Discovery -> TUI channel
const MESSAGE_CHANNEL_CAPACITY: usize = 100;

/// Client for communicating with the embedded Discovery core
pub struct DiscoveryClient<C: MovieCatalog + 'static = TmdbCatalog> {
    /// The embedded Discovery instance
    discovery: Discovery<C>,
    /// Receiver for messages from Discovery
    rx: mpsc::Receiver<DiscoveryMessage>,
}

impl DiscoveryClient<TmdbCatalog> {
    /// Build the TMDB catalog and the configured counter store
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be built.
    pub fn from_config(config: &CinescopeConfig) -> anyhow::Result<Self> {
        let catalog = TmdbCatalog::from_config(&config.catalog)?;
        if !catalog.has_token() {
            tracing::warn!(
                "No TMDB API token configured (TMDB_API_TOKEN); every fetch will fail"
            );
        }
        let store = counter_store::from_config(
            &config.counter_store,
            config.catalog.request_timeout,
        )?;
        Ok(Self::new(catalog, store, DiscoveryConfig::from(config)))
    }
}

impl<C: MovieCatalog + 'static> DiscoveryClient<C> {
    /// Create a client around an explicit catalog and store
    pub fn new(catalog: C, store: Arc<dyn CounterStore>, config: DiscoveryConfig) -> Self {
        let (tx, rx) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);
        let discovery = Discovery::new(catalog, store, config, tx);
        Self { discovery, rx }
    }

    /// Start Discovery (popular listing + trending load)
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.discovery.start().await
    }

    /// The search box now holds `text`
    pub async fn edit_query(&mut self, text: String) -> anyhow::Result<()> {
        self.discovery.handle_event(SurfaceEvent::edited(text)).await
    }

    /// The search box was cleared
    pub async fn clear_query(&mut self) -> anyhow::Result<()> {
        self.discovery.handle_event(SurfaceEvent::QueryCleared).await
    }

    /// Re-issue the current query
    pub async fn refresh(&mut self) -> anyhow::Result<()> {
        self.discovery
            .handle_event(SurfaceEvent::RefreshRequested)
            .await
    }

    /// Notify Discovery that the user wants to quit
    pub async fn request_quit(&mut self) -> anyhow::Result<()> {
        self.discovery
            .handle_event(SurfaceEvent::QuitRequested)
            .await
    }

    /// Fire due debounces and apply finished requests (call every frame)
    pub async fn poll(&mut self) -> bool {
        self.discovery.poll().await
    }

    /// Wait for the next debounce deadline or completed request
    pub async fn settle(&mut self) {
        self.discovery.settle().await;
    }

    /// Receive all pending messages from Discovery (non-blocking)
    pub fn recv_all(&mut self) -> Vec<DiscoveryMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Current results panel state
    pub fn state(&self) -> &FetchState {
        self.discovery.state()
    }

    /// When pending search text will settle, if any
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.discovery.debounce_deadline()
    }

    /// Requests issued but not yet completed
    pub fn in_flight(&self) -> usize {
        self.discovery.in_flight()
    }

    /// Catalog backend name (for the status bar)
    pub fn catalog_name(&self) -> &str {
        self.discovery.catalog_name()
    }
}
