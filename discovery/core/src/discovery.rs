//! Discovery - The Orchestration Core
//!
//! `Discovery` owns everything between a keystroke and a rendered result
//! list:
//! - the debounced search query
//! - the results panel [`FetchState`]
//! - the one-shot trending load
//! - fire-and-forget search recording in the counter store
//!
//! # Design Philosophy
//!
//! Discovery is UI-agnostic. It talks to surfaces only through:
//! - `SurfaceEvent`: what the user did (received)
//! - `DiscoveryMessage`: what to display (sent)
//!
//! Network calls run in spawned tasks and report back over an internal
//! channel. All state changes happen in [`Discovery::poll`] /
//! [`Discovery::settle`], on the caller's task.
//!
//! # Request ordering
//!
//! In-flight requests are never cancelled. Each is tagged with a
//! [`RequestSeq`]; a completion whose sequence is not the latest issued is
//! dropped, so a slow "Bat" response cannot overwrite a newer "Batman" one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::catalog::{CatalogError, MovieCatalog, MovieQuery};
use crate::config::{CinescopeConfig, DEFAULT_QUIET_PERIOD};
use crate::counter_store::{normalize_term, CounterStore, CounterStoreError};
use crate::debounce::Debouncer;
use crate::events::SurfaceEvent;
use crate::fetch_state::FetchState;
use crate::messages::{DiscoveryMessage, RequestSeq};
use crate::movie::{Movie, TrendingEntry};

/// Discovery configuration
#[derive(Clone, Debug)]
pub struct DiscoveryConfig {
    /// Debounce quiet period for the search box
    pub quiet_period: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

impl From<&CinescopeConfig> for DiscoveryConfig {
    fn from(config: &CinescopeConfig) -> Self {
        Self {
            quiet_period: config.quiet_period,
        }
    }
}

/// Work finished by a spawned task
enum Completion {
    Fetch {
        seq: RequestSeq,
        query: String,
        result: Result<Vec<Movie>, CatalogError>,
    },
    Trending(Result<Vec<TrendingEntry>, CounterStoreError>),
}

/// What woke [`Discovery::settle`]
enum Wake {
    Completion(Option<Completion>),
    Deadline,
}

/// The discovery core
pub struct Discovery<C: MovieCatalog> {
    /// Movie catalog
    catalog: Arc<C>,
    /// Counter store for trending searches
    store: Arc<dyn CounterStore>,
    /// Search box debouncer
    debouncer: Debouncer<String>,
    /// Current results panel state
    state: FetchState,
    /// Trending entries (empty until loaded, or forever on failure)
    trending: Vec<TrendingEntry>,
    /// Most recently issued request
    latest_seq: RequestSeq,
    /// Requests issued but not yet completed
    in_flight: usize,
    /// Whether `start` has run
    started: bool,
    /// Channel to the UI surface
    tx: mpsc::Sender<DiscoveryMessage>,
    /// Completions from spawned tasks
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<C: MovieCatalog + 'static> Discovery<C> {
    /// Create a new Discovery core
    pub fn new(
        catalog: C,
        store: Arc<dyn CounterStore>,
        config: DiscoveryConfig,
        tx: mpsc::Sender<DiscoveryMessage>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            catalog: Arc::new(catalog),
            store,
            debouncer: Debouncer::new(String::new(), config.quiet_period),
            state: FetchState::Loading,
            trending: Vec::new(),
            latest_seq: RequestSeq::default(),
            in_flight: 0,
            started: false,
            tx,
            completion_tx,
            completion_rx,
        }
    }

    /// Current results panel state
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Trending entries loaded on mount
    pub fn trending(&self) -> &[TrendingEntry] {
        &self.trending
    }

    /// Sequence of the most recently issued request
    pub fn latest_seq(&self) -> RequestSeq {
        self.latest_seq
    }

    /// Requests issued but not yet completed (including stale ones)
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// The settled query driving the results panel
    pub fn debounced_query(&self) -> &str {
        self.debouncer.current()
    }

    /// When the pending search text will settle, if any
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Catalog backend name
    pub fn catalog_name(&self) -> &str {
        self.catalog.name()
    }

    /// Mount: load the popular listing and the trending panel
    ///
    /// Only the first call does anything.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        tracing::info!(
            catalog = self.catalog.name(),
            store = self.store.name(),
            quiet_ms = u64::try_from(self.debouncer.quiet_period().as_millis()).unwrap_or(u64::MAX),
            "Discovery starting"
        );

        let query = self.debouncer.current().clone();
        self.issue_fetch(query).await;
        self.load_trending();
        Ok(())
    }

    /// Handle an event from the UI surface
    pub async fn handle_event(&mut self, event: SurfaceEvent) -> anyhow::Result<()> {
        match event {
            SurfaceEvent::QueryEdited { text } => {
                self.debouncer.input(text, Instant::now());
            }
            SurfaceEvent::QueryCleared => {
                self.debouncer.input(String::new(), Instant::now());
            }
            SurfaceEvent::RefreshRequested => {
                let query = self.debouncer.current().clone();
                self.issue_fetch(query).await;
            }
            SurfaceEvent::QuitRequested => {
                self.send(DiscoveryMessage::Quit).await;
            }
        }
        Ok(())
    }

    /// Fire a due debounce and apply every finished request (non-blocking)
    ///
    /// Returns `true` if anything changed. Call this once per frame.
    pub async fn poll(&mut self) -> bool {
        let mut changed = self.fire_debounce().await;

        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply_completion(completion).await;
            changed = true;
        }

        changed
    }

    /// Wait for the next debounce deadline or request completion and apply it
    ///
    /// For headless drivers and tests. Never returns if nothing is pending.
    pub async fn settle(&mut self) {
        let deadline = self.debouncer.deadline();
        let wake = tokio::select! {
            completion = self.completion_rx.recv() => Wake::Completion(completion),
            () = sleep_until_deadline(deadline) => Wake::Deadline,
        };

        match wake {
            Wake::Completion(Some(completion)) => self.apply_completion(completion).await,
            Wake::Completion(None) => {}
            Wake::Deadline => {
                self.fire_debounce().await;
            }
        }
    }

    /// Issue the request for a settled query
    async fn fire_debounce(&mut self) -> bool {
        let Some(query) = self.debouncer.poll(Instant::now()) else {
            return false;
        };

        tracing::debug!(query = %query, "Search text settled");
        self.send(DiscoveryMessage::QueryDebounced {
            query: query.clone(),
        })
        .await;
        self.issue_fetch(query).await;
        true
    }

    /// Enter `Loading` and spawn the catalog request
    async fn issue_fetch(&mut self, query: String) {
        self.latest_seq = self.latest_seq.next();
        self.in_flight += 1;
        let seq = self.latest_seq;

        // Entering Loading replaces any prior error
        self.state = FetchState::Loading;
        tracing::info!(%seq, query = %query, "Fetching movies");
        self.send(DiscoveryMessage::FetchStarted {
            seq,
            query: query.clone(),
        })
        .await;

        let catalog = Arc::clone(&self.catalog);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = catalog.fetch(&MovieQuery::from_text(query.as_str())).await;
            let _ = completion_tx.send(Completion::Fetch { seq, query, result });
        });
    }

    /// Spawn the one-shot trending load
    fn load_trending(&self) {
        let store = Arc::clone(&self.store);
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = store.list_trending().await;
            let _ = completion_tx.send(Completion::Trending(result));
        });
    }

    /// Record a search in the counter store without waiting for it
    ///
    /// The outcome is only ever logged.
    fn record_search(&self, query: String, top_result: Movie) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            match store.record_search(&query, &top_result).await {
                Ok(()) => tracing::debug!(
                    query = %query,
                    movie_id = top_result.id,
                    "Recorded search"
                ),
                Err(e) => tracing::warn!(
                    query = %query,
                    store = store.name(),
                    error = %e,
                    "Failed to record search"
                ),
            }
        });
    }

    async fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Fetch { seq, query, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.apply_fetch(seq, query, result).await;
            }
            Completion::Trending(Ok(entries)) => {
                tracing::info!(count = entries.len(), "Loaded trending searches");
                self.trending.clone_from(&entries);
                self.send(DiscoveryMessage::TrendingLoaded { entries }).await;
            }
            Completion::Trending(Err(e)) => {
                tracing::warn!(
                    store = self.store.name(),
                    error = %e,
                    "Failed to load trending searches"
                );
            }
        }
    }

    async fn apply_fetch(
        &mut self,
        seq: RequestSeq,
        query: String,
        result: Result<Vec<Movie>, CatalogError>,
    ) {
        if seq != self.latest_seq {
            tracing::debug!(
                %seq,
                latest = %self.latest_seq,
                query = %query,
                "Discarding stale response"
            );
            return;
        }

        if let Err(ref e) = result {
            tracing::error!(%seq, query = %query, error = %e, "Error Fetching Movies");
        }

        self.state = FetchState::from_result(&result);
        tracing::info!(%seq, state = self.state.label(), "Fetch finished");

        if let Ok(movies) = result {
            if let Some(top) = movies.into_iter().next() {
                if !normalize_term(&query).is_empty() {
                    self.record_search(query, top);
                }
            }
        }

        self.send(DiscoveryMessage::FetchStateChanged {
            seq,
            state: self.state.clone(),
        })
        .await;
    }

    /// Send a message to the UI surface
    async fn send(&self, msg: DiscoveryMessage) {
        if self.tx.send(msg).await.is_err() {
            tracing::debug!("Surface channel closed, dropping message");
        }
    }
}

/// Wait until `deadline`, or forever when there is none
async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
