//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize, frame tick)
//! - DiscoveryClient for orchestration
//! - DisplayState for rendering
//!
//! The App:
//! 1. Converts key presses to SurfaceEvents
//! 2. Sends events to the embedded Discovery via DiscoveryClient
//! 3. Receives DiscoveryMessages and updates DisplayState
//! 4. Renders based on DisplayState

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::{Frame, Terminal};
use tokio::time::MissedTickBehavior;

use cinescope_core::{DiscoveryMessage, FetchState, MovieCatalog, TmdbCatalog};

use crate::discovery_client::DiscoveryClient;
use crate::display::{DisplayState, LOADING_TEXT, RESULTS_HEADING, TRENDING_HEADING};
use crate::theme::{
    header_style, DIM_GRAY, ERROR_RED, MARQUEE_GOLD, PROJECTOR_BLUE,
};
use crate::widgets::{fit_width, MovieGrid, MovieGridState, SearchBox, TrendingList};

/// Frame tick (~30 FPS); also bounds how late a debounce can fire
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Trending panel width (columns)
const TRENDING_WIDTH: u16 = 32;

/// Narrowest body that still gets a trending panel
const MIN_WIDTH_FOR_TRENDING: u16 = 64;

/// Banner across the top of the screen
const BANNER: &str = "Find Movies You'll Enjoy without the Hassle";

/// Main application state
pub struct App<C: MovieCatalog + 'static = TmdbCatalog> {
    // === Core State ===
    /// Is the app still running?
    running: bool,

    // === Discovery Integration ===
    /// Client for communicating with the embedded Discovery core
    client: DiscoveryClient<C>,
    /// Display state derived from DiscoveryMessages
    display: DisplayState,

    // === Input State ===
    /// Raw search box contents
    input_buffer: String,
    /// Results grid scroll state
    grid: MovieGridState,
}

impl<C: MovieCatalog + 'static> App<C> {
    /// Create a new App around a Discovery client
    pub fn new(client: DiscoveryClient<C>) -> Self {
        Self {
            running: true,
            client,
            display: DisplayState::new(),
            input_buffer: String::new(),
            grid: MovieGridState::default(),
        }
    }

    /// Whether the event loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current search box contents
    pub fn input(&self) -> &str {
        &self.input_buffer
    }

    /// Current display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// The embedded Discovery client
    pub fn client_mut(&mut self) -> &mut DiscoveryClient<C> {
        &mut self.client
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_tick = tokio::time::interval(FRAME_DURATION);
        frame_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.client.start().await?;

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event).await?,
                    Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                    None => {
                        tracing::info!("Terminal event stream closed");
                        self.running = false;
                    }
                },

                // Frame tick - poll and render
                _ = frame_tick.tick() => {}
            }

            self.update().await;
            self.render(terminal)?;
        }

        Ok(())
    }

    /// Poll Discovery and apply everything it sent
    pub async fn update(&mut self) {
        self.client.poll().await;
        self.process_messages();
    }

    /// Process all pending messages from Discovery
    fn process_messages(&mut self) {
        for msg in self.client.recv_all() {
            match &msg {
                DiscoveryMessage::FetchStarted { .. } => self.grid.reset(),
                DiscoveryMessage::Quit => self.running = false,
                _ => {}
            }
            self.display.apply_message(msg);
        }
    }

    /// Handle a terminal event
    pub async fn handle_event(&mut self, event: Event) -> anyhow::Result<()> {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await,
            // The next draw picks up the new size
            _ => Ok(()),
        }
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Quit
            KeyCode::Esc => self.quit().await?,
            KeyCode::Char('c') if ctrl => self.quit().await?,

            // Clear the search box in one go
            KeyCode::Char('u') if ctrl => {
                self.input_buffer.clear();
                self.client.clear_query().await?;
            }

            // Re-run the current query
            KeyCode::F(5) => self.client.refresh().await?,
            KeyCode::Char('r') if ctrl => self.client.refresh().await?,

            // Typing
            KeyCode::Char(c) if !ctrl => {
                self.input_buffer.push(c);
                self.client.edit_query(self.input_buffer.clone()).await?;
            }
            KeyCode::Backspace => {
                if self.input_buffer.pop().is_some() {
                    self.client.edit_query(self.input_buffer.clone()).await?;
                }
            }

            // Results scrolling
            KeyCode::Down => self.grid.scroll(1),
            KeyCode::Up => self.grid.scroll(-1),
            KeyCode::PageDown => self.grid.scroll(self.page_rows()),
            KeyCode::PageUp => self.grid.scroll(-self.page_rows()),

            _ => {}
        }
        Ok(())
    }

    async fn quit(&mut self) -> anyhow::Result<()> {
        self.running = false;
        self.client.request_quit().await
    }

    fn page_rows(&self) -> isize {
        isize::try_from(self.grid.visible_rows.max(1)).unwrap_or(1)
    }

    /// Draw one frame
    pub fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    /// Lay out and draw every region
    pub fn draw(&mut self, frame: &mut Frame) {
        let [banner, search, rule, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let buf = frame.buffer_mut();
        put_line(
            buf,
            banner,
            BANNER,
            Style::default()
                .fg(MARQUEE_GOLD)
                .add_modifier(Modifier::BOLD),
        );
        put_line(
            buf,
            rule,
            &"─".repeat(usize::from(rule.width)),
            Style::default().fg(DIM_GRAY),
        );
        self.draw_status(buf, status);

        frame.render_widget(SearchBox::new(&self.input_buffer), search);

        let (results, trending) =
            if self.display.show_trending() && body.width >= MIN_WIDTH_FOR_TRENDING {
                let [results, trending] =
                    Layout::horizontal([Constraint::Min(1), Constraint::Length(TRENDING_WIDTH)])
                        .areas(body);
                (results, Some(trending))
            } else {
                (body, None)
            };

        self.draw_results(frame, results);
        if let Some(area) = trending {
            self.draw_trending(frame, area);
        }
    }

    /// Results heading plus grid, spinner text, or message
    fn draw_results(&mut self, frame: &mut Frame, area: Rect) {
        let [heading, content] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        put_line(frame.buffer_mut(), heading, RESULTS_HEADING, header_style());

        match &self.display.results {
            FetchState::Loading => put_line(
                frame.buffer_mut(),
                content,
                LOADING_TEXT,
                Style::default().fg(PROJECTOR_BLUE),
            ),
            FetchState::Success(movies) => {
                frame.render_stateful_widget(MovieGrid::new(movies), content, &mut self.grid);
            }
            FetchState::Empty | FetchState::Error(_) => {
                let color = if matches!(self.display.results, FetchState::Error(_)) {
                    ERROR_RED
                } else {
                    DIM_GRAY
                };
                let message = self.display.results.message().unwrap_or_default();
                put_line(
                    frame.buffer_mut(),
                    content,
                    message,
                    Style::default().fg(color),
                );
            }
        }
    }

    /// Trending heading plus ranked list, one column in from the results
    fn draw_trending(&self, frame: &mut Frame, area: Rect) {
        let inner = Rect {
            x: area.x.saturating_add(1),
            width: area.width.saturating_sub(1),
            ..area
        };
        let [heading, list] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
        put_line(frame.buffer_mut(), heading, TRENDING_HEADING, header_style());
        frame.render_widget(TrendingList::new(&self.display.trending), list);
    }

    fn draw_status(&self, buf: &mut Buffer, area: Rect) {
        let typing = if self.client.debounce_deadline().is_some() {
            " …"
        } else {
            ""
        };
        let status = format!(
            " {}{} | {} | Esc quit · Ctrl-U clear · F5 refresh",
            self.display.status_summary(),
            typing,
            self.client.catalog_name(),
        );
        put_line(buf, area, &status, Style::default().fg(DIM_GRAY));
    }
}

/// Write `text` on the first line of `area`, cut to fit
fn put_line(buf: &mut Buffer, area: Rect, text: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    buf.set_string(
        area.x,
        area.y,
        fit_width(text, usize::from(area.width)),
        style,
    );
}
