//! Cinescope TUI Entry Point
//!
//! Launches the terminal UI for cinescope.
//!
//! Usage:
//!   cinescope [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>         Configuration file
//!   -q, --quiet-period-ms <MS>  Search debounce quiet period
//!       --catalog-url <URL>     Movie catalog API root
//!       --memory-store          Keep trending counts in memory
//!       --log-file <PATH>       Log file (default: $XDG_CACHE_HOME/cinescope/cinescope.log)
//!   -l, --log-level <LEVEL>     Log level (default: info)

use std::io::{self, IsTerminal};
use std::panic;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use cinescope_tui::cli::init_logging;
use cinescope_tui::{App, Args, DiscoveryClient};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: cinescope requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin/stdout are piped, or SSH was run without -t.");
        std::process::exit(1);
    }

    let log_path = args.log_path();
    // Flushes buffered log lines on drop, after the terminal is restored
    let _log_guard = init_logging(&log_path, &args.log_level)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Cinescope starting");

    let config = args.load_config()?;
    tracing::info!(
        source = %config.source(),
        quiet_ms = u64::try_from(config.quiet_period.as_millis()).unwrap_or(u64::MAX),
        "Configuration loaded"
    );
    let client = DiscoveryClient::from_config(&config)?;

    let mut terminal = setup_terminal()?;

    let mut app = App::new(client);
    let result = app.run(&mut terminal).await;

    restore_terminal(&mut terminal)?;

    match result {
        Ok(()) => {
            tracing::info!("Cinescope stopped cleanly");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Cinescope stopped with error");
            Err(e)
        }
    }
}

/// Enter raw mode and the alternate screen, restoring both on panic
fn setup_terminal() -> anyhow::Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
