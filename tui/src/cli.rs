//! Command Line and Logging
//!
//! Flags for the `cinescope` binary, and the file-backed tracing subscriber.
//! Logs never go to stdout/stderr: the alternate screen owns the terminal.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinescope_core::{default_config_path, load_config_from_path, CinescopeConfig, ConfigOverrides};

/// Cinescope - find movies you'll enjoy without the hassle
#[derive(Parser, Debug)]
#[command(name = "cinescope")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "CINESCOPE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Search debounce quiet period in milliseconds (700 default, 1000 relaxed)
    #[arg(short = 'q', long, value_name = "MS")]
    pub quiet_period_ms: Option<u64>,

    /// Movie catalog API root
    #[arg(long, value_name = "URL")]
    pub catalog_url: Option<String>,

    /// Keep trending counts in memory instead of the hosted counter store
    #[arg(long)]
    pub memory_store: bool,

    /// Log file path
    #[arg(long, env = "CINESCOPE_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "CINESCOPE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// CLI overrides to apply on top of file and environment config
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new().with_memory_store(self.memory_store);
        if let Some(ms) = self.quiet_period_ms {
            overrides = overrides.with_quiet_period_ms(ms);
        }
        if let Some(ref url) = self.catalog_url {
            overrides = overrides.with_catalog_base_url(url.clone());
        }
        overrides
    }

    /// Resolve the effective configuration: file, then environment, then flags
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unreadable or invalid, or if the
    /// final values fail validation.
    pub fn load_config(&self) -> anyhow::Result<CinescopeConfig> {
        let path = self.config.clone().or_else(default_config_path);
        let mut config = load_config_from_path(path)?;
        self.overrides().apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Where logs go when `--log-file` is not given
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(default_log_path)
    }
}

/// `$XDG_CACHE_HOME/cinescope/cinescope.log`, or the temp dir as a fallback
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("cinescope")
        .join("cinescope.log")
}

/// Install the global subscriber, appending to `path`
///
/// Events are handed to a background writer thread through
/// `tracing_appender::non_blocking`; the returned guard flushes it on drop and
/// must live until the terminal is restored. `RUST_LOG` wins over `level`
/// when set.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a subscriber is
/// already installed.
pub fn init_logging(path: &Path, level: &str) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(log_appender(path)?);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "cinescope={level},cinescope_tui={level},cinescope_core={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// Non-rotating appender for `path`, creating its directory first
fn log_appender(path: &Path) -> anyhow::Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Log path has no file name: {path:?}"))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory: {directory:?}"))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .with_context(|| format!("Failed to open log file: {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["cinescope"]).unwrap();
        assert!(!args.memory_store);
        assert_eq!(args.quiet_period_ms, None);
        assert!(args.log_path().ends_with("cinescope/cinescope.log"));
    }

    #[test]
    fn test_flags_become_overrides() {
        let args = Args::try_parse_from([
            "cinescope",
            "--quiet-period-ms",
            "1000",
            "--memory-store",
            "--catalog-url",
            "http://localhost:9000/3/",
        ])
        .unwrap();

        let overrides = args.overrides();
        assert_eq!(overrides.quiet_period_ms, Some(1000));
        assert_eq!(
            overrides.catalog_base_url.as_deref(),
            Some("http://localhost:9000/3/")
        );
        assert!(overrides.memory_store);
    }

    #[test]
    fn test_flags_beat_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[search]\nquiet_period_ms = 1000\n\n[counter_store]\nproject_id = \"from-file\""
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let args = Args::try_parse_from([
            "cinescope",
            "--config",
            path.as_str(),
            "--quiet-period-ms",
            "250",
            "--memory-store",
        ])
        .unwrap();

        let config = args.load_config().unwrap();
        assert_eq!(config.quiet_period, Duration::from_millis(250));
        assert_eq!(config.counter_store.project_id, None);
    }

    #[test]
    fn test_log_appender_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cinescope.log");

        let mut appender = log_appender(&path).unwrap();
        appender.write_all(b"hello\n").unwrap();
        appender.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_log_appender_rejects_directory_path() {
        assert!(log_appender(Path::new("/")).is_err());
    }

    #[test]
    fn test_explicit_log_file() {
        let args = Args::try_parse_from(["cinescope", "--log-file", "/tmp/cs.log"]).unwrap();
        assert_eq!(args.log_path(), PathBuf::from("/tmp/cs.log"));
    }
}
