//! `mdshell`: terminal front-end shell for a MiniDisc manager.
//!
//! Built on [ratatui](https://ratatui.rs). The host owns the application
//! and device state in a [`StateStore`](mdshell_core::StateStore); the
//! shell in `mdshell-core` turns each snapshot plus the OS dark/light
//! preference into a render decision, which is all the views ever read.
//!
//! Logs are written to a file (default `mdshell.log` in the temp dir) to
//! avoid corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, config loading, tracing setup, panic
//! hooks, and app launch.

mod action;
mod app;
mod bridge;
mod component;
mod event;
mod theme;
mod tui;
mod views;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use mdshell_config::Config;
use mdshell_core::{ColorTheme, MainView, PreferenceSignal, StateSnapshot};

use crate::app::App;

/// Terminal shell for managing MiniDisc recorders.
#[derive(Parser, Debug)]
#[command(name = "mdshell", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long, env = "MDSHELL_CONFIG")]
    config: Option<PathBuf>,

    /// Color theme: light, dark, dark-blue, system
    #[arg(short, long)]
    theme: Option<ColorTheme>,

    /// Start in vintage mode
    #[arg(long)]
    vintage: bool,

    /// Initial main view: WELCOME, MAIN, FACTORY (anything else leaves the
    /// content area blank)
    #[arg(long)]
    view: Option<String>,

    /// Override the detected OS dark preference
    #[arg(long)]
    prefers_dark: Option<bool>,

    /// Log file path (defaults to mdshell.log in the temp dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the initial render decision as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// TUI owns the terminal. Hold the returned guard so logs are flushed.
fn setup_tracing(cli: &Cli, config: &Config) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .ok()
        .or_else(|| {
            config
                .logging
                .filter
                .as_deref()
                .and_then(|f| EnvFilter::try_new(f).ok())
        })
        .unwrap_or_else(|| {
            EnvFilter::new(format!(
                "mdshell={log_level},mdshell_core={log_level},mdshell_config={log_level}"
            ))
        });

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| std::env::temp_dir().join("mdshell.log"));
    let log_dir = log_file.parent().unwrap_or(Path::new("."));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("mdshell.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Initial snapshot: config file, then CLI flags.
fn initial_snapshot(cli: &Cli, config: &Config) -> Result<StateSnapshot> {
    let mut snapshot = config.initial_snapshot()?;
    if let Some(theme) = cli.theme {
        snapshot.app.color_theme = theme;
    }
    if cli.vintage {
        snapshot.app.vintage_mode = true;
    }
    if let Some(view) = cli.view.as_deref() {
        snapshot.app.main_view = MainView::parse_lenient(view);
    }
    Ok(snapshot)
}

/// Priority: CLI flag > config file > environment detection > dark.
fn initial_preference(cli: &Cli, config: &Config) -> bool {
    cli.prefers_dark
        .or(config.appearance.prefers_dark)
        .or_else(mdshell_core::preference::detect_from_env)
        .unwrap_or(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => mdshell_config::load_config_from(path)?,
        None => mdshell_config::load_config()?,
    };
    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let snapshot = initial_snapshot(&cli, &config)?;
    let prefers_dark = initial_preference(&cli, &config);

    if cli.dump {
        let decision = mdshell_core::resolve(&snapshot, prefers_dark);
        println!("{}", serde_json::to_string_pretty(&decision)?);
        return Ok(());
    }

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli, &config);

    info!(
        color_theme = %snapshot.app.color_theme,
        vintage_mode = snapshot.app.vintage_mode,
        prefers_dark,
        "starting mdshell"
    );

    let mut app = App::new(snapshot, PreferenceSignal::new(prefers_dark));
    app.run().await?;

    Ok(())
}
