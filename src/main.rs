//! rbac-dashboard binary entry point.
//!
//! Parses the command line, sets up file logging, puts the terminal in raw
//! mode, runs the dashboard loop and restores the terminal on exit.
//!
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rbac_dashboard::app::{self, AppState, config};
use rbac_dashboard::error::{IoContext, Result};

#[derive(Parser, Debug)]
#[command(name = "rbac-dashboard", version, about = "Manage users and roles from the terminal")]
struct Cli {
    /// Directory holding theme.conf and keybinds.conf
    #[arg(long, env = "RBAC_DASHBOARD_CONFIG_DIR")]
    config_dir: Option<PathBuf>,
    /// Write logs to this file (nothing is logged without it)
    #[arg(long, env = "RBAC_DASHBOARD_LOG_FILE")]
    log_file: Option<PathBuf>,
    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// The terminal belongs to the UI, so logs only go to a file.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .at_path("open log file", path)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let dir = config::resolve_config_dir(cli.config_dir.as_deref())?;
    let mut app = AppState::new(config::load_settings(&dir));

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        error!(error = %err, "dashboard loop failed");
        eprintln!("application error: {err}");
    }
    Ok(())
}
