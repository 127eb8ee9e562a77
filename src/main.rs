//! farmstand - Terminal Farm Storefront
//!
//! Lists the farm's products, keeps a cart for the session and takes
//! orders through a form, all inside the terminal.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_subscriber::EnvFilter;

use farmstand::application::{App, AppMode};
use farmstand::domain::{AcknowledgeOnly, Catalog, OrderSink};
use farmstand::infrastructure::{OrderJournal, Settings};
use farmstand::presentation::{render_ui, InputHandler};

#[derive(Debug, Parser)]
#[command(name = "farmstand", about = "Terminal storefront for a small farm")]
struct Cli {
    /// Path to a TOML settings file (default: ./farmstand.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Append submitted orders as JSON lines to this file
    #[arg(long)]
    orders: Option<PathBuf>,
    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Log filter directive, e.g. "debug" or "farmstand=trace"
    #[arg(long)]
    log_level: Option<String>,
}

/// Entry point for the farmstand terminal storefront.
///
/// Resolves settings, sets up logging and the terminal, then runs the
/// event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the settings cannot be read, the log file cannot be
/// opened, or terminal setup fails.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(orders) = cli.orders {
        settings.orders_file = Some(orders);
    }
    if let Some(log_file) = cli.log_file {
        settings.log_file = Some(log_file);
    }
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }

    init_logging(&settings)?;

    let sink: Box<dyn OrderSink> = match &settings.orders_file {
        Some(path) => Box::new(OrderJournal::new(path)),
        None => Box::new(AcknowledgeOnly::default()),
    };
    let mut app = App::new(Catalog::default(), sink);
    tracing::info!(orders_file = ?settings.orders_file, "storefront started");

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "event loop failed");
    }
    tracing::info!("storefront closed");

    res.context("running terminal UI")
}

/// Sends tracing output to the configured log file.
///
/// Nothing is installed when no log file is set, since stdout belongs to
/// the terminal UI.
fn init_logging(settings: &Settings) -> anyhow::Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_new(&settings.log_level)
        .with_context(|| format!("invalid log level {:?}", settings.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Main application event loop.
///
/// Redraws after every key press. Quits on 'q' while browsing or on
/// Ctrl+C in any mode.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.update_viewport_size(terminal.size()?.height);
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode == AppMode::Browsing => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
