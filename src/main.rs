//! coordprep - preview a CSV file and pick its coordinate columns and
//! reference systems from the terminal.

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use coordprep::app::App;
use coordprep::config::{Config, ConfigError};
use coordprep::error::{self, AppError};
use coordprep::events::EventHandler;
use coordprep::logging;
use coordprep::tasks::TaskSpawner;
use coordprep::ui::init_theme;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Preview a CSV file and choose coordinate columns and reference systems"
)]
struct Cli {
    /// CSV file to load on startup
    file: Option<PathBuf>,
    /// Use this configuration file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of data rows shown in the preview
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    preview_rows: Option<u16>,
    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug).context("Failed to initialize logging")?;

    let (mut config, config_error) = match load_config(&cli) {
        Ok(config) => (config, None),
        Err(e) => {
            warn!(error = %e, "Falling back to default configuration");
            (Config::default(), Some(e))
        }
    };
    if let Some(rows) = cli.preview_rows {
        config.settings.preview_rows = usize::from(rows);
    }

    init_theme(&config.settings.theme);

    let mut app = App::new(config);
    if let Some(e) = config_error {
        app.handle_error(&AppError::from(e));
    }
    if let Some(file) = &cli.file {
        app.select_file(file);
    }

    let mut terminal = setup_terminal().context("Failed to set up terminal")?;
    let result = run(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    logging::shutdown();
    result
}

fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn setup_terminal() -> error::Result<Tui> {
    let setup = || -> io::Result<Tui> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        Terminal::new(CrosstermBackend::new(stdout))
    };
    setup().map_err(|e| AppError::terminal(e.to_string()))
}

fn restore_terminal(terminal: &mut Tui) -> error::Result<()> {
    let mut restore = || -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        )?;
        terminal.show_cursor()
    };
    restore().map_err(|e| AppError::terminal(e.to_string()))
}

async fn run(terminal: &mut Tui, app: &mut App) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let spawner = TaskSpawner::new(tx);
    let events = EventHandler::new();

    info!("Entering main loop");
    while !app.should_quit() {
        if let Some(request) = app.take_pending_load() {
            spawner.spawn_load_file(request);
        }
        while let Ok(message) = rx.try_recv() {
            app.handle_message(message);
        }

        terminal.draw(|frame| app.view(frame))?;

        let event = events.next()?;
        app.update(event);
    }

    Ok(())
}
