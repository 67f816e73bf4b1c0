use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, DefaultTerminal, Terminal};
use tracing_subscriber::{prelude::*, EnvFilter};

use connect_four::config::{AppConfig, LogConfig};
use connect_four::game::{GameOutcome, GameState};
use connect_four::ui::App;

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Replay moves without the TUI and print the resulting position
    #[arg(long)]
    headless: bool,

    /// Comma-separated zero-based columns to replay in headless mode
    #[arg(long, value_delimiter = ',', requires = "headless")]
    moves: Vec<usize>,

    /// Print the headless result as a JSON snapshot
    #[arg(long, requires = "headless")]
    json: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if cli.headless {
        init_logging(&config.log, true)?;
        run_headless(&cli.moves, cli.json)
    } else {
        init_logging(&config.log, false)?;
        run_tui(&config)
    }
}

/// Headless runs log to stderr; the TUI owns the screen, so it logs to a file.
fn init_logging(log: &LogConfig, headless: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));

    if headless {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(io::stderr);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log.file)
            .with_context(|| format!("opening log file {}", log.file.display()))?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .compact()
            .with_writer(Mutex::new(file));
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .init();
    }

    Ok(())
}

fn run_headless(moves: &[usize], json: bool) -> Result<()> {
    let state = GameState::from_moves(moves).context("replaying moves")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
        return Ok(());
    }

    println!("{}", state.board());
    match state.outcome() {
        GameOutcome::InProgress => {
            println!("{} to move", state.current_player().name());
        }
        GameOutcome::Winner { player, line } => {
            let cells: Vec<String> = line
                .cells()
                .iter()
                .map(|p| format!("({},{})", p.row, p.col))
                .collect();
            println!("{} wins: {}", player.name(), cells.join(" "));
        }
        GameOutcome::Draw => println!("Draw"),
    }
    Ok(())
}

fn run_tui(config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut terminal =
        setup_or_restore(enter_alternate_screen, restore_terminal).context("setting up terminal")?;

    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal even if the app errored
    restore_terminal();
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}

fn enter_alternate_screen() -> io::Result<DefaultTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Run `setup`; if it fails, call `restore` before handing back the error.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> io::Result<T> {
    setup().inspect_err(|_| restore())
}
