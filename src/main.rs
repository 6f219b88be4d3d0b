use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::config::AppConfig;
use connect_four::game::{GameState, Player};
use connect_four::ui::App;
use connect_four::{console, logging};

/// Play Connect Four against an alpha-beta search.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against an alpha-beta AI")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the search depth in plies
    #[arg(long)]
    depth: Option<u32>,

    /// Seed the AI's tie-break RNG for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Side the human plays: x (moves first) or o
    #[arg(long, value_parser = parse_player)]
    human_player: Option<Player>,

    /// Play in the plain text console instead of the terminal UI
    #[arg(long)]
    console: bool,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn parse_player(s: &str) -> Result<Player, String> {
    match s {
        "x" | "X" => Ok(Player::X),
        "o" | "O" => Ok(Player::O),
        other => Err(format!("unknown player '{other}' (expected 'x' or 'o')")),
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // The terminal UI owns the screen, so it never logs to stderr.
    let stderr_level = if cli.console {
        LevelFilter::Warn
    } else {
        LevelFilter::Off
    };
    logging::init(cli.log_file.as_deref(), stderr_level).context("setting up logging")?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if cli.seed.is_some() {
        config.search.seed = cli.seed;
    }
    if let Some(human) = cli.human_player {
        config.game.human = human;
    }
    config.validate().context("invalid settings")?;

    let mut agent = config.agent();
    if cli.console {
        let state = GameState::with_geometry(config.board)?;
        let stdin = io::stdin();
        console::play(
            state,
            config.game.human,
            &mut agent,
            &mut stdin.lock(),
            &mut io::stdout(),
        )?;
        return Ok(());
    }

    let mut app = App::new(config.board, config.game.human, Box::new(agent))?;
    run_tui(&mut app).context("running terminal UI")
}

fn run_tui(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
