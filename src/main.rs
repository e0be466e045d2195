use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use dotchase::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    game::{Game, GameSettings},
    logging,
    runtime::{CrosstermInput, FixedTicker, SystemClock},
    ui::TerminalSurface,
    GameError,
};
use ratatui::backend::CrosstermBackend;
use std::{
    io::{self, stdin, Stdout},
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;

/// catch the dot before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Chase the dot around the terminal with h/j/k/l or the arrow keys. Every catch scores a point and moves the dot; the round ends when the timer runs out."
)]
pub struct Cli {
    /// length of a round in seconds
    #[clap(short = 's', long, value_parser = clap::value_parser!(u64).range(1..))]
    seconds: Option<u64>,

    /// idle delay between input polls, in milliseconds
    #[clap(long)]
    tick_ms: Option<u64>,

    /// directory to write the log file to
    #[clap(long)]
    log_dir: Option<PathBuf>,

    /// store the effective settings in the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Overlays command line flags on the stored configuration
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.seconds {
            config.round_secs = secs;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_ms = ms;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_dir = cli.log_dir.clone().unwrap_or_else(AppDirs::log_dir);
    let _log_guard = init_logging(&log_dir);

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store
            .save(&config)
            .with_context(|| format!("failed to save {}", store.path().display()))?;
    }

    tracing::info!(?config, "starting");

    let high_score = run_tui(&config)?;

    tracing::info!(high_score, "exiting");
    Ok(())
}

/// Sets up file logging, or warns on stderr and plays on without a log.
fn init_logging(dir: &Path) -> Option<WorkerGuard> {
    match logging::init(dir) {
        Ok((guard, file)) => {
            tracing::info!(log = %file.display(), "logging to file");
            Some(guard)
        }
        Err(err) => {
            eprintln!(
                "warning: logging disabled, cannot write to {}: {err}",
                dir.display()
            );
            None
        }
    }
}

fn run_tui(config: &Config) -> anyhow::Result<u32> {
    let surface = enter_terminal().map_err(GameError::Initialization)?;

    let mut game = Game::new(
        surface,
        CrosstermInput::new(),
        SystemClock,
        FixedTicker::new(config.tick_interval()),
        GameSettings::from(config),
    );
    let result = game.run();

    let restored = restore_terminal();
    let high_score = result.context("game aborted")?;
    restored.context("failed to restore the terminal")?;

    Ok(high_score)
}

fn enter_terminal() -> io::Result<TerminalSurface<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    let entered = execute!(stdout, EnterAlternateScreen, cursor::Hide);
    let surface = entered.and_then(|()| TerminalSurface::new(CrosstermBackend::new(stdout)));

    if surface.is_err() {
        let _ = restore_terminal();
    }
    surface
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["dotchase"]);

        assert_eq!(cli.seconds, None);
        assert_eq!(cli.tick_ms, None);
        assert_eq!(cli.log_dir, None);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_seconds() {
        let cli = Cli::parse_from(["dotchase", "-s", "30"]);
        assert_eq!(cli.seconds, Some(30));

        let cli = Cli::parse_from(["dotchase", "--seconds", "90"]);
        assert_eq!(cli.seconds, Some(90));
    }

    #[test]
    fn test_cli_rejects_zero_seconds() {
        assert!(Cli::try_parse_from(["dotchase", "-s", "0"]).is_err());
    }

    #[test]
    fn test_cli_log_dir() {
        let cli = Cli::parse_from(["dotchase", "--log-dir", "/tmp/dotchase"]);
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/dotchase")));
    }

    #[test]
    fn test_unusable_log_dir_does_not_stop_startup() {
        let not_a_dir = tempfile::NamedTempFile::new().unwrap();
        let guard = init_logging(&not_a_dir.path().join("logs"));
        assert!(guard.is_none());
    }

    #[test]
    fn test_apply_overrides_only_given_flags() {
        let stored = Config {
            round_secs: 45,
            tick_ms: 20,
        };

        let cli = Cli::parse_from(["dotchase", "--tick-ms", "5"]);
        let merged = cli.apply(stored.clone());
        assert_eq!(merged.round_secs, 45);
        assert_eq!(merged.tick_ms, 5);

        let cli = Cli::parse_from(["dotchase"]);
        assert_eq!(cli.apply(stored.clone()), stored);
    }
}
