use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy_heads::game::{process_input, tick, FlappyGame, FrameClock};
use flappy_heads::input::{map_key, map_mouse, Action};
use flappy_heads::utils::logging;
use flappy_heads::{build_info, record_run, ui, GameConfig, HighScores, ScoreStore, INPUT_POLL_MS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(
    name = "flappy-heads",
    version = build_info::version_string(),
    about = "Tap to keep your head in the air and dodge the others."
)]
struct Args {
    #[arg(long, help = "Seed for a reproducible obstacle sequence")]
    seed: Option<u64>,
    #[arg(long, help = "Simulation tick length in milliseconds")]
    tick_ms: Option<u64>,
    #[arg(long, help = "Path to config.json (defaults to the platform config dir)")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the high score table and exit
    Scores,
    /// Delete the high score table
    ResetScores,
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = logging::default_log_path().context("Could not locate data directory")?;
    // Logging is best-effort; the game runs without it
    if let Err(e) = logging::init(&log_path) {
        eprintln!("Warning: logging disabled ({})", e);
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => GameConfig::default_path().context("Could not locate config directory")?,
    };
    let mut config = GameConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(tick_ms) = args.tick_ms {
        config.tick_ms = tick_ms;
    }
    config.validate().context("Invalid settings")?;
    log::info!("Starting {} with {:?}", build_info::version_string(), config);

    let store = ScoreStore::new().context("Could not locate score file")?;

    match args.command {
        Some(Command::Scores) => {
            print_scores(&store.load_or_default(config.max_high_scores), config.tick_ms);
            Ok(())
        }
        Some(Command::ResetScores) => {
            store
                .delete()
                .with_context(|| format!("Failed to delete {}", store.path().display()))?;
            println!("High scores cleared.");
            Ok(())
        }
        None => play(&config, &store),
    }
}

fn print_scores(scores: &HighScores, tick_ms: u64) {
    if scores.is_empty() {
        println!("No high scores yet.");
        return;
    }
    println!("{:>4}  {:>6}  {:>8}  Date", "Rank", "Dodged", "Time");
    for (i, entry) in scores.entries.iter().enumerate() {
        let date = Utc
            .timestamp_opt(entry.timestamp, 0)
            .single()
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "?".to_string());
        let seconds = entry.ticks as f64 * tick_ms as f64 / 1000.0;
        println!(
            "{:>4}  {:>6}  {:>7.1}s  {}",
            i + 1,
            entry.score,
            seconds,
            date
        );
    }
}

fn play(config: &GameConfig, store: &ScoreStore) -> Result<()> {
    let mut scores = store.load_or_default(config.max_high_scores);
    let mut terminal = setup_terminal().context("Failed to initialise terminal")?;

    let result = run_game(&mut terminal, config, store, &mut scores);

    // Restore the terminal even if the loop failed
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;
    result?;

    println!("Goodbye!");
    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    or_rollback(
        || {
            let mut stdout = io::stdout();
            stdout.execute(EnterAlternateScreen)?;
            stdout.execute(EnableMouseCapture)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            let mut stdout = io::stdout();
            let _ = stdout.execute(DisableMouseCapture);
            let _ = stdout.execute(LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )
}

/// Run `setup`; if it fails, run `rollback` before returning the error.
fn or_rollback<T>(
    setup: impl FnOnce() -> io::Result<T>,
    rollback: impl FnOnce(),
) -> io::Result<T> {
    setup().map_err(|e| {
        rollback();
        e
    })
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

fn run_game(
    terminal: &mut Tui,
    config: &GameConfig,
    store: &ScoreStore,
    scores: &mut HighScores,
) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = FlappyGame::from_config(config);
    let mut last_rank: Option<usize> = None;
    let mut recorded = false;
    let mut clock = FrameClock::new(Instant::now());

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, &game, scores, last_rank))?;

        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            let action = match event::read()? {
                Event::Key(key) => map_key(key, game.is_over()),
                Event::Mouse(mouse) => {
                    let button = ui::restart_button_for(&game, terminal.size()?);
                    map_mouse(mouse, button, game.is_over())
                }
                _ => Action::None,
            };

            match action {
                Action::Quit => break,
                Action::Game(input) => {
                    let was_over = game.is_over();
                    process_input(&mut game, input);
                    if was_over && !game.is_over() {
                        last_rank = None;
                        recorded = false;
                        clock.reset(Instant::now());
                    }
                }
                Action::None => {}
            }
        }

        tick(&mut game, clock.elapsed_ms(Instant::now()), &mut rng);

        if game.is_over() && !recorded {
            recorded = true;
            last_rank = record_run(scores, &game, Utc::now().timestamp());
            if last_rank.is_some() {
                if let Err(e) = store.save(scores) {
                    log::warn!("Failed to save high scores: {}", e);
                }
            }
        }
    }

    log::info!("Quit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_rolls_back() {
        let rolled_back = Cell::new(false);
        let result: io::Result<()> = or_rollback(
            || Err(io::Error::new(io::ErrorKind::Other, "no alternate screen")),
            || rolled_back.set(true),
        );
        assert!(result.is_err());
        assert!(rolled_back.get());
    }

    #[test]
    fn test_successful_setup_keeps_state() {
        let rolled_back = Cell::new(false);
        let result = or_rollback(|| Ok(7), || rolled_back.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!rolled_back.get());
    }
}
