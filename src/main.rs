//! Terminal match-3 runner (default binary).
//!
//! Crossterm for input, the framebuffer renderer from `tui_match3::term` for
//! output. The engine is advanced with a fixed timestep; all pacing of swaps
//! and cascades lives in `Game::tick`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use tui_match3::core::{seed_from_clock, Game, GameEvent, GameSnapshot};
use tui_match3::input::{handle_key_event, should_quit};
use tui_match3::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_match3::types::{SETTLE_PAUSE_MS, TICK_MS};

/// Match-3 puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "tui-match3",
    version,
    about = "Match-3 puzzle in the terminal: swap neighbouring tiles to line up three or more.",
    long_about = "Swap two neighbouring tiles to make a line of three or more of the same color. \
        Matches clear, tiles fall, and new ones drop in; chain reactions score more.\n\n\
        CONTROLS:\n  Arrows / hjkl / wasd  Move cursor    Space / Enter  Select or swap\n  \
        Mouse click           Select or swap  P  Pause   M  Sound\n  \
        N                     Start / next level   R  Restart   Q / Esc  Quit"
)]
struct Args {
    /// Seed for the board sequence (random if not set).
    #[arg(long, value_name = "N")]
    seed: Option<u32>,

    /// Level to start at.
    #[arg(long, default_value = "1", value_name = "N")]
    level: u32,

    /// Pause between cascade steps in milliseconds (0 = instant).
    #[arg(long, default_value_t = SETTLE_PAUSE_MS, value_name = "MS")]
    pace_ms: u32,

    /// Write logs to this file (set RUST_LOG to tune verbosity).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start playing immediately instead of showing the start screen.
    #[arg(long)]
    no_start_screen: bool,
}

/// Runtime options collected from the command line.
#[derive(Debug, Clone)]
struct GameConfig {
    seed: u32,
    level: u32,
    pace_ms: u32,
    skip_start_screen: bool,
}

impl From<&Args> for GameConfig {
    fn from(args: &Args) -> Self {
        Self {
            seed: args.seed.unwrap_or_else(seed_from_clock),
            level: args.level,
            pace_ms: args.pace_ms,
            skip_start_screen: args.no_start_screen,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = GameConfig::from(&args);
    tracing::info!(?config, "starting tui-match3");

    let mut game = Game::new(config.seed)
        .with_pacing(config.pace_ms)
        .with_level(config.level)
        .context("invalid --level")?;
    if config.skip_start_screen {
        game.start();
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    tracing::info!(score = game.score(), level = game.level(), "exiting");
    result
}

/// Log to a file so the alternate screen is not disturbed.
fn init_logging(path: &PathBuf) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    let at = view.cell_at(viewport, mouse.column, mouse.row);
                    match (mouse.kind, at) {
                        (MouseEventKind::Down(MouseButton::Left), Some(at)) => {
                            game.select(at);
                        }
                        // Press on a tile and drag onto a neighbour to swap.
                        (MouseEventKind::Drag(MouseButton::Left), Some(at)) => {
                            game.drag_to(at);
                        }
                        _ => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let elapsed = last_tick.elapsed().as_millis().min(u32::MAX as u128) as u32;
            last_tick = Instant::now();
            game.tick(elapsed);
        }

        for ev in game.take_events() {
            if matches!(ev, GameEvent::Cascade { .. }) && game.sound_enabled() {
                term.bell()?;
            }
            tracing::debug!(?ev, "game event");
        }
    }
}
