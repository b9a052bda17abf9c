//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules: the board, run detection, gravity,
//! the resolution loop, swaps, and the session around them. It has **no
//! dependencies** on terminal, input, or I/O, making it:
//!
//! - **Deterministic**: the same seed (or scripted color source) produces the same game
//! - **Testable**: every stage is a plain function over an immutable [`Grid`]
//! - **Portable**: runs headless, in the terminal frontend, or in benchmarks
//!
//! # Module Structure
//!
//! - [`grid`]: 8x8 board of optional tiles with per-grid tile ids
//! - [`generate`]: run-free random initial boards
//! - [`matcher`]: detection of horizontal and vertical runs of 3+
//! - [`gravity`]: per-column collapse and refill
//! - [`resolve`]: the detect / clear / collapse state machine with combo scoring
//! - [`swap`]: selection rules and speculative swaps
//! - [`game_state`]: score, moves, levels, pause and pacing
//! - [`scoring`]: point and level formulas
//! - [`rng`]: color sources (seeded LCG, scripted)
//!
//! # Game Rules
//!
//! - Swapping two adjacent tiles is kept only if it creates a run of three or more
//! - Matched cells are cleared, columns fall, and new tiles drop in from the top
//! - Each pass pays `cells * 20 * (combo_index + 1)`; cascades raise the combo index
//! - A level is complete at `level * 1500` points; running out of moves ends the game
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{Game, Phase};
//! use tui_match3_types::GameAction;
//!
//! // Headless game: no pacing, every action settles immediately
//! let mut game = Game::new(12345).with_pacing(0);
//! game.apply_action(GameAction::Continue);
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.apply_action(GameAction::CursorRight);
//! game.apply_action(GameAction::Select);
//! assert!(game.selected().is_some());
//! ```
//!
//! # Timing
//!
//! Interactive frontends call [`Game::tick`](game_state::Game::tick) every frame
//! with the elapsed time. A swap is shown for 300ms, and each resolution step
//! waits another 300ms.

pub mod error;
pub mod game_state;
pub mod generate;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod palette;
pub mod resolve;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod swap;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use error::ConfigError;
pub use game_state::{Activity, Game, GameEvent, Phase};
pub use generate::{generate_grid, initialize_grid};
pub use gravity::{collapse, collapse_and_refill, refill};
pub use grid::Grid;
pub use matcher::{find_matches, MatchSet};
pub use palette::Palette;
pub use resolve::{resolve, ResolveOutcome, ResolvePhase, ResolveStep, Resolution};
pub use rng::{seed_from_clock, ColorSource, ScriptedColors, SimpleRng};
pub use scoring::{cascade_points, moves_for_level, progress_percent, target_score};
pub use snapshot::GameSnapshot;
pub use swap::{
    attempt_swap, begin_swap, SelectOutcome, Selection, SwapAttempt, SwapOutcome, SwapRejection,
};
