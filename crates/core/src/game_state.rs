//! Game state module - the session around the match engine
//!
//! [`Game`] owns the one mutable board and is its only writer. It tracks
//! score, moves, level and phase, applies the input guards, and paces swaps
//! and resolution cycles so a frontend can show each intermediate board.
//!
//! Pacing is driven by [`Game::tick`]: a speculative swap stays on screen for
//! the swap pause, then every resolution transition waits one settle pause.
//! With zero pacing everything happens inside the call that triggered it.
//!
//! An in-flight cycle always runs to completion, pause or not. Level complete
//! and game over are only decided once the board is idle and the game is not
//! paused.

use serde::Serialize;
use tui_match3_types::{Coord, GameAction, GRID_SIZE, SETTLE_PAUSE_MS, SWAP_PAUSE_MS};

use crate::error::ConfigError;
use crate::generate::generate_grid;
use crate::grid::Grid;
use crate::palette::Palette;
use crate::resolve::{ResolveStep, Resolution};
use crate::rng::{ColorSource, SimpleRng};
use crate::scoring::{moves_for_level, progress_percent, target_score};
use crate::snapshot::GameSnapshot;
use crate::swap::{begin_swap, SelectOutcome, Selection, SwapAttempt};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Board shown, waiting for the player to start
    Ready,
    Playing,
    LevelComplete,
    GameOver,
}

/// What the board is busy with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Activity {
    Idle,
    /// A speculative swap is on screen
    ShowingSwap,
    /// A resolution cycle is running
    Resolving,
}

/// Notable things that happened since the last [`Game::take_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SwapCommitted { from: Coord, to: Coord },
    SwapReverted { from: Coord, to: Coord },
    Cascade {
        combo_index: u32,
        cells: usize,
        points: u32,
    },
    Settled { points: u32, cascades: u32, capped: bool },
    LevelComplete { level: u32, score: u32 },
    GameOver { level: u32, score: u32 },
}

#[derive(Debug, Clone)]
enum AfterSwap {
    Revert(Grid),
    Commit(Resolution),
}

#[derive(Debug, Clone)]
enum InFlight {
    Idle,
    ShowingSwap {
        from: Coord,
        to: Coord,
        then: AfterSwap,
        elapsed_ms: u32,
    },
    Resolving {
        resolution: Resolution,
        elapsed_ms: u32,
    },
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Game<S: ColorSource = SimpleRng> {
    grid: Grid,
    palette: Palette,
    source: S,
    selection: Selection,
    cursor: Coord,
    score: u32,
    moves: u32,
    level: u32,
    target: u32,
    phase: Phase,
    paused: bool,
    sound: bool,
    in_flight: InFlight,
    /// Combo index of the most recent scored pass
    combo_index: u32,
    last_score_delta: u32,
    swap_pause_ms: u32,
    settle_pause_ms: u32,
    events: Vec<GameEvent>,
}

impl Game<SimpleRng> {
    /// New level-1 game on the standard palette, seeded for reproducibility
    pub fn new(seed: u32) -> Self {
        Self::with_source(Palette::standard(), SimpleRng::new(seed))
    }
}

impl<S: ColorSource> Game<S> {
    /// New level-1 game drawing colors from `source`
    pub fn with_source(palette: Palette, mut source: S) -> Self {
        let grid = generate_grid(&palette, &mut source);
        Self {
            grid,
            palette,
            source,
            selection: Selection::new(),
            cursor: Coord::new(0, 0),
            score: 0,
            moves: moves_for_level(1),
            level: 1,
            target: target_score(1),
            phase: Phase::Ready,
            paused: false,
            sound: true,
            in_flight: InFlight::Idle,
            combo_index: 0,
            last_score_delta: 0,
            swap_pause_ms: SWAP_PAUSE_MS,
            settle_pause_ms: SETTLE_PAUSE_MS,
            events: Vec::new(),
        }
    }

    /// Set both the swap and the settle pause. `0` makes every action
    /// complete synchronously.
    pub fn with_pacing(mut self, pause_ms: u32) -> Self {
        self.swap_pause_ms = pause_ms;
        self.settle_pause_ms = pause_ms;
        self
    }

    /// Begin at `level` instead of 1
    pub fn with_level(mut self, level: u32) -> Result<Self, ConfigError> {
        if level == 0 {
            return Err(ConfigError::InvalidLevel(level));
        }
        self.level = level;
        self.moves = moves_for_level(level);
        self.target = target_score(level);
        Ok(self)
    }

    /// Replace the board with a prepared one (puzzles, scripted runs)
    pub fn with_grid(mut self, grid: Grid) -> Self {
        grid.debug_check();
        self.grid = grid;
        self
    }

    // Accessors

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selection.selected()
    }

    pub fn combo_index(&self) -> u32 {
        self.combo_index
    }

    pub fn last_score_delta(&self) -> u32 {
        self.last_score_delta
    }

    pub fn progress(&self) -> u8 {
        progress_percent(self.score, self.target)
    }

    pub fn activity(&self) -> Activity {
        match self.in_flight {
            InFlight::Idle => Activity::Idle,
            InFlight::ShowingSwap { .. } => Activity::ShowingSwap,
            InFlight::Resolving { .. } => Activity::Resolving,
        }
    }

    /// True while a swap or resolution cycle is in flight
    pub fn processing(&self) -> bool {
        self.activity() != Activity::Idle
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // Lifecycle

    /// Leave the ready screen and start playing the current board
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.set_phase(Phase::Playing);
        true
    }

    /// Advance after a completed level: new board, score back to 0
    pub fn next_level(&mut self) -> bool {
        if self.phase != Phase::LevelComplete {
            return false;
        }
        self.level += 1;
        self.reset_level();
        self.set_phase(Phase::Playing);
        true
    }

    /// Back to level 1 with a new board
    pub fn restart(&mut self) {
        self.level = 1;
        self.reset_level();
        self.paused = false;
        self.set_phase(Phase::Playing);
    }

    fn reset_level(&mut self) {
        self.score = 0;
        self.moves = moves_for_level(self.level);
        self.target = target_score(self.level);
        self.combo_index = 0;
        self.last_score_delta = 0;
        self.selection.clear();
        self.in_flight = InFlight::Idle;
        self.grid = generate_grid(&self.palette, &mut self.source);
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::info!(
                from = ?self.phase,
                to = ?phase,
                level = self.level,
                score = self.score,
                "phase change"
            );
            self.phase = phase;
        }
    }

    /// Toggle pause while playing. An in-flight cycle keeps running.
    pub fn toggle_pause(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.paused = !self.paused;
        tracing::debug!(paused = self.paused, "pause toggled");
        self.check_end();
        true
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        self.sound
    }

    fn accepts_input(&self) -> bool {
        self.phase == Phase::Playing
            && !self.paused
            && matches!(self.in_flight, InFlight::Idle)
            && self.moves > 0
    }

    // Input

    /// Interact with the tile at `at`: select, move the selection, or swap
    /// with an adjacent selected tile.
    pub fn select(&mut self, at: Coord) -> SelectOutcome {
        if !self.accepts_input() {
            return SelectOutcome::Ignored;
        }
        let outcome = self.selection.interact(at);
        if outcome != SelectOutcome::Ignored {
            self.cursor = at;
        }
        if let SelectOutcome::SwapRequested { from, to } = outcome {
            self.request_swap(from, to);
        }
        outcome
    }

    /// Pointer dragged onto `at` with the button held. Only acts when a tile
    /// is selected and `at` is a different tile.
    pub fn drag_to(&mut self, at: Coord) -> SelectOutcome {
        match self.selection.selected() {
            Some(from) if from != at => self.select(at),
            _ => SelectOutcome::Ignored,
        }
    }

    fn request_swap(&mut self, from: Coord, to: Coord) {
        match begin_swap(&self.grid, from, to, self.moves) {
            SwapAttempt::Rejected(why) => {
                tracing::debug!(?from, ?to, ?why, "swap rejected");
            }
            SwapAttempt::Reverted { swapped, original } => {
                if self.swap_pause_ms == 0 {
                    self.events.push(GameEvent::SwapReverted { from, to });
                } else {
                    self.grid = swapped;
                    self.in_flight = InFlight::ShowingSwap {
                        from,
                        to,
                        then: AfterSwap::Revert(original),
                        elapsed_ms: 0,
                    };
                }
            }
            SwapAttempt::Committed(resolution) => {
                self.moves -= 1;
                self.combo_index = 0;
                self.last_score_delta = 0;
                self.events.push(GameEvent::SwapCommitted { from, to });
                if self.swap_pause_ms == 0 {
                    self.run_paced(resolution, self.settle_pause_ms);
                } else {
                    self.grid = resolution.grid().clone();
                    self.in_flight = InFlight::ShowingSwap {
                        from,
                        to,
                        then: AfterSwap::Commit(resolution),
                        elapsed_ms: 0,
                    };
                }
            }
        }
        self.check_end();
    }

    /// Apply a player action. Returns true if anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::CursorUp => self.move_cursor(-1, 0),
            GameAction::CursorDown => self.move_cursor(1, 0),
            GameAction::CursorLeft => self.move_cursor(0, -1),
            GameAction::CursorRight => self.move_cursor(0, 1),
            GameAction::Select => self.select(self.cursor) != SelectOutcome::Ignored,
            GameAction::Pause => self.toggle_pause(),
            GameAction::ToggleSound => {
                self.toggle_sound();
                true
            }
            GameAction::Continue => match self.phase {
                Phase::Ready => self.start(),
                Phase::LevelComplete => self.next_level(),
                Phase::GameOver => {
                    self.restart();
                    true
                }
                Phase::Playing => false,
            },
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    fn move_cursor(&mut self, d_row: i8, d_col: i8) -> bool {
        match self.cursor.offset(d_row, d_col) {
            Some(next) => {
                self.cursor = next;
                true
            }
            None => false,
        }
    }

    // Timing

    /// Advance pacing timers by `elapsed_ms`
    pub fn tick(&mut self, elapsed_ms: u32) {
        match std::mem::replace(&mut self.in_flight, InFlight::Idle) {
            InFlight::Idle => {}
            InFlight::ShowingSwap {
                from,
                to,
                then,
                elapsed_ms: shown,
            } => {
                let shown = shown.saturating_add(elapsed_ms);
                if shown < self.swap_pause_ms {
                    self.in_flight = InFlight::ShowingSwap {
                        from,
                        to,
                        then,
                        elapsed_ms: shown,
                    };
                } else {
                    match then {
                        AfterSwap::Revert(original) => self.revert_swap(from, to, original),
                        AfterSwap::Commit(resolution) => {
                            // The first pass runs as soon as the swap pause ends.
                            let leftover = shown - self.swap_pause_ms;
                            let waited = leftover.saturating_add(self.settle_pause_ms);
                            self.run_paced(resolution, waited);
                        }
                    }
                }
            }
            InFlight::Resolving {
                resolution,
                elapsed_ms: waited,
            } => {
                self.run_paced(resolution, waited.saturating_add(elapsed_ms));
            }
        }
        self.check_end();
    }

    /// Finish whatever is in flight right now
    pub fn settle_now(&mut self) {
        let pending = match std::mem::replace(&mut self.in_flight, InFlight::Idle) {
            InFlight::Idle => None,
            InFlight::ShowingSwap {
                from,
                to,
                then: AfterSwap::Revert(original),
                ..
            } => {
                self.revert_swap(from, to, original);
                None
            }
            InFlight::ShowingSwap {
                then: AfterSwap::Commit(resolution),
                ..
            } => Some(resolution),
            InFlight::Resolving { resolution, .. } => Some(resolution),
        };
        if let Some(mut resolution) = pending {
            while !resolution.is_done() {
                self.step_resolution(&mut resolution);
            }
        }
        self.check_end();
    }

    fn revert_swap(&mut self, from: Coord, to: Coord, original: Grid) {
        self.grid = original;
        self.events.push(GameEvent::SwapReverted { from, to });
    }

    /// Step `resolution` once per settle pause covered by `budget_ms`
    fn run_paced(&mut self, mut resolution: Resolution, mut budget_ms: u32) {
        while !resolution.is_done() && budget_ms >= self.settle_pause_ms {
            budget_ms -= self.settle_pause_ms;
            self.step_resolution(&mut resolution);
        }
        if !resolution.is_done() {
            self.in_flight = InFlight::Resolving {
                resolution,
                elapsed_ms: budget_ms,
            };
        }
    }

    fn step_resolution(&mut self, resolution: &mut Resolution) {
        let step = resolution.step(&self.palette, &mut self.source);
        self.grid = resolution.grid().clone();
        match step {
            ResolveStep::Scored {
                cells,
                combo_index,
                points,
            } => {
                self.score = self.score.saturating_add(points);
                self.combo_index = combo_index;
                self.last_score_delta = points;
                self.events.push(GameEvent::Cascade {
                    combo_index,
                    cells,
                    points,
                });
            }
            ResolveStep::Settled | ResolveStep::Capped => {
                self.events.push(GameEvent::Settled {
                    points: resolution.score(),
                    cascades: resolution.cascades(),
                    capped: step == ResolveStep::Capped,
                });
            }
            ResolveStep::Cleared { .. } | ResolveStep::Refilled => {}
        }
    }

    fn check_end(&mut self) {
        if self.phase != Phase::Playing || self.paused || self.processing() {
            return;
        }
        if self.score >= self.target {
            self.selection.clear();
            self.set_phase(Phase::LevelComplete);
            self.events.push(GameEvent::LevelComplete {
                level: self.level,
                score: self.score,
            });
        } else if self.moves == 0 {
            self.selection.clear();
            self.set_phase(Phase::GameOver);
            self.events.push(GameEvent::GameOver {
                level: self.level,
                score: self.score,
            });
        }
    }

    // Snapshot

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.board);
        out.matched = [[false; GRID_SIZE]; GRID_SIZE];
        if let InFlight::Resolving { resolution, .. } = &self.in_flight {
            if let Some(matches) = resolution.pending_matches() {
                for at in matches.iter() {
                    out.matched[at.row as usize][at.col as usize] = true;
                }
            }
        }
        out.cursor = self.cursor;
        out.selected = self.selection.selected();
        out.score = self.score;
        out.moves = self.moves;
        out.level = self.level;
        out.target = self.target;
        out.progress = self.progress();
        out.combo_index = self.combo_index;
        out.last_score_delta = self.last_score_delta;
        out.phase = self.phase;
        out.activity = self.activity();
        out.paused = self.paused;
        out.processing = self.processing();
        out.sound = self.sound;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
