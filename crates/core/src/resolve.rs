//! Resolution loop - detect, score, clear, collapse, repeat until stable
//!
//! A resolution cycle is an explicit state machine rather than a recursive
//! call chain:
//!
//! ```text
//! Detect --(matches)--> Clear --> Collapse --> Detect ...
//!    |
//!    +--(no matches)--> Idle
//! ```
//!
//! The Detect transition also awards the pass's points, so the matched tiles
//! are still on the board in the state an observer sees right after scoring.
//! Every pass after the first is a cascade and raises the combo index by one.
//!
//! [`Resolution::step`] performs exactly one transition so an interactive
//! driver can render and pause in between. [`resolve`] runs a whole cycle
//! synchronously.

use tui_match3_types::MAX_RESOLVE_PASSES;

use crate::gravity::collapse_and_refill;
use crate::grid::Grid;
use crate::matcher::{find_matches, MatchSet};
use crate::palette::Palette;
use crate::rng::ColorSource;
use crate::scoring::cascade_points;

/// Where the machine is in the current pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePhase {
    /// Next step runs the detector (and scores any matches)
    Detect,
    /// Next step empties the matched cells
    Clear,
    /// Next step applies collapse and refill
    Collapse,
    /// Cycle finished
    Idle,
}

/// What a single [`Resolution::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStep {
    /// Matches found and points awarded
    Scored {
        cells: usize,
        combo_index: u32,
        points: u32,
    },
    /// Matched cells emptied
    Cleared { cells: usize },
    /// Columns collapsed and holes refilled
    Refilled,
    /// No matches left; the cycle is over
    Settled,
    /// Pass cap reached with matches still on the board
    Capped,
}

/// Result of a completed cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub grid: Grid,
    /// Total points across all passes
    pub score: u32,
    /// Number of scored passes
    pub cascades: u32,
    /// True if the pass cap stopped the cycle
    pub capped: bool,
}

/// One resolution cycle in progress
#[derive(Debug, Clone)]
pub struct Resolution {
    grid: Grid,
    phase: ResolvePhase,
    matches: MatchSet,
    combo_index: u32,
    score: u32,
    cascades: u32,
    capped: bool,
}

impl Resolution {
    /// Start a cycle on `grid` with combo index 0
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            phase: ResolvePhase::Detect,
            matches: MatchSet::new(),
            combo_index: 0,
            score: 0,
            cascades: 0,
            capped: false,
        }
    }

    /// The board as of the last transition
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> ResolvePhase {
        self.phase
    }

    /// Combo index of the current pass
    pub fn combo_index(&self) -> u32 {
        self.combo_index
    }

    /// Points awarded so far in this cycle
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn cascades(&self) -> u32 {
        self.cascades
    }

    pub fn is_done(&self) -> bool {
        self.phase == ResolvePhase::Idle
    }

    /// Cells scored in the current pass and not yet cleared
    pub fn pending_matches(&self) -> Option<&MatchSet> {
        match self.phase {
            ResolvePhase::Clear => Some(&self.matches),
            _ => None,
        }
    }

    /// Advance exactly one transition.
    ///
    /// Calling this on a finished cycle is a no-op that reports how it ended.
    pub fn step<S: ColorSource + ?Sized>(
        &mut self,
        palette: &Palette,
        source: &mut S,
    ) -> ResolveStep {
        match self.phase {
            ResolvePhase::Detect => {
                let matches = find_matches(&self.grid);
                if matches.is_empty() {
                    tracing::debug!(
                        cascades = self.cascades,
                        score = self.score,
                        "board settled"
                    );
                    self.phase = ResolvePhase::Idle;
                    return ResolveStep::Settled;
                }
                if self.cascades >= MAX_RESOLVE_PASSES {
                    tracing::warn!(
                        passes = self.cascades,
                        cells = matches.len(),
                        "resolution pass cap reached, leaving matches on the board"
                    );
                    self.capped = true;
                    self.phase = ResolvePhase::Idle;
                    return ResolveStep::Capped;
                }

                let cells = matches.len();
                let points = cascade_points(cells, self.combo_index);
                self.score = self.score.saturating_add(points);
                self.cascades += 1;
                self.matches = matches;
                self.phase = ResolvePhase::Clear;
                tracing::debug!(cells, combo_index = self.combo_index, points, "pass scored");
                ResolveStep::Scored {
                    cells,
                    combo_index: self.combo_index,
                    points,
                }
            }
            ResolvePhase::Clear => {
                let mut next = self.grid.clone();
                for at in self.matches.iter() {
                    next.clear(at);
                }
                self.grid = next;
                self.phase = ResolvePhase::Collapse;
                ResolveStep::Cleared {
                    cells: self.matches.len(),
                }
            }
            ResolvePhase::Collapse => {
                self.grid = collapse_and_refill(&self.grid, palette, source);
                self.matches = MatchSet::new();
                self.combo_index += 1;
                self.phase = ResolvePhase::Detect;
                ResolveStep::Refilled
            }
            ResolvePhase::Idle => {
                if self.capped {
                    ResolveStep::Capped
                } else {
                    ResolveStep::Settled
                }
            }
        }
    }

    /// Step until the cycle is over
    pub fn run_to_end<S: ColorSource + ?Sized>(&mut self, palette: &Palette, source: &mut S) {
        while !self.is_done() {
            self.step(palette, source);
        }
    }

    /// Consume the machine, returning the final board and totals
    pub fn finish(self) -> ResolveOutcome {
        ResolveOutcome {
            grid: self.grid,
            score: self.score,
            cascades: self.cascades,
            capped: self.capped,
        }
    }
}

/// Run a full resolution cycle on `grid` synchronously.
pub fn resolve<S: ColorSource + ?Sized>(
    grid: &Grid,
    palette: &Palette,
    source: &mut S,
) -> ResolveOutcome {
    let mut resolution = Resolution::new(grid.clone());
    resolution.run_to_end(palette, source);
    resolution.finish()
}
