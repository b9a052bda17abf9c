//! Swap controller - selection and speculative swaps
//!
//! A swap is only kept if it creates at least one match. Otherwise the
//! original board comes back unchanged (same tiles, same ids, same places)
//! and no move is spent.

use tui_match3_types::{Coord, GRID_SIZE};

use crate::grid::Grid;
use crate::matcher::find_matches;
use crate::palette::Palette;
use crate::resolve::Resolution;
use crate::rng::ColorSource;

/// Result of clicking (or pressing select on) a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing was selected; now `0` is
    Selected(Coord),
    /// A non-adjacent cell (or the selected one again) was picked; the
    /// selection moved there
    Reselected { from: Coord, to: Coord },
    /// An adjacent cell was picked; the selection is cleared
    SwapRequested { from: Coord, to: Coord },
    /// Input refused (off the board, or the game is not accepting input)
    Ignored,
}

/// The currently selected cell, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Coord>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Apply one interaction at `at`.
    pub fn interact(&mut self, at: Coord) -> SelectOutcome {
        if at.row as usize >= GRID_SIZE || at.col as usize >= GRID_SIZE {
            return SelectOutcome::Ignored;
        }
        match self.selected {
            None => {
                self.selected = Some(at);
                SelectOutcome::Selected(at)
            }
            Some(prev) if prev.is_adjacent(at) => {
                self.selected = None;
                SelectOutcome::SwapRequested { from: prev, to: at }
            }
            Some(prev) => {
                self.selected = Some(at);
                SelectOutcome::Reselected { from: prev, to: at }
            }
        }
    }
}

/// Why a swap was refused before touching the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    NotAdjacent,
    EmptyCell,
    NoMovesLeft,
}

/// Stepwise result of a swap request
#[derive(Debug, Clone)]
pub enum SwapAttempt {
    Rejected(SwapRejection),
    /// No match; `swapped` may be shown briefly before going back to
    /// `original`
    Reverted { swapped: Grid, original: Grid },
    /// At least one match; drive the resolution to completion. Costs one move.
    Committed(Resolution),
}

/// Synchronous result of a swap request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    pub committed: bool,
    /// Board after the swap and its resolution (the input board if not
    /// committed)
    pub grid: Grid,
    pub score_delta: u32,
    pub moves_consumed: u32,
    pub cascades: u32,
    pub rejection: Option<SwapRejection>,
}

/// Validate and perform the speculative swap, without resolving.
pub fn begin_swap(grid: &Grid, a: Coord, b: Coord, moves_remaining: u32) -> SwapAttempt {
    if moves_remaining == 0 {
        return SwapAttempt::Rejected(SwapRejection::NoMovesLeft);
    }
    if !a.is_adjacent(b) {
        return SwapAttempt::Rejected(SwapRejection::NotAdjacent);
    }
    if grid.tile(a).is_none() || grid.tile(b).is_none() {
        return SwapAttempt::Rejected(SwapRejection::EmptyCell);
    }

    let swapped = grid.swapped(a, b);
    swapped.debug_check();

    if find_matches(&swapped).is_empty() {
        tracing::debug!(?a, ?b, "swap made no match, reverting");
        SwapAttempt::Reverted {
            swapped,
            original: grid.clone(),
        }
    } else {
        tracing::debug!(?a, ?b, "swap committed");
        SwapAttempt::Committed(Resolution::new(swapped))
    }
}

/// Swap `a` and `b`, and if that makes a match, resolve the board fully.
pub fn attempt_swap<S: ColorSource + ?Sized>(
    grid: &Grid,
    a: Coord,
    b: Coord,
    moves_remaining: u32,
    palette: &Palette,
    source: &mut S,
) -> SwapOutcome {
    let unchanged = |rejection| SwapOutcome {
        committed: false,
        grid: grid.clone(),
        score_delta: 0,
        moves_consumed: 0,
        cascades: 0,
        rejection,
    };

    match begin_swap(grid, a, b, moves_remaining) {
        SwapAttempt::Rejected(why) => unchanged(Some(why)),
        SwapAttempt::Reverted { .. } => unchanged(None),
        SwapAttempt::Committed(mut resolution) => {
            resolution.run_to_end(palette, source);
            let outcome = resolution.finish();
            SwapOutcome {
                committed: true,
                grid: outcome.grid,
                score_delta: outcome.score,
                moves_consumed: 1,
                cascades: outcome.cascades,
                rejection: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedColors;
    use tui_match3_types::TileColor;

    // Swapping (2,5) and (2,6) moves a red into row 2 next to two reds.
    fn near_match() -> Grid {
        Grid::from_ascii(&[
            "RGBYPORG", "GBYPORGB", "BYPRRBRY", "YPORGBYP", "PORGBYPO", "ORGBYPOR", "RGBYPORG",
            "GBYPORGB",
        ])
        .unwrap()
    }

    #[test]
    fn selection_cycle() {
        let mut sel = Selection::new();
        let a = Coord::new(3, 3);
        assert_eq!(sel.interact(a), SelectOutcome::Selected(a));
        assert_eq!(sel.interact(a), SelectOutcome::Reselected { from: a, to: a });
        assert_eq!(sel.selected(), Some(a));

        let far = Coord::new(6, 1);
        assert_eq!(sel.interact(far), SelectOutcome::Reselected { from: a, to: far });
        assert_eq!(sel.selected(), Some(far));

        let next = Coord::new(6, 2);
        assert_eq!(
            sel.interact(next),
            SelectOutcome::SwapRequested { from: far, to: next }
        );
        assert_eq!(sel.selected(), None);

        assert_eq!(sel.interact(Coord::new(8, 0)), SelectOutcome::Ignored);
    }

    #[test]
    fn committed_swap_resolves() {
        let grid = near_match();
        let mut src = ScriptedColors::new(vec![TileColor::Green, TileColor::Red, TileColor::Blue]);
        let out = attempt_swap(
            &grid,
            Coord::new(2, 5),
            Coord::new(2, 6),
            5,
            &Palette::standard(),
            &mut src,
        );
        assert!(out.committed);
        assert_eq!(out.moves_consumed, 1);
        assert_eq!(out.score_delta, 60);
        assert_eq!(out.cascades, 1);
        assert!(out.grid.is_full());
    }

    #[test]
    fn swap_without_match_reverts_exactly() {
        let grid = near_match();
        let mut src = ScriptedColors::new(vec![TileColor::Red]);
        let out = attempt_swap(
            &grid,
            Coord::new(0, 0),
            Coord::new(0, 1),
            5,
            &Palette::standard(),
            &mut src,
        );
        assert!(!out.committed);
        assert_eq!(out.rejection, None);
        assert_eq!(out.moves_consumed, 0);
        assert_eq!(out.score_delta, 0);
        assert_eq!(out.grid, grid);
        assert_eq!(src.drawn(), 0);
    }

    #[test]
    fn reverted_attempt_exposes_the_swapped_board() {
        let grid = near_match();
        match begin_swap(&grid, Coord::new(0, 0), Coord::new(1, 0), 1) {
            SwapAttempt::Reverted { swapped, original } => {
                assert_eq!(original, grid);
                assert_eq!(swapped.color(0, 0), Some(TileColor::Green));
                assert_eq!(swapped.color(1, 0), Some(TileColor::Red));
            }
            other => panic!("expected revert, got {other:?}"),
        }
    }

    #[test]
    fn rejections_leave_the_board_alone() {
        let grid = near_match();
        let palette = Palette::standard();
        let mut src = ScriptedColors::new(vec![TileColor::Red]);

        let out = attempt_swap(&grid, Coord::new(2, 5), Coord::new(2, 7), 5, &palette, &mut src);
        assert_eq!(out.rejection, Some(SwapRejection::NotAdjacent));
        assert_eq!(out.grid, grid);

        let out = attempt_swap(&grid, Coord::new(2, 5), Coord::new(2, 6), 0, &palette, &mut src);
        assert_eq!(out.rejection, Some(SwapRejection::NoMovesLeft));
        assert!(!out.committed);

        let mut holey = grid.clone();
        holey.clear(Coord::new(4, 4));
        let out = attempt_swap(&holey, Coord::new(4, 4), Coord::new(4, 5), 5, &palette, &mut src);
        assert_eq!(out.rejection, Some(SwapRejection::EmptyCell));
        assert_eq!(out.grid, holey);
    }
}
