//! Grid initialization - a full board with no pre-formed runs
//!
//! Cells are filled left to right, top to bottom. A color is banned for a cell
//! when the two cells to its left are both that color, or the two cells above
//! are. The pick is uniform over the remaining palette colors, which is the
//! same distribution as reject-and-resample but always finishes in one draw.
//! A valid [`Palette`] has at least three colors and at most two can be
//! banned, so a choice always exists.

use tui_match3_types::{Coord, GRID_SIZE};

use crate::grid::Grid;
use crate::palette::Palette;
use crate::rng::{ColorSource, SimpleRng};

/// Generate a fully populated board free of runs of three.
pub fn generate_grid<S: ColorSource + ?Sized>(palette: &Palette, source: &mut S) -> Grid {
    let mut grid = Grid::empty();

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let left = if col >= 2 {
                grid.color(row, col - 1)
                    .filter(|c| grid.color(row, col - 2) == Some(*c))
            } else {
                None
            };
            let up = if row >= 2 {
                grid.color(row - 1, col)
                    .filter(|c| grid.color(row - 2, col) == Some(*c))
            } else {
                None
            };

            let allowed = palette.allowed([left, up]);
            debug_assert!(!allowed.is_empty());
            let color = source.pick(&allowed);
            grid.spawn(Coord::new(row as u8, col as u8), color);
        }
    }

    grid.debug_check();
    grid
}

/// Fresh standard-palette board for a level.
///
/// With a seed the board is reproducible; without one the seed comes from
/// the clock.
pub fn initialize_grid(seed: Option<u32>) -> Grid {
    let seed = seed.unwrap_or_else(crate::rng::seed_from_clock);
    tracing::debug!(seed, "initializing grid");
    generate_grid(&Palette::standard(), &mut SimpleRng::new(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::find_matches;
    use crate::rng::ScriptedColors;
    use tui_match3_types::TileColor;

    #[test]
    fn generated_grids_are_full_and_match_free() {
        for seed in 0..200 {
            let grid = generate_grid(&Palette::standard(), &mut SimpleRng::new(seed));
            assert!(grid.is_full(), "seed {seed} left holes");
            assert!(find_matches(&grid).is_empty(), "seed {seed}:\n{grid}");
        }
    }

    #[test]
    fn minimal_palette_still_match_free() {
        let palette = Palette::new(&[TileColor::Red, TileColor::Blue, TileColor::Green]).unwrap();
        for seed in 0..200 {
            let grid = generate_grid(&palette, &mut SimpleRng::new(seed));
            assert!(find_matches(&grid).is_empty());
            assert!(grid.tiles().all(|t| palette.contains(t.color)));
        }
    }

    #[test]
    fn adversarial_source_cannot_force_a_run() {
        // A source that always wants red would build red runs without the bans.
        let mut src = ScriptedColors::new(vec![TileColor::Red]);
        let grid = generate_grid(&Palette::standard(), &mut src);
        assert!(find_matches(&grid).is_empty());
        assert_eq!(src.drawn(), 64);
    }

    #[test]
    fn ids_are_unique() {
        let grid = initialize_grid(Some(42));
        let mut ids: Vec<_> = grid.tiles().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn same_seed_same_board() {
        assert_eq!(initialize_grid(Some(7)), initialize_grid(Some(7)));
    }
}
