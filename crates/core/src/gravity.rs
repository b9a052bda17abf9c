//! Collapse and refill - gravity per column, then new tiles on top
//!
//! Columns are independent. Within a column, surviving tiles slide down to
//! the lowest free rows keeping their top-to-bottom order, and every cell
//! left empty at the top gets a brand new tile. Refill applies no run
//! avoidance: a refill that lines up three colors is a cascade, which is how
//! combos happen.

use tui_match3_types::{Coord, GRID_SIZE};

use crate::grid::Grid;
use crate::palette::Palette;
use crate::rng::ColorSource;

/// Compact every column downward, leaving holes only at the top.
pub fn collapse(grid: &Grid) -> Grid {
    let mut out = grid.clone();

    for col in 0..GRID_SIZE {
        let column = grid.column(col);
        // Two pointers, scanning bottom to top.
        let mut write_row = GRID_SIZE;
        for read_row in (0..GRID_SIZE).rev() {
            if let Some(tile) = column[read_row] {
                write_row -= 1;
                out.put(Coord::new(write_row as u8, col as u8), Some(tile));
            }
        }
        for row in 0..write_row {
            out.put(Coord::new(row as u8, col as u8), None);
        }
    }

    out.debug_check();
    out
}

/// Fill every hole with a new random tile.
pub fn refill<S: ColorSource + ?Sized>(grid: &Grid, palette: &Palette, source: &mut S) -> Grid {
    let mut out = grid.clone();

    for col in 0..GRID_SIZE {
        for row in 0..GRID_SIZE {
            let at = Coord::new(row as u8, col as u8);
            if grid.tile(at).is_none() {
                let color = source.pick(palette.colors());
                out.spawn(at, color);
            }
        }
    }

    out.debug_check();
    out
}

/// [`collapse`] followed by [`refill`]; the result has no holes.
pub fn collapse_and_refill<S: ColorSource + ?Sized>(
    grid: &Grid,
    palette: &Palette,
    source: &mut S,
) -> Grid {
    let collapsed = collapse(grid);
    let filled = refill(&collapsed, palette, source);
    debug_assert!(filled.is_full());
    filled
}
