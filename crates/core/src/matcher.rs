//! Match detector - finds every cell that belongs to a run of 3+
//!
//! Each row is scanned left to right and each column top to bottom with a
//! running streak. Two neighbours extend a streak only when both hold a tile
//! and the colors are equal, so holes always break a run. When a streak ends
//! (or reaches the board edge) with length >= `MIN_RUN`, all its cells are
//! marked.
//!
//! The result is a set: a cell in both a horizontal and a vertical run is
//! reported once. Storage is fixed-size, so detection never allocates.

use arrayvec::ArrayVec;
use tui_match3_types::{Coord, GRID_CELLS, GRID_SIZE, MIN_RUN};

use crate::grid::Grid;

/// Set of matched cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    mask: [bool; GRID_CELLS],
    len: usize,
}

impl MatchSet {
    pub fn new() -> Self {
        Self {
            mask: [false; GRID_CELLS],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, at: Coord) -> bool {
        if at.row as usize >= GRID_SIZE || at.col as usize >= GRID_SIZE {
            return false;
        }
        self.mask[at.row as usize * GRID_SIZE + at.col as usize]
    }

    /// Add a cell; returns false if it was already present or is off the board
    pub fn insert(&mut self, at: Coord) -> bool {
        if at.row as usize >= GRID_SIZE || at.col as usize >= GRID_SIZE {
            return false;
        }
        let idx = at.row as usize * GRID_SIZE + at.col as usize;
        if self.mask[idx] {
            return false;
        }
        self.mask[idx] = true;
        self.len += 1;
        true
    }

    /// Matched cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, m)| **m)
            .map(|(idx, _)| Coord::new((idx / GRID_SIZE) as u8, (idx % GRID_SIZE) as u8))
    }

    /// Matched cells collected on the stack
    pub fn coords(&self) -> ArrayVec<Coord, GRID_CELLS> {
        self.iter().collect()
    }

    /// Columns that contain at least one matched cell, left to right
    pub fn columns(&self) -> ArrayVec<usize, GRID_SIZE> {
        (0..GRID_SIZE)
            .filter(|&col| (0..GRID_SIZE).any(|row| self.mask[row * GRID_SIZE + col]))
            .collect()
    }
}

impl Default for MatchSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect every cell that is part of a horizontal or vertical run of 3+.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let mut matches = MatchSet::new();

    for row in 0..GRID_SIZE {
        scan_line(grid, &mut matches, |i| (row, i));
    }
    for col in 0..GRID_SIZE {
        scan_line(grid, &mut matches, |i| (i, col));
    }

    #[cfg(debug_assertions)]
    for at in matches.iter() {
        debug_assert!(
            grid.tile(at).is_some(),
            "match detector reported empty cell {:?}",
            at
        );
    }

    matches
}

/// Scan one row or column. `cell(i)` maps a position along the line to
/// (row, col).
fn scan_line(grid: &Grid, matches: &mut MatchSet, cell: impl Fn(usize) -> (usize, usize)) {
    let same = |a: usize, b: usize| {
        let (ra, ca) = cell(a);
        let (rb, cb) = cell(b);
        match (grid.color(ra, ca), grid.color(rb, cb)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    };

    let mut mark = |end: usize, streak: usize| {
        if streak >= MIN_RUN {
            for i in 0..streak {
                let (r, c) = cell(end - i);
                matches.insert(Coord::new(r as u8, c as u8));
            }
        }
    };

    let mut streak = 1;
    for i in 1..GRID_SIZE {
        if same(i, i - 1) {
            streak += 1;
        } else {
            mark(i - 1, streak);
            streak = 1;
        }
    }
    mark(GRID_SIZE - 1, streak);
}
