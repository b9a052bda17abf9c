//! Grid module - the 8x8 board of optional tiles
//!
//! Cells use a flat row-major array (`row * GRID_SIZE + col`). Row 0 is the
//! top of the board, so gravity pulls tiles toward higher row indices.
//!
//! Grids are values. Engine operations take `&Grid` and return a new grid, so
//! observers never see a half-applied step. The grid also owns the tile-id
//! counter, which makes ids unique for the grid's whole lifetime.

use std::fmt;

use tui_match3_types::{Cell, Coord, SpecialKind, Tile, TileColor, TileId, GRID_CELLS, GRID_SIZE};

/// The game board - 8x8 cells using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; GRID_CELLS],
    /// Next id handed to a newly created tile.
    next_id: u64,
}

impl Grid {
    /// Create a board with every cell empty
    pub fn empty() -> Self {
        Self {
            cells: [None; GRID_CELLS],
            next_id: 1,
        }
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(at: Coord) -> Option<usize> {
        if at.row as usize >= GRID_SIZE || at.col as usize >= GRID_SIZE {
            return None;
        }
        Some(at.row as usize * GRID_SIZE + at.col as usize)
    }

    /// Board side length
    pub fn size(&self) -> usize {
        GRID_SIZE
    }

    /// Cell at `at`; `None` if out of bounds
    pub fn get(&self, at: Coord) -> Option<Cell> {
        Self::index(at).map(|idx| self.cells[idx])
    }

    /// Tile at `at`, if the cell exists and is occupied
    pub fn tile(&self, at: Coord) -> Option<Tile> {
        self.get(at).flatten()
    }

    /// Color at (row, col); `None` for holes and out-of-bounds cells
    #[inline]
    pub fn color(&self, row: usize, col: usize) -> Option<TileColor> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        self.cells[row * GRID_SIZE + col].map(|t| t.color)
    }

    /// Create a fresh tile of `color` at `at`, replacing whatever was there.
    ///
    /// Returns the new tile's id, or `None` if `at` is off the board.
    pub fn spawn(&mut self, at: Coord, color: TileColor) -> Option<TileId> {
        let idx = Self::index(at)?;
        let id = self.alloc_id();
        self.cells[idx] = Some(Tile {
            id,
            color,
            special: SpecialKind::None,
            row: at.row,
            col: at.col,
        });
        Some(id)
    }

    /// Empty the cell at `at`, returning the removed tile
    pub fn clear(&mut self, at: Coord) -> Option<Tile> {
        let idx = Self::index(at)?;
        self.cells[idx].take()
    }

    /// Put `tile` at `at`, rewriting its coordinates to match.
    pub(crate) fn put(&mut self, at: Coord, tile: Option<Tile>) {
        if let Some(idx) = Self::index(at) {
            self.cells[idx] = tile.map(|t| t.moved_to(at));
        }
    }

    fn alloc_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }

    /// A copy of this grid with the tiles at `a` and `b` exchanged
    pub fn swapped(&self, a: Coord, b: Coord) -> Grid {
        let mut out = self.clone();
        let ta = self.get(a).flatten();
        let tb = self.get(b).flatten();
        out.put(a, tb);
        out.put(b, ta);
        out
    }

    /// True if every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Number of empty cells
    pub fn hole_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Cells of column `col`, top to bottom. Off the board every cell is `None`.
    pub fn column(&self, col: usize) -> [Cell; GRID_SIZE] {
        let mut out = [None; GRID_SIZE];
        if col >= GRID_SIZE {
            return out;
        }
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = self.cells[row * GRID_SIZE + col];
        }
        out
    }

    /// Every occupied cell in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().filter_map(|c| *c)
    }

    /// Mirror the board across its main diagonal (row <-> col).
    ///
    /// Tile ids are preserved; coordinates are rewritten.
    pub fn transposed(&self) -> Grid {
        let mut out = Grid {
            cells: [None; GRID_CELLS],
            next_id: self.next_id,
        };
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let tile = self.cells[row * GRID_SIZE + col];
                out.put(Coord::new(col as u8, row as u8), tile);
            }
        }
        out
    }

    /// Build a board from ASCII rows, one letter per cell (`R B G Y P O`),
    /// `.` for a hole. Returns `None` unless there are exactly 8 rows of 8.
    ///
    /// Tiles get ids in row-major order starting at 1.
    pub fn from_ascii(rows: &[&str]) -> Option<Grid> {
        if rows.len() != GRID_SIZE {
            return None;
        }
        let mut grid = Grid::empty();
        for (row, line) in rows.iter().enumerate() {
            let line: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if line.len() != GRID_SIZE {
                return None;
            }
            for (col, ch) in line.into_iter().enumerate() {
                let at = Coord::new(row as u8, col as u8);
                if ch == '.' {
                    continue;
                }
                let color = TileColor::from_letter(ch)?;
                grid.spawn(at, color);
            }
        }
        Some(grid)
    }

    /// Write the board as snapshot color codes (`0` = hole)
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_SIZE]; GRID_SIZE]) {
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, code) in out_row.iter_mut().enumerate() {
                *code = self.cells[row * GRID_SIZE + col]
                    .map(|t| t.color.code())
                    .unwrap_or(0);
            }
        }
    }

    /// Assert the coordinate invariant in debug builds.
    #[inline]
    pub fn debug_check(&self) {
        #[cfg(debug_assertions)]
        for (idx, cell) in self.cells.iter().enumerate() {
            if let Some(t) = cell {
                debug_assert_eq!(
                    (t.row as usize, t.col as usize),
                    (idx / GRID_SIZE, idx % GRID_SIZE),
                    "tile {:?} disagrees with its cell",
                    t.id
                );
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let ch = self.color(row, col).map(|c| c.letter()).unwrap_or('.');
                write!(f, "{ch}")?;
            }
            if row + 1 < GRID_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: [&str; 8] = [
        "RGBYPORG", "GBYPORGB", "BYPORGBY", "YPORGBYP", "PORGBYPO", "ORGBYPOR", "RGBYPORG",
        "GBYPO.GB",
    ];

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(Coord::new(0, 0)), Some(0));
        assert_eq!(Grid::index(Coord::new(0, 7)), Some(7));
        assert_eq!(Grid::index(Coord::new(1, 0)), Some(8));
        assert_eq!(Grid::index(Coord::new(7, 7)), Some(63));
        assert_eq!(Grid::index(Coord::new(8, 0)), None);
        assert_eq!(Grid::index(Coord::new(0, 8)), None);
    }

    #[test]
    fn test_spawn_assigns_unique_ids_and_coords() {
        let mut grid = Grid::empty();
        let a = grid.spawn(Coord::new(2, 3), TileColor::Red).unwrap();
        let b = grid.spawn(Coord::new(5, 1), TileColor::Blue).unwrap();
        assert_ne!(a, b);

        let t = grid.tile(Coord::new(5, 1)).unwrap();
        assert_eq!((t.row, t.col), (5, 1));
        assert_eq!(t.special, SpecialKind::None);
        assert_eq!(grid.spawn(Coord::new(8, 8), TileColor::Red), None);
    }

    #[test]
    fn test_from_ascii_round_trips_through_display() {
        let grid = Grid::from_ascii(&LAYOUT).unwrap();
        assert_eq!(grid.to_string(), LAYOUT.join("\n"));
        assert_eq!(grid.hole_count(), 1);
        assert!(!grid.is_full());
        grid.debug_check();
    }

    #[test]
    fn test_from_ascii_rejects_bad_shapes() {
        assert!(Grid::from_ascii(&LAYOUT[..7]).is_none());
        let mut bad = LAYOUT;
        bad[3] = "RGB";
        assert!(Grid::from_ascii(&bad).is_none());
        bad[3] = "RGBYPORX";
        assert!(Grid::from_ascii(&bad).is_none());
    }

    #[test]
    fn test_swapped_moves_identity_with_tile() {
        let grid = Grid::from_ascii(&LAYOUT).unwrap();
        let a = Coord::new(0, 0);
        let b = Coord::new(0, 1);
        let before_a = grid.tile(a).unwrap();
        let before_b = grid.tile(b).unwrap();

        let swapped = grid.swapped(a, b);
        let after_a = swapped.tile(a).unwrap();
        let after_b = swapped.tile(b).unwrap();

        assert_eq!(after_a.id, before_b.id);
        assert_eq!(after_a.color, before_b.color);
        assert_eq!(after_a.coord(), a);
        assert_eq!(after_b.id, before_a.id);
        assert_eq!(after_b.coord(), b);
        swapped.debug_check();

        // Original untouched.
        assert_eq!(grid.tile(a), Some(before_a));
    }

    #[test]
    fn test_column_off_board_is_empty() {
        let grid = Grid::from_ascii(&LAYOUT).unwrap();
        assert!(grid.column(7).iter().all(|c| c.is_some()));
        assert_eq!(grid.column(8), [None; GRID_SIZE]);
        assert_eq!(grid.column(usize::MAX), [None; GRID_SIZE]);
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let grid = Grid::from_ascii(&LAYOUT).unwrap();
        let t = grid.transposed();
        assert_eq!(t.color(5, 7), None);
        assert_eq!(t.color(1, 0), grid.color(0, 1));
        t.debug_check();
        assert_eq!(t.transposed(), grid);
    }

    #[test]
    fn test_write_u8_grid() {
        let grid = Grid::from_ascii(&LAYOUT).unwrap();
        let mut out = [[9u8; GRID_SIZE]; GRID_SIZE];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[0][0], TileColor::Red.code());
        assert_eq!(out[7][5], 0);
    }
}
