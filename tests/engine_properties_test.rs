//! Property checks for the grid, detector, and gravity across many seeds.

use tui_match3::core::{
    collapse, collapse_and_refill, find_matches, generate_grid, initialize_grid, refill, Grid,
    Palette, SimpleRng,
};
use tui_match3::types::{Coord, TileColor, GRID_SIZE};

fn three_colors() -> Palette {
    Palette::new(&[TileColor::Red, TileColor::Blue, TileColor::Green]).unwrap()
}

/// A random board with no run avoidance, so it is full of matches.
fn noisy_grid(seed: u32) -> Grid {
    refill(&Grid::empty(), &three_colors(), &mut SimpleRng::new(seed))
}

/// Punch random holes into a full board.
fn holey_grid(seed: u32) -> Grid {
    let mut rng = SimpleRng::new(seed ^ 0x5eed);
    let mut grid = noisy_grid(seed);
    for _ in 0..20 {
        let at = Coord::new(rng.next_range(8) as u8, rng.next_range(8) as u8);
        grid.clear(at);
    }
    grid
}

fn column_ids(grid: &Grid, col: usize) -> Vec<u64> {
    grid.column(col).iter().flatten().map(|t| t.id.0).collect()
}

#[test]
fn initial_boards_never_contain_runs() {
    for seed in 0..500 {
        let grid = initialize_grid(Some(seed));
        assert!(grid.is_full());
        assert!(find_matches(&grid).is_empty(), "seed {seed}:\n{grid}");
    }
}

#[test]
fn minimal_palette_boards_never_contain_runs() {
    for seed in 0..500 {
        let grid = generate_grid(&three_colors(), &mut SimpleRng::new(seed));
        assert!(find_matches(&grid).is_empty(), "seed {seed}:\n{grid}");
    }
}

#[test]
fn detector_is_symmetric_under_transpose() {
    for seed in 0..200 {
        let grid = noisy_grid(seed);
        let m = find_matches(&grid);
        let t = find_matches(&grid.transposed());
        assert_eq!(m.len(), t.len());
        for at in m.iter() {
            assert!(t.contains(Coord::new(at.col, at.row)));
        }
    }
}

#[test]
fn detected_cells_belong_to_a_run() {
    for seed in 0..100 {
        let grid = noisy_grid(seed);
        for at in find_matches(&grid).iter() {
            let color = grid.tile(at).unwrap().color;
            let (r, c) = (at.row as usize, at.col as usize);
            let same = |r: usize, c: usize| grid.color(r, c) == Some(color);

            let horizontal = (c.saturating_sub(2)..=c.min(GRID_SIZE - 3))
                .any(|s| (s..s + 3).all(|cc| same(r, cc)));
            let vertical = (r.saturating_sub(2)..=r.min(GRID_SIZE - 3))
                .any(|s| (s..s + 3).all(|rr| same(rr, c)));
            assert!(horizontal || vertical, "seed {seed}: {at:?} is not in a run");
        }
    }
}

#[test]
fn collapse_preserves_count_and_order() {
    for seed in 0..200 {
        let grid = holey_grid(seed);
        let collapsed = collapse(&grid);

        assert_eq!(collapsed.hole_count(), grid.hole_count());
        for col in 0..GRID_SIZE {
            assert_eq!(column_ids(&collapsed, col), column_ids(&grid, col));

            // Holes only above tiles.
            let cells = collapsed.column(col);
            let first_tile = cells.iter().position(|c| c.is_some()).unwrap_or(GRID_SIZE);
            assert!(cells[first_tile..].iter().all(|c| c.is_some()));
        }
        collapsed.debug_check();
    }
}

#[test]
fn refill_fills_every_hole_with_fresh_tiles() {
    let palette = Palette::standard();
    for seed in 0..200 {
        let grid = collapse(&holey_grid(seed));
        let holes = grid.hole_count();
        let old: Vec<_> = grid.tiles().map(|t| t.id).collect();

        let filled = refill(&grid, &palette, &mut SimpleRng::new(seed));
        assert!(filled.is_full());

        let fresh: Vec<_> = filled.tiles().filter(|t| !old.contains(&t.id)).collect();
        assert_eq!(fresh.len(), holes);
        for t in fresh {
            assert!(palette.contains(t.color));
            assert_eq!(filled.tile(t.coord()), Some(t));
        }
    }
}

#[test]
fn collapse_and_refill_never_leaves_holes() {
    for seed in 0..200 {
        let mut rng = SimpleRng::new(1);
        let grid = collapse_and_refill(&holey_grid(seed), &Palette::standard(), &mut rng);
        assert_eq!(grid.hole_count(), 0);
    }
}
