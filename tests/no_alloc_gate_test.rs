use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_match3::core::{
    attempt_swap, collapse_and_refill, find_matches, generate_grid, resolve, Game, GameSnapshot,
    Grid, Palette, SimpleRng,
};
use tui_match3::term::{FrameBuffer, GameView, Viewport};
use tui_match3::types::Coord;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn engine_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let palette = Palette::standard();
    let mut rng = SimpleRng::new(99);
    let start = generate_grid(&palette, &mut rng);

    let allocs = with_alloc_counting(|| {
        let mut grid: Grid = start.clone();
        for i in 0..200u32 {
            let a = Coord::new((i % 8) as u8, (i / 8 % 7) as u8);
            let b = Coord::new(a.row, a.col + 1);
            let outcome = attempt_swap(&grid, a, b, 20, &palette, &mut rng);
            grid = outcome.grid;

            let matches = find_matches(&grid);
            assert!(matches.is_empty());

            let mut holey = grid.clone();
            holey.clear(Coord::new(4, 4));
            holey.clear(Coord::new(0, 0));
            let refilled = collapse_and_refill(&holey, &palette, &mut rng);
            let settled = resolve(&refilled, &palette, &mut rng);
            grid = settled.grid;
        }
        assert!(grid.is_full());
    });

    assert_eq!(allocs, 0);
}

#[test]
fn snapshot_and_view_do_not_allocate() {
    let mut game = Game::new(3);
    game.start();
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    // Warm-up.
    game.snapshot_into(&mut snap);
    view.render_into(&snap, viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for _ in 0..100 {
            game.tick(16);
            game.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
