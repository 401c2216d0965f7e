use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use srs_tetris::core::{GameSnapshot, GameState};
use srs_tetris::types::{GameAction, HeldKeys, TICK_MS};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
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
fn core_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut gs = GameState::with_seed(1);
    gs.start();
    let mut snap = GameSnapshot::default();

    let held = HeldKeys {
        left: true,
        soft_drop: true,
        ..HeldKeys::NONE
    };

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            let _ = gs.tick(TICK_MS, HeldKeys::NONE);
        }

        for _ in 0..50 {
            let _ = gs.apply_action(GameAction::MoveLeft);
            let _ = gs.apply_action(GameAction::MoveRight);
            let _ = gs.apply_action(GameAction::RotateCw);
            let _ = gs.apply_action(GameAction::Rotate180);
            let _ = gs.tick(TICK_MS, held);
        }

        // Hard drops drive placement, line clears, bag refills and hold.
        for i in 0..40 {
            if gs.game_over().is_some() {
                break;
            }
            if i % 5 == 0 {
                let _ = gs.apply_action(GameAction::Hold);
            }
            let _ = gs.apply_action(GameAction::HardDrop);
            let _ = gs.take_last_event();
            gs.snapshot_into(&mut snap);
        }
        let _ = gs.take_game_over();
    });

    assert_eq!(allocs, 0);
}
