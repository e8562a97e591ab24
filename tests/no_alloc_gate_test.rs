use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::types::Command;

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
    gs.start_new_game();
    let mut snap = GameSnapshot::default();

    // Warm-up: touch every path once, including a full game to top-out.
    let _ = gs.tick(16);
    let _ = gs.apply(Command::MoveLeft);
    let _ = gs.apply(Command::TogglePause);
    let _ = gs.apply(Command::TogglePause);
    while !gs.game_over() {
        let _ = gs.apply(Command::HardDrop);
    }
    let _ = gs.take_events();
    let _ = gs.apply(Command::StartNewGame);
    gs.snapshot_into(&mut snap);

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            let _ = gs.tick(16);
        }

        for _ in 0..50 {
            let _ = gs.apply(Command::MoveLeft);
            let _ = gs.apply(Command::MoveRight);
            let _ = gs.apply(Command::Rotate);
            let _ = gs.apply(Command::SoftDrop);
        }

        // Hard drop drives lock, spawn and top-out paths.
        for _ in 0..60 {
            let _ = gs.apply(Command::HardDrop);
            let _ = gs.apply(Command::AdvanceTime(1000));
            gs.snapshot_into(&mut snap);
            let _ = gs.take_events();
            if gs.game_over() {
                let _ = gs.apply(Command::StartNewGame);
            }
        }
    });

    assert!(allocs == 0);
}

#[test]
fn snapshot_serialize_into_reserved_buffer_does_not_allocate() {
    let mut gs = GameState::with_seed(1);
    gs.start_new_game();
    let _ = gs.apply(Command::HardDrop);

    let mut snap = GameSnapshot::default();
    let mut buf: Vec<u8> = Vec::with_capacity(16 * 1024);

    // Warm-up.
    gs.snapshot_into(&mut snap);
    buf.clear();
    serde_json::to_writer(&mut buf, &snap).unwrap();

    let allocs = with_alloc_counting(|| {
        for _ in 0..200 {
            let _ = gs.tick(16);
            gs.snapshot_into(&mut snap);
            buf.clear();
            serde_json::to_writer(&mut buf, &snap).unwrap();
        }
    });

    assert!(allocs == 0);
}
