use criterion::{black_box, criterion_group, criterion_main, Criterion};
use srs_tetris::core::{Board, GameSnapshot, GameState, PieceController};
use srs_tetris::term::{FrameBuffer, GameView, Viewport};
use srs_tetris::types::{GameAction, HeldKeys, PieceKind, TICK_MS};

fn started() -> GameState {
    let mut state = GameState::with_seed(12345);
    state.start();
    state
}

fn bench_tick(c: &mut Criterion) {
    let mut state = started();
    let held = HeldKeys {
        soft_drop: true,
        ..HeldKeys::NONE
    };

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over().is_some() {
                state.apply_action(GameAction::Restart);
            }
            state.tick(black_box(TICK_MS), held);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 0..4 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows(black_box(&[0, 1, 2, 3]))
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = started();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.game_over().is_some() {
                state.apply_action(GameAction::Restart);
            }
            state.apply_action(GameAction::HardDrop)
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let board = Board::new();
    let mut controller = PieceController::new(12345, 5);

    c.bench_function("spawn_piece", |b| {
        b.iter(|| controller.spawn_next(&board, black_box(false)))
    });
}

fn bench_move(c: &mut Criterion) {
    let board = Board::new();
    let mut controller = PieceController::new(12345, 5);
    let _ = controller.spawn_next(&board, false);

    c.bench_function("move_right_left", |b| {
        b.iter(|| {
            controller.move_by(&board, black_box(1), 0);
            controller.move_by(&board, black_box(-1), 0)
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::new();
    let mut controller = PieceController::new(12345, 5);
    let _ = controller.spawn_next(&board, false);

    c.bench_function("rotate_cw", |b| {
        b.iter(|| controller.rotate(&board, black_box(1)))
    });
}

fn bench_snapshot_and_render(c: &mut Criterion) {
    let state = started();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_render_80x24", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_spawn,
    bench_move,
    bench_rotate,
    bench_snapshot_and_render
);
criterion_main!(benches);
