use srs_tetris::core::GameState;
use srs_tetris::term::{GameView, TerminalRenderer, Viewport};
use srs_tetris::types::{GameAction, PieceKind, VISIBLE_HEIGHT};

const VIEW: Viewport = Viewport {
    width: 60,
    height: 30,
};

fn rows(fb: &srs_tetris::term::FrameBuffer) -> Vec<String> {
    (0..fb.height()).map(|y| fb.row_text(y)).collect()
}

#[test]
fn test_hard_dropped_piece_lands_on_bottom_screen_row() {
    let mut state = GameState::with_seed(7);
    state.start();
    state.apply_action(GameAction::HardDrop);

    let fb = GameView::default().render(&state.snapshot(), VIEW);
    // Frame top at row 4, so board row 0 is screen row 4 + VISIBLE_HEIGHT.
    let bottom = 4 + VISIBLE_HEIGHT as u16;
    assert!(fb.row_text(bottom).contains('█'));
    assert!(!fb.row_text(bottom - 5).contains('█'));
}

#[test]
fn test_panel_shows_score_and_next_queue() {
    let mut state = GameState::with_seed(7);
    state.start();
    let next = state.preview().next().unwrap();
    state.apply_action(GameAction::HardDrop);

    let snap = state.snapshot();
    let text = rows(&GameView::default().render(&snap, VIEW));
    let score_row = text.iter().position(|r| r.contains("SCORE")).unwrap();
    assert!(text[score_row + 1].contains(&snap.stats.score.to_string()));
    assert!(text.iter().any(|r| r.contains("NEXT")));

    // The old preview front is now the active piece.
    assert_eq!(snap.active.map(|a| a.kind), Some(next));
}

#[test]
fn test_hold_slot_is_shown() {
    let mut state = GameState::with_seed(3);
    state.start();
    let held = state.active().unwrap().kind;
    state.apply_action(GameAction::Hold);

    let text = rows(&GameView::default().render(&state.snapshot(), VIEW));
    let hold_row = text.iter().position(|r| r.contains("HOLD")).unwrap();
    assert!(text[hold_row + 1].contains(held.as_str()));
    assert!(PieceKind::ALL.contains(&held));
}

#[test]
fn test_render_into_reuses_buffer_across_sizes() {
    let mut state = GameState::with_seed(1);
    state.start();
    let snap = state.snapshot();
    let view = GameView::default();

    let mut fb = view.render(&snap, VIEW);
    view.render_into(&snap, Viewport::new(100, 40), &mut fb);
    assert_eq!((fb.width(), fb.height()), (100, 40));
    view.render_into(&snap, Viewport::new(10, 5), &mut fb);
    assert_eq!(fb.cells().len(), 50);
}

#[test]
fn test_renderer_constructs_without_a_terminal() {
    let mut term = TerminalRenderer::new();
    term.invalidate();
}
