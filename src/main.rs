//! Terminal runner (default binary).
//!
//! Reads settings from `TETRIS_*` environment variables, runs a session at a
//! fixed tick and prints one JSON line per finished game once the terminal
//! has been restored.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::event::{self, Event, KeyEventKind};

use srs_tetris::core::{GameConfig, GameOver, GameSnapshot, GameState};
use srs_tetris::input::{handle_key_event, should_quit, InputHandler};
use srs_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use srs_tetris::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    if let Err(err) = config.validate() {
        bail!("invalid configuration ({}): {}", err.code(), err);
    }

    let mut finished = Vec::new();
    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, config, &mut finished));

    // Always try to restore terminal state.
    let _ = term.exit();

    for record in &finished {
        println!("{}", serde_json::to_string(record)?);
        eprintln!(
            "[srs-tetris] game over ({}): score {} lines {} level {}",
            record.reason.as_str(),
            record.stats.score,
            record.stats.lines,
            record.stats.level
        );
    }
    result
}

fn run(term: &mut TerminalRenderer, config: GameConfig, finished: &mut Vec<GameOver>) -> Result<()> {
    let mut game_state = GameState::new(config);
    game_state.start();

    let view = GameView::default();
    let mut input_handler = InputHandler::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_size = (0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        game_state.notify_game_over(&mut |record: &GameOver| finished.push(record.clone()));

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        if (w, h) != last_size {
            term.invalidate();
            last_size = (w, h);
        }
        game_state.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        if let Some(action) = input_handler.handle_key_press(key.code) {
                            game_state.apply_action(action);
                        }

                        match handle_key_event(key) {
                            // First presses were forwarded by the handler above.
                            Some(GameAction::MoveLeft | GameAction::MoveRight) | None => {}
                            Some(GameAction::Restart) => {
                                input_handler.reset();
                                game_state.apply_action(GameAction::Restart);
                            }
                            Some(action) => {
                                game_state.apply_action(action);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Keeps the key held; auto-shift timing lives in the core.
                        input_handler.handle_key_press(key.code);
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game_state.tick(TICK_MS, input_handler.held_keys());
        }
    }
}
