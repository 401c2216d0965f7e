//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so layouts can be unit-tested. Board row 0 is the bottom
//! of the playfield; only the visible rows are drawn and the buffer zone
//! above them is left off-screen.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_WIDTH, VISIBLE_HEIGHT};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 12;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen position of the playfield frame's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal view of one session.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps minos roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = VISIBLE_HEIGHT as u16 + 2;
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Screen origin of board cell (x, y), or None for hidden rows.
    fn cell_origin(&self, frame: Frame, x: i8, y: i8) -> Option<(u16, u16)> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= VISIBLE_HEIGHT as i8 {
            return None;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (VISIBLE_HEIGHT as u16 - 1 - y as u16);
        Some((px, py))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let frame = self.frame(viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(fb, frame, border);

        for y in 0..VISIBLE_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                match PieceKind::from_code(snap.cell(x, y)) {
                    Some(kind) => self.fill_cell(fb, frame, x, y, '█', piece_style(kind)),
                    None => self.fill_cell(fb, frame, x, y, '·', empty_style()),
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            let style = CellStyle::new(Rgb::new(140, 140, 140), PLAYFIELD_BG).dim();
            for &(x, y) in ghost.iter() {
                self.fill_cell(fb, frame, x, y, '░', style);
            }
        }

        if let Some(active) = snap.active {
            let style = piece_style(active.kind).bold();
            for &(x, y) in active.tiles.iter() {
                self.fill_cell(fb, frame, x, y, '█', style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if let Some(reason) = snap.game_over {
            draw_overlay_text(fb, frame, reason.title());
        } else if snap.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if let Some((px, py)) = self.cell_origin(frame, x, y) {
            fb.fill_rect(px, py, self.cell_w, 1, ch, style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();
        let stats = &snap.stats;

        let mut y = frame.y;
        for (name, n) in [("SCORE", stats.score), ("LEVEL", stats.level), ("LINES", stats.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        if stats.combo > 0 {
            let x = fb.put_str(panel_x, y, "COMBO ", label);
            fb.put_u32(x, y, stats.combo as u32, value);
        }
        if stats.back_to_back {
            fb.put_str(panel_x + 10, y, "B2B", label);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HOLD", label);
        let hold_style = if snap.hold_ready { value } else { dim };
        fb.put_str(panel_x, y + 1, snap.hold.map(|k| k.as_str()).unwrap_or("-"), hold_style);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for (i, kind) in snap.preview.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            let style = if i == 0 { piece_style(*kind).bold() } else { value };
            fb.put_str(panel_x, y, kind.as_str(), style);
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        fb.put_str(panel_x, y, snap.phase.as_str(), dim);
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, mid_y, text, style);
}

fn empty_style() -> CellStyle {
    CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim()
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, PLAYFIELD_BG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActiveSnapshot;
    use crate::types::{GameOverReason, Rotation};

    // 60x30 viewport, 2-column cells: frame is 22x22 at (19, 4).
    const VIEW: Viewport = Viewport {
        width: 60,
        height: 30,
    };

    #[test]
    fn test_bottom_row_is_drawn_last() {
        let mut snap = GameSnapshot::default();
        snap.board[0][0] = PieceKind::Z.code();
        let fb = GameView::default().render(&snap, VIEW);

        let cell = fb.get(20, 24).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::new(220, 80, 80));
        assert_eq!(fb.get(22, 24).unwrap().ch, '·');
        assert_eq!(fb.get(19, 4).unwrap().ch, '┌');
        assert_eq!(fb.get(40, 25).unwrap().ch, '┘');
    }

    #[test]
    fn test_hidden_rows_are_not_drawn() {
        let mut snap = GameSnapshot::default();
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::O,
            rotation: Rotation::North,
            tiles: [(4, 20), (5, 20), (4, 19), (5, 19)],
        });
        let fb = GameView::default().render(&snap, VIEW);

        // Row 19 sits directly under the top border.
        assert_eq!(fb.get(28, 5).unwrap().ch, '█');
        assert_eq!(fb.get(28, 4).unwrap().ch, '─');
    }

    #[test]
    fn test_active_piece_covers_ghost() {
        let mut snap = GameSnapshot::default();
        snap.ghost = Some([(0, 0), (1, 0), (2, 0), (3, 0)]);
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::I,
            rotation: Rotation::North,
            tiles: [(0, 0), (1, 0), (2, 0), (3, 0)],
        });
        let fb = GameView::default().render(&snap, VIEW);
        assert_eq!(fb.get(20, 24).unwrap().ch, '█');

        snap.active = None;
        let fb = GameView::default().render(&snap, VIEW);
        assert_eq!(fb.get(20, 24).unwrap().ch, '░');
    }

    #[test]
    fn test_game_over_overlay_names_reason() {
        let mut snap = GameSnapshot::default();
        snap.game_over = Some(GameOverReason::LockOut);
        let fb = GameView::default().render(&snap, VIEW);
        assert!(fb.row_text(15).contains("LOCK OUT"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut snap = GameSnapshot::default();
        snap.paused = true;
        let fb = GameView::default().render(&snap, VIEW);
        assert!(fb.row_text(15).contains("PAUSED"));
    }

    #[test]
    fn test_side_panel_lists_preview() {
        let mut snap = GameSnapshot::default();
        snap.stats.score = 1234;
        snap.preview.push(PieceKind::T);
        snap.preview.push(PieceKind::S);
        let fb = GameView::default().render(&snap, VIEW);

        let text: Vec<String> = (0..VIEW.height).map(|y| fb.row_text(y)).collect();
        assert!(text[4].contains("SCORE"));
        assert!(text[5].contains("1234"));
        assert!(text.iter().any(|row| row.contains("NEXT")));
        assert!(text.iter().any(|row| row.trim_end().ends_with('T')));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, Viewport::new(3, 2));
        assert_eq!(fb.cells().len(), 6);
    }
}
