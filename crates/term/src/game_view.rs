//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Activity, GameSnapshot, Phase};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Coord, TileColor, GRID_SIZE};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame sits inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 28, 44);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal renderer for the match-3 board and its side panel.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 keeps tiles roughly square and leaves room for a cursor mark.
        Self {
            cell_w: 4,
            cell_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let w = GRID_SIZE as u16 * self.cell_w + 2;
        let h = GRID_SIZE as u16 * self.cell_h + 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            x: viewport.width.saturating_sub(w) / 2,
            y,
            w,
            h,
        }
    }

    /// Board cell under a terminal position (mouse clicks).
    pub fn cell_at(&self, viewport: Viewport, x: u16, y: u16) -> Option<Coord> {
        let l = self.layout(viewport);
        let inner_x = x.checked_sub(l.x + 1)?;
        let inner_y = y.checked_sub(l.y + 1)?;
        let col = inner_x / self.cell_w;
        let row = inner_y / self.cell_h;
        if col as usize >= GRID_SIZE || row as usize >= GRID_SIZE {
            return None;
        }
        Some(Coord::new(row as u8, col as u8))
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let l = self.layout(viewport);
        let board = CellStyle::new(Rgb::new(80, 80, 100), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 180, 230), PANEL_BG);

        fb.fill_rect(l.x + 1, l.y + 1, l.w - 2, l.h - 2, ' ', board);
        draw_border(fb, l, border);

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let at = Coord::new(row as u8, col as u8);
                match TileColor::from_code(snap.board[row][col]) {
                    Some(color) => {
                        let selected = snap.selected == Some(at);
                        let matched = snap.matched[row][col];
                        self.draw_tile(fb, l, at, color, selected, matched);
                    }
                    None => self.draw_hole(fb, l, at),
                }
            }
        }

        if snap.phase == Phase::Playing {
            self.draw_cursor(fb, l, snap.cursor);
        }

        self.draw_side_panel(fb, snap, viewport, l);

        let overlay = match snap.phase {
            Phase::Ready => Some(("MATCH 3", "press N to start")),
            Phase::LevelComplete => Some(("LEVEL COMPLETE", "press N for next level")),
            Phase::GameOver => Some(("GAME OVER", "press N to try again")),
            Phase::Playing if snap.paused => Some(("PAUSED", "press P to resume")),
            Phase::Playing => None,
        };
        if let Some((title, hint)) = overlay {
            draw_overlay(fb, l, title, hint);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn cell_origin(&self, l: Layout, at: Coord) -> (u16, u16) {
        (
            l.x + 1 + at.col as u16 * self.cell_w,
            l.y + 1 + at.row as u16 * self.cell_h,
        )
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        l: Layout,
        at: Coord,
        color: TileColor,
        selected: bool,
        matched: bool,
    ) {
        let (px, py) = self.cell_origin(l, at);
        let fg = tile_rgb(color);
        let (ch, style) = if matched {
            ('✦', CellStyle::new(Rgb::new(255, 255, 255), fg).bold())
        } else if selected {
            ('▓', CellStyle::new(fg, Rgb::new(235, 235, 235)).bold())
        } else {
            ('█', CellStyle::new(fg, BOARD_BG))
        };

        // One column of gap on each side separates neighbouring tiles.
        let inner_w = self.cell_w.saturating_sub(2).max(1);
        let inset = if self.cell_w > 2 { 1 } else { 0 };
        fb.fill_rect(px + inset, py, inner_w, self.cell_h, ch, style);
    }

    fn draw_hole(&self, fb: &mut FrameBuffer, l: Layout, at: Coord) {
        let (px, py) = self.cell_origin(l, at);
        let style = CellStyle::new(Rgb::new(90, 90, 110), BOARD_BG).dim();
        fb.put_char(px + self.cell_w / 2, py + (self.cell_h - 1) / 2, '·', style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, l: Layout, at: Coord) {
        if self.cell_w < 3 {
            return;
        }
        let (px, py) = self.cell_origin(l, at);
        let style = CellStyle::new(Rgb::new(255, 255, 255), BOARD_BG).bold();
        for dy in 0..self.cell_h {
            fb.put_char(px, py + dy, '[', style);
            fb.put_char(px + self.cell_w - 1, py + dy, ']', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        l: Layout,
    ) {
        let panel_x = l.x.saturating_add(l.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 14 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = l.y;
        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x + 7, y, snap.level, value);
        y += 2;

        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        let n = fb.put_u32(panel_x, y, snap.score, value);
        fb.put_char(panel_x + n, y, '/', dim);
        fb.put_u32(panel_x + n + 1, y, snap.target, dim);
        y += 1;
        draw_progress(fb, panel_x, y, snap.progress);
        y += 2;

        fb.put_str(panel_x, y, "MOVES", label);
        y += 1;
        let moves_style = if snap.moves <= 3 {
            CellStyle::new(Rgb::new(240, 90, 90), PANEL_BG).bold()
        } else {
            value
        };
        fb.put_u32(panel_x, y, snap.moves, moves_style);
        y += 2;

        if snap.activity == Activity::Resolving && snap.combo_index > 0 {
            let combo = CellStyle::new(Rgb::new(250, 200, 80), PANEL_BG).bold();
            fb.put_str(panel_x, y, "COMBO x", combo);
            fb.put_u32(panel_x + 7, y, snap.combo_index + 1, combo);
        }
        if snap.last_score_delta > 0 {
            fb.put_char(panel_x, y + 1, '+', dim);
            fb.put_u32(panel_x + 1, y + 1, snap.last_score_delta, dim);
        }
        y += 3;

        fb.put_str(panel_x, y, "SOUND", label);
        fb.put_str(panel_x + 7, y, if snap.sound { "ON" } else { "OFF" }, value);
        y += 2;

        for hint in ["arrows move", "space select", "p pause  m sound", "r restart  q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, hint, dim);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, l: Layout, style: CellStyle) {
    let Layout { x, y, w, h } = l;
    fb.put_char(x, y, '╭', style);
    fb.put_char(x + w - 1, y, '╮', style);
    fb.put_char(x, y + h - 1, '╰', style);
    fb.put_char(x + w - 1, y + h - 1, '╯', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_progress(fb: &mut FrameBuffer, x: u16, y: u16, percent: u8) {
    const WIDTH: u16 = 10;
    let filled = (percent.min(100) as u16 * WIDTH) / 100;
    let on = CellStyle::new(Rgb::new(120, 220, 140), PANEL_BG);
    let off = CellStyle::new(Rgb::new(70, 70, 80), PANEL_BG);
    for i in 0..WIDTH {
        let (ch, style) = if i < filled { ('█', on) } else { ('░', off) };
        fb.put_char(x + i, y, ch, style);
    }
    let n = fb.put_u32(x + WIDTH + 1, y, percent as u32, off);
    fb.put_char(x + WIDTH + 1 + n, y, '%', off);
}

fn draw_overlay(fb: &mut FrameBuffer, l: Layout, title: &str, hint: &str) {
    let title_style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(90, 60, 160)).bold();
    let hint_style = CellStyle::new(Rgb::new(230, 230, 230), Rgb::new(90, 60, 160));
    let band_w = l.w.saturating_sub(4);
    let mid = l.y + l.h / 2;
    fb.fill_rect(l.x + 2, mid - 1, band_w, 3, ' ', hint_style);

    let centered = |text: &str| {
        let text_w = text.chars().count() as u16;
        l.x + l.w.saturating_sub(text_w) / 2
    };
    fb.put_str(centered(title), mid - 1, title, title_style);
    fb.put_str(centered(hint), mid + 1, hint, hint_style);
}

fn tile_rgb(color: TileColor) -> Rgb {
    match color {
        TileColor::Red => Rgb::new(235, 75, 85),
        TileColor::Blue => Rgb::new(70, 130, 240),
        TileColor::Green => Rgb::new(80, 205, 110),
        TileColor::Yellow => Rgb::new(245, 215, 70),
        TileColor::Purple => Rgb::new(175, 95, 220),
        TileColor::Orange => Rgb::new(250, 150, 50),
    }
}
