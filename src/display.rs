//! Rendering layer — all terminal I/O lives here.
//!
//! `TerminalCanvas` turns the core's pixel-space draw requests into
//! terminal cells: one tile becomes two columns by one row, which keeps
//! tiles roughly square in a typical terminal font. No game logic happens
//! here.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use river_run::compute::{self, GameState};
use river_run::entities::{EntityKind, GameStatus, Rect};
use river_run::render::{Canvas, Paint};

/// Terminal columns per tile width.
const COLS_PER_TILE: i32 = 2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BOMB: Color = Color::White;
const C_BOAT: Color = Color::Rgb { r: 139, g: 90, b: 43 };
const C_FUEL: Color = Color::Rgb { r: 250, g: 0, b: 255 };
const C_HELICOPTER: Color = Color::Grey;
const C_JET: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const C_BULLET: Color = Color::Rgb { r: 250, g: 250, b: 0 };
const C_HUD: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn paint_color(paint: Paint) -> Color {
    match paint {
        Paint::Land(shade) => Color::Rgb { r: 0, g: shade, b: 0 },
        Paint::Water(shade) => Color::Rgb { r: 0, g: 0, b: shade },
        Paint::Entity(EntityKind::Bomb) => C_BOMB,
        Paint::Entity(EntityKind::Boat) => C_BOAT,
        Paint::Entity(EntityKind::Fuel) => C_FUEL,
        Paint::Entity(EntityKind::Helicopter) => C_HELICOPTER,
        Paint::Entity(EntityKind::Jet) => C_JET,
        Paint::Player => C_PLAYER,
        Paint::Bullet => C_BULLET,
        Paint::Hud => C_HUD,
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

pub struct TerminalCanvas<'a, W: Write> {
    out: &'a mut W,
    tile_size: i32,
    cols: u16,
    rows: u16,
}

impl<'a, W: Write> TerminalCanvas<'a, W> {
    pub fn new(out: &'a mut W, tile_size: i32) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            tile_size,
            cols,
            rows,
        })
    }

    /// Pixel span `[start, start + len)` to a clipped cell span, rounding
    /// both edges to the nearest cell boundary.
    fn cells(&self, start: i32, len: i32, scale: i32, limit: u16) -> Option<(u16, u16)> {
        let to_cell = |px: i32| (px * scale + self.tile_size / 2).div_euclid(self.tile_size);
        let first = to_cell(start);
        let end = to_cell(start + len).max(first + 1);
        let first = first.max(0);
        let end = end.min(limit as i32);
        (first < end).then(|| (first as u16, end as u16))
    }
}

impl<W: Write> Canvas for TerminalCanvas<'_, W> {
    fn fill_rect(&mut self, rect: Rect, paint: Paint) -> io::Result<()> {
        let Some((c0, c1)) = self.cells(rect.x, rect.w, COLS_PER_TILE, self.cols) else {
            return Ok(());
        };
        let Some((r0, r1)) = self.cells(rect.y, rect.h, 1, self.rows) else {
            return Ok(());
        };
        let blank = " ".repeat((c1 - c0) as usize);
        self.out.queue(style::SetBackgroundColor(paint_color(paint)))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&blank))?;
        }
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, paint: Paint) -> io::Result<()> {
        let Some((col, _)) = self.cells(x, 1, COLS_PER_TILE, self.cols) else {
            return Ok(());
        };
        let Some((row, _)) = self.cells(y, 1, 1, self.rows) else {
            return Ok(());
        };
        let room = (self.cols - col) as usize;
        let clipped: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetBackgroundColor(Color::Black))?;
        self.out.queue(style::SetForegroundColor(paint_color(paint)))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> io::Result<()> {
    let screen = &state.config.screen;
    let mut canvas = TerminalCanvas::new(out, screen.tile_size)?;

    compute::draw(state, &mut canvas)?;

    // first row below the playfield
    let hint_row = screen.height_in_tiles() as u16;
    draw_controls_hint(&mut canvas, hint_row)?;

    if state.status == GameStatus::GameOver {
        let field_cols = screen.width_in_tiles() as u16 * COLS_PER_TILE as u16;
        draw_game_over(&mut canvas, field_cols, hint_row)?;
    }

    canvas.present()
}

/// Wipe the whole terminal, e.g. after a resize or restart.
pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.flush()
}

// ── Controls hint (row below the field) ───────────────────────────────────────

fn draw_controls_hint<W: Write>(canvas: &mut TerminalCanvas<'_, W>, row: u16) -> io::Result<()> {
    if row >= canvas.rows {
        return Ok(());
    }
    canvas.out.queue(cursor::MoveTo(0, row))?;
    canvas.out.queue(style::ResetColor)?;
    canvas.out.queue(style::SetForegroundColor(C_HINT))?;
    canvas.out.queue(Print("←↑→↓ / WASD : Fly   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    canvas: &mut TerminalCanvas<'_, W>,
    field_cols: u16,
    field_rows: u16,
) -> io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║     GAME  OVER     ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = field_cols / 2;
    let start_row = (field_rows / 2).saturating_sub(lines.len() as u16 / 2);

    canvas.out.queue(style::SetBackgroundColor(Color::Black))?;
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        if row >= canvas.rows {
            break;
        }
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        canvas.out.queue(cursor::MoveTo(col, row))?;
        canvas.out.queue(style::SetForegroundColor(*color))?;
        canvas.out.queue(Print(*msg))?;
    }
    Ok(())
}
