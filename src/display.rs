//! Rendering layer: all terminal output lives here.
//!
//! The game lives in continuous world units; every frame is scaled onto the
//! terminal grid below the HUD row. No game logic is performed; this module
//! only translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use alien_invasion::entities::EntityRef;
use alien_invasion::game::Game;
use alien_invasion::geometry::{Point, Rect};
use alien_invasion::scoreboard::{level_label, score_label};
use alien_invasion::settings::Rgb;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Color = Color::Rgb { r: 30, g: 30, b: 30 };
const C_PLAYER: Color = Color::DarkBlue;
const C_ENEMY: Color = Color::DarkGreen;
const C_BUTTON: Color = Color::Rgb { r: 0, g: 255, b: 0 };
const C_BUTTON_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Rows reserved above the play area (HUD) and below it (controls hint).
const HUD_ROWS: u16 = 1;
const HINT_ROWS: u16 = 1;

fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

// ── World ↔ terminal mapping ──────────────────────────────────────────────────

/// Inclusive cell span covered by a world rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSpan {
    pub col0: u16,
    pub row0: u16,
    pub col1: u16,
    pub row1: u16,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_width: f64,
    world_height: f64,
}

impl Viewport {
    pub fn new(term_width: u16, term_height: u16, world: &Rect) -> Self {
        Viewport {
            cols: term_width.max(1),
            rows: term_height.saturating_sub(HUD_ROWS + HINT_ROWS).max(1),
            world_width: world.width,
            world_height: world.height,
        }
    }

    fn col_of(&self, x: f64) -> i64 {
        (x / self.world_width * self.cols as f64).floor() as i64
    }

    fn row_of(&self, y: f64) -> i64 {
        (y / self.world_height * self.rows as f64).floor() as i64
    }

    /// Cells a rectangle touches, clipped to the play area. `None` when it is
    /// entirely off screen. Every visible entity covers at least one cell.
    pub fn span(&self, r: &Rect) -> Option<CellSpan> {
        let c0 = self.col_of(r.left()).max(0);
        let r0 = self.row_of(r.top()).max(0);
        let c1 = (self.col_of(r.right()) - 1)
            .max(self.col_of(r.left()))
            .min(self.cols as i64 - 1);
        let r1 = (self.row_of(r.bottom()) - 1)
            .max(self.row_of(r.top()))
            .min(self.rows as i64 - 1);
        if c0 > c1 || r0 > r1 {
            return None;
        }
        Some(CellSpan {
            col0: c0 as u16,
            row0: r0 as u16 + HUD_ROWS,
            col1: c1 as u16,
            row1: r1 as u16 + HUD_ROWS,
        })
    }

    /// World point at the centre of a terminal cell, if the cell is inside the
    /// play area.
    pub fn to_world(&self, col: u16, row: u16) -> Option<Point> {
        if row < HUD_ROWS || row >= HUD_ROWS + self.rows || col >= self.cols {
            return None;
        }
        let play_row = row - HUD_ROWS;
        Some(Point::new(
            (col as f64 + 0.5) / self.cols as f64 * self.world_width,
            (play_row as f64 + 0.5) / self.rows as f64 * self.world_height,
        ))
    }

    pub fn cell_of(&self, p: Point) -> (u16, u16) {
        let col = self.col_of(p.x).clamp(0, self.cols as i64 - 1) as u16;
        let row = self.row_of(p.y).clamp(0, self.rows as i64 - 1) as u16;
        (col, row + HUD_ROWS)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game, view: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(rgb(game.settings.bg_color)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for entity in game.entities() {
        draw_entity(out, game, view, entity)?;
    }

    draw_hud(out, game, view)?;
    draw_controls_hint(out, view)?;

    if !game.is_active() {
        draw_play_button(out, game, view)?;
    }

    // The pointer stand-in: the text cursor rests on the Play button at the
    // menu and is hidden during play.
    if game.cursor_visible {
        let (col, row) = view.cell_of(game.play_button.rect.center());
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(cursor::Show)?;
    } else {
        out.queue(cursor::Hide)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(
    out: &mut W,
    game: &Game,
    view: &Viewport,
    entity: EntityRef<'_>,
) -> std::io::Result<()> {
    let (glyph, color) = match entity {
        EntityRef::Player(_) => ('█', C_PLAYER),
        EntityRef::Bullet(_) => ('│', rgb(game.settings.bullet_color)),
        EntityRef::Enemy(_) => ('▓', C_ENEMY),
    };
    let Some(span) = view.span(&entity.bounds()) else {
        return Ok(());
    };
    let width = (span.col1 - span.col0 + 1) as usize;
    let line: String = std::iter::repeat(glyph).take(width).collect();

    out.queue(style::SetForegroundColor(color))?;
    for row in span.row0..=span.row1 {
        out.queue(cursor::MoveTo(span.col0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, game: &Game, view: &Viewport) -> std::io::Result<()> {
    let stats = &game.stats;

    // Remaining ships, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print("▲".repeat(stats.lives_remaining as usize)))?;

    // High score, centre
    let high = score_label(stats.high_score);
    out.queue(cursor::MoveTo(
        (view.cols / 2).saturating_sub(high.chars().count() as u16 / 2),
        0,
    ))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(&high))?;

    // Level and score, right
    let right = format!("L{}  {}", level_label(stats.level), score_label(stats.score));
    out.queue(cursor::MoveTo(
        view.cols.saturating_sub(right.chars().count() as u16 + 1),
        0,
    ))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Play button ───────────────────────────────────────────────────────────────

fn draw_play_button<W: Write>(out: &mut W, game: &Game, view: &Viewport) -> std::io::Result<()> {
    let Some(span) = view.span(&game.play_button.rect) else {
        return Ok(());
    };
    let width = (span.col1 - span.col0 + 1) as usize;

    out.queue(style::SetBackgroundColor(C_BUTTON))?;
    for row in span.row0..=span.row1 {
        out.queue(cursor::MoveTo(span.col0, row))?;
        out.queue(Print(" ".repeat(width)))?;
    }

    let label = &game.play_button.label;
    let mid_row = span.row0 + (span.row1 - span.row0) / 2;
    let col = span.col0 + (width as u16).saturating_sub(label.chars().count() as u16) / 2;
    out.queue(cursor::MoveTo(col, mid_row))?;
    out.queue(style::SetForegroundColor(C_BUTTON_TEXT))?;
    out.queue(Print(label))?;

    out.queue(style::SetBackgroundColor(rgb(game.settings.bg_color)))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, HUD_ROWS + view.rows))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE : Shoot   ENTER / click Play : Start   Q : Quit",
    ))?;
    Ok(())
}
