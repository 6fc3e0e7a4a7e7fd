//! Terminal rendering. Nothing here mutates the session.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session. No game logic is performed; this module only projects world
//! rectangles onto terminal cells and queues the glyphs.

mod screens;

pub use screens::{draw_high_scores, draw_menu};

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::assets::{AssetTable, Sprite};
use crate::compute::{GameStatus, Session};
use crate::entities::{Entity, EntityKind, Facing, HEIGHT, WIDTH};
use crate::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BALLOONS: Color = Color::Red;
const C_PLAYER: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

fn color_for(kind: EntityKind) -> Color {
    match kind {
        EntityKind::Star => Color::Yellow,
        EntityKind::Balloon => Color::Red,
        EntityKind::Whale => Color::Blue,
        EntityKind::Water => Color::Cyan,
        EntityKind::Cloud => Color::White,
        EntityKind::Platform => Color::DarkYellow,
    }
}

// ── Projection ────────────────────────────────────────────────────────────────

/// The terminal area the world is squeezed into: row 0 is the HUD, the last
/// row the controls hint, everything between is play field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols, rows }
    }

    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(2)
    }

    /// Cell containing world point `(x, y)`; may lie outside the terminal.
    pub fn to_cell(&self, x: f64, y: f64) -> (i32, i32) {
        let col = (x / WIDTH * f64::from(self.cols)).floor() as i32;
        let row = 1 + (y / HEIGHT * f64::from(self.field_rows())).floor() as i32;
        (col, row)
    }

    fn in_field(&self, row: i32) -> bool {
        row >= 1 && row <= i32::from(self.field_rows())
    }
}

/// Print `text` starting at `(col, row)`, dropping whatever falls outside the
/// play field.
fn put_clipped<W: Write>(
    out: &mut W,
    vp: &Viewport,
    col: i32,
    row: i32,
    text: &str,
) -> std::io::Result<()> {
    if !vp.in_field(row) {
        return Ok(());
    }
    let skip = (-col).max(0) as usize;
    let start = col.max(0);
    let room = (i32::from(vp.cols) - start).max(0) as usize;
    let visible: String = text.chars().skip(skip).take(room).collect();
    if visible.is_empty() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(start as u16, row as u16))?;
    out.queue(Print(visible))?;
    Ok(())
}

/// Draw a sprite centred on `rect`.
fn draw_sprite<W: Write>(
    out: &mut W,
    vp: &Viewport,
    sprite: &Sprite,
    rect: &Rect,
    color: Color,
) -> std::io::Result<()> {
    let (ccol, crow) = vp.to_cell(rect.center_x(), rect.center_y());
    let top = crow - sprite.rows.len() as i32 / 2;
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in sprite.rows.iter().enumerate() {
        let left = ccol - line.chars().count() as i32 / 2;
        put_clipped(out, vp, left, top + i as i32, line)?;
    }
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete game frame.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    assets: &AssetTable,
    now: f64,
    vp: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_entities(out, &vp, assets, &session.background)?;
    draw_entities(out, &vp, assets, &session.objects)?;
    draw_entities(out, &vp, assets, &session.movable)?;
    draw_player(out, &vp, assets, session, now)?;
    draw_entities(out, &vp, assets, &session.foreground)?;

    draw_hud(out, &vp, session)?;
    draw_controls_hint(out, &vp)?;

    if session.status == GameStatus::Dying {
        draw_game_over(out, &vp, session)?;
    }

    // Leave the cursor on the hint row.
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_entities<W: Write>(
    out: &mut W,
    vp: &Viewport,
    assets: &AssetTable,
    entities: &[Entity],
) -> std::io::Result<()> {
    for e in entities {
        let kind = e.kind();
        draw_sprite(out, vp, assets.sprite(kind), &e.rect, color_for(kind))?;
    }
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    vp: &Viewport,
    assets: &AssetTable,
    session: &Session,
    now: f64,
) -> std::io::Result<()> {
    let p = &session.player;
    if !p.is_visible(now) {
        return Ok(());
    }
    let frame = assets.player_frame(p.balloons(), p.animation_frame());
    let rect = p.rect();
    match p.facing() {
        Facing::Left => draw_sprite(out, vp, frame, &rect, C_PLAYER),
        Facing::Right => draw_sprite(out, vp, &frame.mirrored(), &rect, C_PLAYER),
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: &Viewport, session: &Session) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", session.player.score() as u32)))?;

    let balloons = format!("Balloons: {}", "o".repeat(session.player.balloons() as usize));
    let rx = vp.cols.saturating_sub(balloons.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_BALLOONS))?;
    out.queue(Print(&balloons))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → : Steer   SPACE : Flap   ESC : Give up   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, vp: &Viewport, session: &Session) -> std::io::Result<()> {
    let banner = [
        "  .-~~~~~~~~~~~~-.  ",
        " (   POP! GAME OVER ) ",
        "  `-~~~~~~~~~~~~-'  ",
    ];
    let score = format!("Final Score: {}", session.player.score() as u32);
    let top = (vp.rows / 2).saturating_sub(2);

    out.queue(style::SetForegroundColor(Color::Red))?;
    for (row, text) in (top..).zip(banner) {
        let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(text))?;
    }
    let col = (vp.cols / 2).saturating_sub(score.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, top + banner.len() as u16))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score))?;
    Ok(())
}

/// Draw a horizontal rule along the top and bottom of the play field.
pub(crate) fn draw_frame<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;
    Ok(())
}
