/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands, scaling viewport coordinates onto the
/// character grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use arcade_shooter::compute::{hud, Hud};
use arcade_shooter::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use arcade_shooter::entities::{Body, GameState, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_KILLS: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HEALTH_FULL: Color = Color::Green;
const C_HEALTH_EMPTY: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

const HEALTH_BAR_CELLS: usize = 20;

/// Terminal bell — stands in for the explosion sound.
const BELL: &str = "\x07";

// ── Viewport → grid mapping ───────────────────────────────────────────────────

/// Character cells covered by a viewport rectangle, clipped to the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CellRect {
    col: u16,
    row: u16,
    cols: u16,
    rows: u16,
}

/// The play area sits inside the border: columns `1..width-1`, rows `2..height-2`.
struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    fn inner_cols(&self) -> i32 {
        self.width.saturating_sub(2) as i32
    }

    fn inner_rows(&self) -> i32 {
        self.height.saturating_sub(4) as i32
    }

    /// Every visible entity covers at least one cell.
    fn cells(&self, x: f32, y: f32, w: f32, h: f32) -> Option<CellRect> {
        let (c0, c1) = span(x, w, VIEWPORT_WIDTH, self.inner_cols())?;
        let (r0, r1) = span(y, h, VIEWPORT_HEIGHT, self.inner_rows())?;
        Some(CellRect {
            col: (1 + c0) as u16,
            row: (2 + r0) as u16,
            cols: (c1 - c0) as u16,
            rows: (r1 - r0) as u16,
        })
    }

    fn body(&self, b: &Body) -> Option<CellRect> {
        self.cells(b.x, b.y, b.width, b.height)
    }
}

fn span(start: f32, len: f32, extent: f32, cells: i32) -> Option<(i32, i32)> {
    if cells <= 0 {
        return None;
    }
    let scale = cells as f32 / extent;
    let lo = (start * scale).floor() as i32;
    let hi = ((start + len) * scale).ceil() as i32;
    let hi = hi.max(lo + 1);
    let (lo, hi) = (lo.max(0), hi.min(cells));
    if lo >= hi {
        None
    } else {
        Some((lo, hi))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `width`×`height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    (width, height): (u16, u16),
) -> std::io::Result<()> {
    let grid = Grid { width, height };
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &grid)?;
    draw_hud(out, &grid, &hud(state))?;

    for enemy in &state.enemies {
        fill(out, grid.body(&enemy.body), "▼", C_ENEMY)?;
    }
    for bullet in &state.player_bullets {
        fill(out, grid.body(&bullet.body), "║", C_BULLET_PLAYER)?;
    }
    for bullet in &state.enemy_bullets {
        fill(out, grid.body(&bullet.body), "↓", C_BULLET_ENEMY)?;
    }
    fill(out, grid.body(&state.player.body), "█", C_PLAYER)?;
    for explosion in &state.explosions {
        let (x, y) = explosion.top_left();
        let cells = grid.cells(x, y, explosion.width, explosion.height);
        fill(out, cells, "*", C_EXPLOSION)?;
    }

    draw_controls_hint(out, &grid)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, &grid, state)?;
    }

    // One cue per frame however many collisions happened.
    if state.events.iter().any(|e| e.is_collision()) {
        out.queue(Print(BELL))?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn fill<W: Write>(
    out: &mut W,
    cells: Option<CellRect>,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some(r) = cells else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat(r.cols as usize);
    for row in r.row..r.row + r.rows {
        out.queue(cursor::MoveTo(r.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    let w = grid.width as usize;
    let h = grid.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(grid.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, grid: &Grid, hud: &Hud) -> std::io::Result<()> {
    // Kills — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_KILLS))?;
    out.queue(Print(format!("Kills: {:>4}", hud.kills)))?;

    // Level — centre
    let level_str = format!("[ LEVEL {} ]", hud.level);
    let lx = (grid.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Health bar — right
    let filled = (hud.health_ratio.clamp(0.0, 1.0) * HEALTH_BAR_CELLS as f32).round() as usize;
    let label = "HP ";
    let rx = grid
        .width
        .saturating_sub((label.len() + HEALTH_BAR_CELLS + 1) as u16);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(label))?;
    out.queue(style::SetForegroundColor(C_HEALTH_FULL))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(style::SetForegroundColor(C_HEALTH_EMPTY))?;
    out.queue(Print("░".repeat(HEALTH_BAR_CELLS - filled)))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, grid.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, grid: &Grid, state: &GameState) -> std::io::Result<()> {
    let summary = format!("Kills: {}   Level: {}", state.player.kills, state.level);
    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (summary.as_str(), Color::Yellow),
        ("R - Restart  Q - Quit", Color::White),
    ];

    let cx = grid.width / 2;
    let start_row = (grid.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
