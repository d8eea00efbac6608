/// Rendering layer.  All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `FrameSnapshot`.
/// No game logic is performed; this module only maps world pixels onto
/// terminal cells and translates the snapshot into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use galaxy_invaders::entities::{GameStatus, Rect, Rgba};
use galaxy_invaders::snapshot::{FrameSnapshot, ParticleView};
use glam::Vec2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_SCORE: Color = Color::White;
const C_SCORE_HIGHLIGHT: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_TITLE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Screen mapping ────────────────────────────────────────────────────────────

/// Maps world pixels onto the bordered play area of the terminal.
///
/// Row 0 is the HUD, row 1 and row `height - 2` are the border, and the last
/// row holds the controls hint.
struct Viewport {
    cols: u16,
    rows: u16,
    world: Vec2,
}

impl Viewport {
    fn new(cols: u16, rows: u16, world: Vec2) -> Self {
        Self { cols, rows, world }
    }

    fn inner_cols(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_rows(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Terminal cell for a world point, or `None` if it falls outside the play area.
    fn cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.world.x || p.y >= self.world.y {
            return None;
        }
        let col = 1 + (p.x / self.world.x * self.inner_cols()) as u16;
        let row = 2 + (p.y / self.world.y * self.inner_rows()) as u16;
        Some((col, row))
    }

    fn center_col(&self, text: &str) -> u16 {
        (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2)
    }

    /// Terminal row for a world y coordinate, clamped into the play area.
    fn row_at(&self, y: f32) -> u16 {
        let y = y.clamp(0.0, self.world.y - 1.0);
        2 + (y / self.world.y * self.inner_rows()) as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &FrameSnapshot) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = Viewport::new(cols, rows, frame.screen);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, &view)?;

    match frame.status {
        GameStatus::MainMenu => draw_menu(out, &view, frame)?,
        GameStatus::Playing => {
            draw_hud(out, frame)?;
            for enemy in &frame.enemies {
                draw_enemy(out, &view, enemy)?;
            }
            for bullet in &frame.player_bullets {
                draw_bullet(out, &view, bullet, "║", C_BULLET_PLAYER)?;
            }
            for bullet in &frame.enemy_bullets {
                draw_bullet(out, &view, bullet, "↓", C_BULLET_ENEMY)?;
            }
            if frame.player.visible {
                draw_player(out, &view, frame)?;
            }
        }
        GameStatus::GameOver | GameStatus::LevelWon => draw_round_end(out, &view, frame)?,
    }

    // Particles go on top of everything, in every state.
    for particle in &frame.particles {
        draw_particle(out, &view, particle)?;
    }

    draw_controls_hint(out, &view, frame.status)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &FrameSnapshot) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    if frame.score_highlighted {
        // No font sizes in a terminal: bold yellow stands in for the larger text.
        out.queue(style::SetForegroundColor(C_SCORE_HIGHLIGHT))?;
        out.queue(style::SetAttribute(Attribute::Bold))?;
        out.queue(Print(format!("Score: {}", frame.score)))?;
        out.queue(style::SetAttribute(Attribute::Reset))?;
    } else {
        out.queue(style::SetForegroundColor(C_SCORE))?;
        out.queue(Print(format!("Score: {}", frame.score)))?;
    }
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(
    out: &mut W,
    view: &Viewport,
    frame: &FrameSnapshot,
) -> std::io::Result<()> {
    let mid = frame.screen.y / 2.0;

    let title = "G A L A X Y   I N V A D E R S";
    out.queue(cursor::MoveTo(view.center_col(title), view.row_at(mid - 100.0)))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    let start = "Press SPACE to Start";
    out.queue(cursor::MoveTo(view.center_col(start), view.row_at(mid)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    // The swell half of the pulse is shown as bold text.
    if frame.pulse > 1.0 {
        out.queue(style::SetAttribute(Attribute::Bold))?;
    }
    out.queue(Print(start))?;
    out.queue(style::SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn draw_round_end<W: Write>(
    out: &mut W,
    view: &Viewport,
    frame: &FrameSnapshot,
) -> std::io::Result<()> {
    let mid = frame.screen.y / 2.0;
    let (lines, color): ([&str; 3], Color) = if frame.status == GameStatus::GameOver {
        (
            [
                "╔════════════════════╗",
                "║     GAME  OVER     ║",
                "╚════════════════════╝",
            ],
            Color::Red,
        )
    } else {
        (
            [
                "╔════════════════════╗",
                "║   LEVEL CLEARED!   ║",
                "╚════════════════════╝",
            ],
            Color::Green,
        )
    };

    let top = view.row_at(mid - 50.0).saturating_sub(1);
    out.queue(style::SetForegroundColor(color))?;
    if frame.pulse > 1.0 {
        out.queue(style::SetAttribute(Attribute::Bold))?;
    }
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(view.center_col(line), top + i as u16))?;
        out.queue(Print(line))?;
    }
    out.queue(style::SetAttribute(Attribute::Reset))?;

    let score_line = format!("Final Score: {}", frame.final_score.unwrap_or(frame.score));
    let score_row = view.row_at(mid).max(top + lines.len() as u16);
    out.queue(cursor::MoveTo(view.center_col(&score_line), score_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&score_line))?;

    let hint = "Press R to Restart";
    let hint_row = view.row_at(mid + 40.0).max(score_row + 1);
    out.queue(cursor::MoveTo(view.center_col(hint), hint_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    view: &Viewport,
    frame: &FrameSnapshot,
) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols) anchored on the ship centre:
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let Some((col, row)) = view.cell(frame.player.center) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, row.saturating_sub(1).max(2)))?;
    out.queue(Print("▲"))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(Print("/█\\"))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Rect) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(enemy.center()) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(Print("«▼»"))?;
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    view: &Viewport,
    bullet: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(bullet.center()) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn draw_particle<W: Write>(
    out: &mut W,
    view: &Viewport,
    particle: &ParticleView,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(particle.pos) else {
        return Ok(());
    };
    let glyph = if particle.radius >= 2.0 { "*" } else { "·" };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(faded(particle.color)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Terminals have no alpha channel: fade towards black instead.
fn faded(color: Rgba) -> Color {
    let scale = |c: u8| (c as u16 * color.a as u16 / 255) as u8;
    Color::Rgb {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    view: &Viewport,
    status: GameStatus,
) -> std::io::Result<()> {
    let hint = match status {
        GameStatus::MainMenu => "SPACE : Start   ESC : Quit",
        GameStatus::Playing => "← → / A D : Move   SPACE : Shoot   Ctrl-C : Exit",
        GameStatus::GameOver | GameStatus::LevelWon => "R : Restart   Ctrl-C : Exit",
    };
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
