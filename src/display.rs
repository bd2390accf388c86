//! Rendering layer. All terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! world. No game logic is performed; this module only translates state
//! into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use maze_chase::config::GameConfig;
use maze_chase::entities::{
    GameStatus, Monster, MonsterState, PickupKind, Projectile, ProjectileKind, World,
};
use maze_chase::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_WALL: Color = Color::Blue;
const C_ENDPOINT: Color = Color::Green;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_KEY: Color = Color::Yellow;
const C_HUD_BOW: Color = Color::DarkYellow;
const C_HUD_OFF: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_PLAYER_HIT: Color = Color::Red;
const C_MONSTER: Color = Color::Green;
const C_MONSTER_ATTACK: Color = Color::Magenta;
const C_MONSTER_HIT: Color = Color::Yellow;
const C_MONSTER_DYING: Color = Color::DarkGrey;
const C_FIST: Color = Color::White;
const C_ARROW: Color = Color::Cyan;
const C_KEY: Color = Color::Yellow;
const C_BOW: Color = Color::DarkYellow;
const C_POWERUP: Color = Color::Cyan;
const C_MESSAGE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world pixels onto the terminal play area.
///
/// Row 0 is the HUD, row 1 and row `height - 2` are the border, the last
/// row holds the controls hint; everything between is the play area.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    /// World pixels per terminal column.
    pub scale_x: f32,
    /// World pixels per terminal row.
    pub scale_y: f32,
}

impl Viewport {
    /// Fit the full world height into the terminal; the width scrolls.
    pub fn fit(width: u16, height: u16, config: &GameConfig) -> Self {
        let rows = height.saturating_sub(4).max(1);
        let scale_y = config.world_height() / rows as f32;
        Self {
            width,
            height,
            scale_x: scale_y / CELL_ASPECT,
            scale_y,
        }
    }

    pub fn play_cols(&self) -> u16 {
        self.width.saturating_sub(2).max(1)
    }

    pub fn play_rows(&self) -> u16 {
        self.height.saturating_sub(4).max(1)
    }

    /// Width of the visible slice of the world, in world pixels.
    pub fn view_width(&self) -> f32 {
        self.play_cols() as f32 * self.scale_x
    }
}

/// Character raster of the play area.
struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<(char, Color)>,
}

impl Canvas {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![(' ', Color::Reset); cols * rows],
        }
    }

    /// Fill every cell the rectangle touches. Anything visible covers at
    /// least one cell so small sprites never disappear.
    fn paint(&mut self, rect: &Rect, camera_x: f32, view: &Viewport, glyph: char, color: Color) {
        let left = ((rect.left() - camera_x) / view.scale_x).floor();
        let right = ((rect.right() - camera_x) / view.scale_x).ceil().max(left + 1.0);
        let top = (rect.top() / view.scale_y).floor();
        let bottom = (rect.bottom() / view.scale_y).ceil().max(top + 1.0);

        if right <= 0.0 || bottom <= 0.0 || left >= self.cols as f32 || top >= self.rows as f32 {
            return;
        }

        let (c0, c1) = (left.max(0.0) as usize, (right as usize).min(self.cols));
        let (r0, r1) = (top.max(0.0) as usize, (bottom as usize).min(self.rows));
        for row in r0..r1 {
            for col in c0..c1 {
                self.cells[row * self.cols + col] = (glyph, color);
            }
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, world, view)?;
    draw_world(out, world, view)?;
    draw_controls_hint(out, view)?;

    if let Some(message) = world.message {
        draw_centered(out, view, view.height / 2, message, C_MESSAGE)?;
    }
    match world.status {
        GameStatus::GameOver => draw_banner(out, view, "GAME  OVER", Color::Red)?,
        GameStatus::Won => draw_banner(out, view, " YOU  WIN! ", Color::Green)?,
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let player = &world.player;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives:{}", "♥".repeat(player.lives as usize))))?;

    // Inventory, right-aligned
    let key_tag = if player.has_key { "[KEY]" } else { "[no key]" };
    let bow_tag = if player.has_bow { "[BOW]" } else { "" };
    let power_tag = if player.powerup_timer > 0 {
        let seconds = player.powerup_timer / world.config.fps.max(1) + 1;
        let label = if player.rapid_fire { "RAPID" } else { "RANGE" };
        format!("[+ {label} {seconds:>2}s]")
    } else {
        String::new()
    };
    let right_len = power_tag.chars().count() + bow_tag.len() + key_tag.len() + 2;
    let rx = view.width.saturating_sub(right_len as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;

    if !power_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_POWERUP))?;
        out.queue(Print(&power_tag))?;
    }
    out.queue(Print(" "))?;
    out.queue(style::SetForegroundColor(C_HUD_BOW))?;
    out.queue(Print(bow_tag))?;
    out.queue(Print(" "))?;
    out.queue(style::SetForegroundColor(if player.has_key { C_HUD_KEY } else { C_HUD_OFF }))?;
    out.queue(Print(key_tag))?;

    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn draw_world<W: Write>(out: &mut W, world: &World, view: &Viewport) -> std::io::Result<()> {
    let mut canvas = Canvas::new(view.play_cols() as usize, view.play_rows() as usize);
    let cam = world.camera_x;

    for wall in &world.walls {
        canvas.paint(wall, cam, view, '█', C_WALL);
    }
    canvas.paint(&world.endpoint.rect, cam, view, '▒', C_ENDPOINT);

    for (_, pickup) in world.entities.pickups() {
        let (glyph, color) = match pickup.kind {
            PickupKind::Key => ('k', C_KEY),
            PickupKind::Bow => ('}', C_BOW),
            PickupKind::AttackRangePowerUp => ('+', C_POWERUP),
        };
        canvas.paint(&pickup.rect, cam, view, glyph, color);
    }
    for (_, monster) in world.entities.monsters() {
        let (glyph, color) = monster_glyph(monster);
        canvas.paint(&monster.rect, cam, view, glyph, color);
    }
    for (_, projectile) in world.entities.projectiles() {
        let (glyph, color) = projectile_glyph(projectile);
        canvas.paint(&projectile.rect, cam, view, glyph, color);
    }

    let player = &world.player;
    let blink = player.is_invulnerable() && world.frame % 8 < 4;
    let color = if player.is_knocked_back() || blink { C_PLAYER_HIT } else { C_PLAYER };
    canvas.paint(&player.rect, cam, view, '@', color);

    // Emit row by row, switching colour only when it changes
    for row in 0..canvas.rows {
        out.queue(cursor::MoveTo(1, 2 + row as u16))?;
        let mut current = None;
        let mut run = String::new();
        for col in 0..canvas.cols {
            let (glyph, color) = canvas.cells[row * canvas.cols + col];
            if current != Some(color) {
                if !run.is_empty() {
                    out.queue(Print(&run))?;
                    run.clear();
                }
                out.queue(style::SetForegroundColor(color))?;
                current = Some(color);
            }
            run.push(glyph);
        }
        out.queue(Print(&run))?;
    }
    Ok(())
}

fn monster_glyph(monster: &Monster) -> (char, Color) {
    match monster.state {
        MonsterState::Patrol => ('M', C_MONSTER),
        MonsterState::AttackWindup { .. } => ('W', C_MONSTER_ATTACK),
        MonsterState::Knockback { .. } => ('m', C_MONSTER_HIT),
        MonsterState::Dying { .. } => ('%', C_MONSTER_DYING),
    }
}

fn projectile_glyph(projectile: &Projectile) -> (char, Color) {
    match projectile.kind {
        ProjectileKind::Fist { .. } => ('*', C_FIST),
        ProjectileKind::Arrow => {
            let d = projectile.direction;
            let glyph = if d.x.abs() > 2.0 * d.y.abs() {
                '-'
            } else if d.y.abs() > 2.0 * d.x.abs() {
                '|'
            } else if d.x * d.y > 0.0 {
                '\\'
            } else {
                '/'
            };
            (glyph, C_ARROW)
        }
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑↓→ / WASD : Move   SPACE : Attack   R : Restart   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    view: &Viewport,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let inner = format!("    {title}      ");
    let bar = "═".repeat(inner.chars().count());
    let lines = [
        format!("╔{bar}╗"),
        format!("║{inner}║"),
        format!("╚{bar}╝"),
    ];

    let start_row = (view.height / 2).saturating_sub(3);
    for (i, line) in lines.iter().enumerate() {
        draw_centered(out, view, start_row + i as u16, line, color)?;
    }
    draw_centered(
        out,
        view,
        start_row + lines.len() as u16,
        "R - Play Again  Q - Quit",
        Color::White,
    )?;
    Ok(())
}
