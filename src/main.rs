mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use display::Viewport;
use maze_chase::compute::{init_state, tick};
use maze_chase::config::GameConfig;
use maze_chase::entities::World;
use maze_chase::input::InputSnapshot;

/// Top-down maze chase in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file overriding any of the default tunables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG, default `info`).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// at 60 FPS a window of 8 frames (≈133 ms) outlasts the OS repeat interval.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Title screen ──────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;
    let left = cx.saturating_sub(16);

    let title = "▓  MAZE  CHASE  ▓";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(left, cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Find the key, reach the exit ▒"))?;

    let legend: &[(&str, Color, &str)] = &[
        ("@", Color::White, " You"),
        ("M", Color::Green, " Monster (drops keys)"),
        ("k", Color::Yellow, " Key"),
        ("}", Color::DarkYellow, " Bow: arrows instead of fists"),
        ("+", Color::Cyan, " Power-up: longer reach"),
        ("▒", Color::Green, " Exit"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        out.queue(cursor::MoveTo(left, cy.saturating_sub(2) + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(left, cy + 5))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("[Enter] Start   [Q] Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) = rx.recv() {
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs one game until the user quits.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event per key, and every frame the still-fresh keys are folded into one
/// `InputSnapshot`. Movement is level-triggered (held keys), while attack and
/// restart are edge-triggered (a press arrived this frame).
///
/// Keyboard-enhancement terminals send real `Release` events and keys drop
/// immediately; classic terminals only repeat `Press`, so keys expire after
/// `HOLD_WINDOW` frames of silence.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    view: &Viewport,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let frame_time = world.config.frame_duration();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    let up = [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
    let down = [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
    let left = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
    let right = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut input = InputSnapshot::default();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(' ') => input.action = true,
                        KeyCode::Char('r') | KeyCode::Char('R') => input.restart = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        input.up = any_held(&key_frame, &up, frame);
        input.down = any_held(&key_frame, &down, frame);
        input.left = any_held(&key_frame, &left, frame);
        input.right = any_held(&key_frame, &right, frame);

        *world = tick(world, &input, rng);

        display::render(out, world, view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    // Logging to the terminal would scribble over the game, so it is off
    // unless a file is given or RUST_LOG asks for it.
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    init_logging(args.log_file.as_deref())?;

    let mut rng = match args.seed {
        Some(seed) => {
            info!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to HOLD_WINDOW expiry.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the frame loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal I/O failed")
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    mut config: GameConfig,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    match show_menu(out, rx)? {
        MenuResult::Quit => Ok(()),
        MenuResult::Start => {
            let (width, height) = terminal::size()?;
            let view = Viewport::fit(width, height, &config);
            config.view_width = view.view_width();

            let mut world = init_state(config, rng);
            game_loop(out, &mut world, &view, rx, rng)
        }
    }
}
