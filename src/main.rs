mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use galaxy_invaders::compute::{advance_frame, init_state, FrameInput, LoopControl, Press};
use galaxy_invaders::config::Tuning;
use galaxy_invaders::error::GameError;

#[derive(Parser, Debug)]
#[command(name = "galaxy_invaders")]
#[command(about = "Terminal Galaxy Invaders: hold the line against the descending formation")]
struct Args {
    /// JSON file overriding the default tuning constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy fire and explosions (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Where to write the log (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a movement key stays active after its last press or repeat event.
/// Must outlast the OS key-repeat interval on terminals without release events.
const HOLD_WINDOW: u64 = 8;

/// Seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

/// Edge-triggered action for a freshly pressed key.
fn press_for(code: KeyCode) -> Option<Press> {
    match code {
        KeyCode::Char(' ') => Some(Press::Fire),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Press::Restart),
        KeyCode::Esc => Some(Press::Quit),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits from the menu or presses Ctrl-C.
///
/// Input model: discrete presses (Space, R, Esc) are collected as they arrive
/// and handed to the frame engine once each.  Movement keys are tracked in a
/// `key_frame` map recording the frame of their last press/repeat, so
/// Space + A/D can be held at the same time.
///
/// * **Keyboard-enhancement capable** terminals send proper `Release` events
///   and keys are dropped immediately.
/// * **Classic terminals** only repeat `Press`; keys expire after
///   `HOLD_WINDOW` frames of silence.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    tuning: Tuning,
    rng: &mut StdRng,
    frame_budget: Duration,
) -> Result<(), GameError> {
    let mut state = init_state(tuning);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_tick).as_secs_f32();
        last_tick = frame_start;
        frame += 1;

        // Collect everything the input thread queued since the last frame.
        let mut input = FrameInput::default();
        let mut interrupted = false;
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        interrupted = true;
                    } else if let Some(press) = press_for(code) {
                        input.presses.push(press);
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
        input.left = any_held(&key_frame, &LEFT_KEYS, frame);
        input.right = any_held(&key_frame, &RIGHT_KEYS, frame);

        let (next, control) = advance_frame(&state, &input, dt, rng);
        state = next;

        display::render(out, &state.snapshot())?;

        if interrupted || control == LoopControl::Quit {
            tracing::info!(frame, score = state.score, "leaving game loop");
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: PathBuf) -> Result<(), GameError> {
    let file = File::create(&path).map_err(GameError::Io)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<(), GameError> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("galaxy_invaders.log"));
    init_logging(log_path)?;

    let tuning = match &args.config {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_budget = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));
    tracing::info!(?args, "starting galaxy invaders");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events let held movement keys stop immediately.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the loop polls the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, tuning, &mut rng, frame_budget);

    // Restore the terminal even when the loop failed.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(%err, "game loop failed");
    }
    result
}
