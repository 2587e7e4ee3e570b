mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use arcade_shooter::clock::{Clock, MonotonicClock};
use arcade_shooter::compute::{init_state, player_shoot, restart, tick};
use arcade_shooter::config::Args;
use arcade_shooter::controls::{Command, Controls};
use arcade_shooter::entities::GameStatus;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is the game screen, so logs go to a file.
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        // Hand the screen back before the default report would be lost.
        let _ = terminal::disable_raw_mode();
        let _ = stdout().execute(cursor::Show);
        let _ = stdout().execute(terminal::LeaveAlternateScreen);
        eprintln!("{info}");
    }));
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  While the game is over the simulation is
/// frozen and only the overlay is drawn; a restart re-arms it.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    args: &Args,
    rng: &mut StdRng,
) -> Result<()> {
    let clock = MonotonicClock::new();
    let frame_len = args.frame_duration();
    let mut controls = Controls::new(args.hold_window_frames());
    let mut state = init_state(clock.now_ms(), rng);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            let key = match rx.try_recv() {
                Ok(Event::Key(key)) => key,
                Ok(_) => continue,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => bail!("input thread stopped"),
            };
            match controls.handle(key, frame) {
                Some(Command::Quit) => {
                    tracing::info!(kills = state.player.kills, level = state.level, "quit");
                    return Ok(());
                }
                Some(Command::Fire) => state = player_shoot(&state),
                Some(Command::Restart) if state.status == GameStatus::GameOver => {
                    state = restart(&state, clock.now_ms(), rng);
                    controls.clear();
                }
                _ => {}
            }
        }

        state = tick(&state, &controls.input_state(frame), clock.now_ms(), rng);

        let size = terminal::size().context("failed to query terminal size")?;
        display::render(out, &state, size).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_file)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, fps = args.fps, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "terminal event read failed");
                break;
            }
        }
    });

    let result = game_loop(&mut out, &rx, &args, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!(error = %e, "exiting with error");
    }
    result
}
