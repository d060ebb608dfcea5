mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use river_run::compute::{apply_action, init_state, tick, GameState};
use river_run::config::{GameConfig, LOG_FILE};
use river_run::entities::{Action, GameStatus};

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so log lines go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(EnvFilter::from_default_env().add_directive("river_run=info".parse()?))
        .init();
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn key_action(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::Shoot),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::MoveForward),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::MoveBack),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program, `false` → restart.
///
/// Each frame drains every pending input event, applies the resulting
/// actions, advances one tick and redraws, then sleeps out the rest of the
/// frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<bool> {
    let frame = Duration::from_secs_f64(1.0 / f64::from(state.config.screen.frame_rate));

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. })
                    if kind != KeyEventKind::Release =>
                {
                    if matches!(code, KeyCode::Char('r') | KeyCode::Char('R'))
                        && state.status == GameStatus::GameOver
                    {
                        return Ok(false);
                    }
                    match key_action(code, modifiers) {
                        Some(Action::Quit) => return Ok(true),
                        Some(action) => apply_action(state, action),
                        None => {}
                    }
                }
                Event::Resize(..) => display::clear(out)?,
                _ => {}
            }
        }

        tick(state, rng);
        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // The log file comes from the config, so logging starts before the
    // outcome of the load is reported.
    let loaded = GameConfig::load();
    let log_file = match &loaded {
        Ok((config, _)) => config.log_file.clone(),
        Err(_) => PathBuf::from(LOG_FILE),
    };
    init_logging(&log_file)?;
    let config = match loaded {
        Ok((config, source)) => {
            source.log();
            config
        }
        Err(e) => {
            warn!("Rejected config file {}: {e}", GameConfig::config_path().display());
            return Err(e).context("loading configuration");
        }
    };

    info!("River Run starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("River Run shutdown complete");
    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: GameConfig) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    loop {
        let mut state = init_state(config.clone(), &mut rng);
        display::clear(out)?;
        let quit = game_loop(out, &mut state, rx, &mut rng).context("terminal I/O failed")?;
        info!("Run ended at frame {}", state.frame);
        if quit {
            break;
        }
        // Otherwise start a fresh river
    }
    Ok(())
}
