//! Terminal runner (default binary).
//!
//! Drives the session at a fixed 16ms tick, maps crossterm key events to
//! controls and renders through the framebuffer renderer. Games can be
//! recorded to and replayed from JSON.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{Recorder, Replay, Session};
use blockfall::input::{handle_key_event, should_quit, should_restart, ReleaseTracker};
use blockfall::term::{Effects, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

const HELP: &str = "\
usage: blockfall [--seed N] [--record PATH | --replay PATH]

  --seed N        seed for the shape sequence (default: clock based)
  --record PATH   write the last played game to PATH as JSON on exit
  --replay PATH   play back a recorded game
  -h, --help      show this help

keys: arrows/wasd move and rotate, space hard drop, r restart after game over, q quit";

#[derive(Debug, Default)]
struct Cli {
    help: bool,
    seed: Option<u32>,
    record_path: Option<PathBuf>,
    replay_path: Option<PathBuf>,
}

fn parse_cli() -> Result<Cli> {
    let mut cli = Cli::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => cli.help = true,
            "--seed" => {
                let Some(value) = args.next() else {
                    bail!("--seed requires a number");
                };
                cli.seed = Some(value.parse().with_context(|| format!("invalid seed: {value}"))?);
            }
            "--record" => {
                let Some(path) = args.next() else {
                    bail!("--record requires a path");
                };
                cli.record_path = Some(PathBuf::from(path));
            }
            "--replay" => {
                let Some(path) = args.next() else {
                    bail!("--replay requires a path");
                };
                cli.replay_path = Some(PathBuf::from(path));
            }
            other => bail!("unknown argument: {other} (try --help)"),
        }
    }

    if cli.record_path.is_some() && cli.replay_path.is_some() {
        bail!("cannot combine --record and --replay");
    }
    Ok(cli)
}

fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let cli = parse_cli()?;
    if cli.help {
        println!("{HELP}");
        return Ok(());
    }

    let replay = match &cli.replay_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read replay {}", path.display()))?;
            Some(Replay::from_json(&text).with_context(|| format!("parse replay {}", path.display()))?)
        }
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = match replay {
        Some(replay) => run_replay(&mut term, &replay),
        None => run_live(&mut term, cli.seed.unwrap_or_else(clock_seed)).map(|recorded| {
            if let Some(path) = &cli.record_path {
                Some((path.clone(), recorded))
            } else {
                None
            }
        }),
    };

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some((path, recorded)) = result? {
        let json = recorded.to_json().context("serialize replay")?;
        fs::write(&path, json).with_context(|| format!("write replay {}", path.display()))?;
        println!("recorded {} frames to {}", recorded.frames.len(), path.display());
    }
    Ok(())
}

/// Everything the frame loop redraws from
struct Screen {
    view: GameView,
    effects: Effects,
    fb: FrameBuffer,
}

impl Screen {
    fn new() -> Self {
        Self {
            view: GameView::default(),
            effects: Effects::new(),
            fb: FrameBuffer::new(0, 0),
        }
    }

    fn draw(&mut self, term: &mut TerminalRenderer, session: &Session) -> Result<()> {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snap = session.snapshot();
        self.view
            .render_into(&snap, &self.effects, Viewport::new(w, h), &mut self.fb);
        term.present(&mut self.fb)
    }

    /// Turn the session's cleared cells into sparks and age existing ones.
    fn advance(&mut self, session: &mut Session, dt_ms: u32) {
        self.effects.spawn(&session.take_cleared());
        self.effects.advance(dt_ms);
    }
}

fn run_live(term: &mut TerminalRenderer, seed: u32) -> Result<Replay> {
    let mut recorder = Recorder::new(seed);
    let mut releases = ReleaseTracker::new();
    let mut screen = Screen::new();

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        screen.draw(term, recorder.session())?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(recorder.finish());
                        }
                        if should_restart(key) && recorder.session().game_over() {
                            let next_seed = recorder.session().seed().wrapping_add(1);
                            recorder = Recorder::new(next_seed);
                            releases.reset();
                            screen.effects.clear();
                            continue;
                        }
                        if let Some(control) = handle_key_event(key) {
                            releases.on_press(control);
                            // OS auto-repeat only keeps the hold alive.
                            if key.kind == KeyEventKind::Press || !recorder.session().held().is_held(control) {
                                recorder.press(control);
                            }
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(control) = handle_key_event(key) {
                            releases.on_release(control);
                            recorder.release(control);
                        }
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            if !term.reports_key_releases() {
                for control in releases.update(TICK_MS) {
                    recorder.release(control);
                }
            }
            recorder.tick(TICK_MS);
            screen.advance(recorder.session_mut(), TICK_MS);
        }
    }
}

fn run_replay(term: &mut TerminalRenderer, replay: &Replay) -> Result<Option<(PathBuf, Replay)>> {
    let mut session = Session::new(replay.seed);
    let mut screen = Screen::new();
    let mut frames = replay.frames.iter();
    let mut due = Instant::now();

    loop {
        screen.draw(term, &session)?;

        let timeout = due.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release && should_quit(key) => {
                    return Ok(None);
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if Instant::now() >= due {
            let dt_ms = match frames.next() {
                Some(frame) => {
                    Replay::step(frame, &mut session);
                    frame.dt_ms
                }
                // Finished: keep the final state on screen until quit.
                None => TICK_MS,
            };
            screen.advance(&mut session, dt_ms);
            due += Duration::from_millis(dt_ms as u64);
        }
    }
}
