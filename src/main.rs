use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::{thread_rng, Rng};
use tracing::{info, warn};

use floatipop::assets::{AssetLoader, AssetTable};
use floatipop::compute::{
    death_step, high_scores_done, init_session, menu_action, tick, GameStatus, MenuAction, Mode,
};
use floatipop::config::{self, GameConfig, CONFIG_FILE};
use floatipop::display::{self, Viewport};
use floatipop::entities::Keys;
use floatipop::error::GameError;
use floatipop::highscore::{HighScoreList, HighScoreStore};
use floatipop::logging;

/// Frames a key stays held after its last press or repeat event. Terminals
/// without release events keep refreshing it through OS key repeat (≥ 15 Hz),
/// and 8 frames at 60 FPS is about 133 ms.
const HOLD_WINDOW: u64 = 8;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Turns the raw event stream into one `Keys` snapshot per frame.
///
/// We record the frame number of the last press/repeat for every key and
/// treat keys seen within `HOLD_WINDOW` frames as held. Terminals with the
/// keyboard-enhancement protocol also send releases, which drop the key at
/// once.
struct Input {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    quit: bool,
}

impl Input {
    fn new(rx: mpsc::Receiver<Event>) -> Self {
        Input {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
            quit: false,
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.is_held(*k))
    }

    /// Drain pending events (non-blocking) and snapshot the held keys.
    fn poll(&mut self) -> Keys {
        self.frame += 1;

        while let Ok(ev) = self.rx.try_recv() {
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
                    self.key_frame.insert(code, self.frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => self.quit = true,
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            self.quit = true
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, self.frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                }
            }
        }

        Keys {
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            jump: self.any_held(&[KeyCode::Char(' '), KeyCode::Up]),
            confirm: self.is_held(KeyCode::Enter),
            cancel: self.is_held(KeyCode::Esc),
        }
    }
}

// ── Timing ────────────────────────────────────────────────────────────────────

/// Monotonic seconds since the game started.
struct Clock(Instant);

impl Clock {
    fn now(&self) -> f64 {
        self.0.elapsed().as_secs_f64()
    }
}

fn pace(frame_start: Instant, frame: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame {
        thread::sleep(frame - elapsed);
    }
}

fn viewport() -> std::io::Result<Viewport> {
    let (cols, rows) = terminal::size()?;
    Ok(Viewport::new(cols, rows))
}

// ── Modes ─────────────────────────────────────────────────────────────────────

enum ModeExit {
    Advance,
    Quit,
}

struct Frontend<'a> {
    input: Input,
    clock: Clock,
    config: &'a GameConfig,
    assets: &'a AssetTable,
}

fn menu_loop<W: Write>(
    out: &mut W,
    ctx: &mut Frontend<'_>,
    scores: &HighScoreList,
) -> Result<ModeExit, GameError> {
    let opened_at = ctx.clock.now();
    let best = scores.scores().first().copied();
    loop {
        let frame_start = Instant::now();
        let keys = ctx.input.poll();
        if ctx.input.quit {
            return Ok(ModeExit::Quit);
        }
        match menu_action(&keys, opened_at, ctx.clock.now()) {
            MenuAction::Start => return Ok(ModeExit::Advance),
            MenuAction::Quit => return Ok(ModeExit::Quit),
            MenuAction::Wait => {}
        }
        display::draw_menu(out, viewport()?, best)?;
        pace(frame_start, ctx.config.frame_duration());
    }
}

fn game_loop<W: Write>(
    out: &mut W,
    ctx: &mut Frontend<'_>,
    scores: &mut HighScoreList,
    rng: &mut impl Rng,
) -> Result<ModeExit, GameError> {
    let mut session = init_session(
        ctx.assets,
        ctx.clock.now(),
        ctx.config.start_platform,
        rng,
    );

    loop {
        let frame_start = Instant::now();
        let keys = ctx.input.poll();
        if ctx.input.quit {
            return Ok(ModeExit::Quit);
        }

        let now = ctx.clock.now();
        let status = match session.status {
            GameStatus::Playing => tick(&mut session, &keys, now, ctx.assets, rng),
            GameStatus::Dying => death_step(&mut session, &keys, now),
            other => other,
        };

        match status {
            GameStatus::Over => {
                if let Some(score) = session.final_score() {
                    scores.add_score(score);
                }
                return Ok(ModeExit::Advance);
            }
            GameStatus::Abandoned => return Ok(ModeExit::Advance),
            GameStatus::Playing | GameStatus::Dying => {}
        }

        display::render(out, &session, ctx.assets, now, viewport()?)?;
        pace(frame_start, ctx.config.frame_duration());
    }
}

fn high_score_loop<W: Write>(
    out: &mut W,
    ctx: &mut Frontend<'_>,
    scores: &HighScoreList,
) -> Result<ModeExit, GameError> {
    let opened_at = ctx.clock.now();
    loop {
        let frame_start = Instant::now();
        let keys = ctx.input.poll();
        if ctx.input.quit {
            return Ok(ModeExit::Quit);
        }
        if high_scores_done(&keys, opened_at, ctx.clock.now()) {
            return Ok(ModeExit::Advance);
        }
        display::draw_high_scores(out, viewport()?, scores)?;
        pace(frame_start, ctx.config.frame_duration());
    }
}

fn run<W: Write>(
    out: &mut W,
    ctx: &mut Frontend<'_>,
    scores: &mut HighScoreList,
) -> Result<(), GameError> {
    let mut rng = thread_rng();
    let mut mode = Mode::Menu;

    loop {
        let exit = match mode {
            Mode::Menu => menu_loop(out, ctx, scores)?,
            Mode::Game => game_loop(out, ctx, scores, &mut rng)?,
            Mode::HighScores => high_score_loop(out, ctx, scores)?,
        };
        match exit {
            ModeExit::Quit => break,
            ModeExit::Advance => {
                mode = mode.next();
                info!(?mode, "Mode change");
            }
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config_path = config::default_game_dir().join(CONFIG_FILE);
    let config = GameConfig::load(&config_path).context("failed to load configuration")?;
    let score_dir = config.score_dir();

    if let Err(e) = logging::init(&score_dir, &config.log_filter) {
        eprintln!("warning: logging disabled: {e}");
    }

    let loader = match &config.data_dir {
        Some(dir) => AssetLoader::from_dir(dir),
        None => AssetLoader::builtin(),
    };
    let assets = AssetTable::load(&loader).context("failed to load sprites")?;

    let store = HighScoreStore::new(&score_dir);
    let mut scores = store.load();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Kitty-protocol terminals report releases and repeats; the rest ignore
    // the request and rely on HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the frame loop drains the
    // channel without waiting.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut ctx = Frontend {
        input: Input::new(rx),
        clock: Clock(Instant::now()),
        config: &config,
        assets: &assets,
    };
    let result = run(&mut out, &mut ctx, &mut scores);

    // Restore the terminal whatever `run` returned.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = store.save(&scores) {
        warn!(error = %e, path = %store.path().display(), "Could not save high scores");
        eprintln!("warning: could not save high scores: {e}");
    }

    result.context("game loop failed")
}
