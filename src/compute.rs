//! Game-loop logic, free of terminal I/O.
//!
//! Every function takes the current time in seconds (sampled once per frame
//! by the caller) and, where needed, an RNG handle, so the whole simulation
//! can be driven deterministically from tests.

use std::f64::consts::PI;

use rand::Rng;
use tracing::info;

use crate::assets::AssetTable;
use crate::collision::{self, CollisionReport};
use crate::entities::{Entity, EntityKind, Keys, HEIGHT, WIDTH};
use crate::geometry::Rect;
use crate::player::Player;
use crate::scroll::{self, ScrollSpeed};
use crate::spawn;

/// Seconds a menu or score screen ignores input after opening.
pub const MENU_DEBOUNCE: f64 = 0.5;

const WATER_SPACING: usize = 88;
const CLOUD_COUNT: usize = 7;

// ── Modes ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Game,
    HighScores,
}

impl Mode {
    /// Modes cycle MENU → GAME → HIGHSCORES → MENU.
    pub fn next(self) -> Mode {
        match self {
            Mode::Menu => Mode::Game,
            Mode::Game => Mode::HighScores,
            Mode::HighScores => Mode::Menu,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Quit,
    Wait,
}

pub fn accepts_input(opened_at: f64, now: f64) -> bool {
    now - opened_at > MENU_DEBOUNCE
}

pub fn menu_action(keys: &Keys, opened_at: f64, now: f64) -> MenuAction {
    if !accepts_input(opened_at, now) {
        return MenuAction::Wait;
    }
    if keys.cancel {
        MenuAction::Quit
    } else if keys.confirm || keys.jump {
        MenuAction::Start
    } else {
        MenuAction::Wait
    }
}

/// Whether the high-score screen should hand back to the menu.
pub fn high_scores_done(keys: &Keys, opened_at: f64, now: f64) -> bool {
    accepts_input(opened_at, now) && (keys.cancel || keys.confirm || keys.jump)
}

// ── Session ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Out of balloons, the death animation is running.
    Dying,
    /// The run ended and its score should be recorded.
    Over,
    /// The player left mid-run; nothing is recorded.
    Abandoned,
}

/// One run of the game.
#[derive(Clone, Debug)]
pub struct Session {
    pub player: Player,
    pub scroll: ScrollSpeed,
    pub static_world: Vec<Rect>,
    /// Hazards and collectibles.
    pub objects: Vec<Entity>,
    /// Surfaces the player can stand on.
    pub movable: Vec<Entity>,
    /// Drawn in front of the player.
    pub foreground: Vec<Entity>,
    /// Drawn behind everything.
    pub background: Vec<Entity>,
    pub start_time: f64,
    pub last_time: f64,
    pub status: GameStatus,
    pub last_collision: CollisionReport,
}

/// Build the level: walls, water, clouds, the player and an optional
/// starting platform.
pub fn init_session(
    assets: &AssetTable,
    now: f64,
    start_platform: bool,
    rng: &mut impl Rng,
) -> Session {
    let water_height = assets.size(EntityKind::Water).1;
    let mut foreground = Vec::new();
    for i in (0..WIDTH as usize + WATER_SPACING).step_by(WATER_SPACING) {
        let x = i as f64;
        foreground.push(scroll::water(
            assets,
            x + WATER_SPACING as f64 / 2.0,
            HEIGHT - water_height / 2.0 + 10.0,
            PI / 2.5,
            5.0 + rng.gen::<f64>(),
            now,
        ));
    }
    for i in (0..WIDTH as usize + WATER_SPACING).step_by(WATER_SPACING) {
        foreground.push(scroll::water(
            assets,
            i as f64,
            HEIGHT - water_height / 2.0 + 5.0,
            5.0 + 3.0 * rng.gen::<f64>(),
            5.0,
            now,
        ));
    }

    let background = (0..CLOUD_COUNT)
        .map(|_| {
            let x = rng.gen_range(-(WIDTH as i64)..=2 * WIDTH as i64) as f64;
            let y = rng.gen_range(75..=350) as f64;
            scroll::cloud(assets, x, y, now)
        })
        .collect();

    let mut movable = Vec::new();
    if start_platform {
        movable.push(scroll::platform(assets, 800.0, HEIGHT - 415.0, now));
    }

    info!(start_platform, "New session");
    Session {
        player: Player::new(assets.player_size(), now),
        scroll: ScrollSpeed::new(),
        static_world: collision::static_world(),
        objects: Vec::new(),
        movable,
        foreground,
        background,
        start_time: now,
        last_time: now,
        status: GameStatus::Playing,
        last_collision: CollisionReport::default(),
    }
}

impl Session {
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.start_time
    }

    /// Score to record, once the run is over.
    pub fn final_score(&self) -> Option<f64> {
        match self.status {
            GameStatus::Over => Some(self.player.score()),
            _ => None,
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance a playing session by one frame: scroll ramp, input, spawning,
/// updates, collisions and culling, in that order.
pub fn tick(
    session: &mut Session,
    keys: &Keys,
    now: f64,
    assets: &AssetTable,
    rng: &mut impl Rng,
) -> GameStatus {
    if session.status != GameStatus::Playing {
        return session.status;
    }
    if keys.cancel {
        info!(score = session.player.score(), "Run abandoned");
        session.status = GameStatus::Abandoned;
        return session.status;
    }

    let elapsed = session.elapsed(now);
    let dt = (now - session.last_time).max(0.0);
    session.scroll.ramp(elapsed, dt);
    let scroll = session.scroll;

    session.player.handle_input(keys, now);

    spawn::add_random_objects(&mut session.objects, elapsed, assets, now, rng);

    session.player.update(now);
    scroll::update_all(&mut session.foreground, now, scroll, rng);
    scroll::update_all(&mut session.background, now, scroll, rng);
    scroll::update_all(&mut session.objects, now, scroll, rng);
    scroll::update_all(&mut session.movable, now, scroll, rng);

    session.last_collision = collision::check_collision(
        &mut session.player,
        &session.static_world,
        &session.movable,
        &mut session.objects,
        now,
    );

    session.last_time = now;

    if !session.player.is_alive() {
        info!(score = session.player.score(), "Out of balloons");
        session.status = GameStatus::Dying;
        return session.status;
    }

    collision::cull(&mut session.objects);
    collision::cull(&mut session.movable);
    session.status
}

/// Advance the death animation by one frame. Cancelling skips the rest of it.
pub fn death_step(session: &mut Session, keys: &Keys, now: f64) -> GameStatus {
    if session.status != GameStatus::Dying {
        return session.status;
    }

    let dt = (now - session.last_time).max(0.0);
    session.last_time = now;

    if keys.cancel || !session.player.do_death(dt) {
        info!(score = session.player.score() as u32, "Game over");
        session.status = GameStatus::Over;
    }
    session.status
}
