//! Scroll speed and the motion of every scrolling entity.
//!
//! All entities drift right by `WIDTH / scroll_speed` units per second, so a
//! lower scroll speed means a faster world. Each variant layers its own
//! motion on top of that drift.

use rand::Rng;

use crate::assets::AssetTable;
use crate::entities::{Entity, EntityKind, Motion, WIDTH};
use crate::geometry::Rect;

pub const INITIAL_SCROLL_SPEED: f64 = 10.0;
pub const MIN_SCROLL_SPEED: f64 = 5.0;
/// Seconds of play before the world starts speeding up.
pub const RAMP_DELAY: f64 = 25.0;
/// Scroll-speed decrease per second once ramping.
pub const RAMP_RATE: f64 = 0.1;

const WATER_AMPLITUDE: f64 = 5.0;
const BALLOON_SWAY_AMPLITUDE: f64 = 10.0;
const BALLOON_SWAY_RATE: f64 = 7.0;
const BALLOON_RISE_SPEED: f64 = 160.0;
const WHALE_SWIM_SPEED: f64 = 1.2;
const WHALE_BOB_AMPLITUDE: f64 = 25.0;
const WHALE_BOB_RATE: f64 = 4.0;

// ── Scroll speed ──────────────────────────────────────────────────────────────

/// The single scroll-speed value owned by the game loop and handed to every
/// update by copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSpeed(f64);

impl Default for ScrollSpeed {
    fn default() -> Self {
        ScrollSpeed(INITIAL_SCROLL_SPEED)
    }
}

impl ScrollSpeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Horizontal drift in world units per second.
    pub fn drift(&self) -> f64 {
        WIDTH / self.0
    }

    /// Slow the scroll (speed the world up) once `elapsed` passes the
    /// warm-up. Never increases and never drops below `MIN_SCROLL_SPEED`.
    pub fn ramp(&mut self, elapsed: f64, dt: f64) {
        if elapsed > RAMP_DELAY && self.0 > MIN_SCROLL_SPEED {
            self.0 = (self.0 - dt.max(0.0) * RAMP_RATE).max(MIN_SCROLL_SPEED);
        }
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

fn centered(assets: &AssetTable, kind: EntityKind, cx: f64, cy: f64) -> Rect {
    let (w, h) = assets.size(kind);
    Rect::from_center(cx, cy, w, h)
}

fn entity(rect: Rect, motion: Motion, now: f64) -> Entity {
    Entity {
        rect,
        motion,
        created_at: now,
        last_time: None,
    }
}

pub fn water(
    assets: &AssetTable,
    cx: f64,
    cy: f64,
    wave_offset: f64,
    wave_speed: f64,
    now: f64,
) -> Entity {
    let rect = centered(assets, EntityKind::Water, cx, cy);
    let motion = Motion::Water {
        start_y: cy,
        wave_offset,
        wave_speed,
    };
    entity(rect, motion, now)
}

pub fn cloud(assets: &AssetTable, cx: f64, cy: f64, now: f64) -> Entity {
    entity(centered(assets, EntityKind::Cloud, cx, cy), Motion::Cloud, now)
}

/// A star whose top-left corner sits at `(x, y)`.
pub fn star(
    assets: &AssetTable,
    x: f64,
    y: f64,
    vert_speed: f64,
    displacement: f64,
    direction: f64,
    now: f64,
) -> Entity {
    let (w, h) = assets.size(EntityKind::Star);
    let rect = Rect::new(x, y, w, h);
    let motion = Motion::Star {
        start_y: rect.center_y(),
        vert_speed,
        displacement,
        direction: if direction < 0.0 { -1.0 } else { 1.0 },
    };
    entity(rect, motion, now)
}

pub fn balloon(assets: &AssetTable, cx: f64, cy: f64, now: f64) -> Entity {
    let motion = Motion::Balloon {
        initial_x: cx,
        offset_x: 0.0,
        vert_speed: BALLOON_RISE_SPEED,
    };
    entity(centered(assets, EntityKind::Balloon, cx, cy), motion, now)
}

pub fn whale(assets: &AssetTable, cx: f64, cy: f64, now: f64) -> Entity {
    let motion = Motion::Whale {
        start_y: cy,
        swim_speed: WHALE_SWIM_SPEED,
    };
    entity(centered(assets, EntityKind::Whale, cx, cy), motion, now)
}

pub fn platform(assets: &AssetTable, cx: f64, cy: f64, now: f64) -> Entity {
    entity(
        centered(assets, EntityKind::Platform, cx, cy),
        Motion::Platform,
        now,
    )
}

// ── Per-frame update ──────────────────────────────────────────────────────────

/// Advance one entity to `now`. The first call only records the timestamp.
pub fn update(entity: &mut Entity, now: f64, scroll: ScrollSpeed, rng: &mut impl Rng) {
    let Some(last) = entity.last_time else {
        entity.last_time = Some(now);
        return;
    };
    let dt = (now - last).max(0.0);
    entity.last_time = Some(now);

    let drift = scroll.drift() * dt;
    let age = now - entity.created_at;
    let rect = &mut entity.rect;

    match &mut entity.motion {
        Motion::Water {
            start_y,
            wave_offset,
            wave_speed,
        } => {
            rect.translate(drift, 0.0);
            rect.set_center_y(*start_y + (age * *wave_speed + *wave_offset).sin() * WATER_AMPLITUDE);
            if rect.center_x() > WIDTH + rect.w / 2.0 {
                rect.set_center_x(rect.center_x() - (WIDTH + rect.w));
            }
        }
        Motion::Cloud => {
            rect.translate(drift, 0.0);
            if rect.center_x() > WIDTH + rect.w / 2.0 {
                let half = rect.w / 2.0;
                let reentry = rng.gen_range(half + 10.0..=half + 250.0);
                rect.set_center_x(-reentry);
            }
        }
        Motion::Star {
            start_y,
            vert_speed,
            displacement,
            direction,
        } => {
            rect.translate(drift, *vert_speed * dt * *direction);
            let offset = rect.center_y() - *start_y;
            if *direction > 0.0 && offset > *displacement {
                *direction = -1.0;
            } else if *direction < 0.0 && offset <= 0.0 {
                *direction = 1.0;
            }
        }
        Motion::Balloon {
            initial_x,
            offset_x,
            vert_speed,
        } => {
            *offset_x += drift;
            rect.translate(0.0, -*vert_speed * dt);
            let sway = (now * BALLOON_SWAY_RATE).sin() * BALLOON_SWAY_AMPLITUDE;
            rect.set_center_x(*initial_x + sway + *offset_x);
        }
        Motion::Whale {
            start_y,
            swim_speed,
        } => {
            rect.translate(drift * *swim_speed, 0.0);
            rect.set_center_y(*start_y + (age * WHALE_BOB_RATE).sin() * WHALE_BOB_AMPLITUDE);
        }
        Motion::Platform => {
            rect.translate(drift, 0.0);
        }
    }
}

/// Update a whole collection.
pub fn update_all(entities: &mut [Entity], now: f64, scroll: ScrollSpeed, rng: &mut impl Rng) {
    for e in entities.iter_mut() {
        update(e, now, scroll, rng);
    }
}
