//! The player: input interpretation, projectile motion, animation,
//! balloon count, invincibility and the bounce/death responses.
//!
//! Position is kept in bottom-up world coordinates (`y` grows upward) and
//! converted to screen space only when a rectangle is needed. Motion is
//! integrated analytically from an origin that resets on every flap and
//! bounce:
//!
//! ```text
//! x = x0 + force_x·t
//! y = y0 + force_y·t + ½·GRAVITY·t²
//! ```

use std::f64::consts::PI;

use tracing::{debug, info};

use crate::entities::{Facing, Keys, HEIGHT};
use crate::geometry::Rect;

pub const MAX_FORCE_X: f64 = 150.0;
pub const MAX_FORCE_Y: f64 = 150.0;
pub const FORCE_APPLIED: f64 = 40.0;
/// Minimum seconds between two flaps.
pub const FLAP_TIME: f64 = 0.09;
pub const GRAVITY: f64 = -98.0 * 1.5;
pub const RUN_FORCE: f64 = 100.0;
pub const INVINCIBLE_TIME: f64 = 2.0;
pub const ANIMATION_STEP: f64 = 0.1;
pub const NUM_ANIMATIONS: usize = 5;
pub const MAX_BALLOONS: u8 = 3;

pub const START_X: f64 = 850.0;
pub const START_Y: f64 = 500.0;
/// Falling below this height is instant death.
pub const DEATH_HEIGHT: f64 = 25.0;
/// Units per second the player rises once all balloons are gone.
pub const DEATH_RISE_SPEED: f64 = 350.0;
/// Points per second survived.
pub const SCORE_RATE: f64 = 10.0;

/// Flaps closer together than this many `FLAP_TIME`s count as a combo.
const COMBO_WINDOW: f64 = 5.0;
const FRICTION: f64 = 0.9;
const FRICTION_SNAP: f64 = 0.01;
const BOUNCE_DAMPING: f64 = -0.7;
const COLLISION_INSET: f64 = 10.0;
const BLINK_RATE: f64 = 100.0;

// ── Impact classification ─────────────────────────────────────────────────────

/// Which side of an obstacle the player struck.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Classify an impact from the angle between the two centres against the
/// target's half-diagonal angle. Screen coordinates, so a target *below* the
/// mover yields a positive angle and a `Top` impact.
pub fn classify_impact(mover: &Rect, target: &Rect) -> Side {
    let angle = (target.center_y() - mover.center_y()).atan2(target.center_x() - mover.center_x());
    let rect_angle = target.half_diagonal_angle();

    if angle > rect_angle && angle < PI - rect_angle {
        Side::Top
    } else if angle < -rect_angle && angle > -PI + rect_angle {
        Side::Bottom
    } else if angle < rect_angle && angle > -rect_angle {
        Side::Left
    } else {
        Side::Right
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    x: f64,
    y: f64,
    start_x: f64,
    start_y: f64,
    force_x: f64,
    force_y: f64,
    /// Seconds since the last flap or bounce reset the integration origin.
    total_time: f64,
    on_ground: bool,
    balloons: u8,
    invincible_since: f64,
    animation_start: f64,
    animation_frame: usize,
    facing: Facing,
    score: f64,
    /// Horizontal intent from the last input snapshot: -1, 0 or 1.
    x_dir: i8,
    jump_released: bool,
    last_flap: f64,
    last_time: Option<f64>,
    width: f64,
    height: f64,
}

impl Player {
    /// A fresh player of the given sprite size. The spawn itself counts as a
    /// hit for invincibility purposes.
    pub fn new(size: (f64, f64), now: f64) -> Self {
        let mut player = Player {
            x: START_X,
            y: START_Y,
            start_x: START_X,
            start_y: START_Y,
            force_x: 0.0,
            force_y: 0.0,
            total_time: 0.0,
            on_ground: true,
            balloons: MAX_BALLOONS,
            invincible_since: now,
            animation_start: now - ANIMATION_STEP * NUM_ANIMATIONS as f64,
            animation_frame: 0,
            facing: Facing::Left,
            score: 0.0,
            x_dir: 0,
            jump_released: true,
            last_flap: now,
            last_time: None,
            width: size.0.max(0.0),
            height: size.1.max(0.0),
        };
        player.reset_position(now);
        player
    }

    /// Put the player back at the spawn point at rest.
    pub fn reset_position(&mut self, now: f64) {
        self.place_at(START_X, START_Y);
        self.force_x = 0.0;
        self.force_y = 0.0;
        self.x_dir = 0;
        self.facing = Facing::Left;
        self.on_ground = true;
        self.last_flap = now;
    }

    /// Move to `(x, y)` and make it the new integration origin.
    pub fn place_at(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
        self.reset_origin();
    }

    fn reset_origin(&mut self) {
        self.start_x = self.x;
        self.start_y = self.y;
        self.total_time = 0.0;
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn x(&self) -> f64 {
        self.x
    }

    /// Height above the bottom of the world.
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn force(&self) -> (f64, f64) {
        (self.force_x, self.force_y)
    }

    pub fn balloons(&self) -> u8 {
        self.balloons
    }

    pub fn is_alive(&self) -> bool {
        self.balloons > 0
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn animation_frame(&self) -> usize {
        self.animation_frame
    }

    pub fn is_invincible(&self, now: f64) -> bool {
        now - self.invincible_since < INVINCIBLE_TIME
    }

    /// Blinks while invincible.
    pub fn is_visible(&self, now: f64) -> bool {
        if self.is_invincible(now) {
            ((now - self.invincible_since) * BLINK_RATE).sin() > 0.0
        } else {
            true
        }
    }

    /// Sprite bounds in screen coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.x, HEIGHT - self.y, self.width, self.height)
    }

    /// The slightly smaller rectangle used for collisions.
    pub fn collision_rect(&self) -> Rect {
        self.rect().inflate(-COLLISION_INSET, -COLLISION_INSET)
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, keys: &Keys, now: f64) {
        self.x_dir = 0;
        if keys.left {
            self.x_dir = -1;
            self.facing = Facing::Left;
        }
        if keys.right {
            self.x_dir = 1;
            self.facing = Facing::Right;
        }

        if keys.jump && self.jump_released && now - self.last_flap > FLAP_TIME {
            self.jump_released = false;
            self.flap(now);
        }
        if !keys.jump {
            self.jump_released = true;
        }

        self.force_y = self.force_y.min(MAX_FORCE_Y);
        self.force_x = self.force_x.clamp(-MAX_FORCE_X, MAX_FORCE_X);
    }

    fn flap(&mut self, now: f64) {
        self.start_x = self.x;
        self.start_y = self.y;

        let combo = now - self.last_flap < FLAP_TIME * COMBO_WINDOW;
        if self.x_dir == 0 {
            if combo {
                self.force_y += FORCE_APPLIED / 3.0 * 1.2;
            } else {
                self.force_y = FORCE_APPLIED / 3.0 * 2.0;
            }
        } else {
            // Diagonal flaps split the impulse between the axes.
            if combo {
                self.force_y += FORCE_APPLIED / 3.0;
            } else {
                self.force_y = FORCE_APPLIED / 3.0 * 2.0;
            }
            self.force_x += f64::from(self.x_dir) * FORCE_APPLIED / 3.0 * 2.0;
        }

        self.last_flap = now;
        // Only restart the cycle once the previous one is nearly done.
        if now - self.animation_start >= ANIMATION_STEP * (NUM_ANIMATIONS - 2) as f64 {
            self.animation_start = now;
            self.animation_frame = 0;
        }
        self.total_time = 0.0;
        debug!(combo, force_x = self.force_x, force_y = self.force_y, "Flap");
    }

    // ── Simulation ────────────────────────────────────────────────────────────

    /// Integrate motion up to `now`. The first call only records the time.
    pub fn update(&mut self, now: f64) {
        let Some(last) = self.last_time else {
            self.last_time = Some(now);
            return;
        };
        let dt = (now - last).max(0.0);

        self.score += dt * SCORE_RATE;
        self.total_time += dt;
        let t = self.total_time;

        if self.on_ground && self.force_y == 0.0 {
            let dx = self.force_x * t;
            if self.x_dir == 0 {
                self.force_x *= FRICTION;
                if self.force_x.abs() < FRICTION_SNAP {
                    self.force_x = 0.0;
                }
            }
            self.x = self.start_x + dx;
        } else {
            self.x = self.start_x + self.force_x * t;
            self.y = self.start_y + self.force_y * t + 0.5 * GRAVITY * t * t;
        }

        self.advance_animation(now);

        if self.y < DEATH_HEIGHT && self.balloons > 0 {
            info!(y = self.y, "Player fell out of the sky");
            self.balloons = 0;
        }

        self.last_time = Some(now);
        // Re-established by the collision pass if still standing on something.
        self.on_ground = false;
    }

    fn advance_animation(&mut self, now: f64) {
        let since = now - self.animation_start;
        if since < ANIMATION_STEP * NUM_ANIMATIONS as f64 {
            if since > ANIMATION_STEP * (self.animation_frame + 1) as f64 {
                self.animation_frame += 1;
                if self.animation_frame >= NUM_ANIMATIONS {
                    self.animation_frame = 0;
                }
            }
        } else {
            self.animation_frame = 0;
        }
    }

    // ── Collision responses ───────────────────────────────────────────────────

    /// Bounce off `target`. Landing on top of a groundable surface stands the
    /// player on it; every other impact pushes the player out and reflects
    /// the matching force component.
    pub fn do_bounce(&mut self, target: &Rect, groundable: bool) -> Side {
        let me = self.collision_rect();
        let side = classify_impact(&me, target);

        match side {
            Side::Top if groundable => {
                self.reset_origin();
                self.force_y = 0.0;
                self.force_x += RUN_FORCE / 5.0 * f64::from(self.x_dir);
                self.force_x = self.force_x.clamp(-RUN_FORCE, RUN_FORCE);
                self.on_ground = true;
                return side;
            }
            Side::Top => {
                if me.bottom() > target.top() {
                    self.y += me.bottom() - target.top();
                }
                self.force_y *= BOUNCE_DAMPING;
            }
            Side::Bottom => {
                if me.top() < target.bottom() {
                    self.y -= target.bottom() - me.top();
                }
                self.force_y *= BOUNCE_DAMPING;
            }
            Side::Left => {
                if me.right() > target.left() {
                    self.x -= me.right() - target.left();
                }
                self.force_x *= BOUNCE_DAMPING;
            }
            Side::Right => {
                if me.left() < target.right() {
                    self.x += target.right() - me.left();
                }
                self.force_x *= BOUNCE_DAMPING;
            }
        }

        self.reset_origin();
        debug!(?side, force_x = self.force_x, force_y = self.force_y, "Bounce");
        side
    }

    /// Take a hit from something at `by`. Ignored while invincible.
    pub fn do_hit(&mut self, by: &Rect, now: f64) -> bool {
        if self.is_invincible(now) {
            return false;
        }

        self.invincible_since = now;
        self.balloons = self.balloons.saturating_sub(1);
        self.facing = Facing::Left;
        self.do_bounce(by, false);
        info!(balloons = self.balloons, "Player hit");
        true
    }

    pub fn do_add_balloon(&mut self) -> bool {
        if self.balloons < MAX_BALLOONS {
            self.balloons += 1;
            self.facing = Facing::Left;
            info!(balloons = self.balloons, "Balloon collected");
            return true;
        }
        false
    }

    /// Post-mortem rise. Returns `false` once the player has left the top of
    /// the screen.
    pub fn do_death(&mut self, dt: f64) -> bool {
        self.y += DEATH_RISE_SPEED * dt.max(0.0);
        self.y <= HEIGHT + self.height
    }
}
