//! Plain data shared by the simulation and the renderer.

use crate::geometry::Rect;

/// Logical world width in world units.
pub const WIDTH: f64 = 1024.0;
/// Logical world height in world units.
pub const HEIGHT: f64 = 768.0;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Which logical keys are held down this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keys {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub confirm: bool,
    pub cancel: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

// ── Scrolling entities ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Star,
    Balloon,
    Whale,
    Water,
    Cloud,
    Platform,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Star,
        EntityKind::Balloon,
        EntityKind::Whale,
        EntityKind::Water,
        EntityKind::Cloud,
        EntityKind::Platform,
    ];

    /// Name of the sprite drawn for this kind.
    pub fn asset_name(&self) -> &'static str {
        match self {
            EntityKind::Star => "star",
            EntityKind::Balloon => "balloon",
            EntityKind::Whale => "whale",
            EntityKind::Water => "water",
            EntityKind::Cloud => "cloud",
            EntityKind::Platform => "platform",
        }
    }
}

/// Variant-specific motion state layered on top of the shared scroll drift.
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    /// Bobs vertically around `start_y` and wraps at the right edge.
    Water {
        start_y: f64,
        wave_offset: f64,
        wave_speed: f64,
    },
    /// Wraps at the right edge with a random re-entry offset.
    Cloud,
    /// Bounces between `start_y` and `start_y + displacement`.
    /// `direction` is +1.0 (down the screen) or -1.0 (up).
    Star {
        start_y: f64,
        vert_speed: f64,
        displacement: f64,
        direction: f64,
    },
    /// Rises at `vert_speed` while swaying around `initial_x + offset_x`.
    Balloon {
        initial_x: f64,
        offset_x: f64,
        vert_speed: f64,
    },
    /// Drifts `swim_speed` times faster than the scroll with a sine bob.
    Whale { start_y: f64, swim_speed: f64 },
    /// Solid surface the player can stand on.
    Platform,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub rect: Rect,
    pub motion: Motion,
    /// Timestamp the entity was constructed at (seconds).
    pub created_at: f64,
    /// Last timestamp seen by `update`; `None` until the first update.
    pub last_time: Option<f64>,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self.motion {
            Motion::Water { .. } => EntityKind::Water,
            Motion::Cloud => EntityKind::Cloud,
            Motion::Star { .. } => EntityKind::Star,
            Motion::Balloon { .. } => EntityKind::Balloon,
            Motion::Whale { .. } => EntityKind::Whale,
            Motion::Platform => EntityKind::Platform,
        }
    }
}
