//! Player-versus-world collision dispatch and off-screen culling.
//!
//! Entity behaviour on contact is a plain table from `EntityKind` to a
//! `Response`, so every kind's outcome is visible in one place.

use tracing::debug;

use crate::entities::{Entity, EntityKind, HEIGHT, WIDTH};
use crate::geometry::Rect;
use crate::player::{Player, Side};

/// Left edge of the deletion zone past the right side of the screen.
pub const DELETE_ZONE_X: f64 = 1500.0;

/// Anything touching this rectangle is removed. It reaches far above and
/// below the screen so rising balloons are culled as well.
pub fn delete_zone() -> Rect {
    Rect::new(DELETE_ZONE_X, -4.0 * HEIGHT, 5.0, 9.0 * HEIGHT)
}

/// Left wall, right wall and ceiling. There is no floor.
pub fn static_world() -> Vec<Rect> {
    vec![
        Rect::new(-5.0, 0.0, 5.0, HEIGHT),
        Rect::new(WIDTH, 0.0, 5.0, HEIGHT),
        Rect::new(0.0, -5.0, WIDTH, 5.0),
    ]
}

// ── Dispatch table ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    /// Costs the player a balloon.
    Hit,
    /// Gives the player a balloon; the entity is consumed if accepted.
    AddBalloon,
    /// Solid surface, bounce without damage.
    Bounce,
    /// Scenery.
    Ignore,
}

pub fn response_for(kind: EntityKind) -> Response {
    match kind {
        EntityKind::Star | EntityKind::Whale => Response::Hit,
        EntityKind::Balloon => Response::AddBalloon,
        EntityKind::Platform => Response::Bounce,
        EntityKind::Water | EntityKind::Cloud => Response::Ignore,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityOutcome {
    Hit(EntityKind),
    Collected,
    Bounced(Side),
}

/// What happened during one collision pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub static_side: Option<Side>,
    pub movable_side: Option<Side>,
    pub entity: Option<EntityOutcome>,
}

// ── Collision pass ────────────────────────────────────────────────────────────

/// Resolve the player against static geometry, then movable geometry, then
/// dynamic entities in order. At most one static and one movable bounce per
/// call; the entity scan stops at the first entity whose response took
/// effect. A collected balloon is removed from `objects`.
pub fn check_collision(
    player: &mut Player,
    static_world: &[Rect],
    movable: &[Entity],
    objects: &mut Vec<Entity>,
    now: f64,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    let me = player.collision_rect();
    if let Some(wall) = static_world.iter().find(|r| me.intersects(r)) {
        report.static_side = Some(player.do_bounce(wall, true));
    }

    let me = player.collision_rect();
    if let Some(surface) = movable.iter().find(|e| me.intersects(&e.rect)) {
        report.movable_side = Some(player.do_bounce(&surface.rect, true));
    }

    let me = player.collision_rect();
    let mut consumed = None;
    for (i, object) in objects.iter().enumerate() {
        if !me.intersects(&object.rect) {
            continue;
        }
        let kind = object.kind();
        let outcome = match response_for(kind) {
            Response::Hit => player
                .do_hit(&object.rect, now)
                .then_some(EntityOutcome::Hit(kind)),
            Response::AddBalloon => player.do_add_balloon().then(|| {
                consumed = Some(i);
                EntityOutcome::Collected
            }),
            Response::Bounce => Some(EntityOutcome::Bounced(player.do_bounce(&object.rect, true))),
            Response::Ignore => None,
        };
        if outcome.is_some() {
            report.entity = outcome;
            break;
        }
    }

    if let Some(i) = consumed {
        objects.remove(i);
    }
    if report.entity.is_some() {
        debug!(outcome = ?report.entity, "Entity collision");
    }
    report
}

/// Drop every entity touching the deletion zone. Returns how many went.
pub fn cull(entities: &mut Vec<Entity>) -> usize {
    let zone = delete_zone();
    let before = entities.len();
    entities.retain(|e| !e.rect.intersects(&zone));
    before - entities.len()
}
