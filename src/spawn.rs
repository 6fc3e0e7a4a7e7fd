//! Procedural spawning of hazards and collectibles.
//!
//! The population target grows with survival time and has no cap.

use rand::Rng;
use tracing::debug;

use crate::assets::AssetTable;
use crate::entities::{Entity, EntityKind, HEIGHT};
use crate::scroll;

/// Spawn weights out of 50: stars 90%, whales 8%, balloons 2%.
const SPAWN_TABLE: [(EntityKind, u32); 3] = [
    (EntityKind::Star, 45),
    (EntityKind::Balloon, 1),
    (EntityKind::Whale, 4),
];

const BASE_POPULATION: usize = 5;
const GROWTH_PER_SECOND: f64 = 0.15;

/// Largest population target possible at `elapsed` seconds.
pub fn max_target(elapsed: f64) -> usize {
    BASE_POPULATION + (elapsed.max(0.0) * GROWTH_PER_SECOND).floor() as usize
}

/// Random population target in `[5, max_target(elapsed)]`.
pub fn target_count(elapsed: f64, rng: &mut impl Rng) -> usize {
    rng.gen_range(BASE_POPULATION..=max_target(elapsed))
}

/// Pick a kind from the spawn table.
pub fn pick_kind(rng: &mut impl Rng) -> EntityKind {
    let total: u32 = SPAWN_TABLE.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for (kind, weight) in SPAWN_TABLE {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    EntityKind::Star
}

/// Build one entity of `kind` just off the left edge.
pub fn make(kind: EntityKind, assets: &AssetTable, now: f64, rng: &mut impl Rng) -> Entity {
    match kind {
        EntityKind::Balloon => {
            let x = rng.gen_range(-10..=-5) as f64;
            let y = rng.gen_range(15..=150) as f64;
            scroll::balloon(assets, x, HEIGHT - y, now)
        }
        EntityKind::Whale => {
            let x = rng.gen_range(-200..=-150) as f64;
            let y = rng.gen_range(45..=(HEIGHT as i64 - 45)) as f64;
            scroll::whale(assets, x, y, now)
        }
        _ => {
            let x = rng.gen_range(-50..=-5) as i64;
            let y = rng.gen_range(15..=(HEIGHT as i64 - 45));
            let vert_speed = rng.gen_range(25..=100) as f64;
            let displacement = rng.gen_range(0..=(HEIGHT as i64 - y - 45)) as f64;
            let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            scroll::star(
                assets,
                x as f64,
                y as f64,
                vert_speed,
                displacement,
                direction,
                now,
            )
        }
    }
}

/// Top up `entities` to a freshly rolled target for `elapsed` seconds of play.
/// Returns how many were created.
pub fn add_random_objects(
    entities: &mut Vec<Entity>,
    elapsed: f64,
    assets: &AssetTable,
    now: f64,
    rng: &mut impl Rng,
) -> usize {
    let target = target_count(elapsed, rng);
    let mut created = 0;
    while entities.len() < target {
        let kind = pick_kind(rng);
        entities.push(make(kind, assets, now, rng));
        created += 1;
    }
    if created > 0 {
        debug!(created, target, total = entities.len(), "Spawned objects");
    }
    created
}
