use floatipop::assets::{AssetLoader, AssetTable};
use floatipop::collision::*;
use floatipop::entities::{EntityKind, HEIGHT};
use floatipop::geometry::Rect;
use floatipop::player::{Player, Side, START_X, START_Y};
use floatipop::scroll;

fn assets() -> AssetTable {
    AssetTable::load(&AssetLoader::builtin()).unwrap()
}

fn player(assets: &AssetTable) -> Player {
    Player::new(assets.player_size(), 0.0)
}

/// Screen-space centre of a freshly spawned player.
fn player_center() -> (f64, f64) {
    (START_X, HEIGHT - START_Y)
}

fn star_on_player(assets: &AssetTable) -> floatipop::entities::Entity {
    let (cx, cy) = player_center();
    scroll::star(assets, cx - 16.0, cy - 16.0, 50.0, 20.0, 1.0, 0.0)
}

fn balloon_on_player(assets: &AssetTable) -> floatipop::entities::Entity {
    let (cx, cy) = player_center();
    scroll::balloon(assets, cx, cy, 0.0)
}

fn far_away() -> Rect {
    Rect::new(0.0, 0.0, 10.0, 10.0)
}

// ── Dispatch table ────────────────────────────────────────────────────────────

#[test]
fn response_table_covers_every_kind() {
    assert_eq!(response_for(EntityKind::Star), Response::Hit);
    assert_eq!(response_for(EntityKind::Whale), Response::Hit);
    assert_eq!(response_for(EntityKind::Balloon), Response::AddBalloon);
    assert_eq!(response_for(EntityKind::Platform), Response::Bounce);
    assert_eq!(response_for(EntityKind::Water), Response::Ignore);
    assert_eq!(response_for(EntityKind::Cloud), Response::Ignore);
}

// ── Entity collisions ─────────────────────────────────────────────────────────

#[test]
fn star_costs_a_balloon_and_stays() {
    let a = assets();
    let mut p = player(&a);
    let mut objects = vec![star_on_player(&a)];

    let report = check_collision(&mut p, &static_world(), &[], &mut objects, 3.0);
    assert_eq!(report.entity, Some(EntityOutcome::Hit(EntityKind::Star)));
    assert_eq!(p.balloons(), 2);
    assert_eq!(objects.len(), 1);
}

#[test]
fn star_ignored_while_invincible() {
    let a = assets();
    let mut p = player(&a);
    let mut objects = vec![star_on_player(&a)];

    let report = check_collision(&mut p, &static_world(), &[], &mut objects, 1.0);
    assert_eq!(report.entity, None);
    assert_eq!(p.balloons(), 3);
}

#[test]
fn last_balloon_lost_to_star_kills() {
    let a = assets();
    let mut p = player(&a);
    p.do_hit(&far_away(), 3.0);
    p.do_hit(&far_away(), 6.0);
    assert_eq!(p.balloons(), 1);

    // Bounces from the earlier hits moved the player; put it back.
    p.place_at(START_X, START_Y);
    let mut objects = vec![star_on_player(&a)];
    check_collision(&mut p, &static_world(), &[], &mut objects, 9.0);
    assert_eq!(p.balloons(), 0);
    assert!(!p.is_alive());
}

#[test]
fn balloon_collected_below_max() {
    let a = assets();
    let mut p = player(&a);
    p.do_hit(&far_away(), 3.0);
    p.place_at(START_X, START_Y);
    assert_eq!(p.balloons(), 2);

    let mut objects = vec![balloon_on_player(&a)];
    let report = check_collision(&mut p, &static_world(), &[], &mut objects, 4.0);
    assert_eq!(report.entity, Some(EntityOutcome::Collected));
    assert_eq!(p.balloons(), 3);
    assert!(objects.is_empty());
}

#[test]
fn balloon_left_alone_at_max() {
    let a = assets();
    let mut p = player(&a);
    let mut objects = vec![balloon_on_player(&a)];

    let report = check_collision(&mut p, &static_world(), &[], &mut objects, 4.0);
    assert_eq!(report.entity, None);
    assert_eq!(p.balloons(), 3);
    assert_eq!(objects.len(), 1);
}

#[test]
fn first_effective_entity_wins() {
    let a = assets();
    let mut p = player(&a);
    let mut objects = vec![star_on_player(&a), balloon_on_player(&a)];

    let report = check_collision(&mut p, &static_world(), &[], &mut objects, 3.0);
    assert_eq!(report.entity, Some(EntityOutcome::Hit(EntityKind::Star)));
    assert_eq!(p.balloons(), 2);
    assert_eq!(objects.len(), 2);
}

// ── Geometry collisions ───────────────────────────────────────────────────────

#[test]
fn landing_on_movable_platform() {
    let a = assets();
    let mut p = player(&a);
    let (cx, cy) = player_center();
    let platform = scroll::platform(&a, cx, cy + 32.0, 0.0);

    let report = check_collision(&mut p, &static_world(), &[platform], &mut Vec::new(), 1.0);
    assert_eq!(report.movable_side, Some(Side::Top));
    assert!(p.on_ground());
    assert_eq!(p.force().1, 0.0);
}

#[test]
fn left_wall_pushes_player_back() {
    let a = assets();
    let mut p = player(&a);
    p.place_at(10.0, HEIGHT - 384.0);

    let report = check_collision(&mut p, &static_world(), &[], &mut Vec::new(), 1.0);
    assert_eq!(report.static_side, Some(Side::Right));
    assert!(p.collision_rect().left() > -1e-9);
}

#[test]
fn open_sky_reports_nothing() {
    let a = assets();
    let mut p = player(&a);
    let report = check_collision(&mut p, &static_world(), &[], &mut Vec::new(), 1.0);
    assert_eq!(report, CollisionReport::default());
}

// ── Culling ───────────────────────────────────────────────────────────────────

#[test]
fn cull_removes_entities_past_the_right_edge() {
    let a = assets();
    let mut entities = vec![
        scroll::star(&a, 100.0, 100.0, 50.0, 20.0, 1.0, 0.0),
        scroll::star(&a, DELETE_ZONE_X - 10.0, 100.0, 50.0, 20.0, 1.0, 0.0),
        scroll::balloon(&a, DELETE_ZONE_X, -1000.0, 0.0),
    ];

    assert_eq!(cull(&mut entities), 2);
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].rect.x, 100.0);
}

#[test]
fn cull_keeps_on_screen_entities() {
    let a = assets();
    let mut entities = vec![scroll::whale(&a, 500.0, 300.0, 0.0)];
    assert_eq!(cull(&mut entities), 0);
    assert_eq!(entities.len(), 1);
}
