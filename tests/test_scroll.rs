use floatipop::assets::{AssetLoader, AssetTable};
use floatipop::entities::{Motion, WIDTH};
use floatipop::scroll::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn assets() -> AssetTable {
    AssetTable::load(&AssetLoader::builtin()).unwrap()
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── Scroll speed ──────────────────────────────────────────────────────────────

#[test]
fn default_scroll_speed() {
    let s = ScrollSpeed::new();
    assert_eq!(s.value(), INITIAL_SCROLL_SPEED);
    assert!(approx(s.drift(), WIDTH / INITIAL_SCROLL_SPEED));
}

#[test]
fn no_ramp_during_warm_up() {
    let mut s = ScrollSpeed::new();
    s.ramp(10.0, 1.0);
    s.ramp(RAMP_DELAY, 1.0);
    assert_eq!(s.value(), INITIAL_SCROLL_SPEED);
}

#[test]
fn ramp_is_proportional_to_dt() {
    let mut s = ScrollSpeed::new();
    s.ramp(RAMP_DELAY + 1.0, 2.0);
    assert!(approx(s.value(), INITIAL_SCROLL_SPEED - 2.0 * RAMP_RATE));
}

#[test]
fn ramp_never_breaches_floor() {
    let mut s = ScrollSpeed::new();
    let mut previous = s.value();
    for i in 0..500 {
        s.ramp(RAMP_DELAY + i as f64, 1.0);
        assert!(s.value() <= previous);
        assert!(s.value() >= MIN_SCROLL_SPEED);
        previous = s.value();
    }
    assert_eq!(s.value(), MIN_SCROLL_SPEED);
}

// ── Shared update contract ────────────────────────────────────────────────────

#[test]
fn first_update_changes_nothing() {
    let a = assets();
    let mut rng = seeded_rng();
    let mut e = platform(&a, 100.0, 200.0, 0.0);
    let before = e.rect;
    update(&mut e, 3.0, ScrollSpeed::new(), &mut rng);
    assert_eq!(e.rect, before);
    assert_eq!(e.last_time, Some(3.0));
}

#[test]
fn platform_drifts_at_scroll_rate() {
    let a = assets();
    let mut rng = seeded_rng();
    let mut e = platform(&a, 100.0, 200.0, 0.0);
    update(&mut e, 0.0, ScrollSpeed::new(), &mut rng);
    update(&mut e, 1.0, ScrollSpeed::new(), &mut rng);
    assert!(approx(e.rect.center_x(), 100.0 + WIDTH / INITIAL_SCROLL_SPEED));
    assert!(approx(e.rect.center_y(), 200.0));
}

// ── Variants ──────────────────────────────────────────────────────────────────

#[test]
fn water_bobs_within_amplitude() {
    let a = assets();
    let mut rng = seeded_rng();
    let mut e = water(&a, 100.0, 700.0, 0.3, 5.0, 0.0);
    for i in 0..50 {
        update(&mut e, i as f64 * 0.05, ScrollSpeed::new(), &mut rng);
        assert!((e.rect.center_y() - 700.0).abs() <= 5.0 + 1e-9);
    }
}

#[test]
fn water_wraps_to_the_left() {
    let a = assets();
    let mut rng = seeded_rng();
    let mut e = water(&a, WIDTH + 40.0, 700.0, 0.0, 5.0, 0.0);
    update(&mut e, 0.0, ScrollSpeed::new(), &mut rng);
    update(&mut e, 0.1, ScrollSpeed::new(), &mut rng);
    assert!(e.rect.center_x() < 0.0);
}

#[test]
fn cloud_reenters_with_random_offset() {
    let a = assets();
    let mut rng = seeded_rng();
    let mut e = cloud(&a, WIDTH + 100.0, 200.0, 0.0);
    update(&mut e, 0.0, ScrollSpeed::new(), &mut rng);
    update(&mut e, 0.1, ScrollSpeed::new(), &mut rng);

    let half = e.rect.w / 2.0;
    let cx = e.rect.center_x();
    assert!(cx <= -(half + 10.0) && cx >= -(half + 250.0));
}

#[test]
fn star_reverses_at_both_bounds() {
    let a = assets();
    let mut rng = seeded_rng();
    let mut e = star(&a, 0.0, 100.0, 100.0, 50.0, 1.0, 0.0);
    let direction = |e: &floatipop::entities::Entity| match e.motion {
        Motion::Star { direction, .. } => direction,
        _ => unreachable!(),
    };

    update(&mut e, 0.0, ScrollSpeed::new(), &mut rng);
    update(&mut e, 0.3, ScrollSpeed::new(), &mut rng);
    assert_eq!(direction(&e), 1.0);

    update(&mut e, 0.6, ScrollSpeed::new(), &mut rng);
    assert_eq!(direction(&e), -1.0);

    update(&mut e, 1.3, ScrollSpeed::new(), &mut rng);
    assert_eq!(direction(&e), 1.0);
}

#[test]
fn balloon_rises() {
    let a = assets();
    let mut rng = seeded_rng();
    let mut e = balloon(&a, 100.0, 600.0, 0.0);
    update(&mut e, 0.0, ScrollSpeed::new(), &mut rng);
    update(&mut e, 0.5, ScrollSpeed::new(), &mut rng);
    assert!(approx(e.rect.center_y(), 600.0 - 80.0));
}

#[test]
fn whale_outpaces_the_scroll() {
    let a = assets();
    let mut rng = seeded_rng();
    let mut e = whale(&a, 0.0, 300.0, 0.0);
    update(&mut e, 0.0, ScrollSpeed::new(), &mut rng);
    update(&mut e, 1.0, ScrollSpeed::new(), &mut rng);
    assert!(e.rect.center_x() > WIDTH / INITIAL_SCROLL_SPEED);
    assert!((e.rect.center_y() - 300.0).abs() <= 25.0 + 1e-9);
}

#[test]
fn faster_scroll_moves_entities_further() {
    let a = assets();
    let mut rng = seeded_rng();
    let mut slow = platform(&a, 0.0, 100.0, 0.0);
    let mut fast = platform(&a, 0.0, 100.0, 0.0);

    let mut ramped = ScrollSpeed::new();
    ramped.ramp(RAMP_DELAY + 1.0, 30.0);

    update_all(std::slice::from_mut(&mut slow), 0.0, ScrollSpeed::new(), &mut rng);
    update_all(std::slice::from_mut(&mut slow), 1.0, ScrollSpeed::new(), &mut rng);
    update_all(std::slice::from_mut(&mut fast), 0.0, ramped, &mut rng);
    update_all(std::slice::from_mut(&mut fast), 1.0, ramped, &mut rng);
    assert!(fast.rect.x > slow.rect.x);
}
