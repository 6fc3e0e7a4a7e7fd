use std::fs;

use floatipop::highscore::*;
use tempfile::tempdir;

fn full_list() -> HighScoreList {
    HighScoreList::from_scores((1..=20).map(|i| i * 100).collect())
}

// ── add_score ─────────────────────────────────────────────────────────────────

#[test]
fn add_to_empty_list_truncates() {
    let mut list = HighScoreList::new();
    assert_eq!(list.add_score(123.9), Some(123));
    assert_eq!(list.scores(), &[123]);
    assert_eq!(list.current_score(), Some(123));
    assert_eq!(list.current_index(), Some(0));
}

#[test]
fn short_list_always_grows_and_stays_sorted() {
    let mut list = HighScoreList::new();
    for s in [50.0, 300.0, 10.0, 300.0, 75.0] {
        list.add_score(s);
    }
    assert_eq!(list.scores(), &[300, 300, 75, 50, 10]);
    assert_eq!(list.current_index(), Some(2));
}

#[test]
fn full_list_ignores_low_score() {
    let mut list = full_list();
    let before = list.scores().to_vec();
    list.add_score(50.0);
    assert_eq!(list.scores(), before.as_slice());
    assert_eq!(list.current_score(), Some(50));
    assert_eq!(list.current_index(), None);
}

#[test]
fn full_list_replaces_minimum() {
    let mut list = full_list();
    list.add_score(5000.0);
    assert_eq!(list.scores().len(), MAX_SCORES);
    assert_eq!(list.scores()[0], 5000);
    assert!(!list.scores().contains(&100));
    assert_eq!(list.current_index(), Some(0));
}

#[test]
fn full_list_with_minimum_ten() {
    let mut list = HighScoreList::from_scores((10..30).collect());
    assert_eq!(list.scores().len(), 20);

    list.add_score(5.0);
    assert_eq!(*list.scores().last().unwrap(), 10);

    list.add_score(15.0);
    assert!(!list.scores().contains(&10));
    assert_eq!(list.scores().iter().filter(|&&s| s == 15).count(), 2);
    assert!(list.scores().windows(2).all(|w| w[0] >= w[1]));

    let mut empty = HighScoreList::new();
    empty.add_score(42.0);
    assert_eq!(empty.scores(), &[42]);
}

#[test]
fn invalid_scores_are_discarded() {
    let mut list = HighScoreList::from_scores(vec![10]);
    assert_eq!(list.add_score(-1.0), None);
    assert_eq!(list.add_score(f64::NAN), None);
    assert_eq!(list.add_score(f64::INFINITY), None);
    assert_eq!(list.scores(), &[10]);
    assert_eq!(list.current_score(), None);
}

#[test]
fn from_scores_keeps_best_twenty() {
    let list = HighScoreList::from_scores((1..=30).collect());
    assert_eq!(list.scores().len(), MAX_SCORES);
    assert_eq!(list.scores()[0], 30);
    assert_eq!(*list.scores().last().unwrap(), 11);
}

// ── Parsing ───────────────────────────────────────────────────────────────────

#[test]
fn parse_skips_malformed_lines() {
    let list = parse_scores("10\nabc\n\n30\n-5\n 20 \n");
    assert_eq!(list.scores(), &[30, 20, 10]);
    assert_eq!(list.current_score(), None);
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[test]
fn store_round_trip() {
    let dir = tempdir().unwrap();
    let store = HighScoreStore::new(dir.path());
    let mut list = HighScoreList::new();
    list.add_score(42.0);
    list.add_score(7.0);

    store.save(&list).unwrap();
    assert!(store.path().exists());
    assert!(!store.path().with_extension("txt.tmp").exists());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "42\n7\n");

    let loaded = store.load();
    assert_eq!(loaded.scores(), &[42, 7]);
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempdir().unwrap();
    let store = HighScoreStore::new(dir.path());
    assert!(store.load().is_empty());
}

#[test]
fn empty_list_is_not_written() {
    let dir = tempdir().unwrap();
    let store = HighScoreStore::new(dir.path());
    store.save(&HighScoreList::new()).unwrap();
    assert!(!store.path().exists());
}

#[test]
fn save_creates_missing_directory() {
    let dir = tempdir().unwrap();
    let store = HighScoreStore::new(dir.path().join("nested").join("scores"));
    store.save(&HighScoreList::from_scores(vec![1, 2, 3])).unwrap();
    assert_eq!(store.load().scores(), &[3, 2, 1]);
}

#[test]
fn load_tolerates_garbage_file() {
    let dir = tempdir().unwrap();
    let store = HighScoreStore::new(dir.path());
    fs::write(store.path(), "not a score\n99\n").unwrap();
    assert_eq!(store.load().scores(), &[99]);
}
