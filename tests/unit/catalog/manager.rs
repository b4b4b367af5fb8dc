use super::*;
use crate::catalog::game::PLACEHOLDER_GAME_NAME;

const FIXTURE: &str = include_str!("../../data/regions.json");

fn loaded() -> GameManager {
    let gm = GameManager::new();
    gm.refresh_from_str(FIXTURE, None).unwrap();
    gm
}

#[test]
fn new_manager_only_has_placeholder() {
    let gm = GameManager::new();
    assert_eq!(gm.get_games(), vec![PLACEHOLDER_GAME_NAME.to_string()]);
    assert!(gm.get_game("skyline_racer").is_none());
}

#[test]
fn failed_refresh_keeps_previous_catalog() {
    let gm = loaded();
    let before = gm.get_games();

    let err = gm.refresh_from_str(r#"{"services": []}"#, None);
    assert!(err.is_err());
    assert_eq!(gm.get_games(), before);
    assert!(gm.get_game("skyline_racer").is_some());
}

#[test]
fn snapshots_survive_a_refresh() {
    let gm = loaded();
    let old = gm.snapshot();
    gm.refresh_from_str(
        r#"{"games": ["solo"], "solo": {"name_verbose": "Solo", "hud_scale": [1,1,0.25],
            "resolutions": ["1280x720"], "1280x720": []}}"#,
        None,
    )
    .unwrap();
    assert!(old.get("skyline_racer").is_some());
    assert!(gm.get_game("skyline_racer").is_none());
    assert!(gm.get_game("solo").is_some());
}

#[test]
fn acquisition_is_mutually_exclusive() {
    let gm = loaded();
    let game = gm.get_game("skyline_racer").unwrap();

    assert!(gm.acquire_game(&game, "a"));
    assert!(!gm.acquire_game(&game, "b"));
    assert_eq!(gm.holder("skyline_racer").as_deref(), Some("a"));

    assert!(gm.is_game_acquired(&game, "b"));
    assert!(!gm.is_game_acquired(&game, "a"));
    assert!(gm.is_name_acquired("skyline_racer", "b"));
}

#[test]
fn acquiring_twice_is_a_noop() {
    let gm = loaded();
    let game = gm.get_game("skyline_racer").unwrap();
    assert!(gm.acquire_game(&game, "a"));
    assert!(gm.acquire_game(&game, "a"));
    gm.release_game(&game, "a");
    assert!(gm.holder("skyline_racer").is_none());
}

#[test]
fn release_by_non_holder_is_ignored() {
    let gm = loaded();
    let game = gm.get_game("skyline_racer").unwrap();
    gm.acquire_game(&game, "a");
    gm.release_game(&game, "b");
    assert_eq!(gm.holder("skyline_racer").as_deref(), Some("a"));
}

#[test]
fn placeholder_is_never_acquired() {
    let gm = loaded();
    let placeholder = gm.get_game(PLACEHOLDER_GAME_NAME).unwrap();
    assert!(!gm.acquire_game(&placeholder, "a"));
    assert!(!gm.is_game_acquired(&placeholder, "b"));
    assert!(gm.holder(PLACEHOLDER_GAME_NAME).is_none());
}

#[test]
fn concurrent_acquire_has_single_winner() {
    let gm = Arc::new(loaded());
    let handles = (0..8)
        .map(|i| {
            let gm = Arc::clone(&gm);
            std::thread::spawn(move || {
                let game = gm.get_game("dungeon_tactics").unwrap();
                gm.acquire_game(&game, &format!("inst-{i}"))
            })
        })
        .collect::<Vec<_>>();
    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();
    assert_eq!(winners, 1);
}
