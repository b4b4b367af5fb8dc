use super::*;

const FIXTURE: &str = include_str!("../../data/regions.json");

#[test]
fn fixture_parses_with_placeholder_first() {
    let cat = Catalog::from_json_str(FIXTURE, None).unwrap();
    assert_eq!(
        cat.names(),
        &[
            PLACEHOLDER_GAME_NAME.to_string(),
            "skyline_racer".to_string(),
            "dungeon_tactics".to_string(),
        ]
    );
    assert!(cat.get(PLACEHOLDER_GAME_NAME).unwrap().disabled);

    let racer = cat.get("skyline_racer").unwrap();
    assert_eq!(racer.name_verbose, "Skyline Racer");
    assert_eq!(racer.hud_scale.min, 0.5);
    assert_eq!(racer.hud_scale.max, 1.5);
    assert_eq!(racer.hud_scale.step, 0.25);
    assert_eq!(racer.current_resolution, VideoResolution::new(1920, 1080));
    assert_eq!(racer.regions().len(), 3);
    assert_eq!(racer.regions()[1].alignment, Anchor::BottomRight);
    assert!(racer.regions()[2].hud_scale_locked);
    assert!(!racer.regions()[0].hud_scale_locked);
}

#[test]
fn every_resolution_gets_a_region_list() {
    let cat = Catalog::from_json_str(FIXTURE, None).unwrap();
    let dt = cat.get("dungeon_tactics").unwrap();
    assert_eq!(dt.resolutions.len(), 2);
    for res in &dt.resolutions {
        assert!(dt.regions_by_resolution.contains_key(res));
    }
    assert!(dt.regions_by_resolution[&VideoResolution::new(2560, 1080)].is_empty());
}

#[test]
fn name_suffix_marks_non_production() {
    let cat = Catalog::from_json_str(FIXTURE, Some(" (stg)")).unwrap();
    assert_eq!(
        cat.get("dungeon_tactics").unwrap().name_verbose,
        "Dungeon Tactics (stg)"
    );
}

#[test]
fn missing_games_array_is_rejected() {
    let err = Catalog::from_json_str(r#"{"services": []}"#, None).unwrap_err();
    assert!(err.to_string().contains("no games listed"));
}

#[test]
fn malformed_entries_abort_whole_document() {
    let cases = [
        // Game object missing.
        r#"{"games": ["a"]}"#,
        // Resolution array missing.
        r#"{"games": ["a"], "a": {"name_verbose": "A", "hud_scale": [1,1,0.25]}}"#,
        // Empty resolution list.
        r#"{"games": ["a"], "a": {"name_verbose": "A", "hud_scale": [1,1,0.25], "resolutions": []}}"#,
        // Regions array missing for listed resolution.
        r#"{"games": ["a"], "a": {"name_verbose": "A", "hud_scale": [1,1,0.25], "resolutions": ["1920x1080"]}}"#,
        // Bad hud_scale arity.
        r#"{"games": ["a"], "a": {"name_verbose": "A", "hud_scale": [1,1], "resolutions": ["1920x1080"], "1920x1080": []}}"#,
        // Unknown anchor.
        r#"{"games": ["a"], "a": {"name_verbose": "A", "hud_scale": [1,1,0.25], "resolutions": ["1920x1080"],
            "1920x1080": [{"game_state": "s", "region": "r", "alignment": "upper", "x": 0, "y": 0, "w": 1, "h": 1}]}}"#,
        // Region missing a coordinate.
        r#"{"games": ["a"], "a": {"name_verbose": "A", "hud_scale": [1,1,0.25], "resolutions": ["1920x1080"],
            "1920x1080": [{"game_state": "s", "region": "r", "alignment": "top", "x": 0, "y": 0, "w": 1}]}}"#,
        // Zero-size resolution.
        r#"{"games": ["a"], "a": {"name_verbose": "A", "hud_scale": [1,1,0.25], "resolutions": ["0x1080"], "0x1080": []}}"#,
    ];
    for case in cases {
        assert!(
            Catalog::from_json_str(case, None).is_err(),
            "expected failure for {case}"
        );
    }
}

#[test]
fn invalid_json_is_a_serde_error() {
    let err = Catalog::from_json_str("{not json", None).unwrap_err();
    assert!(matches!(err, HudError::Serde(_)));
}

#[test]
fn placeholder_keeps_catalog_non_empty() {
    let cat = Catalog::placeholder_only();
    assert_eq!(cat.len(), 1);
    assert!(!cat.is_empty());

    let cat = Catalog::from_json_str(FIXTURE, None).unwrap();
    assert_eq!(cat.len(), 3);
    assert!(!cat.is_empty());
}
