use super::*;
use crate::catalog::game::PLACEHOLDER_GAME_NAME;
use std::path::Path;
use std::time::Duration;

const REGIONS: &str = include_str!("../../data/regions.json");
const SERVICES: &str = include_str!("../../data/services.json");

fn write_docs(dir: &Path, services: &str, regions: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("services.json"), services).unwrap();
    std::fs::write(dir.join("regions.json"), regions).unwrap();
}

fn touch(path: &Path, t: SystemTime) {
    let f = std::fs::File::options().write(true).open(path).unwrap();
    f.set_modified(t).unwrap();
}

#[test]
fn first_refresh_reloads_then_reports_unchanged() {
    let tmp = tempfile::tempdir().unwrap();
    write_docs(tmp.path(), SERVICES, REGIONS);
    let gm = GameManager::new();
    let mut r = ConfigRefresher::new(DeploymentPaths::new(tmp.path(), Deployment::Prd));

    assert_eq!(r.refresh(&gm).unwrap(), RefreshOutcome::Reloaded);
    assert_eq!(gm.get_games().len(), 3);
    assert_eq!(
        gm.get_game("skyline_racer").unwrap().name_verbose,
        "Skyline Racer"
    );
    assert_eq!(r.refresh(&gm).unwrap(), RefreshOutcome::Unchanged);
}

#[test]
fn modified_catalog_is_reloaded() {
    let tmp = tempfile::tempdir().unwrap();
    write_docs(tmp.path(), SERVICES, REGIONS);
    let regions = tmp.path().join("regions.json");
    let gm = GameManager::new();
    let mut r = ConfigRefresher::new(DeploymentPaths::new(tmp.path(), Deployment::Prd));
    r.refresh(&gm).unwrap();

    std::fs::write(
        &regions,
        r#"{"games": ["solo"], "solo": {"name_verbose": "Solo", "hud_scale": [1,1,0.25],
            "resolutions": ["1280x720"], "1280x720": []}}"#,
    )
    .unwrap();
    touch(&regions, SystemTime::now() + Duration::from_secs(60));

    assert_eq!(r.refresh(&gm).unwrap(), RefreshOutcome::Reloaded);
    assert!(gm.get_game("solo").is_some());
    assert!(gm.get_game("skyline_racer").is_none());
}

#[test]
fn missing_services_array_keeps_previous_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    write_docs(tmp.path(), SERVICES, REGIONS);
    let gm = GameManager::new();
    let mut r = ConfigRefresher::new(DeploymentPaths::new(tmp.path(), Deployment::Prd));
    r.refresh(&gm).unwrap();
    let before = gm.get_games();

    std::fs::write(tmp.path().join("services.json"), r#"{"providers": []}"#).unwrap();
    touch(
        &tmp.path().join("regions.json"),
        SystemTime::now() + Duration::from_secs(60),
    );

    assert!(r.refresh(&gm).is_err());
    assert_eq!(gm.get_games(), before);
}

#[test]
fn malformed_catalog_keeps_previous_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    write_docs(tmp.path(), SERVICES, REGIONS);
    let gm = GameManager::new();
    let mut r = ConfigRefresher::new(DeploymentPaths::new(tmp.path(), Deployment::Prd));
    r.refresh(&gm).unwrap();

    let regions = tmp.path().join("regions.json");
    std::fs::write(&regions, r#"{"games": ["broken"]}"#).unwrap();
    touch(&regions, SystemTime::now() + Duration::from_secs(60));

    assert!(r.refresh(&gm).is_err());
    assert!(gm.get_game("skyline_racer").is_some());
}

#[test]
fn non_production_reads_subdirectory_and_suffixes_names() {
    let tmp = tempfile::tempdir().unwrap();
    write_docs(&tmp.path().join("stg"), SERVICES, REGIONS);
    let gm = GameManager::new();
    let mut r = ConfigRefresher::new(DeploymentPaths::new(tmp.path(), Deployment::Prd));

    // Nothing at the production location.
    assert!(matches!(r.refresh(&gm), Err(HudError::Io(_))));
    assert_eq!(gm.get_games(), vec![PLACEHOLDER_GAME_NAME.to_string()]);

    r.set_deployment(Deployment::Stg);
    assert_eq!(r.refresh(&gm).unwrap(), RefreshOutcome::Reloaded);
    assert_eq!(
        gm.get_game("dungeon_tactics").unwrap().name_verbose,
        "Dungeon Tactics (stg)"
    );
}
