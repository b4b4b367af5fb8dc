use super::*;

#[test]
fn empty_document_uses_defaults() {
    let s = Settings::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.diagnostics_interval(), Duration::from_secs(10));
    assert_eq!(s.coverage_threshold_pct, 98.0);
}

#[test]
fn fields_override_defaults() {
    let s = Settings::from_reader(
        r#"{
            "deployment": "stg",
            "config_root": "/var/lib/hudguard",
            "coverage_threshold_pct": 90,
            "extra_main_video_sources": ["ndi_source"],
            "debug_sources": true,
            "service": {"name_prefix": "Acme"}
        }"#
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(s.deployment, Deployment::Stg);
    assert_eq!(
        s.paths().dir(),
        PathBuf::from("/var/lib/hudguard").join("stg")
    );
    assert_eq!(s.service.name_prefix, "Acme");
    assert_eq!(s.service.host_suffix, ServiceMatch::default().host_suffix);

    let opts = s.validator_opts();
    assert_eq!(opts.coverage_threshold_pct, 90.0);
    assert!(opts.debug_sources);
    assert!(opts.main_video_sources.contains("ndi_source"));
    assert!(opts.main_video_sources.contains("game_capture"));
}

#[test]
fn out_of_range_values_are_rejected() {
    let err = Settings::from_reader(r#"{"coverage_threshold_pct": 150}"#.as_bytes()).unwrap_err();
    assert!(matches!(err, HudError::Validation(_)));
    assert!(Settings::from_reader(r#"{"diagnostics_interval_secs": 0}"#.as_bytes()).is_err());
    assert!(matches!(
        Settings::from_reader(r#"{"deployment": "qa"}"#.as_bytes()),
        Err(HudError::Serde(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Settings::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, HudError::Io(_)));
}
