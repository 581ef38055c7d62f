use std::path::Path;

use boomplot::{BoomPlotConfig, ConfigError, FeedMode};

#[test]
fn empty_json_gives_defaults() {
    let cfg = BoomPlotConfig::from_json("{}", Path::new("cfg.json")).unwrap();
    assert_eq!(cfg.mode, FeedMode::Synthetic);
    assert_eq!(cfg.buffer_capacity, 300);
    assert_eq!(cfg.tick_period().as_millis(), 50);
    assert_eq!(cfg.loudness.threshold, 1.0);
    assert_eq!(cfg.near_field.optimum_scale, 0.8);
    assert_eq!(cfg.profiles.mach.target, 1.6);
}

#[test]
fn partial_json_overrides_fields() {
    let text = r#"{ "mode": "replay", "max_points": 50, "seed": 7, "loudness": { "floor": 0.5 } }"#;
    let cfg = BoomPlotConfig::from_json(text, Path::new("cfg.json")).unwrap();
    assert_eq!(cfg.mode, FeedMode::Replay);
    assert_eq!(cfg.max_points, 50);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.loudness.floor, 0.5);
    assert_eq!(cfg.loudness.baseline.coefficient, 83.0);
}

#[test]
fn invalid_values_are_rejected() {
    let p = Path::new("cfg.json");
    assert!(matches!(
        BoomPlotConfig::from_json(r#"{"buffer_capacity": 0}"#, p),
        Err(ConfigError::ZeroCapacity)
    ));
    assert!(matches!(
        BoomPlotConfig::from_json(r#"{"max_points": 1}"#, p),
        Err(ConfigError::WindowTooSmall(1))
    ));
    assert!(matches!(
        BoomPlotConfig::from_json(r#"{"tick_period_ms": 0}"#, p),
        Err(ConfigError::ZeroTickPeriod)
    ));
}

#[test]
fn malformed_json_names_file() {
    let err = BoomPlotConfig::from_json("{ mode: ", Path::new("broken.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Json { .. }));
    assert!(err.to_string().contains("broken.json"));
}
