use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn empty_lookup_yields_defaults() {
    let config = CanvasConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config, CanvasConfig::default());
}

#[test]
fn defaults_validate() {
    assert!(CanvasConfig::default().validate().is_ok());
}

#[test]
fn overrides_are_applied() {
    let config = CanvasConfig::from_lookup(lookup_from(&[
        ("TILEBOARD_GRID_UNIT", "4"),
        ("TILEBOARD_CANVAS_WIDTH", "1024"),
        ("TILEBOARD_FOOTER_BAND_TOP", "700"),
        ("TILEBOARD_SCAN_STEP", " 3 "),
    ]))
    .unwrap();
    assert_eq!(config.grid_unit, 4);
    assert_eq!(config.bounds.width, 1024);
    assert_eq!(config.bounds.footer_band_top, 700);
    assert_eq!(config.scan.step, 3);
    assert_eq!(config.tile_width, DEFAULT_TILE_WIDTH);
}

#[test]
fn unparseable_value_is_rejected() {
    let err = CanvasConfig::from_lookup(lookup_from(&[("TILEBOARD_GRID_UNIT", "eight")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "TILEBOARD_GRID_UNIT", .. }));
}

#[test]
fn zero_grid_unit_is_rejected() {
    let err = CanvasConfig::from_lookup(lookup_from(&[("TILEBOARD_GRID_UNIT", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "TILEBOARD_GRID_UNIT", .. }));
}

#[test]
fn zero_scan_step_is_rejected() {
    let err = CanvasConfig::from_lookup(lookup_from(&[("TILEBOARD_SCAN_STEP", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "TILEBOARD_SCAN_STEP", .. }));
}

#[test]
fn negative_tolerance_is_rejected() {
    let config = CanvasConfig { tolerance_per_mille: -1, ..CanvasConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn footer_above_header_is_rejected() {
    let mut config = CanvasConfig::default();
    config.bounds.footer_band_top = config.bounds.header_band_height - 1;
    assert!(config.validate().is_err());
}

#[test]
fn error_code_is_stable() {
    use crate::error::ErrorCode;
    let err = ConfigError::Invalid { var: "X", value: "y".into() };
    assert_eq!(err.error_code(), "E_CONFIG_INVALID");
}
