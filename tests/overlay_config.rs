use std::sync::Mutex;

use tempfile::NamedTempFile;

use detection_overlay::config::OverlayConfig;
use detection_overlay::{BoundingBox, Detection, LabelStyle};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "OVERLAY_CONFIG",
        "OVERLAY_CONFIDENCE_THRESHOLD",
        "OVERLAY_NMS_THRESHOLD",
        "OVERLAY_CLASS_NAMES",
        "OVERLAY_LABEL_HEIGHT",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_without_file_or_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = OverlayConfig::load().expect("load config");
    assert_eq!(cfg, OverlayConfig::default());
    assert_eq!(cfg.thresholds.confidence, 0.25);
    assert_eq!(cfg.thresholds.nms, 0.45);
    assert_eq!(cfg.label, LabelStyle::default());
    assert!(cfg.class_names.is_none());
}

#[test]
fn loads_json_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "class_names": "models/coco.names",
        "thresholds": { "confidence": 0.4 },
        "label": { "height": 36.0, "gap": 6.0 },
        "text": { "class_name_advance": 11.0 }
    }"#;
    std::fs::write(file.path(), json).expect("write config");

    std::env::set_var("OVERLAY_CONFIG", file.path());
    std::env::set_var("OVERLAY_NMS_THRESHOLD", "0.6");
    std::env::set_var("OVERLAY_LABEL_HEIGHT", "40");

    let cfg = OverlayConfig::load().expect("load config");
    assert_eq!(cfg.class_names.unwrap().to_str(), Some("models/coco.names"));
    assert_eq!(cfg.thresholds.confidence, 0.4);
    assert_eq!(cfg.thresholds.nms, 0.6);
    assert_eq!(cfg.label.height, 40.0);
    assert_eq!(cfg.label.gap, 6.0);
    assert_eq!(cfg.label.left_padding, 15.0);
    assert_eq!(cfg.text.class_name_advance, 11.0);
    assert_eq!(cfg.text.confidence_advance, 13.0);

    clear_env();
}

#[test]
fn loads_toml_file_by_extension() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    let toml = r#"
        [label]
        left_padding = 8.0
        right_padding = 8.0
        text_spacing = 6.0

        [thresholds]
        confidence = 0.5
    "#;
    std::fs::write(file.path(), toml).expect("write config");

    let cfg = OverlayConfig::load_from(Some(file.path())).expect("load config");
    assert_eq!(cfg.label.left_padding, 8.0);
    assert_eq!(cfg.label.text_spacing, 6.0);
    assert_eq!(cfg.thresholds.confidence, 0.5);

    let det = Detection::new(0, "", 0.0, BoundingBox::new(100.0, 100.0, 10.0, 10.0));
    let items = cfg.engine().layout(&[det], 640, 480, 640.0, 480.0);
    // empty name, "0%" at 13px per char, plus padding and spacing
    assert_eq!(items[0].label_rect.width(), 8.0 + 0.0 + 6.0 + 26.0 + 8.0);
}

#[test]
fn rejects_out_of_range_values() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("OVERLAY_CONFIDENCE_THRESHOLD", "1.5");
    assert!(OverlayConfig::load().is_err());

    std::env::set_var("OVERLAY_CONFIDENCE_THRESHOLD", "abc");
    assert!(OverlayConfig::load().is_err());
    clear_env();

    std::env::set_var("OVERLAY_LABEL_HEIGHT", "-2");
    assert!(OverlayConfig::load().is_err());
    clear_env();

    let file = NamedTempFile::new().expect("temp config");
    std::fs::write(file.path(), "{ not json").expect("write config");
    assert!(OverlayConfig::load_from(Some(file.path())).is_err());
}
