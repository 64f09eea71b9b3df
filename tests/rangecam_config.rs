use std::sync::Mutex;

use tempfile::NamedTempFile;

use rangecam::config::{ConfigError, RangecamConfig};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "RANGECAM_CONFIG",
        "RANGECAM_SOURCE_URL",
        "RANGECAM_FOCAL_LENGTH",
        "RANGECAM_CONFIDENCE_THRESHOLD",
        "RANGECAM_LOG_PATH",
        "RANGECAM_MAX_FRAMES",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "source": {
            "url": "stub://bench_rig",
            "width": 800,
            "height": 600,
            "max_frames": 250
        },
        "focal_length": 720.0,
        "confidence_threshold": 0.5,
        "log_path": "bench_log.csv",
        "heights": {
            "forklift": 2.1,
            "person": 1.8
        }
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("RANGECAM_CONFIG", file.path());
    std::env::set_var("RANGECAM_FOCAL_LENGTH", "650");
    std::env::set_var("RANGECAM_MAX_FRAMES", "100");

    let cfg = RangecamConfig::load().expect("load config");

    assert_eq!(cfg.source.url, "stub://bench_rig");
    assert_eq!(cfg.source.width, 800);
    assert_eq!(cfg.source.height, 600);
    assert_eq!(cfg.source.max_frames, Some(100));
    assert_eq!(cfg.focal_length, 650.0);
    assert_eq!(cfg.confidence_threshold, 0.5);
    assert_eq!(cfg.log_path.to_str().unwrap(), "bench_log.csv");
    // File entries extend and override the built-in table.
    assert_eq!(cfg.heights.lookup("forklift"), Some(2.1));
    assert_eq!(cfg.heights.lookup("person"), Some(1.8));
    assert_eq!(cfg.heights.lookup("cup"), Some(0.1));

    clear_env();
}

#[test]
fn defaults_apply_without_config_file() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = RangecamConfig::load().expect("load config");

    assert_eq!(cfg.source.url, "stub://camera0");
    assert_eq!(cfg.focal_length, 600.0);
    assert_eq!(cfg.confidence_threshold, 0.4);
    assert_eq!(cfg.log_path.to_str().unwrap(), "object_tracking_log.csv");
    assert_eq!(cfg.heights.lookup("person"), Some(1.7));

    clear_env();
}

#[test]
fn non_positive_focal_length_is_fatal() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("RANGECAM_FOCAL_LENGTH", "-600");
    let err = RangecamConfig::load().expect_err("focal length must be rejected");
    let config_err = err.downcast::<ConfigError>().expect("typed config error");
    assert_eq!(
        config_err,
        ConfigError::InvalidFocalLength {
            focal_length: -600.0
        }
    );

    clear_env();
}

#[test]
fn out_of_range_confidence_threshold_is_fatal() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("RANGECAM_CONFIDENCE_THRESHOLD", "1.5");
    assert!(RangecamConfig::load().is_err());

    clear_env();
}

#[test]
fn non_positive_height_in_config_file_is_fatal() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{ "heights": { "pole": 0.0 } }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");
    std::env::set_var("RANGECAM_CONFIG", file.path());

    let err = RangecamConfig::load().expect_err("zero height must be rejected");
    let config_err = err.downcast::<ConfigError>().expect("typed config error");
    assert_eq!(
        config_err,
        ConfigError::InvalidHeight {
            label: "pole".to_string(),
            height_m: 0.0
        }
    );

    clear_env();
}
