use super::*;
use crate::scene::params::JitterMode;

#[test]
fn defaults_match_the_reference_sketch() {
    let c = RenderConfig::default();
    assert_eq!((c.buffer.width, c.buffer.height), (2000, 2000));
    assert_eq!(c.scheduler_opts(), SchedulerOpts::default());
    assert!(c.variant.dual_buffer);
    assert!(c.auto_export);
    c.validate().unwrap();
}

#[test]
fn partial_json_fills_in_defaults() {
    let json = r#"{ "buffer": { "width": 640, "height": 480 }, "variant": { "jitter": "mirrored", "scatter": true } }"#;
    let c = RenderConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!((c.buffer.width, c.buffer.height), (640, 480));
    assert_eq!(c.beam_iterations, 90);
    assert_eq!(c.variant.jitter, JitterMode::Mirrored);
    assert!(c.variant.scatter);
    assert!(c.variant.dual_buffer);
}

#[test]
fn unknown_fields_and_bad_json_are_config_errors() {
    let err = RenderConfig::from_reader(r#"{ "fps": 30 }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, StarbeamsError::Config(_)));
    let err = RenderConfig::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, StarbeamsError::Config(_)));
}

#[test]
fn missing_file_is_a_config_error() {
    let err = RenderConfig::from_path("target/does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("exist.json"));
}

#[test]
fn validate_rejects_empty_sizes_and_budgets() {
    let mut c = RenderConfig::default();
    c.visible.width = 0;
    assert!(c.validate().is_err());

    let mut c = RenderConfig::default();
    c.buffer.height = 70_000;
    assert!(c.validate().is_err());

    let c = RenderConfig {
        beam_iterations: 0,
        ..RenderConfig::default()
    };
    assert!(matches!(c.validate(), Err(StarbeamsError::Config(_))));
}
