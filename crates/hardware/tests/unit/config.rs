//! Configuration Tests.
//!
//! Defaults, partial JSON documents, policy selectors, and the width contract.

use std::io::Write;

use pipesim_core::Pipeline;
use pipesim_core::common::{ConfigError, SimError};
use pipesim_core::config::{BranchPolicy, Config};
use pipesim_core::trace::VecTrace;
use rstest::rstest;

#[test]
fn defaults_describe_scalar_pipeline_without_forwarding() {
    let cfg = Config::default();
    assert_eq!(cfg.pipeline.width, 1);
    assert!(!cfg.pipeline.exe_forwarding);
    assert!(!cfg.pipeline.mem_forwarding);
    assert_eq!(cfg.pipeline.branch_predictor, BranchPolicy::None);
    assert!(!cfg.general.trace_pipeline);
    assert_eq!(cfg.general.max_cycles, None);
    assert!(cfg.validate().is_ok());
}

#[test]
fn empty_document_is_all_defaults() {
    let cfg = Config::from_json_str("{}").unwrap();
    assert_eq!(cfg.pipeline.width, 1);
    assert_eq!(cfg.pipeline.branch_predictor, BranchPolicy::None);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let cfg = Config::from_json_str(
        r#"{ "pipeline": { "width": 4, "exe_forwarding": true }, "general": { "max_cycles": 500 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.pipeline.width, 4);
    assert!(cfg.pipeline.exe_forwarding);
    assert!(!cfg.pipeline.mem_forwarding);
    assert!(!cfg.pipeline.forwarding_enabled());
    assert_eq!(cfg.general.max_cycles, Some(500));
}

#[rstest]
#[case("\"None\"", BranchPolicy::None)]
#[case("\"AlwaysTaken\"", BranchPolicy::AlwaysTaken)]
#[case("\"GShare\"", BranchPolicy::GShare)]
#[case("\"Gshare\"", BranchPolicy::GShare)]
fn branch_policy_by_name(#[case] name: &str, #[case] expected: BranchPolicy) {
    let text = format!(r#"{{ "pipeline": {{ "branch_predictor": {name} }} }}"#);
    let cfg = Config::from_json_str(&text).unwrap();
    assert_eq!(cfg.pipeline.branch_predictor, expected);
}

#[rstest]
#[case(0, BranchPolicy::None)]
#[case(1, BranchPolicy::AlwaysTaken)]
#[case(2, BranchPolicy::GShare)]
fn branch_policy_by_selector(#[case] selector: u8, #[case] expected: BranchPolicy) {
    assert_eq!(BranchPolicy::try_from(selector).unwrap(), expected);
}

#[test]
fn unknown_selector_is_rejected() {
    assert!(matches!(
        BranchPolicy::try_from(3),
        Err(ConfigError::UnknownBranchPolicy(3))
    ));
}

#[test]
fn forwarding_requires_both_paths() {
    let mut cfg = Config::default();
    cfg.pipeline.exe_forwarding = true;
    cfg.pipeline.mem_forwarding = true;
    assert!(cfg.pipeline.forwarding_enabled());
}

#[test]
fn reads_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "pipeline": {{ "width": 3, "branch_predictor": "AlwaysTaken" }} }}"#).unwrap();

    let cfg = Config::from_json_file(file.path()).unwrap();
    assert_eq!(cfg.pipeline.width, 3);
    assert_eq!(cfg.pipeline.branch_predictor, BranchPolicy::AlwaysTaken);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Config::from_json_file(&path).unwrap_err();
    match err {
        ConfigError::Read { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(
        Config::from_json_str("{ \"pipeline\": "),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        Config::from_json_str(r#"{ "pipeline": { "branch_predictor": "Perceptron" } }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn zero_width_is_rejected_at_construction() {
    let mut cfg = Config::default();
    cfg.pipeline.width = 0;
    assert!(matches!(cfg.validate(), Err(ConfigError::ZeroWidth)));

    let err = Pipeline::new(VecTrace::default(), &cfg).unwrap_err();
    assert!(matches!(err, SimError::Config(ConfigError::ZeroWidth)));
}
