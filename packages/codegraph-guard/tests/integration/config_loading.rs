//! Configuration files: loading, validation errors and their effect on analysis

#[path = "../common/mod.rs"]
mod common;

use std::io::Write;

use codegraph_guard::config::{ConfigError, GuardConfig};
use codegraph_guard::{ErrorKind, GuardAnalyzer, GuardError};
use common::*;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

const OUTCOME_ONLY: &str = r#"
version: 1
families:
  - name: Outcome
    type_names: [Acme.Outcome]
    ok_discriminant: IsOk
    not_ok_discriminant: IsErr
    ok_payload: Unwrap
    not_ok_payload: Failure
non_throwing_factories: [Ok]
analysis:
  cross_lambda_boundaries: true
  parallel: false
disabled_rules: [grd002]
"#;

#[test]
fn test_load_from_file() {
    let file = write_config(OUTCOME_ONLY);
    let config = GuardConfig::from_yaml(file.path()).expect("config should load");

    assert_eq!(config.families.len(), 1);
    assert_eq!(config.families[0], outcome_family());
    assert!(config.analysis.cross_lambda_boundaries);
    assert!(!config.analysis.parallel);
    assert!(!config.is_rule_enabled("GRD002"));
    assert_eq!(config.non_throwing_factories, vec!["Ok".to_string()]);
    // Sections left out keep their defaults
    assert_eq!(config.async_wrappers, GuardConfig::default().async_wrappers);
    assert_eq!(config.pipeline, GuardConfig::default().pipeline);
}

#[test]
fn test_loaded_config_drives_analysis() {
    let config = GuardConfig::from_yaml_str(OUTCOME_ONLY).expect("config should load");
    let source = "void Check(Outcome<int> o, Result<int> r) {\n\
                  var x = o.IsOk ? o.Unwrap : 0;\n\
                  Use(o.Failure);\n\
                  Use(r.Value);\n\
                  Use(o.Ok(1).Unwrap);\n\
                  }";

    let diagnostics = analyze_source_with(source, &config);
    // GRD002 is disabled and `Result` is no longer a known family
    assert_codes(&diagnostics, &["GRD001"]);
    assert_has_arguments(&diagnostics, "GRD001", &["Failure", "o", "IsErr"]);
    assert_lines(&diagnostics, &[3]);
}

#[test]
fn test_missing_and_unsupported_version() {
    let err = GuardConfig::from_yaml_str("analysis:\n  parallel: false\n").unwrap_err();
    assert!(matches!(err, ConfigError::MissingVersion));

    let err = GuardConfig::from_yaml_str("version: 7\n").unwrap_err();
    match err {
        ConfigError::UnsupportedVersion { found, supported } => {
            assert_eq!(found, 7);
            assert_eq!(supported, vec![1]);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unknown_rule_suggests_closest_code() {
    let err = GuardConfig::from_yaml_str("version: 1\ndisabled_rules: [GRD01]\n").unwrap_err();
    match &err {
        ConfigError::UnknownRule { rule, .. } => assert_eq!(rule, "GRD01"),
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.to_string().contains("Did you mean 'GRD001'?"), "{}", err);
}

#[test]
fn test_unknown_fields_are_rejected() {
    let err = GuardConfig::from_yaml_str("version: 1\nrules: []\n").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn test_invalid_families() {
    let err = GuardConfig::from_yaml_str("version: 1\nfamilies: []\n").unwrap_err();
    assert!(matches!(err, ConfigError::NoFamilies));

    let duplicate_type = GuardConfig::default().with_family({
        let mut family = outcome_family();
        family.type_names = vec!["CSharpFunctionalExtensions.Result".to_string()];
        family
    });
    let err = GuardAnalyzer::new(duplicate_type).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Config);
    assert!(err.message.contains("CSharpFunctionalExtensions.Result"), "{}", err);

    let duplicate_name = GuardConfig::default().with_family(codegraph_guard::WrapperFamily::result());
    assert!(GuardAnalyzer::new(duplicate_name).is_err());
}

#[test]
fn test_thread_range() {
    let err = GuardConfig::from_yaml_str("version: 1\nanalysis:\n  threads: 100000\n").unwrap_err();
    assert!(matches!(err, ConfigError::Range { .. }));
    assert!(err.to_string().contains("analysis.threads"));
}

#[test]
fn test_yaml_roundtrip_of_defaults() {
    let yaml = GuardConfig::default().to_yaml().expect("export");
    assert!(yaml.contains("version: 1"));
    let reloaded = GuardConfig::from_yaml_str(&yaml).expect("reload");
    assert_eq!(reloaded.families, GuardConfig::default().families);
    assert_eq!(reloaded.call_contexts, GuardConfig::default().call_contexts);
}

#[test]
fn test_missing_file() {
    let err = GuardConfig::from_yaml("/nonexistent/guard.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    let err: GuardError = err.into();
    assert_eq!(err.kind, ErrorKind::Config);
}
