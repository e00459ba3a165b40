//! Builders for configurations, analyzers and units

use codegraph_guard::adapters::parse_unit;
use codegraph_guard::config::{GuardConfig, WrapperFamily};
use codegraph_guard::{AnalysisUnit, Diagnostic, GuardAnalyzer};

use super::fixtures::method_source;

/// A family from another library: `Outcome<T>` with `IsOk` / `IsErr`
pub fn outcome_family() -> WrapperFamily {
    WrapperFamily {
        name: "Outcome".to_string(),
        type_names: vec!["Acme.Outcome".to_string()],
        ok_discriminant: "IsOk".to_string(),
        not_ok_discriminant: "IsErr".to_string(),
        ok_payload: Some("Unwrap".to_string()),
        not_ok_payload: Some("Failure".to_string()),
        ok_try_accessor: None,
        not_ok_try_accessor: None,
    }
}

/// Parse a whole snippet file
pub fn unit(source: &str, config: &GuardConfig) -> AnalysisUnit {
    parse_unit("Check.cs", source, config).expect("snippet should parse")
}

/// Analyze a whole snippet file with `config`
pub fn analyze_source_with(source: &str, config: &GuardConfig) -> Vec<Diagnostic> {
    let analyzer = GuardAnalyzer::new(config.clone()).expect("config should be valid");
    analyzer
        .analyze(&unit(source, config))
        .expect("analysis should complete")
        .diagnostics
}

pub fn analyze_source(source: &str) -> Vec<Diagnostic> {
    analyze_source_with(source, &GuardConfig::default())
}

/// Analyze a method body using the standard parameters
pub fn analyze_body(body: &str) -> Vec<Diagnostic> {
    analyze_source(&method_source(body))
}

pub fn analyze_body_with(body: &str, config: &GuardConfig) -> Vec<Diagnostic> {
    analyze_source_with(&method_source(body), config)
}

/// Codes reported for a method body, in report order
pub fn codes(body: &str) -> Vec<String> {
    analyze_body(body).into_iter().map(|d| d.code).collect()
}

pub fn codes_with(body: &str, config: &GuardConfig) -> Vec<String> {
    analyze_body_with(body, config)
        .into_iter()
        .map(|d| d.code)
        .collect()
}
