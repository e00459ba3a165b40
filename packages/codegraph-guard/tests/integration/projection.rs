//! GRD003 - payload reads inside sequence projections

#[path = "../common/mod.rs"]
mod common;

use codegraph_guard::config::GuardConfig;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_bare_projection_is_reported() {
    let diagnostics = analyze_body("var v = results.Select(x => x.Value).ToList();");
    let diagnostic = assert_single(&diagnostics, "GRD003");
    assert_eq!(diagnostic.arguments, vec!["Value", "x", "Select", "IsSuccess"]);
    assert_eq!(
        diagnostic.message,
        "'x.Value' is read in 'Select' without a preceding filter on 'IsSuccess'"
    );
}

#[test]
fn test_filter_before_projection() {
    assert_clean(&analyze_body("var v = results.Where(x => x.IsSuccess).Select(x => x.Value);"));
    assert_clean(&analyze_body("var e = results.Where(x => x.IsFailure).Select(x => x.Error);"));
    assert_clean(&analyze_body("var v = results.Where(x => !x.IsFailure).Select(x => x.Value);"));
}

#[test]
fn test_filter_on_the_wrong_state() {
    assert_has_arguments(
        &analyze_body("var v = results.Where(x => x.IsFailure).Select(x => x.Value);"),
        "GRD003",
        &["Value", "x", "Select", "IsSuccess"],
    );
}

#[test]
fn test_passthrough_stages() {
    assert_clean(&analyze_body(
        "var v = results.Where(x => x.IsSuccess).Take(5).Skip(1).Select(x => x.Value);",
    ));
    assert_clean(&analyze_body(
        "var v = results.Where(x => x.IsSuccess).OrderBy(x => x.IsSuccess).Select(x => x.Value);",
    ));
}

#[test]
fn test_unknown_stage_ends_the_scan() {
    assert_codes(
        &analyze_body("var v = results.Where(x => x.IsSuccess).Concat(results).Select(x => x.Value);"),
        &["GRD003"],
    );
}

#[test]
fn test_guard_inside_the_lambda() {
    assert_clean(&analyze_body("var v = results.Select(x => x.IsSuccess ? 1 : 0);"));
    assert_clean(&analyze_body(
        "var v = results.Select(x => x.IsSuccess && x.Value > 0);",
    ));
}

#[test]
fn test_select_many_and_maybes() {
    assert_codes(&analyze_body("var v = maybes.SelectMany(x => x.Value);"), &["GRD003"]);
    assert_has_arguments(
        &analyze_body("var v = maybes.Select(x => x.Value);"),
        "GRD003",
        &["Value", "x", "Select", "HasValue"],
    );
    assert_clean(&analyze_body("var v = maybes.Where(x => x.HasValue).Select(x => x.Value);"));
}

#[test]
fn test_projection_reads_are_not_direct_access() {
    let codes = codes("var v = results.Select(x => x.Value);");
    assert!(!codes.iter().any(|c| c == "GRD001"));
}

#[test]
fn test_configured_filter_method() {
    let mut config = GuardConfig::default();
    config.pipeline.filter_methods.push("KeepIf".to_string());
    assert_clean(&analyze_body_with(
        "var v = results.KeepIf(x => x.IsSuccess).Select(x => x.Value);",
        &config,
    ));
    assert_codes(
        &analyze_body("var v = results.KeepIf(x => x.IsSuccess).Select(x => x.Value);"),
        &["GRD003"],
    );
}
