//! GRD002 - ternary over a wrapper payload

#[path = "../common/mod.rs"]
mod common;

use codegraph_guard::Severity;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_guarded_ternary_is_reported_as_info() {
    let diagnostics = analyze_body("var x = r.IsSuccess ? r.Value : 0;");
    let diagnostic = assert_single(&diagnostics, "GRD002");
    assert_eq!(diagnostic.severity, Severity::Info);
    assert_eq!(
        diagnostic.arguments,
        vec!["r.IsSuccess ? r.Value : 0", "r", "0"]
    );
    assert_eq!(
        diagnostic.message,
        "'r.IsSuccess ? r.Value : 0' can be simplified to 'r.GetValueOrDefault(0)'"
    );
}

#[test]
fn test_negated_forms() {
    assert_has_arguments(
        &analyze_body("var x = !r.IsSuccess ? 0 : r.Value;"),
        "GRD002",
        &["!r.IsSuccess ? 0 : r.Value", "r", "0"],
    );
    assert_has_arguments(
        &analyze_body("var x = r.IsFailure ? -1 : r.Value;"),
        "GRD002",
        &["r.IsFailure ? -1 : r.Value", "r", "-1"],
    );
    assert_codes(&analyze_body("var x = r.IsSuccess == false ? 0 : r.Value;"), &["GRD002"]);
}

#[test]
fn test_maybe_ternary() {
    assert_has_arguments(
        &analyze_body("var s = m.HasValue ? m.Value : \"none\";"),
        "GRD002",
        &["m.HasValue ? m.Value : \"none\"", "m", "\"none\""],
    );
}

#[test]
fn test_branch_reading_another_value() {
    assert_clean(&analyze_body("var x = r.IsSuccess ? 1 : 0;"));
    // Guarded by `r`, reads `q`: not a GetValueOrDefault candidate
    assert_codes(&analyze_body("var x = r.IsSuccess ? q.Value : 0;"), &["GRD001"]);
}

#[test]
fn test_payload_on_wrong_branch() {
    // The ok payload sits where the value is known to be a failure
    assert_codes(&analyze_body("var x = r.IsSuccess ? 0 : r.Value;"), &["GRD001"]);
}

#[test]
fn test_error_payload_is_not_simplified() {
    assert_clean(&analyze_body("var e = r.IsFailure ? r.Error : \"\";"));
}
