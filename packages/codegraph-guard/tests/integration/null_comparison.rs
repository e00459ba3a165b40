//! GRD004 - null comparisons of wrapper values

#[path = "../common/mod.rs"]
mod common;

use codegraph_guard::Severity;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_equality_suggests_failure_discriminant() {
    let diagnostics = analyze_body("if (r == null) { }");
    let diagnostic = assert_single(&diagnostics, "GRD004");
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.arguments, vec!["r == null", "Result value", "IsFailure"]);
    assert_eq!(
        diagnostic.message,
        "'r == null' compares a Result value with null; check 'IsFailure' instead"
    );
}

#[test]
fn test_inequality_suggests_success_discriminant() {
    assert_has_arguments(
        &analyze_body("if (r != null) { }"),
        "GRD004",
        &["r != null", "Result value", "IsSuccess"],
    );
    assert_has_arguments(
        &analyze_body("if (null != r) { }"),
        "GRD004",
        &["null != r", "Result value", "IsSuccess"],
    );
}

#[test]
fn test_patterns() {
    assert_has_arguments(
        &analyze_body("var a = r is null;"),
        "GRD004",
        &["r is null", "Result value", "IsFailure"],
    );
    assert_has_arguments(
        &analyze_body("var a = m is not null;"),
        "GRD004",
        &["m is not null", "Maybe value", "HasValue"],
    );
}

#[test]
fn test_reported_even_when_guarded() {
    assert_codes(&analyze_body("if (r.IsSuccess && r != null) { }"), &["GRD004"]);
}

#[test]
fn test_non_wrapper_operands() {
    assert_clean(&analyze_body("var a = b == null;"));
    assert_clean(&analyze_body("var a = r.IsSuccess == true;"));
}

#[test]
fn test_async_wrapper_values_are_left_alone() {
    assert_clean(&analyze_source(&async_method_source("if (pending == null) { }")));
    assert_has_arguments(
        &analyze_source(&async_method_source("if ((await pending) == null) { }")),
        "GRD004",
        &["(await pending) == null", "Result value", "IsFailure"],
    );
}
