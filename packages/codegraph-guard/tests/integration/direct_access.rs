//! GRD001 - direct payload access

#[path = "../common/mod.rs"]
mod common;

use codegraph_guard::config::GuardConfig;
use common::*;

#[test]
fn test_guarded_read_is_clean() {
    assert_clean(&analyze_body("if (r.IsSuccess) { Use(r.Value); }"));
    assert_clean(&analyze_body("if (r.IsFailure) { Use(r.Error); }"));
    assert_clean(&analyze_body("if (m.HasValue) { Use(m.Value); }"));
}

#[test]
fn test_bare_read_is_reported() {
    let diagnostics = analyze_body("Use(r.Value);");
    let diagnostic = assert_single(&diagnostics, "GRD001");
    assert_eq!(diagnostic.arguments, vec!["Value", "r", "IsSuccess"]);
    assert_eq!(
        diagnostic.message,
        "Accessing 'Value' on 'r' without checking 'IsSuccess' first may throw"
    );
    assert_eq!(diagnostic.span.start_line, 2);
}

#[test]
fn test_error_payload_needs_failure_guard() {
    assert_has_arguments(&analyze_body("Use(r.Error);"), "GRD001", &["Error", "r", "IsFailure"]);
    assert_codes(&analyze_body("if (r.IsSuccess) { Use(r.Error); }"), &["GRD001"]);
}

#[test]
fn test_else_branches() {
    assert_clean(&analyze_body("if (!r.IsSuccess) { Use(r.Error); } else { Use(r.Value); }"));
    assert_clean(&analyze_body("if (r.IsFailure) { } else { Use(r.Value); }"));
    assert_codes(
        &analyze_body("if (r.IsSuccess) { } else { Use(r.Value); }"),
        &["GRD001"],
    );
}

#[test]
fn test_nothing_after_the_block_is_guarded() {
    let diagnostics = analyze_body("if (r.IsSuccess) {\n}\nUse(r.Value);");
    assert_codes(&diagnostics, &["GRD001"]);
    assert_lines(&diagnostics, &[4]);

    // Early exits are not tracked
    assert_codes(&analyze_body("if (r.IsFailure) { return; }\nUse(r.Value);"), &["GRD001"]);
}

#[test]
fn test_guard_on_another_variable() {
    assert_codes(&analyze_body("if (q.IsSuccess) { Use(r.Value); }"), &["GRD001"]);
}

#[test]
fn test_literal_comparisons_and_patterns() {
    assert_clean(&analyze_body("if (r.IsSuccess == true) { Use(r.Value); }"));
    assert_clean(&analyze_body("if (r.IsFailure == false) { Use(r.Value); }"));
    assert_clean(&analyze_body("if (r.IsSuccess is true) { Use(r.Value); }"));
    // A non-literal right-hand side proves nothing
    assert_codes(&analyze_body("if (r.IsSuccess == b) { Use(r.Value); }"), &["GRD001"]);
}

#[test]
fn test_short_circuit_operands() {
    assert_clean(&analyze_body("var a = r.IsSuccess && r.Value > 0;"));
    assert_clean(&analyze_body("var a = r.IsFailure || r.Value > 0;"));
    assert_codes(&analyze_body("var a = r.IsSuccess || r.Value > 0;"), &["GRD001"]);
    assert_clean(&analyze_body("if (b && r.IsSuccess) { Use(r.Value); }"));
    assert_codes(&analyze_body("if (b || r.IsSuccess) { Use(r.Value); }"), &["GRD001"]);
}

#[test]
fn test_try_accessor_guard() {
    assert_clean(&analyze_body("if (r.TryGetValue(out var v)) { Use(r.Value); }"));
    assert_codes(
        &analyze_body("if (!r.TryGetValue(out var v)) { Use(r.Value); }"),
        &["GRD001"],
    );
}

#[test]
fn test_conditional_access_is_safe() {
    assert_clean(&analyze_body("Use(r?.Value);"));
    assert_clean(&analyze_body("Use(r?.Error);\nvar s = m?.Value;"));
    assert_clean(&analyze_body("if (r.IsSuccess) { Use(r?.Value); }"));
    // Only the conditionally accessed read is covered
    let diagnostics = analyze_body("Use(r?.Value);\nUse(r.Value);");
    assert_single(&diagnostics, "GRD001");
    assert_lines(&diagnostics, &[3]);
}

#[test]
fn test_callbacks_of_dispatch_and_combinators() {
    assert_clean(&analyze_body("r.Match(v => r.Value, e => r.Error);"));
    assert_clean(&analyze_body("r.Match(onFailure: e => r.Error, onSuccess: v => r.Value);"));
    assert_clean(&analyze_body("r.Map(x => r.Value + 1);"));
    assert_clean(&analyze_body("r.MapError(e => r.Error);"));
    assert_codes(&analyze_body("r.MapError(e => r.Value);"), &["GRD001"]);
    assert_codes(&analyze_body("q.Map(x => r.Value);"), &["GRD001"]);
}

#[test]
fn test_switch_and_other_combinators() {
    assert_clean(&analyze_body("r.Switch(v => Use(r.Value), e => Use(r.Error));"));
    assert_clean(&analyze_body("r.Switch(onSuccess: v => Use(r.Value), onFailure: e => Use(r.Error));"));
    assert_clean(&analyze_body("m.Switch(Some: v => Use(m.Value), None: () => Log(b));"));
    assert_clean(&analyze_body("r.Bind(x => r.Value);\nr.Tap(x => Use(r.Value));\nr.Ensure(x => r.Value > 0, \"empty\");"));
    assert_clean(&analyze_body("r.TapError(e => Log(r.Error));\nr.OnFailure(e => Log(r.Error));"));

    let diagnostics = analyze_body("r.TapError(e => Use(r.Value));\nr.Bind(x => r.Error);");
    assert_codes(&diagnostics, &["GRD001", "GRD001"]);
    assert_has_arguments(&diagnostics, "GRD001", &["Value", "r", "IsSuccess"]);
    assert_has_arguments(&diagnostics, "GRD001", &["Error", "r", "IsFailure"]);
    assert_lines(&diagnostics, &[2, 3]);
}

#[test]
fn test_lambda_boundary() {
    let body = "if (r.IsSuccess) { Run(() => r.Value); }";
    assert_codes(&analyze_body(body), &["GRD001"]);

    let crossing = GuardConfig::default().analysis(|a| a.cross_lambda_boundaries(true));
    assert_clean(&analyze_body_with(body, &crossing));
}

#[test]
fn test_non_throwing_factory_receiver() {
    assert_clean(&analyze_body("var x = Result.TryCreate(5).Value;"));
    assert_clean(&analyze_body("var y = (r.TryCreate(5)).Value;"));

    // Only the configured method names are exempt, whatever the receiver
    let diagnostics = analyze_body("var x = Result.Success(5).Value;\nvar s = Maybe.From(\"a\").Value;");
    assert_codes(&diagnostics, &["GRD001", "GRD001"]);
    assert_has_arguments(&diagnostics, "GRD001", &["Value", "Result.Success(5)", "IsSuccess"]);

    let config = GuardConfig::default().with_non_throwing_factory("Success");
    assert_codes(
        &analyze_body_with("var x = Result.Success(5).Value;\nvar s = Maybe.From(\"a\").Value;", &config),
        &["GRD001"],
    );
}

#[test]
fn test_awaited_wrapper() {
    let diagnostics = analyze_source(&async_method_source("var v = (await pending).Value;"));
    assert_has_arguments(&diagnostics, "GRD001", &["Value", "(await pending)", "IsSuccess"]);

    let guarded = "var x = await pending;\nif (x.IsSuccess) { Use(x.Value); }\nUse(x.Error);";
    let diagnostics = analyze_source(&async_method_source(guarded));
    assert_codes(&diagnostics, &["GRD001"]);
    assert_lines(&diagnostics, &[4]);
}

#[test]
fn test_custom_family() {
    let config = GuardConfig::default().with_family(outcome_family());
    let source = "void Check(Acme.Outcome<int> o) {\nif (o.IsOk) { Use(o.Unwrap); }\nUse(o.Failure);\n}";
    let diagnostics = analyze_source_with(source, &config);
    assert_codes(&diagnostics, &["GRD001"]);
    assert_has_arguments(&diagnostics, "GRD001", &["Failure", "o", "IsErr"]);
}

#[test]
fn test_disabled_rule() {
    let config = GuardConfig::default().disable_rule("grd001");
    assert_clean(&analyze_body_with("Use(r.Value);", &config));
}

#[test]
fn test_service_file() {
    let diagnostics = analyze_source(order_service_source());
    assert_codes(
        &diagnostics,
        &["GRD001", "GRD002", "GRD001", "GRD001", "GRD001", "GRD003", "GRD004"],
    );
    assert_lines(&diagnostics, &[10, 19, 26, 30, 30, 35, 40]);
    assert_has_arguments(&diagnostics, "GRD001", &["Error", "_lastOrder", "IsFailure"]);
    assert_has_arguments(&diagnostics, "GRD001", &["Value", "Load(7)", "IsSuccess"]);
    assert_has_arguments(&diagnostics, "GRD001", &["Value", "Result.Success(3)", "IsSuccess"]);
}
