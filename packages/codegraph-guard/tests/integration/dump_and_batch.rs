//! Host-produced units, JSON dumps and batch runs

#[path = "../common/mod.rs"]
mod common;

use std::fs;
use std::io::Write;

use codegraph_guard::config::GuardConfig;
use codegraph_guard::pipeline::{load_unit, load_units};
use codegraph_guard::{
    AnalysisUnit, BatchRunner, CancellationToken, GuardAnalyzer, Severity, TableOracle,
    TreeBuilder, TypeRef, UnitDump,
};
use common::*;
use pretty_assertions::assert_eq;

fn result_of_int() -> TypeRef {
    TypeRef::generic(
        "CSharpFunctionalExtensions.Result",
        vec![TypeRef::named("int")],
    )
}

/// `void M(Result<int> r) { if (r.IsSuccess) { } Use(r.Value); }` built
/// node by node, with the tables a host would provide
fn host_unit() -> AnalysisUnit {
    let mut b = TreeBuilder::new("Host.cs");
    b.at_line(1);
    let param = b.param("r", Some(result_of_int()));
    b.at_line(2);
    let r1 = b.ident("r");
    let cond = b.member(r1, "IsSuccess");
    let then = b.block(vec![]);
    let guard = b.if_stmt(cond, then, None);
    b.at_line(3);
    let r2 = b.ident("r");
    let value = b.member(r2, "Value");
    let call = b.free_call("Use", vec![value]);
    let stmt = b.expr_stmt(call);
    let body = b.block(vec![guard, stmt]);
    let method = b.method("M", vec![param], body);
    let root = b.unit(vec![method]);
    let tree = b.build(root).expect("tree should build");

    let mut oracle = TableOracle::new();
    for node in [param, r1, r2] {
        oracle.set_type(node, result_of_int());
        oracle.set_symbol(node, "r@0");
    }
    AnalysisUnit::new(tree, oracle)
}

#[test]
fn test_host_built_unit() {
    let analyzer = GuardAnalyzer::new(GuardConfig::default()).unwrap();
    let result = analyzer.analyze(&host_unit()).unwrap();

    assert_eq!(result.file_path, "Host.cs");
    let diagnostic = assert_single(&result.diagnostics, "GRD001");
    assert_eq!(diagnostic.arguments, vec!["Value", "r", "IsSuccess"]);
    assert_eq!(diagnostic.span.start_line, 3);
    assert_eq!(result.stats.diagnostics, 1);
    assert!(result.stats.candidates > 0);
}

/// `Use(Email.TryCreate(1).Value); Use(Email.Create(2).Value);` where only
/// the host knows the factories return `Result<int>`
#[test]
fn test_host_typed_factory_receiver() {
    let mut b = TreeBuilder::new("Factory.cs");
    b.at_line(1);
    let email = b.ident("Email");
    let arg = b.int(1);
    let try_create = b.method_call(email, "TryCreate", vec![arg]);
    let first = b.member(try_create, "Value");
    let use_first = b.free_call("Use", vec![first]);
    let stmt1 = b.expr_stmt(use_first);
    b.at_line(2);
    let email2 = b.ident("Email");
    let arg2 = b.int(2);
    let create = b.method_call(email2, "Create", vec![arg2]);
    let second = b.member(create, "Value");
    let use_second = b.free_call("Use", vec![second]);
    let stmt2 = b.expr_stmt(use_second);
    let body = b.block(vec![stmt1, stmt2]);
    let method = b.method("M", vec![], body);
    let root = b.unit(vec![method]);
    let tree = b.build(root).expect("tree should build");

    let mut oracle = TableOracle::new();
    oracle.set_type(email, TypeRef::named("Acme.Email"));
    oracle.set_type(email2, TypeRef::named("Acme.Email"));
    oracle.set_type(try_create, result_of_int());
    oracle.set_type(create, result_of_int());

    let analyzer = GuardAnalyzer::new(GuardConfig::default()).unwrap();
    let result = analyzer.analyze(&AnalysisUnit::new(tree, oracle)).unwrap();

    let diagnostic = assert_single(&result.diagnostics, "GRD001");
    assert_eq!(diagnostic.arguments, vec!["Value", "Email.Create(2)", "IsSuccess"]);
    assert_eq!(diagnostic.span.start_line, 2);
}

#[test]
fn test_dump_file_matches_snippet_analysis() {
    let config = GuardConfig::default();
    let source = order_service_source();
    let dump = UnitDump::from_snippet("Orders.cs", source, &config).unwrap();

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(dump.to_json().unwrap().as_bytes()).unwrap();

    let from_dump = load_unit(file.path(), &config).unwrap();
    assert_eq!(from_dump.file_path(), "Orders.cs");

    let analyzer = GuardAnalyzer::new(config.clone()).unwrap();
    let dumped = analyzer.analyze(&from_dump).unwrap().diagnostics;
    let direct = analyzer
        .analyze(&parse_unit_named("Orders.cs", source, &config))
        .unwrap()
        .diagnostics;
    assert_eq!(dumped.len(), 7);
    assert_eq!(dumped, direct);
}

#[test]
fn test_batch_skips_unreadable_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("Good.cs");
    let broken = dir.path().join("Broken.cs");
    let bad_dump = dir.path().join("Bad.json");
    let missing = dir.path().join("Missing.cs");
    fs::write(&good, method_source("Use(r.Value);\nvar x = r.IsSuccess ? r.Value : 0;")).unwrap();
    fs::write(&broken, "void M() { Use(r.Value; }").unwrap();
    fs::write(&bad_dump, "{ \"tree\": ").unwrap();

    let config = GuardConfig::default();
    let paths = vec![good.clone(), broken, bad_dump, missing];
    let (units, failures) = load_units(&paths, &config);
    assert_eq!(units.len(), 1);
    assert_eq!(failures.len(), 3);
    assert!(failures[0].file_path.ends_with("Broken.cs"));
    assert!(failures[0].error.contains("parse"), "{}", failures[0].error);

    let analyzer = GuardAnalyzer::new(config).unwrap();
    let report = BatchRunner::new(&analyzer).run(&units).with_failures(failures);

    assert!(report.has_failures());
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.diagnostic_count(), 2);
    assert_eq!(report.max_severity(), Some(Severity::Warning));
    let codes: Vec<&str> = report.diagnostics().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["GRD001", "GRD002"]);
}

#[test]
fn test_batch_keeps_input_order() {
    let config = GuardConfig::default().analysis(|a| a.parallel(true).threads(3));
    let units: Vec<AnalysisUnit> = (0..8)
        .map(|i| {
            let body = if i % 2 == 0 { "Use(r.Value);" } else { "if (r.IsSuccess) { Use(r.Value); }" };
            parse_unit_named(&format!("U{}.cs", i), &method_source(body), &config)
        })
        .collect();

    let analyzer = GuardAnalyzer::new(config).unwrap();
    let report = BatchRunner::new(&analyzer).run(&units);

    let files: Vec<&str> = report.results.iter().map(|r| r.file_path.as_str()).collect();
    let expected: Vec<String> = (0..8).map(|i| format!("U{}.cs", i)).collect();
    assert_eq!(files, expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(report.diagnostic_count(), 4);
    assert!(!report.has_failures());
}

#[test]
fn test_cancelled_batch_reports_every_unit() {
    let config = GuardConfig::default();
    let units = vec![
        parse_unit_named("A.cs", &method_source("Use(r.Value);"), &config),
        parse_unit_named("B.cs", &method_source("Use(q.Error);"), &config),
    ];
    let cancel = CancellationToken::new();
    cancel.cancel();

    let analyzer = GuardAnalyzer::new(config).unwrap();
    let report = BatchRunner::new(&analyzer)
        .with_cancellation(cancel)
        .run(&units);

    assert!(report.results.is_empty());
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures.iter().all(|f| f.error.contains("cancelled")));
    assert_eq!(report.max_severity(), None);
}

#[test]
fn test_report_serializes() {
    let config = GuardConfig::default();
    let units = vec![parse_unit_named("A.cs", &method_source("Use(r.Value);"), &config)];
    let analyzer = GuardAnalyzer::new(config).unwrap();
    let report = BatchRunner::new(&analyzer).run(&units);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["results"][0]["diagnostics"][0]["code"], "GRD001");
    assert_eq!(json["results"][0]["diagnostics"][0]["severity"], "warning");
    assert_eq!(json["stats"]["diagnostics"], 1);
    assert!(json["failures"].as_array().unwrap().is_empty());
}

fn parse_unit_named(file: &str, source: &str, config: &GuardConfig) -> AnalysisUnit {
    codegraph_guard::parse_unit(file, source, config).expect("snippet should parse")
}
