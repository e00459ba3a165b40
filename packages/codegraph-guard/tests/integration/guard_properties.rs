//! Property-based tests for guard recognition
//!
//! Invariants over generated guard conditions:
//! - Soundness: a read is accepted exactly when the branch proves its state
//! - Negation symmetry: `if (c) A else B` == `if (!c) B else A`
//! - Determinism: repeated and parallel runs report the same diagnostics

#[path = "../common/mod.rs"]
mod common;

use codegraph_guard::config::GuardConfig;
use codegraph_guard::{AnalysisUnit, BatchRunner, GuardAnalyzer};
use common::*;
use proptest::prelude::*;

/// A condition over `subject` and the value of `IsSuccess` it implies
/// whenever it holds
#[derive(Debug, Clone)]
struct Condition {
    text: String,
    implies_success: bool,
}

fn condition(subject: &'static str) -> impl Strategy<Value = Condition> {
    let discriminant = prop::sample::select(vec![("IsSuccess", true), ("IsFailure", false)]);
    let form = prop::sample::select(vec![0u8, 1, 2, 3, 4, 5]);
    (discriminant, form).prop_map(move |((member, is_ok), form)| {
        let access = format!("{}.{}", subject, member);
        // (text, value of the discriminant when the condition holds)
        let (text, holds_when) = match form {
            0 => (access, true),
            1 => (format!("!{}", access), false),
            2 => (format!("{} == true", access), true),
            3 => (format!("{} == false", access), false),
            4 => (format!("false != {}", access), true),
            _ => (format!("({})", access), true),
        };
        Condition {
            text,
            implies_success: holds_when == is_ok,
        }
    })
}

fn payload() -> impl Strategy<Value = (&'static str, bool)> {
    // (member, needs success)
    prop::sample::select(vec![("Value", true), ("Error", false)])
}

fn is_reported(body: &str) -> bool {
    let codes = codes(body);
    assert!(codes.iter().all(|c| c == "GRD001"), "unexpected codes {:?}", codes);
    !codes.is_empty()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_then_branch_soundness(cond in condition("r"), (member, needs_success) in payload()) {
        let body = format!("if ({}) {{ Use(r.{}); }}", cond.text, member);
        let proven = cond.implies_success == needs_success;
        prop_assert_eq!(is_reported(&body), !proven, "{}", body);
    }

    #[test]
    fn prop_else_branch_soundness(cond in condition("r"), (member, needs_success) in payload()) {
        let body = format!("if ({}) {{ }} else {{ Use(r.{}); }}", cond.text, member);
        let proven = cond.implies_success != needs_success;
        prop_assert_eq!(is_reported(&body), !proven, "{}", body);
    }

    #[test]
    fn prop_guard_on_other_variable_never_helps(cond in condition("q"), (member, _) in payload()) {
        let body = format!("if ({}) {{ Use(r.{}); }} else {{ Use(r.{}); }}", cond.text, member, member);
        prop_assert_eq!(codes(&body).len(), 2);
    }

    #[test]
    fn prop_negation_swaps_branches(
        cond in condition("r"),
        (first, _) in payload(),
        (second, _) in payload(),
    ) {
        let plain = format!("if ({}) {{ Use(r.{}); }} else {{ Use(r.{}); }}", cond.text, first, second);
        let negated = format!("if (!({})) {{ Use(r.{}); }} else {{ Use(r.{}); }}", cond.text, second, first);
        let mut a: Vec<String> = analyze_body(&plain).into_iter().map(|d| d.arguments.join(",")).collect();
        let mut b: Vec<String> = analyze_body(&negated).into_iter().map(|d| d.arguments.join(",")).collect();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_short_circuit_matches_if(cond in condition("r"), (member, _) in payload()) {
        let via_and = format!("var a = ({}) && r.{} != 0;", cond.text, member);
        let via_if = format!("if ({}) {{ Use(r.{}); }}", cond.text, member);
        prop_assert_eq!(
            codes(&via_and).contains(&"GRD001".to_string()),
            codes(&via_if).contains(&"GRD001".to_string())
        );
    }

    #[test]
    fn prop_parallel_batch_is_deterministic(
        picks in prop::collection::vec(0usize..4, 2..10),
    ) {
        const BODIES: [&str; 4] = [
            "Use(r.Value);",
            "if (r.IsSuccess) { Use(r.Value); }",
            "var x = m.HasValue ? m.Value : \"\";",
            "var v = results.Select(x => x.Value);",
        ];
        let sequential = GuardConfig::default().analysis(|a| a.parallel(false));
        let parallel = GuardConfig::default().analysis(|a| a.parallel(true).threads(4));

        let units = |config: &GuardConfig| -> Vec<AnalysisUnit> {
            picks
                .iter()
                .enumerate()
                .map(|(i, &p)| {
                    codegraph_guard::parse_unit(&format!("U{}.cs", i), &method_source(BODIES[p]), config)
                        .expect("snippet should parse")
                })
                .collect()
        };

        let seq_analyzer = GuardAnalyzer::new(sequential.clone()).unwrap();
        let par_analyzer = GuardAnalyzer::new(parallel.clone()).unwrap();
        let seq = BatchRunner::new(&seq_analyzer).run(&units(&sequential));
        let par = BatchRunner::new(&par_analyzer).run(&units(&parallel));
        let again = BatchRunner::new(&par_analyzer).run(&units(&parallel));

        let flatten = |report: &codegraph_guard::BatchReport| {
            report.diagnostics().cloned().collect::<Vec<_>>()
        };
        prop_assert_eq!(flatten(&seq), flatten(&par));
        prop_assert_eq!(flatten(&par), flatten(&again));
    }
}
