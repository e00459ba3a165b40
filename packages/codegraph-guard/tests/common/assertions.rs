//! Custom assertions for diagnostic verification

use codegraph_guard::Diagnostic;
use pretty_assertions::assert_eq;

/// Assert the exact list of codes, in report order
pub fn assert_codes(diagnostics: &[Diagnostic], expected: &[&str]) {
    let actual: Vec<&str> = diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(
        actual, expected,
        "unexpected diagnostics: {:#?}",
        diagnostics.iter().map(|d| d.to_string()).collect::<Vec<_>>()
    );
}

pub fn assert_clean(diagnostics: &[Diagnostic]) {
    assert_codes(diagnostics, &[]);
}

/// Assert exactly one diagnostic and return it
pub fn assert_single<'d>(diagnostics: &'d [Diagnostic], code: &str) -> &'d Diagnostic {
    assert_codes(diagnostics, &[code]);
    &diagnostics[0]
}

/// Assert that some diagnostic of `code` has these message arguments
pub fn assert_has_arguments(diagnostics: &[Diagnostic], code: &str, arguments: &[&str]) {
    let found = diagnostics
        .iter()
        .filter(|d| d.code == code)
        .any(|d| d.arguments.iter().map(String::as_str).eq(arguments.iter().copied()));
    assert!(
        found,
        "no {} with arguments {:?}; got {:#?}",
        code,
        arguments,
        diagnostics
            .iter()
            .map(|d| (&d.code, &d.arguments))
            .collect::<Vec<_>>()
    );
}

/// Assert the 1-based line of every diagnostic, in report order
pub fn assert_lines(diagnostics: &[Diagnostic], expected: &[u32]) {
    let lines: Vec<u32> = diagnostics.iter().map(|d| d.span.start_line).collect();
    assert_eq!(lines, expected);
}
