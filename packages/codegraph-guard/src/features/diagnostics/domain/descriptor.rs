/*
 * Diagnostic Descriptors
 *
 * Static metadata of every rule: code, title, message template and
 * default severity. Message templates use positional `{0}`, `{1}`, ...
 */

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Serialize;

use super::diagnostic::Severity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticDescriptor {
    pub code: &'static str,
    pub title: &'static str,
    pub message_format: &'static str,
    pub severity: Severity,
    pub help: &'static str,
}

impl DiagnosticDescriptor {
    /// Substitute `{i}` with `args[i]`; unmatched placeholders stay as-is
    pub fn format_message(&self, args: &[String]) -> String {
        format_template(self.message_format, args)
    }
}

pub fn format_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(String::len).sum::<usize>());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            args.get(index).map(|arg| (arg, close))
        });
        match replaced {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub static DIRECT_ACCESS: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "GRD001",
    title: "Unguarded wrapper payload access",
    message_format: "Accessing '{0}' on '{1}' without checking '{2}' first may throw",
    severity: Severity::Warning,
    help: "Check the discriminant, or use Match / GetValueOrDefault / TryGetValue",
};

pub static TERNARY: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "GRD002",
    title: "Ternary over wrapper payload",
    message_format: "'{0}' can be simplified to '{1}.GetValueOrDefault({2})'",
    severity: Severity::Info,
    help: "GetValueOrDefault states the fallback without reading the payload",
};

pub static PROJECTION: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "GRD003",
    title: "Unguarded payload access in projection",
    message_format: "'{1}.{0}' is read in '{2}' without a preceding filter on '{3}'",
    severity: Severity::Warning,
    help: "Filter the sequence first, e.g. .Where(x => x.IsSuccess)",
};

pub static NULL_COMPARISON: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "GRD004",
    title: "Null comparison of wrapper value",
    message_format: "'{0}' compares a {1} with null; check '{2}' instead",
    severity: Severity::Warning,
    help: "Wrapper values are never null; their state is read through the discriminant",
};

/// Codes of every rule, in order
pub const RULE_CODES: &[&str] = &["GRD001", "GRD002", "GRD003", "GRD004"];

static DESCRIPTORS: Lazy<FxHashMap<&'static str, &'static DiagnosticDescriptor>> = Lazy::new(|| {
    [&DIRECT_ACCESS, &TERNARY, &PROJECTION, &NULL_COMPARISON]
        .into_iter()
        .map(|d| (d.code, d))
        .collect()
});

/// All descriptors ordered by code
pub fn descriptors() -> Vec<&'static DiagnosticDescriptor> {
    RULE_CODES.iter().filter_map(|code| descriptor_for(code)).collect()
}

pub fn descriptor_for(code: &str) -> Option<&'static DiagnosticDescriptor> {
    DESCRIPTORS.get(code).copied()
}
