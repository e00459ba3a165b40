//! Method tables: call contexts and sequence pipelines
//!
//! Callback-taking methods whose invocation state is known (dispatch calls
//! and combinators) and the sequence operators the projection rule scans.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use crate::features::type_classifier::domain::WrapperState;

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn contains(table: &[String], name: &str) -> bool {
    table.iter().any(|m| m == name)
}

/// First name present in both tables
fn overlap<'a>(a: &'a [String], b: &[String]) -> Option<&'a String> {
    a.iter().find(|m| contains(b, m))
}

// ═══════════════════════════════════════════════════════════════════════════
// Call contexts
// ═══════════════════════════════════════════════════════════════════════════

/// Callback contexts that run under one known wrapper state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallContextConfig {
    /// Methods taking one callback per state (`Match`, `Switch`)
    pub dispatch_methods: Vec<String>,

    /// Argument names binding the ok callback of a dispatch call
    pub ok_argument_names: Vec<String>,

    /// Argument names binding the not-ok callback of a dispatch call
    pub not_ok_argument_names: Vec<String>,

    /// Combinators invoking their callback only when ok
    pub ok_combinators: Vec<String>,

    /// Combinators invoking their callback only when not ok
    pub not_ok_combinators: Vec<String>,
}

impl Default for CallContextConfig {
    fn default() -> Self {
        Self {
            dispatch_methods: owned(&["Match", "Switch"]),
            ok_argument_names: owned(&["onSuccess", "Some"]),
            not_ok_argument_names: owned(&["onFailure", "None"]),
            ok_combinators: owned(&[
                "Map", "Bind", "Tap", "Ensure", "Check", "Execute", "TapIf", "MapIf", "BindIf",
            ]),
            not_ok_combinators: owned(&[
                "MapError",
                "TapError",
                "OnFailure",
                "OnFailureCompensate",
                "ExecuteNoValue",
            ]),
        }
    }
}

impl CallContextConfig {
    pub fn is_dispatch(&self, method: &str) -> bool {
        contains(&self.dispatch_methods, method)
    }

    /// State under which a dispatch callback runs, by argument name or
    /// position (0 = ok, 1 = not ok)
    pub fn dispatch_state(&self, name: Option<&str>, position: usize) -> Option<WrapperState> {
        match name {
            Some(name) if contains(&self.ok_argument_names, name) => Some(WrapperState::Ok),
            Some(name) if contains(&self.not_ok_argument_names, name) => {
                Some(WrapperState::NotOk)
            }
            Some(_) => None,
            None => match position {
                0 => Some(WrapperState::Ok),
                1 => Some(WrapperState::NotOk),
                _ => None,
            },
        }
    }

    /// State under which a combinator's callback runs
    pub fn combinator_state(&self, method: &str) -> Option<WrapperState> {
        if contains(&self.ok_combinators, method) {
            Some(WrapperState::Ok)
        } else if contains(&self.not_ok_combinators, method) {
            Some(WrapperState::NotOk)
        } else {
            None
        }
    }

    /// Builder: add an ok-state combinator
    pub fn ok_combinator(mut self, method: impl Into<String>) -> Self {
        self.ok_combinators.push(method.into());
        self
    }

    /// Builder: add a not-ok-state combinator
    pub fn not_ok_combinator(mut self, method: impl Into<String>) -> Self {
        self.not_ok_combinators.push(method.into());
        self
    }
}

impl Validatable for CallContextConfig {
    fn validate(&self) -> ConfigResult<()> {
        let tables = [
            ("ok_combinators", &self.ok_combinators, "not_ok_combinators", &self.not_ok_combinators),
            ("dispatch_methods", &self.dispatch_methods, "ok_combinators", &self.ok_combinators),
            (
                "dispatch_methods",
                &self.dispatch_methods,
                "not_ok_combinators",
                &self.not_ok_combinators,
            ),
            (
                "ok_argument_names",
                &self.ok_argument_names,
                "not_ok_argument_names",
                &self.not_ok_argument_names,
            ),
        ];
        for (first, a, second, b) in tables {
            if let Some(method) = overlap(a, b) {
                return Err(ConfigError::ConflictingMethod {
                    method: method.clone(),
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "CallContextConfig"
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Sequence pipelines
// ═══════════════════════════════════════════════════════════════════════════

/// Sequence operators relevant to projection guarding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineMethods {
    /// Projections whose lambda parameter is checked (`Select`)
    pub projection_methods: Vec<String>,

    /// Filters whose predicate can prove the element state (`Where`)
    pub filter_methods: Vec<String>,

    /// Operators that keep the filtered elements unchanged
    pub passthrough_methods: Vec<String>,
}

impl Default for PipelineMethods {
    fn default() -> Self {
        Self {
            projection_methods: owned(&["Select", "SelectMany"]),
            filter_methods: owned(&["Where", "TakeWhile"]),
            passthrough_methods: owned(&[
                "OrderBy",
                "OrderByDescending",
                "ThenBy",
                "ThenByDescending",
                "Distinct",
                "Take",
                "Skip",
                "SkipWhile",
                "Reverse",
                "AsEnumerable",
                "ToList",
                "ToArray",
            ]),
        }
    }
}

impl PipelineMethods {
    pub fn is_projection(&self, method: &str) -> bool {
        contains(&self.projection_methods, method)
    }

    pub fn is_filter(&self, method: &str) -> bool {
        contains(&self.filter_methods, method)
    }

    pub fn is_passthrough(&self, method: &str) -> bool {
        contains(&self.passthrough_methods, method)
    }
}

impl Validatable for PipelineMethods {
    fn validate(&self) -> ConfigResult<()> {
        if self.projection_methods.is_empty() {
            return Err(ConfigError::EmptyMethodTable(
                "pipeline.projection_methods".to_string(),
            ));
        }
        if let Some(method) = overlap(&self.projection_methods, &self.filter_methods) {
            return Err(ConfigError::ConflictingMethod {
                method: method.clone(),
                first: "projection_methods".to_string(),
                second: "filter_methods".to_string(),
            });
        }
        if let Some(method) = overlap(&self.filter_methods, &self.passthrough_methods) {
            return Err(ConfigError::ConflictingMethod {
                method: method.clone(),
                first: "filter_methods".to_string(),
                second: "passthrough_methods".to_string(),
            });
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "PipelineMethods"
    }
}
