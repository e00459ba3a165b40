//! Guard analysis configuration
//!
//! `GuardConfig::default()` recognizes the `Result`/`Maybe` families with
//! their standard call contexts. Teams extend it in YAML:
//!
//! ```yaml
//! version: 1
//! families:
//!   - name: Either
//!     type_names: [Acme.Either]
//!     ok_discriminant: IsRight
//!     not_ok_discriminant: IsLeft
//!     ok_payload: Right
//!     not_ok_payload: Left
//! analysis:
//!   cross_lambda_boundaries: true
//! disabled_rules: [GRD002]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::families::WrapperFamily;
use super::io::{ConfigExportV1, SCHEMA_VERSION};
use super::method_tables::{CallContextConfig, PipelineMethods};
use super::validation::{validate_sections, Validatable, ValidatableCollection};
use crate::features::diagnostics::domain::RULE_CODES;

const MAX_THREADS: usize = 512;

// ═══════════════════════════════════════════════════════════════════════════
// Analysis options
// ═══════════════════════════════════════════════════════════════════════════

/// Walker and runner switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisOptions {
    /// Keep ascending past a lambda that is not a known call context
    pub cross_lambda_boundaries: bool,

    /// Analyze batch units on the rayon pool
    pub parallel: bool,

    /// Worker threads for batch runs (0 = one per CPU)
    pub threads: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            cross_lambda_boundaries: false,
            parallel: true,
            threads: 0,
        }
    }
}

impl AnalysisOptions {
    /// Builder: Set cross_lambda_boundaries
    pub fn cross_lambda_boundaries(mut self, v: bool) -> Self {
        self.cross_lambda_boundaries = v;
        self
    }

    /// Builder: Set parallel
    pub fn parallel(mut self, v: bool) -> Self {
        self.parallel = v;
        self
    }

    /// Builder: Set threads
    pub fn threads(mut self, v: usize) -> Self {
        self.threads = v;
        self
    }

    /// Resolved worker count
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}

impl Validatable for AnalysisOptions {
    fn validate(&self) -> ConfigResult<()> {
        if self.threads > MAX_THREADS {
            return Err(ConfigError::range_with_hint(
                "analysis.threads",
                self.threads,
                0,
                MAX_THREADS,
                "Use 0 for one thread per CPU",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "AnalysisOptions"
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// GuardConfig
// ═══════════════════════════════════════════════════════════════════════════

/// Complete analyzer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    pub families: Vec<WrapperFamily>,

    /// Single-parameter asynchronous wrappers (`Task<T>`)
    pub async_wrappers: Vec<String>,

    /// Factory methods whose wrapper result is known ok when read directly
    /// (`Email.TryCreate(..).Value`), on any receiver type
    pub non_throwing_factories: Vec<String>,

    pub call_contexts: CallContextConfig,

    pub pipeline: PipelineMethods,

    pub analysis: AnalysisOptions,

    /// Diagnostic codes that are never reported
    pub disabled_rules: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            families: WrapperFamily::defaults(),
            async_wrappers: vec![
                "System.Threading.Tasks.Task".to_string(),
                "System.Threading.Tasks.ValueTask".to_string(),
            ],
            non_throwing_factories: vec!["TryCreate".to_string()],
            call_contexts: CallContextConfig::default(),
            pipeline: PipelineMethods::default(),
            analysis: AnalysisOptions::default(),
            disabled_rules: Vec::new(),
        }
    }
}

impl GuardConfig {
    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        // Version check
        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(SCHEMA_VERSION) => {}
            Some(found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: vec![SCHEMA_VERSION],
                })
            }
        }

        let mut config = Self::default();
        if let Some(families) = export.families {
            config.families = families;
        }
        if let Some(async_wrappers) = export.async_wrappers {
            config.async_wrappers = async_wrappers;
        }
        if let Some(factories) = export.non_throwing_factories {
            config.non_throwing_factories = factories;
        }
        if let Some(call_contexts) = export.call_contexts {
            config.call_contexts = call_contexts;
        }
        if let Some(pipeline) = export.pipeline {
            config.pipeline = pipeline;
        }
        if let Some(analysis) = export.analysis {
            config.analysis = analysis;
        }
        if let Some(disabled_rules) = export.disabled_rules {
            config.disabled_rules = disabled_rules;
        }

        config.validate()?;
        Ok(config)
    }

    /// Export to YAML (schema v1, every section spelled out)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(SCHEMA_VERSION),
            families: Some(self.families.clone()),
            async_wrappers: Some(self.async_wrappers.clone()),
            non_throwing_factories: Some(self.non_throwing_factories.clone()),
            call_contexts: Some(self.call_contexts.clone()),
            pipeline: Some(self.pipeline.clone()),
            analysis: Some(self.analysis.clone()),
            disabled_rules: Some(self.disabled_rules.clone()),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }

    /// Builder: add a wrapper family
    pub fn with_family(mut self, family: WrapperFamily) -> Self {
        self.families.push(family);
        self
    }

    /// Builder: adjust analysis options
    pub fn analysis<F>(mut self, f: F) -> Self
    where
        F: FnOnce(AnalysisOptions) -> AnalysisOptions,
    {
        self.analysis = f(self.analysis);
        self
    }

    /// Builder: adjust call contexts
    pub fn call_contexts<F>(mut self, f: F) -> Self
    where
        F: FnOnce(CallContextConfig) -> CallContextConfig,
    {
        self.call_contexts = f(self.call_contexts);
        self
    }

    /// Builder: recognize another non-throwing factory method
    pub fn with_non_throwing_factory(mut self, method: impl Into<String>) -> Self {
        self.non_throwing_factories.push(method.into());
        self
    }

    /// Builder: disable a rule by code
    pub fn disable_rule(mut self, code: impl Into<String>) -> Self {
        self.disabled_rules.push(code.into());
        self
    }

    pub fn is_rule_enabled(&self, code: &str) -> bool {
        !self.disabled_rules.iter().any(|r| r.eq_ignore_ascii_case(code))
    }

    pub fn is_non_throwing_factory(&self, method: &str) -> bool {
        self.non_throwing_factories.iter().any(|f| f == method)
    }

    pub fn is_async_wrapper(&self, name: &str) -> bool {
        self.async_wrappers.iter().any(|w| w == name)
    }

    /// One-line summary for logs
    pub fn describe(&self) -> String {
        let names: Vec<&str> = self.families.iter().map(|f| f.name.as_str()).collect();
        format!(
            "families=[{}] async_wrappers={} cross_lambda={} parallel={} disabled=[{}]",
            names.join(", "),
            self.async_wrappers.len(),
            self.analysis.cross_lambda_boundaries,
            self.analysis.parallel,
            self.disabled_rules.join(", ")
        )
    }
}

impl Validatable for GuardConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.families.is_empty() {
            return Err(ConfigError::NoFamilies);
        }
        self.families.validate_all()?;

        for (i, family) in self.families.iter().enumerate() {
            for earlier in &self.families[..i] {
                if earlier.name == family.name {
                    return Err(ConfigError::DuplicateFamily(family.name.clone()));
                }
                if let Some(shared) = family
                    .type_names
                    .iter()
                    .find(|t| earlier.matches_type_name(t))
                {
                    return Err(ConfigError::DuplicateTypeName {
                        type_name: shared.clone(),
                        first: earlier.name.clone(),
                        second: family.name.clone(),
                    });
                }
            }
        }

        if let Some(wrapper) = self
            .async_wrappers
            .iter()
            .find(|w| self.families.iter().any(|f| f.matches_type_name(w)))
        {
            return Err(ConfigError::invalid_family(
                wrapper.as_str(),
                "an async wrapper cannot also be a wrapper family",
            ));
        }

        if self.non_throwing_factories.iter().any(|f| f.is_empty()) {
            return Err(ConfigError::EmptyMethodName(
                "non_throwing_factories".to_string(),
            ));
        }

        let sections: [&dyn Validatable; 3] = [&self.call_contexts, &self.pipeline, &self.analysis];
        validate_sections(&sections)?;

        for rule in &self.disabled_rules {
            if !RULE_CODES.iter().any(|code| code.eq_ignore_ascii_case(rule)) {
                return Err(ConfigError::unknown_rule_with_suggestion(
                    rule.as_str(),
                    RULE_CODES,
                ));
            }
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "GuardConfig"
    }
}
