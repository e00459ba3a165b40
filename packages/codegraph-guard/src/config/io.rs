//! Configuration I/O schema
//!
//! YAML schema types. Loading and export live on `GuardConfig`.

use serde::{Deserialize, Serialize};

use super::families::WrapperFamily;
use super::guard_config::AnalysisOptions;
use super::method_tables::{CallContextConfig, PipelineMethods};

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// YAML Schema v1
///
/// Every section is optional; an absent section keeps its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub families: Option<Vec<WrapperFamily>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub async_wrappers: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_throwing_factories: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_contexts: Option<CallContextConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<PipelineMethods>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_rules: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document() {
        let export: ConfigExportV1 = serde_yaml::from_str("version: 1\n").unwrap();
        assert_eq!(export.version, Some(1));
        assert!(export.families.is_none());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<ConfigExportV1, _> = serde_yaml::from_str("version: 1\nrules: []\n");
        assert!(result.is_err());
    }
}
