//! Analyzer configuration
//!
//! Wrapper families, call-context and pipeline method tables, analysis
//! switches and disabled rules, loadable from versioned YAML.
//!
//! ```rust,ignore
//! use codegraph_guard::config::GuardConfig;
//!
//! // Defaults: Result / Maybe families
//! let config = GuardConfig::default();
//!
//! // Adjust in code
//! let config = GuardConfig::default()
//!     .analysis(|a| a.cross_lambda_boundaries(true))
//!     .disable_rule("GRD002");
//!
//! // Or load a team file
//! let config = GuardConfig::from_yaml("guard.yaml")?;
//! ```

pub mod error;
pub mod families;
pub mod guard_config;
pub mod io;
pub mod method_tables;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use families::WrapperFamily;
pub use guard_config::{AnalysisOptions, GuardConfig};
pub use io::{ConfigExportV1, SCHEMA_VERSION};
pub use method_tables::{CallContextConfig, PipelineMethods};
pub use validation::{validate_sections, Validatable, ValidatableCollection};
