//! Configuration validation
//!
//! Every configuration section implements `Validatable`. `GuardConfig`
//! validates its families and sections first, then the rules that span
//! sections (unique type identities, known rule codes).

use tracing::debug;

use super::error::{ConfigError, ConfigResult};

/// A configuration section that can check itself
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;

    /// Section name used when logging a rejected section
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

fn rejected(section: &dyn Validatable, err: &ConfigError) {
    debug!(section = section.config_name(), error = %err, "configuration section rejected");
}

/// Validate sections in order, stopping at the first error
pub fn validate_sections(sections: &[&dyn Validatable]) -> ConfigResult<()> {
    for section in sections {
        if let Err(err) = section.validate() {
            rejected(*section, &err);
            return Err(err);
        }
    }
    Ok(())
}

/// Element-wise validation for lists of sections (`families`)
pub trait ValidatableCollection {
    fn validate_all(&self) -> ConfigResult<()>;
}

impl<T: Validatable> ValidatableCollection for [T] {
    fn validate_all(&self) -> ConfigResult<()> {
        let sections: Vec<&dyn Validatable> = self.iter().map(|s| s as &dyn Validatable).collect();
        validate_sections(&sections)
    }
}
