//! Wrapper family catalog
//!
//! A family is one two-state wrapper type (or several aliases of it) plus
//! the member names that read its state. Families are data, so the analyzer
//! recognizes any library that follows the same shape.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use crate::features::type_classifier::domain::{AccessorRole, WrapperState};

/// One recognized two-state wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WrapperFamily {
    /// Short name used in messages (`Result`, `Maybe`)
    pub name: String,

    /// Fully-qualified definition names of the single-parameter generic
    pub type_names: Vec<String>,

    /// Boolean that holds in the ok state
    pub ok_discriminant: String,

    /// Boolean that holds in the not-ok state
    pub not_ok_discriminant: String,

    /// Payload readable only when ok
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok_payload: Option<String>,

    /// Payload readable only when not ok
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_ok_payload: Option<String>,

    /// `bool TryGet…(out T)` succeeding when ok
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok_try_accessor: Option<String>,

    /// `bool TryGet…(out E)` succeeding when not ok
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_ok_try_accessor: Option<String>,
}

impl WrapperFamily {
    /// `CSharpFunctionalExtensions.Result<T>`
    pub fn result() -> Self {
        Self {
            name: "Result".to_string(),
            type_names: vec!["CSharpFunctionalExtensions.Result".to_string()],
            ok_discriminant: "IsSuccess".to_string(),
            not_ok_discriminant: "IsFailure".to_string(),
            ok_payload: Some("Value".to_string()),
            not_ok_payload: Some("Error".to_string()),
            ok_try_accessor: Some("TryGetValue".to_string()),
            not_ok_try_accessor: Some("TryGetError".to_string()),
        }
    }

    /// `CSharpFunctionalExtensions.Maybe<T>`
    pub fn maybe() -> Self {
        Self {
            name: "Maybe".to_string(),
            type_names: vec!["CSharpFunctionalExtensions.Maybe".to_string()],
            ok_discriminant: "HasValue".to_string(),
            not_ok_discriminant: "HasNoValue".to_string(),
            ok_payload: Some("Value".to_string()),
            not_ok_payload: None,
            ok_try_accessor: Some("TryGetValue".to_string()),
            not_ok_try_accessor: None,
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![Self::result(), Self::maybe()]
    }

    /// Whether `name` is one of this family's definition names
    pub fn matches_type_name(&self, name: &str) -> bool {
        self.type_names.iter().any(|t| t == name)
    }

    /// Role of `member` on this family, if it reads state
    pub fn accessor_role(&self, member: &str) -> Option<AccessorRole> {
        if member == self.ok_discriminant {
            return Some(AccessorRole::Discriminant(WrapperState::Ok));
        }
        if member == self.not_ok_discriminant {
            return Some(AccessorRole::Discriminant(WrapperState::NotOk));
        }
        if self.ok_payload.as_deref() == Some(member) {
            return Some(AccessorRole::Payload(WrapperState::Ok));
        }
        if self.not_ok_payload.as_deref() == Some(member) {
            return Some(AccessorRole::Payload(WrapperState::NotOk));
        }
        if self.ok_try_accessor.as_deref() == Some(member) {
            return Some(AccessorRole::TryAccessor(WrapperState::Ok));
        }
        if self.not_ok_try_accessor.as_deref() == Some(member) {
            return Some(AccessorRole::TryAccessor(WrapperState::NotOk));
        }
        None
    }

    pub fn discriminant_for(&self, state: WrapperState) -> &str {
        match state {
            WrapperState::Ok => &self.ok_discriminant,
            WrapperState::NotOk => &self.not_ok_discriminant,
        }
    }

    pub fn payload_for(&self, state: WrapperState) -> Option<&str> {
        match state {
            WrapperState::Ok => self.ok_payload.as_deref(),
            WrapperState::NotOk => self.not_ok_payload.as_deref(),
        }
    }

    /// Member names with a role, in declaration order
    fn member_names(&self) -> Vec<&str> {
        let mut names = vec![self.ok_discriminant.as_str(), self.not_ok_discriminant.as_str()];
        names.extend(
            [
                &self.ok_payload,
                &self.not_ok_payload,
                &self.ok_try_accessor,
                &self.not_ok_try_accessor,
            ]
            .into_iter()
            .filter_map(|m| m.as_deref()),
        );
        names
    }
}

impl Validatable for WrapperFamily {
    fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid_family("<unnamed>", "name must not be empty"));
        }
        if self.type_names.is_empty() {
            return Err(ConfigError::invalid_family(
                &self.name,
                "at least one type name is required",
            ));
        }
        if let Some(bad) = self
            .type_names
            .iter()
            .find(|t| t.is_empty() || t.contains(|c: char| c.is_whitespace() || c == '<'))
        {
            return Err(ConfigError::invalid_family(
                &self.name,
                format!("'{}' is not a definition name", bad),
            ));
        }
        if self.ok_discriminant.is_empty() || self.not_ok_discriminant.is_empty() {
            return Err(ConfigError::invalid_family(
                &self.name,
                "both discriminants are required",
            ));
        }
        if self.ok_payload.is_none() && self.not_ok_payload.is_none() {
            return Err(ConfigError::invalid_family(
                &self.name,
                "at least one payload accessor is required",
            ));
        }

        // Payload members may coincide across families but not within one
        let names = self.member_names();
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(ConfigError::invalid_family(
                    &self.name,
                    "member names must not be empty",
                ));
            }
            if names[..i].contains(name) {
                return Err(ConfigError::invalid_family(
                    &self.name,
                    format!("member '{}' is assigned two roles", name),
                ));
            }
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "WrapperFamily"
    }
}
