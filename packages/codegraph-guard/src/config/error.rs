//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Numeric option out of range
    #[error("'{field}' is {value}, expected {min}..={max}. {hint}")]
    Range {
        field: String,
        value: String,
        min: String,
        max: String,
        hint: String,
    },

    /// No `version` key
    #[error("Guard configuration has no 'version' field. Start the file with 'version: 1'.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// No wrapper family configured
    #[error("At least one wrapper family must be configured")]
    NoFamilies,

    /// Family definition is unusable
    #[error("Invalid wrapper family '{family}': {reason}")]
    InvalidFamily { family: String, reason: String },

    /// Two families share a name
    #[error("Wrapper family '{0}' is defined more than once")]
    DuplicateFamily(String),

    /// Two families claim the same type identity
    #[error("Type '{type_name}' is claimed by both '{first}' and '{second}'")]
    DuplicateTypeName {
        type_name: String,
        first: String,
        second: String,
    },

    /// A required method table is empty
    #[error("Method table '{0}' must not be empty")]
    EmptyMethodTable(String),

    /// A method table lists an empty name
    #[error("Method table '{0}' contains an empty method name")]
    EmptyMethodName(String),

    /// A method is listed with contradicting meanings
    #[error("Method '{method}' appears in both '{first}' and '{second}'")]
    ConflictingMethod {
        method: String,
        first: String,
        second: String,
    },

    /// Unknown diagnostic code in `disabled_rules`
    #[error("Unknown rule '{rule}' in disabled_rules. {suggestion}")]
    UnknownRule { rule: String, suggestion: String },

    #[error("Cannot read guard configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed guard configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a range error with a hint
    pub fn range_with_hint(
        field: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
        hint: impl Into<String>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            hint: hint.into(),
        }
    }

    pub fn invalid_family(family: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFamily {
            family: family.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown rule error with the closest known code as suggestion
    pub fn unknown_rule_with_suggestion(rule: impl Into<String>, known: &[&str]) -> Self {
        let rule = rule.into();
        let suggestion = find_closest_match(&rule, known);
        Self::UnknownRule { rule, suggestion }
    }
}

/// Closest known code by edit distance
fn find_closest_match(target: &str, candidates: &[&str]) -> String {
    match candidates
        .iter()
        .min_by_key(|candidate| levenshtein_distance(&target.to_uppercase(), candidate))
    {
        Some(closest) => format!("Did you mean '{}'?", closest),
        None => "No rules available".to_string(),
    }
}

fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for i in 1..=a.len() {
        let mut prev = row[0];
        row[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let next = (row[j] + 1).min(row[j - 1] + 1).min(prev + cost);
            prev = row[j];
            row[j] = next;
        }
    }

    row[b.len()]
}
