//! Type references as reported by the symbol oracle
//!
//! Types are identified by fully-qualified definition name plus type
//! arguments. A generic *definition* (`Result<T>` before construction) is
//! flagged separately so the classifier can tell it apart from a constructed
//! `Result<int>`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declaration identity (stable within one analysis unit)
pub type SymbolId = String;

/// Static type of an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Fully-qualified definition name, e.g. `CSharpFunctionalExtensions.Result`
    pub name: String,

    /// Type arguments (or type parameters for a definition)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_args: Vec<TypeRef>,

    /// Un-constructed generic definition
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_definition: bool,
}

impl TypeRef {
    /// Non-generic type
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_args: Vec::new(),
            is_definition: false,
        }
    }

    /// Constructed generic type
    pub fn generic(name: impl Into<String>, type_args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_args,
            is_definition: false,
        }
    }

    /// Generic definition with placeholder parameters `T0..Tn`
    pub fn definition(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            type_args: (0..arity).map(|i| TypeRef::named(format!("T{}", i))).collect(),
            is_definition: true,
        }
    }

    pub fn boolean() -> Self {
        Self::named("bool")
    }

    pub fn arity(&self) -> usize {
        self.type_args.len()
    }

    /// The only type argument of a constructed single-parameter generic
    pub fn single_type_arg(&self) -> Option<&TypeRef> {
        match self.type_args.as_slice() {
            [arg] if !self.is_definition => Some(arg),
            _ => None,
        }
    }

    /// Last segment of the qualified name
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Display form without namespaces (`Result<int>`)
    pub fn short_display(&self) -> String {
        if self.type_args.is_empty() {
            return self.simple_name().to_string();
        }
        let args: Vec<String> = self.type_args.iter().map(|t| t.short_display()).collect();
        format!("{}<{}>", self.simple_name(), args.join(", "))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.type_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}
