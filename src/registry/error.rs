//! Registry lookup and registration errors.

use std::fmt;
use thiserror::Error;

/// Which registry an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Condition,
    Action,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Condition => write!(f, "condition"),
            RegistryKind::Action => write!(f, "action"),
        }
    }
}

/// Errors raised while building or querying a registry
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{kind} with name '{name}' not found")]
    NotFound { kind: RegistryKind, name: String },

    #[error("{kind} with name '{name}' is registered more than once")]
    Duplicate { kind: RegistryKind, name: String },
}
