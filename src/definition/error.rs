//! Construction-time validation errors.

use crate::registry::RegistryError;
use thiserror::Error;

/// Errors that prevent a machine definition from being built.
///
/// Construction is all-or-nothing: when any of these is returned no
/// definition exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("transition {transition} refers to state '{state}' which doesn't exist in schema")]
    UnknownState { transition: String, state: String },

    #[error("guard '{guard}' in transition {transition} refers to a condition which doesn't exist")]
    UnknownCondition { transition: String, guard: String },

    #[error("action '{action}' in transition {transition} refers to an action which doesn't exist")]
    UnknownAction { transition: String, action: String },

    #[error("initial state '{0}' is not declared in schema")]
    UndeclaredInitialState(String),

    #[error("final state '{0}' is not declared in schema")]
    UndeclaredFinalState(String),

    #[error("state '{0}' is declared more than once")]
    DuplicateState(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
