//! Errors raised while resolving or firing transitions.

use crate::registry::RegistryError;
use thiserror::Error;

/// Errors that can occur when querying or driving an entity
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error(transparent)]
    Lookup(#[from] RegistryError),

    #[error("state '{0}' not found in schema")]
    StateNotFound(String),

    #[error("no transition available from state '{status}' on event '{event}'")]
    NoTransition { status: String, event: String },

    #[error(
        "ambiguous transition from state '{status}' on event '{event}': \
         {count} transitions have passing guards"
    )]
    AmbiguousTransition {
        status: String,
        event: String,
        count: usize,
    },

    #[error("transition resolution was cancelled")]
    Cancelled,
}
