//! Builder API for ergonomic schema and definition construction.
//!
//! This module provides fluent builders for transitions, schemas and
//! machine definitions, plus shorthands for the common transition shapes.

pub mod definition;
pub mod error;
pub mod schema;
pub mod transition;

pub use definition::MachineDefinitionBuilder;
pub use error::BuildError;
pub use schema::SchemaBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Guard, Transition};

/// Create an unguarded transition without actions.
///
/// # Example
///
/// ```
/// use workflow_fsm::builder::simple_transition;
///
/// let transition = simple_transition("draft", "review", "submit");
/// assert!(transition.guards.is_empty());
/// ```
pub fn simple_transition(from: &str, to: &str, event: &str) -> Transition {
    Transition::new(from, to, event)
}

/// Create a transition gated by the named conditions.
///
/// # Example
///
/// ```
/// use workflow_fsm::builder::guarded_transition;
///
/// let transition = guarded_transition("draft", "review", "submit", &["hasTitle", "hasBody"]);
/// assert_eq!(transition.guards.len(), 2);
/// ```
pub fn guarded_transition(from: &str, to: &str, event: &str, guards: &[&str]) -> Transition {
    let mut transition = Transition::new(from, to, event);
    transition.guards = guards.iter().map(|name| Guard::new(*name)).collect();
    transition
}
