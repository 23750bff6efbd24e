//! Declared states of a workflow schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in the workflow graph.
///
/// States are identified solely by name. An entity is "in" a state when its
/// status string equals the state's name.
///
/// # Example
///
/// ```rust
/// use workflow_fsm::core::State;
///
/// let draft = State::new("draft");
/// assert_eq!(draft.name, "draft");
/// assert_eq!(draft, State::from("draft"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub name: String,
}

impl State {
    /// Create a state with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Check whether an entity status refers to this state.
    pub fn matches(&self, status: &str) -> bool {
        self.name == status
    }
}

impl From<&str> for State {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for State {
    fn from(name: String) -> Self {
        Self { name }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
