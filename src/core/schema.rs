//! The immutable workflow description.

use super::state::State;
use super::transition::Transition;
use serde::{Deserialize, Serialize};

/// A complete workflow graph: declared states, the initial and final states,
/// and the transitions between them.
///
/// Schemas are plain data. They are validated when handed to
/// [`MachineDefinition::new`](crate::definition::MachineDefinition::new).
///
/// # Example
///
/// ```rust
/// use workflow_fsm::core::{Schema, State, Transition};
///
/// let schema = Schema {
///     name: "document".into(),
///     initial_state: State::new("draft"),
///     final_states: vec![State::new("published")],
///     states: vec![State::new("draft"), State::new("published")],
///     transitions: vec![Transition::new("draft", "published", "publish")],
/// };
///
/// assert!(schema.state("draft").is_some());
/// assert!(schema.is_final("published"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub initial_state: State,
    #[serde(default)]
    pub final_states: Vec<State>,
    pub states: Vec<State>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl Schema {
    /// Look up a declared state by name.
    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.matches(name))
    }

    /// Whether `name` is one of the final states.
    pub fn is_final(&self, name: &str) -> bool {
        self.final_states.iter().any(|s| s.matches(name))
    }

    /// Transitions leaving `status`, optionally narrowed to one event, in
    /// declaration order.
    pub fn transitions_from<'a, 'q>(
        &'a self,
        status: &'q str,
        event: Option<&'q str>,
    ) -> impl Iterator<Item = &'a Transition> + 'q
    where
        'a: 'q,
    {
        self.transitions
            .iter()
            .filter(move |t| t.matches(status, event))
    }
}
