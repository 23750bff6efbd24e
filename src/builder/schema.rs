//! Builder for constructing schemas.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Schema, State, Transition};

/// Builder for constructing schemas with a fluent API.
///
/// The builder only checks that required fields are present. Referential
/// checks happen when the schema is turned into a
/// [`MachineDefinition`](crate::definition::MachineDefinition).
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    name: String,
    initial: Option<State>,
    final_states: Vec<State>,
    states: Vec<State>,
    transitions: Vec<Transition>,
}

impl SchemaBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<State>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare a state.
    pub fn state(mut self, state: impl Into<State>) -> Self {
        self.states.push(state.into());
        self
    }

    /// Declare several states at once.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Mark a state as final. It must also be declared.
    pub fn final_state(mut self, state: impl Into<State>) -> Self {
        self.final_states.push(state.into());
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the schema.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Schema, BuildError> {
        let initial_state = self.initial.ok_or(BuildError::MissingInitialState)?;

        Ok(Schema {
            name: self.name,
            initial_state,
            final_states: self.final_states,
            states: self.states,
            transitions: self.transitions,
        })
    }
}
