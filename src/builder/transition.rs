//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{ActionDefinition, Guard, Param, Transition};

/// Builder for constructing transitions with a fluent API.
#[derive(Debug, Default)]
pub struct TransitionBuilder {
    from: Option<String>,
    to: Option<String>,
    event: String,
    guards: Vec<Guard>,
    actions: Vec<ActionDefinition>,
}

impl TransitionBuilder {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source state (required).
    pub fn from(mut self, state: impl Into<String>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<String>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Label the transition with an event (optional).
    pub fn on(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    /// Add a guard referring to a named condition.
    pub fn guard(mut self, name: impl Into<String>) -> Self {
        self.guards.push(Guard::new(name));
        self
    }

    /// Add a guard with call-site parameters.
    pub fn guard_with(mut self, name: impl Into<String>, params: Vec<Param>) -> Self {
        self.guards.push(Guard::with_params(name, params));
        self
    }

    /// Append an action; actions run in the order they are added.
    pub fn action(mut self, name: impl Into<String>) -> Self {
        self.actions.push(ActionDefinition::new(name));
        self
    }

    /// Append an action with call-site parameters.
    pub fn action_with(mut self, name: impl Into<String>, params: Vec<Param>) -> Self {
        self.actions.push(ActionDefinition::with_params(name, params));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Transition {
            from,
            to,
            event: self.event,
            guards: self.guards,
            actions: self.actions,
        })
    }
}
