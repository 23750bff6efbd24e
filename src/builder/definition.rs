//! Builder for machine definitions.

use crate::core::{Object, Schema};
use crate::definition::{MachineDefinition, ValidationError};
use crate::registry::{Action, Condition};

/// Collects conditions and actions for a schema, then validates the lot.
pub struct MachineDefinitionBuilder<O> {
    schema: Schema,
    conditions: Vec<Condition<O>>,
    actions: Vec<Action<O>>,
    strict_actions: bool,
}

impl<O: Object> MachineDefinitionBuilder<O> {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            conditions: Vec::new(),
            actions: Vec::new(),
            strict_actions: false,
        }
    }

    /// Register a condition.
    pub fn condition(mut self, condition: Condition<O>) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Register several conditions at once.
    pub fn conditions(mut self, conditions: impl IntoIterator<Item = Condition<O>>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Register an action.
    pub fn action(mut self, action: Action<O>) -> Self {
        self.actions.push(action);
        self
    }

    /// Register several actions at once.
    pub fn actions(mut self, actions: impl IntoIterator<Item = Action<O>>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Also require every action name to resolve at build time.
    ///
    /// Off by default: unknown action names are then reported only when an
    /// event that would run them is sent.
    pub fn strict_actions(mut self, strict: bool) -> Self {
        self.strict_actions = strict;
        self
    }

    /// Validate and build the definition.
    pub fn build(self) -> Result<MachineDefinition<O>, ValidationError> {
        MachineDefinition::validated(
            self.schema,
            self.conditions,
            self.actions,
            self.strict_actions,
        )
    }
}

impl<O: Object> MachineDefinition<O> {
    /// Start a [`MachineDefinitionBuilder`] for `schema`.
    pub fn builder(schema: Schema) -> MachineDefinitionBuilder<O> {
        MachineDefinitionBuilder::new(schema)
    }
}
