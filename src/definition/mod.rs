//! Validated machine definitions.
//!
//! A [`MachineDefinition`] owns a [`Schema`] together with the condition and
//! action registries its transitions refer to. All referential checks happen
//! once, in [`MachineDefinition::new`]; afterwards the definition is
//! read-only and can be shared between machines behind an `Arc`.

pub mod error;
mod resolve;

pub use error::ValidationError;

use crate::core::{Object, Schema, State};
use crate::registry::{Action, Actions, Condition, Conditions, Registry};
use std::collections::HashSet;
use std::fmt;

/// A schema plus the registries it is validated against.
pub struct MachineDefinition<O> {
    schema: Schema,
    conditions: Conditions<O>,
    actions: Actions<O>,
}

impl<O: Object> MachineDefinition<O> {
    /// Validate and build a definition.
    ///
    /// Action names are resolved lazily, when an event is sent. Use
    /// [`MachineDefinitionBuilder::strict_actions`](crate::builder::MachineDefinitionBuilder::strict_actions)
    /// to check them here as well.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workflow_fsm::core::{Guard, Object, Schema, State, Transition};
    /// use workflow_fsm::definition::{MachineDefinition, ValidationError};
    /// use workflow_fsm::registry::Condition;
    ///
    /// struct Task { status: String }
    ///
    /// impl Object for Task {
    ///     fn status(&self) -> &str { &self.status }
    ///     fn set_status(&mut self, status: &str) { self.status = status.into() }
    /// }
    ///
    /// let mut transition = Transition::new("todo", "done", "finish");
    /// transition.guards.push(Guard::new("isReady"));
    ///
    /// let schema = Schema {
    ///     name: "task".into(),
    ///     initial_state: State::new("todo"),
    ///     final_states: vec![State::new("done")],
    ///     states: vec![State::new("todo"), State::new("done")],
    ///     transitions: vec![transition],
    /// };
    ///
    /// let missing = MachineDefinition::<Task>::new(schema.clone(), vec![], vec![]);
    /// assert!(matches!(missing, Err(ValidationError::UnknownCondition { .. })));
    ///
    /// let ready = Condition::from_fn("isReady", |_: &Task| true);
    /// assert!(MachineDefinition::new(schema, vec![ready], vec![]).is_ok());
    /// ```
    pub fn new(
        schema: Schema,
        conditions: Vec<Condition<O>>,
        actions: Vec<Action<O>>,
    ) -> Result<Self, ValidationError> {
        Self::validated(schema, conditions, actions, false)
    }

    pub(crate) fn validated(
        schema: Schema,
        conditions: Vec<Condition<O>>,
        actions: Vec<Action<O>>,
        strict_actions: bool,
    ) -> Result<Self, ValidationError> {
        let definition = Self {
            schema,
            conditions: Registry::new(conditions)?,
            actions: Registry::new(actions)?,
        };

        definition.validate_states()?;
        definition.validate_transitions(strict_actions)?;

        tracing::debug!(
            schema = %definition.schema.name,
            states = definition.schema.states.len(),
            transitions = definition.schema.transitions.len(),
            conditions = definition.conditions.len(),
            actions = definition.actions.len(),
            "machine definition validated"
        );
        Ok(definition)
    }

    fn validate_states(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for state in &self.schema.states {
            if !seen.insert(state.name.as_str()) {
                return Err(ValidationError::DuplicateState(state.name.clone()));
            }
        }

        let initial = &self.schema.initial_state.name;
        if !seen.contains(initial.as_str()) {
            return Err(ValidationError::UndeclaredInitialState(initial.clone()));
        }

        if let Some(state) = self
            .schema
            .final_states
            .iter()
            .find(|s| !seen.contains(s.name.as_str()))
        {
            return Err(ValidationError::UndeclaredFinalState(state.name.clone()));
        }

        Ok(())
    }

    fn validate_transitions(&self, strict_actions: bool) -> Result<(), ValidationError> {
        // states first, then guards, across all transitions
        for t in &self.schema.transitions {
            for state in [&t.from, &t.to] {
                if self.schema.state(state).is_none() {
                    return Err(ValidationError::UnknownState {
                        transition: t.to_string(),
                        state: state.clone(),
                    });
                }
            }
        }

        for t in &self.schema.transitions {
            if let Some(guard) = t.guards.iter().find(|g| !self.conditions.contains(&g.name)) {
                return Err(ValidationError::UnknownCondition {
                    transition: t.to_string(),
                    guard: guard.name.clone(),
                });
            }
        }

        if strict_actions {
            for t in &self.schema.transitions {
                if let Some(action) = t.actions.iter().find(|a| !self.actions.contains(&a.name)) {
                    return Err(ValidationError::UnknownAction {
                        transition: t.to_string(),
                        action: action.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl<O> MachineDefinition<O> {
    /// The validated schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn conditions(&self) -> &Conditions<O> {
        &self.conditions
    }

    pub fn actions(&self) -> &Actions<O> {
        &self.actions
    }

    /// All declared states, in schema order.
    pub fn available_states(&self) -> &[State] {
        &self.schema.states
    }
}

impl<O> fmt::Debug for MachineDefinition<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineDefinition")
            .field("schema", &self.schema)
            .field("conditions", &self.conditions.names())
            .field("actions", &self.actions.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionDefinition, Guard, Transition};
    use crate::registry::{RegistryError, RegistryKind};

    struct Obj {
        status: String,
    }

    impl Object for Obj {
        fn status(&self) -> &str {
            &self.status
        }

        fn set_status(&mut self, status: &str) {
            self.status = status.to_string();
        }
    }

    fn schema(transitions: Vec<Transition>) -> Schema {
        Schema {
            name: "test".into(),
            initial_state: State::new("one"),
            final_states: vec![State::new("two")],
            states: vec![State::new("one"), State::new("two")],
            transitions,
        }
    }

    fn guarded(guard: &str) -> Transition {
        let mut t = Transition::new("one", "two", "");
        t.guards.push(Guard::new(guard));
        t
    }

    #[test]
    fn schema_without_transitions_is_valid() {
        assert!(MachineDefinition::<Obj>::new(schema(vec![]), vec![], vec![]).is_ok());
    }

    #[test]
    fn unknown_guard_condition_fails() {
        let result = MachineDefinition::<Obj>::new(schema(vec![guarded("lessThan")]), vec![], vec![]);

        assert_eq!(
            result.unwrap_err(),
            ValidationError::UnknownCondition {
                transition: "one -> two".into(),
                guard: "lessThan".into(),
            }
        );
    }

    #[test]
    fn registered_guard_condition_passes() {
        let less_than = Condition::from_fn("lessThan", |_: &Obj| true);

        let result = MachineDefinition::new(schema(vec![guarded("lessThan")]), vec![less_than], vec![]);
        assert!(result.is_ok());
    }

    #[test]
    fn transition_to_unknown_state_fails() {
        let result = MachineDefinition::<Obj>::new(
            schema(vec![Transition::new("two", "unknown_state", "")]),
            vec![],
            vec![],
        );

        assert!(matches!(
            result,
            Err(ValidationError::UnknownState { ref state, .. }) if state == "unknown_state"
        ));
    }

    #[test]
    fn transition_from_unknown_state_fails() {
        let result = MachineDefinition::<Obj>::new(
            schema(vec![Transition::new("zero", "one", "")]),
            vec![],
            vec![],
        );

        assert!(matches!(
            result,
            Err(ValidationError::UnknownState { ref state, .. }) if state == "zero"
        ));
    }

    #[test]
    fn state_errors_are_reported_before_guard_errors() {
        let result = MachineDefinition::<Obj>::new(
            schema(vec![guarded("missing"), Transition::new("one", "nowhere", "")]),
            vec![],
            vec![],
        );

        assert!(matches!(result, Err(ValidationError::UnknownState { .. })));
    }

    #[test]
    fn undeclared_initial_state_fails() {
        let mut schema = schema(vec![]);
        schema.initial_state = State::new("zero");

        let result = MachineDefinition::<Obj>::new(schema, vec![], vec![]);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::UndeclaredInitialState("zero".into())
        );
    }

    #[test]
    fn undeclared_final_state_fails() {
        let mut schema = schema(vec![]);
        schema.final_states.push(State::new("three"));

        let result = MachineDefinition::<Obj>::new(schema, vec![], vec![]);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::UndeclaredFinalState("three".into())
        );
    }

    #[test]
    fn duplicate_state_fails() {
        let mut schema = schema(vec![]);
        schema.states.push(State::new("one"));

        let result = MachineDefinition::<Obj>::new(schema, vec![], vec![]);
        assert_eq!(result.unwrap_err(), ValidationError::DuplicateState("one".into()));
    }

    #[test]
    fn duplicate_condition_fails() {
        let result = MachineDefinition::new(
            schema(vec![]),
            vec![
                Condition::from_fn("same", |_: &Obj| true),
                Condition::from_fn("same", |_: &Obj| false),
            ],
            vec![],
        );

        assert_eq!(
            result.unwrap_err(),
            ValidationError::Registry(RegistryError::Duplicate {
                kind: RegistryKind::Condition,
                name: "same".into(),
            })
        );
    }

    #[test]
    fn unknown_action_is_accepted_unless_strict() {
        let mut t = Transition::new("one", "two", "go");
        t.actions.push(ActionDefinition::new("notify"));

        let lazy = MachineDefinition::<Obj>::validated(schema(vec![t.clone()]), vec![], vec![], false);
        assert!(lazy.is_ok());

        let strict = MachineDefinition::<Obj>::validated(schema(vec![t]), vec![], vec![], true);
        assert_eq!(
            strict.unwrap_err(),
            ValidationError::UnknownAction {
                transition: "one -> two on 'go'".into(),
                action: "notify".into(),
            }
        );
    }

    #[test]
    fn available_states_returns_schema_states() {
        let definition = MachineDefinition::<Obj>::new(schema(vec![]), vec![], vec![]).unwrap();

        assert_eq!(
            definition.available_states(),
            &[State::new("one"), State::new("two")]
        );
    }
}
