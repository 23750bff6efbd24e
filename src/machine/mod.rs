//! The machine façade that drives one entity at a time.
//!
//! A [`Machine`] pairs a shared [`MachineDefinition`] with a cancellation
//! token. It keeps no state of its own: the entity's status is the only
//! mutable state, and it is owned by the host.

pub mod error;

pub use error::TransitionError;

use crate::core::{Object, State, Transition};
use crate::definition::MachineDefinition;
use crate::registry::ActionResult;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Drives entities through a validated definition.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
/// use workflow_fsm::builder::{SchemaBuilder, TransitionBuilder};
/// use workflow_fsm::core::Object;
/// use workflow_fsm::definition::MachineDefinition;
/// use workflow_fsm::machine::Machine;
///
/// struct Task { status: String }
///
/// impl Object for Task {
///     fn status(&self) -> &str { &self.status }
///     fn set_status(&mut self, status: &str) { self.status = status.into() }
/// }
///
/// # futures::executor::block_on(async {
/// let schema = SchemaBuilder::new()
///     .name("task")
///     .initial("todo")
///     .states(["todo", "done"])
///     .final_state("done")
///     .transition(TransitionBuilder::new().from("todo").to("done").on("finish"))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// let definition = Arc::new(MachineDefinition::<Task>::new(schema, vec![], vec![]).unwrap());
/// let machine = Machine::new(CancellationToken::new(), definition);
///
/// let mut task = Task { status: String::new() };
/// machine.start(&mut task);
/// assert!(machine.is_running(&task));
///
/// machine.send_event(&mut task, "finish").await.unwrap();
/// assert_eq!(task.status(), "done");
/// assert!(machine.is_in_final_state(&task));
/// # });
/// ```
pub struct Machine<O> {
    definition: Arc<MachineDefinition<O>>,
    cancel: CancellationToken,
}

impl<O: Object> Machine<O> {
    /// Create a machine bound to `cancel`.
    ///
    /// The token is handed to every guard and action this machine invokes.
    pub fn new(cancel: CancellationToken, definition: Arc<MachineDefinition<O>>) -> Self {
        Self { definition, cancel }
    }

    /// The shared definition this machine drives.
    pub fn definition(&self) -> &Arc<MachineDefinition<O>> {
        &self.definition
    }

    /// The token handed to guards and actions.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Put the entity into the initial state. No guards are checked.
    pub fn start(&self, object: &mut O) {
        let initial = &self.definition.schema().initial_state;
        object.set_status(&initial.name);
        tracing::debug!(status = %initial, "entity started");
    }

    /// Transitions that can fire from the entity's status.
    ///
    /// Pass an event to narrow the search to that event; `None` matches every
    /// event.
    pub async fn available_transitions(
        &self,
        object: &O,
        event: Option<&str>,
    ) -> Result<Vec<&Transition>, TransitionError> {
        self.definition
            .find_available_transitions(&self.cancel, object, event)
            .await
    }

    /// The declared state matching the entity's status.
    pub fn current_state(&self, object: &O) -> Result<&State, TransitionError> {
        self.definition
            .schema()
            .state(object.status())
            .ok_or_else(|| TransitionError::StateNotFound(object.status().to_string()))
    }

    /// Whether the entity's status names a final state.
    pub fn is_in_final_state(&self, object: &O) -> bool {
        self.definition.schema().is_final(object.status())
    }

    /// All declared states, in schema order.
    pub fn available_states(&self) -> &[State] {
        self.definition.available_states()
    }

    /// True if the entity is in a declared, non-final state.
    pub fn is_running(&self, object: &O) -> bool {
        self.current_state(object).is_ok() && !self.is_in_final_state(object)
    }

    /// Best-effort probe: whether `event` would find at least one transition.
    ///
    /// Any error counts as `false`.
    pub async fn can(&self, object: &O, event: &str) -> bool {
        matches!(
            self.available_transitions(object, Some(event)).await,
            Ok(transitions) if !transitions.is_empty()
        )
    }

    /// Fire the single transition matching `event` and run its actions.
    ///
    /// Exactly one transition must qualify; zero or several are refused
    /// without touching the entity. Every action name is resolved before the
    /// status changes. Actions then run in declared order, each seeing the
    /// results of those before it; an action's own error is recorded in its
    /// result and does not stop the rest.
    pub async fn send_event(
        &self,
        object: &mut O,
        event: &str,
    ) -> Result<Vec<ActionResult>, TransitionError> {
        let mut candidates = self.available_transitions(object, Some(event)).await?;
        let transition = match candidates.len() {
            1 => candidates.remove(0),
            0 => {
                tracing::debug!(status = object.status(), event, "no transition for event");
                return Err(TransitionError::NoTransition {
                    status: object.status().to_string(),
                    event: event.to_string(),
                });
            }
            count => {
                tracing::debug!(status = object.status(), event, count, "ambiguous transition");
                return Err(TransitionError::AmbiguousTransition {
                    status: object.status().to_string(),
                    event: event.to_string(),
                    count,
                });
            }
        };

        let actions = transition
            .actions
            .iter()
            .map(|definition| {
                self.definition
                    .actions()
                    .get(&definition.name)
                    .map(|action| (action, definition))
            })
            .collect::<Result<Vec<_>, _>>()?;

        object.set_status(&transition.to);
        tracing::debug!(
            from = %transition.from,
            to = %transition.to,
            event,
            actions = actions.len(),
            "transition committed"
        );

        let mut results = Vec::with_capacity(actions.len());
        for (action, definition) in actions {
            let result = action
                .run(&self.cancel, object, &definition.params, &results)
                .await;
            if let Some(error) = &result.error {
                tracing::warn!(action = %result.name, %error, "action reported an error");
            }
            results.push(result);
        }

        Ok(results)
    }
}

impl<O> Clone for Machine<O> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            cancel: self.cancel.clone(),
        }
    }
}
