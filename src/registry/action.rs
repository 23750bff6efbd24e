//! Named side-effecting routines run after a transition is committed.

use super::error::RegistryKind;
use super::Registered;
use crate::core::{Object, Param};
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Outcome of one action invocation.
///
/// A failed action is reported here rather than propagated, so the caller
/// decides what a failure means. Results of earlier actions in the same
/// transition are handed to later ones in order.
#[derive(Debug)]
pub struct ActionResult {
    pub name: String,
    pub error: Option<anyhow::Error>,
}

impl ActionResult {
    /// A successful result for the named action.
    ///
    /// ```rust
    /// use workflow_fsm::registry::ActionResult;
    ///
    /// let result = ActionResult::ok("notify");
    /// assert_eq!(result.name, "notify");
    /// assert!(result.is_ok());
    /// ```
    pub fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error: None,
        }
    }

    /// A result carrying the action's error.
    pub fn failed(name: impl Into<String>, error: impl Into<anyhow::Error>) -> Self {
        Self {
            name: name.into(),
            error: Some(error.into()),
        }
    }

    /// Record `result` under the action's name.
    pub fn from_result(name: impl Into<String>, result: anyhow::Result<()>) -> Self {
        Self {
            name: name.into(),
            error: result.err(),
        }
    }

    /// True when the action reported no error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Type alias for action routines.
pub type ActionFn<O> = Arc<
    dyn for<'a> Fn(
            &'a CancellationToken,
            &'a mut O,
            &'a [Param],
            &'a [ActionResult],
        ) -> BoxFuture<'a, ActionResult>
        + Send
        + Sync,
>;

/// A named routine referenced by [`ActionDefinition`](crate::core::ActionDefinition)s.
///
/// Actions receive the entity mutably, the call-site parameters, and the
/// results of the actions that ran before them in the same transition.
pub struct Action<O> {
    name: String,
    run: ActionFn<O>,
}

impl<O: Object + 'static> Action<O> {
    /// Create an action from an async routine.
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: for<'a> Fn(
                &'a CancellationToken,
                &'a mut O,
                &'a [Param],
                &'a [ActionResult],
            ) -> BoxFuture<'a, ActionResult>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            run: Arc::new(run),
        }
    }

    /// Create an action from a synchronous routine.
    ///
    /// The returned error, if any, is recorded in the [`ActionResult`]
    /// under this action's name.
    ///
    /// ```rust
    /// use workflow_fsm::core::{find_param, Object};
    /// use workflow_fsm::registry::Action;
    ///
    /// struct Order { status: String, log: Vec<String> }
    ///
    /// impl Object for Order {
    ///     fn status(&self) -> &str { &self.status }
    ///     fn set_status(&mut self, status: &str) { self.status = status.into() }
    /// }
    ///
    /// let audit = Action::from_fn("audit", |order: &mut Order, params, _prior| {
    ///     let note = find_param(params, "note")
    ///         .and_then(|p| p.value.as_str())
    ///         .unwrap_or("n/a");
    ///     order.log.push(note.to_string());
    ///     Ok(())
    /// });
    /// assert_eq!(audit.name(), "audit");
    /// ```
    pub fn from_fn<F>(name: impl Into<String>, routine: F) -> Self
    where
        F: Fn(&mut O, &[Param], &[ActionResult]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let name = name.into();
        let result_name = name.clone();
        Self::new(name, move |_cancel, object, params, prior| {
            let result = ActionResult::from_result(result_name.clone(), routine(object, params, prior));
            async move { result }.boxed()
        })
    }
}

impl<O> Action<O> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the routine.
    pub fn run<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        object: &'a mut O,
        params: &'a [Param],
        prior: &'a [ActionResult],
    ) -> BoxFuture<'a, ActionResult> {
        (self.run)(cancel, object, params, prior)
    }
}

impl<O> Registered for Action<O> {
    const KIND: RegistryKind = RegistryKind::Action;

    fn name(&self) -> &str {
        &self.name
    }
}

impl<O> Clone for Action<O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            run: Arc::clone(&self.run),
        }
    }
}

impl<O> fmt::Debug for Action<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish()
    }
}
