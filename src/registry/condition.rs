//! Named guard predicates.

use super::error::RegistryKind;
use super::Registered;
use crate::core::Object;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Type alias for condition predicates.
///
/// The token is cancelled when the caller cancels the machine or when a
/// sibling guard has already denied the transition.
pub type ConditionFn<O> =
    Arc<dyn for<'a> Fn(&'a CancellationToken, &'a O) -> BoxFuture<'a, bool> + Send + Sync>;

/// A named predicate deciding whether a guarded transition may fire.
///
/// Conditions must not depend on the order in which sibling guards finish;
/// all guards of a transition run concurrently.
///
/// # Example
///
/// ```rust
/// use futures::FutureExt;
/// use workflow_fsm::core::Object;
/// use workflow_fsm::registry::Condition;
///
/// struct Ticket { status: String, assignee: Option<String> }
///
/// impl Object for Ticket {
///     fn status(&self) -> &str { &self.status }
///     fn set_status(&mut self, status: &str) { self.status = status.into() }
/// }
///
/// // Async predicate, may await external systems.
/// let assigned = Condition::new("isAssigned", |_cancel, ticket: &Ticket| {
///     async move { ticket.assignee.is_some() }.boxed()
/// });
///
/// // Plain predicate over the entity.
/// let open = Condition::from_fn("isOpen", |ticket: &Ticket| ticket.status == "open");
///
/// assert_eq!(assigned.name(), "isAssigned");
/// assert_eq!(open.name(), "isOpen");
/// ```
pub struct Condition<O> {
    name: String,
    evaluate: ConditionFn<O>,
}

impl<O: Object + 'static> Condition<O> {
    /// Create a condition from an async predicate.
    pub fn new<F>(name: impl Into<String>, evaluate: F) -> Self
    where
        F: for<'a> Fn(&'a CancellationToken, &'a O) -> BoxFuture<'a, bool> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            evaluate: Arc::new(evaluate),
        }
    }

    /// Create a condition from a synchronous predicate.
    pub fn from_fn<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Self::new(name, move |_cancel, object| {
            let allowed = predicate(object);
            async move { allowed }.boxed()
        })
    }
}

impl<O> Condition<O> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the predicate against `object`.
    pub fn evaluate<'a>(
        &'a self,
        cancel: &'a CancellationToken,
        object: &'a O,
    ) -> BoxFuture<'a, bool> {
        (self.evaluate)(cancel, object)
    }
}

impl<O> Registered for Condition<O> {
    const KIND: RegistryKind = RegistryKind::Condition;

    fn name(&self) -> &str {
        &self.name
    }
}

impl<O> Clone for Condition<O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            evaluate: Arc::clone(&self.evaluate),
        }
    }
}

impl<O> fmt::Debug for Condition<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").field("name", &self.name).finish()
    }
}
