//! Transition search and concurrent guard evaluation.

use super::MachineDefinition;
use crate::core::{Object, Transition};
use crate::machine::TransitionError;
use crate::registry::Condition;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio_util::sync::CancellationToken;

impl<O: Object> MachineDefinition<O> {
    /// Transitions that can fire for `object` right now, in schema order.
    ///
    /// Candidates leave the object's current status and, when `event` is a
    /// non-empty label, carry that event. A candidate is kept when all of its
    /// guards pass. The first guard that cannot be resolved aborts the whole
    /// search.
    pub async fn find_available_transitions(
        &self,
        cancel: &CancellationToken,
        object: &O,
        event: Option<&str>,
    ) -> Result<Vec<&Transition>, TransitionError> {
        if cancel.is_cancelled() {
            return Err(TransitionError::Cancelled);
        }

        let status = object.status();
        let mut available = Vec::new();
        for transition in self.schema.transitions_from(status, event) {
            if self.transition_allowed(cancel, object, transition).await? {
                available.push(transition);
            }
        }

        // a late cancellation must not surface as a result
        if cancel.is_cancelled() {
            return Err(TransitionError::Cancelled);
        }

        tracing::trace!(
            status,
            event = event.unwrap_or_default(),
            available = available.len(),
            "resolved available transitions"
        );
        Ok(available)
    }

    /// Evaluate all guards of `transition` concurrently.
    ///
    /// Results are consumed in completion order. The first `false` stops the
    /// remaining guards and denies the transition. Cancelling `cancel` while
    /// guards are outstanding yields [`TransitionError::Cancelled`].
    pub async fn transition_allowed(
        &self,
        cancel: &CancellationToken,
        object: &O,
        transition: &Transition,
    ) -> Result<bool, TransitionError> {
        if transition.guards.is_empty() {
            return Ok(true);
        }

        let conditions = transition
            .guards
            .iter()
            .map(|guard| self.conditions.get(&guard.name))
            .collect::<Result<Vec<_>, _>>()?;

        // Cancelled by the caller's token or by us once the outcome is known.
        let stop = cancel.child_token();
        let _stop_on_return = stop.clone().drop_guard();

        let mut pending: FuturesUnordered<_> = conditions
            .into_iter()
            .map(|condition| evaluate_guard(condition, &stop, object))
            .collect();

        while let Some(outcome) = pending.next().await {
            match outcome {
                Some(true) => {}
                Some(false) => {
                    tracing::trace!(%transition, "guard denied transition");
                    stop.cancel();
                    return Ok(false);
                }
                // only the caller can stop a unit before we have returned
                None => return Err(TransitionError::Cancelled),
            }
        }

        // the last guard may have finished after the caller cancelled
        if cancel.is_cancelled() {
            return Err(TransitionError::Cancelled);
        }

        Ok(true)
    }
}

/// One unit of guard work: the predicate's result, or `None` if stopped first.
async fn evaluate_guard<O>(
    condition: &Condition<O>,
    stop: &CancellationToken,
    object: &O,
) -> Option<bool> {
    // synchronous predicates run when their future is built
    if stop.is_cancelled() {
        return None;
    }

    tokio::select! {
        biased;
        _ = stop.cancelled() => None,
        allowed = condition.evaluate(stop, object) => Some(allowed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Guard, Schema, State};
    use crate::registry::{RegistryError, RegistryKind};
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct Obj {
        status: String,
        enabled: bool,
    }

    impl Object for Obj {
        fn status(&self) -> &str {
            &self.status
        }

        fn set_status(&mut self, status: &str) {
            self.status = status.to_string();
        }
    }

    fn obj(status: &str, enabled: bool) -> Obj {
        Obj {
            status: status.into(),
            enabled,
        }
    }

    fn schema(transitions: Vec<Transition>) -> Schema {
        Schema {
            name: "resolve".into(),
            initial_state: State::new("a"),
            final_states: vec![State::new("c")],
            states: vec![State::new("a"), State::new("b"), State::new("c")],
            transitions,
        }
    }

    fn with_guards(from: &str, to: &str, event: &str, guards: &[&str]) -> Transition {
        let mut t = Transition::new(from, to, event);
        t.guards = guards.iter().map(|g| Guard::new(*g)).collect();
        t
    }

    fn events(transitions: &[&Transition]) -> Vec<String> {
        transitions.iter().map(|t| t.event.clone()).collect()
    }

    #[tokio::test]
    async fn guard_filters_available_transitions() {
        let definition = MachineDefinition::new(
            schema(vec![
                with_guards("a", "b", "a->b", &["isEnabled"]),
                Transition::new("a", "c", "a->c"),
                Transition::new("b", "c", "b->c"),
            ]),
            vec![Condition::from_fn("isEnabled", |o: &Obj| o.enabled)],
            vec![],
        )
        .unwrap();
        let cancel = CancellationToken::new();

        let enabled = definition
            .find_available_transitions(&cancel, &obj("a", true), None)
            .await
            .unwrap();
        assert_eq!(events(&enabled), vec!["a->b", "a->c"]);

        let disabled = definition
            .find_available_transitions(&cancel, &obj("a", false), None)
            .await
            .unwrap();
        assert_eq!(events(&disabled), vec!["a->c"]);
    }

    #[tokio::test]
    async fn event_filter_narrows_results() {
        let definition = MachineDefinition::<Obj>::new(
            schema(vec![
                Transition::new("a", "b", "a->b(1)"),
                Transition::new("a", "b", "a->b(2)"),
                Transition::new("b", "c", "b->c"),
            ]),
            vec![],
            vec![],
        )
        .unwrap();
        let cancel = CancellationToken::new();
        let object = obj("a", true);

        let all = definition
            .find_available_transitions(&cancel, &object, None)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let one = definition
            .find_available_transitions(&cancel, &object, Some("a->b(2)"))
            .await
            .unwrap();
        assert_eq!(events(&one), vec!["a->b(2)"]);

        let none = definition
            .find_available_transitions(&cancel, &object, Some("missing"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn unknown_status_has_no_transitions() {
        let definition =
            MachineDefinition::<Obj>::new(schema(vec![Transition::new("a", "b", "go")]), vec![], vec![])
                .unwrap();

        let found = definition
            .find_available_transitions(&CancellationToken::new(), &obj("notInList", true), None)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn unresolvable_guard_aborts_search() {
        let definition = MachineDefinition::<Obj>::new(
            schema(vec![Transition::new("a", "c", "a->c")]),
            vec![],
            vec![],
        )
        .unwrap();
        let orphan = with_guards("a", "b", "a->b", &["isEnabled"]);

        let err = definition
            .transition_allowed(&CancellationToken::new(), &obj("a", true), &orphan)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransitionError::Lookup(RegistryError::NotFound {
                kind: RegistryKind::Condition,
                name: "isEnabled".into(),
            })
        );
    }

    #[tokio::test]
    async fn transition_without_guards_is_allowed() {
        let definition = MachineDefinition::<Obj>::new(schema(vec![]), vec![], vec![]).unwrap();

        let allowed = definition
            .transition_allowed(
                &CancellationToken::new(),
                &obj("a", false),
                &Transition::new("a", "b", ""),
            )
            .await
            .unwrap();
        assert!(allowed);
    }

    #[tokio::test]
    async fn false_guard_short_circuits_slow_sibling() {
        let finished = Arc::new(AtomicUsize::new(0));
        let slow_finished = Arc::clone(&finished);

        let definition = MachineDefinition::new(
            schema(vec![with_guards("a", "b", "go", &["slow", "deny"])]),
            vec![
                Condition::new("slow", move |_cancel, _o: &Obj| {
                    let finished = Arc::clone(&slow_finished);
                    async move {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        finished.fetch_add(1, Ordering::SeqCst);
                        true
                    }
                    .boxed()
                }),
                Condition::from_fn("deny", |_: &Obj| false),
            ],
            vec![],
        )
        .unwrap();

        let found = tokio::time::timeout(
            Duration::from_secs(5),
            definition.find_available_transitions(&CancellationToken::new(), &obj("a", true), None),
        )
        .await
        .expect("denying guard should not wait for slow sibling")
        .unwrap();

        assert!(found.is_empty());
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sibling_guards_observe_early_stop() {
        let observed = Arc::new(AtomicUsize::new(0));
        let watcher = Arc::clone(&observed);

        let definition = MachineDefinition::new(
            schema(vec![with_guards("a", "b", "go", &["watch", "deny"])]),
            vec![
                Condition::new("watch", move |cancel, _o: &Obj| {
                    let observed = Arc::clone(&watcher);
                    let token = cancel.clone();
                    tokio::spawn(async move {
                        token.cancelled().await;
                        observed.fetch_add(1, Ordering::SeqCst);
                    });
                    futures::future::pending::<bool>().boxed()
                }),
                Condition::from_fn("deny", |_: &Obj| false),
            ],
            vec![],
        )
        .unwrap();
        let cancel = CancellationToken::new();

        let found = definition
            .find_available_transitions(&cancel, &obj("a", true), None)
            .await
            .unwrap();
        assert!(found.is_empty());

        tokio::time::timeout(Duration::from_secs(5), async {
            while observed.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("early stop should reach the guard's token");
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test]
    async fn cancellation_during_guards_is_an_error() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        let definition = MachineDefinition::new(
            schema(vec![with_guards("a", "b", "go", &["hang"])]),
            vec![Condition::new("hang", |_cancel, _o: &Obj| {
                futures::future::pending::<bool>().boxed()
            })],
            vec![],
        )
        .unwrap();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = definition
            .find_available_transitions(&cancel, &obj("a", true), None)
            .await;
        assert_eq!(result.unwrap_err(), TransitionError::Cancelled);
    }

    #[tokio::test]
    async fn cancellation_while_last_guard_passes_is_an_error() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        let definition = MachineDefinition::new(
            schema(vec![with_guards("a", "b", "go", &["cancelsCaller"])]),
            vec![Condition::new("cancelsCaller", move |_cancel, _o: &Obj| {
                let trigger = trigger.clone();
                async move {
                    tokio::task::yield_now().await;
                    trigger.cancel();
                    true
                }
                .boxed()
            })],
            vec![],
        )
        .unwrap();

        let result = definition
            .find_available_transitions(&cancel, &obj("a", true), None)
            .await;
        assert_eq!(result.unwrap_err(), TransitionError::Cancelled);
    }

    #[tokio::test]
    async fn cancelled_token_skips_sync_predicates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);

        let definition = MachineDefinition::new(
            schema(vec![]),
            vec![Condition::from_fn("counted", move |_: &Obj| {
                counted.fetch_add(1, Ordering::SeqCst);
                true
            })],
            vec![],
        )
        .unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let transition = with_guards("a", "b", "go", &["counted"]);
        let result = definition
            .transition_allowed(&cancel, &obj("a", true), &transition)
            .await;

        assert_eq!(result.unwrap_err(), TransitionError::Cancelled);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancelled_token_fails_before_search() {
        let definition =
            MachineDefinition::<Obj>::new(schema(vec![Transition::new("a", "b", "go")]), vec![], vec![])
                .unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = definition
            .find_available_transitions(&cancel, &obj("a", true), None)
            .await;
        assert_eq!(result.unwrap_err(), TransitionError::Cancelled);
    }
}
