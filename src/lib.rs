//! Workflow FSM: an embeddable finite state machine engine
//!
//! The engine drives a host-owned entity through a declared graph of states.
//! Transitions are gated by named conditions, evaluated concurrently, and
//! followed by named actions, run in order. The engine only reads and writes
//! the entity's status; everything else about the entity belongs to the host.
//!
//! # Core Concepts
//!
//! - **Schema**: plain data describing states and transitions
//! - **Registries**: name-keyed conditions (guards) and actions
//! - **MachineDefinition**: a schema validated against its registries
//! - **Machine**: the façade that starts entities and sends events
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use workflow_fsm::builder::{SchemaBuilder, TransitionBuilder};
//! use workflow_fsm::core::Object;
//! use workflow_fsm::definition::MachineDefinition;
//! use workflow_fsm::machine::{Machine, TransitionError};
//! use workflow_fsm::registry::{Action, Condition};
//!
//! struct Document {
//!     status: String,
//!     body: String,
//!     notified: bool,
//! }
//!
//! impl Object for Document {
//!     fn status(&self) -> &str {
//!         &self.status
//!     }
//!
//!     fn set_status(&mut self, status: &str) {
//!         self.status = status.to_string();
//!     }
//! }
//!
//! # futures::executor::block_on(async {
//! let schema = SchemaBuilder::new()
//!     .name("document")
//!     .initial("draft")
//!     .states(["draft", "published"])
//!     .final_state("published")
//!     .transition(
//!         TransitionBuilder::new()
//!             .from("draft")
//!             .to("published")
//!             .on("publish")
//!             .guard("hasBody")
//!             .action("notify"),
//!     )
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let definition = MachineDefinition::builder(schema)
//!     .condition(Condition::from_fn("hasBody", |d: &Document| !d.body.is_empty()))
//!     .action(Action::from_fn("notify", |d: &mut Document, _params, _prior| {
//!         d.notified = true;
//!         Ok(())
//!     }))
//!     .build()
//!     .unwrap();
//!
//! let machine = Machine::new(CancellationToken::new(), Arc::new(definition));
//!
//! let mut doc = Document { status: String::new(), body: String::new(), notified: false };
//! machine.start(&mut doc);
//!
//! // The guard denies publishing an empty document.
//! let err = machine.send_event(&mut doc, "publish").await.unwrap_err();
//! assert!(matches!(err, TransitionError::NoTransition { .. }));
//!
//! doc.body = "hello".into();
//! let results = machine.send_event(&mut doc, "publish").await.unwrap();
//! assert_eq!(results.len(), 1);
//! assert!(doc.notified);
//! assert!(machine.is_in_final_state(&doc));
//! # });
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod machine;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{ActionDefinition, Guard, Object, Param, Schema, State, Transition};
pub use builder::{BuildError, MachineDefinitionBuilder, SchemaBuilder, TransitionBuilder};
pub use definition::{MachineDefinition, ValidationError};
pub use machine::{Machine, TransitionError};
pub use registry::{Action, ActionResult, Condition, RegistryError};
pub use tokio_util::sync::CancellationToken;
