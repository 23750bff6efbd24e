//! Core workflow data types.
//!
//! This module contains the plain-data description of a workflow:
//! - `State` nodes and `Transition` edges
//! - `Guard` and `ActionDefinition` references with their `Param`s
//! - the `Schema` tying them together
//! - the `Object` capability implemented by host entities
//!
//! Nothing here has behavior beyond lookups; resolution lives in
//! [`crate::definition`].

mod object;
mod schema;
mod state;
mod transition;

pub use object::Object;
pub use schema::Schema;
pub use state::State;
pub use transition::{find_param, ActionDefinition, Guard, Param, Transition};
