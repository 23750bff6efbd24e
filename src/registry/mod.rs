//! Name-keyed registries of conditions and actions.
//!
//! Registries are filled once, when a machine definition is built, and are
//! read-only afterwards. Registering the same name twice is an error.

pub mod action;
pub mod condition;
pub mod error;

pub use action::{Action, ActionFn, ActionResult};
pub use condition::{Condition, ConditionFn};
pub use error::{RegistryError, RegistryKind};

use std::collections::HashMap;

/// An entry that can be stored in a [`Registry`].
pub trait Registered {
    const KIND: RegistryKind;

    fn name(&self) -> &str;
}

/// Mapping from name to a registered entry.
#[derive(Debug)]
pub struct Registry<T> {
    entries: HashMap<String, T>,
}

/// Registry of guard predicates.
pub type Conditions<O> = Registry<Condition<O>>;

/// Registry of action routines.
pub type Actions<O> = Registry<Action<O>>;

impl<T: Registered> Registry<T> {
    /// Build a registry, rejecting duplicate names.
    pub fn new(entries: impl IntoIterator<Item = T>) -> Result<Self, RegistryError> {
        let mut map = HashMap::new();
        for entry in entries {
            let name = entry.name().to_string();
            if map.contains_key(&name) {
                return Err(RegistryError::Duplicate {
                    kind: T::KIND,
                    name,
                });
            }
            map.insert(name, entry);
        }
        Ok(Self { entries: map })
    }

    /// Look up an entry, failing with [`RegistryError::NotFound`] if absent.
    pub fn get(&self, name: &str) -> Result<&T, RegistryError> {
        self.entries.get(name).ok_or_else(|| RegistryError::NotFound {
            kind: T::KIND,
            name: name.to_string(),
        })
    }

    /// Whether an entry with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}
