//! Transition edges and the named references they carry.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single named argument attached to a guard or action reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: Value,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Deserialize the opaque value into a concrete type.
    ///
    /// ```rust
    /// use workflow_fsm::core::Param;
    ///
    /// let param = Param::new("limit", 42);
    /// assert_eq!(param.value_as::<u32>().unwrap(), 42);
    /// assert!(param.value_as::<String>().is_err());
    /// ```
    pub fn value_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.value)
    }
}

/// Find a parameter by name. The first occurrence wins.
pub fn find_param<'a>(params: &'a [Param], name: &str) -> Option<&'a Param> {
    params.iter().find(|p| p.name == name)
}

/// Reference to a named condition.
///
/// Parameters are kept with the schema; conditions themselves only see the
/// entity and the cancellation token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Guard {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
}

impl Guard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// Reference to a named action plus its call-site parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
}

impl ActionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

/// A directed edge between two declared states.
///
/// An empty `event` means the transition is not labelled. Guards are
/// evaluated concurrently and must all pass; actions run in declared order
/// once the transition is committed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub guards: Vec<Guard>,
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,
}

impl Transition {
    /// Create an unguarded transition without actions.
    pub fn new(from: impl Into<String>, to: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            event: event.into(),
            guards: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Check whether this transition leaves `status` and carries `event`.
    ///
    /// `None` and `Some("")` match every event.
    pub fn matches(&self, status: &str, event: Option<&str>) -> bool {
        if self.from != status {
            return false;
        }
        match event {
            Some(event) if !event.is_empty() => self.event == event,
            _ => true,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if !self.event.is_empty() {
            write!(f, " on '{}'", self.event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_filters_by_from_state() {
        let transition = Transition::new("a", "b", "a->b");

        assert!(transition.matches("a", None));
        assert!(!transition.matches("b", None));
    }

    #[test]
    fn matches_narrows_by_event() {
        let transition = Transition::new("a", "b", "a->b");

        assert!(transition.matches("a", Some("a->b")));
        assert!(!transition.matches("a", Some("a->c")));
    }

    #[test]
    fn empty_event_filter_matches_any_event() {
        let transition = Transition::new("a", "b", "a->b");
        assert!(transition.matches("a", Some("")));

        let unlabelled = Transition::new("a", "b", "");
        assert!(unlabelled.matches("a", None));
        assert!(!unlabelled.matches("a", Some("a->b")));
    }

    #[test]
    fn display_includes_event_when_present() {
        assert_eq!(Transition::new("a", "b", "go").to_string(), "a -> b on 'go'");
        assert_eq!(Transition::new("a", "b", "").to_string(), "a -> b");
    }

    #[test]
    fn find_param_returns_first_match() {
        let params = vec![
            Param::new("channel", "support"),
            Param::new("channel", "sales"),
        ];

        let found = find_param(&params, "channel").unwrap();
        assert_eq!(found.value, json!("support"));
        assert!(find_param(&params, "missing").is_none());
    }

    #[test]
    fn transition_deserializes_with_defaults() {
        let transition: Transition =
            serde_json::from_value(json!({ "from": "a", "to": "b" })).unwrap();

        assert_eq!(transition, Transition::new("a", "b", ""));
    }
}
