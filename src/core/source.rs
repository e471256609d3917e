//! Source-state matching for transition events.
//!
//! A transition event names the states it may fire from either with the
//! wildcard token `*` or with a comma-separated list of state names.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The `from` token meaning "any current state".
pub const WILDCARD: &str = "*";

/// Set of states a transition event may fire from.
///
/// # Example
///
/// ```rust
/// use dialog_fsm::core::Source;
///
/// let source: Source = "home,state2".parse().unwrap();
/// assert!(source.matches("home"));
/// assert!(source.matches("state2"));
/// assert!(!source.matches("away"));
///
/// assert!(Source::Any.matches("anything"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    /// Matches every current state.
    Any,
    /// Matches when the current state is one of the listed names.
    States(Vec<String>),
}

impl Source {
    /// Source matching a single named state.
    pub fn state(name: impl Into<String>) -> Self {
        Source::States(vec![name.into()])
    }

    /// Source matching any of the given state names.
    pub fn states<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Source::States(names.into_iter().map(Into::into).collect())
    }

    /// Check whether a transition may fire from `current`.
    pub fn matches(&self, current: &str) -> bool {
        match self {
            Source::Any => true,
            Source::States(names) => names.iter().any(|name| name == current),
        }
    }

    /// Whether this source is the wildcard.
    pub fn is_any(&self) -> bool {
        matches!(self, Source::Any)
    }

    /// The explicitly listed state names (empty for the wildcard).
    pub fn names(&self) -> &[String] {
        match self {
            Source::Any => &[],
            Source::States(names) => names,
        }
    }
}

impl FromStr for Source {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == WILDCARD {
            return Ok(Source::Any);
        }
        Ok(Source::States(s.split(',').map(str::to_string).collect()))
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(source) => source,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::from(value.to_string())
    }
}

impl From<Source> for String {
    fn from(value: Source) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Any => f.write_str(WILDCARD),
            Source::States(names) => f.write_str(&names.join(",")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_parses_to_any() {
        let source: Source = "*".parse().unwrap();
        assert_eq!(source, Source::Any);
        assert!(source.is_any());
        assert!(source.names().is_empty());
    }

    #[test]
    fn comma_list_parses_to_states() {
        let source = Source::from("a,b,c");
        assert_eq!(source.names(), ["a", "b", "c"]);
        assert!(source.matches("b"));
        assert!(!source.matches("d"));
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        let source = Source::from("a, b");
        assert!(source.matches("a"));
        assert!(!source.matches("b"));
        assert!(source.matches(" b"));
    }

    #[test]
    fn wildcard_inside_a_list_is_a_plain_name() {
        let source = Source::from("a,*");
        assert!(!source.is_any());
        assert!(!source.matches("z"));
    }

    #[test]
    fn display_restores_the_token() {
        assert_eq!(Source::Any.to_string(), "*");
        assert_eq!(Source::states(["home", "away"]).to_string(), "home,away");
    }

    #[test]
    fn source_serializes_as_string() {
        let json = serde_json::to_string(&Source::states(["x", "y"])).unwrap();
        assert_eq!(json, "\"x,y\"");

        let parsed: Source = serde_json::from_str("\"*\"").unwrap();
        assert_eq!(parsed, Source::Any);
    }
}
