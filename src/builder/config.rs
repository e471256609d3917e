//! Serializable machine configuration.

use crate::builder::error::ConfigError;
use crate::core::StateDef;
use crate::machine::{MachineHooks, StateMachine, TransitionEvent};
use crate::validation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use stillwater::validation::Validation;

/// Configuration a [`StateMachine`] is built from.
///
/// Loads from JSON in the shape
///
/// ```json
/// {
///   "initial": "home",
///   "states": { "home": {}, "state2": {} },
///   "events": [
///     { "name": "start", "from": "home", "to": "state2" },
///     { "name": "reset", "from": "*", "to": "home" }
///   ]
/// }
/// ```
///
/// Hooks cannot be expressed in JSON; attach them to the loaded config or
/// to the built machine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<String>,
    #[serde(default)]
    pub states: HashMap<String, StateDef>,
    #[serde(default)]
    pub events: Vec<TransitionEvent>,
    #[serde(skip)]
    pub hooks: MachineHooks,
}

impl MachineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a machine after checking the configuration, reporting every
    /// violation found.
    pub fn into_validated_machine(self) -> Result<StateMachine, ConfigError> {
        match validation::validate(&self) {
            Validation::Success(_) => Ok(StateMachine::new(self)),
            Validation::Failure(violations) => {
                Err(ConfigError::Invalid(violations.iter().cloned().collect()))
            }
        }
    }
}

impl From<MachineConfig> for StateMachine {
    fn from(config: MachineConfig) -> Self {
        StateMachine::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Source;
    use crate::validation::ConfigViolation;

    const SAMPLE: &str = r#"{
        "initial": "home",
        "states": { "home": {}, "state2": {} },
        "events": [
            { "name": "start", "from": "home", "to": "state2" },
            { "name": "next", "from": "state2", "to": "home" },
            { "name": "reset", "from": "*", "to": "home" }
        ]
    }"#;

    #[test]
    fn parses_json_configuration() {
        let config = MachineConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.initial.as_deref(), Some("home"));
        assert_eq!(config.states.len(), 2);
        assert_eq!(config.events.len(), 3);
        assert_eq!(config.events[2].from, Source::Any);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert!(config.initial.is_none());
        assert!(config.states.is_empty());
        assert!(config.events.is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = MachineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn json_round_trip_keeps_structure() {
        let config = MachineConfig::from_json(SAMPLE).unwrap();
        let again = MachineConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(again.initial, config.initial);
        assert_eq!(again.events.len(), config.events.len());
    }

    #[test]
    fn loaded_config_drives_a_machine() {
        let mut fsm: StateMachine = MachineConfig::from_json(SAMPLE).unwrap().into();
        fsm.start().unwrap();
        fsm.trigger("start").unwrap();
        assert_eq!(fsm.state(), Some("state2"));
    }

    #[test]
    fn validated_machine_reports_all_violations() {
        let mut config = MachineConfig::from_json(SAMPLE).unwrap();
        config.initial = Some("nowhere".to_string());
        config
            .events
            .push(TransitionEvent::new("jump", "home", "moon"));

        let err = config.into_validated_machine().unwrap_err();
        let ConfigError::Invalid(violations) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(violations.len(), 2);
        assert!(violations.contains(&ConfigViolation::UnknownInitialState {
            initial: "nowhere".to_string()
        }));
    }
}
