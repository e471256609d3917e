//! Configuration rules.

use crate::builder::MachineConfig;
use crate::core::StateDef;
use crate::machine::TransitionEvent;
use crate::validation::violations::ConfigViolation;
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Check a configuration, accumulating ALL violations.
pub fn validate(config: &MachineConfig) -> Check {
    validate_parts(config.initial.as_deref(), &config.states, &config.events)
}

/// Check the pieces of a configuration, accumulating ALL violations.
///
/// Events without a target are not violations; they are inert.
pub fn validate_parts(
    initial: Option<&str>,
    states: &HashMap<String, StateDef>,
    events: &[TransitionEvent],
) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    checks.push(match initial {
        None => Validation::fail(ConfigViolation::MissingInitialState),
        Some(name) if !states.contains_key(name) => {
            Validation::fail(ConfigViolation::UnknownInitialState {
                initial: name.to_string(),
            })
        }
        Some(_) => Validation::success(()),
    });

    for (index, event) in events.iter().enumerate() {
        if event.name.is_empty() {
            checks.push(Validation::fail(ConfigViolation::EmptyEventName { index }));
        }

        for state in event.from.names() {
            if !states.contains_key(state) {
                checks.push(Validation::fail(ConfigViolation::UnknownSourceState {
                    event: event.name.clone(),
                    state: state.clone(),
                }));
            }
        }

        if let Some(target) = event.target() {
            if !states.contains_key(target) {
                checks.push(Validation::fail(ConfigViolation::UnknownTargetState {
                    event: event.name.clone(),
                    state: target.to_string(),
                }));
            }
        }
    }

    // Accumulate ALL failures using all_vec
    Validation::all_vec(checks).map(|_| ())
}
