//! Accumulating configuration checks.
//!
//! Checks use Stillwater's `Validation` so that every problem in a
//! configuration is reported in one pass instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use dialog_fsm::builder::MachineBuilder;
//! use dialog_fsm::core::StateDef;
//! use dialog_fsm::machine::TransitionEvent;
//! use dialog_fsm::validation::{validate, ConfigViolation};
//! use stillwater::validation::Validation;
//!
//! let builder = MachineBuilder::new()
//!     .initial("home")
//!     .state("home", StateDef::new())
//!     .event(TransitionEvent::new("go", "home,porch", "garden"));
//!
//! match validate(builder.config()) {
//!     Validation::Failure(violations) => assert_eq!(violations.len(), 2),
//!     Validation::Success(_) => panic!("expected violations"),
//! }
//! ```

pub mod rules;
pub mod violations;

pub use rules::{validate, validate_parts};
pub use violations::ConfigViolation;
