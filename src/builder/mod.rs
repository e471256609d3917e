//! Configuration and builder API for state machines.
//!
//! A machine is built either from a [`MachineConfig`] (typically loaded from
//! JSON) or fluently with [`MachineBuilder`].

pub mod config;
pub mod error;
pub mod machine;

pub use config::MachineConfig;
pub use error::ConfigError;
pub use machine::MachineBuilder;
