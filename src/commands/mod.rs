//! Agent-invocable commands.
//!
//! The host runtime exposes these to the model as callable actions. Each
//! command validates its parameters, runs against the component registry,
//! and answers with the documented `status`/`message` JSON shape. Results
//! stay tagged internally; JSON appears only at this boundary.

pub mod command;
pub mod components;
pub mod registry;
pub mod stdio;

pub use command::{Command, CommandContext, CommandError, CommandOutput};
pub use components::register_component_commands;
pub use registry::{CommandDefinition, CommandRegistry};
