//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`evfield new`, `evfield validate`)
//! - Configuration resolved once and shared by every command

pub mod completions;
pub mod dispatcher;
pub mod draft;
pub mod edit;
pub mod schema;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
