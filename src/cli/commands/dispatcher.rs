//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::editor::EditorMode;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: AppConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher using the resolved configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Get the resolved configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::New => {
                let cmd = super::edit::EditCommand::new(&self.config, EditorMode::Create);
                cmd.execute(ui)
            }
            Commands::Edit(args) => {
                let mode = EditorMode::Edit {
                    id: args.id.clone(),
                };
                let cmd = super::edit::EditCommand::new(&self.config, mode);
                cmd.execute(ui)
            }
            Commands::Validate(args) => {
                let cmd = super::validate::ValidateCommand::new(&self.config, args.clone());
                cmd.execute(ui)
            }
            Commands::Draft(args) => {
                let cmd = super::draft::DraftCommand::new(&self.config, args.clone());
                cmd.execute(ui)
            }
            Commands::Schema => super::schema::SchemaCommand.execute(ui),
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_keeps_config() {
        let config = AppConfig {
            timeout_secs: 3,
            ..AppConfig::default()
        };
        let dispatcher = CommandDispatcher::new(config);
        assert_eq!(dispatcher.config().timeout_secs, 3);
    }

    #[test]
    fn dispatches_schema() {
        let cli = Cli::try_parse_from(["evfield", "schema"]).unwrap();
        let dispatcher = CommandDispatcher::new(AppConfig::default());
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();

        assert!(result.success);
    }
}
