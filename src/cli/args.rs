//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::FlagOverrides;
use crate::editor::NEW_EVENT_FIELD_FORM_KEY;
use crate::ui::OutputMode;

/// evfield - Create and edit event fields with draft recovery.
#[derive(Debug, Parser)]
#[command(name = "evfield")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .evfield/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the event field service
    #[arg(long, global = true, value_name = "URL")]
    pub service_url: Option<String>,

    /// Directory holding form drafts
    #[arg(long, global = true, value_name = "DIR")]
    pub draft_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output mode requested by `--quiet` / `--verbose`, if any.
    pub fn output_mode(&self) -> Option<OutputMode> {
        if self.quiet {
            Some(OutputMode::Quiet)
        } else if self.verbose {
            Some(OutputMode::Verbose)
        } else {
            None
        }
    }

    /// Config overrides given as flags.
    pub fn flag_overrides(&self) -> FlagOverrides {
        FlagOverrides {
            service_url: self.service_url.clone(),
            draft_dir: self.draft_dir.clone(),
            output: self.output_mode(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new event field
    New,

    /// Edit an existing event field
    Edit(EditArgs),

    /// Validate an event field stored as JSON
    Validate(ValidateArgs),

    /// Show the stored draft and baseline of a form
    Draft(DraftArgs),

    /// Print the JSON Schema of an event field
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `edit` command.
#[derive(Debug, Clone, clap::Args)]
pub struct EditArgs {
    /// Identifier of the event field
    pub id: String,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ValidateArgs {
    /// JSON file holding the event field
    pub file: PathBuf,

    /// JSON file holding the saved version to compare against
    #[arg(long, value_name = "FILE")]
    pub baseline: Option<PathBuf>,

    /// Skip the uniqueness checks against the service
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the `draft` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DraftArgs {
    /// Form key whose slots are shown (`event-field-<ID>` for an edited record)
    #[arg(long, default_value = NEW_EVENT_FIELD_FORM_KEY)]
    pub key: String,
}

impl Default for DraftArgs {
    fn default() -> Self {
        Self {
            key: NEW_EVENT_FIELD_FORM_KEY.to_string(),
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_edit_with_id() {
        let cli = Cli::try_parse_from(["evfield", "edit", "42"]).unwrap();
        match cli.command {
            Commands::Edit(args) => assert_eq!(args.id, "42"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_validate_flags() {
        let cli = Cli::try_parse_from([
            "evfield",
            "validate",
            "field.json",
            "--baseline",
            "saved.json",
            "--offline",
        ])
        .unwrap();
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.file, PathBuf::from("field.json"));
                assert_eq!(args.baseline, Some(PathBuf::from("saved.json")));
                assert!(args.offline);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn draft_key_defaults_to_new_event_field() {
        let cli = Cli::try_parse_from(["evfield", "draft"]).unwrap();
        match cli.command {
            Commands::Draft(args) => assert_eq!(args.key, "event-field-new"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "evfield",
            "schema",
            "--service-url",
            "http://localhost:8080",
            "--draft-dir",
            "/tmp/d",
            "-q",
        ])
        .unwrap();

        let flags = cli.flag_overrides();

        assert_eq!(flags.service_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(flags.draft_dir, Some(PathBuf::from("/tmp/d")));
        assert_eq!(flags.output, Some(OutputMode::Quiet));
    }

    #[test]
    fn quiet_wins_over_verbose() {
        let cli = Cli::try_parse_from(["evfield", "schema", "-q", "-v"]).unwrap();
        assert_eq!(cli.output_mode(), Some(OutputMode::Quiet));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["evfield"]).is_err());
    }
}
