//! The `evfield schema` command.

use schemars::schema_for;

use crate::error::Result;
use crate::model::EventField;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Prints the JSON Schema of an event field.
pub struct SchemaCommand;

/// Render the event field schema as pretty JSON.
pub fn event_field_schema() -> Result<String> {
    let schema = schema_for!(EventField);
    let json = serde_json::to_string_pretty(&schema).map_err(anyhow::Error::from)?;
    Ok(json)
}

impl Command for SchemaCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        println!("{}", event_field_schema()?);
        Ok(CommandResult::success())
    }
}
