//! Terminal screen for the event field editor.

use crate::error::Result;
use crate::form::SubmitOutcome;
use crate::model::ValueType;
use crate::ui::{Prompt, PromptOption, UserInterface};

use super::{EventFieldEditor, Notice};

/// Text fields in prompt order, with their labels.
const TEXT_FIELDS: [(&str, &str); 3] = [
    ("FieldName", "Name (PascalCase)"),
    ("ShortDescription", "Field name"),
    ("LongDescription", "Description"),
];

const VALUE_TYPE_FIELD: &str = "ValueType";

/// Key of the prompt asking what to do next.
pub const ACTION_PROMPT: &str = "action";

/// How the screen was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenOutcome {
    /// The record was saved.
    Saved,
    /// The user quit; unsaved changes stay in the draft.
    Quit,
}

/// Run the editor screen until the record is saved or the user quits.
///
/// Every field is prompted in turn with its current value. Leaving a prompt
/// marks the field touched, so its error is shown from then on. "Save" is
/// offered only while the form is valid and has changes.
pub fn run_screen(
    editor: &mut EventFieldEditor,
    ui: &mut dyn UserInterface,
) -> Result<ScreenOutcome> {
    ui.show_header(editor.title());

    if editor.form().is_restored() {
        ui.warning("Restored unsaved changes from a previous session");
    } else {
        let mut spinner = ui.start_spinner("Loading event field...");
        match editor.load() {
            Ok(true) => spinner.finish_success("Loaded"),
            Ok(false) => spinner.finish_success("Ready"),
            Err(e) => {
                spinner.finish_error("Could not load event field");
                return Err(e);
            }
        }
    }

    loop {
        edit_fields(editor, ui)?;
        show_errors(editor, ui);

        match prompt_action(editor, ui)?.as_str() {
            "save" if !editor.form().not_valid() => {
                if save(editor, ui)? {
                    return Ok(ScreenOutcome::Saved);
                }
            }
            "quit" => {
                if editor.form().is_dirty() {
                    ui.message("Unsaved changes are kept as a draft");
                }
                return Ok(ScreenOutcome::Quit);
            }
            _ => {}
        }
    }
}

fn edit_fields(editor: &mut EventFieldEditor, ui: &mut dyn UserInterface) -> Result<()> {
    for (field, label) in TEXT_FIELDS {
        let current = editor
            .form()
            .field_value(field)
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_default();

        let answer = ui.prompt(&Prompt::input(field, label).with_default(current))?;
        let form = editor.form_mut();
        form.change_value(answer.as_string(), field)?;
        form.change_touched(Some(field));

        if let Some(error) = form.visible_error(field) {
            ui.error(&format!("{}: {}", label, error));
        }
    }

    let options = ValueType::ALL
        .iter()
        .map(|t| PromptOption::plain(t.as_str()))
        .collect();
    let current = editor.form().values().value_type;
    let prompt =
        Prompt::select(VALUE_TYPE_FIELD, "Type of field", options).with_default(current.as_str());
    let answer = ui.prompt(&prompt)?.as_string();

    match answer.parse::<ValueType>() {
        Ok(value_type) => editor.form_mut().change_value(value_type, VALUE_TYPE_FIELD)?,
        Err(e) => ui.warning(&e),
    }
    editor.form_mut().change_touched(Some(VALUE_TYPE_FIELD));

    Ok(())
}

fn show_errors(editor: &EventFieldEditor, ui: &mut dyn UserInterface) {
    let form = editor.form();
    for (field, message) in form.errors().iter() {
        if form.touched().is_touched(field) {
            ui.warning(&format!("{}: {}", field, message));
        }
    }
}

fn prompt_action(editor: &EventFieldEditor, ui: &mut dyn UserInterface) -> Result<String> {
    let can_save = !editor.form().not_valid();

    let mut options = Vec::new();
    if can_save {
        options.push(PromptOption {
            label: "Save".to_string(),
            value: "save".to_string(),
        });
    }
    options.push(PromptOption {
        label: "Edit again".to_string(),
        value: "edit".to_string(),
    });
    options.push(PromptOption {
        label: "Quit".to_string(),
        value: "quit".to_string(),
    });

    let default = if can_save { "save" } else { "edit" };
    let prompt = Prompt::select(ACTION_PROMPT, "What next?", options).with_default(default);
    Ok(ui.prompt(&prompt)?.as_string())
}

fn save(editor: &mut EventFieldEditor, ui: &mut dyn UserInterface) -> Result<bool> {
    let mut spinner = ui.start_spinner("Saving event field...");
    let outcome = editor.submit()?;

    match outcome {
        SubmitOutcome::Saved | SubmitOutcome::Submitted => spinner.finish_success("Saved"),
        SubmitOutcome::Invalid => spinner.finish_error("Fix the errors above"),
        SubmitOutcome::Failed => spinner.finish_error("Not saved"),
    }

    for notice in editor.take_notices() {
        match notice {
            Notice::Success(text) => ui.success(&text),
            Notice::Error(text) => ui.error(&text),
        }
    }

    Ok(outcome.is_success())
}
