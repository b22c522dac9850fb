//! Form configuration and callback traits.

use super::FieldErrors;

/// Validation callback for a form.
///
/// Receives the working values and the saved baseline. Validation never
/// fails as a whole: problems are reported per field in the returned map.
pub trait FormValidator<M> {
    /// Validate `values` against the `initial` baseline.
    fn validate(&self, values: &M, initial: &M) -> FieldErrors;
}

impl<M, F> FormValidator<M> for F
where
    F: Fn(&M, &M) -> FieldErrors,
{
    fn validate(&self, values: &M, initial: &M) -> FieldErrors {
        self(values, initial)
    }
}

/// Submit callback for a form.
///
/// Performs the create/update side effect. Returning `Ok(Some(record))`
/// hands back a new canonical record, which becomes both the working values
/// and the baseline.
pub trait FormSubmitter<M> {
    /// Submit `values`; `initial` is the baseline they were edited from.
    fn submit(&self, values: &M, initial: &M) -> anyhow::Result<Option<M>>;
}

impl<M, F> FormSubmitter<M> for F
where
    F: Fn(&M, &M) -> anyhow::Result<Option<M>>,
{
    fn submit(&self, values: &M, initial: &M) -> anyhow::Result<Option<M>> {
        self(values, initial)
    }
}

/// Callback invoked when submission fails.
pub type ErrorHandler = Box<dyn FnMut(&anyhow::Error)>;

/// Configuration for a [`FormEngine`](super::FormEngine).
///
/// # Example
///
/// ```
/// use evfield::form::{FieldErrors, FormConfig};
///
/// #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// struct Login {
///     user: String,
/// }
///
/// let config = FormConfig::new()
///     .key("login")
///     .initial_values(Login { user: "root".into() })
///     .on_validate(|v: &Login, _: &Login| {
///         let mut errors = FieldErrors::new();
///         if v.user.is_empty() {
///             errors.insert("user", "Required");
///         }
///         errors
///     });
/// assert_eq!(config.form_key(), "login");
/// ```
pub struct FormConfig<M> {
    pub(super) key: String,
    pub(super) initial_values: M,
    pub(super) record_version: u32,
    pub(super) validate_on_change: bool,
    pub(super) validate_on_blur: bool,
    pub(super) validator: Option<Box<dyn FormValidator<M>>>,
    pub(super) submitter: Option<Box<dyn FormSubmitter<M>>>,
    pub(super) on_error: Option<ErrorHandler>,
}

impl<M: Default> Default for FormConfig<M> {
    fn default() -> Self {
        Self {
            key: String::new(),
            initial_values: M::default(),
            record_version: 1,
            validate_on_change: true,
            validate_on_blur: true,
            validator: None,
            submitter: None,
            on_error: None,
        }
    }
}

impl<M: Default> FormConfig<M> {
    /// Create a configuration with no key and default initial values.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M> FormConfig<M> {
    /// Set the persistence key. An empty key disables persistence.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the values used when no draft is stored.
    pub fn initial_values(mut self, values: M) -> Self {
        self.initial_values = values;
        self
    }

    /// Set the record version written into stored drafts.
    ///
    /// Drafts written under another version are discarded on mount.
    pub fn record_version(mut self, version: u32) -> Self {
        self.record_version = version;
        self
    }

    /// Re-validate after every value change (default: true).
    pub fn validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    /// Re-validate when a field is marked touched (default: true).
    pub fn validate_on_blur(mut self, enabled: bool) -> Self {
        self.validate_on_blur = enabled;
        self
    }

    /// Set the validation callback.
    pub fn on_validate(mut self, validator: impl FormValidator<M> + 'static) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Set the submit callback.
    pub fn on_submit(mut self, submitter: impl FormSubmitter<M> + 'static) -> Self {
        self.submitter = Some(Box::new(submitter));
        self
    }

    /// Set the submission failure callback.
    pub fn on_error(mut self, handler: impl FnMut(&anyhow::Error) + 'static) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    /// Get the configured persistence key.
    pub fn form_key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_form_library_behavior() {
        let config: FormConfig<String> = FormConfig::new();
        assert_eq!(config.form_key(), "");
        assert_eq!(config.record_version, 1);
        assert!(config.validate_on_change);
        assert!(config.validate_on_blur);
        assert!(config.validator.is_none());
        assert!(config.submitter.is_none());
    }

    #[test]
    fn closures_implement_callbacks() {
        let validator = |v: &String, _: &String| {
            let mut errors = FieldErrors::new();
            if v.is_empty() {
                errors.insert("value", "Required");
            }
            errors
        };
        assert!(!validator
            .validate(&String::new(), &String::new())
            .is_empty());

        let submitter = |v: &String, _: &String| Ok::<_, anyhow::Error>(Some(v.to_uppercase()));
        assert_eq!(
            submitter.submit(&"abc".to_string(), &String::new()).unwrap(),
            Some("ABC".to_string())
        );
    }
}
