//! Session-scoped key-value storage for form drafts.
//!
//! Forms persist two slots per form key:
//! - the draft (`"{namespace}-{key}"`), rewritten on every value change
//! - the baseline (`"{namespace}-{key}-initial"`), rewritten only when the
//!   saved snapshot changes
//!
//! The store is injected into each form as an [`Arc<dyn SessionStore>`], so
//! tests can hand in a [`MemoryStore`] and the CLI a [`FileStore`].
//!
//! [`Arc<dyn SessionStore>`]: std::sync::Arc

pub mod envelope;
mod file;
mod memory;

pub use envelope::{DraftEnvelope, ENVELOPE_FORMAT};
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Namespace prefix shared by every form slot.
pub const DATA_FORM_NAMESPACE: &str = "data-form";

/// Key-value capability used by forms to persist drafts.
///
/// Implementations use interior mutability: a single store is shared by
/// every form in the process.
pub trait SessionStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// List every key currently held by the store.
    fn keys(&self) -> Result<Vec<String>>;
}

/// The two slot names used by one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
    /// Slot holding the in-progress draft.
    pub draft: String,
    /// Slot holding the saved baseline.
    pub initial: String,
}

impl StoreKeys {
    /// Compute the slot names for a form key.
    pub fn for_form(key: &str) -> Self {
        let draft = format!("{}-{}", DATA_FORM_NAMESPACE, key);
        let initial = format!("{}-initial", draft);
        Self { draft, initial }
    }
}

/// Get the default directory for file-backed drafts.
///
/// Lives under the system temp directory so drafts go away with the host
/// session, the same lifetime browser session storage has.
pub fn default_draft_dir() -> std::path::PathBuf {
    std::env::temp_dir().join("evfield-drafts")
}
