//! Tickets for validation and submission started on one turn of the event
//! loop and completed on a later one.

/// A validation run in progress.
///
/// Carries snapshots of the values and baseline the run was started with.
/// Only the most recently issued ticket may apply its result.
#[derive(Debug, Clone)]
pub struct ValidationTicket<M> {
    pub(super) seq: u64,
    /// Values being validated.
    pub values: M,
    /// Baseline at the time validation started.
    pub initial: M,
}

impl<M> ValidationTicket<M> {
    /// Sequence number of this run.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// A submission in progress.
///
/// Holds the form's single in-flight slot until passed back to
/// [`FormEngine::finish_submit`](super::FormEngine::finish_submit).
#[derive(Debug, Clone)]
pub struct SubmitTicket<M> {
    pub(super) seq: u64,
    /// Values being submitted.
    pub values: M,
    /// Baseline the values were edited from.
    pub initial: M,
}

impl<M> SubmitTicket<M> {
    /// Sequence number of this submission.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// How a submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the submit callback was not called.
    Invalid,
    /// The submit callback succeeded without returning a record.
    Submitted,
    /// The submit callback returned a record, now the new baseline.
    Saved,
    /// The submit callback failed; the error handler was called.
    Failed,
}

impl SubmitOutcome {
    /// Check if the submit callback succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Submitted | Self::Saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_outcome_success_variants() {
        assert!(SubmitOutcome::Submitted.is_success());
        assert!(SubmitOutcome::Saved.is_success());
        assert!(!SubmitOutcome::Invalid.is_success());
        assert!(!SubmitOutcome::Failed.is_success());
    }
}
