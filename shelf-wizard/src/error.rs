//! Wizard error taxonomy
//!
//! Every variant is recoverable: the wizard always returns to an interactive
//! state after reporting one.

use crate::search::SearchKind;
use crate::selection::{SelectionError, SelectionKind};
use thiserror::Error;

/// Result type for wizard operations
pub type WizardResult<T> = Result<T, WizardError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    /// Forward navigation blocked by the active step's validator
    #[error("Step {step} is incomplete: {reason}")]
    ValidationFailed {
        step: u8,
        title: String,
        reason: String,
    },

    /// Selection mutation rejected; the selection is unchanged
    #[error("Cannot select more than {capacity} {kind}")]
    CapacityExceeded {
        kind: SelectionKind,
        capacity: usize,
    },

    /// Value outside the closed genre vocabulary
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),

    /// Author or book lookup failed
    #[error("{kind} search failed: {message}")]
    SearchFailed { kind: SearchKind, message: String },

    /// Selection that did not come from the last presented search results
    #[error("\"{value}\" is not among the presented {} search results", .kind.as_str())]
    NotAPresentedResult { kind: SearchKind, value: String },

    /// Recommendation submission failed; the wizard stays on the final step
    #[error("Recommendation submission failed: {0}")]
    SubmissionFailed(String),

    /// A required field was missing at assembly time
    #[error("Profile incomplete: missing {0}")]
    IncompleteProfile(&'static str),

    /// Submission retry requested away from the final step
    #[error("Submission can only be retried from step {total}, wizard is on step {current}")]
    NotAtTerminalStep { current: u8, total: u8 },
}

impl From<SelectionError> for WizardError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::CapacityExceeded { kind, capacity } => {
                WizardError::CapacityExceeded { kind, capacity }
            }
        }
    }
}
