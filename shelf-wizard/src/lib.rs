//! # Shelfwise reading-preference wizard
//!
//! The wizard walks a reader through eight steps, validates each one before
//! moving forward, accumulates multi-valued selections (genres, authors, liked
//! books) across asynchronous searches, and on reaching the final step submits
//! the assembled profile to the recommendation service.
//!
//! - [`selection`]: capped, deduplicated, insertion-ordered collections
//! - [`search`]: last-query-wins search dispatch
//! - [`validator`]: per-step forward-navigation checks
//! - [`wizard`]: the step state machine
//! - [`payload`]: submission record assembly
//! - [`client`]: search and recommendation service seams plus the HTTP client

pub mod catalog;
pub mod client;
pub mod error;
pub mod form;
pub mod highlights;
pub mod notify;
pub mod payload;
pub mod search;
pub mod selection;
pub mod validator;
pub mod wizard;

pub use client::{ClientError, HttpShelfClient, RecommendationService, SearchBackend};
pub use error::{WizardError, WizardResult};
pub use form::{FieldInput, FormState, Selections, WizardState};
pub use notify::{Notice, Notifier};
pub use search::{QueryDispatch, SearchController, SearchKind, SearchOutcome, SearchTicket};
pub use selection::{AddOutcome, SelectionError, SelectionKind, SelectionSet};
pub use validator::{validate, Rejection, Verdict};
pub use wizard::{RecommendationOutcome, Transition, WizardController, TOTAL_STEPS};
