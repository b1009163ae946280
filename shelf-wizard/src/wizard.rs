//! Wizard step state machine
//!
//! Steps run from 1 to [`TOTAL_STEPS`]. `advance` only moves forward after the
//! active step validates; `retreat` moves back one step without validating.
//! Reaching the final step submits the assembled profile as part of the same
//! transition. There is no way to jump over steps.
//!
//! | step | content |
//! |---|---|
//! | 1 | name, birth date |
//! | 2 | reading frequency, reading time |
//! | 3 | formats, book length |
//! | 4 | genres (1-3) |
//! | 5 | favourite authors (search) |
//! | 6 | liked books (search) |
//! | 7 | mood, pacing, language, maturity |
//! | 8 | results |

use serde::Serialize;
use shelf_common::api::BookResult;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::{ClientError, RecommendationService, SearchBackend};
use crate::error::{WizardError, WizardResult};
use crate::form::{FieldInput, WizardState};
use crate::highlights::highlights;
use crate::notify::{Notice, Notifier};
use crate::payload::assemble;
use crate::search::{QueryDispatch, SearchController, SearchKind, SearchOutcome, SearchTicket};
use crate::selection::AddOutcome;
use crate::validator::{validate, Verdict};

/// Number of wizard steps; the last one shows results
pub const TOTAL_STEPS: u8 = 8;

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "books", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Matches(Vec<BookResult>),
    /// The service answered with an empty list
    NoMatches,
}

/// What a navigation call did
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Moved { from: u8, to: u8 },
    /// Moved onto the final step and the submission succeeded
    Submitted(RecommendationOutcome),
    /// Nothing to do (back from step 1, or forward from the final step)
    Stayed { step: u8 },
}

/// Drives one reader through the wizard
pub struct WizardController {
    session_id: Uuid,
    step: u8,
    state: WizardState,
    author_search: SearchController,
    book_search: SearchController,
    outcome: Option<RecommendationOutcome>,
    search_backend: Arc<dyn SearchBackend>,
    recommender: Arc<dyn RecommendationService>,
    notifier: Arc<dyn Notifier>,
}

impl WizardController {
    pub fn new(
        search_backend: Arc<dyn SearchBackend>,
        recommender: Arc<dyn RecommendationService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_session_id(Uuid::new_v4(), search_backend, recommender, notifier)
    }

    /// Same as `new` with a caller-chosen session id (the adapter needs the id
    /// before the notifier is built)
    pub fn with_session_id(
        session_id: Uuid,
        search_backend: Arc<dyn SearchBackend>,
        recommender: Arc<dyn RecommendationService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session_id,
            step: 1,
            state: WizardState::new(),
            author_search: SearchController::new(SearchKind::Authors),
            book_search: SearchController::new(SearchKind::Books),
            outcome: None,
            search_backend,
            recommender,
            notifier,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn current_step(&self) -> u8 {
        self.step
    }

    pub fn total_steps(&self) -> u8 {
        TOTAL_STEPS
    }

    pub fn is_terminal(&self) -> bool {
        self.step == TOTAL_STEPS
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Last successful submission result, cleared on reset
    pub fn outcome(&self) -> Option<&RecommendationOutcome> {
        self.outcome.as_ref()
    }

    pub fn search_controller(&self, kind: SearchKind) -> &SearchController {
        match kind {
            SearchKind::Authors => &self.author_search,
            SearchKind::Books => &self.book_search,
        }
    }

    /// Backend handle for callers that run lookups outside the controller
    pub fn search_backend(&self) -> Arc<dyn SearchBackend> {
        Arc::clone(&self.search_backend)
    }

    /// Completion percentage for the progress bar
    pub fn progress_percent(&self) -> u8 {
        let done = f64::from(self.step - 1) / f64::from(TOTAL_STEPS - 1);
        (done * 100.0).round() as u8
    }

    pub fn highlights(&self) -> Vec<String> {
        highlights(&self.state)
    }

    fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    fn search_mut(&mut self, kind: SearchKind) -> &mut SearchController {
        match kind {
            SearchKind::Authors => &mut self.author_search,
            SearchKind::Books => &mut self.book_search,
        }
    }

    // ------------------------------------------------------------------
    // Field interactions
    // ------------------------------------------------------------------

    /// Apply one form interaction
    ///
    /// Rejected genre picks leave the selection unchanged and raise an error
    /// notice.
    pub fn apply(&mut self, input: FieldInput) -> WizardResult<()> {
        let result = self.state.apply(input);
        match &result {
            Err(WizardError::CapacityExceeded { kind, capacity }) => self.notify(Notice::error(
                format!("Too many {}", kind),
                format!("Please select no more than {} {}.", capacity, kind),
            )),
            Err(WizardError::UnknownGenre(genre)) => self.notify(Notice::error(
                "Unknown genre",
                format!("\"{}\" is not one of the available genres.", genre),
            )),
            _ => {}
        }
        result
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Validate the active step and move forward
    ///
    /// Moving onto the final step assembles and submits the profile. A failed
    /// submission still leaves the wizard on the final step so it can be
    /// retried with [`retry_submission`](Self::retry_submission).
    pub async fn advance(&mut self) -> WizardResult<Transition> {
        if let Verdict::Invalid(rejection) = validate(self.step, &self.state) {
            debug!(
                session_id = %self.session_id,
                step = self.step,
                reason = rejection.reason,
                "Step validation failed"
            );
            self.notify(Notice::error(rejection.title, rejection.reason));
            return Err(WizardError::ValidationFailed {
                step: self.step,
                title: rejection.title.to_string(),
                reason: rejection.reason.to_string(),
            });
        }

        if self.step >= TOTAL_STEPS {
            return Ok(Transition::Stayed { step: self.step });
        }

        let from = self.step;
        self.step += 1;
        info!(session_id = %self.session_id, from, to = self.step, "Wizard advanced");

        if self.step == TOTAL_STEPS {
            let outcome = self.submit().await?;
            return Ok(Transition::Submitted(outcome));
        }

        Ok(Transition::Moved {
            from,
            to: self.step,
        })
    }

    /// Move back one step; never validates
    pub fn retreat(&mut self) -> Transition {
        if self.step <= 1 {
            return Transition::Stayed { step: self.step };
        }

        let from = self.step;
        self.step -= 1;
        debug!(session_id = %self.session_id, from, to = self.step, "Wizard went back");

        Transition::Moved {
            from,
            to: self.step,
        }
    }

    /// Return to step 1 with empty fields and selections
    pub fn reset(&mut self) {
        self.step = 1;
        self.state = WizardState::new();
        self.author_search.reset();
        self.book_search.reset();
        self.outcome = None;
        info!(session_id = %self.session_id, "Wizard reset");
    }

    /// Resubmit from the final step after a failure (or to refresh results)
    pub async fn retry_submission(&mut self) -> WizardResult<RecommendationOutcome> {
        if !self.is_terminal() {
            return Err(WizardError::NotAtTerminalStep {
                current: self.step,
                total: TOTAL_STEPS,
            });
        }
        self.submit().await
    }

    async fn submit(&mut self) -> WizardResult<RecommendationOutcome> {
        self.outcome = None;

        let record = match assemble(&self.state.form, &self.state.selections) {
            Ok(record) => record,
            Err(err) => {
                self.notify(Notice::error("Could not load recommendations", err.to_string()));
                return Err(err);
            }
        };

        info!(
            session_id = %self.session_id,
            genres = record.genres.len(),
            authors = record.authors.len(),
            liked_books = record.liked_books.len(),
            "Submitting reading profile"
        );

        let outcome = match self.recommender.recommend(&record).await {
            Ok(books) if books.is_empty() => {
                self.notify(Notice::info(
                    "No perfect matches",
                    "We could not find books for these exact filters. Try relaxing your preferences.",
                ));
                RecommendationOutcome::NoMatches
            }
            Ok(books) => RecommendationOutcome::Matches(books),
            Err(err) => {
                warn!(session_id = %self.session_id, error = %err, "Recommendation submission failed");
                self.notify(Notice::error("Could not load recommendations", err.to_string()));
                return Err(WizardError::SubmissionFailed(err.to_string()));
            }
        };

        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Register a query change; returns the lookup to perform, if any
    pub fn begin_search(&mut self, kind: SearchKind, raw: &str) -> QueryDispatch {
        self.search_mut(kind).on_query_changed(raw)
    }

    /// Apply the response to a lookup issued by `begin_search`
    pub fn finish_search(
        &mut self,
        ticket: &SearchTicket,
        response: Result<Vec<String>, ClientError>,
    ) -> WizardResult<SearchOutcome> {
        let result = self.search_mut(ticket.kind).finish(ticket, response);
        if let Err(WizardError::SearchFailed { kind, message }) = &result {
            warn!(session_id = %self.session_id, kind = %kind.as_str(), error = %message, "Search failed");
            self.notify(Notice::error(kind.failure_title(), message.clone()));
        }
        result
    }

    /// Query change plus lookup in one call
    ///
    /// Holds the controller for the duration of the lookup; adapters serving
    /// concurrent requests should use `begin_search`/`finish_search` instead.
    pub async fn search(&mut self, kind: SearchKind, raw: &str) -> WizardResult<SearchOutcome> {
        let ticket = match self.begin_search(kind, raw) {
            QueryDispatch::Cleared => return Ok(SearchOutcome::Cleared),
            QueryDispatch::Dispatch(ticket) => ticket,
        };

        let response = self.search_backend.search(kind, &ticket.query).await;
        self.finish_search(&ticket, response)
    }

    /// Move a presented result into the matching selection
    pub fn select_search_result(
        &mut self,
        kind: SearchKind,
        value: String,
    ) -> WizardResult<AddOutcome> {
        let (search, target) = match kind {
            SearchKind::Authors => (&mut self.author_search, &mut self.state.selections.authors),
            SearchKind::Books => (&mut self.book_search, &mut self.state.selections.liked_books),
        };
        search.select(value, target)
    }

    pub fn hide_search_results(&mut self, kind: SearchKind) {
        self.search_mut(kind).hide();
    }
}
