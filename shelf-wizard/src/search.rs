//! Author and book search dispatch
//!
//! Each keystroke either short-circuits (query too short) or issues a lookup
//! tagged with a fresh sequence number. Lookups are never cancelled in flight;
//! instead, a response whose sequence number is not the latest issued is
//! dropped on arrival. This gives last-query-wins behaviour regardless of the
//! order in which responses come back.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{WizardError, WizardResult};
use crate::selection::{AddOutcome, SelectionSet};

/// Shortest trimmed query that triggers a lookup
pub const MIN_QUERY_LEN: usize = 2;

/// Which lookup a controller drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Authors,
    Books,
}

impl SearchKind {
    /// Path segment and event label
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Authors => "authors",
            SearchKind::Books => "books",
        }
    }

    /// Heading of the error notice shown when a lookup fails
    pub fn failure_title(&self) -> &'static str {
        match self {
            SearchKind::Authors => "Author search failed",
            SearchKind::Books => "Book search failed",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchKind::Authors => f.write_str("Author"),
            SearchKind::Books => f.write_str("Book"),
        }
    }
}

/// An issued lookup; hand it back to [`SearchController::finish`] together
/// with the lookup result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub kind: SearchKind,
    pub seq: u64,
    pub query: String,
}

/// What a query change asks the caller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryDispatch {
    /// Query too short: results hidden, nothing to fetch
    Cleared,
    /// Perform this lookup
    Dispatch(SearchTicket),
}

/// What a lookup response did to the presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query too short; nothing was fetched and the list is hidden
    Cleared,
    /// The response was the latest one and is now presented (possibly empty)
    Presented(Vec<String>),
    /// A newer query was issued after this one; the response was dropped
    Stale,
}

/// Search session for one kind of lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchController {
    kind: SearchKind,
    query: String,
    latest_seq: u64,
    pending: Option<u64>,
    results: Vec<String>,
    visible: bool,
}

impl SearchController {
    pub fn new(kind: SearchKind) -> Self {
        Self {
            kind,
            query: String::new(),
            latest_seq: 0,
            pending: None,
            results: Vec::new(),
            visible: false,
        }
    }

    /// React to the query text changing
    ///
    /// A short query also advances the sequence number so that anything still
    /// in flight for the previous text can no longer reopen the results.
    pub fn on_query_changed(&mut self, raw: &str) -> QueryDispatch {
        self.query = raw.to_string();
        self.latest_seq += 1;

        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            self.pending = None;
            self.visible = false;
            return QueryDispatch::Cleared;
        }

        self.pending = Some(self.latest_seq);
        debug!(kind = %self.kind.as_str(), seq = self.latest_seq, query = %trimmed, "Search dispatched");

        QueryDispatch::Dispatch(SearchTicket {
            kind: self.kind,
            seq: self.latest_seq,
            query: trimmed.to_string(),
        })
    }

    /// Apply a lookup response
    ///
    /// Stale responses (successful or failed) are dropped silently. A failure
    /// of the latest lookup hides the results and is returned as
    /// `SearchFailed`; the previous result list itself is left untouched.
    pub fn finish<E: fmt::Display>(
        &mut self,
        ticket: &SearchTicket,
        response: Result<Vec<String>, E>,
    ) -> WizardResult<SearchOutcome> {
        if ticket.seq != self.latest_seq {
            debug!(
                kind = %self.kind.as_str(),
                seq = ticket.seq,
                latest = self.latest_seq,
                "Dropping stale search response"
            );
            return Ok(SearchOutcome::Stale);
        }

        self.pending = None;

        match response {
            Ok(results) => {
                self.results = results;
                self.visible = true;
                Ok(SearchOutcome::Presented(self.results.clone()))
            }
            Err(err) => {
                self.visible = false;
                Err(WizardError::SearchFailed {
                    kind: self.kind,
                    message: err.to_string(),
                })
            }
        }
    }

    /// Pick a result from the last presented list into `target`
    ///
    /// Only values from the most recently presented result list are
    /// accepted, whether or not that list is currently visible. Clears the
    /// query text and hides the list. Picking a value that is already
    /// selected changes nothing in `target`.
    pub fn select(
        &mut self,
        value: String,
        target: &mut SelectionSet<String>,
    ) -> WizardResult<AddOutcome> {
        if !self.results.contains(&value) {
            return Err(WizardError::NotAPresentedResult { kind: self.kind, value });
        }

        let outcome = target.add(value)?;
        self.on_query_changed("");
        Ok(outcome)
    }

    /// Hide the result list without touching the query (focus moved away)
    ///
    /// The hidden list stays selectable.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Last result list that was presented, visible or not
    pub fn last_presented(&self) -> &[String] {
        &self.results
    }

    /// Results currently shown to the user, if the list is visible
    pub fn presented(&self) -> Option<&[String]> {
        self.visible.then_some(self.results.as_slice())
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Forget query, results and pending state
    ///
    /// The sequence counter keeps counting so that responses issued before the
    /// reset are still recognised as stale.
    pub fn reset(&mut self) {
        self.latest_seq += 1;
        self.query.clear();
        self.pending = None;
        self.results.clear();
        self.visible = false;
    }
}
