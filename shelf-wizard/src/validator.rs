//! Per-step forward-navigation checks
//!
//! `validate` is pure: it only reads the state and never mutates it. Steps
//! 5, 6 and 8 (author search, book search, results) have no mandatory fields.

use serde::Serialize;

use crate::form::WizardState;

/// Why a step cannot be left yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Short heading for the error notice
    pub title: &'static str,
    /// Human-readable reason
    pub reason: &'static str,
}

/// Outcome of validating a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid(Rejection),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

fn reject(title: &'static str, reason: &'static str) -> Verdict {
    Verdict::Invalid(Rejection { title, reason })
}

/// Validate `step` against the current state
///
/// Checks run in field order, so the first missing field is the one reported.
pub fn validate(step: u8, state: &WizardState) -> Verdict {
    let form = &state.form;

    match step {
        1 => {
            if form.name.trim().is_empty() {
                return reject("Missing name", "Please enter your name.");
            }
            if form.birth_date.is_none() {
                return reject("Missing birthday", "Please select your date of birth.");
            }
        }
        2 => {
            if form.reading_frequency.is_none() {
                return reject("Reading frequency", "Please select how often you read.");
            }
            if form.reading_time.is_none() {
                return reject(
                    "Reading time",
                    "Please select your preferred reading time.",
                );
            }
        }
        3 => {
            if form.reading_formats.is_empty() {
                return reject(
                    "Reading format",
                    "Please select at least one reading format.",
                );
            }
            if form.book_length.is_none() {
                return reject("Book length", "Please select your preferred book length.");
            }
        }
        4 => {
            if state.selections.genres.is_empty() {
                return reject("Genres", "Please select at least one genre.");
            }
        }
        7 => {
            if form.mood.is_none() {
                return reject(
                    "Reading mood",
                    "Please select what kind of experience you're looking for.",
                );
            }
            if form.pacing.is_none() {
                return reject("Book pacing", "Please select your preferred pacing.");
            }
        }
        _ => {}
    }

    Verdict::Valid
}
