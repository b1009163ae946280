//! Submission record assembly

use shelf_common::api::SubmissionRecord;

use crate::error::{WizardError, WizardResult};
use crate::form::{FormState, Selections};

/// Build the flat submission record from the current form and selections
///
/// The wizard only calls this after steps 1-4 and 7 have validated, so the
/// required fields are present; a missing one is still reported instead of
/// assumed. Optional fields pass through as `None`.
pub fn assemble(form: &FormState, selections: &Selections) -> WizardResult<SubmissionRecord> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(WizardError::IncompleteProfile("name"));
    }

    Ok(SubmissionRecord {
        name: name.to_string(),
        birth_date: form
            .birth_date
            .ok_or(WizardError::IncompleteProfile("birth_date"))?,
        reading_frequency: form
            .reading_frequency
            .ok_or(WizardError::IncompleteProfile("reading_frequency"))?,
        reading_time: form
            .reading_time
            .ok_or(WizardError::IncompleteProfile("reading_time"))?,
        reading_formats: form.reading_formats.to_list(),
        book_length: form
            .book_length
            .ok_or(WizardError::IncompleteProfile("book_length"))?,
        genres: selections.genres.to_list(),
        authors: selections.authors.to_list(),
        liked_books: selections.liked_books.to_list(),
        mood: form.mood.ok_or(WizardError::IncompleteProfile("mood"))?,
        pacing: form.pacing.ok_or(WizardError::IncompleteProfile("pacing"))?,
        language: form.language.clone(),
        maturity: form.maturity,
    })
}
