//! Wizard form state
//!
//! `WizardState` owns every field the reader fills in plus the three
//! multi-valued selections. It is created empty when a wizard starts and
//! replaced wholesale on reset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shelf_common::api::{
    BookLength, BookPacing, Maturity, ReadingFormat, ReadingFrequency, ReadingMood, ReadingTime,
};
use tracing::debug;

use crate::catalog::{canonical_genre, MAX_GENRES};
use crate::error::{WizardError, WizardResult};
use crate::selection::{AddOutcome, SelectionKind, SelectionSet};

/// Single-valued fields and reading formats
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub reading_frequency: Option<ReadingFrequency>,
    pub reading_time: Option<ReadingTime>,
    pub reading_formats: SelectionSet<ReadingFormat>,
    pub book_length: Option<BookLength>,
    pub mood: Option<ReadingMood>,
    pub pacing: Option<BookPacing>,
    pub language: Option<String>,
    pub maturity: Option<Maturity>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            birth_date: None,
            reading_frequency: None,
            reading_time: None,
            reading_formats: SelectionSet::unbounded(SelectionKind::Formats),
            book_length: None,
            mood: None,
            pacing: None,
            language: None,
            maturity: None,
        }
    }
}

/// Multi-valued picks accumulated across steps 4-6
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selections {
    pub genres: SelectionSet<String>,
    pub authors: SelectionSet<String>,
    pub liked_books: SelectionSet<String>,
}

impl Default for Selections {
    fn default() -> Self {
        Self {
            genres: SelectionSet::capped(SelectionKind::Genres, MAX_GENRES),
            authors: SelectionSet::unbounded(SelectionKind::Authors),
            liked_books: SelectionSet::unbounded(SelectionKind::LikedBooks),
        }
    }
}

/// Everything the reader has entered so far
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WizardState {
    pub form: FormState,
    pub selections: Selections,
}

/// One interaction with a form control
///
/// On the wire: `{"field": "name", "value": "Ada"}`,
/// `{"field": "genre", "value": {"genre": "mystery", "checked": true}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldInput {
    Name(String),
    BirthDate(Option<NaiveDate>),
    ReadingFrequency(Option<ReadingFrequency>),
    ReadingTime(Option<ReadingTime>),
    Format { format: ReadingFormat, checked: bool },
    BookLength(Option<BookLength>),
    Genre { genre: String, checked: bool },
    RemoveAuthor(String),
    RemoveLikedBook(String),
    Mood(Option<ReadingMood>),
    Pacing(Option<BookPacing>),
    Language(Option<String>),
    Maturity(Option<Maturity>),
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one field interaction
    ///
    /// Only genre checks can fail; every other input is accepted as-is.
    pub fn apply(&mut self, input: FieldInput) -> WizardResult<()> {
        let form = &mut self.form;
        match input {
            FieldInput::Name(name) => form.name = name,
            FieldInput::BirthDate(date) => form.birth_date = date,
            FieldInput::ReadingFrequency(value) => form.reading_frequency = value,
            FieldInput::ReadingTime(value) => form.reading_time = value,
            FieldInput::Format { format, checked } => {
                if checked {
                    form.reading_formats.add(format)?;
                } else {
                    form.reading_formats.remove(&format);
                }
            }
            FieldInput::BookLength(value) => form.book_length = value,
            FieldInput::Genre { genre, checked } => {
                let value = canonical_genre(&genre)
                    .ok_or_else(|| WizardError::UnknownGenre(genre.clone()))?;
                if checked {
                    if self.selections.genres.add(value.clone())? == AddOutcome::Added {
                        debug!(genre = %value, "Genre selected");
                    }
                } else {
                    self.selections.genres.remove(&value);
                }
            }
            FieldInput::RemoveAuthor(author) => {
                self.selections.authors.remove(&author);
            }
            FieldInput::RemoveLikedBook(title) => {
                self.selections.liked_books.remove(&title);
            }
            FieldInput::Mood(value) => form.mood = value,
            FieldInput::Pacing(value) => form.pacing = value,
            FieldInput::Language(value) => {
                form.language = value
                    .map(|language| language.trim().to_string())
                    .filter(|language| !language.is_empty());
            }
            FieldInput::Maturity(value) => form.maturity = value,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_genre(state: &mut WizardState, genre: &str) -> WizardResult<()> {
        state.apply(FieldInput::Genre {
            genre: genre.to_string(),
            checked: true,
        })
    }

    #[test]
    fn test_genre_check_canonicalizes() {
        let mut state = WizardState::new();
        check_genre(&mut state, "Science Fiction").unwrap();
        assert_eq!(state.selections.genres.to_list(), vec!["science fiction"]);
    }

    #[test]
    fn test_fourth_genre_rejected() {
        let mut state = WizardState::new();
        for genre in ["fiction", "mystery", "horror"] {
            check_genre(&mut state, genre).unwrap();
        }

        let err = check_genre(&mut state, "romance").unwrap_err();

        assert_eq!(
            err,
            WizardError::CapacityExceeded {
                kind: SelectionKind::Genres,
                capacity: 3
            }
        );
        assert_eq!(
            state.selections.genres.to_list(),
            vec!["fiction", "mystery", "horror"]
        );
    }

    #[test]
    fn test_unknown_genre_rejected() {
        let mut state = WizardState::new();
        let err = check_genre(&mut state, "cyberpunk").unwrap_err();
        assert_eq!(err, WizardError::UnknownGenre("cyberpunk".to_string()));
        assert!(state.selections.genres.is_empty());
    }

    #[test]
    fn test_uncheck_genre_removes() {
        let mut state = WizardState::new();
        check_genre(&mut state, "poetry").unwrap();
        state
            .apply(FieldInput::Genre {
                genre: "Poetry".to_string(),
                checked: false,
            })
            .unwrap();
        assert!(state.selections.genres.is_empty());
    }

    #[test]
    fn test_blank_language_is_absent() {
        let mut state = WizardState::new();
        state.apply(FieldInput::Language(Some("   ".to_string()))).unwrap();
        assert_eq!(state.form.language, None);

        state.apply(FieldInput::Language(Some(" urdu ".to_string()))).unwrap();
        assert_eq!(state.form.language.as_deref(), Some("urdu"));
    }

    #[test]
    fn test_format_toggle() {
        let mut state = WizardState::new();
        let ebook = FieldInput::Format {
            format: ReadingFormat::Ebook,
            checked: true,
        };
        state.apply(ebook.clone()).unwrap();
        state.apply(ebook).unwrap();
        assert_eq!(state.form.reading_formats.len(), 1);

        state
            .apply(FieldInput::Format {
                format: ReadingFormat::Ebook,
                checked: false,
            })
            .unwrap();
        assert!(state.form.reading_formats.is_empty());
    }

    #[test]
    fn test_field_input_wire_format() {
        let input: FieldInput =
            serde_json::from_str(r#"{"field":"name","value":"Ada"}"#).unwrap();
        assert_eq!(input, FieldInput::Name("Ada".to_string()));

        let input: FieldInput = serde_json::from_str(
            r#"{"field":"genre","value":{"genre":"mystery","checked":true}}"#,
        )
        .unwrap();
        assert_eq!(
            input,
            FieldInput::Genre {
                genre: "mystery".to_string(),
                checked: true
            }
        );

        let input: FieldInput =
            serde_json::from_str(r#"{"field":"birth_date","value":"1815-12-10"}"#).unwrap();
        assert_eq!(
            input,
            FieldInput::BirthDate(NaiveDate::from_ymd_opt(1815, 12, 10))
        );
    }
}
