//! "Why these books" summary lines shown alongside the results

use shelf_common::api::ReadingMood;

use crate::form::WizardState;

fn mood_phrase(mood: ReadingMood) -> &'static str {
    match mood {
        ReadingMood::Light => "Light and easy-to-read stories.",
        ReadingMood::Thoughtful => "Deeper, more reflective themes.",
        ReadingMood::Emotional => "Emotionally engaging and character-driven narratives.",
        ReadingMood::Adventurous => "Exciting, plot-driven adventures.",
    }
}

/// Summary of the preferences that drove the recommendation
///
/// Mentions at most the first two authors. Falls back to a generic line when
/// nothing applies.
pub fn highlights(state: &WizardState) -> Vec<String> {
    let mut lines = Vec::new();
    let selections = &state.selections;

    if !selections.genres.is_empty() {
        lines.push(format!(
            "Focus on your favorite genres: {}.",
            selections.genres.as_slice().join(", ")
        ));
    }

    if !selections.authors.is_empty() {
        let authors: Vec<&str> = selections
            .authors
            .as_slice()
            .iter()
            .take(2)
            .map(String::as_str)
            .collect();
        lines.push(format!(
            "Similar vibe to authors you enjoy like {}.",
            authors.join(" and ")
        ));
    }

    if let Some(mood) = state.form.mood {
        lines.push(mood_phrase(mood).to_string());
    }

    if let Some(pacing) = state.form.pacing {
        lines.push(format!("Matched to your preferred {} pacing.", pacing.as_str()));
    }

    if let Some(length) = state.form.book_length {
        lines.push(format!(
            "Optimized for a {} length so it fits your schedule.",
            length.as_str()
        ));
    }

    if lines.is_empty() {
        lines.push("Matched using your profile and general popularity.".to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldInput;
    use shelf_common::api::{BookLength, BookPacing};

    #[test]
    fn test_empty_profile_gets_fallback() {
        let lines = highlights(&WizardState::new());
        assert_eq!(lines, vec!["Matched using your profile and general popularity."]);
    }

    #[test]
    fn test_full_profile_lines_in_order() {
        let mut state = WizardState::new();
        for genre in ["fiction", "mystery"] {
            state
                .apply(FieldInput::Genre {
                    genre: genre.to_string(),
                    checked: true,
                })
                .unwrap();
        }
        for author in ["Agatha Christie", "Dorothy L. Sayers", "Ngaio Marsh"] {
            state.selections.authors.add(author.to_string()).unwrap();
        }
        state.apply(FieldInput::Mood(Some(ReadingMood::Adventurous))).unwrap();
        state.apply(FieldInput::Pacing(Some(BookPacing::Fast))).unwrap();
        state.apply(FieldInput::BookLength(Some(BookLength::Short))).unwrap();

        let lines = highlights(&state);

        assert_eq!(
            lines,
            vec![
                "Focus on your favorite genres: fiction, mystery.",
                "Similar vibe to authors you enjoy like Agatha Christie and Dorothy L. Sayers.",
                "Exciting, plot-driven adventures.",
                "Matched to your preferred fast pacing.",
                "Optimized for a short length so it fits your schedule.",
            ]
        );
    }
}
