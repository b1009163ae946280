//! The "Ada" reading profile used across tests

use chrono::NaiveDate;
use shelf_common::api::{
    BookLength, BookPacing, ReadingFormat, ReadingFrequency, ReadingMood, ReadingTime,
};
use shelf_wizard::notify::NoticeLog;
use shelf_wizard::{
    FieldInput, RecommendationService, SearchBackend, Transition, WizardController,
};
use std::sync::Arc;

pub fn new_wizard(
    search: Arc<dyn SearchBackend>,
    recommender: Arc<dyn RecommendationService>,
) -> (WizardController, Arc<NoticeLog>) {
    let log = Arc::new(NoticeLog::new());
    let wizard = WizardController::new(search, recommender, log.clone());
    (wizard, log)
}

/// Inputs that satisfy `step` for Ada
pub fn ada_inputs_for_step(step: u8) -> Vec<FieldInput> {
    match step {
        1 => vec![
            FieldInput::Name("Ada".to_string()),
            FieldInput::BirthDate(NaiveDate::from_ymd_opt(1815, 12, 10)),
        ],
        2 => vec![
            FieldInput::ReadingFrequency(Some(ReadingFrequency::Weekly)),
            FieldInput::ReadingTime(Some(ReadingTime::Evening)),
        ],
        3 => vec![
            FieldInput::Format {
                format: ReadingFormat::Ebook,
                checked: true,
            },
            FieldInput::BookLength(Some(BookLength::Medium)),
        ],
        4 => vec![
            FieldInput::Genre {
                genre: "fiction".to_string(),
                checked: true,
            },
            FieldInput::Genre {
                genre: "mystery".to_string(),
                checked: true,
            },
        ],
        7 => vec![
            FieldInput::Mood(Some(ReadingMood::Thoughtful)),
            FieldInput::Pacing(Some(BookPacing::Slow)),
        ],
        _ => vec![],
    }
}

pub fn fill_step(wizard: &mut WizardController, step: u8) {
    for input in ada_inputs_for_step(step) {
        wizard.apply(input).unwrap();
    }
}

/// Fill and advance until the wizard sits on `target` (which must be below
/// the final step)
pub async fn walk_to_step(wizard: &mut WizardController, target: u8) {
    while wizard.current_step() < target {
        let step = wizard.current_step();
        fill_step(wizard, step);
        let transition = wizard.advance().await.unwrap();
        assert!(matches!(transition, Transition::Moved { .. }));
    }
}
