//! Wire types shared between the wizard core, its HTTP adapter and the
//! recommendation service client

pub mod types;

pub use types::{
    BookLength, BookPacing, BookResult, Maturity, ReadingFormat, ReadingFrequency, ReadingMood,
    ReadingTime, RecommendationResponse, SubmissionRecord,
};
