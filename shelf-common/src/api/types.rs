//! Reading-profile wire types
//!
//! The enumerations serialize as lowercase strings, which is the vocabulary the
//! recommendation service expects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ========================================
// Reading-habit enumerations
// ========================================

/// How often the reader picks up a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingFrequency {
    Daily,
    Weekly,
    Monthly,
    Rarely,
}

/// When the reader usually reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingTime {
    Morning,
    Afternoon,
    Evening,
    Bedtime,
    Commute,
    Weekend,
}

/// Physical or digital format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingFormat {
    Paperback,
    Hardcover,
    Ebook,
    Audiobook,
}

/// Preferred book length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookLength {
    Short,
    Medium,
    Long,
}

impl BookLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookLength::Short => "short",
            BookLength::Medium => "medium",
            BookLength::Long => "long",
        }
    }
}

/// Kind of experience the reader is after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingMood {
    Light,
    Thoughtful,
    Emotional,
    Adventurous,
}

/// Preferred narrative pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookPacing {
    Slow,
    Moderate,
    Fast,
}

impl BookPacing {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookPacing::Slow => "slow",
            BookPacing::Moderate => "moderate",
            BookPacing::Fast => "fast",
        }
    }
}

/// Content maturity ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    Clean,
    Moderate,
    Mature,
}

// ========================================
// Submission and results
// ========================================

/// Flat reading profile submitted to the recommendation service
///
/// `language` and `maturity` serialize as `null` when absent; they are never
/// omitted from the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub name: String,
    pub birth_date: NaiveDate,
    pub reading_frequency: ReadingFrequency,
    pub reading_time: ReadingTime,
    pub reading_formats: Vec<ReadingFormat>,
    pub book_length: BookLength,
    pub genres: Vec<String>,
    pub authors: Vec<String>,
    pub liked_books: Vec<String>,
    pub mood: ReadingMood,
    pub pacing: BookPacing,
    pub language: Option<String>,
    pub maturity: Option<Maturity>,
}

/// One recommended book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookResult {
    pub title: String,
    pub author: String,
    pub cover: String,
    /// Average rating on a 0-5 scale
    #[serde(default)]
    pub rating: Option<f32>,
    pub description: String,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Body returned by `POST /recommend`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub recommendations: Vec<BookResult>,
}
