//! Error types for abmd-ai
//!
//! Inapplicable strategies are not errors; they return `None` and the chain
//! moves on. Errors here are input-contract violations local to one
//! `align`/`synthesize` call.

use chrono::NaiveDate;
use thiserror::Error;

/// Input-contract violations detected before any strategy runs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignError {
    /// No local tracks supplied
    #[error("No local tracks to align")]
    NoLocalTracks,

    /// Remote album has no chapters while locals exist
    #[error("Remote album has no chapters but {local_count} local tracks were supplied")]
    EmptyRemoteChapters { local_count: usize },

    /// Two locals share one identity token
    #[error("Duplicate local track identity: {0}")]
    DuplicateIdentity(String),

    /// Chapter sequence indices are not 1, 2, 3, ...
    #[error("Chapter at position {position} has sequence index {found}, expected {expected}")]
    InvalidChapterSequence {
        position: usize,
        expected: u32,
        found: u32,
    },

    /// Configuration enables no strategies
    #[error("No alignment strategies enabled")]
    NoStrategiesEnabled,
}

/// Synthesis failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    /// Pass-through used with differing local and chapter counts
    #[error("Cannot use remote chapter order: {locals} local tracks vs {chapters} chapters")]
    LengthMismatch { locals: usize, chapters: usize },

    /// No strategy applied and the unmatched policy rejects the book
    #[error("No alignment strategy matched {local_count} local tracks to {chapter_count} chapters")]
    Unmatched {
        local_count: usize,
        chapter_count: usize,
    },
}

/// Errors from the full book matching flow
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Align(#[from] AlignError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// Local album name does not resemble the candidate book title
    #[error("Album {local:?} is not a likely match for book {remote:?}")]
    UnlikelyCandidate { local: String, remote: String },

    /// Candidate book is not released yet
    #[error("Book {title:?} is not released until {release_date}")]
    Unreleased { title: String, release_date: NaiveDate },
}

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;
