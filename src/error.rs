//! Error types for loading, validating and taking an assessment.

use std::io;

use thiserror::Error;

/// A malformed assessment definition.
///
/// Raised when a definition is loaded or an attempt is started. A definition
/// that produces one of these is never used to build an [`Attempt`](crate::Attempt).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("assessment has no questions")]
    NoQuestions,

    #[error("question {question} has {count} option(s), at least 2 are required")]
    TooFewOptions { question: usize, count: usize },

    #[error("question {question} has {count} correct options, exactly 1 is required")]
    CorrectOptionCount { question: usize, count: usize },

    #[error("time limit must be greater than zero")]
    ZeroTimeLimit,

    #[error("pass threshold {0}% is outside 0..=100")]
    PassThresholdOutOfRange(u32),

    #[error("question id {id:?} is used more than once")]
    DuplicateQuestionId { id: String },

    #[error("option id {id:?} is used more than once in question {question}")]
    DuplicateOptionId { question: usize, id: String },
}

/// An operation was called in a state or with arguments it does not accept.
///
/// These indicate a caller bug; the attempt is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("question index {index} is out of range (assessment has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option index {index} is out of range (question {question} has {len} options)")]
    OptionOutOfRange {
        question: usize,
        index: usize,
        len: usize,
    },

    #[error("attempt is already completed")]
    AttemptCompleted,

    #[error("attempt is still in progress")]
    AttemptInProgress,
}

/// Errors reading an assessment definition from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid assessment: {0}")]
    Invalid(#[from] ValidationError),
}

/// Top-level error for running a quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load assessment: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid assessment: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
