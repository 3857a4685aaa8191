//! Error types for the calm_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for calm_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration file validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A breathing exercise that cannot be run (zero-length cycle or no cycles)
    #[error("Invalid exercise configuration: {0}")]
    InvalidConfiguration(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// No exercise with the requested id
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Blank chat message
    #[error("Message is empty")]
    EmptyMessage,

    /// Blank journal entry
    #[error("Journal entry is empty")]
    EmptyEntry,

    /// Mood name that is not on the list
    #[error("Unknown mood: {0}")]
    UnknownMood(String),

    /// Summary period that is not on the list
    #[error("Unknown period: {0}")]
    UnknownPeriod(String),

    /// Mood or energy rating outside 1..=10
    #[error("Invalid check-in: {0}")]
    InvalidCheckIn(String),

    /// Completion service failure
    #[error("Completion error: {0}")]
    Completion(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
