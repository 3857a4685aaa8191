#![forbid(unsafe_code)]

//! Core domain model and logic for the Calm breathing companion.
//!
//! This crate provides:
//! - Domain types (phases, exercises, timer state, messages)
//! - The exercise catalog and affirmation deck
//! - The breathing timer state machine and its tick-driven session
//! - The chat companion reply policy
//! - The journal and mood summaries
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod catalog;
pub mod affirmations;
pub mod config;
pub mod logging;
pub mod timer;
pub mod ticker;
pub mod session;
pub mod companion;
pub mod journal;
pub mod mood;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, ExerciseCatalog};
pub use affirmations::AffirmationDeck;
pub use config::Config;
pub use timer::BreathingTimer;
pub use ticker::Ticker;
pub use session::{BreathingSession, SessionSnapshot};
pub use companion::{Companion, CompletionService, FallbackResponder};
pub use journal::Journal;
pub use mood::{MoodCheckIn, MoodSummary, Period};
