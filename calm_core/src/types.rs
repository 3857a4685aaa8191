//! Core domain types for the Calm breathing system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Breathing phases and exercises
//! - Timer state and tick outcomes
//! - Coping strategies and crisis lines
//! - Companion chat messages
//! - Moods and journal entries

use crate::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Phases
// ============================================================================

/// One step of a breathing cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
    Pause,
}

impl Phase {
    /// All phases in pattern order
    pub const ALL: [Phase; 4] = [Phase::Inhale, Phase::Hold, Phase::Exhale, Phase::Pause];

    /// Instruction shown to the user while this phase is active
    pub fn instruction(self) -> &'static str {
        match self {
            Phase::Inhale => "Breathe In",
            Phase::Hold => "Hold",
            Phase::Exhale => "Breathe Out",
            Phase::Pause => "Pause",
        }
    }

    /// Position of this phase within a pattern
    pub fn index(self) -> usize {
        match self {
            Phase::Inhale => 0,
            Phase::Hold => 1,
            Phase::Exhale => 2,
            Phase::Pause => 3,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Inhale => "inhale",
            Phase::Hold => "hold",
            Phase::Exhale => "exhale",
            Phase::Pause => "pause",
        };
        f.write_str(label)
    }
}

// ============================================================================
// Exercises
// ============================================================================

/// A guided breathing exercise definition
///
/// `pattern` holds the seconds spent in each phase, in the order
/// inhale, hold, exhale, pause. A zero entry skips that phase.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreathingExercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub pattern: [u32; 4],
    pub total_cycles: u32,
}

impl BreathingExercise {
    /// Seconds in one full cycle
    ///
    /// Summed in `u64` so any four `u32` durations fit.
    pub fn cycle_length(&self) -> u64 {
        self.pattern.iter().map(|&p| u64::from(p)).sum()
    }

    /// Cycle length if it fits the `u32` second counter the timer uses
    pub fn checked_cycle_length(&self) -> Option<u32> {
        self.pattern
            .iter()
            .try_fold(0u32, |total, &p| total.checked_add(p))
    }

    /// Total seconds across all cycles
    pub fn total_duration_seconds(&self) -> u64 {
        self.cycle_length()
            .saturating_mul(u64::from(self.total_cycles))
    }

    /// Pattern rendered as e.g. `4-7-8-0`
    pub fn pattern_label(&self) -> String {
        self.pattern
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Duration of a single phase in seconds
    pub fn phase_duration(&self, phase: Phase) -> u32 {
        self.pattern[phase.index()]
    }
}

// ============================================================================
// Timer State
// ============================================================================

/// Mutable state of one running breathing session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerState {
    pub elapsed_in_cycle: u32,
    pub current_phase: Phase,
    pub cycle_index: u32,
    pub running: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            elapsed_in_cycle: 0,
            current_phase: Phase::Inhale,
            cycle_index: 0,
            running: false,
        }
    }
}

/// Result of applying a single tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing changed
    Idle,
    /// Moved forward within the current cycle
    Advanced { phase: Phase, phase_changed: bool },
    /// Wrapped into a new cycle
    CycleCompleted { cycle_index: u32 },
    /// Final cycle finished; the timer has stopped
    SessionCompleted,
}

// ============================================================================
// Coping Tools
// ============================================================================

/// Area a coping strategy works on
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyCategory {
    Mindfulness,
    Physical,
    Cognitive,
}

/// A non-breathing coping strategy
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CopingStrategy {
    pub title: String,
    pub description: String,
    pub category: StrategyCategory,
}

/// Contact for immediate support
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CrisisLine {
    pub name: String,
    pub contact: String,
}

// ============================================================================
// Companion Messages
// ============================================================================

/// Author of a chat message
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Companion,
}

/// A single message in the companion transcript
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// Moods and Journal
// ============================================================================

/// How the user says they feel
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Angry,
    Calm,
    Thoughtful,
    Tired,
    Inspired,
}

impl Mood {
    /// All moods in picker order
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Angry,
        Mood::Calm,
        Mood::Thoughtful,
        Mood::Tired,
        Mood::Inspired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
            Mood::Angry => "Angry",
            Mood::Calm => "Calm",
            Mood::Thoughtful => "Thoughtful",
            Mood::Tired => "Tired",
            Mood::Inspired => "Inspired",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😔",
            Mood::Anxious => "😰",
            Mood::Angry => "😡",
            Mood::Calm => "😌",
            Mood::Thoughtful => "🤔",
            Mood::Tired => "😴",
            Mood::Inspired => "✨",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

impl FromStr for Mood {
    type Err = Error;

    /// Case-insensitive match on the label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownMood(s.to_string()))
    }
}

/// One saved journal entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub content: String,
    pub mood: Option<Mood>,
    pub reflection: Option<String>,
    pub written_at: DateTime<Utc>,
}
