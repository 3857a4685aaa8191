//! Breathing timer state machine.
//!
//! The timer does not own a clock. Each call to `tick()` represents one
//! elapsed quantum; the caller (see [`crate::session`]) decides when ticks
//! happen.
//!
//! ## Phase lookup
//!
//! The phase for a given second is the first phase whose cumulative
//! duration exceeds the elapsed seconds in the cycle. Zero-length phases
//! never satisfy that test and are skipped.
//!
//! ```text
//! pattern  [4, 7, 8, 0]
//! seconds   0..4 inhale | 4..11 hold | 11..19 exhale | (pause skipped)
//! ```

use crate::{BreathingExercise, Error, Phase, Result, TickOutcome, TimerState};

/// Check that an exercise can be run
pub fn validate_exercise(exercise: &BreathingExercise) -> Result<()> {
    if exercise.cycle_length() == 0 {
        return Err(Error::InvalidConfiguration(format!(
            "exercise '{}' has a zero-length cycle ({})",
            exercise.id,
            exercise.pattern_label()
        )));
    }
    if exercise.checked_cycle_length().is_none() {
        return Err(Error::InvalidConfiguration(format!(
            "exercise '{}' has a cycle longer than {} seconds ({})",
            exercise.id,
            u32::MAX,
            exercise.pattern_label()
        )));
    }
    if exercise.total_cycles == 0 {
        return Err(Error::InvalidConfiguration(format!(
            "exercise '{}' must run at least one cycle",
            exercise.id
        )));
    }
    Ok(())
}

/// Phase active `elapsed` seconds into a cycle of `pattern`
pub fn phase_at(pattern: &[u32; 4], elapsed: u32) -> Phase {
    let mut cumulative = 0u64;
    for phase in Phase::ALL {
        cumulative += u64::from(pattern[phase.index()]);
        if u64::from(elapsed) < cumulative {
            return phase;
        }
    }

    // Past the end of the cycle: stay on the last phase that has any length
    Phase::ALL
        .into_iter()
        .rev()
        .find(|p| pattern[p.index()] > 0)
        .unwrap_or(Phase::Inhale)
}

impl TimerState {
    /// Fresh running state for `exercise`
    ///
    /// Fails without producing a state if the exercise is invalid.
    pub fn start(exercise: &BreathingExercise) -> Result<Self> {
        validate_exercise(exercise)?;
        Ok(Self {
            elapsed_in_cycle: 0,
            current_phase: phase_at(&exercise.pattern, 0),
            cycle_index: 0,
            running: true,
        })
    }

    /// Initial, stopped state for `exercise`
    pub fn idle(exercise: &BreathingExercise) -> Self {
        Self {
            current_phase: phase_at(&exercise.pattern, 0),
            ..Self::default()
        }
    }

    /// Apply one tick, returning the next state and what happened
    pub fn advance(self, exercise: &BreathingExercise) -> (Self, TickOutcome) {
        let cycle_length = match exercise.checked_cycle_length() {
            Some(length) if self.running && length > 0 => length,
            _ => return (self, TickOutcome::Idle),
        };

        let elapsed = self.elapsed_in_cycle.saturating_add(1) % cycle_length;
        let phase = phase_at(&exercise.pattern, elapsed);

        if elapsed == 0 {
            let next_cycle = self.cycle_index + 1;
            if next_cycle >= exercise.total_cycles {
                return (Self::idle(exercise), TickOutcome::SessionCompleted);
            }
            let next = Self {
                elapsed_in_cycle: 0,
                current_phase: phase,
                cycle_index: next_cycle,
                running: true,
            };
            return (
                next,
                TickOutcome::CycleCompleted {
                    cycle_index: next_cycle,
                },
            );
        }

        let next = Self {
            elapsed_in_cycle: elapsed,
            current_phase: phase,
            ..self
        };
        (
            next,
            TickOutcome::Advanced {
                phase,
                phase_changed: phase != self.current_phase,
            },
        )
    }
}

/// Owner of the selected exercise and its timer state
#[derive(Clone, Debug, Default)]
pub struct BreathingTimer {
    exercise: Option<BreathingExercise>,
    state: TimerState,
    completed: bool,
}

impl BreathingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exercise(&self) -> Option<&BreathingExercise> {
        self.exercise.as_ref()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// True once the final cycle has finished, until the next start or reset
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Select `exercise` and start it from the first second
    ///
    /// Replaces any exercise already in progress. On error the timer is
    /// left exactly as it was.
    pub fn start(&mut self, exercise: BreathingExercise) -> Result<()> {
        let state = TimerState::start(&exercise)?;
        tracing::info!(
            "Starting '{}' ({} x {} cycles)",
            exercise.id,
            exercise.pattern_label(),
            exercise.total_cycles
        );
        self.exercise = Some(exercise);
        self.state = state;
        self.completed = false;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.state.running = false;
    }

    /// Resume counting; returns false when no exercise is selected
    pub fn resume(&mut self) -> bool {
        if self.exercise.is_none() {
            return false;
        }
        self.state.running = true;
        self.completed = false;
        true
    }

    /// Stop and rewind to the first second of the first cycle
    ///
    /// The selected exercise is kept so the session can be started again.
    pub fn reset(&mut self) {
        self.state = match &self.exercise {
            Some(exercise) => TimerState::idle(exercise),
            None => TimerState::default(),
        };
        self.completed = false;
    }

    /// Forget the selected exercise entirely
    pub fn clear(&mut self) {
        self.exercise = None;
        self.state = TimerState::default();
        self.completed = false;
    }

    pub fn tick(&mut self) -> TickOutcome {
        let Some(exercise) = self.exercise.as_ref() else {
            return TickOutcome::Idle;
        };

        let (next, outcome) = self.state.advance(exercise);
        self.state = next;

        match outcome {
            TickOutcome::SessionCompleted => {
                self.completed = true;
                tracing::info!("Exercise '{}' complete", exercise.id);
            }
            TickOutcome::CycleCompleted { cycle_index } => {
                tracing::debug!(
                    "Cycle {} of {} started",
                    cycle_index + 1,
                    exercise.total_cycles
                );
            }
            TickOutcome::Advanced { .. } | TickOutcome::Idle => {}
        }
        outcome
    }

    /// Fraction of cycles completed so far (0.0..=1.0)
    ///
    /// Reads 1.0 after the session completes, even though the state has
    /// rewound to the first cycle.
    pub fn progress(&self) -> f64 {
        if self.completed {
            return 1.0;
        }
        match &self.exercise {
            Some(ex) if ex.total_cycles > 0 => {
                f64::from(self.state.cycle_index) / f64::from(ex.total_cycles)
            }
            _ => 0.0,
        }
    }

    /// Seconds remaining before the current phase ends
    pub fn seconds_left_in_phase(&self) -> u32 {
        let Some(exercise) = &self.exercise else {
            return 0;
        };
        let phase_end: u64 = exercise.pattern[..=self.state.current_phase.index()]
            .iter()
            .map(|&p| u64::from(p))
            .sum();
        let left = phase_end.saturating_sub(u64::from(self.state.elapsed_in_cycle));
        u32::try_from(left).unwrap_or(u32::MAX)
    }
}
