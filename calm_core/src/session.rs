//! Breathing session driver.
//!
//! Couples a [`BreathingTimer`] with at most one [`Ticker`]. The session is
//! the only owner of the timer; the tick task only sends instants over a
//! channel. Every state change is published on a `watch` channel so a
//! renderer can follow along without holding a reference to the session.
//!
//! All methods that start ticking must be called from inside a tokio
//! runtime.

use crate::ticker::Ticker;
use crate::timer::BreathingTimer;
use crate::{BreathingExercise, Result, TickOutcome, TimerState};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;

/// Point-in-time view of a session for renderers
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub exercise_id: Option<String>,
    pub state: TimerState,
    pub completed: bool,
    pub progress: f64,
    pub seconds_left_in_phase: u32,
}

impl SessionSnapshot {
    fn of(timer: &BreathingTimer) -> Self {
        Self {
            exercise_id: timer.exercise().map(|e| e.id.clone()),
            state: timer.state(),
            completed: timer.is_completed(),
            progress: timer.progress(),
            seconds_left_in_phase: timer.seconds_left_in_phase(),
        }
    }
}

/// A breathing timer driven by a periodic tick source
pub struct BreathingSession {
    timer: BreathingTimer,
    ticker: Option<Ticker>,
    period: Duration,
    updates: watch::Sender<SessionSnapshot>,
}

impl BreathingSession {
    pub fn new(period: Duration) -> Self {
        let timer = BreathingTimer::new();
        let (updates, _) = watch::channel(SessionSnapshot::of(&timer));
        Self {
            timer,
            ticker: None,
            period,
            updates,
        }
    }

    pub fn timer(&self) -> &BreathingTimer {
        &self.timer
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::of(&self.timer)
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    /// Whether a tick source is currently active
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start `exercise` from the beginning with a fresh tick source
    ///
    /// If the exercise is invalid, the current session (and its tick
    /// source) carry on untouched.
    pub fn start(&mut self, exercise: BreathingExercise) -> Result<()> {
        self.timer.start(exercise)?;
        self.cancel_ticks();
        self.ticker = Some(Ticker::spawn(self.period));
        self.publish();
        Ok(())
    }

    /// Pause if `exercise` is the one running, otherwise start it
    pub fn toggle(&mut self, exercise: BreathingExercise) -> Result<()> {
        let same = self
            .timer
            .exercise()
            .is_some_and(|current| current.id == exercise.id);

        if same && self.timer.is_running() {
            self.pause();
            Ok(())
        } else {
            self.start(exercise)
        }
    }

    pub fn pause(&mut self) {
        self.cancel_ticks();
        self.timer.pause();
        self.publish();
    }

    /// Continue a paused exercise; returns false if none is selected
    pub fn resume(&mut self) -> bool {
        if !self.timer.resume() {
            return false;
        }
        if self.ticker.is_none() {
            self.ticker = Some(Ticker::spawn(self.period));
        }
        self.publish();
        true
    }

    /// Stop ticking and rewind the timer
    pub fn reset(&mut self) {
        self.cancel_ticks();
        self.timer.reset();
        self.publish();
    }

    /// Wait for the next tick and apply it
    ///
    /// Returns `None` straight away when no tick source is active, for
    /// example after pause, reset or completion.
    pub async fn next_tick(&mut self) -> Option<TickOutcome> {
        let ticker = self.ticker.as_mut()?;
        ticker.next().await?;

        let outcome = self.timer.tick();
        if outcome == TickOutcome::SessionCompleted {
            self.cancel_ticks();
        }
        self.publish();
        Some(outcome)
    }

    fn cancel_ticks(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }

    fn publish(&self) {
        self.updates.send_replace(SessionSnapshot::of(&self.timer));
    }
}
