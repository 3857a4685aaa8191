//! Mood check-ins and period summaries.
//!
//! A check-in rates mood and energy from 1 to 10 for one day. Summaries
//! average the check-ins inside a trailing window ending today and compare
//! the mood average against a baseline.
//!
//! The patterns and insights shown alongside a summary are fixed text.

use crate::{Error, Mood, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Baseline mood average that summaries are compared against
pub const PREVIOUS_WEEK_AVERAGE: f64 = 5.8;

// ============================================================================
// Check-ins
// ============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MoodCheckIn {
    pub date: NaiveDate,
    pub mood: Mood,
    pub value: u8,
    pub energy: u8,
}

impl MoodCheckIn {
    /// Build a check-in, rejecting ratings outside 1..=10
    pub fn new(date: NaiveDate, mood: Mood, value: u8, energy: u8) -> Result<Self> {
        for (name, rating) in [("mood", value), ("energy", energy)] {
            if !(1..=10).contains(&rating) {
                return Err(Error::InvalidCheckIn(format!(
                    "{} rating must be between 1 and 10 (got {})",
                    name, rating
                )));
            }
        }
        Ok(Self {
            date,
            mood,
            value,
            energy,
        })
    }
}

/// Demonstration week: seven check-ins ending on `today`
pub fn sample_week(today: NaiveDate) -> Vec<MoodCheckIn> {
    let days = [
        (Mood::Happy, 8, 7),
        (Mood::Sad, 4, 5),
        (Mood::Anxious, 3, 4),
        (Mood::Calm, 7, 8),
        (Mood::Happy, 9, 8),
        (Mood::Tired, 6, 5),
        (Mood::Thoughtful, 5, 6),
    ];

    days.iter()
        .enumerate()
        .filter_map(|(i, &(mood, value, energy))| {
            let back = (days.len() - 1 - i) as u64;
            let date = today.checked_sub_days(Days::new(back))?;
            Some(MoodCheckIn {
                date,
                mood,
                value,
                energy,
            })
        })
        .collect()
}

// ============================================================================
// Summaries
// ============================================================================

/// Trailing window a summary covers
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Week,
    Month,
    ThreeMonths,
}

impl Period {
    pub fn days(self) -> u64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::ThreeMonths => 90,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::ThreeMonths => "3 months",
        };
        f.write_str(label)
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "3months" | "3-months" | "three-months" | "three_months" => Ok(Period::ThreeMonths),
            _ => Err(Error::UnknownPeriod(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MoodSummary {
    pub period: Period,
    pub check_ins: usize,
    pub average_mood: f64,
    pub average_energy: f64,
    /// Percent change of `average_mood` against the baseline
    pub change_percent: Option<f64>,
    pub best_day: NaiveDate,
    pub hardest_day: NaiveDate,
}

/// Summarize the check-ins dated within `period` up to and including `today`
///
/// Returns `None` when no check-in falls inside the window. The change is
/// left out when the baseline is not positive.
pub fn summarize(
    check_ins: &[MoodCheckIn],
    period: Period,
    today: NaiveDate,
    baseline: f64,
) -> Option<MoodSummary> {
    let window_start = today.checked_sub_days(Days::new(period.days()))?;
    let in_window: Vec<&MoodCheckIn> = check_ins
        .iter()
        .filter(|c| c.date > window_start && c.date <= today)
        .collect();

    // Ties go to the earliest check-in
    let best = in_window
        .iter()
        .copied()
        .reduce(|best, c| if c.value > best.value { c } else { best })?;
    let hardest = in_window
        .iter()
        .copied()
        .reduce(|low, c| if c.value < low.value { c } else { low })?;

    let count = in_window.len() as f64;
    let average_mood = in_window.iter().map(|c| f64::from(c.value)).sum::<f64>() / count;
    let average_energy = in_window.iter().map(|c| f64::from(c.energy)).sum::<f64>() / count;
    let change_percent =
        (baseline > 0.0).then(|| (average_mood - baseline) / baseline * 100.0);

    tracing::debug!(
        "Summarized {} check-ins over the last {}",
        in_window.len(),
        period
    );

    Some(MoodSummary {
        period,
        check_ins: in_window.len(),
        average_mood,
        average_energy,
        change_percent,
        best_day: best.date,
        hardest_day: hardest.date,
    })
}

// ============================================================================
// Patterns and Insights
// ============================================================================

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

/// A recurring trend with a confidence percentage
#[derive(Clone, Copy, Debug, Serialize)]
pub struct MoodPattern {
    pub title: &'static str,
    pub description: &'static str,
    pub trend: Trend,
    pub confidence: u8,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct MoodInsight {
    pub title: &'static str,
    pub description: &'static str,
    /// Suggests something the user can act on
    pub actionable: bool,
}

pub const PATTERNS: [MoodPattern; 3] = [
    MoodPattern {
        title: "Weekly Pattern",
        description: "You tend to feel lower on Sundays and Wednesdays, possibly due to work anticipation.",
        trend: Trend::Down,
        confidence: 87,
    },
    MoodPattern {
        title: "Energy Correlation",
        description: "Your mood closely follows your energy levels. Focus on sleep and exercise.",
        trend: Trend::Up,
        confidence: 92,
    },
    MoodPattern {
        title: "Recovery Time",
        description: "You bounce back from low moods within 24-48 hours, showing good resilience.",
        trend: Trend::Up,
        confidence: 78,
    },
];

pub const INSIGHTS: [MoodInsight; 3] = [
    MoodInsight {
        title: "Cognitive Pattern",
        description: "Journaling on difficult days improves your next-day mood by an average of 2.3 points.",
        actionable: true,
    },
    MoodInsight {
        title: "Emotional Trigger",
        description: "Social interactions consistently boost your mood, especially on weekends.",
        actionable: false,
    },
    MoodInsight {
        title: "Growth Opportunity",
        description: "Your self-awareness has increased 34% since you started tracking. Keep it up!",
        actionable: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sample_week_summary() {
        let today = day(2026, 3, 15);
        let week = sample_week(today);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, day(2026, 3, 9));
        assert_eq!(week[6].date, today);

        let summary = summarize(&week, Period::Week, today, PREVIOUS_WEEK_AVERAGE).unwrap();
        assert_eq!(summary.check_ins, 7);
        assert!((summary.average_mood - 6.0).abs() < 1e-9);
        assert!((summary.average_energy - 43.0 / 7.0).abs() < 1e-9);
        let change = summary.change_percent.unwrap();
        assert!((change - 3.448).abs() < 0.001, "change was {}", change);
        assert_eq!(summary.best_day, day(2026, 3, 13));
        assert_eq!(summary.hardest_day, day(2026, 3, 11));
    }

    #[test]
    fn test_window_excludes_old_and_future_check_ins() {
        let today = day(2026, 3, 31);
        let check_ins = vec![
            MoodCheckIn::new(day(2026, 3, 24), Mood::Sad, 2, 2).unwrap(),
            MoodCheckIn::new(day(2026, 3, 25), Mood::Calm, 6, 6).unwrap(),
            MoodCheckIn::new(day(2026, 4, 1), Mood::Happy, 10, 10).unwrap(),
        ];

        let week = summarize(&check_ins, Period::Week, today, PREVIOUS_WEEK_AVERAGE).unwrap();
        assert_eq!(week.check_ins, 1);
        assert_eq!(week.average_mood, 6.0);

        let month = summarize(&check_ins, Period::Month, today, PREVIOUS_WEEK_AVERAGE).unwrap();
        assert_eq!(month.check_ins, 2);
        assert_eq!(month.hardest_day, day(2026, 3, 24));
    }

    #[test]
    fn test_empty_window_and_zero_baseline() {
        let today = day(2026, 3, 31);
        assert!(summarize(&[], Period::ThreeMonths, today, PREVIOUS_WEEK_AVERAGE).is_none());

        let summary = summarize(&sample_week(today), Period::Week, today, 0.0).unwrap();
        assert!(summary.change_percent.is_none());
    }

    #[test]
    fn test_check_in_rating_bounds() {
        let today = day(2026, 3, 31);
        assert!(MoodCheckIn::new(today, Mood::Calm, 1, 10).is_ok());
        assert!(matches!(
            MoodCheckIn::new(today, Mood::Calm, 0, 5),
            Err(Error::InvalidCheckIn(ref msg)) if msg.contains("mood")
        ));
        assert!(matches!(
            MoodCheckIn::new(today, Mood::Calm, 5, 11),
            Err(Error::InvalidCheckIn(ref msg)) if msg.contains("energy")
        ));
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("week".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("3months".parse::<Period>().unwrap(), Period::ThreeMonths);
        assert_eq!("Three-Months".parse::<Period>().unwrap(), Period::ThreeMonths);
        assert!(matches!("year".parse::<Period>(), Err(Error::UnknownPeriod(_))));
        assert_eq!(Period::ThreeMonths.days(), 90);
    }
}
