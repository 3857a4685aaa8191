//! Default catalog of breathing exercises and coping tools.
//!
//! This module provides the built-in exercises, plus the coping strategies
//! and crisis lines shown alongside them.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<ExerciseCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static ExerciseCatalog {
    &DEFAULT_CATALOG
}

/// Ordered collection of breathing exercises and supporting material
#[derive(Clone, Debug)]
pub struct ExerciseCatalog {
    exercises: Vec<BreathingExercise>,
    pub strategies: Vec<CopingStrategy>,
    pub crisis_lines: Vec<CrisisLine>,
}

/// Builds the default catalog with built-in exercises and coping tools
pub fn build_default_catalog() -> ExerciseCatalog {
    let exercises = vec![
        BreathingExercise {
            id: "box".into(),
            name: "Box Breathing".into(),
            description: "4-4-4-4 pattern for calm focus".into(),
            pattern: [4, 4, 4, 4],
            total_cycles: 8,
        },
        BreathingExercise {
            id: "calm".into(),
            name: "4-7-8 Calming".into(),
            description: "Deep relaxation technique".into(),
            pattern: [4, 7, 8, 0],
            total_cycles: 6,
        },
        BreathingExercise {
            id: "energize".into(),
            name: "Quick Energizer".into(),
            description: "2-2-2 for quick energy boost".into(),
            pattern: [2, 2, 2, 0],
            total_cycles: 10,
        },
    ];

    let strategies = vec![
        CopingStrategy {
            title: "5-4-3-2-1 Grounding".into(),
            description: "Name 5 things you see, 4 you can touch, 3 you hear, 2 you smell, 1 you taste"
                .into(),
            category: StrategyCategory::Mindfulness,
        },
        CopingStrategy {
            title: "Progressive Muscle Relaxation".into(),
            description: "Tense and release muscle groups to reduce physical tension".into(),
            category: StrategyCategory::Physical,
        },
        CopingStrategy {
            title: "Cognitive Reframing".into(),
            description: "Challenge negative thoughts with balanced perspectives".into(),
            category: StrategyCategory::Cognitive,
        },
    ];

    let crisis_lines = vec![
        CrisisLine {
            name: "Crisis Text Line".into(),
            contact: "Text HOME to 741741".into(),
        },
        CrisisLine {
            name: "National Suicide Prevention".into(),
            contact: "988".into(),
        },
    ];

    ExerciseCatalog {
        exercises,
        strategies,
        crisis_lines,
    }
}

impl ExerciseCatalog {
    /// Exercises in display order
    pub fn exercises(&self) -> &[BreathingExercise] {
        &self.exercises
    }

    pub fn get(&self, id: &str) -> Option<&BreathingExercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Look up an exercise, failing with `UnknownExercise`
    pub fn require(&self, id: &str) -> Result<&BreathingExercise> {
        self.get(id)
            .ok_or_else(|| Error::UnknownExercise(id.to_string()))
    }

    /// Return a copy with extra exercises appended
    ///
    /// An extra exercise whose id matches an existing one replaces it in
    /// place.
    pub fn with_custom(&self, extra: &[BreathingExercise]) -> ExerciseCatalog {
        let mut catalog = self.clone();
        for exercise in extra {
            match catalog.exercises.iter_mut().find(|e| e.id == exercise.id) {
                Some(existing) => {
                    tracing::info!("Custom exercise '{}' overrides built-in", exercise.id);
                    *existing = exercise.clone();
                }
                None => catalog.exercises.push(exercise.clone()),
            }
        }
        catalog
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for exercise in &self.exercises {
            if exercise.id.is_empty() {
                errors.push("Exercise has empty ID".to_string());
            } else if !seen.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise ID '{}'", exercise.id));
            }
            if exercise.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", exercise.id));
            }
            if let Err(e) = crate::timer::validate_exercise(exercise) {
                errors.push(e.to_string());
            }
        }

        if self.exercises.is_empty() {
            errors.push("Catalog has no exercises".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.exercises().len(), 3);
        assert_eq!(catalog.strategies.len(), 3);
        assert_eq!(catalog.crisis_lines.len(), 2);
    }

    #[test]
    fn test_order_is_stable() {
        let ids: Vec<_> = get_default_catalog()
            .exercises()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["box", "calm", "energize"]);
    }

    #[test]
    fn test_default_catalog_validates() {
        let errors = build_default_catalog().validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_require_unknown() {
        let err = get_default_catalog().require("nope").unwrap_err();
        assert!(matches!(err, Error::UnknownExercise(id) if id == "nope"));
    }

    #[test]
    fn test_custom_exercises_append_and_override() {
        let custom = vec![
            BreathingExercise {
                id: "coherent".into(),
                name: "Coherent Breathing".into(),
                description: String::new(),
                pattern: [5, 0, 5, 0],
                total_cycles: 6,
            },
            BreathingExercise {
                id: "box".into(),
                name: "Short Box".into(),
                description: String::new(),
                pattern: [3, 3, 3, 3],
                total_cycles: 4,
            },
        ];

        let catalog = get_default_catalog().with_custom(&custom);
        assert_eq!(catalog.exercises().len(), 4);
        assert_eq!(catalog.exercises()[0].name, "Short Box");
        assert_eq!(catalog.exercises()[3].id, "coherent");
        assert!(catalog.validate().is_empty());

        // Cached catalog untouched
        assert_eq!(get_default_catalog().require("box").unwrap().total_cycles, 8);
    }

    #[test]
    fn test_validate_flags_bad_exercises() {
        let bad = vec![BreathingExercise {
            id: "flat".into(),
            name: String::new(),
            description: String::new(),
            pattern: [0, 0, 0, 0],
            total_cycles: 0,
        }];
        let errors = get_default_catalog().with_custom(&bad).validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("empty name")));
        assert!(errors.iter().any(|e| e.contains("zero-length cycle")));
    }

    #[test]
    fn test_validate_flags_overflowing_cycle() {
        let long = vec![BreathingExercise {
            id: "endless".into(),
            name: "Endless".into(),
            description: String::new(),
            pattern: [u32::MAX, 1, 0, 0],
            total_cycles: 1,
        }];
        let errors = get_default_catalog().with_custom(&long).validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("endless"));
        assert!(errors[0].contains("longer than"));
    }
}
