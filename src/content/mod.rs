//! Static lesson content banks
//!
//! Immutable configuration: question banks, application entries, and knob
//! specs for the four shipped lessons. Sessions hold these by reference;
//! nothing here is runtime-mutable.

mod batching;
mod grid;
mod motor;
mod thermal;

use crate::types::{ApplicationEntry, ParamSpec, Question};

pub use batching::BATCHING_LESSON;
pub use grid::GRID_LESSON;
pub use motor::MOTOR_LESSON;
pub use thermal::THERMAL_LESSON;

/// The four shipped lessons; wire traffic always uses `id()` strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    /// Motor back-EMF and stall current
    BackEmf,
    /// Inference batching, latency vs throughput
    InferenceBatching,
    /// Thermal expansion of long structures
    ThermalExpansion,
    /// Grid interconnection queues
    InterconnectionQueue,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::BackEmf,
        GameKind::InferenceBatching,
        GameKind::ThermalExpansion,
        GameKind::InterconnectionQueue,
    ];

    /// Stable lesson id, as carried in events
    pub fn id(&self) -> &'static str {
        match self {
            GameKind::BackEmf => "back-emf-lab",
            GameKind::InferenceBatching => "batch-flow",
            GameKind::ThermalExpansion => "thermal-rail",
            GameKind::InterconnectionQueue => "grid-queue",
        }
    }

    /// Parse a lesson id
    pub fn parse(s: &str) -> Option<GameKind> {
        GameKind::ALL.into_iter().find(|k| k.id() == s.trim())
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Everything one lesson ships with
pub struct LessonContent {
    /// Which lesson this is
    pub kind: GameKind,
    /// Display title
    pub title: &'static str,
    /// One-line teaser shown in the catalog and the hook phase
    pub tagline: &'static str,
    /// Declared knobs
    pub param_specs: &'static [ParamSpec],
    /// Exactly ten quiz questions
    pub questions: Vec<Question>,
    /// Exactly four application entries
    pub applications: Vec<ApplicationEntry>,
}

/// Content bank for a lesson
pub fn for_game(kind: GameKind) -> &'static LessonContent {
    match kind {
        GameKind::BackEmf => &MOTOR_LESSON,
        GameKind::InferenceBatching => &BATCHING_LESSON,
        GameKind::ThermalExpansion => &THERMAL_LESSON,
        GameKind::InterconnectionQueue => &GRID_LESSON,
    }
}

/// All four lessons, catalog order
pub fn catalog() -> Vec<&'static LessonContent> {
    GameKind::ALL.iter().map(|k| for_game(*k)).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{APPLICATION_COUNT, QUESTION_COUNT};

    #[test]
    fn test_catalog_has_four_lessons() {
        assert_eq!(catalog().len(), 4);
    }

    #[test]
    fn test_game_id_round_trip() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::parse(kind.id()), Some(kind));
        }
        assert_eq!(GameKind::parse("minesweeper"), None);
    }

    #[test]
    fn test_every_bank_is_well_formed() {
        for content in catalog() {
            assert_eq!(content.questions.len(), QUESTION_COUNT, "{}", content.kind);
            assert_eq!(content.applications.len(), APPLICATION_COUNT, "{}", content.kind);
            assert!(!content.param_specs.is_empty());

            for (i, q) in content.questions.iter().enumerate() {
                let correct = q.options.iter().filter(|o| o.is_correct).count();
                assert_eq!(correct, 1, "{} question {} must have one correct option", content.kind, i);
                let ids: std::collections::HashSet<_> = q.options.iter().map(|o| o.id).collect();
                assert_eq!(ids.len(), q.options.len(), "{} question {} option ids unique", content.kind, i);
            }

            let app_ids: std::collections::HashSet<_> =
                content.applications.iter().map(|a| a.id).collect();
            assert_eq!(app_ids.len(), APPLICATION_COUNT);
        }
    }

    #[test]
    fn test_denominator_knobs_stay_positive() {
        // Formulas divide by these; their declared minima must be > 0
        let checks = [
            (GameKind::BackEmf, vec!["resistance", "ke"]),
            (GameKind::InferenceBatching, vec!["processing_time", "arrival_rate"]),
        ];
        for (kind, keys) in checks {
            let content = for_game(kind);
            for key in keys {
                let spec = content.param_specs.iter().find(|s| s.key == key).unwrap();
                assert!(spec.min > 0.0, "{} {} min must be positive", kind, key);
            }
        }
    }
}
