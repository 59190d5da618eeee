//! Lesson event records and the host-facing sink

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The closed set of events a lesson emits to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Lesson session created
    LessonStarted,
    /// Current phase changed; details: {new_phase}
    PhaseChanged,
    /// Prediction committed in `predict`; details: {prediction}
    PredictionMade,
    /// Prediction committed in `twist_predict`; details: {prediction}
    TwistPredictionMade,
    /// A slider or toggle moved; details: {param, value}
    ParameterChanged,
    /// Parameters reset to defaults
    SimulationReset,
    /// Quiz answer chosen (not yet locked); details: {question, answer}
    AnswerSelected,
    /// Quiz answer locked in; details: {question, answer}
    AnswerSubmitted,
    /// Locked answer was correct; details: {question}
    AnswerCorrect,
    /// Locked answer was incorrect; details: {question, correct}
    AnswerIncorrect,
    /// An application entry was viewed; details: {application}
    ApplicationViewed,
    /// All four application entries completed
    AllApplicationsCompleted,
    /// Final question submitted; details: {score, total, passed}
    GameCompleted,
    /// Entered `mastery` with a passing score; details: {score, total}
    MasteryAchieved,
    /// Sound cues toggled; details: {enabled}
    SoundToggled,
}

impl EventType {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::LessonStarted => "lesson_started",
            Self::PhaseChanged => "phase_changed",
            Self::PredictionMade => "prediction_made",
            Self::TwistPredictionMade => "twist_prediction_made",
            Self::ParameterChanged => "parameter_changed",
            Self::SimulationReset => "simulation_reset",
            Self::AnswerSelected => "answer_selected",
            Self::AnswerSubmitted => "answer_submitted",
            Self::AnswerCorrect => "answer_correct",
            Self::AnswerIncorrect => "answer_incorrect",
            Self::ApplicationViewed => "application_viewed",
            Self::AllApplicationsCompleted => "all_applications_completed",
            Self::GameCompleted => "game_completed",
            Self::MasteryAchieved => "mastery_achieved",
            Self::SoundToggled => "sound_toggled",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::LessonStarted => "Lesson session started",
            Self::PhaseChanged => "Phase changed",
            Self::PredictionMade => "Prediction made",
            Self::TwistPredictionMade => "Twist prediction made",
            Self::ParameterChanged => "Parameter changed",
            Self::SimulationReset => "Simulation reset to defaults",
            Self::AnswerSelected => "Answer selected",
            Self::AnswerSubmitted => "Answer submitted",
            Self::AnswerCorrect => "Answer was correct",
            Self::AnswerIncorrect => "Answer was incorrect",
            Self::ApplicationViewed => "Application entry viewed",
            Self::AllApplicationsCompleted => "All applications completed",
            Self::GameCompleted => "Quiz completed and scored",
            Self::MasteryAchieved => "Mastery achieved",
            Self::SoundToggled => "Sound cues toggled",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One event record pushed to the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonEvent {
    /// Which event
    pub event_type: EventType,
    /// Lesson id, e.g. "back-emf-lab"
    pub game_type: String,
    /// Lesson display title
    pub game_title: String,
    /// Free-form key/value payload, shape varies by event type
    pub details: Map<String, Value>,
    /// When the event fired
    pub timestamp: DateTime<Utc>,
}

impl LessonEvent {
    /// Create an event stamped now
    pub fn new(event_type: EventType, game_type: &str, game_title: &str) -> Self {
        Self {
            event_type,
            game_type: game_type.to_string(),
            game_title: game_title.to_string(),
            details: Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach a detail field
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// One-directional event sink injected by the host.
///
/// Fire-and-forget: no acknowledgement, no backpressure. The event rate is
/// a handful per user interaction.
pub trait EventSink: Send + Sync {
    fn emit(&mut self, event: LessonEvent);
}

/// Sink that drops everything (host supplied no callback)
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: LessonEvent) {}
}

/// Sink that collects events in memory; used in tests and by the record
/// digest
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Vec<LessonEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[LessonEvent] {
        &self.events
    }

    pub fn count_of(&self, event_type: EventType) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: LessonEvent) {
        self.events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_codes_are_snake_case_and_distinct() {
        let all = [
            EventType::LessonStarted,
            EventType::PhaseChanged,
            EventType::PredictionMade,
            EventType::TwistPredictionMade,
            EventType::ParameterChanged,
            EventType::SimulationReset,
            EventType::AnswerSelected,
            EventType::AnswerSubmitted,
            EventType::AnswerCorrect,
            EventType::AnswerIncorrect,
            EventType::ApplicationViewed,
            EventType::AllApplicationsCompleted,
            EventType::GameCompleted,
            EventType::MasteryAchieved,
            EventType::SoundToggled,
        ];
        let codes: std::collections::HashSet<_> = all.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), all.len());
        assert!(all.iter().all(|e| !e.code().contains(char::is_uppercase)));
    }

    #[test]
    fn test_event_serializes_with_details() {
        let event = LessonEvent::new(EventType::PhaseChanged, "back-emf-lab", "Back-EMF Lab")
            .with_detail("new_phase", "play");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"phase_changed\""));
        assert!(json.contains("\"new_phase\":\"play\""));
        let back: LessonEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event_type, EventType::PhaseChanged);
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        sink.emit(LessonEvent::new(EventType::LessonStarted, "g", "G"));
        sink.emit(LessonEvent::new(EventType::PhaseChanged, "g", "G"));
        sink.emit(LessonEvent::new(EventType::PhaseChanged, "g", "G"));
        assert_eq!(sink.events().len(), 3);
        assert_eq!(sink.count_of(EventType::PhaseChanged), 2);
    }
}
