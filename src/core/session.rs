//! Lesson session: one learner working through one lesson
//!
//! Owns the content reference, phase controller, parameter store, quiz and
//! transfer state, and the injected event/cue sinks. Every operation the
//! host can perform on a widget goes through here. Sessions live only in
//! memory; dropping one resets the lesson.

use serde_json::json;

use crate::content::{self, GameKind, LessonContent};
use crate::core::audio::{CueSink, SilentCues, SoundCue};
use crate::core::calculator::{self, LessonMetrics};
use crate::core::phase_machine::{PhaseController, Transition};
use crate::core::quiz::{QuizEngine, SubmitOutcome};
use crate::core::record::{RecordGenerator, RecordResult};
use crate::core::transfer::TransferBrowser;
use crate::types::{
    EventSink, EventType, LessonEvent, LessonStatus, NullSink, ParamValue, Phase,
};

/// One running lesson
pub struct LessonSession {
    content: &'static LessonContent,
    session_id: [u8; 16],
    controller: PhaseController,
    params: crate::types::ParamSet,
    quiz: QuizEngine,
    transfer: TransferBrowser,
    sink: Box<dyn EventSink>,
    cues: Box<dyn CueSink>,
    record_gen: RecordGenerator,
    /// Retained copy of everything emitted, for the record digest
    log: Vec<LessonEvent>,
    animation_frame: u64,
    sound_enabled: bool,
    mastery_emitted: bool,
    all_apps_emitted: bool,
}

impl std::fmt::Debug for LessonSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LessonSession")
            .field("game", &self.content.kind)
            .field("phase", &self.controller.current())
            .field("events", &self.log.len())
            .finish()
    }
}

impl LessonSession {
    /// Create a session with host-provided sinks. An unrecognized phase
    /// hint starts the lesson at `hook`.
    pub fn new(
        kind: GameKind,
        initial_phase: Option<&str>,
        sink: Box<dyn EventSink>,
        cues: Box<dyn CueSink>,
    ) -> Self {
        let content = content::for_game(kind);
        let mut session = Self {
            content,
            session_id: generate_session_id(),
            controller: PhaseController::from_hint(initial_phase),
            params: crate::types::ParamSet::new(content.param_specs),
            quiz: QuizEngine::new(&content.questions),
            transfer: TransferBrowser::new(&content.applications),
            sink,
            cues,
            record_gen: RecordGenerator::new(),
            log: Vec::new(),
            animation_frame: 0,
            sound_enabled: true,
            mastery_emitted: false,
            all_apps_emitted: false,
        };
        let event = session
            .event(EventType::LessonStarted)
            .with_detail("initial_phase", session.controller.current().name());
        session.emit(event);
        session
    }

    /// Create a session with no host callbacks; used in tests and by the
    /// single-shot CLI paths
    pub fn headless(kind: GameKind) -> Self {
        Self::new(kind, None, Box::new(NullSink), Box::new(SilentCues))
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Navigate to any phase. Entering `test` requires the transfer phase
    /// to be fully completed.
    pub fn go_to_phase(&mut self, target: Phase) -> Transition {
        if target == Phase::Test && !self.transfer.all_completed() {
            return Transition::Blocked;
        }

        let outcome = self.controller.go_to(target);
        if let Transition::Moved(new_phase) = outcome {
            self.cue(SoundCue::Transition);
            let event = self
                .event(EventType::PhaseChanged)
                .with_detail("new_phase", new_phase.name());
            self.emit(event);

            if new_phase == Phase::Mastery {
                self.maybe_emit_mastery();
            }
        }
        outcome
    }

    /// Advance to the successor phase; no-op at `mastery`
    pub fn next_phase(&mut self) -> Transition {
        match self.controller.current().next() {
            Some(successor) => self.go_to_phase(successor),
            None => Transition::Terminal,
        }
    }

    // =========================================================================
    // PARAMETERS & METRICS
    // =========================================================================

    /// Set a knob; the store clamps to the declared range. Emits
    /// `parameter_changed` with the stored value.
    pub fn set_param(&mut self, key: &str, value: ParamValue) -> Option<ParamValue> {
        let stored = self.params.set(key, value)?;
        let event = self
            .event(EventType::ParameterChanged)
            .with_detail("param", key)
            .with_detail(
                "value",
                match stored {
                    ParamValue::Number(v) => json!(v),
                    ParamValue::Toggle(b) => json!(b),
                },
            );
        self.emit(event);
        Some(stored)
    }

    /// Reset every knob to its default
    pub fn reset_params(&mut self) {
        self.params.reset();
        let event = self.event(EventType::SimulationReset);
        self.emit(event);
    }

    /// Current derived metrics; recomputed from the knobs on every call
    pub fn metrics(&self) -> LessonMetrics {
        calculator::metrics_for(self.content.kind, &self.params)
    }

    /// The lesson's primary chart curve
    pub fn curve(&self) -> Vec<(f64, f64)> {
        calculator::curve_for(self.content.kind, &self.params)
    }

    // =========================================================================
    // PREDICTIONS
    // =========================================================================

    /// Commit a prediction. Emits the twist variant when made during the
    /// twist_predict phase.
    pub fn make_prediction(&mut self, prediction: &str) {
        let event_type = if self.controller.current() == Phase::TwistPredict {
            EventType::TwistPredictionMade
        } else {
            EventType::PredictionMade
        };
        self.cue(SoundCue::Prediction);
        let event = self.event(event_type).with_detail("prediction", prediction);
        self.emit(event);
    }

    // =========================================================================
    // QUIZ
    // =========================================================================

    /// Record an answer choice
    pub fn select_answer(&mut self, question: usize, option_id: &str) -> bool {
        if !self.quiz.select_answer(question, option_id) {
            return false;
        }
        let event = self
            .event(EventType::AnswerSelected)
            .with_detail("question", question)
            .with_detail("answer", option_id);
        self.emit(event);
        true
    }

    /// Lock in an answer; fires the correctness cue and events, and on the
    /// final question the completion pipeline
    pub fn submit_answer(&mut self, question: usize) -> Option<SubmitOutcome> {
        let outcome = self.quiz.submit_answer(question)?;

        let event = self
            .event(EventType::AnswerSubmitted)
            .with_detail("question", question)
            .with_detail("answer", outcome.answer.clone());
        self.emit(event);

        if outcome.correct {
            self.cue(SoundCue::Correct);
            let event = self.event(EventType::AnswerCorrect).with_detail("question", question);
            self.emit(event);
        } else {
            self.cue(SoundCue::Incorrect);
            let event = self
                .event(EventType::AnswerIncorrect)
                .with_detail("question", question)
                .with_detail("correct", outcome.correct_id);
            self.emit(event);
        }

        if let Some((score, total)) = outcome.final_score {
            self.cue(SoundCue::Completion);
            let event = self
                .event(EventType::GameCompleted)
                .with_detail("score", score)
                .with_detail("total", total)
                .with_detail("passed", self.quiz.is_passing());
            self.emit(event);
        }

        Some(outcome)
    }

    /// Advance to the next question; requires the current one submitted
    pub fn next_question(&mut self) -> Option<usize> {
        self.quiz.next_question()
    }

    // =========================================================================
    // TRANSFER
    // =========================================================================

    /// View (and thereby complete) an application entry
    pub fn view_application(&mut self, id: &str) -> bool {
        if !self.transfer.view(id) {
            return false;
        }
        let event = self.event(EventType::ApplicationViewed).with_detail("application", id);
        self.emit(event);

        if self.transfer.all_completed() && !self.all_apps_emitted {
            self.all_apps_emitted = true;
            let event = self.event(EventType::AllApplicationsCompleted);
            self.emit(event);
        }
        true
    }

    // =========================================================================
    // SOUND
    // =========================================================================

    /// Toggle sound cues; returns the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        let event = self
            .event(EventType::SoundToggled)
            .with_detail("enabled", self.sound_enabled);
        self.emit(event);
        self.sound_enabled
    }

    /// Are sound cues enabled?
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    // =========================================================================
    // ANIMATION
    // =========================================================================

    /// Advance the visual frame counter. No other subsystem depends on it.
    pub fn tick_animation(&mut self) -> u64 {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.animation_frame
    }

    // =========================================================================
    // STATUS & RECORD
    // =========================================================================

    /// Point-in-time status snapshot
    pub fn status(&self) -> LessonStatus {
        LessonStatus {
            timestamp: chrono::Utc::now(),
            game_type: self.content.kind.id().to_string(),
            game_title: self.content.title.to_string(),
            phase: self.controller.current(),
            questions_submitted: self.quiz.submitted_count(),
            score: if self.quiz.is_complete() { Some(self.quiz.score()) } else { None },
            applications_completed: self.transfer.completed_count(),
            animation_frame: self.animation_frame,
            record_available: self.record_available(),
        }
    }

    /// Would a mastery record be generated right now?
    pub fn record_available(&self) -> bool {
        self.record_gen
            .can_generate(
                self.controller.current(),
                self.quiz.is_complete(),
                self.quiz.score(),
                self.transfer.all_completed(),
            )
            .is_ok()
    }

    /// Generate the mastery record over the session's event log
    pub fn mastery_record(&self) -> RecordResult {
        self.record_gen.generate(
            self.session_id,
            self.content.kind,
            self.controller.current(),
            self.quiz.is_complete(),
            self.quiz.score(),
            self.content.questions.len() as u32,
            self.transfer.all_completed(),
            &self.log,
        )
    }

    /// Restart the lesson from `hook` with fresh state
    pub fn reset(&mut self) {
        self.controller.reset();
        self.params.reset();
        self.quiz = QuizEngine::new(&self.content.questions);
        self.transfer = TransferBrowser::new(&self.content.applications);
        self.log.clear();
        self.animation_frame = 0;
        self.mastery_emitted = false;
        self.all_apps_emitted = false;
        let event = self.event(EventType::LessonStarted).with_detail("initial_phase", "hook");
        self.emit(event);
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn content(&self) -> &'static LessonContent {
        self.content
    }

    pub fn phase(&self) -> Phase {
        self.controller.current()
    }

    pub fn params(&self) -> &crate::types::ParamSet {
        &self.params
    }

    pub fn quiz(&self) -> &QuizEngine {
        &self.quiz
    }

    pub fn transfer(&self) -> &TransferBrowser {
        &self.transfer
    }

    /// Everything emitted so far
    pub fn event_log(&self) -> &[LessonEvent] {
        &self.log
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn event(&self, event_type: EventType) -> LessonEvent {
        LessonEvent::new(event_type, self.content.kind.id(), self.content.title)
    }

    fn emit(&mut self, event: LessonEvent) {
        self.log.push(event.clone());
        self.sink.emit(event);
    }

    fn cue(&mut self, cue: SoundCue) {
        if self.sound_enabled {
            self.cues.play(cue);
        }
    }

    fn maybe_emit_mastery(&mut self) {
        if self.mastery_emitted || !self.quiz.is_complete() || !self.quiz.is_passing() {
            return;
        }
        self.mastery_emitted = true;
        self.cue(SoundCue::Mastery);
        let event = self
            .event(EventType::MasteryAchieved)
            .with_detail("score", self.quiz.score())
            .with_detail("total", self.content.questions.len());
        self.emit(event);
    }
}

/// Generate session bytes from the wall clock
fn generate_session_id() -> [u8; 16] {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut bytes = [0u8; 16];
    bytes[0..16].copy_from_slice(&nanos.to_le_bytes()[0..16]);
    bytes
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QUESTION_COUNT;

    #[test]
    fn test_invalid_hint_starts_at_hook() {
        let session = LessonSession::new(
            GameKind::BackEmf,
            Some("warp_speed"),
            Box::new(NullSink),
            Box::new(SilentCues),
        );
        assert_eq!(session.phase(), Phase::Hook);
    }

    #[test]
    fn test_valid_hint_is_honored() {
        let session = LessonSession::new(
            GameKind::BackEmf,
            Some("transfer"),
            Box::new(NullSink),
            Box::new(SilentCues),
        );
        assert_eq!(session.phase(), Phase::Transfer);
    }

    #[test]
    fn test_test_phase_gated_on_transfer() {
        let mut session = LessonSession::headless(GameKind::ThermalExpansion);
        assert_eq!(session.go_to_phase(Phase::Test), Transition::Blocked);
        assert_eq!(session.phase(), Phase::Hook);

        let ids: Vec<&str> = session.content().applications.iter().map(|a| a.id).collect();
        for id in ids {
            session.view_application(id);
        }
        assert!(session.go_to_phase(Phase::Test).moved());
    }

    #[test]
    fn test_set_param_emits_and_clamps() {
        let mut session = LessonSession::headless(GameKind::BackEmf);
        let stored = session.set_param("supply_voltage", ParamValue::Number(99.0));
        assert_eq!(stored, Some(ParamValue::Number(24.0)));

        let changed = session
            .event_log()
            .iter()
            .filter(|e| e.event_type == EventType::ParameterChanged)
            .count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn test_prediction_event_is_phase_aware() {
        let mut session = LessonSession::headless(GameKind::InferenceBatching);
        session.go_to_phase(Phase::Predict);
        session.make_prediction("throughput doubles");

        std::thread::sleep(std::time::Duration::from_millis(
            crate::TRANSITION_DEBOUNCE_MS + 20,
        ));
        session.go_to_phase(Phase::TwistPredict);
        session.make_prediction("latency spikes");

        let log = session.event_log();
        assert!(log.iter().any(|e| e.event_type == EventType::PredictionMade));
        assert!(log.iter().any(|e| e.event_type == EventType::TwistPredictionMade));
    }

    #[test]
    fn test_full_quiz_emits_completion_once() {
        let mut session = LessonSession::headless(GameKind::InterconnectionQueue);
        for i in 0..QUESTION_COUNT {
            let correct = session.quiz().questions()[i].correct_id();
            session.select_answer(i, correct);
            session.submit_answer(i);
        }
        let completed = session
            .event_log()
            .iter()
            .filter(|e| e.event_type == EventType::GameCompleted)
            .count();
        assert_eq!(completed, 1);
        assert_eq!(session.status().score, Some(10));
    }

    #[test]
    fn test_toggle_sound_emits_and_flips() {
        let mut session = LessonSession::headless(GameKind::BackEmf);
        assert!(session.sound_enabled());
        assert!(!session.toggle_sound());
        assert!(session.toggle_sound());

        let toggles = session
            .event_log()
            .iter()
            .filter(|e| e.event_type == EventType::SoundToggled)
            .count();
        assert_eq!(toggles, 2);
    }

    #[test]
    fn test_animation_frame_is_isolated() {
        let mut session = LessonSession::headless(GameKind::BackEmf);
        let before = session.status();
        for _ in 0..5 {
            session.tick_animation();
        }
        let after = session.status();
        assert_eq!(after.animation_frame, 5);
        assert_eq!(before.phase, after.phase);
    }
}
