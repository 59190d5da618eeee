//! Phase controller: debounced navigation over the ten-phase sequence
//!
//! Transition rules:
//! - any phase → any phase via explicit navigation
//! - current → successor via `next()`
//! - `mastery` is terminal; `next()` there is a no-op
//! - calls inside the debounce window are ignored

use std::time::Instant;

use crate::types::Phase;
use crate::TRANSITION_DEBOUNCE_MS;

/// Outcome of one navigation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Phase changed to the contained target
    Moved(Phase),
    /// Target equals the current phase; nothing to do
    AlreadyThere,
    /// Call arrived inside the debounce window and was ignored
    Debounced,
    /// `next()` at the terminal phase
    Terminal,
    /// Refused by a session gate (transfer phase incomplete)
    Blocked,
}

impl Transition {
    /// Did the current phase change?
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved(_))
    }
}

/// Lesson phase state machine
#[derive(Debug)]
pub struct PhaseController {
    /// Current phase
    phase: Phase,
    /// When the last accepted transition happened (None before the first)
    last_transition: Option<Instant>,
    /// Number of accepted transitions
    transition_count: u64,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new(Phase::Hook)
    }
}

impl PhaseController {
    /// Create controller starting at the given phase
    pub fn new(initial: Phase) -> Self {
        Self { phase: initial, last_transition: None, transition_count: 0 }
    }

    /// Create controller from an external phase hint; invalid hints start
    /// at `hook`
    pub fn from_hint(hint: Option<&str>) -> Self {
        Self::new(Phase::from_hint(hint))
    }

    /// Navigate to any phase. No-op while debounced or when already there.
    pub fn go_to(&mut self, target: Phase) -> Transition {
        if self.is_debounced() {
            return Transition::Debounced;
        }
        if target == self.phase {
            return Transition::AlreadyThere;
        }

        self.phase = target;
        self.last_transition = Some(Instant::now());
        self.transition_count += 1;
        Transition::Moved(target)
    }

    /// Advance to the successor phase; no-op at `mastery`
    pub fn next(&mut self) -> Transition {
        match self.phase.next() {
            Some(successor) => self.go_to(successor),
            None => Transition::Terminal,
        }
    }

    /// Is the debounce window currently open?
    pub fn is_debounced(&self) -> bool {
        self.last_transition
            .map(|t| t.elapsed().as_millis() < TRANSITION_DEBOUNCE_MS as u128)
            .unwrap_or(false)
    }

    /// Get current phase
    pub fn current(&self) -> Phase {
        self.phase
    }

    /// Get accepted transition count
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }

    /// Reset to the initial phase of a fresh lesson
    pub fn reset(&mut self) {
        *self = Self::new(Phase::Hook);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PHASE_ORDER;
    use std::thread::sleep;
    use std::time::Duration;

    fn settle() {
        sleep(Duration::from_millis(TRANSITION_DEBOUNCE_MS + 20));
    }

    #[test]
    fn test_initial_phase_is_hook() {
        let controller = PhaseController::default();
        assert_eq!(controller.current(), Phase::Hook);
    }

    #[test]
    fn test_go_to_every_phase_directly() {
        // Any-order navigation: every phase is reachable from hook
        for target in PHASE_ORDER {
            let mut controller = PhaseController::default();
            controller.go_to(target);
            assert_eq!(controller.current(), target);
        }
    }

    #[test]
    fn test_go_to_same_target_is_idempotent() {
        let mut controller = PhaseController::default();
        controller.go_to(Phase::Play);
        settle();
        let outcome = controller.go_to(Phase::Play);
        assert_eq!(outcome, Transition::AlreadyThere);
        assert_eq!(controller.current(), Phase::Play);
        assert_eq!(controller.transition_count(), 1);
    }

    #[test]
    fn test_rapid_second_call_is_debounced() {
        let mut controller = PhaseController::default();
        assert!(controller.go_to(Phase::Predict).moved());

        // Inside the window: ignored
        let outcome = controller.go_to(Phase::Test);
        assert_eq!(outcome, Transition::Debounced);
        assert_eq!(controller.current(), Phase::Predict);

        // After the window: accepted
        settle();
        assert!(controller.go_to(Phase::Test).moved());
        assert_eq!(controller.current(), Phase::Test);
    }

    #[test]
    fn test_next_walks_the_full_sequence() {
        let mut controller = PhaseController::default();
        for expected in PHASE_ORDER.iter().skip(1) {
            settle();
            assert!(controller.next().moved());
            assert_eq!(controller.current(), *expected);
        }
    }

    #[test]
    fn test_next_at_mastery_is_terminal() {
        let mut controller = PhaseController::new(Phase::Mastery);
        let outcome = controller.next();
        assert_eq!(outcome, Transition::Terminal);
        assert_eq!(controller.current(), Phase::Mastery);
    }

    #[test]
    fn test_backward_navigation_is_permitted() {
        let mut controller = PhaseController::new(Phase::Test);
        assert!(controller.go_to(Phase::Hook).moved());
        assert_eq!(controller.current(), Phase::Hook);
    }

    #[test]
    fn test_reset_returns_to_hook() {
        let mut controller = PhaseController::new(Phase::Transfer);
        controller.go_to(Phase::Test);
        controller.reset();
        assert_eq!(controller.current(), Phase::Hook);
        assert_eq!(controller.transition_count(), 0);
    }
}
