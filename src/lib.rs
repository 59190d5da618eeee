//! Tenphase: lesson engine for ten-phase interactive explainer widgets
//!
//! Each lesson walks a learner through a fixed ten-phase sequence
//! (hook → predict → play → review → twist cycle → transfer → test →
//! mastery) around one physics or systems concept. The crate bundles the
//! phase controller, slider-driven parameter state, closed-form metric
//! calculators, quiz scoring and transfer bookkeeping, and emits typed
//! lesson events to an injected sink.

pub mod content;
pub mod core;
pub mod types;

// =============================================================================
// LESSON CONSTANTS
// =============================================================================

/// Questions per lesson quiz
pub const QUESTION_COUNT: usize = 10;

/// Minimum score for a passing quiz
pub const PASS_THRESHOLD: u32 = 7;

/// Application entries per lesson transfer phase
pub const APPLICATION_COUNT: usize = 4;

/// Debounce window after a phase transition (milliseconds)
/// Long enough to swallow double-taps, short enough to feel instant
pub const TRANSITION_DEBOUNCE_MS: u64 = 350;

/// Sample points per chart sweep
pub const CHART_SAMPLE_POINTS: usize = 40;

/// Animation frame tick interval (milliseconds); purely visual
pub const ANIMATION_TICK_MS: u64 = 50;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
