//! Lesson phase definitions

use serde::{Deserialize, Serialize};

/// The ten phases of a lesson, in teaching order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Opening hook, motivates the concept
    Hook,
    /// Learner commits to a prediction before touching the sliders
    Predict,
    /// Free play with the simulator
    Play,
    /// Review of what the play phase showed
    Review,
    /// Prediction for the twist scenario
    TwistPredict,
    /// Play under the twist scenario
    TwistPlay,
    /// Review of the twist
    TwistReview,
    /// Real-world application browser
    Transfer,
    /// Ten-question quiz
    Test,
    /// Terminal phase, lesson complete
    Mastery,
}

/// All phases in lesson order
pub const PHASE_ORDER: [Phase; 10] = [
    Phase::Hook,
    Phase::Predict,
    Phase::Play,
    Phase::Review,
    Phase::TwistPredict,
    Phase::TwistPlay,
    Phase::TwistReview,
    Phase::Transfer,
    Phase::Test,
    Phase::Mastery,
];

impl Phase {
    /// Position in the lesson order (0-9)
    pub fn index(&self) -> usize {
        PHASE_ORDER.iter().position(|p| p == self).unwrap_or(0)
    }

    /// Successor in the lesson order, None at the terminal phase
    pub fn next(&self) -> Option<Phase> {
        PHASE_ORDER.get(self.index() + 1).copied()
    }

    /// Is this the terminal phase?
    pub fn is_terminal(&self) -> bool {
        *self == Phase::Mastery
    }

    /// Resolve an external phase hint; anything unrecognized means `Hook`
    pub fn from_hint(hint: Option<&str>) -> Phase {
        hint.and_then(Phase::parse).unwrap_or(Phase::Hook)
    }

    /// Parse a snake_case phase name
    pub fn parse(s: &str) -> Option<Phase> {
        match s.trim() {
            "hook" => Some(Phase::Hook),
            "predict" => Some(Phase::Predict),
            "play" => Some(Phase::Play),
            "review" => Some(Phase::Review),
            "twist_predict" => Some(Phase::TwistPredict),
            "twist_play" => Some(Phase::TwistPlay),
            "twist_review" => Some(Phase::TwistReview),
            "transfer" => Some(Phase::Transfer),
            "test" => Some(Phase::Test),
            "mastery" => Some(Phase::Mastery),
            _ => None,
        }
    }

    /// Snake_case name, as emitted in events
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Hook => "hook",
            Phase::Predict => "predict",
            Phase::Play => "play",
            Phase::Review => "review",
            Phase::TwistPredict => "twist_predict",
            Phase::TwistPlay => "twist_play",
            Phase::TwistReview => "twist_review",
            Phase::Transfer => "transfer",
            Phase::Test => "test",
            Phase::Mastery => "mastery",
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Phase::Hook => "\x1b[90m",                          // Gray
            Phase::Predict | Phase::TwistPredict => "\x1b[36m", // Cyan
            Phase::Play | Phase::TwistPlay => "\x1b[33m",       // Yellow
            Phase::Review | Phase::TwistReview => "\x1b[34m",   // Blue
            Phase::Transfer => "\x1b[35m",                      // Magenta
            Phase::Test => "\x1b[31m",                          // Red
            Phase::Mastery => "\x1b[32m",                       // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for phase
    pub fn emoji(&self) -> &'static str {
        match self {
            Phase::Hook => "🪝",
            Phase::Predict | Phase::TwistPredict => "🔮",
            Phase::Play | Phase::TwistPlay => "🎛",
            Phase::Review | Phase::TwistReview => "🔍",
            Phase::Transfer => "🌍",
            Phase::Test => "📝",
            Phase::Mastery => "🏆",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_covers_all_ten() {
        assert_eq!(PHASE_ORDER.len(), 10);
        assert_eq!(PHASE_ORDER[0], Phase::Hook);
        assert_eq!(PHASE_ORDER[9], Phase::Mastery);
    }

    #[test]
    fn test_successor_chain() {
        assert_eq!(Phase::Hook.next(), Some(Phase::Predict));
        assert_eq!(Phase::Transfer.next(), Some(Phase::Test));
        assert_eq!(Phase::Test.next(), Some(Phase::Mastery));
        assert_eq!(Phase::Mastery.next(), None);
    }

    #[test]
    fn test_parse_round_trip() {
        for phase in PHASE_ORDER {
            assert_eq!(Phase::parse(phase.name()), Some(phase));
        }
    }

    #[test]
    fn test_invalid_hint_defaults_to_hook() {
        assert_eq!(Phase::from_hint(None), Phase::Hook);
        assert_eq!(Phase::from_hint(Some("warmup")), Phase::Hook);
        assert_eq!(Phase::from_hint(Some("")), Phase::Hook);
        assert_eq!(Phase::from_hint(Some("twist_play")), Phase::TwistPlay);
    }

    #[test]
    fn test_serde_names_are_snake_case() {
        let json = serde_json::to_string(&Phase::TwistPredict).unwrap();
        assert_eq!(json, "\"twist_predict\"");
        let back: Phase = serde_json::from_str("\"mastery\"").unwrap();
        assert_eq!(back, Phase::Mastery);
    }
}
