//! Status snapshot for host and terminal display

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::Phase;

/// Point-in-time view of one lesson session
#[derive(Debug, Clone, Serialize)]
pub struct LessonStatus {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Lesson id
    pub game_type: String,
    /// Lesson display title
    pub game_title: String,
    /// Current phase
    pub phase: Phase,
    /// Questions submitted so far (0-10)
    pub questions_submitted: usize,
    /// Quiz score, present once the quiz is complete
    pub score: Option<u32>,
    /// Applications completed in the transfer phase (0-4)
    pub applications_completed: usize,
    /// Visual animation frame counter
    pub animation_frame: u64,
    /// Is the mastery record available?
    pub record_available: bool,
}

impl LessonStatus {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.phase.color_code();
        let reset = Phase::color_reset();
        let emoji = self.phase.emoji();
        let score = match self.score {
            Some(s) => format!("{}/10", s),
            None => format!("{}·", self.questions_submitted),
        };

        format!(
            "{}{} phase={} | quiz={} | apps={}/4 | {}{}",
            color,
            emoji,
            self.phase,
            score,
            self.applications_completed,
            self.game_type,
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "phase={} | submitted={} | score={} | apps={}/4 | record={}",
            self.phase,
            self.questions_submitted,
            self.score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
            self.applications_completed,
            self.record_available
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> LessonStatus {
        LessonStatus {
            timestamp: Utc::now(),
            game_type: "thermal-rail".to_string(),
            game_title: "Thermal Rail".to_string(),
            phase: Phase::Test,
            questions_submitted: 3,
            score: None,
            applications_completed: 4,
            animation_frame: 120,
            record_available: false,
        }
    }

    #[test]
    fn test_parseable_format_fields() {
        let formatted = status().to_parseable_string();
        assert!(formatted.contains("phase=test"));
        assert!(formatted.contains("submitted=3"));
        assert!(formatted.contains("score=-"));
        assert!(formatted.contains("apps=4/4"));
    }

    #[test]
    fn test_terminal_format_shows_score_when_complete() {
        let mut s = status();
        s.score = Some(9);
        assert!(s.to_terminal_string().contains("9/10"));
    }
}
