//! Quiz engine: answer recording, submission locking, scoring
//!
//! The answer record always has exactly one slot per question. Submission
//! is one-way; a locked answer cannot be retracted.

use crate::types::Question;
use crate::PASS_THRESHOLD;

/// Result of locking in one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Question index that was locked
    pub question: usize,
    /// The id the learner chose
    pub answer: String,
    /// Was it the correct option?
    pub correct: bool,
    /// Correct option id, revealed at submission
    pub correct_id: &'static str,
    /// Explanation text, revealed at submission
    pub explanation: &'static str,
    /// Present when this was the final question: (score, total)
    pub final_score: Option<(u32, u32)>,
}

/// Quiz state for one lesson session
#[derive(Debug)]
pub struct QuizEngine {
    questions: &'static [Question],
    /// Selected option id per question, None while unanswered
    answers: Vec<Option<String>>,
    /// Locked flags per question
    submitted: Vec<bool>,
    /// Index of the question currently shown
    current: usize,
}

impl QuizEngine {
    /// Create engine over a lesson's question bank
    pub fn new(questions: &'static [Question]) -> Self {
        Self {
            questions,
            answers: vec![None; questions.len()],
            submitted: vec![false; questions.len()],
            current: 0,
        }
    }

    /// Record a choice for a question. Ignored once the question is
    /// submitted or when the option does not belong to the question.
    pub fn select_answer(&mut self, question: usize, option_id: &str) -> bool {
        let Some(q) = self.questions.get(question) else {
            return false;
        };
        if self.submitted[question] || !q.has_option(option_id) {
            return false;
        }
        self.answers[question] = Some(option_id.to_string());
        true
    }

    /// Lock in the selected answer for a question, revealing correctness.
    /// Returns None when nothing is selected or it is already locked.
    pub fn submit_answer(&mut self, question: usize) -> Option<SubmitOutcome> {
        let q = self.questions.get(question)?;
        if self.submitted[question] {
            return None;
        }
        let answer = self.answers[question].clone()?;

        self.submitted[question] = true;
        let correct = answer == q.correct_id();
        let final_score = if self.is_complete() {
            Some((self.score(), self.questions.len() as u32))
        } else {
            None
        };

        Some(SubmitOutcome {
            question,
            answer,
            correct,
            correct_id: q.correct_id(),
            explanation: q.explanation,
            final_score,
        })
    }

    /// Advance to the next question; requires the current one to be
    /// submitted. Returns the new index.
    pub fn next_question(&mut self) -> Option<usize> {
        if !self.submitted[self.current] || self.current + 1 >= self.questions.len() {
            return None;
        }
        self.current += 1;
        Some(self.current)
    }

    /// Count of positions whose recorded answer matches the correct id
    pub fn score(&self) -> u32 {
        self.questions
            .iter()
            .zip(&self.answers)
            .zip(&self.submitted)
            .filter(|((q, a), locked)| {
                **locked && a.as_deref() == Some(q.correct_id())
            })
            .count() as u32
    }

    /// Fixed pass gate, uniform across lessons
    pub fn is_passing(&self) -> bool {
        self.score() >= PASS_THRESHOLD
    }

    /// Have all questions been submitted?
    pub fn is_complete(&self) -> bool {
        self.submitted.iter().all(|s| *s)
    }

    /// Index of the question currently shown
    pub fn current_question(&self) -> usize {
        self.current
    }

    /// Number of locked answers
    pub fn submitted_count(&self) -> usize {
        self.submitted.iter().filter(|s| **s).count()
    }

    /// The question bank
    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    /// Answer record length; always equals the question count
    pub fn answer_len(&self) -> usize {
        self.answers.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{self, GameKind};
    use crate::QUESTION_COUNT;

    fn engine() -> QuizEngine {
        QuizEngine::new(&content::for_game(GameKind::BackEmf).questions)
    }

    #[test]
    fn test_all_correct_scores_ten_and_passes() {
        let mut quiz = engine();
        for i in 0..QUESTION_COUNT {
            let correct = quiz.questions()[i].correct_id();
            assert!(quiz.select_answer(i, correct));
            let outcome = quiz.submit_answer(i).unwrap();
            assert!(outcome.correct);
        }
        assert_eq!(quiz.score(), 10);
        assert!(quiz.is_passing());
        assert!(quiz.is_complete());
    }

    #[test]
    fn test_all_wrong_scores_zero_and_fails() {
        let mut quiz = engine();
        for i in 0..QUESTION_COUNT {
            let q = &quiz.questions()[i];
            let wrong = q.options.iter().find(|o| !o.is_correct).unwrap().id;
            quiz.select_answer(i, wrong);
            let outcome = quiz.submit_answer(i).unwrap();
            assert!(!outcome.correct);
        }
        assert_eq!(quiz.score(), 0);
        assert!(!quiz.is_passing());
    }

    #[test]
    fn test_final_submission_reports_score() {
        let mut quiz = engine();
        for i in 0..QUESTION_COUNT {
            let correct = quiz.questions()[i].correct_id();
            quiz.select_answer(i, correct);
            let outcome = quiz.submit_answer(i).unwrap();
            if i + 1 < QUESTION_COUNT {
                assert_eq!(outcome.final_score, None);
            } else {
                assert_eq!(outcome.final_score, Some((10, 10)));
            }
        }
    }

    #[test]
    fn test_submitted_answer_cannot_change() {
        let mut quiz = engine();
        let correct = quiz.questions()[0].correct_id();
        quiz.select_answer(0, correct);
        quiz.submit_answer(0).unwrap();

        // Re-selection and re-submission are both refused
        assert!(!quiz.select_answer(0, "a"));
        assert!(quiz.submit_answer(0).is_none());
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn test_foreign_option_id_ignored() {
        let mut quiz = engine();
        assert!(!quiz.select_answer(0, "zz"));
        assert!(quiz.submit_answer(0).is_none());
    }

    #[test]
    fn test_next_question_requires_submission() {
        let mut quiz = engine();
        assert_eq!(quiz.next_question(), None);

        let correct = quiz.questions()[0].correct_id();
        quiz.select_answer(0, correct);
        quiz.submit_answer(0);
        assert_eq!(quiz.next_question(), Some(1));
        assert_eq!(quiz.current_question(), 1);
    }

    #[test]
    fn test_answer_record_length_invariant() {
        let mut quiz = engine();
        assert_eq!(quiz.answer_len(), QUESTION_COUNT);
        quiz.select_answer(3, quiz.questions()[3].correct_id());
        quiz.submit_answer(3);
        quiz.select_answer(9, quiz.questions()[9].correct_id());
        assert_eq!(quiz.answer_len(), QUESTION_COUNT);
    }

    #[test]
    fn test_partial_score_counts_only_locked_correct() {
        let mut quiz = engine();
        // Selected but never submitted: does not count
        quiz.select_answer(0, quiz.questions()[0].correct_id());
        assert_eq!(quiz.score(), 0);
        quiz.submit_answer(0);
        assert_eq!(quiz.score(), 1);
    }
}
