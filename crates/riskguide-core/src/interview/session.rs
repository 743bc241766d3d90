//! Session lifecycle logic.
//!
//! The `Session` struct lives in `riskguide-types`; this module adds an
//! extension trait with the operations the engine needs.

use riskguide_types::question::{Answer, Question};
use riskguide_types::session::Session;
use uuid::Uuid;

/// Create a session over a freshly generated question set.
pub fn new_session(questions: Vec<Question>) -> Session {
    Session {
        id: Uuid::now_v7(),
        questions,
        answers: Vec::new(),
        current_index: 0,
    }
}

pub trait SessionExt {
    /// The question at `current_index`, or `None` once complete.
    fn current_question(&self) -> Option<&Question>;

    /// Append an answer for the current question and advance.
    ///
    /// Does nothing if the session is already complete.
    fn record_answer(&mut self, answer: Answer);

    fn is_complete(&self) -> bool;

    /// `(answered, total)`.
    fn progress(&self) -> (usize, usize);
}

impl SessionExt for Session {
    fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    fn record_answer(&mut self, answer: Answer) {
        if self.is_complete() {
            return;
        }
        self.answers.push(answer);
        self.current_index += 1;
    }

    fn is_complete(&self) -> bool {
        self.current_index == self.questions.len()
    }

    fn progress(&self) -> (usize, usize) {
        (self.answers.len(), self.questions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskguide_types::question::AnswerValue;

    fn answer(text: &str) -> Answer {
        Answer {
            question_text: text.to_string(),
            value: AnswerValue::Single("x".to_string()),
        }
    }

    #[test]
    fn test_new_session_starts_at_zero() {
        let session = new_session(vec![Question::open_ended("Name?")]);
        assert_eq!(session.current_index, 0);
        assert!(session.answers.is_empty());
        assert_eq!(session.current_question().unwrap().text, "Name?");
        assert!(!session.is_complete());
    }

    #[test]
    fn test_record_answer_advances_until_complete() {
        let mut session = new_session(vec![
            Question::open_ended("Name?"),
            Question::open_ended("Age?"),
        ]);

        session.record_answer(answer("Name?"));
        assert_eq!(session.progress(), (1, 2));
        assert_eq!(session.current_question().unwrap().text, "Age?");

        session.record_answer(answer("Age?"));
        assert!(session.is_complete());
        assert!(session.current_question().is_none());
        assert_eq!(session.answers.len(), session.questions.len());
    }

    #[test]
    fn test_record_answer_after_complete_is_ignored() {
        let mut session = new_session(vec![Question::open_ended("Name?")]);
        session.record_answer(answer("Name?"));
        session.record_answer(answer("extra"));
        assert_eq!(session.answers.len(), 1);
        assert_eq!(session.current_index, 1);
    }

    #[test]
    fn test_empty_session_is_complete() {
        let session = new_session(Vec::new());
        assert!(session.is_complete());
        assert_eq!(session.progress(), (0, 0));
    }
}
