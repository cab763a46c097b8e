use chrono::{DateTime, Utc};
use std::fmt;

use prep_core::model::AnswerRecord;

use super::progress::FlowProgress;
use crate::error::FlowError;

//
// ─── ADVANCE OUTCOME ───────────────────────────────────────────────────────────
//

/// Outcome of a single `advance` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the next question.
    Next,
    /// The final answer was recorded; the flow is finished. Emitted exactly
    /// once per run.
    Finished,
}

//
// ─── INTERVIEW FLOW ────────────────────────────────────────────────────────────
//

/// One-question-at-a-time walkthrough over a fixed question list.
///
/// The question list never changes after construction. Answer records are
/// keyed by question *text*: advancing upserts the current draft, and
/// navigating back to an answered question preloads its stored text.
/// Retreating never saves the draft; only `advance` does. Two identical
/// question strings therefore share one draft and one record.
pub struct InterviewFlow {
    questions: Vec<String>,
    current: usize,
    answers: Vec<AnswerRecord>,
    draft: String,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl InterviewFlow {
    /// Start a flow over the given questions, entering the first one.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Empty` if no questions are provided.
    pub fn new(questions: Vec<String>, started_at: DateTime<Utc>) -> Result<Self, FlowError> {
        if questions.is_empty() {
            return Err(FlowError::Empty);
        }

        let mut flow = Self {
            questions,
            current: 0,
            answers: Vec::new(),
            draft: String::new(),
            started_at,
            completed_at: None,
        };
        flow.enter_current();
        Ok(flow)
    }

    /// Preload the draft for the current question from any record with the
    /// same question text.
    fn enter_current(&mut self) {
        let question = &self.questions[self.current];
        self.draft = self
            .answers
            .iter()
            .find(|a| a.question == *question)
            .map(|a| a.answer.clone())
            .unwrap_or_default();
    }

    #[must_use]
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// 0-based index of the question currently shown.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &str {
        &self.questions[self.current]
    }

    /// The in-progress answer text for the current question.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the in-progress answer text.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Records collected so far, in first-answered order.
    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns a summary of the current flow progress.
    #[must_use]
    pub fn progress(&self) -> FlowProgress {
        let total = self.questions.len();
        let position = self.current + 1;
        FlowProgress {
            total,
            answered: self.answers.len(),
            position,
            fraction: position as f64 / total as f64,
            is_complete: self.is_complete(),
        }
    }

    /// Record the draft for the current question and move forward.
    ///
    /// The record replaces any earlier one with the same question text;
    /// otherwise it is appended. At the last question this is the terminal
    /// transition: the flow completes and no further steps are accepted.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Completed` once the flow has finished.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, FlowError> {
        if self.is_complete() {
            return Err(FlowError::Completed);
        }

        let record = AnswerRecord::new(self.questions[self.current].clone(), self.draft.clone());
        match self
            .answers
            .iter_mut()
            .find(|a| a.question == record.question)
        {
            Some(existing) => *existing = record,
            None => self.answers.push(record),
        }

        if self.current + 1 >= self.questions.len() {
            self.completed_at = Some(now);
            return Ok(Advance::Finished);
        }

        self.current += 1;
        self.enter_current();
        Ok(Advance::Next)
    }

    /// Step back one question without saving the draft.
    ///
    /// Returns false (and changes nothing) at the first question. Unsaved
    /// draft text is discarded; only `advance` persists an edit.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Completed` once the flow has finished.
    pub fn retreat(&mut self) -> Result<bool, FlowError> {
        if self.is_complete() {
            return Err(FlowError::Completed);
        }
        if self.current == 0 {
            return Ok(false);
        }

        self.current -= 1;
        self.enter_current();
        Ok(true)
    }
}

impl fmt::Debug for InterviewFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterviewFlow")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::time::fixed_now;
    use std::collections::HashSet;

    fn build_questions(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Question {i}?")).collect()
    }

    fn build_flow(n: usize) -> InterviewFlow {
        InterviewFlow::new(build_questions(n), fixed_now()).unwrap()
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let err = InterviewFlow::new(Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(err, FlowError::Empty));
    }

    #[test]
    fn n_advances_complete_exactly_once() {
        let mut flow = build_flow(3);
        let mut finished = 0;

        for i in 1..=3 {
            flow.set_draft(format!("answer {i}"));
            if flow.advance(fixed_now()).unwrap() == Advance::Finished {
                finished += 1;
            }
        }

        assert_eq!(finished, 1);
        assert!(flow.is_complete());
        assert_eq!(flow.completed_at(), Some(fixed_now()));

        // The terminal state accepts no further transitions.
        assert_eq!(flow.advance(fixed_now()).unwrap_err(), FlowError::Completed);
        assert_eq!(flow.retreat().unwrap_err(), FlowError::Completed);
    }

    #[test]
    fn finished_flow_has_unique_question_texts() {
        let mut flow = build_flow(5);
        while flow.advance(fixed_now()).unwrap() != Advance::Finished {}

        assert_eq!(flow.answers().len(), 5);
        let distinct: HashSet<_> = flow.answers().iter().map(|a| &a.question).collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn progress_fraction_spans_tenth_to_one() {
        let mut flow = build_flow(10);
        let start = flow.progress();
        assert_eq!(start.position, 1);
        assert!((start.fraction - 0.1).abs() < f64::EPSILON);

        for _ in 0..9 {
            flow.advance(fixed_now()).unwrap();
        }
        let end = flow.progress();
        assert_eq!(end.position, 10);
        assert!((end.fraction - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn retreat_preserves_recorded_answer() {
        let mut flow = build_flow(3);
        flow.set_draft("the original answer");
        flow.advance(fixed_now()).unwrap();

        let before = flow.answers().to_vec();
        assert!(flow.retreat().unwrap());
        assert_eq!(flow.draft(), "the original answer");

        // Advancing without edits re-produces the same record.
        flow.advance(fixed_now()).unwrap();
        assert_eq!(flow.answers(), before.as_slice());
    }

    #[test]
    fn replacing_an_answer_keeps_a_single_record() {
        let mut flow = build_flow(3);
        flow.set_draft("first take");
        flow.advance(fixed_now()).unwrap();

        flow.retreat().unwrap();
        flow.set_draft("second take");
        flow.advance(fixed_now()).unwrap();

        let matching: Vec<_> = flow
            .answers()
            .iter()
            .filter(|a| a.question == "Question 1?")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].answer, "second take");
    }

    #[test]
    fn retreat_is_blocked_at_the_first_question() {
        let mut flow = build_flow(2);
        assert!(!flow.retreat().unwrap());
        assert_eq!(flow.current_index(), 0);
    }

    #[test]
    fn retreat_discards_the_unsaved_draft() {
        let mut flow = build_flow(3);
        flow.set_draft("saved");
        flow.advance(fixed_now()).unwrap();

        // Type something at question 2, then walk away without advancing.
        flow.set_draft("never saved");
        flow.retreat().unwrap();
        flow.advance(fixed_now()).unwrap();

        assert_eq!(flow.draft(), "");
        assert_eq!(flow.answers().len(), 1);
    }

    // Matching by question text rather than list position is preserved
    // behavior: identical question strings share one draft and one record.
    #[test]
    fn duplicate_question_texts_share_one_record() {
        let questions = vec!["Tell me about yourself.".to_string(); 2];
        let mut flow = InterviewFlow::new(questions, fixed_now()).unwrap();

        flow.set_draft("first phrasing");
        flow.advance(fixed_now()).unwrap();

        // The "second" question preloads the first one's answer.
        assert_eq!(flow.draft(), "first phrasing");

        flow.set_draft("revised phrasing");
        let step = flow.advance(fixed_now()).unwrap();
        assert_eq!(step, Advance::Finished);

        assert_eq!(flow.answers().len(), 1);
        assert_eq!(flow.answers()[0].answer, "revised phrasing");
    }
}
