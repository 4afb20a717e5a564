//! The attempt state machine.
//!
//! An [`Attempt`] is one taker's pass through an assessment. It starts
//! `InProgress` and ends `Completed`, either because the taker submitted or
//! because the countdown reached zero. Both paths land in the same terminal
//! state; scoring only ever sees the final answers.

use std::sync::Arc;

use log::{debug, info};
use uuid::Uuid;

use crate::engine::scoring::{evaluate, AssessmentResult};
use crate::error::{PreconditionError, ValidationError};
use crate::models::{AssessmentDefinition, Question};

/// What ended an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// The taker submitted manually.
    Submitted,
    /// The countdown reached zero.
    TimedOut,
}

/// Lifecycle of an attempt. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    InProgress,
    Completed(CompletionReason),
}

#[derive(Debug, Clone)]
pub struct Attempt {
    id: Uuid,
    definition: Arc<AssessmentDefinition>,
    answers: Vec<Option<usize>>,
    current_index: usize,
    remaining_seconds: u32,
    status: AttemptStatus,
}

impl Attempt {
    /// Start a fresh attempt, refusing definitions that fail validation.
    pub fn start(definition: Arc<AssessmentDefinition>) -> Result<Self, ValidationError> {
        definition.validate()?;

        let attempt = Self {
            id: Uuid::new_v4(),
            answers: vec![None; definition.question_count()],
            current_index: 0,
            remaining_seconds: definition.time_limit_seconds,
            status: AttemptStatus::InProgress,
            definition,
        };
        info!(
            "attempt {} started on {:?}: {} questions, {}s",
            attempt.id,
            attempt.definition.id,
            attempt.answers.len(),
            attempt.remaining_seconds
        );
        Ok(attempt)
    }

    /// Begin a new attempt on the same assessment. This one is left as is.
    pub fn retake(&self) -> Self {
        let attempt = Self {
            id: Uuid::new_v4(),
            definition: Arc::clone(&self.definition),
            answers: vec![None; self.answers.len()],
            current_index: 0,
            remaining_seconds: self.definition.time_limit_seconds,
            status: AttemptStatus::InProgress,
        };
        info!("attempt {} started as a retake of {}", attempt.id, self.id);
        attempt
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn definition(&self) -> &AssessmentDefinition {
        &self.definition
    }

    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, AttemptStatus::Completed(_))
    }

    pub fn completion_reason(&self) -> Option<CompletionReason> {
        match self.status {
            AttemptStatus::Completed(reason) => Some(reason),
            AttemptStatus::InProgress => None,
        }
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn answer(&self, question_index: usize) -> Option<usize> {
        self.answers.get(question_index).copied().flatten()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.definition.questions[self.current_index]
    }

    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_fully_answered(&self) -> bool {
        self.answered_count() == self.answers.len()
    }

    /// Position through the assessment, counting the current question.
    pub fn progress_percent(&self) -> u16 {
        (((self.current_index + 1) * 100) / self.answers.len()) as u16
    }

    /// Record `option_index` for `question_index`, replacing any earlier choice.
    pub fn select_answer(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<(), PreconditionError> {
        self.ensure_in_progress()?;
        let question = self.question(question_index)?;
        let len = question.options.len();
        if option_index >= len {
            return Err(PreconditionError::OptionOutOfRange {
                question: question_index,
                index: option_index,
                len,
            });
        }

        self.answers[question_index] = Some(option_index);
        debug!(
            "attempt {}: question {} answered with option {}",
            self.id, question_index, option_index
        );
        Ok(())
    }

    /// Jump to any question.
    pub fn go_to(&mut self, index: usize) -> Result<(), PreconditionError> {
        self.ensure_in_progress()?;
        self.question(index)?;
        self.current_index = index;
        Ok(())
    }

    /// Move to the next question. Stays put on the last one.
    pub fn advance(&mut self) -> Result<(), PreconditionError> {
        self.ensure_in_progress()?;
        if self.current_index + 1 < self.answers.len() {
            self.go_to(self.current_index + 1)?;
        }
        Ok(())
    }

    /// Move to the previous question. Stays put on the first one.
    pub fn retreat(&mut self) -> Result<(), PreconditionError> {
        self.ensure_in_progress()?;
        if self.current_index > 0 {
            self.go_to(self.current_index - 1)?;
        }
        Ok(())
    }

    /// Count down `elapsed_seconds`, completing the attempt when time runs out.
    ///
    /// Returns the status after the tick so the caller can stop its timer.
    pub fn tick(&mut self, elapsed_seconds: u32) -> Result<AttemptStatus, PreconditionError> {
        self.ensure_in_progress()?;
        self.remaining_seconds = self.remaining_seconds.saturating_sub(elapsed_seconds);
        if self.remaining_seconds == 0 {
            self.complete(CompletionReason::TimedOut);
        }
        Ok(self.status)
    }

    /// Finish the attempt. Unanswered questions are scored as incorrect.
    pub fn submit(&mut self) -> Result<(), PreconditionError> {
        self.ensure_in_progress()?;
        self.complete(CompletionReason::Submitted);
        Ok(())
    }

    /// Score a completed attempt.
    pub fn result(&self) -> Result<AssessmentResult, PreconditionError> {
        if !self.is_completed() {
            return Err(PreconditionError::AttemptInProgress);
        }
        Ok(evaluate(&self.definition, &self.answers))
    }

    fn complete(&mut self, reason: CompletionReason) {
        self.status = AttemptStatus::Completed(reason);
        info!(
            "attempt {} completed ({:?}) with {}/{} answered, {}s left",
            self.id,
            reason,
            self.answered_count(),
            self.answers.len(),
            self.remaining_seconds
        );
    }

    fn ensure_in_progress(&self) -> Result<(), PreconditionError> {
        match self.status {
            AttemptStatus::InProgress => Ok(()),
            AttemptStatus::Completed(_) => Err(PreconditionError::AttemptCompleted),
        }
    }

    fn question(&self, index: usize) -> Result<&Question, PreconditionError> {
        self.definition
            .questions
            .get(index)
            .ok_or(PreconditionError::QuestionOutOfRange {
                index,
                len: self.answers.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::definition;

    fn attempt(len: usize) -> Attempt {
        Attempt::start(Arc::new(definition(len))).unwrap()
    }

    fn assert_invariants(attempt: &Attempt) {
        assert!(attempt.remaining_seconds() <= attempt.definition().time_limit_seconds);
        assert!(attempt.current_index() < attempt.question_count());
    }

    #[test]
    fn test_start_initial_state() {
        let attempt = attempt(5);
        assert_eq!(attempt.status(), AttemptStatus::InProgress);
        assert_eq!(attempt.answers(), &[None; 5]);
        assert_eq!(attempt.current_index(), 0);
        assert_eq!(attempt.remaining_seconds(), 1200);
        assert_eq!(attempt.progress_percent(), 20);
    }

    #[test]
    fn test_start_rejects_invalid_definition() {
        let mut def = definition(2);
        def.questions[0].options.truncate(1);
        assert!(matches!(
            Attempt::start(Arc::new(def)),
            Err(ValidationError::TooFewOptions { question: 0, .. })
        ));
    }

    #[test]
    fn test_select_answer_last_write_wins() {
        let mut attempt = attempt(3);
        attempt.select_answer(1, 2).unwrap();
        attempt.select_answer(1, 0).unwrap();
        attempt.select_answer(1, 0).unwrap();
        assert_eq!(attempt.answers(), &[None, Some(0), None]);
        assert_eq!(attempt.current_index(), 0);
        assert_eq!(attempt.answered_count(), 1);
    }

    #[test]
    fn test_select_answer_rejects_out_of_range() {
        let mut attempt = attempt(3);
        attempt.select_answer(0, 1).unwrap();

        assert_eq!(
            attempt.select_answer(0, 4),
            Err(PreconditionError::OptionOutOfRange {
                question: 0,
                index: 4,
                len: 4
            })
        );
        assert_eq!(
            attempt.select_answer(3, 0),
            Err(PreconditionError::QuestionOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(attempt.answers(), &[Some(1), None, None]);
    }

    #[test]
    fn test_navigation() {
        let mut attempt = attempt(4);
        attempt.go_to(3).unwrap();
        assert_eq!(attempt.current_index(), 3);
        attempt.advance().unwrap();
        assert_eq!(attempt.current_index(), 3);

        attempt.go_to(0).unwrap();
        attempt.retreat().unwrap();
        assert_eq!(attempt.current_index(), 0);
        attempt.advance().unwrap();
        assert_eq!(attempt.current_index(), 1);

        assert_eq!(
            attempt.go_to(4),
            Err(PreconditionError::QuestionOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(attempt.current_index(), 1);
        assert_invariants(&attempt);
    }

    #[test]
    fn test_tick_counts_down_and_times_out() {
        let mut attempt = attempt(5);
        attempt.select_answer(0, 0).unwrap();

        let mut last = attempt.remaining_seconds();
        for _ in 0..1199 {
            assert_eq!(attempt.tick(1), Ok(AttemptStatus::InProgress));
            assert!(attempt.remaining_seconds() < last);
            last = attempt.remaining_seconds();
            assert_invariants(&attempt);
        }
        assert_eq!(attempt.remaining_seconds(), 1);

        assert_eq!(
            attempt.tick(1),
            Ok(AttemptStatus::Completed(CompletionReason::TimedOut))
        );
        assert_eq!(attempt.remaining_seconds(), 0);
        assert_eq!(attempt.result().unwrap().score_percent, 20);
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let mut attempt = attempt(2);
        attempt.tick(5000).unwrap();
        assert_eq!(attempt.remaining_seconds(), 0);
        assert_eq!(
            attempt.completion_reason(),
            Some(CompletionReason::TimedOut)
        );
    }

    #[test]
    fn test_partial_submit_is_not_an_error() {
        let mut attempt = attempt(5);
        for i in [0, 2, 3] {
            let correct = attempt.definition().questions[i].correct_index().unwrap();
            attempt.select_answer(i, correct).unwrap();
        }
        attempt.submit().unwrap();
        assert_eq!(
            attempt.completion_reason(),
            Some(CompletionReason::Submitted)
        );

        let result = attempt.result().unwrap();
        assert_eq!(result.score_percent, 60);
        assert!(!result.passed);
    }

    #[test]
    fn test_completed_attempt_is_immutable() {
        let mut attempt = attempt(3);
        attempt.select_answer(0, 0).unwrap();
        attempt.go_to(1).unwrap();
        attempt.tick(10).unwrap();
        attempt.submit().unwrap();

        let before = attempt.clone();
        assert_eq!(
            attempt.select_answer(1, 1),
            Err(PreconditionError::AttemptCompleted)
        );
        assert_eq!(attempt.go_to(2), Err(PreconditionError::AttemptCompleted));
        assert_eq!(attempt.advance(), Err(PreconditionError::AttemptCompleted));
        assert_eq!(attempt.retreat(), Err(PreconditionError::AttemptCompleted));
        assert_eq!(attempt.tick(1), Err(PreconditionError::AttemptCompleted));
        assert_eq!(attempt.submit(), Err(PreconditionError::AttemptCompleted));

        assert_eq!(attempt.answers(), before.answers());
        assert_eq!(attempt.current_index(), before.current_index());
        assert_eq!(attempt.remaining_seconds(), before.remaining_seconds());
        assert_eq!(attempt.status(), before.status());
    }

    #[test]
    fn test_result_requires_completion() {
        let attempt = attempt(2);
        assert_eq!(attempt.result(), Err(PreconditionError::AttemptInProgress));
    }

    #[test]
    fn test_retake_starts_fresh() {
        let mut first = attempt(3);
        first.select_answer(2, 1).unwrap();
        first.tick(100).unwrap();
        first.submit().unwrap();

        let second = first.retake();
        assert_ne!(second.id(), first.id());
        assert_eq!(second.status(), AttemptStatus::InProgress);
        assert_eq!(second.answers(), &[None; 3]);
        assert_eq!(second.remaining_seconds(), 1200);
        assert!(first.is_completed());
    }
}
