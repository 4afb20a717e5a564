use std::sync::Arc;

use crate::engine::{AssessmentResult, Attempt, AttemptStatus, CompletionReason};
use crate::error::{PreconditionError, ValidationError};
use crate::models::{AssessmentDefinition, Question};

/// Which screen to show. Derived from the attempt, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Taking,
    Result,
}

/// One taker's session: the assessment, the current attempt and cursor state.
pub struct App {
    definition: Arc<AssessmentDefinition>,
    attempt: Option<Attempt>,
    highlighted_option: usize,
    result_scroll: usize,
}

impl App {
    pub fn new(definition: AssessmentDefinition) -> Result<Self, ValidationError> {
        definition.validate()?;
        Ok(Self {
            definition: Arc::new(definition),
            attempt: None,
            highlighted_option: 0,
            result_scroll: 0,
        })
    }

    pub fn screen(&self) -> Screen {
        match self.attempt.as_ref().map(Attempt::status) {
            None => Screen::Welcome,
            Some(AttemptStatus::InProgress) => Screen::Taking,
            Some(AttemptStatus::Completed(_)) => Screen::Result,
        }
    }

    pub fn definition(&self) -> &AssessmentDefinition {
        &self.definition
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    pub fn start_quiz(&mut self) -> Result<&Attempt, ValidationError> {
        let attempt = Attempt::start(Arc::clone(&self.definition))?;
        self.reset_cursors();
        Ok(&*self.attempt.insert(attempt))
    }

    /// Replace a completed, failed attempt with a fresh one.
    pub fn retake(&mut self) -> Option<&Attempt> {
        if !self.can_retake() {
            return None;
        }
        let fresh = self.attempt.as_ref()?.retake();
        self.reset_cursors();
        Some(&*self.attempt.insert(fresh))
    }

    pub fn can_retake(&self) -> bool {
        self.result().is_some_and(|result| !result.passed)
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.attempt
            .as_ref()
            .filter(|a| !a.is_completed())
            .map(Attempt::current_question)
    }

    pub fn highlighted_option(&self) -> usize {
        self.highlighted_option
    }

    pub fn highlight_next_option(&mut self) {
        if let Some(len) = self.current_question().map(|q| q.options.len()) {
            self.highlighted_option = (self.highlighted_option + 1) % len;
        }
    }

    pub fn highlight_previous_option(&mut self) {
        if let Some(len) = self.current_question().map(|q| q.options.len()) {
            self.highlighted_option = (self.highlighted_option + len - 1) % len;
        }
    }

    /// Answer the current question with the highlighted option.
    pub fn choose_highlighted(&mut self) -> Result<(), PreconditionError> {
        let option = self.highlighted_option;
        let attempt = self.attempt_mut()?;
        let question = attempt.current_index();
        attempt.select_answer(question, option)
    }

    pub fn next_question(&mut self) -> Result<(), PreconditionError> {
        self.attempt_mut()?.advance()?;
        self.sync_highlight();
        Ok(())
    }

    pub fn previous_question(&mut self) -> Result<(), PreconditionError> {
        self.attempt_mut()?.retreat()?;
        self.sync_highlight();
        Ok(())
    }

    pub fn go_to_question(&mut self, index: usize) -> Result<(), PreconditionError> {
        self.attempt_mut()?.go_to(index)?;
        self.sync_highlight();
        Ok(())
    }

    /// Manual submission is offered once every question has an answer.
    pub fn can_submit(&self) -> bool {
        self.attempt
            .as_ref()
            .is_some_and(|a| !a.is_completed() && a.is_fully_answered())
    }

    /// Submit if allowed. Returns whether the attempt was submitted.
    pub fn submit(&mut self) -> Result<bool, PreconditionError> {
        if !self.can_submit() {
            return Ok(false);
        }
        self.attempt_mut()?.submit()?;
        Ok(true)
    }

    pub fn tick(&mut self, elapsed_seconds: u32) -> Result<AttemptStatus, PreconditionError> {
        self.attempt_mut()?.tick(elapsed_seconds)
    }

    /// Score of the finished attempt, if there is one.
    pub fn result(&self) -> Option<AssessmentResult> {
        self.attempt.as_ref().and_then(|a| a.result().ok())
    }

    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.attempt.as_ref().and_then(Attempt::completion_reason)
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn scroll_results_down(&mut self) {
        let max = self.definition.question_count().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn attempt_mut(&mut self) -> Result<&mut Attempt, PreconditionError> {
        // No attempt yet behaves like one that cannot accept input.
        self.attempt
            .as_mut()
            .ok_or(PreconditionError::AttemptCompleted)
    }

    fn sync_highlight(&mut self) {
        self.highlighted_option = self
            .attempt
            .as_ref()
            .and_then(|a| a.answer(a.current_index()))
            .unwrap_or(0);
    }

    fn reset_cursors(&mut self) {
        self.highlighted_option = 0;
        self.result_scroll = 0;
    }
}
