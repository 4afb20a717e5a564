//! Pure scoring of a finished attempt.

use serde::Serialize;

use crate::models::AssessmentDefinition;

/// Score summary derived from a definition and a set of answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentResult {
    pub score_percent: u8,
    pub passed: bool,
    pub correct_count: usize,
    pub total: usize,
    pub per_question_correctness: Vec<bool>,
}

/// Score `answers` against `definition`.
///
/// A question counts as correct when it was answered with its correct
/// option. Unanswered questions and out-of-range selections are incorrect.
/// Answers beyond the question count are ignored.
pub fn evaluate(definition: &AssessmentDefinition, answers: &[Option<usize>]) -> AssessmentResult {
    let per_question_correctness: Vec<bool> = definition
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            answers
                .get(index)
                .copied()
                .flatten()
                .is_some_and(|selected| question.is_correct(selected))
        })
        .collect();

    let total = per_question_correctness.len();
    let correct_count = per_question_correctness.iter().filter(|c| **c).count();
    let score_percent = percent_round_half_up(correct_count, total);

    AssessmentResult {
        score_percent,
        passed: u32::from(score_percent) >= definition.pass_threshold_percent,
        correct_count,
        total,
        per_question_correctness,
    }
}

/// `round(100 * correct / total)` with halves rounded up, in integers.
fn percent_round_half_up(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total) as u64;
    let total = total as u64;
    ((200 * correct + total) / (2 * total)) as u8
}
