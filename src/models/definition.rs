use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Authoring tools cap questions at this many options. Evaluation accepts any
/// count of two or more.
pub const MAX_AUTHORED_OPTIONS: usize = 6;

/// A single selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Index of the correct option, if the question has exactly one.
    pub fn correct_index(&self) -> Option<usize> {
        let mut correct = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_correct);
        match (correct.next(), correct.next()) {
            (Some((index, _)), None) => Some(index),
            _ => None,
        }
    }

    /// Whether `option_index` names the correct option of this question.
    pub fn is_correct(&self, option_index: usize) -> bool {
        self.options
            .get(option_index)
            .is_some_and(|option| option.is_correct)
    }
}

/// The immutable description of a gradeable quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDefinition {
    pub id: String,
    pub title: String,
    /// Course label, not a validated reference.
    #[serde(default)]
    pub course: String,
    pub time_limit_seconds: u32,
    pub pass_threshold_percent: u32,
    pub questions: Vec<Question>,
}

impl AssessmentDefinition {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Check every structural rule an attempt relies on.
    ///
    /// Returns the first violation found, scanning global parameters before
    /// questions, and questions in order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time_limit_seconds == 0 {
            return Err(ValidationError::ZeroTimeLimit);
        }
        if self.pass_threshold_percent > 100 {
            return Err(ValidationError::PassThresholdOutOfRange(
                self.pass_threshold_percent,
            ));
        }
        if self.questions.is_empty() {
            return Err(ValidationError::NoQuestions);
        }

        let mut question_ids = HashSet::with_capacity(self.questions.len());
        for (index, question) in self.questions.iter().enumerate() {
            if !question_ids.insert(question.id.as_str()) {
                return Err(ValidationError::DuplicateQuestionId {
                    id: question.id.clone(),
                });
            }
            validate_question(index, question)?;
        }

        Ok(())
    }
}

fn validate_question(index: usize, question: &Question) -> Result<(), ValidationError> {
    if question.options.len() < 2 {
        return Err(ValidationError::TooFewOptions {
            question: index,
            count: question.options.len(),
        });
    }

    let correct = question.options.iter().filter(|o| o.is_correct).count();
    if correct != 1 {
        return Err(ValidationError::CorrectOptionCount {
            question: index,
            count: correct,
        });
    }

    let mut option_ids = HashSet::with_capacity(question.options.len());
    for option in &question.options {
        if !option_ids.insert(option.id.as_str()) {
            return Err(ValidationError::DuplicateOptionId {
                question: index,
                id: option.id.clone(),
            });
        }
    }

    Ok(())
}

/// Free-function form of [`AssessmentDefinition::validate`].
pub fn validate(definition: &AssessmentDefinition) -> Result<(), ValidationError> {
    definition.validate()
}


#[cfg(test)]
mod tests {
    use super::fixtures::{definition, question};
    use super::*;

    #[test]
    fn test_valid_definition() {
        assert_eq!(definition(5).validate(), Ok(()));
        assert_eq!(validate(&definition(1)), Ok(()));
    }

    #[test]
    fn test_rejects_empty_assessment() {
        let mut def = definition(3);
        def.questions.clear();
        assert_eq!(def.validate(), Err(ValidationError::NoQuestions));
    }

    #[test]
    fn test_rejects_bad_global_parameters() {
        let mut def = definition(2);
        def.time_limit_seconds = 0;
        assert_eq!(def.validate(), Err(ValidationError::ZeroTimeLimit));

        let mut def = definition(2);
        def.pass_threshold_percent = 101;
        assert_eq!(
            def.validate(),
            Err(ValidationError::PassThresholdOutOfRange(101))
        );

        def.pass_threshold_percent = 100;
        assert!(def.validate().is_ok());
        def.pass_threshold_percent = 0;
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_rejects_single_option_question() {
        let mut def = definition(3);
        def.questions[1] = question(1, 0, 1);
        assert_eq!(
            def.validate(),
            Err(ValidationError::TooFewOptions {
                question: 1,
                count: 1
            })
        );
    }

    #[test]
    fn test_requires_exactly_one_correct_option() {
        let mut def = definition(3);
        def.questions[2].options[3].is_correct = true;
        def.questions[2].options[2].is_correct = true;
        assert_eq!(
            def.validate(),
            Err(ValidationError::CorrectOptionCount {
                question: 2,
                count: 2
            })
        );

        let mut def = definition(3);
        for option in &mut def.questions[0].options {
            option.is_correct = false;
        }
        assert_eq!(
            def.validate(),
            Err(ValidationError::CorrectOptionCount {
                question: 0,
                count: 0
            })
        );
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut def = definition(3);
        def.questions[2].id = "q0".to_string();
        assert!(matches!(
            def.validate(),
            Err(ValidationError::DuplicateQuestionId { .. })
        ));

        let mut def = definition(3);
        def.questions[1].options[1].id = "q1o0".to_string();
        assert!(matches!(
            def.validate(),
            Err(ValidationError::DuplicateOptionId { question: 1, .. })
        ));
    }

    #[test]
    fn test_accepts_more_options_than_authoring_cap() {
        let mut def = definition(1);
        def.questions[0] = question(0, 7, MAX_AUTHORED_OPTIONS + 2);
        assert!(def.validate().is_ok());
        assert_eq!(def.questions[0].correct_index(), Some(7));
    }

    #[test]
    fn test_deserializes_camel_case() {
        let json = r#"{
            "id": "py",
            "title": "Python",
            "timeLimitSeconds": 60,
            "passThresholdPercent": 50,
            "questions": [{
                "id": "1",
                "prompt": "Pick one",
                "options": [
                    {"id": "a", "text": "yes", "isCorrect": true},
                    {"id": "b", "text": "no"}
                ]
            }]
        }"#;
        let def: AssessmentDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.time_limit_seconds, 60);
        assert_eq!(def.course, "");
        assert_eq!(def.questions[0].correct_index(), Some(0));
        assert!(def.validate().is_ok());
    }
}
